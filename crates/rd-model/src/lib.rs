//! # rd-model
//!
//! Domain types for the role directory.
//!
//! This crate defines the entities shared by the storage engines and the
//! directory service:
//!
//! - [`Role`] - a named group granting membership-based authorization
//! - [`name`] - validation and normalization rules for role names and
//!   user identifiers

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod name;
pub mod role;

pub use name::{is_valid_name, name_key, NAME_DELIMITER};
pub use role::Role;
