//! # rd-storage
//!
//! Storage abstraction for the role directory.
//!
//! This crate defines the persistence contract that must be implemented
//! by concrete storage backends (in-memory, SQL, etc.).
//!
//! ## Provider Trait
//!
//! - [`DirectoryEngine`] - the six durable operations the directory core
//!   requires: insert role, delete role (with edge cascade), insert
//!   membership edge, delete membership edge, list roles, list members.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod engine;
pub mod error;

pub use engine::DirectoryEngine;
pub use error::{StorageError, StorageResult};
