//! # rd-storage-sql
//!
//! `SQLite` implementation of the directory storage engine, via `sqlx`.
//!
//! Suitable for the directory's local-disk scale: a single database file
//! (or an in-memory database for tests) holds the `roles` and
//! `role_members` tables. The schema is applied on connect.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

mod engine;
mod entities;
mod error;

pub use engine::SqliteEngine;
