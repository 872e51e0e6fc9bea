//! # rd-directory
//!
//! A minimal authorization directory: role CRUD, user-role membership,
//! and membership queries over a pluggable storage engine, partitioned
//! by application name.
//!
//! ## Components
//!
//! - [`RoleStore`] - durable role and membership-edge CRUD, the source
//!   of truth
//! - [`MembershipIndex`] - derived in-memory index answering membership
//!   queries without full scans
//! - [`RoleDirectory`] - the public contract: validation, bulk
//!   semantics, current-user overloads, and the opaque cookie-cache
//!   configuration surface
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use rd_directory::{DirectoryConfig, RoleDirectory};
//! use rd_storage_memory::MemoryEngine;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> rd_directory::Result<()> {
//! let engine = Arc::new(MemoryEngine::new());
//! let directory = RoleDirectory::open(DirectoryConfig::new("myapp"), engine).await?;
//!
//! directory.create_role("Admin").await?;
//! directory.add_user_to_role("alice", "Admin").await?;
//! assert!(directory.is_user_in_role("alice", "Admin").await?);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod available;
pub mod config;
pub mod error;
pub mod identity;
pub mod index;
pub mod service;
pub mod store;
mod validate;

pub use available::{AvailableRoles, AvailableRolesIter};
pub use config::{CookieProtection, DirectoryConfig, RoleCookieConfig};
pub use error::{DirectoryError, Result};
pub use identity::{IdentityContext, StaticIdentity};
pub use index::MembershipIndex;
pub use service::RoleDirectory;
pub use store::RoleStore;
