//! Common test utilities and fixtures.

use std::sync::Arc;

use rd_directory::{DirectoryConfig, RoleDirectory};
use rd_storage_memory::MemoryEngine;

/// Test environment holding a directory over a fresh in-memory engine.
pub struct TestEnv {
    /// The engine backing the directory, kept so tests can reopen
    /// against the same stored state.
    pub engine: Arc<MemoryEngine>,
    /// The directory under test.
    pub directory: RoleDirectory,
}

impl TestEnv {
    /// Creates a new test environment for the "myapp" partition.
    pub async fn new() -> anyhow::Result<Self> {
        // Initialize tracing for tests
        let _ = tracing_subscriber::fmt()
            .with_env_filter("rd_directory=debug")
            .try_init();

        let engine = Arc::new(MemoryEngine::new());
        let directory =
            RoleDirectory::open(DirectoryConfig::new("myapp"), engine.clone()).await?;

        Ok(Self { engine, directory })
    }

    /// Reopens a directory over the same engine, forcing a fresh
    /// membership index rebuild from stored state.
    pub async fn reopen(&self) -> anyhow::Result<RoleDirectory> {
        Ok(RoleDirectory::open(DirectoryConfig::new("myapp"), self.engine.clone()).await?)
    }
}
