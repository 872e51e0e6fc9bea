//! End-to-end directory scenario, on both in-tree engines.

use std::sync::Arc;

use rd_directory::{DirectoryConfig, RoleDirectory, StaticIdentity};
use rd_storage::DirectoryEngine;
use rd_storage_memory::MemoryEngine;
use rd_storage_sql::SqliteEngine;

use crate::common::TestEnv;

/// Drives the canonical directory scenario: two roles, one member of
/// both, the populated-delete guard, and a forced cascade.
async fn run_scenario(directory: &RoleDirectory) -> anyhow::Result<()> {
    directory.create_role("Admin").await?;
    directory.create_role("Editor").await?;
    directory.add_user_to_roles("alice", &["Admin", "Editor"]).await?;

    assert_eq!(
        directory.roles_for_user("alice").await?,
        vec!["Admin", "Editor"]
    );

    let available: Vec<String> = directory
        .available_roles_for_user("alice")
        .await?
        .iter()
        .map(str::to_owned)
        .collect();
    assert!(available.is_empty());

    let err = directory.delete_role("Admin", false).await.unwrap_err();
    assert!(err.is_populated());

    directory.delete_role("Admin", true).await?;
    assert_eq!(directory.roles_for_user("alice").await?, vec!["Editor"]);

    let available: Vec<String> = directory
        .available_roles_for_user("alice")
        .await?
        .iter()
        .map(str::to_owned)
        .collect();
    assert!(available.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_scenario_on_memory_engine() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    run_scenario(&env.directory).await
}

#[tokio::test]
async fn test_scenario_on_sqlite_engine() -> anyhow::Result<()> {
    let engine: Arc<dyn DirectoryEngine> = Arc::new(SqliteEngine::in_memory().await?);
    let directory = RoleDirectory::open(DirectoryConfig::new("myapp"), engine).await?;
    run_scenario(&directory).await
}

#[tokio::test]
async fn test_current_user_queries_follow_the_identity() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    env.directory.create_role("Admin").await?;
    env.directory.add_user_to_role("alice", "Admin").await?;

    let alice = StaticIdentity::authenticated("alice");
    assert!(env.directory.is_current_user_in_role(&alice, "Admin").await?);
    assert_eq!(
        env.directory.roles_for_current_user(&alice).await?,
        vec!["Admin"]
    );

    let nobody = StaticIdentity::anonymous();
    let err = env
        .directory
        .is_current_user_in_role(&nobody, "Admin")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("no current user"));
    Ok(())
}

#[tokio::test]
async fn test_partitions_do_not_share_roles() -> anyhow::Result<()> {
    let engine = Arc::new(MemoryEngine::new());
    let app_a =
        RoleDirectory::open(DirectoryConfig::new("app-a"), engine.clone()).await?;
    let app_b = RoleDirectory::open(DirectoryConfig::new("app-b"), engine).await?;

    app_a.create_role("Admin").await?;

    assert!(app_a.role_exists("Admin").await?);
    assert!(!app_b.role_exists("Admin").await?);
    app_b.create_role("Admin").await?;
    assert_eq!(app_b.users_in_role("Admin").await?, Vec::<String>::new());
    Ok(())
}
