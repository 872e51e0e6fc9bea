//! Role CRUD integration tests.

use crate::common::TestEnv;

#[tokio::test]
async fn test_created_roles_are_listed_and_exist() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    env.directory.create_role("Admin").await?;
    env.directory.create_role("Editor").await?;

    assert!(env.directory.role_exists("admin").await?);
    assert!(env.directory.role_exists("EDITOR").await?);
    assert!(!env.directory.role_exists("Viewer").await?);

    let mut roles = env.directory.list_roles().await?;
    roles.sort();
    assert_eq!(roles, vec!["Admin", "Editor"]);
    Ok(())
}

#[tokio::test]
async fn test_deleted_roles_stop_existing() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    env.directory.create_role("Admin").await?;
    env.directory.delete_role("Admin", false).await?;

    assert!(!env.directory.role_exists("Admin").await?);
    assert!(env.directory.list_roles().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_delete_of_unknown_role_fails() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    let err = env.directory.delete_role("Ghost", false).await.unwrap_err();
    assert!(err.is_not_found());
    Ok(())
}

#[tokio::test]
async fn test_role_names_collide_case_insensitively() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    env.directory.create_role("Admin").await?;
    let err = env.directory.create_role("aDmIn").await.unwrap_err();
    assert!(err.is_already_exists());

    // The original casing is the one kept.
    assert_eq!(env.directory.list_roles().await?, vec!["Admin"]);
    Ok(())
}

#[tokio::test]
async fn test_stored_roles_survive_reopen() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    env.directory.create_role("Admin").await?;
    env.directory.add_user_to_role("alice", "Admin").await?;

    let reopened = env.reopen().await?;
    assert!(reopened.role_exists("Admin").await?);
    assert_eq!(reopened.roles_for_user("alice").await?, vec!["Admin"]);
    Ok(())
}
