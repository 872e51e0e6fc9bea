//! Membership mutation and query integration tests.

use std::collections::BTreeSet;

use rd_directory::RoleDirectory;

use crate::common::TestEnv;

/// Collects `roles_for_user` for several users, for before/after
/// comparisons of the whole membership picture.
async fn memberships(
    directory: &RoleDirectory,
    users: &[&str],
) -> anyhow::Result<Vec<Vec<String>>> {
    let mut all = Vec::with_capacity(users.len());
    for user in users {
        all.push(directory.roles_for_user(user).await?);
    }
    Ok(all)
}

#[tokio::test]
async fn test_add_twice_yields_same_membership_as_once() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    env.directory.create_role("Admin").await?;

    env.directory.add_user_to_role("alice", "Admin").await?;
    let once = memberships(&env.directory, &["alice"]).await?;

    env.directory.add_user_to_role("alice", "Admin").await?;
    let twice = memberships(&env.directory, &["alice"]).await?;

    assert_eq!(once, twice);
    assert_eq!(env.directory.users_in_role("Admin").await?, vec!["alice"]);
    Ok(())
}

#[tokio::test]
async fn test_assigned_and_available_partition_all_roles() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    for role in ["Admin", "Editor", "Viewer", "Auditor"] {
        env.directory.create_role(role).await?;
    }
    env.directory
        .add_user_to_roles("alice", &["Editor", "Auditor"])
        .await?;

    let assigned: BTreeSet<String> =
        env.directory.roles_for_user("alice").await?.into_iter().collect();
    let available: BTreeSet<String> = env
        .directory
        .available_roles_for_user("alice")
        .await?
        .iter()
        .map(str::to_owned)
        .collect();
    let all: BTreeSet<String> = env.directory.list_roles().await?.into_iter().collect();

    assert!(assigned.is_disjoint(&available));
    let union: BTreeSet<String> = assigned.union(&available).cloned().collect();
    assert_eq!(union, all);
    Ok(())
}

#[tokio::test]
async fn test_bulk_round_trip_restores_membership_exactly() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    for role in ["Admin", "Editor", "Viewer"] {
        env.directory.create_role(role).await?;
    }
    env.directory.add_user_to_role("carol", "Viewer").await?;

    let users = ["alice", "bob", "carol"];
    let before = memberships(&env.directory, &users).await?;

    env.directory
        .add_users_to_roles(&["alice", "bob"], &["Admin", "Editor"])
        .await?;
    env.directory
        .remove_users_from_roles(&["alice", "bob"], &["Admin", "Editor"])
        .await?;

    assert_eq!(memberships(&env.directory, &users).await?, before);
    Ok(())
}

#[tokio::test]
async fn test_forced_delete_strips_edges_for_every_member() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    env.directory.create_role("Admin").await?;
    env.directory.create_role("Editor").await?;
    env.directory
        .add_users_to_role(&["alice", "bob"], "Admin")
        .await?;
    env.directory.add_user_to_role("alice", "Editor").await?;

    let err = env.directory.delete_role("Admin", false).await.unwrap_err();
    assert!(err.is_populated());

    env.directory.delete_role("Admin", true).await?;

    assert_eq!(env.directory.roles_for_user("alice").await?, vec!["Editor"]);
    assert!(env.directory.roles_for_user("bob").await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_failed_bulk_validation_leaves_no_partial_writes() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    env.directory.create_role("Admin").await?;

    // Invalid element after a valid one.
    let err = env
        .directory
        .add_users_to_role(&["alice", "b,ob"], "Admin")
        .await
        .unwrap_err();
    assert!(err.is_invalid_name());
    assert!(env.directory.users_in_role("Admin").await?.is_empty());

    // Unknown role after a known one.
    let err = env
        .directory
        .add_users_to_roles(&["alice"], &["Admin", "Ghost"])
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(env.directory.users_in_role("Admin").await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_membership_queries_survive_reopen() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    env.directory.create_role("Admin").await?;
    env.directory
        .add_users_to_role(&["alice", "bob"], "Admin")
        .await?;
    env.directory.remove_user_from_role("bob", "Admin").await?;

    let reopened = env.reopen().await?;
    assert_eq!(reopened.users_in_role("Admin").await?, vec!["alice"]);
    assert!(reopened.is_user_in_role("ALICE", "admin").await?);
    assert!(!reopened.is_user_in_role("bob", "Admin").await?);
    Ok(())
}
