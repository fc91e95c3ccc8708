//! Extension lifecycle reconciliation.

mod common;

use common::{TestRepository, doc, owner_ids, wiki};
use std::sync::Arc;
use xarindex_core::ExtensionKind;
use xarindex_core::config::{ReconcilePolicy, RepositoryConfig};
use xarindex_repository::ReconcileOutcome;
use xarindex_store::InstalledExtension;

#[tokio::test]
async fn test_cache_state_machine() {
    let t = TestRepository::new();
    let e1 = t.install_xar("e1", Some(&["wiki:demo"]), &["Page.A"]).await;

    // NOT_CACHED -> CACHED
    assert_eq!(
        t.repository.on_extension_changed(&e1).await.unwrap(),
        ReconcileOutcome::Cached
    );
    let first = t.repository.get_cached_extension(&e1).unwrap();
    assert_eq!(
        t.repository.on_extension_changed(&e1).await.unwrap(),
        ReconcileOutcome::Unchanged
    );
    assert_eq!(t.reader.reads(), 1);

    // CACHED -> EVICTED
    t.store.uninstall(&e1).await;
    assert_eq!(
        t.repository.on_extension_changed(&e1).await.unwrap(),
        ReconcileOutcome::Evicted
    );
    assert!(t.repository.get_cached_extension(&e1).is_none());
    assert_eq!(
        t.repository.on_extension_changed(&e1).await.unwrap(),
        ReconcileOutcome::Ignored
    );

    // EVICTED -> CACHED, as a new snapshot
    t.install_xar("e1", Some(&["wiki:demo"]), &["Page.A"]).await;
    assert_eq!(
        t.repository.on_extension_changed(&e1).await.unwrap(),
        ReconcileOutcome::Cached
    );
    let second = t.repository.get_cached_extension(&e1).unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn test_kind_change_evicts() {
    let t = TestRepository::new();
    let e1 = t.install_xar("e1", None, &["Page.A"]).await;
    t.repository.on_extension_changed(&e1).await.unwrap();

    t.store
        .install(InstalledExtension::root(e1.clone(), ExtensionKind::Jar))
        .await;
    assert_eq!(
        t.repository.on_extension_changed(&e1).await.unwrap(),
        ReconcileOutcome::Evicted
    );
    assert!(t.repository.cached_extensions().is_empty());
}

#[tokio::test]
async fn test_lazy_policy_leaves_index_to_page_events() {
    let t = TestRepository::new();
    let e1 = t.install_xar("e1", Some(&["wiki:demo"]), &["Page.A"]).await;

    t.repository.on_extension_changed(&e1).await.unwrap();
    assert!(t.repository.lookup_owners(&doc("demo:Page.A")).is_empty());

    t.repository.pages_added(&e1, Some(&wiki("demo"))).unwrap();
    assert_eq!(owner_ids(&t.repository.lookup_owners(&doc("demo:Page.A"))), vec!["e1"]);
}

#[tokio::test]
async fn test_eviction_does_not_touch_ownership_rows() {
    let t = TestRepository::new();
    let e1 = t.install_xar("e1", Some(&["wiki:demo"]), &["Page.A"]).await;
    t.repository.initialize().await.unwrap();

    t.store.uninstall(&e1).await;
    t.repository.on_extension_changed(&e1).await.unwrap();

    // Rows disappear through page-removed events, not through eviction.
    assert_eq!(owner_ids(&t.repository.lookup_owners(&doc("demo:Page.A"))), vec!["e1"]);
}

#[tokio::test]
async fn test_page_removed_before_uninstall_clears_rows() {
    let t = TestRepository::new();
    let e1 = t.install_xar("e1", Some(&["wiki:demo"]), &["Page.A"]).await;
    t.repository.initialize().await.unwrap();

    t.repository.pages_removed(&e1, Some(&wiki("demo"))).unwrap();
    t.store.uninstall(&e1).await;
    t.repository.on_extension_changed(&e1).await.unwrap();

    assert!(t.repository.lookup_owners(&doc("demo:Page.A")).is_empty());
    assert_eq!(t.repository.index_stats().wiki_documents, 0);
}

#[tokio::test]
async fn test_eager_policy_indexes_declared_namespaces() {
    let t = TestRepository::with_config(RepositoryConfig {
        reconcile_policy: ReconcilePolicy::Eager,
        ..RepositoryConfig::default()
    });
    let e1 = t
        .install_xar("e1", Some(&["wiki:a", "wiki:b"]), &["Page.A"])
        .await;
    let e2 = t.install_xar("e2", None, &["Page.A"]).await;

    t.repository.on_extension_changed(&e1).await.unwrap();
    t.repository.on_extension_changed(&e2).await.unwrap();
    assert_eq!(owner_ids(&t.repository.lookup_owners(&doc("a:Page.A"))), vec!["e1", "e2"]);
    assert_eq!(owner_ids(&t.repository.lookup_owners(&doc("b:Page.A"))), vec!["e1", "e2"]);

    // A following page event for the same namespace is absorbed.
    t.repository.pages_added(&e1, Some(&wiki("a"))).unwrap();
    assert_eq!(owner_ids(&t.repository.lookup_owners(&doc("a:Page.A"))), vec!["e1", "e2"]);
}

#[tokio::test]
async fn test_parse_failure_on_reconcile_is_reported_and_retried() {
    let t = TestRepository::new();
    let e3 = t.install_broken_xar("e3", None).await;

    assert_eq!(
        t.repository.on_extension_changed(&e3).await.unwrap(),
        ReconcileOutcome::Failed
    );
    assert!(t.repository.get_cached_extension(&e3).is_none());

    t.reader.set_entries(e3.clone(), common::entries(&["Page.A"]));
    assert_eq!(
        t.repository.on_extension_changed(&e3).await.unwrap(),
        ReconcileOutcome::Cached
    );
}
