//! Query and write entry points of the XAR repository.

mod common;

use common::{FailingStore, TestRepository, ext_id, wiki};
use std::sync::Arc;
use xarindex_core::ExtensionKind;
use xarindex_core::config::RepositoryConfig;
use xarindex_repository::{RepositoryError, XarInstalledRepository};
use xarindex_store::{InstalledExtension, StaticArchiveReader, StoreError};

#[tokio::test]
async fn test_get_installed_extension_respects_namespace() {
    let t = TestRepository::new();
    let e1 = t.install_xar("e1", Some(&["wiki:a"]), &["Page.A"]).await;
    t.repository.initialize().await.unwrap();

    let on_a = t
        .repository
        .get_installed_extension(e1.id(), Some(&wiki("a")))
        .await
        .unwrap();
    assert_eq!(on_a.unwrap().entries().len(), 1);

    assert!(
        t.repository
            .get_installed_extension(e1.id(), Some(&wiki("b")))
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        t.repository
            .get_installed_extension(e1.id(), None)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_write_operations_are_unsupported() {
    let t = TestRepository::new();
    let record = InstalledExtension::root(ext_id("e1"), ExtensionKind::Xar);

    assert!(matches!(
        t.repository.install_extension(&record, None),
        Err(RepositoryError::UnsupportedOperation(_))
    ));
    assert!(matches!(
        t.repository
            .uninstall_extension(&record.id, Some(&wiki("demo"))),
        Err(RepositoryError::UnsupportedOperation(_))
    ));
    assert!(t.store.is_empty().await);
}

#[tokio::test]
async fn test_backward_dependencies_only_for_xar_targets() {
    let t = TestRepository::new();
    let base = t.install_xar("base", None, &["Page.A"]).await;
    let lib = t.install_other("lib", ExtensionKind::Jar).await;
    t.store
        .install(
            InstalledExtension::root(ext_id("app"), ExtensionKind::Xar)
                .with_dependencies([base.id(), lib.id()]),
        )
        .await;

    let deps = t
        .repository
        .get_backward_dependencies(base.id(), None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(deps.len(), 1);
    assert_eq!(deps[0].id, ext_id("app"));

    assert!(
        t.repository
            .get_backward_dependencies(lib.id(), None)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        t.repository
            .get_backward_dependencies("org.example:missing", None)
            .await
            .unwrap()
            .is_none()
    );

    let by_namespace = t
        .repository
        .get_backward_dependencies_by_id(&base)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_namespace.get(&None).map(Vec::len), Some(1));
    assert!(
        t.repository
            .get_backward_dependencies_by_id(&lib)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_backward_dependencies_by_id_of_missing_extension_fails() {
    let t = TestRepository::new();
    t.install_xar("base", None, &["Page.A"]).await;

    let result = t
        .repository
        .get_backward_dependencies_by_id(&ext_id("missing"))
        .await;
    assert!(matches!(
        result,
        Err(RepositoryError::Store(StoreError::Resolve(_)))
    ));
}

#[tokio::test]
async fn test_store_failures_propagate() {
    let store = Arc::new(FailingStore::new());
    let reader = Arc::new(StaticArchiveReader::new());
    let id = ext_id("e1");
    reader.set_entries(id.clone(), common::entries(&["Page.A"]));
    store
        .inner
        .install(InstalledExtension::root(id.clone(), ExtensionKind::Xar))
        .await;

    let repository =
        XarInstalledRepository::new(store.clone(), reader, RepositoryConfig::default());
    repository.initialize().await.unwrap();

    store.set_failing(true);
    assert!(matches!(
        repository.get_installed_extension(id.id(), None).await,
        Err(RepositoryError::Store(StoreError::Backend(_)))
    ));
    assert!(matches!(
        repository.on_extension_changed(&id).await,
        Err(RepositoryError::Store(StoreError::Backend(_)))
    ));
    assert!(matches!(
        repository.get_backward_dependencies(id.id(), None).await,
        Err(RepositoryError::Store(_))
    ));
    assert!(matches!(
        repository.get_backward_dependencies_by_id(&id).await,
        Err(RepositoryError::Store(StoreError::Backend(_)))
    ));
    assert!(matches!(
        repository.initialize().await,
        Err(RepositoryError::Store(_))
    ));

    // Index queries do not reach the store.
    let owners = repository.lookup_owners(&common::doc("demo:Page.A"));
    assert_eq!(owners.len(), 1);
    assert!(repository.get_cached_extension(&id).is_some());
}
