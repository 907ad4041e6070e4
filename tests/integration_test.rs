use std::sync::Arc;

use product_desk::desk::{DeskError, DeskPhase, DeskView, DialogOutcome};
use product_desk::lifecycle::{ConfigError, DeskConfig, DeskSystem, StartError};
use product_desk::model::{DialogAction, DialogResult, Product, ProductDraft};
use product_desk::notify::RecordingNotifier;
use product_desk::validation::ValidationError;
use tokio::sync::watch;

async fn displayed(view: &mut watch::Receiver<DeskView>) -> DeskView {
    view.wait_for(|v| v.phase == DeskPhase::Displaying)
        .await
        .expect("desk dropped its view")
        .clone()
}

/// Full walkthrough against the in-process store: add, edit, delete, each
/// followed by a fresh snapshot from the store.
#[tokio::test]
async fn test_full_desk_against_in_process_store() {
    let notifier = Arc::new(RecordingNotifier::new());
    let seed = vec![Product::new("seed-1", "Notebook", 4.0, 10.0)];
    let mut system =
        DeskSystem::start_with_notifier(&DeskConfig::default(), seed, notifier.clone())
            .expect("Failed to start desk");
    let mut view = system.desk.subscribe();

    system.desk.initialize();
    let first = displayed(&mut view).await;
    assert_eq!(first.snapshot.len(), 1);
    assert_eq!(first.snapshot.total, 40.0);

    // Add
    system.desk.open_dialog(DialogAction::Add, None);
    let outcome = system
        .desk
        .close_dialog(DialogResult::new("Add", Some(ProductDraft::new("Pen", 2.0, 3.0))))
        .await
        .expect("Add failed");
    let pen_id = match outcome {
        DialogOutcome::Added(id) => id,
        other => panic!("Expected Added, got {other:?}"),
    };
    let after_add = displayed(&mut view).await;
    assert_eq!(after_add.snapshot.len(), 2);
    assert_eq!(after_add.snapshot.total, 46.0);

    // Edit keeps the id
    let pen = after_add
        .snapshot
        .products
        .iter()
        .find(|p| p.id == pen_id)
        .cloned()
        .expect("Pen not listed");
    let intent = system.desk.open_dialog(DialogAction::Edit, Some(&pen));
    let mut draft = intent.subject.expect("Edit intent carries the row");
    draft.quantity = 5.0;
    let outcome = system
        .desk
        .close_dialog(DialogResult::new("Edit", Some(draft)))
        .await;
    assert_eq!(outcome, Ok(DialogOutcome::Updated(pen_id.clone())));
    let after_edit = displayed(&mut view).await;
    assert_eq!(after_edit.snapshot.total, 50.0);

    // Invalid edit is stopped before the store
    system.desk.open_dialog(DialogAction::Edit, Some(&pen));
    let outcome = system
        .desk
        .close_dialog(DialogResult::new("Edit", Some(ProductDraft::new("", 2.0, 5.0))))
        .await;
    assert_eq!(outcome, Err(DeskError::Invalid(ValidationError::EmptyName)));
    assert_eq!(system.desk.view().snapshot.total, 50.0);

    // Delete
    let intent = system.desk.open_dialog(DialogAction::Delete, Some(&pen));
    let outcome = system
        .desk
        .close_dialog(DialogResult::new("Delete", intent.subject))
        .await;
    assert_eq!(outcome, Ok(DialogOutcome::Deleted(pen_id.clone())));
    let after_delete = displayed(&mut view).await;
    assert_eq!(after_delete.snapshot.len(), 1);
    assert_eq!(after_delete.snapshot.total, 40.0);

    assert_eq!(
        notifier.messages(),
        vec![
            "Products loaded.".to_string(),
            "Product added.".to_string(),
            "Products loaded.".to_string(),
            "Product updated.".to_string(),
            "Products loaded.".to_string(),
            "Error: name must not be empty.".to_string(),
            format!("Product with id {pen_id} deleted."),
            "Products loaded.".to_string(),
        ]
    );

    system.shutdown().await.expect("Failed to shutdown desk");
}

/// Deleting a row someone else already removed surfaces the store's error.
#[tokio::test]
async fn test_delete_of_missing_row_is_reported() {
    let notifier = Arc::new(RecordingNotifier::new());
    let mut system =
        DeskSystem::start_with_notifier(&DeskConfig::default(), Vec::new(), notifier.clone())
            .unwrap();
    let mut view = system.desk.subscribe();
    system.desk.initialize();
    displayed(&mut view).await;

    let ghost = Product::new("ghost", "Ghost", 1.0, 1.0);
    let intent = system.desk.open_dialog(DialogAction::Delete, Some(&ghost));
    let outcome = system
        .desk
        .close_dialog(DialogResult::new("Delete", intent.subject))
        .await;

    assert!(matches!(outcome, Err(DeskError::Gateway(_))));
    assert_eq!(
        notifier.errors(),
        vec!["Failed to delete product: Product not found: ghost"]
    );

    system.shutdown().await.unwrap();
}

/// Shutdown with a fetch still pending completes and stays silent.
#[tokio::test]
async fn test_shutdown_with_pending_fetch() {
    let notifier = Arc::new(RecordingNotifier::new());
    let mut system =
        DeskSystem::start_with_notifier(&DeskConfig::default(), Vec::new(), notifier.clone())
            .unwrap();

    system.desk.initialize();
    system.shutdown().await.unwrap();

    assert!(notifier.notices().is_empty());
}

/// A hand-built config with a zero buffer is refused before anything is spawned.
#[tokio::test]
async fn test_start_rejects_zero_buffer() {
    let config = DeskConfig {
        store_buffer_size: 0,
        ..DeskConfig::default()
    };
    let notifier = Arc::new(RecordingNotifier::new());

    let err = DeskSystem::start_with_notifier(&config, Vec::new(), notifier).err();

    assert!(matches!(
        err,
        Some(StartError::Config(ConfigError::InvalidValue {
            key: "store_buffer_size",
            ..
        }))
    ));
}
