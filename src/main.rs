use anyhow::Context;
use product_desk::desk::{DeskPhase, DeskView, DialogOutcome};
use product_desk::lifecycle::{setup_tracing, DeskConfig, DeskSystem, CONFIG_FILE};
use product_desk::model::{DialogAction, DialogResult, Product, ProductDraft};
use tokio::sync::watch;
use tracing::{info, info_span, warn, Instrument};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();

    let config = DeskConfig::load(CONFIG_FILE).context("loading configuration")?;
    info!(?config, "Starting product desk");

    let seed = vec![
        Product::new("seed-1", "Notebook", 4.5, 10.0),
        Product::new("seed-2", "Stapler", 12.0, 2.0),
    ];
    let mut system = DeskSystem::start(&config, seed).context("building gateway")?;
    let mut view = system.desk.subscribe();

    system.desk.initialize();
    report(&settle(&mut view).await?);

    // Add
    let span = info_span!("add_flow");
    let added = async {
        system.desk.open_dialog(DialogAction::Add, None);
        let draft = ProductDraft::new("Pen", 2.0, 3.0);
        system.desk.close_dialog(DialogResult::new("Add", Some(draft))).await
    }
    .instrument(span)
    .await;
    report(&settle(&mut view).await?);

    let id = match added {
        Ok(DialogOutcome::Added(id)) => id,
        other => {
            warn!(?other, "Add did not go through, stopping walkthrough");
            system.shutdown().await?;
            return Ok(());
        }
    };

    // Rejected edit: zero price never reaches the gateway
    let current = find(&system.desk.view(), &id);
    system.desk.open_dialog(DialogAction::Edit, current.as_ref());
    let invalid = ProductDraft::new("Pen", 0.0, 3.0);
    let rejected = system.desk.close_dialog(DialogResult::new("Edit", Some(invalid))).await;
    info!(?rejected, "Invalid edit");

    // Edit
    let intent = system.desk.open_dialog(DialogAction::Edit, current.as_ref());
    let mut draft = intent.subject.unwrap_or_default();
    draft.price = 2.5;
    let updated = system
        .desk
        .close_dialog(DialogResult::new("Edit", Some(draft)))
        .instrument(info_span!("edit_flow"))
        .await;
    info!(?updated, "Edit finished");
    report(&settle(&mut view).await?);

    // Cancelled dialog
    system.desk.open_dialog(DialogAction::Delete, current.as_ref());
    let cancelled = system.desk.close_dialog(DialogResult::new("Cancel", None)).await;
    info!(?cancelled, "Dialog cancelled");

    // Delete
    let intent = system.desk.open_dialog(DialogAction::Delete, current.as_ref());
    let deleted = system
        .desk
        .close_dialog(DialogResult::new("Delete", intent.subject))
        .instrument(info_span!("delete_flow"))
        .await;
    info!(?deleted, "Delete finished");
    report(&settle(&mut view).await?);

    system.shutdown().await?;
    info!("Walkthrough completed");
    Ok(())
}

async fn settle(view: &mut watch::Receiver<DeskView>) -> anyhow::Result<DeskView> {
    let settled = view
        .wait_for(|v| v.phase == DeskPhase::Displaying)
        .await
        .context("desk dropped its view")?;
    Ok(settled.clone())
}

fn find(view: &DeskView, id: &str) -> Option<Product> {
    view.snapshot.products.iter().find(|p| p.id == id).cloned()
}

fn report(view: &DeskView) {
    for product in &view.snapshot.products {
        info!(
            id = %product.id,
            name = %product.name,
            price = product.price,
            quantity = product.quantity,
            line_total = product.line_total(),
            "Row"
        );
    }
    info!(count = view.snapshot.len(), total = view.snapshot.total, "Table");
}
