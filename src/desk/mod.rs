//! # Product Desk
//!
//! The desk coordinates everything the product table does:
//!
//! 1. **Fetch** the collection on init and after every successful mutation.
//! 2. **Open** a dialog for add, edit or delete, and remember the intent.
//! 3. **Close** the dialog: validate, call the gateway, notify, refetch.
//!
//! The list on screen is always a fresh server snapshot. Nothing is patched
//! locally; a mutation is only visible once the follow-up fetch lands.
//!
//! ## Fetch policy
//!
//! Exactly one fetch task is tracked. Starting a new one aborts the previous
//! and bumps the fetch generation, so the latest request wins: a superseded
//! task whose response is already in hand still finds its generation stale
//! and publishes nothing. A failed fetch is reported and the desk falls back
//! to displaying the last good snapshot (empty on first load). Disposal
//! aborts the tracked task and waits for it, so nothing is published or
//! notified afterwards.

pub mod error;
pub mod state;

pub use error::*;
pub use state::*;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::gateway::{GatewayError, ProductGateway};
use crate::model::{DialogAction, DialogEvent, DialogIntent, DialogResult, Product, ProductDraft};
use crate::notify::Notifier;
use crate::validation::{validate, ValidationError};

/// Client-side orchestrator for the product table.
///
/// # Example
///
/// ```ignore
/// let mut desk = ProductDesk::new(gateway, notifier);
/// desk.initialize();
///
/// let intent = desk.open_dialog(DialogAction::Add, None);
/// // ... show the dialog, collect its result ...
/// desk.close_dialog(DialogResult::new("Add", Some(draft))).await?;
/// ```
pub struct ProductDesk<G: ?Sized, N: ?Sized> {
    gateway: Arc<G>,
    notifier: Arc<N>,
    view: Arc<watch::Sender<DeskView>>,
    intent: Option<DialogIntent>,
    fetch: Option<JoinHandle<()>>,
    /// Bumped for every fetch started and on teardown; only the current one may publish.
    generation: Arc<AtomicU64>,
}

impl<G, N> ProductDesk<G, N>
where
    G: ProductGateway + ?Sized + 'static,
    N: Notifier + ?Sized + 'static,
{
    pub fn new(gateway: Arc<G>, notifier: Arc<N>) -> Self {
        let (view, _) = watch::channel(DeskView::default());
        Self {
            gateway,
            notifier,
            view: Arc::new(view),
            intent: None,
            fetch: None,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Receiver for every phase change and snapshot the desk publishes.
    pub fn subscribe(&self) -> watch::Receiver<DeskView> {
        self.view.subscribe()
    }

    /// Current phase and snapshot.
    pub fn view(&self) -> DeskView {
        self.view.borrow().clone()
    }

    /// The intent of the dialog currently open, if any.
    pub fn intent(&self) -> Option<&DialogIntent> {
        self.intent.as_ref()
    }

    /// Whether the tracked fetch is still running.
    pub fn is_loading(&self) -> bool {
        self.fetch.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// First fetch. Must be called from within a Tokio runtime.
    pub fn initialize(&mut self) {
        info!("Initializing desk");
        self.refresh();
    }

    /// Starts a list fetch, superseding any fetch still in flight.
    pub fn refresh(&mut self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(previous) = self.fetch.take() {
            if !previous.is_finished() {
                debug!(generation, "Superseding in-flight fetch");
            }
            previous.abort();
        }

        self.view.send_modify(|view| {
            if !matches!(view.phase, DeskPhase::DialogOpen(_)) {
                view.phase = DeskPhase::Loading;
            }
        });

        self.fetch = Some(tokio::spawn(load_products(
            self.gateway.clone(),
            self.notifier.clone(),
            self.view.clone(),
            Fetch {
                generation,
                current: self.generation.clone(),
            },
        )));
    }

    /// Records the intent and enters the dialog phase.
    ///
    /// `Add` always starts from an empty template; `subject` is the row being
    /// edited or deleted otherwise.
    pub fn open_dialog(&mut self, action: DialogAction, subject: Option<&Product>) -> DialogIntent {
        let subject = match action {
            DialogAction::Add => Some(ProductDraft::default()),
            DialogAction::Edit | DialogAction::Delete => subject.map(ProductDraft::from),
        };
        let intent = DialogIntent { action, subject };
        debug!(%action, subject = ?intent.subject, "Dialog opened");

        self.intent = Some(intent.clone());
        self.view.send_modify(|view| view.phase = DeskPhase::DialogOpen(action));
        intent
    }

    /// Handles the dialog's result and leaves the dialog phase.
    #[instrument(skip(self, result), fields(event = ?result.event))]
    pub async fn close_dialog(&mut self, result: DialogResult) -> Result<DialogOutcome, DeskError> {
        let subject_id = self
            .intent
            .take()
            .and_then(|intent| intent.subject)
            .and_then(|subject| subject.id);
        let loading = self.is_loading();
        self.view.send_modify(|view| {
            view.phase = if loading {
                DeskPhase::Loading
            } else {
                DeskPhase::Displaying
            };
        });

        // The edited row keeps its identifier even if the form dropped it.
        let data = result.data.map(|mut draft| {
            if draft.id.is_none() {
                draft.id = subject_id;
            }
            draft
        });

        match result.event {
            DialogEvent::Add => self.add_product(data).await,
            DialogEvent::Edit => self.update_product(data).await,
            DialogEvent::Delete => self.delete_product(data).await,
            DialogEvent::Unknown(name) => {
                debug!(event = %name, "Ignoring dialog event");
                Ok(DialogOutcome::Ignored)
            }
        }
    }

    /// Validates the draft, assigns a fresh identifier and creates the record.
    pub async fn add_product(&mut self, draft: Option<ProductDraft>) -> Result<DialogOutcome, DeskError> {
        let draft = self.accept(draft)?;
        let product = Product::from_draft(Uuid::new_v4().to_string(), &draft);

        if let Err(e) = self.gateway.create(&product).await {
            return Err(self.failed("add", e));
        }
        info!(id = %product.id, "Product added");
        self.notifier.show("Product added.", false);
        self.refresh();
        Ok(DialogOutcome::Added(product.id))
    }

    /// Validates the draft and replaces the record carrying its identifier.
    pub async fn update_product(&mut self, draft: Option<ProductDraft>) -> Result<DialogOutcome, DeskError> {
        let draft = self.accept(draft)?;
        let Some(id) = draft.id.clone() else {
            return Err(self.reject(ValidationError::Missing));
        };
        let product = Product::from_draft(id, &draft);

        if let Err(e) = self.gateway.update(&product).await {
            return Err(self.failed("update", e));
        }
        info!(id = %product.id, "Product updated");
        self.notifier.show("Product updated.", false);
        self.refresh();
        Ok(DialogOutcome::Updated(product.id))
    }

    /// Deletes the record by identifier. An absent record is a silent no-op.
    pub async fn delete_product(&mut self, target: Option<ProductDraft>) -> Result<DialogOutcome, DeskError> {
        let Some(id) = target.and_then(|t| t.id) else {
            debug!("Nothing to delete");
            return Ok(DialogOutcome::Ignored);
        };

        if let Err(e) = self.gateway.delete(&id).await {
            return Err(self.failed("delete", e));
        }
        info!(%id, "Product deleted");
        self.notifier.show(&format!("Product with id {id} deleted."), false);
        self.refresh();
        Ok(DialogOutcome::Deleted(id))
    }

    /// Releases the tracked fetch. Nothing is published or notified after this returns.
    pub async fn dispose(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(fetch) = self.fetch.take() {
            fetch.abort();
            if let Err(e) = fetch.await {
                if !e.is_cancelled() {
                    warn!(error = %e, "Fetch task failed");
                }
            }
        }
        self.intent = None;
        self.view.send_modify(|view| view.phase = DeskPhase::Idle);
        info!("Desk disposed");
    }

    fn accept(&self, candidate: Option<ProductDraft>) -> Result<ProductDraft, DeskError> {
        validate(candidate.as_ref())
            .and_then(|()| candidate.ok_or(ValidationError::Missing))
            .map_err(|e| self.reject(e))
    }

    fn reject(&self, reason: ValidationError) -> DeskError {
        debug!(%reason, "Draft rejected");
        self.notifier.show(&reason.to_string(), true);
        DeskError::Invalid(reason)
    }

    fn failed(&self, verb: &str, e: GatewayError) -> DeskError {
        warn!(error = %e, "Failed to {verb} product");
        self.notifier.show(&format!("Failed to {verb} product: {e}"), true);
        DeskError::Gateway(e)
    }
}

/// Aborts the tracked fetch and retires its generation, so a response that
/// is already in hand is not published. A notice the task has begun emitting
/// can still land; only [`ProductDesk::dispose`] waits for the task to end.
impl<G: ?Sized, N: ?Sized> Drop for ProductDesk<G, N> {
    fn drop(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(fetch) = self.fetch.take() {
            fetch.abort();
        }
    }
}

/// Identity of one fetch task.
struct Fetch {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl Fetch {
    fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.generation
    }
}

async fn load_products<G, N>(
    gateway: Arc<G>,
    notifier: Arc<N>,
    view: Arc<watch::Sender<DeskView>>,
    fetch: Fetch,
) where
    G: ProductGateway + ?Sized,
    N: Notifier + ?Sized,
{
    let listed = gateway
        .list()
        .await
        .map(|products| Arc::new(ProductSnapshot::new(products)));

    // Checked under the view lock, so a newer fetch cannot slip in between.
    let published = view.send_if_modified(|view| {
        if !fetch.is_current() {
            return false;
        }
        if let Ok(snapshot) = &listed {
            view.snapshot = snapshot.clone();
        }
        view.phase = settled(view.phase);
        true
    });
    if !published {
        debug!(generation = fetch.generation, "Dropping superseded fetch result");
        return;
    }

    match listed {
        Ok(snapshot) => {
            info!(count = snapshot.len(), total = snapshot.total, "Products loaded");
            notifier.show("Products loaded.", false);
        }
        Err(e) => {
            // Fail open: the last good snapshot stays on screen.
            warn!(error = %e, "Fetch failed");
            notifier.show(&format!("Failed to load products: {e}"), true);
        }
    }
}

fn settled(phase: DeskPhase) -> DeskPhase {
    match phase {
        DeskPhase::DialogOpen(action) => DeskPhase::DialogOpen(action),
        _ => DeskPhase::Displaying,
    }
}
