//! # CrudScreen
//!
//! One actor per resource screen. It owns the screen state exclusively, takes
//! [`ScreenCommand`]s from a [`ScreenHandle`], and publishes a fresh [`ScreenState`]
//! after every command and every call result.
//!
//! ```text
//!           ShowAddForm / EditItem                 Submit (valid)
//!   Idle ───────────────────────────▶ Adding/Editing ─────────────▶ loading
//!    ▲                                     │  ▲                        │
//!    │              Cancel                 │  └── failure: stays open ─┤
//!    └─────────────────────────────────────┘                           │
//!    ▲                       success: close form, reload               │
//!    └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Calls run in spawned tasks under child tokens of the screen's cancellation token,
//! so tearing the screen down also stops every call it started; a response that
//! arrives afterwards has nowhere to go.

use super::error::ScreenError;
use super::state::{Mode, Notice, ScreenState};
use crate::router::capitalize;
use crate::session::SessionReader;
use crate::validation::Validate;
use resource_framework::{ClientError, ResourceApi, RestEntity};
use std::future::Future;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const COMMAND_BUFFER: usize = 32;

/// Operator actions on a resource screen.
#[derive(Debug, Clone)]
pub enum ScreenCommand<T: RestEntity> {
    /// Fetch the whole list again.
    Reload,
    /// Open an empty add form.
    ShowAddForm,
    /// Open the edit form on a copy of `item`.
    EditItem(T),
    /// Replace the add form's fields.
    SetDraft(T),
    /// Replace the edit form's fields.
    SetSelected(T),
    /// Close the form, discarding its fields.
    Cancel,
    /// Validate the open form and create or update.
    Submit,
    /// Ask for confirmation before deleting `id`. Issues no call.
    RequestDelete(T::Id),
    ConfirmDelete,
    DismissDelete,
}

enum Outcome<T: RestEntity> {
    Loaded {
        generation: u64,
        result: Result<Vec<T>, ClientError>,
    },
    Created(Result<T, ClientError>),
    Updated(T::Id, Result<T::Update, ClientError>),
    Deleted(T::Id, Result<(), ClientError>),
}

/// Screen actor for resource `T`, talking to the backend through `C`.
pub struct CrudScreen<T: RestEntity, C> {
    client: C,
    session: SessionReader,
    state: ScreenState<T>,
    publisher: watch::Sender<ScreenState<T>>,
    commands: mpsc::Receiver<ScreenCommand<T>>,
    outcomes_tx: mpsc::UnboundedSender<Outcome<T>>,
    outcomes_rx: mpsc::UnboundedReceiver<Outcome<T>>,
    token: CancellationToken,
    load_generation: u64,
    /// The latest reload has not answered yet.
    load_pending: bool,
    /// A create, update or delete has not answered yet.
    mutation_pending: bool,
    noun: String,
    title: String,
}

impl<T, C> CrudScreen<T, C>
where
    T: RestEntity + Validate,
    C: ResourceApi<T>,
{
    /// Creates the screen and the handle that drives it. Nothing happens until
    /// [`run`](Self::run) is awaited; [`spawn`](Self::spawn) does both.
    pub fn new(client: C, session: SessionReader) -> (Self, ScreenHandle<T>) {
        let (command_tx, commands) = mpsc::channel(COMMAND_BUFFER);
        // Mounting always starts with a load.
        let initial = ScreenState {
            loading: true,
            ..ScreenState::default()
        };
        let (publisher, state_rx) = watch::channel(initial.clone());
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();

        let noun = T::RESOURCE.to_string();
        let screen = Self {
            client,
            session,
            state: initial,
            publisher,
            commands,
            outcomes_tx,
            outcomes_rx,
            token: token.clone(),
            load_generation: 0,
            load_pending: false,
            mutation_pending: false,
            title: capitalize(&noun),
            noun,
        };
        let handle = ScreenHandle {
            commands: command_tx,
            state: state_rx,
            token,
            task: None,
        };
        (screen, handle)
    }

    /// Creates the screen and runs it on its own task.
    pub fn spawn(client: C, session: SessionReader) -> ScreenHandle<T> {
        let (screen, mut handle) = Self::new(client, session);
        handle.task = Some(tokio::spawn(screen.run()));
        handle
    }

    /// Loads the list, then processes commands and call results until the handle is
    /// dropped or torn down.
    pub async fn run(mut self) {
        let entity_type = T::RESOURCE;
        info!(entity_type, "Screen mounted");

        self.reload();
        self.publish();

        loop {
            tokio::select! {
                biased;
                _ = self.token.cancelled() => break,
                command = self.commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(outcome) = self.outcomes_rx.recv() => self.handle_outcome(outcome),
            }
            self.publish();
        }

        self.token.cancel();
        info!(entity_type, "Screen torn down");
    }

    fn publish(&mut self) {
        self.state.loading = self.load_pending || self.mutation_pending;
        self.publisher.send_replace(self.state.clone());
    }

    fn handle_command(&mut self, command: ScreenCommand<T>) {
        debug!(entity_type = T::RESOURCE, ?command, "Command");
        self.state.notice = None;

        match command {
            ScreenCommand::Reload => self.reload(),
            ScreenCommand::ShowAddForm => {
                self.state.close_form();
                self.state.mode = Mode::Adding;
                self.state.form_visible = true;
            }
            ScreenCommand::EditItem(item) => {
                self.state.draft = T::default();
                self.state.selected = Some(item);
                self.state.mode = Mode::Editing;
                self.state.form_visible = true;
            }
            ScreenCommand::SetDraft(draft) => self.state.draft = draft,
            ScreenCommand::SetSelected(selected) => self.state.selected = Some(selected),
            ScreenCommand::Cancel => self.state.close_form(),
            ScreenCommand::Submit => {
                if let Err(e) = self.submit() {
                    self.reject(e);
                }
            }
            ScreenCommand::RequestDelete(id) => self.state.pending_delete = Some(id),
            ScreenCommand::ConfirmDelete => {
                if let Err(e) = self.confirm_delete() {
                    self.reject(e);
                }
            }
            ScreenCommand::DismissDelete => self.state.pending_delete = None,
        }
    }

    fn reject(&mut self, error: ScreenError) {
        debug!(entity_type = T::RESOURCE, %error, "Command rejected");
        self.state.notice = Some(Notice::Error(error.to_string()));
    }

    fn reload(&mut self) {
        self.load_generation += 1;
        let generation = self.load_generation;
        self.load_pending = true;

        let client = self.client.clone();
        self.spawn_call(async move {
            Outcome::Loaded {
                generation,
                result: client.list().await,
            }
        });
    }

    /// Mutations are refused while any call is in flight.
    fn ensure_idle(&self) -> Result<(), ScreenError> {
        if self.load_pending || self.mutation_pending {
            return Err(ScreenError::Busy);
        }
        Ok(())
    }

    fn submit(&mut self) -> Result<(), ScreenError> {
        self.ensure_idle()?;

        match self.state.mode {
            Mode::Idle => Err(ScreenError::NoForm),
            Mode::Adding => {
                let draft = self.state.draft.clone();
                draft.validate()?;
                self.mutation_pending = true;

                let client = self.client.clone();
                self.spawn_call(async move { Outcome::Created(client.create(draft).await) });
                Ok(())
            }
            Mode::Editing => {
                let selected = self.state.selected.clone().ok_or(ScreenError::MissingId)?;
                let id = selected.id().cloned().ok_or(ScreenError::MissingId)?;
                selected.validate()?;
                self.mutation_pending = true;

                let client = self.client.clone();
                let update = selected.to_update();
                self.spawn_call(async move {
                    let result = client.update(id.clone(), update).await;
                    Outcome::Updated(id, result)
                });
                Ok(())
            }
        }
    }

    fn confirm_delete(&mut self) -> Result<(), ScreenError> {
        self.ensure_idle()?;
        let id = self
            .state
            .pending_delete
            .take()
            .ok_or(ScreenError::NothingToConfirm)?;
        self.mutation_pending = true;

        let client = self.client.clone();
        self.spawn_call(async move {
            let result = client.delete(id.clone()).await;
            Outcome::Deleted(id, result)
        });
        Ok(())
    }

    /// Runs `call` on its own task; its result comes back through the outcome channel
    /// unless the screen is torn down first.
    fn spawn_call(&self, call: impl Future<Output = Outcome<T>> + Send + 'static) {
        let token = self.token.child_token();
        let outcomes = self.outcomes_tx.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {}
                outcome = call => {
                    let _ = outcomes.send(outcome);
                }
            }
        });
    }

    fn handle_outcome(&mut self, outcome: Outcome<T>) {
        let entity_type = T::RESOURCE;
        let operator = self.session.operator();

        match outcome {
            Outcome::Loaded { generation, .. } if generation != self.load_generation => {
                debug!(entity_type, generation, "Stale list ignored");
            }
            Outcome::Loaded { result, .. } => {
                self.load_pending = false;
                match result {
                    Ok(items) => {
                        debug!(entity_type, count = items.len(), "List loaded");
                        self.state.items = items;
                    }
                    Err(e) => {
                        warn!(entity_type, error = %e, "Error loading list");
                        self.state.notice = Some(Notice::Error(format!(
                            "Failed to load {}s. Please check if the backend is running.",
                            self.noun
                        )));
                    }
                }
            }
            Outcome::Created(Ok(created)) => {
                match created.id() {
                    Some(id) => info!(entity_type, %id, ?operator, "Created"),
                    None => info!(entity_type, ?operator, "Created"),
                }
                self.state.close_form();
                self.succeeded("created");
            }
            Outcome::Updated(id, Ok(_)) => {
                info!(entity_type, %id, ?operator, "Updated");
                self.state.close_form();
                self.succeeded("updated");
            }
            Outcome::Deleted(id, Ok(())) => {
                info!(entity_type, %id, ?operator, "Deleted");
                self.succeeded("deleted");
            }
            Outcome::Created(Err(e)) => self.failed("save", e),
            Outcome::Updated(_, Err(e)) => self.failed("update", e),
            Outcome::Deleted(_, Err(e)) => self.failed("delete", e),
        }
    }

    /// A mutation landed: refetch the whole list.
    fn succeeded(&mut self, verb: &str) {
        self.mutation_pending = false;
        self.state.notice = Some(Notice::Success(format!(
            "{} {verb} successfully!",
            self.title
        )));
        self.reload();
    }

    /// A mutation failed: leave the form and the list as they were.
    fn failed(&mut self, action: &str, error: ClientError) {
        warn!(entity_type = T::RESOURCE, %error, "Error trying to {action}");
        self.mutation_pending = false;
        self.state.notice = Some(Notice::Error(format!(
            "Failed to {action} {}. Please try again.",
            self.noun
        )));
    }
}

/// Drives a [`CrudScreen`] and observes its state. Dropping the handle tears the
/// screen down.
pub struct ScreenHandle<T: RestEntity> {
    commands: mpsc::Sender<ScreenCommand<T>>,
    state: watch::Receiver<ScreenState<T>>,
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl<T: RestEntity> ScreenHandle<T> {
    pub async fn send(&self, command: ScreenCommand<T>) -> Result<(), ScreenError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| ScreenError::Closed)
    }

    pub async fn reload(&self) -> Result<(), ScreenError> {
        self.send(ScreenCommand::Reload).await
    }

    pub async fn show_add_form(&self) -> Result<(), ScreenError> {
        self.send(ScreenCommand::ShowAddForm).await
    }

    pub async fn edit(&self, item: T) -> Result<(), ScreenError> {
        self.send(ScreenCommand::EditItem(item)).await
    }

    pub async fn set_draft(&self, draft: T) -> Result<(), ScreenError> {
        self.send(ScreenCommand::SetDraft(draft)).await
    }

    pub async fn set_selected(&self, selected: T) -> Result<(), ScreenError> {
        self.send(ScreenCommand::SetSelected(selected)).await
    }

    pub async fn cancel(&self) -> Result<(), ScreenError> {
        self.send(ScreenCommand::Cancel).await
    }

    pub async fn submit(&self) -> Result<(), ScreenError> {
        self.send(ScreenCommand::Submit).await
    }

    pub async fn request_delete(&self, id: T::Id) -> Result<(), ScreenError> {
        self.send(ScreenCommand::RequestDelete(id)).await
    }

    pub async fn confirm_delete(&self) -> Result<(), ScreenError> {
        self.send(ScreenCommand::ConfirmDelete).await
    }

    pub async fn dismiss_delete(&self) -> Result<(), ScreenError> {
        self.send(ScreenCommand::DismissDelete).await
    }

    /// The latest published snapshot.
    pub fn state(&self) -> ScreenState<T> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScreenState<T>> {
        self.state.clone()
    }

    /// Waits for the first snapshot (the current one included) that satisfies `ready`.
    pub async fn wait_until(
        &self,
        ready: impl FnMut(&ScreenState<T>) -> bool,
    ) -> Result<ScreenState<T>, ScreenError> {
        let mut state = self.state.clone();
        let snapshot = state
            .wait_for(ready)
            .await
            .map_err(|_| ScreenError::Closed)?;
        Ok(snapshot.clone())
    }

    /// Cancels the screen and every call it has in flight, then waits for it to stop.
    pub async fn teardown(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(entity_type = T::RESOURCE, error = %e, "Screen task failed");
            }
        }
    }
}

impl<T: RestEntity> Drop for ScreenHandle<T> {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Product, ProductId};
    use crate::session::Session;
    use crate::storage::MemoryStore;
    use resource_framework::mock::{create_mock_client, expect_create, expect_list, MockClient};
    use resource_framework::ResourceClient;
    use std::sync::Arc;

    fn reader() -> SessionReader {
        Session::load(Arc::new(MemoryStore::new())).reader()
    }

    fn is_busy(state: &ScreenState<Product>) -> bool {
        state.notice == Some(Notice::Error("busy".into()))
    }

    /// Mounts on an empty list and leaves an add form open on a valid draft.
    async fn mounted_with_draft(
        requests: &mut tokio::sync::mpsc::Receiver<resource_framework::ResourceRequest<Product>>,
        screen: &ScreenHandle<Product>,
    ) {
        expect_list(requests).await.unwrap().send(Ok(vec![])).unwrap();
        screen.wait_until(|s| !s.loading).await.unwrap();
        screen.show_add_form().await.unwrap();
        screen
            .set_draft(Product::new("Widget", 9.99))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_submit_rejected_while_loading() {
        let (client, mut requests) = create_mock_client::<Product>(10);
        let screen =
            CrudScreen::<Product, ResourceClient<Product>>::spawn(client, reader());

        // Hold the initial list so the screen stays loading.
        let pending_list = expect_list(&mut requests).await.unwrap();
        screen.show_add_form().await.unwrap();
        screen
            .set_draft(Product::new("Widget", 9.99))
            .await
            .unwrap();
        screen.submit().await.unwrap();

        let state = screen
            .wait_until(|s| s.notice.is_some())
            .await
            .unwrap();
        assert_eq!(state.notice, Some(Notice::Error("busy".into())));
        assert!(state.loading);
        assert!(state.form_visible);

        pending_list.send(Ok(vec![])).unwrap();
        screen.wait_until(|s| !s.loading).await.unwrap();
        assert!(requests.try_recv().is_err());
        screen.teardown().await;
    }

    #[tokio::test]
    async fn test_list_reply_does_not_end_pending_create() {
        let (client, mut requests) = create_mock_client::<Product>(10);
        let screen =
            CrudScreen::<Product, ResourceClient<Product>>::spawn(client, reader());
        mounted_with_draft(&mut requests, &screen).await;

        screen.submit().await.unwrap();
        let (_, created) = expect_create(&mut requests).await.unwrap();
        screen.reload().await.unwrap();
        expect_list(&mut requests)
            .await
            .unwrap()
            .send(Ok(vec![Product::new("Gadget", 4.5).with_id(4)]))
            .unwrap();

        let state = screen
            .wait_until(|s| s.contains(&ProductId(4)))
            .await
            .unwrap();
        assert!(state.loading);

        screen.submit().await.unwrap();
        screen.wait_until(is_busy).await.unwrap();
        assert!(requests.try_recv().is_err());

        created
            .send(Ok(Product::new("Widget", 9.99).with_id(5)))
            .unwrap();
        expect_list(&mut requests)
            .await
            .unwrap()
            .send(Ok(vec![Product::new("Widget", 9.99).with_id(5)]))
            .unwrap();
        let state = screen
            .wait_until(|s| !s.loading && s.contains(&ProductId(5)))
            .await
            .unwrap();
        assert_eq!(state.mode, Mode::Idle);
        screen.teardown().await;
    }

    #[tokio::test]
    async fn test_failed_create_does_not_end_pending_reload() {
        let (client, mut requests) = create_mock_client::<Product>(10);
        let screen =
            CrudScreen::<Product, ResourceClient<Product>>::spawn(client, reader());
        mounted_with_draft(&mut requests, &screen).await;

        screen.submit().await.unwrap();
        let (_, created) = expect_create(&mut requests).await.unwrap();
        screen.reload().await.unwrap();
        let pending_list = expect_list(&mut requests).await.unwrap();

        created
            .send(Err(ClientError::Transport("connection reset".into())))
            .unwrap();
        let state = screen
            .wait_until(|s| s.notice.as_ref().is_some_and(Notice::is_error))
            .await
            .unwrap();
        assert_eq!(
            state.notice,
            Some(Notice::Error("Failed to save product. Please try again.".into()))
        );
        assert!(state.loading);
        assert!(state.form_visible);

        screen.submit().await.unwrap();
        let state = screen.wait_until(is_busy).await.unwrap();
        assert!(state.loading);
        assert!(requests.try_recv().is_err());

        pending_list.send(Ok(vec![])).unwrap();
        let state = screen.wait_until(|s| !s.loading).await.unwrap();
        assert_eq!(state.active(), Some(&Product::new("Widget", 9.99)));
        screen.teardown().await;
    }

    #[tokio::test]
    async fn test_stale_list_is_ignored() {
        let (client, mut requests) = create_mock_client::<Product>(10);
        let screen =
            CrudScreen::<Product, ResourceClient<Product>>::spawn(client, reader());

        let first = expect_list(&mut requests).await.unwrap();
        screen.reload().await.unwrap();
        let second = expect_list(&mut requests).await.unwrap();

        second
            .send(Ok(vec![Product::new("Fresh", 1.0).with_id(2)]))
            .unwrap();
        let state = screen.wait_until(|s| !s.loading).await.unwrap();
        assert!(state.contains(&ProductId(2)));

        first
            .send(Ok(vec![Product::new("Old", 1.0).with_id(1)]))
            .unwrap();
        screen.reload().await.unwrap();
        let third = expect_list(&mut requests).await.unwrap();
        third.send(Ok(vec![])).unwrap();
        let state = screen.wait_until(|s| !s.loading).await.unwrap();
        assert!(!state.contains(&ProductId(1)));
        screen.teardown().await;
    }

    #[tokio::test]
    async fn test_edit_without_id_is_refused() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_list().return_ok(vec![]);
        let screen =
            CrudScreen::<Product, ResourceClient<Product>>::spawn(mock.client(), reader());
        screen.wait_until(|s| !s.loading).await.unwrap();

        screen.edit(Product::new("Draft", 3.0)).await.unwrap();
        screen.submit().await.unwrap();
        let state = screen.wait_until(|s| s.notice.is_some()).await.unwrap();
        assert_eq!(state.notice, Some(Notice::Error("missing id".into())));
        assert!(state.edit_mode());

        screen.teardown().await;
        mock.verify();
    }
}
