//! Async session driving a grid against a gateway
//!
//! A session is one tokio task that owns a [`Grid`]. Intents arrive through an
//! unbounded queue and are applied one at a time; fetches run as separate
//! tasks and report back into the same loop, so the grid is only ever mutated
//! by the session task. A new fetch aborts the one in flight. Every change is
//! published as a [`GridView`] on a `watch` channel.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::oneshot;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::Response;
use crate::error::GatewayError;
use crate::error::SessionError;
use crate::gateway::DataGateway;
use crate::grid::FetchOutcome;
use crate::grid::FetchTicket;
use crate::grid::Grid;
use crate::grid::GridIntent;
use crate::query::Page;
use crate::view::GridView;

enum Command {
    Intent {
        intent: GridIntent,
        applied: Option<oneshot::Sender<GridView>>,
    },
    Shutdown,
}

type Completion = (FetchTicket, Result<Response<Page>, GatewayError>);

/// Entry point for running a grid in the background.
pub struct GridSession;

impl GridSession {
    /// Spawns the session task and issues the initial fetch.
    ///
    /// Must be called within a tokio runtime.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let handle = GridSession::spawn(grid, Arc::new(gateway));
    /// handle.apply(GridIntent::NextPage).await?;
    /// let view = handle.wait_idle().await?;
    /// ```
    pub fn spawn(mut grid: Grid, gateway: Arc<dyn DataGateway>) -> GridHandle {
        let ticket = grid.refresh();
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(grid.view());
        let task = tokio::spawn(run(grid, gateway, ticket, intent_rx, view_tx));

        GridHandle {
            intents: intent_tx,
            views: view_rx,
            task,
        }
    }
}

/// Handle to a running [`GridSession`].
pub struct GridHandle {
    intents: mpsc::UnboundedSender<Command>,
    views: watch::Receiver<GridView>,
    task: JoinHandle<Grid>,
}

impl GridHandle {
    /// Queues an intent without waiting for it to be applied.
    pub fn dispatch(&self, intent: GridIntent) -> Result<(), SessionError> {
        self.intents
            .send(Command::Intent { intent, applied: None })
            .map_err(|_| SessionError::Closed)
    }

    /// Applies an intent and returns the view right after it.
    ///
    /// A fetch the intent triggered is still in flight at that point; the view
    /// reports it as loading.
    pub async fn apply(&self, intent: GridIntent) -> Result<GridView, SessionError> {
        let (applied_tx, applied_rx) = oneshot::channel();
        self.intents
            .send(Command::Intent {
                intent,
                applied: Some(applied_tx),
            })
            .map_err(|_| SessionError::Closed)?;
        applied_rx.await.map_err(|_| SessionError::Closed)
    }

    /// The latest published view.
    pub fn view(&self) -> GridView {
        self.views.borrow().clone()
    }

    /// A receiver notified on every published view.
    pub fn subscribe(&self) -> watch::Receiver<GridView> {
        self.views.clone()
    }

    /// Waits until no fetch is in flight and returns that view.
    pub async fn wait_idle(&self) -> Result<GridView, SessionError> {
        let mut views = self.views.clone();
        let view = views
            .wait_for(|view| !view.status.is_loading())
            .await
            .map_err(|_| SessionError::Closed)?;
        Ok(view.clone())
    }

    /// Stops the session and returns the grid it owned.
    pub async fn shutdown(self) -> Result<Grid, SessionError> {
        // The task may already be gone; joining reports that.
        let _ = self.intents.send(Command::Shutdown);
        self.task.await.map_err(|_| SessionError::Closed)
    }
}

async fn run(
    mut grid: Grid,
    gateway: Arc<dyn DataGateway>,
    ticket: FetchTicket,
    mut intents: mpsc::UnboundedReceiver<Command>,
    views: watch::Sender<GridView>,
) -> Grid {
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Completion>();

    let mut in_flight = Some(spawn_fetch(&gateway, ticket, &done_tx));

    loop {
        tokio::select! {
            command = intents.recv() => {
                let Some(Command::Intent { intent, applied }) = command else {
                    break;
                };
                log::debug!("applying {:?}", intent);
                if let Some(ticket) = grid.apply(intent) {
                    if let Some(superseded) = in_flight.take() {
                        superseded.abort();
                    }
                    in_flight = Some(spawn_fetch(&gateway, ticket, &done_tx));
                }
                let view = grid.view();
                views.send_replace(view.clone());
                if let Some(applied) = applied {
                    let _ = applied.send(view);
                }
            }
            Some((ticket, result)) = done_rx.recv() => {
                if grid.complete(&ticket, result) != FetchOutcome::Stale {
                    views.send_replace(grid.view());
                }
            }
        }
    }

    if let Some(fetch) = in_flight.take() {
        fetch.abort();
    }
    log::debug!("grid session stopped");
    grid
}

fn spawn_fetch(
    gateway: &Arc<dyn DataGateway>,
    ticket: FetchTicket,
    done: &mpsc::UnboundedSender<Completion>,
) -> JoinHandle<()> {
    let gateway = Arc::clone(gateway);
    let done = done.clone();
    tokio::spawn(async move {
        let result = gateway.fetch(ticket.request()).await;
        if done.send((ticket, result)).is_err() {
            log::trace!("session closed before fetch completed");
        }
    })
}
