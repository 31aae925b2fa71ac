// src/client/coordinator.rs
//
// Effect coordinator: one task per intent kind, each draining its own queue. A task
// calls the API adapter, dispatches the result action on success and only logs on
// failure, so failed effects leave the state as it was. Within a kind intents run in
// arrival order; different kinds run concurrently. Duplicates are neither merged nor
// cancelled.

use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use super::{Action, ClientError, Intent, IntentKind, NotesApi, Store};

const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectOutcome {
    Completed,
    Failed(String),
}

/// Published once per handled intent, whatever the outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectEvent {
    pub kind: IntentKind,
    pub outcome: EffectOutcome,
}

#[derive(Error, Debug)]
pub enum CoordinatorError {
    #[error("effect worker for {0} has stopped")]
    WorkerStopped(IntentKind),
    #[error("event stream closed before {0} completed")]
    EventsClosed(IntentKind),
}

pub struct EffectCoordinator {
    queues: HashMap<IntentKind, mpsc::UnboundedSender<Intent>>,
    events: broadcast::Sender<EffectEvent>,
    workers: Vec<JoinHandle<()>>,
}

impl EffectCoordinator {
    /// Spawn the workers on the current tokio runtime.
    pub fn start(api: Arc<dyn NotesApi>, store: Store) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let mut queues = HashMap::new();
        let mut workers = Vec::with_capacity(IntentKind::ALL.len());

        for kind in IntentKind::ALL {
            let (tx, rx) = mpsc::unbounded_channel();
            queues.insert(kind, tx);
            workers.push(tokio::spawn(run_worker(
                kind,
                rx,
                Arc::clone(&api),
                store.clone(),
                events.clone(),
            )));
        }

        debug!(workers = workers.len(), "Effect coordinator started");
        Self {
            queues,
            events,
            workers,
        }
    }

    pub fn dispatch(&self, intent: Intent) -> Result<(), CoordinatorError> {
        let kind = intent.kind();
        let queue = self
            .queues
            .get(&kind)
            .ok_or(CoordinatorError::WorkerStopped(kind))?;
        queue
            .send(intent)
            .map_err(|_| CoordinatorError::WorkerStopped(kind))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EffectEvent> {
        self.events.subscribe()
    }

    /// Dispatch and wait for the next event of the same kind.
    ///
    /// Exact only when no other intent of that kind is queued ahead of this one.
    pub async fn dispatch_and_wait(&self, intent: Intent) -> Result<EffectOutcome, CoordinatorError> {
        let kind = intent.kind();
        let mut events = self.subscribe();
        self.dispatch(intent)?;

        loop {
            match events.recv().await {
                Ok(event) if event.kind == kind => return Ok(event.outcome),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(skipped, "Effect event receiver lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    return Err(CoordinatorError::EventsClosed(kind))
                }
            }
        }
    }

    /// Close all queues and wait until every queued intent has been handled.
    pub async fn shutdown(self) {
        let Self {
            queues, workers, ..
        } = self;
        drop(queues);
        for worker in workers {
            if let Err(e) = worker.await {
                error!(error = %e, "Effect worker ended abnormally");
            }
        }
        debug!("Effect coordinator stopped");
    }
}

async fn run_worker(
    kind: IntentKind,
    mut queue: mpsc::UnboundedReceiver<Intent>,
    api: Arc<dyn NotesApi>,
    store: Store,
    events: broadcast::Sender<EffectEvent>,
) {
    while let Some(intent) = queue.recv().await {
        let outcome = match perform(api.as_ref(), intent).await {
            Ok(action) => {
                info!(action = kind.as_str(), result = action.type_name(), "Effect completed");
                store.dispatch(action);
                EffectOutcome::Completed
            }
            Err(e) => {
                error!(
                    section = "notes",
                    action = kind.as_str(),
                    status = ?e.status(),
                    error = %e,
                    "Effect failed"
                );
                EffectOutcome::Failed(e.to_string())
            }
        };
        // No subscribers is fine
        let _ = events.send(EffectEvent { kind, outcome });
    }
    debug!(kind = kind.as_str(), "Effect worker stopped");
}

async fn perform(api: &dyn NotesApi, intent: Intent) -> Result<Action, ClientError> {
    match intent {
        Intent::FetchNotes => api.list_notes().await.map(Action::SetNotes),
        Intent::CreateNote(draft) => api.create_note(&draft).await.map(Action::AddNote),
        Intent::UpdateNote { id, draft } => {
            api.update_note(id, &draft).await.map(Action::UpdateNote)
        }
        Intent::DeleteNote(id) => api.delete_note(id).await.map(|_| Action::RemoveNote(id)),
        Intent::SearchAuthors(term) => {
            api.search_authors(&term).await.map(Action::SetSearchData)
        }
    }
}
