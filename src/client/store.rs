// src/client/store.rs
use std::sync::Arc;
use tokio::sync::watch;
use tracing::trace;

use super::{reduce, Action, State};

/// Owner of the single client state tree.
///
/// `dispatch` runs the reducer under the channel's write lock, so two reductions never
/// overlap. Subscribers are woken after every dispatch (the re-render hook).
#[derive(Clone)]
pub struct Store {
    state: Arc<watch::Sender<State>>,
}

impl Store {
    pub fn new(initial: State) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            state: Arc::new(state),
        }
    }

    pub fn dispatch(&self, action: Action) {
        trace!(action = action.type_name(), "Dispatching");
        self.state.send_modify(move |state| {
            let previous = std::mem::take(state);
            *state = reduce(previous, action);
        });
    }

    /// Snapshot of the current state
    pub fn state(&self) -> State {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<State> {
        self.state.subscribe()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(State::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AuthorName;

    #[test]
    fn given_store_when_dispatching_then_state_reflects_reducer() {
        let store = Store::default();
        let authors = vec![AuthorName {
            first_name: "James".into(),
            last_name: "Joyce".into(),
        }];

        store.dispatch(Action::SetSearchData(authors.clone()));

        assert_eq!(store.state().search_data, authors);
    }

    #[tokio::test]
    async fn given_subscriber_when_dispatching_then_is_notified() {
        let store = Store::default();
        let mut rx = store.subscribe();

        store.dispatch(Action::SetNotes(vec![]));

        rx.changed().await.expect("Store should still be alive");
        assert!(rx.borrow_and_update().notes.is_empty());
    }
}
