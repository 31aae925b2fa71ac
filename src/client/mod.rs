// src/client/mod.rs
pub mod actions;
pub mod api;
pub mod coordinator;
pub mod reducer;
pub mod store;

pub use actions::{Action, Intent, IntentKind};
pub use api::{ClientError, HttpNotesApi, NotesApi};
pub use coordinator::{CoordinatorError, EffectCoordinator, EffectEvent, EffectOutcome};
pub use reducer::{reduce, State};
pub use store::Store;
