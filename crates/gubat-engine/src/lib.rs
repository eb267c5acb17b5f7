//! Story state machine for San Gubat.
//!
//! [`Game`] owns the single mutable [`GameState`] of a play session and
//! persists it to a [`SaveStore`] after every change. [`Session`] pairs a game
//! with a validated [`Story`](gubat_story::Story) and drives node transitions:
//! arrival effects, HP game over, and ending detection. Presenters read
//! [`Session::screen`] and call [`Session::choose`].

/// Session configuration.
pub mod config;
/// Idempotent application of arrival effects.
pub mod effects;
/// Error types for the engine.
pub mod error;
/// The game state store.
pub mod game;
/// Navigation and ending detection.
pub mod session;
/// The persisted game state record.
pub mod state;
/// Durable key-value storage for saves.
pub mod store;

pub use config::GameConfig;
pub use effects::{AppliedEffects, EffectKey, EffectNotice};
pub use error::{EngineError, EngineResult, StoreError, StoreResult};
pub use game::Game;
pub use session::{Arrival, Screen, Session};
pub use state::{GameState, HpStatus};
pub use store::{FileStore, MemoryStore, SaveStore};
