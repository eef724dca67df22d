//! Core engine types: session state, input events, RNG.
//!
//! These are the building blocks shared by the orchestrator and every
//! microgame variant; nothing here knows about a specific variant.

pub mod input;
pub mod rng;
pub mod session;

pub use input::{BinColor, PlayerInput, Tool};
pub use rng::SessionRng;
pub use session::{SessionState, LEVEL_STEP, STARTING_LIVES};
