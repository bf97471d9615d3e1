//! The interaction loop: generate, present, then commit, edit or regenerate.

pub mod session;
pub mod state;

pub use session::Session;
pub use state::{Completion, State};
