//! Widget session state and the exchange control loop.
//!
//! A [`ChatSession`] holds the fixed session identity, the transcript, the
//! thinking flag, and the teardown token. Submitting text drives one
//! exchange: append the user message, one network call, then either a
//! progressive reveal of the response or a single error message.

mod exchange;
mod manager;
mod reveal;
mod transcript;

pub use exchange::ERROR_PREFIX;
pub use manager::ChatSession;
