//! Observable state and callbacks.

mod callback;
mod signal;

pub use callback::Callback;
pub use signal::{ReadSignal, Signal, Subscription};
