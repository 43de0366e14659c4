//! Error type for the flip book core.
//!
//! A missing engine instance is not an error: the handle and control surface
//! treat it as the normal state before the first commit. These variants cover
//! the boundaries where foreign data enters the crate.

use thiserror::Error;

/// Errors raised at the engine and host boundaries.
#[derive(Debug, Error)]
pub enum FlipBookError {
	/// A wire string did not match any variant of a closed enum.
	#[error("unknown {kind} value: {value:?}")]
	UnknownVariant {
		/// Name of the enum being parsed.
		kind: &'static str,
		/// The rejected input.
		value: String,
	},

	/// An event name outside the five bridged events.
	#[error("unknown engine event: {0:?}")]
	UnknownEvent(String),

	/// An engine event payload did not have the shape of its kind.
	#[error("invalid payload for '{event}' event: {reason}")]
	InvalidPayload {
		/// The event name.
		event: &'static str,
		/// What was wrong with the payload.
		reason: String,
	},

	/// Book settings could not be (de)serialized.
	#[error("invalid book configuration: {0}")]
	Config(#[from] serde_json::Error),

	/// The engine constructor rejected the container or settings.
	#[error("failed to construct page-flip engine: {0}")]
	EngineConstruction(String),

	/// A host DOM operation failed.
	#[error("DOM operation failed: {0}")]
	Dom(String),
}

/// Result alias used throughout the crate.
pub type Result<T, E = FlipBookError> = std::result::Result<T, E>;
