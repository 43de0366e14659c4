//! Flipbook Core - synchronization core for page-flip book components
//!
//! Keeps one external, imperative page-flip engine consistent with a
//! declarative list of pages that a host re-renders over time. Nothing here
//! renders or animates; the engine does that. This crate decides when the
//! engine is built, fed, reloaded and torn down, and mirrors its events back
//! into observable state.
//!
//! ## Architecture
//!
//! - [`materialize`]: children to ordered, density-annotated page descriptors
//! - [`lifecycle`]: single owner of the engine instance
//! - [`bridge`]: engine events to mirrored state and caller callbacks
//! - [`controls`]: prev/next availability and the position indicator
//! - [`handle`]: imperative façade usable before the engine exists
//! - [`hook`]: state-and-actions bundle for ergonomic consumption
//! - [`book`]: [`FlipBook`], which drives all of the above for one book
//!
//! Boundary traits live in [`engine`]; the browser binding implements them
//! in `flipbook-pages`. With the `testing` feature, `testing` implements them
//! with recording doubles.
//!
//! ## Example
//!
//! ```ignore
//! use flipbook_core::{BookChild, BookConfig, BookProps, FlipBook, PageProps};
//!
//! let mut book = FlipBook::new(
//!     BookProps::new(BookConfig::default().with_show_cover(true)),
//!     scheduler,
//! );
//! book.attach_container(container);
//!
//! let children = vec![
//!     BookChild::page(PageProps::new().number(1), "Cover"),
//!     BookChild::page(PageProps::new().number(2), "Chapter 1"),
//! ];
//! for descriptor in book.render(&children).to_vec() {
//!     let node = host.render_page(&children[descriptor.source], &descriptor);
//!     book.mount_page(descriptor.index, node);
//! }
//! book.commit()?;
//! ```

#![warn(missing_docs)]

pub mod book;
pub mod bridge;
pub mod config;
pub mod controls;
pub mod engine;
pub mod error;
pub mod event;
pub mod handle;
pub mod hook;
pub mod lifecycle;
pub mod logging;
pub mod materialize;
pub mod reactive;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod types;
pub mod wrapper;

pub use book::{BookView, ControlsView, FlipBook};
pub use bridge::{EventBridge, MirroredState};
pub use config::{BookConfig, BookProps, WrapperOptions};
pub use controls::ControlState;
pub use engine::{FrameScheduler, PageFlipEngine, PageNode, RawHandler};
pub use error::{FlipBookError, Result};
pub use event::{
	BookCallbacks, BookState, EngineEvent, EventKind, FlipEvent, OrientationEvent, StateEvent,
};
pub use handle::{BookHandle, HandleRef};
pub use hook::{FlipBookState, UseFlipBook, use_flip_book};
pub use lifecycle::{BookLifecycle, EngineSlot, LifecycleState, Liveness, PageLoad, SyncOutcome};
pub use materialize::{BookChild, Materialized, Materializer, PageDescriptor, PageSlots, materialize};
pub use reactive::{Callback, ReadSignal, Signal, Subscription};
pub use types::{CoverPosition, FlipCorner, PageDensity, PageOrientation, PageState, SizeType};
pub use wrapper::{Attributes, CoverProps, PageProps, Style};

// Used by the exported logging macros.
#[doc(hidden)]
pub mod __private {
	pub use tracing;
	#[cfg(target_arch = "wasm32")]
	pub use web_sys;
}
