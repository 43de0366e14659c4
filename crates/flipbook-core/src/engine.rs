//! Boundary traits for the external page-flip engine and its host.
//!
//! The core never renders or animates anything. It drives an engine through
//! [`PageFlipEngine`], tags mounted page roots through [`PageNode`], and defers
//! engine loads to the next paint through [`FrameScheduler`].

use std::rc::Rc;

use serde_json::Value;

use crate::config::BookConfig;
use crate::error::Result;
use crate::event::EventKind;
use crate::types::{FlipCorner, PageDensity, PageOrientation, PageState};

/// Handler registered with the engine for one event name.
///
/// Receives the `data` field of the engine's `{ data, object }` payload.
pub type RawHandler = Rc<dyn Fn(&Value) + 'static>;

/// The external page-flip engine.
///
/// All methods take `&self`: the engine may fire events synchronously from
/// inside a navigation call, and those handlers query the engine again.
pub trait PageFlipEngine: Sized + 'static {
	/// Element the engine is bound to.
	type Container: Clone + 'static;
	/// Mounted page root.
	type Node: PageNode + Clone + 'static;

	/// Builds an engine bound to `container` with a settings snapshot.
	fn construct(container: &Self::Container, config: &BookConfig) -> Result<Self>;

	/// Loads pages from mounted nodes, replacing any existing pages.
	fn load_from_html(&self, nodes: &[Self::Node]);
	/// Reconciles the page set with mounted nodes, keeping navigation state.
	fn update_from_html(&self, nodes: &[Self::Node]);
	/// Drops all pages.
	fn clear(&self);
	/// Tears down the engine and its listeners.
	fn destroy(&self);
	/// Whether pages have been loaded and the flip controller exists.
	fn has_flip_controller(&self) -> bool;

	/// Animated flip to a page.
	fn flip(&self, page: usize, corner: Option<FlipCorner>);
	/// Animated flip forward.
	fn flip_next(&self, corner: Option<FlipCorner>);
	/// Animated flip backward.
	fn flip_prev(&self, corner: Option<FlipCorner>);
	/// Jump to a page without animation.
	fn turn_to_page(&self, page: usize);

	/// Current page index.
	fn current_page_index(&self) -> usize;
	/// Number of loaded pages.
	fn page_count(&self) -> usize;
	/// Current orientation, if the engine reports a known one.
	fn orientation(&self) -> Option<PageOrientation>;
	/// Current interaction state, if the engine reports a known one.
	fn state(&self) -> Option<PageState>;

	/// Registers a handler for an event name.
	fn on(&self, kind: EventKind, handler: RawHandler);
	/// Removes every handler for an event name.
	fn off(&self, kind: EventKind);
}

/// A mounted page root the engine discovers pages from.
pub trait PageNode {
	/// Records the resolved density and ordinal on the node.
	fn tag(&self, density: PageDensity, index: usize);
}

/// Runs a task at the next paint frame.
pub trait FrameScheduler: 'static {
	/// Keeps the request alive. Dropping it before the frame cancels the task.
	type Handle: 'static;

	/// Schedules `task` for the next frame.
	fn request_frame(&self, task: Box<dyn FnOnce() + 'static>) -> Self::Handle;
}
