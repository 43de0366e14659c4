//! Imperative handle.
//!
//! [`BookHandle`] is the stable façade for callers that hold a reference to
//! the book rather than driving it through props. Every operation degrades to
//! a no-op or a default while the engine does not exist.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::engine::PageFlipEngine;
use crate::lifecycle::EngineSlot;
use crate::types::{FlipCorner, PageOrientation, PageState};

/// Navigation and query façade over the engine slot.
pub struct BookHandle<E> {
	engine: EngineSlot<E>,
}

impl<E: PageFlipEngine> BookHandle<E> {
	pub(crate) fn new(engine: EngineSlot<E>) -> Self {
		Self { engine }
	}

	/// Whether the engine currently exists.
	pub fn is_ready(&self) -> bool {
		!self.engine.is_empty()
	}

	/// Flips forward with animation.
	pub fn flip_next(&self, corner: Option<FlipCorner>) {
		if let Some(engine) = self.engine.get() {
			engine.flip_next(corner);
		}
	}

	/// Flips backward with animation.
	pub fn flip_prev(&self, corner: Option<FlipCorner>) {
		if let Some(engine) = self.engine.get() {
			engine.flip_prev(corner);
		}
	}

	/// Flips to `page` with animation.
	pub fn flip(&self, page: usize, corner: Option<FlipCorner>) {
		if let Some(engine) = self.engine.get() {
			engine.flip(page, corner);
		}
	}

	/// Jumps to `page` without animation.
	pub fn turn_to_page(&self, page: usize) {
		if let Some(engine) = self.engine.get() {
			engine.turn_to_page(page);
		}
	}

	/// Current page index, 0 without an engine.
	pub fn current_page_index(&self) -> usize {
		self.engine.get().map_or(0, |e| e.current_page_index())
	}

	/// Page count, 0 without an engine.
	pub fn page_count(&self) -> usize {
		self.engine.get().map_or(0, |e| e.page_count())
	}

	/// Orientation, `None` without an engine.
	pub fn orientation(&self) -> Option<PageOrientation> {
		self.engine.get().and_then(|e| e.orientation())
	}

	/// Interaction state, `None` without an engine.
	pub fn state(&self) -> Option<PageState> {
		self.engine.get().and_then(|e| e.state())
	}
}

impl<E> Clone for BookHandle<E> {
	fn clone(&self) -> Self {
		Self {
			engine: self.engine.clone(),
		}
	}
}

impl<E> fmt::Debug for BookHandle<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("BookHandle")
			.field("engine", &self.engine)
			.finish()
	}
}

/// Attachable reference to a book's handle.
///
/// Created empty by the consumer and filled by the book it is attached to,
/// so a consumer can hold it before the book exists.
pub struct HandleRef<E> {
	current: Rc<RefCell<Option<BookHandle<E>>>>,
}

impl<E: PageFlipEngine> HandleRef<E> {
	/// An empty reference.
	pub fn new() -> Self {
		Self {
			current: Rc::new(RefCell::new(None)),
		}
	}

	/// The attached handle, if any.
	pub fn current(&self) -> Option<BookHandle<E>> {
		self.current.borrow().clone()
	}

	/// Runs `f` against the attached handle; `default` if none is attached.
	pub fn with_or<R>(&self, default: R, f: impl FnOnce(&BookHandle<E>) -> R) -> R {
		match self.current() {
			Some(handle) => f(&handle),
			None => default,
		}
	}

	pub(crate) fn set(&self, handle: Option<BookHandle<E>>) {
		*self.current.borrow_mut() = handle;
	}
}

impl<E: PageFlipEngine> Default for HandleRef<E> {
	fn default() -> Self {
		Self::new()
	}
}

impl<E> Clone for HandleRef<E> {
	fn clone(&self) -> Self {
		Self {
			current: Rc::clone(&self.current),
		}
	}
}

impl<E> fmt::Debug for HandleRef<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HandleRef")
			.field("attached", &self.current.borrow().is_some())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::BookConfig;
	use crate::lifecycle::BookLifecycle;
	use crate::testing::{EngineCall, ManualScheduler, MockContainer, MockEngine, MockNode};
	use rstest::rstest;

	fn ready_lifecycle() -> (BookLifecycle<MockEngine, ManualScheduler>, MockContainer) {
		let scheduler = ManualScheduler::new();
		let container = MockContainer::new();
		let mut lifecycle = BookLifecycle::new(scheduler.clone());
		lifecycle.attach_container(container.clone());
		lifecycle
			.sync(&BookConfig::default(), vec![MockNode::new(0)], |_| {})
			.unwrap();
		scheduler.run_frame();
		(lifecycle, container)
	}

	#[rstest]
	fn test_operations_are_noops_before_engine_exists() {
		let lifecycle: BookLifecycle<MockEngine, ManualScheduler> =
			BookLifecycle::new(ManualScheduler::new());
		let handle = BookHandle::new(lifecycle.engine());

		handle.flip(2, None);
		handle.flip_next(Some(FlipCorner::Top));
		handle.flip_prev(None);
		handle.turn_to_page(1);

		assert!(!handle.is_ready());
		assert_eq!(handle.current_page_index(), 0);
		assert_eq!(handle.page_count(), 0);
		assert_eq!(handle.orientation(), None);
		assert_eq!(handle.state(), None);
	}

	#[rstest]
	fn test_operations_delegate_once_ready() {
		let (lifecycle, container) = ready_lifecycle();
		let handle = BookHandle::new(lifecycle.engine());
		container.set_mode(Some(PageOrientation::Portrait), Some(PageState::Read));
		container.clear_calls();

		handle.flip(2, Some(FlipCorner::Bottom));
		handle.flip_next(None);
		handle.turn_to_page(0);

		assert_eq!(
			container.engine_calls(),
			vec![
				EngineCall::Flip(2, Some(FlipCorner::Bottom)),
				EngineCall::FlipNext(None),
				EngineCall::TurnToPage(0),
			]
		);
		assert_eq!(handle.page_count(), 1);
		assert_eq!(handle.orientation(), Some(PageOrientation::Portrait));
		assert_eq!(handle.state(), Some(PageState::Read));
	}

	#[rstest]
	fn test_handle_degrades_after_destroy() {
		let (mut lifecycle, container) = ready_lifecycle();
		let handle = BookHandle::new(lifecycle.engine());

		lifecycle.destroy();
		container.clear_calls();
		handle.flip_next(None);

		assert!(container.calls().is_empty());
		assert_eq!(handle.page_count(), 0);
	}

	#[rstest]
	fn test_handle_ref_fills_later() {
		let (lifecycle, _container) = ready_lifecycle();
		let handle_ref: HandleRef<MockEngine> = HandleRef::new();

		assert_eq!(handle_ref.with_or(usize::MAX, |h| h.page_count()), usize::MAX);

		handle_ref.set(Some(BookHandle::new(lifecycle.engine())));

		assert_eq!(handle_ref.with_or(usize::MAX, |h| h.page_count()), 1);
	}
}
