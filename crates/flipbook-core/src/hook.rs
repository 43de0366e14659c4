//! Convenience state hook.
//!
//! [`use_flip_book`] bundles a [`HandleRef`], its own state copy, and the
//! four callbacks that keep that copy current. Attach the ref to a book and
//! pass [`UseFlipBook::handlers`] as its callbacks:
//!
//! ```ignore
//! let book = use_flip_book::<MyEngine>();
//! let mut flip_book = FlipBook::new(
//! 	BookProps::new(config).with_callbacks(book.handlers()),
//! 	scheduler,
//! );
//! flip_book.attach_ref(&book.book_ref);
//!
//! if book.can_flip_next() {
//! 	book.flip_next(None);
//! }
//! ```

use crate::controls::{can_flip_next, can_flip_prev};
use crate::engine::PageFlipEngine;
use crate::event::BookCallbacks;
use crate::handle::HandleRef;
use crate::reactive::{ReadSignal, Signal};
use crate::types::{FlipCorner, PageOrientation, PageState};

/// State tracked by the hook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlipBookState {
	/// Page index from the last `flip` or `init`.
	pub current_page: usize,
	/// Page count read from the book on `init`.
	pub page_count: usize,
	/// Orientation from the last `changeOrientation`.
	pub orientation: PageOrientation,
	/// State from the last `changeState`.
	pub page_state: Option<PageState>,
	/// `page_state == Some(Flipping)`.
	pub is_flipping: bool,
}

/// State and actions for one book.
pub struct UseFlipBook<E: PageFlipEngine> {
	/// Attach this to the book.
	pub book_ref: HandleRef<E>,
	state: Signal<FlipBookState>,
	handlers: BookCallbacks,
}

/// Creates the hook.
///
/// The callbacks are built here once, so every [`UseFlipBook::handlers`]
/// result compares equal under [`BookCallbacks::same_as`].
pub fn use_flip_book<E: PageFlipEngine>() -> UseFlipBook<E> {
	let book_ref = HandleRef::new();
	let state = Signal::new(FlipBookState::default());
	let handlers = tracking_callbacks(&book_ref, &state);
	UseFlipBook {
		book_ref,
		state,
		handlers,
	}
}

fn tracking_callbacks<E: PageFlipEngine>(
	book_ref: &HandleRef<E>,
	state: &Signal<FlipBookState>,
) -> BookCallbacks {
	let on_flip = state.clone();
	let on_orientation = state.clone();
	let on_state = state.clone();
	let on_init = state.clone();
	let book_ref = book_ref.clone();

	BookCallbacks::new()
		.on_flip(move |e| on_flip.update(|s| s.current_page = e.data))
		.on_change_orientation(move |e| on_orientation.update(|s| s.orientation = e.data))
		.on_change_state(move |e| {
			on_state.update(|s| {
				s.page_state = Some(e.data);
				s.is_flipping = e.data == PageState::Flipping;
			})
		})
		.on_init(move |e| {
			let page_count = book_ref.with_or(0, |h| h.page_count());
			on_init.update(|s| {
				s.current_page = e.page;
				s.page_count = page_count;
			});
		})
}

impl<E: PageFlipEngine> UseFlipBook<E> {
	/// Current state.
	pub fn state(&self) -> ReadSignal<FlipBookState> {
		self.state.read_only()
	}

	/// Animated flip forward.
	pub fn flip_next(&self, corner: Option<FlipCorner>) {
		self.book_ref.with_or((), |h| h.flip_next(corner));
	}

	/// Animated flip backward.
	pub fn flip_prev(&self, corner: Option<FlipCorner>) {
		self.book_ref.with_or((), |h| h.flip_prev(corner));
	}

	/// Animated flip to `page`.
	pub fn flip_to(&self, page: usize, corner: Option<FlipCorner>) {
		self.book_ref.with_or((), |h| h.flip(page, corner));
	}

	/// Jump to `page` without animation.
	pub fn turn_to(&self, page: usize) {
		self.book_ref.with_or((), |h| h.turn_to_page(page));
	}

	/// False on the last page and while the count is unknown.
	pub fn can_flip_next(&self) -> bool {
		self.state
			.with(|s| can_flip_next(s.current_page, s.page_count))
	}

	/// False on the first page.
	pub fn can_flip_prev(&self) -> bool {
		self.state.with(|s| can_flip_prev(s.current_page))
	}

	/// Callbacks that keep [`Self::state`] current.
	///
	/// `on_update` is left unset.
	pub fn handlers(&self) -> BookCallbacks {
		self.handlers.clone()
	}
}

impl<E: PageFlipEngine> Clone for UseFlipBook<E> {
	fn clone(&self) -> Self {
		Self {
			book_ref: self.book_ref.clone(),
			state: self.state.clone(),
			handlers: self.handlers.clone(),
		}
	}
}

impl<E: PageFlipEngine> std::fmt::Debug for UseFlipBook<E> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("UseFlipBook")
			.field("book_ref", &self.book_ref)
			.field("state", &self.state)
			.finish()
	}
}
