//! Control surface.
//!
//! Prev/next availability and the position indicator, derived from mirrored
//! state only. Actions go straight to the engine and never touch the mirror:
//! the `flip` event that follows is what moves the current page.

use crate::bridge::MirroredState;
use crate::engine::PageFlipEngine;
use crate::handle::BookHandle;

/// Shown in place of the total while the page count is unknown.
pub const UNKNOWN_TOTAL: &str = "...";

/// Snapshot of the built-in controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
	/// The previous button is disabled.
	pub prev_disabled: bool,
	/// The next button is disabled.
	pub next_disabled: bool,
	/// Text of the position indicator.
	pub indicator: String,
}

impl ControlState {
	/// Derives the controls from mirrored state.
	pub fn derive(state: &MirroredState) -> Self {
		Self {
			prev_disabled: !can_flip_prev(state.current_page_index),
			next_disabled: !can_flip_next(state.current_page_index, state.page_count),
			indicator: indicator(state.current_page_index, state.page_count),
		}
	}
}

/// False exactly on the first page.
pub fn can_flip_prev(current: usize) -> bool {
	current != 0
}

/// False on the last page, and whenever the count is 0.
pub fn can_flip_next(current: usize, page_count: usize) -> bool {
	current.saturating_add(1) < page_count
}

/// `"<current + 1> / <total>"`, with `...` for an unknown total.
pub fn indicator(current: usize, page_count: usize) -> String {
	if page_count == 0 {
		format!("{} / {}", current + 1, UNKNOWN_TOTAL)
	} else {
		format!("{} / {}", current + 1, page_count)
	}
}

/// Previous-button action.
pub fn prev<E: PageFlipEngine>(handle: &BookHandle<E>) {
	handle.flip_prev(None);
}

/// Next-button action.
pub fn next<E: PageFlipEngine>(handle: &BookHandle<E>) {
	handle.flip_next(None);
}
