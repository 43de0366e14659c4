//! # Flipbook
//!
//! A page-flip book component for Rust/WASM front-ends, built on the
//! `page-flip` engine.
//!
//! The engine-agnostic synchronization core (configuration, page
//! materialization, lifecycle, events, the imperative handle, and the
//! `use_flip_book` hook) is always available. The browser binding lives
//! behind the `pages` feature.
//!
//! ## Feature Flags
//!
//! - `pages` (default) - `wasm-bindgen` binding and the `MagazineBook` component
//! - `debug-sync` - verbose logging of every engine sync decision
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use flipbook::prelude::*;
//! use flipbook::pages::MagazineBook;
//!
//! let hook = flipbook::pages::use_flip_book();
//! let mut book = MagazineBook::mount(
//!     &parent,
//!     BookProps::new(BookConfig::default().with_size(300, 400))
//!         .with_callbacks(hook.handlers()),
//!     children,
//! )?;
//! book.attach_ref(&hook.book_ref);
//! ```

#[cfg(feature = "pages")]
pub mod pages;

// Re-export the core
pub use flipbook_core::*;

pub mod prelude {
	pub use crate::{
		BookCallbacks, BookChild, BookConfig, BookHandle, BookProps, CoverPosition, CoverProps,
		FlipBookError, FlipBookState, FlipCorner, HandleRef, PageDensity, PageOrientation,
		PageProps, PageState, SizeType, Style, UseFlipBook, WrapperOptions,
	};
}
