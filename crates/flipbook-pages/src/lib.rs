//! Flipbook Pages - browser binding for flipbook
//!
//! Binds the `page-flip` JavaScript engine to [`flipbook_core`] through
//! `wasm-bindgen` and renders the book with `web-sys`.
//!
//! ## Architecture
//!
//! - `bindings`: extern declarations for the `page-flip` module
//! - `engine`: [`JsPageFlip`], the `PageFlipEngine` implementation
//! - `scheduler`: [`AnimationFrameScheduler`] on `requestAnimationFrame`
//! - `dom`: page/cover wrappers, container, and the controls row
//! - `component`: [`MagazineBook`], which mounts and drives a whole book
//!
//! Everything browser-facing is compiled for `wasm32` only; on other targets
//! this crate re-exports the core and nothing else.
//!
//! ## Example
//!
//! ```ignore
//! use flipbook_pages::{BookChild, BookConfig, BookProps, MagazineBook, PageProps, use_flip_book};
//!
//! let hook = use_flip_book();
//! let mut book = MagazineBook::mount(
//!     &parent,
//!     BookProps::new(BookConfig::default().with_show_cover(true))
//!         .with_callbacks(hook.handlers()),
//!     children,
//! )?;
//! book.attach_ref(&hook.book_ref);
//!
//! next_button.on_click(move || hook.flip_next(None));
//! ```

pub use flipbook_core::{
	BookCallbacks, BookChild, BookConfig, BookProps, CoverPosition, CoverProps, FlipBookError,
	FlipCorner, PageDensity, PageOrientation, PageProps, PageState, SizeType, Style, WrapperOptions,
};

#[cfg(target_arch = "wasm32")]
pub mod bindings;
#[cfg(target_arch = "wasm32")]
pub mod component;
#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod engine;
#[cfg(target_arch = "wasm32")]
pub mod scheduler;

#[cfg(target_arch = "wasm32")]
pub use component::{MagazineBook, MagazineBookHandle, MagazineBookRef};
#[cfg(target_arch = "wasm32")]
pub use engine::{JsPageFlip, PageRoot};
#[cfg(target_arch = "wasm32")]
pub use scheduler::{AnimationFrame, AnimationFrameScheduler};

/// Convenience hook bound to the browser engine.
#[cfg(target_arch = "wasm32")]
pub fn use_flip_book() -> flipbook_core::UseFlipBook<JsPageFlip> {
	flipbook_core::use_flip_book()
}

/// Installs the panic hook that forwards panics to `console.error`.
#[cfg(feature = "console_error_panic_hook")]
pub fn install_panic_hook() {
	console_error_panic_hook::set_once();
}
