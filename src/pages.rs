//! Browser binding for the flipbook
//!
//! Wraps the `page-flip` JavaScript engine through `wasm-bindgen` and renders
//! books into the DOM with `web-sys`.
//!
//! ## Architecture
//!
//! - **Engine**: `JsPageFlip`, the engine instance behind the core's lifecycle
//! - **Scheduling**: deferred loads run on `requestAnimationFrame`
//! - **Component**: `MagazineBook` mounts pages, covers and the built-in controls
//!
//! Browser items are compiled for `wasm32` only.
//!
//! ## Example
//!
//! ```rust,ignore
//! use flipbook::pages::{MagazineBook, use_flip_book};
//! use flipbook::prelude::*;
//!
//! let hook = use_flip_book();
//! let book = MagazineBook::mount(&parent, BookProps::default().with_callbacks(hook.handlers()), children)?;
//! ```

// Re-export all flipbook-pages functionality
pub use flipbook_pages::*;
