//! Callback wrapper for caller-supplied event observers.
//!
//! ```ignore
//! use flipbook_core::reactive::Callback;
//! use flipbook_core::event::FlipEvent;
//!
//! let on_flip = Callback::new(|e: FlipEvent| {
//!     info_log!("now on page {}", e.data);
//! });
//! ```

use std::fmt;
use std::rc::Rc;

/// A cloneable, single-threaded callback.
///
/// Cloning is cheap and keeps the same underlying closure, so two clones
/// compare equal with [`Callback::ptr_eq`].
pub struct Callback<Args, Ret = ()> {
	inner: Rc<dyn Fn(Args) -> Ret + 'static>,
}

impl<Args, Ret> Callback<Args, Ret> {
	/// Wraps a closure.
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(Args) -> Ret + 'static,
	{
		Self { inner: Rc::new(f) }
	}

	/// Invokes the callback.
	pub fn call(&self, args: Args) -> Ret {
		(self.inner)(args)
	}

	/// Returns true when both callbacks wrap the same closure.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}
}

impl<Args, Ret> Clone for Callback<Args, Ret> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<Args, Ret> fmt::Debug for Callback<Args, Ret> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Callback")
			.field("inner", &"<function>")
			.finish()
	}
}

impl<F, Args, Ret> From<F> for Callback<Args, Ret>
where
	F: Fn(Args) -> Ret + 'static,
{
	fn from(f: F) -> Self {
		Self::new(f)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::cell::Cell;

	#[rstest]
	fn test_call_forwards_arguments() {
		let total = Rc::new(Cell::new(0));
		let cb = Callback::new({
			let total = Rc::clone(&total);
			move |n: i32| total.set(total.get() + n)
		});

		cb.call(2);
		cb.clone().call(5);

		assert_eq!(total.get(), 7);
	}

	#[rstest]
	fn test_ptr_eq_tracks_identity() {
		let a: Callback<()> = Callback::new(|_| {});
		let b = a.clone();
		let c: Callback<()> = Callback::new(|_| {});

		assert!(a.ptr_eq(&b));
		assert!(!a.ptr_eq(&c));
	}
}
