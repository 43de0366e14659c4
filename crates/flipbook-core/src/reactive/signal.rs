//! Signal - shared observable state
//!
//! `Signal<T>` holds the mirrored engine state. Clones share one value, and
//! every write notifies the registered observers with a snapshot of the new
//! value.
//!
//! ```ignore
//! use flipbook_core::reactive::Signal;
//!
//! let page = Signal::new(0usize);
//! let _sub = page.subscribe(|p| println!("page is now {}", p));
//!
//! page.set(3); // prints "page is now 3"
//! page.update(|p| *p += 1); // prints "page is now 4"
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Observer<T> = Rc<dyn Fn(&T) + 'static>;

struct Observers<T: 'static> {
	next_id: u64,
	entries: Vec<(u64, Observer<T>)>,
}

impl<T: 'static> Observers<T> {
	fn snapshot(&self) -> Vec<Observer<T>> {
		self.entries.iter().map(|(_, f)| Rc::clone(f)).collect()
	}
}

/// A shared, observable value.
///
/// ## Cloning
///
/// `Signal<T>` shares its value and observer list via `Rc`. Writes through
/// any clone are visible to every clone and notify every observer.
pub struct Signal<T: 'static> {
	value: Rc<RefCell<T>>,
	observers: Rc<RefCell<Observers<T>>>,
}

impl<T: 'static> Signal<T> {
	/// Creates a signal holding `value`.
	pub fn new(value: T) -> Self {
		Self {
			value: Rc::new(RefCell::new(value)),
			observers: Rc::new(RefCell::new(Observers {
				next_id: 0,
				entries: Vec::new(),
			})),
		}
	}

	/// Returns a clone of the current value.
	pub fn get(&self) -> T
	where
		T: Clone,
	{
		self.value.borrow().clone()
	}

	/// Reads the current value without cloning it.
	pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		f(&*self.value.borrow())
	}

	/// Replaces the value and notifies observers.
	pub fn set(&self, value: T)
	where
		T: Clone,
	{
		*self.value.borrow_mut() = value;
		self.notify();
	}

	/// Mutates the value in place and notifies observers once.
	pub fn update<F>(&self, f: F)
	where
		F: FnOnce(&mut T),
		T: Clone,
	{
		f(&mut *self.value.borrow_mut());
		self.notify();
	}

	/// Registers an observer called after every write.
	///
	/// The observer stays registered until the returned [`Subscription`] is
	/// dropped.
	#[must_use = "dropping the Subscription detaches the observer immediately"]
	pub fn subscribe<F>(&self, f: F) -> Subscription
	where
		F: Fn(&T) + 'static,
	{
		let id = {
			let mut observers = self.observers.borrow_mut();
			let id = observers.next_id;
			observers.next_id += 1;
			observers.entries.push((id, Rc::new(f)));
			id
		};

		let weak: Weak<RefCell<Observers<T>>> = Rc::downgrade(&self.observers);
		Subscription {
			detach: Some(Box::new(move || {
				if let Some(observers) = weak.upgrade() {
					observers.borrow_mut().entries.retain(|(entry, _)| *entry != id);
				}
			})),
		}
	}

	/// A read-only view sharing this signal's value.
	pub fn read_only(&self) -> ReadSignal<T> {
		ReadSignal {
			inner: self.clone(),
		}
	}

	/// Number of live observers.
	pub fn observer_count(&self) -> usize {
		self.observers.borrow().entries.len()
	}

	// Observers receive a snapshot so they may write back to the signal.
	fn notify(&self)
	where
		T: Clone,
	{
		let observers = self.observers.borrow().snapshot();
		if observers.is_empty() {
			return;
		}
		let snapshot = self.value.borrow().clone();
		for observer in observers {
			observer(&snapshot);
		}
	}
}

impl<T: 'static> Clone for Signal<T> {
	fn clone(&self) -> Self {
		Self {
			value: Rc::clone(&self.value),
			observers: Rc::clone(&self.observers),
		}
	}
}

impl<T: Default + 'static> Default for Signal<T> {
	fn default() -> Self {
		Self::new(T::default())
	}
}

impl<T: fmt::Debug + 'static> fmt::Debug for Signal<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Signal")
			.field("value", &*self.value.borrow())
			.field("observers", &self.observers.borrow().entries.len())
			.finish()
	}
}

/// Read-only view of a [`Signal`].
///
/// Handed to consumers of state they must not write, such as the mirrored
/// engine state.
pub struct ReadSignal<T: 'static> {
	inner: Signal<T>,
}

impl<T: 'static> ReadSignal<T> {
	/// Returns a clone of the current value.
	pub fn get(&self) -> T
	where
		T: Clone,
	{
		self.inner.get()
	}

	/// Reads the current value without cloning it.
	pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		self.inner.with(f)
	}

	/// Registers an observer; see [`Signal::subscribe`].
	#[must_use = "dropping the Subscription detaches the observer immediately"]
	pub fn subscribe<F>(&self, f: F) -> Subscription
	where
		F: Fn(&T) + 'static,
	{
		self.inner.subscribe(f)
	}
}

impl<T: 'static> Clone for ReadSignal<T> {
	fn clone(&self) -> Self {
		Self {
			inner: self.inner.clone(),
		}
	}
}

impl<T: fmt::Debug + 'static> fmt::Debug for ReadSignal<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("ReadSignal").field(&self.inner).finish()
	}
}

impl<T: 'static> From<Signal<T>> for ReadSignal<T> {
	fn from(inner: Signal<T>) -> Self {
		Self { inner }
	}
}

/// Keeps a [`Signal`] observer registered. Dropping it detaches the observer.
pub struct Subscription {
	detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
	/// Detaches the observer now.
	pub fn unsubscribe(mut self) {
		if let Some(detach) = self.detach.take() {
			detach();
		}
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		if let Some(detach) = self.detach.take() {
			detach();
		}
	}
}

impl fmt::Debug for Subscription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription")
			.field("active", &self.detach.is_some())
			.finish()
	}
}
