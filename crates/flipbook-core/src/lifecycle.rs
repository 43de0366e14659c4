//! Engine instance lifecycle.
//!
//! [`BookLifecycle`] is the single owner of the engine instance. It moves
//! through `Unmounted -> AwaitingNodes -> Ready -> Destroyed`:
//!
//! - the engine is constructed once, the first time a container and at least
//!   one mounted page root are both available;
//! - every later sync reuses it, deferring `loadFromHTML`/`updateFromHtml` to
//!   the next paint frame so the host has committed the page roots;
//! - a shrinking page list clears the engine first and the deferred call
//!   refills the same instance through `updateFromHtml`;
//! - destroy tears the engine down exactly once and is terminal.
//!
//! Deferred tasks carry a [`Liveness`] token and re-read the engine slot when
//! they fire, so a destroy that lands between scheduling and the frame turns
//! the task into a no-op.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::config::BookConfig;
use crate::engine::{FrameScheduler, PageFlipEngine};
use crate::error::Result;
use crate::{debug_log, error_log, info_log, warn_log};

/// Lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
	/// No container yet.
	Unmounted,
	/// Container present, no page root mounted yet.
	AwaitingNodes,
	/// Engine constructed.
	Ready,
	/// Torn down. Terminal.
	Destroyed,
}

/// How the deferred call will feed pages to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLoad {
	/// First load after construction.
	Load,
	/// Refill after a clear.
	Reload,
	/// Incremental update of an existing page set.
	Update,
}

/// Result of [`BookLifecycle::sync`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
	/// Container or page roots missing; nothing scheduled.
	Waiting,
	/// A deferred page load was scheduled.
	Scheduled(PageLoad),
	/// The lifecycle is destroyed.
	Ignored,
}

/// Shared slot holding the engine instance, if any.
///
/// Only [`BookLifecycle`] fills or empties it; everyone else gets read access.
pub struct EngineSlot<E> {
	inner: Rc<RefCell<Option<Rc<E>>>>,
}

impl<E> EngineSlot<E> {
	fn new() -> Self {
		Self {
			inner: Rc::new(RefCell::new(None)),
		}
	}

	/// The engine, if constructed and not destroyed.
	///
	/// The returned `Rc` is detached from the slot, so calling into the engine
	/// never holds a borrow of the slot.
	pub fn get(&self) -> Option<Rc<E>> {
		self.inner.borrow().clone()
	}

	/// Returns true when no engine is present.
	pub fn is_empty(&self) -> bool {
		self.inner.borrow().is_none()
	}

	fn set(&self, engine: Rc<E>) {
		*self.inner.borrow_mut() = Some(engine);
	}

	fn take(&self) -> Option<Rc<E>> {
		self.inner.borrow_mut().take()
	}
}

impl<E> Clone for EngineSlot<E> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<E> fmt::Debug for EngineSlot<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("EngineSlot")
			.field("present", &!self.is_empty())
			.finish()
	}
}

/// Liveness flag shared with deferred tasks.
#[derive(Debug, Clone)]
pub struct Liveness {
	alive: Rc<Cell<bool>>,
}

impl Liveness {
	fn new() -> Self {
		Self {
			alive: Rc::new(Cell::new(true)),
		}
	}

	/// False once the owning lifecycle is destroyed.
	pub fn is_alive(&self) -> bool {
		self.alive.get()
	}

	fn revoke(&self) {
		self.alive.set(false);
	}
}

/// Owner of one engine instance bound to one container.
pub struct BookLifecycle<E: PageFlipEngine, S: FrameScheduler> {
	state: LifecycleState,
	container: Option<E::Container>,
	engine: EngineSlot<E>,
	scheduler: S,
	liveness: Liveness,
	pending: Option<S::Handle>,
	loaded: Rc<Cell<bool>>,
	reload: Rc<Cell<bool>>,
}

impl<E: PageFlipEngine, S: FrameScheduler> BookLifecycle<E, S> {
	/// A lifecycle with no container and no engine.
	pub fn new(scheduler: S) -> Self {
		Self {
			state: LifecycleState::Unmounted,
			container: None,
			engine: EngineSlot::new(),
			scheduler,
			liveness: Liveness::new(),
			pending: None,
			loaded: Rc::new(Cell::new(false)),
			reload: Rc::new(Cell::new(false)),
		}
	}

	/// Current state.
	pub fn state(&self) -> LifecycleState {
		self.state
	}

	/// Read access to the engine slot.
	pub fn engine(&self) -> EngineSlot<E> {
		self.engine.clone()
	}

	/// Token checked by deferred tasks.
	pub fn liveness(&self) -> Liveness {
		self.liveness.clone()
	}

	/// The bound container.
	pub fn container(&self) -> Option<&E::Container> {
		self.container.as_ref()
	}

	/// Binds the container the engine will be constructed on.
	///
	/// Ignored once an engine exists: the instance stays bound to the
	/// container it was built on.
	pub fn attach_container(&mut self, container: E::Container) {
		match self.state {
			LifecycleState::Unmounted | LifecycleState::AwaitingNodes => {
				self.container = Some(container);
			}
			LifecycleState::Ready => {
				warn_log!("lifecycle: container already bound to a live engine, ignoring");
			}
			LifecycleState::Destroyed => {
				warn_log!("lifecycle: attach_container after destroy, ignoring");
			}
		}
	}

	/// Brings the engine in line with the current page roots and settings.
	///
	/// `on_ready` runs inside the deferred task, right after the engine has
	/// been fed its pages. The bridge uses it to resubscribe.
	pub fn sync<F>(&mut self, config: &BookConfig, nodes: Vec<E::Node>, on_ready: F) -> Result<SyncOutcome>
	where
		F: FnOnce(&Rc<E>) + 'static,
	{
		if self.state == LifecycleState::Destroyed {
			return Ok(SyncOutcome::Ignored);
		}

		let Some(container) = self.container.as_ref() else {
			return Ok(SyncOutcome::Waiting);
		};

		if nodes.is_empty() {
			if self.state == LifecycleState::Unmounted {
				self.transition(LifecycleState::AwaitingNodes);
			}
			return Ok(SyncOutcome::Waiting);
		}

		let load = if self.engine.is_empty() {
			let engine = E::construct(container, config).inspect_err(|e| {
				error_log!("lifecycle: engine construction failed: {}", e);
			})?;
			info_log!("lifecycle: engine constructed with {} page roots", nodes.len());
			self.engine.set(Rc::new(engine));
			self.transition(LifecycleState::Ready);
			PageLoad::Load
		} else if self.reload.get() {
			PageLoad::Reload
		} else if self.loaded.get() {
			PageLoad::Update
		} else {
			PageLoad::Load
		};

		let token = self.liveness.clone();
		let slot = self.engine.clone();
		let loaded = Rc::clone(&self.loaded);
		let reload = Rc::clone(&self.reload);
		let task = Box::new(move || {
			if !token.is_alive() {
				debug_log!("lifecycle: deferred load skipped, book destroyed");
				return;
			}
			let Some(engine) = slot.get() else {
				return;
			};
			// The flip controller survives clear(), so a reload refills the
			// existing instance instead of rebuilding its UI.
			reload.set(false);
			if loaded.get() && engine.has_flip_controller() {
				engine.update_from_html(&nodes);
			} else {
				engine.load_from_html(&nodes);
			}
			loaded.set(true);
			on_ready(&engine);
		});

		// Replacing the handle cancels a frame that has not fired yet.
		self.pending = Some(self.scheduler.request_frame(task));
		debug_log!("lifecycle: scheduled {:?}", load);
		Ok(SyncOutcome::Scheduled(load))
	}

	/// Clears the engine's pages before the next sync refills them.
	///
	/// Called when the page list shrinks. Has no effect before the first
	/// deferred load has run: the engine has no page collection to clear yet
	/// and the pending load picks up the latest nodes anyway.
	pub fn request_reload(&mut self) {
		if !self.loaded.get() {
			return;
		}
		if let Some(engine) = self.engine.get() {
			debug_log!("lifecycle: page list shrank, clearing engine");
			engine.clear();
			self.reload.set(true);
		}
	}

	/// Tears the engine down. Returns false if already destroyed.
	pub fn destroy(&mut self) -> bool {
		if self.state == LifecycleState::Destroyed {
			return false;
		}
		self.liveness.revoke();
		self.pending = None;
		if let Some(engine) = self.engine.take() {
			engine.destroy();
		}
		self.transition(LifecycleState::Destroyed);
		true
	}

	/// Whether a deferred load is outstanding.
	pub fn has_pending(&self) -> bool {
		self.pending.is_some()
	}

	fn transition(&mut self, to: LifecycleState) {
		debug_log!("lifecycle: {:?} -> {:?}", self.state, to);
		self.state = to;
	}
}

impl<E: PageFlipEngine, S: FrameScheduler> Drop for BookLifecycle<E, S> {
	fn drop(&mut self) {
		self.destroy();
	}
}

impl<E: PageFlipEngine, S: FrameScheduler> fmt::Debug for BookLifecycle<E, S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("BookLifecycle")
			.field("state", &self.state)
			.field("engine", &self.engine)
			.field("pending", &self.pending.is_some())
			.finish()
	}
}
