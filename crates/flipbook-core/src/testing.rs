//! Test doubles for the engine boundary.
//!
//! [`MockEngine`] records every call into a log shared with its
//! [`MockContainer`], so a test holding the container can inspect calls and
//! fire events after the engine has been moved into a book.
//! [`ManualScheduler`] queues frame tasks until [`ManualScheduler::run_frame`].

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use serde_json::Value;

use crate::config::BookConfig;
use crate::engine::{FrameScheduler, PageFlipEngine, PageNode, RawHandler};
use crate::error::{FlipBookError, Result};
use crate::event::EventKind;
use crate::types::{FlipCorner, PageDensity, PageOrientation, PageState};

/// A call made on a [`MockEngine`].
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
	/// Constructor with the settings snapshot.
	Construct(BookConfig),
	/// `loadFromHTML` with node ids.
	LoadFromHtml(Vec<usize>),
	/// `updateFromHtml` with node ids.
	UpdateFromHtml(Vec<usize>),
	/// `clear`
	Clear,
	/// `destroy`
	Destroy,
	/// `flip`
	Flip(usize, Option<FlipCorner>),
	/// `flipNext`
	FlipNext(Option<FlipCorner>),
	/// `flipPrev`
	FlipPrev(Option<FlipCorner>),
	/// `turnToPage`
	TurnToPage(usize),
	/// `on`
	On(EventKind),
	/// `off`
	Off(EventKind),
}

#[derive(Default)]
struct MockShared {
	log: RefCell<Vec<EngineCall>>,
	handlers: RefCell<BTreeMap<EventKind, Vec<RawHandler>>>,
	page_count: Cell<usize>,
	current: Cell<usize>,
	orientation: Cell<Option<PageOrientation>>,
	state: Cell<Option<PageState>>,
	controller: Cell<bool>,
	fail_construct: Cell<bool>,
}

/// Container for a [`MockEngine`]; clones share the engine's state.
#[derive(Clone, Default)]
pub struct MockContainer {
	shared: Rc<MockShared>,
}

impl std::fmt::Debug for MockContainer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MockContainer")
			.field("calls", &self.shared.log.borrow().len())
			.finish()
	}
}

impl MockContainer {
	/// A fresh container with an empty log.
	pub fn new() -> Self {
		Self::default()
	}

	/// Makes the next constructions fail.
	pub fn fail_construct(&self, fail: bool) {
		self.shared.fail_construct.set(fail);
	}

	/// Every call so far, in order.
	pub fn calls(&self) -> Vec<EngineCall> {
		self.shared.log.borrow().clone()
	}

	/// Calls other than `on`/`off`.
	pub fn engine_calls(&self) -> Vec<EngineCall> {
		self.calls()
			.into_iter()
			.filter(|call| !matches!(call, EngineCall::On(_) | EngineCall::Off(_)))
			.collect()
	}

	/// Forgets recorded calls.
	pub fn clear_calls(&self) {
		self.shared.log.borrow_mut().clear();
	}

	/// Number of constructor calls.
	pub fn constructions(&self) -> usize {
		self.shared
			.log
			.borrow()
			.iter()
			.filter(|call| matches!(call, EngineCall::Construct(_)))
			.count()
	}

	/// Handlers currently registered for an event.
	pub fn handler_count(&self, kind: EventKind) -> usize {
		self.shared
			.handlers
			.borrow()
			.get(&kind)
			.map_or(0, Vec::len)
	}

	/// Makes `getFlipController` report no controller, as after a failed load.
	pub fn drop_controller(&self) {
		self.shared.controller.set(false);
	}

	/// Sets what `getPageCount` / `getCurrentPageIndex` report.
	pub fn set_position(&self, current: usize, page_count: usize) {
		self.shared.current.set(current);
		self.shared.page_count.set(page_count);
	}

	/// Sets what `getOrientation` / `getState` report.
	pub fn set_mode(&self, orientation: Option<PageOrientation>, state: Option<PageState>) {
		self.shared.orientation.set(orientation);
		self.shared.state.set(state);
	}

	/// Fires an event with the given `data` to every registered handler.
	pub fn emit(&self, kind: EventKind, data: Value) {
		let handlers: Vec<RawHandler> = self
			.shared
			.handlers
			.borrow()
			.get(&kind)
			.cloned()
			.unwrap_or_default();
		for handler in handlers {
			handler(&data);
		}
	}
}

/// Recording engine.
pub struct MockEngine {
	shared: Rc<MockShared>,
}

impl MockEngine {
	fn record(&self, call: EngineCall) {
		self.shared.log.borrow_mut().push(call);
	}
}

impl PageFlipEngine for MockEngine {
	type Container = MockContainer;
	type Node = MockNode;

	fn construct(container: &MockContainer, config: &BookConfig) -> Result<Self> {
		if container.shared.fail_construct.get() {
			return Err(FlipBookError::EngineConstruction(
				"container rejected".to_string(),
			));
		}
		let engine = MockEngine {
			shared: Rc::clone(&container.shared),
		};
		engine.record(EngineCall::Construct(config.clone()));
		engine.shared.current.set(config.start_page);
		Ok(engine)
	}

	fn load_from_html(&self, nodes: &[MockNode]) {
		self.record(EngineCall::LoadFromHtml(nodes.iter().map(|n| n.id).collect()));
		self.shared.page_count.set(nodes.len());
		self.shared.controller.set(true);
	}

	fn update_from_html(&self, nodes: &[MockNode]) {
		self.record(EngineCall::UpdateFromHtml(
			nodes.iter().map(|n| n.id).collect(),
		));
		self.shared.page_count.set(nodes.len());
	}

	fn clear(&self) {
		self.record(EngineCall::Clear);
		self.shared.page_count.set(0);
	}

	fn destroy(&self) {
		self.record(EngineCall::Destroy);
		self.shared.handlers.borrow_mut().clear();
		self.shared.controller.set(false);
	}

	fn has_flip_controller(&self) -> bool {
		self.shared.controller.get()
	}

	fn flip(&self, page: usize, corner: Option<FlipCorner>) {
		self.record(EngineCall::Flip(page, corner));
	}

	fn flip_next(&self, corner: Option<FlipCorner>) {
		self.record(EngineCall::FlipNext(corner));
	}

	fn flip_prev(&self, corner: Option<FlipCorner>) {
		self.record(EngineCall::FlipPrev(corner));
	}

	fn turn_to_page(&self, page: usize) {
		self.record(EngineCall::TurnToPage(page));
		self.shared.current.set(page);
	}

	fn current_page_index(&self) -> usize {
		self.shared.current.get()
	}

	fn page_count(&self) -> usize {
		self.shared.page_count.get()
	}

	fn orientation(&self) -> Option<PageOrientation> {
		self.shared.orientation.get()
	}

	fn state(&self) -> Option<PageState> {
		self.shared.state.get()
	}

	fn on(&self, kind: EventKind, handler: RawHandler) {
		self.record(EngineCall::On(kind));
		self.shared
			.handlers
			.borrow_mut()
			.entry(kind)
			.or_default()
			.push(handler);
	}

	fn off(&self, kind: EventKind) {
		self.record(EngineCall::Off(kind));
		self.shared.handlers.borrow_mut().remove(&kind);
	}
}

/// Page root with an id and a record of its tags.
#[derive(Debug, Clone, Default)]
pub struct MockNode {
	/// Identifies the node in [`EngineCall`] logs.
	pub id: usize,
	tags: Rc<RefCell<Vec<(PageDensity, usize)>>>,
}

impl MockNode {
	/// A node with the given id.
	pub fn new(id: usize) -> Self {
		Self {
			id,
			tags: Rc::default(),
		}
	}

	/// Last density/ordinal tag applied to this node.
	pub fn last_tag(&self) -> Option<(PageDensity, usize)> {
		self.tags.borrow().last().copied()
	}
}

impl PageNode for MockNode {
	fn tag(&self, density: PageDensity, index: usize) {
		self.tags.borrow_mut().push((density, index));
	}
}

type QueuedFrame = (Rc<Cell<bool>>, Box<dyn FnOnce()>);

/// Scheduler that runs frames on demand. Clones share one queue.
#[derive(Clone, Default)]
pub struct ManualScheduler {
	queue: Rc<RefCell<Vec<QueuedFrame>>>,
}

/// Handle for a [`ManualScheduler`] task; dropping it cancels the task.
#[derive(Debug)]
pub struct ManualFrame {
	cancelled: Rc<Cell<bool>>,
}

impl Drop for ManualFrame {
	fn drop(&mut self) {
		self.cancelled.set(true);
	}
}

impl ManualScheduler {
	/// An empty scheduler.
	pub fn new() -> Self {
		Self::default()
	}

	/// Tasks queued and not cancelled.
	pub fn pending(&self) -> usize {
		self.queue
			.borrow()
			.iter()
			.filter(|(cancelled, _)| !cancelled.get())
			.count()
	}

	/// Runs every queued, non-cancelled task. Returns how many ran.
	pub fn run_frame(&self) -> usize {
		let frame = std::mem::take(&mut *self.queue.borrow_mut());
		let mut ran = 0;
		for (cancelled, task) in frame {
			if !cancelled.get() {
				task();
				ran += 1;
			}
		}
		ran
	}
}

impl FrameScheduler for ManualScheduler {
	type Handle = ManualFrame;

	fn request_frame(&self, task: Box<dyn FnOnce() + 'static>) -> ManualFrame {
		let cancelled = Rc::new(Cell::new(false));
		self.queue.borrow_mut().push((Rc::clone(&cancelled), task));
		ManualFrame { cancelled }
	}
}
