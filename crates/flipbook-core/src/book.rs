//! Book orchestrator.
//!
//! [`FlipBook`] ties materialization, the engine lifecycle, the event bridge,
//! and the control surface together for one book. A host drives it once per
//! render pass:
//!
//! 1. [`FlipBook::render`] with the current children, rendering one root per
//!    returned descriptor;
//! 2. [`FlipBook::mount_page`] for every root the host committed;
//! 3. [`FlipBook::commit`] once the pass is on screen.
//!
//! Props changes go through [`FlipBook::set_props`]; teardown through
//! [`FlipBook::unmount`] or by dropping the book.

use crate::bridge::{EventBridge, MirroredState};
use crate::config::BookProps;
use crate::controls::{self, ControlState};
use crate::engine::{FrameScheduler, PageFlipEngine};
use crate::error::Result;
use crate::handle::{BookHandle, HandleRef};
use crate::lifecycle::{BookLifecycle, LifecycleState, SyncOutcome};
use crate::materialize::{BookChild, Materialized, Materializer, PageDescriptor, PageSlots};
use crate::reactive::ReadSignal;
use crate::wrapper::{Style, container_style};
use crate::{debug_log, info_log, warn_log};

/// What the host renders around the pages.
#[derive(Debug, Clone, PartialEq)]
pub struct BookView {
	/// Extra class on the container.
	pub class_name: String,
	/// Container inline style.
	pub style: Style,
	/// Present when the built-in controls are shown.
	pub controls: Option<ControlsView>,
}

/// Built-in controls row.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlsView {
	/// Extra class on the row.
	pub class_name: String,
	/// Extra inline style on the row.
	pub style: Style,
	/// Button and indicator state.
	pub state: ControlState,
}

/// One book bound to one engine instance.
pub struct FlipBook<E: PageFlipEngine, S: FrameScheduler> {
	props: BookProps,
	materializer: Materializer,
	slots: PageSlots<E::Node>,
	lifecycle: BookLifecycle<E, S>,
	bridge: EventBridge,
	handle: BookHandle<E>,
	refs: Vec<HandleRef<E>>,
	last_pass: Option<Materialized>,
	dirty: bool,
}

impl<E: PageFlipEngine, S: FrameScheduler> FlipBook<E, S> {
	/// A book with no container and no pages.
	pub fn new(props: BookProps, scheduler: S) -> Self {
		let lifecycle = BookLifecycle::new(scheduler);
		let handle = BookHandle::new(lifecycle.engine());
		Self {
			props,
			materializer: Materializer::new(),
			slots: PageSlots::new(),
			lifecycle,
			bridge: EventBridge::new(),
			handle,
			refs: Vec::new(),
			last_pass: None,
			dirty: true,
		}
	}

	/// Binds the container element.
	pub fn attach_container(&mut self, container: E::Container) {
		self.lifecycle.attach_container(container);
		self.dirty = true;
	}

	/// Materializes `children` and returns the descriptors to render.
	///
	/// When the pass is skipped (unchanged length under
	/// `render_only_page_length_change`) the previous descriptors are returned
	/// and the mounted roots stay recorded.
	pub fn render<C>(&mut self, children: &[BookChild<C>]) -> &[PageDescriptor] {
		let outcome = self.materializer.run(
			children,
			self.props.config.show_cover,
			self.props.options.render_only_page_length_change,
		);
		if let Materialized::Rendered { shrunk } = outcome {
			if shrunk {
				self.lifecycle.request_reload();
			}
			self.slots.reset(self.materializer.descriptors().len());
			self.dirty = true;
		}
		self.last_pass = Some(outcome);
		self.materializer.descriptors()
	}

	/// Outcome of the last [`render`](Self::render), `None` before the first.
	///
	/// After [`Materialized::Skipped`] the host keeps its previous page roots
	/// and does not mount again.
	pub fn last_pass(&self) -> Option<Materialized> {
		self.last_pass
	}

	/// Mount callback for the root rendered for descriptor `index`.
	pub fn mount_page(&mut self, index: usize, node: E::Node) {
		match self.materializer.descriptors().get(index) {
			Some(descriptor) => descriptor.mount(node, &mut self.slots),
			None => warn_log!("book: no page at index {}, ignoring mount", index),
		}
	}

	/// The root for descriptor `index` was removed by the host.
	pub fn release_page(&mut self, index: usize) {
		self.slots.release(index);
	}

	/// Brings the engine in line with the last render.
	///
	/// Returns `None` when neither the pages nor the props changed since the
	/// last effective commit. Handlers are removed before the sync and
	/// registered again once the deferred load has run.
	pub fn commit(&mut self) -> Result<Option<SyncOutcome>> {
		if !self.dirty {
			return Ok(None);
		}
		if let Some(engine) = self.lifecycle.engine().get() {
			self.bridge.detach(engine.as_ref());
		}

		let bridge = self.bridge.clone();
		let callbacks = self.props.callbacks.clone();
		let outcome = self.lifecycle.sync(&self.props.config, self.slots.nodes(), move |engine| {
			bridge.attach(engine, &callbacks);
		})?;

		// Missing nodes or container: retry on the next commit.
		self.dirty = outcome == SyncOutcome::Waiting;
		debug_log!("book: commit -> {:?}", outcome);
		Ok(Some(outcome))
	}

	/// Replaces the props. The next commit syncs when anything the engine or
	/// the bridge sees has changed.
	pub fn set_props(&mut self, props: BookProps) {
		if props.config != self.props.config || !props.callbacks.same_as(&self.props.callbacks) {
			self.dirty = true;
		}
		self.props = props;
	}

	/// Current props.
	pub fn props(&self) -> &BookProps {
		&self.props
	}

	/// Container and controls to render.
	pub fn view(&self) -> BookView {
		let options = &self.props.options;
		let controls = options.show_controls.then(|| ControlsView {
			class_name: options.controls_class_name.clone(),
			style: options.controls_style.clone(),
			state: self.bridge.state().with(ControlState::derive),
		});
		BookView {
			class_name: options.class_name.clone(),
			style: container_style(options),
			controls,
		}
	}

	/// The imperative handle.
	pub fn handle(&self) -> BookHandle<E> {
		self.handle.clone()
	}

	/// Fills `handle_ref` with this book's handle until unmount.
	pub fn attach_ref(&mut self, handle_ref: &HandleRef<E>) {
		handle_ref.set(Some(self.handle.clone()));
		self.refs.push(handle_ref.clone());
	}

	/// Mirrored engine state.
	pub fn state(&self) -> ReadSignal<MirroredState> {
		self.bridge.state()
	}

	/// Lifecycle state of the engine instance.
	pub fn lifecycle_state(&self) -> LifecycleState {
		self.lifecycle.state()
	}

	/// Previous-button action.
	pub fn prev_page(&self) {
		controls::prev(&self.handle);
	}

	/// Next-button action.
	pub fn next_page(&self) {
		controls::next(&self.handle);
	}

	/// Removes handlers, destroys the engine and empties attached refs.
	/// Returns false if the book was already unmounted.
	pub fn unmount(&mut self) -> bool {
		if let Some(engine) = self.lifecycle.engine().get() {
			self.bridge.detach(engine.as_ref());
		}
		if !self.lifecycle.destroy() {
			return false;
		}
		for handle_ref in self.refs.drain(..) {
			handle_ref.set(None);
		}
		info_log!("book: unmounted");
		true
	}
}

impl<E: PageFlipEngine, S: FrameScheduler> Drop for FlipBook<E, S> {
	fn drop(&mut self) {
		self.unmount();
	}
}

impl<E: PageFlipEngine, S: FrameScheduler> std::fmt::Debug for FlipBook<E, S> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FlipBook")
			.field("lifecycle", &self.lifecycle)
			.field("pages", &self.materializer.descriptors().len())
			.field("mounted", &self.slots.populated())
			.field("dirty", &self.dirty)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::{BookConfig, WrapperOptions};
	use crate::event::{BookCallbacks, EventKind};
	use crate::testing::{EngineCall, ManualScheduler, MockContainer, MockEngine, MockNode};
	use crate::wrapper::PageProps;
	use rstest::rstest;
	use serde_json::json;

	type Book = FlipBook<MockEngine, ManualScheduler>;

	fn pages(n: usize) -> Vec<BookChild<()>> {
		(0..n)
			.map(|i| BookChild::page(PageProps::new().number(i as u32 + 1), ()))
			.collect()
	}

	fn pass(book: &mut Book, children: &[BookChild<()>]) {
		let count = book.render(children).len();
		for index in 0..count {
			book.mount_page(index, MockNode::new(index));
		}
	}

	fn mounted(props: BookProps) -> (Book, MockContainer, ManualScheduler) {
		let scheduler = ManualScheduler::new();
		let container = MockContainer::new();
		let mut book = Book::new(props, scheduler.clone());
		book.attach_container(container.clone());
		(book, container, scheduler)
	}

	#[rstest]
	fn test_clean_commit_is_skipped() {
		let (mut book, container, scheduler) = mounted(BookProps::default());
		pass(&mut book, &pages(2));
		book.commit().unwrap();
		scheduler.run_frame();

		assert_eq!(book.commit().unwrap(), None);
		assert_eq!(container.constructions(), 1);
	}

	#[rstest]
	fn test_commit_without_nodes_retries() {
		let (mut book, container, scheduler) = mounted(BookProps::default());
		book.render(&pages(2));

		assert_eq!(book.commit().unwrap(), Some(SyncOutcome::Waiting));

		book.mount_page(0, MockNode::new(0));
		book.mount_page(1, MockNode::new(1));
		assert!(matches!(book.commit().unwrap(), Some(SyncOutcome::Scheduled(_))));
		scheduler.run_frame();
		assert_eq!(
			container.engine_calls().last(),
			Some(&EngineCall::LoadFromHtml(vec![0, 1]))
		);
	}

	#[rstest]
	fn test_config_change_updates_in_place() {
		let (mut book, container, scheduler) = mounted(BookProps::default());
		pass(&mut book, &pages(3));
		book.commit().unwrap();
		scheduler.run_frame();

		book.set_props(BookProps::new(BookConfig::default().with_flipping_time(400)));
		book.commit().unwrap();
		scheduler.run_frame();

		assert_eq!(container.constructions(), 1);
		assert_eq!(
			container.engine_calls().last(),
			Some(&EngineCall::UpdateFromHtml(vec![0, 1, 2]))
		);
	}

	#[rstest]
	fn test_options_change_does_not_resync() {
		let (mut book, _container, scheduler) = mounted(BookProps::default());
		pass(&mut book, &pages(1));
		book.commit().unwrap();
		scheduler.run_frame();

		book.set_props(BookProps::default().with_options(WrapperOptions {
			is_loading: true,
			..WrapperOptions::default()
		}));

		assert_eq!(book.commit().unwrap(), None);
		assert_eq!(book.view().style.get("opacity"), Some("0.5"));
	}

	#[rstest]
	fn test_view_controls_follow_mirrored_state() {
		let props = BookProps::default().with_options(WrapperOptions {
			show_controls: true,
			controls_class_name: String::from("nav"),
			..WrapperOptions::default()
		});
		let (mut book, container, scheduler) = mounted(props);
		pass(&mut book, &pages(3));
		book.commit().unwrap();
		scheduler.run_frame();

		let before = book.view().controls.unwrap();
		assert_eq!(before.class_name, "nav");
		assert_eq!(before.state.indicator, "1 / ...");

		container.emit(EventKind::Init, json!({"page": 0, "mode": "landscape"}));
		container.emit(EventKind::Flip, json!(2));

		let after = book.view().controls.unwrap().state;
		assert_eq!(after.indicator, "3 / 3");
		assert!(!after.prev_disabled);
		assert!(after.next_disabled);
	}

	#[rstest]
	fn test_controls_hidden_by_default() {
		let (book, _container, _scheduler) = mounted(BookProps::default());

		assert!(book.view().controls.is_none());
	}

	#[rstest]
	fn test_control_actions_do_not_move_mirror() {
		let (mut book, container, scheduler) = mounted(BookProps::default());
		pass(&mut book, &pages(3));
		book.commit().unwrap();
		scheduler.run_frame();
		container.clear_calls();

		book.next_page();
		book.prev_page();

		assert_eq!(
			container.engine_calls(),
			vec![EngineCall::FlipNext(None), EngineCall::FlipPrev(None)]
		);
		assert_eq!(book.state().get().current_page_index, 0);
	}

	#[rstest]
	fn test_callback_change_resubscribes() {
		let (mut book, container, scheduler) = mounted(BookProps::default());
		pass(&mut book, &pages(2));
		book.commit().unwrap();
		scheduler.run_frame();

		book.set_props(BookProps::default().with_callbacks(BookCallbacks::new().on_flip(|_| {})));
		assert!(book.commit().unwrap().is_some());
		scheduler.run_frame();

		for kind in EventKind::ALL {
			assert_eq!(container.handler_count(kind), 1);
		}
	}

	#[rstest]
	fn test_unmount_empties_refs() {
		let (mut book, _container, scheduler) = mounted(BookProps::default());
		let handle_ref = HandleRef::new();
		book.attach_ref(&handle_ref);
		pass(&mut book, &pages(1));
		book.commit().unwrap();
		scheduler.run_frame();

		assert!(handle_ref.current().is_some_and(|h| h.is_ready()));
		assert!(book.unmount());
		assert!(handle_ref.current().is_none());
		assert!(!book.unmount());
		assert_eq!(book.lifecycle_state(), LifecycleState::Destroyed);
	}

	#[rstest]
	fn test_last_pass_reports_skip() {
		let props = BookProps::default().with_options(WrapperOptions {
			render_only_page_length_change: true,
			..WrapperOptions::default()
		});
		let (mut book, _container, _scheduler) = mounted(props);
		assert_eq!(book.last_pass(), None);

		book.render(&pages(2));
		assert_eq!(book.last_pass(), Some(Materialized::Rendered { shrunk: false }));

		book.render(&pages(2));
		assert_eq!(book.last_pass(), Some(Materialized::Skipped));

		book.render(&pages(1));
		assert_eq!(book.last_pass(), Some(Materialized::Rendered { shrunk: true }));
	}

	#[rstest]
	fn test_mount_out_of_range_is_ignored() {
		let (mut book, _container, _scheduler) = mounted(BookProps::default());
		book.render(&pages(1));

		book.mount_page(5, MockNode::new(5));

		assert_eq!(book.commit().unwrap(), Some(SyncOutcome::Waiting));
	}
}
