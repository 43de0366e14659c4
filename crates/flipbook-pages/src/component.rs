//! MagazineBook component.
//!
//! Mounts a book under a parent element and keeps the DOM, the engine, and
//! the built-in controls in sync with the props and children it is given.
//!
//! ```ignore
//! use flipbook_pages::{MagazineBook, BookChild, BookConfig, BookProps, PageProps};
//!
//! let children = vec![
//!     BookChild::page(PageProps::new().number(1), page_one.into()),
//!     BookChild::page(PageProps::new().number(2), page_two.into()),
//! ];
//! let mut book = MagazineBook::mount(
//!     &parent,
//!     BookProps::new(BookConfig::default().with_size(300, 400)),
//!     children,
//! )?;
//! book.handle().flip_next(None);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use flipbook_core::bridge::MirroredState;
use flipbook_core::config::BookProps;
use flipbook_core::controls::ControlState;
use flipbook_core::engine::PageFlipEngine;
use flipbook_core::error::Result;
use flipbook_core::handle::{BookHandle, HandleRef};
use flipbook_core::materialize::{BookChild, Materialized};
use flipbook_core::reactive::{ReadSignal, Subscription};
use flipbook_core::{FlipBook, LifecycleState, debug_log};
use web_sys::{Document, HtmlElement, Node};

use crate::dom::{self, ControlsBar};
use crate::engine::{JsPageFlip, PageRoot};
use crate::scheduler::AnimationFrameScheduler;

/// Imperative handle of a [`MagazineBook`].
pub type MagazineBookHandle = BookHandle<JsPageFlip>;

/// Attachable reference to a [`MagazineBook`]'s handle.
pub type MagazineBookRef = HandleRef<JsPageFlip>;

/// A page-flip book rendered into the DOM.
///
/// The engine defaults to the `page-flip` module; any engine bound to
/// `HtmlElement` containers and [`PageRoot`] pages can drive the same DOM.
pub struct MagazineBook<E = JsPageFlip>
where
	E: PageFlipEngine<Container = HtmlElement, Node = PageRoot>,
{
	book: FlipBook<E, AnimationFrameScheduler>,
	document: Document,
	wrapper: HtmlElement,
	container: HtmlElement,
	pages: Vec<PageRoot>,
	children: Vec<BookChild<Node>>,
	controls: Rc<RefCell<Option<ControlsBar>>>,
	_state: Subscription,
}

impl MagazineBook {
	/// Renders the book under `parent` and schedules the engine load.
	pub fn mount(parent: &Node, props: BookProps, children: Vec<BookChild<Node>>) -> Result<Self> {
		Self::mount_with(parent, props, children)
	}
}

impl<E> MagazineBook<E>
where
	E: PageFlipEngine<Container = HtmlElement, Node = PageRoot>,
{
	/// [`MagazineBook::mount`] on an engine chosen by the caller.
	pub fn mount_with(
		parent: &Node,
		props: BookProps,
		children: Vec<BookChild<Node>>,
	) -> Result<Self> {
		let document = dom::document()?;
		let wrapper = dom::create_element(&document, "div")?;
		let _ = wrapper.set_attribute("style", &dom::wrapper_style().to_string());
		let container = dom::create_element(&document, "div")?;
		dom::append(&wrapper, &container)?;
		dom::append(parent, &wrapper)?;

		let mut book = FlipBook::new(props, AnimationFrameScheduler::new()?);
		book.attach_container(container.clone());

		let controls: Rc<RefCell<Option<ControlsBar>>> = Rc::default();
		let state = book.state().subscribe({
			let controls = Rc::clone(&controls);
			move |mirrored| {
				if let Some(bar) = controls.borrow().as_ref() {
					bar.set_state(&ControlState::derive(mirrored));
				}
			}
		});

		let mut this = Self {
			book,
			document,
			wrapper,
			container,
			pages: Vec::new(),
			children: Vec::new(),
			controls,
			_state: state,
		};
		this.render(children)?;
		Ok(this)
	}

	/// Replaces the children and re-renders.
	pub fn render(&mut self, children: Vec<BookChild<Node>>) -> Result<()> {
		self.children = children;
		self.refresh()
	}

	/// Replaces the props.
	///
	/// Pages are re-rendered only when cover mode or the length-change
	/// optimization flag changed; other changes go straight to the engine.
	pub fn set_props(&mut self, props: BookProps) -> Result<()> {
		let previous = self.book.props();
		let rematerialize = previous.config.show_cover != props.config.show_cover
			|| previous.options.render_only_page_length_change
				!= props.options.render_only_page_length_change;
		self.book.set_props(props);
		if rematerialize {
			self.refresh()
		} else {
			self.book.commit()?;
			self.apply_view()
		}
	}

	/// The imperative handle.
	pub fn handle(&self) -> BookHandle<E> {
		self.book.handle()
	}

	/// Fills `book_ref` with this book's handle until unmount.
	pub fn attach_ref(&mut self, book_ref: &HandleRef<E>) {
		self.book.attach_ref(book_ref);
	}

	/// Mirrored engine state.
	pub fn state(&self) -> ReadSignal<MirroredState> {
		self.book.state()
	}

	/// Outer element holding the book and its controls.
	pub fn element(&self) -> &HtmlElement {
		&self.wrapper
	}

	/// The element the engine is bound to.
	pub fn container(&self) -> &HtmlElement {
		&self.container
	}

	/// Page roots from the last rendered pass.
	pub fn pages(&self) -> &[PageRoot] {
		&self.pages
	}

	/// Lifecycle state of the engine instance.
	pub fn lifecycle_state(&self) -> LifecycleState {
		self.book.lifecycle_state()
	}

	/// Destroys the engine and removes the book from the DOM.
	/// Returns false if already unmounted.
	pub fn unmount(&mut self) -> bool {
		if !self.book.unmount() {
			return false;
		}
		self.controls.borrow_mut().take();
		self.pages.clear();
		self.wrapper.remove();
		true
	}

	fn refresh(&mut self) -> Result<()> {
		let descriptors = self.book.render(&self.children).to_vec();
		if self.book.last_pass() != Some(Materialized::Skipped) {
			for page in self.pages.drain(..) {
				page.element().remove();
			}
			for descriptor in &descriptors {
				let root = dom::page_root(
					&self.document,
					descriptor,
					&self.children[descriptor.source],
				)?;
				dom::append(&self.container, root.element())?;
				self.book.mount_page(descriptor.index, root.clone());
				self.pages.push(root);
			}
			debug_log!("magazine: rendered {} pages", self.pages.len());
		}
		self.book.commit()?;
		self.apply_view()
	}

	fn apply_view(&self) -> Result<()> {
		let view = self.book.view();
		dom::apply_container(&self.container, &view);

		let mut slot = self.controls.borrow_mut();
		match view.controls {
			Some(controls) => {
				if slot.is_none() {
					let bar = ControlsBar::new(&self.document, self.book.handle())?;
					dom::append(&self.wrapper, bar.root())?;
					*slot = Some(bar);
				}
				if let Some(bar) = slot.as_ref() {
					bar.apply(&controls);
				}
			}
			None => {
				if let Some(bar) = slot.take() {
					bar.root().remove();
				}
			}
		}
		Ok(())
	}
}

impl<E> Drop for MagazineBook<E>
where
	E: PageFlipEngine<Container = HtmlElement, Node = PageRoot>,
{
	fn drop(&mut self) {
		self.unmount();
	}
}

impl<E> std::fmt::Debug for MagazineBook<E>
where
	E: PageFlipEngine<Container = HtmlElement, Node = PageRoot>,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MagazineBook")
			.field("book", &self.book)
			.field("pages", &self.pages.len())
			.field("controls", &self.controls.borrow().is_some())
			.finish()
	}
}
