//! DOM rendering for the page/cover wrappers, the book container, and the
//! built-in controls.

use flipbook_core::book::{BookView, ControlsView};
use flipbook_core::controls::{self, ControlState};
use flipbook_core::engine::PageFlipEngine;
use flipbook_core::error::{FlipBookError, Result};
use flipbook_core::handle::BookHandle;
use flipbook_core::materialize::{BookChild, PageDescriptor};
use flipbook_core::wrapper::{Attributes, Style};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlButtonElement, HtmlElement, Node};

use crate::engine::{PageRoot, js_error};

const CHEVRON_LEFT: &str = r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><polyline points="15 18 9 12 15 6"></polyline></svg>"#;
const CHEVRON_RIGHT: &str = r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><polyline points="9 18 15 12 9 6"></polyline></svg>"#;

/// The global document.
pub fn document() -> Result<Document> {
	web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| FlipBookError::Dom("no global document".into()))
}

/// Creates an element and casts it to `HtmlElement`.
pub fn create_element(document: &Document, tag: &str) -> Result<HtmlElement> {
	document
		.create_element(tag)
		.map_err(|e| FlipBookError::Dom(js_error(&e)))?
		.dyn_into::<HtmlElement>()
		.map_err(|_| FlipBookError::Dom(format!("<{}> is not an HTMLElement", tag)))
}

/// Sets every attribute in `attrs`; empty values are skipped.
pub fn set_attributes(element: &Element, attrs: &Attributes) -> Result<()> {
	for (name, value) in attrs {
		if value.is_empty() {
			continue;
		}
		element
			.set_attribute(name, value)
			.map_err(|e| FlipBookError::Dom(js_error(&e)))?;
	}
	Ok(())
}

fn set_style(element: &Element, style: &Style) {
	if style.is_empty() {
		let _ = element.remove_attribute("style");
	} else {
		let _ = element.set_attribute("style", &style.to_string());
	}
}

fn set_class(element: &Element, class_name: &str) {
	if class_name.is_empty() {
		let _ = element.remove_attribute("class");
	} else {
		let _ = element.set_attribute("class", class_name);
	}
}

/// Renders the wrapper root for `descriptor` around the child's content.
pub fn page_root(
	document: &Document,
	descriptor: &PageDescriptor,
	child: &BookChild<Node>,
) -> Result<PageRoot> {
	let root = create_element(document, "div")?;
	set_attributes(&root, &descriptor.attributes(child))?;
	append(&root, child.content())?;
	Ok(PageRoot(root))
}

/// Outer column holding the container and the controls.
pub fn wrapper_style() -> Style {
	Style::new()
		.with("display", "flex")
		.with("flex-direction", "column")
		.with("align-items", "center")
}

/// Applies the container class and style of `view`.
pub fn apply_container(container: &Element, view: &BookView) {
	set_class(container, &view.class_name);
	set_style(container, &view.style);
}

fn controls_style() -> Style {
	Style::new()
		.with("display", "flex")
		.with("justify-content", "center")
		.with("align-items", "center")
		.with("gap", "15px")
		.with("margin-top", "8px")
}

fn button_style(disabled: bool) -> Style {
	let style = Style::new()
		.with("display", "flex")
		.with("align-items", "center")
		.with("gap", "6px")
		.with("padding", "8px 16px")
		.with("font-size", "13px")
		.with("font-weight", "500")
		.with("border", "none")
		.with("border-radius", "6px")
		.with("background", "#2196F3")
		.with("color", "white")
		.with("cursor", "pointer")
		.with("transition", "all 0.2s ease");
	if disabled {
		style
			.with("opacity", "0.5")
			.with("cursor", "not-allowed")
			.with("background", "#90CAF9")
	} else {
		style
	}
}

fn indicator_style() -> Style {
	Style::new()
		.with("font-size", "13px")
		.with("color", "#666")
		.with("padding", "6px 12px")
		.with("background", "#f5f5f5")
		.with("border-radius", "4px")
}

/// Previous / indicator / Next row.
pub struct ControlsBar {
	root: HtmlElement,
	prev: HtmlButtonElement,
	next: HtmlButtonElement,
	indicator: HtmlElement,
	_listeners: [Closure<dyn FnMut(Event)>; 2],
}

impl ControlsBar {
	/// Builds the row; the buttons drive `handle`.
	pub fn new<E: PageFlipEngine>(document: &Document, handle: BookHandle<E>) -> Result<Self> {
		let root = create_element(document, "div")?;
		let prev = button(document, CHEVRON_LEFT, "Previous", true)?;
		let indicator = create_element(document, "span")?;
		let next = button(document, CHEVRON_RIGHT, "Next", false)?;
		set_style(&indicator, &indicator_style());

		let on_prev = Closure::wrap(Box::new({
			let handle = handle.clone();
			move |_: Event| controls::prev(&handle)
		}) as Box<dyn FnMut(Event)>);
		let on_next = Closure::wrap(Box::new(move |_: Event| controls::next(&handle))
			as Box<dyn FnMut(Event)>);
		prev.add_event_listener_with_callback("click", on_prev.as_ref().unchecked_ref())
			.map_err(|e| FlipBookError::Dom(js_error(&e)))?;
		next.add_event_listener_with_callback("click", on_next.as_ref().unchecked_ref())
			.map_err(|e| FlipBookError::Dom(js_error(&e)))?;

		append(&root, &prev)?;
		append(&root, &indicator)?;
		append(&root, &next)?;

		Ok(Self {
			root,
			prev,
			next,
			indicator,
			_listeners: [on_prev, on_next],
		})
	}

	/// The row element.
	pub fn root(&self) -> &HtmlElement {
		&self.root
	}

	/// Applies class, style and button state.
	pub fn apply(&self, view: &ControlsView) {
		set_class(&self.root, &view.class_name);
		set_style(&self.root, &controls_style().merge(&view.style));
		self.set_state(&view.state);
	}

	/// Updates the buttons and the indicator.
	pub fn set_state(&self, state: &ControlState) {
		self.prev.set_disabled(state.prev_disabled);
		self.next.set_disabled(state.next_disabled);
		set_style(&self.prev, &button_style(state.prev_disabled));
		set_style(&self.next, &button_style(state.next_disabled));
		self.indicator.set_text_content(Some(&state.indicator));
	}
}

fn button(document: &Document, icon: &str, label: &str, icon_first: bool) -> Result<HtmlButtonElement> {
	let button = document
		.create_element("button")
		.map_err(|e| FlipBookError::Dom(js_error(&e)))?
		.dyn_into::<HtmlButtonElement>()
		.map_err(|_| FlipBookError::Dom("<button> is not an HTMLButtonElement".into()))?;
	button.set_type("button");

	let html = if icon_first {
		format!("{}<span>{}</span>", icon, label)
	} else {
		format!("<span>{}</span>{}", label, icon)
	};
	button.set_inner_html(&html);
	Ok(button)
}

/// Appends `child` to `parent`.
pub fn append(parent: &Node, child: &Node) -> Result<()> {
	parent
		.append_child(child)
		.map(|_| ())
		.map_err(|e| FlipBookError::Dom(js_error(&e)))
}
