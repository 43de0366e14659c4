//! [`PageFlipEngine`] on top of the `page-flip` JavaScript engine.

use std::cell::RefCell;
use std::collections::BTreeMap;

use flipbook_core::engine::{PageFlipEngine, PageNode, RawHandler};
use flipbook_core::error::{FlipBookError, Result};
use flipbook_core::event::EventKind;
use flipbook_core::types::{FlipCorner, PageDensity, PageOrientation, PageState};
use flipbook_core::wrapper::attr;
use flipbook_core::{BookConfig, warn_log};
use js_sys::{Array, JSON, Reflect};
use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::bindings::PageFlip;

type EventClosure = Closure<dyn FnMut(JsValue)>;

/// Mounted page root handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRoot(pub HtmlElement);

impl PageRoot {
	/// The root element.
	pub fn element(&self) -> &HtmlElement {
		&self.0
	}
}

impl PageNode for PageRoot {
	fn tag(&self, density: PageDensity, index: usize) {
		// The engine reads data-density when it discovers pages.
		let _ = self.0.set_attribute(attr::DENSITY, density.as_str());
		let _ = self.0.set_attribute(attr::PAGE_INDEX, &index.to_string());
	}
}

/// A live `PageFlip` instance.
///
/// Event closures are owned here, per event name, and dropped on `off` or
/// `destroy`.
pub struct JsPageFlip {
	inner: PageFlip,
	listeners: RefCell<BTreeMap<EventKind, Vec<EventClosure>>>,
}

impl JsPageFlip {
	/// The underlying JS object.
	pub fn raw(&self) -> &PageFlip {
		&self.inner
	}
}

impl PageFlipEngine for JsPageFlip {
	type Container = HtmlElement;
	type Node = PageRoot;

	fn construct(container: &HtmlElement, config: &BookConfig) -> Result<Self> {
		let settings = JSON::parse(&config.to_json()?)
			.map_err(|e| FlipBookError::EngineConstruction(js_error(&e)))?;
		let inner = PageFlip::new(container, &settings)
			.map_err(|e| FlipBookError::EngineConstruction(js_error(&e)))?;
		Ok(Self {
			inner,
			listeners: RefCell::new(BTreeMap::new()),
		})
	}

	fn load_from_html(&self, nodes: &[PageRoot]) {
		self.inner.load_from_html(&elements(nodes));
	}

	fn update_from_html(&self, nodes: &[PageRoot]) {
		self.inner.update_from_html(&elements(nodes));
	}

	fn clear(&self) {
		self.inner.clear();
	}

	fn destroy(&self) {
		self.inner.destroy();
		self.listeners.borrow_mut().clear();
	}

	fn has_flip_controller(&self) -> bool {
		let controller = self.inner.get_flip_controller();
		!(controller.is_null() || controller.is_undefined())
	}

	fn flip(&self, page: usize, corner: Option<FlipCorner>) {
		self.inner.flip(page_num(page), &corner_arg(corner));
	}

	fn flip_next(&self, corner: Option<FlipCorner>) {
		self.inner.flip_next(&corner_arg(corner));
	}

	fn flip_prev(&self, corner: Option<FlipCorner>) {
		self.inner.flip_prev(&corner_arg(corner));
	}

	fn turn_to_page(&self, page: usize) {
		self.inner.turn_to_page(page_num(page));
	}

	fn current_page_index(&self) -> usize {
		self.inner.get_current_page_index() as usize
	}

	fn page_count(&self) -> usize {
		self.inner.get_page_count() as usize
	}

	fn orientation(&self) -> Option<PageOrientation> {
		self.inner
			.get_orientation()
			.as_string()
			.and_then(|s| s.parse().ok())
	}

	fn state(&self) -> Option<PageState> {
		self.inner.get_state().as_string().and_then(|s| s.parse().ok())
	}

	fn on(&self, kind: EventKind, handler: RawHandler) {
		let closure = Closure::wrap(Box::new(move |event: JsValue| {
			handler(&event_data(&event));
		}) as Box<dyn FnMut(JsValue)>);
		self.inner
			.on(kind.as_str(), closure.as_ref().unchecked_ref());
		self.listeners
			.borrow_mut()
			.entry(kind)
			.or_default()
			.push(closure);
	}

	fn off(&self, kind: EventKind) {
		self.inner.off(kind.as_str());
		self.listeners.borrow_mut().remove(&kind);
	}
}

fn elements(nodes: &[PageRoot]) -> Array {
	nodes.iter().map(|node| JsValue::from(node.0.clone())).collect()
}

fn page_num(page: usize) -> u32 {
	u32::try_from(page).unwrap_or(u32::MAX)
}

fn corner_arg(corner: Option<FlipCorner>) -> JsValue {
	corner.map_or(JsValue::UNDEFINED, |c| JsValue::from_str(c.as_str()))
}

/// Extracts `event.data` as JSON. Anything that does not survive
/// `JSON.stringify` becomes `null` and is rejected by the bridge.
fn event_data(event: &JsValue) -> Value {
	let data = Reflect::get(event, &JsValue::from_str("data")).unwrap_or(JsValue::UNDEFINED);
	if data.is_undefined() {
		return Value::Null;
	}
	let json = JSON::stringify(&data)
		.ok()
		.and_then(|s| s.as_string());
	match json.map(|s| serde_json::from_str(&s)) {
		Some(Ok(value)) => value,
		Some(Err(err)) => {
			warn_log!("engine: unreadable event payload: {}", err);
			Value::Null
		}
		None => Value::Null,
	}
}

pub(crate) fn js_error(value: &JsValue) -> String {
	value
		.as_string()
		.or_else(|| {
			value
				.dyn_ref::<js_sys::Error>()
				.map(|e| String::from(e.message()))
		})
		.unwrap_or_else(|| format!("{:?}", value))
}
