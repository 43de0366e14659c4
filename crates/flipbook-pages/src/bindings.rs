//! `wasm-bindgen` declarations for the `page-flip` JavaScript module.
//!
//! Only the members the binding drives are declared. Optional corner
//! arguments are passed as `undefined` when absent.

use js_sys::{Array, Function};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

#[wasm_bindgen(module = "page-flip")]
extern "C" {
	/// The engine class.
	pub type PageFlip;

	/// `new PageFlip(element, settings)`.
	#[wasm_bindgen(constructor, catch)]
	pub fn new(element: &HtmlElement, settings: &JsValue) -> Result<PageFlip, JsValue>;

	#[wasm_bindgen(method, js_name = loadFromHTML)]
	pub fn load_from_html(this: &PageFlip, items: &Array);

	#[wasm_bindgen(method, js_name = updateFromHtml)]
	pub fn update_from_html(this: &PageFlip, items: &Array);

	#[wasm_bindgen(method)]
	pub fn clear(this: &PageFlip);

	#[wasm_bindgen(method)]
	pub fn destroy(this: &PageFlip);

	/// `null`/`undefined` until pages have been loaded.
	#[wasm_bindgen(method, js_name = getFlipController)]
	pub fn get_flip_controller(this: &PageFlip) -> JsValue;

	#[wasm_bindgen(method)]
	pub fn flip(this: &PageFlip, page_num: u32, corner: &JsValue);

	#[wasm_bindgen(method, js_name = flipNext)]
	pub fn flip_next(this: &PageFlip, corner: &JsValue);

	#[wasm_bindgen(method, js_name = flipPrev)]
	pub fn flip_prev(this: &PageFlip, corner: &JsValue);

	#[wasm_bindgen(method, js_name = turnToPage)]
	pub fn turn_to_page(this: &PageFlip, page_num: u32);

	#[wasm_bindgen(method, js_name = getCurrentPageIndex)]
	pub fn get_current_page_index(this: &PageFlip) -> u32;

	#[wasm_bindgen(method, js_name = getPageCount)]
	pub fn get_page_count(this: &PageFlip) -> u32;

	/// `'portrait' | 'landscape'`.
	#[wasm_bindgen(method, js_name = getOrientation)]
	pub fn get_orientation(this: &PageFlip) -> JsValue;

	#[wasm_bindgen(method, js_name = getState)]
	pub fn get_state(this: &PageFlip) -> JsValue;

	/// Registers `callback` for `event_name`; handlers are called with
	/// `{ data, object }`.
	#[wasm_bindgen(method)]
	pub fn on(this: &PageFlip, event_name: &str, callback: &Function);

	/// Removes every handler for `event_name`.
	#[wasm_bindgen(method)]
	pub fn off(this: &PageFlip, event_name: &str);
}
