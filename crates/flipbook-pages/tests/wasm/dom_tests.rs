use flipbook_core::book::{BookView, ControlsView};
use flipbook_core::controls::ControlState;
use flipbook_core::materialize::{BookChild, materialize};
use flipbook_core::wrapper::{PAGE_CLASS, attr, container_style};
use flipbook_core::{
	BookProps, CoverPosition, CoverProps, FlipBook, PageProps, Style, WrapperOptions,
};
use flipbook_pages::dom::{self, ControlsBar};
use flipbook_pages::AnimationFrameScheduler;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::wasm_bindgen_test;
use web_sys::{HtmlElement, Node};

use crate::stub::StubEngine;

fn text(content: &str) -> Node {
	let document = dom::document().unwrap();
	document.create_text_node(content).into()
}

#[wasm_bindgen_test]
fn page_root_carries_resolved_density() {
	let document = dom::document().unwrap();
	let children = vec![
		BookChild::page(PageProps::new().number(1), text("first")),
		BookChild::page(PageProps::new().number(2), text("last")),
	];
	let descriptors = materialize(&children, true);

	let root = dom::page_root(&document, &descriptors[1], &children[1]).unwrap();
	let element = root.element();

	assert_eq!(element.get_attribute(attr::DENSITY).as_deref(), Some("hard"));
	assert_eq!(element.get_attribute(attr::PAGE_NUMBER).as_deref(), Some("2"));
	assert_eq!(element.get_attribute("class").as_deref(), Some(PAGE_CLASS));
	assert_eq!(element.text_content().as_deref(), Some("last"));
}

#[wasm_bindgen_test]
fn cover_root_has_position() {
	let document = dom::document().unwrap();
	let children = vec![BookChild::cover(
		CoverProps::new(CoverPosition::Back),
		text("back"),
	)];
	let descriptors = materialize(&children, false);

	let root = dom::page_root(&document, &descriptors[0], &children[0]).unwrap();

	assert_eq!(
		root.element().get_attribute(attr::COVER_POSITION).as_deref(),
		Some("back")
	);
	assert_eq!(
		root.element().get_attribute(attr::DENSITY).as_deref(),
		Some("hard")
	);
}

#[wasm_bindgen_test]
fn container_reflects_loading() {
	let document = dom::document().unwrap();
	let container = dom::create_element(&document, "div").unwrap();
	let options = WrapperOptions {
		class_name: String::from("book"),
		is_loading: true,
		..WrapperOptions::default()
	};
	let view = BookView {
		class_name: options.class_name.clone(),
		style: container_style(&options),
		controls: None,
	};

	dom::apply_container(&container, &view);

	assert_eq!(container.get_attribute("class").as_deref(), Some("book"));
	let style = container.get_attribute("style").unwrap_or_default();
	assert!(style.contains("opacity: 0.5;"));
	assert!(style.contains("pointer-events: none;"));
}

#[wasm_bindgen_test]
fn controls_follow_state() {
	let document = dom::document().unwrap();
	// No container attached, so the engine never exists and clicks are no-ops.
	let book: FlipBook<StubEngine, AnimationFrameScheduler> =
		FlipBook::new(BookProps::default(), AnimationFrameScheduler::new().unwrap());
	let bar = ControlsBar::new(&document, book.handle()).unwrap();

	bar.apply(&ControlsView {
		class_name: String::from("nav"),
		style: Style::new().with("margin-top", "20px"),
		state: ControlState {
			prev_disabled: true,
			next_disabled: false,
			indicator: String::from("1 / ..."),
		},
	});

	let root = bar.root();
	assert_eq!(root.get_attribute("class").as_deref(), Some("nav"));
	assert!(root
		.get_attribute("style")
		.unwrap_or_default()
		.contains("margin-top: 20px;"));
	let buttons = root.query_selector_all("button").unwrap();
	assert_eq!(buttons.length(), 2);
	assert!(root.text_content().unwrap_or_default().contains("1 / ..."));

	let prev = root.query_selector("button").unwrap().unwrap();
	assert!(prev.has_attribute("disabled"));
	prev.dyn_ref::<HtmlElement>().unwrap().click();
	assert!(!book.handle().is_ready());
}
