use flipbook_core::wrapper::attr;
use flipbook_core::{BookChild, BookConfig, BookProps, PageProps};
use flipbook_pages::MagazineBook;
use flipbook_pages::dom;
use wasm_bindgen_test::wasm_bindgen_test;
use web_sys::{HtmlElement, Node};

use crate::stub::StubEngine;

fn children(count: u32) -> Vec<BookChild<Node>> {
	let document = dom::document().unwrap();
	(1..=count)
		.map(|n| {
			let text: Node = document.create_text_node(&format!("page {}", n)).into();
			BookChild::page(PageProps::new().number(n), text)
		})
		.collect()
}

fn parent() -> HtmlElement {
	let document = dom::document().unwrap();
	let parent = dom::create_element(&document, "div").unwrap();
	document.body().unwrap().append_child(&parent).unwrap();
	parent
}

fn densities(book: &MagazineBook<StubEngine>) -> Vec<String> {
	book.pages()
		.iter()
		.map(|page| page.element().get_attribute(attr::DENSITY).unwrap_or_default())
		.collect()
}

#[wasm_bindgen_test]
fn cover_toggle_rerenders_pages() {
	let parent = parent();
	let mut book = MagazineBook::<StubEngine>::mount_with(
		&parent,
		BookProps::new(BookConfig::default()),
		children(3),
	)
	.unwrap();
	assert_eq!(densities(&book), vec!["soft", "soft", "soft"]);

	book.set_props(BookProps::new(BookConfig::default().with_show_cover(true)))
		.unwrap();

	assert_eq!(densities(&book), vec!["hard", "soft", "hard"]);
	assert_eq!(book.container().child_element_count(), 3);
}

#[wasm_bindgen_test]
fn config_change_keeps_page_roots() {
	let parent = parent();
	let mut book = MagazineBook::<StubEngine>::mount_with(
		&parent,
		BookProps::new(BookConfig::default()),
		children(2),
	)
	.unwrap();
	let first = book.pages()[0].clone();

	book.set_props(BookProps::new(BookConfig::default().with_flipping_time(300)))
		.unwrap();

	assert_eq!(book.pages()[0], first);
	assert!(book.container().contains(Some(first.element())));
}

#[wasm_bindgen_test]
fn unmount_removes_wrapper_once() {
	let parent = parent();
	let mut book = MagazineBook::<StubEngine>::mount_with(
		&parent,
		BookProps::new(BookConfig::default()),
		children(2),
	)
	.unwrap();
	assert_eq!(parent.child_element_count(), 1);

	assert!(book.unmount());

	assert_eq!(parent.child_element_count(), 0);
	assert!(book.element().parent_node().is_none());
	assert!(book.pages().is_empty());
	assert!(!book.unmount());
}
