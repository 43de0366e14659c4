//! In-process engine for browser tests. The `page-flip` module is not served
//! to the test runner, so nothing here may reach `JsPageFlip`.

use std::cell::Cell;

use flipbook_core::engine::{PageFlipEngine, RawHandler};
use flipbook_core::error::Result;
use flipbook_core::event::EventKind;
use flipbook_core::types::{FlipCorner, PageOrientation, PageState};
use flipbook_core::config::BookConfig;
use flipbook_pages::PageRoot;
use web_sys::HtmlElement;

#[derive(Default)]
pub struct StubEngine {
	pub pages: Cell<usize>,
	pub destroyed: Cell<bool>,
}

impl PageFlipEngine for StubEngine {
	type Container = HtmlElement;
	type Node = PageRoot;

	fn construct(_container: &HtmlElement, _config: &BookConfig) -> Result<Self> {
		Ok(Self::default())
	}

	fn load_from_html(&self, nodes: &[PageRoot]) {
		self.pages.set(nodes.len());
	}

	fn update_from_html(&self, nodes: &[PageRoot]) {
		self.pages.set(nodes.len());
	}

	fn clear(&self) {
		self.pages.set(0);
	}

	fn destroy(&self) {
		self.destroyed.set(true);
	}

	fn has_flip_controller(&self) -> bool {
		!self.destroyed.get()
	}

	fn flip(&self, _page: usize, _corner: Option<FlipCorner>) {}

	fn flip_next(&self, _corner: Option<FlipCorner>) {}

	fn flip_prev(&self, _corner: Option<FlipCorner>) {}

	fn turn_to_page(&self, _page: usize) {}

	fn current_page_index(&self) -> usize {
		0
	}

	fn page_count(&self) -> usize {
		self.pages.get()
	}

	fn orientation(&self) -> Option<PageOrientation> {
		None
	}

	fn state(&self) -> Option<PageState> {
		None
	}

	fn on(&self, _kind: EventKind, _handler: RawHandler) {}

	fn off(&self, _kind: EventKind) {}
}
