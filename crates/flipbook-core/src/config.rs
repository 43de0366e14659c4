//! Book configuration.
//!
//! [`BookConfig`] is the settings snapshot handed to the engine constructor.
//! It serializes with the engine's camelCase keys, so a snapshot can cross the
//! JS boundary as-is. [`WrapperOptions`] holds the settings the engine never
//! sees (styling, loading/disabled state, built-in controls).

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::event::BookCallbacks;
use crate::types::SizeType;
use crate::wrapper::Style;

/// Engine settings snapshot.
///
/// Defaults match the component's documented defaults rather than the
/// engine's own, so an empty JSON object yields a usable 400x300 book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookConfig {
	/// Page index shown first.
	pub start_page: usize,
	/// Fixed size or stretch to the parent.
	pub size: SizeType,
	/// Page width in pixels.
	pub width: u32,
	/// Page height in pixels.
	pub height: u32,
	/// Lower width bound when stretching.
	pub min_width: u32,
	/// Upper width bound when stretching.
	pub max_width: u32,
	/// Lower height bound when stretching.
	pub min_height: u32,
	/// Upper height bound when stretching.
	pub max_height: u32,
	/// Draw shadows while flipping.
	pub draw_shadow: bool,
	/// Flip animation duration in milliseconds.
	pub flipping_time: u32,
	/// Allow switching to single-page portrait mode.
	pub use_portrait: bool,
	/// Base z-index for page layers.
	pub start_z_index: i32,
	/// Size the parent element to the book.
	pub auto_size: bool,
	/// Shadow intensity, 0.0 (hidden) to 1.0.
	pub max_shadow_opacity: f64,
	/// Render the first and last pages as hard covers.
	pub show_cover: bool,
	/// Keep page content scrollable on touch devices.
	pub mobile_scroll_support: bool,
	/// Forward clicks on child elements (links, buttons).
	pub click_event_forward: bool,
	/// Flip with mouse and touch gestures.
	pub use_mouse_events: bool,
	/// Minimum swipe distance in pixels.
	pub swipe_distance: u32,
	/// Fold corners on hover.
	pub show_page_corners: bool,
	/// Only flip from the corners, not by clicking the page.
	pub disable_flip_by_click: bool,
}

impl Default for BookConfig {
	fn default() -> Self {
		Self {
			start_page: 0,
			size: SizeType::Fixed,
			width: 400,
			height: 300,
			min_width: 100,
			max_width: 2000,
			min_height: 100,
			max_height: 2000,
			draw_shadow: true,
			flipping_time: 1000,
			use_portrait: false,
			start_z_index: 0,
			auto_size: true,
			max_shadow_opacity: 1.0,
			show_cover: false,
			mobile_scroll_support: true,
			click_event_forward: true,
			use_mouse_events: true,
			swipe_distance: 30,
			show_page_corners: true,
			disable_flip_by_click: false,
		}
	}
}

impl BookConfig {
	/// Parses settings from JSON; absent keys take their defaults.
	pub fn from_json(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}

	/// Serializes to the engine's settings object.
	pub fn to_json(&self) -> Result<String> {
		Ok(serde_json::to_string(self)?)
	}

	/// Sets page dimensions.
	pub fn with_size(mut self, width: u32, height: u32) -> Self {
		self.width = width;
		self.height = height;
		self
	}

	/// Sets the size mode.
	pub fn with_size_type(mut self, size: SizeType) -> Self {
		self.size = size;
		self
	}

	/// Sets the starting page.
	pub fn with_start_page(mut self, page: usize) -> Self {
		self.start_page = page;
		self
	}

	/// Enables or disables hard covers on the first and last page.
	pub fn with_show_cover(mut self, show_cover: bool) -> Self {
		self.show_cover = show_cover;
		self
	}

	/// Sets the flip animation duration.
	pub fn with_flipping_time(mut self, millis: u32) -> Self {
		self.flipping_time = millis;
		self
	}

	/// Enables portrait mode switching.
	pub fn with_portrait(mut self, use_portrait: bool) -> Self {
		self.use_portrait = use_portrait;
		self
	}

	/// Enables or disables shadows.
	pub fn with_shadow(mut self, draw_shadow: bool, max_opacity: f64) -> Self {
		self.draw_shadow = draw_shadow;
		self.max_shadow_opacity = max_opacity;
		self
	}
}

/// Component-level options the engine never sees.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WrapperOptions {
	/// Extra class on the book container.
	pub class_name: String,
	/// Extra inline style on the book container.
	pub style: Style,
	/// Skip re-materialization while the page count is unchanged.
	pub render_only_page_length_change: bool,
	/// Dim the book and block input.
	pub is_loading: bool,
	/// Block input.
	pub disabled: bool,
	/// Render the built-in prev/next controls.
	pub show_controls: bool,
	/// Extra class on the controls row.
	pub controls_class_name: String,
	/// Extra inline style on the controls row.
	pub controls_style: Style,
}

/// Everything a host passes to the book on each render.
#[derive(Debug, Clone, Default)]
pub struct BookProps {
	/// Engine settings.
	pub config: BookConfig,
	/// Component options.
	pub options: WrapperOptions,
	/// Caller event observers.
	pub callbacks: BookCallbacks,
}

impl BookProps {
	/// Props with the given engine settings and default options.
	pub fn new(config: BookConfig) -> Self {
		Self {
			config,
			..Self::default()
		}
	}

	/// Replaces the component options.
	pub fn with_options(mut self, options: WrapperOptions) -> Self {
		self.options = options;
		self
	}

	/// Replaces the event callbacks.
	pub fn with_callbacks(mut self, callbacks: BookCallbacks) -> Self {
		self.callbacks = callbacks;
		self
	}
}
