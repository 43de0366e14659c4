//! Page and cover wrappers.
//!
//! A wrapper marks one unit of content as a flippable page. It does not render
//! anything by itself: it computes the attribute list of the page's root node,
//! which the host applies to whatever element it creates.

use std::fmt;

use crate::config::WrapperOptions;
use crate::types::{CoverPosition, PageDensity};

/// Class carried by every page root.
pub const PAGE_CLASS: &str = "flipbook-page";
/// Class carried by cover roots in addition to [`PAGE_CLASS`].
pub const COVER_CLASS: &str = "flipbook-cover";

/// Attribute names the engine reads during DOM discovery.
pub mod attr {
	/// Resolved page density.
	pub const DENSITY: &str = "data-density";
	/// Caller-assigned display number.
	pub const PAGE_NUMBER: &str = "data-page-number";
	/// Ordinal assigned by materialization.
	pub const PAGE_INDEX: &str = "data-page-index";
	/// Front or back, covers only.
	pub const COVER_POSITION: &str = "data-cover-position";
}

/// Ordered inline style declarations.
///
/// Setting an existing property replaces its value in place, so merged styles
/// keep the position of the first declaration and the value of the last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
	entries: Vec<(String, String)>,
}

impl Style {
	/// An empty style.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds or replaces a declaration.
	pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
		let property = property.into();
		let value = value.into();
		match self.entries.iter_mut().find(|(p, _)| *p == property) {
			Some(entry) => entry.1 = value,
			None => self.entries.push((property, value)),
		}
	}

	/// Builder form of [`Style::set`].
	pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
		self.set(property, value);
		self
	}

	/// Applies every declaration of `other` on top of `self`.
	pub fn merge(mut self, other: &Style) -> Self {
		for (property, value) in &other.entries {
			self.set(property.clone(), value.clone());
		}
		self
	}

	/// Value of a property, if declared.
	pub fn get(&self, property: &str) -> Option<&str> {
		self.entries
			.iter()
			.find(|(p, _)| p == property)
			.map(|(_, v)| v.as_str())
	}

	/// Returns true if nothing is declared.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterates declarations in order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries.iter().map(|(p, v)| (p.as_str(), v.as_str()))
	}
}

impl fmt::Display for Style {
	/// Renders as a `style` attribute value: `a: 1; b: 2;`
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut first = true;
		for (property, value) in &self.entries {
			if !first {
				f.write_str(" ")?;
			}
			write!(f, "{}: {};", property, value)?;
			first = false;
		}
		Ok(())
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Style {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut style = Style::new();
		for (property, value) in iter {
			style.set(property, value);
		}
		style
	}
}

/// Attribute list for a host element, in application order.
pub type Attributes = Vec<(&'static str, String)>;

fn page_base_style() -> Style {
	Style::new()
		.with("width", "100%")
		.with("height", "100%")
		.with("box-sizing", "border-box")
}

fn join_class(base: &str, extra: &str) -> String {
	if extra.is_empty() {
		base.to_string()
	} else {
		format!("{} {}", base, extra)
	}
}

/// Props of a regular page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageProps {
	/// Display label; not required to be unique.
	pub number: Option<u32>,
	/// Declared density. Absent means soft.
	pub density: Option<PageDensity>,
	/// Extra classes.
	pub class_name: String,
	/// Extra inline style.
	pub style: Style,
}

impl PageProps {
	/// A soft page with no number.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the display number.
	pub fn number(mut self, number: u32) -> Self {
		self.number = Some(number);
		self
	}

	/// Declares a density.
	pub fn density(mut self, density: PageDensity) -> Self {
		self.density = Some(density);
		self
	}

	/// Adds extra classes.
	pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
		self.class_name = class_name.into();
		self
	}

	/// Sets the extra inline style.
	pub fn style(mut self, style: Style) -> Self {
		self.style = style;
		self
	}

	/// Attributes of the page root.
	pub fn attributes(&self) -> Attributes {
		let mut attrs = vec![
			("class", join_class(PAGE_CLASS, &self.class_name)),
			(
				attr::DENSITY,
				self.density.unwrap_or_default().as_str().to_string(),
			),
		];
		if let Some(number) = self.number {
			attrs.push((attr::PAGE_NUMBER, number.to_string()));
		}
		attrs.push(("style", page_base_style().merge(&self.style).to_string()));
		attrs
	}
}

/// Props of a front or back cover. Covers are always hard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverProps {
	/// Display label.
	pub number: Option<u32>,
	/// Front or back.
	pub position: CoverPosition,
	/// Extra classes.
	pub class_name: String,
	/// Extra inline style.
	pub style: Style,
}

impl CoverProps {
	/// A cover at the given position.
	pub fn new(position: CoverPosition) -> Self {
		Self {
			position,
			..Self::default()
		}
	}

	/// Sets the display number.
	pub fn number(mut self, number: u32) -> Self {
		self.number = Some(number);
		self
	}

	/// Adds extra classes.
	pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
		self.class_name = class_name.into();
		self
	}

	/// Sets the extra inline style.
	pub fn style(mut self, style: Style) -> Self {
		self.style = style;
		self
	}

	/// Attributes of the cover root.
	pub fn attributes(&self) -> Attributes {
		let base = format!(
			"{} {} {}--{}",
			PAGE_CLASS, COVER_CLASS, COVER_CLASS, self.position
		);
		let mut attrs = vec![
			("class", join_class(&base, &self.class_name)),
			(attr::DENSITY, PageDensity::Hard.as_str().to_string()),
		];
		if let Some(number) = self.number {
			attrs.push((attr::PAGE_NUMBER, number.to_string()));
		}
		attrs.push((attr::COVER_POSITION, self.position.as_str().to_string()));
		attrs.push(("style", page_base_style().merge(&self.style).to_string()));
		attrs
	}
}

/// Inline style of the book container for the given options.
pub fn container_style(options: &WrapperOptions) -> Style {
	let mut style = Style::new()
		.with("display", "block")
		.with("position", "relative")
		.with("user-select", "none")
		.with("-webkit-user-select", "none")
		.with("touch-action", "pan-y")
		.with("box-sizing", "border-box")
		.merge(&options.style);
	if options.is_loading {
		style.set("opacity", "0.5");
	}
	if options.disabled || options.is_loading {
		style.set("pointer-events", "none");
	}
	style
}
