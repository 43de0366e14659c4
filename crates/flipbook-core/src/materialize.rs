//! Child materialization.
//!
//! Turns the declarative child list into ordered [`PageDescriptor`]s with a
//! resolved density each, and collects the mounted page roots into
//! positional [`PageSlots`] for the engine.

use crate::debug_log;
use crate::engine::PageNode;
use crate::types::{CoverPosition, PageDensity};
use crate::wrapper::{Attributes, CoverProps, PageProps};

/// One child of the book.
///
/// `C` is the host's content type (a DOM node, a view, a test marker).
#[derive(Debug, Clone, PartialEq)]
pub enum BookChild<C> {
	/// A regular page.
	Page {
		/// Wrapper props.
		props: PageProps,
		/// Page content.
		content: C,
	},
	/// A front or back cover.
	Cover {
		/// Wrapper props.
		props: CoverProps,
		/// Cover content.
		content: C,
	},
	/// Content that is not page-like. Dropped before indexing.
	Other(C),
}

impl<C> BookChild<C> {
	/// A page child.
	pub fn page(props: PageProps, content: C) -> Self {
		BookChild::Page { props, content }
	}

	/// A cover child.
	pub fn cover(props: CoverProps, content: C) -> Self {
		BookChild::Cover { props, content }
	}

	/// Whether this child takes an ordinal slot.
	pub fn is_page_like(&self) -> bool {
		!matches!(self, BookChild::Other(_))
	}

	/// The child's content.
	pub fn content(&self) -> &C {
		match self {
			BookChild::Page { content, .. }
			| BookChild::Cover { content, .. }
			| BookChild::Other(content) => content,
		}
	}

	fn declared_density(&self) -> Option<PageDensity> {
		match self {
			BookChild::Page { props, .. } => props.density,
			BookChild::Cover { .. } => Some(PageDensity::Hard),
			BookChild::Other(_) => None,
		}
	}
}

/// A page-like child annotated for the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDescriptor {
	/// Ordinal among page-like children.
	pub index: usize,
	/// Position in the original child list.
	pub source: usize,
	/// Display number from the wrapper props.
	pub number: Option<u32>,
	/// Density after cover-mode resolution.
	pub density: PageDensity,
	/// Set for cover children.
	pub cover: Option<CoverPosition>,
}

impl PageDescriptor {
	/// Mount callback: tags the node and records it in its slot.
	pub fn mount<N: PageNode + Clone>(&self, node: N, slots: &mut PageSlots<N>) {
		node.tag(self.density, self.index);
		slots.record(self.index, node);
	}

	/// Root attributes for the source child, with the resolved density.
	pub fn attributes<C>(&self, child: &BookChild<C>) -> Attributes {
		let mut attrs = match child {
			BookChild::Page { props, .. } => props.attributes(),
			BookChild::Cover { props, .. } => props.attributes(),
			BookChild::Other(_) => Attributes::new(),
		};
		for (name, value) in attrs.iter_mut() {
			if *name == crate::wrapper::attr::DENSITY {
				*value = self.density.as_str().to_string();
			}
		}
		attrs
	}
}

/// Builds descriptors for every page-like child, in order.
///
/// With `cover_mode`, the first and last descriptors are forced hard. A single
/// page is both first and last.
pub fn materialize<C>(children: &[BookChild<C>], cover_mode: bool) -> Vec<PageDescriptor> {
	let pages: Vec<(usize, &BookChild<C>)> = children
		.iter()
		.enumerate()
		.filter(|(_, child)| child.is_page_like())
		.collect();
	let last = pages.len().saturating_sub(1);

	pages
		.into_iter()
		.enumerate()
		.map(|(index, (source, child))| {
			let mut density = child.declared_density().unwrap_or_default();
			if cover_mode && (index == 0 || index == last) {
				density = PageDensity::Hard;
			}
			let (number, cover) = match child {
				BookChild::Page { props, .. } => (props.number, None),
				BookChild::Cover { props, .. } => (props.number, Some(props.position)),
				BookChild::Other(_) => (None, None),
			};
			PageDescriptor {
				index,
				source,
				number,
				density,
				cover,
			}
		})
		.collect()
}

/// Outcome of a materialization pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Materialized {
	/// Descriptors were rebuilt.
	Rendered {
		/// The page list got shorter; the engine must reload, not update.
		shrunk: bool,
	},
	/// Length unchanged under `render_only_page_length_change`; previous
	/// descriptors are kept.
	Skipped,
}

/// Stateful materialization across render passes.
#[derive(Debug, Default)]
pub struct Materializer {
	descriptors: Vec<PageDescriptor>,
}

impl Materializer {
	/// A materializer with no previous pass.
	pub fn new() -> Self {
		Self::default()
	}

	/// Runs one pass over the current children.
	pub fn run<C>(
		&mut self,
		children: &[BookChild<C>],
		cover_mode: bool,
		render_only_page_length_change: bool,
	) -> Materialized {
		let next = materialize(children, cover_mode);
		let previous_len = self.descriptors.len();

		if render_only_page_length_change && next.len() == previous_len {
			debug_log!("materialize: length unchanged ({}), skipping", previous_len);
			return Materialized::Skipped;
		}

		let shrunk = next.len() < previous_len;
		debug_log!(
			"materialize: {} -> {} pages (shrunk: {})",
			previous_len,
			next.len(),
			shrunk
		);
		self.descriptors = next;
		Materialized::Rendered { shrunk }
	}

	/// Descriptors from the last rendered pass.
	pub fn descriptors(&self) -> &[PageDescriptor] {
		&self.descriptors
	}
}

/// Positional slots for mounted page roots.
#[derive(Debug, Clone)]
pub struct PageSlots<N> {
	slots: Vec<Option<N>>,
}

impl<N> Default for PageSlots<N> {
	fn default() -> Self {
		Self { slots: Vec::new() }
	}
}

impl<N: Clone> PageSlots<N> {
	/// Empty slots.
	pub fn new() -> Self {
		Self::default()
	}

	/// Drops every recorded node and resizes to `len` empty slots.
	pub fn reset(&mut self, len: usize) {
		self.slots.clear();
		self.slots.resize_with(len, || None);
	}

	/// Records the node mounted at `index`, growing if needed.
	pub fn record(&mut self, index: usize, node: N) {
		if index >= self.slots.len() {
			self.slots.resize_with(index + 1, || None);
		}
		self.slots[index] = Some(node);
	}

	/// Clears the slot at `index` (the node unmounted).
	pub fn release(&mut self, index: usize) {
		if let Some(slot) = self.slots.get_mut(index) {
			*slot = None;
		}
	}

	/// Populated nodes in ordinal order; empty slots are skipped.
	pub fn nodes(&self) -> Vec<N> {
		self.slots.iter().flatten().cloned().collect()
	}

	/// Number of populated slots.
	pub fn populated(&self) -> usize {
		self.slots.iter().filter(|slot| slot.is_some()).count()
	}

	/// Number of slots.
	pub fn len(&self) -> usize {
		self.slots.len()
	}

	/// Returns true if there are no slots.
	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use rstest::rstest;
	use std::cell::RefCell;
	use std::rc::Rc;

	#[derive(Debug, Clone, Default)]
	struct TestNode {
		tags: Rc<RefCell<Vec<(PageDensity, usize)>>>,
	}

	impl PageNode for TestNode {
		fn tag(&self, density: PageDensity, index: usize) {
			self.tags.borrow_mut().push((density, index));
		}
	}

	fn pages(hints: &[Option<PageDensity>]) -> Vec<BookChild<()>> {
		hints
			.iter()
			.map(|hint| {
				let props = PageProps {
					density: *hint,
					..PageProps::default()
				};
				BookChild::page(props, ())
			})
			.collect()
	}

	fn densities(descriptors: &[PageDescriptor]) -> Vec<PageDensity> {
		descriptors.iter().map(|d| d.density).collect()
	}

	#[rstest]
	fn test_hints_default_to_soft_without_cover_mode() {
		let children = pages(&[None, Some(PageDensity::Hard), None]);

		let descriptors = materialize(&children, false);

		assert_eq!(
			densities(&descriptors),
			vec![PageDensity::Soft, PageDensity::Hard, PageDensity::Soft]
		);
	}

	#[rstest]
	#[case(1, vec![PageDensity::Hard])]
	#[case(2, vec![PageDensity::Hard, PageDensity::Hard])]
	#[case(4, vec![PageDensity::Hard, PageDensity::Soft, PageDensity::Soft, PageDensity::Hard])]
	fn test_cover_mode_forces_first_and_last(#[case] n: usize, #[case] expected: Vec<PageDensity>) {
		let children = pages(&vec![None; n]);

		assert_eq!(densities(&materialize(&children, true)), expected);
	}

	#[rstest]
	fn test_non_page_children_take_no_ordinal() {
		let children = vec![
			BookChild::Other(()),
			BookChild::page(PageProps::new().number(1), ()),
			BookChild::Other(()),
			BookChild::cover(CoverProps::new(CoverPosition::Back).number(2), ()),
		];

		let descriptors = materialize(&children, false);

		assert_eq!(descriptors.len(), 2);
		assert_eq!((descriptors[0].index, descriptors[0].source), (0, 1));
		assert_eq!((descriptors[1].index, descriptors[1].source), (1, 3));
		assert_eq!(descriptors[1].cover, Some(CoverPosition::Back));
		assert_eq!(descriptors[1].density, PageDensity::Hard);
	}

	#[rstest]
	fn test_cover_in_the_middle_stays_hard() {
		let children = vec![
			BookChild::page(PageProps::new(), ()),
			BookChild::cover(CoverProps::new(CoverPosition::Front), ()),
			BookChild::page(PageProps::new(), ()),
		];

		assert_eq!(
			densities(&materialize(&children, false)),
			vec![PageDensity::Soft, PageDensity::Hard, PageDensity::Soft]
		);
	}

	#[rstest]
	fn test_descriptor_attributes_use_resolved_density() {
		let children = pages(&[Some(PageDensity::Soft)]);
		let descriptor = &materialize(&children, true)[0];

		let attrs = descriptor.attributes(&children[0]);

		assert!(attrs.contains(&("data-density", "hard".to_string())));
	}

	#[rstest]
	fn test_mount_tags_node_and_fills_slot() {
		let children = pages(&[None, None, None]);
		let descriptors = materialize(&children, true);
		let mut slots = PageSlots::new();
		slots.reset(descriptors.len());
		let node = TestNode::default();

		descriptors[2].mount(node.clone(), &mut slots);

		assert_eq!(*node.tags.borrow(), vec![(PageDensity::Hard, 2)]);
		assert_eq!(slots.populated(), 1);
		assert_eq!(slots.len(), 3);
	}

	#[rstest]
	fn test_slots_keep_ordinal_order() {
		let mut slots: PageSlots<u8> = PageSlots::new();
		slots.reset(3);
		slots.record(2, 30);
		slots.record(0, 10);

		assert_eq!(slots.nodes(), vec![10, 30]);

		slots.release(2);
		assert_eq!(slots.nodes(), vec![10]);
	}

	#[rstest]
	fn test_materializer_detects_shrink() {
		let mut materializer = Materializer::new();

		assert_eq!(
			materializer.run(&pages(&[None; 5]), false, false),
			Materialized::Rendered { shrunk: false }
		);
		assert_eq!(
			materializer.run(&pages(&[None; 3]), false, false),
			Materialized::Rendered { shrunk: true }
		);
		assert_eq!(materializer.descriptors().len(), 3);
	}

	#[rstest]
	fn test_length_only_flag_reuses_stale_descriptors() {
		let mut materializer = Materializer::new();
		materializer.run(&pages(&[None, None]), false, true);

		let outcome = materializer.run(&pages(&[Some(PageDensity::Hard), None]), true, true);

		assert_eq!(outcome, Materialized::Skipped);
		assert_eq!(
			densities(materializer.descriptors()),
			vec![PageDensity::Soft, PageDensity::Soft]
		);
	}

	#[rstest]
	fn test_length_only_flag_still_renders_on_growth() {
		let mut materializer = Materializer::new();
		materializer.run(&pages(&[None, None]), false, true);

		let outcome = materializer.run(&pages(&[None, None, None]), false, true);

		assert_eq!(outcome, Materialized::Rendered { shrunk: false });
	}

	fn hint() -> impl Strategy<Value = Option<PageDensity>> {
		prop_oneof![
			Just(None),
			Just(Some(PageDensity::Soft)),
			Just(Some(PageDensity::Hard)),
		]
	}

	proptest! {
		#[test]
		fn prop_cover_mode_hard_ends(hints in prop::collection::vec(hint(), 1..32)) {
			let descriptors = materialize(&pages(&hints), true);
			let n = descriptors.len();

			prop_assert_eq!(n, hints.len());
			prop_assert_eq!(descriptors[0].density, PageDensity::Hard);
			prop_assert_eq!(descriptors[n - 1].density, PageDensity::Hard);
		}

		#[test]
		fn prop_without_cover_mode_density_follows_hint(hints in prop::collection::vec(hint(), 0..32)) {
			let descriptors = materialize(&pages(&hints), false);

			for (descriptor, hint) in descriptors.iter().zip(&hints) {
				prop_assert_eq!(descriptor.density, hint.unwrap_or_default());
			}
		}
	}
}
