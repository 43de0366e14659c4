//! Engine events.
//!
//! The engine fires untyped `{ data, object }` payloads. The bridge decodes
//! `data` once, at the boundary, into [`EngineEvent`]; everything past that
//! point works with the typed events below.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::{FlipBookError, Result};
use crate::reactive::Callback;
use crate::types::{PageOrientation, PageState};

/// The five engine events the bridge subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
	/// A flip finished; data is the new page index.
	Flip,
	/// Portrait/landscape switch.
	ChangeOrientation,
	/// Interaction state change.
	ChangeState,
	/// Pages loaded for the first time.
	Init,
	/// Pages reloaded from an update call.
	Update,
}

impl EventKind {
	/// Subscription order used by the bridge.
	pub const ALL: [EventKind; 5] = [
		EventKind::Flip,
		EventKind::ChangeOrientation,
		EventKind::ChangeState,
		EventKind::Init,
		EventKind::Update,
	];

	/// Event name as registered with the engine.
	pub fn as_str(&self) -> &'static str {
		match self {
			EventKind::Flip => "flip",
			EventKind::ChangeOrientation => "changeOrientation",
			EventKind::ChangeState => "changeState",
			EventKind::Init => "init",
			EventKind::Update => "update",
		}
	}
}

impl fmt::Display for EventKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for EventKind {
	type Err = FlipBookError;

	fn from_str(s: &str) -> Result<Self> {
		EventKind::ALL
			.into_iter()
			.find(|kind| kind.as_str() == s)
			.ok_or_else(|| FlipBookError::UnknownEvent(s.to_string()))
	}
}

/// Payload of `flip`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlipEvent {
	/// Current page index (0-based).
	pub data: usize,
}

/// Payload of `changeOrientation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrientationEvent {
	/// New orientation.
	pub data: PageOrientation,
}

/// Payload of `changeState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateEvent {
	/// New interaction state.
	pub data: PageState,
}

/// Payload of `init` and `update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookState {
	/// Page index reported with the event.
	pub page: usize,
	/// Orientation reported with the event, when the engine sends one.
	pub mode: Option<PageOrientation>,
}

/// A decoded engine event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
	/// `flip`
	Flip(FlipEvent),
	/// `changeOrientation`
	ChangeOrientation(OrientationEvent),
	/// `changeState`
	ChangeState(StateEvent),
	/// `init`
	Init(BookState),
	/// `update`
	Update(BookState),
}

impl EngineEvent {
	/// Decodes the `data` field of an event of the given kind.
	pub fn decode(kind: EventKind, data: &Value) -> Result<Self> {
		let event = match kind {
			EventKind::Flip => EngineEvent::Flip(FlipEvent {
				data: page_index(kind, data)?,
			}),
			EventKind::ChangeOrientation => EngineEvent::ChangeOrientation(OrientationEvent {
				data: wire_string(kind, data)?,
			}),
			EventKind::ChangeState => EngineEvent::ChangeState(StateEvent {
				data: wire_string(kind, data)?,
			}),
			EventKind::Init => EngineEvent::Init(book_state(kind, data)?),
			EventKind::Update => EngineEvent::Update(book_state(kind, data)?),
		};
		Ok(event)
	}

	/// The kind this event was decoded as.
	pub fn kind(&self) -> EventKind {
		match self {
			EngineEvent::Flip(_) => EventKind::Flip,
			EngineEvent::ChangeOrientation(_) => EventKind::ChangeOrientation,
			EngineEvent::ChangeState(_) => EventKind::ChangeState,
			EngineEvent::Init(_) => EventKind::Init,
			EngineEvent::Update(_) => EventKind::Update,
		}
	}
}

fn invalid(kind: EventKind, reason: impl Into<String>) -> FlipBookError {
	FlipBookError::InvalidPayload {
		event: kind.as_str(),
		reason: reason.into(),
	}
}

fn page_index(kind: EventKind, data: &Value) -> Result<usize> {
	// JS numbers arrive as floats; accept integral values only.
	let index = match data {
		Value::Number(n) => n
			.as_u64()
			.or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64)),
		_ => None,
	};
	index
		.and_then(|i| usize::try_from(i).ok())
		.ok_or_else(|| invalid(kind, format!("expected a page index, got {}", data)))
}

fn wire_string<T: FromStr<Err = FlipBookError>>(kind: EventKind, data: &Value) -> Result<T> {
	let s = data
		.as_str()
		.ok_or_else(|| invalid(kind, format!("expected a string, got {}", data)))?;
	s.parse().map_err(|e: FlipBookError| invalid(kind, e.to_string()))
}

fn book_state(kind: EventKind, data: &Value) -> Result<BookState> {
	match data {
		Value::Object(fields) => {
			let page = fields
				.get("page")
				.ok_or_else(|| invalid(kind, "missing 'page'"))
				.and_then(|page| page_index(kind, page))?;
			let mode = match fields.get("mode") {
				None | Some(Value::Null) => None,
				Some(mode) => Some(wire_string(kind, mode)?),
			};
			Ok(BookState { page, mode })
		}
		other => Ok(BookState {
			page: page_index(kind, other)?,
			mode: None,
		}),
	}
}

/// Optional caller observers for the five engine events.
///
/// These are purely additive: mirrored state is maintained whether or not any
/// callback is set.
#[derive(Debug, Clone, Default)]
pub struct BookCallbacks {
	/// Called after a flip.
	pub on_flip: Option<Callback<FlipEvent>>,
	/// Called after an orientation change.
	pub on_change_orientation: Option<Callback<OrientationEvent>>,
	/// Called after an interaction state change.
	pub on_change_state: Option<Callback<StateEvent>>,
	/// Called once pages are first loaded.
	pub on_init: Option<Callback<BookState>>,
	/// Called after pages are reloaded.
	pub on_update: Option<Callback<BookState>>,
}

impl BookCallbacks {
	/// No callbacks.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets `on_flip`.
	pub fn on_flip(mut self, f: impl Fn(FlipEvent) + 'static) -> Self {
		self.on_flip = Some(Callback::new(f));
		self
	}

	/// Sets `on_change_orientation`.
	pub fn on_change_orientation(mut self, f: impl Fn(OrientationEvent) + 'static) -> Self {
		self.on_change_orientation = Some(Callback::new(f));
		self
	}

	/// Sets `on_change_state`.
	pub fn on_change_state(mut self, f: impl Fn(StateEvent) + 'static) -> Self {
		self.on_change_state = Some(Callback::new(f));
		self
	}

	/// Sets `on_init`.
	pub fn on_init(mut self, f: impl Fn(BookState) + 'static) -> Self {
		self.on_init = Some(Callback::new(f));
		self
	}

	/// Sets `on_update`.
	pub fn on_update(mut self, f: impl Fn(BookState) + 'static) -> Self {
		self.on_update = Some(Callback::new(f));
		self
	}

	/// Forwards a decoded event to the matching callback, if any.
	pub fn dispatch(&self, event: &EngineEvent) {
		match *event {
			EngineEvent::Flip(e) => {
				if let Some(cb) = &self.on_flip {
					cb.call(e);
				}
			}
			EngineEvent::ChangeOrientation(e) => {
				if let Some(cb) = &self.on_change_orientation {
					cb.call(e);
				}
			}
			EngineEvent::ChangeState(e) => {
				if let Some(cb) = &self.on_change_state {
					cb.call(e);
				}
			}
			EngineEvent::Init(e) => {
				if let Some(cb) = &self.on_init {
					cb.call(e);
				}
			}
			EngineEvent::Update(e) => {
				if let Some(cb) = &self.on_update {
					cb.call(e);
				}
			}
		}
	}

	/// Returns true when every slot holds the same closure (or is unset) in
	/// both sets.
	pub fn same_as(&self, other: &BookCallbacks) -> bool {
		same(&self.on_flip, &other.on_flip)
			&& same(&self.on_change_orientation, &other.on_change_orientation)
			&& same(&self.on_change_state, &other.on_change_state)
			&& same(&self.on_init, &other.on_init)
			&& same(&self.on_update, &other.on_update)
	}
}

fn same<A>(a: &Option<Callback<A>>, b: &Option<Callback<A>>) -> bool {
	match (a, b) {
		(Some(a), Some(b)) => a.ptr_eq(b),
		(None, None) => true,
		_ => false,
	}
}
