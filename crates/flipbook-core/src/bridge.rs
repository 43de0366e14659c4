//! Event bridge.
//!
//! Subscribes to the engine's five events, mirrors navigation state into a
//! [`Signal`], and forwards every decoded event to the caller's callbacks.
//! Mirroring does not depend on any callback being set.

use std::rc::{Rc, Weak};

use serde_json::Value;

use crate::engine::{PageFlipEngine, RawHandler};
use crate::event::{BookCallbacks, EngineEvent, EventKind};
use crate::reactive::{ReadSignal, Signal};
use crate::types::{PageOrientation, PageState};
use crate::{debug_log, warn_log};

/// Wrapper-owned copy of engine navigation state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MirroredState {
	/// Page index from the last `flip` or `init`.
	pub current_page_index: usize,
	/// Page count queried from the engine on `init`.
	pub page_count: usize,
	/// Orientation from the last `changeOrientation`.
	pub orientation: PageOrientation,
	/// State from the last `changeState`.
	pub page_state: Option<PageState>,
}

/// Connects an engine's event stream to mirrored state and callbacks.
#[derive(Debug, Clone, Default)]
pub struct EventBridge {
	state: Signal<MirroredState>,
}

impl EventBridge {
	/// A bridge with default mirrored state.
	pub fn new() -> Self {
		Self::default()
	}

	/// Read-only view of the mirrored state.
	pub fn state(&self) -> ReadSignal<MirroredState> {
		self.state.read_only()
	}

	/// Replaces all five handlers on `engine`.
	///
	/// Old handlers are removed before any new one is registered, so repeated
	/// calls never leave two handler sets on one event.
	pub fn attach<E: PageFlipEngine>(&self, engine: &Rc<E>, callbacks: &BookCallbacks) {
		self.detach(engine.as_ref());
		for kind in EventKind::ALL {
			engine.on(kind, self.handler(kind, Rc::downgrade(engine), callbacks.clone()));
		}
		debug_log!("bridge: subscribed to {} events", EventKind::ALL.len());
	}

	/// Removes all five handlers from `engine`.
	pub fn detach<E: PageFlipEngine>(&self, engine: &E) {
		for kind in EventKind::ALL {
			engine.off(kind);
		}
	}

	fn handler<E: PageFlipEngine>(
		&self,
		kind: EventKind,
		engine: Weak<E>,
		callbacks: BookCallbacks,
	) -> RawHandler {
		let state = self.state.clone();
		Rc::new(move |data: &Value| {
			let event = match EngineEvent::decode(kind, data) {
				Ok(event) => event,
				Err(err) => {
					warn_log!("bridge: dropping '{}' event: {}", kind, err);
					return;
				}
			};
			mirror(&state, &event, engine.upgrade().as_deref());
			callbacks.dispatch(&event);
		})
	}
}

fn mirror<E: PageFlipEngine>(state: &Signal<MirroredState>, event: &EngineEvent, engine: Option<&E>) {
	match *event {
		EngineEvent::Flip(e) => state.update(|s| s.current_page_index = e.data),
		EngineEvent::ChangeOrientation(e) => state.update(|s| s.orientation = e.data),
		EngineEvent::ChangeState(e) => state.update(|s| s.page_state = Some(e.data)),
		// The event payload only carries the start page; the engine is the
		// authority for both fields.
		EngineEvent::Init(e) => match engine {
			Some(engine) => {
				let page_count = engine.page_count();
				let current = engine.current_page_index();
				state.update(|s| {
					s.page_count = page_count;
					s.current_page_index = current;
				});
			}
			None => state.update(|s| s.current_page_index = e.page),
		},
		EngineEvent::Update(_) => {}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::BookConfig;
	use crate::engine::PageFlipEngine;
	use crate::testing::{MockContainer, MockEngine};
	use rstest::rstest;
	use serde_json::json;
	use std::cell::{Cell, RefCell};

	fn engine() -> (Rc<MockEngine>, MockContainer) {
		let container = MockContainer::new();
		let engine = MockEngine::construct(&container, &BookConfig::default()).unwrap();
		(Rc::new(engine), container)
	}

	#[rstest]
	fn test_mirrors_without_callbacks() {
		let (engine, container) = engine();
		let bridge = EventBridge::new();
		bridge.attach(&engine, &BookCallbacks::new());
		container.set_position(0, 3);

		container.emit(EventKind::Init, json!({"page": 0, "mode": "landscape"}));
		container.emit(EventKind::Flip, json!(1));
		container.emit(EventKind::ChangeOrientation, json!("portrait"));
		container.emit(EventKind::ChangeState, json!("flipping"));

		assert_eq!(
			bridge.state().get(),
			MirroredState {
				current_page_index: 1,
				page_count: 3,
				orientation: PageOrientation::Portrait,
				page_state: Some(PageState::Flipping),
			}
		);
	}

	#[rstest]
	fn test_init_trusts_engine_over_payload() {
		let (engine, container) = engine();
		let bridge = EventBridge::new();
		bridge.attach(&engine, &BookCallbacks::new());
		container.set_position(2, 8);

		container.emit(EventKind::Init, json!({"page": 0}));

		let state = bridge.state().get();
		assert_eq!((state.current_page_index, state.page_count), (2, 8));
	}

	#[rstest]
	fn test_forwards_to_callbacks() {
		let (engine, container) = engine();
		let bridge = EventBridge::new();
		let seen = Rc::new(RefCell::new(Vec::new()));
		let callbacks = BookCallbacks::new()
			.on_flip({
				let seen = Rc::clone(&seen);
				move |e| seen.borrow_mut().push(format!("flip:{}", e.data))
			})
			.on_change_state({
				let seen = Rc::clone(&seen);
				move |e| seen.borrow_mut().push(format!("state:{}", e.data))
			})
			.on_update({
				let seen = Rc::clone(&seen);
				move |e| seen.borrow_mut().push(format!("update:{}", e.page))
			});
		bridge.attach(&engine, &callbacks);

		container.emit(EventKind::Flip, json!(4));
		container.emit(EventKind::ChangeState, json!("read"));
		container.emit(EventKind::Update, json!({"page": 4, "mode": "portrait"}));

		assert_eq!(*seen.borrow(), vec!["flip:4", "state:read", "update:4"]);
		assert_eq!(bridge.state().get().page_count, 0);
	}

	#[rstest]
	fn test_reattach_does_not_duplicate_delivery() {
		let (engine, container) = engine();
		let bridge = EventBridge::new();
		let flips = Rc::new(Cell::new(0));
		let callbacks = BookCallbacks::new().on_flip({
			let flips = Rc::clone(&flips);
			move |_| flips.set(flips.get() + 1)
		});

		for _ in 0..3 {
			bridge.attach(&engine, &callbacks);
		}
		container.emit(EventKind::Flip, json!(1));

		assert_eq!(flips.get(), 1);
		for kind in EventKind::ALL {
			assert_eq!(container.handler_count(kind), 1);
		}
	}

	#[rstest]
	fn test_detach_removes_all_handlers() {
		let (engine, container) = engine();
		let bridge = EventBridge::new();
		bridge.attach(&engine, &BookCallbacks::new());

		bridge.detach(engine.as_ref());
		container.emit(EventKind::Flip, json!(5));

		assert_eq!(bridge.state().get().current_page_index, 0);
		for kind in EventKind::ALL {
			assert_eq!(container.handler_count(kind), 0);
		}
	}

	#[rstest]
	fn test_malformed_payload_is_dropped() {
		let (engine, container) = engine();
		let bridge = EventBridge::new();
		let flips = Rc::new(Cell::new(0));
		bridge.attach(
			&engine,
			&BookCallbacks::new().on_flip({
				let flips = Rc::clone(&flips);
				move |_| flips.set(flips.get() + 1)
			}),
		);

		container.emit(EventKind::Flip, json!("next"));
		container.emit(EventKind::ChangeOrientation, json!(7));

		assert_eq!(flips.get(), 0);
		assert_eq!(bridge.state().get(), MirroredState::default());
	}
}
