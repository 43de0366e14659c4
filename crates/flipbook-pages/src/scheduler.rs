//! `requestAnimationFrame` scheduler.

use std::cell::Cell;
use std::rc::Rc;

use flipbook_core::engine::FrameScheduler;
use flipbook_core::error::{FlipBookError, Result};
use flipbook_core::error_log;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::engine::js_error;

/// Runs deferred engine loads on the next animation frame.
#[derive(Debug, Clone)]
pub struct AnimationFrameScheduler {
	window: Window,
}

impl AnimationFrameScheduler {
	/// Scheduler bound to the global `window`.
	pub fn new() -> Result<Self> {
		let window = web_sys::window().ok_or_else(|| FlipBookError::Dom("no global window".into()))?;
		Ok(Self { window })
	}
}

/// A requested frame. Dropping it before the frame fires cancels it.
pub struct AnimationFrame {
	id: Option<i32>,
	fired: Rc<Cell<bool>>,
	window: Window,
	_closure: Closure<dyn FnMut()>,
}

impl Drop for AnimationFrame {
	fn drop(&mut self) {
		if self.fired.get() {
			return;
		}
		if let Some(id) = self.id {
			let _ = self.window.cancel_animation_frame(id);
		}
	}
}

impl std::fmt::Debug for AnimationFrame {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AnimationFrame")
			.field("id", &self.id)
			.field("fired", &self.fired.get())
			.finish()
	}
}

impl FrameScheduler for AnimationFrameScheduler {
	type Handle = AnimationFrame;

	fn request_frame(&self, task: Box<dyn FnOnce() + 'static>) -> AnimationFrame {
		let fired = Rc::new(Cell::new(false));
		let mut task = Some(task);
		let closure = Closure::wrap(Box::new({
			let fired = Rc::clone(&fired);
			move || {
				fired.set(true);
				if let Some(task) = task.take() {
					task();
				}
			}
		}) as Box<dyn FnMut()>);

		let id = match self
			.window
			.request_animation_frame(closure.as_ref().unchecked_ref())
		{
			Ok(id) => Some(id),
			Err(err) => {
				error_log!("scheduler: requestAnimationFrame failed: {}", js_error(&err));
				None
			}
		};

		AnimationFrame {
			id,
			fired,
			window: self.window.clone(),
			_closure: closure,
		}
	}
}
