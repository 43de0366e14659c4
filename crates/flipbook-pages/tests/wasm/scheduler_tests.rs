use std::cell::Cell;
use std::rc::Rc;

use flipbook_core::engine::FrameScheduler;
use flipbook_pages::AnimationFrameScheduler;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::wasm_bindgen_test;

async fn next_frame() {
	let promise = js_sys::Promise::new(&mut |resolve, _| {
		let window = web_sys::window().unwrap();
		let _ = window.request_animation_frame(resolve.unchecked_ref());
	});
	JsFuture::from(promise).await.unwrap();
}

#[wasm_bindgen_test]
async fn frame_runs_task_once() {
	let scheduler = AnimationFrameScheduler::new().unwrap();
	let runs = Rc::new(Cell::new(0));

	let _frame = scheduler.request_frame(Box::new({
		let runs = Rc::clone(&runs);
		move || runs.set(runs.get() + 1)
	}));
	next_frame().await;
	next_frame().await;

	assert_eq!(runs.get(), 1);
}

#[wasm_bindgen_test]
async fn dropped_frame_never_runs() {
	let scheduler = AnimationFrameScheduler::new().unwrap();
	let ran = Rc::new(Cell::new(false));

	let frame = scheduler.request_frame(Box::new({
		let ran = Rc::clone(&ran);
		move || ran.set(true)
	}));
	drop(frame);
	next_frame().await;

	assert!(!ran.get());
}

#[wasm_bindgen_test]
async fn drop_after_fire_is_harmless() {
	let scheduler = AnimationFrameScheduler::new().unwrap();
	let ran = Rc::new(Cell::new(false));

	let frame = scheduler.request_frame(Box::new({
		let ran = Rc::clone(&ran);
		move || ran.set(true)
	}));
	next_frame().await;
	drop(frame);

	assert!(ran.get());
}
