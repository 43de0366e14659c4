//! Browser tests for the DOM binding
//!
//! Run with `wasm-pack test --headless --chrome crates/flipbook-pages`.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::wasm_bindgen_test_configure;

wasm_bindgen_test_configure!(run_in_browser);

mod component_tests;
mod dom_tests;
mod scheduler_tests;
mod stub;
