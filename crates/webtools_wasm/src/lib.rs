#![cfg(target_arch = "wasm32")]
//! WebAssembly bindings for webtools core helpers.
//!
//! This crate exposes every helper of [`webtools_core`] to the web frontend
//! under the names the frontend already calls.
//!
//! ## Usage
//!
//! ```javascript
//! import init, { handleTree, parseTime } from './webtools_wasm.js';
//!
//! await init();
//! const menus = handleTree(rows, { idField: 'menuId' });
//! const label = parseTime(Date.now(), '{y}-{m}-{d}');
//! ```
//!
//! ## Error Handling
//!
//! Fallible functions return `Result<T, JsValue>` for JavaScript interop; the
//! error is the message string of the underlying [`webtools_core::ToolsError`].

mod convert;
mod error;
mod file;
mod tree;
mod utils;

// Re-export the bindings
pub use convert::deep_clone;
pub use file::{data_url_to_blob, file_to_base64};
pub use tree::handle_tree;
pub use utils::{desensitization, get_distance, get_timestamp, parse_time, time_ago};

use wasm_bindgen::prelude::*;

// ============================================================================
// Initialization
// ============================================================================

#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the WASM module. Called automatically on module load.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    // Initialize console logging for Rust log macros (Info level for reduced verbosity)
    console_log::init_with_level(log::Level::Info).ok();
}
