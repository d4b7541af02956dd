//! Error handling utilities for WASM bindings.

use serde::Serialize;
use wasm_bindgen::JsValue;

/// Extension trait for converting Results to JS-compatible errors.
pub trait IntoJsResult<T> {
    /// Convert to a Result with JsValue error.
    fn js_err(self) -> Result<T, JsValue>;
}

impl<T, E: std::fmt::Display> IntoJsResult<T> for Result<T, E> {
    fn js_err(self) -> Result<T, JsValue> {
        self.map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

/// Serialize to a plain JS value (objects, not `Map`s).
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .js_err()
}
