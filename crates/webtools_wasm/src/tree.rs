//! Tree shaping for WASM.

use serde_json::Value;
use wasm_bindgen::prelude::*;
use webtools_core::tree::TreeOptions;

use crate::error::{IntoJsResult, to_js};

/// Nest flat records under their parents.
///
/// `options` is an optional `{ idField, parentIdField, childrenField, rootValue }`
/// object; missing keys take their defaults.
#[wasm_bindgen(js_name = handleTree)]
pub fn handle_tree(data: JsValue, options: JsValue) -> Result<JsValue, JsValue> {
    let records: Vec<Value> = serde_wasm_bindgen::from_value(data).js_err()?;
    let options: TreeOptions = if options.is_undefined() || options.is_null() {
        TreeOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options).js_err()?
    };

    let tree = webtools_core::handle_tree(&records, &options);
    to_js(&tree)
}
