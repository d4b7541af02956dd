//! Blob and file conversions for WASM.

use js_sys::{Array, Uint8Array};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, File};
use webtools_core::utils::{decode_data_url, encode_data_url};

use crate::error::IntoJsResult;

/// Build a `Blob` from a `data:<mime>;base64,<payload>` URL.
#[wasm_bindgen(js_name = dataUrlToBlob)]
pub fn data_url_to_blob(data_url: &str) -> Result<Blob, JsValue> {
    let decoded = decode_data_url(data_url).js_err()?;

    let bytes = Uint8Array::from(decoded.bytes.as_slice());
    let parts = Array::of1(&bytes);
    let options = BlobPropertyBag::new();
    options.set_type(&decoded.mime);

    Blob::new_with_u8_array_sequence_and_options(&parts, &options)
}

/// Read a `File` into a Base64 data URL.
///
/// Resolves once with the data URL, or rejects with `"err"` if the file
/// cannot be read.
#[wasm_bindgen(js_name = fileToBase64)]
pub async fn file_to_base64(file: File) -> Result<String, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await.map_err(|e| {
        log::warn!("Failed to read file '{}': {:?}", file.name(), e);
        JsValue::from_str("err")
    })?;
    let bytes = Uint8Array::new(&buffer).to_vec();
    log::debug!("Read {} bytes from '{}'", bytes.len(), file.name());

    Ok(encode_data_url(&file.type_(), &bytes))
}
