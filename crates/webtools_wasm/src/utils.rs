//! Date, masking, and distance functions for WASM.

use chrono::DateTime;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use webtools_core::date::{self, TimeInput, TimestampPrecision};
use webtools_core::utils::{GeoPoint, desensitize, distance_km};

use crate::error::IntoJsResult;

/// Read a `Date`, number, or string passed from JavaScript.
///
/// `null` and `undefined` map to `None`.
fn time_input(value: &JsValue) -> Result<Option<TimeInput>, JsValue> {
    if value.is_null() || value.is_undefined() {
        return Ok(None);
    }
    if let Some(d) = value.dyn_ref::<js_sys::Date>() {
        return DateTime::from_timestamp_millis(d.get_time() as i64)
            .map(|dt| Some(TimeInput::DateTime(dt)))
            .ok_or_else(|| JsValue::from_str("Invalid Date"));
    }
    if let Some(n) = value.as_f64() {
        return Ok(Some(TimeInput::Number(n as i64)));
    }
    if let Some(s) = value.as_string() {
        return Ok(Some(TimeInput::Text(s)));
    }
    Err(JsValue::from_str("Expected a Date, number, or string"))
}

/// Format a time with a `{y}-{m}-{d} {h}:{i}:{s}` style pattern.
///
/// Returns `undefined` for empty input.
#[wasm_bindgen(js_name = parseTime)]
pub fn parse_time(time: JsValue, pattern: Option<String>) -> Result<Option<String>, JsValue> {
    let Some(time) = time_input(&time)? else {
        return Ok(None);
    };
    date::parse_time(&time, pattern.as_deref()).js_err()
}

/// Epoch timestamp of a date string; `length` 10 gives seconds, otherwise milliseconds.
#[wasm_bindgen(js_name = getTimestamp)]
pub fn get_timestamp(time: &str, length: Option<u32>) -> Result<f64, JsValue> {
    let precision = length
        .map(TimestampPrecision::from_length)
        .unwrap_or_default();
    date::get_timestamp(time, precision)
        .map(|ts| ts as f64)
        .js_err()
}

/// Humanized distance between a millisecond timestamp and now.
#[wasm_bindgen(js_name = timeAgo)]
pub fn time_ago(timestamp: f64) -> Option<String> {
    date::time_ago(timestamp as i64, js_sys::Date::now() as i64)
}

/// Mask the middle of a string with `*`.
#[wasm_bindgen]
pub fn desensitization(s: &str, begin_len: Option<u32>, end_len: Option<u32>) -> String {
    desensitize(
        s,
        begin_len.unwrap_or(1) as usize,
        end_len.unwrap_or(1) as usize,
    )
}

/// Distance in kilometers between two coordinates.
#[wasm_bindgen(js_name = getDistance)]
pub fn get_distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    distance_km(GeoPoint::new(lat1, lng1), GeoPoint::new(lat2, lng2))
}
