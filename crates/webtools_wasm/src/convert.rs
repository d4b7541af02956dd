//! Structural deep copy of JavaScript values.
//!
//! JS values are read into a [`Datum`], copied by [`webtools_core::deep_clone`],
//! and rebuilt. Dates come back as new `Date` objects; functions, class
//! instances, and other host objects are refused.

use chrono::DateTime;
use js_sys::{Array, Object, Reflect};
use serde_json::Number;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use webtools_core::Datum;

use crate::error::IntoJsResult;

/// Deep-copy a value made of primitives, `Date`s, arrays, and plain objects.
///
/// Throws `Unable to copy value: type '<Name>' isn't supported` for anything
/// else.
#[wasm_bindgen(js_name = deepClone)]
pub fn deep_clone(value: JsValue) -> Result<JsValue, JsValue> {
    let datum = js_to_datum(&value)?;
    let copy = webtools_core::deep_clone(&datum).js_err()?;
    datum_to_js(&copy)
}

fn js_to_datum(value: &JsValue) -> Result<Datum, JsValue> {
    if value.is_null() || value.is_undefined() {
        return Ok(Datum::Null);
    }
    if let Some(b) = value.as_bool() {
        return Ok(Datum::Bool(b));
    }
    if let Some(n) = value.as_f64() {
        // NaN and infinities have no JSON number; they copy as null.
        return Ok(Number::from_f64(n).map_or(Datum::Null, Datum::Number));
    }
    if let Some(s) = value.as_string() {
        return Ok(Datum::String(s));
    }
    if value.is_function() {
        return Ok(Datum::Opaque("Function".to_string()));
    }
    if let Some(date) = value.dyn_ref::<js_sys::Date>() {
        return Ok(DateTime::from_timestamp_millis(date.get_time() as i64)
            .map_or(Datum::Null, Datum::DateTime));
    }
    if Array::is_array(value) {
        let array: &Array = value.unchecked_ref();
        return array
            .iter()
            .map(|item| js_to_datum(&item))
            .collect::<Result<Vec<_>, _>>()
            .map(Datum::List);
    }
    if is_plain_object(value) {
        let object: &Object = value.unchecked_ref();
        let mut map = indexmap::IndexMap::new();
        for key in Object::keys(object).iter() {
            let Some(name) = key.as_string() else {
                continue;
            };
            let field = Reflect::get(object, &key)?;
            map.insert(name, js_to_datum(&field)?);
        }
        return Ok(Datum::Map(map));
    }
    Ok(Datum::Opaque(constructor_name(value)))
}

/// An object literal or `Object.create(null)`: its prototype is `null` or
/// `Object.prototype`.
fn is_plain_object(value: &JsValue) -> bool {
    if !value.is_object() {
        return false;
    }
    let proto = Object::get_prototype_of(value);
    proto.is_null() || Object::get_prototype_of(&proto).is_null()
}

fn constructor_name(value: &JsValue) -> String {
    value
        .dyn_ref::<Object>()
        .map(|object| String::from(object.constructor().name()))
        .filter(|name| !name.is_empty())
        .or_else(|| value.js_typeof().as_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn datum_to_js(datum: &Datum) -> Result<JsValue, JsValue> {
    Ok(match datum {
        Datum::Null => JsValue::NULL,
        Datum::Bool(b) => JsValue::from_bool(*b),
        Datum::Number(n) => JsValue::from_f64(n.as_f64().unwrap_or(f64::NAN)),
        Datum::String(s) => JsValue::from_str(s),
        Datum::DateTime(dt) => {
            js_sys::Date::new(&JsValue::from_f64(dt.timestamp_millis() as f64)).into()
        }
        Datum::List(items) => {
            let array = Array::new();
            for item in items {
                array.push(&datum_to_js(item)?);
            }
            array.into()
        }
        Datum::Map(map) => {
            let object = Object::new();
            for (key, item) in map {
                Reflect::set(&object, &JsValue::from_str(key), &datum_to_js(item)?)?;
            }
            object.into()
        }
        Datum::Opaque(name) => {
            return Err(JsValue::from_str(&format!(
                "Unable to copy value: type '{name}' isn't supported"
            )));
        }
    })
}
