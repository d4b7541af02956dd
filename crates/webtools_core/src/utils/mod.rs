//! Leaf helpers: string masking, great-circle distance, and data URLs.
//!
//! Pure functions with no async or filesystem dependencies (WASM-safe).

pub mod data_url;
pub mod geo;
pub mod mask;

// Re-export commonly used items for convenience
pub use data_url::{DataBlob, decode_data_url, encode_data_url};
pub use geo::{GeoPoint, distance_km};
pub use mask::desensitize;
