//! Core types and API client for the World Air Quality Index (WAQI) feed.
//!
//! Station listings and per-station readings are modelled loosely: only the
//! station identifier and the response `status` marker are interpreted, the
//! rest of each payload is carried through untouched.

pub mod api;
pub mod bounds;
#[cfg(feature = "api")]
pub mod client;
pub mod error;
pub mod reading;
pub mod response;
pub mod station;

pub use api::WaqiApi;
pub use bounds::Bounds;
#[cfg(feature = "api")]
pub use client::WaqiClient;
pub use error::WaqiError;
pub use reading::DetailedReading;
pub use station::{StationId, StationRef};
