//! Geolocation helpers for ride-hailing backends.
//!
//! Address geocoding, travel distance/time, place autocomplete (all through
//! the Google Maps web services) and radius search over stored captains.

pub mod captains;
pub mod config;
pub mod logging;
pub mod maps;
pub mod server;
