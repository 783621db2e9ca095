//! Placenames - a linked-data front end for the Australian place names gazetteers
//!
//! This library provides the store, projection, rendering and HTTP modules
//! used by the `placenames-server` binary.

pub mod config;
pub mod dggs;
pub mod error;
pub mod http;
pub mod models;
pub mod projection;
pub mod register;
pub mod render;
pub mod store;

pub use config::Config;
pub use error::{PlacenamesError, Result};
pub use models::{PlaceNameRecord, PlaceNameRow};
