//! Core data models for the place names service.

pub mod gazetteer;
pub mod jurisdiction;
pub mod place;
pub mod register;

pub use gazetteer::{Gazetteer, NamingAuthority, GAZETTEERS, NAMING_AUTHORITIES};
pub use jurisdiction::Jurisdiction;
pub use place::{Classification, PlaceNameRecord, PlaceNameRow, SupplyDate};
pub use register::{natural_key, PageLimits, PageWindow, RegisterItem, RegisterPage, SearchFilter};
