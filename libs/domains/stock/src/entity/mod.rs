//! SeaORM entities for the stock schema created by the `migration` crate.
//!
//! Only `stock` is written by this domain; the catalog tables are read to
//! resolve display names and the property reference.

pub mod broker;
pub mod project;
pub mod property;
pub mod stock;
