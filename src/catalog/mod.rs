//! Catalog data model
//!
//! Both types are transient: they are built during one harvest pass and
//! dropped once written to the output sinks.
//!
//! - `ProductRecord`: every field extracted from one product page
//! - `CategoryListing`: one category's name, landing URL and ordered product URLs

mod listing;
mod product;

pub use listing::CategoryListing;
pub use product::{ProductRecord, CSV_HEADER};
