//! Storefront domain: value objects, aggregates and list pagination.
pub mod aggregates;
pub mod pagination;
pub mod value_objects;
