//! GraphQL client and per-entity accessors.
//!
//! Every accessor sends one fixed document and returns one top-level field of
//! `data` as opaque JSON. Records are not modelled; the backend owns the schema.

mod brands;
mod categories;
mod client;
mod filters;
mod manufacturers;
mod products;
mod rubrics;
mod shop_resources;
mod shops;

pub use brands::Brands;
pub use categories::{Categories, RubricCategories};
pub use client::{GraphqlClient, DEFAULT_GRAPHQL_URL};
pub use filters::{ActivityFilter, ManufacturerFilter, ProductFilter, RubricScopedFilter, Trashed};
pub use manufacturers::Manufacturers;
pub use products::Products;
pub use rubrics::Rubrics;
pub use shop_resources::{ShopResource, ShopResources};
pub use shops::Shops;
