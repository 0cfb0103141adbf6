//! Countertop manufacturers, scoped to a category.

use serde::Serialize;
use serde_json::Value;

use super::client::GraphqlClient;
use super::filters::ManufacturerFilter;
use crate::error::Result;

const LIST: &str = r"
query GetCountertopManufacturers($is_active: Boolean, $category_id: ID, $trashed: Trashed) {
    countertopManufacturers(is_active: $is_active, category_id: $category_id, trashed: $trashed) {
        id key category_id value slug description logo website phone email country
        is_active sort_order deleted_at
        category { id value slug }
    }
}";

const CREATE: &str = r"
mutation CreateCountertopManufacturer($input: CreateCountertopManufacturerInput!) {
    createCountertopManufacturer(input: $input) { id value slug }
}";

const UPDATE: &str = r"
mutation UpdateCountertopManufacturer($id: ID!, $input: UpdateCountertopManufacturerInput!) {
    updateCountertopManufacturer(id: $id, input: $input) { id value slug }
}";

const DELETE: &str = r"
mutation DeleteCountertopManufacturer($id: ID!) {
    deleteCountertopManufacturer(id: $id) { id }
}";

/// Countertop manufacturer operations, borrowed from a [`GraphqlClient`].
#[derive(Debug, Clone, Copy)]
pub struct Manufacturers<'a> {
    client: &'a GraphqlClient,
}

impl<'a> Manufacturers<'a> {
    pub(crate) const fn new(client: &'a GraphqlClient) -> Self {
        Self { client }
    }

    /// List manufacturers.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn list(&self, filter: &ManufacturerFilter) -> Result<Value> {
        self.client
            .execute_field(LIST, filter, "countertopManufacturers")
            .await
    }

    /// Create a manufacturer.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn create<I: Serialize + ?Sized>(&self, input: &I) -> Result<Value> {
        self.client
            .field_with_input(CREATE, input, "createCountertopManufacturer")
            .await
    }

    /// Update a manufacturer.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn update<I: Serialize + ?Sized>(&self, id: &str, input: &I) -> Result<Value> {
        self.client
            .field_with_id_input(UPDATE, id, input, "updateCountertopManufacturer")
            .await
    }

    /// Delete a manufacturer.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn delete(&self, id: &str) -> Result<Value> {
        self.client
            .field_by_id(DELETE, id, "deleteCountertopManufacturer")
            .await
    }
}
