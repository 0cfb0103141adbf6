//! Brands, scoped to a rubric.

use serde::Serialize;
use serde_json::Value;

use super::client::GraphqlClient;
use super::filters::RubricScopedFilter;
use crate::error::Result;

const LIST: &str = r"
query GetBrands($is_active: Boolean, $trashed: Trashed, $rubric_id: ID) {
    brands(is_active: $is_active, trashed: $trashed, rubric_id: $rubric_id) {
        id key value slug rubric_id description logo country website is_active sort_order
        created_at updated_at deleted_at
        rubric { id value slug }
    }
}";

const GET: &str = r"
query GetBrand($id: ID!) {
    brand(id: $id) {
        id key value slug rubric_id description logo country website is_active sort_order
        created_at updated_at
        rubric { id value slug }
    }
}";

const CREATE: &str = r"
mutation CreateBrand($input: CreateBrandInput!) {
    createBrand(input: $input) {
        id key value slug rubric_id description logo country website is_active sort_order
    }
}";

const UPDATE: &str = r"
mutation UpdateBrand($id: ID!, $input: UpdateBrandInput!) {
    updateBrand(id: $id, input: $input) {
        id key value slug rubric_id description logo country website is_active sort_order
    }
}";

const DELETE: &str = r"
mutation DeleteBrand($id: ID!) {
    deleteBrand(id: $id) { id }
}";

const RESTORE: &str = r"
mutation RestoreBrand($id: ID!) {
    restoreBrand(id: $id) { id is_active }
}";

/// Brand operations, borrowed from a [`GraphqlClient`].
#[derive(Debug, Clone, Copy)]
pub struct Brands<'a> {
    client: &'a GraphqlClient,
}

impl<'a> Brands<'a> {
    pub(crate) const fn new(client: &'a GraphqlClient) -> Self {
        Self { client }
    }

    /// List brands.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn list(&self, filter: &RubricScopedFilter) -> Result<Value> {
        self.client.execute_field(LIST, filter, "brands").await
    }

    /// Fetch one brand; `Null` if it does not exist.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn get(&self, id: &str) -> Result<Value> {
        self.client.field_by_id(GET, id, "brand").await
    }

    /// Create a brand.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn create<I: Serialize + ?Sized>(&self, input: &I) -> Result<Value> {
        self.client.field_with_input(CREATE, input, "createBrand").await
    }

    /// Update a brand.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn update<I: Serialize + ?Sized>(&self, id: &str, input: &I) -> Result<Value> {
        self.client
            .field_with_id_input(UPDATE, id, input, "updateBrand")
            .await
    }

    /// Soft-delete a brand.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn delete(&self, id: &str) -> Result<Value> {
        self.client.field_by_id(DELETE, id, "deleteBrand").await
    }

    /// Restore a soft-deleted brand.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn restore(&self, id: &str) -> Result<Value> {
        self.client.field_by_id(RESTORE, id, "restoreBrand").await
    }
}
