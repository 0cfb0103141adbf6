//! Products. The backend calls them "mebel projects".

use serde::Serialize;
use serde_json::Value;

use super::client::GraphqlClient;
use super::filters::ProductFilter;
use crate::error::Result;

const LIST: &str = r"
query GetMebelProjects($is_active: Boolean, $trashed: Trashed, $category_id: ID, $is_featured: Boolean, $is_new: Boolean) {
    mebelProjects(is_active: $is_active, trashed: $trashed, category_id: $category_id, is_featured: $is_featured, is_new: $is_new) {
        id key category_id value slug description short_description price old_price meta
        is_active is_featured is_new sort_order created_at updated_at deleted_at
        category {
            id value slug
            rubric { id value slug }
        }
    }
}";

const GET: &str = r"
query GetMebelProject($id: ID!) {
    mebelProject(id: $id) {
        id key category_id value slug description short_description price old_price meta
        is_active is_featured is_new sort_order created_at updated_at
        category { id value slug }
    }
}";

const CREATE: &str = r"
mutation CreateMebelProject($input: CreateMebelProjectInput!) {
    createMebelProject(input: $input) {
        id key category_id value slug description short_description price old_price meta
        is_active is_featured is_new sort_order
    }
}";

const UPDATE: &str = r"
mutation UpdateMebelProject($id: ID!, $input: UpdateMebelProjectInput!) {
    updateMebelProject(id: $id, input: $input) {
        id key category_id value slug description short_description price old_price meta
        is_active is_featured is_new sort_order
    }
}";

const DELETE: &str = r"
mutation DeleteMebelProject($id: ID!) {
    deleteMebelProject(id: $id) { id }
}";

const RESTORE: &str = r"
mutation RestoreMebelProject($id: ID!) {
    restoreMebelProject(id: $id) { id is_active }
}";

/// Product operations, borrowed from a [`GraphqlClient`].
#[derive(Debug, Clone, Copy)]
pub struct Products<'a> {
    client: &'a GraphqlClient,
}

impl<'a> Products<'a> {
    pub(crate) const fn new(client: &'a GraphqlClient) -> Self {
        Self { client }
    }

    /// List products.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn list(&self, filter: &ProductFilter) -> Result<Value> {
        self.client.execute_field(LIST, filter, "mebelProjects").await
    }

    /// Fetch one product; `Null` if it does not exist.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn get(&self, id: &str) -> Result<Value> {
        self.client.field_by_id(GET, id, "mebelProject").await
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn create<I: Serialize + ?Sized>(&self, input: &I) -> Result<Value> {
        self.client
            .field_with_input(CREATE, input, "createMebelProject")
            .await
    }

    /// Update a product.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn update<I: Serialize + ?Sized>(&self, id: &str, input: &I) -> Result<Value> {
        self.client
            .field_with_id_input(UPDATE, id, input, "updateMebelProject")
            .await
    }

    /// Soft-delete a product.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn delete(&self, id: &str) -> Result<Value> {
        self.client.field_by_id(DELETE, id, "deleteMebelProject").await
    }

    /// Restore a soft-deleted product.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn restore(&self, id: &str) -> Result<Value> {
        self.client
            .field_by_id(RESTORE, id, "restoreMebelProject")
            .await
    }
}
