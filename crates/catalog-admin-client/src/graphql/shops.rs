//! Shops, with their categories, brands and cities.

use serde::Serialize;
use serde_json::Value;

use super::client::GraphqlClient;
use super::filters::RubricScopedFilter;
use crate::error::Result;

const LIST: &str = r"
query GetShops($is_active: Boolean, $trashed: Trashed, $rubric_id: ID) {
    shops(is_active: $is_active, trashed: $trashed, rubric_id: $rubric_id) {
        id key value slug rubric_id description logo website phone email is_active sort_order
        created_at updated_at deleted_at
        rubric { id value slug }
        categories { id value slug is_active sort_order }
        brands { id value logo is_active sort_order }
        cities { id city_name is_active sort_order }
    }
}";

const GET: &str = r"
query GetShop($id: ID!) {
    shop(id: $id) {
        id key value slug rubric_id description logo website phone email is_active sort_order
        created_at updated_at
        rubric { id value slug }
        categories { id value slug is_active sort_order }
        brands { id value logo is_active sort_order }
        cities { id city_name is_active sort_order }
    }
}";

const CREATE: &str = r"
mutation CreateShop($input: CreateShopInput!) {
    createShop(input: $input) {
        id key value slug rubric_id description logo website phone email is_active sort_order
    }
}";

const UPDATE: &str = r"
mutation UpdateShop($id: ID!, $input: UpdateShopInput!) {
    updateShop(id: $id, input: $input) {
        id key value slug rubric_id description logo website phone email is_active sort_order
    }
}";

const DELETE: &str = r"
mutation DeleteShop($id: ID!) {
    deleteShop(id: $id) { id }
}";

const RESTORE: &str = r"
mutation RestoreShop($id: ID!) {
    restoreShop(id: $id) { id is_active }
}";

/// Shop operations, borrowed from a [`GraphqlClient`].
#[derive(Debug, Clone, Copy)]
pub struct Shops<'a> {
    client: &'a GraphqlClient,
}

impl<'a> Shops<'a> {
    pub(crate) const fn new(client: &'a GraphqlClient) -> Self {
        Self { client }
    }

    /// List shops.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn list(&self, filter: &RubricScopedFilter) -> Result<Value> {
        self.client.execute_field(LIST, filter, "shops").await
    }

    /// Fetch one shop; `Null` if it does not exist.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn get(&self, id: &str) -> Result<Value> {
        self.client.field_by_id(GET, id, "shop").await
    }

    /// Create a shop.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn create<I: Serialize + ?Sized>(&self, input: &I) -> Result<Value> {
        self.client.field_with_input(CREATE, input, "createShop").await
    }

    /// Update a shop.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn update<I: Serialize + ?Sized>(&self, id: &str, input: &I) -> Result<Value> {
        self.client
            .field_with_id_input(UPDATE, id, input, "updateShop")
            .await
    }

    /// Soft-delete a shop.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn delete(&self, id: &str) -> Result<Value> {
        self.client.field_by_id(DELETE, id, "deleteShop").await
    }

    /// Restore a soft-deleted shop.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn restore(&self, id: &str) -> Result<Value> {
        self.client.field_by_id(RESTORE, id, "restoreShop").await
    }
}
