//! Records that hang off a shop: its categories, brands and cities.
//!
//! These are hard-deleted; there is no list, get or restore.

use serde::Serialize;
use serde_json::Value;

use super::client::GraphqlClient;
use crate::error::Result;

/// Which shop sub-resource an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopResource {
    /// A shop's own category (`ShopCategory`).
    Category,
    /// A brand carried by a shop (`ShopBrand`).
    Brand,
    /// A city a shop operates in (`ShopCity`).
    City,
}

struct Documents {
    create: &'static str,
    create_field: &'static str,
    update: &'static str,
    update_field: &'static str,
    delete: &'static str,
    delete_field: &'static str,
}

const CATEGORY: Documents = Documents {
    create: r"
mutation CreateShopCategory($input: CreateShopCategoryInput!) {
    createShopCategory(input: $input) { id shop_id value slug is_active sort_order }
}",
    create_field: "createShopCategory",
    update: r"
mutation UpdateShopCategory($id: ID!, $input: UpdateShopCategoryInput!) {
    updateShopCategory(id: $id, input: $input) { id shop_id value slug is_active sort_order }
}",
    update_field: "updateShopCategory",
    delete: r"
mutation DeleteShopCategory($id: ID!) {
    deleteShopCategory(id: $id) { id }
}",
    delete_field: "deleteShopCategory",
};

const BRAND: Documents = Documents {
    create: r"
mutation CreateShopBrand($input: CreateShopBrandInput!) {
    createShopBrand(input: $input) { id shop_id value logo is_active sort_order }
}",
    create_field: "createShopBrand",
    update: r"
mutation UpdateShopBrand($id: ID!, $input: UpdateShopBrandInput!) {
    updateShopBrand(id: $id, input: $input) { id shop_id value logo is_active sort_order }
}",
    update_field: "updateShopBrand",
    delete: r"
mutation DeleteShopBrand($id: ID!) {
    deleteShopBrand(id: $id) { id }
}",
    delete_field: "deleteShopBrand",
};

const CITY: Documents = Documents {
    create: r"
mutation CreateShopCity($input: CreateShopCityInput!) {
    createShopCity(input: $input) { id shop_id city_name is_active sort_order }
}",
    create_field: "createShopCity",
    update: r"
mutation UpdateShopCity($id: ID!, $input: UpdateShopCityInput!) {
    updateShopCity(id: $id, input: $input) { id shop_id city_name is_active sort_order }
}",
    update_field: "updateShopCity",
    delete: r"
mutation DeleteShopCity($id: ID!) {
    deleteShopCity(id: $id) { id }
}",
    delete_field: "deleteShopCity",
};

impl ShopResource {
    const fn documents(self) -> &'static Documents {
        match self {
            Self::Category => &CATEGORY,
            Self::Brand => &BRAND,
            Self::City => &CITY,
        }
    }
}

/// Shop sub-resource mutations, borrowed from a [`GraphqlClient`].
#[derive(Debug, Clone, Copy)]
pub struct ShopResources<'a> {
    client: &'a GraphqlClient,
}

impl<'a> ShopResources<'a> {
    pub(crate) const fn new(client: &'a GraphqlClient) -> Self {
        Self { client }
    }

    /// Create a sub-resource. `input` carries the owning `shop_id`.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn create<I: Serialize + ?Sized>(&self, kind: ShopResource, input: &I) -> Result<Value> {
        let docs = kind.documents();
        self.client
            .field_with_input(docs.create, input, docs.create_field)
            .await
    }

    /// Update a sub-resource.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn update<I: Serialize + ?Sized>(
        &self,
        kind: ShopResource,
        id: &str,
        input: &I,
    ) -> Result<Value> {
        let docs = kind.documents();
        self.client
            .field_with_id_input(docs.update, id, input, docs.update_field)
            .await
    }

    /// Delete a sub-resource.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn delete(&self, kind: ShopResource, id: &str) -> Result<Value> {
        let docs = kind.documents();
        self.client
            .field_by_id(docs.delete, id, docs.delete_field)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_admin_core::TokenStore;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, body_string_contains, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn create_city_uses_city_document() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("CreateShopCityInput"))
            .and(body_partial_json(json!({
                "variables": {"input": {"shop_id": "5", "city_name": "Казань"}}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"createShopCity": {"id": "9", "shop_id": "5", "city_name": "Казань"}}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GraphqlClient::new(server.uri(), TokenStore::default());
        let city = client
            .shop_resources()
            .create(ShopResource::City, &json!({"shop_id": "5", "city_name": "Казань"}))
            .await
            .unwrap();
        assert_eq!(city["id"], "9");
    }

    #[tokio::test]
    async fn delete_brand_returns_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("deleteShopBrand"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"deleteShopBrand": {"id": "3"}}
            })))
            .mount(&server)
            .await;

        let client = GraphqlClient::new(server.uri(), TokenStore::default());
        let deleted = client
            .shop_resources()
            .delete(ShopResource::Brand, "3")
            .await
            .unwrap();
        assert_eq!(deleted, json!({"id": "3"}));
    }
}
