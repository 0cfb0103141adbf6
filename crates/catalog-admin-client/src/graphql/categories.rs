//! Categories, each owned by a rubric.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::client::GraphqlClient;
use super::filters::RubricScopedFilter;
use crate::error::Result;

const BY_RUBRIC_SLUG: &str = r"
query GetRubricWithCategories($slug: String!) {
    rubricBySlug(slug: $slug) {
        id value slug
        categories { id value slug description is_active sort_order }
    }
}";

const LIST: &str = r"
query GetCategories($is_active: Boolean, $trashed: Trashed, $rubric_id: ID) {
    categories(is_active: $is_active, trashed: $trashed, rubric_id: $rubric_id) {
        id value slug rubric_id description bg is_active sort_order
        created_at updated_at deleted_at
        rubric { id value slug }
    }
}";

const GET: &str = r"
query GetCategory($id: ID!) {
    category(id: $id) {
        id value slug rubric_id description bg is_active sort_order created_at updated_at
        rubric { id value slug }
    }
}";

const CREATE: &str = r"
mutation CreateCategory($input: CreateCategoryInput!) {
    createCategory(input: $input) {
        id value slug rubric_id description bg is_active sort_order
    }
}";

const UPDATE: &str = r"
mutation UpdateCategory($id: ID!, $input: UpdateCategoryInput!) {
    updateCategory(id: $id, input: $input) {
        id value slug rubric_id description bg is_active sort_order
    }
}";

const DELETE: &str = r"
mutation DeleteCategory($id: ID!) {
    deleteCategory(id: $id) { id }
}";

const RESTORE: &str = r"
mutation RestoreCategory($id: ID!) {
    restoreCategory(id: $id) { id is_active }
}";

#[derive(Serialize)]
struct SlugVars<'a> {
    slug: &'a str,
}

/// A rubric together with its categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricCategories {
    /// The rubric; `Null` when the slug is unknown.
    pub rubric: Value,
    /// Its categories; empty when the slug is unknown.
    pub categories: Vec<Value>,
}

/// Category operations, borrowed from a [`GraphqlClient`].
#[derive(Debug, Clone, Copy)]
pub struct Categories<'a> {
    client: &'a GraphqlClient,
}

impl<'a> Categories<'a> {
    pub(crate) const fn new(client: &'a GraphqlClient) -> Self {
        Self { client }
    }

    /// Fetch a rubric by slug with its categories.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn by_rubric_slug(&self, rubric_slug: &str) -> Result<RubricCategories> {
        let rubric = self
            .client
            .execute_field(BY_RUBRIC_SLUG, &SlugVars { slug: rubric_slug }, "rubricBySlug")
            .await?;

        let categories = rubric
            .get("categories")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        Ok(RubricCategories { rubric, categories })
    }

    /// List categories.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn list(&self, filter: &RubricScopedFilter) -> Result<Value> {
        self.client.execute_field(LIST, filter, "categories").await
    }

    /// Fetch one category; `Null` if it does not exist.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn get(&self, id: &str) -> Result<Value> {
        self.client.field_by_id(GET, id, "category").await
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn create<I: Serialize + ?Sized>(&self, input: &I) -> Result<Value> {
        self.client
            .field_with_input(CREATE, input, "createCategory")
            .await
    }

    /// Update a category.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn update<I: Serialize + ?Sized>(&self, id: &str, input: &I) -> Result<Value> {
        self.client
            .field_with_id_input(UPDATE, id, input, "updateCategory")
            .await
    }

    /// Soft-delete a category.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn delete(&self, id: &str) -> Result<Value> {
        self.client.field_by_id(DELETE, id, "deleteCategory").await
    }

    /// Restore a soft-deleted category.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn restore(&self, id: &str) -> Result<Value> {
        self.client.field_by_id(RESTORE, id, "restoreCategory").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_admin_core::TokenStore;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn respond_with(data: Value) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"variables": {"slug": "kitchens"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": data})))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn by_rubric_slug_returns_rubric_and_categories() {
        let server = respond_with(json!({
            "rubricBySlug": {
                "id": "1",
                "slug": "kitchens",
                "categories": [{"id": "10"}, {"id": "11"}]
            }
        }))
        .await;

        let client = GraphqlClient::new(server.uri(), TokenStore::default());
        let result = client.categories().by_rubric_slug("kitchens").await.unwrap();

        assert_eq!(result.rubric["slug"], "kitchens");
        assert_eq!(result.categories.len(), 2);
        assert_eq!(result.categories[1]["id"], "11");
    }

    #[tokio::test]
    async fn unknown_rubric_slug_yields_empty_categories() {
        let server = respond_with(json!({"rubricBySlug": null})).await;

        let client = GraphqlClient::new(server.uri(), TokenStore::default());
        let result = client.categories().by_rubric_slug("kitchens").await.unwrap();

        assert!(result.rubric.is_null());
        assert!(result.categories.is_empty());
    }
}
