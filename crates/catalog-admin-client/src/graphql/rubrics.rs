//! Rubrics: the top level of the catalog tree.

use serde::Serialize;
use serde_json::Value;

use super::client::GraphqlClient;
use super::filters::ActivityFilter;
use crate::error::Result;

const LIST: &str = r"
query GetRubrics($is_active: Boolean, $trashed: Trashed) {
    rubrics(is_active: $is_active, trashed: $trashed) {
        id key value slug description is_active sort_order
        created_at updated_at deleted_at
    }
}";

const GET: &str = r"
query GetRubric($id: ID!) {
    rubric(id: $id) {
        id key value slug description is_active sort_order created_at updated_at
    }
}";

const BY_SLUG: &str = r"
query GetRubricBySlug($slug: String!) {
    rubricBySlug(slug: $slug) {
        id key value slug description is_active sort_order
    }
}";

const CREATE: &str = r"
mutation CreateRubric($input: CreateRubricInput!) {
    createRubric(input: $input) {
        id key value slug description is_active sort_order
    }
}";

const UPDATE: &str = r"
mutation UpdateRubric($id: ID!, $input: UpdateRubricInput!) {
    updateRubric(id: $id, input: $input) {
        id key value slug description is_active sort_order
    }
}";

const DELETE: &str = r"
mutation DeleteRubric($id: ID!) {
    deleteRubric(id: $id) { id }
}";

const RESTORE: &str = r"
mutation RestoreRubric($id: ID!) {
    restoreRubric(id: $id) { id is_active }
}";

#[derive(Serialize)]
struct SlugVars<'a> {
    slug: &'a str,
}

/// Rubric operations, borrowed from a [`GraphqlClient`].
#[derive(Debug, Clone, Copy)]
pub struct Rubrics<'a> {
    client: &'a GraphqlClient,
}

impl<'a> Rubrics<'a> {
    pub(crate) const fn new(client: &'a GraphqlClient) -> Self {
        Self { client }
    }

    /// List rubrics.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn list(&self, filter: &ActivityFilter) -> Result<Value> {
        self.client.execute_field(LIST, filter, "rubrics").await
    }

    /// Fetch one rubric; `Null` if it does not exist.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn get(&self, id: &str) -> Result<Value> {
        self.client.field_by_id(GET, id, "rubric").await
    }

    /// Fetch one rubric by slug; `Null` if it does not exist.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn by_slug(&self, slug: &str) -> Result<Value> {
        self.client
            .execute_field(BY_SLUG, &SlugVars { slug }, "rubricBySlug")
            .await
    }

    /// Create a rubric.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn create<I: Serialize + ?Sized>(&self, input: &I) -> Result<Value> {
        self.client.field_with_input(CREATE, input, "createRubric").await
    }

    /// Update a rubric.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn update<I: Serialize + ?Sized>(&self, id: &str, input: &I) -> Result<Value> {
        self.client
            .field_with_id_input(UPDATE, id, input, "updateRubric")
            .await
    }

    /// Soft-delete a rubric.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn delete(&self, id: &str) -> Result<Value> {
        self.client.field_by_id(DELETE, id, "deleteRubric").await
    }

    /// Restore a soft-deleted rubric.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphqlClient::execute_field`] errors.
    pub async fn restore(&self, id: &str) -> Result<Value> {
        self.client.field_by_id(RESTORE, id, "restoreRubric").await
    }
}
