//! Transport for the data API's single GraphQL endpoint.

use serde::Serialize;
use serde_json::Value;

use catalog_admin_core::TokenStore;

use super::{
    brands::Brands, categories::Categories, manufacturers::Manufacturers, products::Products,
    rubrics::Rubrics, shop_resources::ShopResources, shops::Shops,
};
use crate::error::{ClientError, Result};
use crate::http::json_headers;

/// Default endpoint for local development.
pub const DEFAULT_GRAPHQL_URL: &str = "http://localhost:8000/graphql";

const FALLBACK_ERROR: &str = "GraphQL Error";

#[derive(Serialize)]
struct GraphqlRequest<'a, V: ?Sized> {
    query: &'a str,
    variables: &'a V,
}

#[derive(Serialize)]
struct IdVars<'a> {
    id: &'a str,
}

#[derive(Serialize)]
struct InputVars<'a, I: ?Sized> {
    input: &'a I,
}

#[derive(Serialize)]
struct IdInputVars<'a, I: ?Sized> {
    id: &'a str,
    input: &'a I,
}

/// GraphQL client for the catalog data API.
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    client: reqwest::Client,
    endpoint: String,
    tokens: TokenStore,
}

impl GraphqlClient {
    /// Create a client for `endpoint`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, tokens: TokenStore) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint, tokens)
    }

    /// Create a client with a custom reqwest client.
    #[must_use]
    pub fn with_client(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        tokens: TokenStore,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            tokens,
        }
    }

    /// The endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run a query or mutation and return its `data` object unchanged.
    ///
    /// # Errors
    ///
    /// - [`ClientError::ServerUnavailable`] on a 5xx status
    /// - [`ClientError::Graphql`] when the response carries errors
    /// - [`ClientError::Parse`] when the body is not JSON
    pub async fn execute<V>(&self, query: &str, variables: &V) -> Result<Value>
    where
        V: Serialize + ?Sized,
    {
        let response = self
            .client
            .post(&self.endpoint)
            .headers(json_headers(&self.tokens, true)?)
            .json(&GraphqlRequest { query, variables })
            .send()
            .await?;

        let status = response.status();
        if status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "GraphQL server error");
            return Err(ClientError::ServerUnavailable {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        let mut body: Value =
            serde_json::from_slice(&bytes).map_err(|e| ClientError::Parse(e.to_string()))?;

        if let Some(errors) = body.get("errors").and_then(Value::as_array) {
            if !errors.is_empty() {
                let message = join_error_messages(errors);
                tracing::warn!(count = errors.len(), message = %message, "GraphQL errors");
                return Err(ClientError::Graphql {
                    message,
                    errors: errors.clone(),
                });
            }
        }

        Ok(body
            .as_object_mut()
            .and_then(|object| object.remove("data"))
            .unwrap_or(Value::Null))
    }

    /// Run a document and return one top-level field of `data`.
    ///
    /// A field that is present but `null` (e.g., an unknown id) is returned as
    /// [`Value::Null`].
    ///
    /// # Errors
    ///
    /// Same as [`execute`](Self::execute), plus [`ClientError::MissingField`]
    /// when `data` lacks the field.
    pub async fn execute_field<V>(&self, query: &str, variables: &V, field: &str) -> Result<Value>
    where
        V: Serialize + ?Sized,
    {
        let mut data = self.execute(query, variables).await?;

        data.as_object_mut()
            .and_then(|object| object.remove(field))
            .ok_or_else(|| ClientError::MissingField(field.to_string()))
    }

    pub(crate) async fn field_by_id(&self, query: &str, id: &str, field: &str) -> Result<Value> {
        self.execute_field(query, &IdVars { id }, field).await
    }

    pub(crate) async fn field_with_input<I>(&self, query: &str, input: &I, field: &str) -> Result<Value>
    where
        I: Serialize + ?Sized,
    {
        self.execute_field(query, &InputVars { input }, field).await
    }

    pub(crate) async fn field_with_id_input<I>(
        &self,
        query: &str,
        id: &str,
        input: &I,
        field: &str,
    ) -> Result<Value>
    where
        I: Serialize + ?Sized,
    {
        self.execute_field(query, &IdInputVars { id, input }, field)
            .await
    }

    /// Rubric queries and mutations.
    #[must_use]
    pub const fn rubrics(&self) -> Rubrics<'_> {
        Rubrics::new(self)
    }

    /// Category queries and mutations.
    #[must_use]
    pub const fn categories(&self) -> Categories<'_> {
        Categories::new(self)
    }

    /// Product (`mebelProjects`) queries and mutations.
    #[must_use]
    pub const fn products(&self) -> Products<'_> {
        Products::new(self)
    }

    /// Brand queries and mutations.
    #[must_use]
    pub const fn brands(&self) -> Brands<'_> {
        Brands::new(self)
    }

    /// Shop queries and mutations.
    #[must_use]
    pub const fn shops(&self) -> Shops<'_> {
        Shops::new(self)
    }

    /// Shop category, brand and city mutations.
    #[must_use]
    pub const fn shop_resources(&self) -> ShopResources<'_> {
        ShopResources::new(self)
    }

    /// Countertop manufacturer queries and mutations.
    #[must_use]
    pub const fn manufacturers(&self) -> Manufacturers<'_> {
        Manufacturers::new(self)
    }
}

fn join_error_messages(errors: &[Value]) -> String {
    let message = errors
        .iter()
        .map(|error| {
            ["message", "debugMessage"]
                .iter()
                .find_map(|key| error.get(*key).and_then(Value::as_str).filter(|m| !m.is_empty()))
                .map_or_else(|| error.to_string(), ToString::to_string)
        })
        .collect::<Vec<_>>()
        .join("; ");

    if message.is_empty() {
        FALLBACK_ERROR.to_string()
    } else {
        message
    }
}
