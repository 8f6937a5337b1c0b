//! Fluent request construction.
//!
//! A [`QueryBuilder`] is pure until one of the executors runs it: filters,
//! ordering, and pagination only accumulate state. Executors await the
//! transport, enforce cardinality, and decode into the requested projection.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tastelog_core::{Error, Result};

use crate::client::Client;
use crate::error;

/// Media type asking PostgREST for exactly one object instead of an array.
const ACCEPT_SINGLE: &str = "application/vnd.pgrst.object+json";

pub struct QueryBuilder<'c> {
    client: &'c Client,
    url: String,
    method: Method,
    query: Vec<(String, String)>,
    prefer: Vec<&'static str>,
    range: Option<(i64, i64)>,
    /// Accept header override; set by [`Self::single`] and [`Self::csv`].
    accept: Option<&'static str>,
    body: Option<serde_json::Value>,
    /// Set when a request body failed to serialize; surfaced at execution.
    body_error: Option<String>,
}

impl<'c> QueryBuilder<'c> {
    pub(crate) fn table(client: &'c Client, table: &str) -> Self {
        Self::new(client, format!("{}/rest/v1/{table}", client.base_url))
    }

    pub(crate) fn rpc<P: Serialize>(client: &'c Client, function: &str, params: &P) -> Self {
        let mut builder = Self::new(
            client,
            format!("{}/rest/v1/rpc/{function}", client.base_url),
        );
        builder.method = Method::POST;
        builder.set_body(params);
        builder
    }

    fn new(client: &'c Client, url: String) -> Self {
        Self {
            client,
            url,
            method: Method::GET,
            query: Vec::new(),
            prefer: Vec::new(),
            range: None,
            accept: None,
            body: None,
            body_error: None,
        }
    }

    fn set_body<P: Serialize>(&mut self, body: &P) {
        match serde_json::to_value(body) {
            Ok(value) => self.body = Some(value),
            Err(err) => self.body_error = Some(err.to_string()),
        }
    }

    // ---- selection ----

    /// Apply a compiled selection expression.
    pub fn select(mut self, selection: impl Into<String>) -> Self {
        self.query.push(("select".into(), selection.into()));
        self
    }

    // ---- filters ----

    fn filter(mut self, column: &str, op: &str, value: impl ToString) -> Self {
        self.query
            .push((column.into(), format!("{op}.{}", value.to_string())));
        self
    }

    pub fn eq(self, column: &str, value: impl ToString) -> Self {
        self.filter(column, "eq", value)
    }

    pub fn neq(self, column: &str, value: impl ToString) -> Self {
        self.filter(column, "neq", value)
    }

    pub fn gt(self, column: &str, value: impl ToString) -> Self {
        self.filter(column, "gt", value)
    }

    pub fn gte(self, column: &str, value: impl ToString) -> Self {
        self.filter(column, "gte", value)
    }

    pub fn lt(self, column: &str, value: impl ToString) -> Self {
        self.filter(column, "lt", value)
    }

    pub fn lte(self, column: &str, value: impl ToString) -> Self {
        self.filter(column, "lte", value)
    }

    pub fn in_<T: ToString>(mut self, column: &str, values: &[T]) -> Self {
        let list = values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.query.push((column.into(), format!("in.({list})")));
        self
    }

    /// Case-insensitive pattern match; the caller supplies `%` wildcards.
    pub fn ilike(self, column: &str, pattern: impl ToString) -> Self {
        self.filter(column, "ilike", pattern)
    }

    pub fn is_null(mut self, column: &str) -> Self {
        self.query.push((column.into(), "is.null".into()));
        self
    }

    /// Disjunction over raw filter expressions, e.g.
    /// `or("user_id_1.eq.X,user_id_2.eq.X")`.
    pub fn or(mut self, expression: impl Into<String>) -> Self {
        self.query.push(("or".into(), format!("({})", expression.into())));
        self
    }

    // ---- ordering, cardinality, pagination ----

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.query.push(("order".into(), format!("{column}.{direction}")));
        self
    }

    pub fn limit(mut self, count: i64) -> Self {
        self.query.push(("limit".into(), count.to_string()));
        self
    }

    /// Inclusive zero-based row range, sent as the `Range` request header.
    pub fn range(mut self, from: i64, to: i64) -> Self {
        self.range = Some((from, to));
        self
    }

    /// Request exactly one row; zero rows decode to
    /// [`Error::NotFound`], more than one is a backend error.
    pub fn single(mut self) -> Self {
        self.accept = Some(ACCEPT_SINGLE);
        self
    }

    /// Request the raw CSV rendition of the result set.
    pub fn csv(mut self) -> Self {
        self.accept = Some("text/csv");
        self
    }

    // ---- mutations ----

    /// Insert `body`, returning the stored representation so a follow-up
    /// `select` can shape the response.
    pub fn insert<P: Serialize>(mut self, body: &P) -> Self {
        self.method = Method::POST;
        self.prefer.push("return=representation");
        self.set_body(body);
        self
    }

    pub fn update<P: Serialize>(mut self, body: &P) -> Self {
        self.method = Method::PATCH;
        self.prefer.push("return=representation");
        self.set_body(body);
        self
    }

    pub fn delete(mut self) -> Self {
        self.method = Method::DELETE;
        self
    }

    // ---- execution ----

    fn build(self) -> Result<(&'c Client, reqwest::RequestBuilder)> {
        if let Some(message) = self.body_error {
            return Err(Error::Decode(format!(
                "request body failed to serialize: {message}"
            )));
        }

        let mut request = self
            .client
            .http
            .request(self.method, &self.url)
            .query(&self.query);

        if let Some((from, to)) = self.range {
            request = request
                .header("Range-Unit", "items")
                .header("Range", format!("{from}-{to}"));
        }
        if let Some(accept) = self.accept {
            request = request.header("Accept", accept);
        }
        if !self.prefer.is_empty() {
            request = request.header("Prefer", self.prefer.join(","));
        }
        if let Some(body) = self.body {
            request = request.json(&body);
        }

        tracing::debug!(url = %self.url, "dispatching backend request");
        Ok((self.client, request))
    }

    /// Execute and decode a list of rows.
    pub async fn fetch_all<T: DeserializeOwned>(self) -> Result<Vec<T>> {
        let (client, request) = self.build()?;
        let response = client.send(request).await?;
        response
            .json::<Vec<T>>()
            .await
            .map_err(error::classify_request_error)
    }

    /// Execute a single-object read and decode it. Forces `single()`.
    pub async fn fetch_one<T: DeserializeOwned>(self) -> Result<T> {
        let (client, request) = self.single().build()?;
        let response = client.send(request).await?;
        response
            .json::<T>()
            .await
            .map_err(error::classify_request_error)
    }

    /// Execute an RPC returning a scalar. The backend serves scalars as a
    /// plain JSON value, so the single-object media type must not be sent.
    pub async fn fetch_scalar<T: DeserializeOwned>(self) -> Result<T> {
        let (client, request) = self.build()?;
        let response = client.send(request).await?;
        response
            .json::<T>()
            .await
            .map_err(error::classify_request_error)
    }

    /// Like [`Self::fetch_one`] but maps a zero-row result to `None`.
    pub async fn fetch_optional<T: DeserializeOwned>(self) -> Result<Option<T>> {
        match self.fetch_one().await {
            Ok(value) => Ok(Some(value)),
            Err(Error::NotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Execute and return the raw response body (CSV exports).
    pub async fn fetch_text(self) -> Result<String> {
        let (client, request) = self.build()?;
        let response = client.send(request).await?;
        response.text().await.map_err(error::classify_request_error)
    }

    /// Execute for side effects only.
    pub async fn execute(self) -> Result<()> {
        let (client, request) = self.build()?;
        client.send(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::*;
    use crate::config::ClientConfig;

    fn client() -> Client {
        Client::new(ClientConfig::new("https://example.test", "anon"))
    }

    fn built(builder: QueryBuilder<'_>) -> reqwest::Request {
        let (_, request) = builder.build().unwrap();
        request.build().unwrap()
    }

    #[test]
    fn filters_become_query_parameters() {
        let client = client();
        let request = built(
            client
                .from("check_ins")
                .select("id, rating")
                .eq("product_id", 42)
                .gte("rating", 3)
                .order("check_in_at", false),
        );

        let url = request.url().as_str();
        assert!(url.starts_with("https://example.test/rest/v1/check_ins?"));
        assert!(url.contains("select=id%2C+rating") || url.contains("select=id,+rating"));
        assert!(url.contains("product_id=eq.42"));
        assert!(url.contains("rating=gte.3"));
        assert!(url.contains("order=check_in_at.desc"));
    }

    #[test]
    fn in_and_or_filters() {
        let client = client();
        let request = built(
            client
                .from("flavors")
                .in_("id", &[1, 7])
                .or("user_id_1.eq.a,user_id_2.eq.a"),
        );
        let query = request.url().query().unwrap_or_default();
        assert!(query.contains("id=in.%281%2C7%29"));
        assert!(query.contains("or=%28user_id_1.eq.a%2Cuser_id_2.eq.a%29"));
    }

    #[test]
    fn range_is_sent_as_a_header() {
        let client = client();
        let request = built(client.from("check_ins").range(0, 9));
        assert_eq!(request.headers()["Range"], "0-9");
        assert_eq!(request.headers()["Range-Unit"], "items");
    }

    #[test]
    fn single_requests_the_object_media_type() {
        let client = client();
        let request = built(client.from("profiles").single());
        assert_eq!(
            request.headers()["Accept"],
            "application/vnd.pgrst.object+json"
        );
    }

    #[test]
    fn csv_overrides_the_accept_header() {
        let client = client();
        let request = built(client.rpc("fnc__export_data", &serde_json::json!({})).csv());
        assert_eq!(request.headers()["Accept"], "text/csv");
    }

    #[test]
    fn insert_posts_with_representation_returning() {
        #[derive(Serialize)]
        struct NewFlavor<'a> {
            name: &'a str,
        }

        let client = client();
        let request = built(client.from("flavors").insert(&NewFlavor { name: "smoky" }));
        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.headers()["Prefer"], "return=representation");
        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(body, br#"{"name":"smoky"}"#);
    }

    #[test]
    fn rpc_posts_to_the_function_path() {
        #[derive(Serialize)]
        struct Params {
            p_check_in_id: i64,
        }

        let client = client();
        let request = built(client.rpc("fnc__delete_check_in_as_moderator", &Params {
            p_check_in_id: 7,
        }));
        assert_eq!(request.method(), &Method::POST);
        assert_eq!(
            request.url().path(),
            "/rest/v1/rpc/fnc__delete_check_in_as_moderator"
        );
        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(body, br#"{"p_check_in_id":7}"#);
    }

    #[test]
    fn delete_uses_the_delete_method() {
        let client = client();
        let request = built(client.from("check_ins").delete().eq("id", 3));
        assert_eq!(request.method(), &Method::DELETE);
        assert!(request.url().query().unwrap_or_default().contains("id=eq.3"));
    }
}
