use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, ErrorBody, Result};
use nursecall_core::{Resource, ResourceKind, validate_id};

/// Default per-request timeout; no command should be able to hang forever on
/// a stalled backend.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Authenticated HTTP client for the nursecall REST backend.
///
/// The bearer token is injected at construction and attached to every
/// request; call sites never read it from ambient storage. Endpoints follow
/// the backend's conventions exactly: `<base>/<collection>/` for lists and
/// `<base>/<collection>/<id>/` for single records, trailing slash included.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url,
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, kind: ResourceKind) -> String {
        format!("{}/{}/", self.base_url, kind.collection())
    }

    fn record_url(&self, kind: ResourceKind, id: &str) -> Result<String> {
        validate_id(id)?;
        Ok(format!("{}/{}/{}/", self.base_url, kind.collection(), id))
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        let mut req = self.http.request(method, url);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        req.header("Accept", "application/json")
    }

    /// `GET <base>/<collection>/` — returns the records of the collection,
    /// accepting both the bare-array and `{"results": [...]}` body shapes.
    pub async fn list(&self, kind: ResourceKind) -> Result<Vec<Value>> {
        let url = self.collection_url(kind);
        let resp = self.request(reqwest::Method::GET, &url).send().await?;
        let body = handle_response(resp, kind, None).await?;
        extract_records(body)
    }

    /// `GET <base>/<collection>/<id>/`
    pub async fn get(&self, kind: ResourceKind, id: &str) -> Result<Value> {
        let url = self.record_url(kind, id)?;
        let resp = self.request(reqwest::Method::GET, &url).send().await?;
        handle_response(resp, kind, Some(id)).await
    }

    /// `POST <base>/<collection>/`
    pub async fn create(&self, kind: ResourceKind, body: &Value) -> Result<Value> {
        let url = self.collection_url(kind);
        let resp = self
            .request(reqwest::Method::POST, &url)
            .json(body)
            .send()
            .await?;
        handle_response(resp, kind, None).await
    }

    /// `PUT <base>/<collection>/<id>/`
    pub async fn update(&self, kind: ResourceKind, id: &str, body: &Value) -> Result<Value> {
        let url = self.record_url(kind, id)?;
        let resp = self
            .request(reqwest::Method::PUT, &url)
            .json(body)
            .send()
            .await?;
        handle_response(resp, kind, Some(id)).await
    }

    /// `PATCH <base>/<collection>/<id>/`
    pub async fn patch(&self, kind: ResourceKind, id: &str, body: &Value) -> Result<Value> {
        let url = self.record_url(kind, id)?;
        let resp = self
            .request(reqwest::Method::PATCH, &url)
            .json(body)
            .send()
            .await?;
        handle_response(resp, kind, Some(id)).await
    }

    /// `DELETE <base>/<collection>/<id>/`
    pub async fn delete(&self, kind: ResourceKind, id: &str) -> Result<()> {
        let url = self.record_url(kind, id)?;
        let resp = self.request(reqwest::Method::DELETE, &url).send().await?;
        handle_response(resp, kind, Some(id)).await?;
        Ok(())
    }

    /// Typed list fetch.
    pub async fn list_as<T>(&self) -> Result<Vec<T>>
    where
        T: Resource + DeserializeOwned,
    {
        let records = self.list(T::KIND).await?;
        records
            .into_iter()
            .map(|record| serde_json::from_value(record).map_err(ApiError::from))
            .collect()
    }

    /// Typed single-record fetch.
    pub async fn get_as<T>(&self, id: &str) -> Result<T>
    where
        T: Resource + DeserializeOwned,
    {
        let record = self.get(T::KIND, id).await?;
        Ok(serde_json::from_value(record)?)
    }
}

async fn handle_response(
    resp: reqwest::Response,
    kind: ResourceKind,
    id: Option<&str>,
) -> Result<Value> {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();

    if status.is_success() {
        if body.is_empty() {
            return Ok(Value::Null);
        }
        return Ok(serde_json::from_str(&body)?);
    }

    match status.as_u16() {
        401 => Err(ApiError::Unauthorized),
        404 => Err(ApiError::NotFound {
            kind,
            id: id.unwrap_or("?").to_string(),
        }),
        400 => Err(ApiError::Validation {
            body: ErrorBody::parse(&body),
        }),
        code => {
            let parsed = ErrorBody::parse(&body);
            let message = if parsed.is_empty() && !body.is_empty() {
                body
            } else {
                parsed.display_message()
            };
            Err(ApiError::Unexpected {
                status: code,
                message,
            })
        }
    }
}

/// Accept both list body shapes the backend has been seen to produce.
fn extract_records(body: Value) -> Result<Vec<Value>> {
    match body {
        Value::Array(records) => Ok(records),
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(records)) => Ok(records),
            _ => Err(ApiError::UnexpectedBody(
                "expected an array or {\"results\": [...]}".to_string(),
            )),
        },
        other => Err(ApiError::UnexpectedBody(format!(
            "expected an array, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_urls_keep_trailing_slashes() {
        let client = ApiClient::new("http://localhost:5000/api/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000/api");
        assert_eq!(
            client.collection_url(ResourceKind::StaffTeam),
            "http://localhost:5000/api/staff-teams/"
        );
        assert_eq!(
            client.record_url(ResourceKind::Bed, "bed-1").unwrap(),
            "http://localhost:5000/api/beds/bed-1/"
        );
    }

    #[test]
    fn test_record_url_rejects_path_injection() {
        let client = ApiClient::new("http://localhost:5000/api").unwrap();
        assert!(client.record_url(ResourceKind::Bed, "../admin").is_err());
        assert!(client.record_url(ResourceKind::Bed, "").is_err());
    }

    #[test]
    fn test_extract_records_bare_array() {
        let records = extract_records(json!([{"id": "a"}, {"id": "b"}])).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_extract_records_results_wrapper() {
        let records = extract_records(json!({"results": [{"id": "a"}], "count": 1})).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["id"], "a");
    }

    #[test]
    fn test_extract_records_rejects_other_shapes() {
        assert!(extract_records(json!({"items": []})).is_err());
        assert!(extract_records(json!("nope")).is_err());
    }
}
