//! IPAM API client
//!
//! One method per remote operation. The client forwards exactly what it is
//! given: defaults and input validation belong to the command layer.

mod time;
mod types;

pub use time::ApiTime;
pub use types::*;

use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Method;
use serde::de::{self, Unexpected};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::{ApiError, Error, Result};

/// Base URL used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Overall per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Header carrying the caller's idempotency key on mutating requests
pub const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";

/// IPAM API client
///
/// Holds only immutable configuration; cloning is cheap and shares the
/// underlying connection pool.
#[derive(Debug, Clone)]
pub struct IpamClient {
    base_url: String,
    idempotency_key: Option<String>,
    http: reqwest::Client,
}

impl IpamClient {
    /// Create a client for `base_url`. An empty idempotency key counts as unset.
    pub fn new(base_url: &str, idempotency_key: Option<&str>) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(DEFAULT_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url,
            idempotency_key: idempotency_key
                .filter(|k| !k.is_empty())
                .map(String::from),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn idempotency_key(&self) -> Option<&str> {
        self.idempotency_key.as_deref()
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Create a tenant
    pub async fn create_tenant(&self, name: &str) -> Result<Tenant> {
        self.post("/v1/tenants", &CreateTenantParams { name }).await
    }

    /// Create a VRF under a tenant. `rd` is left out of the request when
    /// absent or empty.
    pub async fn create_vrf(&self, tenant_id: &str, name: &str, rd: Option<&str>) -> Result<Vrf> {
        let params = CreateVrfParams {
            tenant_id,
            name,
            rd: rd.filter(|rd| !rd.is_empty()),
        };
        self.post("/v1/vrfs", &params).await
    }

    /// Create a root prefix inside a VRF
    pub async fn create_prefix(
        &self,
        vrf_id: &str,
        cidr: &str,
        status: PrefixStatus,
        description: &str,
    ) -> Result<Prefix> {
        let params = CreatePrefixParams {
            vrf_id,
            cidr,
            status,
            description,
        };
        self.post("/v1/prefixes", &params).await
    }

    /// Carve `count` child prefixes of length `mask` out of a parent prefix.
    ///
    /// Children are returned in server order; their number is not checked
    /// against `count`.
    pub async fn carve_children(&self, prefix_id: &str, mask: u32, count: u32) -> Result<Vec<Prefix>> {
        let params = CarveChildrenParams {
            mask,
            count,
            strategy: CARVE_STRATEGY,
        };
        self.post(&format!("/v1/prefixes/{}/children", prefix_id), &params)
            .await
    }

    /// Allocate the next free address inside a prefix
    pub async fn next_ip(&self, prefix_id: &str) -> Result<AllocatedIp> {
        self.request::<_, ()>(
            Method::POST,
            &format!("/v1/prefixes/{}/ips/next", prefix_id),
            None,
        )
        .await
    }

    /// Fetch a single prefix
    pub async fn get_prefix(&self, prefix_id: &str) -> Result<Prefix> {
        self.get(&format!("/v1/prefixes/{}", prefix_id)).await
    }

    /// List the unallocated blocks of length `mask` inside a prefix
    pub async fn free_space(&self, prefix_id: &str, mask: u32) -> Result<Vec<FreeSpace>> {
        self.get(&format!("/v1/prefixes/{}/free-space?mask={}", prefix_id, mask))
            .await
    }

    /// Probe service liveness
    pub async fn health(&self) -> Result<Health> {
        self.get("/healthz").await
    }

    // =========================================================================
    // Transport
    // =========================================================================

    async fn get<T: ApiResponse>(&self, path: &str) -> Result<T> {
        self.request::<_, ()>(Method::GET, path, None).await
    }

    async fn post<T: ApiResponse, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        self.request(Method::POST, path, Some(body)).await
    }

    async fn request<T: ApiResponse, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let url = Url::parse(&format!("{}{}", self.base_url, path))?;
        debug!("{} {}", method, url);

        let mut request = self.http.request(method.clone(), url);

        if let Some(body) = body {
            request = request.json(body);
        }

        if is_mutating(&method) {
            if let Some(key) = &self.idempotency_key {
                request = request.header(IDEMPOTENCY_HEADER, key);
            }
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!("{} {} -> {} ({} bytes)", method, path, status.as_u16(), bytes.len());

        if status.is_success() {
            decode_body(method.as_str(), path, &bytes)
        } else {
            Err(normalize_error(method.as_str(), path, status.as_u16(), &bytes))
        }
    }
}

fn is_mutating(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

/// Decode a 2xx body. An empty body yields the zero value; anything else must
/// match the expected shape, objects for records and arrays of objects for lists.
fn decode_body<T: ApiResponse>(method: &str, path: &str, bytes: &[u8]) -> Result<T> {
    if bytes.is_empty() {
        return Ok(T::default());
    }
    let decode_err = |source: serde_json::Error| Error::Decode {
        method: method.to_string(),
        path: path.to_string(),
        source,
        body: String::from_utf8_lossy(bytes).into_owned(),
    };

    let value: Value = serde_json::from_slice(bytes).map_err(decode_err)?;
    check_shape::<T>(&value).map_err(decode_err)?;
    serde_json::from_value(value).map_err(decode_err)
}

// Derived struct decoding also accepts positional arrays; reject them up front.
fn check_shape<T: ApiResponse>(value: &Value) -> std::result::Result<(), serde_json::Error> {
    match value {
        Value::Array(items) if T::LIST => items.iter().try_for_each(expect_object),
        _ if T::LIST => Err(invalid_type(value, "a JSON array")),
        _ => expect_object(value),
    }
}

fn expect_object(value: &Value) -> std::result::Result<(), serde_json::Error> {
    if value.is_object() {
        Ok(())
    } else {
        Err(invalid_type(value, "a JSON object"))
    }
}

fn invalid_type(value: &Value, expected: &str) -> serde_json::Error {
    let unexpected = match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    };
    <serde_json::Error as de::Error>::invalid_type(unexpected, &expected)
}

/// Turn a non-2xx response into a structured API error when the body allows
/// it, otherwise into an HTTP error carrying the raw body.
fn normalize_error(method: &str, path: &str, status: u16, bytes: &[u8]) -> Error {
    match parse_api_error(bytes) {
        Some(mut err) => {
            err.status = status;
            Error::Api(err)
        }
        None => Error::Http {
            method: method.to_string(),
            path: path.to_string(),
            status,
            body: String::from_utf8_lossy(bytes).into_owned(),
        },
    }
}

fn parse_api_error(bytes: &[u8]) -> Option<ApiError> {
    let value: Value = serde_json::from_slice(bytes).ok()?;

    // Framework-raised errors nest the payload under `detail`
    structured_error(&value).or_else(|| value.get("detail").and_then(structured_error))
}

fn structured_error(value: &Value) -> Option<ApiError> {
    if !value.is_object() {
        return None;
    }
    serde_json::from_value::<ApiError>(value.clone())
        .ok()
        .filter(ApiError::is_structured)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = IpamClient::new("http://ipam.local:8000//", Some("")).unwrap();
        assert_eq!(client.base_url(), "http://ipam.local:8000");
        assert_eq!(client.idempotency_key(), None);
    }

    #[test]
    fn test_invalid_base_url() {
        let err = IpamClient::new("not a url", None).unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn test_structured_error_prefers_message() {
        let body = br#"{"error":"conflict","message":"prefix overlaps"}"#;
        let err = normalize_error("POST", "/v1/prefixes", 409, body);
        assert_eq!(err.to_string(), "prefix overlaps");
        match err {
            Error::Api(api) => {
                assert_eq!(api.code, "conflict");
                assert_eq!(api.status, 409);
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[test]
    fn test_structured_error_with_details() {
        let body = br#"{"error":"conflict","message":"","details":{"cidr":"10.0.0.0/24"}}"#;
        let err = normalize_error("POST", "/v1/prefixes", 409, body);
        assert_eq!(err.to_string(), "conflict");
        match err {
            Error::Api(api) => {
                let details = api.details.unwrap();
                assert_eq!(details["cidr"], "10.0.0.0/24");
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[test]
    fn test_detail_envelope() {
        let body = br#"{"detail":{"error":"not_found","message":"prefix not found"}}"#;
        let err = normalize_error("GET", "/v1/prefixes/x", 404, body);
        assert!(matches!(err, Error::Api(_)));
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "prefix not found");
    }

    #[test]
    fn test_plain_text_error_keeps_raw_body() {
        let err = normalize_error("POST", "/v1/tenants", 500, b"internal error");
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("internal error"));
        assert!(msg.contains("POST /v1/tenants"));
    }

    #[test]
    fn test_empty_error_object_is_unstructured() {
        let err = normalize_error("POST", "/v1/tenants", 422, br#"{"detail":[{"loc":["body"]}]}"#);
        assert!(matches!(err, Error::Http { status: 422, .. }));

        let err = normalize_error("POST", "/v1/tenants", 400, b"{}");
        assert!(matches!(err, Error::Http { status: 400, .. }));
    }

    #[test]
    fn test_array_error_body_is_unstructured() {
        let err = normalize_error("GET", "/v1/prefixes/p1", 502, br#"["bad gateway"]"#);
        match err {
            Error::Http { method, path, status, body } => {
                assert_eq!(method, "GET");
                assert_eq!(path, "/v1/prefixes/p1");
                assert_eq!(status, 502);
                assert_eq!(body, r#"["bad gateway"]"#);
            }
            other => panic!("expected HTTP error, got {:?}", other),
        }

        let err = normalize_error("GET", "/v1/prefixes/p1", 404, br#"{"detail":["not_found"]}"#);
        assert!(matches!(err, Error::Http { status: 404, .. }));
    }

    #[test]
    fn test_decode_empty_body_is_zero_value() {
        let ip: AllocatedIp = decode_body("POST", "/v1/prefixes/p/ips/next", b"").unwrap();
        assert_eq!(ip, AllocatedIp::default());
    }

    #[test]
    fn test_decode_mismatch_keeps_raw_body() {
        let err = decode_body::<Tenant>("POST", "/v1/tenants", b"[1,2,3]").unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
        assert!(err.to_string().contains("[1,2,3]"));
    }

    #[test]
    fn test_decode_rejects_positional_record() {
        let err = decode_body::<Tenant>("POST", "/v1/tenants", br#"["abc","acme"]"#).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
        assert!(err.to_string().contains(r#"["abc","acme"]"#));

        let err = decode_body::<Vec<Prefix>>("POST", "/v1/prefixes/p1/children", br#"[["c1"]]"#)
            .unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));

        let err = decode_body::<Vec<Prefix>>("POST", "/v1/prefixes/p1/children", br#"{"id":"c1"}"#)
            .unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn test_decode_list_of_records() {
        let free: Vec<FreeSpace> =
            decode_body("GET", "/v1/prefixes/p1/free-space", br#"[{"cidr":"10.0.0.32/27"}]"#).unwrap();
        assert_eq!(free[0].cidr, "10.0.0.32/27");
    }

    #[test]
    fn test_only_writes_are_mutating() {
        assert!(is_mutating(&Method::POST));
        assert!(!is_mutating(&Method::GET));
    }
}
