//! # Request and Response Model
//!
//! Handlers receive an [`ApiRequest`] shaped like an API-gateway proxy event
//! and return an [`ApiResponse`] shaped like the proxy result, so an event
//! captured from the gateway can be replayed locally unchanged:
//!
//! ```json
//! {
//!   "httpMethod": "GET",
//!   "path": "/applications",
//!   "headers": {"Authorization": "Bearer ..."},
//!   "queryStringParameters": {"Application-Id": "app#42"},
//!   "body": null,
//!   "requestContext": {"authorizer": {"User-Id": "u-123"}}
//! }
//! ```
//!
//! The user id is never read from a header: the upstream authorizer verifies
//! the caller's token and places `User-Id` in the request context.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

pub const OK: u16 = 200;
pub const BAD_REQUEST: u16 = 400;
pub const NOT_FOUND: u16 = 404;
pub const INTERNAL_SERVER_ERROR: u16 = 500;

/// Authorizer context key carrying the verified user id.
pub const USER_ID: &str = "User-Id";
/// Header / query parameter carrying an application sort key.
pub const APPLICATION_ID: &str = "Application-Id";

const ALLOWED_HEADERS: &str = "Content-Type,Authorization,Application-Id";
const ALLOWED_METHODS: &str = "GET,POST,DELETE,OPTIONS";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestContext {
    #[serde(default)]
    pub authorizer: Option<HashMap<String, Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequest {
    #[serde(default)]
    pub http_method: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub request_context: RequestContext,
}

impl ApiRequest {
    pub fn new(method: &str, path: &str) -> Self {
        Self {
            http_method: method.to_string(),
            path: path.to_string(),
            ..Default::default()
        }
    }

    pub fn with_user(mut self, user_id: &str) -> Self {
        self.request_context
            .authorizer
            .get_or_insert_with(HashMap::new)
            .insert(USER_ID.to_string(), Value::String(user_id.to_string()));
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_query(mut self, name: &str, value: &str) -> Self {
        self.query_string_parameters
            .get_or_insert_with(HashMap::new)
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Verified user id from the authorizer context. Empty ids count as absent.
    pub fn user_id(&self) -> Option<&str> {
        self.request_context
            .authorizer
            .as_ref()?
            .get(USER_ID)?
            .as_str()
            .filter(|id| !id.is_empty())
    }

    /// Header lookup, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .as_ref()?
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Query parameter lookup, exact name.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()?
            .get(name)
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl ApiResponse {
    pub fn new(status_code: u16) -> Self {
        Self {
            status_code,
            headers: BTreeMap::new(),
            body: None,
        }
    }

    pub fn ok_empty() -> Self {
        Self::new(OK)
    }

    pub fn ok_json<T: Serialize + ?Sized>(payload: &T) -> Result<Self> {
        let body = serde_json::to_string(payload)?;
        let mut response = Self::new(OK);
        response
            .headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        response.body = Some(body);
        Ok(response)
    }

    pub fn error(status_code: u16, message: impl Into<String>) -> Self {
        let mut response = Self::new(status_code);
        response
            .headers
            .insert("Content-Type".to_string(), "text/plain".to_string());
        response.body = Some(message.into());
        response
    }

    pub fn with_cors(mut self, origin: &str) -> Self {
        self.headers.insert(
            "Access-Control-Allow-Origin".to_string(),
            origin.to_string(),
        );
        self.headers.insert(
            "Access-Control-Allow-Headers".to_string(),
            ALLOWED_HEADERS.to_string(),
        );
        self.headers.insert(
            "Access-Control-Allow-Methods".to_string(),
            ALLOWED_METHODS.to_string(),
        );
        self
    }

    /// Parse the body as JSON, if there is one.
    pub fn body_json(&self) -> Option<Value> {
        self.body
            .as_deref()
            .and_then(|body| serde_json::from_str(body).ok())
    }
}
