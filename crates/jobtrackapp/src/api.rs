//! # API Facade
//!
//! The API layer is a **thin facade** over the handler layer. It serves as the
//! single entry point for every request, regardless of how the request
//! arrived (gateway event, local CLI invocation, test).
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns dependencies**: the store handle and configuration are built once
//!   at process start and passed to every call, never held in globals
//! - **Routes** a request to its handler ([`Route`])
//! - **Maps errors** to status codes (see [`status_for`])
//! - **Attaches CORS headers** to every response, errors included
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `handlers/*.rs`
//! - **Transport**: No sockets, stdout, or event-loop concerns
//!
//! ## Routing
//!
//! | Method | Path | Route |
//! |--------|------|-------|
//! | `GET` | `/profiles` | [`Route::GetProfile`] |
//! | `POST` | `/profiles` | [`Route::PostProfile`] |
//! | `GET` | `/applications` | [`Route::GetApplications`] |
//! | `POST` | `/applications` | [`Route::PostApplication`] |
//! | `DELETE` | `/applications` | [`Route::DeleteApplication`] |
//! | `OPTIONS` | any | [`Route::Preflight`] |
//!
//! Paths match on their last segment, so stage-prefixed paths such as
//! `/prod/applications` resolve the same way.
//!
//! ## Generic Over ItemStore
//!
//! `TrackerApi<S: ItemStore>` is generic over the storage backend:
//! - Local: `TrackerApi<FileTable>`
//! - Testing: `TrackerApi<MemTable>`
//!
//! All methods take `&self`; one facade can serve concurrent requests when
//! the store allows it.

use crate::config::TrackerConfig;
use crate::error::TrackerError;
use crate::handlers;
use crate::http::{
    ApiRequest, ApiResponse, BAD_REQUEST, INTERNAL_SERVER_ERROR, NOT_FOUND,
};
use crate::store::ItemStore;
use std::fmt;
use tracing::{error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    GetProfile,
    PostProfile,
    GetApplications,
    PostApplication,
    DeleteApplication,
    Preflight,
}

impl Route {
    pub const ALL: [Route; 6] = [
        Route::GetProfile,
        Route::PostProfile,
        Route::GetApplications,
        Route::PostApplication,
        Route::DeleteApplication,
        Route::Preflight,
    ];

    /// Handler name as used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Route::GetProfile => "get-profile",
            Route::PostProfile => "post-profile",
            Route::GetApplications => "get-applications",
            Route::PostApplication => "post-application",
            Route::DeleteApplication => "delete-application",
            Route::Preflight => "preflight",
        }
    }

    pub fn from_name(name: &str) -> Option<Route> {
        Self::ALL
            .into_iter()
            .find(|route| route.name().eq_ignore_ascii_case(name))
    }

    /// Method and path this route is served on.
    pub fn endpoint(&self) -> (&'static str, &'static str) {
        match self {
            Route::GetProfile => ("GET", "/profiles"),
            Route::PostProfile => ("POST", "/profiles"),
            Route::GetApplications => ("GET", "/applications"),
            Route::PostApplication => ("POST", "/applications"),
            Route::DeleteApplication => ("DELETE", "/applications"),
            Route::Preflight => ("OPTIONS", "*"),
        }
    }

    pub fn resolve(method: &str, path: &str) -> Option<Route> {
        let method = method.to_ascii_uppercase();
        if method == "OPTIONS" {
            return Some(Route::Preflight);
        }
        let resource = path.trim_end_matches('/').rsplit('/').next().unwrap_or("");
        match (method.as_str(), resource) {
            ("GET", "profiles") => Some(Route::GetProfile),
            ("POST", "profiles") => Some(Route::PostProfile),
            ("GET", "applications") => Some(Route::GetApplications),
            ("POST", "applications") => Some(Route::PostApplication),
            ("DELETE", "applications") => Some(Route::DeleteApplication),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Status code for a handler error.
pub fn status_for(err: &TrackerError) -> u16 {
    match err {
        TrackerError::BadRequest(_) => BAD_REQUEST,
        TrackerError::NotFound(_) => NOT_FOUND,
        _ => INTERNAL_SERVER_ERROR,
    }
}

/// The main API facade for tracker operations.
pub struct TrackerApi<S: ItemStore> {
    store: S,
    config: TrackerConfig,
}

impl<S: ItemStore> TrackerApi<S> {
    pub fn new(store: S, config: TrackerConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn get_profile(&self, request: &ApiRequest) -> ApiResponse {
        self.handle(Route::GetProfile, request)
    }

    pub fn post_profile(&self, request: &ApiRequest) -> ApiResponse {
        self.handle(Route::PostProfile, request)
    }

    pub fn get_applications(&self, request: &ApiRequest) -> ApiResponse {
        self.handle(Route::GetApplications, request)
    }

    pub fn post_application(&self, request: &ApiRequest) -> ApiResponse {
        self.handle(Route::PostApplication, request)
    }

    pub fn delete_application(&self, request: &ApiRequest) -> ApiResponse {
        self.handle(Route::DeleteApplication, request)
    }

    /// Route by method and path.
    pub fn dispatch(&self, request: &ApiRequest) -> ApiResponse {
        match Route::resolve(&request.http_method, &request.path) {
            Some(route) => self.handle(route, request),
            None => {
                warn!(method = %request.http_method, path = %request.path, "no route");
                ApiResponse::error(
                    NOT_FOUND,
                    format!("No route for {} {}", request.http_method, request.path),
                )
                .with_cors(&self.config.cors_origin)
            }
        }
    }

    pub fn handle(&self, route: Route, request: &ApiRequest) -> ApiResponse {
        let (store, config) = (&self.store, &self.config);
        let result = match route {
            Route::GetProfile => handlers::get_profile::run(store, config, request),
            Route::PostProfile => handlers::post_profile::run(store, config, request),
            Route::GetApplications => handlers::get_applications::run(store, config, request),
            Route::PostApplication => handlers::post_application::run(store, config, request),
            Route::DeleteApplication => {
                handlers::delete_application::run(store, config, request)
            }
            Route::Preflight => Ok(ApiResponse::ok_empty()),
        };

        let response = result.unwrap_or_else(|err| {
            let status = status_for(&err);
            if status >= INTERNAL_SERVER_ERROR {
                error!(%route, error = %err, "request failed");
            } else {
                warn!(%route, status, error = %err, "request rejected");
            }
            ApiResponse::error(status, err.to_string())
        });
        response.with_cors(&self.config.cors_origin)
    }
}
