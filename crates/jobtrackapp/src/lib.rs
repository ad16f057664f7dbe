//! # Job Tracker Architecture
//!
//! Jobtrack is a **transport-agnostic request-handling library** for a single
//! key-value table that holds a user's job applications and profile. The
//! hosting platform (an API gateway, a local CLI invocation, a test) hands it
//! an HTTP-like request and receives an HTTP-like response back.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Binary (crates/jobtrack)                                   │
//! │  - Parses arguments, reads events, prints responses         │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Routes requests to handlers                              │
//! │  - Maps errors to status codes                              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Handler Layer (handlers/*.rs)                              │
//! │  - Extract keys, validate bodies, call the store once       │
//! │  - Translate payloads with the attribute codec              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/) + Codec (attributes/)               │
//! │  - ItemStore trait: get / query / put / delete              │
//! │  - FileTable (local), MemTable (testing)                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Attribute Codec
//!
//! Request bodies arrive as generic JSON. The store speaks the tagged
//! attribute encoding (`{"S": ..}`, `{"N": ..}`, `{"M": ..}`, ...). The
//! [`attributes`] module converts between the two, recursively, in both
//! directions. It is the only place numbers change representation: they are
//! written as decimal text and read back as doubles.
//!
//! ## Module Overview
//!
//! - [`api`]: Facade and routing, entry point for every request
//! - [`handlers`]: One module per record-access operation
//! - [`attributes`]: Attribute value type and JSON codec
//! - [`store`]: Storage abstraction and implementations
//! - [`http`]: Request/response model shared by handlers
//! - [`config`]: Table layout and CORS configuration
//! - [`init`]: Data directory resolution and context setup
//! - [`error`]: Error types

pub mod api;
pub mod attributes;
pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod init;
pub mod store;
