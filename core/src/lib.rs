//! Core components for the OVH API client.
//!
//! This crate provides the foundational types and traits shared by the
//! ovhapi crates.
//!
//! ## Overview
//!
//! - **Context**: A container that holds implementations for file reading, HTTP sending and environment access
//! - **Traits**: Abstract interfaces for request signing (`SignRequest`) and credentials (`SigningCredential`)
//! - **Error**: A tagged error type so callers can branch on configuration, encoding, transport and remote failures
//!
//! ## Example
//!
//! ```no_run
//! use bytes::Bytes;
//! use ovhapi_core::{Context, OsEnv, RequestTimeout};
//! use std::time::Duration;
//!
//! # async fn example(ctx: Context) -> ovhapi_core::Result<()> {
//! let ctx = ctx.with_env(OsEnv);
//!
//! let mut req = http::Request::builder()
//!     .method("GET")
//!     .uri("https://eu.api.ovh.com/1.0/auth/time")
//!     .body(Bytes::new())?;
//! req.extensions_mut()
//!     .insert(RequestTimeout(Duration::from_secs(10)));
//!
//! let resp = ctx.http_send(req).await?;
//! println!("{}", resp.status());
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: SHA1 hashing utilities
//! - [`time`]: Time manipulation utilities
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::{
    Context, Env, FileRead, HttpSend, NoopEnv, NoopFileRead, NoopHttpSend, OsEnv, RequestTimeout,
    StaticEnv,
};

mod api;
pub use api::{SignRequest, SigningCredential};

mod error;
pub use error::{ApiError, Error, ErrorKind, Result};
