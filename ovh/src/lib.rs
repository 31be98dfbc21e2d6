//! Signed-request client for the OVH api family.
//!
//! The client calibrates its clock against the api once, when it is built,
//! and then signs every authenticated call with
//!
//! ```text
//! "$1$" + hex(sha1(secret+consumer+method+url+body+timestamp))
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use ovhapi::{Client, Config};
//! use ovhapi_core::Context;
//!
//! # async fn example(ctx: Context) -> ovhapi_core::Result<()> {
//! let config = Config::new()
//!     .with_endpoint("ovh-eu")
//!     .with_application_key("my-app-key")
//!     .with_application_secret("my-app-secret")
//!     .with_consumer_key("my-consumer-key");
//!
//! let client = Client::new(ctx, config).await?;
//!
//! let resp = client.get("/me").await?;
//! resp.decode_error(&[200])?;
//! println!("{}", resp.text());
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::{
    OVH_APPLICATION_KEY, OVH_APPLICATION_SECRET, OVH_CONFIG_FILES, OVH_CONSUMER_KEY, OVH_ENDPOINT,
};

mod endpoint;
pub use endpoint::{Endpoint, ENDPOINTS};

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::{signature, RequestSigner};

mod response;
pub use response::Response;

mod dispatch;
mod clock;

mod client;
pub use client::{Client, ClientBuilder};

#[cfg(feature = "default-context")]
mod context;
#[cfg(feature = "default-context")]
pub use context::default_context;

pub use ovhapi_core::{ApiError, Error, ErrorKind, Result};
