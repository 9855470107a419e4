//! Question Bank HTTP Gateway
//!
//! The single HTTP client the console uses to talk to the question bank
//! backend:
//!
//! - a [`Session`] carrying the bearer credential, read at call time
//! - request/response interceptors that log every call
//! - a [`GatewayError`] taxonomy with a fixed notification contract delivered
//!   through injectable [`Hooks`]
//! - per-domain sub-clients (`gateway.users()`, `gateway.questions()`, ...)
//! - multipart uploads and blob downloads
//!
//! # Example
//!
//! ```no_run
//! use qbank_gateway::{Gateway, GatewayConfig, Hooks, Session};
//! use qbank_sdk::ListParams;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = Gateway::from_config(
//!     &GatewayConfig::from_env()?,
//!     Session::in_memory(),
//!     Hooks::default(),
//! )?;
//!
//! let page = gateway
//!     .companies()
//!     .list(&ListParams::new().page(1).limit(10).search("acme"))
//!     .await?;
//! println!("{} of {} companies", page.items.len(), page.total);
//! # Ok(())
//! # }
//! ```
//!
//! Endpoints that let the caller handle 4xx return an [`Outcome`]:
//!
//! ```no_run
//! use qbank_gateway::{Gateway, Outcome};
//!
//! # async fn example(gateway: &Gateway) -> Result<(), qbank_gateway::GatewayError> {
//! match gateway.questions().get(42).await? {
//!     Outcome::Success(question) => println!("{}", question.text),
//!     Outcome::ClientError { status, .. } => println!("not available ({status})"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
mod body;
mod client;
mod error;
mod hooks;
mod interceptors;
mod outcome;
mod request;
mod response;
mod session;
mod transfer;
mod transport;

// Re-export public API
pub use body::Body;
pub use client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, Gateway, GatewayConfig};
pub use error::GatewayError;
pub use hooks::{Hooks, Navigator, NoopNavigator, NoopNotifier, Notice, NoticeLevel, Notifier};
pub use interceptors::{
    MSG_FORBIDDEN, MSG_GENERIC, MSG_NOT_FOUND, MSG_SERVER_ERROR, MSG_SESSION_EXPIRED,
    MSG_UNREACHABLE, MSG_VALIDATION,
};
pub use outcome::Outcome;
pub use request::{Request, RequestBuilder, StatusPolicy};
pub use response::Response;
pub use session::{
    BearerToken, CredentialError, CredentialStore, FileCredentialStore, MemoryCredentialStore,
    Session,
};
pub use transfer::{Download, Upload};

// Re-export commonly used types from dependencies
pub use http::{Method, StatusCode};
