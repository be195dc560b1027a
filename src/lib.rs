//! vRealize Operations API client library.
//!
//! A Rust client for the VMware vRealize Operations (vROps) `suite-api`:
//! it acquires a session token, pages through inventory resources and
//! decodes the platform's loosely-typed JSON object model into
//! strongly-shaped records. Decoding is strict by default: every kind
//! declares its full key set and any unrecognized key fails the decode, so
//! server schema drift is surfaced instead of silently dropped.
//!
//! # Quick Start
//!
//! ```no_run
//! use vropsapi::{Session, VirtualMachine, VropsClient};
//!
//! #[tokio::main]
//! async fn main() -> vropsapi::Result<()> {
//!     // Create client from environment variables
//!     let client = VropsClient::from_env()?;
//!
//!     // Authentication state is held by the caller
//!     let mut session = Session::new();
//!
//!     // Fetch the full virtual machine inventory
//!     let machines = client.virtual_machines(&mut session).await?;
//!     for machine in &machines {
//!         println!("{}", machine.to_json_string()?);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`VropsClient`] handles token acquisition and raw HTTP against the
//!   platform, signing requests with the `vRealizeOpsToken` scheme.
//! - [`Session`] is an explicit, caller-owned value holding the token and
//!   its expiry; passing it `&mut` through fetches keeps token lifetime
//!   visible at the call site.
//! - [`List`] is implemented by projected record types such as
//!   [`VirtualMachine`]; it drives the sequential page loop and the
//!   projection from the generic [`Resource`] model.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `VROPS_HOST` (required) - vRealize Operations Manager hostname
//! - `VROPS_USERNAME` (required) - API username
//! - `VROPS_PASSWORD` (required) - API password
//! - `VROPS_PORT` (optional) - Port (defaults to 443)
//! - `VROPS_SCHEME` (optional) - `http` or `https` (defaults to `https`)
//! - `VROPS_VALIDATE_CERTS` (optional) - Enforce certificate validation;
//!   off by default for self-signed deployment certificates

mod client;
mod decode;
mod error;
mod models;
mod pagination;
mod session;
mod traits;

pub mod cli;

// Re-export core types
pub use client::{Scheme, VropsClient, VropsClientBuilder, RECEIVER_DATA_LIMIT};
pub use decode::DecodeMode;
pub use error::{Result, VropsError};
pub use pagination::Page;
pub use session::Session;

// Re-export traits
pub use traits::{List, DEFAULT_PAGE_SIZE};

// Re-export models
pub use models::{
    Badge, GeoLocation, Link, PageInfo, Resource, ResourceIdentifier, ResourceKey,
    ResourceStatusState, ResourcesResponse, VirtualMachine,
};
