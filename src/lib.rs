//! # Tassi API Rust Client
//!
//! A Rust client for the Tassi logistics API, providing shared
//! configuration, an async HTTP transport, and a generic resource layer
//! over packages, shipments, and marketplaces.
//!
//! ## Overview
//!
//! This client provides:
//! - Process-wide configuration via [`SharedConfig`] (credential,
//!   environment, base-URL override, TLS verification)
//! - An async transport ([`Requestor`]) issuing one HTTP call per
//!   operation, with no retries
//! - A generic [`Resource`] trait deriving wire paths from a resource's
//!   name and providing retrieve/all/create/update/delete
//! - Recursive hydration of raw JSON responses into dynamic
//!   [`TassiObject`] trees
//! - A typed error taxonomy ([`TassiError`]) separating client-side
//!   validation failures from transport failures
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tassi_api::{Package, Resource, SharedConfig};
//!
//! # async fn run() -> Result<(), tassi_api::TassiError> {
//! // Configure the client once, process-wide.
//! SharedConfig::global().set_api_key("sk_test_123");
//!
//! // Retrieve a package: GET /packages/4
//! let package = Package::retrieve(4, None).await?;
//! let object = package.as_object().unwrap();
//! println!("status: {:?}", object.get_str("status"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Listing and Updating
//!
//! ```rust,no_run
//! use serde_json::json;
//! use tassi_api::{Package, Resource};
//!
//! # async fn run() -> Result<(), tassi_api::TassiError> {
//! // GET /packages?status=in_transit — the raw body is hydrated as-is;
//! // the list and pagination keys inside it are the caller's concern.
//! let page = Package::all(Some(json!({"status": "in_transit"})), None).await?;
//!
//! // PUT /packages/4 with the params as JSON body.
//! let updated = Package::update(4, json!({"weight": "15.0"}), None).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Instance Actions
//!
//! Id-scoped sub-actions go through an instance handle:
//!
//! ```rust,no_run
//! use tassi_api::{Marketplace, Package};
//!
//! # async fn run() -> Result<(), tassi_api::TassiError> {
//! // GET /packages/4/track
//! let events = Package::new(4).track(None).await?;
//!
//! // GET /marketplaces/1/wallet_history
//! let history = Marketplace::new(1).wallet_history(None, None).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! Every resource type resolves its [`Requestor`] lazily and accepts a
//! replacement at any time, so tests can point a resource at a local
//! mock server:
//!
//! ```rust
//! use std::sync::Arc;
//! use tassi_api::{Package, Requestor, Resource, SharedConfig, TassiConfig};
//!
//! let config = SharedConfig::new(TassiConfig::new());
//! config.set_api_base("http://127.0.0.1:8080");
//! Package::set_requestor(Arc::new(Requestor::with_config(config)));
//! ```
//!
//! ## Design Principles
//!
//! - **Explicit shared configuration**: a process-lifetime default
//!   handle, but every requestor can be given its own
//! - **Two-phase failures**: precondition violations fail before any
//!   network activity; transport failures are wrapped once, never
//!   retried
//! - **Structure-preserving hydration**: no schema validation, no type
//!   coercion — what the server sent is what the object holds
//! - **Thread-safe**: configuration and requestors are `Send + Sync`;
//!   per-type requestor resolution is race-free
//! - **Async-first**: designed for use with the Tokio async runtime

pub mod config;
pub mod error;
pub mod object;
pub mod requestor;
pub mod resource;
pub mod resources;

// Re-export the public surface at the crate root for convenience
pub use config::{Environment, SharedConfig, TassiConfig};
pub use error::{ApiConnectionError, RequestSummary, ResponseSummary, TassiError};
pub use object::{TassiObject, TassiValue};
pub use requestor::{HttpMethod, Requestor, ResponseContext, ResponseEnvelope, VERSION};
pub use resource::{pluralize, RequestorSlot, Resource, ResourceId};
pub use resources::{Marketplace, Package, Shipment};
