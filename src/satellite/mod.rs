//! Satellite API interaction module
//!
//! This module provides the core functionality for talking to the Red Hat
//! Satellite (Foreman + Katello) REST API.
//!
//! # Module Structure
//!
//! - [`client`] - Main client and the typed per-kind operations
//! - [`resource`] - The contract a resource kind implements
//! - [`transport`] - Transport trait and request type
//! - [`http`] - `reqwest` transport and error formatting
//! - [`path`] - API surfaces and resource paths
//! - [`field`] - Presence wrapper for write payload fields
//! - [`error`] - Error taxonomy and response descriptor
//!
//! # Example
//!
//! ```ignore
//! use satctl::satellite::client::SatelliteClient;
//! use satctl::models::RoleCreate;
//!
//! async fn example(client: &SatelliteClient) -> Result<(), satctl::satellite::error::ApiError> {
//!     let (role, _response) = client.roles().create(&RoleCreate::named("auditor")).await?;
//!     println!("created role {:?}", role.id);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod field;
pub mod http;
pub mod path;
pub mod resource;
pub mod transport;
