//! Typed client for the Red Hat Satellite REST API
//!
//! Organizations, roles and role filters are exposed through one uniform
//! contract: every kind gets `create`, `get`, `update` and `delete`, and
//! listable kinds get a paginated `list`.
//!
//! ```ignore
//! use satctl::config::ConnectionSettings;
//! use satctl::models::{ListOptions, RoleCreate};
//! use satctl::SatelliteClient;
//!
//! async fn example() -> Result<(), satctl::ApiError> {
//!     let url = "https://satellite.example.com".parse().unwrap();
//!     let settings = ConnectionSettings::new(url).with_credentials("admin", Some("changeme".into()));
//!     let client = SatelliteClient::new(&settings)?;
//!
//!     let (role, _) = client.roles().create(&RoleCreate::named("auditor")).await?;
//!     let (orgs, _) = client.organizations().list(Some(&ListOptions::page(1, 50))).await?;
//!     println!("{:?} / {} organizations", role.id, orgs.results.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod models;
pub mod satellite;

pub use satellite::client::{Resources, SatelliteClient};
pub use satellite::error::{ApiError, ApiResult, Response};
pub use satellite::field::Field;
