//! Typed models for Satellite resources
//!
//! Each resource kind has a read type (every field optional, unknown fields
//! ignored) plus create and update payloads built from
//! [`Field`](crate::satellite::field::Field) so that unset fields are left
//! out of the request body.
//!
//! - [`organization`] - Organizations (content-management surface, listable)
//! - [`role`] - Roles
//! - [`filter`] - Role filters
//! - [`list`] - Paginated list envelope and options
//! - [`reference`] - Lightweight references between resources

pub mod filter;
pub mod list;
pub mod organization;
pub mod reference;
pub mod role;

pub use filter::{Filter, FilterCreate, FilterPermission, FilterRole, FilterUpdate};
pub use list::{ListOptions, ListResult, Sort};
pub use organization::{Organization, OrganizationCreate, OrganizationSummary, OrganizationUpdate};
pub use reference::Reference;
pub use role::{Role, RoleCreate, RoleUpdate};
