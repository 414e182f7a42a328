//! Roles
//!
//! Roles live on the management surface under `/api/v2/roles`.

use super::reference::Reference;
use crate::satellite::error::ApiError;
use crate::satellite::field::Field;
use crate::satellite::path::{ApiSurface, CollectionPath};
use crate::satellite::resource::{optional_non_empty, require_non_empty, Payload, ResourceKind};
use serde::{Deserialize, Serialize};

/// A Satellite role
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Role {
    /// Non-zero for roles shipped with Satellite
    #[serde(default)]
    pub builtin: Option<i64>,
    #[serde(default)]
    pub cloned_from_id: Option<u64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub filters: Option<Vec<Reference>>,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub locations: Option<Vec<Reference>>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub organizations: Option<Vec<Reference>>,
    #[serde(default)]
    pub origin: Option<String>,
}

impl ResourceKind for Role {
    const ENVELOPE: &'static str = "role";
    const PATH: CollectionPath = CollectionPath::new(ApiSurface::Management, "roles");

    type Create = RoleCreate;
    type Update = RoleUpdate;
}

/// Body of a role creation; `name` is required
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleCreate {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub description: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub location_ids: Field<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub organization_ids: Field<Vec<u64>>,
}

impl RoleCreate {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Field::Value(name.into()),
            ..Self::default()
        }
    }
}

impl Payload for RoleCreate {
    fn validate(&self) -> Result<(), ApiError> {
        require_non_empty(&self.name, "role.name")
    }
}

/// Body of a role update; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleUpdate {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub description: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub location_ids: Field<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub organization_ids: Field<Vec<u64>>,
}

impl Payload for RoleUpdate {
    fn validate(&self) -> Result<(), ApiError> {
        optional_non_empty(&self.name, "role.name")
    }
}
