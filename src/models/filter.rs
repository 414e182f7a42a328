//! Role filters
//!
//! A filter grants a set of permissions on one resource type to a role,
//! optionally narrowed by a search expression. Filters live on the management
//! surface under `/api/v2/filters`.

use super::reference::Reference;
use crate::satellite::error::ApiError;
use crate::satellite::field::Field;
use crate::satellite::path::{ApiSurface, CollectionPath};
use crate::satellite::resource::{Payload, ResourceKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterPermission {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub resource_type: Option<String>,
}

/// The role a filter belongs to, as embedded in the filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterRole {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
}

/// A Satellite role filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub locations: Option<Vec<Reference>>,
    #[serde(default)]
    pub organizations: Option<Vec<Reference>>,
    #[serde(default, rename = "override?")]
    pub override_taxonomy: Option<bool>,
    #[serde(default)]
    pub permissions: Option<Vec<FilterPermission>>,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub role: Option<FilterRole>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default, rename = "unlimited?")]
    pub unlimited: Option<bool>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl ResourceKind for Filter {
    const ENVELOPE: &'static str = "filter";
    const PATH: CollectionPath = CollectionPath::new(ApiSurface::Management, "filters");

    type Create = FilterCreate;
    type Update = FilterUpdate;
}

/// Body of a filter creation; `role_id` is required
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCreate {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub role_id: Field<u64>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub search: Field<String>,
    /// Override the role's organizations and locations with the filter's own
    #[serde(default, rename = "override", skip_serializing_if = "Field::is_absent")]
    pub override_taxonomy: Field<bool>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub permission_ids: Field<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub organization_ids: Field<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub location_ids: Field<Vec<u64>>,
}

impl FilterCreate {
    pub fn for_role(role_id: u64) -> Self {
        Self {
            role_id: Field::Value(role_id),
            ..Self::default()
        }
    }
}

impl Payload for FilterCreate {
    fn validate(&self) -> Result<(), ApiError> {
        match self.role_id {
            Field::Value(_) => Ok(()),
            Field::Absent | Field::Null => Err(ApiError::argument("filter.role_id", "cannot be empty")),
        }
    }
}

/// Body of a filter update; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterUpdate {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub role_id: Field<u64>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub search: Field<String>,
    #[serde(default, rename = "override", skip_serializing_if = "Field::is_absent")]
    pub override_taxonomy: Field<bool>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub permission_ids: Field<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub organization_ids: Field<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub location_ids: Field<Vec<u64>>,
}

impl Payload for FilterUpdate {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_requires_role() {
        let err = FilterCreate::default().validate().unwrap_err();
        assert!(matches!(
            err,
            ApiError::Argument { field: "filter.role_id", reason: "cannot be empty" }
        ));

        let null_role = FilterCreate {
            role_id: Field::Null,
            ..FilterCreate::default()
        };
        assert!(null_role.validate().is_err());

        assert!(FilterCreate::for_role(4).validate().is_ok());
    }

    #[test]
    fn override_uses_wire_names() {
        let create = FilterCreate {
            override_taxonomy: true.into(),
            permission_ids: vec![7].into(),
            ..FilterCreate::for_role(4)
        };
        assert_eq!(
            serde_json::to_value(&create).unwrap(),
            json!({"role_id": 4, "override": true, "permission_ids": [7]})
        );

        let filter: Filter = serde_json::from_value(json!({
            "id": 9,
            "override?": false,
            "unlimited?": true,
            "resource_type": "Host",
            "role": {"id": 4, "name": "auditor"},
            "permissions": [{"id": 7, "name": "view_hosts", "resource_type": "Host"}]
        }))
        .unwrap();
        assert_eq!(filter.override_taxonomy, Some(false));
        assert_eq!(filter.unlimited, Some(true));
        assert_eq!(filter.role.and_then(|r| r.id), Some(4));
    }
}
