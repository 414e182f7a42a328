//! Organizations
//!
//! Organizations are served from the Katello content-management surface
//! (`/katello/api/v2/organizations`), unlike roles and filters.

use super::list::ListOptions;
use super::reference::{
    ComputeResourceRef, PartitionTableRef, Reference, SmartProxyRef, SubnetRef, TemplateRef,
    UserRef,
};
use crate::satellite::error::ApiError;
use crate::satellite::field::Field;
use crate::satellite::path::{ApiSurface, CollectionPath};
use crate::satellite::resource::{
    optional_non_empty, require_non_empty, Listable, Payload, ResourceKind,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Candlepin owner details attached to a Katello organization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerDetails {
    #[serde(default)]
    pub autobind_disabled: Option<bool>,
    #[serde(default)]
    pub content_access_mode: Option<String>,
    #[serde(default)]
    pub content_access_mode_list: Option<String>,
    #[serde(default)]
    pub content_prefix: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub default_service_level: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub last_refreshed: Option<String>,
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub parent_owner: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(default)]
    pub upstream_consumer: Option<UpstreamConsumer>,
    #[serde(default, rename = "virt_who")]
    pub virt_who: Option<bool>,
}

/// The upstream (manifest) consumer an organization's content comes from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamConsumer {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub content_access_mode: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub id_cert: Option<IdentityCertificate>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default, rename = "type")]
    pub consumer_type: Option<ConsumerType>,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub web_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentityCertificate {
    #[serde(default)]
    pub cert: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub serial: Option<CertificateSerial>,
    #[serde(default)]
    pub updated: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CertificateSerial {
    #[serde(default)]
    pub collected: Option<bool>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub expiration: Option<String>,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub revoked: Option<bool>,
    #[serde(default)]
    pub serial: Option<u64>,
    #[serde(default)]
    pub updated: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsumerType {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub manifest: Option<bool>,
}

/// Organization parameter (key/value inherited by hosts)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub parameter_type: Option<String>,
    #[serde(default)]
    pub priority: Option<i64>,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Parameter values are typed by `parameter_type` on the server
    #[serde(default)]
    pub value: Option<Value>,
}

/// A Satellite organization.
///
/// Realms and system purposes are not modeled; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    #[serde(default)]
    pub ancestry: Option<String>,
    #[serde(default)]
    pub compute_resources: Option<Vec<ComputeResourceRef>>,
    #[serde(default)]
    pub config_templates: Option<Vec<TemplateRef>>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub default_content_view_id: Option<u64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub domains: Option<Vec<Reference>>,
    #[serde(default)]
    pub environments: Option<Vec<Reference>>,
    #[serde(default)]
    pub hostgroups: Option<Vec<Reference>>,
    #[serde(default)]
    pub hosts_count: Option<u64>,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub library_id: Option<u64>,
    #[serde(default)]
    pub locations: Option<Vec<Reference>>,
    #[serde(default)]
    pub media: Option<Vec<Reference>>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub owner_details: Option<OwnerDetails>,
    #[serde(default)]
    pub parameters: Option<Vec<Parameter>>,
    #[serde(default)]
    pub parent_id: Option<u64>,
    #[serde(default)]
    pub parent_name: Option<String>,
    #[serde(default)]
    pub provisioning_templates: Option<Vec<TemplateRef>>,
    #[serde(default)]
    pub ptables: Option<Vec<PartitionTableRef>>,
    #[serde(default)]
    pub redhat_repository_url: Option<String>,
    #[serde(default)]
    pub select_all_types: Option<Vec<String>>,
    #[serde(default)]
    pub service_level: Option<String>,
    #[serde(default)]
    pub service_levels: Option<Vec<String>>,
    #[serde(default)]
    pub smart_proxies: Option<Vec<SmartProxyRef>>,
    #[serde(default)]
    pub subnets: Option<Vec<SubnetRef>>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub users: Option<Vec<UserRef>>,
}

/// Reduced organization returned by list calls
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationSummary {
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl ResourceKind for Organization {
    const ENVELOPE: &'static str = "organization";
    const PATH: CollectionPath = CollectionPath::new(ApiSurface::Content, "organizations");

    type Create = OrganizationCreate;
    type Update = OrganizationUpdate;
}

impl Listable for Organization {
    type Summary = OrganizationSummary;
    type ListOptions = ListOptions;
}

/// Body of an organization creation; `name` is required
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationCreate {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub description: Field<String>,
    /// Unique label; derived from the name by the server when unset
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub label: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub compute_resource_ids: Field<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub config_template_ids: Field<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub domain_ids: Field<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub environment_ids: Field<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub hostgroup_ids: Field<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub medium_ids: Field<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub provisioning_template_ids: Field<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub ptable_ids: Field<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub realm_ids: Field<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub smart_proxy_ids: Field<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub subnet_ids: Field<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub user_ids: Field<Vec<u64>>,
}

impl OrganizationCreate {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Field::Value(name.into()),
            ..Self::default()
        }
    }
}

impl Payload for OrganizationCreate {
    fn validate(&self) -> Result<(), ApiError> {
        require_non_empty(&self.name, "organization.name")
    }
}

/// Body of an organization update; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationUpdate {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub description: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub parent_id: Field<u64>,
    /// Resource types whose association lists should not be replaced
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub ignore_types: Field<Vec<String>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub compute_resource_ids: Field<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub config_template_ids: Field<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub domain_ids: Field<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub environment_ids: Field<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub hostgroup_ids: Field<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub medium_ids: Field<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub provisioning_template_ids: Field<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub ptable_ids: Field<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub realm_ids: Field<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub smart_proxy_ids: Field<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub subnet_ids: Field<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub user_ids: Field<Vec<u64>>,
    /// CDN URL; sent next to the `organization` envelope, not inside it
    #[serde(skip)]
    pub redhat_repository_url: Field<String>,
}

impl Payload for OrganizationUpdate {
    fn validate(&self) -> Result<(), ApiError> {
        optional_non_empty(&self.name, "organization.name")
    }

    fn outer_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        match &self.redhat_repository_url {
            Field::Absent => {}
            Field::Null => {
                fields.insert("redhat_repository_url".to_string(), Value::Null);
            }
            Field::Value(url) => {
                fields.insert("redhat_repository_url".to_string(), Value::String(url.clone()));
            }
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::satellite::resource::envelope;
    use serde_json::json;

    #[test]
    fn create_requires_name() {
        let err = OrganizationCreate::default().validate().unwrap_err();
        assert!(matches!(
            err,
            ApiError::Argument { field: "organization.name", reason: "cannot be empty" }
        ));
        assert!(OrganizationCreate::named("ACME").validate().is_ok());
    }

    #[test]
    fn repository_url_sits_outside_envelope() {
        let update = OrganizationUpdate {
            description: "Lab".into(),
            redhat_repository_url: "https://cdn.example.com".into(),
            ..OrganizationUpdate::default()
        };
        let body = envelope(Organization::ENVELOPE, &update).unwrap();
        assert_eq!(
            body,
            json!({
                "organization": {"description": "Lab"},
                "redhat_repository_url": "https://cdn.example.com"
            })
        );
    }

    #[test]
    fn empty_update_is_empty_envelope() {
        let body = envelope(Organization::ENVELOPE, &OrganizationUpdate::default()).unwrap();
        assert_eq!(body, json!({"organization": {}}));
    }

    #[test]
    fn organization_decodes_katello_shape() {
        let org: Organization = serde_json::from_value(json!({
            "id": 1,
            "name": "Default Organization",
            "label": "Default_Organization",
            "title": "Default Organization",
            "library_id": 1,
            "hosts_count": 12,
            "realms": [],
            "system_purposes": {"roles": []},
            "owner_details": {
                "displayName": "Default Organization",
                "contentAccessMode": "org_environment",
                "virt_who": false,
                "upstreamConsumer": {
                    "uuid": "abc",
                    "apiUrl": "https://subscription.rhsm.redhat.com/subscription/",
                    "idCert": {"serial": {"id": 5, "revoked": false}}
                }
            },
            "parameters": [{"name": "kt_activation_keys", "value": true, "parameter_type": "boolean"}],
            "users": [{"id": 3, "login": "admin"}]
        }))
        .unwrap();

        assert_eq!(org.id, Some(1));
        let owner = org.owner_details.unwrap();
        assert_eq!(owner.virt_who, Some(false));
        let consumer = owner.upstream_consumer.unwrap();
        assert_eq!(
            consumer.api_url.as_deref(),
            Some("https://subscription.rhsm.redhat.com/subscription/")
        );
        assert_eq!(consumer.id_cert.and_then(|c| c.serial).and_then(|s| s.id), Some(5));
        assert_eq!(org.users.unwrap()[0].login.as_deref(), Some("admin"));
    }
}
