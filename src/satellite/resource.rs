//! The contract every resource kind fulfils
//!
//! A kind names its collection path and envelope, and provides the payload
//! types used to create and update it. [`super::client::Resources`] turns that
//! into the uniform create/get/update/delete (and list) operations.

use super::error::ApiError;
use super::path::CollectionPath;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// A server-side resource kind (Organization, Role, Filter, ...)
pub trait ResourceKind: DeserializeOwned + Send + 'static {
    /// Envelope key write payloads are nested under, e.g. `role`
    const ENVELOPE: &'static str;

    /// Where the collection lives, including which API surface
    const PATH: CollectionPath;

    type Create: Payload;
    type Update: Payload;
}

/// Kinds that can be listed as a paginated collection
pub trait Listable: ResourceKind {
    /// Reduced projection returned by list calls
    type Summary: DeserializeOwned + Send + 'static;
    type ListOptions: ListQuery + Sync;
}

/// A write payload (create or update body) for one kind
pub trait Payload: Serialize + Sync {
    /// Local precondition checks, run before anything is sent
    fn validate(&self) -> Result<(), ApiError> {
        Ok(())
    }

    /// Fields sent at the top level of the body, next to the envelope
    fn outer_fields(&self) -> Map<String, Value> {
        Map::new()
    }
}

/// Options that render to flat query parameters
pub trait ListQuery {
    fn to_query(&self) -> Vec<(String, String)>;
}

/// Wrap a payload in its kind's envelope: `{"<envelope>": {...payload}}`
pub fn envelope<P: Payload>(key: &'static str, payload: &P) -> Result<Value, ApiError> {
    let inner = serde_json::to_value(payload)
        .map_err(|e| ApiError::transport("failed to serialize request body", e))?;

    let mut body = payload.outer_fields();
    body.insert(key.to_string(), inner);
    Ok(Value::Object(body))
}

/// Reject a required string that is missing, null or empty
pub(crate) fn require_non_empty(
    value: &super::field::Field<String>,
    field: &'static str,
) -> Result<(), ApiError> {
    match value.as_value() {
        None => Err(ApiError::argument(field, "cannot be empty")),
        Some(v) if v.is_empty() => Err(ApiError::argument(field, "cannot be an empty string")),
        Some(_) => Ok(()),
    }
}

/// Like [`require_non_empty`], but an absent field is fine
pub(crate) fn optional_non_empty(
    value: &super::field::Field<String>,
    field: &'static str,
) -> Result<(), ApiError> {
    if value.is_absent() {
        return Ok(());
    }
    require_non_empty(value, field)
}

#[cfg(test)]
mod tests {
    use super::super::field::Field;
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Named {
        #[serde(skip_serializing_if = "Field::is_absent")]
        name: Field<String>,
    }

    impl Payload for Named {}

    #[test]
    fn envelope_wraps_payload() {
        let body = envelope("role", &Named { name: "ops".into() }).unwrap();
        assert_eq!(body, json!({"role": {"name": "ops"}}));
    }

    #[test]
    fn envelope_of_empty_payload_is_empty_object() {
        let body = envelope("role", &Named { name: Field::Absent }).unwrap();
        assert_eq!(body, json!({"role": {}}));
    }

    #[test]
    fn required_string_rules() {
        assert!(require_non_empty(&"ops".into(), "x.name").is_ok());

        let err = require_non_empty(&Field::Absent, "x.name").unwrap_err();
        assert!(matches!(err, ApiError::Argument { field: "x.name", reason: "cannot be empty" }));

        let err = require_non_empty(&Field::Null, "x.name").unwrap_err();
        assert!(matches!(err, ApiError::Argument { reason: "cannot be empty", .. }));

        let err = require_non_empty(&"".into(), "x.name").unwrap_err();
        assert!(matches!(
            err,
            ApiError::Argument { reason: "cannot be an empty string", .. }
        ));
    }

    #[test]
    fn optional_string_rules() {
        assert!(optional_non_empty(&Field::Absent, "x.name").is_ok());
        assert!(optional_non_empty(&"".into(), "x.name").is_err());
        assert!(optional_non_empty(&Field::Null, "x.name").is_err());
    }
}
