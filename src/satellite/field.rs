//! Presence wrapper for write payload fields
//!
//! A field on a create/update payload can be left out of the body entirely,
//! sent as an explicit `null`, or sent with a value. `Option<T>` can only
//! express two of those, so payloads use [`Field<T>`] together with
//! `#[serde(default, skip_serializing_if = "Field::is_absent")]`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Field<T> {
    /// Not sent at all; the server keeps (or defaults) its value
    #[default]
    Absent,
    /// Sent as JSON `null`
    Null,
    Value(T),
}

impl<T> Field<T> {
    /// `None` maps to [`Field::Absent`], which is what callers building
    /// payloads from optional inputs (e.g. CLI flags) want
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(Field::Absent, Field::Value)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    pub fn is_present(&self) -> bool {
        !self.is_absent()
    }

    pub fn as_value(&self) -> Option<&T> {
        match self {
            Field::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Field::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Field::Value(value)
    }
}

impl From<&str> for Field<String> {
    fn from(value: &str) -> Self {
        Field::Value(value.to_string())
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Only reached when a struct forgets `skip_serializing_if`
            Field::Absent | Field::Null => serializer.serialize_none(),
            Field::Value(v) => v.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Missing keys never reach here, `#[serde(default)]` yields Absent
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Field::Value(v),
            None => Field::Null,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    struct Probe {
        #[serde(default, skip_serializing_if = "Field::is_absent")]
        name: Field<String>,
        #[serde(default, skip_serializing_if = "Field::is_absent")]
        ids: Field<Vec<u64>>,
    }

    #[test]
    fn absent_is_omitted() {
        let probe = Probe::default();
        assert_eq!(serde_json::to_value(&probe).unwrap(), json!({}));
    }

    #[test]
    fn null_and_value_are_sent() {
        let probe = Probe {
            name: Field::Null,
            ids: vec![1, 2].into(),
        };
        assert_eq!(
            serde_json::to_value(&probe).unwrap(),
            json!({"name": null, "ids": [1, 2]})
        );
    }

    #[test]
    fn deserialize_distinguishes_missing_from_null() {
        let probe: Probe = serde_json::from_value(json!({"name": null})).unwrap();
        assert_eq!(probe.name, Field::Null);
        assert_eq!(probe.ids, Field::Absent);

        let probe: Probe = serde_json::from_value(json!({"name": "ops"})).unwrap();
        assert_eq!(probe.name.as_value().map(String::as_str), Some("ops"));
    }

    #[test]
    fn option_none_converts_to_absent() {
        let field: Field<u64> = Field::from_option(None);
        assert!(field.is_absent());
        let field = Field::from_option(Some(3u64));
        assert_eq!(field.into_value(), Some(3));
    }
}
