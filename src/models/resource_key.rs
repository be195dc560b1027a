//! Resource key and resource identifier models.
//!
//! The resource key encapsulates the identity of a resource: its display
//! name, the adapter and resource kinds it belongs to, and a list of
//! identifier key-value pairs whose key set varies per resource kind.

use serde::Serialize;
use serde_json::Value;

use crate::decode::{DecodeMode, ObjectShape};
use crate::error::{Result, VropsError};
use crate::models::Link;

/// One identity attribute of a resource, flattened to a key-value pair.
///
/// On the wire the key lives under a nested `identifierType` object together
/// with a declared data type; only `STRING` identifiers are supported.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ResourceIdentifier {
    /// Identifier name, from `identifierType.name`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub key: String,

    /// Identifier value; empty when the platform omitted it.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
}

// The identifier top level is read by explicit lookup (identifierType and
// value only), never scanned; the nested identifierType object is scanned.
static IDENTIFIER: ObjectShape =
    ObjectShape::new("ResourceIdentifier", &[], &["identifierType", "value"]);
static IDENTIFIER_TYPE: ObjectShape = ObjectShape::new(
    "ResourceIdentifier.identifierType",
    &[],
    &["name", "dataType", "isPartOfUniqueness"],
);

impl ResourceIdentifier {
    /// Two-step unpack: first the nested `identifierType` object yields the
    /// name and declared data type, then the top-level `value` is coerced
    /// according to that type.
    pub(crate) fn decode(value: &Value, mode: DecodeMode) -> Result<Self> {
        let obj = IDENTIFIER.open(value, DecodeMode::Lenient)?;

        let mut name = String::new();
        let mut data_type = String::new();
        if let Some(identifier_type) = obj.raw("identifierType") {
            let it = IDENTIFIER_TYPE.open(identifier_type, mode)?;
            name = it.string("name")?.unwrap_or_default();
            data_type = it.string("dataType")?.unwrap_or_default();
            // isPartOfUniqueness is recognized but not carried over.
        }

        let mut value_text = String::new();
        if obj.raw("value").is_some() {
            if data_type != "STRING" {
                return Err(VropsError::UnsupportedDataType { name, data_type });
            }
            value_text = obj.string("value")?.unwrap_or_default();
        }

        if name.is_empty() {
            return Err(VropsError::MissingField {
                kind: "ResourceIdentifier",
                key: "identifierType.name",
            });
        }

        Ok(Self {
            key: name,
            value: value_text,
        })
    }
}

/// The identity of a resource.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceKey {
    /// Display name of the resource.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Adapter kind the resource belongs to.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub adapter_kind_key: String,

    /// Resource kind the resource belongs to.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub resource_kind_key: String,

    /// Identity attributes, in wire order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub resource_identifiers: Vec<ResourceIdentifier>,

    /// Links related to this object.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,

    /// Third-party extension values, kept opaque.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Value>,
}

static SHAPE: ObjectShape = ObjectShape::new(
    "ResourceKey",
    &[],
    &[
        "name",
        "adapterKindKey",
        "resourceKindKey",
        "resourceIdentifiers",
        "links",
        "extension",
    ],
);

impl ResourceKey {
    pub(crate) fn decode(value: &Value, mode: DecodeMode) -> Result<Self> {
        let obj = SHAPE.open(value, mode)?;

        let resource_identifiers = obj
            .array("resourceIdentifiers")?
            .iter()
            .map(|item| ResourceIdentifier::decode(item, mode))
            .collect::<Result<Vec<_>>>()?;
        let links = Link::decode_list(obj.array("links")?, mode)?;

        Ok(Self {
            name: obj.string("name")?.unwrap_or_default(),
            adapter_kind_key: obj.string("adapterKindKey")?.unwrap_or_default(),
            resource_kind_key: obj.string("resourceKindKey")?.unwrap_or_default(),
            resource_identifiers,
            links,
            extension: obj.raw("extension").cloned(),
        })
    }

    /// Value of the named identity attribute, if the resource carries it.
    pub fn identifier_value(&self, name: &str) -> Option<&str> {
        self.resource_identifiers
            .iter()
            .find(|id| id.key == name)
            .map(|id| id.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn identifier(name: &str, data_type: &str, value: &str) -> Value {
        json!({
            "identifierType": {
                "name": name,
                "dataType": data_type,
                "isPartOfUniqueness": true
            },
            "value": value
        })
    }

    #[test]
    fn test_two_step_identifier_decode() {
        let id = ResourceIdentifier::decode(
            &identifier("VMEntityName", "STRING", "vm-042"),
            DecodeMode::Strict,
        )
        .unwrap();
        assert_eq!(id.key, "VMEntityName");
        assert_eq!(id.value, "vm-042");
    }

    #[test]
    fn test_absent_value_is_accepted_as_empty() {
        let id = ResourceIdentifier::decode(
            &json!({"identifierType": {"name": "VMEntityVCID", "dataType": "STRING"}}),
            DecodeMode::Strict,
        )
        .unwrap();
        assert_eq!(id.key, "VMEntityVCID");
        assert_eq!(id.value, "");
    }

    #[test]
    fn test_non_string_data_type_is_unsupported() {
        let err = ResourceIdentifier::decode(
            &identifier("VMEntityVCID", "INTEGER", "7"),
            DecodeMode::Strict,
        )
        .unwrap_err();
        match err {
            VropsError::UnsupportedDataType { name, data_type } => {
                assert_eq!(name, "VMEntityVCID");
                assert_eq!(data_type, "INTEGER");
            }
            other => panic!("expected UnsupportedDataType, got {other:?}"),
        }
    }

    #[test]
    fn test_value_without_declared_data_type_is_unsupported() {
        let err = ResourceIdentifier::decode(
            &json!({"identifierType": {"name": "VMEntityVCID"}, "value": "7"}),
            DecodeMode::Strict,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            VropsError::UnsupportedDataType { data_type, .. } if data_type.is_empty()
        ));
    }

    #[test]
    fn test_missing_name_fails() {
        let err = ResourceIdentifier::decode(
            &json!({"identifierType": {"dataType": "STRING"}}),
            DecodeMode::Strict,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            VropsError::MissingField {
                kind: "ResourceIdentifier",
                key: "identifierType.name"
            }
        ));
    }

    #[test]
    fn test_unknown_identifier_type_key_fails_strict_decode() {
        let err = ResourceIdentifier::decode(
            &json!({"identifierType": {"name": "x", "enumValues": []}}),
            DecodeMode::Strict,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            VropsError::UnsupportedField { kind: "ResourceIdentifier.identifierType", key }
                if key == "enumValues"
        ));
    }

    #[test]
    fn test_identifier_top_level_is_read_not_scanned() {
        // Only identifierType and value are consulted at the top level.
        let id = ResourceIdentifier::decode(
            &json!({
                "identifierType": {"name": "x", "dataType": "STRING"},
                "value": "1",
                "somethingElse": 42
            }),
            DecodeMode::Strict,
        )
        .unwrap();
        assert_eq!(id.key, "x");
    }

    #[test]
    fn test_decode_resource_key() {
        let key = ResourceKey::decode(
            &json!({
                "name": "vm-042",
                "adapterKindKey": "VMWARE",
                "resourceKindKey": "VirtualMachine",
                "resourceIdentifiers": [
                    identifier("VMEntityInstanceUUID", "STRING", "502f9f3b"),
                    identifier("VMEntityName", "STRING", "vm-042")
                ],
                "links": [{"href": "/suite-api/api/resources/abc", "rel": "SELF"}],
                "extension": {"anyThing": [1, 2, 3]}
            }),
            DecodeMode::Strict,
        )
        .unwrap();

        assert_eq!(key.name, "vm-042");
        assert_eq!(key.adapter_kind_key, "VMWARE");
        assert_eq!(key.resource_kind_key, "VirtualMachine");
        assert_eq!(key.resource_identifiers.len(), 2);
        assert_eq!(key.links.len(), 1);
        assert!(key.extension.is_some());
        assert_eq!(key.identifier_value("VMEntityInstanceUUID"), Some("502f9f3b"));
        assert_eq!(key.identifier_value("VMEntityVCID"), None);
    }

    #[test]
    fn test_resource_key_rejects_unknown_key() {
        let err = ResourceKey::decode(&json!({"nickname": "x"}), DecodeMode::Strict).unwrap_err();
        assert!(matches!(
            err,
            VropsError::UnsupportedField { kind: "ResourceKey", key } if key == "nickname"
        ));
    }

    #[test]
    fn test_resource_key_lenient_skips_unknown_key() {
        let key =
            ResourceKey::decode(&json!({"nickname": "x", "name": "vm"}), DecodeMode::Lenient)
                .unwrap();
        assert_eq!(key.name, "vm");
    }

    #[test]
    fn test_bad_identifier_fails_the_whole_key() {
        let err = ResourceKey::decode(
            &json!({"resourceIdentifiers": [identifier("id", "INTEGER", "1")]}),
            DecodeMode::Strict,
        )
        .unwrap_err();
        assert!(matches!(err, VropsError::UnsupportedDataType { .. }));
    }
}
