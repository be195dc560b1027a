//! The generic inventory resource record and its nested parts.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::decode::{DecodeMode, ObjectShape};
use crate::error::Result;
use crate::models::{Link, ResourceKey};

/// A major or minor badge attached to a resource.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Badge {
    /// Badge type, as named by the platform.
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub badge_type: String,

    /// Color assigned by the platform.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub color: String,

    /// Absolute badge value, typically 0-100.
    pub score: f64,
}

static BADGE: ObjectShape = ObjectShape::new("Badge", &[], &["type", "color", "score"]);

impl Badge {
    pub(crate) fn decode(value: &Value, mode: DecodeMode) -> Result<Self> {
        let obj = BADGE.open(value, mode)?;
        Ok(Self {
            badge_type: obj.string("type")?.unwrap_or_default(),
            color: obj.string("color")?.unwrap_or_default(),
            score: obj.number("score")?.unwrap_or_default(),
        })
    }
}

/// Geographical location of a resource.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

static GEO_LOCATION: ObjectShape =
    ObjectShape::new("GeoLocation", &[], &["latitude", "longitude"]);

impl GeoLocation {
    pub(crate) fn decode(value: &Value, mode: DecodeMode) -> Result<Self> {
        let obj = GEO_LOCATION.open(value, mode)?;
        Ok(Self {
            latitude: obj.number("latitude")?.unwrap_or_default(),
            longitude: obj.number("longitude")?.unwrap_or_default(),
        })
    }
}

/// Collection state and status as reported by one adapter instance.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceStatusState {
    /// Adapter instance the state was reported by.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub adapter_instance_id: String,

    /// Human readable status message.
    #[serde(rename = "statusMessage", skip_serializing_if = "String::is_empty")]
    pub message: String,

    /// Resource state: STOPPED, NOT_EXISTING, NONE or UNKNOWN.
    #[serde(rename = "resourceState", skip_serializing_if = "String::is_empty")]
    pub state: String,

    /// Data collection status, for example DATA_RECEIVING or COLLECTOR_DOWN.
    #[serde(rename = "resourceStatus", skip_serializing_if = "String::is_empty")]
    pub status: String,
}

static STATUS_STATE: ObjectShape = ObjectShape::new(
    "ResourceStatusState",
    &[],
    &["adapterInstanceId", "statusMessage", "resourceState", "resourceStatus"],
);

impl ResourceStatusState {
    pub(crate) fn decode(value: &Value, mode: DecodeMode) -> Result<Self> {
        let obj = STATUS_STATE.open(value, mode)?;
        Ok(Self {
            adapter_instance_id: obj.string("adapterInstanceId")?.unwrap_or_default(),
            message: obj.string("statusMessage")?.unwrap_or_default(),
            state: obj.string("resourceState")?.unwrap_or_default(),
            status: obj.string("resourceStatus")?.unwrap_or_default(),
        })
    }
}

/// One inventory resource, a point-in-time snapshot of what the platform
/// reported.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Identifier of the resource, typically a UUID.
    #[serde(rename = "identifier", skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Description of the resource.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// When the resource was created in the system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,

    /// Identity of the resource. The platform can omit it.
    #[serde(rename = "resourceKey", skip_serializing_if = "Option::is_none")]
    pub key: Option<ResourceKey>,

    /// Credential instance assigned to this resource.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub credential_instance_id: String,

    /// Geographical location of the resource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo_location: Option<GeoLocation>,

    /// State and status per reporting adapter instance.
    #[serde(rename = "resourceStatusStates", skip_serializing_if = "Vec::is_empty")]
    pub status_states: Vec<ResourceStatusState>,

    /// Health of the resource.
    #[serde(rename = "resourceHealth", skip_serializing_if = "String::is_empty")]
    pub health: String,

    /// Health score.
    #[serde(rename = "resourceHealthValue")]
    pub health_value: f64,

    /// Whether dynamic threshold calculation is enabled.
    #[serde(rename = "dtEnabled")]
    pub dynamic_threshold_enabled: bool,

    /// Monitoring interval in minutes.
    pub monitoring_interval: f64,

    /// Major and minor badges with their values.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub badges: Vec<Badge>,

    /// Identifiers of related resources, kept opaque.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_resources: Vec<Value>,

    /// Third-party extension values, kept opaque.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Value>,

    /// Links related to this object.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

static SHAPE: ObjectShape = ObjectShape::new(
    "Resource",
    &[],
    &[
        "identifier",
        "description",
        "creationTime",
        "resourceKey",
        "credentialInstanceId",
        "geoLocation",
        "resourceStatusStates",
        "resourceHealth",
        "resourceHealthValue",
        "dtEnabled",
        "monitoringInterval",
        "badges",
        "relatedResources",
        "extension",
        "links",
    ],
);

impl Resource {
    pub(crate) fn decode(value: &Value, mode: DecodeMode) -> Result<Self> {
        let obj = SHAPE.open(value, mode)?;

        let key = match obj.raw("resourceKey") {
            Some(raw) => Some(ResourceKey::decode(raw, mode)?),
            None => None,
        };
        let geo_location = match obj.raw("geoLocation") {
            Some(raw) => Some(GeoLocation::decode(raw, mode)?),
            None => None,
        };
        let status_states = obj
            .array("resourceStatusStates")?
            .iter()
            .map(|item| ResourceStatusState::decode(item, mode))
            .collect::<Result<Vec<_>>>()?;
        let badges = obj
            .array("badges")?
            .iter()
            .map(|item| Badge::decode(item, mode))
            .collect::<Result<Vec<_>>>()?;
        let links = Link::decode_list(obj.array("links")?, mode)?;

        Ok(Self {
            id: obj.string("identifier")?.unwrap_or_default(),
            description: obj.string("description")?.unwrap_or_default(),
            creation_time: obj.timestamp_ms("creationTime")?,
            key,
            credential_instance_id: obj.string("credentialInstanceId")?.unwrap_or_default(),
            geo_location,
            status_states,
            health: obj.string("resourceHealth")?.unwrap_or_default(),
            health_value: obj.number("resourceHealthValue")?.unwrap_or_default(),
            dynamic_threshold_enabled: obj.boolean("dtEnabled")?.unwrap_or_default(),
            monitoring_interval: obj.number("monitoringInterval")?.unwrap_or_default(),
            badges,
            related_resources: obj.array("relatedResources")?.to_vec(),
            extension: obj.raw("extension").cloned(),
            links,
        })
    }

    /// Display name from the resource key, if present.
    pub fn name(&self) -> Option<&str> {
        self.key.as_ref().map(|key| key.name.as_str())
    }
}
