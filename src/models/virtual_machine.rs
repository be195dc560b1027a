//! Virtual machine record projected from the generic resource model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::models::Resource;
use crate::traits::List;

// Identity attribute names carried by virtual machine resources.
const ID_INSTANCE_UUID: &str = "VMEntityInstanceUUID";
const ID_ENTITY_NAME: &str = "VMEntityName";
const ID_OBJECT_ID: &str = "VMEntityObjectID";
const ID_VC_ID: &str = "VMEntityVCID";
const ID_SERVICE_MONITORING: &str = "VMServiceMonitoringEnabled";

/// A virtual machine, as projected from one inventory [`Resource`].
///
/// The projection is lossy: only the identity attributes named above are
/// carried over, anything else the platform reports on the resource is
/// dropped. Enrichment problems are recorded in `errors` instead of failing
/// the projection.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachine {
    /// Resource identifier.
    #[serde(rename = "_id", skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Display name from the resource key.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Instance UUID assigned by the hypervisor.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub instance_uuid: String,

    /// Entity name as inventoried.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub entity_name: String,

    /// Object identifier within the owning vCenter.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub object_id: String,

    /// Identifier of the owning vCenter.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub vc_id: String,

    /// Whether service monitoring is enabled for this machine.
    pub service_monitoring_enabled: bool,

    /// When the resource was created in the platform.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When this record was fetched.
    pub last_seen_at: DateTime<Utc>,

    /// Non-fatal problems encountered while projecting this record.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl VirtualMachine {
    /// Project one decoded resource into a virtual machine record.
    ///
    /// Copies the resource id and creation time, takes the name from the
    /// resource key and scans the identity attributes for the known keys.
    /// Unrecognized identifier keys are ignored. The monitoring flag is set
    /// only by the literal values `true`, `True` or `TRUE`.
    pub fn from_resource(resource: &Resource) -> Self {
        let mut machine = Self {
            id: resource.id.clone(),
            name: String::new(),
            instance_uuid: String::new(),
            entity_name: String::new(),
            object_id: String::new(),
            vc_id: String::new(),
            service_monitoring_enabled: false,
            created_at: resource.creation_time,
            last_seen_at: Utc::now(),
            errors: Vec::new(),
        };

        match &resource.key {
            Some(key) => {
                machine.name = key.name.clone();
                for identifier in &key.resource_identifiers {
                    match identifier.key.as_str() {
                        ID_INSTANCE_UUID => machine.instance_uuid = identifier.value.clone(),
                        ID_ENTITY_NAME => machine.entity_name = identifier.value.clone(),
                        ID_OBJECT_ID => machine.object_id = identifier.value.clone(),
                        ID_VC_ID => machine.vc_id = identifier.value.clone(),
                        ID_SERVICE_MONITORING => {
                            machine.service_monitoring_enabled =
                                matches!(identifier.value.as_str(), "true" | "True" | "TRUE");
                        }
                        _ => {}
                    }
                }
            }
            None => machine
                .errors
                .push("resource has no resourceKey".to_string()),
        }

        machine
    }

    /// Serialize this record to a JSON string, one object per record.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl List for VirtualMachine {
    const RESOURCE_KIND: &'static str = "virtualmachine";

    fn project(resource: &Resource) -> Self {
        Self::from_resource(resource)
    }
}
