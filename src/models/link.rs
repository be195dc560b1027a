//! Hypermedia link model.

use serde::Serialize;
use serde_json::Value;

use crate::decode::{DecodeMode, ObjectShape};
use crate::error::Result;

/// A reference to a related API object or page.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Link {
    /// Target URL. Absolute when it starts with `/` or a protocol element,
    /// relative to the current URL otherwise.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub href: String,

    /// Display name of the link.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Link relation: NEXT, PREVIOUS, START, END, RELATED or SELF.
    /// Kept as free text, not validated.
    #[serde(rename = "rel", skip_serializing_if = "String::is_empty")]
    pub relation: String,
}

static SHAPE: ObjectShape = ObjectShape::new("Link", &[], &["href", "name", "rel"]);

impl Link {
    pub(crate) fn decode(value: &Value, mode: DecodeMode) -> Result<Self> {
        let obj = SHAPE.open(value, mode)?;
        Ok(Self {
            href: obj.string("href")?.unwrap_or_default(),
            name: obj.string("name")?.unwrap_or_default(),
            relation: obj.string("rel")?.unwrap_or_default(),
        })
    }

    pub(crate) fn decode_list(values: &[Value], mode: DecodeMode) -> Result<Vec<Self>> {
        values.iter().map(|item| Self::decode(item, mode)).collect()
    }
}
