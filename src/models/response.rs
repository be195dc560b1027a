//! Paginated resource listing response.

use serde::Serialize;
use serde_json::Value;

use crate::decode::{DecodeMode, ObjectShape};
use crate::error::{Result, VropsError};
use crate::models::{Link, PageInfo, Resource};

/// One page of a resource listing.
///
/// The only kind with required keys: a page without all of `resourceList`,
/// `pageInfo` and `links` is rejected outright.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResourcesResponse {
    /// Paging metadata for this page.
    #[serde(rename = "pageInfo")]
    pub page: PageInfo,

    /// Navigation links for the listing.
    pub links: Vec<Link>,

    /// Resources on this page, in wire order.
    #[serde(rename = "resourceList")]
    pub resources: Vec<Resource>,
}

static SHAPE: ObjectShape = ObjectShape::new(
    "ResourcesResponse",
    &["resourceList", "pageInfo", "links"],
    &[],
);

impl ResourcesResponse {
    /// Decode a raw response body.
    pub fn from_slice(body: &[u8], mode: DecodeMode) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)?;
        Self::decode(&value, mode)
    }

    pub(crate) fn decode(value: &Value, mode: DecodeMode) -> Result<Self> {
        let obj = SHAPE.open(value, mode)?;

        let page = PageInfo::decode(obj.required("pageInfo")?, mode)?;
        let links = match obj.required("links")? {
            Value::Array(items) => Link::decode_list(items, mode)?,
            _ => {
                return Err(VropsError::TypeMismatch {
                    kind: "ResourcesResponse",
                    key: "links",
                    expected: "array",
                })
            }
        };
        let resources = match obj.required("resourceList")? {
            Value::Array(items) => items
                .iter()
                .map(|item| Resource::decode(item, mode))
                .collect::<Result<Vec<_>>>()?,
            _ => {
                return Err(VropsError::TypeMismatch {
                    kind: "ResourcesResponse",
                    key: "resourceList",
                    expected: "array",
                })
            }
        };

        Ok(Self {
            page,
            links,
            resources,
        })
    }
}
