//! Paging metadata model.

use serde::Serialize;
use serde_json::Value;

use crate::decode::{DecodeMode, ObjectShape};
use crate::error::Result;

/// Paging metadata attached to a list response.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Total number of results across all pages.
    #[serde(rename = "totalCount")]
    pub total: i64,

    /// The current page number, zero-based.
    pub page: i64,

    /// Number of entries allowed in a page.
    pub page_size: i64,

    /// CSV list of field names the results are sorted by.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub sort_by: String,

    /// CSV list of sort directions, ASCENDING assumed where unspecified.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub sort_order: String,
}

static SHAPE: ObjectShape = ObjectShape::new(
    "PageInfo",
    &[],
    &["totalCount", "page", "pageSize", "sortBy", "sortOrder"],
);

impl PageInfo {
    pub(crate) fn decode(value: &Value, mode: DecodeMode) -> Result<Self> {
        let obj = SHAPE.open(value, mode)?;
        Ok(Self {
            total: obj.number("totalCount")?.unwrap_or_default() as i64,
            page: obj.number("page")?.unwrap_or_default() as i64,
            page_size: obj.number("pageSize")?.unwrap_or_default() as i64,
            sort_by: obj.string("sortBy")?.unwrap_or_default(),
            sort_order: obj.string("sortOrder")?.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VropsError;
    use serde_json::json;

    #[test]
    fn test_decode_page_info() {
        let info = PageInfo::decode(
            &json!({
                "totalCount": 237.0_f64,
                "page": 2,
                "pageSize": 100,
                "sortBy": "name",
                "sortOrder": "ASCENDING"
            }),
            DecodeMode::Strict,
        )
        .unwrap();
        assert_eq!(info.total, 237);
        assert_eq!(info.page, 2);
        assert_eq!(info.page_size, 100);
        assert_eq!(info.sort_by, "name");
        assert_eq!(info.sort_order, "ASCENDING");
    }

    #[test]
    fn test_absent_fields_default_to_zero_values() {
        let info = PageInfo::decode(&json!({}), DecodeMode::Strict).unwrap();
        assert_eq!(info.total, 0);
        assert_eq!(info.page, 0);
        assert_eq!(info.page_size, 0);
        assert_eq!(info.sort_by, "");
    }

    #[test]
    fn test_unknown_key_fails_strict_decode() {
        let err =
            PageInfo::decode(&json!({"pageCount": 3}), DecodeMode::Strict).unwrap_err();
        assert!(matches!(
            err,
            VropsError::UnsupportedField { kind: "PageInfo", key } if key == "pageCount"
        ));
    }

    #[test]
    fn test_non_numeric_page_is_a_type_mismatch() {
        let err = PageInfo::decode(&json!({"page": "2"}), DecodeMode::Strict).unwrap_err();
        assert!(matches!(
            err,
            VropsError::TypeMismatch {
                kind: "PageInfo",
                key: "page",
                expected: "number"
            }
        ));
    }
}
