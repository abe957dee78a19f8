//! Dataset domain types.
//!
//! These types represent the desired allocation parameters of a dataset, its
//! content, and the state a caller persists between lifecycle calls.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::name::DatasetName;

/// Allocation parameters for a new sequential dataset.
///
/// Every field is optional: an empty string or a zero value means "unset",
/// and unset fields are left out of the allocation payload entirely so the
/// remote system applies its own defaults. Field names on the wire are the
/// z/OSMF REST files names (`volser`, `recfm`, `lrecl`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetAttributes {
    /// Volume serial.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub volser: String,
    /// Device type.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub unit: String,
    /// Dataset organization (e.g. `PS`).
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dsorg: String,
    /// Unit of space allocation (`TRK`, `CYL`, ...).
    #[serde(skip_serializing_if = "String::is_empty")]
    pub alcunit: String,
    /// Primary space allocation.
    #[serde(skip_serializing_if = "is_zero")]
    pub primary: u32,
    /// Secondary space allocation.
    #[serde(skip_serializing_if = "is_zero")]
    pub secondary: u32,
    /// Number of directory blocks.
    #[serde(skip_serializing_if = "is_zero")]
    pub dirblk: u32,
    /// Average block length.
    #[serde(skip_serializing_if = "is_zero")]
    pub avgblk: u32,
    /// Record format (`F`, `FB`, `V`, `VB`, `U`).
    #[serde(skip_serializing_if = "String::is_empty")]
    pub recfm: String,
    /// Block size.
    #[serde(skip_serializing_if = "is_zero")]
    pub blksize: u32,
    /// Logical record length.
    #[serde(skip_serializing_if = "is_zero")]
    pub lrecl: u32,
    /// SMS storage class.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub storclass: String,
    /// SMS management class.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub mgntclass: String,
    /// SMS data class.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dataclass: String,
    /// Dataset name type (`BASIC`, `LARGE`, ...).
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dsntype: String,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_zero(value: &u32) -> bool {
    *value == 0
}

impl DatasetAttributes {
    /// Returns true if no attribute is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Set the dataset organization.
    #[must_use]
    pub fn with_dsorg(mut self, dsorg: impl Into<String>) -> Self {
        self.dsorg = dsorg.into();
        self
    }

    /// Set the allocation unit and the primary/secondary quantities.
    #[must_use]
    pub fn with_space(mut self, alcunit: impl Into<String>, primary: u32, secondary: u32) -> Self {
        self.alcunit = alcunit.into();
        self.primary = primary;
        self.secondary = secondary;
        self
    }

    /// Set the record format.
    #[must_use]
    pub fn with_recfm(mut self, recfm: impl Into<String>) -> Self {
        self.recfm = recfm.into();
        self
    }

    /// Set the logical record length.
    #[must_use]
    pub const fn with_lrecl(mut self, lrecl: u32) -> Self {
        self.lrecl = lrecl;
        self
    }
}

/// The full body of a sequential dataset.
///
/// There is no partial or append form: every write replaces the whole body.
/// Bytes are kept exactly as received; nothing assumes the body is UTF-8.
/// Text content serializes as a JSON string, anything else as a byte array.
#[derive(Clone, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "ContentRepr")]
pub struct DatasetContent(Vec<u8>);

#[derive(Deserialize)]
#[serde(untagged)]
enum ContentRepr {
    Text(String),
    Bytes(Vec<u8>),
}

impl From<ContentRepr> for DatasetContent {
    fn from(repr: ContentRepr) -> Self {
        match repr {
            ContentRepr::Text(text) => Self(text.into_bytes()),
            ContentRepr::Bytes(bytes) => Self(bytes),
        }
    }
}

impl Serialize for DatasetContent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_str() {
            Some(text) => serializer.serialize_str(text),
            None => serializer.serialize_bytes(&self.0),
        }
    }
}

impl DatasetContent {
    /// The content as text, or `None` if it is not valid UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    /// Return the content as raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns true if the content is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length of the content in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

// Content can be large and is shown in logs by length only.
impl fmt::Debug for DatasetContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DatasetContent({} bytes)", self.0.len())
    }
}

impl From<Vec<u8>> for DatasetContent {
    fn from(content: Vec<u8>) -> Self {
        Self(content)
    }
}

impl From<String> for DatasetContent {
    fn from(content: String) -> Self {
        Self(content.into_bytes())
    }
}

impl From<&str> for DatasetContent {
    fn from(content: &str) -> Self {
        Self(content.as_bytes().to_vec())
    }
}

/// Managed lifecycle states of a dataset as confirmed by the remote system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetState {
    /// The dataset does not exist.
    Absent,
    /// Space is allocated but the content is empty or unknown.
    Allocated,
    /// Allocated and holding the desired content.
    Materialized,
}

impl DatasetState {
    /// Returns true if the dataset exists on the remote system.
    #[must_use]
    pub const fn exists(self) -> bool {
        matches!(self, Self::Allocated | Self::Materialized)
    }
}

impl fmt::Display for DatasetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Absent => "absent",
            Self::Allocated => "allocated",
            Self::Materialized => "materialized",
        };
        f.write_str(s)
    }
}

/// What a caller persists after a lifecycle call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRecord {
    /// Dataset name, also the remote resource key.
    pub name: DatasetName,
    /// Attributes the dataset was allocated with.
    pub attributes: DatasetAttributes,
    /// Last state confirmed by the remote system.
    pub state: DatasetState,
    /// Known content, or `None` if it could not be confirmed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<DatasetContent>,
    /// When the state was last confirmed.
    pub updated_at: DateTime<Utc>,
}

impl DatasetRecord {
    /// A dataset that was allocated but whose content is unknown.
    #[must_use]
    pub fn allocated(name: DatasetName, attributes: DatasetAttributes) -> Self {
        Self {
            name,
            attributes,
            state: DatasetState::Allocated,
            content: None,
            updated_at: Utc::now(),
        }
    }

    /// A dataset holding the given content.
    #[must_use]
    pub fn materialized(
        name: DatasetName,
        attributes: DatasetAttributes,
        content: DatasetContent,
    ) -> Self {
        Self {
            name,
            attributes,
            state: DatasetState::Materialized,
            content: Some(content),
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_attributes_serialize_to_empty_object() {
        let attributes = DatasetAttributes::default();
        assert!(attributes.is_empty());
        assert_eq!(serde_json::to_string(&attributes).unwrap(), "{}");
    }

    #[test]
    fn unset_fields_are_omitted() {
        let attributes = DatasetAttributes::default()
            .with_dsorg("PS")
            .with_space("TRK", 10, 0)
            .with_lrecl(80);

        let json: serde_json::Value = serde_json::to_value(&attributes).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), 4);
        assert_eq!(object["dsorg"], "PS");
        assert_eq!(object["alcunit"], "TRK");
        assert_eq!(object["primary"], 10);
        assert_eq!(object["lrecl"], 80);
        assert!(!object.contains_key("secondary"));
        assert!(!object.contains_key("volser"));
        assert!(!object.contains_key("blksize"));
    }

    #[test]
    fn every_field_uses_wire_name() {
        let attributes = DatasetAttributes {
            volser: "VOL001".into(),
            unit: "3390".into(),
            dsorg: "PS".into(),
            alcunit: "CYL".into(),
            primary: 1,
            secondary: 2,
            dirblk: 3,
            avgblk: 4,
            recfm: "FB".into(),
            blksize: 27920,
            lrecl: 80,
            storclass: "SC".into(),
            mgntclass: "MC".into(),
            dataclass: "DC".into(),
            dsntype: "BASIC".into(),
        };

        let json: serde_json::Value = serde_json::to_value(&attributes).unwrap();
        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            [
                "alcunit", "avgblk", "blksize", "dataclass", "dirblk", "dsntype", "dsorg",
                "lrecl", "mgntclass", "primary", "recfm", "secondary", "storclass", "unit",
                "volser"
            ]
        );
    }

    #[test]
    fn attributes_deserialize_with_defaults() {
        let attributes: DatasetAttributes =
            serde_json::from_str(r#"{"recfm":"VB","lrecl":255}"#).unwrap();
        assert_eq!(attributes.recfm, "VB");
        assert_eq!(attributes.lrecl, 255);
        assert_eq!(attributes.primary, 0);
        assert!(attributes.volser.is_empty());
    }

    #[test]
    fn content_debug_hides_body() {
        let content = DatasetContent::from("SECRET PAYLOAD");
        assert_eq!(format!("{content:?}"), "DatasetContent(14 bytes)");
        assert_eq!(content.as_str(), Some("SECRET PAYLOAD"));
    }

    #[test]
    fn content_keeps_non_utf8_bytes() {
        let ebcdic = DatasetContent::from(vec![0xC8, 0xC5, 0xD3, 0xD3, 0xD6]);
        assert_eq!(ebcdic.as_str(), None);
        assert_eq!(ebcdic.as_bytes(), [0xC8, 0xC5, 0xD3, 0xD3, 0xD6]);

        let json = serde_json::to_string(&ebcdic).unwrap();
        assert_eq!(json, "[200,197,211,211,214]");
        let back: DatasetContent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ebcdic);
    }

    #[test]
    fn text_content_serializes_as_string() {
        let content = DatasetContent::from("LINE 1\r\n");
        assert_eq!(serde_json::to_string(&content).unwrap(), r#""LINE 1\r\n""#);
        let back: DatasetContent = serde_json::from_str(r#""LINE 1\r\n""#).unwrap();
        assert_eq!(back, content);
    }

    #[test]
    fn state_display_and_existence() {
        assert_eq!(DatasetState::Allocated.to_string(), "allocated");
        assert!(!DatasetState::Absent.exists());
        assert!(DatasetState::Allocated.exists());
        assert!(DatasetState::Materialized.exists());
    }

    #[test]
    fn allocated_record_has_no_content() {
        let name = DatasetName::new("TEST.DS").unwrap();
        let record = DatasetRecord::allocated(name, DatasetAttributes::default());
        assert_eq!(record.state, DatasetState::Allocated);
        assert!(record.content.is_none());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["state"], "allocated");
        assert!(json.get("content").is_none());
    }
}
