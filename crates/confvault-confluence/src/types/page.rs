//! Page detail and creation types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Body representation accepted by the page endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
    /// Structured format accepted as input to page creation (restorable).
    Storage,
    /// Self-contained rendered HTML (human-readable, not restorable).
    StyledView,
    /// Rendered view.
    View,
    /// Export view.
    ExportView,
    /// Export view without user-specific content.
    AnonymousExportView,
    /// Editor format.
    Editor,
}

impl BodyFormat {
    /// Wire name used in `body-format` query parameters and body keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Storage => "storage",
            Self::StyledView => "styled_view",
            Self::View => "view",
            Self::ExportView => "export_view",
            Self::AnonymousExportView => "anonymous_export_view",
            Self::Editor => "editor",
        }
    }
}

impl fmt::Display for BodyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full page representation as returned by `GET /pages/{id}`.
///
/// The fields backup and restore rely on are typed; everything else the
/// server sends is kept in `extra` so the saved artifact stays a faithful
/// copy of the server document.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PageDetail {
    /// Page ID.
    pub id: String,
    /// Page title.
    pub title: String,
    /// Space the page lives in.
    #[serde(rename = "spaceId")]
    pub space_id: String,
    /// Parent content ID, absent for top-level pages.
    #[serde(rename = "parentId", default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Version information.
    pub version: Version,
    /// Body content, keyed by representation.
    #[serde(default)]
    pub body: Body,
    /// Unmodeled response fields, passed through verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Page version.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Version {
    /// Version number.
    pub number: u32,
    /// Version message/comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Page body content, keyed by representation name.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Body {
    /// Representations present on this detail (usually exactly the one
    /// that was requested).
    #[serde(flatten)]
    pub representations: BTreeMap<String, BodyContent>,
}

impl Body {
    /// Content for the given representation, if present.
    #[must_use]
    pub fn get(&self, format: BodyFormat) -> Option<&BodyContent> {
        self.representations.get(format.as_str())
    }

    /// Storage-format body value, if present.
    #[must_use]
    pub fn storage_value(&self) -> Option<&str> {
        self.get(BodyFormat::Storage).map(|c| c.value.as_str())
    }
}

/// One body representation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BodyContent {
    /// Representation name (matches the map key).
    pub representation: String,
    /// Content in that representation.
    pub value: String,
}

/// Payload for `POST /pages`.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePageRequest {
    /// Content type, always `"page"`.
    #[serde(rename = "type")]
    pub content_type: String,
    /// Content status, always `"current"`.
    pub status: String,
    /// Page title.
    pub title: String,
    /// Target space ID.
    #[serde(rename = "spaceId")]
    pub space_id: String,
    /// Parent content ID, omitted when absent.
    #[serde(rename = "parentId", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Storage-format body.
    pub body: CreateBody,
}

/// Body section of a create-page payload.
#[derive(Debug, Clone, Serialize)]
pub struct CreateBody {
    /// Always `"storage"`.
    pub representation: String,
    /// Storage-format content.
    pub value: String,
}

impl CreatePageRequest {
    /// Build a create-page payload from its required parts.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        space_id: impl Into<String>,
        parent_id: Option<String>,
        storage_value: impl Into<String>,
    ) -> Self {
        Self {
            content_type: "page".to_owned(),
            status: "current".to_owned(),
            title: title.into(),
            space_id: space_id.into(),
            parent_id,
            body: CreateBody {
                representation: "storage".to_owned(),
                value: storage_value.into(),
            },
        }
    }
}
