//! Folder descendant listing types.

use percent_encoding::percent_decode_str;
use serde::Deserialize;

/// One entry in a folder's descendant listing.
///
/// Folders and pages share this shape; pages carry body and version data
/// only once fetched in detail.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Node {
    /// Content ID.
    pub id: String,
    /// Content type.
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Display title.
    pub title: String,
}

/// Content type of a listed descendant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// A container that may hold further folders and pages.
    Folder,
    /// A leaf content node with renderable bodies.
    Page,
    /// Anything else (whiteboard, database, ...): listed but not backed up.
    #[serde(untagged)]
    Other(String),
}

/// One page of a folder's descendant listing.
#[derive(Debug, Clone, Deserialize)]
pub struct DescendantsPage {
    /// Listed descendants, in server order.
    #[serde(default)]
    pub results: Vec<Node>,
    /// Hypermedia links.
    #[serde(rename = "_links", default)]
    pub links: PageLinks,
}

/// Hypermedia links on a listing response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageLinks {
    /// Relative URL of the next results page, when more results exist.
    #[serde(default)]
    pub next: Option<String>,
}

impl DescendantsPage {
    /// Continuation cursor extracted from the `next` link, if any.
    #[must_use]
    pub fn next_cursor(&self) -> Option<String> {
        self.links.next.as_deref().and_then(cursor_from_next_link)
    }
}

/// Pull the `cursor` query parameter out of a `next` link.
fn cursor_from_next_link(link: &str) -> Option<String> {
    let (_, query) = link.split_once('?')?;
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == "cursor").then(|| percent_decode_str(value).decode_utf8_lossy().into_owned())
    })
}
