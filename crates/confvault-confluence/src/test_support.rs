//! In-memory fakes shared by backup and restore tests.

use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::json;

use crate::backup::BackupSource;
use crate::error::ConfluenceError;
use crate::restore::RestoreTarget;
use crate::types::{
    Body, BodyContent, BodyFormat, CreatePageRequest, DescendantsPage, Node, NodeType, PageDetail,
    PageLinks, RestrictionSet, Version,
};

/// Error shaped like a remote 404.
pub(crate) fn not_found() -> ConfluenceError {
    ConfluenceError::HttpResponse {
        status: 404,
        body: "Not found".to_owned(),
    }
}

pub(crate) fn page_node(id: &str, title: &str) -> Node {
    Node {
        id: id.to_owned(),
        node_type: NodeType::Page,
        title: title.to_owned(),
    }
}

pub(crate) fn folder_node(id: &str, title: &str) -> Node {
    Node {
        id: id.to_owned(),
        node_type: NodeType::Folder,
        title: title.to_owned(),
    }
}

/// Page detail carrying a single body representation.
pub(crate) fn page_detail(id: &str, title: &str, format: BodyFormat, value: &str) -> PageDetail {
    let mut body = Body::default();
    body.representations.insert(
        format.as_str().to_owned(),
        BodyContent {
            representation: format.as_str().to_owned(),
            value: value.to_owned(),
        },
    );
    PageDetail {
        id: id.to_owned(),
        title: title.to_owned(),
        space_id: "163842".to_owned(),
        parent_id: Some("F1".to_owned()),
        version: Version {
            number: 1,
            message: None,
        },
        body,
        extra: serde_json::Map::new(),
    }
}

pub(crate) fn restriction_set(marker: &str) -> RestrictionSet {
    RestrictionSet(json!({
        "results": [{"operation": "read", "marker": marker}]
    }))
}

/// Scripted [`BackupSource`] recording every call in order.
///
/// Anything not scripted answers with a 404-shaped error.
#[derive(Default)]
pub(crate) struct FakeSource {
    listings: HashMap<(String, Option<String>), DescendantsPage>,
    pages: HashMap<(String, &'static str), PageDetail>,
    restrictions: HashMap<String, RestrictionSet>,
    pub(crate) calls: RefCell<Vec<String>>,
}

impl FakeSource {
    /// Script one listing page for `(folder, cursor)`.
    pub(crate) fn add_listing(
        &mut self,
        folder_id: &str,
        cursor: Option<&str>,
        results: Vec<Node>,
        next_link: Option<&str>,
    ) {
        self.listings.insert(
            (folder_id.to_owned(), cursor.map(str::to_owned)),
            DescendantsPage {
                results,
                links: PageLinks {
                    next: next_link.map(str::to_owned),
                },
            },
        );
    }

    /// Script one body representation for a page.
    pub(crate) fn add_page(&mut self, id: &str, format: BodyFormat, detail: PageDetail) {
        self.pages.insert((id.to_owned(), format.as_str()), detail);
    }

    /// Script both representations plus a restriction set for a page.
    pub(crate) fn add_full_page(&mut self, id: &str, title: &str) {
        self.add_page(
            id,
            BodyFormat::Storage,
            page_detail(id, title, BodyFormat::Storage, &format!("<p>{id}</p>")),
        );
        self.add_page(
            id,
            BodyFormat::StyledView,
            page_detail(id, title, BodyFormat::StyledView, &format!("<html>{id}</html>")),
        );
        self.restrictions.insert(id.to_owned(), restriction_set(id));
    }
}

impl BackupSource for FakeSource {
    fn fetch_page(
        &self,
        page_id: &str,
        format: BodyFormat,
    ) -> Result<PageDetail, ConfluenceError> {
        self.calls
            .borrow_mut()
            .push(format!("get_page {page_id} {format}"));
        self.pages
            .get(&(page_id.to_owned(), format.as_str()))
            .cloned()
            .ok_or_else(not_found)
    }

    fn fetch_restrictions(&self, page_id: &str) -> Result<RestrictionSet, ConfluenceError> {
        self.calls
            .borrow_mut()
            .push(format!("get_restrictions {page_id}"));
        self.restrictions
            .get(page_id)
            .cloned()
            .ok_or_else(not_found)
    }

    fn list_descendants(
        &self,
        folder_id: &str,
        cursor: Option<&str>,
    ) -> Result<DescendantsPage, ConfluenceError> {
        self.calls.borrow_mut().push(format!(
            "list {folder_id} {}",
            cursor.unwrap_or("none")
        ));
        self.listings
            .get(&(folder_id.to_owned(), cursor.map(str::to_owned)))
            .cloned()
            .ok_or_else(not_found)
    }
}

/// Recording [`RestoreTarget`].
#[derive(Default)]
pub(crate) struct FakeTarget {
    /// Create requests received, in order.
    pub(crate) created: RefCell<Vec<CreatePageRequest>>,
    /// Restriction sets applied, keyed by page ID, in order.
    pub(crate) restricted: RefCell<Vec<(String, RestrictionSet)>>,
    /// When set, `create_page` fails with this status.
    pub(crate) fail_create: Option<u16>,
    /// When true, `put_restrictions` fails.
    pub(crate) fail_restrictions: bool,
}

impl RestoreTarget for FakeTarget {
    fn create_page(&self, request: &CreatePageRequest) -> Result<PageDetail, ConfluenceError> {
        if let Some(status) = self.fail_create {
            return Err(ConfluenceError::HttpResponse {
                status,
                body: "create failed".to_owned(),
            });
        }
        self.created.borrow_mut().push(request.clone());
        Ok(page_detail(
            "new-id",
            &request.title,
            BodyFormat::Storage,
            &request.body.value,
        ))
    }

    fn put_restrictions(
        &self,
        page_id: &str,
        restrictions: &RestrictionSet,
    ) -> Result<(), ConfluenceError> {
        if self.fail_restrictions {
            return Err(ConfluenceError::HttpResponse {
                status: 403,
                body: "forbidden".to_owned(),
            });
        }
        self.restricted
            .borrow_mut()
            .push((page_id.to_owned(), restrictions.clone()));
        Ok(())
    }
}
