//! Typed representations of the Confluence API resources we touch.

mod node;
mod page;
mod restriction;

pub use node::{DescendantsPage, Node, NodeType, PageLinks};
pub use page::{Body, BodyContent, BodyFormat, CreateBody, CreatePageRequest, PageDetail, Version};
pub use restriction::RestrictionSet;
