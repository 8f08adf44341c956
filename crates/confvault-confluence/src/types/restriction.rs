//! Page restriction set.

use serde::{Deserialize, Serialize};

/// The read/update permission grants attached to a page.
///
/// Treated as an opaque pass-through document: saved verbatim at backup
/// time and replayed verbatim at restore time, never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RestrictionSet(pub serde_json::Value);
