use std::slice;

use tracing::{debug, info};

use super::decode::{Node, NodeKind, RootSet};
use crate::db::Record;

/// Flatten a sibling sequence into url records, depth-first and left to right.
///
/// Folders contribute only their descendants. Empty folders and unknown node
/// types are skipped. Duplicate urls are kept; the store deduplicates.
///
/// Walks with an explicit stack of sibling iterators, so nesting depth does
/// not grow the call stack.
pub fn extract(nodes: &[Node]) -> Vec<Record> {
    let mut records = Vec::new();
    let mut stack: Vec<slice::Iter<'_, Node>> = vec![nodes.iter()];

    while let Some(siblings) = stack.last_mut() {
        let Some(node) = siblings.next() else {
            stack.pop();
            continue;
        };
        match node.kind {
            NodeKind::Url => records.push(Record {
                name: node.name.clone(),
                url: node.url.clone().unwrap_or_default(),
            }),
            NodeKind::Folder => {
                if !node.children.is_empty() {
                    stack.push(node.children.iter());
                }
            }
            NodeKind::Other => {
                debug!(id = %node.id, name = %node.name, "skipping node of unknown type");
            }
        }
    }

    records
}

/// Extract every root and concatenate: bookmark bar, other, synced.
pub fn extract_roots(set: &RootSet) -> Vec<Record> {
    let mut all = Vec::new();
    for (root, folder) in set.folders() {
        let records = extract(&folder.children);
        info!(root = root, count = records.len(), "Extracted root");
        all.extend(records);
    }
    all
}
