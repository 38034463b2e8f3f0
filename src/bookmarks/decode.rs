use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Deserializer;

use crate::error::{Error, Result};

/// Top level of a Chromium `Bookmarks` file.
#[derive(Debug, Clone, Deserialize)]
pub struct RootSet {
    pub roots: Roots,
    pub version: i64,
    pub checksum: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Roots {
    pub bookmark_bar: Folder,
    pub other: Folder,
    pub synced: Folder,
}

/// One of the three root folders. Unlike nested nodes, `children` is required.
#[derive(Debug, Clone, Deserialize)]
pub struct Folder {
    pub children: Vec<Node>,
    pub date_added: String,
    #[serde(default)]
    pub date_modified: Option<String>,
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Node {
    pub date_added: String,
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Folder,
    Url,
    #[serde(other)]
    Other,
}

impl RootSet {
    /// Root folders in the order their records are concatenated.
    pub fn folders(&self) -> [(&'static str, &Folder); 3] {
        [
            ("bookmark_bar", &self.roots.bookmark_bar),
            ("other", &self.roots.other),
            ("synced", &self.roots.synced),
        ]
    }
}

/// Folders can nest arbitrarily deep, so the recursion limit is off and the
/// stack grows on demand while decoding.
pub fn decode(raw: &[u8]) -> Result<RootSet> {
    let mut json = Deserializer::from_slice(raw);
    json.disable_recursion_limit();
    let set = RootSet::deserialize(serde_stacker::Deserializer::new(&mut json))?;
    json.end()?;
    Ok(set)
}

/// Read and decode a bookmarks file. The file handle is closed before decoding.
pub fn read_file(path: &Path) -> Result<RootSet> {
    let raw = fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode(&raw)
}
