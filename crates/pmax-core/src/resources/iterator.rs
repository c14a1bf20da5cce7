//! Paginated iterator resource.

use serde::{Deserialize, Serialize};

/// One element of an iterator page.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VolumeIdEntry {
    #[serde(rename = "volumeId")]
    pub volume_id: String,
}

/// An offset range of results, `[from, to]` 1-based inclusive.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VolumeResultList {
    pub from: u32,
    pub to: u32,
    #[serde(rename = "result", default)]
    pub volumes: Vec<VolumeIdEntry>,
}

impl VolumeResultList {
    /// The volume ids of this page, in offset order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.volumes.iter().map(|v| v.volume_id.as_str())
    }
}

/// Server-held cursor state over a result set too large for one response.
///
/// Returned by listing endpoints with the first page embedded in
/// `result_list`. The union of all pages is exactly `count` elements,
/// ordered by offset, and each page holds at most `max_page_size`
/// elements. Iterators expire server-side at `expiration_time`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VolumeIterator {
    pub id: String,
    pub count: u32,
    #[serde(rename = "maxPageSize")]
    pub max_page_size: u32,
    #[serde(rename = "expirationTime", default)]
    pub expiration_time: i64,
    #[serde(rename = "resultList")]
    pub result_list: VolumeResultList,
}

impl VolumeIterator {
    /// True when the entire result set fit in the embedded first page.
    ///
    /// The server keeps no cursor state in that case, so there is nothing
    /// to release.
    pub fn is_single_page(&self) -> bool {
        self.max_page_size >= self.count
    }
}
