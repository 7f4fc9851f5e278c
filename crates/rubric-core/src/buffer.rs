//! Per-document XML buffers
//!
//! Hosts keep one live tree per open document and re-serialize on
//! save. The [`BufferStore`] holds the last rendered XML for each
//! document together with a save status, so the host can tell at a
//! glance which documents still have unsaved edits and which failed
//! their last save.

use indexmap::IndexMap;

/// Save state of one buffered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferStatus {
    /// Buffer matches what is on disk.
    Saved,
    /// Buffer has edits that have not been written out.
    Dirty,
    /// The last attempt to write the buffer out failed.
    Error,
}

#[derive(Debug, Clone)]
struct Buffer {
    xml: String,
    status: BufferStatus,
}

/// In-memory store of rendered XML keyed by document id.
///
/// Iteration order is the order documents were first stored in, which
/// keeps host-side document lists stable across updates.
#[derive(Debug, Clone, Default)]
pub struct BufferStore {
    buffers: IndexMap<u64, Buffer>,
}

impl BufferStore {
    pub fn new() -> BufferStore {
        BufferStore::default()
    }

    /// Store fresh XML for a document. New and updated buffers both
    /// come out [`BufferStatus::Dirty`]; only an explicit
    /// [`mark_saved`](BufferStore::mark_saved) clears that.
    pub fn set_xml(&mut self, id: u64, xml: impl Into<String>) {
        let buffer = Buffer {
            xml: xml.into(),
            status: BufferStatus::Dirty,
        };
        self.buffers.insert(id, buffer);
    }

    /// Last stored XML for a document.
    pub fn xml(&self, id: u64) -> Option<&str> {
        self.buffers.get(&id).map(|buffer| buffer.xml.as_str())
    }

    /// Save status of a document, `None` when it was never stored.
    pub fn status(&self, id: u64) -> Option<BufferStatus> {
        self.buffers.get(&id).map(|buffer| buffer.status)
    }

    /// Record a successful save. Returns `false` for unknown ids.
    pub fn mark_saved(&mut self, id: u64) -> bool {
        self.set_status(id, BufferStatus::Saved)
    }

    /// Record a failed save. Returns `false` for unknown ids.
    pub fn mark_error(&mut self, id: u64) -> bool {
        self.set_status(id, BufferStatus::Error)
    }

    fn set_status(&mut self, id: u64, status: BufferStatus) -> bool {
        match self.buffers.get_mut(&id) {
            Some(buffer) => {
                buffer.status = status;
                true
            }
            None => false,
        }
    }

    /// Drop a document, returning its buffered XML if it existed.
    pub fn remove(&mut self, id: u64) -> Option<String> {
        // shift_remove keeps the remaining order intact
        self.buffers.shift_remove(&id).map(|buffer| buffer.xml)
    }

    /// Drop every buffered document.
    pub fn clear(&mut self) {
        self.buffers.clear();
    }

    /// Document ids in first-stored order.
    pub fn ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.buffers.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }
}
