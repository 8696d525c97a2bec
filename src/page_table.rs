use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::PageTableError;

/// Opaque process identifier issued by the memory manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProcessId(u64);

impl ProcessId {
    pub const fn new(raw: u64) -> Self {
        ProcessId(raw)
    }

    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maps each process to the ordered list of frames holding its pages.
///
/// Entry `k` of a list is the physical frame holding logical page `k`.
#[derive(Debug, Default)]
pub struct PageTable {
    entries: BTreeMap<ProcessId, Vec<usize>>,
}

impl PageTable {
    pub fn new() -> Self {
        PageTable { entries: BTreeMap::new() }
    }

    /// Record the frame list for a process that has no entry yet
    pub fn insert(&mut self, pid: ProcessId, frames: Vec<usize>) -> Result<(), PageTableError> {
        if self.entries.contains_key(&pid) {
            return Err(PageTableError::DuplicateProcess(pid));
        }
        self.entries.insert(pid, frames);
        Ok(())
    }

    /// Delete the entry for a process and hand back its frames
    pub fn remove(&mut self, pid: ProcessId) -> Result<Vec<usize>, PageTableError> {
        self.entries.remove(&pid).ok_or(PageTableError::UnknownProcess(pid))
    }

    pub fn lookup(&self, pid: ProcessId) -> Result<&[usize], PageTableError> {
        self.entries
            .get(&pid)
            .map(Vec::as_slice)
            .ok_or(PageTableError::UnknownProcess(pid))
    }

    #[inline]
    pub fn contains(&self, pid: ProcessId) -> bool {
        self.entries.contains_key(&pid)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Live processes in ascending id order
    pub fn processes(&self) -> impl Iterator<Item = ProcessId> + '_ {
        self.entries.keys().copied()
    }
}
