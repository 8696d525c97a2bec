use std::fmt;

use serde::Serialize;

use crate::constants::FREE_CELL;
use crate::page_table::ProcessId;

/// State of one physical frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FrameState {
    Free,
    Owned { process: ProcessId, page: usize },
}

impl FrameState {
    #[inline]
    pub fn is_free(&self) -> bool {
        matches!(self, FrameState::Free)
    }
}

impl fmt::Display for FrameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameState::Free => f.pad(FREE_CELL),
            FrameState::Owned { process, page } => f.pad(&format!("P{}:{}", process, page)),
        }
    }
}

/// Physical memory as a fixed array of frames
pub struct FrameStore {
    frames: Vec<FrameState>,
}

impl FrameStore {
    /// Create a store of `physical_memory_size / page_size` free frames.
    /// Remainder bytes past the last whole frame are not addressable.
    pub fn new(physical_memory_size: usize, page_size: usize) -> Self {
        let count = physical_memory_size.checked_div(page_size).unwrap_or(0);
        FrameStore { frames: vec![FrameState::Free; count] }
    }

    #[inline]
    pub fn capacity_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn free_count(&self) -> usize {
        self.frames.iter().filter(|f| f.is_free()).count()
    }

    pub fn state(&self, index: usize) -> Option<FrameState> {
        self.frames.get(index).copied()
    }

    /// First-fit search for `num_pages` consecutive free frames.
    ///
    /// Scans in increasing index order and returns the lowest-indexed run,
    /// or `None` if no run of that length exists (or `num_pages` is zero).
    pub fn find_contiguous_free(&self, num_pages: usize) -> Option<Vec<usize>> {
        if num_pages == 0 {
            return None;
        }

        let mut run = 0;
        for (index, frame) in self.frames.iter().enumerate() {
            if frame.is_free() {
                run += 1;
            } else {
                run = 0;
            }

            if run == num_pages {
                let start = index + 1 - num_pages;
                return Some((start..=index).collect());
            }
        }

        None
    }

    /// Assign each listed frame to `pid`; page index is the position in the list
    pub fn mark_owned(&mut self, frames: &[usize], pid: ProcessId) {
        for (page, &index) in frames.iter().enumerate() {
            self.frames[index] = FrameState::Owned { process: pid, page };
        }
    }

    pub fn mark_free(&mut self, frames: &[usize]) {
        for &index in frames {
            self.frames[index] = FrameState::Free;
        }
    }

    pub fn snapshot(&self) -> &[FrameState] {
        &self.frames
    }
}

/// Printable view of every frame, one cell per frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryMap {
    pub frames: Vec<FrameState>,
}

impl MemoryMap {
    pub fn from_snapshot(snapshot: &[FrameState]) -> Self {
        MemoryMap { frames: snapshot.to_vec() }
    }

    /// Width shared by all cells so the header lines up with the row
    fn cell_width(&self) -> usize {
        self.frames
            .iter()
            .enumerate()
            .map(|(i, f)| f.to_string().len().max(i.to_string().len()))
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Display for MemoryMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.cell_width();

        let header: Vec<String> = (0..self.frames.len())
            .map(|i| format!("{:>width$}", i, width = width))
            .collect();
        writeln!(f, "{}", header.join(" "))?;

        let row: Vec<String> = self
            .frames
            .iter()
            .map(|frame| format!("{:>width$}", frame, width = width))
            .collect();
        write!(f, "{}", row.join(" "))
    }
}
