use log::{debug, error, warn};
use serde::Serialize;

use crate::constants::*;
use crate::error::{AllocationError, ConfigError, DeallocationError, TranslationError};
use crate::memory::{FrameState, FrameStore, MemoryMap};
use crate::page_table::{PageTable, ProcessId};
use crate::translation;

/// Sizes fixed for the lifetime of a simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryConfig {
    logical_memory_size: usize,
    page_size: usize,
    physical_memory_size: usize,
}

impl MemoryConfig {
    /// Validate the sizes. A physical size that is not a multiple of the page
    /// size is accepted; the trailing partial frame simply does not exist.
    pub fn new(
        logical_memory_size: usize,
        page_size: usize,
        physical_memory_size: usize,
    ) -> Result<Self, ConfigError> {
        if page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if physical_memory_size < page_size {
            return Err(ConfigError::NoFrames { physical_memory_size, page_size });
        }
        let frames = physical_memory_size / page_size;
        if frames > MAX_FRAMES {
            return Err(ConfigError::TooManyFrames { frames, limit: MAX_FRAMES });
        }

        let config = MemoryConfig { logical_memory_size, page_size, physical_memory_size };
        if config.unaddressable_bytes() > 0 {
            warn!(
                "physical memory size {} is not a multiple of page size {}; {} trailing bytes unaddressable",
                physical_memory_size,
                page_size,
                config.unaddressable_bytes()
            );
        }
        Ok(config)
    }

    pub fn logical_memory_size(&self) -> usize {
        self.logical_memory_size
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn physical_memory_size(&self) -> usize {
        self.physical_memory_size
    }

    pub fn unaddressable_bytes(&self) -> usize {
        self.physical_memory_size % self.page_size
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        MemoryConfig {
            logical_memory_size: DEFAULT_LOGICAL_MEMORY_SIZE,
            page_size: DEFAULT_PAGE_SIZE,
            physical_memory_size: DEFAULT_PHYSICAL_MEMORY_SIZE,
        }
    }
}

/// Occupancy summary for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemoryStats {
    pub total_frames: usize,
    pub free_frames: usize,
    pub used_frames: usize,
    pub processes: usize,
    pub unaddressable_bytes: usize,
}

/// Owns the frame store, the page table and the process id counter.
///
/// Every operation validates before it mutates, so a rejected call leaves
/// the manager exactly as it was.
pub struct MemoryManager {
    config: MemoryConfig,
    frames: FrameStore,
    page_table: PageTable,
    next_pid: u64,
}

impl MemoryManager {
    pub fn new(config: MemoryConfig) -> Self {
        MemoryManager {
            frames: FrameStore::new(config.physical_memory_size, config.page_size),
            page_table: PageTable::new(),
            next_pid: FIRST_PROCESS_ID,
            config,
        }
    }

    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    #[inline]
    pub fn capacity_frames(&self) -> usize {
        self.frames.capacity_frames()
    }

    /// Allocate `num_pages` contiguous frames to a new process
    pub fn allocate(&mut self, num_pages: usize) -> Result<ProcessId, AllocationError> {
        let result = self.try_allocate(num_pages);
        match &result {
            Ok(pid) => debug!(
                "allocated {} pages for process {} at frames {:?}",
                num_pages,
                pid,
                self.frames_of(*pid).unwrap_or_default()
            ),
            Err(err) => debug!("allocation of {} pages rejected: {}", num_pages, err),
        }
        result
    }

    fn try_allocate(&mut self, num_pages: usize) -> Result<ProcessId, AllocationError> {
        if num_pages == 0 {
            return Err(AllocationError::ZeroPages);
        }

        let requested = num_pages.checked_mul(self.config.page_size);
        if requested.is_none_or(|bytes| bytes > self.config.logical_memory_size) {
            return Err(AllocationError::ExceedsLogicalMemory);
        }

        if num_pages > self.frames.capacity_frames() {
            return Err(AllocationError::ExceedsPhysicalMemory);
        }

        let free = self
            .frames
            .find_contiguous_free(num_pages)
            .ok_or(AllocationError::InsufficientContiguousSpace)?;

        let pid = ProcessId::new(self.next_pid);
        if let Err(err) = self.page_table.insert(pid, free.clone()) {
            error!("id counter issued a live process id: {}", err);
            return Err(AllocationError::DuplicateProcess(pid));
        }
        self.frames.mark_owned(&free, pid);
        self.next_pid += 1;

        Ok(pid)
    }

    /// Release every frame held by `pid` and drop its page table entry
    pub fn deallocate(&mut self, pid: ProcessId) -> Result<(), DeallocationError> {
        let frames = self.page_table.remove(pid).map_err(|err| {
            debug!("deallocation rejected: {}", err);
            DeallocationError::UnknownProcess(pid)
        })?;
        self.frames.mark_free(&frames);
        debug!("deallocated process {}, freed frames {:?}", pid, frames);
        Ok(())
    }

    /// Translate a logical address of `pid` to a physical address
    pub fn translate(&self, pid: ProcessId, logical_address: i64) -> Result<usize, TranslationError> {
        let frames = self
            .page_table
            .lookup(pid)
            .map_err(|_| TranslationError::UnknownProcess(pid))?;

        let result = translation::translate(pid, frames, logical_address, self.config.page_size);
        match &result {
            Ok(pa) => debug!("process {}: LA {} -> PA {}", pid, logical_address, pa),
            Err(err) => debug!("translation rejected: {}", err),
        }
        result
    }

    pub fn contains(&self, pid: ProcessId) -> bool {
        self.page_table.contains(pid)
    }

    /// Copy of the frames backing `pid`, in logical page order
    pub fn frames_of(&self, pid: ProcessId) -> Option<Vec<usize>> {
        self.page_table.lookup(pid).ok().map(<[usize]>::to_vec)
    }

    pub fn processes(&self) -> impl Iterator<Item = ProcessId> + '_ {
        self.page_table.processes()
    }

    pub fn snapshot(&self) -> &[FrameState] {
        self.frames.snapshot()
    }

    pub fn memory_map(&self) -> MemoryMap {
        MemoryMap::from_snapshot(self.frames.snapshot())
    }

    pub fn stats(&self) -> MemoryStats {
        let total_frames = self.frames.capacity_frames();
        let free_frames = self.frames.free_count();
        MemoryStats {
            total_frames,
            free_frames,
            used_frames: total_frames - free_frames,
            processes: self.page_table.len(),
            unaddressable_bytes: self.config.unaddressable_bytes(),
        }
    }
}

impl Default for MemoryManager {
    fn default() -> Self {
        Self::new(MemoryConfig::default())
    }
}
