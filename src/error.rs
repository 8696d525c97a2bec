use std::fmt;

use crate::page_table::ProcessId;

/// Rejected memory configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    ZeroPageSize,
    /// Physical memory is smaller than a single page
    NoFrames { physical_memory_size: usize, page_size: usize },
    /// More frames than the simulator will track
    TooManyFrames { frames: usize, limit: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroPageSize => write!(f, "Page size must be greater than zero"),
            ConfigError::NoFrames { physical_memory_size, page_size } => write!(
                f,
                "Physical memory size {} holds no frame of page size {}",
                physical_memory_size, page_size
            ),
            ConfigError::TooManyFrames { frames, limit } => write!(
                f,
                "Physical memory holds {} frames, more than the limit of {}",
                frames, limit
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Why an allocation was rejected. No state is mutated in any of these cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationError {
    ZeroPages,
    ExceedsLogicalMemory,
    ExceedsPhysicalMemory,
    InsufficientContiguousSpace,
    /// The issued id was already present in the page table. Indicates a bug
    /// in id generation, never bad user input.
    DuplicateProcess(ProcessId),
}

impl fmt::Display for AllocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationError::ZeroPages => write!(f, "Cannot allocate zero pages"),
            AllocationError::ExceedsLogicalMemory => {
                write!(f, "Not enough logical memory for allocation")
            }
            AllocationError::ExceedsPhysicalMemory => {
                write!(f, "Not enough physical memory for allocation")
            }
            AllocationError::InsufficientContiguousSpace => {
                write!(f, "Not enough contiguous free pages in physical memory")
            }
            AllocationError::DuplicateProcess(pid) => {
                write!(f, "Process {} already present in page table", pid)
            }
        }
    }
}

impl std::error::Error for AllocationError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTableError {
    DuplicateProcess(ProcessId),
    UnknownProcess(ProcessId),
}

impl fmt::Display for PageTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageTableError::DuplicateProcess(pid) => {
                write!(f, "Process {} already present in page table", pid)
            }
            PageTableError::UnknownProcess(pid) => {
                write!(f, "Process {} not found in page table", pid)
            }
        }
    }
}

impl std::error::Error for PageTableError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeallocationError {
    UnknownProcess(ProcessId),
}

impl fmt::Display for DeallocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeallocationError::UnknownProcess(pid) => {
                write!(f, "Process {} not found in page table", pid)
            }
        }
    }
}

impl std::error::Error for DeallocationError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationError {
    UnknownProcess(ProcessId),
    /// Page number out of range for the process, or a negative address
    InvalidAddress { process: ProcessId, address: i64 },
}

impl fmt::Display for TranslationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationError::UnknownProcess(pid) => {
                write!(f, "Process {} not found in page table", pid)
            }
            TranslationError::InvalidAddress { process, address } => {
                write!(f, "Invalid logical address {} for process {}", address, process)
            }
        }
    }
}

impl std::error::Error for TranslationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_messages() {
        assert_eq!(
            AllocationError::ExceedsLogicalMemory.to_string(),
            "Not enough logical memory for allocation"
        );
        assert_eq!(
            AllocationError::InsufficientContiguousSpace.to_string(),
            "Not enough contiguous free pages in physical memory"
        );
    }

    #[test]
    fn test_translation_messages() {
        let pid = ProcessId::new(3);
        assert_eq!(
            TranslationError::UnknownProcess(pid).to_string(),
            "Process 3 not found in page table"
        );
        assert_eq!(
            TranslationError::InvalidAddress { process: pid, address: -4 }.to_string(),
            "Invalid logical address -4 for process 3"
        );
    }

    #[test]
    fn test_config_messages() {
        assert_eq!(
            ConfigError::TooManyFrames { frames: 5, limit: 4 }.to_string(),
            "Physical memory holds 5 frames, more than the limit of 4"
        );
    }
}
