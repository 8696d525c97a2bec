pub const DEFAULT_LOGICAL_MEMORY_SIZE: usize = 1024;
pub const DEFAULT_PAGE_SIZE: usize = 256;
pub const DEFAULT_PHYSICAL_MEMORY_SIZE: usize = 1024;

/// Upper bound on simulated frames; larger physical memories are rejected
/// before the frame array is built.
pub const MAX_FRAMES: usize = 1 << 20;

/// Process ids are issued from this value upwards and never reused.
pub const FIRST_PROCESS_ID: u64 = 1;

/// Marker for a free frame in the memory map
pub const FREE_CELL: &str = "--";

/// Output value for a failed translation in batch mode
pub const INVALID_ADDRESS: i64 = -1;
