pub mod constants;
pub mod error;
pub mod io;
pub mod logger;
pub mod memory;
pub mod page_table;
pub mod translation;
pub mod vm_manager;

// Re-export commonly used items for convenience
pub use constants::*;
pub use error::{AllocationError, ConfigError, DeallocationError, PageTableError, TranslationError};
pub use memory::{FrameState, FrameStore, MemoryMap};
pub use page_table::{PageTable, ProcessId};
pub use vm_manager::{MemoryConfig, MemoryManager, MemoryStats};
