//! Durable slot storage adapters
//!
//! - FileSlotStorage: JSON object file, written atomically
//! - MemorySlotStorage: in-process map

pub mod file;
pub mod memory;

pub use file::FileSlotStorage;
pub use memory::MemorySlotStorage;
