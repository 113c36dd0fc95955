#![no_std]

pub mod copy;
pub mod drive;
pub mod flash;
pub mod floppy;
pub mod memmap;
pub mod op;

/// Sector size shared by every floppy-class device.
pub const SECTOR_SIZE: usize = 512;

/// Allocation granularity of the platform's high-memory allocator.
pub const PAGE_SIZE: usize = 4096;
