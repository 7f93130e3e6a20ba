//! Archive extraction functionality.
//!
//! Downloaded archives are unpacked with [`ArchiveExtractor`], which reads a
//! zip container entry by entry and mirrors its hierarchy on disk.

pub mod zip;

pub use self::zip::{
    ArchiveEntry, ArchiveExtractor, DEFAULT_EXTRACT_BUFFER_SIZE, MIN_EXTRACT_BUFFER_SIZE,
};
