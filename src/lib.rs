//! Enumerate the partitions of a GPT disk image and identify their filesystems.
//!
//! The partition-entry array is read from its conventional location (LBA 2),
//! each entry is decoded and the first bytes of every live partition are
//! matched against a table of known boot-sector signatures. The GPT header
//! is not parsed and no checksum is verified.
//!
//! ```no_run
//! fn list_partitions() -> Result<(), gptscan::ScanError> {
//!     let records = gptscan::ScanConfig::new()
//!         .logical_block_size(gptscan::disk::LogicalBlockSize::Lb512)
//!         .scan("/tmp/evidence.img")?;
//!
//!     for record in records {
//!         println!("{record}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Any seekable reader can be scanned, for example an in-memory image:
//!
//! ```
//! let image = std::io::Cursor::new(vec![0u8; 64 * 512]);
//! let records = gptscan::ScanConfig::new().scan_device(image).unwrap();
//! assert!(records.is_empty());
//! ```

#![deny(missing_docs)]

use std::{fmt, fs, io, path};

#[macro_use]
mod macros;
#[macro_use]
mod logging;
pub mod disk;
pub mod filesystem;
pub mod guid;
pub mod partition;

pub use disk::DiskDevice;
pub use filesystem::FilesystemKind;
pub use guid::{format_guid, Guid};
pub use partition::{decode_partition_entry, PartitionEntry};

/// LBA of the first partition entry.
pub const PARTITION_TABLE_LBA: u64 = 2;
/// Number of entries in the partition table.
pub const MAX_PARTITION_COUNT: u32 = 128;

#[non_exhaustive]
#[derive(Debug)]
/// Errors returned while scanning a disk.
pub enum ScanError {
    /// Generic IO Error
    Io(io::Error),
    /// Something overflowed
    /// This will never occur with the default configuration
    Overflow(&'static str),
    /// The configuration cannot describe a partition table
    InvalidConfig(&'static str),
}

impl From<io::Error> for ScanError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScanError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ScanError::*;
        match self {
            Io(e) => write!(fmt, "GPT IO Error: {e}"),
            Overflow(m) => write!(fmt, "GPT error Overflow: {m}"),
            InvalidConfig(m) => write!(fmt, "invalid scan configuration: {m}"),
        }
    }
}

/// A live partition whose filesystem was recognized.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PartitionRecord {
    /// Index of the entry in the partition table, starting at 0.
    pub slot: u32,
    /// Partition GUID.
    pub guid: Guid,
    /// Partition type GUID.
    pub type_guid: Guid,
    /// Detected filesystem.
    pub filesystem: FilesystemKind,
    /// Byte offset of the first sector.
    pub start_byte_offset: u64,
    /// Length in logical blocks.
    pub size_in_sectors: u64,
    /// Partition name.
    pub name: String,
}

impl fmt::Display for PartitionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.guid, self.filesystem, self.start_byte_offset, self.size_in_sectors
        )
    }
}

/// Configuration options to scan a disk.
///
/// ## Default
/// The defaults describe the usual primary partition table: 128 entries
/// of 128 bytes starting at LBA 2 of a 512-byte-sector disk. Slots with
/// an all-zero type GUID are skipped without reading their data.
///
/// ```
/// # use gptscan::ScanConfig;
/// let _default_config = ScanConfig::new()
///     .logical_block_size(gptscan::disk::DEFAULT_SECTOR_SIZE)
///     .table_lba(2)
///     .num_entries(128)
///     .entry_size(128)
///     .skip_unused(true);
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ScanConfig {
    /// Logical block size.
    lb_size: disk::LogicalBlockSize,
    /// First LBA of the partition-entry array.
    table_lba: u64,
    /// Number of entries in the array.
    num_entries: u32,
    /// Size of a single entry (bytes).
    entry_size: u32,
    /// Skip slots with a zero type GUID before probing their data.
    skip_unused: bool,
}

impl ScanConfig {
    /// Create a new default configuration.
    pub fn new() -> Self {
        ScanConfig::default()
    }

    /// Size of logical blocks (sectors) for this disk.
    pub fn logical_block_size(mut self, lb_size: disk::LogicalBlockSize) -> Self {
        self.lb_size = lb_size;
        self
    }

    /// LBA at which the partition-entry array starts.
    pub fn table_lba(mut self, table_lba: u64) -> Self {
        self.table_lba = table_lba;
        self
    }

    /// Number of entries in the partition-entry array.
    pub fn num_entries(mut self, num_entries: u32) -> Self {
        self.num_entries = num_entries;
        self
    }

    /// Size of a single partition entry, at least 128 bytes.
    pub fn entry_size(mut self, entry_size: u32) -> Self {
        self.entry_size = entry_size;
        self
    }

    /// Sets whether unused slots (zero type GUID) are skipped.
    ///
    /// ## Warning
    /// When disabled an unused slot probes LBA 0, so a disk whose first
    /// sector carries a known boot signature reports a phantom partition.
    pub fn skip_unused(mut self, skip_unused: bool) -> Self {
        self.skip_unused = skip_unused;
        self
    }

    /// Open the disk image at the given path read-only and scan it.
    pub fn scan(&self, diskpath: impl AsRef<path::Path>) -> Result<Vec<PartitionRecord>, ScanError> {
        let diskpath = diskpath.as_ref();
        debug!("opening {} for reading", diskpath.display());
        let file = fs::File::open(diskpath)?;
        self.scan_device(file)
    }

    /// Scan any seekable device according to configuration options.
    ///
    /// Records come back in table order.
    pub fn scan_device<D>(&self, mut device: D) -> Result<Vec<PartitionRecord>, ScanError>
    where
        D: DiskDevice,
    {
        if (self.entry_size as usize) < partition::ENTRY_SIZE {
            return Err(ScanError::InvalidConfig(
                "partition entries are at least 128 bytes",
            ));
        }

        let table = self.read_table(&mut device)?;
        let mut records = Vec::new();

        for (slot, chunk) in table.chunks_exact(self.entry_size as usize).enumerate() {
            let slot = slot as u32;
            let mut raw = [0u8; partition::ENTRY_SIZE];
            raw.copy_from_slice(&chunk[..partition::ENTRY_SIZE]);
            let entry = decode_partition_entry(&raw);

            if self.skip_unused && !entry.is_used() {
                continue;
            }
            trace!("slot {}: {:?}", slot, entry);

            if let Some(record) = self.probe(&mut device, slot, &entry)? {
                debug!("slot {}: {}", slot, record);
                records.push(record);
            }
        }

        debug!("found {} partitions", records.len());
        Ok(records)
    }

    /// Read the entry array, stopping early if the image ends first.
    ///
    /// Slots missing from a truncated table are treated as unused.
    fn read_table<D: DiskDevice>(&self, device: &mut D) -> Result<Vec<u8>, ScanError> {
        let start = self
            .lb_size
            .lba_offset(self.table_lba)
            .ok_or(ScanError::Overflow("partition table - offset"))?;
        let len = u64::from(self.num_entries)
            .checked_mul(self.entry_size.into())
            .ok_or(ScanError::Overflow("partition table - size"))?;

        let table = disk::read_at(device, start, len)?;
        if (table.len() as u64) < len {
            warn!("partition table truncated: {} of {} bytes", table.len(), len);
        }
        Ok(table)
    }

    /// Read the signature of a partition and build its record if recognized.
    fn probe<D: DiskDevice>(
        &self,
        device: &mut D,
        slot: u32,
        entry: &PartitionEntry,
    ) -> Result<Option<PartitionRecord>, ScanError> {
        let start = match self.lb_size.lba_offset(entry.first_lba) {
            Some(s) => s,
            None => {
                debug!("slot {}: first LBA {} out of range", slot, entry.first_lba);
                return Ok(None);
            }
        };

        let window = disk::read_at(device, start, filesystem::SIGNATURE_LEN as u64)?;
        let filesystem = match filesystem::classify(&window) {
            Some(fs) => fs,
            None => return Ok(None),
        };

        let size_in_sectors = match entry.size_in_sectors() {
            Some(n) => n,
            None => {
                debug!(
                    "slot {}: rejecting inverted range {}..{}",
                    slot, entry.first_lba, entry.last_lba
                );
                return Ok(None);
            }
        };

        Ok(Some(PartitionRecord {
            slot,
            guid: entry.partition_guid,
            type_guid: entry.type_guid,
            filesystem,
            start_byte_offset: start,
            size_in_sectors,
            name: entry.name(),
        }))
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            lb_size: disk::DEFAULT_SECTOR_SIZE,
            table_lba: PARTITION_TABLE_LBA,
            num_entries: MAX_PARTITION_COUNT,
            entry_size: partition::ENTRY_SIZE as u32,
            skip_unused: true,
        }
    }
}

/// Open and scan a disk image, using default configuration options.
pub fn scan(diskpath: impl AsRef<path::Path>) -> Result<Vec<PartitionRecord>, ScanError> {
    ScanConfig::new().scan(diskpath)
}
