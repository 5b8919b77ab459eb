//! Partition-entry decoding.
//!
//! A GPT partition entry is a fixed 128-byte little-endian record:
//!
//! | offset | size | field               |
//! |--------|------|---------------------|
//! | 0      | 16   | partition type GUID |
//! | 16     | 16   | partition GUID      |
//! | 32     | 8    | first LBA           |
//! | 40     | 8    | last LBA, inclusive |
//! | 48     | 8    | attribute flags     |
//! | 56     | 72   | name, UTF-16LE      |

use std::fmt;

use bitflags::bitflags;
use simple_bytes::{Bytes, BytesRead};

use crate::guid::{Guid, GUID_SIZE};

/// Size of a partition entry (bytes).
pub const ENTRY_SIZE: usize = 128;
/// Size of the name field (bytes).
pub const NAME_SIZE: usize = 72;

bitflags! {
    /// Partition attribute flags.
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub struct PartitionFlags: u64 {
        /// Required by the platform to function.
        const PLATFORM_REQUIRED = 1;
        /// Firmware must not produce an EFI_BLOCK_IO_PROTOCOL for it.
        const EFI_IGNORE = 1 << 1;
        /// Bootable by legacy BIOS firmware.
        const LEGACY_BIOS_BOOTABLE = 1 << 2;
    }
}

/// One decoded partition-table record.
#[derive(Clone, PartialEq, Eq)]
pub struct PartitionEntry {
    /// GUID of the partition type; all zero for an unused slot.
    pub type_guid: Guid,
    /// GUID identifying this partition.
    pub partition_guid: Guid,
    /// First LBA of the partition.
    pub first_lba: u64,
    /// Last LBA of the partition, inclusive.
    pub last_lba: u64,
    /// Attribute flags.
    pub flags: PartitionFlags,
    /// Raw name field.
    pub name_field: [u8; NAME_SIZE],
}

impl PartitionEntry {
    /// Whether this slot holds a partition.
    pub fn is_used(&self) -> bool {
        !self.type_guid.is_zero()
    }

    /// Number of sectors spanned, `None` if `last_lba < first_lba`.
    pub fn size_in_sectors(&self) -> Option<u64> {
        self.last_lba
            .checked_sub(self.first_lba)
            .and_then(|d| d.checked_add(1))
    }

    /// Partition name, up to the first NUL.
    pub fn name(&self) -> String {
        let units: Vec<u16> = self
            .name_field
            .chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
            .take_while(|u| *u != 0)
            .collect();
        String::from_utf16_lossy(&units)
    }
}

impl fmt::Debug for PartitionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartitionEntry")
            .field("type_guid", &self.type_guid)
            .field("partition_guid", &self.partition_guid)
            .field("first_lba", &self.first_lba)
            .field("last_lba", &self.last_lba)
            .field("flags", &self.flags)
            .field("name", &self.name())
            .finish()
    }
}

fn read_array<const N: usize>(bytes: &mut Bytes<'_>) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(bytes.read(N));
    out
}

/// Decode a single partition entry.
///
/// Any 128 bytes decode; garbage in gives garbage LBAs. Whether the entry is
/// in use is up to the caller (see [`PartitionEntry::is_used`]).
pub fn decode_partition_entry(buf: &[u8; ENTRY_SIZE]) -> PartitionEntry {
    let mut bytes = Bytes::from(&buf[..]);

    PartitionEntry {
        type_guid: Guid::from_raw(read_array::<GUID_SIZE>(&mut bytes)),
        partition_guid: Guid::from_raw(read_array::<GUID_SIZE>(&mut bytes)),
        first_lba: bytes.read_le_u64(),
        last_lba: bytes.read_le_u64(),
        // bits 48..=63 are defined per partition type, keep them
        flags: PartitionFlags::from_bits_retain(bytes.read_le_u64()),
        name_field: read_array::<NAME_SIZE>(&mut bytes),
    }
}
