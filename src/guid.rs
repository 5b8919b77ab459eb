//! Mixed-endian GUIDs as stored in GPT partition entries.
//!
//! On disk a GUID is five groups of 4, 2, 2, 2 and 6 bytes. The first three
//! groups are little-endian integers, the last two are plain byte arrays.

use std::fmt;

/// Size of a GUID on disk (bytes).
pub const GUID_SIZE: usize = 16;

/// Byte ranges of the groups whose byte order is reversed for display.
const LITTLE_ENDIAN_GROUPS: [(usize, usize); 3] = [(0, 4), (4, 6), (6, 8)];

/// A GUID kept in its on-disk byte order.
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq)]
pub struct Guid([u8; GUID_SIZE]);

impl Guid {
    /// The all-zero GUID, which marks an unused partition slot.
    pub const ZERO: Guid = Guid([0; GUID_SIZE]);

    /// Wrap 16 bytes read from disk.
    pub const fn from_raw(raw: [u8; GUID_SIZE]) -> Self {
        Guid(raw)
    }

    /// Bytes in on-disk order.
    pub fn as_raw(&self) -> &[u8; GUID_SIZE] {
        &self.0
    }

    /// Whether every byte is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == [0; GUID_SIZE]
    }

    /// Bytes in display order: first three groups byte-reversed.
    pub fn canonical_bytes(&self) -> [u8; GUID_SIZE] {
        reorder(&self.0)
    }

    /// Convert into a [`uuid::Uuid`], e.g. for the dashed rendering.
    pub fn to_uuid(&self) -> uuid::Uuid {
        uuid::Uuid::from_bytes(self.canonical_bytes())
    }
}

/// Reverse the little-endian groups of a mixed-endian GUID.
///
/// Applying it twice gives back the input.
pub fn reorder(raw: &[u8; GUID_SIZE]) -> [u8; GUID_SIZE] {
    let mut out = *raw;
    for (start, end) in LITTLE_ENDIAN_GROUPS {
        out[start..end].reverse();
    }
    out
}

/// Render on-disk GUID bytes as 32 uppercase hex characters, no dashes.
pub fn format_guid(raw: &[u8; GUID_SIZE]) -> String {
    Guid::from_raw(*raw).to_string()
}

impl From<[u8; GUID_SIZE]> for Guid {
    fn from(raw: [u8; GUID_SIZE]) -> Self {
        Guid(raw)
    }
}

impl From<Guid> for uuid::Uuid {
    fn from(guid: Guid) -> Self {
        guid.to_uuid()
    }
}

impl fmt::UpperHex for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.canonical_bytes() {
            write!(f, "{b:02X}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(self, f)
    }
}

impl fmt::Debug for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Guid({})", self.to_uuid().hyphenated())
    }
}
