//! Filesystem identification from boot-sector signatures.
//!
//! Only the first [`SIGNATURE_LEN`] bytes of a partition are inspected.
//! Supporting another filesystem means adding a line to the table below.

use std::fmt;
use std::str::FromStr;

/// Number of bytes read from the start of a partition.
pub const SIGNATURE_LEN: usize = 3;

filesystems! {
    /// NTFS: `JMP 0x52; NOP`.
    (Ntfs, "NTFS", [0xEB, 0x52, 0x90]),
    /// FAT32: `JMP 0x3C; NOP`.
    (Fat32, "FAT32", [0xEB, 0x3C, 0x90]),
}

impl fmt::Display for FilesystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Match a signature window against [`SIGNATURES`].
///
/// A window that is not exactly [`SIGNATURE_LEN`] bytes long (e.g. cut short
/// by the end of the image) is never recognized.
pub fn classify(window: &[u8]) -> Option<FilesystemKind> {
    let kind = SIGNATURES
        .iter()
        .find(|(magic, _)| magic.as_slice() == window)
        .map(|(_, kind)| *kind);
    trace!("signature {:02X?} classified as {:?}", window, kind);
    kind
}
