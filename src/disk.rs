//! Disk-related types and helper functions.

use std::convert::TryFrom;
use std::io::{self, Read, Seek, SeekFrom};

/// Default size of a logical sector (bytes).
pub const DEFAULT_SECTOR_SIZE: LogicalBlockSize = LogicalBlockSize::Lb512;

/// A device we can scan for partitions, e.g. a `std::fs::File`
/// or a `std::io::Cursor` over an in-memory image.
pub trait DiskDevice: Read + Seek + std::fmt::Debug {}
/// Implement the DiskDevice trait for anything that meets the requirements.
impl<T> DiskDevice for T where T: Read + Seek + std::fmt::Debug {}

/// Logical block/sector size of a disk.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogicalBlockSize {
    /// 512 bytes.
    Lb512,
    /// 4096 bytes.
    Lb4096,
}

impl LogicalBlockSize {
    /// Size in bytes.
    pub const fn as_u64(self) -> u64 {
        match self {
            LogicalBlockSize::Lb512 => 512,
            LogicalBlockSize::Lb4096 => 4096,
        }
    }

    /// Byte offset of `lba`, `None` on overflow.
    pub fn lba_offset(self, lba: u64) -> Option<u64> {
        lba.checked_mul(self.as_u64())
    }
}

impl From<LogicalBlockSize> for u64 {
    fn from(lb: LogicalBlockSize) -> u64 {
        lb.as_u64()
    }
}

impl TryFrom<u64> for LogicalBlockSize {
    type Error = io::Error;
    fn try_from(v: u64) -> Result<Self, Self::Error> {
        match v {
            512 => Ok(LogicalBlockSize::Lb512),
            4096 => Ok(LogicalBlockSize::Lb4096),
            _ => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "unsupported logical block size (expected 512 or 4096)",
            )),
        }
    }
}

/// Read up to `len` bytes starting at `offset`.
///
/// Fewer bytes are returned if the device ends first; an offset past the
/// end yields an empty buffer. Other I/O errors are propagated.
pub(crate) fn read_at<D: Read + Seek>(device: &mut D, offset: u64, len: u64) -> io::Result<Vec<u8>> {
    trace!("Seeking to {}", offset);
    device.seek(SeekFrom::Start(offset))?;

    let mut buf = Vec::new();
    device.by_ref().take(len).read_to_end(&mut buf)?;
    trace!("Read {} of {} bytes", buf.len(), len);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn block_sizes() {
        assert_eq!(u64::from(DEFAULT_SECTOR_SIZE), 512);
        assert_eq!(LogicalBlockSize::Lb4096.as_u64(), 4096);
        assert_eq!(LogicalBlockSize::try_from(4096).unwrap(), LogicalBlockSize::Lb4096);
        assert!(LogicalBlockSize::try_from(1024).is_err());
    }

    #[test]
    fn lba_offsets() {
        assert_eq!(LogicalBlockSize::Lb512.lba_offset(2), Some(1024));
        assert_eq!(LogicalBlockSize::Lb4096.lba_offset(2), Some(8192));
        assert_eq!(LogicalBlockSize::Lb512.lba_offset(u64::MAX), None);
    }

    #[test]
    fn short_reads() {
        let mut dev = Cursor::new(vec![1u8, 2, 3, 4, 5]);
        assert_eq!(read_at(&mut dev, 1, 3).unwrap(), vec![2, 3, 4]);
        assert_eq!(read_at(&mut dev, 3, 10).unwrap(), vec![4, 5]);
        assert!(read_at(&mut dev, 100, 3).unwrap().is_empty());
    }
}
