use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn gptscan() -> Command {
    Command::new(env!("CARGO_BIN_EXE_gptscan"))
}

fn ntfs_image() -> NamedTempFile {
    let mut bytes = vec![0u8; 2049 * 512];
    let off = 2 * 512;
    bytes[off..off + 16].copy_from_slice(&[0x11; 16]);
    bytes[off + 16..off + 32].copy_from_slice(&[
        0xD4, 0xC3, 0xB2, 0xA1, 0xF6, 0xE5, 0x08, 0x07, 0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E, 0x0F,
        0x10,
    ]);
    bytes[off + 32..off + 40].copy_from_slice(&2048u64.to_le_bytes());
    bytes[off + 40..off + 48].copy_from_slice(&206847u64.to_le_bytes());
    bytes[2048 * 512..2048 * 512 + 3].copy_from_slice(&[0xEB, 0x52, 0x90]);

    let mut tempdisk = NamedTempFile::new().expect("failed to create tempfile disk");
    tempdisk.write_all(&bytes).unwrap();
    tempdisk.flush().unwrap();
    tempdisk
}

#[test]
fn test_prints_records() {
    let disk = ntfs_image();
    let out = gptscan().arg(disk.path()).output().unwrap();
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "A1B2C3D4E5F60708090A0B0C0D0E0F10 NTFS 1048576 204800\n"
    );
}

#[test]
fn test_no_arguments() {
    let out = gptscan().output().unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Usage"));
}

#[test]
fn test_too_many_arguments() {
    let out = gptscan().args(["a.img", "b.img"]).output().unwrap();
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_missing_image() {
    let dir = tempfile::tempdir().unwrap();
    let out = gptscan().arg(dir.path().join("nope.img")).output().unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
}

#[test]
fn test_empty_table_succeeds() {
    let mut tempdisk = NamedTempFile::new().unwrap();
    tempdisk.write_all(&[0u8; 64 * 512]).unwrap();
    tempdisk.flush().unwrap();
    let out = gptscan().arg(tempdisk.path()).output().unwrap();
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn test_unsupported_sector_size_is_a_usage_error() {
    let disk = ntfs_image();
    let out = gptscan()
        .args(["--sector-size", "1024"])
        .arg(disk.path())
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("--sector-size"));
    assert!(!stderr.contains("Failed to scan image"));
}

#[test]
fn test_4k_sector_size() {
    // at 4096-byte sectors the table lands in zeros
    let disk = ntfs_image();
    let out = gptscan()
        .args(["--sector-size", "4096"])
        .arg(disk.path())
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn test_include_unused() {
    let mut bytes = vec![0u8; 64 * 512];
    bytes[..3].copy_from_slice(&[0xEB, 0x3C, 0x90]);
    let mut tempdisk = NamedTempFile::new().unwrap();
    tempdisk.write_all(&bytes).unwrap();
    tempdisk.flush().unwrap();

    let out = gptscan().arg(tempdisk.path()).output().unwrap();
    assert!(out.status.success());
    assert!(out.stdout.is_empty());

    let out = gptscan()
        .arg("--include-unused")
        .arg(tempdisk.path())
        .output()
        .unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.lines().count(), 128);
    assert!(stdout
        .lines()
        .all(|l| l == "00000000000000000000000000000000 FAT32 0 1"));
}

#[cfg(feature = "log")]
#[test]
fn test_verbose_logs_to_stderr() {
    let disk = ntfs_image();
    let out = gptscan().arg("-v").arg(disk.path()).output().unwrap();
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout).lines().count(), 1);
    assert!(String::from_utf8_lossy(&out.stderr).contains("DEBUG - "));

    let out = gptscan().arg(disk.path()).output().unwrap();
    assert!(out.stderr.is_empty());
}
