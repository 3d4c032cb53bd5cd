//! # EOF 追加算法
//!
//! 不关心像素结构：把载体文件原样复制到目标位置，再把载荷追加到末尾。
//! 提取时从文件末尾向前读取调用方声明的字节数。

use crate::constants::BITS_PER_BYTE;
use crate::error::{Result, StegoError};
use crate::steganography::EmbedReport;
use std::fs;
use std::path::Path;

/// 在内存中的载体字节流末尾追加 `payload`，返回新的字节流。
///
/// # Errors
///
/// * 载体为空时返回 [`StegoError::EmptyContainer`]。
/// * 载荷为空时返回 [`StegoError::EmptyPayload`]，这样的结果无法按长度提取。
pub fn append_bytes(container: &[u8], payload: &[u8]) -> Result<Vec<u8>> {
    if container.is_empty() {
        return Err(StegoError::EmptyContainer);
    }
    if payload.is_empty() {
        return Err(StegoError::EmptyPayload);
    }

    let mut stego = Vec::with_capacity(container.len() + payload.len());
    stego.extend_from_slice(container);
    stego.extend_from_slice(payload);
    Ok(stego)
}

/// 返回字节流末尾的 `length` 个字节。
///
/// # Errors
///
/// `length` 为零或大于字节流长度时返回 [`StegoError::InvalidLength`]。
pub fn extract_bytes(stream: &[u8], length: usize) -> Result<&[u8]> {
    let max = stream.len();
    if length == 0 || length > max {
        return Err(StegoError::InvalidLength { length, max });
    }
    Ok(&stream[max - length..])
}

/// 将 `container` 复制到 `dest` 并在末尾追加 `payload`。
///
/// # Errors
///
/// * 载体文件为空时返回 [`StegoError::EmptyContainer`]。
/// * 载荷为空时返回 [`StegoError::EmptyPayload`]。
/// * 任一文件无法打开或写入时返回 [`StegoError::OpenFailure`]。
pub fn append(
    container: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    payload: &[u8],
) -> Result<EmbedReport> {
    let (container, dest) = (container.as_ref(), dest.as_ref());

    let source = fs::read(container).map_err(|e| StegoError::open(container, e))?;
    let stego = append_bytes(&source, payload)?;
    fs::write(dest, &stego).map_err(|e| StegoError::open(dest, e))?;

    tracing::debug!(
        container = %container.display(),
        dest = %dest.display(),
        container_len = source.len(),
        payload_len = payload.len(),
        "Payload appended after end of file"
    );

    let bits = payload.len() * BITS_PER_BYTE;
    Ok(EmbedReport {
        payload_len: payload.len(),
        bits_written: bits,
        bits_required: bits,
    })
}

/// 读取 `path` 末尾的 `length` 个字节。
///
/// # Errors
///
/// * 文件无法打开或读取时返回 [`StegoError::OpenFailure`]。
/// * `length` 为零或大于文件大小时返回 [`StegoError::InvalidLength`]。
pub fn extract(path: impl AsRef<Path>, length: usize) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let stream = fs::read(path).map_err(|e| StegoError::open(path, e))?;
    let payload = extract_bytes(&stream, length)?.to_vec();

    tracing::debug!(path = %path.display(), length, "Payload read from end of file");
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SECRET: &[u8] = b"TestSecretMessage123";

    #[test]
    fn test_append_then_extract() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let container = dir.path().join("container.bin");
        let stego = dir.path().join("stego.bin");
        fs::write(&container, [0x89, b'P', b'N', b'G', 0, 1, 2, 3])?;

        let report = append(&container, &stego, SECRET)?;
        assert_eq!(report.payload_len, SECRET.len());

        assert_eq!(extract(&stego, SECRET.len())?, SECRET);

        let bytes = fs::read(&stego)?;
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0, 1, 2, 3]);
        assert_eq!(bytes.len(), 8 + SECRET.len());
        Ok(())
    }

    #[test]
    fn test_longer_length_includes_container_tail() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let container = dir.path().join("container.bin");
        let stego = dir.path().join("stego.bin");
        fs::write(&container, b"cover")?;
        append(&container, &stego, SECRET)?;

        let tail = extract(&stego, SECRET.len() + 1)?;
        assert_eq!(tail[0], b'r');
        assert_eq!(&tail[1..], SECRET);
        Ok(())
    }

    #[test]
    fn test_empty_container_rejected() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let container = dir.path().join("empty.bin");
        fs::write(&container, b"")?;

        let result = append(&container, dir.path().join("out.bin"), SECRET);
        assert!(matches!(result, Err(StegoError::EmptyContainer)));
        assert!(!dir.path().join("out.bin").exists());
        Ok(())
    }

    #[test]
    fn test_invalid_lengths_rejected() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let file = dir.path().join("short.bin");
        fs::write(&file, b"abc")?;

        assert!(matches!(
            extract(&file, 0),
            Err(StegoError::InvalidLength { length: 0, max: 3 })
        ));
        assert!(matches!(
            extract(&file, 4),
            Err(StegoError::InvalidLength { length: 4, max: 3 })
        ));
        assert_eq!(extract(&file, 3)?, b"abc");
        Ok(())
    }

    #[test]
    fn test_in_memory_append_and_extract() {
        let stego = append_bytes(b"cover", SECRET).unwrap();
        assert_eq!(&stego[..5], b"cover");
        assert_eq!(extract_bytes(&stego, SECRET.len()).unwrap(), SECRET);
        assert_eq!(extract_bytes(&stego, stego.len()).unwrap(), stego.as_slice());
    }

    #[test]
    fn test_in_memory_errors() {
        assert!(matches!(append_bytes(b"", SECRET), Err(StegoError::EmptyContainer)));
        assert!(matches!(append_bytes(b"cover", b""), Err(StegoError::EmptyPayload)));
        assert!(matches!(
            extract_bytes(b"abc", 0),
            Err(StegoError::InvalidLength { length: 0, max: 3 })
        ));
        assert!(matches!(
            extract_bytes(b"abc", 4),
            Err(StegoError::InvalidLength { length: 4, max: 3 })
        ));
    }

    #[test]
    fn test_empty_payload_rejected_before_writing() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let container = dir.path().join("container.bin");
        let stego = dir.path().join("stego.bin");
        fs::write(&container, b"cover")?;

        assert!(matches!(append(&container, &stego, b""), Err(StegoError::EmptyPayload)));
        assert!(!stego.exists());
        Ok(())
    }

    #[test]
    fn test_appending_twice_is_byte_identical() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let container = dir.path().join("container.bin");
        let first = dir.path().join("first.bin");
        let second = dir.path().join("second.bin");
        fs::write(&container, [7u8, 0, 255, 42, 13])?;

        append(&container, &first, SECRET)?;
        append(&container, &second, SECRET)?;

        assert_eq!(fs::read(&first)?, fs::read(&second)?);
        Ok(())
    }

    #[test]
    fn test_missing_files_are_open_failures() {
        assert!(matches!(
            append("no/such/container", "out.bin", SECRET),
            Err(StegoError::OpenFailure { .. })
        ));
        assert!(matches!(
            extract("no/such/file", 4),
            Err(StegoError::OpenFailure { .. })
        ));
    }
}
