//! # 隐写核心模块
//!
//! 每种像素算法只需说明两件事：载体有多少个可写比特 (槽位)，以及如何在某个槽位上
//! 写入、读取一个比特。分帧、容量检查与截断报告都由本模块的 [`embed`] 和 [`extract`]
//! 统一处理，因此所有算法遵循同一套失败约定。

use crate::bits::{BitStream, ByteCollector, FramingMode};
use crate::constants::BITS_PER_BYTE;
use crate::cover::CoverBuffer;
use crate::error::{Result, StegoError};

/// 逐槽位读写比特的像素隐写算法。
///
/// 槽位从 0 开始连续编号，嵌入和提取都按槽位顺序进行。
pub trait Codec {
    /// 算法名称，用于日志。
    fn name(&self) -> &'static str;

    /// 约定俗成的分帧方式。`payload_len` 仅在按长度分帧时使用。
    fn default_framing(&self, payload_len: usize) -> FramingMode;

    /// 载体可容纳的比特数。载体不满足算法要求 (如通道数不足) 时返回错误。
    fn capacity(&self, cover: &CoverBuffer) -> Result<usize>;

    /// 在 `slot` 处写入一个比特 (`0` 或 `1`)。
    fn write_bit(&self, samples: &mut [u8], channels: usize, slot: usize, bit: u8);

    /// 读取 `slot` 处的比特。
    fn read_bit(&self, samples: &[u8], channels: usize, slot: usize) -> u8;
}

/// 一次嵌入的结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedReport {
    /// 载荷字节数，按长度分帧时提取端需要它。
    pub payload_len: usize,
    /// 实际写入的比特数。
    pub bits_written: usize,
    /// 完整嵌入 (含终止符) 所需的比特数。
    pub bits_required: usize,
}

impl EmbedReport {
    /// 载体容量不足，消息只写入了一部分。
    pub fn is_truncated(&self) -> bool {
        self.bits_written < self.bits_required
    }
}

/// 将 `payload` 按 `framing` 分帧后写入载体。
///
/// 按长度分帧时，载荷超过容量会在写入前返回 [`StegoError::CapacityExceeded`]，
/// 载体保持不变；空载荷返回 [`StegoError::EmptyPayload`]。
/// `Length` 中携带的数值不参与嵌入，写入的始终是整个载荷。
/// 按哨兵分帧时写满载体即停止，通过 [`EmbedReport::is_truncated`] 报告截断。
pub fn embed<C: Codec + ?Sized>(
    codec: &C,
    cover: &mut CoverBuffer,
    payload: &[u8],
    framing: FramingMode,
) -> Result<EmbedReport> {
    let available = codec.capacity(cover)?;
    framing.validate_payload(payload)?;

    let bits_required = framing.framed_bits(payload.len());
    if let FramingMode::Length(_) = framing {
        if payload.is_empty() {
            return Err(StegoError::EmptyPayload);
        }
        if bits_required > available {
            return Err(StegoError::CapacityExceeded {
                required: bits_required,
                available,
            });
        }
    }

    let channels = cover.channels();
    let samples = cover.samples_mut();
    let mut bits_written = 0;
    for (slot, bit) in BitStream::new(payload, framing).take(available).enumerate() {
        codec.write_bit(samples, channels, slot, bit);
        bits_written += 1;
    }

    let report = EmbedReport {
        payload_len: payload.len(),
        bits_written,
        bits_required,
    };
    if report.is_truncated() {
        tracing::warn!(
            method = codec.name(),
            written = bits_written,
            required = bits_required,
            "Cover capacity exhausted, message truncated"
        );
    } else {
        tracing::debug!(
            method = codec.name(),
            bits = bits_written,
            ?framing,
            "Message embedded"
        );
    }
    Ok(report)
}

/// 按 `framing` 从载体中读取消息。
///
/// 按哨兵分帧时读到零字节或读完载体即停止，终止符不计入结果；
/// 读完载体仍未遇到终止符时返回已读出的完整字节。
/// 按长度分帧时恰好读取 `n` 个字节，`n` 为零或超过容量时返回 [`StegoError::InvalidLength`]。
pub fn extract<C: Codec + ?Sized>(
    codec: &C,
    cover: &CoverBuffer,
    framing: FramingMode,
) -> Result<Vec<u8>> {
    let available = codec.capacity(cover)?;

    if let FramingMode::Length(length) = framing {
        let max = available / BITS_PER_BYTE;
        if length == 0 || length > max {
            return Err(StegoError::InvalidLength { length, max });
        }
    }

    let channels = cover.channels();
    let samples = cover.samples();
    let mut collector = ByteCollector::new(framing);
    for slot in 0..available {
        if collector.push(codec.read_bit(samples, channels, slot)) {
            break;
        }
    }

    if !collector.is_complete() {
        tracing::warn!(
            method = codec.name(),
            "Reached end of cover without a terminator, message may be truncated"
        );
    }
    let message = collector.finish();
    tracing::debug!(
        method = codec.name(),
        bytes = message.len(),
        ?framing,
        "Message extracted"
    );
    Ok(message)
}

/// 载体可容纳的最大载荷字节数 (已扣除哨兵所需的一个字节)。
pub fn payload_capacity<C: Codec + ?Sized>(
    codec: &C,
    cover: &CoverBuffer,
    framing: FramingMode,
) -> Result<usize> {
    let bytes = codec.capacity(cover)? / BITS_PER_BYTE;
    Ok(match framing {
        FramingMode::Sentinel => bytes.saturating_sub(1),
        FramingMode::Length(_) => bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lsb::Lsb;

    fn flat_cover(pixels: u32, value: u8) -> CoverBuffer {
        CoverBuffer::new(vec![value; pixels as usize * 3], pixels, 1, 3).unwrap()
    }

    #[test]
    fn test_length_framing_rejects_overflow_before_writing() {
        let mut cover = flat_cover(2, 128);
        let original = cover.clone();

        let result = embed(&Lsb, &mut cover, b"ab", FramingMode::Length(1));

        assert!(matches!(
            result,
            Err(StegoError::CapacityExceeded {
                required: 16,
                available: 6
            })
        ));
        assert_eq!(cover, original);
    }

    #[test]
    fn test_empty_payload_rejected_under_length_framing() {
        let mut cover = flat_cover(8, 128);
        let original = cover.clone();

        let result = embed(&Lsb, &mut cover, b"", FramingMode::Length(0));

        assert!(matches!(result, Err(StegoError::EmptyPayload)));
        assert_eq!(cover, original);

        // 按哨兵分帧时空载荷只写入终止符，提取结果也为空
        let report = embed(&Lsb, &mut cover, b"", FramingMode::Sentinel).unwrap();
        assert_eq!(report.bits_written, 8);
        assert!(extract(&Lsb, &cover, FramingMode::Sentinel).unwrap().is_empty());
    }

    #[test]
    fn test_sentinel_framing_reports_truncation() {
        let mut cover = flat_cover(4, 128);
        let report = embed(&Lsb, &mut cover, b"ab", FramingMode::Sentinel).unwrap();

        assert!(report.is_truncated());
        assert_eq!(report.bits_written, 12);
        assert_eq!(report.bits_required, 24);
        assert_eq!(report.payload_len, 2);
    }

    #[test]
    fn test_extract_rejects_out_of_range_length() {
        let cover = flat_cover(8, 128);
        assert!(matches!(
            extract(&Lsb, &cover, FramingMode::Length(0)),
            Err(StegoError::InvalidLength { length: 0, max: 3 })
        ));
        assert!(matches!(
            extract(&Lsb, &cover, FramingMode::Length(4)),
            Err(StegoError::InvalidLength { length: 4, max: 3 })
        ));
    }

    #[test]
    fn test_payload_capacity_accounts_for_sentinel() {
        let cover = flat_cover(8, 0);
        assert_eq!(payload_capacity(&Lsb, &cover, FramingMode::Sentinel).unwrap(), 2);
        assert_eq!(payload_capacity(&Lsb, &cover, FramingMode::Length(1)).unwrap(), 3);
    }
}
