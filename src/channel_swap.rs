//! # 通道交换算法
//!
//! 每个像素用 R 与 G 的大小关系携带一个比特：比特 1 要求 `R > G`，比特 0 要求 `R < G`，
//! 不满足时交换两个通道。B 通道保持不变。
//!
//! `R == G` 的像素交换后依然相等，只能被读作 0。

use crate::bits::FramingMode;
use crate::constants::RGB_CHANNELS;
use crate::cover::CoverBuffer;
use crate::error::Result;
use crate::steganography::Codec;

/// 交换 R、G 通道的算法。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelSwap;

impl Codec for ChannelSwap {
    fn name(&self) -> &'static str {
        "cs"
    }

    fn default_framing(&self, payload_len: usize) -> FramingMode {
        FramingMode::Length(payload_len)
    }

    fn capacity(&self, cover: &CoverBuffer) -> Result<usize> {
        cover.require_channels(RGB_CHANNELS)?;
        Ok(cover.pixel_count())
    }

    fn write_bit(&self, samples: &mut [u8], channels: usize, slot: usize, bit: u8) {
        let base = slot * channels;
        let (r, g) = (samples[base], samples[base + 1]);
        let needs_swap = if bit == 1 { r <= g } else { r >= g };
        if needs_swap {
            samples.swap(base, base + 1);
        }
    }

    fn read_bit(&self, samples: &[u8], channels: usize, slot: usize) -> u8 {
        let base = slot * channels;
        u8::from(samples[base] > samples[base + 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StegoError;
    use crate::steganography::{embed, extract};

    const SECRET: &[u8] = b"TestSecretMessage123";

    /// 每个像素的 R 与 G 都不相等的载体。
    fn striped_cover(width: u32, height: u32) -> CoverBuffer {
        let samples = (0..width * height)
            .flat_map(|i| {
                let r = (i * 11 % 200) as u8;
                [r, r + 30, (i % 256) as u8]
            })
            .collect();
        CoverBuffer::new(samples, width, height, 3).unwrap()
    }

    #[test]
    fn test_round_trip_with_declared_length() {
        let mut cover = striped_cover(16, 16);
        let framing = ChannelSwap.default_framing(SECRET.len());
        let report = embed(&ChannelSwap, &mut cover, SECRET, framing).unwrap();
        assert_eq!(report.payload_len, 20);

        let framing = FramingMode::Length(report.payload_len);
        let message = extract(&ChannelSwap, &cover, framing).unwrap();
        assert_eq!(message, SECRET);
    }

    #[test]
    fn test_shorter_length_returns_prefix() {
        let mut cover = striped_cover(16, 16);
        embed(&ChannelSwap, &mut cover, SECRET, FramingMode::Length(SECRET.len())).unwrap();

        let message = extract(&ChannelSwap, &cover, FramingMode::Length(4)).unwrap();
        assert_eq!(message, b"Test");
    }

    #[test]
    fn test_blue_channel_untouched_and_pairs_preserved() {
        let original = striped_cover(8, 8);
        let mut cover = original.clone();
        embed(&ChannelSwap, &mut cover, b"swap", FramingMode::Length(4)).unwrap();

        let pixels = original
            .samples()
            .chunks_exact(3)
            .zip(cover.samples().chunks_exact(3));
        for (before, after) in pixels {
            assert_eq!(before[2], after[2]);
            let mut pair_before = [before[0], before[1]];
            let mut pair_after = [after[0], after[1]];
            pair_before.sort_unstable();
            pair_after.sort_unstable();
            assert_eq!(pair_before, pair_after);
        }
    }

    #[test]
    fn test_exact_capacity_fits_and_one_more_byte_fails() {
        // 8x2 = 16 像素 = 恰好两个字节
        let mut cover = striped_cover(8, 2);
        embed(&ChannelSwap, &mut cover, b"ab", FramingMode::Length(2)).unwrap();
        assert_eq!(extract(&ChannelSwap, &cover, FramingMode::Length(2)).unwrap(), b"ab");

        let mut cover = striped_cover(8, 2);
        let result = embed(&ChannelSwap, &mut cover, b"abc", FramingMode::Length(3));
        assert!(matches!(
            result,
            Err(StegoError::CapacityExceeded {
                required: 24,
                available: 16
            })
        ));
    }

    #[test]
    fn test_embedding_is_deterministic() {
        let mut first = striped_cover(8, 8);
        let mut second = striped_cover(8, 8);
        embed(&ChannelSwap, &mut first, b"same", FramingMode::Length(4)).unwrap();
        embed(&ChannelSwap, &mut second, b"same", FramingMode::Length(4)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_equal_channels_only_carry_zero() {
        let mut samples = [90, 90, 0];
        ChannelSwap.write_bit(&mut samples, 3, 0, 1);
        assert_eq!(samples, [90, 90, 0]);
        assert_eq!(ChannelSwap.read_bit(&samples, 3, 0), 0);
    }
}
