//! # 中位替换算法
//!
//! 在每个像素的 R、G 样本的第 4 位 (掩码 `0x10`) 写入比特，B 及其后的通道保持不变。

use crate::bits::FramingMode;
use crate::constants::{MID_BIT_CLEAR_MASK, MID_BIT_SHIFT, RGB_CHANNELS};
use crate::cover::CoverBuffer;
use crate::error::Result;
use crate::steganography::Codec;

/// 每个像素可用的样本数 (R 与 G)。
const SLOTS_PER_PIXEL: usize = 2;

/// 改写第 4 位的中位替换算法。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MidBitChange;

/// 槽位按 R0, G0, R1, G1, ... 的顺序映射到样本下标。
fn sample_index(channels: usize, slot: usize) -> usize {
    (slot / SLOTS_PER_PIXEL) * channels + slot % SLOTS_PER_PIXEL
}

impl Codec for MidBitChange {
    fn name(&self) -> &'static str {
        "mbc"
    }

    fn default_framing(&self, payload_len: usize) -> FramingMode {
        FramingMode::Length(payload_len)
    }

    fn capacity(&self, cover: &CoverBuffer) -> Result<usize> {
        cover.require_channels(RGB_CHANNELS)?;
        Ok(cover.pixel_count() * SLOTS_PER_PIXEL)
    }

    fn write_bit(&self, samples: &mut [u8], channels: usize, slot: usize, bit: u8) {
        let index = sample_index(channels, slot);
        samples[index] = (samples[index] & MID_BIT_CLEAR_MASK) | ((bit & 1) << MID_BIT_SHIFT);
    }

    fn read_bit(&self, samples: &[u8], channels: usize, slot: usize) -> u8 {
        (samples[sample_index(channels, slot)] >> MID_BIT_SHIFT) & 1
    }
}
