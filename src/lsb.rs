//! # LSB (最低有效位) 算法
//!
//! 每个样本的奇偶性携带一个比特，样本值最多改变 1。

use crate::bits::FramingMode;
use crate::cover::CoverBuffer;
use crate::error::Result;
use crate::steganography::Codec;

/// 按样本顺序写入奇偶性的 LSB 算法。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lsb;

/// 将样本的奇偶性设置为 `bit`。偶数只会加 1，奇数只会减 1，因此不会溢出。
pub(crate) fn set_parity(sample: u8, bit: u8) -> u8 {
    match (sample % 2, bit) {
        (0, 1) => sample + 1,
        (1, 0) => sample - 1,
        _ => sample,
    }
}

impl Codec for Lsb {
    fn name(&self) -> &'static str {
        "lsb"
    }

    fn default_framing(&self, _payload_len: usize) -> FramingMode {
        FramingMode::Sentinel
    }

    fn capacity(&self, cover: &CoverBuffer) -> Result<usize> {
        Ok(cover.samples().len())
    }

    fn write_bit(&self, samples: &mut [u8], _channels: usize, slot: usize, bit: u8) {
        samples[slot] = set_parity(samples[slot], bit);
    }

    fn read_bit(&self, samples: &[u8], _channels: usize, slot: usize) -> u8 {
        samples[slot] & 1
    }
}
