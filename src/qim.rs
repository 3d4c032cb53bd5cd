//! # QIM (量化索引调制) 算法
//!
//! 每个样本携带一个比特：样本先按步长 `q` 向下量化，比特为 1 时再加上 `q / 2`。
//! 提取时比较样本到两个代表值的距离，距离相等时判为 1。

use crate::bits::FramingMode;
use crate::cover::CoverBuffer;
use crate::error::{Result, StegoError};
use crate::steganography::Codec;

/// 以固定量化步长工作的 QIM 算法。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Qim {
    step: u32,
}

impl Qim {
    /// # Errors
    ///
    /// 步长小于 1 时返回 [`StegoError::InvalidQuantStep`]。
    pub fn new(step: i64) -> Result<Self> {
        match u32::try_from(step) {
            Ok(step) if step >= 1 => Ok(Self { step }),
            _ => Err(StegoError::InvalidQuantStep(step)),
        }
    }

    fn floor(&self, value: u8) -> u32 {
        self.step * (u32::from(value) / self.step)
    }
}

impl Codec for Qim {
    fn name(&self) -> &'static str {
        "qim"
    }

    fn default_framing(&self, _payload_len: usize) -> FramingMode {
        FramingMode::Sentinel
    }

    fn capacity(&self, cover: &CoverBuffer) -> Result<usize> {
        Ok(cover.samples().len())
    }

    fn write_bit(&self, samples: &mut [u8], _channels: usize, slot: usize, bit: u8) {
        let max = u32::from(u8::MAX);
        let base = self.floor(samples[slot]);
        let half = self.step / 2;
        let quantized = match bit {
            0 => base,
            // 当前量化单元的 1 代表值超出 8 位范围时，改用下一个较低单元的 1 代表值
            _ if base + half > max => base
                .checked_sub(self.step)
                .map_or(max, |lower| lower + half),
            _ => base + half,
        };
        samples[slot] = quantized.min(max) as u8;
    }

    fn read_bit(&self, samples: &[u8], _channels: usize, slot: usize) -> u8 {
        let value = i64::from(samples[slot]);
        let zero = i64::from(self.floor(samples[slot]));
        let one = zero + i64::from(self.step / 2);
        u8::from((value - zero).abs() >= (value - one).abs())
    }
}
