//! # CD (通道差) 算法
//!
//! 每个像素携带一个比特。根据 `R - G` 与 `G - B` 的绝对值大小选出目标通道：
//! 前者较小时写入 B，否则写入 R，比特存放在目标通道的奇偶性中。
//!
//! 提取时会根据修改后的像素重新选择目标通道。对于接近判定边界的像素，
//! 嵌入本身可能改变选择结果，从而读错该比特。

use crate::bits::FramingMode;
use crate::constants::RGB_CHANNELS;
use crate::cover::CoverBuffer;
use crate::error::Result;
use crate::lsb::set_parity;
use crate::steganography::Codec;

const RED: usize = 0;
const GREEN: usize = 1;
const BLUE: usize = 2;

/// 基于通道差的奇偶性算法，忽略透明通道。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelDifference;

/// 返回像素 `base` 处应携带比特的通道下标。
fn target_channel(samples: &[u8], base: usize) -> usize {
    let r = i16::from(samples[base + RED]);
    let g = i16::from(samples[base + GREEN]);
    let b = i16::from(samples[base + BLUE]);
    if (r - g).abs() < (g - b).abs() {
        base + BLUE
    } else {
        base + RED
    }
}

impl Codec for ChannelDifference {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn default_framing(&self, _payload_len: usize) -> FramingMode {
        FramingMode::Sentinel
    }

    fn capacity(&self, cover: &CoverBuffer) -> Result<usize> {
        cover.require_channels(RGB_CHANNELS)?;
        Ok(cover.pixel_count())
    }

    fn write_bit(&self, samples: &mut [u8], channels: usize, slot: usize, bit: u8) {
        let index = target_channel(samples, slot * channels);
        samples[index] = set_parity(samples[index], bit);
    }

    fn read_bit(&self, samples: &[u8], channels: usize, slot: usize) -> u8 {
        samples[target_channel(samples, slot * channels)] & 1
    }
}
