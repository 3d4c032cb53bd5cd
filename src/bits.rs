//! # 比特打包协议
//!
//! 所有像素算法共用的约定：字节按最高位优先 (MSB first) 展开为比特流，
//! 并以两种方式之一确定消息的结束位置，见 [`FramingMode`]。

use crate::constants::{BITS_PER_BYTE, SENTINEL};
use crate::error::{Result, StegoError};

/// 消息的分帧方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramingMode {
    /// 在载荷后追加一个全零字节，提取时读到零字节即停止。
    Sentinel,
    /// 不写入终止符，提取时由调用方提供载荷的字节长度。
    Length(usize),
}

impl FramingMode {
    /// 在给定分帧方式下嵌入 `payload_len` 字节需要的比特数。
    pub fn framed_bits(self, payload_len: usize) -> usize {
        match self {
            FramingMode::Sentinel => (payload_len + 1) * BITS_PER_BYTE,
            FramingMode::Length(_) => payload_len * BITS_PER_BYTE,
        }
    }

    /// 检查载荷能否用该分帧方式传输。
    ///
    /// 按哨兵分帧时，载荷中的零字节会被提取端误认为终止符。
    pub fn validate_payload(self, payload: &[u8]) -> Result<()> {
        if self == FramingMode::Sentinel {
            if let Some(offset) = payload.iter().position(|&b| b == SENTINEL) {
                return Err(StegoError::ReservedByte { offset });
            }
        }
        Ok(())
    }
}

/// 将载荷展开为 MSB 优先的比特序列，按哨兵分帧时在末尾追加 8 个零比特。
#[derive(Debug, Clone)]
pub struct BitStream<'a> {
    payload: &'a [u8],
    trailer: Option<u8>,
    pos: usize,
    total: usize,
}

impl<'a> BitStream<'a> {
    pub fn new(payload: &'a [u8], framing: FramingMode) -> Self {
        let trailer = match framing {
            FramingMode::Sentinel => Some(SENTINEL),
            FramingMode::Length(_) => None,
        };
        Self {
            payload,
            trailer,
            pos: 0,
            total: framing.framed_bits(payload.len()),
        }
    }

    fn byte_at(&self, index: usize) -> u8 {
        self.payload
            .get(index)
            .copied()
            .or(self.trailer)
            .unwrap_or(SENTINEL)
    }
}

impl Iterator for BitStream<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.pos >= self.total {
            return None;
        }
        let byte = self.byte_at(self.pos / BITS_PER_BYTE);
        let shift = BITS_PER_BYTE - 1 - self.pos % BITS_PER_BYTE;
        self.pos += 1;
        Some((byte >> shift) & 1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.total - self.pos;
        (left, Some(left))
    }
}

impl ExactSizeIterator for BitStream<'_> {}

/// 将逐个读出的比特重新组装成字节，并根据分帧方式判断何时结束。
#[derive(Debug)]
pub struct ByteCollector {
    framing: FramingMode,
    bytes: Vec<u8>,
    current: u8,
    filled: usize,
    done: bool,
}

impl ByteCollector {
    pub fn new(framing: FramingMode) -> Self {
        let bytes = match framing {
            FramingMode::Sentinel => Vec::new(),
            FramingMode::Length(len) => Vec::with_capacity(len),
        };
        let done = framing == FramingMode::Length(0);
        Self {
            framing,
            bytes,
            current: 0,
            filled: 0,
            done,
        }
    }

    /// 推入一个比特。返回 `true` 表示消息已完整，不应再读取。
    pub fn push(&mut self, bit: u8) -> bool {
        if self.done {
            return true;
        }

        self.current = (self.current << 1) | (bit & 1);
        self.filled += 1;
        if self.filled < BITS_PER_BYTE {
            return false;
        }

        let byte = self.current;
        self.current = 0;
        self.filled = 0;

        match self.framing {
            FramingMode::Sentinel if byte == SENTINEL => self.done = true,
            FramingMode::Sentinel => self.bytes.push(byte),
            FramingMode::Length(len) => {
                self.bytes.push(byte);
                self.done = self.bytes.len() >= len;
            }
        }
        self.done
    }

    /// 是否已经遇到终止条件。
    pub fn is_complete(&self) -> bool {
        self.done
    }

    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}
