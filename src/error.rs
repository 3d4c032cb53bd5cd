//! # 错误类型模块
//!
//! 所有隐写算法共用的失败类型。每个编解码操作都返回 [`Result`]，
//! 以便调用方区分成功与具体的失败原因。

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 隐写操作的结果类型别名。
pub type Result<T> = std::result::Result<T, StegoError>;

/// 嵌入或提取过程中可能出现的错误。
#[derive(Debug, Error)]
pub enum StegoError {
    /// 载体图像无法读取或解码。
    #[error("Failed to load cover image: {}", .path.display())]
    LoadFailure {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// 隐写结果无法保存。
    #[error("Failed to save stego image: {}", .path.display())]
    SaveFailure {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// 载荷比特数超过载体容量。
    #[error("Message too large for the cover: need {required} bits, have {available} bits")]
    CapacityExceeded { required: usize, available: usize },

    /// EOF 模式下的载体为空。
    #[error("Container is empty")]
    EmptyContainer,

    /// 按长度分帧时载荷为空，这样的结果无法被提取。
    #[error("Payload is empty: a length-framed message needs at least one byte")]
    EmptyPayload,

    /// 声明的载荷长度为零或超出载体范围。
    #[error("Invalid payload length {length}: must be between 1 and {max}")]
    InvalidLength { length: usize, max: usize },

    /// 底层文件无法打开或读写。
    #[error("Failed to open file: {}", .path.display())]
    OpenFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// QIM 量化步长必须为正数。
    #[error("Invalid quantization step {0}: must be at least 1")]
    InvalidQuantStep(i64),

    /// 算法需要的通道数多于载体提供的通道数。
    #[error("Cover has {found} channel(s), this method needs at least {required}")]
    UnsupportedChannels { required: usize, found: usize },

    /// 样本数量与宽、高、通道数不一致。
    #[error("Invalid cover geometry: {len} samples for {width}x{height}x{channels}")]
    InvalidGeometry {
        len: usize,
        width: u32,
        height: u32,
        channels: usize,
    },

    /// 按哨兵分帧时载荷中出现了保留字节 `0x00`。
    #[error("Payload contains a reserved NUL byte at offset {offset}")]
    ReservedByte { offset: usize },
}

impl StegoError {
    pub(crate) fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::OpenFailure {
            path: path.into(),
            source,
        }
    }
}
