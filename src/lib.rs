//! # stegbox 库
//!
//! 本库包含多种隐写算法的核心逻辑：QIM、LSB、CD (通道差)、通道交换、中位替换
//! 以及与像素无关的 EOF 追加。像素算法共用 [`steganography`] 中的嵌入/提取流程。

// 声明库包含的所有模块。

pub mod bits;
pub mod cd;
pub mod channel_swap;
pub mod cli;
pub mod constants;
pub mod cover;
pub mod eof;
pub mod error;
pub mod handler;
pub mod lsb;
pub mod mid_bit;
pub mod qim;
pub mod steganography;

pub use bits::FramingMode;
pub use cover::CoverBuffer;
pub use error::{Result, StegoError};
pub use steganography::{Codec, EmbedReport};
