//! # 载体缓冲区模块
//!
//! [`CoverBuffer`] 持有解码后的像素样本以及宽、高、通道数。
//! 图像的解码与编码交给 `image` crate，本模块只负责在两者之间转换。

use crate::error::{Result, StegoError};
use image::{ColorType, DynamicImage, ImageFormat};
use std::path::Path;

/// 解码后的像素样本，按像素顺序平铺，每个像素 `channels` 个字节。
///
/// 缓冲区由加载它的调用独占，离开作用域即释放。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverBuffer {
    samples: Vec<u8>,
    width: u32,
    height: u32,
    channels: usize,
}

impl CoverBuffer {
    /// 由原始样本构造缓冲区。
    ///
    /// # Errors
    ///
    /// 样本为空、通道数不在 1..=4 之间或样本数不等于 `width * height * channels` 时返回
    /// [`StegoError::InvalidGeometry`]。
    pub fn new(samples: Vec<u8>, width: u32, height: u32, channels: usize) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(channels));
        if samples.is_empty() || !(1..=4).contains(&channels) || expected != Some(samples.len()) {
            return Err(StegoError::InvalidGeometry {
                len: samples.len(),
                width,
                height,
                channels,
            });
        }
        Ok(Self {
            samples,
            width,
            height,
            channels,
        })
    }

    /// 以图像自身的通道数 (灰度、灰度+透明、RGB、RGBA) 加载载体。
    /// 16 位或浮点图像会被转换为 8 位。
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let image = open(path.as_ref())?;
        let channels = image.color().channel_count();
        let (width, height) = (image.width(), image.height());
        let samples = match channels {
            1 => image.into_luma8().into_raw(),
            2 => image.into_luma_alpha8().into_raw(),
            3 => image.into_rgb8().into_raw(),
            _ => image.into_rgba8().into_raw(),
        };
        Self::new(samples, width, height, usize::from(channels.clamp(1, 4)))
    }

    /// 强制以 3 通道 RGB 加载载体，丢弃透明通道。
    pub fn load_rgb(path: impl AsRef<Path>) -> Result<Self> {
        let image = open(path.as_ref())?.into_rgb8();
        let (width, height) = image.dimensions();
        Self::new(image.into_raw(), width, height, 3)
    }

    /// 以无损 PNG 格式保存缓冲区。不会消耗或释放缓冲区本身。
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        image::save_buffer_with_format(
            path,
            &self.samples,
            self.width,
            self.height,
            self.color_type(),
            ImageFormat::Png,
        )
        .map_err(|source| StegoError::SaveFailure {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(
            path = %path.display(),
            width = self.width,
            height = self.height,
            "Saved stego image"
        );
        Ok(())
    }

    fn color_type(&self) -> ColorType {
        match self.channels {
            1 => ColorType::L8,
            2 => ColorType::La8,
            3 => ColorType::Rgb8,
            _ => ColorType::Rgba8,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// 像素个数 (`width * height`)。
    pub fn pixel_count(&self) -> usize {
        self.samples.len() / self.channels
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    /// 确认载体至少有 `required` 个通道。
    pub fn require_channels(&self, required: usize) -> Result<()> {
        if self.channels < required {
            return Err(StegoError::UnsupportedChannels {
                required,
                found: self.channels,
            });
        }
        Ok(())
    }
}

fn open(path: &Path) -> Result<DynamicImage> {
    let image = image::open(path).map_err(|source| StegoError::LoadFailure {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        color = ?image.color(),
        "Loaded cover image"
    );
    Ok(image)
}
