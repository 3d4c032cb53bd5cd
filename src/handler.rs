//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `capacity` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、选择并调用隐写算法以及向用户报告结果。

use crate::bits::FramingMode;
use crate::channel_swap::ChannelSwap;
use crate::cd::ChannelDifference;
use crate::cli::{CapacityArgs, HideArgs, Method, RecoverArgs};
use crate::constants::{DOCTORED_PREFIX, RECOVERED_PREFIX};
use crate::cover::CoverBuffer;
use crate::eof;
use crate::lsb::Lsb;
use crate::mid_bit::MidBitChange;
use crate::qim::Qim;
use crate::steganography::{self, Codec};
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// 根据方法构造像素隐写算法。EOF 不是像素算法，返回 `None`。
pub fn pixel_codec(method: Method, quant: i64) -> Result<Option<Box<dyn Codec>>> {
    let codec: Box<dyn Codec> = match method {
        Method::Lsb => Box::new(Lsb),
        Method::Qim => Box::new(Qim::new(quant)?),
        Method::Cd => Box::new(ChannelDifference),
        Method::Cs => Box::new(ChannelSwap),
        Method::Mbc => Box::new(MidBitChange),
        Method::Eof => return Ok(None),
    };
    Ok(Some(codec))
}

/// 加载载体。通道交换和中位替换总是按 RGB 三通道处理，其余方法保留图像原有的通道数。
fn load_cover(method: Method, path: &Path) -> Result<CoverBuffer> {
    let cover = match method {
        Method::Cs | Method::Mbc => CoverBuffer::load_rgb(path),
        _ => CoverBuffer::load(path),
    };
    cover.with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })
}

/// 生成默认的隐写输出路径：像素方法为 `doctored_<stem>.png`，EOF 为 `doctored_<文件名>`。
fn default_dest(method: Method, image: &Path) -> PathBuf {
    let name = if method == Method::Eof {
        image.file_name().map(|n| n.to_string_lossy().into_owned())
    } else {
        image
            .file_stem()
            .map(|stem| format!("{}.png", stem.to_string_lossy()))
    };
    let name = name.unwrap_or_else(|| "output.png".to_string());
    image.with_file_name(format!("{DOCTORED_PREFIX}{name}"))
}

/// 生成默认的恢复输出路径：`recovered_<stem>.txt`。
fn default_recovered(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    image.with_file_name(format!("{RECOVERED_PREFIX}{stem}.txt"))
}

/// 未指定 `--force` 时拒绝覆盖已存在的文件。
fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取载体和待隐藏的文件、检查隐写空间是否足够、调用所选算法嵌入数据，
/// 最后将结果写入目标文件。
///
/// # Arguments
///
/// * `args` - 包含方法、输入/输出路径的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的载体或文本文件。
/// * 输出文件已存在且未指定 `--force`。
/// * 载体没有足够的空间来隐藏数据。
/// * 隐写算法在执行过程中失败。
/// * 无法写入到目标文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let dest = args
        .dest
        .clone()
        .unwrap_or_else(|| default_dest(args.method, &args.image));
    ensure_writable(&dest, args.force)?;

    let text = fs::read(&args.text).with_context(|| {
        format!(
            "Unable to read text file: {}",
            args.text.to_string_lossy().red().bold()
        )
    })?;

    let report = match pixel_codec(args.method, args.quant)? {
        None => eof::append(&args.image, &dest, &text).with_context(|| {
            format!(
                "Failed to append the text to {}",
                args.image.to_string_lossy().red().bold()
            )
        })?,
        Some(codec) => {
            let mut cover = load_cover(args.method, &args.image)?;
            let framing = codec.default_framing(text.len());

            let available_space = steganography::payload_capacity(codec.as_ref(), &cover, framing)?;
            anyhow::ensure!(
                available_space >= text.len(),
                "Not enough space in the image to hide the text. \nRequired: {}, Available: {}",
                text.len().to_string().red().bold(),
                available_space.to_string().green().bold()
            );

            let report = steganography::embed(codec.as_ref(), &mut cover, &text, framing)
                .with_context(|| {
                    format!(
                        "Failed to hide the text with method {}.",
                        codec.name().red().bold()
                    )
                })?;

            cover.save(&dest).with_context(|| {
                format!(
                    "Unable to write to target image file: {}",
                    dest.to_string_lossy().red().bold()
                )
            })?;
            report
        }
    };

    println!(
        "The text has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );
    if args.method.needs_length() {
        println!(
            "Keep the payload length for recovery: {} bytes",
            report.payload_len.to_string().yellow().bold()
        );
    }

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的载体、调用所选算法提取数据，
/// 最后将恢复的内容写入目标文本文件。
///
/// # Arguments
///
/// * `args` - 包含方法、输入/输出路径及可选长度的 `RecoverArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 所选方法需要长度但未提供 `--length`。
/// * 输出文件已存在且未指定 `--force`。
/// * 无法读取输入的载体文件，或隐写算法在执行过程中失败。
/// * 无法写入到目标文本文件。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let target = args
        .text
        .clone()
        .unwrap_or_else(|| default_recovered(&args.image));
    ensure_writable(&target, args.force)?;

    let length = if args.method.needs_length() {
        let length = args.length.with_context(|| {
            format!(
                "Method {:?} needs the payload length. \nPass it with {}.",
                args.method,
                "--length".yellow().bold()
            )
        })?;
        Some(length)
    } else {
        None
    };

    let text = match pixel_codec(args.method, args.quant)? {
        None => eof::extract(&args.image, length.unwrap_or_default()),
        Some(codec) => {
            let framing = length.map_or(FramingMode::Sentinel, FramingMode::Length);
            let cover = load_cover(args.method, &args.image)?;
            steganography::extract(codec.as_ref(), &cover, framing)
        }
    }
    .with_context(|| {
        format!(
            "Failed to recover the text from '{}'. \nThe file may not contain a hidden message or is corrupted.",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    fs::write(&target, text).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            target.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The text has been successfully recovered and saved: {}",
        target.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Capacity' 命令：打印载体在所选方法下最多能隐藏的字节数。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let Some(codec) = pixel_codec(args.method, args.quant)? else {
        println!(
            "Method {} appends to the end of the file and has no capacity limit.",
            "eof".green().bold()
        );
        return Ok(());
    };

    let cover = load_cover(args.method, &args.image)?;
    let framing = codec.default_framing(0);
    let bits = codec.capacity(&cover)?;
    let bytes = steganography::payload_capacity(codec.as_ref(), &cover, framing)?;

    println!(
        "{}: {} bits, up to {} bytes of text",
        args.image.to_string_lossy().bold(),
        bits.to_string().green().bold(),
        bytes.to_string().green().bold()
    );
    Ok(())
}
