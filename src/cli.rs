//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令、隐写方法和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::constants::DEFAULT_QUANT_STEP;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// 一款支持多种隐写方法 (QIM, LSB, CD, 通道交换, 中位替换, EOF) 的命令行工具，
/// 用于在无损格式图像或任意文件中隐藏或恢复数据。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款支持多种隐写方法 (QIM, LSB, CD, 通道交换, 中位替换, EOF) 的命令行工具，用于在无损格式图像 (如 PNG, BMP) 或任意文件中隐藏或恢复数据。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：hide (隐藏)、recover (恢复) 和 capacity (容量查询)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 将文件内容隐藏到载体中。
    Hide(HideArgs),

    /// 从经过隐写的载体中恢复隐藏的数据。
    Recover(RecoverArgs),

    /// 查询载体在指定方法下可隐藏的数据量。
    Capacity(CapacityArgs),
}

/// 隐写方法。
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// 最低有效位奇偶性，以零字节结束。
    Lsb,
    /// 量化索引调制，以零字节结束，需要量化步长。
    Qim,
    /// 通道差奇偶性，以零字节结束。
    Cd,
    /// R/G 通道交换，恢复时需要长度。
    Cs,
    /// R/G 第 4 位替换，恢复时需要长度。
    Mbc,
    /// 追加到文件末尾，恢复时需要长度。
    Eof,
}

impl Method {
    /// 恢复时是否需要调用方提供载荷长度。
    pub fn needs_length(self) -> bool {
        matches!(self, Method::Cs | Method::Mbc | Method::Eof)
    }
}

/// 'hide' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct HideArgs {
    /// 使用的隐写方法。
    #[arg(short, long, value_enum)]
    pub method: Method,

    /// 用于隐写的载体文件路径 (EOF 方法可以是任意非空文件)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的内容的文件路径。
    #[arg(short, long)]
    pub text: PathBuf,

    /// 隐写结果的输出路径。未指定时在载体旁生成 `doctored_<载体名>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// QIM 的量化步长。
    #[arg(short, long, default_value_t = DEFAULT_QUANT_STEP, allow_negative_numbers = true)]
    pub quant: i64,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'recover' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct RecoverArgs {
    /// 隐藏数据时使用的方法。
    #[arg(short, long, value_enum)]
    pub method: Method,

    /// 已隐藏数据的载体文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 恢复内容的输出路径。未指定时在载体旁生成 `recovered_<载体名>.txt`。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// QIM 的量化步长，必须与隐藏时一致。
    #[arg(short, long, default_value_t = DEFAULT_QUANT_STEP, allow_negative_numbers = true)]
    pub quant: i64,

    /// 隐藏数据的字节长度 (cs、mbc、eof 方法必需)。
    #[arg(short, long)]
    pub length: Option<usize>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'capacity' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct CapacityArgs {
    /// 要查询的隐写方法。
    #[arg(short, long, value_enum)]
    pub method: Method,

    /// 载体文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// QIM 的量化步长。
    #[arg(short, long, default_value_t = DEFAULT_QUANT_STEP, allow_negative_numbers = true)]
    pub quant: i64,
}
