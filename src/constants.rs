/// 哨兵字节。按哨兵分帧时追加在载荷之后，提取时遇到它即停止。
/// 因此按哨兵分帧的载荷本身不能包含 `0x00`。
pub const SENTINEL: u8 = 0x00;

/// 每个字节展开后的比特数。
pub const BITS_PER_BYTE: usize = 8;

/// CD、通道交换、中位替换算法所需的最少通道数 (R, G, B)。
pub const RGB_CHANNELS: usize = 3;

/// 中位替换算法使用的比特位置 (第 4 位)。
pub const MID_BIT_SHIFT: u8 = 4;

/// 中位替换算法写入前用于清除第 4 位的掩码。
pub const MID_BIT_CLEAR_MASK: u8 = 0xEF;

/// 未在命令行指定时 QIM 使用的量化步长。
pub const DEFAULT_QUANT_STEP: i64 = 4;

/// 隐写结果的默认文件名前缀。
pub const DOCTORED_PREFIX: &str = "doctored_";

/// 恢复文本的默认文件名前缀。
pub const RECOVERED_PREFIX: &str = "recovered_";
