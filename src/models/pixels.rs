//! # 像素数组数据模型
//!
//! PNG 解码结果与 `.npy` 数组之间的统一表示。
//! 只支持 PNG 能表达的两种采样类型：`u8` 与 `u16`。
//!
//! ## 依赖关系
//! - 被 `codec/png.rs`, `codec/npy.rs` 使用
//! - 被 `batch/converter.rs` 使用

use ndarray::ArrayD;

/// 数值数组（PNG 采样类型）
#[derive(Debug, Clone, PartialEq)]
pub enum PixelArray {
    U8(ArrayD<u8>),
    U16(ArrayD<u16>),
}

impl PixelArray {
    /// 数组形状
    pub fn shape(&self) -> &[usize] {
        match self {
            PixelArray::U8(a) => a.shape(),
            PixelArray::U16(a) => a.shape(),
        }
    }

    /// 每个采样的位数
    pub fn bit_depth(&self) -> u8 {
        match self {
            PixelArray::U8(_) => 8,
            PixelArray::U16(_) => 16,
        }
    }

    /// NumPy dtype 名称
    pub fn dtype(&self) -> &'static str {
        match self {
            PixelArray::U8(_) => "uint8",
            PixelArray::U16(_) => "uint16",
        }
    }

    /// 按逻辑行优先顺序展开为大端字节序列（PNG 采样顺序）
    pub fn to_be_bytes(&self) -> Vec<u8> {
        match self {
            PixelArray::U8(a) => a.iter().copied().collect(),
            PixelArray::U16(a) => a.iter().flat_map(|v| v.to_be_bytes()).collect(),
        }
    }
}

impl std::fmt::Display for PixelArray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{:?}", self.dtype(), self.shape())
    }
}
