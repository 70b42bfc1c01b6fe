//! # 编解码协作接口
//!
//! 转换流程只依赖两个接口：
//! - [`CodecAdapter`]: PNG 字节流 ↔ 像素数组，以及头信息读取
//! - [`ArrayStore`]: `.npy` 文件 ↔ 像素数组
//!
//! 具体实现位于 `png.rs` 与 `npy.rs`，测试中可替换为假实现。
//!
//! ## 依赖关系
//! - 被 `batch/converter.rs` 和 `commands/convert.rs` 使用
//! - 使用 `models/` 数据模型
//! - 子模块: png, npy

pub mod npy;
pub mod png;

pub use self::npy::NpyStore;
pub use self::png::PngCodec;

use crate::models::{HeaderInfo, InterlaceMode, PixelArray};
use std::path::Path;
use thiserror::Error;

/// PNG 编解码错误
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("PNG decoding failed: {0}")]
    Decode(String),

    #[error("Unsupported array {array}: {reason}")]
    UnsupportedShape { array: String, reason: String },

    #[error("Deflate stream failed: {0}")]
    Deflate(#[from] std::io::Error),
}

/// 数组文件存取错误
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("file does not exist")]
    NotFound,

    #[error("not a valid .npy file: {0}")]
    Invalid(String),

    #[error("unsupported element type: {0}")]
    Unsupported(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// PNG 编解码器接口
pub trait CodecAdapter: Send + Sync {
    /// 解码完整的 PNG 字节流
    fn decode(&self, bytes: &[u8]) -> Result<PixelArray, CodecError>;

    /// 以给定压缩级别 (0-9) 和隔行模式编码
    fn encode(
        &self,
        array: &PixelArray,
        level: u8,
        interlace: InterlaceMode,
    ) -> Result<Vec<u8>, CodecError>;

    /// 只读取头信息，不解码像素
    fn read_header(&self, bytes: &[u8]) -> Result<HeaderInfo, CodecError>;
}

/// 数组容器接口
pub trait ArrayStore: Send + Sync {
    fn load(&self, path: &Path) -> Result<PixelArray, StoreError>;

    fn save(&self, path: &Path, array: &PixelArray) -> Result<(), StoreError>;
}
