//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数。只有一个命令：
//! 在 PNG 与 NumPy `.npy` 之间批量转换，或打印 PNG 头信息。
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: convert

pub mod convert;

use clap::Parser;

/// pngnpy - PNG 与 NumPy .npy 批量转换工具
#[derive(Parser, Debug)]
#[command(name = "pngnpy")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(
    about = "Compress and decompress PNG files to and from NumPy .npy files",
    long_about = "Compress and decompress PNG files to and from NumPy .npy files.\n\n\
                  Each source is replaced by its converted counterpart: the original \
                  file is deleted only after the new file has been written and verified."
)]
pub struct Cli {
    #[command(flatten)]
    pub convert: convert::ConvertArgs,
}
