//! # 批处理配置校验
//!
//! 在处理任何文件之前校验全局选项：
//! - 压缩级别必须在 0-9 之间
//! - `--progressive` 与 `--interlaced` 不能同时指定
//!
//! 校验失败时整个批处理不会开始。
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 调用
//! - 使用 `cli/convert.rs` 定义的参数

use crate::cli::convert::ConvertArgs;
use crate::error::{PngnpyError, Result};
use crate::models::{InterlaceMode, Mode};

/// 最大压缩级别
pub const MAX_LEVEL: i64 = 9;

/// 经过校验的批处理请求，构造后只读
#[derive(Debug, Clone)]
pub struct BatchRequest {
    mode: Mode,
    header_only: bool,
    level: u8,
    interlace: InterlaceMode,
    sources: Vec<String>,
}

impl BatchRequest {
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// 只打印头信息（优先于压缩/解压）
    pub fn header_only(&self) -> bool {
        self.header_only
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn interlace(&self) -> InterlaceMode {
        self.interlace
    }

    /// 原始源列表（可能包含 `-`）
    pub fn sources(&self) -> &[String] {
        &self.sources
    }
}

/// 校验参数并生成批处理请求
pub fn plan(args: &ConvertArgs) -> Result<BatchRequest> {
    let level = u8::try_from(args.level)
        .ok()
        .filter(|level| i64::from(*level) <= MAX_LEVEL)
        .ok_or(PngnpyError::InvalidLevel { level: args.level })?;

    let interlace = match (args.progressive, args.interlaced) {
        (true, true) => return Err(PngnpyError::ConflictingInterlace),
        (true, false) => InterlaceMode::Progressive,
        (false, true) => InterlaceMode::Adam7Interlaced,
        (false, false) => InterlaceMode::None,
    };

    let mode = if args.decompress && !args.compress {
        Mode::Decompress
    } else {
        Mode::Compress
    };

    Ok(BatchRequest {
        mode,
        header_only: args.header,
        level,
        interlace,
        sources: args.sources.clone(),
    })
}
