//! # 转换模式定义
//!
//! 批处理的转换方向与 PNG 隔行模式。
//!
//! ## 依赖关系
//! - 被 `batch/planner.rs` 和 `codec/` 使用
//! - 无外部模块依赖

/// 转换方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// `.npy` -> `.png`
    Compress,
    /// `.png` -> `.npy`
    Decompress,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Compress => write!(f, "compress"),
            Mode::Decompress => write!(f, "decompress"),
        }
    }
}

/// PNG 编码时的渐进/隔行模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterlaceMode {
    #[default]
    None,
    /// 非隔行，但逐行带刷新输出，可自上而下逐步显示
    Progressive,
    /// Adam7 隔行
    Adam7Interlaced,
}

impl InterlaceMode {
    /// 所有模式
    #[cfg(test)]
    pub const ALL: [InterlaceMode; 3] = [
        InterlaceMode::None,
        InterlaceMode::Progressive,
        InterlaceMode::Adam7Interlaced,
    ];
}

impl std::fmt::Display for InterlaceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InterlaceMode::None => write!(f, "none"),
            InterlaceMode::Progressive => write!(f, "progressive"),
            InterlaceMode::Adam7Interlaced => write!(f, "adam7"),
        }
    }
}
