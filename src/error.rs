//! # 统一错误处理模块
//!
//! 定义 pngnpy 的所有错误类型，使用 `thiserror` 派生。
//!
//! 错误分为三类：
//! - 配置错误：批处理开始前检查，任何文件都不会被处理
//! - 单文件错误：被转换为该文件的失败结果，批处理继续
//! - 致命错误：目标文件写入失败，整个批处理立即终止
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use std::path::Path;
use thiserror::Error;

/// pngnpy 统一错误类型
#[derive(Error, Debug)]
pub enum PngnpyError {
    // ─────────────────────────────────────────────────────────────
    // 配置错误
    // ─────────────────────────────────────────────────────────────
    #[error("compress level {level} not valid. Must be 0-9 inclusive.")]
    InvalidLevel { level: i64 },

    #[error("only progressive or interlaced can be specified at once.")]
    ConflictingInterlace,

    #[error("Unable to read file list from standard input: {source}")]
    StdinReadError {
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 单文件错误（可恢复）
    // ─────────────────────────────────────────────────────────────
    #[error("File \"{path}\" does not exist.")]
    SourceNotFound { path: String },

    #[error("Unable to read {path}: {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not a numpy file.")]
    NotAnArrayFile { path: String },

    #[error("{path} holds an array that cannot be stored as PNG: {reason}")]
    UnsupportedArray { path: String, reason: String },

    #[error("{path} could not be decoded.")]
    DecodeError { path: String },

    #[error("{path} header could not be decoded.")]
    HeaderDecodeError { path: String },

    #[error("{path} could not be encoded: {reason}")]
    EncodeError { path: String, reason: String },

    #[error("{path} would be overwritten by its own conversion. Skipping.")]
    DestinationIsSource { path: String },

    #[error("Wrote {dest} but could not remove {path}: {source}")]
    RemoveSourceFailed {
        path: String,
        dest: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 致命错误（终止整个批处理）
    // ─────────────────────────────────────────────────────────────
    #[error("Unable to write {dest}. Aborting.")]
    WriteVerificationFailure { dest: String },

    #[error("Unable to write {dest}: {reason}. Aborting.")]
    WriteFailed { dest: String, reason: String },
}

impl PngnpyError {
    /// 是否需要终止整个批处理
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PngnpyError::WriteVerificationFailure { .. } | PngnpyError::WriteFailed { .. }
        )
    }

    /// 进程退出码
    pub fn exit_code(&self) -> i32 {
        if self.is_fatal() {
            1
        } else {
            2
        }
    }

    pub fn source_not_found(path: &Path) -> Self {
        PngnpyError::SourceNotFound {
            path: path.display().to_string(),
        }
    }

    pub fn write_failed(dest: &Path, reason: impl std::fmt::Display) -> Self {
        PngnpyError::WriteFailed {
            dest: dest.display().to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn write_verification(dest: &Path) -> Self {
        PngnpyError::WriteVerificationFailure {
            dest: dest.display().to_string(),
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, PngnpyError>;
