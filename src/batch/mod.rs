//! # 批量处理模块
//!
//! 提供统一的文件批量转换能力。
//!
//! ## 功能
//! - 展开源文件列表（`-` 从标准输入读取）
//! - 全局选项校验
//! - 单文件转换（写入校验后替换源文件）
//! - 按顺序执行、失败隔离与致命终止
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod converter;
pub mod planner;
pub mod resolver;
pub mod runner;

pub use converter::FileConverter;
pub use planner::BatchRequest;
pub use runner::{BatchResult, BatchRunner, ConversionOutcome};
