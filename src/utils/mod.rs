//! # 工具函数模块
//!
//! 提供美化输出、进度条、目标路径推导等工具。
//!
//! ## 依赖关系
//! - 被 `batch/` 与 `commands/` 模块使用
//! - 子模块: output, paths, progress

pub mod output;
pub mod paths;
pub mod progress;
