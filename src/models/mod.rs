//! # 数据模型模块
//!
//! 定义像素数组、PNG 头信息与批处理请求中使用的枚举。
//!
//! ## 依赖关系
//! - 被 `codec/`, `batch/` 和 `commands/` 使用
//! - 子模块: pixels, header, request

pub mod header;
pub mod pixels;
pub mod request;

pub use header::HeaderInfo;
pub use pixels::PixelArray;
pub use request::{InterlaceMode, Mode};
