//! # 源文件列表展开
//!
//! 将命令行参数中的 `-` 替换为从标准输入读取的文件列表（每行一个），
//! 其余参数原样保留，顺序不变。
//!
//! 标准输入至多读取一次：只有存在 `-` 时才读取。
//! 第一个 `-` 展开为读到的全部行，之后的 `-` 面对已耗尽的输入，展开为空。
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 调用
//! - 无外部模块依赖

use crate::error::{PngnpyError, Result};

use std::io::BufRead;
use std::path::PathBuf;

/// 表示“从标准输入读取”的参数
pub const STDIN_SENTINEL: &str = "-";

/// 展开源文件列表
pub fn resolve_sources<R: BufRead>(args: &[String], mut stdin: R) -> Result<Vec<PathBuf>> {
    let mut stdin_consumed = false;
    let mut resolved = Vec::with_capacity(args.len());

    for arg in args {
        if arg != STDIN_SENTINEL {
            resolved.push(PathBuf::from(arg));
            continue;
        }

        if !stdin_consumed {
            resolved.extend(read_lines(&mut stdin)?);
            stdin_consumed = true;
        }
    }

    Ok(resolved)
}

/// 读取所有非空行（去掉行尾的 `\n` / `\r\n`）
fn read_lines<R: BufRead>(reader: R) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|source| PngnpyError::StdinReadError { source })?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        if !line.is_empty() {
            paths.push(PathBuf::from(line));
        }
    }
    Ok(paths)
}
