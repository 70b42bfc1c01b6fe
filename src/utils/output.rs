//! # 美化输出工具
//!
//! 提供统一的终端输出样式。所有消息写到标准输出，
//! 错误消息统一以 `pngnpy:` 前缀开头。
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `main.rs` 使用
//! - 使用 `colored` 与 `console` crate

use crate::models::HeaderInfo;

use colored::Colorize;
use std::path::Path;

/// 错误消息前缀
pub const PREFIX: &str = "pngnpy:";

/// 标准输出不是终端时关闭颜色
pub fn init_color() {
    if !console::Term::stdout().is_term() {
        colored::control::set_override(false);
    }
}

/// 打印错误消息
pub fn print_error(msg: &str) {
    println!("{} {}", PREFIX.red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

/// 打印完成消息
pub fn print_done(msg: &str) {
    println!("{} {}", "[DONE]".green().bold(), msg);
}

/// 打印转换成功消息
pub fn print_conversion(from: &Path, to: &Path) {
    println!(
        "{} {} {} {}",
        "[OK]".green().bold(),
        from.display().to_string().dimmed(),
        "->".cyan(),
        to.display()
    );
}

/// 打印 PNG 头信息
pub fn print_header_fields(source: &Path, header: &HeaderInfo) {
    println!("{} {}", "Filename:".bold(), source.display());
    for (key, value) in header.iter() {
        println!("{}: {}", key, value);
    }
    println!();
}
