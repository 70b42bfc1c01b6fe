//! # pngnpy - PNG 与 NumPy `.npy` 批量互转工具
//!
//! 将 `.npy` 像素数组压缩为 PNG，或将 PNG 解压回 `.npy`，
//! 成功写入并校验目标文件后删除源文件。
//!
//! ## 模式
//! - 默认 - 压缩 (`.npy` → `.png`)
//! - `-d`  - 解压 (`.png` → `.npy`)
//! - `--header` - 只打印 PNG 头信息
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/     (源文件展开、校验、单文件转换、批量执行)
//!   │     ├── codec/     (PNG 编解码、.npy 存取)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod codec;
mod commands;
mod error;
mod models;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    utils::output::init_color();

    let cli = Cli::parse();

    match commands::run(cli) {
        Ok(result) if result.aborted => std::process::exit(1),
        Ok(_) => {}
        Err(e) => {
            utils::output::print_error(&e.to_string());
            std::process::exit(e.exit_code());
        }
    }
}
