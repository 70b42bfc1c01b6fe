//! # 目标路径命名
//!
//! - `.png` -> `.npy`: 去掉末尾的 `.png` 扩展名，若结果尚无 `.npy` 扩展名则追加
//! - `.npy` -> `.png`: 去掉末尾的 `.npy` 扩展名，追加 `.png`
//!
//! 只处理末尾扩展名，文件名中间出现的 `.png`/`.npy` 保持不变。
//!
//! ## 依赖关系
//! - 被 `batch/converter.rs` 使用
//! - 无外部模块依赖

use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const PNG_EXTENSION: &str = "png";
pub const NPY_EXTENSION: &str = "npy";

/// 解压目标路径 (`x.png` -> `x.npy`)
pub fn array_destination(source: &Path) -> PathBuf {
    let stripped = strip_extension(source, PNG_EXTENSION);
    if has_extension(&stripped, NPY_EXTENSION) {
        stripped
    } else {
        append_extension(stripped, NPY_EXTENSION)
    }
}

/// 压缩目标路径 (`x.npy` -> `x.png`)
pub fn png_destination(source: &Path) -> PathBuf {
    append_extension(strip_extension(source, NPY_EXTENSION), PNG_EXTENSION)
}

/// 检查扩展名（忽略 ASCII 大小写）
fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e.eq_ignore_ascii_case(ext))
}

fn strip_extension(path: &Path, ext: &str) -> PathBuf {
    if has_extension(path, ext) {
        path.with_extension("")
    } else {
        path.to_path_buf()
    }
}

/// 追加扩展名而不替换已有扩展名 (`a.b` -> `a.b.npy`)
fn append_extension(path: PathBuf, ext: &str) -> PathBuf {
    let mut name: OsString = path.into_os_string();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}
