//! # 转换参数 CLI 定义
//!
//! PNG 与 `.npy` 之间的批量转换参数。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数经 `batch/planner.rs` 校验后传递给 `commands/convert.rs`

use clap::Args;

/// 转换参数
#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Compress .npy files into .png files (default)
    #[arg(short = 'c', long, default_value_t = false)]
    pub compress: bool,

    /// Decompress .png files into .npy files
    #[arg(short = 'd', long, default_value_t = false, conflicts_with = "compress")]
    pub decompress: bool,

    /// Print the header of each PNG file instead of converting it
    #[arg(long, default_value_t = false)]
    pub header: bool,

    /// Compression level (0-9)
    #[arg(
        short,
        long,
        default_value_t = 6,
        allow_negative_numbers = true,
        env = "PNGNPY_LEVEL"
    )]
    pub level: i64,

    /// Create a progressive PNG (loads top to bottom on a slow connection). Mutually exclusive with --interlaced
    #[arg(short, long, default_value_t = false)]
    pub progressive: bool,

    /// Create an Adam7 interlaced PNG (loads in increasing resolution). Mutually exclusive with --progressive
    #[arg(short, long, default_value_t = false)]
    pub interlaced: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 1, env = "PNGNPY_JOBS")]
    pub jobs: usize,

    /// Show a progress bar on stderr
    #[arg(long, default_value_t = false)]
    pub progress: bool,

    /// Report every converted file and a final summary
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Files to convert; use '-' to read more paths (one per line) from stdin
    #[arg(value_name = "SOURCE")]
    pub sources: Vec<String>,
}

impl Default for ConvertArgs {
    fn default() -> Self {
        ConvertArgs {
            compress: false,
            decompress: false,
            header: false,
            level: 6,
            progressive: false,
            interlaced: false,
            jobs: 1,
            progress: false,
            verbose: false,
            sources: Vec::new(),
        }
    }
}
