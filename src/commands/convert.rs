//! # convert 命令实现
//!
//! PNG 与 `.npy` 之间的批量转换。
//!
//! ## 流程
//! 1. 校验全局选项（失败时不处理任何文件）
//! 2. 展开源文件列表（`-` 从标准输入读取）
//! 3. 按顺序逐个转换，单文件失败只报告不中断；
//!    目标写入校验失败时立即终止整个批处理
//!
//! ## 依赖关系
//! - 使用 `cli/convert.rs` 定义的参数
//! - 使用 `batch/`, `codec/`
//! - 使用 `utils/output.rs`

use crate::batch::{planner, resolver};
use crate::batch::{BatchRequest, BatchResult, BatchRunner, ConversionOutcome, FileConverter};
use crate::cli::convert::ConvertArgs;
use crate::codec::{ArrayStore, CodecAdapter, NpyStore, PngCodec};
use crate::error::Result;
use crate::utils::output;

use std::io::{self, BufRead};
use std::path::PathBuf;

/// 执行 convert 命令
pub fn execute(args: ConvertArgs) -> Result<BatchResult> {
    let stdin = io::stdin();
    execute_with_stdin(&args, stdin.lock())
}

/// 执行 convert 命令，标准输入由调用方提供
pub fn execute_with_stdin<R: BufRead>(args: &ConvertArgs, stdin: R) -> Result<BatchResult> {
    let request = planner::plan(args)?;
    let sources = resolver::resolve_sources(request.sources(), stdin)?;

    let runner = BatchRunner::new(args.jobs).with_progress(args.progress);

    if args.verbose {
        output::print_info(&format!(
            "{} {} file(s) (level {}, {}, {} job(s))",
            if request.header_only() {
                "Reading header of".to_string()
            } else {
                capitalize(&request.mode().to_string())
            },
            sources.len(),
            request.level(),
            request.interlace(),
            runner.jobs()
        ));
    }

    let result = run_batch(
        &request,
        &sources,
        &PngCodec::new(),
        &NpyStore::new(),
        &runner,
        args.verbose,
    );

    if result.aborted {
        output::print_warning(&format!(
            "{} source(s) left unprocessed",
            sources.len() - result.total()
        ));
    }

    if args.verbose {
        output::print_done(&format!(
            "{} converted, {} header(s), {} failed",
            result.converted, result.headers, result.failed
        ));

        if !result.failures.is_empty() {
            output::print_warning("Failed files:");
            for (path, err) in result.failures.iter().take(10) {
                output::print_warning(&format!("  {}: {}", path.display(), err));
            }
            if result.failures.len() > 10 {
                output::print_warning(&format!(
                    "  ... and {} more",
                    result.failures.len() - 10
                ));
            }
        }
    }

    Ok(result)
}

/// 使用给定的编解码器与数组存取执行批处理
pub fn run_batch(
    request: &BatchRequest,
    sources: &[PathBuf],
    codec: &dyn CodecAdapter,
    store: &dyn ArrayStore,
    runner: &BatchRunner,
    verbose: bool,
) -> BatchResult {
    let converter = FileConverter::new(request, codec, store);

    runner.run(
        sources,
        |source| converter.convert(source),
        |outcome| report(outcome, verbose),
    )
}

/// 输出单个文件的结果
fn report(outcome: &ConversionOutcome, verbose: bool) {
    match outcome {
        ConversionOutcome::Converted { destination, .. } => {
            if verbose {
                output::print_conversion(outcome.source(), destination);
            }
        }
        ConversionOutcome::Header { source, header } => {
            output::print_header_fields(source, header);
        }
        ConversionOutcome::Failed { error, .. } => {
            output::print_error(&error.to_string());
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
