//! # 批量执行器
//!
//! 按输入顺序执行批量转换任务。
//!
//! ## 功能
//! - `jobs == 1` 时严格顺序处理
//! - `jobs > 1` 时以 `jobs` 个文件为一个窗口，在 rayon 线程池中并行处理，
//!   每个窗口结束后按输入顺序报告结果
//! - 出现致命结果时不再启动后续文件
//! - 进度条显示与结果汇总
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::error::PngnpyError;
use crate::models::HeaderInfo;
use crate::utils::progress;

use indicatif::ProgressBar;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// 单个文件处理结果
#[derive(Debug)]
pub enum ConversionOutcome {
    /// 转换成功，源文件已被删除
    Converted {
        source: PathBuf,
        destination: PathBuf,
    },
    /// 头信息读取成功
    Header { source: PathBuf, header: HeaderInfo },
    /// 处理失败
    Failed { source: PathBuf, error: PngnpyError },
}

impl ConversionOutcome {
    pub fn source(&self) -> &Path {
        match self {
            ConversionOutcome::Converted { source, .. }
            | ConversionOutcome::Header { source, .. }
            | ConversionOutcome::Failed { source, .. } => source,
        }
    }

    /// 是否需要终止整个批处理
    pub fn is_fatal(&self) -> bool {
        matches!(self, ConversionOutcome::Failed { error, .. } if error.is_fatal())
    }
}

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchResult {
    /// 转换成功数量
    pub converted: usize,
    /// 打印头信息数量
    pub headers: usize,
    /// 失败数量
    pub failed: usize,
    /// 失败详情
    pub failures: Vec<(PathBuf, String)>,
    /// 是否因致命错误提前终止
    pub aborted: bool,
}

impl BatchResult {
    /// 合并处理结果
    pub fn merge(&mut self, outcome: &ConversionOutcome) {
        if outcome.is_fatal() {
            self.aborted = true;
        }
        match outcome {
            ConversionOutcome::Converted { .. } => self.converted += 1,
            ConversionOutcome::Header { .. } => self.headers += 1,
            ConversionOutcome::Failed { source, error } => {
                self.failed += 1;
                self.failures.push((source.clone(), error.to_string()));
            }
        }
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.converted + self.headers + self.failed
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
    /// 是否显示进度条
    show_progress: bool,
}

impl BatchRunner {
    /// 创建新的批量执行器（`jobs == 0` 表示使用全部 CPU）
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self {
            jobs,
            show_progress: false,
        }
    }

    /// 设置是否显示进度条
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// 处理文件列表，`report` 按输入顺序收到每个结果
    pub fn run<F, R>(&self, files: &[PathBuf], processor: F, mut report: R) -> BatchResult
    where
        F: Fn(&Path) -> ConversionOutcome + Sync + Send,
        R: FnMut(&ConversionOutcome),
    {
        let pb =
            progress::create_progress_bar(files.len() as u64, "Converting", self.show_progress);
        let mut batch_result = BatchResult::default();

        let pool = if self.jobs > 1 {
            rayon::ThreadPoolBuilder::new()
                .num_threads(self.jobs)
                .build()
                .ok()
        } else {
            None
        };

        let window = if pool.is_some() { self.jobs } else { 1 };

        for chunk in windows(files, window) {
            let outcomes: Vec<ConversionOutcome> = match &pool {
                Some(pool) => pool.install(|| {
                    chunk
                        .par_iter()
                        .map(|file| processor(file.as_path()))
                        .collect()
                }),
                None => chunk.iter().map(|file| processor(file.as_path())).collect(),
            };

            for outcome in &outcomes {
                report_outcome(&pb, &mut report, outcome);
                batch_result.merge(outcome);
                pb.inc(1);
            }

            if batch_result.aborted {
                break;
            }
        }

        if batch_result.aborted {
            pb.abandon();
        } else {
            pb.finish_and_clear();
        }

        batch_result
    }
}

/// 按输入顺序切分窗口，每个窗口最多 `size` 个文件且路径互不相同
fn windows(files: &[PathBuf], size: usize) -> Vec<&[PathBuf]> {
    let mut windows = Vec::new();
    let mut start = 0;

    for (i, file) in files.iter().enumerate() {
        let window = &files[start..i];
        if window.len() == size || window.contains(file) {
            windows.push(window);
            start = i;
        }
    }
    if start < files.len() {
        windows.push(&files[start..]);
    }

    windows
}

fn report_outcome<R>(pb: &ProgressBar, report: &mut R, outcome: &ConversionOutcome)
where
    R: FnMut(&ConversionOutcome),
{
    pb.suspend(|| report(outcome));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::collections::HashSet;
    use std::sync::Mutex;

    fn paths(list: &[&str]) -> Vec<PathBuf> {
        list.iter().map(PathBuf::from).collect()
    }

    fn files(n: usize) -> Vec<PathBuf> {
        (0..n).map(|i| PathBuf::from(format!("f{}.npy", i))).collect()
    }

    fn converted(path: &Path) -> ConversionOutcome {
        ConversionOutcome::Converted {
            source: path.to_path_buf(),
            destination: path.with_extension("png"),
        }
    }

    fn fatal(path: &Path) -> ConversionOutcome {
        ConversionOutcome::Failed {
            source: path.to_path_buf(),
            error: PngnpyError::write_verification(&path.with_extension("png")),
        }
    }

    fn missing(path: &Path) -> ConversionOutcome {
        ConversionOutcome::Failed {
            source: path.to_path_buf(),
            error: PngnpyError::source_not_found(path),
        }
    }

    #[test]
    fn test_failures_do_not_stop_the_batch() {
        let runner = BatchRunner::new(1);
        let result = runner.run(
            &files(4),
            |p| {
                if p == Path::new("f1.npy") {
                    missing(p)
                } else {
                    converted(p)
                }
            },
            |_| {},
        );

        assert_eq!(result.converted, 3);
        assert_eq!(result.failed, 1);
        assert_eq!(result.total(), 4);
        assert!(!result.aborted);
        assert_eq!(result.failures[0].0, PathBuf::from("f1.npy"));
    }

    #[test]
    fn test_fatal_outcome_stops_remaining_files() {
        let started = AtomicUsize::new(0);
        let runner = BatchRunner::new(1);
        let result = runner.run(
            &files(5),
            |p| {
                started.fetch_add(1, Ordering::SeqCst);
                if p == Path::new("f2.npy") {
                    fatal(p)
                } else {
                    converted(p)
                }
            },
            |_| {},
        );

        assert!(result.aborted);
        assert_eq!(started.load(Ordering::SeqCst), 3);
        assert_eq!(result.converted, 2);
        assert_eq!(result.failed, 1);
    }

    #[test]
    fn test_parallel_reports_in_input_order() {
        let reported = Mutex::new(Vec::new());
        let runner = BatchRunner::new(3);
        let input = files(10);

        let result = runner.run(&input, converted, |o| {
            reported.lock().unwrap().push(o.source().to_path_buf())
        });

        assert_eq!(result.converted, 10);
        assert_eq!(reported.into_inner().unwrap(), input);
    }

    #[test]
    fn test_parallel_fatal_skips_later_windows() {
        let started = AtomicUsize::new(0);
        let runner = BatchRunner::new(2);
        let result = runner.run(
            &files(7),
            |p| {
                started.fetch_add(1, Ordering::SeqCst);
                if p == Path::new("f1.npy") {
                    fatal(p)
                } else {
                    converted(p)
                }
            },
            |_| {},
        );

        // 第一个窗口 (f0, f1) 已启动，其余窗口不会开始
        assert!(result.aborted);
        assert_eq!(started.load(Ordering::SeqCst), 2);
        assert_eq!(result.total(), 2);
    }

    #[test]
    fn test_windows_split_before_repeated_paths() {
        let input = paths(&["a", "b", "a", "c", "d", "d", "e"]);
        let split: Vec<Vec<PathBuf>> = windows(&input, 3)
            .into_iter()
            .map(|w| w.to_vec())
            .collect();

        assert_eq!(
            split,
            vec![
                paths(&["a", "b"]),
                paths(&["a", "c", "d"]),
                paths(&["d", "e"]),
            ]
        );
        assert!(windows(&[], 3).is_empty());
    }

    #[test]
    fn test_repeated_path_never_processed_concurrently() {
        let in_flight = Mutex::new(HashSet::new());
        let runner = BatchRunner::new(4);
        let input = paths(&["a.npy", "a.npy", "b.npy", "a.npy", "b.npy", "c.npy"]);

        let result = runner.run(
            &input,
            |p| {
                assert!(
                    in_flight.lock().unwrap().insert(p.to_path_buf()),
                    "{} processed twice at once",
                    p.display()
                );
                std::thread::sleep(std::time::Duration::from_millis(20));
                in_flight.lock().unwrap().remove(p);
                converted(p)
            },
            |_| {},
        );

        assert_eq!(result.converted, 6);
        assert!(in_flight.into_inner().unwrap().is_empty());
    }

    #[test]
    fn test_auto_jobs() {
        assert!(BatchRunner::new(0).jobs() >= 1);
        assert_eq!(BatchRunner::new(4).jobs(), 4);
    }
}
