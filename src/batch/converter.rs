//! # 单文件转换器
//!
//! 每个源文件依次经历：读取源文件 → 转换 → 写入目标 → 校验并替换。
//!
//! ## 功能
//! - 头信息模式：只打印 PNG 头信息，不产生目标文件
//! - 解压模式：`.png` -> `.npy`
//! - 压缩模式：`.npy` -> `.png`
//! - 目标文件写入后必须存在且非空，才会删除源文件；
//!   否则返回致命错误，由批处理终止整个运行
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 调用
//! - 使用 `codec/` 协作接口
//! - 使用 `utils/paths.rs` 计算目标路径

use super::planner::BatchRequest;
use super::runner::ConversionOutcome;
use crate::codec::{ArrayStore, CodecAdapter, CodecError, StoreError};
use crate::error::{PngnpyError, Result};
use crate::models::{Mode, PixelArray};
use crate::utils::paths;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// 单文件转换器
pub struct FileConverter<'a> {
    request: &'a BatchRequest,
    codec: &'a dyn CodecAdapter,
    store: &'a dyn ArrayStore,
}

impl<'a> FileConverter<'a> {
    pub fn new(
        request: &'a BatchRequest,
        codec: &'a dyn CodecAdapter,
        store: &'a dyn ArrayStore,
    ) -> Self {
        Self {
            request,
            codec,
            store,
        }
    }

    /// 处理一个源文件，所有错误都转换为该文件的结果
    pub fn convert(&self, source: &Path) -> ConversionOutcome {
        let result = if self.request.header_only() {
            self.read_header(source)
        } else {
            match self.request.mode() {
                Mode::Compress => self.compress(source),
                Mode::Decompress => self.decompress(source),
            }
        };

        result.unwrap_or_else(|error| ConversionOutcome::Failed {
            source: source.to_path_buf(),
            error,
        })
    }

    fn read_header(&self, source: &Path) -> Result<ConversionOutcome> {
        let bytes = read_source(source)?;
        let header = self
            .codec
            .read_header(&bytes)
            .map_err(|_| PngnpyError::HeaderDecodeError {
                path: source.display().to_string(),
            })?;

        Ok(ConversionOutcome::Header {
            source: source.to_path_buf(),
            header,
        })
    }

    fn decompress(&self, source: &Path) -> Result<ConversionOutcome> {
        let bytes = read_source(source)?;
        let array = self
            .codec
            .decode(&bytes)
            .map_err(|_| PngnpyError::DecodeError {
                path: source.display().to_string(),
            })?;
        drop(bytes);

        let dest = destination_for(source, paths::array_destination(source))?;
        self.store
            .save(&dest, &array)
            .map_err(|e| PngnpyError::write_failed(&dest, e))?;

        verify_and_swap(source, dest)
    }

    fn compress(&self, source: &Path) -> Result<ConversionOutcome> {
        let array = self.load_array(source)?;
        let encoded = self
            .codec
            .encode(&array, self.request.level(), self.request.interlace())
            .map_err(|e| encode_error(source, e))?;
        drop(array);

        let dest = destination_for(source, paths::png_destination(source))?;
        fs::write(&dest, &encoded).map_err(|e| PngnpyError::write_failed(&dest, e))?;

        verify_and_swap(source, dest)
    }

    fn load_array(&self, source: &Path) -> Result<PixelArray> {
        let path = source.display().to_string();
        self.store.load(source).map_err(|e| match e {
            StoreError::NotFound => PngnpyError::SourceNotFound { path },
            StoreError::Invalid(_) => PngnpyError::NotAnArrayFile { path },
            StoreError::Unsupported(reason) => PngnpyError::UnsupportedArray { path, reason },
            StoreError::Io(source) => PngnpyError::FileReadError { path, source },
        })
    }
}

/// 完整读取源文件
fn read_source(source: &Path) -> Result<Vec<u8>> {
    fs::read(source).map_err(|e| match e.kind() {
        ErrorKind::NotFound => PngnpyError::source_not_found(source),
        _ => PngnpyError::FileReadError {
            path: source.display().to_string(),
            source: e,
        },
    })
}

/// 目标与源相同时拒绝转换
fn destination_for(source: &Path, dest: PathBuf) -> Result<PathBuf> {
    if dest == source {
        return Err(PngnpyError::DestinationIsSource {
            path: source.display().to_string(),
        });
    }
    Ok(dest)
}

fn encode_error(source: &Path, e: CodecError) -> PngnpyError {
    let path = source.display().to_string();
    match e {
        CodecError::UnsupportedShape { reason, .. } => {
            PngnpyError::UnsupportedArray { path, reason }
        }
        other => PngnpyError::EncodeError {
            path,
            reason: other.to_string(),
        },
    }
}

/// 校验目标文件存在且非空，然后删除源文件
fn verify_and_swap(source: &Path, dest: PathBuf) -> Result<ConversionOutcome> {
    match fs::metadata(&dest) {
        Ok(meta) if meta.len() > 0 => {}
        _ => return Err(PngnpyError::write_verification(&dest)),
    }

    fs::remove_file(source).map_err(|e| PngnpyError::RemoveSourceFailed {
        path: source.display().to_string(),
        dest: dest.display().to_string(),
        source: e,
    })?;

    Ok(ConversionOutcome::Converted {
        source: source.to_path_buf(),
        destination: dest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::planner;
    use crate::cli::convert::ConvertArgs;
    use crate::codec::{NpyStore, PngCodec};
    use crate::models::{HeaderInfo, InterlaceMode};
    use ndarray::{Array, IxDyn};
    use tempfile::TempDir;

    fn request(decompress: bool, header: bool) -> BatchRequest {
        planner::plan(&ConvertArgs {
            decompress,
            header,
            ..ConvertArgs::default()
        })
        .unwrap()
    }

    fn sample_array() -> PixelArray {
        PixelArray::U8(Array::from_shape_fn(IxDyn(&[6, 5, 3]), |idx| {
            (idx[0] * 40 + idx[1] * 9 + idx[2]) as u8
        }))
    }

    fn write_npy(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        NpyStore::new().save(&path, &sample_array()).unwrap();
        path
    }

    fn write_png(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        let png = PngCodec::new()
            .encode(&sample_array(), 6, InterlaceMode::None)
            .unwrap();
        fs::write(&path, png).unwrap();
        path
    }

    /// 编码结果为空的编解码器，用于模拟零长度写入
    struct EmptyCodec;

    impl CodecAdapter for EmptyCodec {
        fn decode(&self, _bytes: &[u8]) -> std::result::Result<PixelArray, CodecError> {
            Ok(sample_array())
        }

        fn encode(
            &self,
            _array: &PixelArray,
            _level: u8,
            _interlace: InterlaceMode,
        ) -> std::result::Result<Vec<u8>, CodecError> {
            Ok(Vec::new())
        }

        fn read_header(&self, _bytes: &[u8]) -> std::result::Result<HeaderInfo, CodecError> {
            Ok(HeaderInfo::new())
        }
    }

    #[test]
    fn test_compress_replaces_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_npy(&dir, "cells.npy");
        let req = request(false, false);
        let converter = FileConverter::new(&req, &PngCodec, &NpyStore);

        match converter.convert(&source) {
            ConversionOutcome::Converted { destination, .. } => {
                assert_eq!(destination, dir.path().join("cells.png"));
                let png = fs::read(&destination).unwrap();
                assert_eq!(PngCodec.decode(&png).unwrap(), sample_array());
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(!source.exists());
    }

    #[test]
    fn test_decompress_replaces_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_png(&dir, "cells.png");
        let req = request(true, false);
        let converter = FileConverter::new(&req, &PngCodec, &NpyStore);

        let outcome = converter.convert(&source);
        assert!(matches!(outcome, ConversionOutcome::Converted { .. }));
        assert!(!source.exists());
        let dest = dir.path().join("cells.npy");
        assert_eq!(NpyStore.load(&dest).unwrap(), sample_array());
    }

    #[test]
    fn test_missing_source_is_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let req = request(true, false);
        let converter = FileConverter::new(&req, &PngCodec, &NpyStore);

        let outcome = converter.convert(&dir.path().join("ghost.png"));
        match outcome {
            ConversionOutcome::Failed { ref error, .. } => {
                assert!(matches!(error, PngnpyError::SourceNotFound { .. }));
                assert!(!outcome.is_fatal());
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(!dir.path().join("ghost.npy").exists());
    }

    #[test]
    fn test_compress_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let req = request(false, false);
        let converter = FileConverter::new(&req, &PngCodec, &NpyStore);

        let outcome = converter.convert(&dir.path().join("ghost.npy"));
        assert!(matches!(
            outcome,
            ConversionOutcome::Failed {
                error: PngnpyError::SourceNotFound { .. },
                ..
            }
        ));
        assert!(!dir.path().join("ghost.png").exists());
    }

    #[test]
    fn test_not_a_numpy_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("notes.npy");
        fs::write(&source, b"just some text").unwrap();
        let req = request(false, false);
        let converter = FileConverter::new(&req, &PngCodec, &NpyStore);

        let outcome = converter.convert(&source);
        assert!(matches!(
            outcome,
            ConversionOutcome::Failed {
                error: PngnpyError::NotAnArrayFile { .. },
                ..
            }
        ));
        assert!(source.exists());
        assert!(!dir.path().join("notes.png").exists());
    }

    #[test]
    fn test_undecodable_png_keeps_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("broken.png");
        fs::write(&source, b"\x89PNG but not really").unwrap();
        let req = request(true, false);
        let converter = FileConverter::new(&req, &PngCodec, &NpyStore);

        let outcome = converter.convert(&source);
        assert!(matches!(
            outcome,
            ConversionOutcome::Failed {
                error: PngnpyError::DecodeError { .. },
                ..
            }
        ));
        assert!(source.exists());
        assert!(!dir.path().join("broken.npy").exists());
    }

    #[test]
    fn test_header_mode_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_png(&dir, "cells.png");
        let req = request(false, true);
        let converter = FileConverter::new(&req, &PngCodec, &NpyStore);

        match converter.convert(&source) {
            ConversionOutcome::Header { header, .. } => {
                assert_eq!(header.get("width"), Some("5"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(source.exists());
        let entries = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_header_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("junk.png");
        fs::write(&source, b"junk").unwrap();
        let req = request(false, true);
        let converter = FileConverter::new(&req, &PngCodec, &NpyStore);

        assert!(matches!(
            converter.convert(&source),
            ConversionOutcome::Failed {
                error: PngnpyError::HeaderDecodeError { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_zero_length_write_is_fatal_and_keeps_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_npy(&dir, "cells.npy");
        let req = request(false, false);
        let converter = FileConverter::new(&req, &EmptyCodec, &NpyStore);

        let outcome = converter.convert(&source);
        assert!(outcome.is_fatal());
        assert!(matches!(
            outcome,
            ConversionOutcome::Failed {
                error: PngnpyError::WriteVerificationFailure { .. },
                ..
            }
        ));
        assert!(source.exists());
    }

    #[test]
    fn test_destination_equal_to_source_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        // 内容是 PNG，名字却是 .npy：解压目标会与源相同
        let source = write_png(&dir, "mislabeled.npy");
        let req = request(true, false);
        let converter = FileConverter::new(&req, &PngCodec, &NpyStore);

        let outcome = converter.convert(&source);
        assert!(matches!(
            outcome,
            ConversionOutcome::Failed {
                error: PngnpyError::DestinationIsSource { .. },
                ..
            }
        ));
        assert!(PngCodec.decode(&fs::read(&source).unwrap()).is_ok());
    }

    #[test]
    fn test_existing_destination_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_npy(&dir, "cells.npy");
        fs::write(dir.path().join("cells.png"), b"stale").unwrap();
        let req = request(false, false);
        let converter = FileConverter::new(&req, &PngCodec, &NpyStore);

        assert!(matches!(
            converter.convert(&source),
            ConversionOutcome::Converted { .. }
        ));
        let png = fs::read(dir.path().join("cells.png")).unwrap();
        assert_eq!(PngCodec.decode(&png).unwrap(), sample_array());
    }
}
