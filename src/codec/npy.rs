//! # `.npy` 数组存取
//!
//! 基于 `ndarray-npy` 读写 NumPy `.npy` 文件，元素类型限定为 `u8`/`u16`。
//!
//! ## 依赖关系
//! - 实现 `codec::ArrayStore`
//! - 使用 `models/pixels.rs`

use super::{ArrayStore, StoreError};
use crate::models::PixelArray;

use ndarray::ArrayD;
use ndarray_npy::{ReadNpyError, ReadNpyExt, WriteNpyExt};
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;

/// `.npy` 文件存取
#[derive(Debug, Clone, Copy, Default)]
pub struct NpyStore;

impl NpyStore {
    pub fn new() -> Self {
        NpyStore
    }
}

impl ArrayStore for NpyStore {
    fn load(&self, path: &Path) -> Result<PixelArray, StoreError> {
        let bytes = fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StoreError::NotFound,
            _ => StoreError::Io(e),
        })?;

        // 先按 u8 读取，描述符不匹配时再尝试 u16
        match ArrayD::<u8>::read_npy(bytes.as_slice()) {
            Ok(array) => return Ok(PixelArray::U8(array)),
            Err(ReadNpyError::WrongDescriptor(_)) => {}
            Err(e) => return Err(StoreError::Invalid(e.to_string())),
        }

        match ArrayD::<u16>::read_npy(bytes.as_slice()) {
            Ok(array) => Ok(PixelArray::U16(array)),
            Err(e @ ReadNpyError::WrongDescriptor(_)) => {
                Err(StoreError::Unsupported(e.to_string()))
            }
            Err(e) => Err(StoreError::Invalid(e.to_string())),
        }
    }

    fn save(&self, path: &Path, array: &PixelArray) -> Result<(), StoreError> {
        let mut writer = BufWriter::new(File::create(path)?);
        let written = match array {
            PixelArray::U8(a) => a.write_npy(&mut writer),
            PixelArray::U16(a) => a.write_npy(&mut writer),
        };
        written.map_err(|e| {
            StoreError::Io(std::io::Error::new(ErrorKind::Other, e.to_string()))
        })?;
        writer.flush()?;
        Ok(())
    }
}
