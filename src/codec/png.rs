//! # PNG 编解码器
//!
//! ## 功能
//! - 解码：使用 `png` crate，调色板与低位深灰度展开为 8 位，输出 (高, 宽, 通道) 数组
//! - 头信息：只读取到 IDAT 之前的块
//! - 编码：直接写出 PNG 块流（IHDR/IDAT/IEND），zlib 压缩由 `flate2` 完成，
//!   支持普通、渐进（逐行带刷新的多个 IDAT）与 Adam7 隔行三种模式
//!
//! ## 依赖关系
//! - 实现 `codec::CodecAdapter`
//! - 使用 `models/pixels.rs`, `models/header.rs`

use super::{CodecAdapter, CodecError};
use crate::models::{HeaderInfo, InterlaceMode, PixelArray};

use flate2::write::ZlibEncoder;
use flate2::{Compression, Crc};
use ndarray::{ArrayD, IxDyn};
use std::io::{Cursor, Write};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// 单个 IDAT 块的最大数据长度
const MAX_IDAT_LEN: usize = 1 << 20;

/// 渐进模式下每次刷新包含的行数
const PROGRESSIVE_BAND_ROWS: usize = 8;

/// Adam7 各遍的 (x 起点, y 起点, x 步长, y 步长)
const ADAM7_PASSES: [(usize, usize, usize, usize); 7] = [
    (0, 0, 8, 8),
    (4, 0, 8, 8),
    (0, 4, 4, 8),
    (2, 0, 4, 4),
    (0, 2, 2, 4),
    (1, 0, 2, 2),
    (0, 1, 1, 2),
];

/// PNG 编解码器
#[derive(Debug, Clone, Copy, Default)]
pub struct PngCodec;

impl PngCodec {
    pub fn new() -> Self {
        PngCodec
    }
}

impl CodecAdapter for PngCodec {
    fn decode(&self, bytes: &[u8]) -> Result<PixelArray, CodecError> {
        let mut decoder = ::png::Decoder::new(Cursor::new(bytes));
        decoder.set_transformations(::png::Transformations::EXPAND);
        let mut reader = decoder.read_info().map_err(decode_error)?;

        let mut buf = vec![0u8; reader.output_buffer_size()];
        let frame = reader.next_frame(&mut buf).map_err(decode_error)?;
        buf.truncate(frame.buffer_size());

        let shape = IxDyn(&[
            frame.height as usize,
            frame.width as usize,
            frame.color_type.samples(),
        ]);

        match frame.bit_depth {
            ::png::BitDepth::Eight => ArrayD::from_shape_vec(shape, buf)
                .map(PixelArray::U8)
                .map_err(decode_error),
            ::png::BitDepth::Sixteen => {
                let samples = buf
                    .chunks_exact(2)
                    .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                    .collect();
                ArrayD::from_shape_vec(shape, samples)
                    .map(PixelArray::U16)
                    .map_err(decode_error)
            }
            other => Err(CodecError::Decode(format!(
                "unexpected bit depth {} after expansion",
                other as u8
            ))),
        }
    }

    fn encode(
        &self,
        array: &PixelArray,
        level: u8,
        interlace: InterlaceMode,
    ) -> Result<Vec<u8>, CodecError> {
        let geometry = Geometry::of(array)?;
        let samples = array.to_be_bytes();
        let compression = Compression::new(u32::from(level.min(9)));

        let mut png = Vec::with_capacity(samples.len() / 2 + 64);
        png.extend_from_slice(&PNG_SIGNATURE);
        write_chunk(
            &mut png,
            b"IHDR",
            &geometry.ihdr(interlace == InterlaceMode::Adam7Interlaced),
        );

        match interlace {
            InterlaceMode::None => {
                let mut encoder = ZlibEncoder::new(Vec::new(), compression);
                for row in samples.chunks_exact(geometry.row_bytes()) {
                    encoder.write_all(&[0])?;
                    encoder.write_all(row)?;
                }
                write_idat(&mut png, &encoder.finish()?);
            }
            InterlaceMode::Progressive => {
                let mut encoder = ZlibEncoder::new(Vec::new(), compression);
                for band in samples.chunks(geometry.row_bytes() * PROGRESSIVE_BAND_ROWS) {
                    for row in band.chunks_exact(geometry.row_bytes()) {
                        encoder.write_all(&[0])?;
                        encoder.write_all(row)?;
                    }
                    // 同步刷新：已写出的行可被流式读取器立即解码
                    encoder.flush()?;
                    let flushed = std::mem::take(encoder.get_mut());
                    write_idat(&mut png, &flushed);
                }
                write_idat(&mut png, &encoder.finish()?);
            }
            InterlaceMode::Adam7Interlaced => {
                let mut encoder = ZlibEncoder::new(Vec::new(), compression);
                for pass in ADAM7_PASSES {
                    write_adam7_pass(&mut encoder, &samples, &geometry, pass)?;
                }
                write_idat(&mut png, &encoder.finish()?);
            }
        }

        write_chunk(&mut png, b"IEND", &[]);
        Ok(png)
    }

    fn read_header(&self, bytes: &[u8]) -> Result<HeaderInfo, CodecError> {
        let decoder = ::png::Decoder::new(Cursor::new(bytes));
        let reader = decoder.read_info().map_err(decode_error)?;
        let info = reader.info();

        let mut header = HeaderInfo::new();
        header.push("width", info.width);
        header.push("height", info.height);
        header.push("bit_depth", info.bit_depth as u8);
        header.push("color_type", color_type_name(info.color_type));
        header.push("channels", info.color_type.samples());
        header.push(
            "interlace_method",
            if info.interlaced { "adam7" } else { "none" },
        );
        Ok(header)
    }
}

fn decode_error(e: impl std::fmt::Display) -> CodecError {
    CodecError::Decode(e.to_string())
}

fn color_type_name(color_type: ::png::ColorType) -> &'static str {
    match color_type {
        ::png::ColorType::Grayscale => "grayscale",
        ::png::ColorType::Rgb => "rgb",
        ::png::ColorType::Indexed => "indexed",
        ::png::ColorType::GrayscaleAlpha => "grayscale_alpha",
        ::png::ColorType::Rgba => "rgba",
    }
}

/// 待编码图像的几何信息
#[derive(Debug, Clone, Copy)]
struct Geometry {
    width: usize,
    height: usize,
    channels: usize,
    bit_depth: u8,
}

impl Geometry {
    /// 校验数组形状：(高, 宽) 或 (高, 宽, 1..=4)
    fn of(array: &PixelArray) -> Result<Self, CodecError> {
        let unsupported = |reason: &str| CodecError::UnsupportedShape {
            array: array.to_string(),
            reason: reason.to_string(),
        };

        let (height, width, channels) = match *array.shape() {
            [h, w] => (h, w, 1),
            [h, w, c] => (h, w, c),
            _ => return Err(unsupported("expected (height, width[, channels])")),
        };

        if !(1..=4).contains(&channels) {
            return Err(unsupported("channel count must be 1-4"));
        }
        if width == 0 || height == 0 {
            return Err(unsupported("image must not be empty"));
        }
        if u32::try_from(width).is_err() || u32::try_from(height).is_err() {
            return Err(unsupported("dimensions exceed PNG limits"));
        }

        Ok(Geometry {
            width,
            height,
            channels,
            bit_depth: array.bit_depth(),
        })
    }

    fn bytes_per_pixel(&self) -> usize {
        self.channels * usize::from(self.bit_depth / 8)
    }

    fn row_bytes(&self) -> usize {
        self.width * self.bytes_per_pixel()
    }

    fn color_type(&self) -> u8 {
        match self.channels {
            1 => 0,
            2 => 4,
            3 => 2,
            _ => 6,
        }
    }

    fn ihdr(&self, interlaced: bool) -> [u8; 13] {
        let mut ihdr = [0u8; 13];
        ihdr[0..4].copy_from_slice(&(self.width as u32).to_be_bytes());
        ihdr[4..8].copy_from_slice(&(self.height as u32).to_be_bytes());
        ihdr[8] = self.bit_depth;
        ihdr[9] = self.color_type();
        // ihdr[10] 压缩方法、ihdr[11] 过滤方法固定为 0
        ihdr[12] = u8::from(interlaced);
        ihdr
    }
}

/// 写出一遍 Adam7 子图像的扫描线
fn write_adam7_pass<W: Write>(
    out: &mut W,
    samples: &[u8],
    geometry: &Geometry,
    (x0, y0, dx, dy): (usize, usize, usize, usize),
) -> std::io::Result<()> {
    if geometry.width <= x0 || geometry.height <= y0 {
        return Ok(());
    }

    let bpp = geometry.bytes_per_pixel();
    let row_bytes = geometry.row_bytes();
    let pass_width = (geometry.width - x0 + dx - 1) / dx;
    let mut line = Vec::with_capacity(1 + pass_width * bpp);

    for y in (y0..geometry.height).step_by(dy) {
        line.clear();
        line.push(0);
        let row = &samples[y * row_bytes..(y + 1) * row_bytes];
        for x in (x0..geometry.width).step_by(dx) {
            line.extend_from_slice(&row[x * bpp..(x + 1) * bpp]);
        }
        out.write_all(&line)?;
    }

    Ok(())
}

/// 将压缩数据按上限切分为若干 IDAT 块
fn write_idat(png: &mut Vec<u8>, data: &[u8]) {
    for part in data.chunks(MAX_IDAT_LEN) {
        write_chunk(png, b"IDAT", part);
    }
}

fn write_chunk(png: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(kind);
    png.extend_from_slice(data);

    let mut crc = Crc::new();
    crc.update(kind);
    crc.update(data);
    png.extend_from_slice(&crc.sum().to_be_bytes());
}
