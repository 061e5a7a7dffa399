//! Writing rendered frames to PNG files.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use voxscape_render::FrameView;

use crate::error::AppError;

/// Output path for frame `index` of `total`.
///
/// A single frame goes to `base` unchanged; sequences insert a zero-padded
/// index before the extension (`frame.png` -> `frame_0003.png`).
pub fn frame_path(base: &Path, index: u32, total: u32) -> PathBuf {
    if total <= 1 {
        return base.to_path_buf();
    }
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_string());
    let ext = base
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "png".to_string());
    base.with_file_name(format!("{stem}_{index:04}.{ext}"))
}

/// Encode a frame as an 8-bit RGBA PNG into `writer`.
pub fn encode_png<W: Write>(frame: &FrameView<'_>, writer: W) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(writer, frame.width(), frame.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&frame.to_rgba_bytes())?;
    writer.finish()
}

/// Write a frame to `path`, creating parent directories as needed.
pub fn write_png(frame: &FrameView<'_>, path: &Path) -> Result<(), AppError> {
    let io_err = |source| AppError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let file = File::create(path).map_err(io_err)?;
    encode_png(frame, BufWriter::new(file)).map_err(|source| AppError::Encode {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use voxscape_render::{ColorMap, HeightMap, TerrainContext, pack_rgba};

    use super::*;

    #[test]
    fn test_single_frame_keeps_path() {
        let base = Path::new("out/frame.png");
        assert_eq!(frame_path(base, 0, 1), PathBuf::from("out/frame.png"));
    }

    #[test]
    fn test_sequence_numbers_stem() {
        let base = Path::new("out/frame.png");
        assert_eq!(frame_path(base, 0, 3), PathBuf::from("out/frame_0000.png"));
        assert_eq!(frame_path(base, 12, 36), PathBuf::from("out/frame_0012.png"));
    }

    #[test]
    fn test_sequence_without_extension_defaults_to_png() {
        assert_eq!(
            frame_path(Path::new("shots"), 2, 5),
            PathBuf::from("shots_0002.png")
        );
    }

    #[test]
    fn test_written_png_decodes_to_frame() {
        let red = pack_rgba(255, 0, 0, 255);
        let color = ColorMap::from_pixels(2, 2, vec![red; 4]).unwrap();
        let height = HeightMap::from_samples(2, 2, vec![0; 4]).unwrap();
        let mut ctx = TerrainContext::new(color, height, 0.0, 0.0, pack_rgba(0, 0, 0, 255));
        let frame = ctx.render(20, 10, 0.0).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("frame.png");
        write_png(&frame, &path).unwrap();

        let decoder = png::Decoder::new(File::open(&path).unwrap());
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();
        assert_eq!((info.width, info.height), (20, 10));
        assert_eq!(&buf[..info.buffer_size()], frame.to_rgba_bytes().as_slice());
    }
}
