//! Image resizing for single files and whole directories
//!
//! - `geometry`: Scale and centering arithmetic for fit/crop
//! - `batch`: Directory mode with per-file error isolation

pub mod batch;
pub mod geometry;

use crate::error::ResizeError;
use clap::ValueEnum;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat, Rgb, RgbImage};
use std::fmt;
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::debug;

/// JPEG quality used for every saved image
pub const JPEG_QUALITY: u8 = 95;

/// Canvas color behind images in fit mode
pub const PAD_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

const FILTER: FilterType = FilterType::Lanczos3;

/// How the source is mapped onto the target size
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResizeMode {
    /// Stretch to exactly the target size
    Resize,
    /// Keep aspect ratio and pad with white
    Fit,
    /// Keep aspect ratio and crop the center
    Crop,
}

impl fmt::Display for ResizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Resize => "resize",
            Self::Fit => "fit",
            Self::Crop => "crop",
        };
        f.write_str(name)
    }
}

/// Resize an in-memory image to exactly `width` x `height`.
pub fn resize_image(
    img: &DynamicImage,
    width: u32,
    height: u32,
    mode: ResizeMode,
) -> Result<DynamicImage, ResizeError> {
    if width == 0 || height == 0 {
        return Err(ResizeError::InvalidSize { width, height });
    }

    let (src_width, src_height) = img.dimensions();
    if src_width == 0 || src_height == 0 {
        return Err(ResizeError::EmptyImage);
    }

    let resized = match mode {
        ResizeMode::Resize => img.resize_exact(width, height, FILTER),
        ResizeMode::Fit => {
            let (inner_width, inner_height) =
                geometry::fit_within(src_width, src_height, width, height);
            let inner = img.resize_exact(inner_width, inner_height, FILTER).to_rgb8();

            let mut canvas = RgbImage::from_pixel(width, height, PAD_COLOR);
            let x = geometry::center_offset(width, inner_width);
            let y = geometry::center_offset(height, inner_height);
            image::imageops::overlay(&mut canvas, &inner, x as i64, y as i64);
            DynamicImage::ImageRgb8(canvas)
        }
        ResizeMode::Crop => {
            let (cover_width, cover_height) = geometry::cover(src_width, src_height, width, height);
            let covered = img.resize_exact(cover_width, cover_height, FILTER);

            let left = geometry::center_offset(cover_width, width);
            let top = geometry::center_offset(cover_height, height);
            covered.crop_imm(left, top, width, height)
        }
    };

    debug!(
        "{} {}x{} -> {}x{}",
        mode,
        src_width,
        src_height,
        resized.width(),
        resized.height()
    );
    Ok(resized)
}

/// Save an image, picking the format from the output extension.
///
/// JPEG output is written at [`JPEG_QUALITY`] and flattened to RGB.
pub fn save_image(img: &DynamicImage, output_path: &Path) -> Result<(), ResizeError> {
    let format = ImageFormat::from_path(output_path)?;

    if format == ImageFormat::Jpeg {
        let file = fs::File::create(output_path)?;
        let encoder = JpegEncoder::new_with_quality(BufWriter::new(file), JPEG_QUALITY);
        DynamicImage::ImageRgb8(img.to_rgb8()).write_with_encoder(encoder)?;
    } else {
        img.save_with_format(output_path, format)?;
    }

    Ok(())
}

/// Resize one image file and write the result to `output_path`.
pub fn resize_file(
    input_path: &Path,
    output_path: &Path,
    width: u32,
    height: u32,
    mode: ResizeMode,
) -> Result<(u32, u32), ResizeError> {
    let img = image::open(input_path)?;
    println!("Original size: {:?}", img.dimensions());

    let resized = resize_image(&img, width, height, mode)?;
    save_image(&resized, output_path)?;

    println!("Resized to: {:?}", resized.dimensions());
    println!("Saved to: {}", output_path.display());
    Ok(resized.dimensions())
}

/// Default output for single-file mode: `photo.png` -> `photo_resized.png`
pub fn default_output_path(input_path: &Path) -> PathBuf {
    let stem = input_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match input_path.extension() {
        Some(ext) => format!("{}_resized.{}", stem, ext.to_string_lossy()),
        None => format!("{}_resized", stem),
    };
    input_path.with_file_name(name)
}

/// Entry point for single-file mode. Errors are returned to the caller.
pub fn run_single(
    input_path: &Path,
    output_path: Option<&Path>,
    width: u32,
    height: u32,
    mode: ResizeMode,
) -> Result<(), ResizeError> {
    if !input_path.is_file() {
        return Err(ResizeError::InputNotFound(input_path.to_path_buf()));
    }

    let output_path = output_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input_path));

    resize_file(input_path, &output_path, width, height, mode)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use tempfile::TempDir;

    const RED: Rgb<u8> = Rgb([200, 30, 30]);

    fn solid(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, RED))
    }

    fn is_reddish(pixel: &Rgb<u8>) -> bool {
        pixel[0] > 150 && pixel[1] < 80 && pixel[2] < 80
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(ResizeMode::from_str("fit", false).unwrap(), ResizeMode::Fit);
        assert_eq!(ResizeMode::from_str("crop", false).unwrap(), ResizeMode::Crop);
        assert_eq!(ResizeMode::from_str("resize", false).unwrap(), ResizeMode::Resize);
        assert!(ResizeMode::from_str("zoom", false).is_err());

        for mode in ResizeMode::value_variants() {
            let name = mode.to_possible_value().unwrap();
            assert_eq!(name.get_name(), mode.to_string());
        }
    }

    #[test]
    fn test_zero_target_is_rejected() {
        let err = resize_image(&solid(4, 4), 0, 10, ResizeMode::Resize).unwrap_err();
        assert!(matches!(err, ResizeError::InvalidSize { width: 0, height: 10 }));
    }

    #[test]
    fn test_empty_source_is_rejected() {
        let err = resize_image(&DynamicImage::new_rgb8(0, 0), 8, 8, ResizeMode::Crop).unwrap_err();
        assert!(matches!(err, ResizeError::EmptyImage));
    }

    #[test]
    fn test_every_mode_hits_exact_size() {
        let mut rng = StdRng::seed_from_u64(42);
        let modes = [ResizeMode::Resize, ResizeMode::Fit, ResizeMode::Crop];

        for _ in 0..25 {
            let src = solid(rng.random_range(1..80), rng.random_range(1..80));
            let (width, height) = (rng.random_range(1..60), rng.random_range(1..60));

            for mode in modes {
                let out = resize_image(&src, width, height, mode).unwrap();
                assert_eq!(out.dimensions(), (width, height), "{mode} from {:?}", src.dimensions());
            }
        }
    }

    #[test]
    fn test_fit_pads_with_white() {
        // Wide source into a tall target: bands above and below
        let out = resize_image(&solid(80, 40), 40, 60, ResizeMode::Fit)
            .unwrap()
            .to_rgb8();

        // Inner image is 40x20, placed at y = 20
        assert_eq!(*out.get_pixel(20, 0), PAD_COLOR);
        assert_eq!(*out.get_pixel(20, 59), PAD_COLOR);
        assert!(is_reddish(out.get_pixel(20, 30)));
        assert!(is_reddish(out.get_pixel(0, 30)));
        assert!(is_reddish(out.get_pixel(39, 30)));
    }

    #[test]
    fn test_fit_odd_padding_is_floored() {
        // Inner is 10x5 inside 10x8: 3 spare rows, 1 above and 2 below
        let out = resize_image(&solid(20, 10), 10, 8, ResizeMode::Fit)
            .unwrap()
            .to_rgb8();

        assert_eq!(*out.get_pixel(5, 0), PAD_COLOR);
        assert!(is_reddish(out.get_pixel(5, 1)));
        assert!(is_reddish(out.get_pixel(5, 5)));
        assert_eq!(*out.get_pixel(5, 6), PAD_COLOR);
        assert_eq!(*out.get_pixel(5, 7), PAD_COLOR);
    }

    #[test]
    fn test_crop_introduces_no_padding() {
        let out = resize_image(&solid(120, 30), 50, 50, ResizeMode::Crop)
            .unwrap()
            .to_rgb8();

        assert_eq!(out.dimensions(), (50, 50));
        assert!(out.pixels().all(is_reddish));
    }

    #[test]
    fn test_crop_keeps_center() {
        // Left half black, right half white; a centered square crop holds both
        let mut src = RgbImage::from_pixel(100, 50, Rgb([255, 255, 255]));
        for y in 0..50 {
            for x in 0..50 {
                src.put_pixel(x, y, Rgb([0, 0, 0]));
            }
        }

        let out = resize_image(&DynamicImage::ImageRgb8(src), 50, 50, ResizeMode::Crop)
            .unwrap()
            .to_rgb8();

        assert!(out.get_pixel(2, 25)[0] < 30);
        assert!(out.get_pixel(47, 25)[0] > 225);
    }

    #[test]
    fn test_resize_file_writes_jpeg_from_rgba() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("depth.png");
        let output = dir.path().join("depth.jpg");
        RgbaImage::from_pixel(64, 32, Rgba([10, 200, 10, 128]))
            .save(&input)
            .unwrap();

        let size = resize_file(&input, &output, 16, 16, ResizeMode::Fit).unwrap();
        assert_eq!(size, (16, 16));

        let written = image::open(&output).unwrap();
        assert_eq!(written.dimensions(), (16, 16));
    }

    #[test]
    fn test_run_single_defaults_output_name() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("rgb4.png");
        solid(30, 30).save(&input).unwrap();

        run_single(&input, None, 12, 8, ResizeMode::Crop).unwrap();

        let written = image::open(dir.path().join("rgb4_resized.png")).unwrap();
        assert_eq!(written.dimensions(), (12, 8));
    }

    #[test]
    fn test_run_single_missing_input() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.png");

        let err = run_single(&missing, None, 10, 10, ResizeMode::Resize).unwrap_err();
        assert!(matches!(err, ResizeError::InputNotFound(_)));
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("imgs/depth4.png")),
            PathBuf::from("imgs/depth4_resized.png")
        );
        assert_eq!(
            default_output_path(Path::new("raw")),
            PathBuf::from("raw_resized")
        );
    }
}
