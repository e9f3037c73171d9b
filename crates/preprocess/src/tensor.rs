//! Decode, resize, and normalize uploaded images

use crate::PreprocessError;
use image::imageops::FilterType;
use ndarray::Array4;
use tracing::debug;

/// Batch-of-one NHWC tensor, values in [0,1]
pub type ImageTensor = Array4<f32>;

/// Convert raw image bytes into a `[1, size, size, 3]` f32 tensor.
///
/// Steps, order-sensitive:
/// 1. Decode bytes (any format the `image` crate recognizes).
/// 2. Convert to RGB8, dropping alpha and expanding grayscale/palette.
/// 3. `resize_exact` to `size`x`size` -- aspect ratio is not preserved.
/// 4. Scale the [0,255] channel range to [0,1] and add the batch dim.
pub fn preprocess(bytes: &[u8], size: u32) -> Result<ImageTensor, PreprocessError> {
    if bytes.is_empty() {
        return Err(PreprocessError::EmptyInput);
    }

    let decoded = image::load_from_memory(bytes)?;
    debug!(
        "Decoded {}x{} image ({:?}), resizing to {}x{}",
        decoded.width(),
        decoded.height(),
        decoded.color(),
        size,
        size
    );

    let rgb = decoded
        .resize_exact(size, size, FilterType::Triangle)
        .to_rgb8();

    let side = size as usize;
    let mut tensor = Array4::<f32>::zeros((1, side, side, 3));
    for (x, y, pixel) in rgb.enumerate_pixels() {
        let (x, y) = (x as usize, y as usize);
        tensor[[0, y, x, 0]] = pixel[0] as f32 / 255.0;
        tensor[[0, y, x, 1]] = pixel[1] as f32 / 255.0;
        tensor[[0, y, x, 2]] = pixel[2] as f32 / 255.0;
    }

    Ok(tensor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
    use proptest::prelude::*;
    use std::io::Cursor;

    fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_png_yields_fixed_shape() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 48, Rgb([10, 200, 30])));
        let tensor = preprocess(&encode(img, ImageFormat::Png), 128).unwrap();
        assert_eq!(tensor.shape(), &[1, 128, 128, 3]);
    }

    #[test]
    fn test_rgba_alpha_is_discarded() {
        let img =
            DynamicImage::ImageRgba8(RgbaImage::from_pixel(32, 32, Rgba([255, 0, 0, 128])));
        let tensor = preprocess(&encode(img, ImageFormat::Png), 128).unwrap();
        assert_eq!(tensor.shape(), &[1, 128, 128, 3]);
        // Red channel survives at full intensity despite the alpha value
        assert!((tensor[[0, 16, 16, 0]] - 1.0).abs() < 1e-6);
        assert!(tensor[[0, 16, 16, 1]].abs() < 1e-6);
    }

    #[test]
    fn test_grayscale_expands_to_three_channels() {
        let img = DynamicImage::ImageLuma8(image::GrayImage::from_pixel(20, 20, image::Luma([127])));
        let tensor = preprocess(&encode(img, ImageFormat::Png), 224).unwrap();
        assert_eq!(tensor.shape(), &[1, 224, 224, 3]);
        let px = tensor[[0, 10, 10, 0]];
        assert!((px - tensor[[0, 10, 10, 1]]).abs() < 1e-6);
        assert!((px - tensor[[0, 10, 10, 2]]).abs() < 1e-6);
    }

    #[test]
    fn test_non_square_source_is_distorted_not_cropped() {
        // 100x25 source still maps onto the full square target
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(100, 25, Rgb([0, 0, 255])));
        let tensor = preprocess(&encode(img, ImageFormat::Jpeg), 128).unwrap();
        assert_eq!(tensor.shape(), &[1, 128, 128, 3]);
        assert!(tensor[[0, 127, 127, 2]] > 0.5);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        match preprocess(&[], 128) {
            Err(PreprocessError::EmptyInput) => {}
            other => panic!("expected EmptyInput, got {:?}", other.map(|t| t.shape().to_vec())),
        }
    }

    #[test]
    fn test_garbage_bytes_fail_with_decode_error() {
        let garbage = b"definitely not an image";
        match preprocess(garbage, 128) {
            Err(PreprocessError::Decode(_)) => {}
            other => panic!("expected Decode, got {:?}", other.map(|t| t.shape().to_vec())),
        }
    }

    proptest! {
        #[test]
        fn prop_all_elements_in_unit_range(
            w in 1u32..96,
            h in 1u32..96,
            r in 0u8..=255,
            g in 0u8..=255,
            b in 0u8..=255,
        ) {
            let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb([r, g, b])));
            let tensor = preprocess(&encode(img, ImageFormat::Png), 128).unwrap();
            prop_assert_eq!(tensor.shape(), &[1, 128, 128, 3]);
            prop_assert!(tensor.iter().all(|&v| (0.0..=1.0).contains(&v)));
        }
    }
}
