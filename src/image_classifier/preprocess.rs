use crate::image_classifier::interface::ClassifyError;
use crate::image_classifier::model_config::ModelConfig;
use image::DynamicImage;
use tract_onnx::prelude::*;

pub fn decode_image(image_bytes: &[u8]) -> Result<DynamicImage, ClassifyError> {
    image::load_from_memory(image_bytes).map_err(|e| ClassifyError::InvalidInput(e.to_string()))
}

/// Builds the model input from an image: resize to the configured resolution,
/// convert to RGB, scale channels to [0, 1], optionally apply per-channel
/// normalization, lay out as NCHW.
pub fn image_to_input_tensor(image: &DynamicImage, config: &ModelConfig) -> Tensor {
    let (width, height) = config.input_size;
    let resized = image.resize_exact(width, height, image::imageops::FilterType::Triangle);
    let rgb = resized.to_rgb8();

    let tensor = tract_ndarray::Array4::from_shape_fn(
        (1, 3, height as usize, width as usize),
        |(_, c, y, x)| {
            let value = rgb.get_pixel(x as u32, y as u32)[c] as f32 / 255.0;
            match &config.normalization {
                Some(normalization) => (value - normalization.mean[c]) / normalization.std[c],
                None => value,
            }
        },
    );

    tensor.into_tensor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_classifier::model_config::Normalization;
    use image::{DynamicImage, ImageBuffer, Rgb};
    use std::io::Cursor;

    fn solid_image(width: u32, height: u32, pixel: [u8; 3]) -> DynamicImage {
        let mut img = ImageBuffer::new(width, height);
        for p in img.pixels_mut() {
            *p = Rgb(pixel);
        }
        DynamicImage::ImageRgb8(img)
    }

    fn config(normalization: Option<Normalization>) -> ModelConfig {
        ModelConfig {
            model_path: "unused.onnx".to_string(),
            input_size: (224, 224),
            normalization,
        }
    }

    #[test]
    fn test_tensor_shape_and_channel_order() {
        let image = solid_image(100, 100, [255, 0, 0]);

        let tensor = image_to_input_tensor(&image, &config(None));
        assert_eq!(tensor.shape(), &[1, 3, 224, 224]);

        let slice = tensor.as_slice::<f32>().unwrap();

        // Red channel is 1.0 (255/255), green and blue are 0.0
        assert_eq!(slice[0], 1.0);
        assert_eq!(slice[224 * 224], 0.0);
        assert_eq!(slice[2 * 224 * 224], 0.0);
    }

    #[test]
    fn test_rectangle_input_is_stretched() {
        let image = solid_image(200, 100, [255, 0, 0]);

        let tensor = image_to_input_tensor(&image, &config(None));
        assert_eq!(tensor.shape(), &[1, 3, 224, 224]);

        // resize_exact stretches rather than pads, so every pixel stays red
        let slice = tensor.as_slice::<f32>().unwrap();
        let center = 112 * 224 + 112;
        assert_eq!(slice[center], 1.0);
        assert_eq!(slice[224 * 224 + center], 0.0);
    }

    #[test]
    fn test_scaling_without_normalization() {
        let image = solid_image(100, 100, [128, 128, 128]);

        let tensor = image_to_input_tensor(&image, &config(None));
        let slice = tensor.as_slice::<f32>().unwrap();

        let expected = 128.0 / 255.0;
        assert!((slice[0] - expected).abs() < 0.0001);
        assert!((slice[224 * 224] - expected).abs() < 0.0001);
        assert!((slice[2 * 224 * 224] - expected).abs() < 0.0001);
    }

    #[test]
    fn test_imagenet_normalization() {
        let image = solid_image(100, 100, [128, 128, 128]);

        let tensor = image_to_input_tensor(&image, &config(Some(Normalization::imagenet())));
        let slice = tensor.as_slice::<f32>().unwrap();

        let scaled = 128.0 / 255.0;
        let expected = [
            (scaled - 0.485) / 0.229,
            (scaled - 0.456) / 0.224,
            (scaled - 0.406) / 0.225,
        ];
        assert!((slice[0] - expected[0]).abs() < 0.0001);
        assert!((slice[224 * 224] - expected[1]).abs() < 0.0001);
        assert!((slice[2 * 224 * 224] - expected[2]).abs() < 0.0001);
    }

    #[test]
    fn test_decode_image_accepts_png() {
        let image = solid_image(10, 10, [0, 255, 0]);
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, image::ImageFormat::Png).unwrap();

        let decoded = decode_image(bytes.get_ref()).unwrap();
        assert_eq!(decoded.width(), 10);
        assert_eq!(decoded.height(), 10);
    }

    #[test]
    fn test_decode_image_rejects_garbage() {
        let result = decode_image(b"definitely not an image");
        assert!(matches!(result, Err(ClassifyError::InvalidInput(_))));
    }
}
