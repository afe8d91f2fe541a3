use crate::Error;
use image::{DynamicImage, GenericImageView, Luma};

/// A monochrome logo, packed for firmware embedding.
///
/// The source picture is scaled to fit the requested bounds (aspect ratio
/// preserved), pasted horizontally centered on a white canvas of exactly
/// `max_width` pixels, binarized at mid-gray, and packed 8 horizontal pixels
/// per byte, most significant bit first, black mapped to 1.
///
/// The canvas width must be a multiple of 8 so rows pack into whole bytes;
/// that is the only failure condition.
#[derive(Clone, Debug, PartialEq)]
pub struct LogoBitmap {
    bytes: Vec<u8>,
    width: u32,
    height: u32
}

impl LogoBitmap {
    /// Scales, centers, binarizes and packs the given image.
    pub fn pack(source: &DynamicImage, max_width: u32, max_height: u32) -> Result<LogoBitmap, Error> {
        if max_width % 8 != 0 {
            return Err(Error::MisalignedWidth(max_width));
        }
        let gray = source.to_luma();
        let (orig_width, orig_height) = source.dimensions();

        // Uniform scale that fits both bounds, never upsetting the aspect ratio
        let scale = (max_width as f64 / orig_width as f64).min(max_height as f64 / orig_height as f64);
        let new_width = (((orig_width as f64) * scale).floor() as u32).max(1);
        let new_height = (((orig_height as f64) * scale).floor() as u32).max(1);

        let resized = image::imageops::resize(&gray, new_width, new_height, image::imageops::FilterType::Lanczos3);

        // White canvas of the full target width, resized height
        let mut canvas = image::GrayImage::from_pixel(max_width, new_height, Luma([255u8]));
        let paste_x = (max_width - new_width) / 2;
        image::imageops::overlay(&mut canvas, &resized, paste_x, 0);

        let mut bytes = Vec::with_capacity(((max_width / 8) * new_height) as usize);
        for y in 0..new_height {
            for block_x in (0..max_width).step_by(8) {
                let mut byte = 0u8;
                for bit in 0..8 {
                    let luma = canvas.get_pixel(block_x + bit, y).0[0];
                    let black = if luma < 128 { 1 } else { 0 };
                    byte = (byte << 1) | black;
                }
                bytes.push(byte);
            }
        }

        Ok(LogoBitmap {
            bytes,
            width: max_width,
            height: new_height
        })
    }

    /// Final width in pixels, always the requested canvas width
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Final height in pixels, after aspect-preserving scaling
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes per packed row
    pub fn row_bytes(&self) -> u32 {
        self.width / 8
    }

    /// Flat packed pixel data, row after row
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Renders the bitmap as a C array literal for firmware embedding,
    /// with a trailing comment recording the final dimensions.
    pub fn to_progmem(&self, name: &str) -> String {
        let mut out = format!("const uint8_t {}[] PROGMEM = {{\n", name);
        for chunk in self.bytes.chunks(12) {
            let line: Vec<String> = chunk.iter().map(|b| format!("0x{:02X}", b)).collect();
            out += &format!("  {},\n", line.join(", "));
        }
        out += "};\n";
        out += &format!("// width={} height={}\n", self.width, self.height);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GrayImage;

    fn solid(width: u32, height: u32, luma: u8) -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([luma])))
    }

    #[test]
    fn rejects_misaligned_width() {
        match LogoBitmap::pack(&solid(8, 8, 0), 30, 16) {
            Err(Error::MisalignedWidth(30)) => (),
            other => panic!("expected misaligned width error, got {:?}", other)
        }
    }

    #[test]
    fn row_width_matches_canvas() {
        let logo = LogoBitmap::pack(&solid(64, 32, 0), 256, 96).unwrap();
        assert_eq!(logo.width(), 256);
        assert_eq!(logo.row_bytes(), 32);
        assert_eq!(logo.bytes().len() as u32, logo.row_bytes() * logo.height());
    }

    #[test]
    fn black_image_packs_to_full_bytes() {
        // Already at target size, no resampling artifacts possible
        let logo = LogoBitmap::pack(&solid(8, 2, 0), 8, 2).unwrap();
        assert_eq!(logo.height(), 2);
        assert_eq!(logo.bytes(), &[0xff, 0xff]);
    }

    #[test]
    fn white_image_packs_to_zeroes() {
        let logo = LogoBitmap::pack(&solid(8, 2, 255), 8, 2).unwrap();
        assert_eq!(logo.bytes(), &[0x00, 0x00]);
    }

    #[test]
    fn narrow_image_is_centered_on_the_canvas() {
        // 4px black strip on a 16px canvas lands at x = 6..10
        let logo = LogoBitmap::pack(&solid(4, 1, 0), 16, 1).unwrap();
        assert_eq!(logo.bytes(), &[0b0000_0011, 0b1100_0000]);
    }

    #[test]
    fn packing_is_deterministic() {
        let source = solid(40, 30, 0);
        let first = LogoBitmap::pack(&source, 64, 48).unwrap();
        let second = LogoBitmap::pack(&source, 64, 48).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn progmem_rendering_carries_dimensions() {
        let logo = LogoBitmap::pack(&solid(8, 1, 0), 8, 1).unwrap();
        let rendered = logo.to_progmem("logo");
        assert!(rendered.starts_with("const uint8_t logo[] PROGMEM = {\n"));
        assert!(rendered.contains("0xFF"));
        assert!(rendered.ends_with("// width=8 height=1\n"));
    }
}
