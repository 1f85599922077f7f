//! CPU-side RGBA8 images for textured drawables.

use super::color::Color3;

/// Bytes per RGBA8 texel.
const TEXEL_SIZE: usize = 4;

/// A linear RGBA8 image, rows top to bottom.
///
/// Width and height are at least one and `pixels` always holds exactly
/// `width * height` texels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl TextureImage {
    /// Wrap raw RGBA8 pixels. Returns `None` for an empty image or when
    /// the buffer length does not match the dimensions.
    #[must_use]
    pub fn from_rgba8(
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    ) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(TEXEL_SIZE)?;
        (width > 0 && height > 0 && pixels.len() == expected).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    /// 1×1 image of a single color.
    #[must_use]
    pub fn solid(color: Color3) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: color.to_rgba8().to_vec(),
        }
    }

    /// Square checkerboard of `cells × cells` squares, `size` texels on a
    /// side. The top-left cell uses `even`.
    #[must_use]
    pub fn checkerboard(
        size: u32,
        cells: u32,
        even: Color3,
        odd: Color3,
    ) -> Self {
        let size = size.max(1);
        let cells = cells.clamp(1, size);
        let (even, odd) = (even.to_rgba8(), odd.to_rgba8());

        let mut pixels =
            Vec::with_capacity((size * size) as usize * TEXEL_SIZE);
        for y in 0..size {
            for x in 0..size {
                let cell = x * cells / size + y * cells / size;
                let texel = if cell % 2 == 0 { even } else { odd };
                pixels.extend_from_slice(&texel);
            }
        }

        Self {
            width: size,
            height: size,
            pixels,
        }
    }

    /// Width in texels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in texels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Packed RGBA8 rows, top to bottom.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The texel at `(x, y)`, or `None` outside the image.
    #[must_use]
    pub fn texel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset =
            (y as usize * self.width as usize + x as usize) * TEXEL_SIZE;
        let texel = self.pixels.get(offset..offset + TEXEL_SIZE)?;
        Some([texel[0], texel[1], texel[2], texel[3]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkerboard_alternates_cells() {
        let image =
            TextureImage::checkerboard(8, 4, Color3::WHITE, Color3::RED);
        assert_eq!((image.width(), image.height()), (8, 8));
        assert_eq!(image.pixels().len(), 8 * 8 * 4);

        let white = Some([255, 255, 255, 255]);
        let red = Some([255, 0, 0, 255]);
        // Cells are two texels wide.
        assert_eq!(image.texel(0, 0), white);
        assert_eq!(image.texel(1, 1), white);
        assert_eq!(image.texel(2, 0), red);
        assert_eq!(image.texel(0, 2), red);
        assert_eq!(image.texel(2, 2), white);
        assert_eq!(image.texel(7, 7), white);
        assert_eq!(image.texel(8, 0), None);
    }

    #[test]
    fn degenerate_checkerboard_is_one_texel() {
        let image =
            TextureImage::checkerboard(0, 0, Color3::BLUE, Color3::RED);
        assert_eq!((image.width(), image.height()), (1, 1));
        assert_eq!(image.texel(0, 0), Some([0, 0, 255, 255]));
    }

    #[test]
    fn raw_pixels_must_match_dimensions() {
        assert!(TextureImage::from_rgba8(2, 1, vec![0; 8]).is_some());
        assert!(TextureImage::from_rgba8(2, 1, vec![0; 7]).is_none());
        assert!(TextureImage::from_rgba8(0, 1, Vec::new()).is_none());
    }

    #[test]
    fn solid_image() {
        let image = TextureImage::solid(Color3::GREEN);
        assert_eq!(image.pixels(), &[0, 255, 0, 255]);
    }
}
