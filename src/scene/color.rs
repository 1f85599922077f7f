//! RGB colors with HSV construction and hue shifting.

/// Linear RGB color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color3 {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
}

impl Color3 {
    /// Pure white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    /// Pure red.
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    /// Pure green.
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0);
    /// Pure blue.
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);

    /// Color from explicit components.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Color from a packed `0xRRGGBB` value.
    #[must_use]
    pub fn from_hex(rgb: u32) -> Self {
        let channel = |shift: u32| ((rgb >> shift) & 0xff) as f32 / 255.0;
        Self::new(channel(16), channel(8), channel(0))
    }

    /// Color from hue (degrees, any range), saturation and value.
    #[must_use]
    pub fn from_hsv(hue: f32, saturation: f32, value: f32) -> Self {
        let hue = hue.rem_euclid(360.0);
        let sector = hue / 60.0;
        let c = value * saturation;
        let x = c * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());
        let m = value - c;

        let (r, g, b) = match sector as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        Self::new(r + m, g + m, b + m)
    }

    /// Hue in degrees, `[0, 360)`. Grays report `0`.
    #[must_use]
    pub fn hue(&self) -> f32 {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let delta = max - min;
        if delta <= f32::EPSILON {
            return 0.0;
        }

        let hue = if max == self.r {
            60.0 * ((self.g - self.b) / delta)
        } else if max == self.g {
            60.0 * ((self.b - self.r) / delta + 2.0)
        } else {
            60.0 * ((self.r - self.g) / delta + 4.0)
        };
        hue.rem_euclid(360.0)
    }

    /// Fully saturated, full-value color with the hue advanced by
    /// `degrees`.
    #[must_use]
    pub fn with_hue_shift(&self, degrees: f32) -> Self {
        Self::from_hsv(self.hue() + degrees, 1.0, 1.0)
    }

    /// Components as an array.
    #[must_use]
    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Components as an RGBA array with the given alpha.
    #[must_use]
    pub fn to_rgba(self, alpha: f32) -> [f32; 4] {
        [self.r, self.g, self.b, alpha]
    }

    /// Opaque 8-bit RGBA texel. Components are clamped to `[0, 1]`.
    #[must_use]
    pub fn to_rgba8(self) -> [u8; 4] {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [quantize(self.r), quantize(self.g), quantize(self.b), u8::MAX]
    }
}

impl From<[f32; 3]> for Color3 {
    fn from([r, g, b]: [f32; 3]) -> Self {
        Self::new(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_color_near(a: Color3, b: Color3) {
        let d = (a.r - b.r).abs() + (a.g - b.g).abs() + (a.b - b.b).abs();
        assert!(d < 1e-4, "expected {b:?}, got {a:?}");
    }

    #[test]
    fn primary_hues() {
        assert_color_near(Color3::from_hsv(0.0, 1.0, 1.0), Color3::RED);
        assert_color_near(Color3::from_hsv(120.0, 1.0, 1.0), Color3::GREEN);
        assert_color_near(Color3::from_hsv(240.0, 1.0, 1.0), Color3::BLUE);
        assert_color_near(Color3::from_hsv(360.0, 1.0, 1.0), Color3::RED);
    }

    #[test]
    fn orange_from_hsv() {
        let c = Color3::from_hsv(35.0, 1.0, 1.0);
        assert_color_near(c, Color3::new(1.0, 35.0 / 60.0, 0.0));
        assert!((c.hue() - 35.0).abs() < 1e-3);
    }

    #[test]
    fn value_scales_brightness() {
        let c = Color3::from_hsv(35.0, 1.0, 0.3);
        assert!((c.r - 0.3).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
        assert!((c.hue() - 35.0).abs() < 1e-3);
    }

    #[test]
    fn hue_shift_wraps_around() {
        let c = Color3::from_hsv(335.0, 1.0, 1.0).with_hue_shift(50.0);
        assert!((c.hue() - 25.0).abs() < 1e-3);
    }

    #[test]
    fn gray_has_zero_hue() {
        assert_eq!(Color3::new(0.5, 0.5, 0.5).hue(), 0.0);
    }

    #[test]
    fn texel_quantization_clamps() {
        assert_eq!(Color3::WHITE.to_rgba8(), [255, 255, 255, 255]);
        assert_eq!(
            Color3::new(0.5, -1.0, 2.0).to_rgba8(),
            [128, 0, 255, 255]
        );
        assert_eq!(
            Color3::from_hex(0xa5c9ea).to_rgba8(),
            [0xa5, 0xc9, 0xea, 255]
        );
    }

    #[test]
    fn hex_parsing() {
        let c = Color3::from_hex(0xa5c9ea);
        assert_color_near(
            c,
            Color3::new(165.0 / 255.0, 201.0 / 255.0, 234.0 / 255.0),
        );
    }
}
