/// Packed `0xAARRGGBB` color.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color(u32);

impl Color {
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color::rgba(r, g, b, 0xFF)
    }

    #[inline]
    pub fn r(&self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    #[inline]
    pub fn g(&self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    #[inline]
    pub fn b(&self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    #[inline]
    pub fn a(&self) -> u8 {
        ((self.0 >> 24) & 0xFF) as u8
    }

    /// Replaces the alpha channel with `alpha` in `[0, 1]`.
    #[inline]
    pub fn with_alpha(self, alpha: f32) -> Color {
        let a = (alpha.max(0.0).min(1.0) * 255.0).round() as u8;
        Color::rgba(self.r(), self.g(), self.b(), a)
    }
}

impl From<u32> for Color {
    fn from(value: u32) -> Color {
        Color(value)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> u32 {
        color.0
    }
}

pub const PANEL: Color = Color::rgb(59, 66, 82);
pub const TROUGH: Color = Color::rgb(46, 52, 64);
pub const OUTLINE: Color = Color::rgb(114, 122, 140);
pub const SNOW: Color = Color::rgb(236, 239, 244);
pub const FROST: Color = Color::rgb(136, 192, 208);
pub const HIGHLIGHT: Color = Color::rgb(129, 161, 193);
