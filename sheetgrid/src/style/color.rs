/// An sRGB color as written to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert an OKLCH color (lightness 0..1, chroma, hue in degrees).
    pub fn oklch(l: f32, c: f32, h: f32) -> Self {
        use palette::{IntoColor, Oklch, Srgb};

        let oklch = Oklch::new(l, c, h);
        let srgb: Srgb = oklch.into_color();
        let (r, g, b) = srgb.into_format::<u8>().into_components();

        Rgb::new(r, g, b)
    }

    /// Blend toward `other` by `amount` (0 keeps self, 1 yields other).
    ///
    /// Used to emulate translucent accents (`primary/20`) over a background.
    pub fn mix(self, other: Rgb, amount: f32) -> Self {
        use palette::{Mix, Srgb};

        let a = Srgb::new(self.r, self.g, self.b).into_format::<f32>().into_linear();
        let b = Srgb::new(other.r, other.g, other.b).into_format::<f32>().into_linear();
        let mixed: Srgb = Srgb::from_linear(a.mix(b, amount.clamp(0.0, 1.0)));
        let (r, g, b) = mixed.into_format::<u8>().into_components();

        Rgb::new(r, g, b)
    }
}

impl From<Rgb> for crossterm::style::Color {
    fn from(c: Rgb) -> Self {
        crossterm::style::Color::Rgb {
            r: c.r,
            g: c.g,
            b: c.b,
        }
    }
}
