use locust_common::globals;
use smart_leds::{SmartLedsWrite, RGB8};

/// Fire-and-forget status lights.
pub trait Indicator {
    fn set_all(&mut self, color: RGB8);
    fn show(&mut self);
}

pub const fn default_color() -> RGB8 {
    let (r, g, b) = globals::DEFAULT_COLOR;
    RGB8 { r, g, b }
}

/// A chain of `N` addressable pixels.
pub struct LedStrip<W, const N: usize> {
    writer: W,
    pixels: [RGB8; N],
}

impl<W, const N: usize> LedStrip<W, N>
where
    W: SmartLedsWrite,
    W::Color: From<RGB8>,
{
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pixels: [RGB8::default(); N],
        }
    }

    pub fn pixels(&self) -> &[RGB8; N] {
        &self.pixels
    }
}

impl<W, const N: usize> Indicator for LedStrip<W, N>
where
    W: SmartLedsWrite,
    W::Color: From<RGB8>,
{
    fn set_all(&mut self, color: RGB8) {
        self.pixels.fill(color);
    }

    fn show(&mut self) {
        let _ = self.writer.write(self.pixels.iter().copied());
    }
}

/// For boards without lights.
pub struct NoIndicator;

impl Indicator for NoIndicator {
    fn set_all(&mut self, _color: RGB8) {}

    fn show(&mut self) {}
}

/// Power-on colour, shown once.
pub fn boot_indicator(indicator: &mut impl Indicator) {
    indicator.set_all(default_color());
    indicator.show();
}

#[cfg(test)]
#[path = "indicator_test.rs"]
mod test;
