use core::convert::Infallible;

use embedded_graphics_core::{
    Pixel,
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::BinaryColor,
};

use crate::{BandBuffer, protocol};

impl<const N: usize> DrawTarget for BandBuffer<N> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let _ = self.set_pixel_signed(point.x, point.y, color.is_on());
        }

        Ok(())
    }
}

impl<const N: usize> OriginDimensions for BandBuffer<N> {
    fn size(&self) -> Size {
        Size::new(protocol::WIDTH as u32, Self::HEIGHT as u32)
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics_core::geometry::Point;

    use super::*;
    use crate::{FrameBuffer, StatusLine};

    #[test]
    fn draw_iter_clips_and_maps_to_bands() {
        let mut fb = FrameBuffer::new();
        let pixels = [
            Pixel(Point::new(2, 9), BinaryColor::On),
            Pixel(Point::new(-1, 0), BinaryColor::On),
            Pixel(Point::new(0, 64), BinaryColor::On),
        ];

        fb.draw_iter(pixels).unwrap();

        assert_eq!(fb.byte(1, 2), Some(0b0000_0010));
        assert_eq!(fb.count_set(), 1);
    }

    #[test]
    fn status_line_reports_one_band_height() {
        assert_eq!(StatusLine::new().size(), Size::new(128, 8));
        assert_eq!(FrameBuffer::new().size(), Size::new(128, 64));
    }
}
