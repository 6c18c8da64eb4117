use crate::buffer::PixelBuffer;

pub const B_MASK: u32 = 0x0000_00FF;
pub const G_MASK: u32 = 0x0000_FF00;

/// Phase of the gradient. Only `x` is advanced by the frame loop.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ScrollOffset {
    pub x: i32,
    pub y: i32,
}

impl ScrollOffset {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.x = self.x.wrapping_add(1);
    }
}

/// Colour of a single gradient pixel.
///
/// Memory:   BB GG RR xx
/// Register: xx RR GG BB
#[inline]
pub fn gradient_pixel(x: i32, y: i32, offset: ScrollOffset) -> u32 {
    let blue = x.wrapping_add(offset.x) as u32 & B_MASK;
    let green = y.wrapping_add(offset.y) as u32 & B_MASK;
    (green << 8) | blue
}

pub fn render_weird_gradient(dst: &mut PixelBuffer, offset: ScrollOffset) {
    for (y, row) in (0..).zip(dst.rows_mut()) {
        for (x, pxl) in (0..).zip(row.iter_mut()) {
            *pxl = gradient_pixel(x, y, offset);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(width: i32, height: i32, offset: ScrollOffset) -> PixelBuffer {
        let mut buffer = PixelBuffer::with_dimensions(width, height).unwrap();
        render_weird_gradient(&mut buffer, offset);
        buffer
    }

    #[test]
    fn two_pixel_row() {
        let buffer = rendered(2, 1, ScrollOffset::new(0, 0));
        assert_eq!(buffer.pixels(), &[0x0000, 0x0001]);
    }

    #[test]
    fn single_pixel_with_x_offset() {
        let buffer = rendered(1, 1, ScrollOffset::new(255, 0));
        assert_eq!(buffer.pixels(), &[0x00FF]);
    }

    #[test]
    fn blue_wraps_past_255() {
        let buffer = rendered(2, 1, ScrollOffset::new(255, 0));
        assert_eq!(buffer.pixels(), &[0x00FF, 0x0000]);
    }

    #[test]
    fn every_pixel_follows_formula() {
        let offset = ScrollOffset::new(1000, 77);
        let buffer = rendered(300, 270, offset);
        for y in 0..buffer.height() {
            for x in 0..buffer.width() {
                let expected =
                    ((((y + offset.y) % 256) << 8) | ((x + offset.x) % 256)) as u32;
                let pixel = buffer[(x, y)];
                assert_eq!(pixel, expected, "pixel at {:?}", (x, y));
                assert_eq!(pixel & !(G_MASK | B_MASK), 0);
            }
        }
    }

    #[test]
    fn negative_offsets_stay_in_byte_range() {
        let offset = ScrollOffset::new(-1, -2);
        assert_eq!(gradient_pixel(0, 0, offset), 0xFEFF);
        assert_eq!(gradient_pixel(1, 2, offset), 0x0000);
    }

    #[test]
    fn fill_is_reproducible() {
        let offset = ScrollOffset::new(12, 34);
        let mut buffer = rendered(17, 9, offset);
        let first = buffer.pixels().to_vec();

        render_weird_gradient(&mut buffer, offset);
        assert_eq!(buffer.pixels(), &first[..]);
    }

    #[test]
    fn fill_on_empty_buffer_is_noop() {
        let mut buffer = PixelBuffer::empty();
        render_weird_gradient(&mut buffer, ScrollOffset::default());
        assert!(buffer.is_empty());
    }

    #[test]
    fn advance_only_moves_x_and_wraps() {
        let mut offset = ScrollOffset::new(i32::MAX, 5);
        offset.advance();
        assert_eq!(offset, ScrollOffset::new(i32::MIN, 5));
        // i32::MIN & 0xFF == 0, same as 255 + 1
        assert_eq!(gradient_pixel(0, 0, offset) & B_MASK, 0);
    }
}
