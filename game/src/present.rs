use crate::buffer::PixelBuffer;

/// Drawable interior of the window, origin at (0, 0).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientRect {
    pub width: i32,
    pub height: i32,
}

impl ClientRect {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// From the `left, top, right, bottom` edges the OS reports.
    pub fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            width: right - left,
            height: bottom - top,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Source and destination extents of one stretch-blit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BlitRect {
    pub src_width: i32,
    pub src_height: i32,
    pub dst_width: i32,
    pub dst_height: i32,
}

impl BlitRect {
    /// Whole buffer onto the whole client area, or `None` when either side
    /// has nothing to draw.
    pub fn full(src: &PixelBuffer, dst: ClientRect) -> Option<Self> {
        if src.is_empty() || dst.is_empty() {
            return None;
        }
        Some(Self {
            src_width: src.width(),
            src_height: src.height(),
            dst_width: dst.width,
            dst_height: dst.height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stretches_whole_buffer_to_whole_client() {
        let buffer = PixelBuffer::with_dimensions(320, 200).unwrap();
        let blit = BlitRect::full(&buffer, ClientRect::new(1280, 800)).unwrap();
        assert_eq!(
            blit,
            BlitRect { src_width: 320, src_height: 200, dst_width: 1280, dst_height: 800 }
        );
    }

    #[test]
    fn empty_client_rect_skips_blit() {
        let buffer = PixelBuffer::with_dimensions(4, 4).unwrap();
        assert_eq!(BlitRect::full(&buffer, ClientRect::new(0, 600)), None);
        assert_eq!(BlitRect::full(&buffer, ClientRect::new(800, 0)), None);
    }

    #[test]
    fn empty_buffer_skips_blit() {
        let buffer = PixelBuffer::empty();
        assert_eq!(BlitRect::full(&buffer, ClientRect::new(800, 600)), None);
    }

    #[test]
    fn client_rect_from_edges() {
        let rect = ClientRect::from_edges(10, 20, 110, 70);
        assert_eq!(rect, ClientRect::new(100, 50));
        assert!(ClientRect::from_edges(0, 0, 0, 0).is_empty());
    }
}
