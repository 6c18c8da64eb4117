use std::{
    error::Error,
    fmt,
    mem::size_of,
    ops::{Index, IndexMut},
};

pub const BYTES_PER_PIXEL: usize = size_of::<u32>();

/// Offscreen pixel memory backing the window's client area.
///
/// Pixels are packed `0xAARRGGBB` words, row-major, top row first, which is
/// the layout a top-down 32-bit DIB expects.
#[derive(Debug, Default)]
pub struct PixelBuffer {
    data: Vec<u32>,
    width: i32,
    height: i32,
}

impl PixelBuffer {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_dimensions(width: i32, height: i32) -> Result<Self, AllocationFailure> {
        let mut buffer = Self::empty();
        buffer.reallocate(width, height)?;
        Ok(buffer)
    }

    /// Throws away the current block and allocates a fresh zeroed one for
    /// `width` x `height` pixels. Non-positive dimensions leave an empty buffer.
    ///
    /// On failure the buffer is left empty, never half-sized.
    pub fn reallocate(&mut self, width: i32, height: i32) -> Result<(), AllocationFailure> {
        self.data = Vec::new();
        self.width = 0;
        self.height = 0;

        let width = width.max(0);
        let height = height.max(0);
        let failure = AllocationFailure { width, height };

        let pixel_count = (width as usize)
            .checked_mul(height as usize)
            .filter(|count| count.checked_mul(BYTES_PER_PIXEL).is_some())
            .ok_or(failure)?;

        let mut data = Vec::new();
        data.try_reserve_exact(pixel_count).map_err(|_| failure)?;
        data.resize(pixel_count, 0);

        self.data = data;
        self.width = width;
        self.height = height;
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn dim(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn byte_len(&self) -> usize {
        self.data.len() * BYTES_PER_PIXEL
    }

    #[inline]
    pub fn pixels(&self) -> &[u32] {
        &self.data
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.data
    }

    /// Rows of `width` pixels, top row first.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [u32]> {
        // chunks_exact_mut panics on 0
        let width = (self.width as usize).max(1);
        self.data.chunks_exact_mut(width)
    }

    fn offset_of(&self, x: i32, y: i32) -> usize {
        assert!(
            0 <= x && x < self.width && 0 <= y && y < self.height,
            "PixelBuffer index out of bounds. (width, height) = {:?}, (x, y) = {:?}",
            self.dim(), (x, y),
        );
        y as usize * self.width as usize + x as usize
    }
}

impl Index<(i32, i32)> for PixelBuffer {
    type Output = u32;
    fn index(&self, (x, y): (i32, i32)) -> &Self::Output {
        &self.data[self.offset_of(x, y)]
    }
}

impl IndexMut<(i32, i32)> for PixelBuffer {
    fn index_mut(&mut self, (x, y): (i32, i32)) -> &mut u32 {
        let offset = self.offset_of(x, y);
        &mut self.data[offset]
    }
}

/// The allocator refused a pixel block, or its size does not fit in memory.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AllocationFailure {
    pub width: i32,
    pub height: i32,
}

impl fmt::Display for AllocationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to allocate a {}x{} pixel buffer ({} bytes per pixel)",
            self.width, self.height, BYTES_PER_PIXEL,
        )
    }
}

impl Error for AllocationFailure {}
