use super::*;

impl LatticeGrid {
    // === Dimensions ===
    #[inline]
    pub fn width(&self) -> u32 { self.width }

    #[inline]
    pub fn height(&self) -> u32 { self.height }

    #[inline]
    pub fn size(&self) -> usize { self.size }

    // === Index conversion ===
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    #[inline]
    pub fn coords(&self, idx: usize) -> (u32, u32) {
        let x = (idx % self.width as usize) as u32;
        let y = (idx / self.width as usize) as u32;
        (x, y)
    }

    /// Start of a cell's nine distributions in `f_old` / `f_new`
    #[inline(always)]
    pub fn dist_base(idx: usize) -> usize {
        idx * Q
    }

    /// Cells handled by collision/recovery (excludes the outermost ring)
    #[inline]
    pub fn is_interior(&self, x: u32, y: u32) -> bool {
        x > 0 && y > 0 && x + 1 < self.width && y + 1 < self.height
    }
}
