#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ROI {
    pub l: usize,
    pub t: usize,
    /// Exclusive right bound.
    pub r: usize,
    /// Exclusive bottom bound.
    pub b: usize,
}

impl ROI {
    /// ROI covering exactly one pixel.
    pub fn of_pixel(x: usize, y: usize) -> ROI {
        ROI {
            l: x,
            t: y,
            r: x + 1,
            b: y + 1,
        }
    }

    /// Width of the ROI.
    pub fn w(&self) -> usize {
        self.r - self.l
    }

    /// Height of the ROI.
    pub fn h(&self) -> usize {
        self.b - self.t
    }

    /// Grow to include pixel (x, y).
    pub fn include(&mut self, x: usize, y: usize) {
        self.l = self.l.min(x);
        self.t = self.t.min(y);
        self.r = self.r.max(x + 1);
        self.b = self.b.max(y + 1);
    }
}
