/// Packed 1-bit-per-cell bitmap.
#[derive(Debug, Clone)]
pub struct Bitmap {
    pub w: usize,
    pub h: usize,
    pub s: usize, // stride: u64 words per row
    pub arr: Vec<u64>,
}

impl Bitmap {
    pub fn new(w: usize, h: usize) -> Self {
        let s = w.div_ceil(64);
        let arr = vec![0u64; s * h];
        Self { w, h, s, arr }
    }

    #[inline(always)]
    fn word_and_mask(&self, x: usize, y: usize) -> (usize, u64) {
        debug_assert!(x < self.w && y < self.h, "bitmap index out of bounds");
        (y * self.s + x / 64, 1u64 << (x % 64))
    }

    #[inline(always)]
    pub fn get(&self, x: usize, y: usize) -> bool {
        let (i, m) = self.word_and_mask(x, y);
        self.arr[i] & m != 0
    }

    /// Set the bit and return its previous value.
    #[inline(always)]
    pub fn set(&mut self, x: usize, y: usize) -> bool {
        let (i, m) = self.word_and_mask(x, y);
        let was = self.arr[i] & m != 0;
        self.arr[i] |= m;
        was
    }
}
