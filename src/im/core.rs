#![allow(dead_code)]

#[derive(Debug, Clone)]
pub struct Im<T, const N_CH: usize> {
    pub w: usize,
    pub h: usize,
    pub s: usize, // stride in elements (w * N_CH)
    pub arr: Vec<T>,
}

// Constructor
// -----------------------------------------------------------------------------
impl<T: Copy + Default, const N_CH: usize> Im<T, N_CH> {
    pub fn new(w: usize, h: usize) -> Self {
        let s = w * N_CH;
        let arr = vec![T::default(); s * h];
        Self { w, h, s, arr }
    }

    /// Wrap an existing row-major buffer. Returns `None` if the length is wrong.
    pub fn from_vec(w: usize, h: usize, arr: Vec<T>) -> Option<Self> {
        let s = w * N_CH;
        (arr.len() == s * h).then_some(Self { w, h, s, arr })
    }
}

impl<T, const N_CH: usize> Im<T, N_CH> {
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, x: usize, y: usize, ch: usize) -> &T {
        unsafe { self.arr.get_unchecked(y * self.s + x * N_CH + ch) }
    }

    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, x: usize, y: usize, ch: usize) -> &mut T {
        unsafe { self.arr.get_unchecked_mut(y * self.s + x * N_CH + ch) }
    }
}

// Convenience APIs that don't depend on external crates.
// -----------------------------------------------------------------------------

impl Im<i32, 1> {
    /// 255 where the label differs from `background`, 0 elsewhere.
    pub fn to_mask_im(&self, background: i32) -> Im<u8, 1> {
        let mut mask_im = Im::<u8, 1>::new(self.w, self.h);
        for y in 0..self.h {
            for x in 0..self.w {
                let v = unsafe { *self.get_unchecked(x, y, 0) };
                let m: u8 = if v != background { 255 } else { 0 };
                unsafe {
                    *mask_im.get_unchecked_mut(x, y, 0) = m;
                }
            }
        }
        mask_im
    }

    /// 255 where the label equals `label`, 0 elsewhere.
    pub fn label_mask_im(&self, label: i32) -> Im<u8, 1> {
        let mut mask_im = Im::<u8, 1>::new(self.w, self.h);
        for (dst, &v) in mask_im.arr.iter_mut().zip(self.arr.iter()) {
            *dst = if v == label { 255 } else { 0 };
        }
        mask_im
    }
}

pub type MaskIm = Im<u8, 1>;
pub type LabelIm = Im<i32, 1>;
