use crate::im::Im;

/// Region id. Every integer pixel type widens into this.
pub type Label = i64;

/// Read-only access to a single-channel label raster.
pub trait LabelGrid {
    fn w(&self) -> usize;
    fn h(&self) -> usize;

    /// Label at an in-bounds pixel.
    fn label(&self, x: usize, y: usize) -> Label;

    /// Label at a possibly out-of-bounds pixel; `None` outside the grid.
    #[inline(always)]
    fn sample(&self, x: i64, y: i64) -> Option<Label> {
        if x < 0 || y < 0 || x as usize >= self.w() || y as usize >= self.h() {
            return None;
        }
        Some(self.label(x as usize, y as usize))
    }

    fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.w() && (y as usize) < self.h()
    }
}

/// Pixel types that can be read as labels.
pub trait LabelPixel: Copy {
    fn to_label(self) -> Label;
}

macro_rules! impl_label_pixel_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl LabelPixel for $t {
                #[inline(always)]
                fn to_label(self) -> Label {
                    Label::from(self)
                }
            }
        )*
    };
}

impl_label_pixel_int!(u8, u16, u32, i8, i16, i32, i64);

impl<T: LabelPixel> LabelGrid for Im<T, 1> {
    #[inline(always)]
    fn w(&self) -> usize {
        self.w
    }

    #[inline(always)]
    fn h(&self) -> usize {
        self.h
    }

    #[inline(always)]
    fn label(&self, x: usize, y: usize) -> Label {
        self.arr[y * self.s + x].to_label()
    }
}
