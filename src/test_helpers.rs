use crate::im::{Im, LabelIm};

/// Build a label image from rows of digits. Blank lines and surrounding
/// whitespace are ignored.
pub fn label_im_from_ascii(grid: &str) -> LabelIm {
    let rows: Vec<&str> = grid
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    let h = rows.len();
    assert!(h > 0, "grid must have at least one non-empty row");
    let w = rows[0].len();
    assert!(w > 0, "grid rows must be non-empty");
    for r in &rows {
        assert_eq!(r.len(), w, "all rows must have equal length");
    }

    let mut im = LabelIm::new(w, h);
    for (y, row) in rows.iter().enumerate() {
        for (x, ch) in row.chars().enumerate() {
            let v = ch
                .to_digit(10)
                .unwrap_or_else(|| panic!("invalid label char '{ch}', expected digit"))
                as i32;
            im.arr[y * im.s + x] = v;
        }
    }
    im
}

/// Fill the `w` x `h` rectangle at (`x`, `y`) with `v`.
pub fn fill_rect<T: Copy + Default>(im: &mut Im<T, 1>, x: usize, y: usize, w: usize, h: usize, v: T) {
    assert!(x + w <= im.w && y + h <= im.h, "rect out of bounds");
    for yy in y..y + h {
        let row = yy * im.s;
        im.arr[row + x..row + x + w].fill(v);
    }
}
