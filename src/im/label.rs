use super::core::{Im, LabelIm};
use super::roi::ROI;
use crate::config::Connectivity;

const NEIGHBORS_4: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

const NEIGHBORS_8: [(isize, isize); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

fn neighbor_offsets(conn: Connectivity) -> &'static [(isize, isize)] {
    match conn {
        Connectivity::Four => &NEIGHBORS_4,
        Connectivity::Eight => &NEIGHBORS_8,
    }
}

/// Flood-fill a connected component in a single-channel image.
///
/// `dst_im` doubles as the visited set: a pixel is taken when it is still 0 and
/// its source value matches the start pixel, so pixels already claimed by
/// other components are never touched and no per-call scratch buffer is needed.
fn flood_im<SrcT>(
    src_im: &Im<SrcT, 1>,
    dst_im: &mut LabelIm,
    start_x: usize,
    start_y: usize,
    fill_val: i32,
    conn: Connectivity,
) -> (usize, ROI)
where
    SrcT: Copy + PartialEq,
{
    assert_eq!(src_im.w, dst_im.w, "src/dst width mismatch");
    assert_eq!(src_im.h, dst_im.h, "src/dst height mismatch");
    assert_ne!(fill_val, 0, "0 marks unfilled pixels");

    let w = src_im.w;
    let h = src_im.h;
    assert!(start_x < w && start_y < h, "start coords out of bounds");

    let group_val = src_im.arr[start_y * src_im.s + start_x];
    let start_i = start_y * dst_im.s + start_x;
    if dst_im.arr[start_i] != 0 {
        return (0, ROI::of_pixel(start_x, start_y));
    }

    let mut stack: Vec<(usize, usize)> = Vec::with_capacity(64);
    dst_im.arr[start_i] = fill_val;
    stack.push((start_x, start_y));

    let mut filled = 1usize;
    let mut roi = ROI::of_pixel(start_x, start_y);
    while let Some((x, y)) = stack.pop() {
        for &(dx, dy) in neighbor_offsets(conn) {
            let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy)) else {
                continue;
            };
            if nx >= w || ny >= h {
                continue;
            }

            // Bounds checked above.
            let taken = unsafe { *dst_im.get_unchecked(nx, ny, 0) } != 0;
            if taken || unsafe { *src_im.get_unchecked(nx, ny, 0) } != group_val {
                continue;
            }

            unsafe {
                *dst_im.get_unchecked_mut(nx, ny, 0) = fill_val;
            }
            filled += 1;
            roi.include(nx, ny);
            stack.push((nx, ny));
        }
    }

    (filled, roi)
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LabelInfo {
    pub size: usize,
    pub start_x: usize,
    pub start_y: usize,
    pub roi: ROI,
}

/// Label the connected components of a single channel image. Pixels equal to
/// `background` stay 0; every other maximal same-valued region (under `conn`)
/// gets its own id, starting at 1, in raster order of first pixel.
pub fn label_im<SrcT>(src_im: &Im<SrcT, 1>, background: SrcT, conn: Connectivity) -> (LabelIm, Vec<LabelInfo>)
where
    SrcT: Copy + PartialEq,
{
    let w = src_im.w;
    let h = src_im.h;

    let mut dst_im = LabelIm::new(w, h);

    // group_info is indexed by group id (and [0] is reserved, do not use it!).
    let mut group_info: Vec<LabelInfo> = vec![LabelInfo::default()];

    let mut group_i: i32 = 1;
    for y in 0..h {
        for x in 0..w {
            let src_i = y * src_im.s + x;
            let dst_i = y * dst_im.s + x;

            if src_im.arr[src_i] == background {
                continue;
            }
            if dst_im.arr[dst_i] != 0 {
                // Already labeled
                continue;
            }

            let (filled, roi) = flood_im(src_im, &mut dst_im, x, y, group_i, conn);

            debug_assert_eq!(group_info.len(), group_i as usize);
            group_info.push(LabelInfo {
                size: filled,
                start_x: x,
                start_y: y,
                roi,
            });

            group_i += 1;
        }
    }

    (dst_im, group_info)
}

// Tests
// -----------------------------------------------------------------------------
