use crate::im::Im;
use crate::polygon::Polygon;
use clipper2::{One, Path, Paths, Point};

pub type IntPoint = Point<One>;
pub type IntPath = Path<One>;
pub type IntPaths = Paths<One>;

/// All boundary rings of one label as clipper2 integer paths. Holes are just
/// more rings; fills use the even-odd rule.
#[derive(Clone, Debug)]
pub struct MPoly {
    paths: IntPaths,
}

// - callback: Takes the x, y coords and x-span (x_end is not inclusive),
//   note that `x_end` will always be greater than `x`.
fn fill_poly_v2i_n<F: FnMut(i32, i32, i32)>(
    xmin: i32,
    ymin: i32,
    xmax: i32,
    ymax: i32,
    rings: &[Vec<[i32; 2]>],
    callback: &mut F,
) {
    // Even-odd scanline fill across multiple rings.
    let mut x_intersections: Vec<i32> = Vec::new();

    for pixel_y in ymin..ymax {
        x_intersections.clear();

        for ring in rings {
            if ring.len() < 2 {
                continue;
            }

            let last = ring[ring.len() - 1];
            let mut x0 = last[0];
            let mut y0 = last[1];

            for &pt in ring {
                let x1 = pt[0];
                let y1 = pt[1];

                if y0 != y1 {
                    let y_min = std::cmp::min(y0, y1);
                    let y_max = std::cmp::max(y0, y1);

                    // Half-open range to avoid double-counting shared vertices.
                    if (pixel_y >= y_min) && (pixel_y < y_max) {
                        let dy = (y1 - y0) as f64;
                        let t = ((pixel_y - y0) as f64) / dy;
                        let x = (x0 as f64) + (t * ((x1 - x0) as f64));
                        x_intersections.push(x.round() as i32);
                    }
                }

                x0 = x1;
                y0 = y1;
            }
        }

        if x_intersections.len() < 2 {
            continue;
        }

        x_intersections.sort_unstable();

        for pair in x_intersections.chunks_exact(2) {
            let mut x_src = pair[0];
            let mut x_dst = pair[1];

            if x_src >= xmax {
                break;
            }

            if x_dst > xmin {
                if x_src < xmin {
                    x_src = xmin;
                }
                if x_dst > xmax {
                    x_dst = xmax;
                }
                if x_src < x_dst {
                    callback(x_src - xmin, x_dst - xmin, pixel_y - ymin);
                }
            }
        }
    }
}

fn coords_from_path(path: &IntPath) -> Vec<[i32; 2]> {
    path.iter()
        .map(|pt| [pt.x_scaled() as i32, pt.y_scaled() as i32])
        .collect()
}

impl MPoly {
    fn new(paths: Vec<IntPath>) -> Self {
        Self {
            paths: IntPaths::new(paths),
        }
    }

    /// Convert traced polygons, multiplying coordinates by `scale` first.
    /// Corner polygons are exact at scale 1, edge-centre and pixel polygons at 2.
    pub fn from_polygons(polygons: &[Polygon], scale: i64) -> Self {
        let s = scale as f64;
        let paths = polygons
            .iter()
            .map(|poly| {
                IntPath::new(
                    poly.iter()
                        .map(|p| IntPoint::from_scaled((p.x * s).round() as i64, (p.y * s).round() as i64))
                        .collect(),
                )
            })
            .collect();
        Self::new(paths)
    }

    /// Even-odd fill into `im`, clipped to its bounds. The callback receives
    /// each covered span `[x_start, x_end)` of row `y`.
    pub fn raster<
        T: Copy + Default,
        const N_CH: usize,
        F: FnMut(&mut Im<T, N_CH>, i32, i32, i32),
    >(
        &self,
        im: &mut Im<T, N_CH>,
        mut callback: F,
    ) {
        let rings: Vec<Vec<[i32; 2]>> = self.paths.iter().map(coords_from_path).collect();
        fill_poly_v2i_n(
            0,
            0,
            im.w as i32,
            im.h as i32,
            &rings,
            &mut |x_start: i32, x_end: i32, y: i32| callback(im, x_start, x_end, y),
        );
    }
}
