//! 8-connected component labeling over a two-level mask.
//!
//! Both mask levels are labeled: a region is a maximal blob of equal-valued
//! pixels, so the opaque frame and the transparent cutouts each get their own
//! labels. Uses the classic two-pass union-find scheme:
//!
//! 1. Raster scan assigning provisional labels, merging with the already
//!    visited neighbors (W, NW, N, NE) that share the pixel's value.
//! 2. Flatten roots and accumulate per-region bounding boxes and sums.
//!
//! Ordering contract: final labels are numbered by the raster position
//! (top-to-bottom, then left-to-right) of each region's first pixel. A region
//! with a smaller provisional label always has an earlier first pixel, so
//! numbering roots in provisional-label order yields exactly that order.
use super::region::{ConnectedRegion, RegionLabel};
use crate::image::BinaryMask;

/// Label all regions of `mask`, returned in label order.
pub fn label_regions(mask: &BinaryMask) -> Vec<ConnectedRegion> {
    let (w, h) = (mask.w, mask.h);
    if w == 0 || h == 0 {
        return Vec::new();
    }

    let mut labels = vec![0u32; w * h];
    let mut parent: Vec<u32> = Vec::new();
    assign_provisional_labels(mask, &mut labels, &mut parent);

    // provisional label -> final label (1-based, raster order of first pixel)
    let mut root_to_final = vec![0u32; parent.len() + 1];
    let mut final_of = vec![0u32; parent.len() + 1];
    let mut count = 0u32;
    for label in 1..=parent.len() as u32 {
        let root = find(&mut parent, label);
        if root_to_final[root as usize] == 0 {
            count += 1;
            root_to_final[root as usize] = count;
        }
        final_of[label as usize] = root_to_final[root as usize];
    }

    let mut stats = vec![RegionStats::default(); count as usize];
    for y in 0..h {
        for x in 0..w {
            let idx = y * w + x;
            let region = final_of[labels[idx] as usize] as usize - 1;
            stats[region].push(x, y, mask.data[idx]);
        }
    }

    stats
        .into_iter()
        .enumerate()
        .map(|(i, s)| s.into_region(RegionLabel(i as u32 + 1)))
        .collect()
}

fn assign_provisional_labels(mask: &BinaryMask, labels: &mut [u32], parent: &mut Vec<u32>) {
    let (w, h) = (mask.w, mask.h);
    for y in 0..h {
        for x in 0..w {
            let idx = y * w + x;
            let value = mask.data[idx];

            let mut current = 0u32;
            for n in previous_neighbors(x, y, w) {
                if mask.data[n] != value {
                    continue;
                }
                let l = labels[n];
                if current == 0 {
                    current = l;
                } else if current != l {
                    union(parent, current, l);
                    current = current.min(l);
                }
            }

            if current == 0 {
                parent.push(parent.len() as u32 + 1);
                current = parent.len() as u32;
            }
            labels[idx] = current;
        }
    }
}

/// Linear indices of the W, NW, N and NE neighbors that precede (x, y) in
/// raster order.
fn previous_neighbors(x: usize, y: usize, w: usize) -> impl Iterator<Item = usize> {
    let idx = y * w + x;
    let west = (x > 0).then(|| idx - 1);
    let north_west = (x > 0 && y > 0).then(|| idx - w - 1);
    let north = (y > 0).then(|| idx - w);
    let north_east = (x + 1 < w && y > 0).then(|| idx - w + 1);
    [west, north_west, north, north_east].into_iter().flatten()
}

/// Find root of a label with path compression.
fn find(parent: &mut [u32], label: u32) -> u32 {
    let mut root = label;
    while parent[(root - 1) as usize] != root {
        root = parent[(root - 1) as usize];
    }
    let mut cur = label;
    while cur != root {
        let next = parent[(cur - 1) as usize];
        parent[(cur - 1) as usize] = root;
        cur = next;
    }
    root
}

/// Union two labels; the smaller root survives.
fn union(parent: &mut [u32], a: u32, b: u32) {
    let root_a = find(parent, a);
    let root_b = find(parent, b);
    if root_a != root_b {
        let (keep, drop) = if root_a < root_b {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };
        parent[(drop - 1) as usize] = keep;
    }
}

#[derive(Clone)]
struct RegionStats {
    min_x: usize,
    min_y: usize,
    max_x: usize,
    max_y: usize,
    area: usize,
    sum: u64,
}

impl Default for RegionStats {
    fn default() -> Self {
        Self {
            min_x: usize::MAX,
            min_y: usize::MAX,
            max_x: 0,
            max_y: 0,
            area: 0,
            sum: 0,
        }
    }
}

impl RegionStats {
    fn push(&mut self, x: usize, y: usize, value: u8) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
        self.area += 1;
        self.sum += u64::from(value);
    }

    fn into_region(self, label: RegionLabel) -> ConnectedRegion {
        ConnectedRegion {
            label,
            top: self.min_y,
            left: self.min_x,
            width: self.max_x - self.min_x + 1,
            height: self.max_y - self.min_y + 1,
            area: self.area,
            mean_intensity: self.sum as f64 / self.area as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_from(rows: &[&str]) -> BinaryMask {
        let h = rows.len();
        let w = rows[0].len();
        let mut mask = BinaryMask::new(w, h);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                mask.set(x, y, c == '#');
            }
        }
        mask
    }

    #[test]
    fn diagonal_pixels_join_under_eight_connectivity() {
        let mask = mask_from(&["#..", ".#.", "..#"]);
        let regions = label_regions(&mask);
        let fg: Vec<_> = regions.iter().filter(|r| r.is_foreground()).collect();
        assert_eq!(fg.len(), 1);
        assert_eq!((fg[0].width, fg[0].height, fg[0].area), (3, 3, 3));
    }

    #[test]
    fn anti_diagonal_joins_through_north_east_neighbor() {
        let mask = mask_from(&["..#", ".#.", "#.."]);
        let fg: Vec<_> = label_regions(&mask)
            .into_iter()
            .filter(|r| r.is_foreground())
            .collect();
        assert_eq!(fg.len(), 1);
        assert_eq!(fg[0].area, 3);
    }

    #[test]
    fn labels_follow_raster_order_of_first_pixel() {
        let mask = mask_from(&[
            "......", //
            "....##", //
            "##..##", //
            "##....", //
        ]);
        let regions = label_regions(&mask);
        // background first (pixel 0,0), then the right blob (row 1), then left.
        assert_eq!(regions.len(), 3);
        assert_eq!(regions[0].label, RegionLabel(1));
        assert!(!regions[0].is_foreground());
        assert_eq!((regions[1].left, regions[1].top), (4, 1));
        assert_eq!((regions[2].left, regions[2].top), (0, 2));
    }

    #[test]
    fn u_shape_merges_into_one_region() {
        let mask = mask_from(&["#..#", "#..#", "####"]);
        let fg: Vec<_> = label_regions(&mask)
            .into_iter()
            .filter(|r| r.is_foreground())
            .collect();
        assert_eq!(fg.len(), 1);
        assert_eq!((fg[0].left, fg[0].top, fg[0].width, fg[0].height), (0, 0, 4, 3));
        assert_eq!(fg[0].area, 8);
    }

    #[test]
    fn empty_mask_has_no_regions() {
        assert!(label_regions(&BinaryMask::new(0, 5)).is_empty());
    }
}
