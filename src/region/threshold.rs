use super::options::ThresholdMethod;
use crate::image::{BinaryMask, ImageView};

/// 256-bin intensity histogram of the inverted alpha channel.
pub(crate) struct Histogram {
    bins: [u64; 256],
    total: u64,
}

impl Histogram {
    /// Histogram of `255 - alpha` over every pixel of `alpha`.
    pub(crate) fn of_inverted<I: ImageView<Pixel = u8>>(alpha: &I) -> Self {
        let mut bins = [0u64; 256];
        for row in alpha.rows() {
            for &a in row {
                bins[usize::from(u8::MAX - a)] += 1;
            }
        }
        let total = bins.iter().sum();
        Self { bins, total }
    }

    #[cfg(test)]
    pub(crate) fn from_bins(bins: [u64; 256]) -> Self {
        let total = bins.iter().sum();
        Self { bins, total }
    }

    fn first_nonzero(&self) -> Option<usize> {
        self.bins.iter().position(|&c| c > 0)
    }

    fn last_nonzero(&self) -> Option<usize> {
        self.bins.iter().rposition(|&c| c > 0)
    }

    fn peak(&self) -> usize {
        let mut best = 0;
        for (i, &c) in self.bins.iter().enumerate() {
            if c > self.bins[best] {
                best = i;
            }
        }
        best
    }

    /// Threshold for a histogram with a single populated level, if it is one.
    ///
    /// Only a fully transparent level (inverted 255) stays foreground.
    fn single_level_threshold(&self) -> Option<u8> {
        let lo = self.first_nonzero()?;
        let hi = self.last_nonzero()?;
        (lo == hi).then(|| lo.min(254) as u8)
    }

    /// Otsu threshold: maximises between-class variance, first maximum wins.
    pub(crate) fn otsu(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        if let Some(t) = self.single_level_threshold() {
            return t;
        }
        let total = self.total as f64;
        let sum_all: f64 = self
            .bins
            .iter()
            .enumerate()
            .map(|(i, &c)| i as f64 * c as f64)
            .sum();

        let mut weight_bg = 0.0f64;
        let mut sum_bg = 0.0f64;
        let mut best_var = -1.0f64;
        let mut threshold = 0usize;
        for (i, &count) in self.bins.iter().enumerate() {
            weight_bg += count as f64;
            if weight_bg == 0.0 {
                continue;
            }
            let weight_fg = total - weight_bg;
            if weight_fg == 0.0 {
                break;
            }
            sum_bg += i as f64 * count as f64;
            let mean_bg = sum_bg / weight_bg;
            let mean_fg = (sum_all - sum_bg) / weight_fg;
            let between = weight_bg * weight_fg * (mean_bg - mean_fg).powi(2);
            if between > best_var {
                best_var = between;
                threshold = i;
            }
        }
        threshold as u8
    }

    /// Triangle threshold: farthest bin from the chord between the histogram
    /// peak and the end of its longer tail.
    pub(crate) fn triangle(&self) -> u8 {
        let (Some(lo), Some(hi)) = (self.first_nonzero(), self.last_nonzero()) else {
            return 0;
        };
        if let Some(t) = self.single_level_threshold() {
            return t;
        }
        let peak = self.peak();
        let end = if peak - lo < hi - peak { hi } else { lo };

        let (x1, y1) = (peak as f64, self.bins[peak] as f64);
        let (x2, y2) = (end as f64, self.bins[end] as f64);
        let (from, to) = if end > peak { (peak, end) } else { (end, peak) };

        let mut best_dist = -1.0f64;
        let mut threshold = from;
        for i in from..=to {
            let (x, y) = (i as f64, self.bins[i] as f64);
            // Unnormalised perpendicular distance; the chord is fixed.
            let dist = ((y2 - y1) * x - (x2 - x1) * y + x2 * y1 - y2 * x1).abs();
            if dist > best_dist {
                best_dist = dist;
                threshold = i;
            }
        }
        threshold as u8
    }

    pub(crate) fn threshold(&self, method: ThresholdMethod) -> u8 {
        match method {
            ThresholdMethod::Otsu => self.otsu(),
            ThresholdMethod::Triangle => self.triangle(),
        }
    }
}

/// Invert `alpha` and split it at an image-specific threshold.
///
/// Inverted samples strictly above the threshold become foreground, so fully
/// transparent pixels end up as 255 in the mask. Returns the mask and the
/// threshold that was applied.
pub fn binarize_inverted<I: ImageView<Pixel = u8>>(
    alpha: &I,
    method: ThresholdMethod,
) -> (BinaryMask, u8) {
    let threshold = Histogram::of_inverted(alpha).threshold(method);
    let mut mask = BinaryMask::new(alpha.width(), alpha.height());
    for (y, row) in alpha.rows().enumerate() {
        for (x, &a) in row.iter().enumerate() {
            mask.set(x, y, u8::MAX - a > threshold);
        }
    }
    (mask, threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageU8;

    fn bimodal(low: (usize, u64), high: (usize, u64)) -> Histogram {
        let mut bins = [0u64; 256];
        bins[low.0] = low.1;
        bins[high.0] = high.1;
        Histogram::from_bins(bins)
    }

    #[test]
    fn otsu_splits_pure_bimodal_at_lower_level() {
        let hist = bimodal((0, 900), (255, 100));
        assert_eq!(hist.otsu(), 0);
    }

    #[test]
    fn otsu_separates_shifted_modes() {
        let mut bins = [0u64; 256];
        for i in 20..40 {
            bins[i] = 50;
        }
        for i in 200..230 {
            bins[i] = 30;
        }
        let t = Histogram::from_bins(bins).otsu();
        assert!((39..200).contains(&(t as usize)), "threshold {t} between modes");
    }

    #[test]
    fn triangle_handles_either_tail() {
        assert_eq!(bimodal((0, 900), (255, 100)).triangle(), 1);
        assert_eq!(bimodal((0, 100), (255, 900)).triangle(), 254);
    }

    #[test]
    fn single_level_keeps_only_full_transparency() {
        let mut bins = [0u64; 256];
        bins[255] = 10;
        assert_eq!(Histogram::from_bins(bins).otsu(), 254);
        let mut bins = [0u64; 256];
        bins[128] = 10;
        assert_eq!(Histogram::from_bins(bins).triangle(), 128);
    }

    #[test]
    fn binarize_marks_transparent_pixels_as_foreground() {
        // opaque frame with a transparent 2x2 hole
        let mut alpha = vec![255u8; 16];
        for &i in &[5usize, 6, 9, 10] {
            alpha[i] = 0;
        }
        let view = ImageU8::packed(4, 4, &alpha);
        for method in [ThresholdMethod::Otsu, ThresholdMethod::Triangle] {
            let (mask, _) = binarize_inverted(&view, method);
            assert_eq!(mask.foreground_count(), 4, "{method:?}");
            assert!(mask.is_foreground(1, 1));
            assert!(!mask.is_foreground(0, 0));
        }
    }
}
