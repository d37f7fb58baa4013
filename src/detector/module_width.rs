/// Estimates the pixel width of one barcode module from bar run lengths
///
/// The width is the most frequent length of consecutive black (0) pixels.
/// Runs longer than a tenth of the row are treated as background and ignored.
pub struct ModuleWidthEstimator;

impl ModuleWidthEstimator {
    /// Most frequent bar run length in `row`, or 0 when it cannot be determined
    ///
    /// Returns 0 for an empty row, a row shorter than 10 pixels, or a row with no
    /// bar run short enough to count. Ties go to the smallest run length.
    pub fn estimate(row: &[u8]) -> usize {
        let histogram = Self::histogram(row);

        let mut best = 0usize;
        let mut best_count = 0u32;
        for (run, &count) in histogram.iter().enumerate().skip(1) {
            if count > best_count {
                best_count = count;
                best = run;
            }
        }
        best
    }

    /// Histogram of bar run lengths, indexed by length, up to `row.len() / 10`
    pub fn histogram(row: &[u8]) -> Vec<u32> {
        let bound = row.len() / 10;
        if bound == 0 {
            return Vec::new();
        }

        let mut histogram = vec![0u32; bound + 1];
        let mut run = 0usize;
        for &pixel in row {
            if pixel == 0 {
                run += 1;
                continue;
            }
            if run > 0 && run <= bound {
                histogram[run] += 1;
            }
            run = 0;
        }
        // Bar touching the right edge
        if run > 0 && run <= bound {
            histogram[run] += 1;
        }

        histogram
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bars(runs: &[(usize, usize)]) -> Vec<u8> {
        let mut row = Vec::new();
        for &(black, white) in runs {
            row.extend(std::iter::repeat(0u8).take(black));
            row.extend(std::iter::repeat(255u8).take(white));
        }
        row
    }

    #[test]
    fn test_uniform_runs() {
        let row = bars(&[(4, 4); 10]);
        assert_eq!(ModuleWidthEstimator::estimate(&row), 4);
    }

    #[test]
    fn test_most_frequent_wins() {
        let row = bars(&[(3, 3), (6, 3), (3, 3), (9, 3), (3, 3), (6, 30)]);
        assert_eq!(ModuleWidthEstimator::estimate(&row), 3);
    }

    #[test]
    fn test_tie_goes_to_smallest() {
        let row = bars(&[(4, 2), (2, 2), (4, 2), (2, 40)]);
        assert_eq!(ModuleWidthEstimator::estimate(&row), 2);
    }

    #[test]
    fn test_long_runs_ignored() {
        // 40-pixel bar exceeds the 10% bound of a 100-pixel row
        let row = bars(&[(40, 10), (5, 5), (5, 35)]);
        assert_eq!(row.len(), 100);
        assert_eq!(ModuleWidthEstimator::estimate(&row), 5);
    }

    #[test]
    fn test_trailing_bar_counted() {
        let mut row = vec![255u8; 30];
        row.extend([0, 0, 255, 0, 0]);
        row.extend(vec![255u8; 10]);
        row.extend([0, 0, 0, 255, 0, 0, 0]);
        row.extend(vec![255u8; 10]);
        row.extend([0, 0, 0]);
        // Two runs of 2, three of 3 (the last one ends the row)
        assert_eq!(ModuleWidthEstimator::estimate(&row), 3);
    }

    #[test]
    fn test_degenerate_rows() {
        assert_eq!(ModuleWidthEstimator::estimate(&[]), 0);
        assert_eq!(ModuleWidthEstimator::estimate(&[0, 255, 0]), 0);
        assert_eq!(ModuleWidthEstimator::estimate(&[255u8; 200]), 0);
        assert_eq!(ModuleWidthEstimator::estimate(&[0u8; 200]), 0);
    }

    #[test]
    fn test_nonzero_is_white() {
        let row: Vec<u8> = bars(&[(2, 2); 10])
            .into_iter()
            .map(|p| if p == 0 { 0 } else { 1 })
            .collect();
        assert_eq!(ModuleWidthEstimator::estimate(&row), 2);
    }
}
