/// Otsu's threshold over a grayscale buffer
///
/// Returns the intensity `t` maximizing the between-class variance of
/// `{<= t}` and `{> t}`; 0 when the buffer is empty or holds a single value.
pub fn otsu_threshold(gray: &[u8]) -> u8 {
    let mut histogram = [0u64; 256];
    for &pixel in gray {
        histogram[pixel as usize] += 1;
    }

    let total = gray.len() as u64;
    let sum_total: f64 = histogram
        .iter()
        .enumerate()
        .map(|(i, &count)| i as f64 * count as f64)
        .sum();

    let mut weight_background = 0u64;
    let mut sum_background = 0.0f64;
    let mut max_variance = 0.0f64;
    let mut best_threshold = 0u8;

    for (intensity, &count) in histogram.iter().enumerate() {
        weight_background += count;
        if weight_background == 0 {
            continue;
        }
        let weight_foreground = total - weight_background;
        if weight_foreground == 0 {
            break;
        }

        sum_background += intensity as f64 * count as f64;
        let mean_background = sum_background / weight_background as f64;
        let mean_foreground = (sum_total - sum_background) / weight_foreground as f64;

        let variance = weight_background as f64
            * weight_foreground as f64
            * (mean_background - mean_foreground).powi(2);

        if variance > max_variance {
            max_variance = variance;
            best_threshold = intensity as u8;
        }
    }

    best_threshold
}

/// Binarize with a global threshold: `> threshold` is a space (255), otherwise a bar (0)
pub fn threshold_binarize(gray: &[u8], threshold: u8) -> Vec<u8> {
    gray.iter()
        .map(|&pixel| if pixel > threshold { 255 } else { 0 })
        .collect()
}

/// Binarize using Otsu's threshold computed over the same buffer
pub fn otsu_binarize(gray: &[u8]) -> Vec<u8> {
    threshold_binarize(gray, otsu_threshold(gray))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_binarize() {
        let gray = vec![100, 150, 200, 50];
        let binary = threshold_binarize(&gray, 128);
        assert_eq!(binary, vec![0, 255, 255, 0]);

        // Equal to the threshold counts as a bar
        assert_eq!(threshold_binarize(&[128], 128), vec![0]);
    }

    #[test]
    fn test_otsu_two_classes() {
        let mut gray = vec![50u8; 50];
        gray.extend(vec![200u8; 50]);

        let threshold = otsu_threshold(&gray);
        assert!((50..200).contains(&threshold));

        let binary = otsu_binarize(&gray);
        assert!(binary[..50].iter().all(|&p| p == 0));
        assert!(binary[50..].iter().all(|&p| p == 255));
    }

    #[test]
    fn test_otsu_degenerate() {
        assert_eq!(otsu_threshold(&[]), 0);
        assert_eq!(otsu_threshold(&[77; 10]), 0);
    }

    #[test]
    fn test_otsu_noisy_classes() {
        let mut gray = Vec::new();
        for i in 0..100u8 {
            gray.push(20 + i % 15);
            gray.push(220 - i % 15);
        }
        let threshold = otsu_threshold(&gray);
        assert!(threshold >= 34 && threshold < 206);
    }
}
