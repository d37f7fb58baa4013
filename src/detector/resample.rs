use crate::decoder::error::{DecodeError, Result};

/// Turns a pixel scanline into one bit per module
pub struct Resampler;

impl Resampler {
    /// Sample the pixel at `i * module_width` for every whole module in `row`
    ///
    /// A black (0) pixel becomes a bar (`true`). A trailing partial module is dropped.
    pub fn resample(row: &[u8], module_width: usize) -> Result<Vec<bool>> {
        if module_width == 0 {
            return Err(DecodeError::InvalidInput {
                reason: "module width is zero",
            });
        }

        let count = row.len() / module_width;
        let mut bits = Vec::new();
        bits.try_reserve_exact(count)
            .map_err(|_| DecodeError::AllocationFailure)?;
        bits.extend(
            row.iter()
                .step_by(module_width)
                .take(count)
                .map(|&pixel| pixel == 0),
        );
        Ok(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resample() {
        let row = [0, 0, 255, 255, 0, 0, 0, 0, 255, 255];
        let bits = Resampler::resample(&row, 2).unwrap();
        assert_eq!(bits, vec![true, false, true, true, false]);
    }

    #[test]
    fn test_partial_module_dropped() {
        let row = [0, 0, 0, 255, 255, 255, 0];
        let bits = Resampler::resample(&row, 3).unwrap();
        assert_eq!(bits, vec![true, false]);
    }

    #[test]
    fn test_zero_width_is_invalid() {
        let err = Resampler::resample(&[0, 255], 0).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidInput { .. }));
    }

    #[test]
    fn test_row_shorter_than_module() {
        assert_eq!(Resampler::resample(&[0, 0], 4).unwrap(), Vec::<bool>::new());
        assert_eq!(Resampler::resample(&[], 1).unwrap(), Vec::<bool>::new());
    }
}
