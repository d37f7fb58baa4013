/// EAN/UPC mod-10 check digit
///
/// Weights alternate 3, 1, 3, ... starting from the first digit, whatever the
/// number of digits.
pub struct Checksum;

impl Checksum {
    /// Check digit for `payload` (every digit except the check digit)
    pub fn compute(payload: &[u8]) -> u8 {
        let sum: u32 = payload
            .iter()
            .enumerate()
            .map(|(i, &digit)| {
                let weight = if i % 2 == 0 { 3 } else { 1 };
                digit as u32 * weight
            })
            .sum();
        ((10 - sum % 10) % 10) as u8
    }

    /// Whether the last digit of `digits` is the check digit of the others
    pub fn validate(digits: &[u8]) -> bool {
        match digits.split_last() {
            Some((&check, payload)) => Self::compute(payload) == check,
            None => false,
        }
    }
}
