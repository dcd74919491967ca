/// Clamp with the min bound checked first: when `min > max` the min bound
/// wins.
pub fn clamp(value: i32, min: i32, max: i32) -> i32 {
    if value <= min {
        min
    } else if value >= max {
        max
    } else {
        value
    }
}

/// Rounded integer affine map from `[a_min, a_max]` to `[b_min, b_max]`.
///
/// The input is clamped into the source domain before mapping, so the result
/// never leaves the target domain. A zero-width source domain yields `b_min`.
pub fn convert_domain(value: i32, a_min: i32, a_max: i32, b_min: i32, b_max: i32) -> i32 {
    let a_range = a_max - a_min;
    let b_range = b_max - b_min;
    if a_range == 0 {
        return b_min;
    }
    let value = clamp(value, a_min, a_max);
    ((value - a_min) * b_range + a_range / 2) / a_range + b_min
}

/// Same mapping over unsigned frequency-sized values.
pub fn convert_domain_u32(value: u32, a_min: u32, a_max: u32, b_min: u32, b_max: u32) -> u32 {
    let a_range = a_max - a_min;
    let b_range = b_max - b_min;
    if a_range == 0 {
        return b_min;
    }
    let value = value.clamp(a_min, a_max);
    let scaled = (value - a_min) as u64 * b_range as u64 + a_range as u64 / 2;
    (scaled / a_range as u64) as u32 + b_min
}

pub fn ceil_div(a: u32, b: u32) -> u32 {
    (a + b - 1) / b
}

/// Affine approximation of the receiver's logarithmic RSSI encoding.
pub fn rssi_to_dbm(rssi: u16) -> i16 {
    (rssi >> 1) as i16 - 177
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_domain_rounds_and_clamps() {
        assert_eq!(convert_domain(5, 0, 10, 0, 100), 50);
        assert_eq!(convert_domain(-3, 0, 10, 0, 100), 0);
        assert_eq!(convert_domain(42, 0, 10, 0, 100), 100);
        // 1/3 of the way across a 0..=2 target rounds to the nearest index
        assert_eq!(convert_domain(1, 0, 3, 0, 2), 1);
    }

    #[test]
    fn convert_domain_degenerate_source_returns_target_min() {
        assert_eq!(convert_domain(7, 5, 5, 2, 9), 2);
        assert_eq!(convert_domain_u32(7, 5, 5, 2, 9), 2);
    }

    #[test]
    fn convert_domain_u32_handles_frequency_spans() {
        // Mid-band frequency maps to the middle column.
        assert_eq!(
            convert_domain_u32(146_000_000, 144_000_000, 148_000_000, 0, 159),
            80
        );
    }

    #[test]
    fn clamp_prefers_min_bound() {
        assert_eq!(clamp(10, 20, 5), 20);
    }

    #[test]
    fn rssi_to_dbm_matches_affine_encoding() {
        assert_eq!(rssi_to_dbm(0), -177);
        assert_eq!(rssi_to_dbm(200), -77);
    }
}
