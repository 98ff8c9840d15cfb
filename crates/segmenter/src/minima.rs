pub const DEFAULT_ORDER: usize = 2;
pub const DEFAULT_MIN_PROMINENCE: f64 = 1e-6;

/// Strict local minima of `data`.
///
/// Position `i` qualifies when, for every `s` in `1..=order`, its value plus
/// `min_prominence` is below both `data[i - s]` and `data[i + s]`, with
/// neighbor positions clamped to the sequence. Clamping compares the
/// endpoints with themselves, so they never qualify. An `order` of 0 is
/// treated as 1.
pub fn local_minima(data: &[f64], order: usize, min_prominence: f64) -> Vec<usize> {
    let n = data.len();
    if n == 0 {
        return Vec::new();
    }
    let order = order.max(1);
    let last = n - 1;

    (0..n)
        .filter(|&i| {
            let value = data[i] + min_prominence;
            (1..=order).all(|s| {
                let left = data[i.saturating_sub(s)];
                let right = data[(i + s).min(last)];
                value < left && value < right
            })
        })
        .collect()
}
