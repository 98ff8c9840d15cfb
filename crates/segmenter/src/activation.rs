pub const DEFAULT_P_SIZE: usize = 10;

const CURVE_START: f64 = -10.0;
const CURVE_END: f64 = 10.0;

pub fn reverse_sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (0.5 * x).exp())
}

/// Weight per diagonal offset `k` (index `k - 1`), for a matrix of size `n`.
///
/// The first `p_size` offsets follow the reverse sigmoid sampled at `p_size`
/// evenly spaced points over [-10, 10]; later offsets weigh zero. When the
/// matrix has fewer than `p_size` offsets the curve is truncated, not
/// resampled.
pub fn activation_weights(p_size: usize, n: usize) -> Vec<f64> {
    let offsets = n.saturating_sub(1);
    let curve = linspace(CURVE_START, CURVE_END, p_size);

    (0..offsets)
        .map(|k| curve.get(k).map(|&x| reverse_sigmoid(x)).unwrap_or(0.0))
        .collect()
}

/// Smoothed forward similarity per sentence:
/// `activated[i] = sum over k >= 1 of w[k-1] * sim[i][i+k]`.
///
/// `similarities` must be square. Offsets running past the end contribute
/// nothing, so the last sentence always scores 0.
pub fn activate_similarities(similarities: &[Vec<f64>], p_size: usize) -> Vec<f64> {
    let n = similarities.len();
    let weights = activation_weights(p_size, n);

    (0..n)
        .map(|i| {
            weights
                .iter()
                .enumerate()
                .take_while(|(offset, _)| i + offset + 1 < n)
                .map(|(offset, w)| w * similarities[i][i + offset + 1])
                .sum::<f64>()
        })
        .collect()
}

fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}
