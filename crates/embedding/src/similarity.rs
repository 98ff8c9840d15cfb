/// Cosine similarity accumulated in f64. Zero-norm vectors compare as 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (x as f64, y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Dense N×N similarity matrix, row-major. Symmetric; the diagonal is the
/// self-similarity (1 for any non-zero vector).
pub fn similarity_matrix<V: AsRef<[f32]>>(vectors: &[V]) -> Vec<Vec<f64>> {
    let n = vectors.len();
    let mut matrix = vec![vec![0.0; n]; n];

    for i in 0..n {
        for j in i..n {
            let sim = cosine_similarity(vectors[i].as_ref(), vectors[j].as_ref());
            matrix[i][j] = sim;
            matrix[j][i] = sim;
        }
    }
    matrix
}

/// Similarity of `query` against every vector, in input order.
pub fn similarities_to<V: AsRef<[f32]>>(query: &[f32], vectors: &[V]) -> Vec<f64> {
    vectors
        .iter()
        .map(|v| cosine_similarity(query, v.as_ref()))
        .collect()
}

/// Similarity of each vector to its predecessor; `len - 1` entries.
pub fn adjacent_similarities<V: AsRef<[f32]>>(vectors: &[V]) -> Vec<f64> {
    vectors
        .windows(2)
        .map(|pair| cosine_similarity(pair[0].as_ref(), pair[1].as_ref()))
        .collect()
}
