

use crate::core::error::SearchError;


/// Cosine similarity clamped to [0, 1]; a zero vector on either side has similarity 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, SearchError> {
    if a.len() != b.len() {
        return Err(SearchError::InvalidInput(format!(
            "embedding length mismatch: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    let (dot, norm_a, norm_b) = a.iter().zip(b.iter()).fold(
        (0.0f64, 0.0f64, 0.0f64),
        |(dot, na, nb), (&x, &y)| {
            let (x, y) = (f64::from(x), f64::from(y));
            (dot + x * y, na + x * x, nb + y * y)
        },
    );

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    let similarity = dot / (norm_a.sqrt() * norm_b.sqrt());
    Ok(similarity.clamp(0.0, 1.0))
}
