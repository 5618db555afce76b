use crate::domain::error::VectorDbError;

/// Sum of elementwise products, accumulated left to right in `f64`.
pub fn dot_product(a: &[f32], b: &[f32]) -> Result<f64, VectorDbError> {
    if a.len() != b.len() {
        return Err(VectorDbError::dimension(a.len(), b.len()));
    }
    let mut sum = 0.0_f64;
    for (x, y) in a.iter().zip(b.iter()) {
        sum += *x as f64 * *y as f64;
    }
    Ok(sum)
}

/// Rejects NaN and infinite components, which have no direction and do not
/// survive a JSON round-trip.
pub fn ensure_finite(v: &[f32]) -> Result<(), VectorDbError> {
    match v.iter().position(|x| !x.is_finite()) {
        Some(i) => Err(VectorDbError::Validation(format!(
            "vector component {i} is not finite ({})",
            v[i]
        ))),
        None => Ok(()),
    }
}

/// Euclidean (L2) norm.
pub fn magnitude(v: &[f32]) -> f64 {
    let mut sum = 0.0_f64;
    for x in v {
        let x = *x as f64;
        sum += x * x;
    }
    sum.sqrt()
}

/// Cosine of the angle between `a` and `b`, clamped to [-1, 1].
/// Fails with `ZeroVector` when either side has no direction.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, VectorDbError> {
    let dot = dot_product(a, b)?;
    let mag_a = magnitude(a);
    let mag_b = magnitude(b);
    if mag_a == 0.0 || mag_b == 0.0 {
        return Err(VectorDbError::ZeroVector);
    }
    let sim = dot / (mag_a * mag_b);
    if !mag_a.is_finite() || !mag_b.is_finite() || !sim.is_finite() {
        return Err(VectorDbError::Validation(
            "cosine similarity is undefined for non-finite vectors".into(),
        ));
    }
    Ok(sim.clamp(-1.0, 1.0))
}

/// `1 - cosine_similarity`, in [0, 2].
pub fn cosine_distance(a: &[f32], b: &[f32]) -> Result<f64, VectorDbError> {
    Ok(1.0 - cosine_similarity(a, b)?)
}

/// Scores `query` against each vector in order. `None` marks a vector for
/// which the similarity is undefined.
pub fn batch_cosine_similarity<V: AsRef<[f32]>>(query: &[f32], vectors: &[V]) -> Vec<Option<f64>> {
    vectors
        .iter()
        .map(|v| cosine_similarity(query, v.as_ref()).ok())
        .collect()
}
