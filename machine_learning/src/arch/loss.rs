/// The half sum of squared errors between `target` and `output`.
///
/// # Panics
/// If both slices differ in length.
pub fn total_error(target: &[f32], output: &[f32]) -> f32 {
    assert_eq!(
        target.len(),
        output.len(),
        "target and output lengths differ"
    );

    target
        .iter()
        .zip(output)
        .map(|(t, o)| 0.5 * (t - o).powi(2))
        .sum()
}
