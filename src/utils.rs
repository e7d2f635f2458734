/// Resolves a slice `[start:stop:step]` over a sequence of length `len` into
/// the list of selected indices.
///
/// Follows the usual slicing rules: negative bounds count from the end, bounds are
/// clamped to the sequence, missing bounds default to the full range in the
/// direction of `step`, and a negative `step` walks backwards.
///
/// ```
/// use cnf_rs::utils::slice_indices;
///
/// assert_eq!(slice_indices(5, None, None, 2), vec![0, 2, 4]);
/// assert_eq!(slice_indices(5, Some(-2), None, 1), vec![3, 4]);
/// assert_eq!(slice_indices(5, None, None, -1), vec![4, 3, 2, 1, 0]);
/// ```
///
/// # Panics
///
/// Panics if `step == 0`.
pub fn slice_indices(len: usize, start: Option<isize>, stop: Option<isize>, step: isize) -> Vec<usize> {
    assert_ne!(step, 0, "Slice step cannot be zero");
    let n = len as isize;

    // Bounds are clamped to [0, n] going forward and to [-1, n-1] going backward.
    let (lower, upper) = if step > 0 { (0, n) } else { (-1, n - 1) };
    let clamp = |i: isize| -> isize {
        let i = if i < 0 { i + n } else { i };
        i.clamp(lower, upper)
    };

    let start = match start {
        Some(i) => clamp(i),
        None if step > 0 => lower,
        None => upper,
    };
    let stop = match stop {
        Some(i) => clamp(i),
        None if step > 0 => upper,
        None => lower,
    };

    // Count first: stepping past the bounds could overflow for huge steps.
    let distance = if step > 0 { stop - start } else { start - stop };
    let count = if distance > 0 {
        (distance as usize - 1) / step.unsigned_abs() + 1
    } else {
        0
    };
    (0..count).map(|k| (start + k as isize * step) as usize).collect()
}
