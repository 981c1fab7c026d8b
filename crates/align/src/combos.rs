/// Every run of consecutive entries of `ids`, longest runs first and runs of
/// equal length in scan order.
///
/// The number of runs grows quadratically with `ids.len()`, and the group
/// search pairs every source run with every target run. Long stretches of
/// overlapping alignments are therefore the scaling limit of grouping; no
/// truncation is applied.
pub fn consecutive_combinations(ids: &[usize]) -> Vec<&[usize]> {
    let n = ids.len();
    let mut runs = Vec::with_capacity(n * (n + 1) / 2);
    for size in (1..=n).rev() {
        for start in 0..=n - size {
            runs.push(&ids[start..start + size]);
        }
    }
    runs
}
