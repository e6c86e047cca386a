/// Moving mean of classified positions over the trailing `window` rounds.
///
/// A window with no classified finish yields `None` so plotted trends show a gap
/// instead of a carried-forward value. A zero window behaves as a window of one.
pub fn rolling_average(positions: &[Option<u32>], window: usize) -> Vec<Option<f64>> {
    let window = window.max(1);

    (0..positions.len())
        .map(|index| {
            let start = (index + 1).saturating_sub(window);
            let classified: Vec<u32> = positions[start..=index].iter().flatten().copied().collect();
            if classified.is_empty() {
                return None;
            }
            let sum: u64 = classified.iter().map(|position| u64::from(*position)).sum();
            Some(sum as f64 / classified.len() as f64)
        })
        .collect()
}
