pub const WIN_MARKERS: [&str; 2] = ["1", "1F"];

fn is_win(cell: &str) -> bool {
    cell.split('\n')
        .nth(1)
        .is_some_and(|position| WIN_MARKERS.contains(&position))
}

#[must_use]
pub fn count_wins<S: AsRef<str>>(results: &[S]) -> u32 {
    let wins = results.iter().filter(|cell| is_win(cell.as_ref())).count();
    u32::try_from(wins).unwrap_or(u32::MAX)
}
