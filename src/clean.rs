#[must_use]
pub fn collapse_line_breaks(value: &str) -> String {
    value.replace("\r\n", " ").replace(['\r', '\n'], " ")
}

#[must_use]
pub fn clean_row(row: &[String], column: usize) -> Vec<String> {
    row.iter()
        .enumerate()
        .map(|(index, cell)| {
            if index == column {
                collapse_line_breaks(cell)
            } else {
                cell.clone()
            }
        })
        .collect()
}
