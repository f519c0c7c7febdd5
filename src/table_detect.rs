use crate::model::{RawTable, Rect, Word};
use crate::options::DetectorSettings;

pub(crate) fn group_lines(words: &[Word], tolerance: f32) -> Vec<Vec<Word>> {
    let mut sorted = words.to_vec();
    sorted.sort_by(|a, b| {
        a.rect
            .y1
            .total_cmp(&b.rect.y1)
            .then(a.rect.x0.total_cmp(&b.rect.x0))
    });

    let mut lines: Vec<Vec<Word>> = Vec::new();
    let mut line_baseline = f32::NEG_INFINITY;
    for word in sorted {
        match lines.last_mut() {
            Some(line) if word.rect.y1 - line_baseline <= tolerance => line.push(word),
            _ => {
                line_baseline = word.rect.y1;
                lines.push(vec![word]);
            }
        }
    }

    for line in &mut lines {
        line.sort_by(|a, b| a.rect.x0.total_cmp(&b.rect.x0));
    }
    lines
}

fn column_spans<'a>(words: impl Iterator<Item = &'a Word>, column_gap: f32) -> Vec<(f32, f32)> {
    let mut extents = words
        .map(|word| (word.rect.x0, word.rect.x1))
        .collect::<Vec<_>>();
    extents.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut spans: Vec<(f32, f32)> = Vec::new();
    for (start, end) in extents {
        match spans.last_mut() {
            Some(span) if start - span.1 < column_gap => span.1 = span.1.max(end),
            _ => spans.push((start, end)),
        }
    }
    spans
}

fn column_of(spans: &[(f32, f32)], word: &Word) -> usize {
    spans
        .iter()
        .position(|(start, end)| word.rect.x0 >= *start && word.rect.x0 <= *end)
        .unwrap_or(spans.len().saturating_sub(1))
}

fn line_cells(spans: &[(f32, f32)], line: &[Word]) -> Vec<String> {
    let mut cells = vec![String::new(); spans.len()];
    for word in line {
        let cell = &mut cells[column_of(spans, word)];
        if !cell.is_empty() {
            cell.push(' ');
        }
        cell.push_str(&word.text);
    }
    cells
}

fn append_continuation(row: &mut [String], continuation: Vec<String>) {
    for (cell, extra) in row.iter_mut().zip(continuation) {
        if extra.is_empty() {
            continue;
        }
        if !cell.is_empty() {
            cell.push('\n');
        }
        cell.push_str(&extra);
    }
}

// The first line in the clip is the printed label line and is skipped, so
// the first grid row comes back as the header row.
pub(crate) fn detect_tables(
    words: &[Word],
    clip: &Rect,
    settings: &DetectorSettings,
) -> Vec<RawTable> {
    let inside = words
        .iter()
        .filter(|word| clip.contains_center_of(&word.rect))
        .cloned()
        .collect::<Vec<_>>();
    let lines = group_lines(&inside, settings.line_tolerance);

    let Some((_label_line, body)) = lines.split_first() else {
        return Vec::new();
    };
    if body.is_empty() {
        return Vec::new();
    }

    let spans = column_spans(body.iter().flatten(), settings.column_gap);
    let mut rows: Vec<Vec<String>> = Vec::new();
    for line in body {
        let cells = line_cells(&spans, line);
        match rows.last_mut() {
            Some(previous) if cells[0].is_empty() => append_continuation(previous, cells),
            _ => rows.push(cells),
        }
    }

    let mut rows = rows.into_iter();
    let Some(header) = rows.next() else {
        return Vec::new();
    };
    vec![RawTable {
        header,
        rows: rows.collect(),
    }]
}
