use crate::anchor::locate_bands;
use crate::clean::clean_row;
use crate::error::ExtractError;
use crate::header::recover_headers;
use crate::model::{PitStopRow, ReconstructedTable, ReportTable, StandingRow};
use crate::options::ExtractOptions;
use crate::page::ReportPage;
use crate::repair::{POSITION_COLUMN, detect_and_reconstruct};
use crate::report::{ReportKind, ReportLayout};
use crate::wins::count_wins;

const TOTAL_COLUMN: &str = "total";

fn schema_mismatch(page: u32, expected: &str, headers: &[String]) -> ExtractError {
    ExtractError::SchemaMismatch {
        page,
        expected: expected.to_string(),
        found: format!("{headers:?}"),
    }
}

fn check_required_columns(
    page: u32,
    headers: &[String],
    layout: &ReportLayout,
) -> Result<(), ExtractError> {
    for required in layout.required_columns {
        if !headers.iter().any(|header| header == required) {
            return Err(schema_mismatch(
                page,
                &format!("column '{required}'"),
                headers,
            ));
        }
    }
    Ok(())
}

fn column(page: u32, table: &ReconstructedTable, name: &str) -> Result<usize, ExtractError> {
    table
        .column_index(name)
        .ok_or_else(|| schema_mismatch(page, &format!("column '{name}'"), &table.columns))
}

fn reconstruct_page<P: ReportPage + ?Sized>(
    page: &P,
    layout: &ReportLayout,
    options: &ExtractOptions,
) -> Result<ReconstructedTable, ExtractError> {
    let page_number = page.page_number();
    let bands = locate_bands(page, layout.header_label, layout.footer_label)?;
    let headers = layout
        .header_mapping
        .apply(&recover_headers(page, &bands.header));
    check_required_columns(page_number, &headers, layout)?;

    let repair = options.header_repair.unwrap_or(layout.repair);
    detect_and_reconstruct(page, &bands.table, &headers, repair, &options.detector)
}

pub fn parse_standings_page<P: ReportPage + ?Sized>(
    page: &P,
    kind: ReportKind,
    options: &ExtractOptions,
) -> Result<Vec<StandingRow>, ExtractError> {
    let layout = kind.layout();
    let page_number = page.page_number();
    let table = reconstruct_page(page, layout, options)?;

    let position = column(page_number, &table, POSITION_COLUMN)?;
    let name = column(page_number, &table, layout.name_column.unwrap_or_default())?;
    let total = column(page_number, &table, TOTAL_COLUMN)?;

    let rows = table
        .rows
        .iter()
        .map(|row| {
            let row = clean_row(row, name);
            StandingRow {
                wins: count_wins(&row[total + 1..]),
                position: row[position].clone(),
                name: row[name].clone(),
                total: row[total].clone(),
            }
        })
        .collect::<Vec<_>>();
    tracing::debug!(page = page_number, rows = rows.len(), "parsed standings page");
    Ok(rows)
}

pub fn parse_pit_stop_page<P: ReportPage + ?Sized>(
    page: &P,
    options: &ExtractOptions,
) -> Result<Vec<PitStopRow>, ExtractError> {
    let layout = ReportKind::PitStops.layout();
    let page_number = page.page_number();
    let table = reconstruct_page(page, layout, options)?;

    let driver_no = column(page_number, &table, "no")?;
    let lap = column(page_number, &table, "lap")?;
    let local_time = column(page_number, &table, "time of day")?;
    let stop = column(page_number, &table, "stop")?;
    let duration = column(page_number, &table, "duration")?;

    let rows = table
        .rows
        .iter()
        .filter(|row| !row[driver_no].trim().is_empty())
        .map(|row| PitStopRow {
            driver_no: row[driver_no].clone(),
            lap: row[lap].clone(),
            local_time: row[local_time].clone(),
            no: row[stop].clone(),
            duration: row[duration].clone(),
        })
        .collect::<Vec<_>>();
    tracing::debug!(page = page_number, rows = rows.len(), "parsed pit stop page");
    Ok(rows)
}

fn collect_pages<P, R, F>(
    pages: &[P],
    options: &ExtractOptions,
    mut parse_page: F,
) -> Result<(Vec<R>, usize), ExtractError>
where
    P: ReportPage,
    F: FnMut(&P) -> Result<Vec<R>, ExtractError>,
{
    let mut selected = pages
        .iter()
        .filter(|page| {
            options
                .pages
                .as_ref()
                .is_none_or(|selection| selection.contains(page.page_number()))
        })
        .peekable();
    if selected.peek().is_none() {
        return Err(ExtractError::NoPagesSelected);
    }

    let mut rows = Vec::new();
    let mut parsed = 0;
    for page in selected {
        rows.extend(parse_page(page)?);
        parsed += 1;
    }
    Ok((rows, parsed))
}

pub fn parse_pages<P: ReportPage>(
    pages: &[P],
    kind: ReportKind,
    options: &ExtractOptions,
) -> Result<ReportTable, ExtractError> {
    let (table, parsed) = match kind {
        ReportKind::DriverChampionship | ReportKind::ConstructorChampionship => {
            let (rows, parsed) = collect_pages(pages, options, |page| {
                parse_standings_page(page, kind, options)
            })?;
            (ReportTable::Standings { kind, rows }, parsed)
        }
        ReportKind::PitStops => {
            let (rows, parsed) =
                collect_pages(pages, options, |page| parse_pit_stop_page(page, options))?;
            (ReportTable::PitStops { rows }, parsed)
        }
    };

    tracing::info!(
        report = %kind,
        pages = parsed,
        rows = table.len(),
        "parsed report"
    );
    Ok(table)
}
