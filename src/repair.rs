use std::sync::LazyLock;

use regex::Regex;

use crate::error::ExtractError;
use crate::model::{RawTable, ReconstructedTable, Rect};
use crate::options::DetectorSettings;
use crate::page::ReportPage;

pub const POSITION_COLUMN: &str = "pos";

static INDEX_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+-").expect("hardcoded index prefix regex is valid"));

/// How the detector's header row is turned back into data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderRepair {
    PromoteHeaderRow,
    StripIndexPrefix,
    TrustDetector,
}

impl HeaderRepair {
    fn synthesised_columns(self) -> usize {
        match self {
            Self::PromoteHeaderRow | Self::TrustDetector => 1,
            Self::StripIndexPrefix => 0,
        }
    }
}

pub(crate) fn strip_index_prefix(cell: &str) -> String {
    INDEX_PREFIX.replace(cell, "").into_owned()
}

fn check_arity(page: u32, raw: &RawTable) -> Result<(), ExtractError> {
    let expected = raw.width();
    for (index, row) in raw.rows.iter().enumerate() {
        if row.len() != expected {
            return Err(ExtractError::MalformedTable {
                page,
                row: index + 1,
                expected,
                found: row.len(),
            });
        }
    }
    Ok(())
}

pub fn reconstruct(
    page: u32,
    raw: RawTable,
    headers: &[String],
    repair: HeaderRepair,
) -> Result<ReconstructedTable, ExtractError> {
    check_arity(page, &raw)?;

    let column_count = repair.synthesised_columns() + headers.len();
    if column_count != raw.width() {
        return Err(ExtractError::SchemaMismatch {
            page,
            expected: format!("{} columns detected", raw.width()),
            found: format!("{column_count} columns from header labels {headers:?}"),
        });
    }

    let mut columns = Vec::with_capacity(column_count);
    if repair.synthesised_columns() == 1 {
        columns.push(POSITION_COLUMN.to_string());
    }
    columns.extend(headers.iter().cloned());

    let RawTable { header, rows } = raw;
    let rows = match repair {
        HeaderRepair::PromoteHeaderRow => std::iter::once(header).chain(rows).collect(),
        HeaderRepair::StripIndexPrefix => {
            let first = header.iter().map(|cell| strip_index_prefix(cell)).collect();
            std::iter::once(first).chain(rows).collect()
        }
        HeaderRepair::TrustDetector => rows,
    };

    Ok(ReconstructedTable { columns, rows })
}

pub fn detect_and_reconstruct<P: ReportPage + ?Sized>(
    page: &P,
    band: &Rect,
    headers: &[String],
    repair: HeaderRepair,
    settings: &DetectorSettings,
) -> Result<ReconstructedTable, ExtractError> {
    let page_number = page.page_number();
    let raw = page
        .find_tables(band, settings)
        .into_iter()
        .next()
        .ok_or(ExtractError::TableNotFound { page: page_number })?;
    tracing::debug!(
        page = page_number,
        width = raw.width(),
        rows = raw.rows.len(),
        ?repair,
        "detected raw table"
    );
    reconstruct(page_number, raw, headers, repair)
}
