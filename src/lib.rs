mod aggregate;
mod anchor;
mod clean;
mod csv_out;
mod error;
mod header;
mod model;
mod options;
mod page;
mod pdf_reader;
mod repair;
mod report;
mod table_detect;
mod wins;

use std::path::Path;

pub use aggregate::{parse_pages, parse_pit_stop_page, parse_standings_page};
pub use anchor::{Bands, find_anchor, locate_bands};
pub use clean::{clean_row, collapse_line_breaks};
pub use csv_out::{write_csv, write_csv_to_string, write_json_to_string};
pub use error::ExtractError;
pub use header::{HeaderMapping, recover_headers};
pub use model::{
    PitStopRow, RawTable, ReconstructedTable, Rect, ReportTable, StandingRow, Word,
};
pub use options::{DetectorSettings, ExtractOptions, PageSelection};
pub use page::ReportPage;
pub use pdf_reader::{LayoutPage, load_document, load_document_from_bytes};
pub use repair::{HeaderRepair, POSITION_COLUMN, detect_and_reconstruct, reconstruct};
pub use report::{FOOTER_LABEL, ReportKind, ReportLayout};
pub use wins::{WIN_MARKERS, count_wins};

/// Failures carry the input path; no partial table is returned.
pub fn parse_report(
    input_pdf: &Path,
    kind: ReportKind,
    options: &ExtractOptions,
) -> Result<ReportTable, ExtractError> {
    load_document(input_pdf, options.pages.as_ref())
        .and_then(|pages| parse_pages(&pages, kind, options))
        .map_err(|error| error.in_file(input_pdf))
}

pub fn parse_report_bytes(
    input_pdf: &[u8],
    kind: ReportKind,
    options: &ExtractOptions,
) -> Result<ReportTable, ExtractError> {
    let pages = load_document_from_bytes(input_pdf, options.pages.as_ref())?;
    parse_pages(&pages, kind, options)
}

pub fn parse_driver_championship(input_pdf: &Path) -> Result<ReportTable, ExtractError> {
    parse_report(
        input_pdf,
        ReportKind::DriverChampionship,
        &ExtractOptions::default(),
    )
}

pub fn parse_constructor_championship(input_pdf: &Path) -> Result<ReportTable, ExtractError> {
    parse_report(
        input_pdf,
        ReportKind::ConstructorChampionship,
        &ExtractOptions::default(),
    )
}

pub fn parse_race_pit_stops(input_pdf: &Path) -> Result<ReportTable, ExtractError> {
    parse_report(input_pdf, ReportKind::PitStops, &ExtractOptions::default())
}
