use crate::error::ExtractError;
use crate::model::Rect;
use crate::page::ReportPage;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bands {
    pub header: Rect,
    pub table: Rect,
}

pub fn find_anchor<P: ReportPage + ?Sized>(page: &P, label: &str) -> Result<Rect, ExtractError> {
    page.search_for(label)
        .into_iter()
        .next()
        .ok_or_else(|| ExtractError::AnchorNotFound {
            page: page.page_number(),
            label: label.to_string(),
        })
}

pub fn locate_bands<P: ReportPage + ?Sized>(
    page: &P,
    header_label: &str,
    footer_label: Option<&str>,
) -> Result<Bands, ExtractError> {
    let bound = page.bound();
    let width = bound.x1;
    let label = find_anchor(page, header_label)?;

    let bottom = match footer_label {
        Some(footer_label) => {
            // A footer hit above the header row cannot bound the table.
            let footer = page
                .search_for(footer_label)
                .into_iter()
                .find(|footer| footer.y0 > label.y1)
                .ok_or_else(|| ExtractError::AnchorNotFound {
                    page: page.page_number(),
                    label: footer_label.to_string(),
                })?;
            footer.y0
        }
        None => bound.y1,
    };

    let bands = Bands {
        header: Rect::new(0.0, label.y0, width, label.y1),
        table: Rect::new(0.0, label.y0, width, bottom),
    };
    tracing::debug!(
        page = page.page_number(),
        header_top = bands.header.y0,
        header_bottom = bands.header.y1,
        table_bottom = bands.table.y1,
        "located table bands"
    );
    Ok(bands)
}
