use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use pdf_extract::{Document, MediaBox, OutputDev, OutputError, Transform, output_doc_page};

use crate::error::ExtractError;
use crate::model::{RawTable, Rect, Word};
use crate::options::{DetectorSettings, PageSelection};
use crate::page::ReportPage;
use crate::table_detect::{detect_tables, group_lines};

const ASCENT: f32 = 0.8;
const DESCENT: f32 = 0.2;
const SEARCH_LINE_TOLERANCE: f32 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPage {
    number: u32,
    bound: Rect,
    words: Vec<Word>,
}

impl LayoutPage {
    #[must_use]
    pub fn new(number: u32, bound: Rect, words: Vec<Word>) -> Self {
        Self {
            number,
            bound,
            words,
        }
    }
}

impl ReportPage for LayoutPage {
    fn page_number(&self) -> u32 {
        self.number
    }

    fn bound(&self) -> Rect {
        self.bound
    }

    fn search_for(&self, label: &str) -> Vec<Rect> {
        if label.is_empty() {
            return Vec::new();
        }

        let mut hits = Vec::new();
        for line in group_lines(&self.words, SEARCH_LINE_TOLERANCE) {
            let mut text = String::new();
            let mut spans = Vec::with_capacity(line.len());
            for word in &line {
                if !text.is_empty() {
                    text.push(' ');
                }
                let start = text.len();
                text.push_str(&word.text);
                spans.push((start, text.len(), word.rect));
            }

            for (start, matched) in text.match_indices(label) {
                let end = start + matched.len();
                let covered = spans
                    .iter()
                    .filter(|(word_start, word_end, _)| *word_start < end && start < *word_end)
                    .map(|(_, _, rect)| *rect)
                    .reduce(|acc, rect| acc.union(&rect));
                if let Some(rect) = covered {
                    hits.push(rect);
                }
            }
        }
        hits
    }

    fn words(&self, clip: &Rect) -> Vec<Word> {
        self.words
            .iter()
            .filter(|word| word.rect.intersects(clip))
            .cloned()
            .collect()
    }

    fn find_tables(&self, clip: &Rect, settings: &DetectorSettings) -> Vec<RawTable> {
        detect_tables(&self.words, clip, settings)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Glyph {
    text: String,
    x0: f32,
    x1: f32,
    baseline: f32,
    size: f32,
}

#[allow(clippy::cast_possible_truncation)]
fn to_f32(value: f64) -> f32 {
    value as f32
}

/// Collects rendered glyphs in top-left page coordinates.
#[derive(Debug)]
struct GlyphCollector {
    left: f64,
    top: f64,
    bound: Rect,
    glyphs: Vec<Glyph>,
}

impl GlyphCollector {
    fn new() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            bound: Rect::new(0.0, 0.0, 0.0, 0.0),
            glyphs: Vec::new(),
        }
    }
}

impl OutputDev for GlyphCollector {
    fn begin_page(
        &mut self,
        _page_num: u32,
        media_box: &MediaBox,
        _art_box: Option<(f64, f64, f64, f64)>,
    ) -> Result<(), OutputError> {
        self.left = media_box.llx;
        self.top = media_box.ury;
        self.bound = Rect::new(
            0.0,
            0.0,
            to_f32(media_box.urx - media_box.llx),
            to_f32(media_box.ury - media_box.lly),
        );
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn output_character(
        &mut self,
        trm: &Transform,
        width: f64,
        _spacing: f64,
        font_size: f64,
        text: &str,
    ) -> Result<(), OutputError> {
        let x0 = trm.m31 - self.left;
        // Widths are in text space; trm carries Tz, Tm and the CTM.
        let advance = width * font_size * trm.m11;
        self.glyphs.push(Glyph {
            text: text.to_string(),
            x0: to_f32(x0),
            x1: to_f32(x0 + advance),
            baseline: to_f32(self.top - trm.m32),
            size: to_f32(font_size * trm.m21.hypot(trm.m22)),
        });
        Ok(())
    }

    fn begin_word(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn end_word(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn end_line(&mut self) -> Result<(), OutputError> {
        Ok(())
    }
}

fn render_page(document: &Document, page_no: u32) -> Result<GlyphCollector, ExtractError> {
    let mut collector = GlyphCollector::new();
    // pdf-extract panics on some malformed pages (missing MediaBox, bad operands).
    panic::catch_unwind(AssertUnwindSafe(|| {
        output_doc_page(document, &mut collector, page_no)
    }))
    .map_err(|_| {
        tracing::warn!(page = page_no, "PDF renderer panicked");
        ExtractError::PdfRender { page: page_no }
    })??;
    Ok(collector)
}

// Breaks on whitespace, a baseline change, or a gap wider than a quarter em.
fn glyphs_to_words(glyphs: &[Glyph]) -> Vec<Word> {
    struct Pending {
        text: String,
        x0: f32,
        x1: f32,
        baseline: f32,
        size: f32,
    }

    fn flush(pending: &mut Option<Pending>, words: &mut Vec<Word>) {
        if let Some(word) = pending.take() {
            words.push(Word {
                rect: Rect::new(
                    word.x0,
                    word.baseline - word.size * ASCENT,
                    word.x1,
                    word.baseline + word.size * DESCENT,
                ),
                text: word.text,
            });
        }
    }

    let mut words = Vec::new();
    let mut pending: Option<Pending> = None;
    for glyph in glyphs {
        if glyph.text.trim().is_empty() {
            flush(&mut pending, &mut words);
            continue;
        }

        let breaks = pending.as_ref().is_some_and(|word| {
            let tolerance = word.size.max(glyph.size);
            (glyph.baseline - word.baseline).abs() > tolerance * 0.5
                || glyph.x0 - word.x1 > tolerance * 0.25
                || glyph.x0 < word.x1 - tolerance * 0.5
        });
        if breaks {
            flush(&mut pending, &mut words);
        }

        match pending.as_mut() {
            Some(word) => {
                word.text.push_str(&glyph.text);
                word.x1 = word.x1.max(glyph.x1);
                word.size = word.size.max(glyph.size);
            }
            None => {
                pending = Some(Pending {
                    text: glyph.text.clone(),
                    x0: glyph.x0,
                    x1: glyph.x1,
                    baseline: glyph.baseline,
                    size: glyph.size,
                });
            }
        }
    }
    flush(&mut pending, &mut words);
    words
}

fn layout_pages(
    document: &Document,
    page_selection: Option<&PageSelection>,
) -> Result<Vec<LayoutPage>, ExtractError> {
    let mut pages = Vec::new();
    for page_no in document.get_pages().into_keys() {
        if let Some(selection) = page_selection
            && !selection.contains(page_no)
        {
            continue;
        }

        let collector = render_page(document, page_no)?;
        let words = glyphs_to_words(&collector.glyphs);
        tracing::debug!(page = page_no, words = words.len(), "extracted page words");
        pages.push(LayoutPage::new(page_no, collector.bound, words));
    }

    if pages.is_empty() {
        return Err(ExtractError::NoPagesSelected);
    }
    Ok(pages)
}

pub fn load_document(
    input_pdf: &Path,
    page_selection: Option<&PageSelection>,
) -> Result<Vec<LayoutPage>, ExtractError> {
    let document = Document::load(input_pdf).map_err(OutputError::from)?;
    layout_pages(&document, page_selection)
}

pub fn load_document_from_bytes(
    input_pdf: &[u8],
    page_selection: Option<&PageSelection>,
) -> Result<Vec<LayoutPage>, ExtractError> {
    let document = Document::load_mem(input_pdf).map_err(OutputError::from)?;
    layout_pages(&document, page_selection)
}
