use crate::model::{RawTable, Rect, Word};
use crate::options::DetectorSettings;

pub trait ReportPage {
    fn page_number(&self) -> u32;

    fn bound(&self) -> Rect;

    fn search_for(&self, label: &str) -> Vec<Rect>;

    fn words(&self, clip: &Rect) -> Vec<Word>;

    fn find_tables(&self, clip: &Rect, settings: &DetectorSettings) -> Vec<RawTable>;
}
