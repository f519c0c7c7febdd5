use crate::model::{Rect, Word};
use crate::page::ReportPage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderMapping {
    phrases: &'static [&'static [&'static str]],
}

impl HeaderMapping {
    pub const EMPTY: Self = Self { phrases: &[] };

    #[must_use]
    pub const fn new(phrases: &'static [&'static [&'static str]]) -> Self {
        Self { phrases }
    }

    fn longest_match_at(&self, labels: &[String]) -> Option<&'static [&'static str]> {
        self.phrases
            .iter()
            .copied()
            .filter(|phrase| {
                phrase.len() > 1
                    && phrase.len() <= labels.len()
                    && phrase
                        .iter()
                        .zip(labels)
                        .all(|(fragment, label)| *fragment == label.as_str())
            })
            .max_by_key(|phrase| phrase.len())
    }

    #[must_use]
    pub fn apply(&self, labels: &[String]) -> Vec<String> {
        let mut out = Vec::with_capacity(labels.len());
        let mut index = 0;
        while index < labels.len() {
            if let Some(phrase) = self.longest_match_at(&labels[index..]) {
                out.push(phrase.join(" "));
                index += phrase.len();
            } else {
                out.push(labels[index].clone());
                index += 1;
            }
        }
        out
    }
}

// Stable sort: equal x positions keep extraction order.
pub(crate) fn order_header_words(mut words: Vec<Word>) -> Vec<String> {
    words.sort_by(|a, b| a.rect.x0.total_cmp(&b.rect.x0));
    words.into_iter().map(|word| word.text.to_lowercase()).collect()
}

pub fn recover_headers<P: ReportPage + ?Sized>(page: &P, band: &Rect) -> Vec<String> {
    let headers = order_header_words(page.words(band));
    tracing::debug!(page = page.page_number(), ?headers, "recovered header fragments");
    headers
}
