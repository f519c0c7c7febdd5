use std::collections::BTreeSet;
use std::str::FromStr;

use crate::repair::HeaderRepair;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelection {
    pages: BTreeSet<u32>,
}

impl PageSelection {
    #[must_use]
    pub fn contains(&self, page: u32) -> bool {
        self.pages.contains(&page)
    }
}

impl FromStr for PageSelection {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut pages = BTreeSet::new();
        for token in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            if let Some((start, end)) = token.split_once('-') {
                let start: u32 = start
                    .trim()
                    .parse()
                    .map_err(|_| format!("invalid page range start: '{start}'"))?;
                let end: u32 = end
                    .trim()
                    .parse()
                    .map_err(|_| format!("invalid page range end: '{end}'"))?;
                if start == 0 || end == 0 {
                    return Err("pages are 1-based".to_string());
                }
                if end < start {
                    return Err(format!(
                        "invalid range '{token}': end is smaller than start"
                    ));
                }
                pages.extend(start..=end);
            } else {
                let page: u32 = token
                    .parse()
                    .map_err(|_| format!("invalid page number: '{token}'"))?;
                if page == 0 {
                    return Err("pages are 1-based".to_string());
                }
                pages.insert(page);
            }
        }

        if pages.is_empty() {
            return Err("page selection cannot be empty".to_string());
        }

        Ok(Self { pages })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorSettings {
    pub line_tolerance: f32,
    pub column_gap: f32,
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            line_tolerance: 2.0,
            column_gap: 6.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtractOptions {
    pub pages: Option<PageSelection>,
    pub detector: DetectorSettings,
    pub header_repair: Option<HeaderRepair>,
}
