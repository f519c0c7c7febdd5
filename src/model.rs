use serde::Serialize;

use crate::report::ReportKind;

/// Page-space box, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    #[must_use]
    pub const fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    #[must_use]
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    #[must_use]
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    // Shared edges are not an overlap.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x0 < other.x1 && other.x0 < self.x1 && self.y0 < other.y1 && other.y0 < self.y1
    }

    #[must_use]
    pub fn contains_center_of(&self, other: &Rect) -> bool {
        let cx = (other.x0 + other.x1) / 2.0;
        let cy = (other.y0 + other.y1) / 2.0;
        cx >= self.x0 && cx <= self.x1 && cy >= self.y0 && cy <= self.y1
    }

    #[must_use]
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub rect: Rect,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    #[must_use]
    pub fn width(&self) -> usize {
        self.header.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconstructedTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ReconstructedTable {
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandingRow {
    pub position: String,
    pub name: String,
    pub total: String,
    pub wins: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PitStopRow {
    pub driver_no: String,
    pub lap: String,
    pub local_time: String,
    pub no: String,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportTable {
    Standings {
        kind: ReportKind,
        rows: Vec<StandingRow>,
    },
    PitStops {
        rows: Vec<PitStopRow>,
    },
}

impl ReportTable {
    #[must_use]
    pub fn kind(&self) -> ReportKind {
        match self {
            Self::Standings { kind, .. } => *kind,
            Self::PitStops { .. } => ReportKind::PitStops,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Standings { rows, .. } => rows.len(),
            Self::PitStops { rows } => rows.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn headers(&self) -> Vec<&'static str> {
        self.kind().layout().output_columns.to_vec()
    }

    #[must_use]
    pub fn records(&self) -> Vec<Vec<String>> {
        match self {
            Self::Standings { rows, .. } => rows
                .iter()
                .map(|row| {
                    vec![
                        row.position.clone(),
                        row.name.clone(),
                        row.total.clone(),
                        row.wins.to_string(),
                    ]
                })
                .collect(),
            Self::PitStops { rows } => rows
                .iter()
                .map(|row| {
                    vec![
                        row.driver_no.clone(),
                        row.lap.clone(),
                        row.local_time.clone(),
                        row.no.clone(),
                        row.duration.clone(),
                    ]
                })
                .collect(),
        }
    }
}
