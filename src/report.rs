use std::fmt;
use std::str::FromStr;

use crate::header::HeaderMapping;
use crate::repair::HeaderRepair;

pub const FOOTER_LABEL: &str = "Formula One World Championship Limited";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    DriverChampionship,
    ConstructorChampionship,
    PitStops,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLayout {
    pub header_label: &'static str,
    pub footer_label: Option<&'static str>,
    pub header_mapping: HeaderMapping,
    pub repair: HeaderRepair,
    pub name_column: Option<&'static str>,
    pub required_columns: &'static [&'static str],
    pub output_columns: &'static [&'static str],
}

const DRIVER_LAYOUT: ReportLayout = ReportLayout {
    header_label: "DRIVER",
    footer_label: Some(FOOTER_LABEL),
    header_mapping: HeaderMapping::EMPTY,
    repair: HeaderRepair::PromoteHeaderRow,
    name_column: Some("driver"),
    required_columns: &["driver", "total"],
    output_columns: &["pos", "driver", "total", "wins"],
};

const CONSTRUCTOR_LAYOUT: ReportLayout = ReportLayout {
    header_label: "ENTRANT",
    footer_label: Some(FOOTER_LABEL),
    header_mapping: HeaderMapping::EMPTY,
    repair: HeaderRepair::PromoteHeaderRow,
    name_column: Some("entrant"),
    required_columns: &["entrant", "total"],
    output_columns: &["pos", "entrant", "total", "wins"],
};

const PIT_STOP_LAYOUT: ReportLayout = ReportLayout {
    header_label: "DRIVER",
    footer_label: None,
    header_mapping: HeaderMapping::new(&[&["time", "of", "day"], &["total", "time"]]),
    repair: HeaderRepair::StripIndexPrefix,
    name_column: None,
    required_columns: &["no", "lap", "time of day", "stop", "duration"],
    output_columns: &["driver_no", "lap", "local_time", "no", "duration"],
};

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [
        Self::DriverChampionship,
        Self::ConstructorChampionship,
        Self::PitStops,
    ];

    #[must_use]
    pub const fn layout(self) -> &'static ReportLayout {
        match self {
            Self::DriverChampionship => &DRIVER_LAYOUT,
            Self::ConstructorChampionship => &CONSTRUCTOR_LAYOUT,
            Self::PitStops => &PIT_STOP_LAYOUT,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DriverChampionship => "driver",
            Self::ConstructorChampionship => "constructor",
            Self::PitStops => "pit-stops",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "driver" | "drivers" | "driver-championship" => Ok(Self::DriverChampionship),
            "constructor" | "constructors" | "constructor-championship" => {
                Ok(Self::ConstructorChampionship)
            }
            "pit-stops" | "pitstops" | "pit-stop" | "pit_stops" => Ok(Self::PitStops),
            other => Err(format!(
                "unknown report kind '{other}', expected one of: driver, constructor, pit-stops"
            )),
        }
    }
}
