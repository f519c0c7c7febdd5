use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use serde_json::{Map, Value};

use crate::error::ExtractError;
use crate::model::ReportTable;

fn write_records<W: Write>(
    writer: &mut csv::Writer<W>,
    table: &ReportTable,
) -> Result<(), ExtractError> {
    writer.write_record(table.headers())?;
    for row in table.records() {
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_csv(path: &Path, table: &ReportTable, delimiter: u8) -> Result<(), ExtractError> {
    let mut writer = WriterBuilder::new().delimiter(delimiter).from_path(path)?;
    write_records(&mut writer, table)
}

pub fn write_csv_to_string(table: &ReportTable, delimiter: u8) -> Result<String, ExtractError> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::<u8>::new());
    write_records(&mut writer, table)?;

    let bytes = writer
        .into_inner()
        .map_err(|error| ExtractError::Csv(error.into_error().into()))?;
    String::from_utf8(bytes)
        .map_err(|error| ExtractError::InvalidOption(format!("invalid utf-8 csv output: {error}")))
}

fn to_json_value(table: &ReportTable) -> Result<Value, serde_json::Error> {
    let headers = table.headers();
    let records = match table {
        ReportTable::Standings { rows, .. } => rows
            .iter()
            .map(|row| {
                let mut record = Map::new();
                record.insert(headers[0].to_string(), Value::from(row.position.as_str()));
                record.insert(headers[1].to_string(), Value::from(row.name.as_str()));
                record.insert(headers[2].to_string(), Value::from(row.total.as_str()));
                record.insert(headers[3].to_string(), Value::from(row.wins));
                Value::Object(record)
            })
            .collect(),
        ReportTable::PitStops { rows } => rows
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?,
    };
    Ok(Value::Array(records))
}

pub fn write_json_to_string(table: &ReportTable) -> Result<String, ExtractError> {
    Ok(serde_json::to_string_pretty(&to_json_value(table)?)?)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{write_csv, write_csv_to_string, write_json_to_string};
    use crate::model::{PitStopRow, ReportTable, StandingRow};
    use crate::report::ReportKind;

    fn constructors() -> ReportTable {
        ReportTable::Standings {
            kind: ReportKind::ConstructorChampionship,
            rows: vec![StandingRow {
                position: "1".to_string(),
                name: "Team Alpha".to_string(),
                total: "18".to_string(),
                wins: 1,
            }],
        }
    }

    #[test]
    fn writes_report_specific_header() {
        let csv = write_csv_to_string(&constructors(), b',').expect("csv should render");
        assert_eq!(csv, "pos,entrant,total,wins\n1,Team Alpha,18,1\n");
    }

    #[test]
    fn honours_delimiter_and_writes_files() {
        let table = ReportTable::PitStops {
            rows: vec![PitStopRow {
                driver_no: "44".to_string(),
                lap: "20".to_string(),
                local_time: "15:01:02".to_string(),
                no: "1".to_string(),
                duration: "21.9".to_string(),
            }],
        };
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = dir.path().join("stops.csv");
        write_csv(&path, &table, b';').expect("csv should be written");

        let csv = std::fs::read_to_string(&path).expect("CSV should be readable");
        assert_eq!(
            csv,
            "driver_no;lap;local_time;no;duration\n44;20;15:01:02;1;21.9\n"
        );
    }

    #[test]
    fn json_keeps_wins_numeric() {
        let json = write_json_to_string(&constructors()).expect("json should render");
        let value: serde_json::Value = serde_json::from_str(&json).expect("json should parse");
        assert_eq!(value[0]["pos"], "1");
        assert_eq!(value[0]["entrant"], "Team Alpha");
        assert_eq!(value[0]["wins"], 1);
    }

    #[test]
    fn json_keys_follow_report_columns() {
        let table = ReportTable::Standings {
            kind: ReportKind::DriverChampionship,
            rows: vec![StandingRow {
                position: "2".to_string(),
                name: "Driver Two".to_string(),
                total: "36".to_string(),
                wins: 0,
            }],
        };
        let json = write_json_to_string(&table).expect("json should render");
        let value: serde_json::Value = serde_json::from_str(&json).expect("json should parse");

        let mut keys = value[0]
            .as_object()
            .map(|record| record.keys().cloned().collect::<Vec<_>>())
            .unwrap_or_default();
        keys.sort();
        assert_eq!(keys, vec!["driver", "pos", "total", "wins"]);
        assert_eq!(value[0]["driver"], "Driver Two");
    }
}
