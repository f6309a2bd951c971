use std::str::FromStr;

use fxhash::FxHashMap;

use crate::{
    error::ValidationError,
    input::records::{LocationRecord, VehicleRecord},
    problem::time_of_day::TimeOfDay,
};

pub const LOCATIONS_TABLE: &str = "locations";
pub const VEHICLES_TABLE: &str = "vehicles";

pub const LOCATION_COLUMNS: [&str; 6] = [
    "name",
    "address",
    "demand",
    "open",
    "close",
    "service_minutes",
];

pub const VEHICLE_COLUMNS: [&str; 3] = ["id", "capacity", "loading_minutes"];

/// Header plus string cells, the shape any spreadsheet-like source can produce.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

struct ColumnLookup<'a> {
    table: &'static str,
    positions: FxHashMap<&'a str, usize>,
}

impl<'a> ColumnLookup<'a> {
    fn new(
        table: &'static str,
        headers: &'a [String],
        required: &[&'static str],
    ) -> Result<Self, ValidationError> {
        let positions: FxHashMap<&str, usize> = headers
            .iter()
            .enumerate()
            .map(|(position, header)| (header.trim(), position))
            .collect();

        let missing: Vec<String> = required
            .iter()
            .filter(|column| !positions.contains_key(*column))
            .map(|column| column.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(ValidationError::MissingColumns {
                table,
                columns: missing,
            });
        }

        Ok(ColumnLookup { table, positions })
    }

    fn cell<'r>(&self, row: &'r [String], column: &'static str) -> &'r str {
        self.positions
            .get(column)
            .and_then(|&position| row.get(position))
            .map(|value| value.trim())
            .unwrap_or("")
    }

    fn parse<T>(&self, row_index: usize, row: &[String], column: &'static str) -> Result<T, ValidationError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let value = self.cell(row, column);
        value.parse::<T>().map_err(|err| ValidationError::InvalidValue {
            table: self.table,
            row: row_index,
            column,
            value: value.to_owned(),
            reason: err.to_string(),
        })
    }

    fn text(&self, row_index: usize, row: &[String], column: &'static str) -> Result<String, ValidationError> {
        let value = self.cell(row, column);
        if value.is_empty() {
            return Err(ValidationError::InvalidValue {
                table: self.table,
                row: row_index,
                column,
                value: String::new(),
                reason: "value is required".to_owned(),
            });
        }
        Ok(value.to_owned())
    }
}

fn is_blank(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

/// Reads the locations sheet. Rows are numbered from 0 (the depot), blank rows are skipped.
pub fn location_records(table: &Table) -> Result<Vec<LocationRecord>, ValidationError> {
    let columns = ColumnLookup::new(LOCATIONS_TABLE, &table.headers, &LOCATION_COLUMNS)?;

    table
        .rows
        .iter()
        .filter(|row| !is_blank(row))
        .enumerate()
        .map(|(index, row)| {
            Ok(LocationRecord {
                name: columns.text(index, row, "name")?,
                address: columns.text(index, row, "address")?,
                demand: columns.parse(index, row, "demand")?,
                open: columns.parse::<TimeOfDay>(index, row, "open")?,
                close: columns.parse::<TimeOfDay>(index, row, "close")?,
                service_minutes: columns.parse(index, row, "service_minutes")?,
            })
        })
        .collect()
}

pub fn vehicle_records(table: &Table) -> Result<Vec<VehicleRecord>, ValidationError> {
    let columns = ColumnLookup::new(VEHICLES_TABLE, &table.headers, &VEHICLE_COLUMNS)?;

    table
        .rows
        .iter()
        .filter(|row| !is_blank(row))
        .enumerate()
        .map(|(index, row)| {
            Ok(VehicleRecord {
                id: columns.text(index, row, "id")?,
                capacity: columns.parse(index, row, "capacity")?,
                loading_minutes: columns.parse(index, row, "loading_minutes")?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
        Table {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn test_location_records() {
        let table = table(
            &["name", "address", "demand", "open", "close", "service_minutes", "notes"],
            &[
                &["Depot", "-33.45,-70.66", "0", "00:00", "24:00", "0", ""],
                &["Store A", "Av. Central 100", "12", "08:00", "11:30", "15", "back door"],
                &["", "", "", "", "", "", ""],
            ],
        );

        let records = location_records(&table).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name, "Store A");
        assert_eq!(records[1].demand, 12);
        assert_eq!(records[1].open.minutes(), 480);
        assert_eq!(records[1].close.minutes(), 690);
        assert_eq!(records[1].service_minutes, 15);
    }

    #[test]
    fn test_missing_columns_are_reported_together() {
        let table = table(&["name", "demand", "open"], &[]);

        assert_eq!(
            location_records(&table).unwrap_err(),
            ValidationError::MissingColumns {
                table: LOCATIONS_TABLE,
                columns: vec![
                    "address".to_owned(),
                    "close".to_owned(),
                    "service_minutes".to_owned()
                ],
            }
        );
    }

    #[test]
    fn test_invalid_cell_names_row_and_column() {
        let table = table(
            &["id", "capacity", "loading_minutes"],
            &[&["T1", "100", "20"], &["T2", "lots", "15"]],
        );

        match vehicle_records(&table).unwrap_err() {
            ValidationError::InvalidValue {
                table, row, column, value, ..
            } => {
                assert_eq!(table, VEHICLES_TABLE);
                assert_eq!(row, 1);
                assert_eq!(column, "capacity");
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_invalid_time_of_day() {
        let table = table(
            &LOCATION_COLUMNS,
            &[&["Depot", "x", "0", "7h30", "24:00", "0"]],
        );

        assert!(matches!(
            location_records(&table).unwrap_err(),
            ValidationError::InvalidValue { column: "open", .. }
        ));
    }
}
