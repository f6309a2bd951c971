use std::{io::Read, path::Path};

use convoy_optimizer::{input::tabular::Table, plan::route_plan::RoutePlan};
use tracing::{info, warn};

pub fn read_table<R: Read>(reader: R) -> Result<Table, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.iter().map(str::to_owned).collect();
    let rows = reader
        .records()
        .map(|record| record.map(|record| record.iter().map(str::to_owned).collect()))
        .collect::<Result<_, _>>()?;

    Ok(Table { headers, rows })
}

pub fn read_table_file(path: &Path) -> Result<Table, anyhow::Error> {
    let file = std::fs::File::open(path)
        .map_err(|err| anyhow::anyhow!("Cannot open {}: {err}", path.display()))?;
    Ok(read_table(file)?)
}

/// Header first, one line per visit, a line of empty cells between vehicles.
pub fn write_plan<W: std::io::Write>(writer: W, plan: &RoutePlan) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in plan.rows() {
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Returns false without touching `path` when the plan has no route.
pub fn export_plan(path: &Path, plan: &RoutePlan) -> Result<bool, anyhow::Error> {
    if !plan.has_routes() {
        warn!("No routes to export, {} left untouched", path.display());
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    write_plan(std::fs::File::create(path)?, plan)?;
    info!("Plan exported to {}", path.display());
    Ok(true)
}
