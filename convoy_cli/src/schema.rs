use std::path::PathBuf;

use tracing::info;

pub fn run(out: Option<PathBuf>) -> Result<(), anyhow::Error> {
    let schema = convoy_optimizer::json::schema::generate_json_schema()?;

    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&out, schema)?;
            info!("Schema written to {}", out.display());
        }
        None => println!("{schema}"),
    }

    Ok(())
}
