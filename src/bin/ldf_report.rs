//! Write development factor candidates for one measure as CSV
//!
//! One line per age-to-age transition with the simple and weighted averages
//! followed by the per-origin factors, as input for choosing the selections.

use anyhow::{Context, Result};
use clap::Parser;
use rate_indication::{
    development::calculate_ldfs, triangle::load_triangles, IndicationConfig, MeasureType,
};
use std::fs::File;
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ldf_report")]
#[command(about = "Write simple and weighted LDF candidates for a triangle measure")]
struct Args {
    /// Measure to develop (paid, case_incurred, ...)
    #[arg(short, long, default_value = "paid")]
    measure: String,

    /// JSON config file (defaults apply for missing fields)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Triangle CSV, overrides the config's data_file
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Output CSV path (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => IndicationConfig::from_json_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => IndicationConfig::default(),
    };
    if let Some(data) = args.data {
        config.data_file = data;
    }

    let measure: MeasureType = args.measure.parse()?;
    let triangles = load_triangles(&config.data_file, &config.layout())
        .with_context(|| format!("Failed to load triangles from {}", config.data_file.display()))?;
    let triangle = triangles.get(&measure)?;
    let summary = calculate_ldfs(triangle, config.first_age, config.age_length)?;

    let sink: Box<dyn io::Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(sink);

    let mut header = vec![
        "transition".to_string(),
        "simple_average".to_string(),
        "weighted_average".to_string(),
    ];
    header.extend(triangle.origins().iter().map(|o| o.to_string()));
    writer.write_record(&header)?;

    for (label, transition) in summary.labels().into_iter().zip(&summary.transitions) {
        let mut record = vec![
            label,
            transition.simple_average.to_string(),
            transition.weighted_average.to_string(),
        ];
        record.extend(transition.factors.iter().map(|f| f.to_string()));
        writer.write_record(&record)?;
    }
    writer.flush()?;

    if let Some(path) = &args.output {
        eprintln!(
            "Wrote {} transitions for {} to {}",
            summary.transitions.len(),
            measure,
            path.display()
        );
    }

    Ok(())
}
