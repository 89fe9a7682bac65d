//! Rate Indication CLI
//!
//! Develops the paid and case incurred triangles, then prints the indicated
//! rate change for the configured selections

use anyhow::{Context, Result};
use clap::Parser;
use rate_indication::{
    triangle::load_triangles, IndicationConfig, IndicationEngine, LdfSummary, PortfolioIndication,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rate_indication")]
#[command(about = "Compute an indicated rate change from loss development triangles")]
struct Args {
    /// JSON config file (defaults apply for missing fields)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Triangle CSV, overrides the config's data_file
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Annual loss trend, e.g. 0.015
    #[arg(long)]
    trend: Option<f64>,

    /// Permissible loss ratio, e.g. 0.55
    #[arg(long)]
    permissible_loss_ratio: Option<f64>,

    /// First origin year blending paid and case incurred ultimates
    #[arg(long)]
    cutoff_year: Option<i32>,

    /// Emit the full report as JSON instead of text
    #[arg(long)]
    json: bool,
}

impl Args {
    fn into_config(self) -> Result<(IndicationConfig, bool)> {
        let mut config = match &self.config {
            Some(path) => IndicationConfig::from_json_path(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => IndicationConfig::default(),
        };

        if let Some(data) = self.data {
            config.data_file = data;
        }
        if let Some(trend) = self.trend {
            config.trend_factor = trend;
        }
        if let Some(plr) = self.permissible_loss_ratio {
            config.permissible_loss_ratio = plr;
        }
        if let Some(year) = self.cutoff_year {
            config.blend_cutoff_year = year;
        }

        Ok((config, self.json))
    }
}

fn print_ldfs(summary: &LdfSummary) {
    println!("{} development factors:", summary.measure);
    for factors in summary.factors() {
        println!("{:?}", factors);
    }
    println!("simple average {:?}", summary.simple_averages());
    println!("weighted average {:?}", summary.weighted_averages());
    println!();
}

fn print_indication(result: &PortfolioIndication) {
    println!(
        "{:>6} {:>12} {:>12} {:>8} {:>12} {:>12} {:>8} {:>12} {:>12} {:>8} {:>8}",
        "Origin", "EarnedPrem", "CurPaid", "PaidCDF", "PaidUlt", "CurCaseInc", "CaseCDF",
        "CaseIncUlt", "SelectedUlt", "Trend", "TrendLR"
    );
    println!("{}", "-".repeat(120));
    for row in &result.rows {
        println!(
            "{:>6} {:>12.0} {:>12.0} {:>8.3} {:>12.0} {:>12.0} {:>8.3} {:>12.0} {:>12.1} {:>8.3} {:>8.3}",
            row.origin,
            row.earned_premium,
            row.current_paid,
            row.paid_cdf,
            row.paid_ultimate,
            row.current_case_incurred,
            row.case_incurred_cdf,
            row.case_incurred_ultimate,
            row.selected_ultimate,
            row.net_trend,
            row.trended_ultimate_ratio,
        );
    }
    println!();
}

fn main() -> Result<()> {
    env_logger::init();

    let (config, json) = Args::parse().into_config()?;
    let triangles = load_triangles(&config.data_file, &config.layout())
        .with_context(|| format!("Failed to load triangles from {}", config.data_file.display()))?;

    let engine = IndicationEngine::new(config)?;
    let report = engine.run(&triangles).context("Indication run failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_ldfs(&report.paid_ldfs);
    print_ldfs(&report.case_incurred_ldfs);
    print_indication(&report.indication);

    println!(
        "selected trended ultimate ratio: {}",
        report.indication.total_trended_ultimate_ratio
    );
    println!("permissible loss ratio: {}", report.indication.permissible_loss_ratio);
    println!("indicated rate change need: {}", report.indication.indication);

    Ok(())
}
