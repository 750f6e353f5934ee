//! tsdeviation - one analysis run over a `date,value` dataset
//!
//! Usage: `tsdeviation [CONFIG.toml]`. Without a config file the defaults
//! read `dataset.csv` from the working directory.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tsdeviation::charts::ChartPlotter;
#[cfg(feature = "render")]
use tsdeviation::charts::SvgRenderer;
use tsdeviation::config::AnalysisConfig;
use tsdeviation::data::{DataProcessor, ProcessOptions};
use tsdeviation::query;

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run() {
        log::error!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => AnalysisConfig::from_file(&path)
            .with_context(|| format!("failed to load config {path:?}"))?,
        None => AnalysisConfig::default(),
    };
    log::debug!("{config:#?}");

    let options = ProcessOptions {
        delimiter: config.delimiter_byte(),
    };
    let dataset = DataProcessor::get_processed(&config.dataset, &options)
        .with_context(|| format!("failed to process {:?}", config.dataset))?;
    log::info!("processed {} rows from {:?}", dataset.len(), config.dataset);

    println!("{dataset}\n");

    for field in &config.summary_fields {
        match query::summary(&dataset, field) {
            Some(summary) => println!("{field}\n{summary}\n"),
            None => println!("{field}: no such column\n"),
        }
    }

    let deviating = query::filter_by_deviation(&dataset, config.deviation_threshold);
    println!("StdDeviation >= {}\n{deviating}\n", config.deviation_threshold);

    let range = &config.date_range;
    let window = query::filter_by_date_range(&dataset, &range.start, &range.end)
        .context("invalid date range")?;
    println!("{} ..= {}\n{window}\n", range.start, range.end);

    println!("Month  Average");
    for (month, avg) in query::group_by_month_average(&dataset) {
        println!("{month:>5}  {avg:.6}");
    }

    if config.charts.enabled {
        export_charts(&config, &dataset)?;
    }

    Ok(())
}

#[cfg(feature = "render")]
fn export_charts(config: &AnalysisConfig, dataset: &tsdeviation::Dataset) -> Result<()> {
    if dataset.is_empty() {
        log::warn!("dataset is empty, no charts written");
        return Ok(());
    }

    let settings = &config.charts;
    std::fs::create_dir_all(&settings.output_dir)
        .with_context(|| format!("failed to create {:?}", settings.output_dir))?;
    let renderer = SvgRenderer::new(settings.width, settings.height);

    renderer
        .render_to_file(
            &ChartPlotter::full_period_chart(dataset),
            settings.output_dir.join("full_period.svg"),
        )
        .context("failed to render full period chart")?;

    for month in dataset.months() {
        let chart = ChartPlotter::month_chart(dataset, month);
        renderer
            .render_to_file(&chart, settings.output_dir.join(format!("month_{month:02}.svg")))
            .with_context(|| format!("failed to render chart for month {month}"))?;
    }

    Ok(())
}

#[cfg(not(feature = "render"))]
fn export_charts(_config: &AnalysisConfig, dataset: &tsdeviation::Dataset) -> Result<()> {
    let charts = 1 + ChartPlotter::monthly_charts(dataset).len();
    log::warn!("built without the `render` feature, skipping {charts} charts");
    Ok(())
}
