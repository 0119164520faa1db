//! Windowed classified series export (CSV/Parquet).

use anyhow::{Context, Result};
use polars::prelude::{Column, DataFrame, NamedFrom, ParquetWriter, Series};
use std::fs::File;
use std::path::Path;

use decisionboard_core::classify::ClassifiedRow;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn timestamp_text(row: &ClassifiedRow) -> Option<String> {
    row.timestamp
        .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
}

pub fn write_series_csv(path: &Path, series: &[ClassifiedRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create series CSV {}", path.display()))?;
    writer.write_record(["timestamp", "hold", "buy", "sell", "price"])?;

    let cell = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();
    for row in series {
        writer.write_record([
            timestamp_text(row).unwrap_or_default(),
            cell(row.hold),
            cell(row.buy),
            cell(row.sell),
            row.price.to_string(),
        ])?;
    }
    writer.flush().context("Failed to flush series CSV")?;
    Ok(())
}

pub fn write_series_parquet(path: &Path, series: &[ClassifiedRow]) -> Result<()> {
    let timestamps: Vec<Option<String>> = series.iter().map(timestamp_text).collect();
    let hold: Vec<Option<f64>> = series.iter().map(|r| r.hold).collect();
    let buy: Vec<Option<f64>> = series.iter().map(|r| r.buy).collect();
    let sell: Vec<Option<f64>> = series.iter().map(|r| r.sell).collect();
    let price: Vec<f64> = series.iter().map(|r| r.price).collect();

    let mut df = DataFrame::new(vec![
        Column::Series(Series::new("timestamp".into(), timestamps).into()),
        Column::Series(Series::new("hold".into(), hold).into()),
        Column::Series(Series::new("buy".into(), buy).into()),
        Column::Series(Series::new("sell".into(), sell).into()),
        Column::Series(Series::new("price".into(), price).into()),
    ])
    .context("Failed to build series dataframe")?;

    let mut file = File::create(path)
        .with_context(|| format!("Failed to create series parquet {}", path.display()))?;
    ParquetWriter::new(&mut file)
        .finish(&mut df)
        .context("Failed to write series parquet")?;
    Ok(())
}
