// SPDX-FileCopyrightText: 2026 Orrery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Aggregate views: `stats`, `methods`, `timeline`, and `discovery`.

use orrery_client::CatalogueClient;
use orrery_core::fields::field_label;
use orrery_core::summary::{browse_method_counts, first_observation_year, method_label, MethodSort};
use orrery_core::types::{DiscoveryChart, DiscoveryDataset, PlanetStats, StatBlock};
use orrery_core::{DiscoveryQuery, OrreryError, TimelineQuery};
use serde::Serialize;

use crate::output::{number, opt, Output};

pub async fn run_stats(
    client: &CatalogueClient,
    method: Option<&str>,
    out: Output,
) -> Result<(), OrreryError> {
    match method {
        Some(method) => {
            let stats = client.method_stats(method).await?;
            if out.json {
                return out.print_json(&stats);
            }
            out.heading(&format!("Statistics for {}", stats.disc_method));
            print_stats(&stats.stats);
        }
        None => {
            let (count, stats) = tokio::try_join!(client.planet_count(), client.planet_stats())?;
            if out.json {
                return out.print_json(&serde_json::json!({ "count": count.count, "stats": stats }));
            }
            out.heading(&format!("Catalogue statistics ({} planets)", count.count));
            print_stats(&stats);
        }
    }
    Ok(())
}

fn print_stats(stats: &PlanetStats) {
    let with_median = stats
        .blocks()
        .iter()
        .any(|(_, b)| b.is_some_and(|b| b.median.is_some()));
    if with_median {
        println!(
            "    {:<36} {:>10} {:>10} {:>10} {:>10}",
            "field", "min", "max", "avg", "median"
        );
    } else {
        println!("    {:<36} {:>10} {:>10} {:>10}", "field", "min", "max", "avg");
    }
    for (key, block) in stats.blocks() {
        let block: StatBlock = block.unwrap_or_default();
        let mut line = format!(
            "    {:<36} {:>10} {:>10} {:>10}",
            field_label(key),
            number(block.min),
            number(block.max),
            number(block.avg)
        );
        if with_median {
            line.push_str(&format!(" {:>10}", number(block.median)));
        }
        println!("{line}");
    }
    println!();
}

pub async fn run_methods(
    client: &CatalogueClient,
    filter: &str,
    sort: MethodSort,
    out: Output,
) -> Result<(), OrreryError> {
    let counts = client.method_counts().await?;
    let rows = browse_method_counts(&counts, filter, sort);
    if out.json {
        return out.print_json(&rows);
    }
    out.heading("Discovery methods");
    if rows.is_empty() {
        println!("    {}", out.dim("No methods match."));
    }
    for row in &rows {
        println!("    {:<32} {:>8}", method_label(row), row.count);
    }
    println!();
    Ok(())
}

#[derive(Debug, Serialize)]
struct TimelineReport<'a> {
    first_observation_year: Option<i32>,
    points: &'a [orrery_core::types::TimelinePoint],
}

pub async fn run_timeline(
    client: &CatalogueClient,
    query: &TimelineQuery,
    out: Output,
) -> Result<(), OrreryError> {
    let points = client.timeline(query).await?;
    let first = first_observation_year(&points);
    if out.json {
        return out.print_json(&TimelineReport {
            first_observation_year: first,
            points: &points,
        });
    }
    out.heading("Discoveries per year");
    let peak = points.iter().map(|p| p.count).max().unwrap_or(0);
    for point in &points {
        println!(
            "    {}  {:>6}  {}",
            point.disc_year,
            point.count,
            bar(point.count, peak, 40)
        );
    }
    println!();
    println!("    First observation: {}", opt(first));
    println!();
    Ok(())
}

/// A proportional bar of at most `width` cells.
fn bar(count: u64, peak: u64, width: usize) -> String {
    if peak == 0 {
        return String::new();
    }
    let cells = ((count as f64 / peak as f64) * width as f64).round() as usize;
    "█".repeat(cells.max(usize::from(count > 0)))
}

pub async fn run_discovery(
    client: &CatalogueClient,
    query: &DiscoveryQuery,
    url_only: bool,
    out: Output,
) -> Result<(), OrreryError> {
    if url_only {
        let url = client.discovery_chart_url(query)?;
        if out.json {
            return out.print_json(&serde_json::json!({ "url": url.as_str() }));
        }
        println!("{url}");
        return Ok(());
    }

    let dataset = client.discovery_dataset(query).await?;
    if out.json {
        return out.print_json(&dataset);
    }
    match &dataset {
        DiscoveryDataset::Hist {
            bins,
            counts,
            bin_edges,
            mean,
            std,
            lower,
            upper,
        } => {
            out.heading(&format!("Discovery year histogram ({bins} bins)"));
            let peak = counts.iter().copied().max().unwrap_or(0);
            for (i, count) in counts.iter().enumerate() {
                let from = bin_edges.get(i).copied();
                let to = bin_edges.get(i + 1).copied();
                println!(
                    "    {:>8} - {:<8} {:>6}  {}",
                    number(from),
                    number(to),
                    count,
                    bar(*count, peak, 40)
                );
            }
            println!();
            println!(
                "    mean {}  std {}  band [{}, {}]",
                number(*mean),
                number(*std),
                number(*lower),
                number(*upper)
            );
        }
        DiscoveryDataset::Year { series } => {
            out.heading("Discoveries per year");
            let peak = series.iter().map(|p| p.count).max().unwrap_or(0);
            for point in series {
                println!(
                    "    {}  {:>6}  {}",
                    point.disc_year,
                    point.count,
                    bar(point.count, peak, 40)
                );
            }
        }
        DiscoveryDataset::Method { series } => {
            out.heading("Discoveries per method");
            let peak = series.iter().map(|m| m.count).max().unwrap_or(0);
            for row in series {
                println!(
                    "    {:<32} {:>6}  {}",
                    method_label(row),
                    row.count,
                    bar(row.count, peak, 30)
                );
            }
        }
    }
    println!();
    Ok(())
}

/// Builds the discovery query, dropping histogram-only options for other charts.
pub fn discovery_query(chart: DiscoveryChart, bins: Option<u32>, sigma: Option<f64>) -> DiscoveryQuery {
    let mut query = DiscoveryQuery::new(chart);
    query.bins = bins;
    query.sigma = sigma;
    query
}
