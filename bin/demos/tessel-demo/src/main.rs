// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Args;
use std::time::{Duration, Instant};
use tessel::{
    Alignment, Axis, Dataset, LayoutEngine, Scalar, SelectionEdit, SelectionRect, SizeMatch,
    TesselConfig, VisualDefaults,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn sample_dataset() -> Dataset {
    let regions = ["North", "South", "East", "West"];
    let products = ["Laptop", "Tablet", "Phone", "Monitor", "Dock", "Keyboard"];
    let records = (0..96)
        .map(|i| {
            vec![
                Scalar::from(format!("2024-{:02}-01", i % 12 + 1)),
                Scalar::from(regions[i % regions.len()]),
                Scalar::from(products[i % products.len()]),
                Scalar::from(1200.0 + ((i * 137) % 911) as f64),
                Scalar::from(150.0 + ((i * 53) % 307) as f64),
                Scalar::from(((i * 7) % 40 + 1) as f64),
            ]
        })
        .collect();
    Dataset::from_records(
        &["Month", "Region", "Product", "Revenue", "Profit", "Units"],
        records,
    )
}

fn build_engine(args: &Args) -> Result<LayoutEngine> {
    let config = match &args.config {
        Some(path) => TesselConfig::from_yaml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => TesselConfig::default(),
    };
    let defaults = match &args.visual_defaults {
        Some(path) => VisualDefaults::from_yaml_file(path)
            .with_context(|| format!("loading visual defaults {}", path.display()))?,
        None => VisualDefaults::default(),
    };
    Ok(LayoutEngine::with_config(config, defaults))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let level = args
        .log_level
        .as_ref()
        .map(|l| l.as_str())
        .unwrap_or("info");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_target(false)
        .init();

    let engine = build_engine(&args)?;
    let dataset = match &args.dataset {
        Some(path) => Dataset::from_json_file(path)
            .with_context(|| format!("reading dataset {}", path.display()))?,
        None => sample_dataset(),
    };
    info!(rows = dataset.len(), "Dataset loaded");

    let mut store = engine.store().with_project_name("Sales Overview");
    let suggestions = store.analyze(&dataset).await.to_vec();
    if let Some(analysis) = store.analysis() {
        println!("{}", analysis.report());
    }
    for suggestion in &suggestions {
        println!("{suggestion}");
    }

    let placed = store.apply_layout(args.layout.layout_id())?.len();
    println!("Applied {} with {placed} visuals", args.layout.layout_id());

    let now = Instant::now();
    let canvas = engine.config().canvas;
    store.select_in_box(&SelectionRect::new(0.0, 0.0, canvas.width, canvas.height / 3.0));
    let band: Vec<&str> = store
        .selected_visuals()
        .iter()
        .filter_map(|v| v.title())
        .collect();
    println!("Selected {} visuals in the top band: {}", band.len(), band.join(", "));
    store.dispatch_on_selection(SelectionEdit::MatchSize(SizeMatch::Height, None), now);
    store.dispatch_on_selection(SelectionEdit::Align(Alignment::Top), now);
    store.dispatch_on_selection(SelectionEdit::Distribute(Axis::Horizontal), now);
    store.dispatch_on_selection(SelectionEdit::SnapToGrid, now);
    store.clear_selection();
    let committed = store.tick(now + Duration::from_millis(engine.config().history.debounce_ms));
    println!(
        "Edits committed as one snapshot: {committed} (history depth {})",
        store.history().past_len()
    );

    let later = now + Duration::from_secs(1);
    if store.undo(later).is_some() {
        println!("Undo restored the layout as placed");
    }
    if store.redo(later).is_some() {
        println!("Redo re-applied the edits");
    }
    store.shutdown();
    println!("{}: {} visuals", store.project().name, store.visuals().len());

    if args.json {
        println!("{}", serde_json::to_string_pretty(store.visuals())?);
    } else {
        for visual in store.visuals() {
            let p = visual.position;
            println!(
                "{:<12} {:<28} x={:>7.1} y={:>7.1} w={:>7.1} h={:>7.1}",
                visual.visual_type.as_str(),
                visual.title().unwrap_or(""),
                p.x,
                p.y,
                p.width,
                p.height
            );
        }
    }
    Ok(())
}
