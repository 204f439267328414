use std::{
    fmt::Display,
    io,
    time::{Duration, Instant},
};

use anyhow::Context;
use serde::Serialize;

use crate::{
    graph::{Graph, NodeIndex},
    options::OptionSnapshot,
    path::Path,
    search::{SearchStep, StepSink},
};

/// Record of one route computation: configuration, every reported step and
/// the outcome.
#[derive(Debug, Clone, Serialize)]
pub struct PathStatistics {
    pub start: NodeIndex,
    pub destination: NodeIndex,
    pub algorithm: &'static str,
    pub options: Vec<OptionSnapshot>,
    pub steps: Vec<SearchStep>,
    pub found: bool,
    pub duration: Option<Duration>,
    #[serde(skip)]
    start_time: Option<Instant>,
}

impl PathStatistics {
    pub fn new(
        start: NodeIndex,
        destination: NodeIndex,
        algorithm: &'static str,
        options: Vec<OptionSnapshot>,
    ) -> Self {
        PathStatistics {
            start,
            destination,
            algorithm,
            options,
            steps: Vec::new(),
            found: false,
            duration: None,
            start_time: None,
        }
    }

    pub fn init(&mut self) {
        self.steps.clear();
        self.found = false;
        self.duration = None;
        self.start_timer();
    }

    fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn finish(&mut self) {
        if let Some(start_time) = self.start_time {
            self.duration = Some(start_time.elapsed());
        }
    }

    pub fn record(&mut self, step: SearchStep) {
        if step.finished {
            self.found = step.found;
        }
        self.steps.push(step);
    }

    pub fn is_finished(&self) -> bool {
        self.steps.last().map_or(false, |s| s.finished)
    }

    /// Paths of all reported steps in order
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.steps.iter().map(|s| &s.path)
    }

    /// Path of the terminal step, empty if nothing was found
    pub fn last_path(&self) -> Option<&Path> {
        self.steps.last().map(|s| &s.path)
    }

    /// Number of nodes the algorithm touched
    pub fn expanded(&self) -> usize {
        self.steps.last().map_or(0, |s| s.path.backtracking.len())
    }
}

impl StepSink for PathStatistics {
    fn on_step(&mut self, step: SearchStep) {
        self.record(step);
    }
}

impl Display for PathStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} after {} steps, {} nodes expanded in {:?}",
            self.algorithm,
            if self.found { "path found" } else { "no path" },
            self.steps.len(),
            self.expanded(),
            self.duration.unwrap_or_default()
        )
    }
}

#[derive(Debug, Serialize)]
struct SummaryRecord<'a> {
    algorithm: &'a str,
    start: String,
    destination: String,
    found: bool,
    length: f64,
    hops: usize,
    steps: usize,
    expanded: usize,
    duration_us: u128,
    options: String,
}

/// Writes one CSV row per run, preceded by a header row if `header` is set
pub fn write_summary_csv<W: io::Write>(
    runs: &[PathStatistics],
    g: &Graph,
    writer: W,
    header: bool,
) -> anyhow::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(header)
        .from_writer(writer);
    for stats in runs {
        let path = stats.last_path();
        let label = |n: NodeIndex| {
            g.node(n)
                .map(|node| node.label())
                .filter(|l| !l.is_empty())
                .map_or_else(|| n.to_string(), str::to_string)
        };
        wtr.serialize(SummaryRecord {
            algorithm: stats.algorithm,
            start: label(stats.start),
            destination: label(stats.destination),
            found: stats.found,
            length: path.map_or(0.0, |p| p.length(g)),
            hops: path.map_or(0, Path::hops),
            steps: stats.steps.len(),
            expanded: stats.expanded(),
            duration_us: stats.duration.unwrap_or_default().as_micros(),
            options: stats
                .options
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(";"),
        })
        .with_context(|| format!("Failed to write summary of {}", stats.algorithm))?;
    }
    wtr.flush().context("Failed to flush run summary")?;
    Ok(())
}

pub fn average_out_degree(g: &Graph) -> f64 {
    if g.nodes.is_empty() {
        return 0.0;
    }
    let mut sum = 0.0;
    for node in 0..g.nodes.len() {
        sum += g.edges_out[node].len() as f64;
    }
    sum / g.nodes.len() as f64
}
