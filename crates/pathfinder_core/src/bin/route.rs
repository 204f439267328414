use std::{fs::OpenOptions, io};

use anyhow::{anyhow, Context};
use log::info;
use pathfinder_core::{prelude::*, statistics::write_summary_csv, util::cli};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cfg = cli::parse()?;

    let g = Graph::from_csv(&cfg.nodes, &cfg.edges)?;
    g.print_info();

    let start = g
        .find_node(&cfg.from)
        .ok_or_else(|| anyhow!("No node named {:?}", cfg.from))?;
    let destination = g
        .find_node(&cfg.to)
        .ok_or_else(|| anyhow!("No node named {:?}", cfg.to))?;

    let mut alg = cfg.algorithm.create();
    for (name, value) in &cfg.options {
        alg.options_mut()
            .set_from_str(name, value)
            .with_context(|| format!("{} has no option {:?}", alg.name(), name))?;
    }
    for (info, value) in alg.options().iter() {
        info!("{} = {}", info.name, value);
    }

    let stats = PathRunner::run(alg.as_mut(), &g, start, destination)?;

    if cfg.print_steps {
        for (i, step) in stats.steps.iter().enumerate() {
            println!("{:>5} {:<24} {}", i, step.message, step.path.describe(&g));
        }
    }

    println!("{}", stats);
    match stats.last_path().filter(|_| stats.found) {
        Some(path) => println!("{} (length {:.1})", path.describe(&g), path.length(&g)),
        None => println!("No path from {} to {}", cfg.from, cfg.to),
    }

    if let Some(summary) = &cfg.summary {
        let header = std::fs::metadata(summary).map_or(true, |m| m.len() == 0);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(summary)
            .with_context(|| format!("Failed to open {}", summary.display()))?;
        write_summary_csv(&[stats], &g, io::BufWriter::new(file), header)?;
    }

    Ok(())
}
