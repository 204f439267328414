use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::Parser;

use crate::registry::AlgorithmKind;

#[derive(Parser)]
#[command(author = "Daniel Holzner", version, about, long_about = None)]
struct Cli {
    /// Path to the nodes .csv file (id,name,x,y)
    nodes: PathBuf,

    /// Path to the edges .csv file (source,target,way_points,bidirectional)
    edges: PathBuf,

    /// Name of the start node
    #[arg(short, long)]
    from: String,

    /// Name of the destination node
    #[arg(short, long)]
    to: String,

    /// Algorithm to run, e.g. "A*", "Beam Search" or "branch-and-bound"
    #[arg(short, long, default_value = "A*")]
    algorithm: String,

    /// Set an option of the algorithm, e.g. --option "Storage Limit=3"
    #[arg(short, long = "option", value_name = "NAME=VALUE")]
    options: Vec<String>,

    /// Print every reported step
    #[arg(long, default_value = "false")]
    steps: bool,

    /// Append a summary of the run to this .csv file
    #[arg(long, value_name = "file")]
    summary: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Cfg {
    pub nodes: PathBuf,
    pub edges: PathBuf,
    pub from: String,
    pub to: String,
    pub algorithm: AlgorithmKind,
    pub options: Vec<(String, String)>,
    pub print_steps: bool,
    pub summary: Option<PathBuf>,
}

pub fn parse() -> anyhow::Result<Cfg> {
    Cfg::from_cli(Cli::parse())
}

impl Cfg {
    fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        let algorithm = cli
            .algorithm
            .parse::<AlgorithmKind>()
            .context("Invalid --algorithm")?;

        let options = cli
            .options
            .iter()
            .map(|o| parse_option(o))
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Cfg {
            nodes: cli.nodes,
            edges: cli.edges,
            from: cli.from,
            to: cli.to,
            algorithm,
            options,
            print_steps: cli.steps,
            summary: cli.summary,
        })
    }
}

/// Splits `NAME=VALUE` at the first `=`
pub fn parse_option(s: &str) -> anyhow::Result<(String, String)> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| anyhow!("Option {:?} is not of the form NAME=VALUE", s))?;
    Ok((name.trim().to_string(), value.trim().to_string()))
}
