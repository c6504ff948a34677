use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "orgraft",
    about = "Reconcile hierarchical entity catalogs by approximate name matching",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Merge one or more source catalogs into a base catalog
    Merge(MergeArgs),
    /// Print the full-name index of a catalog
    Names(NamesArgs),
}

#[derive(Args)]
pub struct MergeArgs {
    /// The base catalog (nested JSON)
    pub base: PathBuf,

    /// Source catalogs to fold in, in order
    #[arg(required = true)]
    pub sources: Vec<PathBuf>,

    /// Where to write the merged catalog (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Label for the base catalog (file stem if omitted)
    #[arg(long)]
    pub base_label: Option<String>,

    /// Minimum score (exclusive) to accept a match
    #[arg(long, default_value_t = 95.0)]
    pub threshold: f64,

    /// Top-ranked base names expanded into candidates per source node
    #[arg(long, default_value_t = 5)]
    pub candidates: usize,

    /// Weight of parent evidence when disambiguating candidates
    #[arg(long, default_value_t = 0.5)]
    pub parent_factor: f64,

    /// Separator used when building full path names
    #[arg(long, default_value = "/")]
    pub separator: String,
}

#[derive(Args)]
pub struct NamesArgs {
    /// The catalog to index (nested JSON)
    pub catalog: PathBuf,

    /// Label for the catalog (file stem if omitted)
    #[arg(long)]
    pub label: Option<String>,

    /// Separator used when building full path names
    #[arg(long, default_value = "/")]
    pub separator: String,
}
