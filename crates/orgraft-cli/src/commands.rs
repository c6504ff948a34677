use colored::Colorize;
use tracing::info;

use orgraft_index::NameIndex;
use orgraft_merge::{MergeConfig, Merger};
use orgraft_tree::PathResolver;

use crate::catalog;
use crate::cli::{Cli, Command, MergeArgs, NamesArgs};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Merge(args) => cmd_merge(args),
        Command::Names(args) => cmd_names(args),
    }
}

fn cmd_merge(args: MergeArgs) -> anyhow::Result<()> {
    let base_label = match &args.base_label {
        Some(label) => label.clone(),
        None => catalog::label_for(&args.base)?,
    };
    let mut base = catalog::load(&args.base)?;
    let resolver = PathResolver::new(args.separator.clone());
    let config = MergeConfig {
        accept_threshold: args.threshold,
        candidate_limit: args.candidates,
        parent_factor: args.parent_factor,
    };

    info!(sources = args.sources.len(), base = %base_label, "merging catalogs");

    // Sources fold in strictly one after another: each merge re-indexes the
    // base and sees the previous merges' effects.
    for path in &args.sources {
        let source_label = catalog::label_for(path)?;
        let mut source = catalog::load(path)?;

        let mut merger = Merger::new(
            &mut base,
            &base_label,
            &mut source,
            &source_label,
            &resolver,
            config.clone(),
        );
        let outcome = merger.merge()?;

        println!(
            "{} {}: merged {} of {} nodes ({} grafted, {} skipped, {} unmatched)",
            "✓".green().bold(),
            source_label.bold(),
            outcome.merged.to_string().yellow(),
            outcome.considered,
            outcome.grafted,
            outcome.skipped,
            outcome.unmatched,
        );
    }

    match &args.output {
        Some(path) => {
            catalog::save(&base, path)?;
            println!(
                "{} wrote merged catalog to {}",
                "✓".green(),
                path.display().to_string().bold()
            );
        }
        None => catalog::write_stdout(&base)?,
    }
    Ok(())
}

fn cmd_names(args: NamesArgs) -> anyhow::Result<()> {
    let label = match &args.label {
        Some(label) => label.clone(),
        None => catalog::label_for(&args.catalog)?,
    };
    let tree = catalog::load(&args.catalog)?;
    let resolver = PathResolver::new(args.separator.clone());
    let index = NameIndex::build(&tree, &resolver, &label);

    for (name, nodes) in index.iter() {
        if nodes.len() > 1 {
            println!("{} {}", name, format!("(x{})", nodes.len()).dimmed());
        } else {
            println!("{name}");
        }
    }
    println!(
        "{} {} distinct names",
        "✓".green(),
        index.len().to_string().bold()
    );
    Ok(())
}
