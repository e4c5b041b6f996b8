use clap::Args;
use colored::*;

use crate::bio::TaxonomyNode;
use crate::cli::output::{self, OutputFormat};
use crate::cli::ReleaseArgs;

#[derive(Args)]
pub struct TaxonomyArgs {
    /// Rank path from the root, separated by '/', e.g. Metazoa/Bilateria
    #[arg(long)]
    pub slice: Option<String>,

    /// List organisms at or below this rank (within the slice when one is given)
    #[arg(long)]
    pub rank: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

pub fn run(args: TaxonomyArgs, release_args: &ReleaseArgs) -> anyhow::Result<()> {
    let config = release_args.config()?;
    let release = release_args.load(&config)?;

    let path: Vec<&str> = args
        .slice
        .as_deref()
        .map(|s| s.split('/').map(str::trim).filter(|r| !r.is_empty()).collect())
        .unwrap_or_default();

    if let Some(rank) = &args.rank {
        let organisms = release.slice_organisms_at(&path, rank)?;
        if args.format == OutputFormat::Json {
            return output::print_json(&organisms);
        }
        output::print_section(&format!("Organisms under {} ({})", rank, organisms.len()));
        for name in &organisms {
            let code = release.store().organism_code(name).unwrap_or("?");
            println!("  {} {}", code.cyan(), name);
        }
        return Ok(());
    }

    let node = release.slice(&path)?;

    if args.format == OutputFormat::Json {
        return output::print_json(node);
    }
    let title = if path.is_empty() {
        "Taxonomy".to_string()
    } else {
        path.join(" / ")
    };
    output::print_section(&title);
    print_node(node, 0);
    Ok(())
}

fn print_node(node: &TaxonomyNode, depth: usize) {
    let indent = "  ".repeat(depth + 1);
    for organism in node.organisms() {
        println!("{}{} {}", indent, "•".dimmed(), organism.italic());
    }
    if let Some(children) = node.children() {
        for (rank, child) in children {
            println!("{}{} {}", indent, "├─".dimmed(), rank.bold());
            print_node(child, depth + 1);
        }
    }
}
