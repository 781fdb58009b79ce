//! `normalize-pmd` command-line front-end.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use normalize_pmd::rules::{self, Category, RuleMap};
use normalize_pmd::ruleset::{self, RulesetDocument};
use normalize_pmd::{PmdConfig, PmdRunner, SarifReport, ToolResult};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "normalize-pmd", version, about = "Run PMD and normalize its results")]
struct Cli {
    /// Project root (where .normalize/pmd.toml is looked up)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run PMD and print diagnostics
    Run {
        /// Source directory to analyze (defaults to the project root)
        dir: Option<PathBuf>,

        /// Output in SARIF format
        #[arg(long, conflicts_with = "json")]
        sarif: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a ruleset of the rules the project currently follows
    Ruleset {
        /// Source directory to analyze (defaults to the project root)
        dir: Option<PathBuf>,

        /// Existing ruleset to keep enabled rules from (defaults to the configured ruleset)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the ruleset here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List known rules
    Rules {
        /// Only list rules in this category (e.g. "bestpractices")
        #[arg(short, long)]
        category: Option<String>,
    },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let root = cli.root.clone().unwrap_or_else(|| PathBuf::from("."));
    let config = PmdConfig::load(&root);

    let code = match run(cli.command, &root, config).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            1
        }
    };
    std::process::exit(code);
}

async fn run(command: Commands, root: &Path, config: PmdConfig) -> Result<i32> {
    match command {
        Commands::Run { dir, sarif, json } => {
            let dir = dir.unwrap_or_else(|| root.to_path_buf());
            cmd_run(&dir, config, sarif, json).await
        }
        Commands::Ruleset {
            dir,
            config: ruleset_path,
            output,
        } => {
            let dir = dir.unwrap_or_else(|| root.to_path_buf());
            let ruleset_path = ruleset_path.unwrap_or_else(|| root.join(&config.ruleset));
            cmd_ruleset(&dir, config, &ruleset_path, output.as_deref()).await
        }
        Commands::Rules { category } => cmd_rules(category.as_deref()),
    }
}

async fn cmd_run(dir: &Path, config: PmdConfig, sarif: bool, json: bool) -> Result<i32> {
    let runner = PmdRunner::new(config);
    let result = runner.run_diagnostics(dir).await;
    if let Some(error) = &result.error {
        anyhow::bail!("pmd failed: {error}");
    }

    if sarif {
        let report = SarifReport::from_diagnostics(&result.diagnostics, runner.version().as_deref());
        println!("{}", report.to_json()?);
    } else if json {
        println!("{}", serde_json::to_string(&result)?);
    } else {
        print_text(&result);
    }

    Ok(if result.error_count() > 0 { 1 } else { 0 })
}

fn print_text(result: &ToolResult) {
    for d in &result.diagnostics {
        println!(
            "{}:{}: {} [{}] {}",
            d.location.file.display(),
            d.location.line,
            d.severity,
            d.rule_id,
            d.message
        );
    }
    let count = result.diagnostics.len();
    if count == 0 {
        println!("No issues found.");
    } else {
        println!("{count} issue{}", if count == 1 { "" } else { "s" });
    }
}

async fn cmd_ruleset(
    dir: &Path,
    config: PmdConfig,
    ruleset_path: &Path,
    output: Option<&Path>,
) -> Result<i32> {
    let existing = if ruleset_path.exists() {
        ruleset::read_ruleset(ruleset_path)
            .with_context(|| format!("reading {}", ruleset_path.display()))?
    } else {
        tracing::info!(path = %ruleset_path.display(), "no existing ruleset");
        RulesetDocument::default()
    };

    let options = config.ruleset_options();
    let records = PmdRunner::new(config)
        .run(dir)
        .await
        .context("running pmd")?;

    let violated = rules::violated_rules(&records, Some(&existing));
    let map = RuleMap::from_document(&violated, &existing)?;
    let xml = ruleset::generate_ruleset(map.followed(), &options);

    match output {
        Some(path) => {
            std::fs::write(path, &xml).with_context(|| format!("writing {}", path.display()))?;
            eprintln!(
                "Wrote {} ({} rules followed, {} newly violated)",
                path.display(),
                map.len(),
                violated.len()
            );
        }
        None => print!("{xml}"),
    }
    Ok(0)
}

fn cmd_rules(category: Option<&str>) -> Result<i32> {
    let filter = category
        .map(|slug| {
            Category::from_slug(slug).with_context(|| format!("unknown category: {slug}"))
        })
        .transpose()?;

    for rule in rules::catalog().filter(|r| filter.is_none_or(|c| r.category == c)) {
        println!("{}", rule.qualified_id());
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_flags() {
        let cli = Cli::parse_from(["normalize-pmd", "-vv", "run", "src", "--sarif"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Commands::Run { sarif: true, json: false, .. }
        ));
    }
}
