#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use cmd::Session;
use cobuy_core::config::load_config;
use output::{CliError, OutputMode};
use std::env;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "cobuy: co-purchase graph product recommender",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Dataset file (.toml or .json). Defaults to `[data].path`, then the
    /// built-in sample catalog.
    #[arg(long, global = true, value_name = "PATH")]
    data: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Alias for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        OutputMode::detect(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    Recommend(cmd::recommend::RecommendArgs),

    Lookup(cmd::lookup::LookupArgs),

    Neighbors(cmd::neighbors::NeighborsArgs),

    #[command(
        about = "Show dataset and graph statistics",
        long_about = "Show catalog/order counts and product graph statistics: density,\n\
                      connected components, isolated products and the graph content hash.",
        after_help = "EXAMPLES:\n    # Statistics for the built-in sample\n    cobuy stats\n\n\
                      # Statistics for your own catalog\n    cobuy --data shop.toml stats --format json"
    )]
    Stats,

    #[command(
        about = "Interactive recommendation console",
        long_about = "Prompt for a product, a result count and a search depth, print the\n\
                      recommendations, and repeat until 'exit' or end of input.",
        after_help = "EXAMPLES:\n    # Start the console on the sample catalog\n    cobuy shell"
    )]
    Shell,

    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n    # Bash\n    cobuy completions bash > ~/.local/share/bash-completion/completions/cobuy"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("COBUY_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "cobuy=debug,info"
        } else {
            "cobuy=info,warn"
        })
    });

    let format = env::var("COBUY_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn run(cli: &Cli, output: OutputMode) -> anyhow::Result<()> {
    if let Commands::Completions(args) = &cli.command {
        let mut command = Cli::command();
        return cmd::completions::run_completions(args.shell, &mut command);
    }

    let project_root = env::current_dir()?;
    let config = load_config(&project_root)?;
    let session = Session::load(cli.data.as_deref(), &config)?;
    debug!(
        products = session.dataset.catalog.len(),
        edges = session.graph.edge_count(),
        "session ready"
    );

    match &cli.command {
        Commands::Recommend(args) => cmd::recommend::run_recommend(args, &session, output),
        Commands::Lookup(args) => cmd::lookup::run_lookup(args, &session, output),
        Commands::Neighbors(args) => cmd::neighbors::run_neighbors(args, &session, output),
        Commands::Stats => cmd::stats::run_stats(&session, output),
        Commands::Shell => cmd::shell::run_shell(&session),
        Commands::Completions(_) => Ok(()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = cli.output_mode();
    if let Err(err) = run(&cli, output) {
        CliError::from(&err).report(output)?;
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommend_parses_query_limit_and_depth() {
        let cli = Cli::parse_from(["cobuy", "recommend", "laptop", "-k", "3", "--depth", "1"]);
        match cli.command {
            Commands::Recommend(args) => {
                assert_eq!(args.query, "laptop");
                assert_eq!(args.limit, Some(3));
                assert_eq!(args.depth, Some(1));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn recommend_defaults_are_unset() {
        let cli = Cli::parse_from(["cobuy", "recommend", "1"]);
        match cli.command {
            Commands::Recommend(args) => {
                assert!(args.limit.is_none());
                assert!(args.depth.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::parse_from([
            "cobuy", "stats", "--data", "shop.toml", "--format", "json", "-v",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.data, Some(PathBuf::from("shop.toml")));
        assert_eq!(cli.format, Some(OutputMode::Json));
        assert!(matches!(cli.command, Commands::Stats));
    }

    #[test]
    fn json_flag_sets_output_mode() {
        let cli = Cli::parse_from(["cobuy", "--json", "stats"]);
        assert!(cli.json);
        assert_eq!(cli.output_mode(), OutputMode::Json);
    }

    #[test]
    fn format_flag_wins_over_json_flag() {
        let cli = Cli::parse_from(["cobuy", "--json", "--format", "text", "stats"]);
        assert_eq!(cli.output_mode(), OutputMode::Text);
    }

    #[test]
    fn neighbors_limit_defaults_to_ten() {
        let cli = Cli::parse_from(["cobuy", "neighbors", "mouse"]);
        match cli.command {
            Commands::Neighbors(args) => assert_eq!(args.limit, 10),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn completions_subcommand_parses() {
        let cli = Cli::parse_from(["cobuy", "completions", "bash"]);
        assert!(matches!(
            cli.command,
            Commands::Completions(cmd::completions::CompletionsArgs {
                shell: clap_complete::Shell::Bash,
            })
        ));
    }

    #[test]
    fn all_subcommands_listed() {
        let subcommands = [
            vec!["cobuy", "recommend", "1"],
            vec!["cobuy", "lookup", "desk"],
            vec!["cobuy", "neighbors", "1", "-n", "3"],
            vec!["cobuy", "stats"],
            vec!["cobuy", "shell"],
            vec!["cobuy", "completions", "zsh"],
        ];
        for args in &subcommands {
            let result = Cli::try_parse_from(args.iter());
            assert!(result.is_ok(), "Failed to parse: {args:?}: {:?}", result.err());
        }
    }

    #[test]
    fn missing_query_is_rejected() {
        assert!(Cli::try_parse_from(["cobuy", "recommend"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
