use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use gametree_chess::config::SearchConfig;
use gametree_chess::errors::SearchResult;
use gametree_chess::evaluation::evaluator::EvaluatorKind;
use gametree_chess::logging::init_logging;
use gametree_chess::search::tree_search::{build_and_search, SearchAlgorithm};
use gametree_chess::tree::builder::ConfiguredTreeBuilder;
use gametree_chess::tree::snapshot::TreeSnapshot;
use gametree_chess::uci::uci_top::run_stdio_loop;
use gametree_chess::utils::render_tree::{render_forest, render_position};

#[derive(Parser, Debug)]
#[command(version, about = "Bounded-depth game-tree search for chess")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). Logs go to stderr.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<SubCommands>,
}

#[derive(Args, Debug, Clone)]
struct TreeParams {
    /// Opening moves in long algebraic notation, e.g. "d2d4 d7d5 c2c4 e7e6".
    #[arg(short, long, default_value = "")]
    moves: String,

    #[arg(short, long)]
    depth: Option<usize>,

    #[arg(short, long)]
    branching: Option<usize>,

    #[arg(short, long)]
    seed: Option<u64>,

    #[arg(short, long)]
    evaluator: Option<EvaluatorKind>,

    /// JSON search configuration; flags override its values.
    #[arg(short, long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    config: Option<PathBuf>,
}

impl TreeParams {
    fn resolve(&self) -> SearchResult<SearchConfig> {
        let mut config = match &self.config {
            Some(path) => SearchConfig::from_json_file(path)?,
            None => SearchConfig::default(),
        };
        if let Some(depth) = self.depth {
            config.depth = depth;
        }
        if let Some(branching) = self.branching {
            config.branching_limit = branching;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(evaluator) = self.evaluator {
            config.evaluator = evaluator;
        }
        config.validate()?;
        Ok(config)
    }

    fn opening(&self) -> Vec<&str> {
        self.moves.split_whitespace().collect()
    }
}

#[derive(Debug, Subcommand)]
enum SubCommands {
    /// Speak UCI on stdin/stdout (the default).
    Uci {
        #[arg(short, long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
        config: Option<PathBuf>,
    },
    /// Build a tree after the opening moves, search it and print the decision.
    Search {
        #[command(flatten)]
        params: TreeParams,

        #[arg(short, long)]
        algorithm: Option<SearchAlgorithm>,

        /// Also print the searched tree as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Build a tree after the opening moves and print it without searching.
    Tree {
        #[command(flatten)]
        params: TreeParams,
    },
}

fn main() -> ExitCode {
    let args = Cli::parse();
    init_logging(args.verbose);

    let result = match args.command {
        None => run_uci(None),
        Some(SubCommands::Uci { config }) => run_uci(config),
        Some(SubCommands::Search {
            params,
            algorithm,
            json,
        }) => run_search(&params, algorithm, json),
        Some(SubCommands::Tree { params }) => run_tree(&params),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_uci(config: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let config = match config {
        Some(path) => SearchConfig::from_json_file(path)?,
        None => SearchConfig::default(),
    };
    run_stdio_loop(config)?;
    Ok(())
}

fn run_search(
    params: &TreeParams,
    algorithm: Option<SearchAlgorithm>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = params.resolve()?;
    if let Some(algorithm) = algorithm {
        config.algorithm = algorithm;
    }

    let (tree, outcome) = build_and_search(&params.opening(), &config)?;

    println!("bestmove {}", outcome.best_move);
    println!("score {:.3}", outcome.root_score);
    println!(
        "algorithm {} depth {} nodes {} pruned_edges {}",
        outcome.algorithm,
        config.depth,
        outcome.nodes,
        outcome.pruned_edges()
    );
    if json {
        println!("{}", TreeSnapshot::capture(&tree).to_json()?);
    }
    Ok(())
}

fn run_tree(params: &TreeParams) -> Result<(), Box<dyn std::error::Error>> {
    let config = params.resolve()?;
    let mut builder = ConfiguredTreeBuilder::from_config(&config);
    let tree = builder.build(&params.opening(), config.depth)?;

    println!("{}", render_position(tree.node(tree.root()).position()));
    println!();
    print!("{}", render_forest(&tree));
    Ok(())
}
