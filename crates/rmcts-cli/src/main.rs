// UCT search driver over the synthetic game tree

use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serde::Serialize;

use rmcts_core::mcts::{reward_to_value, UctCounters};
use rmcts_core::types::Depth;
use rmcts_core::{
    HistoryTables, MinimaxEvaluator, SearchLimits, SyntheticConfig, SyntheticEval,
    SyntheticPosition, UctParams, UctSearch,
};

/// 何も指定されなかったときの反復回数
const DEFAULT_ITERATIONS: u64 = 1000;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed of the synthetic game tree
    #[arg(long, default_value_t = SyntheticConfig::default().seed)]
    seed: u64,

    /// Minimum number of moves per position
    #[arg(long, default_value_t = SyntheticConfig::default().min_branching)]
    min_branching: usize,

    /// Maximum number of moves per position
    #[arg(long, default_value_t = SyntheticConfig::default().max_branching)]
    max_branching: usize,

    /// Stop after this many iterations (descents)
    #[arg(long)]
    iterations: Option<u64>,

    /// Stop after this many playouts
    #[arg(long)]
    nodes: Option<u64>,

    /// Stop after this many milliseconds
    #[arg(long)]
    movetime_ms: Option<u64>,

    /// Exploration constant C of the UCB formula
    #[arg(long, default_value_t = UctParams::default().exploration_constant)]
    exploration: f64,

    /// Number of node table slots
    #[arg(long, default_value_t = UctParams::default().node_table_size)]
    table_size: usize,

    /// Depth handed to the move picker when a node is expanded
    #[arg(long, default_value_t = UctParams::default().expansion_depth)]
    expansion_depth: Depth,

    /// Depth of the leaf search used for priors (0 = quiescence only)
    #[arg(long, default_value_t = UctParams::default().prior_depth)]
    prior_depth: Depth,

    /// Maximum length of the printed principal variation
    #[arg(long, default_value_t = 8)]
    pv_length: usize,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Default log level (RUST_LOG takes precedence)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn synthetic_config(&self) -> SyntheticConfig {
        SyntheticConfig {
            seed: self.seed,
            min_branching: self.min_branching,
            max_branching: self.max_branching,
            ..SyntheticConfig::default()
        }
    }

    fn uct_params(&self) -> UctParams {
        UctParams {
            exploration_constant: self.exploration,
            node_table_size: self.table_size,
            expansion_depth: self.expansion_depth,
            prior_depth: self.prior_depth,
        }
    }

    fn limits(&self) -> SearchLimits {
        let mut limits = SearchLimits {
            iterations: self.iterations.unwrap_or(0),
            nodes: self.nodes.unwrap_or(0),
            movetime: self.movetime_ms.map(Duration::from_millis),
        };
        if limits.iterations == 0 && limits.nodes == 0 && limits.movetime.is_none() {
            limits.iterations = DEFAULT_ITERATIONS;
        }
        limits
    }
}

// =============================================================================
// 出力
// =============================================================================

#[derive(Serialize)]
struct EdgeReport {
    #[serde(rename = "move")]
    mv: String,
    prior: f64,
    visits: u32,
    mean: f64,
}

#[derive(Serialize)]
struct TableReport {
    size: usize,
    expanded: usize,
    inserts: u64,
    hits: u64,
    collisions: u64,
}

#[derive(Serialize)]
struct SearchReport {
    config: SyntheticConfig,
    params: UctParams,
    limits: SearchLimits,
    best_move: String,
    value: i32,
    pv: Vec<String>,
    counters: UctCounters,
    elapsed_ms: u128,
    root_edges: Vec<EdgeReport>,
    table: TableReport,
}

impl SearchReport {
    fn print_text(&self) {
        println!("bestmove {} value {}", self.best_move, self.value);
        println!("pv {}", self.pv.join(" "));
        println!(
            "descents {} playouts {} do_moves {} priors {} stale_backups {} time {}ms",
            self.counters.descents,
            self.counters.playouts,
            self.counters.do_moves,
            self.counters.priors,
            self.counters.stale_backups,
            self.elapsed_ms
        );
        for edge in &self.root_edges {
            println!(
                "  {:<10} prior {:.4} visits {:>7} mean {:.4} value {}",
                edge.mv,
                edge.prior,
                edge.visits,
                edge.mean,
                reward_to_value(if edge.visits > 0 { edge.mean } else { edge.prior })
            );
        }
        println!(
            "table size {} expanded {} inserts {} hits {} collisions {}",
            self.table.size,
            self.table.expanded,
            self.table.inserts,
            self.table.hits,
            self.table.collisions
        );
    }
}

fn init_logger(level: &str) {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, level),
    );
    builder
        .format(|buf, record| {
            writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args())
        })
        .write_style(env_logger::WriteStyle::Never)
        .target(env_logger::Target::Stderr);
    builder.init();
}

fn run(args: &Args) -> Result<SearchReport> {
    let config = args.synthetic_config();
    let params = args.uct_params();
    let mut limits = args.limits();

    let mut pos = SyntheticPosition::new(config).context("invalid synthetic game settings")?;
    let history = HistoryTables::new();
    let evaluator = MinimaxEvaluator::new(SyntheticEval);

    info!(
        "synthetic game: seed={} branching={}..={} root_moves={}",
        config.seed,
        config.min_branching,
        config.max_branching,
        pos.legal_moves().len()
    );

    let mut uct = UctSearch::new(&mut pos, &history, evaluator, params)?;
    let best = uct.search(&mut limits);
    let value = uct.best_value();
    let pv = uct.principal_variation(args.pv_length);

    let table = uct.table();
    let report = SearchReport {
        config,
        params: *uct.params(),
        limits,
        best_move: best.to_string(),
        value: value.raw(),
        pv: pv.iter().map(|m| m.to_string()).collect(),
        counters: *uct.counters(),
        elapsed_ms: uct.counters().elapsed().as_millis(),
        root_edges: uct
            .root_edges()
            .iter()
            .map(|e| EdgeReport {
                mv: e.mv.to_string(),
                prior: e.prior,
                visits: e.visits,
                mean: e.mean_action_value,
            })
            .collect(),
        table: TableReport {
            size: table.len(),
            expanded: table.expanded_count(),
            inserts: table.inserts(),
            hits: table.hits(),
            collisions: table.collisions(),
        },
    };
    Ok(report)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(&args.log_level);

    let report = run(&args).context("search failed")?;
    if args.json {
        let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        println!("{json}");
    } else {
        report.print_text();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits_use_iterations() {
        let args = Args::parse_from(["rmcts"]);
        let limits = args.limits();
        assert_eq!(limits.iterations, DEFAULT_ITERATIONS);
        assert_eq!(limits.nodes, 0);
        assert!(limits.movetime.is_none());
        assert_eq!(args.uct_params(), UctParams::default());
    }

    #[test]
    fn test_explicit_limits_replace_default() {
        let args = Args::parse_from(["rmcts", "--nodes", "50", "--movetime-ms", "20"]);
        let limits = args.limits();
        assert_eq!(limits.iterations, 0);
        assert_eq!(limits.nodes, 50);
        assert_eq!(limits.movetime, Some(Duration::from_millis(20)));
    }

    #[test]
    fn test_run_small_search() {
        let args = Args::parse_from([
            "rmcts",
            "--seed",
            "3",
            "--iterations",
            "64",
            "--table-size",
            "4096",
            "--pv-length",
            "4",
        ]);
        let report = run(&args).unwrap();
        assert_eq!(report.counters.descents, 64);
        assert!(report.pv.len() <= 4);
        assert!(
            report.root_edges.is_empty()
                || report.root_edges.iter().any(|e| e.mv == report.best_move)
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["counters"]["descents"], 64);
        assert_eq!(json["params"]["node_table_size"], 4096);
    }

    #[test]
    fn test_invalid_settings_are_reported() {
        let args = Args::parse_from(["rmcts", "--min-branching", "9", "--max-branching", "3"]);
        let err = run(&args).err().unwrap();
        assert!(format!("{err:#}").contains("invalid synthetic game settings"));

        let args = Args::parse_from(["rmcts", "--table-size", "0"]);
        let err = run(&args).err().unwrap();
        assert!(format!("{err:#}").contains("invalid UCT parameters"));
    }
}
