use clap::Parser;
use cordyceps_avl::BalancedTree;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Builds an AVL tree from the given keys and prints its traversals.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Keys to insert, in order.
    #[arg(allow_negative_numbers = true)]
    keys: Vec<i64>,

    /// Keys to remove after all insertions.
    #[arg(short, long = "remove", value_name = "KEY", allow_negative_numbers = true)]
    removals: Vec<i64>,

    /// Print the tree as a Graphviz DOT digraph.
    #[arg(long)]
    dot: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn setup_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_filter(env_filter),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let mut tree = BalancedTree::new();

    for key in cli.keys {
        if !tree.insert(key) {
            info!(key, "ignored duplicate key");
        }
    }

    for key in cli.removals {
        if !tree.remove(&key) {
            info!(key, "key to remove was not present");
        }
    }

    debug!(len = tree.len(), height = ?tree.height(), "tree built");

    println!("pre-order:   {:?}", tree.pre_order());
    println!("in-order:    {:?}", tree.in_order());
    println!("post-order:  {:?}", tree.post_order());
    println!("level-order: {:?}", tree.level_order());
    println!("size:        {}", tree.len());
    println!("minimum:     {:?}", tree.minimum());
    match tree.root() {
        Ok(root) => println!("root:        {}", root.key()),
        Err(e) => println!("root:        ({e})"),
    }

    if cli.dot {
        let mut out = String::new();
        match tree.dotgraph("avl", &mut out) {
            Ok(()) => println!("{out}"),
            Err(e) => eprintln!("Error: failed to write graph: {e}"),
        }
    }
}
