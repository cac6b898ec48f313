//! Command dispatch for the treewalk binary.

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, SearchArgs, TreeArgs};
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::config::Settings;
use crate::domain::{Node, NodeDescriptor, OrderedStore, OrderedTree};
use crate::search::{BreadthFirstSearch, DepthFirstSearch, FilterDescent, SearchStrategy};
use crate::render::TreeNodeConvert;

/// Traversal order requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    DepthFirst,
    BreadthFirst,
}

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Commands::Dfs(args) => _search(cli, SearchKind::DepthFirst, args),
        Commands::Bfs(args) => _search(cli, SearchKind::BreadthFirst, args),
        Commands::Show(args) => _show(cli, args),
        Commands::Config => {
            let settings = Settings::load(cli.config.as_deref())?;
            output::info(&settings.to_toml()?);
            Ok(())
        }
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

#[instrument(level = "debug", skip(cli))]
fn _search(cli: &Cli, kind: SearchKind, args: &SearchArgs) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    let tree = build_tree(&settings, &args.tree)?;
    let nodes = run_search(&settings, &tree, kind, args)?;

    output::header(&format!(
        "{:?}: {}",
        kind,
        nodes.iter().map(|node| node.id()).join(" ")
    ));
    for node in nodes {
        output::detail(node);
    }
    Ok(())
}

#[instrument(level = "debug", skip(cli))]
fn _show(cli: &Cli, args: &TreeArgs) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    let tree = build_tree(&settings, args)?;
    output::info(&tree.to_tree_string());
    Ok(())
}

/// Hydrates a tree from the node specs given on the command line.
pub fn build_tree(settings: &Settings, args: &TreeArgs) -> CliResult<OrderedTree<String>> {
    let mut tree: OrderedTree<String> = settings.new_tree("cli");
    tree.hydrate(args.nodes.iter().cloned().map(NodeDescriptor::from))?;
    debug!(nodes = tree.len(), "built tree");
    Ok(tree)
}

/// Runs the requested search; command-line options override settings.
pub fn run_search<'t>(
    settings: &Settings,
    tree: &'t OrderedTree<String>,
    kind: SearchKind,
    args: &SearchArgs,
) -> CliResult<Vec<&'t Node<String>>> {
    match kind {
        SearchKind::DepthFirst => {
            configure_and_run(DepthFirstSearch::new(tree), settings, tree, args)
        }
        SearchKind::BreadthFirst => {
            configure_and_run(BreadthFirstSearch::new(tree), settings, tree, args)
        }
    }
}

fn configure_and_run<'t, T>(
    mut search: T,
    settings: &Settings,
    tree: &'t OrderedTree<String>,
    args: &SearchArgs,
) -> CliResult<Vec<&'t Node<String>>>
where
    T: SearchStrategy<'t, String, OrderedStore<String>>,
{
    settings.apply_search(&mut search)?;
    if let Some(levels) = args.max_levels {
        search.set_max_levels(levels)?;
    }
    if args.prune {
        if args.matching.is_none() {
            output::warning("--prune has no effect without --matching");
        }
        search.set_descent(FilterDescent::Prune);
    }
    if let Some(text) = args.matching.clone() {
        search.set_filter(move |node: &Node<String>| node.payload().contains(text.as_str()));
    }

    let start = match args.start {
        Some(id) => id,
        None => tree.get_root()?.id(),
    };
    search.set_start_node(start)?;
    Ok(search.get_nodes()?)
}
