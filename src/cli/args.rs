//! CLI argument definitions using clap

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand, ValueHint};

use crate::domain::{NodeDescriptor, NodeId};

/// Build trees from node specs and walk them depth- or breadth-first
#[derive(Parser, Debug)]
#[command(name = "treewalk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Depth-first (preorder) search
    Dfs(SearchArgs),

    /// Breadth-first (level order) search
    Bfs(SearchArgs),

    /// Print the tree
    Show(TreeArgs),

    /// Show the effective configuration as TOML
    Config,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Node as ID[:PARENT][=LABEL], repeatable
    #[arg(short, long = "node", value_name = "SPEC", required = true, allow_hyphen_values = true)]
    pub nodes: Vec<NodeSpec>,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    #[command(flatten)]
    pub tree: TreeArgs,

    /// Start node (default: root)
    #[arg(short, long)]
    pub start: Option<NodeId>,

    /// Maximum depth below the start node
    #[arg(short = 'l', long, allow_negative_numbers = true)]
    pub max_levels: Option<i64>,

    /// Skip the subtrees of nodes rejected by --matching
    #[arg(long)]
    pub prune: bool,

    /// Only output nodes whose label contains TEXT
    #[arg(short, long, value_name = "TEXT")]
    pub matching: Option<String>,
}

/// Node given on the command line: `ID[:PARENT][=LABEL]`.
///
/// The label defaults to the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSpec {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub label: String,
}

impl FromStr for NodeSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (ids, label) = match s.split_once('=') {
            Some((ids, label)) => (ids, Some(label)),
            None => (s, None),
        };
        let (id, parent) = match ids.split_once(':') {
            Some((id, parent)) => (id, Some(parent)),
            None => (ids, None),
        };

        let id: NodeId = id
            .trim()
            .parse()
            .map_err(|e| format!("invalid node id '{}': {}", id, e))?;
        let parent = parent
            .map(|p| {
                p.trim()
                    .parse::<NodeId>()
                    .map_err(|e| format!("invalid parent id '{}': {}", p, e))
            })
            .transpose()?;
        let label = label.map_or_else(|| id.to_string(), str::to_string);

        Ok(Self { id, parent, label })
    }
}

impl From<NodeSpec> for NodeDescriptor<String> {
    fn from(spec: NodeSpec) -> Self {
        (spec.id, spec.parent, spec.label).into()
    }
}
