//! NetGraph CLI — command-line interface for interaction graph analytics
//!
//! Loads a `sender,receiver,weight` table into an in-memory graph and runs
//! one query, or starts an interactive shell over the same graph.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use netgraph::algo::{self, HitsSortKey};
use netgraph::{GraphStore, InteractionRecord, NetgraphConfig, NodeId};
use serde_json::json;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "netgraph", version, about = "Social interaction graph analytics")]
struct Cli {
    /// Interaction table (sender,receiver,weight with a header row)
    #[arg(long, global = true, env = "NETGRAPH_DATA")]
    data: Option<PathBuf>,

    /// YAML configuration file
    #[arg(long, global = true, env = "NETGRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Log debug diagnostics to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum SortKey {
    Authority,
    Hub,
}

impl From<SortKey> for HitsSortKey {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Authority => HitsSortKey::Authority,
            SortKey::Hub => HitsSortKey::Hub,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show who a user has messaged
    User {
        id: NodeId,
    },
    /// Print every edge of the graph
    Graph,
    /// Count distinct senders and receivers in the input
    Actors,
    /// Graph summary counts
    Stats,
    /// Weighted shortest path between two users
    Path {
        from: NodeId,
        to: NodeId,
    },
    /// PageRank scores
    Pagerank {
        /// Show only the top N users (defaults to the configured top_n)
        #[arg(long)]
        top: Option<usize>,

        /// Show every user in graph order instead of a sorted top list
        #[arg(long, conflicts_with = "top")]
        all: bool,
    },
    /// Authority and hub scores
    Hits {
        #[arg(long, value_enum, default_value = "authority")]
        sort: SortKey,
    },
    /// List every forward-reachability community
    Communities,
    /// Show the community a user belongs to
    Community {
        id: NodeId,
    },
    /// Messages received per user
    Centrality {
        #[arg(long)]
        top: Option<usize>,
    },
    /// Start an interactive shell
    Shell,
}

/// Loaded graph plus the records it was built from.
///
/// `records` holds the input as read; shell additions only reach the store.
struct Session {
    store: GraphStore,
    records: Vec<InteractionRecord>,
    config: NetgraphConfig,
    format: OutputFormat,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => NetgraphConfig::from_yaml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => NetgraphConfig::default(),
    };
    if let Some(data) = cli.data {
        config.data_path = data;
    }

    let mut session = Session::load(config, cli.format)?;

    match cli.command {
        Commands::User { id } => session.query_user(id),
        Commands::Graph => session.print_graph(),
        Commands::Actors => session.actor_count(),
        Commands::Stats => session.stats(),
        Commands::Path { from, to } => session.shortest_path(from, to),
        Commands::Pagerank { top, all } => {
            if all {
                session.page_rank_all()
            } else {
                session.page_rank_top(top)
            }
        }
        Commands::Hits { sort } => session.hits(sort.into()),
        Commands::Communities => session.communities(),
        Commands::Community { id } => session.user_community(id),
        Commands::Centrality { top } => session.centrality(top),
        Commands::Shell => session.run_shell(),
    }
}

impl Session {
    fn load(config: NetgraphConfig, format: OutputFormat) -> anyhow::Result<Self> {
        let report = netgraph::load_records(&config.data_path)
            .with_context(|| format!("loading {}", config.data_path.display()))?;
        if !report.skipped.is_empty() {
            eprintln!("Skipped {} malformed row(s)", report.skipped.len());
        }

        let store = GraphStore::from_records(report.records.iter().copied());

        Ok(Session {
            store,
            records: report.records,
            config,
            format,
        })
    }

    fn emit_json(&self, value: serde_json::Value) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(&value)?);
        Ok(())
    }

    fn query_user(&self, id: NodeId) -> anyhow::Result<()> {
        let edges = self.store.query_user(id)?;

        match self.format {
            OutputFormat::Json => {
                let rows: Vec<_> = edges
                    .iter()
                    .map(|(to, count)| json!({ "to": to, "messages": count }))
                    .collect();
                self.emit_json(json!({ "user": id, "edges": rows }))
            }
            OutputFormat::Table => {
                let mut table = new_table(&["To", "Messages"]);
                for (to, count) in edges {
                    table.add_row(vec![to.to_string(), count.to_string()]);
                }
                println!("Messages sent by user {}", id);
                println!("{}", table);
                Ok(())
            }
        }
    }

    fn add_message(&mut self, from: NodeId, to: NodeId, count: i64) -> anyhow::Result<()> {
        self.store.add_edge(from, to, count)?;
        println!("Recorded {} -> {} ({} messages)", from, to, count);
        Ok(())
    }

    fn print_graph(&self) -> anyhow::Result<()> {
        if self.store.is_empty() {
            println!("(empty graph)");
            return Ok(());
        }

        match self.format {
            OutputFormat::Json => {
                let edges: Vec<_> = self.store.edges().collect();
                self.emit_json(serde_json::to_value(edges)?)
            }
            OutputFormat::Table => {
                let mut table = new_table(&["From", "To", "Messages"]);
                for record in self.store.edges() {
                    table.add_row(vec![
                        record.source.to_string(),
                        record.destination.to_string(),
                        record.weight.to_string(),
                    ]);
                }
                println!("{}", table);
                println!("{} edge(s)", self.store.edge_count());
                Ok(())
            }
        }
    }

    fn actor_count(&self) -> anyhow::Result<()> {
        let count = netgraph::raw_actor_count(&self.records);
        match self.format {
            OutputFormat::Json => self.emit_json(json!({ "actors": count })),
            OutputFormat::Table => {
                println!("Users: {}", count);
                Ok(())
            }
        }
    }

    fn stats(&self) -> anyhow::Result<()> {
        let stats = self.store.statistics();
        match self.format {
            OutputFormat::Json => self.emit_json(serde_json::to_value(stats)?),
            OutputFormat::Table => {
                println!("Senders:      {}", stats.source_nodes);
                println!("Users:        {}", stats.total_nodes);
                println!("Edges:        {}", stats.edges);
                println!("Messages:     {}", stats.total_weight);
                Ok(())
            }
        }
    }

    fn shortest_path(&self, from: NodeId, to: NodeId) -> anyhow::Result<()> {
        let result = algo::shortest_path(&self.store, from, to)?;
        match self.format {
            OutputFormat::Json => self.emit_json(serde_json::to_value(&result)?),
            OutputFormat::Table => {
                let hops: Vec<String> = result.path.iter().map(|n| n.to_string()).collect();
                println!("Social distance: {}", result.cost);
                println!("Path: {}", hops.join(" -> "));
                Ok(())
            }
        }
    }

    fn page_rank_all(&self) -> anyhow::Result<()> {
        let result = algo::page_rank(&self.store, self.config.pagerank);
        let rows: Vec<(NodeId, f64)> = self
            .store
            .node_keys()
            .filter_map(|id| result.scores.get(&id).map(|&score| (id, score)))
            .collect();
        self.print_ranking("PageRank", &rows, result.iterations)
    }

    fn page_rank_top(&self, top: Option<usize>) -> anyhow::Result<()> {
        let n = top.unwrap_or(self.config.top_n);
        let result = algo::page_rank(&self.store, self.config.pagerank);
        self.print_ranking("PageRank", &result.top_n(n), result.iterations)
    }

    fn print_ranking(&self, label: &str, rows: &[(NodeId, f64)], iterations: usize) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => {
                let ranked: Vec<_> = rows
                    .iter()
                    .map(|(id, score)| json!({ "user": id, "score": score }))
                    .collect();
                self.emit_json(json!({ "iterations": iterations, "ranking": ranked }))
            }
            OutputFormat::Table => {
                let mut table = new_table(&["Rank", "User", label]);
                for (i, (id, score)) in rows.iter().enumerate() {
                    table.add_row(vec![(i + 1).to_string(), id.to_string(), format!("{:.6}", score)]);
                }
                println!("{}", table);
                println!("{} iteration(s)", iterations);
                Ok(())
            }
        }
    }

    fn hits(&self, key: HitsSortKey) -> anyhow::Result<()> {
        let result = algo::hits(&self.store, self.config.hits);
        let ranked = result.ranked(key);

        match self.format {
            OutputFormat::Json => self.emit_json(serde_json::to_value(&ranked)?),
            OutputFormat::Table => {
                let mut table = new_table(&["User", "Authority", "Hub"]);
                for entry in &ranked {
                    table.add_row(vec![
                        entry.node.to_string(),
                        format!("{:.6}", entry.authority),
                        format!("{:.6}", entry.hub),
                    ]);
                }
                println!("{}", table);
                Ok(())
            }
        }
    }

    fn communities(&self) -> anyhow::Result<()> {
        let result = algo::communities(&self.store);
        match self.format {
            OutputFormat::Json => self.emit_json(serde_json::to_value(&result.communities)?),
            OutputFormat::Table => {
                let mut table = new_table(&["Community", "Size", "Members"]);
                for (i, members) in result.communities.iter().enumerate() {
                    table.add_row(vec![(i + 1).to_string(), members.len().to_string(), join_ids(members)]);
                }
                println!("{}", table);
                Ok(())
            }
        }
    }

    fn user_community(&self, id: NodeId) -> anyhow::Result<()> {
        let members = algo::user_community(&self.store, id)?;
        match self.format {
            OutputFormat::Json => self.emit_json(json!({ "user": id, "community": members })),
            OutputFormat::Table => {
                println!("User {} community: {}", id, join_ids(&members));
                Ok(())
            }
        }
    }

    fn centrality(&self, top: Option<usize>) -> anyhow::Result<()> {
        let mut received: Vec<(NodeId, i64)> = self.store.received_weight().into_iter().collect();
        received.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        received.truncate(top.unwrap_or(self.config.top_n));

        match self.format {
            OutputFormat::Json => {
                let rows: Vec<_> = received
                    .iter()
                    .map(|(id, count)| json!({ "user": id, "received": count }))
                    .collect();
                self.emit_json(serde_json::Value::Array(rows))
            }
            OutputFormat::Table => {
                let mut table = new_table(&["User", "Received"]);
                for (id, count) in &received {
                    table.add_row(vec![id.to_string(), count.to_string()]);
                }
                println!("{}", table);
                Ok(())
            }
        }
    }

    fn run_shell(&mut self) -> anyhow::Result<()> {
        println!("NetGraph Interactive Shell");
        println!(
            "{} senders, {} edges loaded. Type :help for commands, :quit to exit.\n",
            self.store.node_count(),
            self.store.edge_count()
        );

        let stdin = std::io::stdin();
        let mut line = String::new();

        loop {
            eprint!("netgraph> ");

            line.clear();
            if stdin.read_line(&mut line)? == 0 {
                break; // EOF
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            match trimmed {
                ":quit" | ":exit" | ":q" => break,
                ":help" | ":h" => print_shell_help(),
                command => {
                    if let Err(e) = self.dispatch(command) {
                        eprintln!("Error: {:#}", e);
                    }
                }
            }
        }

        println!("Bye!");
        Ok(())
    }

    fn dispatch(&mut self, command: &str) -> anyhow::Result<()> {
        let mut parts = command.split_whitespace();
        let verb = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        match (verb, args.as_slice()) {
            ("user", [id]) => self.query_user(parse_id(id)?),
            ("add", [from, to, count]) => {
                let count = count
                    .parse()
                    .with_context(|| format!("'{}' is not a message count", count))?;
                self.add_message(parse_id(from)?, parse_id(to)?, count)
            }
            ("graph", []) => self.print_graph(),
            ("actors", []) => self.actor_count(),
            ("stats", []) => self.stats(),
            ("path", [from, to]) => self.shortest_path(parse_id(from)?, parse_id(to)?),
            ("pagerank", []) => self.page_rank_all(),
            ("top", []) => self.page_rank_top(None),
            ("top", [n]) => self.page_rank_top(Some(n.parse().context("invalid count")?)),
            ("communities", []) => self.communities(),
            ("community", [id]) => self.user_community(parse_id(id)?),
            ("hits", []) | ("hits", ["authority"]) => self.hits(HitsSortKey::Authority),
            ("hits", ["hub"]) => self.hits(HitsSortKey::Hub),
            ("centrality", []) => self.centrality(None),
            _ => bail!("unknown command '{}', type :help", command),
        }
    }
}

fn print_shell_help() {
    println!("Commands:");
    println!("  user <id>              — Messages sent by a user");
    println!("  add <from> <to> <n>    — Record n messages from one user to another");
    println!("  graph                  — Print every edge");
    println!("  actors                 — Count distinct users in the input");
    println!("  stats                  — Graph summary");
    println!("  path <from> <to>       — Shortest path and social distance");
    println!("  pagerank               — PageRank for every user");
    println!("  top [n]                — Top n users by PageRank");
    println!("  communities            — All communities");
    println!("  community <id>         — Community of one user");
    println!("  hits [authority|hub]   — Authority and hub scores");
    println!("  centrality             — Messages received per user");
    println!("  :quit                  — Exit shell");
}

fn parse_id(s: &str) -> anyhow::Result<NodeId> {
    s.parse().with_context(|| format!("'{}' is not a user id", s))
}

fn join_ids(ids: &[NodeId]) -> String {
    ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(", ")
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header.to_vec());
    table
}
