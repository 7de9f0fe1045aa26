// CLI surface: subcommand definitions and dispatch into the client

use clap::Subcommand;
use serde_json::{json, Value};

use crate::client::GmapClient;
use crate::error::Result;
use crate::models::{Direction, PageParams, SearchParams, TraversalParams};

/// Subcommands of the `gmap` binary
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List graphs
    ListGraphs {
        /// Items per page / page size
        #[arg(long, default_value_t = 10)]
        per_page: u32,
        /// Page number
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// List collections
    ListCollections {
        #[arg(long, default_value_t = 10)]
        per_page: u32,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// List edge collections
    ListEdges {
        #[arg(long, default_value_t = 10)]
        per_page: u32,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// List pre-defined queries
    ListQueries {
        #[arg(long, default_value_t = 10)]
        per_page: u32,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Retrieve a node by collection and node-id
    GetNode {
        #[arg(short, long)]
        collection: String,
        #[arg(short, long)]
        node_id: String,
    },
    /// List plugins metadata
    GetPlugins,
    /// Makes a pre-defined query
    Query {
        /// Query's key name
        #[arg(short, long)]
        kind: String,
        /// Variable to pass to the query
        #[arg(short, long)]
        value: String,
    },
    /// Search for nodes
    Search {
        /// List of collections (comma separated)
        #[arg(long)]
        collections: String,
        #[arg(short, long)]
        query: String,
        #[arg(long, default_value_t = 10)]
        per_page: u32,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Makes a traversal search given a graph and initial node.
    /// Passing --graph more than once traverses every graph concurrently.
    Traversal {
        /// Graph where you want to do the traversal search
        #[arg(short, long = "graph", required = true)]
        graphs: Vec<String>,
        /// Initial node ID
        #[arg(short, long)]
        start_vertex: String,
        /// The max depth to search for nodes
        #[arg(short, long, default_value_t = 1)]
        max_depth: u32,
        /// The search direction
        #[arg(short, long, value_enum, default_value = "any")]
        direction: Direction,
    },
    /// Fetch data from a plugin
    PluginData {
        /// Plugin name
        #[arg(short, long)]
        plugin: String,
        /// Plugin parameters as KEY=VALUE pairs
        #[arg(value_parser = parse_key_val)]
        params: Vec<(String, String)>,
    },
}

impl Command {
    /// Command name as typed on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Command::ListGraphs { .. } => "list-graphs",
            Command::ListCollections { .. } => "list-collections",
            Command::ListEdges { .. } => "list-edges",
            Command::ListQueries { .. } => "list-queries",
            Command::GetNode { .. } => "get-node",
            Command::GetPlugins => "get-plugins",
            Command::Query { .. } => "query",
            Command::Search { .. } => "search",
            Command::Traversal { .. } => "traversal",
            Command::PluginData { .. } => "plugin-data",
        }
    }
}

/// Executes one subcommand, printing the resolved value as JSON or the
/// `{"error": "<command>: <message>"}` shape on rejection.
pub async fn run(client: &GmapClient, command: Command) {
    let name = command.name();
    match dispatch(client, command).await {
        Ok(value) => print_json(&value),
        Err(err) => print_json(&json!({ "error": format!("{}: {}", name, err) })),
    }
}

async fn dispatch(client: &GmapClient, command: Command) -> Result<Value> {
    match command {
        Command::ListGraphs { per_page, page } => {
            client.list_graphs(PageParams { per_page, page }).await
        }
        Command::ListCollections { per_page, page } => {
            client.list_collections(PageParams { per_page, page }).await
        }
        Command::ListEdges { per_page, page } => {
            client.list_edges(PageParams { per_page, page }).await
        }
        Command::ListQueries { per_page, page } => {
            client.list_queries(PageParams { per_page, page }).await
        }
        Command::GetNode {
            collection,
            node_id,
        } => client.get_node(&collection, &node_id).await,
        Command::GetPlugins => client.list_plugins().await,
        Command::Query { kind, value } => client.run_query(&kind, &value).await,
        Command::Search {
            collections,
            query,
            per_page,
            page,
        } => {
            let params = SearchParams {
                collections,
                query,
                per_page,
                page,
            };
            client.search(&params).await
        }
        Command::Traversal {
            graphs,
            start_vertex,
            max_depth,
            direction,
        } => {
            let params = TraversalParams {
                start_vertex,
                max_depth,
                direction,
            };
            match graphs.as_slice() {
                [graph] => client.traversal(graph, &params).await,
                _ => client
                    .traversal_multiple(&graphs, &params)
                    .await
                    .map(Value::Array),
            }
        }
        Command::PluginData { plugin, params } => {
            let body: serde_json::Map<String, Value> = params
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect();
            client.plugin_data(&plugin, &body).await
        }
    }
}

fn print_json(value: &Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

/// Parses a KEY=VALUE pair for plugin parameters
fn parse_key_val(s: &str) -> std::result::Result<(String, String), String> {
    s.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("invalid KEY=VALUE pair: {}", s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliArgs;
    use clap::Parser;

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("ip=10.0.0.1"),
            Ok(("ip".to_string(), "10.0.0.1".to_string()))
        );
        assert_eq!(
            parse_key_val("query=a=b"),
            Ok(("query".to_string(), "a=b".to_string()))
        );
        assert!(parse_key_val("no-separator").is_err());
    }

    #[test]
    fn test_command_names_match_cli_spelling() {
        let command = Command::GetNode {
            collection: "vms".to_string(),
            node_id: "42".to_string(),
        };
        assert_eq!(command.name(), "get-node");
        assert_eq!(Command::GetPlugins.name(), "get-plugins");
    }

    #[test]
    fn test_traversal_accepts_repeated_graph_flag() {
        let args = CliArgs::parse_from([
            "gmap",
            "--url",
            "http://localhost:5000",
            "--username",
            "u",
            "--password",
            "p",
            "traversal",
            "--graph",
            "g1",
            "--graph",
            "g2",
            "--start-vertex",
            "vms/1",
        ]);

        match args.command {
            Command::Traversal {
                graphs,
                start_vertex,
                max_depth,
                direction,
            } => {
                assert_eq!(graphs, vec!["g1".to_string(), "g2".to_string()]);
                assert_eq!(start_vertex, "vms/1");
                assert_eq!(max_depth, 1);
                assert_eq!(direction, Direction::Any);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
