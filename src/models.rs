// Parameter shapes for the Globomap endpoints

use clap::ValueEnum;
use serde::Serialize;

/// Pagination window passed to the listing endpoints
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PageParams {
    pub per_page: u32,
    pub page: u32,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            per_page: 10,
            page: 1,
        }
    }
}

/// Parameters for `/collections/search`
#[derive(Debug, Clone, Serialize)]
pub struct SearchParams {
    /// Comma-separated collection names
    pub collections: String,
    pub query: String,
    pub per_page: u32,
    pub page: u32,
}

/// Parameters for a traversal from a start vertex
#[derive(Debug, Clone, Serialize)]
pub struct TraversalParams {
    pub start_vertex: String,
    pub max_depth: u32,
    pub direction: Direction,
}

/// Edge direction followed by a traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Any,
    Inbound,
    Outbound,
}
