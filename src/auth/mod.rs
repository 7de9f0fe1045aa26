// Authentication module
// Manages the bearer token lifecycle

mod manager;
mod types;

pub use manager::TokenManager;
pub use types::{AuthResponse, TokenState};
