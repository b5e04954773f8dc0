pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod playlist;
pub mod search;
pub mod slides;

pub use app::{run, Summary};
pub use cli::Cli;
pub use config::Config;
pub use error::{DiashowError, Result};
pub use playlist::{Order, Playlist};
pub use search::{Searcher, ToolSearcher};
