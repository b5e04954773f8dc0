use clap::Parser;

/// Collect image paths from the desktop search index into a slideshow file.
#[derive(Parser, Debug)]
#[clap(long_about = None)]
pub struct Cli {
    /// Search pattern handed to the indexing tool (see mdfind)
    #[clap(value_name = "PATTERN")]
    pub pattern: String,
}
