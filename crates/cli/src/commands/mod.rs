use clap::Subcommand;
use std::path::PathBuf;

pub mod level;
pub mod read;
pub mod write;

#[derive(Subcommand)]
pub enum Commands {
    /// Compress a JSON document and store it at PATH
    #[command(visible_alias = "w")]
    Write {
        /// Destination file
        path: PathBuf,

        /// JSON file to store (reads stdin when omitted)
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// Print the JSON document stored at PATH
    #[command(visible_alias = "r")]
    Read {
        /// Compressed file to read
        path: PathBuf,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Show the effective compression level and where it came from
    Level,
}
