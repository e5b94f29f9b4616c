use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "code2text",
    author,
    version,
    about = "Collects code files and outputs them into a single text document",
    long_about = "A fast and flexible utility to collect code files from a directory tree \
and consolidate them into a single text document for analysis."
)]
pub struct Cli {
    /// Directory to collect from
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Output file name [default: output.txt]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// File extensions to include (e.g. '.go,.js') [default: .go,.js]
    #[arg(short, long, value_delimiter = ',')]
    pub include: Option<Vec<String>>,

    /// File extensions to exclude even when included
    #[arg(short, long, value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,

    /// Directory names to skip entirely [default: .git,.idea]
    #[arg(short = 'g', long, value_delimiter = ',')]
    pub ignore: Option<Vec<String>>,

    /// Use a predefined set of options from presets.toml
    #[arg(long)]
    pub preset: Option<String>,

    /// Visit directory entries in file-name order
    #[arg(long)]
    pub sort: bool,
}
