use std::path::PathBuf;

pub const DEFAULT_OUTPUT: &str = "output.txt";
pub const DEFAULT_INCLUDE: &[&str] = &[".go", ".js"];
pub const DEFAULT_IGNORE: &[&str] = &[".git", ".idea"];

/// Represents the final configuration after merging presets and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub root: PathBuf,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub ignore: Vec<String>,
    pub output: PathBuf,
    /// Visit directory entries by file name instead of listing order.
    pub sort: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            include: DEFAULT_INCLUDE.iter().map(|s| s.to_string()).collect(),
            exclude: Vec::new(),
            ignore: DEFAULT_IGNORE.iter().map(|s| s.to_string()).collect(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            sort: false,
        }
    }
}

/// Running totals for one invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunTotals {
    pub files: usize,
    pub lines: usize,
    pub bytes: u64,
}

/// Framed file contents in traversal order, plus the totals they add up to.
#[derive(Debug, Default)]
pub struct Collection {
    pub content: Vec<u8>,
    pub totals: RunTotals,
}

/// A single file picked up by the walk.
#[derive(Debug)]
pub struct FileRecord<'a> {
    pub relative_path: String,
    pub lines: usize,
    pub data: &'a [u8],
}
