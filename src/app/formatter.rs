use crate::app::models::{FileRecord, RunTotals};
use std::io::Write;

/// Marker used for both the BEGIN and END lines of every frame.
pub const FRAME_MARKER: &str = "FILE";

pub struct OutputGenerator;

impl OutputGenerator {
    /// Appends one framed file to `buf`.
    ///
    /// A newline always follows the raw bytes, so the content sits strictly
    /// between `-----BEGIN FILE-----\n` and `\n-----END FILE-----\n`.
    pub fn write_frame(buf: &mut Vec<u8>, record: &FileRecord<'_>) {
        // Writing into a Vec<u8> cannot fail.
        let _ = write!(
            buf,
            "File: {}\nLines: {}\n-----BEGIN {}-----\n",
            record.relative_path, record.lines, FRAME_MARKER
        );
        buf.extend_from_slice(record.data);
        let _ = write!(buf, "\n-----END {}-----\n\n", FRAME_MARKER);
    }

    /// Tree text first, then every frame exactly as collected.
    pub fn assemble(tree: &str, frames: &[u8]) -> Vec<u8> {
        let mut document = Vec::with_capacity(tree.len() + frames.len());
        document.extend_from_slice(tree.as_bytes());
        document.extend_from_slice(frames);
        document
    }

    pub fn format_summary(totals: &RunTotals) -> String {
        format!(
            "Total files processed: {}\nTotal lines: {}\nTotal size of data: {} bytes",
            totals.files, totals.lines, totals.bytes
        )
    }
}
