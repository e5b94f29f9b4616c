use crate::app::error::{AppError, Result};
use crate::app::formatter::OutputGenerator;
use crate::app::matcher::ExtensionMatcher;
use crate::app::models::{Collection, FileRecord, RuntimeConfig};
use ignore::{DirEntry, WalkBuilder};
use pathdiff::diff_paths;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

pub struct Collector<'a> {
    config: &'a RuntimeConfig,
    matcher: ExtensionMatcher,
}

impl<'a> Collector<'a> {
    pub fn new(config: &'a RuntimeConfig) -> Self {
        Self {
            config,
            matcher: ExtensionMatcher::new(&config.include, &config.exclude),
        }
    }

    /// Depth-first pre-order walk of the root, framing every matching file.
    ///
    /// The first directory or file read error aborts the whole collection.
    pub fn collect(&self) -> Result<Collection> {
        let mut collection = Collection::default();

        for result in self.walker() {
            let entry = result?;
            if is_dir(&entry) {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if !self.matcher.should_include(&name) {
                log::trace!("Skipping {}", entry.path().display());
                continue;
            }

            self.read_into(entry.path(), &mut collection)?;
        }

        log::debug!(
            "Collected {} files ({} bytes)",
            collection.totals.files,
            collection.totals.bytes
        );
        Ok(collection)
    }

    /// Plain walker: no ignore files, no hidden-file rules, links not followed.
    /// Only the configured directory names prune the walk.
    fn walker(&self) -> ignore::Walk {
        let ignore_dirs: HashSet<String> = self.config.ignore.iter().cloned().collect();

        let mut builder = WalkBuilder::new(&self.config.root);
        builder.standard_filters(false).follow_links(false);
        if self.config.sort {
            builder.sort_by_file_name(|a, b| a.cmp(b));
        }
        builder.filter_entry(move |entry| {
            let skip = entry.depth() > 0
                && is_dir(entry)
                && ignore_dirs.contains(&*entry.file_name().to_string_lossy());
            if skip {
                log::trace!("Ignoring directory {}", entry.path().display());
            }
            !skip
        });
        builder.build()
    }

    fn read_into(&self, path: &Path, collection: &mut Collection) -> Result<()> {
        let data = fs::read(path).map_err(|source| AppError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let lines = data.iter().filter(|&&b| b == b'\n').count();

        let record = FileRecord {
            relative_path: self.relative_path(path),
            lines,
            data: &data,
        };
        log::trace!("Including {} ({} lines)", record.relative_path, lines);
        OutputGenerator::write_frame(&mut collection.content, &record);

        collection.totals.files += 1;
        collection.totals.lines += lines;
        collection.totals.bytes += data.len() as u64;
        Ok(())
    }

    fn relative_path(&self, path: &Path) -> String {
        match diff_paths(path, &self.config.root) {
            Some(rel) if !rel.as_os_str().is_empty() => rel.to_string_lossy().into_owned(),
            _ => path.to_string_lossy().into_owned(),
        }
    }
}

fn is_dir(entry: &DirEntry) -> bool {
    entry.file_type().map_or(false, |ft| ft.is_dir())
}
