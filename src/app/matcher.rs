use std::collections::HashSet;

/// Returns the extension of a file name: everything from the last `.` on,
/// dot included. Names without a dot have the empty extension.
pub fn extension_of(file_name: &str) -> &str {
    file_name.rfind('.').map_or("", |idx| &file_name[idx..])
}

#[derive(Debug, Clone)]
pub struct ExtensionMatcher {
    include: HashSet<String>,
    exclude: HashSet<String>,
}

impl ExtensionMatcher {
    pub fn new(include: &[String], exclude: &[String]) -> Self {
        Self {
            include: include.iter().cloned().collect(),
            exclude: exclude.iter().cloned().collect(),
        }
    }

    /// Exclusion always wins over inclusion.
    pub fn should_include(&self, file_name: &str) -> bool {
        let ext = extension_of(file_name);
        self.include.contains(ext) && !self.exclude.contains(ext)
    }
}
