use crate::app::cli::Cli;
use crate::app::models::{RuntimeConfig, DEFAULT_IGNORE, DEFAULT_INCLUDE, DEFAULT_OUTPUT};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PresetConfig {
    pub include: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub ignore: Option<Vec<String>>,
    pub output: Option<PathBuf>,
    pub sort: Option<bool>,
}

pub fn presets_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(home.join(".config").join("code2text").join("presets.toml"))
}

/// Presets are optional: without a home directory there are simply none.
pub fn load_presets(path: Option<&Path>) -> Result<HashMap<String, PresetConfig>> {
    match path {
        Some(path) => load_presets_file(path),
        None => {
            log::debug!("No home directory; skipping presets");
            Ok(HashMap::new())
        }
    }
}

/// A missing file yields no presets; an unreadable or malformed one is an error.
pub fn load_presets_file(path: &Path) -> Result<HashMap<String, PresetConfig>> {
    if !path.exists() {
        log::debug!("No presets file at {}", path.display());
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read presets at {}", path.display()))?;
    parse_presets(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn parse_presets(content: &str) -> Result<HashMap<String, PresetConfig>> {
    let parsed: PresetsFile = toml::from_str(content)?;
    Ok(parsed.presets)
}

/// Preset values first, then CLI values, duplicates dropped. `None` when
/// neither side supplied the field.
fn merge_vecs(
    preset_vec: Option<Vec<String>>,
    cli_vec: Option<Vec<String>>,
) -> Option<Vec<String>> {
    if preset_vec.is_none() && cli_vec.is_none() {
        return None;
    }
    let mut combined = preset_vec.unwrap_or_default();
    if let Some(mut cli_items) = cli_vec {
        combined.append(&mut cli_items);
    }
    let mut seen = std::collections::HashSet::new();
    combined.retain(|item| seen.insert(item.clone()));
    Some(combined)
}

/// A lone empty value (`-i ""`) means "no entries", as with a CSV flag that
/// was given nothing. An explicit empty entry needs `-i ,` or a preset.
fn cli_list(values: Option<Vec<String>>) -> Option<Vec<String>> {
    values.map(|items| {
        if items.len() == 1 && items[0].is_empty() {
            Vec::new()
        } else {
            items
        }
    })
}

fn defaults(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Name used to auto-select a preset: the root folder's own name.
pub fn project_name(root: &Path) -> Option<String> {
    let resolved = fs::canonicalize(root).ok()?;
    resolved.file_name().map(|n| n.to_string_lossy().into_owned())
}

pub fn resolve_config(cli: Cli) -> Result<RuntimeConfig> {
    let presets = load_presets(presets_path().as_deref())?;
    let project = project_name(&cli.root);
    resolve_with_presets(cli, &presets, project.as_deref())
}

/// Preset choice: `--preset` > folder name > none. Naming a preset that does
/// not exist is an error; a folder name without a preset is not.
pub fn resolve_with_presets(
    cli: Cli,
    presets: &HashMap<String, PresetConfig>,
    project_name: Option<&str>,
) -> Result<RuntimeConfig> {
    let preset = match (cli.preset.as_deref(), project_name) {
        (Some(name), _) => presets
            .get(name)
            .cloned()
            .with_context(|| format!("Unknown preset '{}'", name))?,
        (None, Some(name)) => presets.get(name).cloned().unwrap_or_default(),
        (None, None) => PresetConfig::default(),
    };

    let config = RuntimeConfig {
        root: cli.root,
        include: merge_vecs(preset.include, cli_list(cli.include))
            .unwrap_or_else(|| defaults(DEFAULT_INCLUDE)),
        exclude: merge_vecs(preset.exclude, cli_list(cli.exclude)).unwrap_or_default(),
        ignore: merge_vecs(preset.ignore, cli_list(cli.ignore))
            .unwrap_or_else(|| defaults(DEFAULT_IGNORE)),
        output: cli
            .output
            .or(preset.output)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
        sort: cli.sort || preset.sort.unwrap_or(false),
    };

    for ext in &config.include {
        if !ext.is_empty() && !ext.starts_with('.') {
            log::warn!("💡 Include entry '{}' has no leading dot and will never match", ext);
        }
    }

    Ok(config)
}
