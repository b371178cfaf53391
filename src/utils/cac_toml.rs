//! Load `cac.toml` (CLI only). Lib callers build a [`JobConfig`] directly.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::JobConfig;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CacToml {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsSection {
    dir: Option<String>,
    files: Option<Vec<String>>,
    out_dir: Option<String>,
    target: Option<String>,
    sources: Option<Vec<String>>,
    except: Option<Vec<String>>,
    command: Option<String>,
    jobs: Option<usize>,
    delete: Option<bool>,
    create_out_dir: Option<bool>,
    quiet: Option<bool>,
    verbose: Option<bool>,
    follow_links: Option<bool>,
    progress: Option<bool>,
    tool_check: Option<bool>,
}

impl CacToml {
    pub(crate) fn verbose(&self) -> Option<bool> {
        self.settings.verbose
    }
}

/// Load a config file. `Ok(None)` when it does not exist; unreadable or invalid files are errors.
pub(crate) fn load_cac_toml(path: &Path) -> Result<Option<CacToml>> {
    if !path.exists() {
        return Ok(None);
    }
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read config file {}", path.display()))?;
    let file = parse_cac_toml(&s).with_context(|| format!("parse config file {}", path.display()))?;
    Ok(Some(file))
}

pub(crate) fn parse_cac_toml(s: &str) -> std::result::Result<CacToml, toml::de::Error> {
    toml::from_str(s)
}

/// Overwrite config field from file when present.
macro_rules! apply_file_opt {
    ($set:expr, $config:expr, $set_field:ident => $config_field:ident) => {
        if let Some(ref v) = $set.$set_field {
            $config.$config_field = v.clone();
        }
    };
}

/// Apply file config (only fields present in the file). Call before applying CLI flags.
pub(crate) fn apply_file_to_config(file: &CacToml, config: &mut JobConfig) {
    let set = &file.settings;
    if let Some(ref d) = set.dir {
        config.source_dir = Some(PathBuf::from(d));
    }
    if let Some(ref files) = set.files {
        config.files = files.iter().map(PathBuf::from).collect();
    }
    if let Some(ref o) = set.out_dir {
        config.out_dir = PathBuf::from(o);
    }
    if let Some(n) = set.jobs {
        config.num_threads = Some(n);
    }
    apply_file_opt!(set, config, target => target_ext);
    apply_file_opt!(set, config, sources => sources);
    apply_file_opt!(set, config, except => except);
    apply_file_opt!(set, config, command => command);
    apply_file_opt!(set, config, delete => delete_original);
    apply_file_opt!(set, config, create_out_dir => create_out_dir);
    apply_file_opt!(set, config, quiet => quiet);
    apply_file_opt!(set, config, follow_links => follow_links);
    apply_file_opt!(set, config, progress => progress);
    apply_file_opt!(set, config, tool_check => check_tool);
}
