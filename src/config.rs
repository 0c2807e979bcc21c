//! Saved command-line defaults.
//!
//! Config files hold plain flag tokens, one or more per line, with `#`
//! comments. The global file is merged with a local `.readmestudiorc`, and
//! flags given on the command line win over both.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::template::TemplateKind;

const APP_DIR: &str = "readme-studio";
const LOCAL_FILE: &str = ".readmestudiorc";

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Auto,
    Light,
    Dark,
}

impl ThemeMode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "auto" => Some(Self::Auto),
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

fn parse_template(s: &str) -> Option<TemplateKind> {
    match s {
        "basic" => Some(TemplateKind::Basic),
        "advanced" => Some(TemplateKind::Advanced),
        _ => None,
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub perf: bool,
    pub theme: Option<ThemeMode>,
    pub template: Option<TemplateKind>,
    pub info: Option<PathBuf>,
    pub render_debug_log: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge two flag sets; options from `other` take precedence.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            perf: self.perf || other.perf,
            theme: other.theme.or(self.theme),
            template: other.template.or(self.template),
            info: other.info.clone().or_else(|| self.info.clone()),
            render_debug_log: other
                .render_debug_log
                .clone()
                .or_else(|| self.render_debug_log.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join(APP_DIR).join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join(APP_DIR)
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join(APP_DIR).join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join(APP_DIR).join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(LOCAL_FILE)
}

/// Read flags from `path`. A missing file yields no flags.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# readme-studio defaults (saved with --save)".to_string()];
    if let Some(template) = flags.template {
        lines.push(format!("--template {}", template.label()));
    }
    if let Some(info) = &flags.info {
        lines.push(format!("--info {}", info.display()));
    }
    if let Some(theme) = flags.theme {
        lines.push(format!("--theme {}", theme.as_str()));
    }
    if flags.perf {
        lines.push("--perf".to_string());
    }
    if let Some(log) = &flags.render_debug_log {
        lines.push(format!("--render-debug-log {}", log.display()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick known flags out of a token list. Unknown tokens and bad values are
/// skipped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut iter = tokens.iter();
    while let Some(token) = iter.next() {
        let (name, inline_value) = match token.split_once('=') {
            Some((name, value)) => (name, Some(value.to_string())),
            None => (token.as_str(), None),
        };
        if name == "--perf" {
            flags.perf = true;
            continue;
        }
        if !matches!(name, "--theme" | "--template" | "--info" | "--render-debug-log") {
            continue;
        }
        let Some(value) = inline_value.or_else(|| iter.next().cloned()) else {
            break;
        };
        match name {
            "--theme" => flags.theme = ThemeMode::parse(&value),
            "--template" => flags.template = parse_template(&value),
            "--info" => flags.info = Some(PathBuf::from(value)),
            _ => flags.render_debug_log = Some(PathBuf::from(value)),
        }
    }
    flags
}
