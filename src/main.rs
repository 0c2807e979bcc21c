//! readme-studio - write a README with a live styled preview in the terminal.
//!
//! # Usage
//!
//! ```bash
//! readme-studio                       # start from the basic template
//! readme-studio README.md             # edit an existing file
//! readme-studio --template advanced --info project.json
//! readme-studio README.md --html out.html
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use readme_studio::app::App;
use readme_studio::config::{
    ConfigFlags, ThemeMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use readme_studio::template::{ProjectInfo, TemplateKind};
use readme_studio::ui::style::{Background, set_background_mode};
use readme_studio::{export, files, perf, styler};
use tracing_subscriber::EnvFilter;

const PERF_DIRECTIVE: &str = "perf=debug";

/// Write README files with a live styled preview, templates and HTML export
#[derive(Parser, Debug)]
#[command(name = "readme-studio", version, about, long_about = None)]
struct Cli {
    /// Markdown file to open (starts from a template when omitted)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Template loaded when no file is given
    #[arg(long, value_enum, default_value = "basic")]
    template: TemplateKind,

    /// JSON file with project information for the templates
    #[arg(long, value_name = "PATH")]
    info: Option<PathBuf>,

    /// Force preview colors for a light or dark terminal
    #[arg(long, value_enum, default_value = "auto")]
    theme: ThemeMode,

    /// Render the document to a standalone HTML file and exit
    #[arg(long, value_name = "OUT")]
    html: Option<PathBuf>,

    /// Print the preview style tags as JSON and exit
    #[arg(long)]
    tags: bool,

    /// Enable performance logging
    #[arg(long)]
    perf: bool,

    /// Write detailed render debug events to a file
    #[arg(long, value_name = "PATH")]
    render_debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

// Query the terminal background using OSC 11.
// We talk to /dev/tty so the terminal responds even when stdout is piped.
// On non-Unix platforms we skip the query entirely because the fallback
// (stdin/stdout) leaves an orphaned reader thread that blocks the console
// input buffer, preventing crossterm from receiving any keyboard events.
#[cfg(not(unix))]
fn query_terminal_background() -> std::io::Result<Option<(u8, u8, u8)>> {
    Ok(None)
}

#[cfg(unix)]
fn query_terminal_background() -> std::io::Result<Option<(u8, u8, u8)>> {
    use std::io::{Read, Write};
    use std::sync::mpsc;

    let (tx, rx) = mpsc::channel();

    let mut io = std::fs::OpenOptions::new().read(true).write(true).open("/dev/tty")?;
    let reader = io.try_clone()?;

    // OSC 11 query: ESC ] 11 ; ? BEL
    io.write_all(b"\x1b]11;?\x07")?;
    io.flush()?;

    std::thread::spawn(move || {
        let mut reader = reader;
        let mut buf = [0u8; 256];
        let mut collected: Vec<u8> = Vec::new();
        loop {
            match reader.read(&mut buf) {
                Ok(0) => continue,
                Ok(n) => {
                    collected.extend_from_slice(&buf[..n]);
                    if collected.contains(&b'\x07')
                        || collected.windows(2).any(|w| w == b"\x1b\\")
                    {
                        let _ = tx.send(collected);
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });

    let mut collected = Vec::new();
    if let Ok(bytes) = rx.recv_timeout(Duration::from_millis(75)) {
        collected = bytes;
    }

    let mut found: Option<(u8, u8, u8)> = None;
    if !collected.is_empty() {
        let text = String::from_utf8_lossy(&collected);
        if text.contains("rgb:") {
            found = parse_osc11_reply(&text);
        }
    }

    Ok(found)
}

fn theme_from_rgb(r: u8, g: u8, b: u8) -> Background {
    let luma = 0.2126 * f32::from(r) + 0.7152 * f32::from(g) + 0.0722 * f32::from(b);
    if luma >= 140.0 {
        Background::Light
    } else {
        Background::Dark
    }
}

fn detect_theme() -> Option<Background> {
    let _raw = enable_raw_mode();
    let result = query_terminal_background();
    let _ = disable_raw_mode();
    result.ok().flatten().map(|(r, g, b)| theme_from_rgb(r, g, b))
}

fn parse_osc11_reply(reply: &str) -> Option<(u8, u8, u8)> {
    // Expect: ESC ] 11 ; rgb:RRRR/GGGG/BBBB BEL or ST
    let start = reply.find("rgb:")?;
    let data = &reply[start + 4..];
    let mut parts = data.split(|c| c == '/' || c == '\x07' || c == '\x1b');
    let r = parts.next()?;
    let g = parts.next()?;
    let b = parts.next()?;
    Some((parse_osc_component(r)?, parse_osc_component(g)?, parse_osc_component(b)?))
}

fn parse_osc_component(s: &str) -> Option<u8> {
    let hex = s.trim();
    if hex.len() >= 4 {
        let v = u16::from_str_radix(hex.get(..4)?, 16).ok()?;
        Some((v >> 8) as u8)
    } else if hex.len() == 2 {
        u8::from_str_radix(hex, 16).ok()
    } else {
        None
    }
}

/// The document to start from: FILE if given, otherwise the template.
fn initial_text(file: Option<&Path>, template: TemplateKind, info: &ProjectInfo) -> Result<String> {
    match file {
        Some(path) => {
            files::import_text(path).with_context(|| format!("Failed to open {}", path.display()))
        }
        None => Ok(template.render(info)),
    }
}

/// Warnings by default; `--perf` also lets the timing scopes through.
fn log_filter(base: EnvFilter, perf: bool) -> EnvFilter {
    let filter = base.add_directive(tracing::Level::WARN.into());
    if !perf {
        return filter;
    }
    match PERF_DIRECTIVE.parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(
            tracing_subscriber::EnvFilter::from_default_env(),
            effective.perf,
        ))
        .with_writer(std::io::stderr)
        .init();

    perf::set_enabled(effective.perf);
    let render_debug_log_path = effective
        .render_debug_log
        .clone()
        .or_else(|| std::env::var_os(perf::DEBUG_LOG_ENV).map(PathBuf::from));
    if let Err(err) = perf::set_debug_log_path(render_debug_log_path.as_deref()) {
        eprintln!(
            "[warn] Failed to initialize render debug log {}: {}",
            render_debug_log_path
                .as_ref()
                .map_or_else(|| "<unset>".to_string(), |p| p.display().to_string()),
            err
        );
    }

    let template = effective.template.unwrap_or(cli.template);
    let project_info = match &effective.info {
        Some(path) => ProjectInfo::load(path)?,
        None => ProjectInfo::default(),
    };

    if cli.html.is_some() || cli.tags {
        let text = initial_text(cli.file.as_deref(), template, &project_info)?;
        if let Some(out) = &cli.html {
            let html = export::render_document(&text)?;
            std::fs::write(out, html)
                .with_context(|| format!("Failed to write {}", out.display()))?;
            tracing::info!(path = %out.display(), "wrote HTML preview");
        }
        if cli.tags {
            let preview = styler::render_pass(&text);
            let json = serde_json::to_string_pretty(preview.tags())
                .context("Failed to serialize style tags")?;
            println!("{json}");
        }
        return Ok(());
    }

    match effective.theme.unwrap_or(cli.theme) {
        ThemeMode::Auto => set_background_mode(detect_theme()),
        ThemeMode::Light => set_background_mode(Some(Background::Light)),
        ThemeMode::Dark => set_background_mode(Some(Background::Dark)),
    }

    // Run the application
    let mut app = App::new()
        .with_file(cli.file)
        .with_template(template)
        .with_project_info(project_info)
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );

    app.run().context("Application error")
}
