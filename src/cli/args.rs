//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{Config, ConfigColorMode, ConfigSortOrder};

use super::commands::Commands;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum SortOrder {
    /// Oldest first (default)
    #[default]
    Asc,
    /// Newest first
    Desc,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Debug, Parser)]
#[command(name = "safespeak")]
#[command(about = "SafeSpeak incident report statistics", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Report export: file, directory, glob pattern, or "-" for stdin
    #[arg(short, long, global = true, value_name = "PATH")]
    pub(crate) input: Option<String>,

    /// SafeSpeak API base URL (used when no --input is given)
    #[arg(long, global = true, env = "SAFESPEAK_SERVER_URL", value_name = "URL")]
    pub(crate) server: Option<String>,

    /// Config file (default: ~/.config/safespeak/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,

    /// Filter from date (YYYYMMDD or YYYY-MM-DD)
    #[arg(short, long, global = true)]
    pub(crate) since: Option<String>,

    /// Filter until date (YYYYMMDD or YYYY-MM-DD)
    #[arg(short, long, global = true)]
    pub(crate) until: Option<String>,

    /// Output chart data as JSON
    #[arg(short, long, global = true)]
    pub(crate) json: bool,

    /// Output as CSV
    #[arg(long, global = true, conflicts_with = "json")]
    pub(crate) csv: bool,

    /// Row order for date-keyed tables
    #[arg(short, long, global = true, value_enum, default_value = "asc")]
    pub(crate) order: SortOrder,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Timezone for month buckets (e.g., "Asia/Kolkata", "UTC", "local")
    #[arg(long, global = true, value_name = "TZ")]
    pub(crate) timezone: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub(crate) debug: bool,

    /// Only log warnings and errors, omit the summary line
    #[arg(short, long, global = true)]
    pub(crate) quiet: bool,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        // For boolean flags, config only applies if CLI is false (default)
        if !self.no_color && config.no_color {
            self.no_color = true;
        }
        if !self.debug && config.debug {
            self.debug = true;
        }
        if !self.quiet && config.quiet {
            self.quiet = true;
        }

        // For enum values, only override if CLI is at default
        if let Some(order) = config.order
            && matches!(self.order, SortOrder::Asc)
            && matches!(order, ConfigSortOrder::Desc)
        {
            self.order = SortOrder::Desc;
        }

        if let Some(color) = config.color
            && matches!(self.color, ColorMode::Auto)
        {
            match color {
                ConfigColorMode::Always => self.color = ColorMode::Always,
                ConfigColorMode::Never => self.color = ColorMode::Never,
                ConfigColorMode::Auto => {}
            }
        }

        // String options: only apply if CLI didn't set them
        if self.input.is_none() {
            self.input = config.input.clone();
        }
        if self.server.is_none() {
            self.server = config.server_url.clone();
        }
        if self.timezone.is_none() {
            self.timezone = config.timezone.clone();
        }

        self
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }
}
