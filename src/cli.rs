use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Command line arguments for the application
///
/// One invocation runs the whole pipeline once: fetch the configured
/// leagues, reconcile against the local cache, enrich new matches and write
/// the ordered game list. Designed to run from cron; all flags override the
/// config file for this run only.
#[derive(Parser, Debug)]
#[command(author = "Niko Salonen", about, long_about = None)]
#[command(disable_version_flag = true)]
#[command(styles = get_styles())]
pub struct Args {
    /// Fetch a specific league slug instead of the configured list.
    /// Repeat the flag to fetch several leagues.
    #[arg(long = "league", short = 'L', help_heading = "Pipeline Options")]
    pub leagues: Vec<String>,

    /// Keep matches no older than this many days. Matches falling outside
    /// the window are evicted from the cache and the game list.
    #[arg(long = "retention-days", short = 'r', help_heading = "Pipeline Options")]
    pub retention_days: Option<i64>,

    /// Use a custom match cache file instead of the configured location.
    #[arg(long = "cache-file", help_heading = "Pipeline Options")]
    pub cache_file: Option<String>,

    /// Write the assembled game list to this path instead of the configured
    /// location.
    #[arg(long = "output", short = 'o', help_heading = "Pipeline Options")]
    pub output: Option<String>,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Show version information
    #[arg(short = 'V', long = "version", help_heading = "Info")]
    pub version: bool,

    /// Enable debug logging. Debug-level events are written to the log file
    /// in addition to the run report printed at the end.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}
