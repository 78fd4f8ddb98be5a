use std::path::Path;

/// Returns the platform-specific path for the config file.
///
/// Uses the platform config directory (e.g. ~/.config on Linux), falling
/// back to the current directory if it is unavailable.
pub fn get_config_path() -> String {
    dirs::config_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join("vodlist")
        .join("config.toml")
        .to_string_lossy()
        .to_string()
}

/// Returns the platform-specific path for the log directory.
pub fn get_log_dir_path() -> String {
    dirs::config_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join("vodlist")
        .join("logs")
        .to_string_lossy()
        .to_string()
}

/// Returns the default location of the persisted match cache, under the
/// platform cache directory.
pub fn get_default_cache_file_path() -> String {
    dirs::cache_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join("vodlist")
        .join(crate::constants::CACHE_FILE_NAME)
        .to_string_lossy()
        .to_string()
}

/// Returns the default location of the assembled game list, in the current
/// directory so a scheduled run drops its output where it was invoked.
pub fn get_default_output_file_path() -> String {
    Path::new(".")
        .join(crate::constants::OUTPUT_FILE_NAME)
        .to_string_lossy()
        .to_string()
}
