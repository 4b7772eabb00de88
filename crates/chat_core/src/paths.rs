use std::path::PathBuf;

/// LegalMind configuration directory (~/.legalmind)
pub fn legalmind_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
        .join(".legalmind")
}

/// Path of the JSON configuration file
pub fn config_json_path() -> PathBuf {
    legalmind_dir().join("config.json")
}
