use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Bienestar";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "bienestar=info"
}

/// Get the application data directory
/// ~/Bienestar/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Bienestar")
}

/// Path of the SQLite file backing the persistence gateway.
pub fn journal_db_path() -> PathBuf {
    app_data_dir().join("journal.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("Bienestar"));
    }

    #[test]
    fn journal_db_under_app_data() {
        let db = journal_db_path();
        assert!(db.starts_with(app_data_dir()));
        assert!(db.ends_with("journal.db"));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, env!("CARGO_PKG_VERSION"));
    }
}
