use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(PathBuf::from(home).join(".local").join("state").join("guessle"))
        } else {
            ProjectDirs::from("", "", "guessle").map(|proj_dirs| proj_dirs.data_local_dir().to_path_buf())
        }
    }

    pub fn stats_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("stats.json"))
    }

    pub fn history_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("history.csv"))
    }
}
