use crate::crypto::{PasswordHasher, DEFAULT_ITERATIONS};
use clap::Parser;
use std::path::PathBuf;

/// A password-protected personal diary for the terminal
#[derive(Parser, Debug, Clone)]
#[command(name = "pocket-diary", author, version, long_about = None)]
pub struct Config {
    /// Directory holding users.json, the per-user diaries, and exports
    #[arg(short = 'd', long, env = "POCKET_DIARY_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Pre-fill the login form with this username
    #[arg(short = 'u', long)]
    pub user: Option<String>,

    /// Start with the dark palette
    #[arg(long)]
    pub dark: bool,

    /// Log file (defaults to pocket_diary.log inside the data directory)
    #[arg(long, env = "POCKET_DIARY_LOG")]
    pub log_file: Option<PathBuf>,

    /// PBKDF2 iteration count; existing hashes only verify with the count they were made with
    #[arg(long, default_value_t = DEFAULT_ITERATIONS, hide = true)]
    pub kdf_iterations: u32,
}

impl Config {
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("pocket_diary.log"))
    }

    pub fn hasher(&self) -> PasswordHasher {
        PasswordHasher::with_iterations(self.kdf_iterations)
    }
}
