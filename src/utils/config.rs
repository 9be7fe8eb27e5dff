use rustyline::EditMode;
use std::env;
use std::path::PathBuf;

const DEFAULT_PROMPT: &str = "sish> ";

pub struct Config {
    pub name: String,
    pub config_dir: PathBuf,
    pub prompt: String,
    pub history_file: PathBuf,
    pub editor_mode: String,
    pub logger_level: String,
    pub logger_dir: PathBuf,
}

impl Config {
    fn get_config_dir(home: Option<String>) -> PathBuf {
        match home {
            Some(home) if !home.is_empty() => PathBuf::from(home).join(".config/sish"),
            _ => PathBuf::from("tmp"),
        }
    }

    fn default(home: Option<String>) -> Self {
        let config_dir = Self::get_config_dir(home);
        Config {
            name: env!("CARGO_PKG_NAME").to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
            history_file: config_dir.join("history"),
            editor_mode: String::from("emacs"),
            logger_level: String::from("off"),
            logger_dir: config_dir.join("logs"),
            config_dir,
        }
    }

    pub fn new() -> Self {
        let config_dir = Self::get_config_dir(env::var("HOME").ok());
        // 优先加载配置目录下的 .env
        dotenv::from_path(config_dir.join(".env")).ok();

        Self::from_env(|key| env::var(key).ok())
    }

    /// Builds a config from defaults overridden by `SISH_*` variables.
    pub fn from_env<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default(var("HOME"));

        if let Some(prompt) = var("SISH_PROMPT") {
            config.prompt = prompt;
        }

        if let Some(editor) = var("SISH_EDITOR") {
            config.editor_mode = editor;
        }

        if let Some(history) = var("SISH_HISTORY") {
            config.history_file = PathBuf::from(history);
        }

        if let Some(level) = var("SISH_LOG_LEVEL") {
            config.logger_level = level;
        }

        if let Some(dir) = var("SISH_LOG_DIR") {
            config.logger_dir = PathBuf::from(dir);
        }

        config
    }

    pub fn get_edit_mode(&self) -> EditMode {
        match self.editor_mode.to_lowercase().as_str() {
            "vi" => EditMode::Vi,
            _ => EditMode::Emacs,
        }
    }
}
