//! Configuration management.
//!
//! Settings come from three layers, later ones winning: built-in defaults,
//! an optional `ewyp.toml` in the data directory, and environment
//! variables. A `.env` file is honored by `main` before anything else runs.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::llm::LlmConfig;
use crate::repository::DbContext;

/// Database filename used when no DATABASE_URL is set.
pub const DEFAULT_DATABASE_FILENAME: &str = "ewyp.db";

/// Template filename looked up in the data directory by default.
pub const DEFAULT_TEMPLATE_FILENAME: &str = "ewyp.pdf";

/// Runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base data directory.
    pub data_dir: PathBuf,
    /// Database filename under the data directory.
    pub database_filename: String,
    /// Database URL (overrides data_dir/database_filename if set).
    pub database_url: Option<String>,
    /// Path to the government form template PDF.
    pub template_path: PathBuf,
    /// Tesseract language for OCR, e.g. "pol" or "pol+eng".
    pub ocr_language: String,
    /// LLM client configuration.
    pub llm: LlmConfig,
}

impl Default for Settings {
    fn default() -> Self {
        // Falls back gracefully: data dir -> home dir -> current dir
        let data_dir = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ewyp");

        Self {
            template_path: data_dir.join(DEFAULT_TEMPLATE_FILENAME),
            data_dir,
            database_filename: DEFAULT_DATABASE_FILENAME.to_string(),
            database_url: None,
            ocr_language: "pol".to_string(),
            llm: LlmConfig::default(),
        }
    }
}

/// Optional config file contents (`ewyp.toml`).
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    database_filename: Option<String>,
    database_url: Option<String>,
    template: Option<PathBuf>,
    ocr_language: Option<String>,
    llm: Option<LlmConfig>,
}

impl Settings {
    /// Create settings with a custom data directory.
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            template_path: data_dir.join(DEFAULT_TEMPLATE_FILENAME),
            data_dir,
            ..Default::default()
        }
    }

    /// Load settings: defaults, then `ewyp.toml`, then environment.
    pub fn load(data_dir: Option<PathBuf>) -> Self {
        let data_dir = data_dir.or_else(|| std::env::var("EWYP_DATA_DIR").ok().map(PathBuf::from));
        let mut settings = match data_dir {
            Some(dir) => Self::with_data_dir(dir),
            None => Self::default(),
        };

        let config_path = settings.data_dir.join("ewyp.toml");
        if let Ok(raw) = fs::read_to_string(&config_path) {
            match toml::from_str::<FileConfig>(&raw) {
                Ok(file) => settings.apply_file(file),
                Err(e) => tracing::warn!("ignoring invalid {}: {}", config_path.display(), e),
            }
        }

        settings.apply_env();
        settings
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(name) = file.database_filename {
            self.database_filename = name;
        }
        if let Some(url) = file.database_url {
            self.database_url = Some(url);
        }
        if let Some(template) = file.template {
            self.template_path = self.resolve(template);
        }
        if let Some(lang) = file.ocr_language {
            self.ocr_language = lang;
        }
        if let Some(llm) = file.llm {
            self.llm = llm;
        }
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.database_url = Some(url);
        }
        if let Ok(template) = std::env::var("EWYP_TEMPLATE") {
            self.template_path = self.resolve(PathBuf::from(template));
        }
        if let Ok(lang) = std::env::var("EWYP_OCR_LANG") {
            self.ocr_language = lang;
        }
        self.llm = self.llm.clone().with_env_overrides();
    }

    /// Resolve a possibly relative path against the data directory.
    fn resolve(&self, path: PathBuf) -> PathBuf {
        if path.is_absolute() {
            path
        } else {
            self.data_dir.join(path)
        }
    }

    /// Get the database URL, constructing from path if not explicitly set.
    pub fn database_url(&self) -> String {
        if let Some(ref url) = self.database_url {
            url.clone()
        } else {
            let path = self.data_dir.join(&self.database_filename);
            format!("sqlite:{}", path.display())
        }
    }

    /// Make sure the data directory exists.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.data_dir)
    }

    /// Create a database context for these settings.
    pub fn create_db_context(&self) -> DbContext {
        DbContext::from_url(&self.database_url())
    }

    /// The template path, if the file exists.
    pub fn template_if_present(&self) -> Option<&Path> {
        if self.template_path.exists() {
            Some(&self.template_path)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_url_from_path() {
        let settings = Settings::with_data_dir(PathBuf::from("/srv/ewyp"));
        assert_eq!(settings.database_url(), "sqlite:/srv/ewyp/ewyp.db");
    }

    #[test]
    fn test_file_config_overrides() {
        let mut settings = Settings::with_data_dir(PathBuf::from("/srv/ewyp"));
        let file: FileConfig = toml::from_str(
            r#"
            database_filename = "records.db"
            template = "forms/ewyp.pdf"
            ocr_language = "pol+eng"

            [llm]
            provider = "ollama"
            endpoint = "http://localhost:11434"
            model = "llama3"
            "#,
        )
        .unwrap();
        settings.apply_file(file);

        assert_eq!(settings.database_url(), "sqlite:/srv/ewyp/records.db");
        assert_eq!(
            settings.template_path,
            PathBuf::from("/srv/ewyp/forms/ewyp.pdf")
        );
        assert_eq!(settings.ocr_language, "pol+eng");
        assert_eq!(settings.llm.model, "llama3");
    }
}
