use std::path::{Path, PathBuf};

pub use mdcore_config::{app_data_dir, ConfigError, Settings, Theme};
pub use mdcore_scan::{ScanError, ScanReport};

pub use mdcore_outline::{node_at, parse_text, render_tree, NodeKind, OutlineNode};

pub struct AppService {
    pub settings: Settings,
    settings_path: PathBuf,
}

impl Default for AppService {
    fn default() -> Self {
        Self::load(mdcore_config::settings_path())
    }
}

impl AppService {
    pub fn load(settings_path: impl Into<PathBuf>) -> Self {
        let settings_path = settings_path.into();
        let settings = mdcore_config::load_or_default(&settings_path);
        Self {
            settings,
            settings_path,
        }
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.settings.theme = theme;
    }

    pub fn set_directory(&mut self, directory: impl Into<String>) {
        self.settings.directory = directory.into();
    }

    pub fn set_filenames(&mut self, filenames: impl Into<String>) {
        self.settings.filenames = filenames.into();
    }

    pub fn scan(&self) -> Result<ScanReport, ScanError> {
        let patterns = self.settings.patterns();
        let request = mdcore_scan::validate(&self.settings.directory, &patterns)?;
        Ok(mdcore_scan::scan(&request))
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        mdcore_config::save_to(&self.settings_path, &self.settings)
    }
}
