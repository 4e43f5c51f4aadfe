use std::path::PathBuf;

/// Default workspace directory, relative to the current directory.
pub const DEFAULT_WORKSPACE_DIR: &str = ".datamint";

#[derive(Debug, Clone)]
pub struct WorkspacePaths {
    pub root: PathBuf,
    pub config_dir: PathBuf,
    pub logs_dir: PathBuf,
    pub exports_dir: PathBuf,
}

impl WorkspacePaths {
    pub fn new(root: PathBuf) -> Self {
        let config_dir = root.join("config");
        let logs_dir = root.join("logs");
        let exports_dir = root.join("exports");
        Self {
            root,
            config_dir,
            logs_dir,
            exports_dir,
        }
    }

    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join("settings.toml")
    }

    pub fn default_log_path(&self) -> PathBuf {
        self.logs_dir.join("datamint.log")
    }
}

impl Default for WorkspacePaths {
    fn default() -> Self {
        Self::new(PathBuf::from(DEFAULT_WORKSPACE_DIR))
    }
}
