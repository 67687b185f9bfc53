use serde::{Deserialize, Serialize};

use crate::entity::{Department, DepartmentId, StaffMember};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Server address (e.g., "0.0.0.0:8080")
    #[serde(default = "default_addr")]
    pub addr: String,
    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
    /// Remote directory configuration
    #[serde(default)]
    pub directory: DirectoryConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Which directory backend the console talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectoryMode {
    /// Remote directory API over HTTP
    #[default]
    Http,
    /// In-process directory, seeded from this file
    Memory,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DirectoryConfig {
    #[serde(default)]
    pub mode: DirectoryMode,
    /// Base URL of the directory API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// HTTP client timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Initial contents for memory mode
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SeedConfig {
    #[serde(default)]
    pub departments: Vec<Department>,
    #[serde(default)]
    pub staff: Vec<SeedStaff>,
}

/// Seed staff entry; `manager` marks the member as a department manager
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeedStaff {
    pub id: i64,
    pub name: String,
    #[serde(rename = "departmentID")]
    pub department_id: DepartmentId,
    #[serde(default)]
    pub manager: bool,
}

impl SeedStaff {
    pub fn member(&self) -> StaffMember {
        StaffMember::new(self.id, self.name.clone())
    }
}

// Default value functions
fn default_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_base_url() -> String {
    "http://localhost:8081/api".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            log: LogConfig::default(),
            directory: DirectoryConfig::default(),
        }
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            mode: DirectoryMode::default(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            seed: SeedConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.addr, "0.0.0.0:8080");
        assert_eq!(config.log.level, "info");
        assert_eq!(config.directory.mode, DirectoryMode::Http);
        assert_eq!(config.directory.timeout_secs, 10);
    }

    #[test]
    fn test_toml_parse() {
        let toml_str = r#"
            addr = "127.0.0.1:9000"

            [directory]
            mode = "memory"
            base_url = "http://directory:8081"

            [[directory.seed.departments]]
            departmentID = 1
            description = "Eng"

            [[directory.seed.staff]]
            id = 7
            name = "Alex"
            departmentID = 1
            manager = true
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.addr, "127.0.0.1:9000");
        assert_eq!(config.directory.mode, DirectoryMode::Memory);
        assert_eq!(config.directory.base_url, "http://directory:8081");
        assert_eq!(config.directory.seed.departments, vec![Department::new(1, "Eng")]);
        assert!(config.directory.seed.staff[0].manager);
        assert_eq!(config.directory.seed.staff[0].member(), StaffMember::new(7, "Alex"));
    }

    #[test]
    fn test_missing_file() {
        assert!(Config::load("/nonexistent/employee_hub.toml").is_err());
    }
}
