use dashmap::DashMap;
use std::sync::Arc;

use crate::config::Config;
use crate::console::ConsoleSession;
use crate::directory::SharedDirectory;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<Config>,
    /// Directory backend shared by all consoles
    pub directory: SharedDirectory,
    /// One console per logged-in user
    consoles: Arc<DashMap<String, ConsoleSession>>,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Config, directory: SharedDirectory) -> Self {
        Self {
            config: Arc::new(config),
            directory,
            consoles: Arc::new(DashMap::new()),
        }
    }

    /// Start a fresh console for a login, replacing any previous one
    pub fn open_console(&self, username: &str) -> ConsoleSession {
        let console = ConsoleSession::new(self.directory.clone());
        self.consoles.insert(username.to_string(), console.clone());
        tracing::debug!("Console opened for {}", username);
        console
    }

    pub fn console(&self, username: &str) -> Option<ConsoleSession> {
        self.consoles.get(username).map(|c| c.value().clone())
    }

    pub fn close_console(&self, username: &str) {
        if self.consoles.remove(username).is_some() {
            tracing::debug!("Console closed for {}", username);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::MemoryDirectoryService;

    #[test]
    fn test_console_registry() {
        let state = AppState::new(Config::default(), Arc::new(MemoryDirectoryService::new()));
        assert!(state.console("alice").is_none());

        state.open_console("alice");
        assert!(state.console("alice").is_some());
        assert!(state.console("bob").is_none());

        state.close_console("alice");
        assert!(state.console("alice").is_none());
    }
}
