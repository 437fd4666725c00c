//! Login collaborator — injected so the core never embeds credentials.

use std::collections::BTreeMap;

use crate::config::Config;

/// Credential check, injected into the presentation layer.
pub trait Authenticator: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;

    /// Whether a login screen should be shown at all.
    fn login_required(&self) -> bool {
        true
    }
}

/// Verifies against the config file's `[users]` table.
pub struct ConfigAuth {
    users: BTreeMap<String, String>,
}

impl ConfigAuth {
    pub fn new(users: BTreeMap<String, String>) -> Self {
        Self { users }
    }
}

impl Authenticator for ConfigAuth {
    fn verify(&self, username: &str, password: &str) -> bool {
        self.users.get(username).is_some_and(|p| p == password)
    }
}

/// No users configured: skip the login screen entirely.
pub struct OpenAccess;

impl Authenticator for OpenAccess {
    fn verify(&self, _username: &str, _password: &str) -> bool {
        true
    }

    fn login_required(&self) -> bool {
        false
    }
}

/// Pick the authenticator the config implies.
pub fn from_config(config: &Config) -> Box<dyn Authenticator> {
    if config.users.is_empty() {
        Box::new(OpenAccess)
    } else {
        Box::new(ConfigAuth::new(config.users.clone()))
    }
}
