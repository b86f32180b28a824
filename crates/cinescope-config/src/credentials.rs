use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

const AUTH_TOKEN: &str = "auth_token";
const AUTH_USER_NAME: &str = "auth_user_name";
const AUTH_USER_EMAIL: &str = "auth_user_email";
const AUTH_SAVED_AT: &str = "auth_saved_at";

#[derive(Debug, Serialize, Deserialize, Default)]
struct CredentialsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

/// Flat key/value TOML file holding the session token between runs
#[derive(Debug)]
pub struct CredentialStore {
    path: PathBuf,
    credentials: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: HashMap::new(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let creds_data: CredentialsData = toml::from_str(&content)?;
            self.credentials = creds_data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let creds_data = CredentialsData {
            data: self.credentials.clone(),
        };
        let content = toml::to_string_pretty(&creds_data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.credentials.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.credentials.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.credentials.remove(key);
    }

    pub fn get_auth_token(&self) -> Option<&String> {
        self.get(AUTH_TOKEN).filter(|token| !token.is_empty())
    }

    /// Store a bearer token and stamp when it was saved
    pub fn set_auth_token(&mut self, token: String) {
        self.set(AUTH_TOKEN.to_string(), token);
        self.set(AUTH_SAVED_AT.to_string(), Utc::now().to_rfc3339());
    }

    pub fn get_token_saved_at(&self) -> Option<DateTime<Utc>> {
        self.get(AUTH_SAVED_AT)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub fn get_user_name(&self) -> Option<&String> {
        self.get(AUTH_USER_NAME)
    }

    pub fn set_user_name(&mut self, name: String) {
        self.set(AUTH_USER_NAME.to_string(), name);
    }

    pub fn get_user_email(&self) -> Option<&String> {
        self.get(AUTH_USER_EMAIL)
    }

    pub fn set_user_email(&mut self, email: String) {
        self.set(AUTH_USER_EMAIL.to_string(), email);
    }

    /// Drop everything belonging to the signed-in session
    pub fn clear_session(&mut self) {
        for key in [AUTH_TOKEN, AUTH_USER_NAME, AUTH_USER_EMAIL, AUTH_SAVED_AT] {
            self.remove(key);
        }
    }

    pub fn get_all_keys(&self) -> Vec<String> {
        self.credentials.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_credential_store_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_path_buf();

        let mut store = CredentialStore::new(path.clone());
        store.set_auth_token("test_token".to_string());
        store.set_user_name("Ripley".to_string());
        store.save().unwrap();

        let mut loaded_store = CredentialStore::new(path);
        loaded_store.load().unwrap();
        assert_eq!(loaded_store.get_auth_token(), Some(&"test_token".to_string()));
        assert_eq!(loaded_store.get_user_name(), Some(&"Ripley".to_string()));
        assert!(loaded_store.get_user_email().is_none());

        let saved_at = loaded_store.get_token_saved_at().unwrap();
        assert!((Utc::now() - saved_at).num_seconds().abs() < 5);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = CredentialStore::new(dir.path().join("credentials.toml"));
        store.load().unwrap();
        assert!(store.get_auth_token().is_none());
        assert!(store.get_all_keys().is_empty());
    }

    #[test]
    fn test_empty_token_is_treated_as_absent() {
        let mut store = CredentialStore::new(PathBuf::from("/tmp/test"));
        store.set(AUTH_TOKEN.to_string(), String::new());
        assert!(store.get_auth_token().is_none());
    }

    #[test]
    fn test_clear_session_keeps_unrelated_keys() {
        let mut store = CredentialStore::new(PathBuf::from("/tmp/test"));
        store.set_auth_token("tok".to_string());
        store.set_user_name("Ripley".to_string());
        store.set_user_email("ripley@example.com".to_string());
        store.set("other".to_string(), "value".to_string());

        store.clear_session();
        assert!(store.get_auth_token().is_none());
        assert!(store.get_user_name().is_none());
        assert!(store.get_user_email().is_none());
        assert!(store.get_token_saved_at().is_none());
        assert_eq!(store.get("other"), Some(&"value".to_string()));
    }
}
