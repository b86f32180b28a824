use super::prompts;
use crate::output::Output;
use cinescope_config::{CredentialStore, PathManager};
use cinescope_models::User;
use color_eyre::Result;
use serde_json::json;

pub fn run_login(token: Option<String>, name: Option<String>, email: Option<String>, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create configuration directories: {}", e))?;

    let token = match token {
        Some(token) => token,
        None => prompts::prompt_password("Session token")?,
    };
    let token = token.trim().to_string();
    if token.is_empty() {
        return Err(color_eyre::eyre::eyre!("Token is required"));
    }

    let credentials_file = path_manager.credentials_file();
    let mut cred_store = CredentialStore::new(credentials_file.clone());
    cred_store
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;

    store_session(&mut cred_store, token, name, email);
    cred_store
        .save()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save credentials to {}: {}", credentials_file.display(), e))?;

    let user = cred_store.get_user_name().map(|name| User::named(name.as_str()));
    let display_name = user.as_ref().map_or("User", User::display_name);
    tracing::info!(user = display_name, "Session token stored");

    if output.is_human() {
        output.success(format!("Signed in as {}", display_name));
    } else {
        output.json(&json!({ "type": "login", "user": display_name }));
    }
    Ok(())
}

/// A new token replaces the whole previous session
fn store_session(cred_store: &mut CredentialStore, token: String, name: Option<String>, email: Option<String>) {
    cred_store.clear_session();
    cred_store.set_auth_token(token);
    if let Some(name) = name.filter(|n| !n.trim().is_empty()) {
        cred_store.set_user_name(name.trim().to_string());
    }
    if let Some(email) = email.filter(|e| !e.trim().is_empty()) {
        cred_store.set_user_email(email.trim().to_string());
    }
}

pub fn run_logout(output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let credentials_file = path_manager.credentials_file();

    if !credentials_file.exists() {
        output.info("No stored session found");
        return Ok(());
    }

    let mut cred_store = CredentialStore::new(credentials_file.clone());
    cred_store
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials: {}", e))?;

    if cred_store.get_auth_token().is_none() {
        output.info("No stored session found");
        return Ok(());
    }

    cred_store.clear_session();
    cred_store
        .save()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save credentials: {}", e))?;
    output.success("Signed out");
    Ok(())
}
