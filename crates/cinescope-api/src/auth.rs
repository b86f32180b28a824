use cinescope_config::CredentialStore;
use cinescope_models::User;
use parking_lot::RwLock;

/// Supplies the bearer token attached to every outgoing request
pub trait TokenSource: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    user: Option<User>,
}

/// Current user and token, shared with whatever builds an [`ApiClient`](crate::ApiClient).
///
/// Token acquisition happens elsewhere; the session only holds what it is
/// given and forgets it on [`logout`](AuthSession::logout).
#[derive(Debug, Default)]
pub struct AuthSession {
    state: RwLock<SessionState>,
}

impl AuthSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a session saved by a previous `login`
    pub fn from_credentials(store: &CredentialStore) -> Self {
        let session = Self::new();
        if let Some(token) = store.get_auth_token() {
            let user = store.get_user_name().map(|name| User {
                id: None,
                name: name.clone(),
                email: store.get_user_email().cloned(),
            });
            session.login(token.clone(), user);
        }
        session
    }

    pub fn login(&self, token: impl Into<String>, user: Option<User>) {
        let token = token.into();
        let mut state = self.state.write();
        state.token = Some(token.trim().to_string()).filter(|t| !t.is_empty());
        state.user = user;
    }

    pub fn logout(&self) {
        let mut state = self.state.write();
        state.token = None;
        state.user = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().token.is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.state.read().token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.read().user.clone()
    }
}

impl TokenSource for AuthSession {
    fn bearer_token(&self) -> Option<String> {
        self.token()
    }
}
