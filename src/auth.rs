use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Password Toggl expects next to an API token in the basic auth pair.
pub const TOKEN_SECRET: &str = "api_token";

/// Credentials rendered into an HTTP Basic `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub enum Auth {
    Basic { username: String, password: String },
    Token(String),
}

impl Auth {
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Auth::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn token(token: impl Into<String>) -> Self {
        Auth::Token(token.into())
    }

    fn credentials(&self) -> (&str, &str) {
        match self {
            Auth::Basic { username, password } => (username, password),
            Auth::Token(token) => (token, TOKEN_SECRET),
        }
    }

    pub fn header_value(&self) -> String {
        let (username, password) = self.credentials();
        let encoded = STANDARD.encode(format!("{username}:{password}"));
        format!("Basic {encoded}")
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Auth::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"[REDACTED]")
                .finish(),
            Auth::Token(_) => f.debug_tuple("Token").field(&"[REDACTED]").finish(),
        }
    }
}
