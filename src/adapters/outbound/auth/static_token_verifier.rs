use async_trait::async_trait;
use std::collections::HashMap;

use crate::ports::auth::{AuthenticatedUser, SessionVerifier};

const DEFAULT_SUBJECT: &str = "admin";

/// Verifies tokens against a fixed list issued by the sign-in provider.
///
/// Entries are `subject:token` or a bare `token`, which belongs to `admin`.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenVerifier {
    tokens: HashMap<String, String>,
}

impl StaticTokenVerifier {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens = entries
            .into_iter()
            .filter_map(|entry| {
                let entry = entry.as_ref().trim();
                if entry.is_empty() {
                    return None;
                }
                let (subject, token) = match entry.split_once(':') {
                    Some((subject, token)) => (subject.trim(), token.trim()),
                    None => (DEFAULT_SUBJECT, entry),
                };
                (!token.is_empty()).then(|| (token.to_string(), subject.to_string()))
            })
            .collect();

        Self { tokens }
    }

    /// Parse a comma separated list as found in `AUTH_TOKENS`
    pub fn from_list(list: &str) -> Self {
        Self::new(list.split(','))
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl SessionVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &str) -> Option<AuthenticatedUser> {
        self.tokens.get(token).map(|subject| AuthenticatedUser {
            subject: subject.clone(),
        })
    }
}
