use async_trait::async_trait;

/// The user behind a verified session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub subject: String,
}

/// Port for the external authentication provider.
/// Sign-in and sign-up happen elsewhere; this only checks a presented token.
#[async_trait]
pub trait SessionVerifier: Send + Sync + 'static {
    async fn verify(&self, token: &str) -> Option<AuthenticatedUser>;
}
