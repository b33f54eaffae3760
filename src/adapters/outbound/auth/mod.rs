mod static_token_verifier;

pub use static_token_verifier::StaticTokenVerifier;
