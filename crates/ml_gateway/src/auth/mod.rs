//! Marketplace OAuth2 authorization-code flow

pub mod oauth;

pub use oauth::OAuthClient;
