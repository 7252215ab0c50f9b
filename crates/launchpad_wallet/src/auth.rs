//! Simulated GitHub sign-in. No OAuth round trip happens; the username is
//! validated, a fixed delay stands in for the redirect, and a deterministic
//! address is derived from the handle.

use std::time::Duration;

use launchpad_core::LaunchpadError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::info;

const MAX_USERNAME_LEN: usize = 39;

/// Alphanumerics separated by single hyphens.
static GITHUB_USERNAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+(?:-[A-Za-z0-9]+)*$").expect("valid username regex"));

/// A signed-in GitHub account and the launchpad address it maps to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubIdentity {
    pub username: String,
    pub address: String,
}

/// Check a handle against GitHub's username rules.
pub fn validate_github_username(username: &str) -> Result<(), LaunchpadError> {
    if username.is_empty() || username.len() > MAX_USERNAME_LEN {
        return Err(LaunchpadError::InvalidIdentity(format!(
            "GitHub usernames are 1-{MAX_USERNAME_LEN} characters"
        )));
    }
    if !GITHUB_USERNAME.is_match(username) {
        return Err(LaunchpadError::InvalidIdentity(format!(
            "'{username}' is not a valid GitHub username"
        )));
    }
    Ok(())
}

/// `0x` + the first 20 bytes of SHA-256 over the lower-cased handle.
pub fn derive_address(username: &str) -> String {
    let digest = Sha256::digest(username.to_lowercase().as_bytes());
    format!("0x{}", hex::encode(&digest[..20]))
}

/// Sign in with GitHub after `delay`. Dropping the future cancels the
/// sign-in with no side effects.
pub async fn simulate_github_login(
    username: &str,
    delay: Duration,
) -> Result<GithubIdentity, LaunchpadError> {
    let username = username.trim();
    validate_github_username(username)?;

    tokio::time::sleep(delay).await;

    let identity = GithubIdentity {
        username: username.to_string(),
        address: derive_address(username),
    };
    info!(username = %identity.username, address = %identity.address, "github sign-in simulated");
    Ok(identity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_usernames() {
        for name in ["octocat", "a", "mona-lisa", "user123", "A-b-C"] {
            assert!(validate_github_username(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn rejects_invalid_usernames() {
        for name in ["", "-lead", "trail-", "double--dash", "has space", "under_score"] {
            assert!(validate_github_username(name).is_err(), "{name} should be invalid");
        }
        assert!(validate_github_username(&"a".repeat(40)).is_err());
        assert!(validate_github_username(&"a".repeat(39)).is_ok());
    }

    #[test]
    fn derived_address_is_deterministic_and_case_insensitive() {
        let a = derive_address("OctoCat");
        let b = derive_address("octocat");
        assert_eq!(a, b);
        assert!(a.starts_with("0x"));
        assert_eq!(a.len(), 42);
        assert_ne!(derive_address("octocat"), derive_address("hubot"));
    }

    #[tokio::test]
    async fn login_returns_identity() {
        let identity = simulate_github_login(" octocat ", Duration::from_millis(5))
            .await
            .unwrap();
        assert_eq!(identity.username, "octocat");
        assert_eq!(identity.address, derive_address("octocat"));
    }

    #[tokio::test]
    async fn login_fails_fast_on_bad_username() {
        let started = std::time::Instant::now();
        let result = simulate_github_login("bad name", Duration::from_secs(30)).await;
        assert!(result.is_err());
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
