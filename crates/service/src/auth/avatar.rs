//! Avatar URL derivation.

use sha2::{Digest, Sha256};

pub trait AvatarService: Send + Sync {
    fn avatar_url(&self, email: &str) -> String;
}

/// Gravatar URLs keyed by the SHA-256 of the normalized email.
#[derive(Debug, Clone)]
pub struct Gravatar {
    pub size: u32,
    pub rating: String,
    pub default_image: String,
}

impl Default for Gravatar {
    fn default() -> Self {
        Self { size: 200, rating: "pg".into(), default_image: "mm".into() }
    }
}

impl Gravatar {
    pub fn new(size: u32, rating: impl Into<String>, default_image: impl Into<String>) -> Self {
        Self { size, rating: rating.into(), default_image: default_image.into() }
    }
}

impl AvatarService for Gravatar {
    fn avatar_url(&self, email: &str) -> String {
        let digest = Sha256::digest(email.trim().to_lowercase().as_bytes());
        let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
        format!(
            "https://www.gravatar.com/avatar/{}?s={}&r={}&d={}",
            hex, self.size, self.rating, self.default_image
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_is_stable_across_case_and_whitespace() {
        let g = Gravatar::default();
        assert_eq!(g.avatar_url(" Ann@Example.com "), g.avatar_url("ann@example.com"));
    }

    #[test]
    fn url_carries_parameters() {
        let url = Gravatar::new(80, "g", "identicon").avatar_url("ann@example.com");
        assert!(url.starts_with("https://www.gravatar.com/avatar/"));
        assert!(url.ends_with("?s=80&r=g&d=identicon"));
        // 64 hex chars of sha256
        let hash = url.trim_start_matches("https://www.gravatar.com/avatar/").split('?').next().unwrap();
        assert_eq!(hash.len(), 64);
    }
}
