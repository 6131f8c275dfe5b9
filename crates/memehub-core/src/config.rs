//! Configuration structures for memehub-core.
//!
//! The portal never reads environment variables or files. All configuration
//! is passed in explicitly by the caller (CLI, tests) so that bindings can be
//! swapped for test doubles.

use serde::{Deserialize, Serialize};

use crate::boundary::WalletKind;
use crate::errors::{CoreError, CoreResult};

/// Global portal configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalConfig {
    pub app: AppConfig,
    pub wallet: WalletPolicy,
    pub draft: DraftPolicy,
    pub branding: Branding,
}

/// Identity of this app as presented to the wallet provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Name the wallet records when the user trusts the app.
    pub name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "memehub".to_string(),
        }
    }
}

/// Which wallet provider the portal accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletPolicy {
    pub expected_kind: WalletKind,
}

impl Default for WalletPolicy {
    fn default() -> Self {
        Self {
            expected_kind: WalletKind::KeypairFile,
        }
    }
}

/// Handling of the input draft after a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftPolicy {
    pub clear_on_success: bool,
    /// Upper bound on a single link, in bytes. The remote account has a fixed
    /// allocation so oversized links can never be stored.
    pub max_link_bytes: usize,
}

impl Default for DraftPolicy {
    fn default() -> Self {
        Self {
            clear_on_success: true,
            max_link_bytes: 512,
        }
    }
}

/// Static page texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branding {
    pub title: String,
    pub subtitle: String,
    pub credit_handle: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            title: "Meme Hub".to_string(),
            subtitle: "View your Meme collection in the metaverse".to_string(),
            credit_handle: "_buildspace".to_string(),
        }
    }
}

impl Branding {
    pub fn credit_link(&self) -> String {
        format!("https://twitter.com/{}", self.credit_handle)
    }

    pub fn credit_text(&self) -> String {
        format!("built on @{}", self.credit_handle)
    }
}

/// Validate a full configuration object.
pub fn validate_config(cfg: &PortalConfig) -> CoreResult<()> {
    if cfg.app.name.trim().is_empty() {
        return Err(CoreError::invalid_config("app name must not be empty"));
    }

    if cfg.draft.max_link_bytes == 0 {
        return Err(CoreError::invalid_config(
            "max_link_bytes must be greater than zero",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = PortalConfig::default();
        validate_config(&cfg).unwrap();
    }

    #[test]
    fn empty_app_name_detected() {
        let mut cfg = PortalConfig::default();
        cfg.app.name = "  ".to_string();
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn zero_link_limit_detected() {
        let mut cfg = PortalConfig::default();
        cfg.draft.max_link_bytes = 0;
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn credit_line() {
        let b = Branding::default();
        assert_eq!(b.credit_text(), "built on @_buildspace");
        assert_eq!(b.credit_link(), "https://twitter.com/_buildspace");
    }
}
