//! Configuration types for roster actions.
//!
//! Each action that has tunables takes its config through a `with_config`
//! constructor; `new` uses the defaults.
//!
//! # Example
//!
//! ```rust
//! use roster::config::MembershipConfig;
//! use roster::teams::RoleName;
//!
//! let config = MembershipConfig {
//!     max_handles_per_request: 10,
//!     ..Default::default()
//! };
//! assert_eq!(config.default_role, RoleName::Member);
//! ```

use crate::teams::RoleName;

/// Settings for adding members to a team.
#[derive(Debug, Clone)]
pub struct MembershipConfig {
    /// Role given to users added by handle.
    ///
    /// Default: `member`
    pub default_role: RoleName,

    /// Largest number of handles accepted in a single bulk add.
    ///
    /// Default: 50
    pub max_handles_per_request: usize,
}

impl Default for MembershipConfig {
    fn default() -> Self {
        Self {
            default_role: RoleName::Member,
            max_handles_per_request: 50,
        }
    }
}

/// Limits applied when sending messages.
#[derive(Debug, Clone)]
pub struct MessageConfig {
    /// Maximum title length in characters.
    ///
    /// Default: 200
    pub max_title_length: usize,

    /// Maximum body length in characters.
    ///
    /// Default: 10000
    pub max_text_length: usize,

    /// Maximum number of attachments per message.
    ///
    /// Default: 10
    pub max_attachments: usize,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            max_title_length: 200,
            max_text_length: 10_000,
            max_attachments: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let membership = MembershipConfig::default();
        assert_eq!(membership.default_role, RoleName::Member);
        assert_eq!(membership.max_handles_per_request, 50);

        let messages = MessageConfig::default();
        assert_eq!(messages.max_title_length, 200);
        assert_eq!(messages.max_text_length, 10_000);
        assert_eq!(messages.max_attachments, 10);
    }

    #[test]
    fn test_override_membership() {
        let config = MembershipConfig {
            default_role: RoleName::Manager,
            ..Default::default()
        };

        assert_eq!(config.default_role, RoleName::Manager);
        assert_eq!(config.max_handles_per_request, 50);
    }
}
