//! Classification of scaffold templates.
//!
//! This module defines the labels the catalog filters and validates by:
//!
//! - [`Category`]: the coarse grouping every template belongs to
//! - [`Trigger`]: the action extension point a handler template is written for
//! - [`Runtime`]: the Node.js runtime an action template targets
//!
//! # Examples
//!
//! ```
//! use scaffold_catalog::core::templates::{Category, Trigger};
//! use std::str::FromStr;
//!
//! let category = Category::from_str("phone-provider").unwrap();
//! assert_eq!(category, Category::PhoneProvider);
//! assert_eq!(category.to_string(), "phone-provider");
//! assert_eq!(category.trigger(), Some(Trigger::CustomPhoneProvider));
//!
//! // Rules predate triggers
//! assert_eq!(Category::Rule.trigger(), None);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::core::error::{CatalogError, LookupKind};

/// Coarse classification of a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Handler for a custom email delivery provider
    EmailProvider,
    /// Handler for a custom phone (SMS/voice) delivery provider
    PhoneProvider,
    /// Hook run after a user changes their password
    PostChangePassword,
    /// Hook run when a phone message is about to be sent
    SendPhoneMessage,
    /// Legacy authorization rule
    Rule,
    /// Documentation UI snippet
    Branding,
}

impl Category {
    /// Returns the category label as a string slice
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmailProvider => "email-provider",
            Self::PhoneProvider => "phone-provider",
            Self::PostChangePassword => "post-change-password",
            Self::SendPhoneMessage => "send-phone-message",
            Self::Rule => "rule",
            Self::Branding => "branding",
        }
    }

    /// Returns the heading used when listing templates of this category
    pub fn heading(&self) -> &'static str {
        match self {
            Self::EmailProvider => "Email Provider Templates",
            Self::PhoneProvider => "Phone Provider Templates",
            Self::PostChangePassword => "Post Change Password Templates",
            Self::SendPhoneMessage => "Send Phone Message Templates",
            Self::Rule => "Rule Templates",
            Self::Branding => "Branding Templates",
        }
    }

    /// Returns the action trigger templates of this category are written for
    pub fn trigger(&self) -> Option<Trigger> {
        match self {
            Self::EmailProvider => Some(Trigger::CustomEmailProvider),
            Self::PhoneProvider => Some(Trigger::CustomPhoneProvider),
            Self::PostChangePassword => Some(Trigger::PostChangePassword),
            Self::SendPhoneMessage => Some(Trigger::SendPhoneMessage),
            Self::Rule | Self::Branding => None,
        }
    }

    /// Returns an iterator over all categories in declaration order
    pub fn all() -> impl Iterator<Item = Self> {
        use Category::*;
        [
            EmailProvider,
            PhoneProvider,
            PostChangePassword,
            SendPhoneMessage,
            Rule,
            Branding,
        ]
        .iter()
        .copied()
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "email-provider" => Ok(Category::EmailProvider),
            "phone-provider" => Ok(Category::PhoneProvider),
            "post-change-password" => Ok(Category::PostChangePassword),
            "send-phone-message" => Ok(Category::SendPhoneMessage),
            "rule" => Ok(Category::Rule),
            "branding" => Ok(Category::Branding),
            _ => Err(CatalogError::not_found(LookupKind::Category, s)),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Action trigger a handler template targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Trigger {
    PostLogin,
    CredentialsExchange,
    PreUserRegistration,
    PostUserRegistration,
    PostChangePassword,
    SendPhoneMessage,
    CustomEmailProvider,
    CustomPhoneProvider,
}

impl Trigger {
    /// Returns the trigger id as a string slice
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PostLogin => "post-login",
            Self::CredentialsExchange => "credentials-exchange",
            Self::PreUserRegistration => "pre-user-registration",
            Self::PostUserRegistration => "post-user-registration",
            Self::PostChangePassword => "post-change-password",
            Self::SendPhoneMessage => "send-phone-message",
            Self::CustomEmailProvider => "custom-email-provider",
            Self::CustomPhoneProvider => "custom-phone-provider",
        }
    }

    /// Returns an iterator over all known triggers
    pub fn all() -> impl Iterator<Item = Self> {
        use Trigger::*;
        [
            PostLogin,
            CredentialsExchange,
            PreUserRegistration,
            PostUserRegistration,
            PostChangePassword,
            SendPhoneMessage,
            CustomEmailProvider,
            CustomPhoneProvider,
        ]
        .iter()
        .copied()
    }
}

impl FromStr for Trigger {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .find(|trigger| trigger.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CatalogError::not_found(LookupKind::Trigger, s))
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Node.js runtime an action template is written against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Runtime {
    /// Recommended runtime for new actions
    #[default]
    Node22,
    Node18,
    Node16,
    Node12,
}

impl Runtime {
    /// Returns the runtime id as a string slice
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Node22 => "node22",
            Self::Node18 => "node18",
            Self::Node16 => "node16",
            Self::Node12 => "node12",
        }
    }
}

impl FromStr for Runtime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "node22" => Ok(Runtime::Node22),
            "node18" => Ok(Runtime::Node18),
            "node16" => Ok(Runtime::Node16),
            "node12" => Ok(Runtime::Node12),
            _ => Err(format!(
                "Unknown runtime: {s} (expected node22, node18, node16 or node12)"
            )),
        }
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
