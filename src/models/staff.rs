//! Staff identity models.
//!
//! Staff may be identified by an account id, a numeric PIN typed at the time
//! clock, or both. This module defines the raw [`StaffIdentity`] carried by
//! input rows, the collision-free [`StaffKey`] derived from it, and the
//! caller-supplied [`StaffDirectory`] used to resolve display names.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The identifying fields of a shift or punch row.
///
/// Blank or whitespace-only values are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffIdentity {
    /// The staff member's account id, if the row carries one.
    #[serde(default)]
    pub account_id: Option<String>,
    /// The staff member's time clock PIN, if the row carries one.
    #[serde(default)]
    pub pin: Option<String>,
}

impl StaffIdentity {
    /// Creates an identity from optional account id and PIN.
    pub fn new(account_id: Option<&str>, pin: Option<&str>) -> Self {
        Self {
            account_id: account_id.map(str::to_string),
            pin: pin.map(str::to_string),
        }
    }

    /// Returns the trimmed account id, or `None` when absent or blank.
    pub fn account_id(&self) -> Option<&str> {
        non_blank(self.account_id.as_deref())
    }

    /// Returns the trimmed PIN, or `None` when absent or blank.
    pub fn pin(&self) -> Option<&str> {
        non_blank(self.pin.as_deref())
    }

    /// Returns the raw label for this identity: the account id when present,
    /// otherwise the PIN.
    pub fn raw_label(&self) -> Option<&str> {
        self.account_id().or_else(|| self.pin())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// A stable identity key for one staff member across shifts and punches.
///
/// Each combination of present fields is its own variant, so an account id
/// and a PIN with the same text never collide, and `(A, B)` stays distinct
/// from `(A, C)`. Rows with neither field share the [`StaffKey::Unknown`]
/// bucket.
///
/// # Example
///
/// ```
/// use attendance_engine::models::StaffKey;
///
/// let account = StaffKey::Account { account_id: "1234".to_string() };
/// let pin = StaffKey::Pin { pin: "1234".to_string() };
/// assert_ne!(account, pin);
/// assert_eq!(account.to_string(), "account:1234");
/// assert_eq!(pin.to_string(), "pin:1234");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StaffKey {
    /// Identified by account id only.
    Account {
        /// The account id.
        account_id: String,
    },
    /// Identified by PIN only.
    Pin {
        /// The time clock PIN.
        pin: String,
    },
    /// Identified by both account id and PIN.
    AccountAndPin {
        /// The account id.
        account_id: String,
        /// The time clock PIN.
        pin: String,
    },
    /// Neither field was present.
    Unknown,
}

impl StaffKey {
    /// Returns true for the shared bucket of unidentified rows.
    pub fn is_unknown(&self) -> bool {
        matches!(self, StaffKey::Unknown)
    }
}

impl fmt::Display for StaffKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaffKey::Account { account_id } => write!(f, "account:{}", account_id),
            StaffKey::Pin { pin } => write!(f, "pin:{}", pin),
            StaffKey::AccountAndPin { account_id, pin } => {
                write!(f, "account:{}+pin:{}", account_id, pin)
            }
            StaffKey::Unknown => write!(f, "unknown"),
        }
    }
}

/// A staff member's display name as known to the restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffProfile {
    /// The staff member's account id, if any.
    #[serde(default)]
    pub account_id: Option<String>,
    /// The staff member's time clock PIN, if any.
    #[serde(default)]
    pub pin: Option<String>,
    /// The name shown on reports.
    pub display_name: String,
}

/// Display names for staff, looked up by account id or PIN.
///
/// When two profiles claim the same account id or PIN, the first one wins.
#[derive(Debug, Clone, Default)]
pub struct StaffDirectory {
    by_account: HashMap<String, String>,
    by_pin: HashMap<String, String>,
}

impl StaffDirectory {
    /// Builds a directory from staff profiles.
    pub fn new(profiles: impl IntoIterator<Item = StaffProfile>) -> Self {
        let mut directory = Self::default();
        for profile in profiles {
            let name = profile.display_name.trim();
            if name.is_empty() {
                continue;
            }
            if let Some(account_id) = non_blank(profile.account_id.as_deref()) {
                directory
                    .by_account
                    .entry(account_id.to_string())
                    .or_insert_with(|| name.to_string());
            }
            if let Some(pin) = non_blank(profile.pin.as_deref()) {
                directory
                    .by_pin
                    .entry(pin.to_string())
                    .or_insert_with(|| name.to_string());
            }
        }
        directory
    }

    /// Returns the display name for a key, preferring an account id match
    /// over a PIN match.
    pub fn display_name(&self, key: &StaffKey) -> Option<&str> {
        match key {
            StaffKey::Account { account_id } => self.by_account.get(account_id),
            StaffKey::Pin { pin } => self.by_pin.get(pin),
            StaffKey::AccountAndPin { account_id, pin } => self
                .by_account
                .get(account_id)
                .or_else(|| self.by_pin.get(pin)),
            StaffKey::Unknown => None,
        }
        .map(String::as_str)
    }

    /// Returns true when the directory holds no names.
    pub fn is_empty(&self) -> bool {
        self.by_account.is_empty() && self.by_pin.is_empty()
    }
}
