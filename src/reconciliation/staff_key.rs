//! Staff key resolution.
//!
//! Derives a [`StaffKey`] from the account id and PIN carried by a shift or
//! punch row, and resolves the label a report row is displayed under.

use std::collections::HashMap;

use crate::models::{PunchEvent, ScheduledShift, StaffDirectory, StaffIdentity, StaffKey};

/// Derives the identity key for a row.
///
/// # Examples
///
/// ```
/// use attendance_engine::models::{StaffIdentity, StaffKey};
/// use attendance_engine::reconciliation::resolve_staff_key;
///
/// let key = resolve_staff_key(&StaffIdentity::new(None, Some("4321")));
/// assert_eq!(key, StaffKey::Pin { pin: "4321".to_string() });
///
/// let key = resolve_staff_key(&StaffIdentity::new(Some(""), None));
/// assert_eq!(key, StaffKey::Unknown);
/// ```
pub fn resolve_staff_key(identity: &StaffIdentity) -> StaffKey {
    match (identity.account_id(), identity.pin()) {
        (Some(account_id), Some(pin)) => StaffKey::AccountAndPin {
            account_id: account_id.to_string(),
            pin: pin.to_string(),
        },
        (Some(account_id), None) => StaffKey::Account {
            account_id: account_id.to_string(),
        },
        (None, Some(pin)) => StaffKey::Pin {
            pin: pin.to_string(),
        },
        (None, None) => StaffKey::Unknown,
    }
}

/// The first-seen raw label (account id, else PIN) for each staff key.
#[derive(Debug, Clone, Default)]
pub struct StaffLabels {
    labels: HashMap<StaffKey, String>,
}

impl StaffLabels {
    /// Creates an empty label map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the labels of every shift, then every punch.
    pub fn from_rows(shifts: &[ScheduledShift], punches: &[PunchEvent]) -> Self {
        let mut labels = Self::new();
        for shift in shifts {
            labels.observe(&shift.identity);
        }
        for punch in punches {
            labels.observe(&punch.identity);
        }
        labels
    }

    /// Resolves the key for `identity`, recording its raw label if the key
    /// has none yet.
    pub fn observe(&mut self, identity: &StaffIdentity) -> StaffKey {
        let key = resolve_staff_key(identity);
        if let Some(label) = identity.raw_label() {
            self.labels
                .entry(key.clone())
                .or_insert_with(|| label.to_string());
        }
        key
    }

    /// Returns the recorded raw label for a key.
    pub fn raw_label(&self, key: &StaffKey) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    /// Resolves the label a report row is shown under.
    ///
    /// Precedence: directory name, first-seen raw label, `unknown_label` for
    /// the unidentified bucket, and finally the raw key itself.
    pub fn display_label(
        &self,
        key: &StaffKey,
        directory: &StaffDirectory,
        unknown_label: Option<&str>,
    ) -> String {
        if let Some(name) = directory.display_name(key) {
            return name.to_string();
        }
        if let Some(label) = self.raw_label(key) {
            return label.to_string();
        }
        match unknown_label {
            Some(label) if key.is_unknown() => label.to_string(),
            _ => key.to_string(),
        }
    }
}
