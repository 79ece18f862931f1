//! Variance row assembly.
//!
//! Joins scheduled and actual minutes by staff key and orders the rows for
//! presentation.

use std::collections::{BTreeSet, HashMap};

use crate::models::{StaffDirectory, StaffKey, VarianceRow};

use super::staff_key::StaffLabels;

/// Builds one row per key found in either minute map.
///
/// Missing entries count as zero. Rows are sorted by display label without
/// regard to case, with the key itself breaking ties so the order is total.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use attendance_engine::models::{StaffDirectory, StaffKey};
/// use attendance_engine::reconciliation::{StaffLabels, build_variance_rows};
///
/// let key = StaffKey::Pin { pin: "4321".to_string() };
/// let scheduled = HashMap::from([(key.clone(), 480)]);
/// let actual = HashMap::from([(key.clone(), 450)]);
///
/// let rows = build_variance_rows(
///     &scheduled,
///     &actual,
///     &StaffLabels::new(),
///     &StaffDirectory::default(),
///     None,
/// );
/// assert_eq!(rows[0].label, "pin:4321");
/// assert_eq!(rows[0].variance_minutes, -30);
/// ```
pub fn build_variance_rows(
    scheduled: &HashMap<StaffKey, i64>,
    actual: &HashMap<StaffKey, i64>,
    labels: &StaffLabels,
    directory: &StaffDirectory,
    unknown_label: Option<&str>,
) -> Vec<VarianceRow> {
    let keys: BTreeSet<&StaffKey> = scheduled.keys().chain(actual.keys()).collect();

    let mut rows: Vec<VarianceRow> = keys
        .into_iter()
        .map(|key| {
            VarianceRow::new(
                key.clone(),
                labels.display_label(key, directory, unknown_label),
                scheduled.get(key).copied().unwrap_or(0),
                actual.get(key).copied().unwrap_or(0),
            )
        })
        .collect();

    rows.sort_by_cached_key(|row| (row.label.to_lowercase(), row.staff_key.clone()));
    rows
}
