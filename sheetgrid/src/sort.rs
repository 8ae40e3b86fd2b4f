//! Sort engine: the per-column sort cycle and the stable row ordering.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::model::{CellValue, Row};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[serde(alias = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    Descending,
}

impl SortDirection {
    /// Header indicator for an active sort in this direction.
    pub fn indicator(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

/// The active sort: which column and in which direction.
///
/// `Option<SortConfig>` is the full sort state; `None` means original order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortConfig {
    pub column_key: String,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn new(column_key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column_key: column_key.into(),
            direction,
        }
    }

    pub fn ascending(column_key: impl Into<String>) -> Self {
        Self::new(column_key, SortDirection::Ascending)
    }

    pub fn descending(column_key: impl Into<String>) -> Self {
        Self::new(column_key, SortDirection::Descending)
    }
}

/// Indicator shown on a sortable header that is not the active sort column.
pub const UNSORTED_INDICATOR: &str = "▲▼";

/// Compute the sort state after a header click.
///
/// Clicking the active column steps ascending -> descending -> unsorted;
/// clicking any other column starts over at ascending. Clicks on columns
/// that are not sortable leave the state unchanged.
pub fn cycle_sort(
    current: Option<&SortConfig>,
    column_key: &str,
    sortable: bool,
) -> Option<SortConfig> {
    if !sortable {
        return current.cloned();
    }

    match current {
        Some(sort) if sort.column_key == column_key => match sort.direction {
            SortDirection::Ascending => Some(SortConfig::descending(column_key)),
            SortDirection::Descending => None,
        },
        _ => Some(SortConfig::ascending(column_key)),
    }
}

/// Locale-style text collation.
///
/// Letters compare case-insensitively first; on a case-only difference the
/// lowercase form sorts first, and only then are raw code points compared.
pub fn collate(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    if folded != Ordering::Equal {
        return folded;
    }

    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca != cb {
            match (ca.is_lowercase(), cb.is_lowercase()) {
                (true, false) => return Ordering::Less,
                (false, true) => return Ordering::Greater,
                _ => {}
            }
        }
    }

    a.cmp(b)
}

/// Compare two cell values in ascending order.
///
/// Missing values are greater than every present value.
pub fn compare_values(a: Option<&CellValue>, b: Option<&CellValue>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(CellValue::Text(a)), Some(CellValue::Text(b))) => collate(a, b),
        // NaN compares equal to everything.
        (Some(CellValue::Number(a)), Some(CellValue::Number(b))) => {
            a.partial_cmp(b).unwrap_or(Ordering::Equal)
        }
        (Some(a), Some(b)) => collate(&a.to_string(), &b.to_string()),
    }
}

/// Indices into `rows` in display order for the given sort.
///
/// The ordering is stable in both directions: rows with equal keys keep their
/// input order. Missing values stay at the end when descending.
pub fn sorted_order(rows: &[Row], sort: Option<&SortConfig>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    let Some(sort) = sort else {
        return order;
    };

    let key = sort.column_key.as_str();
    order.sort_by(|&ia, &ib| {
        let a = rows[ia].value(key);
        let b = rows[ib].value(key);

        let ordering = match (a, b) {
            (Some(_), Some(_)) => match sort.direction {
                SortDirection::Ascending => compare_values(a, b),
                SortDirection::Descending => compare_values(a, b).reverse(),
            },
            _ => compare_values(a, b),
        };

        ordering.then(ia.cmp(&ib))
    });

    log::trace!("sorted {} rows by {:?}", rows.len(), sort);
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_same_column() {
        let asc = cycle_sort(None, "name", true);
        assert_eq!(asc, Some(SortConfig::ascending("name")));

        let desc = cycle_sort(asc.as_ref(), "name", true);
        assert_eq!(desc, Some(SortConfig::descending("name")));

        assert_eq!(cycle_sort(desc.as_ref(), "name", true), None);
    }

    #[test]
    fn test_cycle_other_column_restarts_ascending() {
        let desc = SortConfig::descending("name");
        assert_eq!(
            cycle_sort(Some(&desc), "age", true),
            Some(SortConfig::ascending("age"))
        );

        let asc = SortConfig::ascending("name");
        assert_eq!(
            cycle_sort(Some(&asc), "age", true),
            Some(SortConfig::ascending("age"))
        );
    }

    #[test]
    fn test_cycle_unsortable_keeps_state() {
        let asc = SortConfig::ascending("name");
        assert_eq!(cycle_sort(Some(&asc), "notes", false), Some(asc));
        assert_eq!(cycle_sort(None, "notes", false), None);
    }

    #[test]
    fn test_collate_case_insensitive() {
        assert_eq!(collate("apple", "Banana"), Ordering::Less);
        assert_eq!(collate("Banana", "apple"), Ordering::Greater);
        assert_eq!(collate("a", "A"), Ordering::Less);
        assert_eq!(collate("abc", "abc"), Ordering::Equal);
        assert_eq!(collate("ab", "abc"), Ordering::Less);
    }

    #[test]
    fn test_compare_mixed_uses_text() {
        let num = CellValue::from(10);
        let text = CellValue::from("9");
        // "10" < "9" as text.
        assert_eq!(compare_values(Some(&num), Some(&text)), Ordering::Less);
    }

    #[test]
    fn test_compare_numbers() {
        let a = CellValue::from(9);
        let b = CellValue::from(10);
        assert_eq!(compare_values(Some(&a), Some(&b)), Ordering::Less);

        let nan = CellValue::from(f64::NAN);
        assert_eq!(compare_values(Some(&nan), Some(&b)), Ordering::Equal);
    }

    #[test]
    fn test_missing_sorts_last() {
        let a = CellValue::from("z");
        assert_eq!(compare_values(None, Some(&a)), Ordering::Greater);
        assert_eq!(compare_values(Some(&a), None), Ordering::Less);
        assert_eq!(compare_values(None, None), Ordering::Equal);
    }
}
