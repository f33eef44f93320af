//! Hierarchical item codes.
//!
//! Items form an implicit tree through dotted codes: `2.1` sits under the
//! category coded `2`. Everything that interprets codes lives here.

use std::cmp::Ordering;

use super::error::ComparisonError;
use super::types::BudgetComparisonItem;

/// Code separator.
pub const SEPARATOR: char = '.';

/// Returns the code with its last segment removed, `None` for a top-level code.
#[must_use]
pub fn parent_code(code: &str) -> Option<&str> {
    code.rsplit_once(SEPARATOR).map(|(parent, _)| parent)
}

/// Whether `candidate` is a direct child of `category`.
///
/// A direct child is a leaf whose code is the category code, a dot, then a
/// suffix with no further dot. Deeper descendants and nested categories do
/// not count.
#[must_use]
pub fn is_direct_child_of(
    candidate: &BudgetComparisonItem,
    category: &BudgetComparisonItem,
) -> bool {
    if candidate.is_category || !category.is_category {
        return false;
    }

    candidate
        .code
        .strip_prefix(category.code.as_str())
        .and_then(|rest| rest.strip_prefix(SEPARATOR))
        .is_some_and(|suffix| !suffix.contains(SEPARATOR))
}

/// Trims and checks a code entered by a user.
///
/// # Errors
///
/// Returns `ComparisonError::InvalidCode` if the code is empty or has an
/// empty segment (`1..2`, `.1`, `1.`).
pub fn normalize_code(code: &str) -> Result<String, ComparisonError> {
    let code = code.trim();
    if code.is_empty() || code.split(SEPARATOR).any(|segment| segment.trim().is_empty()) {
        return Err(ComparisonError::InvalidCode(code.to_string()));
    }
    Ok(code.to_string())
}

/// Natural ordering of codes: segment by segment, numbers numerically,
/// numbers before text, parents before their descendants.
#[must_use]
pub fn compare_codes(a: &str, b: &str) -> Ordering {
    let mut left = a.split(SEPARATOR);
    let mut right = b.split(SEPARATOR);

    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ordering = compare_segments(l, r);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

fn compare_segments(l: &str, r: &str) -> Ordering {
    match (l.parse::<u64>(), r.parse::<u64>()) {
        (Ok(l), Ok(r)) => l.cmp(&r),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => l.cmp(r),
    }
}

/// Sorts items in natural code order, ties broken by description then ID.
pub fn sort_items(items: &mut [BudgetComparisonItem]) {
    items.sort_by(|a, b| {
        compare_codes(&a.code, &b.code)
            .then_with(|| a.description.cmp(&b.description))
            .then_with(|| a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_shared::types::BudgetComparisonId;

    fn item(code: &str, is_category: bool) -> BudgetComparisonItem {
        BudgetComparisonItem::new(BudgetComparisonId::new(), code, code, is_category)
    }

    #[test]
    fn test_parent_code() {
        assert_eq!(parent_code("2.1"), Some("2"));
        assert_eq!(parent_code("2.1.3"), Some("2.1"));
        assert_eq!(parent_code("2"), None);
        assert_eq!(parent_code("2."), Some("2"));
    }

    #[test]
    fn test_direct_child() {
        let category = item("1", true);
        assert!(is_direct_child_of(&item("1.1", false), &category));
        assert!(is_direct_child_of(&item("1.10", false), &category));
    }

    #[test]
    fn test_grandchild_is_not_direct_child() {
        let category = item("1", true);
        assert!(!is_direct_child_of(&item("1.1.2", false), &category));
    }

    #[test]
    fn test_prefix_without_separator_is_not_child() {
        let category = item("1", true);
        assert!(!is_direct_child_of(&item("11", false), &category));
        assert!(!is_direct_child_of(&item("10.1", false), &category));
        assert!(!is_direct_child_of(&item("1", false), &category));
    }

    #[test]
    fn test_categories_are_never_children() {
        let category = item("1", true);
        assert!(!is_direct_child_of(&item("1.1", true), &category));
    }

    #[test]
    fn test_leaf_cannot_be_parent() {
        let leaf = item("1", false);
        assert!(!is_direct_child_of(&item("1.1", false), &leaf));
    }

    #[test]
    fn test_nested_category_parent() {
        let category = item("2.1", true);
        assert!(is_direct_child_of(&item("2.1.4", false), &category));
        assert!(!is_direct_child_of(&item("2.4", false), &category));
    }

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code(" 2.1 ").unwrap(), "2.1");
        assert_eq!(normalize_code("A.b").unwrap(), "A.b");
        for bad in ["", "   ", "1..2", ".1", "1.", "."] {
            assert!(
                matches!(normalize_code(bad), Err(ComparisonError::InvalidCode(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_compare_codes_numeric_segments() {
        assert_eq!(compare_codes("2.9", "2.10"), Ordering::Less);
        assert_eq!(compare_codes("10", "9"), Ordering::Greater);
        assert_eq!(compare_codes("2.1", "2.1"), Ordering::Equal);
    }

    #[test]
    fn test_compare_codes_parent_first() {
        assert_eq!(compare_codes("2", "2.1"), Ordering::Less);
        assert_eq!(compare_codes("2.1.1", "2.2"), Ordering::Less);
    }

    #[test]
    fn test_compare_codes_text_after_numbers() {
        assert_eq!(compare_codes("2.a", "2.1"), Ordering::Greater);
        assert_eq!(compare_codes("A", "B"), Ordering::Less);
    }

    #[test]
    fn test_sort_items() {
        let mut items = vec![
            item("2.10", false),
            item("1", true),
            item("2", true),
            item("2.9", false),
            item("1.1", false),
            item("2.1.1", false),
        ];
        sort_items(&mut items);

        let codes: Vec<&str> = items.iter().map(|i| i.code.as_str()).collect();
        assert_eq!(codes, ["1", "1.1", "2", "2.1.1", "2.9", "2.10"]);
    }
}
