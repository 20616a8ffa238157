//! Bill Splitting
//!
//! Groups a shared cart's items by contributor and sums each
//! contributor's subtotal. Pure: no I/O, no rounding.

use std::collections::HashMap;

use crate::models::{Contributor, LineItem};

/// Identity used to group items. Email (case-insensitive) when present,
/// name otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContributorKey {
    Email(String),
    Name(String),
}

impl ContributorKey {
    pub fn of(contributor: &Contributor) -> Self {
        let email = contributor.email.trim();
        if email.is_empty() {
            ContributorKey::Name(contributor.name.clone())
        } else {
            ContributorKey::Email(email.to_lowercase())
        }
    }
}

/// One contributor's share of a shared cart
#[derive(Debug, Clone, PartialEq)]
pub struct SplitEntry {
    /// First-seen name wins when the same email arrives with different names
    pub contributor: Contributor,
    pub items: Vec<LineItem>,
    pub subtotal: f64,
}

/// Per-contributor split, in order of first appearance
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Split {
    entries: Vec<SplitEntry>,
}

impl Split {
    pub fn entries(&self) -> &[SplitEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, key: &ContributorKey) -> Option<&SplitEntry> {
        self.entries
            .iter()
            .find(|entry| &ContributorKey::of(&entry.contributor) == key)
    }

    /// Sum of all subtotals; covers attributed items only
    pub fn total(&self) -> f64 {
        self.entries.iter().fold(0.0, |acc, entry| acc + entry.subtotal)
    }
}

/// Single pass over `items`; unattributed items are skipped.
pub fn split_by_contributor(items: &[LineItem]) -> Split {
    let mut index: HashMap<ContributorKey, usize> = HashMap::new();
    let mut entries: Vec<SplitEntry> = Vec::new();

    for item in items {
        let Some(contributor) = &item.added_by else {
            continue;
        };
        let key = ContributorKey::of(contributor);
        let slot = *index.entry(key).or_insert_with(|| {
            entries.push(SplitEntry {
                contributor: contributor.clone(),
                items: Vec::new(),
                subtotal: 0.0,
            });
            entries.len() - 1
        });
        let entry = &mut entries[slot];
        entry.subtotal += item.line_total();
        entry.items.push(item.clone());
    }

    Split { entries }
}

/// Σ price × quantity over attributed items
pub fn attributed_total(items: &[LineItem]) -> f64 {
    items
        .iter()
        .filter(|item| item.added_by.is_some())
        .map(LineItem::line_total)
        .fold(0.0, |acc, x| acc + x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Contributor {
        Contributor::new("Alice", "alice@x.com")
    }

    fn bob() -> Contributor {
        Contributor::new("Bob", "bob@x.com")
    }

    fn email(s: &str) -> ContributorKey {
        ContributorKey::Email(s.to_string())
    }

    #[test]
    fn test_two_contributors() {
        let items = vec![
            LineItem::new("A", "Rice", 100.0, 2).with_contributor(alice()),
            LineItem::new("B", "Oil", 150.0, 1).with_contributor(bob()),
        ];
        let split = split_by_contributor(&items);

        assert_eq!(split.len(), 2);
        assert_eq!(split.get(&email("alice@x.com")).unwrap().subtotal, 200.0);
        assert_eq!(split.get(&email("bob@x.com")).unwrap().subtotal, 150.0);
        assert_eq!(split.total(), 350.0);
    }

    #[test]
    fn test_unattributed_item_excluded() {
        let items = vec![
            LineItem::new("A", "Rice", 100.0, 2).with_contributor(alice()),
            LineItem::new("X", "Mystery", 999.0, 3),
        ];
        let split = split_by_contributor(&items);

        assert_eq!(split.len(), 1);
        let entry = split.get(&email("alice@x.com")).unwrap();
        assert!(entry.items.iter().all(|i| i.item_id != "X"));
        assert_eq!(split.total(), 200.0);
        assert_eq!(attributed_total(&items), 200.0);
    }

    #[test]
    fn test_empty_input() {
        let split = split_by_contributor(&[]);
        assert!(split.is_empty());
        assert_eq!(split.total(), 0.0);
        assert!(split.total().is_sign_positive());
        assert!(attributed_total(&[]).is_sign_positive());
    }

    #[test]
    fn test_grouping_ignores_order() {
        let forward = vec![
            LineItem::new("A", "Rice", 100.0, 1).with_contributor(alice()),
            LineItem::new("B", "Oil", 150.0, 1).with_contributor(bob()),
            LineItem::new("C", "Salt", 20.0, 4).with_contributor(alice()),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        for items in [forward, reversed] {
            let split = split_by_contributor(&items);
            let entry = split.get(&email("alice@x.com")).unwrap();
            assert_eq!(entry.items.len(), 2);
            assert_eq!(entry.subtotal, 180.0);
        }
    }

    #[test]
    fn test_same_email_different_names_merge_first_name_wins() {
        let items = vec![
            LineItem::new("A", "Rice", 10.0, 1).with_contributor(Contributor::new("Alice", "alice@x.com")),
            LineItem::new("B", "Oil", 5.0, 1).with_contributor(Contributor::new("Ally", "alice@x.com")),
        ];
        let split = split_by_contributor(&items);

        assert_eq!(split.len(), 1);
        assert_eq!(split.entries()[0].contributor.name, "Alice");
        assert_eq!(split.entries()[0].subtotal, 15.0);
    }

    #[test]
    fn test_email_case_does_not_split_contributor() {
        let items = vec![
            LineItem::new("A", "Rice", 10.0, 1).with_contributor(Contributor::new("Alice", "Alice@X.com")),
            LineItem::new("B", "Oil", 5.0, 1).with_contributor(Contributor::new("Alice", " alice@x.com ")),
        ];
        let split = split_by_contributor(&items);

        assert_eq!(split.len(), 1);
        assert_eq!(split.get(&email("alice@x.com")).unwrap().subtotal, 15.0);
        assert_eq!(split.entries()[0].contributor.email, "Alice@X.com");
    }

    #[test]
    fn test_name_fallback_without_email() {
        let guest = Contributor::new("Guest", "");
        let items = vec![
            LineItem::new("A", "Rice", 10.0, 1).with_contributor(guest.clone()),
            LineItem::new("B", "Oil", 5.0, 2).with_contributor(guest),
        ];
        let split = split_by_contributor(&items);
        let entry = split.get(&ContributorKey::Name("Guest".to_string())).unwrap();
        assert_eq!(entry.subtotal, 20.0);
    }

    #[test]
    fn test_name_key_does_not_collide_with_email_key() {
        let items = vec![
            LineItem::new("A", "Rice", 1.0, 1).with_contributor(Contributor::new("bob@x.com", "")),
            LineItem::new("B", "Oil", 2.0, 1).with_contributor(bob()),
        ];
        assert_eq!(split_by_contributor(&items).len(), 2);
    }

    #[test]
    fn test_entries_in_first_appearance_order() {
        let items = vec![
            LineItem::new("B", "Oil", 150.0, 1).with_contributor(bob()),
            LineItem::new("A", "Rice", 100.0, 2).with_contributor(alice()),
        ];
        let names: Vec<_> = split_by_contributor(&items)
            .entries()
            .iter()
            .map(|e| e.contributor.name.clone())
            .collect();
        assert_eq!(names, vec!["Bob", "Alice"]);
    }

    #[test]
    fn test_negative_values_pass_through() {
        let items = vec![
            LineItem::new("A", "Refund", -50.0, 1).with_contributor(alice()),
            LineItem::new("B", "Rice", 100.0, -1).with_contributor(alice()),
        ];
        assert_eq!(split_by_contributor(&items).total(), -150.0);
    }

    #[test]
    fn test_no_rounding() {
        let items = vec![
            LineItem::new("A", "Gum", 0.1, 1).with_contributor(alice()),
            LineItem::new("B", "Mint", 0.2, 1).with_contributor(alice()),
        ];
        assert_eq!(split_by_contributor(&items).total(), 0.1 + 0.2);
    }

    #[test]
    fn test_subtotals_sum_to_attributed_total() {
        let carol = Contributor::new("Carol", "carol@x.com");
        let items: Vec<LineItem> = (0..30)
            .map(|i| {
                let item = LineItem::new(format!("i{i}"), "Thing", (i * 7 % 13) as f64 + 0.5, (i % 4) + 1);
                match i % 4 {
                    0 => item.with_contributor(alice()),
                    1 => item.with_contributor(bob()),
                    2 => item.with_contributor(carol.clone()),
                    _ => item,
                }
            })
            .collect();

        let split = split_by_contributor(&items);
        assert_eq!(split.len(), 3);
        assert!((split.total() - attributed_total(&items)).abs() < 1e-9);
    }
}
