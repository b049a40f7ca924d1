use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// One candidate page reached through a category listing, with the
/// categories it shares with the target page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NeighborRecord {
    pub name: String,
    pub overlap: usize,
    pub shared: Vec<String>,
}

impl NeighborRecord {
    pub fn new(name: String, shared: Vec<String>) -> Self {
        Self {
            name,
            overlap: shared.len(),
            shared,
        }
    }
}

/// Renders the record as a tuple literal: `('P2', 2, ['A', 'B'])`.
impl fmt::Display for NeighborRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shared: Vec<String> = self.shared.iter().map(|s| quote_literal(s)).collect();
        write!(
            f,
            "({}, {}, [{}])",
            quote_literal(&self.name),
            self.overlap,
            shared.join(", ")
        )
    }
}

fn quote_literal(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Drops records that are fully equal to an earlier one, keeping first
/// occurrences in order. Records for the same page with different overlap
/// or shared categories are all kept.
pub fn dedup_records(records: Vec<NeighborRecord>) -> Vec<NeighborRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.clone()))
        .collect()
}

/// Overlap descending, then name ascending.
///
/// Two stable passes: by name first, then by overlap.
pub fn rank_records(records: &mut [NeighborRecord]) {
    records.sort_by(|a, b| a.name.cmp(&b.name));
    records.sort_by(|a, b| b.overlap.cmp(&a.overlap));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, shared: &[&str]) -> NeighborRecord {
        NeighborRecord::new(
            name.to_string(),
            shared.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn test_display_tuple_literal() {
        let r = record("P2", &["A", "B"]);
        assert_eq!(r.to_string(), "('P2', 2, ['A', 'B'])");
    }

    #[test]
    fn test_display_empty_shared() {
        let r = record("Lonely", &[]);
        assert_eq!(r.to_string(), "('Lonely', 0, [])");
    }

    #[test]
    fn test_display_quotes() {
        let r = record("Rock_'n'_roll", &[r#"Say "hi""#, "It's"]);
        assert_eq!(
            r.to_string(),
            r#"("Rock_'n'_roll", 2, ['Say "hi"', "It's"])"#
        );

        let both = record(r#"A'b"c"#, &[]);
        assert_eq!(both.to_string(), r#"('A\'b"c', 0, [])"#);
    }

    #[test]
    fn test_dedup_keeps_first_full_match_only() {
        let records = vec![
            record("P1", &["A"]),
            record("P2", &["A", "B"]),
            record("P1", &["A"]),
            record("P2", &["B"]),
        ];
        let deduped = dedup_records(records);
        assert_eq!(
            deduped,
            vec![
                record("P1", &["A"]),
                record("P2", &["A", "B"]),
                record("P2", &["B"]),
            ]
        );
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let records = vec![
            record("X", &["A"]),
            record("Y", &["A", "B"]),
            record("X", &["A"]),
            record("Y", &["A", "B"]),
            record("Z", &[]),
        ];
        let once = dedup_records(records);
        let twice = dedup_records(once.clone());
        assert_eq!(once, twice);
        assert_eq!(once.len(), 3);
    }

    #[test]
    fn test_rank_equal_overlap_sorted_by_name() {
        let mut records = vec![
            record("Gamma", &["A"]),
            record("Alpha", &["B"]),
            record("Beta", &["C"]),
        ];
        rank_records(&mut records);
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);
    }

    #[test]
    fn test_rank_higher_overlap_always_first() {
        let mut records = vec![
            record("Aardvark", &["A"]),
            record("Zebra", &["A", "B", "C"]),
            record("Moose", &["A", "B"]),
            record("Ant", &["B", "C"]),
        ];
        rank_records(&mut records);
        let ranked: Vec<_> = records
            .iter()
            .map(|r| (r.name.as_str(), r.overlap))
            .collect();
        assert_eq!(
            ranked,
            vec![("Zebra", 3), ("Ant", 2), ("Moose", 2), ("Aardvark", 1)]
        );
    }

    #[test]
    fn test_rank_keeps_relative_order_of_identical_keys() {
        let mut records = vec![record("Same", &["B"]), record("Same", &["A"])];
        rank_records(&mut records);
        assert_eq!(records[0].shared, vec!["B"]);
        assert_eq!(records[1].shared, vec!["A"]);
    }
}
