//! Raw participant text to roster entries.

use crate::types::Entry;

/// Honorific suffixes stripped from the end of a name
pub const HONORIFIC_SUFFIXES: &[&str] = &["さん", "様", "君", "ちゃん", "殿", "氏", "先生"];

/// Parse pasted text into entries: one name per line, blank lines dropped,
/// one trailing honorific stripped. Ids are assigned in input order.
pub fn parse_roster(raw: &str) -> Vec<Entry> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(strip_honorific)
        .filter(|name| !name.is_empty())
        .enumerate()
        .map(|(i, name)| Entry {
            id: i as u32,
            name: name.to_string(),
        })
        .collect()
}

/// Strip a single honorific suffix. The longest matching suffix wins and the
/// result is not re-examined, so "先生さん" only loses "さん".
pub fn strip_honorific(name: &str) -> &str {
    let suffix = HONORIFIC_SUFFIXES
        .iter()
        .filter(|s| name.ends_with(*s))
        .max_by_key(|s| s.chars().count());

    match suffix {
        Some(s) => name[..name.len() - s.len()].trim_end(),
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_blank_lines_and_honorifics() {
        let entries = parse_roster("Taroさん\n\nHanako様\n");
        assert_eq!(
            entries,
            vec![
                Entry {
                    id: 0,
                    name: "Taro".to_string()
                },
                Entry {
                    id: 1,
                    name: "Hanako".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_trims_and_handles_crlf() {
        let entries = parse_roster("  Alice  \r\n\tBob\r\n   \r\nCarol");
        assert_eq!(names(&entries), vec!["Alice", "Bob", "Carol"]);
        assert_eq!(entries[2].id, 2);
    }

    #[test]
    fn test_strip_applied_once() {
        assert_eq!(strip_honorific("山田先生さん"), "山田先生");
        assert_eq!(strip_honorific("鈴木ちゃん"), "鈴木");
        assert_eq!(strip_honorific("Sato 氏"), "Sato");
        assert_eq!(strip_honorific("Plain"), "Plain");
    }

    #[test]
    fn test_honorific_only_lines_are_dropped() {
        let entries = parse_roster("さん\n様\nKen君");
        assert_eq!(names(&entries), vec!["Ken"]);
        assert_eq!(entries[0].id, 0);
    }

    #[test]
    fn test_duplicates_keep_distinct_ids() {
        let entries = parse_roster("Alice\nAlice");
        assert_eq!(entries.len(), 2);
        assert_ne!(entries[0].id, entries[1].id);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_roster("").is_empty());
        assert!(parse_roster("\n\n  \n").is_empty());
    }
}
