use anyhow::{anyhow, Result};

/// Task fields addressable from free-form input as `key:value` tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKey {
    Description,
    Priority,
    Due,
}

impl FieldKey {
    const ALL: [(FieldKey, &'static str); 3] = [
        (FieldKey::Description, "description"),
        (FieldKey::Priority, "priority"),
        (FieldKey::Due, "due"),
    ];

    /// Resolves a key name, accepting any unambiguous prefix
    /// (`due`, `du`, `pri`, `desc`, ...).
    pub fn parse(key: &str) -> Result<FieldKey> {
        let key = key.to_lowercase();
        let matches: Vec<&(FieldKey, &str)> = Self::ALL
            .iter()
            .filter(|(_, name)| name.starts_with(&key))
            .collect();

        match matches.as_slice() {
            [(field, _)] => Ok(*field),
            [] => Err(anyhow!("Unknown field: '{}'", key)),
            many => Err(anyhow!(
                "Ambiguous field: '{}' matches {:?}",
                key,
                many.iter().map(|(_, name)| *name).collect::<Vec<_>>()
            )),
        }
    }
}

/// Free-form input split into a title and field assignments.
/// `Buy milk due:tomorrow pri:h` -> title "Buy milk", fields due + priority.
#[derive(Debug, PartialEq, Default)]
pub struct ParsedInput {
    pub title: String,
    pub fields: Vec<(FieldKey, String)>,
    /// `key:value` tokens whose key did not resolve; surfaced as warnings.
    pub rejected: Vec<String>,
}

pub fn parse_input(words: &[String]) -> ParsedInput {
    let mut title_parts = Vec::new();
    let mut fields = Vec::new();
    let mut rejected = Vec::new();

    for word in words {
        match word.split_once(':') {
            Some((key, value)) if !key.is_empty() => match FieldKey::parse(key) {
                Ok(field) => fields.push((field, value.to_string())),
                Err(_) => rejected.push(word.clone()),
            },
            _ => title_parts.push(word.as_str()),
        }
    }

    ParsedInput {
        title: title_parts.join(" "),
        fields,
        rejected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(input: &str) -> Vec<String> {
        input.split_whitespace().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_title_and_fields() {
        let parsed = parse_input(&words("Buy milk due:tomorrow priority:h"));
        assert_eq!(parsed.title, "Buy milk");
        assert_eq!(
            parsed.fields,
            vec![
                (FieldKey::Due, "tomorrow".to_string()),
                (FieldKey::Priority, "h".to_string()),
            ]
        );
        assert!(parsed.rejected.is_empty());
    }

    #[test]
    fn test_parse_title_only() {
        let parsed = parse_input(&words("Water the plants"));
        assert_eq!(parsed.title, "Water the plants");
        assert!(parsed.fields.is_empty());
    }

    #[test]
    fn test_unknown_key_is_rejected_not_title() {
        let parsed = parse_input(&words("Ship it project:Work"));
        assert_eq!(parsed.title, "Ship it");
        assert_eq!(parsed.rejected, vec!["project:Work".to_string()]);
    }

    #[test]
    fn test_field_key_prefixes() {
        assert_eq!(FieldKey::parse("due").unwrap(), FieldKey::Due);
        assert_eq!(FieldKey::parse("du").unwrap(), FieldKey::Due);
        assert_eq!(FieldKey::parse("pri").unwrap(), FieldKey::Priority);
        assert_eq!(FieldKey::parse("desc").unwrap(), FieldKey::Description);

        // "d" matches both description and due.
        assert!(FieldKey::parse("d").is_err());
        assert!(FieldKey::parse("x").is_err());
    }

    #[test]
    fn test_colon_in_value_is_kept() {
        let parsed = parse_input(&words("Call due:2026-09-15T18:00"));
        assert_eq!(
            parsed.fields,
            vec![(FieldKey::Due, "2026-09-15T18:00".to_string())]
        );
    }
}
