use chrono::{DateTime, Utc};
use taskflow_core::{parse_due_date, FieldKey, ParsedInput, Priority, TaskPatch};

/// Field assignments pulled out of free-form input, ready to feed either
/// `TaskStore::add` or a `TaskPatch`. An empty value clears the field
/// (`desc:` drops the description, `due:` drops the due date).
#[derive(Debug, Default)]
pub struct FieldValues {
    pub description: Option<Option<String>>,
    pub priority: Option<Priority>,
    pub end_date: Option<Option<DateTime<Utc>>>,
    pub warnings: Vec<String>,
}

pub fn collect_fields(parsed: &ParsedInput) -> FieldValues {
    let mut values = FieldValues::default();

    for token in &parsed.rejected {
        values.warnings.push(format!("Ignoring unknown field '{}'", token));
    }

    for (key, value) in &parsed.fields {
        match key {
            FieldKey::Description => {
                values.description = if value.is_empty() {
                    Some(None)
                } else {
                    Some(Some(value.clone()))
                };
            }
            FieldKey::Priority => match parse_priority(value) {
                Some(priority) => values.priority = Some(priority),
                None => values
                    .warnings
                    .push(format!("Ignoring invalid priority '{}'", value)),
            },
            FieldKey::Due => {
                if value.is_empty() {
                    values.end_date = Some(None);
                } else {
                    match parse_due_date(value) {
                        Ok(date) => values.end_date = Some(Some(date)),
                        Err(err) => values
                            .warnings
                            .push(format!("Ignoring due date '{}': {}", value, err)),
                    }
                }
            }
        }
    }

    values
}

impl FieldValues {
    /// Patch for the edit path; the title comes from the free text, if any.
    pub fn into_patch(self, title: &str) -> TaskPatch {
        TaskPatch {
            title: if title.trim().is_empty() {
                None
            } else {
                Some(title.trim().to_string())
            },
            description: self.description,
            completed: None,
            priority: self.priority,
            end_date: self.end_date,
        }
    }
}

pub fn parse_priority(s: &str) -> Option<Priority> {
    match s.to_lowercase().as_str() {
        "h" | "high" => Some(Priority::High),
        "m" | "medium" | "med" => Some(Priority::Medium),
        "l" | "low" => Some(Priority::Low),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskflow_core::parse_input;

    fn words(input: &str) -> Vec<String> {
        input.split_whitespace().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_collect_priority_and_due() {
        let parsed = parse_input(&words("Ship release pri:h due:2026-09-15"));
        let values = collect_fields(&parsed);

        assert_eq!(values.priority, Some(Priority::High));
        assert!(matches!(values.end_date, Some(Some(_))));
        assert!(values.warnings.is_empty());
    }

    #[test]
    fn test_empty_value_clears() {
        let parsed = parse_input(&words("anything desc: due:"));
        let values = collect_fields(&parsed);

        assert_eq!(values.description, Some(None));
        assert_eq!(values.end_date, Some(None));
    }

    #[test]
    fn test_bad_values_become_warnings() {
        let parsed = parse_input(&words("x pri:urgent due:someday project:y"));
        let values = collect_fields(&parsed);

        assert_eq!(values.priority, None);
        assert_eq!(values.end_date, None);
        assert_eq!(values.warnings.len(), 3);
    }

    #[test]
    fn test_into_patch_skips_blank_title() {
        let values = FieldValues {
            priority: Some(Priority::Low),
            ..FieldValues::default()
        };
        let patch = values.into_patch("   ");
        assert_eq!(patch.title, None);
        assert_eq!(patch.priority, Some(Priority::Low));
    }
}
