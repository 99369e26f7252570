use anyhow::{anyhow, Result};
use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};

/// Parses a human due date into a UTC timestamp.
///
/// Accepted forms: `today`/`tod`, `tomorrow`/`tom`, relative `+Nd`/`+Nw`,
/// `YYYY-MM-DD`, and `YYYY-MM-DD HH:MM:SS`. Date-only inputs resolve to the
/// end of that day in local time.
pub fn parse_due_date(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();
    let today = Local::now().date_naive();

    match input.to_lowercase().as_str() {
        "today" | "tod" => return end_of_day(today),
        "tomorrow" | "tom" => return end_of_day(today + Duration::days(1)),
        _ => {}
    }

    if let Some(rest) = input.strip_prefix('+') {
        // Split on chars, not bytes: the unit may be any character.
        let mut chars = rest.chars();
        let unit = chars
            .next_back()
            .ok_or_else(|| anyhow!("Invalid relative date: {}", input))?;
        let count: i64 = chars
            .as_str()
            .parse()
            .map_err(|_| anyhow!("Invalid relative date: {}", input))?;
        let target = match unit {
            'd' => today + Duration::days(count),
            'w' => today + Duration::weeks(count),
            _ => return Err(anyhow!("Unknown unit in relative date: {}", unit)),
        };
        return end_of_day(target);
    }

    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S") {
        return Local
            .from_local_datetime(&dt)
            .single()
            .map(|local| local.with_timezone(&Utc))
            .ok_or_else(|| anyhow!("Ambiguous local time: {}", input));
    }
    if let Ok(d) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return end_of_day(d);
    }

    Err(anyhow!("Could not parse date: {}", input))
}

fn end_of_day(date: NaiveDate) -> Result<DateTime<Utc>> {
    let local_dt = date
        .and_hms_opt(23, 59, 59)
        .ok_or_else(|| anyhow!("Invalid date: {}", date))?;
    Local
        .from_local_datetime(&local_dt)
        .single()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| anyhow!("Ambiguous local time on {}", date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_plain_date_is_end_of_day() {
        let parsed = parse_due_date("2026-09-15").unwrap();
        let local: DateTime<Local> = parsed.with_timezone(&Local);
        assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2026, 9, 15).unwrap());
        assert_eq!((local.hour(), local.minute(), local.second()), (23, 59, 59));
    }

    #[test]
    fn test_parse_date_with_time() {
        let parsed = parse_due_date("2026-09-15 18:30:00").unwrap();
        let local: DateTime<Local> = parsed.with_timezone(&Local);
        assert_eq!((local.hour(), local.minute()), (18, 30));
    }

    #[test]
    fn test_relative_days() {
        let today = Local::now().date_naive();
        let parsed = parse_due_date("+3d").unwrap();
        let local: DateTime<Local> = parsed.with_timezone(&Local);
        assert_eq!(local.date_naive(), today + Duration::days(3));

        let parsed = parse_due_date("+2w").unwrap();
        let local: DateTime<Local> = parsed.with_timezone(&Local);
        assert_eq!(local.date_naive(), today + Duration::weeks(2));
    }

    #[test]
    fn test_keywords() {
        let today = Local::now().date_naive();
        let tod: DateTime<Local> = parse_due_date("today").unwrap().with_timezone(&Local);
        assert_eq!(tod.date_naive(), today);
        let tom: DateTime<Local> = parse_due_date("tomorrow").unwrap().with_timezone(&Local);
        assert_eq!(tom.date_naive(), today + Duration::days(1));
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert!(parse_due_date("").is_err());
        assert!(parse_due_date("someday").is_err());
        assert!(parse_due_date("+").is_err());
        assert!(parse_due_date("+d").is_err());
        assert!(parse_due_date("+3y").is_err());
        assert!(parse_due_date("2026-13-40").is_err());
    }

    #[test]
    fn test_multibyte_relative_input_is_an_error() {
        assert!(parse_due_date("+é").is_err());
        assert!(parse_due_date("+3é").is_err());
        assert!(parse_due_date("+３d").is_err()); // fullwidth digit
    }
}
