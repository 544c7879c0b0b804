use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};

use super::lexicon::{self, Direction, Modifier, Unit};

/// Natural-language dates in English, Hindi and Hinglish. Ambiguity resolves
/// toward the future relative to `reference`; a month without a day means
/// its first day.
pub(crate) fn parse(text: &str, reference: NaiveDate) -> Option<NaiveDate> {
    let tokens = tokenize(text);
    if tokens.is_empty() {
        return None;
    }
    let words: Vec<&str> = tokens.iter().map(String::as_str).collect();

    relative_day(&words, reference)
        .or_else(|| weekday(&words, reference))
        .or_else(|| offset(&words, reference))
        .or_else(|| numeric(&words))
        .or_else(|| calendar(&words, reference))
}

fn tokenize(text: &str) -> Vec<String> {
    let normalized: String = text
        .chars()
        .map(lexicon::ascii_digit)
        .map(|c| if c == ',' { ' ' } else { c })
        .collect::<String>()
        .to_lowercase();

    normalized
        .split_whitespace()
        .map(|t| {
            t.trim_matches(|c: char| {
                matches!(c, '.' | '?' | '!' | '।' | ';' | ':' | '(' | ')' | '"' | '\'')
            })
        })
        .filter(|t| !t.is_empty())
        .map(strip_ordinal)
        .filter(|t| !lexicon::is_filler(t))
        .map(str::to_string)
        .collect()
}

fn strip_ordinal(token: &str) -> &str {
    for suffix in ["st", "nd", "rd", "th"] {
        if let Some(digits) = token.strip_suffix(suffix) {
            if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
                return digits;
            }
        }
    }
    token
}

fn relative_day(words: &[&str], reference: NaiveDate) -> Option<NaiveDate> {
    let days = lexicon::relative_day(&words.join(" "))?;
    reference.checked_add_signed(Duration::days(days))
}

fn weekday(words: &[&str], reference: NaiveDate) -> Option<NaiveDate> {
    match words {
        [day] => Some(next_after(reference, lexicon::weekday(day)?)),
        [modifier, day] => {
            let target = lexicon::weekday(day)?;
            Some(match lexicon::modifier(modifier)? {
                Modifier::Next => next_after(reference, target),
                Modifier::This => on_or_after(reference, target),
                Modifier::Last => last_before(reference, target),
            })
        }
        _ => None,
    }
}

fn offset(words: &[&str], reference: NaiveDate) -> Option<NaiveDate> {
    match words {
        ["in", n, unit] | ["within", n, unit] => {
            shift(reference, lexicon::number(n)?, lexicon::unit(unit)?, Direction::Forward)
        }
        [n, unit, "from", "now" | "today"] => {
            shift(reference, lexicon::number(n)?, lexicon::unit(unit)?, Direction::Forward)
        }
        [n, unit, dir] => shift(
            reference,
            lexicon::number(n)?,
            lexicon::unit(unit)?,
            lexicon::direction(dir)?,
        ),
        [modifier, unit] => {
            let unit = lexicon::unit(unit)?;
            match lexicon::modifier(modifier)? {
                Modifier::Next => shift(reference, 1, unit, Direction::Forward),
                Modifier::This => Some(reference),
                Modifier::Last => shift(reference, 1, unit, Direction::Backward),
            }
        }
        _ => None,
    }
}

/// Single-token numeric dates. Year-first is unambiguous; otherwise the
/// month comes first, as an English reader would take "10/12/2025".
fn numeric(words: &[&str]) -> Option<NaiveDate> {
    let [token] = words else {
        return None;
    };
    let parts: Vec<&str> = token.split(['/', '-', '.']).collect();
    let [a, b, c] = parts.as_slice() else {
        return None;
    };
    if ![a, b, c].iter().all(|p| !p.is_empty() && p.chars().all(|ch| ch.is_ascii_digit())) {
        return None;
    }

    if a.len() == 4 {
        NaiveDate::from_ymd_opt(a.parse().ok()?, b.parse().ok()?, c.parse().ok()?)
    } else if c.len() == 4 {
        NaiveDate::from_ymd_opt(c.parse().ok()?, a.parse().ok()?, b.parse().ok()?)
    } else {
        None
    }
}

/// Month-name dates: "15 October 2025", "Oct 15", "15 अक्टूबर", "October".
fn calendar(words: &[&str], reference: NaiveDate) -> Option<NaiveDate> {
    let mut month = None;
    let mut day = None;
    let mut year = None;

    for word in words {
        if let Some(m) = lexicon::month(word) {
            if month.replace(m).is_some() {
                return None;
            }
        } else if lexicon::weekday(word).is_some() {
            // "Friday, 17 October" names the weekday alongside the date
            continue;
        } else if word.chars().all(|c| c.is_ascii_digit()) {
            let value: u32 = word.parse().ok()?;
            if word.len() == 4 {
                if year.replace(value as i32).is_some() {
                    return None;
                }
            } else if (1..=31).contains(&value) {
                if day.replace(value).is_some() {
                    return None;
                }
            } else {
                return None;
            }
        } else {
            return None;
        }
    }

    let month = month?;
    match (day, year) {
        (Some(day), Some(year)) => NaiveDate::from_ymd_opt(year, month, day),
        (None, Some(year)) => NaiveDate::from_ymd_opt(year, month, 1),
        (Some(day), None) => {
            match NaiveDate::from_ymd_opt(reference.year(), month, day) {
                Some(date) if date >= reference => Some(date),
                _ => NaiveDate::from_ymd_opt(reference.year() + 1, month, day),
            }
        }
        (None, None) => match NaiveDate::from_ymd_opt(reference.year(), month, 1) {
            Some(date) if date >= reference => Some(date),
            _ => NaiveDate::from_ymd_opt(reference.year() + 1, month, 1),
        },
    }
}

fn shift(reference: NaiveDate, n: u32, unit: Unit, direction: Direction) -> Option<NaiveDate> {
    let forward = direction == Direction::Forward;
    match unit {
        Unit::Day | Unit::Week => {
            let days = i64::from(n) * if unit == Unit::Week { 7 } else { 1 };
            let delta = Duration::days(if forward { days } else { -days });
            reference.checked_add_signed(delta)
        }
        Unit::Month | Unit::Year => {
            let months = Months::new(if unit == Unit::Year { n.checked_mul(12)? } else { n });
            if forward {
                reference.checked_add_months(months)
            } else {
                reference.checked_sub_months(months)
            }
        }
    }
}

fn days_until(from: Weekday, to: Weekday) -> i64 {
    (i64::from(to.num_days_from_monday()) - i64::from(from.num_days_from_monday())).rem_euclid(7)
}

fn on_or_after(reference: NaiveDate, target: Weekday) -> NaiveDate {
    reference + Duration::days(days_until(reference.weekday(), target))
}

fn next_after(reference: NaiveDate, target: Weekday) -> NaiveDate {
    match days_until(reference.weekday(), target) {
        0 => reference + Duration::days(7),
        n => reference + Duration::days(n),
    }
}

fn last_before(reference: NaiveDate, target: Weekday) -> NaiveDate {
    match days_until(target, reference.weekday()) {
        0 => reference - Duration::days(7),
        n => reference - Duration::days(n),
    }
}
