//! Loose `MM/YYYY` normalisation for the date inputs.
//!
//! Only the shape `^\d{1,2}/?\d{4}$` is touched. Anything else, including
//! "Present" and free text like "Spring 2021", is left exactly as typed.

/// The literal accepted in end-date fields for ongoing positions.
pub const PRESENT: &str = "present";

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// True when `value` is one or two digits, an optional `/`, then four digits.
pub fn is_month_year(value: &str) -> bool {
    match value.split_once('/') {
        Some((month, year)) => {
            (1..=2).contains(&month.len())
                && all_digits(month)
                && year.len() == 4
                && all_digits(year)
        }
        None => (5..=6).contains(&value.len()) && all_digits(value),
    }
}

/// Returns the value to write back into a date field on blur, or `None` when
/// the field must be left untouched.
///
/// A matching value is written back trimmed; without a separator, `/` goes in
/// after the first digit of a 5-character value or the second digit of a
/// 6-character one.
pub fn reformat_date(raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() || value.eq_ignore_ascii_case(PRESENT) {
        return None;
    }
    if !is_month_year(value) {
        return None;
    }
    if value.contains('/') {
        return Some(value.to_string());
    }

    // Digits only from here, so byte offsets are char boundaries.
    let split = match value.len() {
        5 => 1,
        _ => 2,
    };
    let (month, year) = value.split_at(split);
    Some(format!("{month}/{year}"))
}
