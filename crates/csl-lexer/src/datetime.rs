//! ISO 8601 date/time scanning with calendar validation.

use crate::cursor::Cursor;
use csl_token::DateTimeForm;

/// Outcome of a successful datetime scan.
pub(crate) struct DateTimeScan {
    pub form: DateTimeForm,
    pub errors: Vec<&'static str>,
}

/// Consumes exactly `n` ASCII digits and returns their value.
fn fixed_digits(cursor: &mut Cursor<'_>, n: usize) -> Option<u32> {
    let mut value = 0u32;
    for _ in 0..n {
        let ch = cursor.peek()?;
        let digit = ch.to_digit(10)?;
        cursor.bump();
        value = value * 10 + digit;
    }
    Some(value)
}

fn eat(cursor: &mut Cursor<'_>, ch: char) -> bool {
    if cursor.peek() == Some(ch) {
        cursor.bump();
        true
    } else {
        false
    }
}

fn is_leap_year(year: u32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

fn validate_date(year: u32, month: u32, day: u32, errors: &mut Vec<&'static str>) {
    if !(1..=12).contains(&month) || day < 1 || day > days_in_month(year, month) {
        errors.push("date is not a valid calendar date");
    }
}

fn validate_time(hour: u32, minute: u32, second: u32, errors: &mut Vec<&'static str>) {
    if hour > 23 || minute > 59 || second > 59 {
        errors.push("time of day is out of range");
    }
}

/// Attempts to scan a datetime literal at the cursor.
///
/// Tries the date-led forms (`YYYY-MM-DD`, optionally combined with a time
/// and offset) before the bare time form. Restores the cursor and returns
/// `None` when no datetime shape matches, so number scanning can take over.
pub(crate) fn try_scan_datetime(cursor: &mut Cursor<'_>) -> Option<DateTimeScan> {
    let save = cursor.clone();
    if let Some(scan) = scan_date_led(cursor) {
        return Some(scan);
    }
    *cursor = save.clone();
    if let Some(scan) = scan_time_only(cursor) {
        return Some(scan);
    }
    *cursor = save;
    None
}

/// `HH:MM:SS[.frac]`; leaves the cursor after the fraction.
fn scan_time_fields(cursor: &mut Cursor<'_>, errors: &mut Vec<&'static str>) -> Option<()> {
    let hour = fixed_digits(cursor, 2)?;
    if !eat(cursor, ':') {
        return None;
    }
    let minute = fixed_digits(cursor, 2)?;
    if !eat(cursor, ':') {
        return None;
    }
    let second = fixed_digits(cursor, 2)?;
    if cursor.peek() == Some('.') && cursor.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
        cursor.bump();
        cursor.bump_while(|c| c.is_ascii_digit());
    }
    validate_time(hour, minute, second, errors);
    Some(())
}

fn scan_date_led(cursor: &mut Cursor<'_>) -> Option<DateTimeScan> {
    let mut errors = Vec::new();
    let year = fixed_digits(cursor, 4)?;
    if !eat(cursor, '-') {
        return None;
    }
    let month = fixed_digits(cursor, 2)?;
    if !eat(cursor, '-') {
        return None;
    }
    let day = fixed_digits(cursor, 2)?;
    // A longer digit run is not a date.
    if cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
        return None;
    }
    validate_date(year, month, day, &mut errors);

    // Optional combined time, joined by `T` or a space directly before `HH:`.
    let date_end = cursor.clone();
    let combined = match cursor.peek() {
        Some('T') => {
            cursor.bump();
            true
        }
        Some(' ')
            if cursor.peek_at(1).is_some_and(|c| c.is_ascii_digit())
                && cursor.peek_at(2).is_some_and(|c| c.is_ascii_digit())
                && cursor.peek_at(3) == Some(':') =>
        {
            cursor.bump();
            true
        }
        _ => false,
    };
    if !combined {
        return Some(DateTimeScan { form: DateTimeForm::LocalDate, errors });
    }
    if scan_time_fields(cursor, &mut errors).is_none() {
        // `2024-01-02T` with nothing usable after it stays a plain date.
        *cursor = date_end;
        return Some(DateTimeScan { form: DateTimeForm::LocalDate, errors });
    }

    // Optional offset: `Z` or `±HH:MM`.
    match cursor.peek() {
        Some('Z') => {
            cursor.bump();
            Some(DateTimeScan { form: DateTimeForm::OffsetDateTime, errors })
        }
        Some('+') | Some('-') => {
            let before_sign = cursor.clone();
            cursor.bump();
            let offset = (|| {
                let oh = fixed_digits(cursor, 2)?;
                if !eat(cursor, ':') {
                    return None;
                }
                let om = fixed_digits(cursor, 2)?;
                Some((oh, om))
            })();
            match offset {
                Some((oh, om)) => {
                    if oh > 23 || om > 59 {
                        errors.push("timezone offset is out of range");
                    }
                    Some(DateTimeScan { form: DateTimeForm::OffsetDateTime, errors })
                }
                None => {
                    // The sign belongs to the surrounding expression.
                    *cursor = before_sign;
                    Some(DateTimeScan { form: DateTimeForm::LocalDateTime, errors })
                }
            }
        }
        _ => Some(DateTimeScan { form: DateTimeForm::LocalDateTime, errors }),
    }
}

fn scan_time_only(cursor: &mut Cursor<'_>) -> Option<DateTimeScan> {
    let mut errors = Vec::new();
    scan_time_fields(cursor, &mut errors)?;
    if cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(DateTimeScan { form: DateTimeForm::LocalTime, errors })
}
