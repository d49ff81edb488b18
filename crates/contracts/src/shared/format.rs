//! Форматирование сумм и дат для отображения гостю
//!
//! Суммы выводятся в индийской группировке разрядов (en-IN), даты
//! приходят от backend как `YYYY-MM-DD` или RFC 3339.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Placeholder for missing dates and labels
pub const NOT_AVAILABLE: &str = "N/A";

/// Форматирует сумму с 2 знаками после запятой и индийской группировкой
///
/// # Примеры
///
/// ```
/// use contracts::shared::format::format_amount_en_in;
/// assert_eq!(format_amount_en_in(1234567.5), "12,34,567.50");
/// ```
pub fn format_amount_en_in(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (integer_part, decimal_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    // Последние 3 цифры, затем группы по 2
    let digits: Vec<char> = integer_part.chars().collect();
    let mut result = String::new();
    if digits.len() <= 3 {
        result.push_str(integer_part);
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let lead = head.len() % 2;
        for (i, c) in head.iter().enumerate() {
            if i > 0 && (i + 2 - lead) % 2 == 0 {
                result.push(',');
            }
            result.push(*c);
        }
        result.push(',');
        result.extend(tail.iter());
    }

    // "-0.00" не показываем
    let sign = if result.chars().all(|c| c == '0' || c == ',') && decimal_part == "00" {
        ""
    } else {
        sign
    };

    format!("{}{}.{}", sign, result, decimal_part)
}

/// Parses `YYYY-MM-DD` or an RFC 3339 timestamp into a date-time.
///
/// Plain dates resolve to midnight.
pub fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    let date_part = value.get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Дата заезда/выезда: "2024-03-15" -> "15 Mar, 2024"
///
/// Пустая строка остаётся пустой, нераспознанная возвращается как есть.
pub fn format_stay_date(value: &str) -> String {
    if value.trim().is_empty() {
        return String::new();
    }
    match parse_date_time(value) {
        Some(dt) => format!("{} {}, {}", dt.day(), dt.format("%b"), dt.year()),
        None => value.to_string(),
    }
}

/// Срок депозита: "2024-03-01" -> "1st Mar, 24"
pub fn format_deadline(value: Option<&str>) -> String {
    let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
        return NOT_AVAILABLE.to_string();
    };
    match parse_date_time(value) {
        Some(dt) => format!(
            "{}{} {}, {}",
            dt.day(),
            ordinal_suffix(dt.day()),
            dt.format("%b"),
            dt.format("%y")
        ),
        None => value.to_string(),
    }
}

/// English ordinal suffix for a day of month.
pub fn ordinal_suffix(day: u32) -> &'static str {
    if (4..=20).contains(&day) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// "2024-03-15" -> "Fri, Mar 15, 2024"
pub fn format_long_date(value: Option<&str>) -> String {
    let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
        return NOT_AVAILABLE.to_string();
    };
    match parse_date_time(value) {
        Some(dt) => dt.format("%a, %b %-d, %Y").to_string(),
        None => value.to_string(),
    }
}

/// Timestamp shown on the payment receipt: "Mar 15, 2024, 02:30 PM"
pub fn format_receipt_time(dt: &NaiveDateTime) -> String {
    dt.format("%b %-d, %Y, %I:%M %p").to_string()
}

/// Количество ночей между заездом и выездом (округление вверх)
pub fn nights_between(arrival: &str, departure: &str) -> Option<i64> {
    let arrival = parse_date_time(arrival)?;
    let departure = parse_date_time(departure)?;
    let seconds = (departure - arrival).num_seconds();
    let day = 24 * 60 * 60;
    Some(if seconds > 0 {
        (seconds + day - 1) / day
    } else {
        seconds / day
    })
}
