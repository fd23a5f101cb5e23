/// Форматирование дат и сумм для таблиц и карточек
use chrono::{DateTime, NaiveDate, Utc};

/// "Jan 15, 2025"
pub fn format_date(dt: DateTime<Utc>) -> String {
    dt.format("%b %d, %Y").to_string()
}

/// "Jan 15, 2025 09:00"
pub fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.format("%b %d, %Y %H:%M").to_string()
}

pub fn format_opt_date(dt: Option<DateTime<Utc>>) -> String {
    dt.map(format_date).unwrap_or_else(|| "—".to_string())
}

pub fn format_naive(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%b %d, %Y").to_string())
        .unwrap_or_else(|| "—".to_string())
}

/// Значение для `<input type="date">`
pub fn to_input_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Пустая строка или мусор дают `None`
pub fn parse_input_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Срок относительно текущего момента: "Due today", "Due in 3 days", "2 days overdue"
pub fn due_label(due: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (due.date_naive() - now.date_naive()).num_days();
    match days {
        0 => "Due today".to_string(),
        1 => "Due tomorrow".to_string(),
        d if d > 1 => format!("Due in {} days", d),
        -1 => "1 day overdue".to_string(),
        d => format!("{} days overdue", -d),
    }
}

/// "$1,149.75"
pub fn format_money(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let int_part = (cents / 100).to_string();
    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_format_dates() {
        assert_eq!(format_date(at(2025, 1, 15, 9)), "Jan 15, 2025");
        assert_eq!(format_datetime(at(2025, 1, 15, 9)), "Jan 15, 2025 09:00");
        assert_eq!(format_opt_date(None), "—");
    }

    #[test]
    fn test_input_date_roundtrip_and_garbage() {
        let d = parse_input_date("2024-03-15");
        assert_eq!(to_input_date(d), "2024-03-15");
        assert_eq!(parse_input_date(""), None);
        assert_eq!(parse_input_date("15.03.2024"), None);
    }

    #[test]
    fn test_due_label() {
        let now = at(2025, 1, 15, 12);
        assert_eq!(due_label(now, now), "Due today");
        assert_eq!(due_label(now + Duration::days(1), now), "Due tomorrow");
        assert_eq!(due_label(now + Duration::days(5), now), "Due in 5 days");
        assert_eq!(due_label(now - Duration::days(1), now), "1 day overdue");
        assert_eq!(due_label(now - Duration::days(3), now), "3 days overdue");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1149.75), "$1,149.75");
        assert_eq!(format_money(45.9), "$45.90");
        assert_eq!(format_money(1234567.0), "$1,234,567.00");
        assert_eq!(format_money(0.0), "$0.00");
    }
}
