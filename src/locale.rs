//! French labels and date formats shown on the dashboards.

use chrono::{Datelike, NaiveDate};

pub const DAY_NAMES: [&str; 7] = [
    "Lundi", "Mardi", "Mercredi", "Jeudi", "Vendredi", "Samedi", "Dimanche",
];

const MONTH_NAMES: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Weeks start on Monday, so Sunday is the last entry.
pub fn weekday_name(date: NaiveDate) -> &'static str {
    DAY_NAMES[date.weekday().num_days_from_monday() as usize]
}

pub fn format_day_month(date: NaiveDate) -> String {
    date.format("%d/%m").to_string()
}

pub fn format_full_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// e.g. `jeudi 15 février 2024`
pub fn format_long_date(date: NaiveDate) -> String {
    format!(
        "{} {} {} {}",
        weekday_name(date).to_lowercase(),
        date.day(),
        MONTH_NAMES[date.month0() as usize],
        date.year()
    )
}

pub fn slot_count_label(count: usize) -> String {
    if count > 1 {
        format!("{count} créneaux")
    } else {
        format!("{count} créneau")
    }
}
