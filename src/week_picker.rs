use crate::{
    error::BookingError,
    locale::{format_day_month, slot_count_label, weekday_name, DAY_NAMES},
    types::{hour_format, TimeSlot},
};
use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Hour rows of the grid. There is no 13:00 row.
const GRID_HOURS: [u32; 9] = [9, 10, 11, 12, 14, 15, 16, 17, 18];

pub fn grid_hours() -> Vec<NaiveTime> {
    GRID_HOURS
        .iter()
        .filter_map(|hour| NaiveTime::from_hms_opt(*hour, 0, 0))
        .collect()
}

/// Monday of the week containing `today`.
pub fn week_start_of(today: NaiveDate) -> NaiveDate {
    today - Duration::days(i64::from(today.weekday().num_days_from_monday()))
}

/// A selected calendar cell. Ordered by date, then hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    pub date: NaiveDate,
    #[serde(with = "hour_format")]
    pub hour: NaiveTime,
}

impl From<SlotKey> for TimeSlot {
    fn from(key: SlotKey) -> Self {
        TimeSlot {
            day: weekday_name(key.date).to_string(),
            hour: key.hour,
            date: key.date,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DayColumn {
    pub day: &'static str,
    pub date: NaiveDate,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlannerView {
    pub week_range: String,
    pub days: Vec<DayColumn>,
    pub hours: Vec<String>,
    pub selected: Vec<SlotKey>,
    pub confirm_label: Option<String>,
}

/// Weekly availability grid: 7 day columns starting on Monday.
#[derive(Debug, Clone)]
pub struct WeekPicker {
    week_start: NaiveDate,
    selection: BTreeSet<SlotKey>,
}

impl WeekPicker {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            week_start: week_start_of(today),
            selection: BTreeSet::new(),
        }
    }

    pub fn week_start(&self) -> NaiveDate {
        self.week_start
    }

    pub fn previous_week(&mut self) {
        self.week_start -= Duration::days(7);
    }

    pub fn next_week(&mut self) {
        self.week_start += Duration::days(7);
    }

    pub fn week_dates(&self) -> Vec<NaiveDate> {
        (0..7)
            .map(|offset| self.week_start + Duration::days(offset))
            .collect()
    }

    pub fn week_range_label(&self) -> String {
        let week_end = self.week_start + Duration::days(6);
        format!(
            "{} - {}",
            format_day_month(self.week_start),
            format_day_month(week_end)
        )
    }

    fn slot_key(&self, day_index: usize, hour: NaiveTime) -> Result<SlotKey, BookingError> {
        if day_index >= DAY_NAMES.len() {
            return Err(BookingError::InvalidInput(format!(
                "Day index {day_index} is outside of the week"
            )));
        }
        if !grid_hours().contains(&hour) {
            return Err(BookingError::InvalidInput(format!(
                "{} is not a bookable hour",
                hour.format(hour_format::FORMAT)
            )));
        }
        Ok(SlotKey {
            date: self.week_start + Duration::days(day_index as i64),
            hour,
        })
    }

    /// Flips the cell and returns whether it is selected afterwards.
    pub fn toggle(&mut self, day_index: usize, hour: NaiveTime) -> Result<bool, BookingError> {
        let key = self.slot_key(day_index, hour)?;
        if self.selection.remove(&key) {
            Ok(false)
        } else {
            self.selection.insert(key);
            Ok(true)
        }
    }

    pub fn is_selected(&self, day_index: usize, hour: NaiveTime) -> bool {
        self.slot_key(day_index, hour)
            .map(|key| self.selection.contains(&key))
            .unwrap_or(false)
    }

    pub fn selection_len(&self) -> usize {
        self.selection.len()
    }

    /// Selected cells as slots, ordered by date then hour. Previously confirmed
    /// slots are not consulted, so confirming twice duplicates them.
    pub fn selected_slots(&self) -> Vec<TimeSlot> {
        self.selection.iter().copied().map(TimeSlot::from).collect()
    }

    pub fn clear(&mut self) {
        self.selection.clear();
    }

    pub fn view(&self) -> PlannerView {
        let days = self
            .week_dates()
            .into_iter()
            .map(|date| DayColumn {
                day: weekday_name(date),
                date,
                label: format_day_month(date),
            })
            .collect();
        let hours = grid_hours()
            .iter()
            .map(|hour| hour.format(hour_format::FORMAT).to_string())
            .collect();
        let confirm_label = match self.selection.len() {
            0 => None,
            count => Some(format!("Confirmer {}", slot_count_label(count))),
        };

        PlannerView {
            week_range: self.week_range_label(),
            days,
            hours,
            selected: self.selection.iter().copied().collect(),
            confirm_label,
        }
    }
}
