use crate::{
    locale::{format_full_date, slot_count_label},
    types::TimeSlot,
};
use chrono::NaiveDate;
use serde::Serialize;

/// One card of the availability overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayAvailability {
    pub day: String,
    pub date: NaiveDate,
    pub label: String,
    pub count_label: String,
    /// Sorted by hour.
    pub slots: Vec<TimeSlot>,
}

impl DayAvailability {
    pub fn chip_labels(&self) -> Vec<String> {
        self.slots
            .iter()
            .map(|slot| slot.hour.format("%H:%M").to_string())
            .collect()
    }
}

/// Groups slots by `(day, date)`, keeping the order in which groups first appear.
pub fn group_by_day(slots: &[TimeSlot]) -> Vec<DayAvailability> {
    let mut groups: Vec<DayAvailability> = Vec::new();

    for slot in slots {
        match groups
            .iter_mut()
            .find(|group| group.day == slot.day && group.date == slot.date)
        {
            Some(group) => group.slots.push(slot.clone()),
            None => groups.push(DayAvailability {
                day: slot.day.clone(),
                date: slot.date,
                label: format!("{} — {}", slot.day, format_full_date(slot.date)),
                count_label: String::new(),
                slots: vec![slot.clone()],
            }),
        }
    }

    for group in &mut groups {
        group.slots.sort_by_key(|slot| slot.hour);
        group.count_label = slot_count_label(group.slots.len());
    }
    groups
}

pub fn append_slots(slots: &mut Vec<TimeSlot>, confirmed: Vec<TimeSlot>) {
    slots.extend(confirmed);
}

/// Removes the first slot equal to `slot`. Returns false if there was none.
pub fn remove_slot(slots: &mut Vec<TimeSlot>, slot: &TimeSlot) -> bool {
    match slots.iter().position(|candidate| candidate == slot) {
        Some(index) => {
            slots.remove(index);
            true
        }
        None => false,
    }
}
