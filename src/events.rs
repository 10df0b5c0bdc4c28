use crate::{
    error::BookingError,
    locale::format_long_date,
    services::total_price,
    types::{hour_format, Event, EventBooking, EventStatus},
};
use chrono::{NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Events at or below this many remaining places get the "Places limitées" badge.
const LIMITED_PLACES_THRESHOLD: u32 = 5;

#[derive(Debug, PartialEq, Eq)]
pub struct StatusStyle {
    pub label: &'static str,
    pub color: &'static str,
}

/// Indexed by `EventStatus` discriminant.
static STATUS_STYLES: [StatusStyle; 4] = [
    StatusStyle {
        label: "Planifié",
        color: "blue",
    },
    StatusStyle {
        label: "En cours",
        color: "green",
    },
    StatusStyle {
        label: "Terminé",
        color: "gray",
    },
    StatusStyle {
        label: "Annulé",
        color: "red",
    },
];

impl EventStatus {
    pub fn style(self) -> &'static StatusStyle {
        &STATUS_STYLES[self as usize]
    }

    /// `planifie -> en_cours -> termine`, and `annule` from either of the first two.
    /// Keeping the current status is always allowed.
    pub fn can_transition_to(self, next: EventStatus) -> bool {
        use EventStatus::*;
        self == next
            || matches!(
                (self, next),
                (Planned, InProgress) | (InProgress, Finished) | (Planned | InProgress, Cancelled)
            )
    }
}

impl Event {
    pub fn is_available(&self, today: NaiveDate) -> bool {
        self.status == EventStatus::Planned && self.remaining_places > 0 && self.date >= today
    }

    pub fn has_limited_places(&self) -> bool {
        self.remaining_places > 0 && self.remaining_places <= LIMITED_PLACES_THRESHOLD
    }

    pub fn time_range(&self) -> String {
        format!(
            "{} - {}",
            self.start.format(hour_format::FORMAT),
            self.end.format(hour_format::FORMAT)
        )
    }

    pub fn price_for(&self, places: u32) -> f64 {
        total_price(self.price.unwrap_or(0.0), places)
    }

    pub fn book_seats(&mut self, requested: u32) -> Result<(), BookingError> {
        if requested == 0 {
            return Err(BookingError::Constraint(
                "At least one place must be requested".into(),
            ));
        }
        if requested > self.remaining_places {
            return Err(BookingError::Constraint(format!(
                "Requested {requested} places but only {} are left",
                self.remaining_places
            )));
        }
        self.remaining_places -= requested;
        Ok(())
    }

    pub fn set_status(&mut self, next: EventStatus) -> Result<(), BookingError> {
        if !self.status.can_transition_to(next) {
            return Err(BookingError::Constraint(format!(
                "An event can't go from '{}' to '{}'",
                self.status.style().label,
                next.style().label
            )));
        }
        self.status = next;
        Ok(())
    }
}

pub fn available_events(events: &[Event], today: NaiveDate) -> Vec<&Event> {
    events
        .iter()
        .filter(|event| event.is_available(today))
        .collect()
}

/// An event as shown on a dashboard, with its status rendered through the shared table.
#[derive(Debug, Clone, Serialize)]
pub struct EventView {
    #[serde(flatten)]
    pub event: Event,
    pub status_label: &'static str,
    pub status_color: &'static str,
    pub formatted_date: String,
    pub time_range: String,
    pub limited_places: bool,
}

impl From<Event> for EventView {
    fn from(event: Event) -> Self {
        let style = event.status.style();
        Self {
            status_label: style.label,
            status_color: style.color,
            formatted_date: format_long_date(event.date),
            time_range: event.time_range(),
            limited_places: event.has_limited_places(),
            event,
        }
    }
}

fn one_place() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EventForm {
    #[validate(length(min = 1, message = "a title is required"))]
    pub title: String,
    pub date: NaiveDate,
    #[serde(with = "hour_format")]
    pub start: NaiveTime,
    #[serde(with = "hour_format")]
    pub end: NaiveTime,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default = "one_place")]
    #[validate(range(min = 1, message = "an event needs at least one place"))]
    pub places: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "the price can't be negative"))]
    pub price: f64,
}

impl EventForm {
    pub fn into_event(self, provider_id: Uuid) -> Result<Event, BookingError> {
        self.validate()?;
        let description = Some(self.description).filter(|text| !text.trim().is_empty());

        Ok(Event {
            id: Uuid::new_v4(),
            title: self.title,
            date: self.date,
            start: self.start,
            end: self.end,
            status: self.status,
            capacity: self.places,
            remaining_places: self.places,
            description,
            price: Some(self.price),
            provider_id,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EventBookingForm {
    #[validate(length(min = 1, message = "the participant name is required"))]
    pub participant_name: String,
    #[validate(email(message = "a valid email is required"))]
    pub participant_email: String,
    #[serde(default)]
    pub participant_phone: Option<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default = "one_place")]
    pub number_of_places: u32,
}

/// Reserves places on `event` and returns the booking record.
pub fn book_event(
    event: &mut Event,
    form: EventBookingForm,
    today: NaiveDate,
) -> Result<EventBooking, BookingError> {
    form.validate()?;
    if !event.is_available(today) {
        return Err(BookingError::Constraint(format!(
            "'{}' is not open for booking",
            event.title
        )));
    }
    event.book_seats(form.number_of_places)?;

    Ok(EventBooking {
        event_id: event.id,
        event_title: event.title.clone(),
        event_date: event.date,
        event_time: event.time_range(),
        participant_name: form.participant_name,
        participant_email: form.participant_email,
        participant_phone: form.participant_phone.filter(|phone| !phone.is_empty()),
        notes: form.notes,
        number_of_places: form.number_of_places,
        total_price: event.price_for(form.number_of_places),
        booking_date: Utc::now(),
    })
}
