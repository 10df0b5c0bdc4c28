use crate::{
    error::BookingError,
    payment::PaymentMethod,
    types::{hour_format, Service, ServiceBooking},
};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Suggested in the management form; any label is accepted.
pub const CATEGORIES: [&str; 7] = [
    "Consultation",
    "Formation",
    "Coaching",
    "Thérapie",
    "Conseil",
    "Technique",
    "Autre",
];

pub const DURATIONS: [&str; 10] = [
    "15 min",
    "30 min",
    "45 min",
    "1h",
    "1h30",
    "2h",
    "2h30",
    "3h",
    "Demi-journée",
    "Journée complète",
];

pub fn total_price(unit_price: f64, quantity: u32) -> f64 {
    unit_price * f64::from(quantity)
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServiceForm {
    #[validate(length(min = 1, message = "a name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "a duration is required"))]
    pub duration: String,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "the price can't be negative"))]
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1, message = "a category is required"))]
    pub category: String,
}

impl ServiceForm {
    fn into_service(self, id: Uuid) -> Result<Service, BookingError> {
        self.validate()?;
        Ok(Service {
            id,
            name: self.name,
            duration: self.duration,
            price: self.price,
            description: self.description,
            category: self.category,
        })
    }
}

pub fn find_service(services: &[Service], id: Uuid) -> Result<&Service, BookingError> {
    services
        .iter()
        .find(|service| service.id == id)
        .ok_or_else(|| BookingError::NotFound(format!("Service {id}")))
}

pub fn create_service(
    services: &mut Vec<Service>,
    form: ServiceForm,
) -> Result<Service, BookingError> {
    let service = form.into_service(Uuid::new_v4())?;
    services.push(service.clone());
    Ok(service)
}

/// Replaces the service with the same id, keeping its position in the catalog.
pub fn update_service(
    services: &mut [Service],
    id: Uuid,
    form: ServiceForm,
) -> Result<Service, BookingError> {
    let updated = form.into_service(id)?;
    let existing = services
        .iter_mut()
        .find(|service| service.id == id)
        .ok_or_else(|| BookingError::NotFound(format!("Service {id}")))?;
    *existing = updated.clone();
    Ok(updated)
}

pub fn delete_service(services: &mut Vec<Service>, id: Uuid) -> Result<(), BookingError> {
    let count = services.len();
    services.retain(|service| service.id != id);
    if services.len() == count {
        return Err(BookingError::NotFound(format!("Service {id}")));
    }
    Ok(())
}

fn one() -> u32 {
    1
}

/// Every step of the booking page. Steps left out are `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceBookingForm {
    #[serde(default)]
    pub service_id: Option<Uuid>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default, with = "hour_format::option")]
    pub time: Option<NaiveTime>,
    #[serde(default = "one")]
    pub quantity: u32,
    #[serde(default)]
    pub payment: Option<PaymentMethod>,
}

pub fn book_service(
    services: &[Service],
    form: ServiceBookingForm,
) -> Result<ServiceBooking, BookingError> {
    let (Some(service_id), Some(date), Some(time), Some(payment)) =
        (form.service_id, form.date, form.time, form.payment)
    else {
        return Err(BookingError::FormIncomplete(
            "choose a service, a date, a time and a payment method".into(),
        ));
    };
    if form.quantity == 0 {
        return Err(BookingError::InvalidInput(
            "At least one place must be booked".into(),
        ));
    }

    let service = find_service(services, service_id)?.clone();
    let payment = payment.complete(total_price(service.price, form.quantity))?;

    Ok(ServiceBooking {
        service,
        date,
        time,
        quantity: form.quantity,
        payment,
    })
}
