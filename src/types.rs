use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::payment::PaymentRecord;

/// Serializes hours as `HH:MM`, the format every stored slot and event uses.
pub mod hour_format {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(hour: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hour.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use super::FORMAT;
        use chrono::NaiveTime;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            hour: &Option<NaiveTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match hour {
                Some(hour) => serializer.serialize_some(&hour.format(FORMAT).to_string()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveTime>, D::Error> {
            let raw: Option<String> = Option::deserialize(deserializer)?;
            raw.filter(|raw| !raw.is_empty())
                .map(|raw| NaiveTime::parse_from_str(&raw, FORMAT))
                .transpose()
                .map_err(serde::de::Error::custom)
        }
    }
}

/// One bookable hour on a given day. The triple is the identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    pub day: String,
    #[serde(with = "hour_format")]
    pub hour: NaiveTime,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EventStatus {
    #[default]
    #[serde(rename = "planifie")]
    Planned,
    #[serde(rename = "en_cours")]
    InProgress,
    #[serde(rename = "termine")]
    Finished,
    #[serde(rename = "annule")]
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    #[serde(rename = "titre")]
    pub title: String,
    pub date: NaiveDate,
    #[serde(rename = "debut", with = "hour_format")]
    pub start: NaiveTime,
    #[serde(rename = "fin", with = "hour_format")]
    pub end: NaiveTime,
    pub status: EventStatus,
    #[serde(rename = "nbr_place")]
    pub capacity: u32,
    #[serde(rename = "places_restantes")]
    pub remaining_places: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "prix", default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(rename = "prestataire_id")]
    pub provider_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    /// Free-text label such as "30 min" or "Demi-journée".
    pub duration: String,
    pub price: f64,
    pub description: String,
    pub category: String,
}

/// `Provider` accounts are stored as `"client"` and `Consumer` accounts as `"user"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    #[serde(rename = "client")]
    Provider,
    #[serde(rename = "user")]
    Consumer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    #[serde(rename = "type")]
    pub user_type: UserType,
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

impl User {
    pub fn is_provider(&self) -> bool {
        self.user_type == UserType::Provider
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderProfile {
    pub id: Uuid,
    pub name: String,
    pub profession: String,
    pub description: String,
    pub rating: f32,
    pub reviews: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventBooking {
    pub event_id: Uuid,
    pub event_title: String,
    pub event_date: NaiveDate,
    pub event_time: String,
    pub participant_name: String,
    pub participant_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_phone: Option<String>,
    pub notes: String,
    pub number_of_places: u32,
    pub total_price: f64,
    pub booking_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceBooking {
    pub service: Service,
    pub date: NaiveDate,
    #[serde(with = "hour_format")]
    pub time: NaiveTime,
    pub quantity: u32,
    pub payment: PaymentRecord,
}
