use crate::{
    store::{KeyValueStore, StoreError, StoreKey},
    types::{Event, EventStatus, ProviderProfile, Service},
};
use chrono::{Duration, NaiveDate, NaiveTime};
use tracing::info;
use uuid::Uuid;

fn hour(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

fn example_providers() -> Vec<ProviderProfile> {
    [
        (
            "Dr. Sarah Martin",
            "Médecin généraliste",
            "Consultation générale et suivi médical",
            4.8,
            124,
        ),
        (
            "Marie Dubois",
            "Coach personnel",
            "Accompagnement sportif et bien-être",
            4.9,
            87,
        ),
        (
            "Jean Leclerc",
            "Consultant digital",
            "Stratégie digitale et marketing",
            4.7,
            156,
        ),
    ]
    .into_iter()
    .map(|(name, profession, description, rating, reviews)| ProviderProfile {
        id: Uuid::new_v4(),
        name: name.into(),
        profession: profession.into(),
        description: description.into(),
        rating,
        reviews,
    })
    .collect()
}

fn example_services() -> Vec<Service> {
    [
        ("Consultation générale", "30 min", 60.0, "Consultation médicale complète"),
        ("Consultation de suivi", "20 min", 45.0, "Suivi médical régulier"),
        ("Consultation préventive", "45 min", 80.0, "Bilan de santé préventif"),
    ]
    .into_iter()
    .map(|(name, duration, price, description)| Service {
        id: Uuid::new_v4(),
        name: name.into(),
        duration: duration.into(),
        price,
        description: description.into(),
        category: "Consultation".into(),
    })
    .collect()
}

fn example_events(provider_id: Uuid, today: NaiveDate) -> Vec<Event> {
    [
        ("Formation React Avancée", 5, (9, 0), (17, 0), 20, 12, 150.0),
        ("Atelier UX/UI Design", 10, (14, 0), (18, 0), 15, 8, 80.0),
        ("Webinaire Gratuit - Tendances", 2, (19, 0), (20, 30), 100, 45, 0.0),
    ]
    .into_iter()
    .map(
        |(title, days_ahead, start, end, capacity, remaining_places, price)| Event {
            id: Uuid::new_v4(),
            title: title.into(),
            date: today + Duration::days(days_ahead),
            start: hour(start.0, start.1),
            end: hour(end.0, end.1),
            status: EventStatus::Planned,
            capacity,
            remaining_places,
            description: None,
            price: Some(price),
            provider_id,
        },
    )
    .collect()
}

/// Fills an empty provider directory with example providers. The first one gets
/// services and upcoming events. Does nothing if providers already exist.
pub fn seed_demo_data<S: KeyValueStore>(store: &S, today: NaiveDate) -> Result<(), StoreError> {
    let existing: Vec<ProviderProfile> = store.read_list(StoreKey::Providers)?;
    if !existing.is_empty() {
        info!("Provider directory is not empty, skipping demo data");
        return Ok(());
    }

    let providers = example_providers();
    store.write_json(StoreKey::Providers, &providers)?;
    if let Some(provider) = providers.first() {
        store.write_json(StoreKey::Services(provider.id), &example_services())?;
        store.write_json(
            StoreKey::Events(provider.id),
            &example_events(provider.id, today),
        )?;
    }
    info!(providers = providers.len(), "Demo data inserted");
    Ok(())
}
