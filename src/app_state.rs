use crate::{
    accounts::{self, LoginForm, RegisterForm},
    availability::{self, DayAvailability},
    error::BookingError,
    events::{self, EventBookingForm, EventForm},
    services::{self, ServiceBookingForm, ServiceForm},
    store::{KeyValueStore, StoreError, StoreKey},
    types::{
        Event, EventBooking, EventStatus, ProviderProfile, Service, ServiceBooking, TimeSlot,
        User,
    },
    week_picker::{PlannerView, WeekPicker},
};
use chrono::{NaiveDate, NaiveTime};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

/// Everything a handler may touch: the persisted store and the in-progress week grid.
#[derive(Clone)]
pub struct AppState<S: KeyValueStore> {
    pub store: S,
    pub website_title: String,
    planner: Arc<Mutex<WeekPicker>>,
}

impl<S: KeyValueStore> AppState<S> {
    pub fn new(store: S, website_title: String, today: NaiveDate) -> Self {
        Self {
            store,
            website_title,
            planner: Arc::new(Mutex::new(WeekPicker::new(today))),
        }
    }

    pub fn current_user(&self) -> Result<User, BookingError> {
        self.store
            .read_json::<User>(StoreKey::User)?
            .ok_or(BookingError::NotLoggedIn)
    }

    pub fn require_provider(&self) -> Result<User, BookingError> {
        let user = self.current_user()?;
        if !user.is_provider() {
            return Err(BookingError::NotLoggedIn);
        }
        Ok(user)
    }

    pub fn require_consumer(&self) -> Result<User, BookingError> {
        let user = self.current_user()?;
        if user.is_provider() {
            return Err(BookingError::NotLoggedIn);
        }
        Ok(user)
    }

    pub fn login(&self, form: LoginForm, today: NaiveDate) -> Result<User, BookingError> {
        let user = accounts::login(form)?;
        self.store.write_json(StoreKey::User, &user)?;
        self.reset_planner(today)?;
        info!(user_id = %user.id, "User logged in");
        Ok(user)
    }

    pub fn register(&self, form: RegisterForm, today: NaiveDate) -> Result<User, BookingError> {
        let user = accounts::register(form)?;
        self.store.write_json(StoreKey::User, &user)?;
        self.reset_planner(today)?;

        if let Some(profile) = accounts::provider_profile(&user) {
            let mut providers: Vec<ProviderProfile> = self.store.read_list(StoreKey::Providers)?;
            providers.push(profile);
            self.store.write_json(StoreKey::Providers, &providers)?;
        }
        info!(user_id = %user.id, user_type = ?user.user_type, "User registered");
        Ok(user)
    }

    pub fn logout(&self, today: NaiveDate) -> Result<(), BookingError> {
        self.store.delete(StoreKey::User)?;
        self.reset_planner(today)?;
        info!("User logged out");
        Ok(())
    }

    pub fn providers(&self, term: &str) -> Result<Vec<ProviderProfile>, BookingError> {
        let providers: Vec<ProviderProfile> = self.store.read_list(StoreKey::Providers)?;
        Ok(accounts::search_providers(&providers, term)
            .into_iter()
            .cloned()
            .collect())
    }

    fn with_planner<T>(
        &self,
        action: impl FnOnce(&mut WeekPicker) -> T,
    ) -> Result<T, BookingError> {
        let mut planner = self.planner.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(action(&mut *planner))
    }

    /// Drops any unconfirmed selection and reopens the grid on the week of `today`.
    fn reset_planner(&self, today: NaiveDate) -> Result<(), BookingError> {
        self.with_planner(|planner| *planner = WeekPicker::new(today))
    }

    pub fn planner_view(&self) -> Result<PlannerView, BookingError> {
        self.with_planner(|planner| planner.view())
    }

    pub fn shift_planner(&self, forward: bool) -> Result<PlannerView, BookingError> {
        self.with_planner(|planner| {
            if forward {
                planner.next_week();
            } else {
                planner.previous_week();
            }
            planner.view()
        })
    }

    pub fn toggle_planner(
        &self,
        day_index: usize,
        hour: NaiveTime,
    ) -> Result<PlannerView, BookingError> {
        self.with_planner(|planner| {
            planner.toggle(day_index, hour)?;
            Ok(planner.view())
        })?
    }

    /// Appends the selected cells to the provider's availability and returns the full list.
    pub fn confirm_planner(&self, provider_id: Uuid) -> Result<Vec<TimeSlot>, BookingError> {
        let mut slots = self.availability(provider_id)?;
        // the selection is only cleared once the slots are saved
        let count = self.with_planner(|planner| {
            let pending = planner.selected_slots();
            let count = pending.len();
            availability::append_slots(&mut slots, pending);
            self.store
                .write_json(StoreKey::Availability(provider_id), &slots)?;
            planner.clear();
            Ok::<_, BookingError>(count)
        })??;
        info!(%provider_id, count, "Availability slots confirmed");
        Ok(slots)
    }

    pub fn availability(&self, provider_id: Uuid) -> Result<Vec<TimeSlot>, BookingError> {
        Ok(self.store.read_list(StoreKey::Availability(provider_id))?)
    }

    pub fn availability_by_day(
        &self,
        provider_id: Uuid,
    ) -> Result<Vec<DayAvailability>, BookingError> {
        Ok(availability::group_by_day(&self.availability(provider_id)?))
    }

    pub fn remove_slot(
        &self,
        provider_id: Uuid,
        slot: &TimeSlot,
    ) -> Result<Vec<TimeSlot>, BookingError> {
        let mut slots = self.availability(provider_id)?;
        if !availability::remove_slot(&mut slots, slot) {
            warn!(%provider_id, ?slot, "Slot to remove does not exist");
            return Err(BookingError::NotFound("Availability slot".into()));
        }
        self.store
            .write_json(StoreKey::Availability(provider_id), &slots)?;
        Ok(slots)
    }

    pub fn events(&self, provider_id: Uuid) -> Result<Vec<Event>, BookingError> {
        Ok(self.store.read_list(StoreKey::Events(provider_id))?)
    }

    fn save_events(&self, provider_id: Uuid, events: &[Event]) -> Result<(), BookingError> {
        Ok(self.store.write_json(StoreKey::Events(provider_id), events)?)
    }

    pub fn create_event(&self, provider_id: Uuid, form: EventForm) -> Result<Event, BookingError> {
        let event = form.into_event(provider_id)?;
        let mut events = self.events(provider_id)?;
        events.push(event.clone());
        self.save_events(provider_id, &events)?;
        info!(%provider_id, event_id = %event.id, "Event created");
        Ok(event)
    }

    pub fn delete_event(&self, provider_id: Uuid, event_id: Uuid) -> Result<(), BookingError> {
        let mut events = self.events(provider_id)?;
        let count = events.len();
        events.retain(|event| event.id != event_id);
        if events.len() == count {
            return Err(BookingError::NotFound(format!("Event {event_id}")));
        }
        self.save_events(provider_id, &events)
    }

    pub fn update_event_status(
        &self,
        provider_id: Uuid,
        event_id: Uuid,
        status: EventStatus,
    ) -> Result<Event, BookingError> {
        let mut events = self.events(provider_id)?;
        let event = events
            .iter_mut()
            .find(|event| event.id == event_id)
            .ok_or_else(|| BookingError::NotFound(format!("Event {event_id}")))?;
        event.set_status(status)?;
        let updated = event.clone();

        self.save_events(provider_id, &events)?;
        Ok(updated)
    }

    pub fn available_events(
        &self,
        provider_id: Uuid,
        today: NaiveDate,
    ) -> Result<Vec<Event>, BookingError> {
        let events = self.events(provider_id)?;
        Ok(events::available_events(&events, today)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Books places and writes the decremented seat count back to the store.
    pub fn book_event(
        &self,
        provider_id: Uuid,
        event_id: Uuid,
        form: EventBookingForm,
        today: NaiveDate,
    ) -> Result<EventBooking, BookingError> {
        let mut events = self.events(provider_id)?;
        let event = events
            .iter_mut()
            .find(|event| event.id == event_id)
            .ok_or_else(|| BookingError::NotFound(format!("Event {event_id}")))?;
        let booking = events::book_event(event, form, today)?;

        self.save_events(provider_id, &events)?;
        info!(
            %event_id,
            places = booking.number_of_places,
            "Event booked"
        );
        Ok(booking)
    }

    pub fn services(&self, provider_id: Uuid) -> Result<Vec<Service>, BookingError> {
        Ok(self.store.read_list(StoreKey::Services(provider_id))?)
    }

    fn save_services(&self, provider_id: Uuid, services: &[Service]) -> Result<(), BookingError> {
        Ok(self
            .store
            .write_json(StoreKey::Services(provider_id), services)?)
    }

    pub fn create_service(
        &self,
        provider_id: Uuid,
        form: ServiceForm,
    ) -> Result<Service, BookingError> {
        let mut catalog = self.services(provider_id)?;
        let service = services::create_service(&mut catalog, form)?;
        self.save_services(provider_id, &catalog)?;
        Ok(service)
    }

    pub fn update_service(
        &self,
        provider_id: Uuid,
        service_id: Uuid,
        form: ServiceForm,
    ) -> Result<Service, BookingError> {
        let mut catalog = self.services(provider_id)?;
        let service = services::update_service(&mut catalog, service_id, form)?;
        self.save_services(provider_id, &catalog)?;
        Ok(service)
    }

    pub fn delete_service(&self, provider_id: Uuid, service_id: Uuid) -> Result<(), BookingError> {
        let mut catalog = self.services(provider_id)?;
        services::delete_service(&mut catalog, service_id)?;
        self.save_services(provider_id, &catalog)
    }

    pub fn book_service(
        &self,
        provider_id: Uuid,
        form: ServiceBookingForm,
    ) -> Result<ServiceBooking, BookingError> {
        let catalog = self.services(provider_id)?;
        let booking = services::book_service(&catalog, form)?;
        info!(
            service_id = %booking.service.id,
            amount = booking.payment.amount,
            "Service booked"
        );
        Ok(booking)
    }
}
