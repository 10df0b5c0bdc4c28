use crate::{
    accounts::{LoginForm, RegisterForm},
    app_state::AppState,
    availability::DayAvailability,
    error::BookingError,
    events::{EventBookingForm, EventForm, EventView},
    services::{ServiceBookingForm, ServiceForm, CATEGORIES, DURATIONS},
    store::KeyValueStore,
    types::{
        hour_format, EventBooking, EventStatus, ProviderProfile, Service, ServiceBooking,
        TimeSlot, User,
    },
    week_picker::{grid_hours, PlannerView},
};
use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use chrono::{Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ToggleRequest {
    day_index: usize,
    #[serde(with = "hour_format")]
    hour: NaiveTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StatusRequest {
    status: EventStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ProviderSearch {
    #[serde(default)]
    search: String,
}

#[derive(Debug, Clone, Serialize)]
struct SiteInfo {
    title: String,
    version: &'static str,
}

#[derive(Debug, Clone, Serialize)]
struct Suggestions {
    categories: &'static [&'static str],
    durations: &'static [&'static str],
    hours: Vec<String>,
}

type ApiResult<T> = Result<T, BookingError>;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn create_app<S: KeyValueStore>(state: AppState<S>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public = Router::new()
        .route("/", get(site_info::<S>))
        .route("/login", post(login::<S>))
        .route("/register", post(register::<S>))
        .route("/logout", post(logout::<S>))
        .route("/me", get(me::<S>))
        .route("/catalog/suggestions", get(catalog_suggestions));

    let consumer = Router::new()
        .route("/providers", get(list_providers::<S>))
        .route("/providers/:provider_id/events", get(provider_events::<S>))
        .route(
            "/providers/:provider_id/events/:event_id/book",
            post(book_event::<S>),
        )
        .route("/providers/:provider_id/services", get(provider_services::<S>))
        .route(
            "/providers/:provider_id/services/book",
            post(book_service::<S>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            consumer_guard::<S>,
        ));

    let provider = Router::new()
        .route("/planner", get(planner::<S>))
        .route("/planner/previous", post(planner_previous::<S>))
        .route("/planner/next", post(planner_next::<S>))
        .route("/planner/toggle", post(planner_toggle::<S>))
        .route("/planner/confirm", post(planner_confirm::<S>))
        .route(
            "/availability",
            get(availability::<S>).delete(remove_availability::<S>),
        )
        .route("/availability/days", get(availability_days::<S>))
        .route("/events", get(list_events::<S>).post(create_event::<S>))
        .route("/events/:event_id", delete(delete_event::<S>))
        .route("/events/:event_id/status", put(update_event_status::<S>))
        .route("/services", get(list_services::<S>).post(create_service::<S>))
        .route(
            "/services/:service_id",
            put(update_service::<S>).delete(delete_service::<S>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            provider_guard::<S>,
        ));

    Router::new()
        .merge(public)
        .merge(consumer)
        .merge(provider)
        .with_state(state)
        .layer(cors)
}

/// Provider dashboard routes need a logged-in `client` account.
async fn provider_guard<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let user = state.require_provider()?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

async fn consumer_guard<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let user = state.require_consumer()?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

async fn site_info<S: KeyValueStore>(State(state): State<AppState<S>>) -> Json<SiteInfo> {
    Json(SiteInfo {
        title: state.website_title.clone(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn login<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Json(form): Json<LoginForm>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.login(form, today())?))
}

async fn register<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Json(form): Json<RegisterForm>,
) -> ApiResult<(StatusCode, Json<User>)> {
    Ok((StatusCode::CREATED, Json(state.register(form, today())?)))
}

async fn logout<S: KeyValueStore>(
    State(state): State<AppState<S>>,
) -> ApiResult<(StatusCode, String)> {
    state.logout(today())?;
    Ok((StatusCode::OK, "Logged out successfully".to_string()))
}

async fn me<S: KeyValueStore>(State(state): State<AppState<S>>) -> ApiResult<Json<User>> {
    Ok(Json(state.current_user()?))
}

async fn catalog_suggestions() -> Json<Suggestions> {
    Json(Suggestions {
        categories: &CATEGORIES,
        durations: &DURATIONS,
        hours: grid_hours()
            .iter()
            .map(|hour| hour.format(hour_format::FORMAT).to_string())
            .collect(),
    })
}

async fn list_providers<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<ProviderSearch>,
) -> ApiResult<Json<Vec<ProviderProfile>>> {
    Ok(Json(state.providers(&query.search)?))
}

async fn provider_events<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Path(provider_id): Path<Uuid>,
) -> ApiResult<Json<Vec<EventView>>> {
    let events = state.available_events(provider_id, today())?;
    Ok(Json(events.into_iter().map(EventView::from).collect()))
}

async fn book_event<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Path((provider_id, event_id)): Path<(Uuid, Uuid)>,
    Json(form): Json<EventBookingForm>,
) -> ApiResult<Json<EventBooking>> {
    Ok(Json(state.book_event(provider_id, event_id, form, today())?))
}

async fn provider_services<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Path(provider_id): Path<Uuid>,
) -> ApiResult<Json<Vec<Service>>> {
    Ok(Json(state.services(provider_id)?))
}

async fn book_service<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Path(provider_id): Path<Uuid>,
    Json(form): Json<ServiceBookingForm>,
) -> ApiResult<Json<ServiceBooking>> {
    Ok(Json(state.book_service(provider_id, form)?))
}

async fn planner<S: KeyValueStore>(
    State(state): State<AppState<S>>,
) -> ApiResult<Json<PlannerView>> {
    Ok(Json(state.planner_view()?))
}

async fn planner_previous<S: KeyValueStore>(
    State(state): State<AppState<S>>,
) -> ApiResult<Json<PlannerView>> {
    Ok(Json(state.shift_planner(false)?))
}

async fn planner_next<S: KeyValueStore>(
    State(state): State<AppState<S>>,
) -> ApiResult<Json<PlannerView>> {
    Ok(Json(state.shift_planner(true)?))
}

async fn planner_toggle<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Json(toggle): Json<ToggleRequest>,
) -> ApiResult<Json<PlannerView>> {
    Ok(Json(state.toggle_planner(toggle.day_index, toggle.hour)?))
}

async fn planner_confirm<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Extension(provider): Extension<User>,
) -> ApiResult<Json<Vec<TimeSlot>>> {
    Ok(Json(state.confirm_planner(provider.id)?))
}

async fn availability<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Extension(provider): Extension<User>,
) -> ApiResult<Json<Vec<TimeSlot>>> {
    Ok(Json(state.availability(provider.id)?))
}

async fn availability_days<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Extension(provider): Extension<User>,
) -> ApiResult<Json<Vec<DayAvailability>>> {
    Ok(Json(state.availability_by_day(provider.id)?))
}

async fn remove_availability<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Extension(provider): Extension<User>,
    Json(slot): Json<TimeSlot>,
) -> ApiResult<Json<Vec<TimeSlot>>> {
    Ok(Json(state.remove_slot(provider.id, &slot)?))
}

async fn list_events<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Extension(provider): Extension<User>,
) -> ApiResult<Json<Vec<EventView>>> {
    let events = state.events(provider.id)?;
    Ok(Json(events.into_iter().map(EventView::from).collect()))
}

async fn create_event<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Extension(provider): Extension<User>,
    Json(form): Json<EventForm>,
) -> ApiResult<(StatusCode, Json<EventView>)> {
    let event = state.create_event(provider.id, form)?;
    Ok((StatusCode::CREATED, Json(event.into())))
}

async fn delete_event<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Extension(provider): Extension<User>,
    Path(event_id): Path<Uuid>,
) -> ApiResult<(StatusCode, String)> {
    state.delete_event(provider.id, event_id)?;
    Ok((StatusCode::OK, "Event removed successfully".to_string()))
}

async fn update_event_status<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Extension(provider): Extension<User>,
    Path(event_id): Path<Uuid>,
    Json(request): Json<StatusRequest>,
) -> ApiResult<Json<EventView>> {
    let event = state.update_event_status(provider.id, event_id, request.status)?;
    Ok(Json(event.into()))
}

async fn list_services<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Extension(provider): Extension<User>,
) -> ApiResult<Json<Vec<Service>>> {
    Ok(Json(state.services(provider.id)?))
}

async fn create_service<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Extension(provider): Extension<User>,
    Json(form): Json<ServiceForm>,
) -> ApiResult<(StatusCode, Json<Service>)> {
    Ok((
        StatusCode::CREATED,
        Json(state.create_service(provider.id, form)?),
    ))
}

async fn update_service<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Extension(provider): Extension<User>,
    Path(service_id): Path<Uuid>,
    Json(form): Json<ServiceForm>,
) -> ApiResult<Json<Service>> {
    Ok(Json(state.update_service(provider.id, service_id, form)?))
}

async fn delete_service<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Extension(provider): Extension<User>,
    Path(service_id): Path<Uuid>,
) -> ApiResult<(StatusCode, String)> {
    state.delete_service(provider.id, service_id)?;
    Ok((StatusCode::OK, "Service removed successfully".to_string()))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{local_store::MemoryStore, testutils::MockStore};
    use chrono::Duration;
    use reqwest::Client;
    use serde_json::{json, Value};
    use std::sync::atomic::Ordering;
    use tokio::task::JoinHandle;

    async fn init<S: KeyValueStore>(store: S) -> (String, JoinHandle<()>) {
        let state = AppState::new(store, "AppointmentPro".into(), today());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = format!("http://{}", listener.local_addr().unwrap());
        let server = tokio::spawn(async move {
            axum::serve(listener, create_app(state)).await.unwrap();
        });
        (address, server)
    }

    async fn register_provider(client: &Client, address: &str) -> Value {
        let response = client
            .post(format!("{address}/register"))
            .json(&json!({
                "email": "sarah.martin@cabinet-medical.fr",
                "password": "secret",
                "confirm_password": "secret",
                "first_name": "Sarah",
                "last_name": "Martin",
                "profession": "Médecin généraliste",
                "user_type": "client",
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), StatusCode::CREATED.as_u16());
        response.json().await.unwrap()
    }

    async fn login_consumer(client: &Client, address: &str) {
        let response = client
            .post(format!("{address}/login"))
            .json(&json!({
                "email": "marie.dubois@example.com",
                "password": "secret",
                "user_type": "user",
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), StatusCode::OK.as_u16());
    }

    #[test_case::test_case("get", "planner")]
    #[test_case::test_case("post", "planner/confirm")]
    #[test_case::test_case("get", "availability")]
    #[test_case::test_case("get", "events")]
    #[test_case::test_case("get", "services")]
    #[test_case::test_case("get", "providers")]
    #[tokio::test]
    async fn test_dashboards_require_login(method: &str, path: &str) {
        let (address, server) = init(MemoryStore::default()).await;

        let client = Client::new();
        let request_builder = match method {
            "get" => client.get(format!("{address}/{path}")),
            "post" => client.post(format!("{address}/{path}")),
            _ => panic!("Unsupported HTTP method: {}", method),
        };
        let response = request_builder.send().await.unwrap();
        assert_eq!(
            response.status().as_u16(),
            StatusCode::UNAUTHORIZED.as_u16()
        );

        server.abort();
    }

    #[tokio::test]
    async fn test_wrong_account_type_is_rejected() {
        let (address, server) = init(MemoryStore::default()).await;
        let client = Client::new();

        register_provider(&client, &address).await;
        let response = client
            .get(format!("{address}/providers"))
            .send()
            .await
            .unwrap();
        assert_eq!(
            response.status().as_u16(),
            StatusCode::UNAUTHORIZED.as_u16()
        );

        login_consumer(&client, &address).await;
        let response = client
            .get(format!("{address}/events"))
            .send()
            .await
            .unwrap();
        assert_eq!(
            response.status().as_u16(),
            StatusCode::UNAUTHORIZED.as_u16()
        );

        server.abort();
    }

    #[tokio::test]
    async fn test_planner_to_availability() {
        let (address, server) = init(MemoryStore::default()).await;
        let client = Client::new();
        register_provider(&client, &address).await;

        for hour in ["10:00", "09:00"] {
            let response = client
                .post(format!("{address}/planner/toggle"))
                .json(&ToggleRequest {
                    day_index: 0,
                    hour: NaiveTime::parse_from_str(hour, "%H:%M").unwrap(),
                })
                .send()
                .await
                .unwrap();
            assert_eq!(response.status().as_u16(), StatusCode::OK.as_u16());
        }

        let response = client
            .post(format!("{address}/planner/toggle"))
            .json(&json!({ "day_index": 0, "hour": "13:00" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), StatusCode::BAD_REQUEST.as_u16());

        let slots: Vec<TimeSlot> = client
            .post(format!("{address}/planner/confirm"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].day, "Lundi");

        let days: Value = client
            .get(format!("{address}/availability/days"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(days.as_array().unwrap().len(), 1);
        assert!(days[0]["label"].as_str().unwrap().starts_with("Lundi — "));
        assert_eq!(days[0]["slots"][0]["hour"], "09:00");
        assert_eq!(days[0]["slots"][1]["hour"], "10:00");

        let response = client
            .delete(format!("{address}/availability"))
            .json(&slots[0])
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), StatusCode::OK.as_u16());
        let remaining: Vec<TimeSlot> = response.json().await.unwrap();
        assert_eq!(remaining.len(), 1);

        let response = client
            .delete(format!("{address}/availability"))
            .json(&slots[0])
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), StatusCode::NOT_FOUND.as_u16());

        server.abort();
    }

    #[tokio::test]
    async fn test_event_booking_flow() {
        let (address, server) = init(MemoryStore::default()).await;
        let client = Client::new();
        let provider = register_provider(&client, &address).await;
        let provider_id = provider["id"].as_str().unwrap().to_string();

        let event_date = today() + Duration::days(7);
        let response = client
            .post(format!("{address}/events"))
            .json(&json!({
                "title": "Formation React Avancée",
                "date": event_date,
                "start": "09:00",
                "end": "17:00",
                "places": 12,
                "price": 150.0,
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), StatusCode::CREATED.as_u16());
        let event: Value = response.json().await.unwrap();
        assert_eq!(event["status_label"], "Planifié");
        let event_id = event["id"].as_str().unwrap().to_string();

        login_consumer(&client, &address).await;
        let events: Value = client
            .get(format!("{address}/providers/{provider_id}/events"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(events.as_array().unwrap().len(), 1);
        assert_eq!(events[0]["places_restantes"], 12);

        let booking_url = format!("{address}/providers/{provider_id}/events/{event_id}/book");
        let booking = |places: u32| {
            json!({
                "participant_name": "Marie Dubois",
                "participant_email": "marie.dubois@example.com",
                "number_of_places": places,
            })
        };

        let response = client
            .post(&booking_url)
            .json(&booking(15))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), StatusCode::CONFLICT.as_u16());

        let response = client
            .post(&booking_url)
            .json(&booking(5))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), StatusCode::OK.as_u16());
        let confirmed: Value = response.json().await.unwrap();
        assert_eq!(confirmed["total_price"], 750.0);
        assert_eq!(confirmed["event_time"], "09:00 - 17:00");

        let events: Value = client
            .get(format!("{address}/providers/{provider_id}/events"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(events[0]["places_restantes"], 7);

        server.abort();
    }

    #[tokio::test]
    async fn test_event_status_update() {
        let (address, server) = init(MemoryStore::default()).await;
        let client = Client::new();
        register_provider(&client, &address).await;

        let event: Value = client
            .post(format!("{address}/events"))
            .json(&json!({
                "title": "Atelier UX/UI Design",
                "date": today(),
                "start": "14:00",
                "end": "18:00",
            }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let event_url = format!("{address}/events/{}", event["id"].as_str().unwrap());

        let response = client
            .put(format!("{event_url}/status"))
            .json(&StatusRequest {
                status: EventStatus::InProgress,
            })
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), StatusCode::OK.as_u16());
        let updated: Value = response.json().await.unwrap();
        assert_eq!(updated["status"], "en_cours");
        assert_eq!(updated["status_color"], "green");

        let response = client
            .put(format!("{event_url}/status"))
            .json(&json!({ "status": "planifie" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), StatusCode::CONFLICT.as_u16());

        let response = client.delete(&event_url).send().await.unwrap();
        assert_eq!(response.status().as_u16(), StatusCode::OK.as_u16());
        let response = client.delete(&event_url).send().await.unwrap();
        assert_eq!(response.status().as_u16(), StatusCode::NOT_FOUND.as_u16());

        server.abort();
    }

    #[tokio::test]
    async fn test_service_booking_flow() {
        let (address, server) = init(MemoryStore::default()).await;
        let client = Client::new();
        let provider = register_provider(&client, &address).await;
        let provider_id = provider["id"].as_str().unwrap().to_string();

        let response = client
            .post(format!("{address}/services"))
            .json(&json!({
                "name": "Consultation générale",
                "duration": "30 min",
                "price": 60.0,
                "category": "Consultation",
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), StatusCode::CREATED.as_u16());
        let service: Service = response.json().await.unwrap();

        let response = client
            .post(format!("{address}/services"))
            .json(&json!({
                "name": "Sans catégorie",
                "duration": "30 min",
                "price": 60.0,
                "category": "",
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), StatusCode::BAD_REQUEST.as_u16());

        login_consumer(&client, &address).await;
        let book_url = format!("{address}/providers/{provider_id}/services/book");

        let response = client
            .post(&book_url)
            .json(&json!({ "service_id": service.id, "date": today() }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), StatusCode::BAD_REQUEST.as_u16());

        let response = client
            .post(&book_url)
            .json(&json!({
                "service_id": service.id,
                "date": today(),
                "time": "14:00",
                "payment": {
                    "method": "online",
                    "card_number": "4242424242424242",
                    "expiry_date": "1227",
                    "cvv": "123",
                    "card_holder": "Marie Dubois",
                },
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), StatusCode::OK.as_u16());
        let booking: Value = response.json().await.unwrap();
        assert_eq!(booking["payment"]["method"], "online");
        assert_eq!(booking["payment"]["amount"], 60.0);
        assert!(booking["payment"].get("card_number").is_none());

        server.abort();
    }

    #[tokio::test]
    async fn test_provider_search() {
        let (address, server) = init(MemoryStore::default()).await;
        let client = Client::new();
        register_provider(&client, &address).await;
        login_consumer(&client, &address).await;

        let found: Vec<ProviderProfile> = client
            .get(format!("{address}/providers?search=MÉDECIN"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(found.len(), 1);

        let found: Vec<ProviderProfile> = client
            .get(format!("{address}/providers?search=plombier"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(found.is_empty());

        server.abort();
    }

    #[tokio::test]
    async fn test_public_routes() {
        let (address, server) = init(MemoryStore::default()).await;
        let client = Client::new();

        let info: Value = client.get(&address).send().await.unwrap().json().await.unwrap();
        assert_eq!(info["title"], "AppointmentPro");

        let suggestions: Value = client
            .get(format!("{address}/catalog/suggestions"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(suggestions["categories"][0], "Consultation");
        assert_eq!(suggestions["hours"].as_array().unwrap().len(), 9);

        let response = client.get(format!("{address}/me")).send().await.unwrap();
        assert_eq!(
            response.status().as_u16(),
            StatusCode::UNAUTHORIZED.as_u16()
        );

        let response = client
            .post(format!("{address}/register"))
            .json(&json!({
                "email": "marie@example.com",
                "password": "secret",
                "confirm_password": "other",
                "first_name": "Marie",
                "last_name": "Dubois",
                "user_type": "user",
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), StatusCode::BAD_REQUEST.as_u16());

        login_consumer(&client, &address).await;
        let me: User = client
            .get(format!("{address}/me"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(me.name, "marie.dubois");

        let response = client
            .post(format!("{address}/logout"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), StatusCode::OK.as_u16());
        let response = client.get(format!("{address}/me")).send().await.unwrap();
        assert_eq!(
            response.status().as_u16(),
            StatusCode::UNAUTHORIZED.as_u16()
        );

        server.abort();
    }

    #[tokio::test]
    async fn test_store_failure() {
        let mock_store = MockStore::new();
        mock_store.0.success.store(false, Ordering::SeqCst);
        let (address, server) = init(mock_store.clone()).await;

        let response = Client::new()
            .post(format!("{address}/login"))
            .json(&json!({
                "email": "marie@example.com",
                "password": "secret",
                "user_type": "user",
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(
            response.status().as_u16(),
            StatusCode::INTERNAL_SERVER_ERROR.as_u16()
        );
        assert_eq!(mock_store.0.calls_to_set.load(Ordering::SeqCst), 1);
        assert_eq!(mock_store.0.calls_to_remove.load(Ordering::SeqCst), 0);

        server.abort();
    }
}
