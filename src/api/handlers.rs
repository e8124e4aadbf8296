use crate::{
    api::models::*,
    auth::jwt::Claims,
    core::{
        errors::YearoutError,
        models::{
            activity::ActivityResult,
            audit::{AppLog, EventAudit},
            award::{Award, AwardDefinition, AwardVote},
            event::{Attendee, Event, Proposal, ProposalSummary, ProposalVote},
            expense::Expense,
            lore::LoreEntry,
            ritual::Ritual,
            settlement::SettlementSummary,
            user::User,
        },
        services::YearoutService,
    },
    infrastructure::{logging::in_memory::InMemoryLogging, storage::in_memory::InMemoryStorage},
};
use axum::{
    Extension, Json, Router,
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::IntoResponse,
    routing::{delete, get, post},
};
use http::header;

use std::sync::Arc;

pub type AppService = YearoutService<InMemoryLogging, InMemoryStorage>;

// Middleware to validate JWT
async fn auth_middleware(
    State(service): State<Arc<AppService>>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| YearoutError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| YearoutError::Unauthorized("Invalid Authorization header".to_string()))?;

    let claims = service.validate_token(token)?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

// Define API routes
pub fn api_routes(service: Arc<AppService>) -> Router {
    let protected_routes = Router::new()
        .route("/users", post(create_user))
        .route("/users/{user_id}", get(get_user))
        .route("/rituals", get(list_rituals).post(create_ritual))
        .route("/rituals/join", post(join_ritual))
        .route("/rituals/by_slug/{slug}", get(get_ritual))
        .route("/rituals/by_slug/{slug}/{year}", get(get_event_by_year))
        .route(
            "/rituals/{ritual_id}/awards",
            get(list_award_definitions).post(add_award_definition),
        )
        .route("/rituals/{ritual_id}/events", get(list_ritual_events).post(create_event))
        .route("/rituals/{ritual_id}/events/quick", post(quick_enter_event))
        .route("/events/{event_id}", get(get_event))
        .route("/events/{event_id}/proposals", get(list_proposals).post(add_proposal))
        .route("/proposals/{proposal_id}", delete(delete_proposal))
        .route("/proposals/{proposal_id}/votes", post(cast_proposal_vote))
        .route("/proposals/{proposal_id}/lock", post(lock_proposal))
        .route("/events/{event_id}/attendees", get(list_attendees))
        .route("/events/{event_id}/booking", post(update_booking_status))
        .route("/events/{event_id}/status", post(advance_event_status))
        .route("/events/{event_id}/seal", post(seal_event))
        .route("/events/{event_id}/expenses", get(list_expenses).post(add_expense))
        .route("/expenses/{expense_id}", delete(delete_expense))
        .route("/events/{event_id}/settlement", get(get_event_settlement))
        .route("/events/{event_id}/lore", get(list_lore_entries).post(add_lore_entry))
        .route("/lore/{entry_id}/hall_of_fame", post(toggle_lore_hall_of_fame))
        .route(
            "/events/{event_id}/activity_results",
            get(list_activity_results).post(add_activity_result),
        )
        .route("/events/{event_id}/award_votes", post(cast_award_vote))
        .route("/award_votes/{vote_id}", delete(retract_award_vote))
        .route("/events/{event_id}/awards", get(get_event_awards).post(set_award_winner))
        .route("/events/{event_id}/awards/finalize", post(finalize_award_votes))
        .route("/logs", get(get_app_logs))
        .route("/events/{event_id}/audits", get(get_event_audits))
        .route_layer(middleware::from_fn_with_state(service.clone(), auth_middleware));

    Router::new()
        .route("/health", get(health)) // Unprotected
        .merge(protected_routes)
        .with_state(service)
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "Service is up"))
)]
pub async fn health() -> &'static str {
    "OK"
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Profile created for the token subject", body = User),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn create_user(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = User {
        id: claims.sub,
        name: req.name,
        email: req.email,
    };
    let user = service.add_user(user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    params(
        ("user_id" = String, Path, description = "ID of the user to retrieve")
    ),
    responses(
        (status = 200, description = "User retrieved successfully", body = User),
        (status = 403, description = "User shares no ritual with the caller", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn get_user(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let caller = service.current_user(&claims).await?;
    let user = service.get_user_profile(&user_id, &caller).await?;
    Ok(Json(user))
}

#[utoipa::path(
    get,
    path = "/api/rituals",
    responses(
        (status = 200, description = "Rituals the caller belongs to", body = Vec<Ritual>),
        (status = 404, description = "Caller has no profile", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn list_rituals(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<Ritual>>, ApiError> {
    let caller = service.current_user(&claims).await?;
    let rituals = service.list_rituals(&caller).await?;
    Ok(Json(rituals))
}

#[utoipa::path(
    post,
    path = "/api/rituals",
    request_body = CreateRitualRequest,
    responses(
        (status = 201, description = "Ritual created, caller is its sponsor", body = Ritual),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 404, description = "Caller has no profile", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn create_ritual(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateRitualRequest>,
) -> Result<(StatusCode, Json<Ritual>), ApiError> {
    let caller = service.current_user(&claims).await?;
    let ritual = service
        .create_ritual(req.name, req.slug, req.tagline, req.award_names, &caller)
        .await?;
    Ok((StatusCode::CREATED, Json(ritual)))
}

#[utoipa::path(
    post,
    path = "/api/rituals/join",
    request_body = JoinRitualRequest,
    responses(
        (status = 200, description = "Joined (or already a member of) the ritual", body = Ritual),
        (status = 404, description = "Invite not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn join_ritual(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<JoinRitualRequest>,
) -> Result<Json<Ritual>, ApiError> {
    let caller = service.current_user(&claims).await?;
    let ritual = service.join_ritual(&req.invite_token, &caller).await?;
    Ok(Json(ritual))
}

#[utoipa::path(
    get,
    path = "/api/rituals/by_slug/{slug}",
    params(
        ("slug" = String, Path, description = "URL slug of the ritual")
    ),
    responses(
        (status = 200, description = "Ritual retrieved successfully", body = Ritual),
        (status = 403, description = "Caller is not a member", body = ErrorResponse),
        (status = 404, description = "Ritual not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn get_ritual(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Path(slug): Path<String>,
) -> Result<Json<Ritual>, ApiError> {
    let caller = service.current_user(&claims).await?;
    let ritual = service.get_ritual_by_slug(&slug, &caller).await?;
    Ok(Json(ritual))
}

#[utoipa::path(
    get,
    path = "/api/rituals/{ritual_id}/awards",
    params(
        ("ritual_id" = String, Path, description = "ID of the ritual")
    ),
    responses(
        (status = 200, description = "Award definitions of the ritual", body = Vec<AwardDefinition>),
        (status = 403, description = "Caller is not a member", body = ErrorResponse),
        (status = 404, description = "Ritual not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn list_award_definitions(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Path(ritual_id): Path<String>,
) -> Result<Json<Vec<AwardDefinition>>, ApiError> {
    let caller = service.current_user(&claims).await?;
    let definitions = service.get_award_definitions(&ritual_id, &caller).await?;
    Ok(Json(definitions))
}

#[utoipa::path(
    post,
    path = "/api/rituals/{ritual_id}/awards",
    params(
        ("ritual_id" = String, Path, description = "ID of the ritual")
    ),
    request_body = AddAwardDefinitionRequest,
    responses(
        (status = 201, description = "Award defined", body = AwardDefinition),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 403, description = "Caller is not a sponsor", body = ErrorResponse),
        (status = 404, description = "Ritual not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn add_award_definition(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Path(ritual_id): Path<String>,
    Json(req): Json<AddAwardDefinitionRequest>,
) -> Result<(StatusCode, Json<AwardDefinition>), ApiError> {
    let caller = service.current_user(&claims).await?;
    let definition = service
        .add_award_definition(&ritual_id, req.name, req.label, req.kind, &caller)
        .await?;
    Ok((StatusCode::CREATED, Json(definition)))
}

#[utoipa::path(
    post,
    path = "/api/rituals/{ritual_id}/events",
    params(
        ("ritual_id" = String, Path, description = "ID of the ritual")
    ),
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created in planning", body = Event),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 403, description = "Caller is not a sponsor", body = ErrorResponse),
        (status = 404, description = "Ritual not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn create_event(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Path(ritual_id): Path<String>,
    Json(req): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    let caller = service.current_user(&claims).await?;
    let event = service
        .create_event(&ritual_id, req.name, req.year, req.location, req.proposed_dates, &caller)
        .await?;
    Ok((StatusCode::CREATED, Json(event)))
}

#[utoipa::path(
    get,
    path = "/api/rituals/by_slug/{slug}/{year}",
    params(
        ("slug" = String, Path, description = "URL slug of the ritual"),
        ("year" = i32, Path, description = "Year of the trip")
    ),
    responses(
        (status = 200, description = "Event retrieved successfully", body = Event),
        (status = 403, description = "Caller is not a member", body = ErrorResponse),
        (status = 404, description = "Ritual or event not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn get_event_by_year(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Path((slug, year)): Path<(String, i32)>,
) -> Result<Json<Event>, ApiError> {
    let caller = service.current_user(&claims).await?;
    let event = service.get_event_by_year(&slug, year, &caller).await?;
    Ok(Json(event))
}

#[utoipa::path(
    get,
    path = "/api/rituals/{ritual_id}/events",
    params(
        ("ritual_id" = String, Path, description = "ID of the ritual")
    ),
    responses(
        (status = 200, description = "Events of the ritual, newest year first", body = Vec<Event>),
        (status = 403, description = "Caller is not a member", body = ErrorResponse),
        (status = 404, description = "Ritual not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn list_ritual_events(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Path(ritual_id): Path<String>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let caller = service.current_user(&claims).await?;
    let events = service.get_ritual_events(&ritual_id, &caller).await?;
    Ok(Json(events))
}

#[utoipa::path(
    post,
    path = "/api/rituals/{ritual_id}/events/quick",
    params(
        ("ritual_id" = String, Path, description = "ID of the ritual")
    ),
    request_body = QuickEnterEventRequest,
    responses(
        (status = 201, description = "Event entered with its attendees and winners", body = Event),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 403, description = "Caller is not a sponsor", body = ErrorResponse),
        (status = 404, description = "Ritual or winner not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn quick_enter_event(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Path(ritual_id): Path<String>,
    Json(req): Json<QuickEnterEventRequest>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    let caller = service.current_user(&claims).await?;
    let event = service.quick_enter_event(&ritual_id, req.into(), &caller).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}",
    params(
        ("event_id" = String, Path, description = "ID of the event")
    ),
    responses(
        (status = 200, description = "Event retrieved successfully", body = Event),
        (status = 403, description = "Caller is not a member", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn get_event(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Path(event_id): Path<String>,
) -> Result<Json<Event>, ApiError> {
    let caller = service.current_user(&claims).await?;
    let event = service.get_event(&event_id, &caller).await?;
    Ok(Json(event))
}

#[utoipa::path(
    post,
    path = "/api/events/{event_id}/proposals",
    params(
        ("event_id" = String, Path, description = "ID of the event")
    ),
    request_body = AddProposalRequest,
    responses(
        (status = 201, description = "Proposal added", body = Proposal),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 403, description = "Caller is not a member", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn add_proposal(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Path(event_id): Path<String>,
    Json(req): Json<AddProposalRequest>,
) -> Result<(StatusCode, Json<Proposal>), ApiError> {
    let caller = service.current_user(&claims).await?;
    let proposal = service
        .add_proposal(&event_id, req.dates, req.location, req.notes, &caller)
        .await?;
    Ok((StatusCode::CREATED, Json(proposal)))
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/proposals",
    params(
        ("event_id" = String, Path, description = "ID of the event")
    ),
    responses(
        (status = 200, description = "Proposals with vote counts", body = Vec<ProposalSummary>),
        (status = 403, description = "Caller is not a member", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn list_proposals(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Path(event_id): Path<String>,
) -> Result<Json<Vec<ProposalSummary>>, ApiError> {
    let caller = service.current_user(&claims).await?;
    let proposals = service.list_proposals(&event_id, &caller).await?;
    Ok(Json(proposals))
}

#[utoipa::path(
    post,
    path = "/api/proposals/{proposal_id}/votes",
    params(
        ("proposal_id" = String, Path, description = "ID of the proposal")
    ),
    request_body = ProposalVoteRequest,
    responses(
        (status = 200, description = "Vote recorded", body = ProposalVote),
        (status = 403, description = "Caller is not a member", body = ErrorResponse),
        (status = 404, description = "Proposal not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn cast_proposal_vote(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Path(proposal_id): Path<String>,
    Json(req): Json<ProposalVoteRequest>,
) -> Result<Json<ProposalVote>, ApiError> {
    let caller = service.current_user(&claims).await?;
    let vote = service.cast_proposal_vote(&proposal_id, req.choice, &caller).await?;
    Ok(Json(vote))
}

#[utoipa::path(
    post,
    path = "/api/proposals/{proposal_id}/lock",
    params(
        ("proposal_id" = String, Path, description = "ID of the proposal")
    ),
    responses(
        (status = 200, description = "Event scheduled from the proposal", body = Event),
        (status = 403, description = "Caller is not a sponsor", body = ErrorResponse),
        (status = 404, description = "Proposal not found", body = ErrorResponse),
        (status = 409, description = "Event is not in planning", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn lock_proposal(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Path(proposal_id): Path<String>,
) -> Result<Json<Event>, ApiError> {
    let caller = service.current_user(&claims).await?;
    let event = service.lock_proposal(&proposal_id, &caller).await?;
    Ok(Json(event))
}

#[utoipa::path(
    delete,
    path = "/api/proposals/{proposal_id}",
    params(
        ("proposal_id" = String, Path, description = "ID of the proposal")
    ),
    responses(
        (status = 204, description = "Proposal deleted"),
        (status = 403, description = "Caller is not the proposer", body = ErrorResponse),
        (status = 404, description = "Proposal not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn delete_proposal(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Path(proposal_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let caller = service.current_user(&claims).await?;
    service.delete_proposal(&proposal_id, &caller).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/attendees",
    params(
        ("event_id" = String, Path, description = "ID of the event")
    ),
    responses(
        (status = 200, description = "Attendees with booking status", body = Vec<Attendee>),
        (status = 403, description = "Caller is not a member", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn list_attendees(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Path(event_id): Path<String>,
) -> Result<Json<Vec<Attendee>>, ApiError> {
    let caller = service.current_user(&claims).await?;
    let attendees = service.list_attendees(&event_id, &caller).await?;
    Ok(Json(attendees))
}

#[utoipa::path(
    post,
    path = "/api/events/{event_id}/booking",
    params(
        ("event_id" = String, Path, description = "ID of the event")
    ),
    request_body = UpdateBookingRequest,
    responses(
        (status = 200, description = "Booking status updated", body = Attendee),
        (status = 403, description = "Caller is not a member", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn update_booking_status(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Path(event_id): Path<String>,
    Json(req): Json<UpdateBookingRequest>,
) -> Result<Json<Attendee>, ApiError> {
    let caller = service.current_user(&claims).await?;
    let attendee = service.update_booking_status(&event_id, req.status, &caller).await?;
    Ok(Json(attendee))
}

#[utoipa::path(
    post,
    path = "/api/events/{event_id}/status",
    params(
        ("event_id" = String, Path, description = "ID of the event")
    ),
    request_body = AdvanceStatusRequest,
    responses(
        (status = 200, description = "Event status advanced", body = Event),
        (status = 403, description = "Caller cannot edit the event", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 409, description = "Transition not allowed or event sealed", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn advance_event_status(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Path(event_id): Path<String>,
    Json(req): Json<AdvanceStatusRequest>,
) -> Result<Json<Event>, ApiError> {
    let caller = service.current_user(&claims).await?;
    let event = service.advance_event_status(&event_id, req.status, &caller).await?;
    Ok(Json(event))
}

#[utoipa::path(
    post,
    path = "/api/events/{event_id}/seal",
    params(
        ("event_id" = String, Path, description = "ID of the event")
    ),
    responses(
        (status = 200, description = "Event sealed", body = Event),
        (status = 403, description = "Caller is not a sponsor", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 409, description = "Event not started or already sealed", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn seal_event(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Path(event_id): Path<String>,
) -> Result<Json<Event>, ApiError> {
    let caller = service.current_user(&claims).await?;
    let event = service.seal_event(&event_id, &caller).await?;
    Ok(Json(event))
}

#[utoipa::path(
    post,
    path = "/api/events/{event_id}/expenses",
    params(
        ("event_id" = String, Path, description = "ID of the event")
    ),
    request_body = AddExpenseRequest,
    responses(
        (status = 201, description = "Expense recorded, paid by the caller", body = Expense),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 403, description = "Caller is not a member", body = ErrorResponse),
        (status = 409, description = "Event sealed", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn add_expense(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Path(event_id): Path<String>,
    Json(req): Json<AddExpenseRequest>,
) -> Result<(StatusCode, Json<Expense>), ApiError> {
    let caller = service.current_user(&claims).await?;
    let expense = service
        .add_expense(&event_id, req.description, req.amount_cents, &caller)
        .await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/expenses",
    params(
        ("event_id" = String, Path, description = "ID of the event")
    ),
    responses(
        (status = 200, description = "Expenses of the event", body = Vec<Expense>),
        (status = 403, description = "Caller is not a member", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn list_expenses(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Path(event_id): Path<String>,
) -> Result<Json<Vec<Expense>>, ApiError> {
    let caller = service.current_user(&claims).await?;
    let expenses = service.list_expenses(&event_id, &caller).await?;
    Ok(Json(expenses))
}

#[utoipa::path(
    delete,
    path = "/api/expenses/{expense_id}",
    params(
        ("expense_id" = String, Path, description = "ID of the expense")
    ),
    responses(
        (status = 204, description = "Expense deleted"),
        (status = 403, description = "Caller is neither payer nor organizer", body = ErrorResponse),
        (status = 404, description = "Expense not found", body = ErrorResponse),
        (status = 409, description = "Event sealed", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn delete_expense(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Path(expense_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let caller = service.current_user(&claims).await?;
    service.delete_expense(&expense_id, &caller).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/settlement",
    params(
        ("event_id" = String, Path, description = "ID of the event")
    ),
    responses(
        (status = 200, description = "Balances and the transfers that settle them", body = SettlementSummary),
        (status = 403, description = "Caller is not a member", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn get_event_settlement(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Path(event_id): Path<String>,
) -> Result<Json<SettlementSummary>, ApiError> {
    let caller = service.current_user(&claims).await?;
    let summary = service.get_event_settlement(&event_id, &caller).await?;
    Ok(Json(summary))
}

#[utoipa::path(
    post,
    path = "/api/events/{event_id}/lore",
    params(
        ("event_id" = String, Path, description = "ID of the event")
    ),
    request_body = AddLoreRequest,
    responses(
        (status = 201, description = "Lore entry added", body = LoreEntry),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 403, description = "Caller is not a member", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn add_lore_entry(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Path(event_id): Path<String>,
    Json(req): Json<AddLoreRequest>,
) -> Result<(StatusCode, Json<LoreEntry>), ApiError> {
    let caller = service.current_user(&claims).await?;
    let entry = service
        .add_lore_entry(&event_id, req.kind, req.content, req.location, &caller)
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/lore",
    params(
        ("event_id" = String, Path, description = "ID of the event")
    ),
    responses(
        (status = 200, description = "Lore feed of the event", body = Vec<LoreEntry>),
        (status = 403, description = "Caller is not a member", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn list_lore_entries(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Path(event_id): Path<String>,
) -> Result<Json<Vec<LoreEntry>>, ApiError> {
    let caller = service.current_user(&claims).await?;
    let entries = service.list_lore_entries(&event_id, &caller).await?;
    Ok(Json(entries))
}

#[utoipa::path(
    post,
    path = "/api/lore/{entry_id}/hall_of_fame",
    params(
        ("entry_id" = String, Path, description = "ID of the lore entry")
    ),
    responses(
        (status = 200, description = "Hall of fame flag flipped", body = LoreEntry),
        (status = 403, description = "Caller is neither author nor organizer", body = ErrorResponse),
        (status = 404, description = "Lore entry not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn toggle_lore_hall_of_fame(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Path(entry_id): Path<String>,
) -> Result<Json<LoreEntry>, ApiError> {
    let caller = service.current_user(&claims).await?;
    let entry = service.toggle_lore_hall_of_fame(&entry_id, &caller).await?;
    Ok(Json(entry))
}

#[utoipa::path(
    post,
    path = "/api/events/{event_id}/activity_results",
    params(
        ("event_id" = String, Path, description = "ID of the event")
    ),
    request_body = AddActivityResultRequest,
    responses(
        (status = 201, description = "Result recorded", body = ActivityResult),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 403, description = "Caller is not a member, or not a sponsor recording for someone else", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn add_activity_result(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Path(event_id): Path<String>,
    Json(req): Json<AddActivityResultRequest>,
) -> Result<(StatusCode, Json<ActivityResult>), ApiError> {
    let caller = service.current_user(&claims).await?;
    let user_id = req.user_id.unwrap_or_else(|| caller.id.clone());
    let result = service
        .add_activity_result(&event_id, &user_id, req.metric, req.value, req.unit, req.day, &caller)
        .await?;
    Ok((StatusCode::CREATED, Json(result)))
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/activity_results",
    params(
        ("event_id" = String, Path, description = "ID of the event")
    ),
    responses(
        (status = 200, description = "Activity results of the event", body = Vec<ActivityResult>),
        (status = 403, description = "Caller is not a member", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn list_activity_results(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Path(event_id): Path<String>,
) -> Result<Json<Vec<ActivityResult>>, ApiError> {
    let caller = service.current_user(&claims).await?;
    let results = service.list_activity_results(&event_id, &caller).await?;
    Ok(Json(results))
}

#[utoipa::path(
    post,
    path = "/api/events/{event_id}/award_votes",
    params(
        ("event_id" = String, Path, description = "ID of the event")
    ),
    request_body = CastAwardVoteRequest,
    responses(
        (status = 201, description = "Vote cast", body = AwardVote),
        (status = 400, description = "Self-vote or nominee not attending", body = ErrorResponse),
        (status = 404, description = "Award definition not found", body = ErrorResponse),
        (status = 409, description = "Duplicate vote, vote cap reached or event sealed", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn cast_award_vote(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Path(event_id): Path<String>,
    Json(req): Json<CastAwardVoteRequest>,
) -> Result<(StatusCode, Json<AwardVote>), ApiError> {
    let caller = service.current_user(&claims).await?;
    let vote = service
        .cast_award_vote(&event_id, &req.award_definition_id, &req.nominee_id, &caller)
        .await?;
    Ok((StatusCode::CREATED, Json(vote)))
}

#[utoipa::path(
    delete,
    path = "/api/award_votes/{vote_id}",
    params(
        ("vote_id" = String, Path, description = "ID of the award vote")
    ),
    responses(
        (status = 204, description = "Vote retracted"),
        (status = 403, description = "Caller did not cast the vote", body = ErrorResponse),
        (status = 404, description = "Vote not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn retract_award_vote(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Path(vote_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let caller = service.current_user(&claims).await?;
    service.retract_award_vote(&vote_id, &caller).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/events/{event_id}/awards",
    params(
        ("event_id" = String, Path, description = "ID of the event")
    ),
    request_body = SetAwardWinnerRequest,
    responses(
        (status = 200, description = "Winner assigned", body = Award),
        (status = 403, description = "Caller is not a sponsor", body = ErrorResponse),
        (status = 404, description = "Event, award or user not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn set_award_winner(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Path(event_id): Path<String>,
    Json(req): Json<SetAwardWinnerRequest>,
) -> Result<Json<Award>, ApiError> {
    let caller = service.current_user(&claims).await?;
    let award = service
        .set_award_winner(&event_id, &req.award_definition_id, &req.winner_id, &caller)
        .await?;
    Ok(Json(award))
}

#[utoipa::path(
    post,
    path = "/api/events/{event_id}/awards/finalize",
    params(
        ("event_id" = String, Path, description = "ID of the event")
    ),
    responses(
        (status = 200, description = "Winners decided from the votes", body = Vec<Award>),
        (status = 403, description = "Caller is not a sponsor", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn finalize_award_votes(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Path(event_id): Path<String>,
) -> Result<Json<Vec<Award>>, ApiError> {
    let caller = service.current_user(&claims).await?;
    let awards = service.finalize_award_votes(&event_id, &caller).await?;
    Ok(Json(awards))
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/awards",
    params(
        ("event_id" = String, Path, description = "ID of the event")
    ),
    responses(
        (status = 200, description = "Decided awards of the event", body = Vec<Award>),
        (status = 403, description = "Caller is not a member", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn get_event_awards(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Path(event_id): Path<String>,
) -> Result<Json<Vec<Award>>, ApiError> {
    let caller = service.current_user(&claims).await?;
    let awards = service.get_event_awards(&event_id, &caller).await?;
    Ok(Json(awards))
}

#[utoipa::path(
    get,
    path = "/api/logs",
    responses(
        (status = 200, description = "Application logs retrieved successfully", body = Vec<AppLog>),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn get_app_logs(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<AppLog>>, ApiError> {
    let logs = service.get_app_logs(&claims).await?;
    Ok(Json(logs))
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/audits",
    params(
        ("event_id" = String, Path, description = "ID of the event")
    ),
    responses(
        (status = 200, description = "Event audits retrieved successfully", body = Vec<EventAudit>),
        (status = 403, description = "Caller cannot edit the event", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn get_event_audits(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Path(event_id): Path<String>,
) -> Result<Json<Vec<EventAudit>>, ApiError> {
    let caller = service.current_user(&claims).await?;
    let audits = service.get_event_audits(&event_id, &caller).await?;
    Ok(Json(audits))
}
