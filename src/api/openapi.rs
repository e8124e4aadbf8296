use utoipa::OpenApi;

use crate::{
    api::models::{
        AddActivityResultRequest, AddAwardDefinitionRequest, AddExpenseRequest, AddLoreRequest, AddProposalRequest, AdvanceStatusRequest,
        CastAwardVoteRequest, CreateEventRequest, CreateRitualRequest, CreateUserRequest, ErrorResponse,
        JoinRitualRequest, ProposalVoteRequest, QuickEnterEventRequest, SetAwardWinnerRequest, UpdateBookingRequest,
    },
    core::models::{
        activity::ActivityResult,
        audit::{AppLog, EventAudit},
        award::{Award, AwardDefinition, AwardKind, AwardVote},
        event::{
            Attendee, BookingStatus, Event, EventStatus, Proposal, ProposalSummary, ProposalVote, VoteChoice,
        },
        expense::Expense,
        lore::{LoreEntry, LoreKind},
        ritual::{CrewRole, Ritual, RitualMember},
        settlement::{NetBalance, SettlementSummary, SettlementTransfer},
        user::User,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::health,
        super::handlers::create_user,
        super::handlers::get_user,
        super::handlers::list_rituals,
        super::handlers::create_ritual,
        super::handlers::join_ritual,
        super::handlers::get_ritual,
        super::handlers::list_award_definitions,
        super::handlers::add_award_definition,
        super::handlers::create_event,
        super::handlers::list_ritual_events,
        super::handlers::get_event_by_year,
        super::handlers::quick_enter_event,
        super::handlers::get_event,
        super::handlers::add_proposal,
        super::handlers::list_proposals,
        super::handlers::cast_proposal_vote,
        super::handlers::lock_proposal,
        super::handlers::delete_proposal,
        super::handlers::list_attendees,
        super::handlers::update_booking_status,
        super::handlers::advance_event_status,
        super::handlers::seal_event,
        super::handlers::add_expense,
        super::handlers::list_expenses,
        super::handlers::delete_expense,
        super::handlers::get_event_settlement,
        super::handlers::add_lore_entry,
        super::handlers::list_lore_entries,
        super::handlers::toggle_lore_hall_of_fame,
        super::handlers::add_activity_result,
        super::handlers::list_activity_results,
        super::handlers::cast_award_vote,
        super::handlers::retract_award_vote,
        super::handlers::set_award_winner,
        super::handlers::finalize_award_votes,
        super::handlers::get_event_awards,
        super::handlers::get_app_logs,
        super::handlers::get_event_audits
    ),
    components(schemas(
        CreateUserRequest,
        CreateRitualRequest,
        JoinRitualRequest,
        AddAwardDefinitionRequest,
        CreateEventRequest,
        QuickEnterEventRequest,
        AddProposalRequest,
        ProposalVoteRequest,
        UpdateBookingRequest,
        AdvanceStatusRequest,
        AddExpenseRequest,
        AddLoreRequest,
        AddActivityResultRequest,
        CastAwardVoteRequest,
        SetAwardWinnerRequest,
        ErrorResponse,
        User,
        Ritual,
        RitualMember,
        CrewRole,
        Event,
        EventStatus,
        Proposal,
        ProposalSummary,
        ProposalVote,
        VoteChoice,
        Attendee,
        BookingStatus,
        Expense,
        SettlementSummary,
        SettlementTransfer,
        NetBalance,
        LoreEntry,
        LoreKind,
        ActivityResult,
        AwardDefinition,
        AwardKind,
        AwardVote,
        Award,
        AppLog,
        EventAudit
    )),
    info(
        title = "Yearout API",
        description = "API for planning yearly group trips, splitting their costs and voting on awards",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
