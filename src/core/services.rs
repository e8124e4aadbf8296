use crate::auth::jwt::{Claims, JwtService};
use crate::constants::{
    ACTIVITY_RESULT_ADDED, ADMIN_ROLE, AWARD_DEFINED, AWARD_VOTE_CAST, AWARD_VOTE_RETRACTED, AWARD_WINNER_SET,
    AWARDS_FINALIZED, BOOKING_STATUS_UPDATED, EVENT_CREATED, EVENT_QUICK_ENTERED, EVENT_SEALED, EVENT_STATUS_ADVANCED,
    EXPENSE_ADDED, EXPENSE_DELETED, LORE_ADDED, LORE_HALL_OF_FAME_TOGGLED, MAX_DESCRIPTION_LENGTH, MAX_EXPENSE_CENTS,
    MAX_LORE_LENGTH, MAX_NAME_LENGTH, MAX_VOTES_PER_AWARD, PROPOSAL_ADDED, PROPOSAL_DELETED, PROPOSAL_LOCKED,
    PROPOSAL_VOTED, RITUAL_CREATED, RITUAL_JOINED, USER_ADDED,
};
use crate::core::awards::finalize_award;
use crate::core::errors::{FieldError, YearoutError};
use crate::core::models::{
    activity::ActivityResult,
    audit::{AppLog, EventAudit},
    award::{Award, AwardDefinition, AwardKind, AwardVote},
    event::{
        Attendee, BookingStatus, Event, EventStatus, Proposal, ProposalSummary, ProposalVote, QuickEntry, VoteChoice,
    },
    expense::Expense,
    lore::{LoreEntry, LoreKind},
    ritual::{CrewRole, Ritual, RitualMember},
    settlement::SettlementSummary,
    user::User,
};
use crate::core::{policy, settlement};
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;
use chrono::{NaiveDate, Utc};
use serde_json::json;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub struct YearoutService<L: LoggingService, S: Storage> {
    storage: S,
    logging: L,
    jwt_service: JwtService,
}

impl<L: LoggingService, S: Storage> YearoutService<L, S> {
    pub fn new(storage: S, logging: L, jwt_secret: String) -> Self {
        YearoutService {
            storage,
            logging,
            jwt_service: JwtService::new(jwt_secret),
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, YearoutError> {
        self.jwt_service.validate_token(token)
    }

    pub fn jwt(&self) -> &JwtService {
        &self.jwt_service
    }

    async fn load_ritual(&self, ritual_id: &str) -> Result<Ritual, YearoutError> {
        self.storage
            .get_ritual(ritual_id)
            .await?
            .ok_or_else(|| YearoutError::RitualNotFound(ritual_id.to_string()))
    }

    /// Loads an event together with the ritual it belongs to.
    async fn load_event(&self, event_id: &str) -> Result<(Event, Ritual), YearoutError> {
        let event = self
            .storage
            .get_event(event_id)
            .await?
            .ok_or_else(|| YearoutError::EventNotFound(event_id.to_string()))?;
        let ritual = self.load_ritual(&event.ritual_id).await?;
        Ok((event, ritual))
    }

    fn require_member(&self, user: &User, ritual: &Ritual) -> Result<(), YearoutError> {
        if !policy::is_member(&user.id, ritual) {
            return Err(YearoutError::NotRitualMember(user.id.clone()));
        }
        Ok(())
    }

    fn require_sponsor(&self, user: &User, ritual: &Ritual, action: &str) -> Result<(), YearoutError> {
        if !policy::can_manage_ritual(&user.id, ritual) {
            warn!("User {} tried to {} without sponsor role in {}", user.id, action, ritual.id);
            return Err(YearoutError::NotAuthorized(
                user.id.clone(),
                format!("only sponsors can {}", action),
            ));
        }
        Ok(())
    }

    fn require_event_editor(&self, user: &User, ritual: &Ritual, event: &Event, action: &str) -> Result<(), YearoutError> {
        if !policy::can_edit_event(&user.id, ritual, event) {
            warn!("User {} tried to {} on event {}", user.id, action, event.id);
            return Err(YearoutError::NotAuthorized(
                user.id.clone(),
                format!("only sponsors or organizers can {}", action),
            ));
        }
        Ok(())
    }

    fn ensure_not_sealed(&self, event: &Event) -> Result<(), YearoutError> {
        if event.is_sealed() {
            return Err(YearoutError::EventSealed(event.id.clone()));
        }
        Ok(())
    }

    async fn log_and_audit(
        &self,
        event_id: Option<&str>,
        action: &str,
        log_details: serde_json::Value,
        user_id: Option<&str>,
    ) -> Result<(), YearoutError> {
        self.logging.log_action(action, log_details.clone(), user_id).await?;
        if let Some(eid) = event_id {
            self.storage
                .save_event_audit(EventAudit {
                    id: Uuid::new_v4().to_string(),
                    event_id: eid.to_string(),
                    action: action.to_string(),
                    user_id: user_id.map(String::from),
                    details: log_details,
                    timestamp: Utc::now(),
                })
                .await?;
        }
        Ok(())
    }

    fn validate_string_input(&self, field: &str, value: &str, max_length: usize) -> Result<(), YearoutError> {
        if value.trim().is_empty() {
            return Err(YearoutError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("Invalid {}", field),
                    description: format!("{} cannot be empty", field),
                },
            ));
        }
        if value.chars().count() > max_length {
            return Err(YearoutError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("{} Too Long", field),
                    description: format!("{} cannot exceed {} characters", field, max_length),
                },
            ));
        }
        if value.chars().any(|c| c.is_control() && c != '\n') {
            return Err(YearoutError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("Invalid {}", field),
                    description: format!("{} contains invalid characters", field),
                },
            ));
        }
        Ok(())
    }

    /// Trims an optional free-text field, mapping blank input to `None`.
    fn optional_input(&self, field: &str, value: Option<String>) -> Result<Option<String>, YearoutError> {
        match value.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => {
                self.validate_string_input(field, v, MAX_DESCRIPTION_LENGTH)?;
                Ok(Some(v.to_string()))
            }
            _ => Ok(None),
        }
    }

    fn validate_year(&self, year: i32) -> Result<(), YearoutError> {
        if !(1900..=9999).contains(&year) {
            return Err(YearoutError::InvalidInput(
                "year".to_string(),
                FieldError {
                    field: "year".to_string(),
                    title: "Invalid year".to_string(),
                    description: "Year must be between 1900 and 9999".to_string(),
                },
            ));
        }
        Ok(())
    }

    fn validate_amount_input(&self, field: &str, amount_cents: i64) -> Result<(), YearoutError> {
        if amount_cents <= 0 {
            return Err(YearoutError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Invalid Amount".to_string(),
                    description: "Amount must be greater than 0".to_string(),
                },
            ));
        }
        if amount_cents > MAX_EXPENSE_CENTS {
            return Err(YearoutError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Amount Too Large".to_string(),
                    description: "Amount cannot exceed 1,000,000.00".to_string(),
                },
            ));
        }
        Ok(())
    }

    // USERS

    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, YearoutError> {
        self.storage.get_user(user_id).await
    }

    /// A profile as seen by `viewer`: their own, or that of someone they share a ritual with.
    pub async fn get_user_profile(&self, user_id: &str, viewer: &User) -> Result<User, YearoutError> {
        if user_id != viewer.id {
            let crewmates = self
                .storage
                .get_user_rituals(&viewer.id)
                .await?
                .iter()
                .any(|ritual| policy::is_member(user_id, ritual));
            if !crewmates {
                return Err(YearoutError::NotAuthorized(
                    viewer.id.clone(),
                    "profiles are only visible to crewmates".to_string(),
                ));
            }
        }
        self.storage
            .get_user(user_id)
            .await?
            .ok_or_else(|| YearoutError::UserNotFound(user_id.to_string()))
    }

    /// Resolves the caller named by a validated token.
    pub async fn current_user(&self, claims: &Claims) -> Result<User, YearoutError> {
        self.storage
            .get_user(&claims.sub)
            .await?
            .ok_or_else(|| YearoutError::UserNotFound(claims.sub.clone()))
    }

    pub async fn add_user(&self, user: User) -> Result<User, YearoutError> {
        if user.email.is_empty() {
            return Err(YearoutError::MissingEmail);
        }
        if !user.email.contains('@') || !user.email.contains('.') || user.email.len() < 5 {
            return Err(YearoutError::InvalidEmail(user.email.clone()));
        }
        self.validate_string_input("name", &user.name, MAX_NAME_LENGTH)?;

        if let Some(existing) = self.storage.get_user_by_email(&user.email).await? {
            if existing.id != user.id {
                return Err(YearoutError::EmailAlreadyRegistered(user.email));
            }
        }

        self.storage.save_user(user.clone()).await?;
        self.log_and_audit(
            None,
            USER_ADDED,
            json!({ "user_id": user.id, "name": user.name, "email": user.email }),
            Some(user.id.as_str()),
        )
        .await?;
        Ok(user)
    }

    // RITUALS

    async fn unique_slug(&self, base: &str) -> Result<String, YearoutError> {
        let mut slug = base.to_string();
        let mut attempt = 0;
        while self.storage.get_ritual_by_slug(&slug).await?.is_some() {
            attempt += 1;
            slug = format!("{}-{}", base, attempt);
        }
        Ok(slug)
    }

    pub async fn create_ritual(
        &self,
        name: String,
        slug: String,
        tagline: Option<String>,
        award_names: Vec<String>,
        created_by: &User,
    ) -> Result<Ritual, YearoutError> {
        self.validate_string_input("name", &name, MAX_NAME_LENGTH)?;
        let base: String = slug
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_whitespace() { '-' } else { c })
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
            .collect();
        self.validate_string_input("slug", &base, MAX_NAME_LENGTH)?;
        let tagline = self.optional_input("tagline", tagline)?;

        let now = Utc::now();
        let ritual = Ritual {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            slug: self.unique_slug(&base).await?,
            sponsor_id: created_by.id.clone(),
            invite_token: Uuid::new_v4().to_string(),
            tagline,
            members: vec![RitualMember {
                user_id: created_by.id.clone(),
                role: CrewRole::Sponsor,
                is_core_crew: true,
                joined_at: now,
            }],
            created_at: now,
        };
        self.storage.save_ritual(ritual.clone()).await?;

        let mvp = award_names.first().map(|n| n.trim()).filter(|n| !n.is_empty());
        let lup = award_names.get(1).map(|n| n.trim()).filter(|n| !n.is_empty());
        let defaults = [
            (mvp.unwrap_or("MVP"), mvp.unwrap_or("Most Valuable Player"), AwardKind::Mvp),
            (lup.unwrap_or("LUP"), lup.unwrap_or("Least Useful Player"), AwardKind::Lup),
        ];
        for (award_name, label, kind) in defaults {
            self.storage
                .save_award_definition(AwardDefinition {
                    id: Uuid::new_v4().to_string(),
                    ritual_id: ritual.id.clone(),
                    name: award_name.to_string(),
                    label: label.to_string(),
                    kind,
                    created_at: now,
                })
                .await?;
        }

        info!("Ritual {} created by {}", ritual.slug, created_by.id);
        self.log_and_audit(
            None,
            RITUAL_CREATED,
            json!({ "ritual_id": ritual.id, "name": ritual.name, "slug": ritual.slug }),
            Some(created_by.id.as_str()),
        )
        .await?;
        Ok(ritual)
    }

    /// Joins the ritual behind an invite token. Joining twice is a no-op.
    pub async fn join_ritual(&self, invite_token: &str, user: &User) -> Result<Ritual, YearoutError> {
        let mut ritual = self
            .storage
            .get_ritual_by_invite_token(invite_token)
            .await?
            .ok_or(YearoutError::InviteNotFound)?;

        if policy::is_member(&user.id, &ritual) {
            return Ok(ritual);
        }

        ritual.members.push(RitualMember {
            user_id: user.id.clone(),
            role: CrewRole::CrewMember,
            is_core_crew: false,
            joined_at: Utc::now(),
        });
        self.storage.save_ritual(ritual.clone()).await?;

        self.log_and_audit(
            None,
            RITUAL_JOINED,
            json!({ "ritual_id": ritual.id, "user_id": user.id }),
            Some(user.id.as_str()),
        )
        .await?;
        Ok(ritual)
    }

    pub async fn get_ritual_by_slug(&self, slug: &str, user: &User) -> Result<Ritual, YearoutError> {
        let ritual = self
            .storage
            .get_ritual_by_slug(slug)
            .await?
            .ok_or_else(|| YearoutError::RitualNotFound(slug.to_string()))?;
        self.require_member(user, &ritual)?;
        Ok(ritual)
    }

    /// Rituals the user belongs to, oldest first.
    pub async fn list_rituals(&self, user: &User) -> Result<Vec<Ritual>, YearoutError> {
        self.storage.get_user_rituals(&user.id).await
    }

    pub async fn get_ritual_events(&self, ritual_id: &str, user: &User) -> Result<Vec<Event>, YearoutError> {
        let ritual = self.load_ritual(ritual_id).await?;
        self.require_member(user, &ritual)?;
        self.storage.get_ritual_events(&ritual.id).await
    }

    /// Looks an event up the way trip pages address it: by ritual slug and year.
    pub async fn get_event_by_year(&self, slug: &str, year: i32, user: &User) -> Result<Event, YearoutError> {
        let ritual = self.get_ritual_by_slug(slug, user).await?;
        self.storage
            .get_event_by_year(&ritual.id, year)
            .await?
            .ok_or_else(|| YearoutError::EventNotFound(format!("{}/{}", slug, year)))
    }

    pub async fn get_award_definitions(&self, ritual_id: &str, user: &User) -> Result<Vec<AwardDefinition>, YearoutError> {
        let ritual = self.load_ritual(ritual_id).await?;
        self.require_member(user, &ritual)?;
        self.storage.get_award_definitions(ritual_id).await
    }

    pub async fn add_award_definition(
        &self,
        ritual_id: &str,
        name: String,
        label: String,
        kind: AwardKind,
        added_by: &User,
    ) -> Result<AwardDefinition, YearoutError> {
        let ritual = self.load_ritual(ritual_id).await?;
        self.require_sponsor(added_by, &ritual, "define awards")?;
        self.validate_string_input("name", &name, MAX_NAME_LENGTH)?;
        self.validate_string_input("label", &label, MAX_NAME_LENGTH)?;

        let definition = AwardDefinition {
            id: Uuid::new_v4().to_string(),
            ritual_id: ritual.id.clone(),
            name: name.trim().to_string(),
            label: label.trim().to_string(),
            kind,
            created_at: Utc::now(),
        };
        self.storage.save_award_definition(definition.clone()).await?;

        self.log_and_audit(
            None,
            AWARD_DEFINED,
            json!({ "ritual_id": ritual.id, "award_definition_id": definition.id, "name": definition.name }),
            Some(added_by.id.as_str()),
        )
        .await?;
        Ok(definition)
    }

    // EVENTS

    pub async fn create_event(
        &self,
        ritual_id: &str,
        name: String,
        year: i32,
        location: Option<String>,
        proposed_dates: Option<String>,
        created_by: &User,
    ) -> Result<Event, YearoutError> {
        let ritual = self.load_ritual(ritual_id).await?;
        self.require_sponsor(created_by, &ritual, "create events")?;
        self.validate_string_input("name", &name, MAX_NAME_LENGTH)?;
        self.validate_year(year)?;
        let location = self.optional_input("location", location)?;
        let proposed_dates = self.optional_input("dates", proposed_dates)?;

        let now = Utc::now();
        let event = Event {
            id: Uuid::new_v4().to_string(),
            ritual_id: ritual.id.clone(),
            organizer_id: Some(created_by.id.clone()),
            name: name.trim().to_string(),
            year,
            // set when a proposal is locked
            location: None,
            status: EventStatus::Planning,
            sealed_at: None,
            created_at: now,
        };
        self.storage.save_event(event.clone()).await?;

        if location.is_some() || proposed_dates.is_some() {
            self.storage
                .save_proposal(Proposal {
                    id: Uuid::new_v4().to_string(),
                    event_id: event.id.clone(),
                    proposed_by: created_by.id.clone(),
                    dates: proposed_dates,
                    location,
                    notes: None,
                    created_at: now,
                })
                .await?;
        }

        info!("Event {} ({}) created in ritual {}", event.name, event.year, ritual.slug);
        self.log_and_audit(
            Some(event.id.as_str()),
            EVENT_CREATED,
            json!({ "event_id": event.id, "ritual_id": ritual.id, "name": event.name, "year": event.year }),
            Some(created_by.id.as_str()),
        )
        .await?;
        Ok(event)
    }

    /// Enters a whole trip in one step, typically a past year. Every ritual member is
    /// seeded as an attendee. A closed entry is sealed on arrival and may carry its
    /// MVP and LUP winners.
    pub async fn quick_enter_event(
        &self,
        ritual_id: &str,
        entry: QuickEntry,
        created_by: &User,
    ) -> Result<Event, YearoutError> {
        let ritual = self.load_ritual(ritual_id).await?;
        self.require_sponsor(created_by, &ritual, "create events")?;
        self.validate_string_input("name", &entry.name, MAX_NAME_LENGTH)?;
        self.validate_year(entry.year)?;
        self.validate_string_input("location", &entry.location, MAX_DESCRIPTION_LENGTH)?;
        if entry.status == EventStatus::Planning {
            return Err(YearoutError::InvalidInput(
                "status".to_string(),
                FieldError {
                    field: "status".to_string(),
                    title: "Invalid status".to_string(),
                    description: "Quick entry cannot create a planning event".to_string(),
                },
            ));
        }
        if !policy::is_member(&entry.organizer_id, &ritual) {
            return Err(YearoutError::NotRitualMember(entry.organizer_id.clone()));
        }

        let closed = entry.status == EventStatus::Closed;
        let winners: Vec<(AwardKind, String)> = [
            (AwardKind::Mvp, entry.mvp_winner_id),
            (AwardKind::Lup, entry.lup_winner_id),
        ]
        .into_iter()
        .filter_map(|(kind, winner)| winner.map(|w| (kind, w)))
        .collect();
        if !winners.is_empty() && !closed {
            return Err(YearoutError::InvalidInput(
                "winners".to_string(),
                FieldError {
                    field: "winners".to_string(),
                    title: "Invalid winners".to_string(),
                    description: "Winners can only be recorded for closed events".to_string(),
                },
            ));
        }
        for (_, winner_id) in &winners {
            if self.storage.get_user(winner_id).await?.is_none() {
                return Err(YearoutError::UserNotFound(winner_id.clone()));
            }
        }

        let now = Utc::now();
        let event = Event {
            id: Uuid::new_v4().to_string(),
            ritual_id: ritual.id.clone(),
            organizer_id: Some(entry.organizer_id.clone()),
            name: entry.name.trim().to_string(),
            year: entry.year,
            location: Some(entry.location.trim().to_string()),
            status: entry.status,
            sealed_at: closed.then_some(now),
            created_at: now,
        };
        self.storage.save_event(event.clone()).await?;

        for member in &ritual.members {
            self.storage
                .save_attendee(Attendee {
                    id: Uuid::new_v4().to_string(),
                    event_id: event.id.clone(),
                    user_id: member.user_id.clone(),
                    booking_status: BookingStatus::NotYet,
                    confirmed_at: None,
                })
                .await?;
        }

        let definitions = self.storage.get_award_definitions(&ritual.id).await?;
        for (kind, winner_id) in winners {
            // rituals without a definition of this kind skip the winner
            let Some(definition) = definitions.iter().find(|d| d.kind == kind) else {
                continue;
            };
            self.storage
                .upsert_award(Award {
                    id: Uuid::new_v4().to_string(),
                    event_id: event.id.clone(),
                    award_definition_id: definition.id.clone(),
                    winner_id,
                    created_at: now,
                })
                .await?;
        }

        info!("Event {} ({}) quick-entered as {} in ritual {}", event.name, event.year, event.status, ritual.slug);
        self.log_and_audit(
            Some(event.id.as_str()),
            EVENT_QUICK_ENTERED,
            json!({ "event_id": event.id, "ritual_id": ritual.id, "year": event.year, "status": event.status }),
            Some(created_by.id.as_str()),
        )
        .await?;
        Ok(event)
    }

    pub async fn get_event(&self, event_id: &str, user: &User) -> Result<Event, YearoutError> {
        let (event, ritual) = self.load_event(event_id).await?;
        self.require_member(user, &ritual)?;
        Ok(event)
    }

    pub async fn add_proposal(
        &self,
        event_id: &str,
        dates: Option<String>,
        location: Option<String>,
        notes: Option<String>,
        proposed_by: &User,
    ) -> Result<Proposal, YearoutError> {
        let (event, ritual) = self.load_event(event_id).await?;
        self.require_member(proposed_by, &ritual)?;

        let proposal = Proposal {
            id: Uuid::new_v4().to_string(),
            event_id: event.id.clone(),
            proposed_by: proposed_by.id.clone(),
            dates: self.optional_input("dates", dates)?,
            location: self.optional_input("location", location)?,
            notes: self.optional_input("notes", notes)?,
            created_at: Utc::now(),
        };
        self.storage.save_proposal(proposal.clone()).await?;

        self.log_and_audit(
            Some(event.id.as_str()),
            PROPOSAL_ADDED,
            json!({ "proposal_id": proposal.id, "location": proposal.location, "dates": proposal.dates }),
            Some(proposed_by.id.as_str()),
        )
        .await?;
        Ok(proposal)
    }

    pub async fn list_proposals(&self, event_id: &str, user: &User) -> Result<Vec<ProposalSummary>, YearoutError> {
        let (event, ritual) = self.load_event(event_id).await?;
        self.require_member(user, &ritual)?;

        let mut summaries = Vec::new();
        for proposal in self.storage.get_event_proposals(&event.id).await? {
            let votes = self.storage.get_proposal_votes(&proposal.id).await?;
            let count = |choice: VoteChoice| votes.iter().filter(|v| v.choice == choice).count();
            summaries.push(ProposalSummary {
                yes: count(VoteChoice::Yes),
                no: count(VoteChoice::No),
                maybe: count(VoteChoice::Maybe),
                proposal,
            });
        }
        Ok(summaries)
    }

    /// Records the caller's vote on a proposal, replacing any earlier one.
    pub async fn cast_proposal_vote(
        &self,
        proposal_id: &str,
        choice: VoteChoice,
        voter: &User,
    ) -> Result<ProposalVote, YearoutError> {
        let proposal = self
            .storage
            .get_proposal(proposal_id)
            .await?
            .ok_or_else(|| YearoutError::ProposalNotFound(proposal_id.to_string()))?;
        let (event, ritual) = self.load_event(&proposal.event_id).await?;
        self.require_member(voter, &ritual)?;

        let existing = self
            .storage
            .get_proposal_votes(proposal_id)
            .await?
            .into_iter()
            .find(|v| v.user_id == voter.id);
        let vote = match existing {
            Some(mut vote) => {
                vote.choice = choice;
                vote
            }
            None => ProposalVote {
                id: Uuid::new_v4().to_string(),
                proposal_id: proposal_id.to_string(),
                user_id: voter.id.clone(),
                choice,
                created_at: Utc::now(),
            },
        };
        self.storage.save_proposal_vote(vote.clone()).await?;

        self.log_and_audit(
            Some(event.id.as_str()),
            PROPOSAL_VOTED,
            json!({ "proposal_id": proposal_id, "choice": choice }),
            Some(voter.id.as_str()),
        )
        .await?;
        Ok(vote)
    }

    /// Promotes a proposal: the event takes its location, moves to scheduled, and
    /// every ritual member becomes an attendee.
    pub async fn lock_proposal(&self, proposal_id: &str, locked_by: &User) -> Result<Event, YearoutError> {
        let proposal = self
            .storage
            .get_proposal(proposal_id)
            .await?
            .ok_or_else(|| YearoutError::ProposalNotFound(proposal_id.to_string()))?;
        let (mut event, ritual) = self.load_event(&proposal.event_id).await?;
        self.require_sponsor(locked_by, &ritual, "lock proposals")?;

        if !event.status.can_transition_to(EventStatus::Scheduled) {
            return Err(YearoutError::InvalidStatusTransition {
                from: event.status.to_string(),
                to: EventStatus::Scheduled.to_string(),
            });
        }

        event.status = EventStatus::Scheduled;
        event.location = proposal.location.clone();
        self.storage.save_event(event.clone()).await?;

        for member in &ritual.members {
            if self.storage.get_attendee(&event.id, &member.user_id).await?.is_none() {
                self.storage
                    .save_attendee(Attendee {
                        id: Uuid::new_v4().to_string(),
                        event_id: event.id.clone(),
                        user_id: member.user_id.clone(),
                        booking_status: BookingStatus::NotYet,
                        confirmed_at: None,
                    })
                    .await?;
            }
        }

        self.log_and_audit(
            Some(event.id.as_str()),
            PROPOSAL_LOCKED,
            json!({ "proposal_id": proposal.id, "location": event.location }),
            Some(locked_by.id.as_str()),
        )
        .await?;
        Ok(event)
    }

    pub async fn delete_proposal(&self, proposal_id: &str, deleted_by: &User) -> Result<(), YearoutError> {
        let proposal = self
            .storage
            .get_proposal(proposal_id)
            .await?
            .ok_or_else(|| YearoutError::ProposalNotFound(proposal_id.to_string()))?;
        if proposal.proposed_by != deleted_by.id {
            return Err(YearoutError::NotAuthorized(
                deleted_by.id.clone(),
                "only the proposer can delete a proposal".to_string(),
            ));
        }
        self.storage.delete_proposal(proposal_id).await?;

        self.log_and_audit(
            Some(proposal.event_id.as_str()),
            PROPOSAL_DELETED,
            json!({ "proposal_id": proposal_id }),
            Some(deleted_by.id.as_str()),
        )
        .await?;
        Ok(())
    }

    pub async fn list_attendees(&self, event_id: &str, user: &User) -> Result<Vec<Attendee>, YearoutError> {
        let (event, ritual) = self.load_event(event_id).await?;
        self.require_member(user, &ritual)?;
        self.storage.get_event_attendees(&event.id).await
    }

    /// Sets the caller's own booking status, registering them as an attendee if needed.
    pub async fn update_booking_status(
        &self,
        event_id: &str,
        status: BookingStatus,
        user: &User,
    ) -> Result<Attendee, YearoutError> {
        let (event, ritual) = self.load_event(event_id).await?;
        self.require_member(user, &ritual)?;

        let mut attendee = match self.storage.get_attendee(&event.id, &user.id).await? {
            Some(attendee) => attendee,
            None => Attendee {
                id: Uuid::new_v4().to_string(),
                event_id: event.id.clone(),
                user_id: user.id.clone(),
                booking_status: BookingStatus::NotYet,
                confirmed_at: None,
            },
        };
        attendee.booking_status = status;
        attendee.confirmed_at = match status {
            BookingStatus::NotYet | BookingStatus::Out => None,
            _ => attendee.confirmed_at.or_else(|| Some(Utc::now())),
        };
        self.storage.save_attendee(attendee.clone()).await?;

        self.log_and_audit(
            Some(event.id.as_str()),
            BOOKING_STATUS_UPDATED,
            json!({ "event_id": event.id, "status": status }),
            Some(user.id.as_str()),
        )
        .await?;
        Ok(attendee)
    }

    /// Moves an event to `in_progress` or `closed`. Scheduling goes through
    /// [`Self::lock_proposal`].
    pub async fn advance_event_status(
        &self,
        event_id: &str,
        new_status: EventStatus,
        advanced_by: &User,
    ) -> Result<Event, YearoutError> {
        let (mut event, ritual) = self.load_event(event_id).await?;
        self.require_event_editor(advanced_by, &ritual, &event, "advance event status")?;
        self.ensure_not_sealed(&event)?;

        let allowed_target = matches!(new_status, EventStatus::InProgress | EventStatus::Closed);
        if !allowed_target || !event.status.can_transition_to(new_status) {
            return Err(YearoutError::InvalidStatusTransition {
                from: event.status.to_string(),
                to: new_status.to_string(),
            });
        }

        let previous = event.status;
        event.status = new_status;
        self.storage.save_event(event.clone()).await?;

        info!("Event {} moved from {} to {}", event.id, previous, new_status);
        self.log_and_audit(
            Some(event.id.as_str()),
            EVENT_STATUS_ADVANCED,
            json!({ "event_id": event.id, "from": previous, "to": new_status }),
            Some(advanced_by.id.as_str()),
        )
        .await?;
        Ok(event)
    }

    /// Closes an event for good. Sealed events take no further expenses or votes.
    pub async fn seal_event(&self, event_id: &str, sealed_by: &User) -> Result<Event, YearoutError> {
        let (mut event, ritual) = self.load_event(event_id).await?;
        self.require_sponsor(sealed_by, &ritual, "seal events")?;
        self.ensure_not_sealed(&event)?;
        if !matches!(event.status, EventStatus::InProgress | EventStatus::Closed) {
            return Err(YearoutError::InvalidStatusTransition {
                from: event.status.to_string(),
                to: EventStatus::Closed.to_string(),
            });
        }

        event.status = EventStatus::Closed;
        event.sealed_at = Some(Utc::now());
        self.storage.save_event(event.clone()).await?;

        self.log_and_audit(
            Some(event.id.as_str()),
            EVENT_SEALED,
            json!({ "event_id": event.id }),
            Some(sealed_by.id.as_str()),
        )
        .await?;
        Ok(event)
    }

    // EXPENSES

    pub async fn add_expense(
        &self,
        event_id: &str,
        description: String,
        amount_cents: i64,
        paid_by: &User,
    ) -> Result<Expense, YearoutError> {
        let (event, ritual) = self.load_event(event_id).await?;
        self.require_member(paid_by, &ritual)?;
        self.ensure_not_sealed(&event)?;
        self.validate_string_input("description", &description, MAX_DESCRIPTION_LENGTH)?;
        self.validate_amount_input("amount_cents", amount_cents)?;

        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            event_id: event.id.clone(),
            paid_by: paid_by.id.clone(),
            description: description.trim().to_string(),
            amount_cents,
            created_at: Utc::now(),
        };
        self.storage.save_expense(expense.clone()).await?;

        self.log_and_audit(
            Some(event.id.as_str()),
            EXPENSE_ADDED,
            json!({
                "expense_id": expense.id,
                "description": expense.description,
                "amount_cents": expense.amount_cents,
                "paid_by": expense.paid_by
            }),
            Some(paid_by.id.as_str()),
        )
        .await?;
        Ok(expense)
    }

    /// Removes an expense. Only its payer or an event editor may do so.
    pub async fn delete_expense(&self, expense_id: &str, deleted_by: &User) -> Result<(), YearoutError> {
        let expense = self
            .storage
            .get_expense(expense_id)
            .await?
            .ok_or_else(|| YearoutError::ExpenseNotFound(expense_id.to_string()))?;
        let (event, ritual) = self.load_event(&expense.event_id).await?;
        self.ensure_not_sealed(&event)?;
        if !policy::can_delete_expense(&deleted_by.id, &ritual, &event, &expense) {
            return Err(YearoutError::NotAuthorized(
                deleted_by.id.clone(),
                "only the payer or an organizer can delete an expense".to_string(),
            ));
        }
        self.storage.delete_expense(expense_id).await?;

        self.log_and_audit(
            Some(event.id.as_str()),
            EXPENSE_DELETED,
            json!({ "expense_id": expense.id, "amount_cents": expense.amount_cents, "paid_by": expense.paid_by }),
            Some(deleted_by.id.as_str()),
        )
        .await?;
        Ok(())
    }

    pub async fn list_expenses(&self, event_id: &str, user: &User) -> Result<Vec<Expense>, YearoutError> {
        let (event, ritual) = self.load_event(event_id).await?;
        self.require_member(user, &ritual)?;
        self.storage.get_event_expenses(&event.id).await
    }

    /// Who owes whom for an event. Attendees who opted out do not share costs.
    pub async fn get_event_settlement(&self, event_id: &str, user: &User) -> Result<SettlementSummary, YearoutError> {
        let (event, ritual) = self.load_event(event_id).await?;
        self.require_member(user, &ritual)?;

        let expenses = self.storage.get_event_expenses(&event.id).await?;
        let roster: Vec<String> = self
            .storage
            .get_event_attendees(&event.id)
            .await?
            .into_iter()
            .filter(Attendee::shares_costs)
            .map(|a| a.user_id)
            .collect();

        let summary = settlement::summarize(&expenses, &roster);
        debug!(
            "Settlement for event {}: {} transfers across {} participants",
            event.id,
            summary.transfers.len(),
            roster.len()
        );
        Ok(summary)
    }

    // LORE

    pub async fn add_lore_entry(
        &self,
        event_id: &str,
        kind: LoreKind,
        content: String,
        location: Option<String>,
        author: &User,
    ) -> Result<LoreEntry, YearoutError> {
        let (event, ritual) = self.load_event(event_id).await?;
        self.require_member(author, &ritual)?;
        self.validate_string_input("content", &content, MAX_LORE_LENGTH)?;

        let entry = LoreEntry {
            id: Uuid::new_v4().to_string(),
            event_id: event.id.clone(),
            author_id: author.id.clone(),
            kind,
            content: content.trim().to_string(),
            location: self.optional_input("location", location)?,
            is_hall_of_fame: false,
            created_at: Utc::now(),
        };
        self.storage.save_lore_entry(entry.clone()).await?;

        self.log_and_audit(
            Some(event.id.as_str()),
            LORE_ADDED,
            json!({ "lore_entry_id": entry.id, "kind": entry.kind }),
            Some(author.id.as_str()),
        )
        .await?;
        Ok(entry)
    }

    pub async fn toggle_lore_hall_of_fame(&self, entry_id: &str, toggled_by: &User) -> Result<LoreEntry, YearoutError> {
        let mut entry = self
            .storage
            .get_lore_entry(entry_id)
            .await?
            .ok_or_else(|| YearoutError::LoreEntryNotFound(entry_id.to_string()))?;
        let (event, ritual) = self.load_event(&entry.event_id).await?;
        if !policy::can_curate_lore(&toggled_by.id, &ritual, &event, &entry) {
            return Err(YearoutError::NotAuthorized(
                toggled_by.id.clone(),
                "only the author or an organizer can curate lore".to_string(),
            ));
        }

        entry.is_hall_of_fame = !entry.is_hall_of_fame;
        self.storage.save_lore_entry(entry.clone()).await?;

        self.log_and_audit(
            Some(event.id.as_str()),
            LORE_HALL_OF_FAME_TOGGLED,
            json!({ "lore_entry_id": entry.id, "is_hall_of_fame": entry.is_hall_of_fame }),
            Some(toggled_by.id.as_str()),
        )
        .await?;
        Ok(entry)
    }

    pub async fn list_lore_entries(&self, event_id: &str, user: &User) -> Result<Vec<LoreEntry>, YearoutError> {
        let (event, ritual) = self.load_event(event_id).await?;
        self.require_member(user, &ritual)?;
        self.storage.get_event_lore_entries(&event.id).await
    }

    // ACTIVITY RESULTS

    /// Records an activity result. Members record their own; sponsors may record
    /// results for any member.
    pub async fn add_activity_result(
        &self,
        event_id: &str,
        user_id: &str,
        metric: String,
        value: String,
        unit: Option<String>,
        day: Option<NaiveDate>,
        added_by: &User,
    ) -> Result<ActivityResult, YearoutError> {
        let (event, ritual) = self.load_event(event_id).await?;
        self.require_member(added_by, &ritual)?;
        if user_id != added_by.id {
            self.require_sponsor(added_by, &ritual, "add results for others")?;
        }
        if !policy::is_member(user_id, &ritual) {
            return Err(YearoutError::NotRitualMember(user_id.to_string()));
        }
        self.validate_string_input("metric", &metric, MAX_NAME_LENGTH)?;
        self.validate_string_input("value", &value, MAX_NAME_LENGTH)?;

        let result = ActivityResult {
            id: Uuid::new_v4().to_string(),
            event_id: event.id.clone(),
            user_id: user_id.to_string(),
            metric: metric.trim().to_string(),
            value: value.trim().to_string(),
            unit: self.optional_input("unit", unit)?,
            day,
            created_at: Utc::now(),
        };
        self.storage.save_activity_result(result.clone()).await?;

        self.log_and_audit(
            Some(event.id.as_str()),
            ACTIVITY_RESULT_ADDED,
            json!({
                "activity_result_id": result.id,
                "user_id": result.user_id,
                "metric": result.metric,
                "value": result.value
            }),
            Some(added_by.id.as_str()),
        )
        .await?;
        Ok(result)
    }

    pub async fn list_activity_results(&self, event_id: &str, user: &User) -> Result<Vec<ActivityResult>, YearoutError> {
        let (event, ritual) = self.load_event(event_id).await?;
        self.require_member(user, &ritual)?;
        self.storage.get_event_activity_results(&event.id).await
    }

    // AWARDS

    async fn load_award_definition(&self, ritual: &Ritual, award_definition_id: &str) -> Result<AwardDefinition, YearoutError> {
        self.storage
            .get_award_definitions(&ritual.id)
            .await?
            .into_iter()
            .find(|d| d.id == award_definition_id)
            .ok_or_else(|| YearoutError::AwardDefinitionNotFound(award_definition_id.to_string()))
    }

    /// Casts a vote, enforcing the write-side invariants the tally relies on.
    pub async fn cast_award_vote(
        &self,
        event_id: &str,
        award_definition_id: &str,
        nominee_id: &str,
        voter: &User,
    ) -> Result<AwardVote, YearoutError> {
        let (event, ritual) = self.load_event(event_id).await?;
        self.require_member(voter, &ritual)?;
        self.ensure_not_sealed(&event)?;
        self.load_award_definition(&ritual, award_definition_id).await?;

        if nominee_id == voter.id {
            return Err(YearoutError::SelfVote);
        }

        let held: Vec<AwardVote> = self
            .storage
            .get_event_award_votes(&event.id)
            .await?
            .into_iter()
            .filter(|v| v.award_definition_id == award_definition_id && v.voter_id == voter.id)
            .collect();
        if held.iter().any(|v| v.nominee_id == nominee_id) {
            return Err(YearoutError::DuplicateVote(nominee_id.to_string()));
        }
        if held.len() >= MAX_VOTES_PER_AWARD {
            return Err(YearoutError::VoteCapExceeded(MAX_VOTES_PER_AWARD));
        }

        if self.storage.get_attendee(&event.id, nominee_id).await?.is_none() {
            return Err(YearoutError::NomineeNotAttendee(nominee_id.to_string()));
        }

        let vote = AwardVote {
            id: Uuid::new_v4().to_string(),
            event_id: event.id.clone(),
            award_definition_id: award_definition_id.to_string(),
            voter_id: voter.id.clone(),
            nominee_id: nominee_id.to_string(),
            created_at: Utc::now(),
        };
        self.storage.save_award_vote(vote.clone()).await?;

        self.log_and_audit(
            Some(event.id.as_str()),
            AWARD_VOTE_CAST,
            json!({ "vote_id": vote.id, "award_definition_id": award_definition_id, "nominee_id": nominee_id }),
            Some(voter.id.as_str()),
        )
        .await?;
        Ok(vote)
    }

    pub async fn retract_award_vote(&self, vote_id: &str, voter: &User) -> Result<(), YearoutError> {
        let vote = self
            .storage
            .get_award_vote(vote_id)
            .await?
            .ok_or_else(|| YearoutError::AwardVoteNotFound(vote_id.to_string()))?;
        if vote.voter_id != voter.id {
            return Err(YearoutError::NotAuthorized(
                voter.id.clone(),
                "only the voter can retract a vote".to_string(),
            ));
        }
        let (event, _) = self.load_event(&vote.event_id).await?;
        self.ensure_not_sealed(&event)?;
        self.storage.delete_award_vote(vote_id).await?;

        self.log_and_audit(
            Some(event.id.as_str()),
            AWARD_VOTE_RETRACTED,
            json!({ "vote_id": vote_id, "award_definition_id": vote.award_definition_id }),
            Some(voter.id.as_str()),
        )
        .await?;
        Ok(())
    }

    /// Assigns a winner by hand, overwriting any earlier result.
    pub async fn set_award_winner(
        &self,
        event_id: &str,
        award_definition_id: &str,
        winner_id: &str,
        assigned_by: &User,
    ) -> Result<Award, YearoutError> {
        let (event, ritual) = self.load_event(event_id).await?;
        self.require_sponsor(assigned_by, &ritual, "assign award winners")?;
        self.load_award_definition(&ritual, award_definition_id).await?;
        if self.storage.get_user(winner_id).await?.is_none() {
            return Err(YearoutError::UserNotFound(winner_id.to_string()));
        }

        let award = self
            .storage
            .upsert_award(Award {
                id: Uuid::new_v4().to_string(),
                event_id: event.id.clone(),
                award_definition_id: award_definition_id.to_string(),
                winner_id: winner_id.to_string(),
                created_at: Utc::now(),
            })
            .await?;

        self.log_and_audit(
            Some(event.id.as_str()),
            AWARD_WINNER_SET,
            json!({ "award_definition_id": award_definition_id, "winner_id": winner_id }),
            Some(assigned_by.id.as_str()),
        )
        .await?;
        Ok(award)
    }

    /// Tallies every award of the event and records the winners.
    ///
    /// Awards without votes keep whatever result they already had. Running this again
    /// on the same votes produces the same winners.
    pub async fn finalize_award_votes(&self, event_id: &str, finalized_by: &User) -> Result<Vec<Award>, YearoutError> {
        let (event, ritual) = self.load_event(event_id).await?;
        self.require_sponsor(finalized_by, &ritual, "finalize award votes")?;

        let votes = self.storage.get_event_award_votes(&event.id).await?;
        let definitions = self.storage.get_award_definitions(&ritual.id).await?;

        let mut decided = Vec::new();
        for definition in definitions {
            let definition_votes: Vec<AwardVote> = votes
                .iter()
                .filter(|v| v.award_definition_id == definition.id)
                .cloned()
                .collect();
            let Some(winner_id) = finalize_award(&definition_votes) else {
                continue;
            };
            let award = self
                .storage
                .upsert_award(Award {
                    id: Uuid::new_v4().to_string(),
                    event_id: event.id.clone(),
                    award_definition_id: definition.id.clone(),
                    winner_id,
                    created_at: Utc::now(),
                })
                .await?;
            decided.push(award);
        }

        info!("Finalized {} awards for event {}", decided.len(), event.id);
        self.log_and_audit(
            Some(event.id.as_str()),
            AWARDS_FINALIZED,
            json!({
                "event_id": event.id,
                "winners": decided
                    .iter()
                    .map(|a| json!({ "award_definition_id": a.award_definition_id, "winner_id": a.winner_id }))
                    .collect::<Vec<_>>()
            }),
            Some(finalized_by.id.as_str()),
        )
        .await?;
        Ok(decided)
    }

    pub async fn get_event_awards(&self, event_id: &str, user: &User) -> Result<Vec<Award>, YearoutError> {
        let (event, ritual) = self.load_event(event_id).await?;
        self.require_member(user, &ritual)?;
        self.storage.get_event_awards(&event.id).await
    }

    // AUDIT

    pub async fn get_event_audits(&self, event_id: &str, user: &User) -> Result<Vec<EventAudit>, YearoutError> {
        let (event, ritual) = self.load_event(event_id).await?;
        self.require_event_editor(user, &ritual, &event, "read the audit trail")?;
        self.storage.get_event_audits(&event.id).await
    }

    /// The application log spans every ritual, so only platform admins may read it.
    pub async fn get_app_logs(&self, claims: &Claims) -> Result<Vec<AppLog>, YearoutError> {
        if claims.role != ADMIN_ROLE {
            warn!("User {} with role {} tried to read the application log", claims.sub, claims.role);
            return Err(YearoutError::NotAuthorized(
                claims.sub.clone(),
                "only admins can read the application log".to_string(),
            ));
        }
        self.logging.get_logs().await
    }
}
