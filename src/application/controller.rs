//! Session controller.
//!
//! Owns the in-memory trip list and the currently open trip, applies
//! mutations optimistically and pushes results to the trip store.
//!
//! Commit discipline: field edits are optimistic - the in-memory state
//! changes before the upsert resolves, and reverts to the last durable
//! snapshot if the upsert fails. Creation and deletion are confirmed
//! against the store before the list reflects them. Concurrent edits
//! from other devices are not coordinated; the last upsert to reach
//! the store wins.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{watch, RwLock};
use tracing::{info, warn};

use crate::domain::foundation::{
    ActivityId, AuthError, AuthenticatedUser, Credentials, DayId, DocumentId, ExpenseId, TripId,
    UserId, ValidationError,
};
use crate::domain::trip::{
    mutation, Activity, ActivityDraft, DocumentDraft, ExpenseDraft, Trip, TripDraft,
};
use crate::ports::{AuthProvider, Backend, PersistenceError, TripStore};

/// Errors surfaced by controller operations.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("No user is signed in")]
    NotSignedIn,

    #[error("No trip is open")]
    NoOpenTrip,

    #[error("Trip not found: {0}")]
    TripNotFound(TripId),
}

/// The currently open trip together with its last durable snapshot.
#[derive(Debug, Clone)]
struct OpenTrip {
    current: Trip,
    durable: Trip,
}

#[derive(Default)]
struct SessionState {
    user: Option<AuthenticatedUser>,
    trips: Vec<Trip>,
    open: Option<OpenTrip>,
}

/// Stateful controller between the presentation layer and the
/// persistence port. Constructed explicitly at startup with the
/// selected backend.
pub struct SessionController {
    auth: Arc<dyn AuthProvider>,
    store: Arc<dyn TripStore>,
    state: RwLock<SessionState>,
}

impl SessionController {
    /// Creates a controller over the given backend.
    pub fn new(backend: Backend) -> Self {
        Self {
            auth: backend.auth,
            store: backend.trips,
            state: RwLock::new(SessionState::default()),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Session lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Signs in and replaces local state with the user's trip list.
    pub async fn sign_in(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthenticatedUser, ControllerError> {
        let user = self.auth.authenticate(credentials).await?;
        {
            let mut state = self.state.write().await;
            state.user = Some(user.clone());
            state.open = None;
        }
        self.refresh_trips().await?;
        info!(user = %user.id, "signed in");
        Ok(user)
    }

    /// Restores a previously established session, if the provider still
    /// has one, and loads the trip list.
    pub async fn restore_session(&self) -> Result<Option<AuthenticatedUser>, ControllerError> {
        let Some(user) = self.auth.current_user() else {
            return Ok(None);
        };
        {
            let mut state = self.state.write().await;
            state.user = Some(user.clone());
        }
        self.refresh_trips().await?;
        Ok(Some(user))
    }

    /// Signs out and clears all session state.
    pub async fn sign_out(&self) -> Result<(), ControllerError> {
        self.auth.sign_out().await?;
        let mut state = self.state.write().await;
        *state = SessionState::default();
        Ok(())
    }

    /// Subscribes to authentication state changes. The receiver's
    /// current value is the present session state.
    pub fn session_changes(&self) -> watch::Receiver<Option<AuthenticatedUser>> {
        self.auth.subscribe()
    }

    /// Currently signed-in user, if any.
    pub async fn user(&self) -> Option<AuthenticatedUser> {
        self.state.read().await.user.clone()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Trip list
    // ─────────────────────────────────────────────────────────────────────────

    /// Replaces the in-memory trip list with the authoritative list
    /// from the store, reconciling the open trip against it.
    pub async fn refresh_trips(&self) -> Result<(), ControllerError> {
        let owner = self.owner().await?;
        let trips = self.store.list_trips(&owner).await?;

        let mut state = self.state.write().await;
        if let Some(open) = &state.open {
            let id = *open.current.id();
            state.open = trips
                .iter()
                .find(|t| t.id() == &id)
                .map(|t| OpenTrip {
                    current: t.clone(),
                    durable: t.clone(),
                });
        }
        state.trips = trips;
        Ok(())
    }

    /// Snapshot of the trip list.
    pub async fn trips(&self) -> Vec<Trip> {
        self.state.read().await.trips.clone()
    }

    /// Snapshot of the open trip.
    pub async fn open_trip(&self) -> Option<Trip> {
        self.state
            .read()
            .await
            .open
            .as_ref()
            .map(|o| o.current.clone())
    }

    /// Opens a trip from the list for editing.
    pub async fn open(&self, id: &TripId) -> Result<Trip, ControllerError> {
        let mut state = self.state.write().await;
        let trip = state
            .trips
            .iter()
            .find(|t| t.id() == id)
            .cloned()
            .ok_or(ControllerError::TripNotFound(*id))?;
        state.open = Some(OpenTrip {
            current: trip.clone(),
            durable: trip.clone(),
        });
        Ok(trip)
    }

    /// Closes the open trip without touching persistence.
    pub async fn close(&self) {
        self.state.write().await.open = None;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Trip lifecycle (confirmed writes)
    // ─────────────────────────────────────────────────────────────────────────

    /// Creates a trip: upsert, refresh the list, then open the new trip.
    pub async fn create_trip(&self, draft: TripDraft) -> Result<Trip, ControllerError> {
        let owner = self.owner().await?;
        let trip = mutation::apply_trip_fields(None, draft)?;

        self.store.upsert_trip(&trip, &owner).await?;
        self.refresh_trips().await?;

        let mut state = self.state.write().await;
        state.open = Some(OpenTrip {
            current: trip.clone(),
            durable: trip.clone(),
        });
        info!(trip = %trip.id(), "created trip");
        Ok(trip)
    }

    /// Deletes a trip. Deletion is confirmed: the list only reflects it
    /// after the store acknowledged and the list was refreshed.
    pub async fn delete_trip(&self, id: &TripId) -> Result<(), ControllerError> {
        self.store.delete_trip(id).await?;
        {
            let mut state = self.state.write().await;
            if state.open.as_ref().map(|o| o.current.id()) == Some(id) {
                state.open = None;
            }
        }
        self.refresh_trips().await?;
        info!(trip = %id, "deleted trip");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Open-trip mutations (optimistic writes)
    // ─────────────────────────────────────────────────────────────────────────

    /// Updates the open trip's core fields, re-deriving the day list.
    pub async fn update_trip_fields(&self, draft: TripDraft) -> Result<Trip, ControllerError> {
        let current = self.require_open().await?;
        let next = mutation::apply_trip_fields(Some(&current), draft)?;
        self.commit_open(next).await
    }

    pub async fn add_activity(
        &self,
        day_id: &DayId,
        draft: ActivityDraft,
    ) -> Result<Trip, ControllerError> {
        let current = self.require_open().await?;
        let next = mutation::add_activity(&current, day_id, draft)?;
        self.commit_open(next).await
    }

    pub async fn edit_activity(
        &self,
        day_id: &DayId,
        activity: Activity,
    ) -> Result<Trip, ControllerError> {
        let current = self.require_open().await?;
        let next = mutation::edit_activity(&current, day_id, activity)?;
        self.commit_open(next).await
    }

    pub async fn delete_activity(
        &self,
        day_id: &DayId,
        activity_id: &ActivityId,
    ) -> Result<Trip, ControllerError> {
        let current = self.require_open().await?;
        let next = mutation::delete_activity(&current, day_id, activity_id);
        self.commit_open(next).await
    }

    pub async fn add_expense(&self, draft: ExpenseDraft) -> Result<Trip, ControllerError> {
        let current = self.require_open().await?;
        let next = mutation::add_expense(&current, draft)?;
        self.commit_open(next).await
    }

    pub async fn edit_expense(
        &self,
        expense_id: &ExpenseId,
        draft: ExpenseDraft,
    ) -> Result<Trip, ControllerError> {
        let current = self.require_open().await?;
        let next = mutation::edit_expense(&current, expense_id, draft)?;
        self.commit_open(next).await
    }

    pub async fn delete_expense(&self, expense_id: &ExpenseId) -> Result<Trip, ControllerError> {
        let current = self.require_open().await?;
        let next = mutation::delete_expense(&current, expense_id);
        self.commit_open(next).await
    }

    pub async fn add_document(&self, draft: DocumentDraft) -> Result<Trip, ControllerError> {
        let current = self.require_open().await?;
        let next = mutation::add_document(&current, draft)?;
        self.commit_open(next).await
    }

    pub async fn edit_document(
        &self,
        document_id: &DocumentId,
        draft: DocumentDraft,
    ) -> Result<Trip, ControllerError> {
        let current = self.require_open().await?;
        let next = mutation::edit_document(&current, document_id, draft)?;
        self.commit_open(next).await
    }

    pub async fn delete_document(&self, document_id: &DocumentId) -> Result<Trip, ControllerError> {
        let current = self.require_open().await?;
        let next = mutation::delete_document(&current, document_id);
        self.commit_open(next).await
    }

    pub async fn toggle_document_check(
        &self,
        document_id: &DocumentId,
    ) -> Result<Trip, ControllerError> {
        let current = self.require_open().await?;
        let next = mutation::toggle_document_check(&current, document_id);
        self.commit_open(next).await
    }

    pub async fn update_notes(&self, notes: impl Into<String>) -> Result<Trip, ControllerError> {
        let current = self.require_open().await?;
        let next = mutation::update_notes(&current, notes);
        self.commit_open(next).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    async fn owner(&self) -> Result<UserId, ControllerError> {
        self.state
            .read()
            .await
            .user
            .as_ref()
            .map(|u| u.id.clone())
            .ok_or(ControllerError::NotSignedIn)
    }

    async fn require_open(&self) -> Result<Trip, ControllerError> {
        self.state
            .read()
            .await
            .open
            .as_ref()
            .map(|o| o.current.clone())
            .ok_or(ControllerError::NoOpenTrip)
    }

    /// Staged commit: apply the new value to memory first, then upsert.
    /// On failure, memory reverts to the last durable snapshot so the
    /// view never diverges permanently from storage.
    async fn commit_open(&self, next: Trip) -> Result<Trip, ControllerError> {
        let owner = self.owner().await?;

        // Optimistic: visible before persistence completes.
        {
            let mut state = self.state.write().await;
            let open = state.open.as_mut().ok_or(ControllerError::NoOpenTrip)?;
            open.current = next.clone();
            replace_in_list(&mut state.trips, &next);
        }

        match self.store.upsert_trip(&next, &owner).await {
            Ok(()) => {
                let mut state = self.state.write().await;
                if let Some(open) = state.open.as_mut() {
                    open.durable = next.clone();
                }
                Ok(next)
            }
            Err(e) => {
                warn!(trip = %next.id(), error = %e, "upsert failed, reverting to durable state");
                let mut state = self.state.write().await;
                if let Some(open) = state.open.as_mut() {
                    let durable = open.durable.clone();
                    open.current = durable.clone();
                    replace_in_list(&mut state.trips, &durable);
                }
                Err(e.into())
            }
        }
    }
}

fn replace_in_list(trips: &mut [Trip], next: &Trip) {
    if let Some(slot) = trips.iter_mut().find(|t| t.id() == next.id()) {
        *slot = next.clone();
    }
}
