//! Holder for the current profile snapshot.
//!
//! A session owns at most one [`Profile`]. Starting an upload discards it and
//! hands out an [`UploadTicket`]; only the response for the newest ticket is
//! accepted, so a slow response to a superseded upload can never overwrite a
//! newer one.

use std::sync::Arc;

use crate::consistency::check_profile;
use crate::error::Result;
use crate::profile::Profile;
use crate::view::ProfileView;

/// Identifies one upload within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UploadTicket(u64);

impl UploadTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Where the session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No upload has been made, or the last one failed.
    Empty,
    /// An upload is in flight; no profile is held.
    Uploading(UploadTicket),
    /// A profile is held.
    Ready,
}

/// Outcome of handing a response to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Accepted,
    /// The ticket was superseded by a newer upload; the response was dropped.
    Stale,
}

#[derive(Debug, Default)]
pub struct ProfileSession {
    current: Option<Arc<Profile>>,
    latest: u64,
    in_flight: Option<UploadTicket>,
}

impl ProfileSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new upload, dropping the current profile and any older ticket.
    pub fn begin_upload(&mut self) -> UploadTicket {
        self.latest += 1;
        let ticket = UploadTicket(self.latest);
        self.current = None;
        self.in_flight = Some(ticket);
        tracing::debug!(generation = ticket.0, "Upload started");
        ticket
    }

    /// Hands the backend's answer for `ticket` to the session.
    ///
    /// An `Err` for the newest ticket leaves the session empty; the error
    /// itself stays with the caller.
    pub fn complete(&mut self, ticket: UploadTicket, outcome: Result<Profile>) -> Completion {
        if self.in_flight != Some(ticket) {
            tracing::debug!(
                generation = ticket.0,
                latest = self.latest,
                "Dropping response for superseded upload"
            );
            return Completion::Stale;
        }
        self.in_flight = None;

        match outcome {
            Ok(profile) => {
                for issue in check_profile(&profile) {
                    tracing::warn!(generation = ticket.0, %issue, "Inconsistent profile");
                }
                tracing::info!(
                    generation = ticket.0,
                    columns = profile.columns.len(),
                    rows = profile.row_count(),
                    "Profile received"
                );
                self.current = Some(Arc::new(profile));
            }
            Err(err) => {
                tracing::warn!(generation = ticket.0, error = %err, "Upload failed");
                self.current = None;
            }
        }
        Completion::Accepted
    }

    /// Replaces the snapshot directly, e.g. with a profile loaded from disk.
    pub fn replace(&mut self, profile: Profile) {
        self.in_flight = None;
        self.current = Some(Arc::new(profile));
    }

    pub fn clear(&mut self) {
        self.in_flight = None;
        self.current = None;
    }

    /// The current snapshot; `None` while uploading or after a failure.
    pub fn current(&self) -> Option<Arc<Profile>> {
        self.current.clone()
    }

    pub fn state(&self) -> SessionState {
        match (self.in_flight, &self.current) {
            (Some(ticket), _) => SessionState::Uploading(ticket),
            (None, Some(_)) => SessionState::Ready,
            (None, None) => SessionState::Empty,
        }
    }

    /// Builds every derived view from the current snapshot.
    pub fn view(&self) -> ProfileView {
        ProfileView::build(self.current.as_deref())
    }
}
