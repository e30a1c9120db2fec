//! Check-in location validation state machine.
//!
//! ```text
//! AwaitingEvent -> NoLocationRequired
//!               -> AwaitingPosition -> PositionDenied -> AwaitingPosition (retry)
//!                                   -> Validating -> Valid | Invalid
//! Valid | Invalid -> Validating (new position or new location record)
//! ```
//!
//! The session is synchronous and owns no collaborators. Position requests are split into
//! `begin_position_request` and `position_acquired`/`position_failed` so any driver can sit
//! in between. Results carry a ticket, and a ticket from an earlier event load is ignored.

use unichamada_primitives::{
    validate_against, AttendanceSubmission, Coordinate, EventRecord, LocationRecord,
    ValidationVerdict,
};

use crate::errors::{CheckInError, PositionError};

#[derive(Clone, PartialEq, Debug, Default)]
pub enum LocationCheck {
    #[default]
    AwaitingEvent,
    /// Event has no location; the location dimension never blocks submission.
    NoLocationRequired,
    AwaitingPosition,
    PositionDenied(String),
    /// Position captured, verdict not yet computed (location record still loading).
    Validating,
    Valid {
        distance: f64,
    },
    Invalid {
        distance: f64,
        radius: f64,
    },
}

impl LocationCheck {
    pub const fn allows_submission(&self) -> bool {
        matches!(self, Self::NoLocationRequired | Self::Valid { .. })
    }
}

/// Proof that a position request was issued for the current event load.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PositionTicket {
    generation: u64,
}

#[derive(Clone, Debug, Default)]
pub struct CheckInSession {
    event: Option<EventRecord>,
    location: Option<LocationRecord>,
    position: Option<Coordinate>,
    verdict: Option<ValidationVerdict>,
    last_error: Option<PositionError>,
    state: LocationCheck,
    generation: u64,
    in_flight: bool,
}

impl CheckInSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LocationCheck {
        &self.state
    }

    pub fn event(&self) -> Option<&EventRecord> {
        self.event.as_ref()
    }

    pub fn location(&self) -> Option<&LocationRecord> {
        self.location.as_ref()
    }

    pub fn position(&self) -> Option<Coordinate> {
        self.position
    }

    pub fn verdict(&self) -> Option<&ValidationVerdict> {
        self.verdict.as_ref()
    }

    pub fn last_error(&self) -> Option<&PositionError> {
        self.last_error.as_ref()
    }

    pub const fn is_request_in_flight(&self) -> bool {
        self.in_flight
    }

    pub const fn can_submit(&self) -> bool {
        self.state.allows_submission()
    }

    /// Starts over for `event`, dropping every input of the previous one.
    pub fn load_event(&mut self, event: EventRecord) -> &LocationCheck {
        self.generation = self.generation.wrapping_add(1);
        self.location = None;
        self.position = None;
        self.verdict = None;
        self.last_error = None;
        self.in_flight = false;

        let next = if event.requires_location() {
            LocationCheck::AwaitingPosition
        } else {
            LocationCheck::NoLocationRequired
        };
        log::info!(
            "Check-in event {} loaded, location required: {}",
            event.id,
            event.requires_location()
        );
        self.event = Some(event);
        self.transition(next);
        &self.state
    }

    /// Installs (or replaces) the event's location record and revalidates any held position.
    pub fn load_location(
        &mut self,
        location: LocationRecord,
    ) -> Result<&LocationCheck, CheckInError> {
        let event = self.event.as_ref().ok_or(CheckInError::EventNotLoaded)?;
        if event.location_id != Some(location.id) {
            return Err(CheckInError::LocationMismatch {
                expected: event.location_id,
                got: location.id,
            });
        }

        self.location = Some(location);
        if self.position.is_some() {
            self.transition(LocationCheck::Validating);
            self.revalidate();
        }
        Ok(&self.state)
    }

    /// Whether the driver should issue the automatic first request: location data is in,
    /// nothing captured yet, nothing in flight, and no earlier failure awaiting a user retry.
    pub fn should_request_position(&self) -> bool {
        self.state == LocationCheck::AwaitingPosition
            && self.location.is_some()
            && self.position.is_none()
            && !self.in_flight
    }

    /// Marks a request as issued. `None` when no request is needed or one is already out.
    pub fn begin_position_request(&mut self) -> Option<PositionTicket> {
        match self.state {
            LocationCheck::AwaitingEvent | LocationCheck::NoLocationRequired => return None,
            _ => {}
        }
        if self.in_flight {
            log::debug!("Position request already in flight");
            return None;
        }

        self.in_flight = true;
        if matches!(self.state, LocationCheck::PositionDenied(_)) {
            self.transition(LocationCheck::AwaitingPosition);
        }
        log::info!("Requesting device position");
        Some(PositionTicket {
            generation: self.generation,
        })
    }

    pub fn position_acquired(
        &mut self,
        ticket: PositionTicket,
        position: Coordinate,
    ) -> &LocationCheck {
        if !self.accept_ticket(ticket) {
            return &self.state;
        }

        if !position.is_within_bounds() {
            log::warn!("Device reported out-of-range position {}", position);
        }
        log::info!("Device position acquired: {}", position);

        self.position = Some(position);
        self.last_error = None;
        self.transition(LocationCheck::Validating);
        self.revalidate();
        &self.state
    }

    pub fn position_failed(
        &mut self,
        ticket: PositionTicket,
        error: PositionError,
    ) -> &LocationCheck {
        if !self.accept_ticket(ticket) {
            return &self.state;
        }

        log::warn!("Device position unavailable: {}", error);
        self.position = None;
        self.verdict = None;
        self.transition(LocationCheck::PositionDenied(error.reason()));
        self.last_error = Some(error);
        &self.state
    }

    /// Local gate run before any network call. Builds the submission when the location
    /// dimension allows it.
    pub fn authorize(
        &self,
        matricula: &str,
        submitted_at: u64,
    ) -> Result<AttendanceSubmission, CheckInError> {
        let event = self.event.as_ref().ok_or(CheckInError::EventNotLoaded)?;

        match &self.state {
            LocationCheck::NoLocationRequired | LocationCheck::Valid { .. } => {}
            LocationCheck::AwaitingEvent => return Err(CheckInError::EventNotLoaded),
            LocationCheck::AwaitingPosition | LocationCheck::PositionDenied(_) => {
                return Err(CheckInError::PositionNotCaptured)
            }
            LocationCheck::Validating => return Err(CheckInError::LocationPending),
            LocationCheck::Invalid { distance, radius } => {
                return Err(CheckInError::OutOfRange {
                    distance: *distance,
                    radius: *radius,
                })
            }
        }

        if matricula.trim().is_empty() {
            return Err(CheckInError::MissingMatricula);
        }

        Ok(AttendanceSubmission::new(event.id, matricula, submitted_at))
    }

    fn accept_ticket(&mut self, ticket: PositionTicket) -> bool {
        if ticket.generation != self.generation || !self.in_flight {
            log::debug!(
                "Discarding stale position result (ticket {}, current {})",
                ticket.generation,
                self.generation
            );
            return false;
        }
        self.in_flight = false;
        true
    }

    fn revalidate(&mut self) {
        let (Some(position), Some(location)) = (self.position, self.location.as_ref()) else {
            return;
        };

        let verdict = validate_against(&position, location);
        log::info!("{}", verdict.message);

        let next = if verdict.is_valid {
            LocationCheck::Valid {
                distance: verdict.distance,
            }
        } else {
            LocationCheck::Invalid {
                distance: verdict.distance,
                radius: verdict.radius,
            }
        };
        self.verdict = Some(verdict);
        self.transition(next);
    }

    fn transition(&mut self, next: LocationCheck) {
        log::debug!("Check-in state {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
