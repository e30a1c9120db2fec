use unichamada_primitives::{
    meters_to_latitude_degrees, Coordinate, EventId, EventRecord, LocationId, LocationRecord,
};

use crate::mock::{InMemoryBackend, ScriptedPositionProvider};
use crate::{BackendError, CheckInError, CheckInFlow, CheckInSession, LocationCheck, PositionError};

const CAMPUS: Coordinate = Coordinate::new(-8.0631, -34.8711);

fn event_with_location(id: u64, location: u64) -> EventRecord {
    EventRecord {
        id: EventId(id),
        name: "Aula de Redes".into(),
        location_id: Some(LocationId(location)),
    }
}

fn event_without_location(id: u64) -> EventRecord {
    EventRecord {
        id: EventId(id),
        name: "Palestra online".into(),
        location_id: None,
    }
}

fn campus_location(id: u64, radius: f64) -> LocationRecord {
    LocationRecord {
        id: LocationId(id),
        description: "Bloco A - Sala 101".into(),
        latitude: CAMPUS.latitude,
        longitude: CAMPUS.longitude,
        radius,
    }
}

fn north_of_campus(meters: f64) -> Coordinate {
    Coordinate::new(CAMPUS.latitude + meters_to_latitude_degrees(meters), CAMPUS.longitude)
}

fn backend() -> InMemoryBackend {
    InMemoryBackend::new()
        .with_event(event_with_location(1, 10))
        .with_event(event_without_location(2))
        .with_location(campus_location(10, 50.0))
}

// =============================================================================
// Session state machine
// =============================================================================

#[test]
fn new_session_blocks_submission() {
    let session = CheckInSession::new();
    assert_eq!(session.state(), &LocationCheck::AwaitingEvent);
    assert!(!session.can_submit());
    assert_eq!(session.authorize("2024001", 0), Err(CheckInError::EventNotLoaded));
}

#[test]
fn event_without_location_bypasses_validation() {
    let mut session = CheckInSession::new();
    session.load_event(event_without_location(2));

    assert_eq!(session.state(), &LocationCheck::NoLocationRequired);
    assert!(session.can_submit());
    assert!(!session.should_request_position());
    assert!(session.begin_position_request().is_none());

    let submission = session.authorize("2024001", 42).expect("bypass allows submission");
    assert_eq!(submission.event_id, EventId(2));
    assert_eq!(submission.position(), None);
}

#[test]
fn event_with_location_waits_for_location_before_requesting() {
    let mut session = CheckInSession::new();
    session.load_event(event_with_location(1, 10));
    assert_eq!(session.state(), &LocationCheck::AwaitingPosition);
    assert!(!session.should_request_position());

    session
        .load_location(campus_location(10, 50.0))
        .expect("matching location");
    assert!(session.should_request_position());
    assert!(!session.can_submit());
}

#[test]
fn position_inside_radius_is_valid() {
    let mut session = CheckInSession::new();
    session.load_event(event_with_location(1, 10));
    session.load_location(campus_location(10, 50.0)).expect("location");

    let ticket = session.begin_position_request().expect("ticket");
    assert!(session.is_request_in_flight());
    assert!(!session.should_request_position());
    assert!(session.begin_position_request().is_none());

    let state = session.position_acquired(ticket, north_of_campus(20.0)).clone();
    match state {
        LocationCheck::Valid { distance } => assert!((distance - 20.0).abs() < 0.01),
        other => panic!("expected Valid, got {other:?}"),
    }
    assert!(session.can_submit());
    let verdict = session.verdict().expect("verdict");
    assert!(verdict.message.starts_with("Localização validada. Distância: 20.0"));
}

#[test]
fn position_outside_radius_is_invalid_and_rejected_locally() {
    let mut session = CheckInSession::new();
    session.load_event(event_with_location(1, 10));
    session.load_location(campus_location(10, 50.0)).expect("location");

    let ticket = session.begin_position_request().expect("ticket");
    session.position_acquired(ticket, north_of_campus(300.0));

    match session.state() {
        LocationCheck::Invalid { distance, radius } => {
            assert!(*distance > 299.0 && *distance < 301.0);
            assert_eq!(*radius, 50.0);
        }
        other => panic!("expected Invalid, got {other:?}"),
    }
    assert!(!session.can_submit());
    assert!(matches!(
        session.authorize("2024001", 0),
        Err(CheckInError::OutOfRange { radius, .. }) if radius == 50.0
    ));
}

#[test]
fn denied_position_blocks_until_explicit_retry() {
    let mut session = CheckInSession::new();
    session.load_event(event_with_location(1, 10));
    session.load_location(campus_location(10, 50.0)).expect("location");

    let ticket = session.begin_position_request().expect("ticket");
    session.position_failed(
        ticket,
        PositionError::PermissionDenied("User denied Geolocation".into()),
    );

    assert_eq!(
        session.state(),
        &LocationCheck::PositionDenied("User denied Geolocation".into())
    );
    assert!(!session.can_submit());
    assert!(!session.should_request_position());
    assert_eq!(
        session.authorize("2024001", 0),
        Err(CheckInError::PositionNotCaptured)
    );

    let retry = session.begin_position_request().expect("user retry");
    assert_eq!(session.state(), &LocationCheck::AwaitingPosition);
    session.position_acquired(retry, CAMPUS);
    assert!(session.can_submit());
    assert!(session.last_error().is_none());
}

#[test]
fn position_before_location_record_stays_validating() {
    let mut session = CheckInSession::new();
    session.load_event(event_with_location(1, 10));

    let ticket = session.begin_position_request().expect("ticket");
    session.position_acquired(ticket, CAMPUS);
    assert_eq!(session.state(), &LocationCheck::Validating);
    assert_eq!(session.authorize("2024001", 0), Err(CheckInError::LocationPending));

    session.load_location(campus_location(10, 50.0)).expect("location");
    assert!(matches!(session.state(), LocationCheck::Valid { .. }));
}

#[test]
fn location_change_revalidates_held_position() {
    let mut session = CheckInSession::new();
    session.load_event(event_with_location(1, 10));
    session.load_location(campus_location(10, 50.0)).expect("location");
    let ticket = session.begin_position_request().expect("ticket");
    session.position_acquired(ticket, north_of_campus(120.0));
    assert!(matches!(session.state(), LocationCheck::Invalid { .. }));

    session.load_location(campus_location(10, 200.0)).expect("wider radius");
    assert!(matches!(session.state(), LocationCheck::Valid { .. }));
    assert_eq!(session.verdict().map(|v| v.radius), Some(200.0));
}

#[test]
fn new_position_supersedes_previous_verdict() {
    let mut session = CheckInSession::new();
    session.load_event(event_with_location(1, 10));
    session.load_location(campus_location(10, 50.0)).expect("location");

    let first = session.begin_position_request().expect("ticket");
    session.position_acquired(first, CAMPUS);
    assert!(session.can_submit());

    let second = session.begin_position_request().expect("re-request");
    assert!(session.can_submit());
    session.position_acquired(second, north_of_campus(500.0));
    assert!(!session.can_submit());
    assert_eq!(session.position(), Some(north_of_campus(500.0)));
}

#[test]
fn mismatched_location_is_refused() {
    let mut session = CheckInSession::new();
    session.load_event(event_with_location(1, 10));
    assert_eq!(
        session.load_location(campus_location(11, 50.0)).map(|s| s.clone()),
        Err(CheckInError::LocationMismatch {
            expected: Some(LocationId(10)),
            got: LocationId(11),
        })
    );

    session.load_event(event_without_location(2));
    assert!(matches!(
        session.load_location(campus_location(10, 50.0)),
        Err(CheckInError::LocationMismatch { expected: None, .. })
    ));
}

#[test]
fn stale_ticket_after_event_reload_is_ignored() {
    let mut session = CheckInSession::new();
    session.load_event(event_with_location(1, 10));
    session.load_location(campus_location(10, 50.0)).expect("location");
    let stale = session.begin_position_request().expect("ticket");

    session.load_event(event_with_location(1, 10));
    session.position_acquired(stale, CAMPUS);

    assert_eq!(session.state(), &LocationCheck::AwaitingPosition);
    assert_eq!(session.position(), None);
    assert!(!session.is_request_in_flight());
}

#[test]
fn blank_matricula_is_rejected_after_location_passes() {
    let mut session = CheckInSession::new();
    session.load_event(event_without_location(2));
    assert_eq!(session.authorize("  ", 0), Err(CheckInError::MissingMatricula));
}

// =============================================================================
// Orchestrator
// =============================================================================

#[tokio::test]
async fn open_without_location_issues_no_position_request() {
    let provider = ScriptedPositionProvider::always(CAMPUS);
    let mut flow = CheckInFlow::new(provider, backend());

    let state = flow.open(EventId(2)).await.expect("open");
    assert_eq!(state, LocationCheck::NoLocationRequired);

    let receipt = flow.submit("2024001").await.expect("submit");
    assert_eq!(receipt.event_id, EventId(2));

    let (provider, backend, _) = flow.into_parts();
    assert_eq!(provider.calls(), 0);
    assert_eq!(backend.submit_calls(), 1);
}

#[tokio::test]
async fn open_requests_position_automatically_and_validates() {
    let provider = ScriptedPositionProvider::always(north_of_campus(10.0));
    let mut flow = CheckInFlow::new(provider, backend());

    let state = flow.open(EventId(1)).await.expect("open");
    assert!(matches!(state, LocationCheck::Valid { .. }));

    let receipt = flow.submit(" 2024001 ").await.expect("submit");
    assert_eq!(receipt.matricula, "2024001");

    let submissions = flow.backend().submissions().await;
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].position(), None);
}

#[tokio::test]
async fn denied_position_then_user_retry() {
    let provider = ScriptedPositionProvider::new(vec![Err(PositionError::PermissionDenied(
        "User denied Geolocation".into(),
    ))])
    .with_fallback(Ok(CAMPUS));
    let mut flow = CheckInFlow::new(provider, backend());

    let state = flow.open(EventId(1)).await.expect("position failure is not an error");
    assert_eq!(
        state,
        LocationCheck::PositionDenied("User denied Geolocation".into())
    );

    let err = flow.submit("2024001").await.expect_err("blocked");
    assert_eq!(err, CheckInError::PositionNotCaptured);
    assert!(err.is_user_correctable());
    assert_eq!(flow.backend().submit_calls(), 0);

    let state = flow.request_position().await;
    assert!(matches!(state, LocationCheck::Valid { .. }));
    assert!(flow.submit("2024001").await.is_ok());
}

#[tokio::test]
async fn persistent_denial_keeps_submission_blocked() {
    let mut flow = CheckInFlow::new(
        ScriptedPositionProvider::denied("User denied Geolocation"),
        backend(),
    );

    flow.open(EventId(1)).await.expect("open");
    let state = flow.request_position().await;
    assert_eq!(
        state,
        LocationCheck::PositionDenied("User denied Geolocation".into())
    );
    assert_eq!(
        flow.submit("2024001").await.expect_err("blocked"),
        CheckInError::PositionNotCaptured
    );

    let (provider, backend, _) = flow.into_parts();
    assert_eq!(provider.calls(), 2);
    assert_eq!(backend.submit_calls(), 0);
}

#[tokio::test]
async fn out_of_range_submission_never_reaches_backend() {
    let provider = ScriptedPositionProvider::always(north_of_campus(1_000.0));
    let mut flow = CheckInFlow::new(provider, backend());
    flow.open(EventId(1)).await.expect("open");

    let err = flow.submit("2024001").await.expect_err("out of range");
    assert!(matches!(err, CheckInError::OutOfRange { .. }));
    assert_eq!(flow.backend().submit_calls(), 0);
}

#[tokio::test]
async fn missing_event_propagates_backend_error() {
    let provider = ScriptedPositionProvider::always(CAMPUS);
    let mut flow = CheckInFlow::new(provider, backend());

    let err = flow.open(EventId(99)).await.expect_err("unknown event");
    assert_eq!(err, CheckInError::Backend(BackendError::EventNotFound(EventId(99))));
    assert!(!err.is_user_correctable());
}

#[tokio::test]
async fn missing_location_leaves_submission_blocked() {
    let backend = InMemoryBackend::new().with_event(event_with_location(1, 77));
    let provider = ScriptedPositionProvider::always(CAMPUS);
    let mut flow = CheckInFlow::new(provider, backend);

    let err = flow.open(EventId(1)).await.expect_err("location missing");
    assert_eq!(
        err,
        CheckInError::Backend(BackendError::LocationNotFound(LocationId(77)))
    );
    assert!(!flow.session().can_submit());
}

#[tokio::test]
async fn reload_location_revalidates() {
    let provider = ScriptedPositionProvider::always(north_of_campus(120.0));
    let mut flow = CheckInFlow::new(provider, backend());
    flow.open(EventId(1)).await.expect("open");
    assert!(matches!(flow.session().state(), LocationCheck::Invalid { .. }));

    flow.backend()
        .replace_location(campus_location(10, 150.0))
        .await;
    let state = flow.reload_location().await.expect("reload");
    assert!(matches!(state, LocationCheck::Valid { .. }));
    assert!(flow.submit("2024001").await.is_ok());
}

#[tokio::test]
async fn reload_location_requires_loaded_event() {
    let provider = ScriptedPositionProvider::always(CAMPUS);
    let mut flow = CheckInFlow::new(provider, backend());
    assert_eq!(
        flow.reload_location().await,
        Err(CheckInError::EventNotLoaded)
    );
}
