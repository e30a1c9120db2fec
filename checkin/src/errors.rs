//! Check-in error taxonomy.
//!
//! Every variant is recovered at the orchestration boundary and rendered as user feedback;
//! none of them aborts the flow.

use unichamada_primitives::{EventId, LocationId};

pub const UNSUPPORTED_MESSAGE: &str = "Geolocalização não é suportada pelo seu navegador";

const OUT_OF_RANGE_MESSAGE: &str =
    "Você não está no local do evento. Aproxime-se do local para registrar presença.";

/// Failure of the device position capability.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum PositionError {
    Unsupported,
    PermissionDenied(String),
    Unavailable(String),
    Timeout(String),
}

impl PositionError {
    /// User-facing reason, carried verbatim from the platform where it gives one.
    pub fn reason(&self) -> String {
        match self {
            Self::Unsupported => UNSUPPORTED_MESSAGE.to_string(),
            Self::PermissionDenied(reason) | Self::Unavailable(reason) | Self::Timeout(reason) => {
                reason.clone()
            }
        }
    }
}

impl std::fmt::Display for PositionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

impl std::error::Error for PositionError {}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum BackendError {
    EventNotFound(EventId),
    LocationNotFound(LocationId),
    Rejected(String),
    Unavailable(String),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::EventNotFound(id) => write!(f, "Evento {} não encontrado", id),
            BackendError::LocationNotFound(id) => write!(f, "Localização {} não encontrada", id),
            BackendError::Rejected(msg) => write!(f, "{}", msg),
            BackendError::Unavailable(msg) => write!(f, "Erro ao registrar presença: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}

#[derive(Clone, PartialEq, Debug)]
pub enum CheckInError {
    // Preconditions, rejected locally before any network call
    PositionNotCaptured,
    OutOfRange { distance: f64, radius: f64 },
    LocationPending,
    EventNotLoaded,
    MissingEventId,
    MissingMatricula,

    // Collaborators
    Position(PositionError),
    Backend(BackendError),
    LocationMismatch {
        expected: Option<LocationId>,
        got: LocationId,
    },
}

impl CheckInError {
    /// Whether the person checking in can fix this themselves.
    pub const fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            Self::PositionNotCaptured
                | Self::OutOfRange { .. }
                | Self::LocationPending
                | Self::MissingEventId
                | Self::MissingMatricula
                | Self::Position(_)
        )
    }

    pub const fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::PositionNotCaptured
                | Self::OutOfRange { .. }
                | Self::LocationPending
                | Self::EventNotLoaded
                | Self::MissingEventId
                | Self::MissingMatricula
        )
    }
}

impl std::fmt::Display for CheckInError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PositionNotCaptured => write!(
                f,
                "É necessário capturar sua localização antes de registrar presença"
            ),
            Self::OutOfRange { .. } => f.write_str(OUT_OF_RANGE_MESSAGE),
            Self::LocationPending => write!(f, "Aguardando os dados da localização do evento"),
            Self::EventNotLoaded => write!(f, "Evento ainda não carregado"),
            Self::MissingEventId => write!(f, "ID do evento é obrigatório"),
            Self::MissingMatricula => write!(f, "Matrícula é obrigatória"),
            Self::Position(err) => write!(f, "Erro: {}", err),
            Self::Backend(err) => write!(f, "{}", err),
            Self::LocationMismatch { expected, got } => match expected {
                Some(expected) => write!(
                    f,
                    "Localização {} recebida, mas o evento usa a localização {}",
                    got, expected
                ),
                None => write!(f, "Localização {} recebida para um evento sem local", got),
            },
        }
    }
}

impl std::error::Error for CheckInError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Position(err) => Some(err),
            Self::Backend(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PositionError> for CheckInError {
    fn from(err: PositionError) -> Self {
        Self::Position(err)
    }
}

impl From<BackendError> for CheckInError {
    fn from(err: BackendError) -> Self {
        Self::Backend(err)
    }
}
