//! Input-domain errors raised when records are created, never by the distance math.

use crate::constants::MIN_LOCATION_RADIUS_METERS;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum CoordinateError {
    NotFinite,
    LatitudeOutOfRange(f64),
    LongitudeOutOfRange(f64),
}

impl core::fmt::Display for CoordinateError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CoordinateError::NotFinite => write!(f, "Coordinate is not a finite number"),
            CoordinateError::LatitudeOutOfRange(lat) => {
                write!(f, "Latitude {} outside [-90, 90]", lat)
            }
            CoordinateError::LongitudeOutOfRange(lon) => {
                write!(f, "Longitude {} outside [-180, 180]", lon)
            }
        }
    }
}

impl std::error::Error for CoordinateError {}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum LocationRecordError {
    EmptyDescription,
    CoordinateNotFinite,
    LatitudeOutOfRange(f64),
    LongitudeOutOfRange(f64),
    RadiusNotFinite,
    RadiusBelowMinimum(f64),
}

impl LocationRecordError {
    /// Form field the administrator has to fix.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyDescription => "descricao",
            Self::CoordinateNotFinite | Self::LatitudeOutOfRange(_) => "latitude",
            Self::LongitudeOutOfRange(_) => "longitude",
            Self::RadiusNotFinite | Self::RadiusBelowMinimum(_) => "raio",
        }
    }
}

impl core::fmt::Display for LocationRecordError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Descrição é obrigatória"),
            Self::CoordinateNotFinite => write!(f, "Coordenadas inválidas"),
            Self::LatitudeOutOfRange(lat) => write!(f, "Latitude {} fora de [-90, 90]", lat),
            Self::LongitudeOutOfRange(lon) => write!(f, "Longitude {} fora de [-180, 180]", lon),
            Self::RadiusNotFinite => write!(f, "Raio inválido"),
            Self::RadiusBelowMinimum(radius) => write!(
                f,
                "Raio de {}m abaixo do mínimo de {}m",
                radius, MIN_LOCATION_RADIUS_METERS
            ),
        }
    }
}

impl std::error::Error for LocationRecordError {}
