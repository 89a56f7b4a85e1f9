//! Construction-time checks shared by every factory

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::entity_id::EntityKind;
use crate::snak::Snak;
use crate::statement::Statement;
use crate::value::{Decimal, MonolingualTextValue};

/// Largest month number
pub const MAX_MONTH: u8 = 12;

/// Largest day of month
pub const MAX_DAY: u8 = 31;

/// Largest hour
pub const MAX_HOUR: u8 = 23;

/// Largest minute
pub const MAX_MINUTE: u8 = 59;

/// Largest second (leap seconds allowed)
pub const MAX_SECOND: u8 = 60;

/// Largest absolute latitude in degrees
pub const MAX_LATITUDE: f64 = 90.0;

/// Largest absolute longitude in degrees
pub const MAX_LONGITUDE: f64 = 360.0;

/// Largest coordinate precision in degrees
pub const MAX_COORDINATE_PRECISION: f64 = 360.0;

/// Validation error type
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    MalformedEntityId { kind: EntityKind, id: String },
    UnknownEntityIdShape(String),
    EmptySiteIri,
    EmptyEntityType,
    EmptyDatatypeIri,
    EmptyLanguageCode,
    EmptyIri { field: &'static str },
    UnknownTimePrecision(u8),
    TimeFieldOutOfRange { field: &'static str, value: u8, max: u8 },
    LatitudeOutOfRange(f64),
    LongitudeOutOfRange(f64),
    CoordinatePrecisionOutOfRange(f64),
    IncompleteQuantityBounds,
    QuantityBoundsOutOfOrder { lower: String, numeric: String, upper: String },
    EmptySnakGroup,
    MixedSnakGroupProperties { expected: String, found: String },
    EmptyStatementGroup,
    MixedStatementGroupProperties { expected: String, found: String },
    MixedStatementGroupSubjects { expected: String, found: String },
    DuplicateLanguage { field: &'static str, language: String },
    EmptySiteKey,
    DuplicateSiteKey(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedEntityId { kind, id } => {
                write!(f, "Malformed {} id: {:?}", kind, id)
            }
            Self::UnknownEntityIdShape(id) => {
                write!(f, "Id {:?} does not match any known entity kind", id)
            }
            Self::EmptySiteIri => write!(f, "Site IRI cannot be empty"),
            Self::EmptyEntityType => write!(f, "Entity type cannot be empty"),
            Self::EmptyDatatypeIri => write!(f, "Datatype IRI cannot be empty"),
            Self::EmptyLanguageCode => write!(f, "Language code cannot be empty"),
            Self::EmptyIri { field } => write!(f, "{} IRI cannot be empty", field),
            Self::UnknownTimePrecision(p) => {
                write!(f, "Unknown time precision: {} (max 14)", p)
            }
            Self::TimeFieldOutOfRange { field, value, max } => {
                write!(f, "Time {} out of range: {} (max {})", field, value, max)
            }
            Self::LatitudeOutOfRange(lat) => {
                write!(f, "Latitude out of range: {} (max ±{})", lat, MAX_LATITUDE)
            }
            Self::LongitudeOutOfRange(lon) => {
                write!(f, "Longitude out of range: {} (max ±{})", lon, MAX_LONGITUDE)
            }
            Self::CoordinatePrecisionOutOfRange(p) => write!(
                f,
                "Coordinate precision out of range: {} (must be in (0, {}])",
                p, MAX_COORDINATE_PRECISION
            ),
            Self::IncompleteQuantityBounds => {
                write!(f, "Quantity bounds must be given together or not at all")
            }
            Self::QuantityBoundsOutOfOrder {
                lower,
                numeric,
                upper,
            } => write!(
                f,
                "Quantity bounds out of order: {} <= {} <= {} does not hold",
                lower, numeric, upper
            ),
            Self::EmptySnakGroup => write!(f, "Snak group cannot be empty"),
            Self::MixedSnakGroupProperties { expected, found } => write!(
                f,
                "Snak group mixes properties: expected {}, found {}",
                expected, found
            ),
            Self::EmptyStatementGroup => write!(f, "Statement group cannot be empty"),
            Self::MixedStatementGroupProperties { expected, found } => write!(
                f,
                "Statement group mixes properties: expected {}, found {}",
                expected, found
            ),
            Self::MixedStatementGroupSubjects { expected, found } => write!(
                f,
                "Statement group mixes subjects: expected {}, found {}",
                expected, found
            ),
            Self::DuplicateLanguage { field, language } => {
                write!(f, "Duplicate {} for language {:?}", field, language)
            }
            Self::EmptySiteKey => write!(f, "Site key cannot be empty"),
            Self::DuplicateSiteKey(key) => write!(f, "Duplicate site link for {:?}", key),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate the shape of an id for the given kind
pub fn validate_entity_id(kind: EntityKind, id: &str) -> Result<(), ValidationError> {
    // Every numeric part must fit a u64 so numeric_id() stays exact.
    let numerals_fit = id
        .split('-')
        .all(|part| part.get(1..).is_some_and(|n| n.parse::<u64>().is_ok()));
    if !kind.matches(id) || !numerals_fit {
        return Err(ValidationError::MalformedEntityId {
            kind,
            id: id.to_string(),
        });
    }
    Ok(())
}

/// Validate site IRI
pub fn validate_site_iri(site_iri: &str) -> Result<(), ValidationError> {
    if site_iri.is_empty() {
        return Err(ValidationError::EmptySiteIri);
    }
    Ok(())
}

/// Validate language code
pub fn validate_language_code(language_code: &str) -> Result<(), ValidationError> {
    if language_code.is_empty() {
        return Err(ValidationError::EmptyLanguageCode);
    }
    Ok(())
}

/// Validate datatype IRI
pub fn validate_datatype_iri(iri: &str) -> Result<(), ValidationError> {
    if iri.is_empty() {
        return Err(ValidationError::EmptyDatatypeIri);
    }
    Ok(())
}

/// Validate a calendar model, globe or unit IRI
pub fn validate_iri(field: &'static str, iri: &str) -> Result<(), ValidationError> {
    if iri.is_empty() {
        return Err(ValidationError::EmptyIri { field });
    }
    Ok(())
}

fn check_time_field(field: &'static str, value: u8, max: u8) -> Result<(), ValidationError> {
    if value > max {
        return Err(ValidationError::TimeFieldOutOfRange { field, value, max });
    }
    Ok(())
}

/// Validate the calendar fields of a time value
///
/// Month and day may be 0 for values coarser than a month or a day.
pub fn validate_time_fields(
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
) -> Result<(), ValidationError> {
    check_time_field("month", month, MAX_MONTH)?;
    check_time_field("day", day, MAX_DAY)?;
    check_time_field("hour", hour, MAX_HOUR)?;
    check_time_field("minute", minute, MAX_MINUTE)?;
    check_time_field("second", second, MAX_SECOND)?;
    Ok(())
}

/// Validate coordinates and their precision
pub fn validate_globe_coordinates(
    latitude: f64,
    longitude: f64,
    precision: f64,
) -> Result<(), ValidationError> {
    if !(-MAX_LATITUDE..=MAX_LATITUDE).contains(&latitude) {
        return Err(ValidationError::LatitudeOutOfRange(latitude));
    }
    if !(-MAX_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
        return Err(ValidationError::LongitudeOutOfRange(longitude));
    }
    if !(precision > 0.0 && precision <= MAX_COORDINATE_PRECISION) {
        return Err(ValidationError::CoordinatePrecisionOutOfRange(precision));
    }
    Ok(())
}

/// Validate that bounds are paired and enclose the numeric value
pub fn validate_quantity_bounds(
    numeric: &Decimal,
    lower: Option<&Decimal>,
    upper: Option<&Decimal>,
) -> Result<(), ValidationError> {
    match (lower, upper) {
        (None, None) => Ok(()),
        (Some(lower), Some(upper)) => {
            if lower.numeric_cmp(numeric) == Ordering::Greater
                || numeric.numeric_cmp(upper) == Ordering::Greater
            {
                return Err(ValidationError::QuantityBoundsOutOfOrder {
                    lower: lower.to_string(),
                    numeric: numeric.to_string(),
                    upper: upper.to_string(),
                });
            }
            Ok(())
        }
        _ => Err(ValidationError::IncompleteQuantityBounds),
    }
}

/// Validate that snaks are non-empty and share one property
pub fn validate_snak_group(snaks: &[Snak]) -> Result<(), ValidationError> {
    let first = snaks.first().ok_or(ValidationError::EmptySnakGroup)?;
    let expected = first.property();
    if let Some(other) = snaks.iter().find(|s| s.property() != expected) {
        return Err(ValidationError::MixedSnakGroupProperties {
            expected: expected.to_string(),
            found: other.property().to_string(),
        });
    }
    Ok(())
}

/// Validate that statements are non-empty and share subject and property
pub fn validate_statement_group(statements: &[Statement]) -> Result<(), ValidationError> {
    let first = statements
        .first()
        .ok_or(ValidationError::EmptyStatementGroup)?;
    for statement in &statements[1..] {
        if statement.property() != first.property() {
            return Err(ValidationError::MixedStatementGroupProperties {
                expected: first.property().to_string(),
                found: statement.property().to_string(),
            });
        }
        if statement.subject() != first.subject() {
            return Err(ValidationError::MixedStatementGroupSubjects {
                expected: first.subject().to_string(),
                found: statement.subject().to_string(),
            });
        }
    }
    Ok(())
}

/// Validate that no language occurs twice among `terms`
pub fn validate_unique_languages(
    field: &'static str,
    terms: &[MonolingualTextValue],
) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(terms.len());
    for term in terms {
        if !seen.insert(term.language_code()) {
            return Err(ValidationError::DuplicateLanguage {
                field,
                language: term.language_code().to_string(),
            });
        }
    }
    Ok(())
}

/// Validate site key
pub fn validate_site_key(site_key: &str) -> Result<(), ValidationError> {
    if site_key.is_empty() {
        return Err(ValidationError::EmptySiteKey);
    }
    Ok(())
}
