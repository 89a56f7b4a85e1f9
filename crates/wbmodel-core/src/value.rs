//! Value types that can appear as the object of a snak

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops;
use std::str::FromStr;
use std::sync::Arc;

use bigdecimal::BigDecimal;
use serde::{Serialize, Serializer};

use crate::entity_id::{
    EntityIdValue, FormIdValue, ItemIdValue, LexemeIdValue, MediaInfoIdValue, PropertyIdValue,
    SenseIdValue,
};
use crate::validation::ValidationError;

/// Proleptic Gregorian calendar
pub const CM_GREGORIAN_PRO: &str = "http://www.wikidata.org/entity/Q1985727";
/// Proleptic Julian calendar
pub const CM_JULIAN_PRO: &str = "http://www.wikidata.org/entity/Q1985786";

/// The Earth, the default globe for coordinates
pub const GLOBE_EARTH: &str = "http://www.wikidata.org/entity/Q2";
/// The Moon
pub const GLOBE_MOON: &str = "http://www.wikidata.org/entity/Q405";

/// Coordinate precision of one degree
pub const PREC_DEGREE: f64 = 1.0;
/// Coordinate precision of one arc minute
pub const PREC_ARCMINUTE: f64 = 1.0 / 60.0;
/// Coordinate precision of one arc second
pub const PREC_ARCSECOND: f64 = 1.0 / 3600.0;
/// Coordinate precision of 1/1000 of a degree
pub const PREC_MILLI_DEGREE: f64 = 0.001;

pub const DT_ITEM: &str = "http://wikiba.se/ontology#WikibaseItem";
pub const DT_PROPERTY: &str = "http://wikiba.se/ontology#WikibaseProperty";
pub const DT_LEXEME: &str = "http://wikiba.se/ontology#WikibaseLexeme";
pub const DT_FORM: &str = "http://wikiba.se/ontology#WikibaseForm";
pub const DT_SENSE: &str = "http://wikiba.se/ontology#WikibaseSense";
pub const DT_MEDIA_INFO: &str = "http://wikiba.se/ontology#WikibaseMediaInfo";
pub const DT_STRING: &str = "http://wikiba.se/ontology#String";
pub const DT_EXTERNAL_ID: &str = "http://wikiba.se/ontology#ExternalId";
pub const DT_URL: &str = "http://wikiba.se/ontology#Url";
pub const DT_COMMONS_MEDIA: &str = "http://wikiba.se/ontology#CommonsMedia";
pub const DT_TIME: &str = "http://wikiba.se/ontology#Time";
pub const DT_QUANTITY: &str = "http://wikiba.se/ontology#Quantity";
pub const DT_GLOBE_COORDINATES: &str = "http://wikiba.se/ontology#GlobeCoordinate";
pub const DT_MONOLINGUAL_TEXT: &str = "http://wikiba.se/ontology#Monolingualtext";
pub const DT_MATH: &str = "http://wikiba.se/ontology#Math";
pub const DT_GEO_SHAPE: &str = "http://wikiba.se/ontology#GeoShape";
pub const DT_TABULAR_DATA: &str = "http://wikiba.se/ontology#TabularData";
pub const DT_MUSICAL_NOTATION: &str = "http://wikiba.se/ontology#MusicalNotation";

// ─────────────────────────────────────────────────────────────────────────────
// Datatype
// ─────────────────────────────────────────────────────────────────────────────

/// Identifies the kind of value a property accepts
///
/// The set of datatypes is open: any IRI is accepted, the `DT_*` constants
/// name the well-known ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DatatypeIdValue {
    iri: Arc<str>,
}

impl DatatypeIdValue {
    pub(crate) fn new(iri: Arc<str>) -> Self {
        Self { iri }
    }

    pub fn iri(&self) -> &str {
        &self.iri
    }
}

impl fmt::Display for DatatypeIdValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.iri)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Time
// ─────────────────────────────────────────────────────────────────────────────

/// Precision of a point in time, from a billion years down to a second
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(u8)]
pub enum TimePrecision {
    Gigayear = 0,
    HundredMegayears = 1,
    TenMegayears = 2,
    Megayear = 3,
    HundredKiloyears = 4,
    TenKiloyears = 5,
    Millennium = 6,
    Century = 7,
    Decade = 8,
    Year = 9,
    Month = 10,
    Day = 11,
    Hour = 12,
    Minute = 13,
    Second = 14,
}

impl TimePrecision {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for TimePrecision {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Gigayear,
            1 => Self::HundredMegayears,
            2 => Self::TenMegayears,
            3 => Self::Megayear,
            4 => Self::HundredKiloyears,
            5 => Self::TenKiloyears,
            6 => Self::Millennium,
            7 => Self::Century,
            8 => Self::Decade,
            9 => Self::Year,
            10 => Self::Month,
            11 => Self::Day,
            12 => Self::Hour,
            13 => Self::Minute,
            14 => Self::Second,
            other => return Err(ValidationError::UnknownTimePrecision(other)),
        })
    }
}

/// A point in time with precision, tolerance and calendar model
///
/// Year 0 is 1 BCE. Fields finer than the precision are conventionally zero
/// but this is not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TimeValue {
    year: i64,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    precision: TimePrecision,
    before_tolerance: u32,
    after_tolerance: u32,
    timezone_offset: i32,
    calendar_model: Arc<str>,
}

impl TimeValue {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        year: i64,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        precision: TimePrecision,
        before_tolerance: u32,
        after_tolerance: u32,
        timezone_offset: i32,
        calendar_model: Arc<str>,
    ) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            precision,
            before_tolerance,
            after_tolerance,
            timezone_offset,
            calendar_model,
        }
    }

    pub fn year(&self) -> i64 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    pub fn precision(&self) -> TimePrecision {
        self.precision
    }

    /// Tolerance before the given time, in units of the precision
    pub fn before_tolerance(&self) -> u32 {
        self.before_tolerance
    }

    /// Tolerance after the given time, in units of the precision
    pub fn after_tolerance(&self) -> u32 {
        self.after_tolerance
    }

    /// Offset from UTC in minutes
    pub fn timezone_offset(&self) -> i32 {
        self.timezone_offset
    }

    pub fn calendar_model(&self) -> &str {
        &self.calendar_model
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            if self.year < 0 { '-' } else { '+' },
            self.year.unsigned_abs(),
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Globe coordinates
// ─────────────────────────────────────────────────────────────────────────────

/// A position on a globe, all figures in degrees
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobeCoordinatesValue {
    latitude: f64,
    longitude: f64,
    precision: f64,
    globe: Arc<str>,
}

impl GlobeCoordinatesValue {
    pub(crate) fn new(latitude: f64, longitude: f64, precision: f64, globe: Arc<str>) -> Self {
        Self {
            latitude,
            longitude,
            precision,
            globe,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn precision(&self) -> f64 {
        self.precision
    }

    /// IRI of the globe, e.g. [`GLOBE_EARTH`]
    pub fn globe(&self) -> &str {
        &self.globe
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Strings
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StringValue {
    text: String,
}

impl StringValue {
    pub(crate) fn new(text: String) -> Self {
        Self { text }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A text in a given language
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MonolingualTextValue {
    text: String,
    language_code: Arc<str>,
}

impl MonolingualTextValue {
    pub(crate) fn new(text: String, language_code: Arc<str>) -> Self {
        Self {
            text,
            language_code,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language_code(&self) -> &str {
        &self.language_code
    }
}

impl fmt::Display for MonolingualTextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"@{}", self.text, self.language_code)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Quantity
// ─────────────────────────────────────────────────────────────────────────────

/// Arbitrary precision decimal that keeps its written scale
///
/// Two decimals are equal only if digits and scale agree, so `5.0` and `5`
/// are different values. Use [`Decimal::numeric_cmp`] for numeric order.
#[derive(Debug, Clone)]
pub struct Decimal(BigDecimal);

impl Decimal {
    pub fn numeric_cmp(&self, other: &Decimal) -> Ordering {
        self.0.cmp(&other.0)
    }

    pub fn as_big_decimal(&self) -> &BigDecimal {
        &self.0
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_bigint_and_exponent() == other.0.as_bigint_and_exponent()
    }
}

impl Eq for Decimal {}

impl Hash for Decimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.as_bigint_and_exponent().hash(state);
    }
}

impl FromStr for Decimal {
    type Err = bigdecimal::ParseBigDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Decimal(BigDecimal::from_str(s)?))
    }
}

impl From<BigDecimal> for Decimal {
    fn from(value: BigDecimal) -> Self {
        Decimal(value)
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Decimal(BigDecimal::from(value))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ops::Deref for Decimal {
    type Target = BigDecimal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

/// A numeric amount with optional uncertainty interval and unit
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct QuantityValue {
    numeric_value: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    lower_bound: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    upper_bound: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit: Option<ItemIdValue>,
}

impl QuantityValue {
    pub(crate) fn new(
        numeric_value: Decimal,
        lower_bound: Option<Decimal>,
        upper_bound: Option<Decimal>,
        unit: Option<ItemIdValue>,
    ) -> Self {
        Self {
            numeric_value,
            lower_bound,
            upper_bound,
            unit,
        }
    }

    pub fn numeric_value(&self) -> &Decimal {
        &self.numeric_value
    }

    pub fn lower_bound(&self) -> Option<&Decimal> {
        self.lower_bound.as_ref()
    }

    pub fn upper_bound(&self) -> Option<&Decimal> {
        self.upper_bound.as_ref()
    }

    /// Unit item, `None` for unit-less quantities
    pub fn unit(&self) -> Option<&ItemIdValue> {
        self.unit.as_ref()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Unsupported
// ─────────────────────────────────────────────────────────────────────────────

/// A value of a type unknown to the model
///
/// The payload is opaque: it is never inspected, only carried along. Clones
/// share the same payload, which is how identity survives conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnsupportedValue {
    value_type: String,
    content: Arc<serde_json::Value>,
}

impl UnsupportedValue {
    pub(crate) fn new(value_type: String, content: serde_json::Value) -> Self {
        Self {
            value_type,
            content: Arc::new(content),
        }
    }

    /// Type string announced by the source
    pub fn value_type(&self) -> &str {
        &self.value_type
    }

    pub fn content(&self) -> &serde_json::Value {
        &self.content
    }

    /// Whether both handles refer to the very same payload
    pub fn is_same(&self, other: &UnsupportedValue) -> bool {
        Arc::ptr_eq(&self.content, &other.content)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Value
// ─────────────────────────────────────────────────────────────────────────────

/// The closed set of values
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum Value {
    EntityId(EntityIdValue),
    GlobeCoordinates(GlobeCoordinatesValue),
    MonolingualText(MonolingualTextValue),
    Quantity(QuantityValue),
    String(StringValue),
    Time(TimeValue),
    Unsupported(UnsupportedValue),
}

impl Value {
    /// Dispatch to the visitor method matching this variant
    pub fn accept<R, V>(&self, visitor: &mut V) -> R
    where
        V: ValueVisitor<R> + ?Sized,
    {
        match self {
            Value::EntityId(v) => visitor.visit_entity_id(v),
            Value::GlobeCoordinates(v) => visitor.visit_globe_coordinates(v),
            Value::MonolingualText(v) => visitor.visit_monolingual_text(v),
            Value::Quantity(v) => visitor.visit_quantity(v),
            Value::String(v) => visitor.visit_string(v),
            Value::Time(v) => visitor.visit_time(v),
            Value::Unsupported(v) => visitor.visit_unsupported(v),
        }
    }

    /// Short name of the variant, used in messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::EntityId(_) => "entity-id",
            Value::GlobeCoordinates(_) => "globe-coordinates",
            Value::MonolingualText(_) => "monolingual-text",
            Value::Quantity(_) => "quantity",
            Value::String(_) => "string",
            Value::Time(_) => "time",
            Value::Unsupported(_) => "unsupported",
        }
    }

    pub fn as_entity_id(&self) -> Option<&EntityIdValue> {
        match self {
            Value::EntityId(v) => Some(v),
            _ => None,
        }
    }
}

/// Visitor over the closed set of [`Value`] variants
///
/// Implementations must handle every variant; adding a variant breaks every
/// visitor at compile time.
pub trait ValueVisitor<R> {
    fn visit_entity_id(&mut self, value: &EntityIdValue) -> R;
    fn visit_globe_coordinates(&mut self, value: &GlobeCoordinatesValue) -> R;
    fn visit_monolingual_text(&mut self, value: &MonolingualTextValue) -> R;
    fn visit_quantity(&mut self, value: &QuantityValue) -> R;
    fn visit_string(&mut self, value: &StringValue) -> R;
    fn visit_time(&mut self, value: &TimeValue) -> R;
    fn visit_unsupported(&mut self, value: &UnsupportedValue) -> R;
}

macro_rules! into_value {
    ($($from:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$from> for Value {
                fn from(value: $from) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

into_value! {
    EntityIdValue => EntityId,
    GlobeCoordinatesValue => GlobeCoordinates,
    MonolingualTextValue => MonolingualText,
    QuantityValue => Quantity,
    StringValue => String,
    TimeValue => Time,
    UnsupportedValue => Unsupported,
}

macro_rules! entity_id_into_value {
    ($($from:ty),* $(,)?) => {
        $(
            impl From<$from> for Value {
                fn from(value: $from) -> Self {
                    Value::EntityId(value.into())
                }
            }
        )*
    };
}

entity_id_into_value!(
    ItemIdValue,
    PropertyIdValue,
    LexemeIdValue,
    FormIdValue,
    SenseIdValue,
    MediaInfoIdValue,
);
