//! Entity identifier values
//!
//! Every entity of the knowledge base is addressed by a typed id such as
//! `Q42`, `P31`, `L7-F2` or `M9`, scoped to the IRI of the site that issued
//! it. The kinds form a closed set; ids of kinds this model does not know are
//! carried as [`UnsupportedEntityIdValue`] and never interpreted.

use std::fmt;
use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

/// Site IRI of the default knowledge base (Wikidata)
pub const SITE_WIKIDATA: &str = "http://www.wikidata.org/entity/";

/// Site IRI of the default media repository (Wikimedia Commons)
pub const SITE_WIKIMEDIA_COMMONS: &str = "http://commons.wikimedia.org/entity/";

/// Ontology IRI for the type of items
pub const ET_ITEM: &str = "http://www.wikidata.org/ontology#Item";
/// Ontology IRI for the type of properties
pub const ET_PROPERTY: &str = "http://www.wikidata.org/ontology#Property";
/// Ontology IRI for the type of lexemes
pub const ET_LEXEME: &str = "http://www.wikidata.org/ontology#Lexeme";
/// Ontology IRI for the type of lexeme forms
pub const ET_FORM: &str = "http://www.wikidata.org/ontology#Form";
/// Ontology IRI for the type of lexeme senses
pub const ET_SENSE: &str = "http://www.wikidata.org/ontology#Sense";
/// Ontology IRI for the type of media files
pub const ET_MEDIA_INFO: &str = "http://www.wikidata.org/ontology#MediaInfo";

lazy_static! {
    static ref ITEM_ID: Regex = Regex::new(r"^Q[1-9][0-9]*$").expect("item id pattern");
    static ref PROPERTY_ID: Regex = Regex::new(r"^P[1-9][0-9]*$").expect("property id pattern");
    static ref LEXEME_ID: Regex = Regex::new(r"^L[1-9][0-9]*$").expect("lexeme id pattern");
    static ref FORM_ID: Regex =
        Regex::new(r"^L[1-9][0-9]*-F[1-9][0-9]*$").expect("form id pattern");
    static ref SENSE_ID: Regex =
        Regex::new(r"^L[1-9][0-9]*-S[1-9][0-9]*$").expect("sense id pattern");
    static ref MEDIA_INFO_ID: Regex =
        Regex::new(r"^M[1-9][0-9]*$").expect("media info id pattern");
}

/// The closed set of entity kinds known to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Item,
    Property,
    Lexeme,
    Form,
    Sense,
    MediaInfo,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Item,
        EntityKind::Property,
        EntityKind::Lexeme,
        EntityKind::Form,
        EntityKind::Sense,
        EntityKind::MediaInfo,
    ];

    /// Ontology IRI of this kind
    pub fn entity_type(self) -> &'static str {
        match self {
            Self::Item => ET_ITEM,
            Self::Property => ET_PROPERTY,
            Self::Lexeme => ET_LEXEME,
            Self::Form => ET_FORM,
            Self::Sense => ET_SENSE,
            Self::MediaInfo => ET_MEDIA_INFO,
        }
    }

    /// Whether `id` has the shape required for this kind
    pub fn matches(self, id: &str) -> bool {
        match self {
            Self::Item => ITEM_ID.is_match(id),
            Self::Property => PROPERTY_ID.is_match(id),
            Self::Lexeme => LEXEME_ID.is_match(id),
            Self::Form => FORM_ID.is_match(id),
            Self::Sense => SENSE_ID.is_match(id),
            Self::MediaInfo => MEDIA_INFO_ID.is_match(id),
        }
    }

    /// Detect the kind from the shape of an id string
    pub fn detect(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.matches(id))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Item => "item",
            Self::Property => "property",
            Self::Lexeme => "lexeme",
            Self::Form => "form",
            Self::Sense => "sense",
            Self::MediaInfo => "mediainfo",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Numeric part after the leading letter; ids are validated at construction.
fn numeric_suffix(id: &str) -> u64 {
    id.get(1..).and_then(|n| n.parse().ok()).unwrap_or(0)
}

macro_rules! entity_id_type {
    ($(#[$meta:meta])* $name:ident, $variant:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        pub struct $name {
            id: String,
            site_iri: Arc<str>,
        }

        impl $name {
            pub(crate) fn new(id: String, site_iri: Arc<str>) -> Self {
                Self { id, site_iri }
            }

            /// The id string, e.g. `Q42`
            pub fn id(&self) -> &str {
                &self.id
            }

            /// IRI of the site that issued the id
            pub fn site_iri(&self) -> &str {
                &self.site_iri
            }

            /// Full IRI of the entity (site IRI followed by the id)
            pub fn iri(&self) -> String {
                format!("{}{}", self.site_iri, self.id)
            }

            pub fn kind(&self) -> EntityKind {
                EntityKind::$variant
            }

            /// Ontology IRI of the entity type
            pub fn entity_type(&self) -> &'static str {
                EntityKind::$variant.entity_type()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{} ({})", self.id, self.site_iri)
            }
        }

        impl From<$name> for EntityIdValue {
            fn from(value: $name) -> Self {
                EntityIdValue::$variant(value)
            }
        }
    };
}

entity_id_type!(
    /// Id of an item, e.g. `Q42`
    ItemIdValue,
    Item
);
entity_id_type!(
    /// Id of a property, e.g. `P31`
    PropertyIdValue,
    Property
);
entity_id_type!(
    /// Id of a lexeme, e.g. `L7`
    LexemeIdValue,
    Lexeme
);
entity_id_type!(
    /// Id of a lexeme form, e.g. `L7-F2`
    FormIdValue,
    Form
);
entity_id_type!(
    /// Id of a lexeme sense, e.g. `L7-S1`
    SenseIdValue,
    Sense
);
entity_id_type!(
    /// Id of a media file, e.g. `M9`
    MediaInfoIdValue,
    MediaInfo
);

impl ItemIdValue {
    pub fn numeric_id(&self) -> u64 {
        numeric_suffix(&self.id)
    }
}

impl PropertyIdValue {
    pub fn numeric_id(&self) -> u64 {
        numeric_suffix(&self.id)
    }
}

impl LexemeIdValue {
    pub fn numeric_id(&self) -> u64 {
        numeric_suffix(&self.id)
    }
}

impl MediaInfoIdValue {
    pub fn numeric_id(&self) -> u64 {
        numeric_suffix(&self.id)
    }
}

// Splits `L7-F2` into the parent lexeme id and the sub-entity numeral.
fn split_lexeme_part(id: &str) -> (&str, u64) {
    match id.split_once('-') {
        Some((lexeme, part)) => (lexeme, numeric_suffix(part)),
        None => (id, 0),
    }
}

impl FormIdValue {
    /// Id of the lexeme this form belongs to
    pub fn lexeme_id(&self) -> LexemeIdValue {
        let (lexeme, _) = split_lexeme_part(&self.id);
        LexemeIdValue::new(lexeme.to_string(), Arc::clone(&self.site_iri))
    }

    /// Numeral of the form within its lexeme
    pub fn numeric_id(&self) -> u64 {
        split_lexeme_part(&self.id).1
    }
}

impl SenseIdValue {
    /// Id of the lexeme this sense belongs to
    pub fn lexeme_id(&self) -> LexemeIdValue {
        let (lexeme, _) = split_lexeme_part(&self.id);
        LexemeIdValue::new(lexeme.to_string(), Arc::clone(&self.site_iri))
    }

    /// Numeral of the sense within its lexeme
    pub fn numeric_id(&self) -> u64 {
        split_lexeme_part(&self.id).1
    }
}

/// Id of an entity whose kind this model does not know
///
/// The value is kept verbatim so it can be displayed and compared, but the
/// converter refuses to rebuild it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct UnsupportedEntityIdValue {
    entity_type: String,
    id: String,
    site_iri: Arc<str>,
}

impl UnsupportedEntityIdValue {
    pub(crate) fn new(entity_type: String, id: String, site_iri: Arc<str>) -> Self {
        Self {
            entity_type,
            id,
            site_iri,
        }
    }

    /// Entity type as announced by the source, e.g. `entity-schema`
    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn site_iri(&self) -> &str {
        &self.site_iri
    }

    pub fn iri(&self) -> String {
        format!("{}{}", self.site_iri, self.id)
    }
}

/// Any entity id
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "entity-type", rename_all = "lowercase")]
pub enum EntityIdValue {
    Item(ItemIdValue),
    Property(PropertyIdValue),
    Lexeme(LexemeIdValue),
    Form(FormIdValue),
    Sense(SenseIdValue),
    MediaInfo(MediaInfoIdValue),
    Unsupported(UnsupportedEntityIdValue),
}

impl EntityIdValue {
    pub fn id(&self) -> &str {
        match self {
            Self::Item(v) => v.id(),
            Self::Property(v) => v.id(),
            Self::Lexeme(v) => v.id(),
            Self::Form(v) => v.id(),
            Self::Sense(v) => v.id(),
            Self::MediaInfo(v) => v.id(),
            Self::Unsupported(v) => v.id(),
        }
    }

    pub fn site_iri(&self) -> &str {
        match self {
            Self::Item(v) => v.site_iri(),
            Self::Property(v) => v.site_iri(),
            Self::Lexeme(v) => v.site_iri(),
            Self::Form(v) => v.site_iri(),
            Self::Sense(v) => v.site_iri(),
            Self::MediaInfo(v) => v.site_iri(),
            Self::Unsupported(v) => v.site_iri(),
        }
    }

    pub fn iri(&self) -> String {
        format!("{}{}", self.site_iri(), self.id())
    }

    /// Kind of the id, `None` for ids of unknown kinds
    pub fn kind(&self) -> Option<EntityKind> {
        match self {
            Self::Item(_) => Some(EntityKind::Item),
            Self::Property(_) => Some(EntityKind::Property),
            Self::Lexeme(_) => Some(EntityKind::Lexeme),
            Self::Form(_) => Some(EntityKind::Form),
            Self::Sense(_) => Some(EntityKind::Sense),
            Self::MediaInfo(_) => Some(EntityKind::MediaInfo),
            Self::Unsupported(_) => None,
        }
    }

    /// Ontology IRI (or announced type string) of the entity type
    pub fn entity_type(&self) -> &str {
        match self {
            Self::Unsupported(v) => v.entity_type(),
            other => other
                .kind()
                .map(EntityKind::entity_type)
                .unwrap_or_default(),
        }
    }

    pub fn as_item(&self) -> Option<&ItemIdValue> {
        match self {
            Self::Item(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_property(&self) -> Option<&PropertyIdValue> {
        match self {
            Self::Property(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for EntityIdValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id(), self.site_iri())
    }
}

impl From<UnsupportedEntityIdValue> for EntityIdValue {
    fn from(value: UnsupportedEntityIdValue) -> Self {
        EntityIdValue::Unsupported(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> Arc<str> {
        Arc::from(SITE_WIKIDATA)
    }

    #[test]
    fn test_kind_patterns() {
        assert!(EntityKind::Item.matches("Q42"));
        assert!(!EntityKind::Item.matches("Q0"));
        assert!(!EntityKind::Item.matches("Q042"));
        assert!(!EntityKind::Item.matches("P42"));
        assert!(EntityKind::Property.matches("P31"));
        assert!(EntityKind::Form.matches("L5-F2"));
        assert!(!EntityKind::Form.matches("L5-S2"));
        assert!(EntityKind::Sense.matches("L5-S3"));
        assert!(EntityKind::MediaInfo.matches("M9"));
        assert!(!EntityKind::Lexeme.matches("L"));
    }

    #[test]
    fn test_detect_kind() {
        assert_eq!(EntityKind::detect("Q1"), Some(EntityKind::Item));
        assert_eq!(EntityKind::detect("L12-F1"), Some(EntityKind::Form));
        assert_eq!(EntityKind::detect("E10"), None);
    }

    #[test]
    fn test_identity_is_kind_id_and_site() {
        let item: EntityIdValue = ItemIdValue::new("Q42".into(), site()).into();
        let same: EntityIdValue = ItemIdValue::new("Q42".into(), site()).into();
        let other_site: EntityIdValue =
            ItemIdValue::new("Q42".into(), Arc::from("http://example.org/")).into();
        let media: EntityIdValue = MediaInfoIdValue::new("M42".into(), site()).into();

        assert_eq!(item, same);
        assert_ne!(item, other_site);
        assert_ne!(item, media);
        assert_eq!(item.iri(), "http://www.wikidata.org/entity/Q42");
        assert_eq!(item.entity_type(), ET_ITEM);
    }

    #[test]
    fn test_lexeme_parts() {
        let form = FormIdValue::new("L5-F2".into(), site());
        assert_eq!(form.lexeme_id().id(), "L5");
        assert_eq!(form.numeric_id(), 2);

        let sense = SenseIdValue::new("L5-S3".into(), site());
        assert_eq!(sense.lexeme_id().numeric_id(), 5);
        assert_eq!(sense.numeric_id(), 3);
    }

    #[test]
    fn test_unsupported_kind() {
        let id: EntityIdValue =
            UnsupportedEntityIdValue::new("entity-schema".into(), "E10".into(), site()).into();
        assert_eq!(id.kind(), None);
        assert_eq!(id.entity_type(), "entity-schema");
    }
}
