//! wbmodel core - immutable knowledge-base data model
//!
//! The model describes entities (items, properties, lexemes with their forms
//! and senses, media files) together with their terms and statements. Every
//! instance is immutable and can only be obtained from a
//! [`DataObjectFactory`], which checks the invariants of what it builds.
//! [`DatamodelConverter`] rebuilds any graph through another factory.
//!
//! ```
//! use wbmodel_core::{Datamodel, Document, ItemDocumentBuilder, StatementBuilder};
//!
//! let dm = Datamodel::new();
//! let q42 = dm.make_wikidata_item_id_value("Q42")?;
//! let p31 = dm.make_wikidata_property_id_value("P31")?;
//! let statement = StatementBuilder::new(dm.factory(), q42.clone(), p31)
//!     .with_value(dm.make_wikidata_item_id_value("Q5")?)
//!     .build()?;
//! let doc = ItemDocumentBuilder::for_item_id(dm.factory(), q42)
//!     .with_label_text("Douglas Adams", "en")?
//!     .with_statement(statement)
//!     .build()?;
//!
//! let copy = dm.converter().copy_item_document(&doc)?;
//! assert_eq!(copy, doc);
//! assert_eq!(copy.find_label("en"), Some("Douglas Adams"));
//! # Ok::<(), wbmodel_core::Error>(())
//! ```

pub mod builder;
pub mod converter;
pub mod datamodel;
pub mod document;
pub mod entity_id;
pub mod error;
pub mod factory;
pub mod sitelink;
pub mod snak;
pub mod statement;
pub mod validation;
pub mod value;

pub use builder::{
    ItemDocumentBuilder, PropertyDocumentBuilder, ReferenceBuilder, StatementBuilder,
};
pub use converter::DatamodelConverter;
pub use datamodel::Datamodel;
pub use document::{
    AliasMap, Document, DocumentCommon, DocumentParts, EntityDocument, FormDocument, ItemDocument,
    LexemeDocument, LexemeParts, MediaInfoDocument, PropertyDocument, SenseDocument, TermMap,
};
pub use entity_id::{
    EntityIdValue, EntityKind, FormIdValue, ItemIdValue, LexemeIdValue, MediaInfoIdValue,
    PropertyIdValue, SenseIdValue, UnsupportedEntityIdValue, SITE_WIKIDATA, SITE_WIKIMEDIA_COMMONS,
};
pub use error::{Error, Result};
pub use factory::{DataObjectFactory, InterningFactory, StandardFactory};
pub use sitelink::SiteLink;
pub use snak::{NoValueSnak, Snak, SnakGroup, SnakVisitor, SomeValueSnak, ValueSnak};
pub use statement::{Claim, Reference, Statement, StatementGroup, StatementRank};
pub use validation::ValidationError;
pub use value::{
    DatatypeIdValue, Decimal, GlobeCoordinatesValue, MonolingualTextValue, QuantityValue,
    StringValue, TimePrecision, TimeValue, UnsupportedValue, Value, ValueVisitor, CM_GREGORIAN_PRO,
    CM_JULIAN_PRO, DT_COMMONS_MEDIA, DT_EXTERNAL_ID, DT_FORM, DT_GEO_SHAPE, DT_GLOBE_COORDINATES,
    DT_ITEM, DT_LEXEME, DT_MATH, DT_MEDIA_INFO, DT_MONOLINGUAL_TEXT, DT_MUSICAL_NOTATION,
    DT_PROPERTY, DT_QUANTITY, DT_SENSE, DT_STRING, DT_TABULAR_DATA, DT_TIME, DT_URL, GLOBE_EARTH,
    GLOBE_MOON,
};
