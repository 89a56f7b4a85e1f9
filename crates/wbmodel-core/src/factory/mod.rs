//! Factories - the only way to obtain model instances
//!
//! [`DataObjectFactory`] has one construction method per variant of the
//! model. Every method validates its invariants and returns a
//! [`ValidationError`](crate::validation::ValidationError) wrapped in
//! [`Error`](crate::error::Error) instead of producing an invalid instance.
//!
//! Implementations only decide how shared strings (site IRIs, language
//! codes, calendar and globe IRIs, datatype IRIs) are stored through
//! [`DataObjectFactory::share_str`]. Backends that need more control can
//! override any provided method and delegate to a [`StandardFactory`] for
//! the actual construction.

mod interning;
mod standard;

pub use interning::InterningFactory;
pub use standard::StandardFactory;

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::trace;

use crate::document::{
    AliasMap, DocumentCommon, DocumentParts, FormDocument, ItemDocument, LexemeDocument,
    LexemeParts, MediaInfoDocument, PropertyDocument, SenseDocument, TermMap,
};
use crate::entity_id::{
    EntityIdValue, EntityKind, FormIdValue, ItemIdValue, LexemeIdValue, MediaInfoIdValue,
    PropertyIdValue, SenseIdValue, UnsupportedEntityIdValue,
};
use crate::error::Result;
use crate::sitelink::SiteLink;
use crate::snak::{NoValueSnak, Snak, SnakGroup, SomeValueSnak, ValueSnak};
use crate::statement::{Claim, Reference, Statement, StatementGroup, StatementRank};
use crate::validation::{self, ValidationError};
use crate::value::{
    DatatypeIdValue, Decimal, GlobeCoordinatesValue, MonolingualTextValue, QuantityValue,
    StringValue, TimePrecision, TimeValue, UnsupportedValue,
};

/// Construction capability for every variant of the model
pub trait DataObjectFactory: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Storage for a string that many instances repeat
    fn share_str(&self, value: &str) -> Arc<str>;

    // ─────────────────────────────────────────────────────────────────────────
    // Identifiers
    // ─────────────────────────────────────────────────────────────────────────

    fn item_id_value(&self, id: &str, site_iri: &str) -> Result<ItemIdValue> {
        check_id(EntityKind::Item, id, site_iri)?;
        Ok(ItemIdValue::new(id.to_string(), self.share_str(site_iri)))
    }

    fn property_id_value(&self, id: &str, site_iri: &str) -> Result<PropertyIdValue> {
        check_id(EntityKind::Property, id, site_iri)?;
        Ok(PropertyIdValue::new(id.to_string(), self.share_str(site_iri)))
    }

    fn lexeme_id_value(&self, id: &str, site_iri: &str) -> Result<LexemeIdValue> {
        check_id(EntityKind::Lexeme, id, site_iri)?;
        Ok(LexemeIdValue::new(id.to_string(), self.share_str(site_iri)))
    }

    fn form_id_value(&self, id: &str, site_iri: &str) -> Result<FormIdValue> {
        check_id(EntityKind::Form, id, site_iri)?;
        Ok(FormIdValue::new(id.to_string(), self.share_str(site_iri)))
    }

    fn sense_id_value(&self, id: &str, site_iri: &str) -> Result<SenseIdValue> {
        check_id(EntityKind::Sense, id, site_iri)?;
        Ok(SenseIdValue::new(id.to_string(), self.share_str(site_iri)))
    }

    fn media_info_id_value(&self, id: &str, site_iri: &str) -> Result<MediaInfoIdValue> {
        check_id(EntityKind::MediaInfo, id, site_iri)?;
        Ok(MediaInfoIdValue::new(id.to_string(), self.share_str(site_iri)))
    }

    /// Id of an entity kind the model does not know; the id is kept verbatim
    fn unsupported_entity_id_value(
        &self,
        entity_type: &str,
        id: &str,
        site_iri: &str,
    ) -> Result<UnsupportedEntityIdValue> {
        if entity_type.is_empty() {
            return Err(ValidationError::EmptyEntityType.into());
        }
        validation::validate_site_iri(site_iri)?;
        Ok(UnsupportedEntityIdValue::new(
            entity_type.to_string(),
            id.to_string(),
            self.share_str(site_iri),
        ))
    }

    /// Build an id of whatever kind the shape of `id` denotes
    fn parse_entity_id(&self, id: &str, site_iri: &str) -> Result<EntityIdValue> {
        let kind = EntityKind::detect(id)
            .ok_or_else(|| ValidationError::UnknownEntityIdShape(id.to_string()))?;
        Ok(match kind {
            EntityKind::Item => self.item_id_value(id, site_iri)?.into(),
            EntityKind::Property => self.property_id_value(id, site_iri)?.into(),
            EntityKind::Lexeme => self.lexeme_id_value(id, site_iri)?.into(),
            EntityKind::Form => self.form_id_value(id, site_iri)?.into(),
            EntityKind::Sense => self.sense_id_value(id, site_iri)?.into(),
            EntityKind::MediaInfo => self.media_info_id_value(id, site_iri)?.into(),
        })
    }

    fn datatype_id_value(&self, iri: &str) -> Result<DatatypeIdValue> {
        validation::validate_datatype_iri(iri)?;
        Ok(DatatypeIdValue::new(self.share_str(iri)))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Values
    // ─────────────────────────────────────────────────────────────────────────

    #[allow(clippy::too_many_arguments)]
    fn time_value(
        &self,
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
        calendar_model: &str,
    ) -> Result<TimeValue> {
        validation::validate_time_fields(month, day, hour, minute, second)?;
        validation::validate_iri("calendar model", calendar_model)?;
        Ok(TimeValue::new(
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
            self.share_str(calendar_model),
        ))
    }

    fn globe_coordinates_value(
        &self,
        latitude: f64,
        longitude: f64,
        precision: f64,
        globe: &str,
    ) -> Result<GlobeCoordinatesValue> {
        validation::validate_globe_coordinates(latitude, longitude, precision)?;
        validation::validate_iri("globe", globe)?;
        Ok(GlobeCoordinatesValue::new(
            latitude,
            longitude,
            precision,
            self.share_str(globe),
        ))
    }

    fn string_value(&self, text: &str) -> Result<StringValue> {
        Ok(StringValue::new(text.to_string()))
    }

    fn monolingual_text_value(
        &self,
        text: &str,
        language_code: &str,
    ) -> Result<MonolingualTextValue> {
        validation::validate_language_code(language_code)?;
        Ok(MonolingualTextValue::new(
            text.to_string(),
            self.share_str(language_code),
        ))
    }

    fn quantity_value(
        &self,
        numeric_value: Decimal,
        lower_bound: Option<Decimal>,
        upper_bound: Option<Decimal>,
        unit: Option<ItemIdValue>,
    ) -> Result<QuantityValue> {
        validation::validate_quantity_bounds(
            &numeric_value,
            lower_bound.as_ref(),
            upper_bound.as_ref(),
        )?;
        Ok(QuantityValue::new(numeric_value, lower_bound, upper_bound, unit))
    }

    /// Wrap a payload of a value type the model does not know
    fn unsupported_value(
        &self,
        value_type: &str,
        content: serde_json::Value,
    ) -> Result<UnsupportedValue> {
        Ok(UnsupportedValue::new(value_type.to_string(), content))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Snaks
    // ─────────────────────────────────────────────────────────────────────────

    fn value_snak(
        &self,
        property: PropertyIdValue,
        value: crate::value::Value,
    ) -> Result<ValueSnak> {
        Ok(ValueSnak::new(property, value))
    }

    fn some_value_snak(&self, property: PropertyIdValue) -> Result<SomeValueSnak> {
        Ok(SomeValueSnak::new(property))
    }

    fn no_value_snak(&self, property: PropertyIdValue) -> Result<NoValueSnak> {
        Ok(NoValueSnak::new(property))
    }

    fn snak_group(&self, snaks: Vec<Snak>) -> Result<SnakGroup> {
        validation::validate_snak_group(&snaks)?;
        Ok(SnakGroup::new(snaks))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Claims and statements
    // ─────────────────────────────────────────────────────────────────────────

    fn claim(
        &self,
        subject: EntityIdValue,
        main_snak: Snak,
        qualifiers: Vec<SnakGroup>,
    ) -> Result<Claim> {
        Ok(Claim::new(subject, main_snak, qualifiers))
    }

    fn reference(&self, snak_groups: Vec<SnakGroup>) -> Result<Reference> {
        Ok(Reference::new(snak_groups))
    }

    fn statement(
        &self,
        subject: EntityIdValue,
        main_snak: Snak,
        qualifiers: Vec<SnakGroup>,
        references: Vec<Reference>,
        rank: StatementRank,
        statement_id: &str,
    ) -> Result<Statement> {
        Ok(Statement::new(
            subject,
            main_snak,
            qualifiers,
            references,
            rank,
            statement_id.to_string(),
        ))
    }

    /// Statement made of an existing claim
    fn statement_from_claim(
        &self,
        claim: Claim,
        references: Vec<Reference>,
        rank: StatementRank,
        statement_id: &str,
    ) -> Result<Statement> {
        let (subject, main_snak, qualifiers) = claim.into_parts();
        self.statement(subject, main_snak, qualifiers, references, rank, statement_id)
    }

    fn statement_group(&self, statements: Vec<Statement>) -> Result<StatementGroup> {
        validation::validate_statement_group(&statements)?;
        Ok(StatementGroup::new(statements))
    }

    fn site_link(
        &self,
        page_title: &str,
        site_key: &str,
        badges: Vec<ItemIdValue>,
    ) -> Result<SiteLink> {
        validation::validate_site_key(site_key)?;
        Ok(SiteLink::new(page_title.to_string(), site_key.to_string(), badges))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Documents
    // ─────────────────────────────────────────────────────────────────────────

    fn item_document(
        &self,
        id: ItemIdValue,
        parts: DocumentParts,
        site_links: Vec<SiteLink>,
    ) -> Result<ItemDocument> {
        trace!(factory = self.name(), id = id.id(), "building item document");
        let common = assemble_common(parts)?;
        let site_links = index_site_links(site_links)?;
        Ok(ItemDocument::new(id, common, site_links))
    }

    fn property_document(
        &self,
        id: PropertyIdValue,
        parts: DocumentParts,
        datatype: DatatypeIdValue,
    ) -> Result<PropertyDocument> {
        trace!(factory = self.name(), id = id.id(), "building property document");
        let common = assemble_common(parts)?;
        Ok(PropertyDocument::new(id, common, datatype))
    }

    fn lexeme_document(
        &self,
        id: LexemeIdValue,
        parts: DocumentParts,
        lexeme: LexemeParts,
    ) -> Result<LexemeDocument> {
        trace!(factory = self.name(), id = id.id(), "building lexeme document");
        let common = assemble_common(parts)?;
        let lemmas = index_terms("lemma", lexeme.lemmas)?;
        Ok(LexemeDocument::new(
            id,
            common,
            lexeme.lexical_category,
            lexeme.language,
            lemmas,
            lexeme.forms,
            lexeme.senses,
        ))
    }

    fn form_document(
        &self,
        id: FormIdValue,
        parts: DocumentParts,
        representations: Vec<MonolingualTextValue>,
        grammatical_features: Vec<ItemIdValue>,
    ) -> Result<FormDocument> {
        let common = assemble_common(parts)?;
        let representations = index_terms("representation", representations)?;
        Ok(FormDocument::new(id, common, representations, grammatical_features))
    }

    fn sense_document(
        &self,
        id: SenseIdValue,
        parts: DocumentParts,
        glosses: Vec<MonolingualTextValue>,
    ) -> Result<SenseDocument> {
        let common = assemble_common(parts)?;
        let glosses = index_terms("gloss", glosses)?;
        Ok(SenseDocument::new(id, common, glosses))
    }

    fn media_info_document(
        &self,
        id: MediaInfoIdValue,
        parts: DocumentParts,
    ) -> Result<MediaInfoDocument> {
        trace!(factory = self.name(), id = id.id(), "building media info document");
        let common = assemble_common(parts)?;
        Ok(MediaInfoDocument::new(id, common))
    }
}

fn check_id(
    kind: EntityKind,
    id: &str,
    site_iri: &str,
) -> std::result::Result<(), ValidationError> {
    validation::validate_entity_id(kind, id)?;
    validation::validate_site_iri(site_iri)
}

/// Key terms by language, rejecting a language given twice
fn index_terms(
    field: &'static str,
    terms: Vec<MonolingualTextValue>,
) -> std::result::Result<TermMap, ValidationError> {
    validation::validate_unique_languages(field, &terms)?;
    Ok(terms
        .into_iter()
        .map(|term| (term.language_code().to_string(), term))
        .collect())
}

/// Group aliases by language, keeping the given order within a language
fn group_aliases(aliases: Vec<MonolingualTextValue>) -> AliasMap {
    let mut grouped = AliasMap::new();
    for alias in aliases {
        grouped
            .entry(alias.language_code().to_string())
            .or_insert_with(Vec::new)
            .push(alias);
    }
    grouped
}

fn index_site_links(
    site_links: Vec<SiteLink>,
) -> std::result::Result<BTreeMap<String, SiteLink>, ValidationError> {
    let mut indexed = BTreeMap::new();
    for link in site_links {
        let key = link.site_key().to_string();
        if indexed.contains_key(&key) {
            return Err(ValidationError::DuplicateSiteKey(key));
        }
        indexed.insert(key, link);
    }
    Ok(indexed)
}

fn assemble_common(parts: DocumentParts) -> std::result::Result<DocumentCommon, ValidationError> {
    let labels = index_terms("label", parts.labels)?;
    let descriptions = index_terms("description", parts.descriptions)?;
    let aliases = group_aliases(parts.aliases);
    Ok(DocumentCommon::new(
        labels,
        descriptions,
        aliases,
        parts.statement_groups,
        parts.revision_id,
    ))
}
