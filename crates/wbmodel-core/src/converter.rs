//! Re-materialise an object graph through another factory
//!
//! [`DatamodelConverter`] walks any instance graph, whichever factory built
//! it, and rebuilds a structurally equal graph with the factory it was given.
//! Values and snaks are dispatched through [`ValueVisitor`] and
//! [`SnakVisitor`]; every other structure is copied by plain recursion.
//! Sequence order is kept exactly. Maps keyed by language or site are
//! flattened in key order before being handed back to the factory.
//!
//! Revision ids, statement ids and ranks are copied verbatim. Unsupported
//! values are returned as they are, sharing their payload with the input.

use tracing::{debug, trace, warn};

use crate::document::{
    Document, DocumentParts, EntityDocument, FormDocument, ItemDocument, LexemeDocument,
    LexemeParts, MediaInfoDocument, PropertyDocument, SenseDocument, TermMap,
};
use crate::entity_id::{
    EntityIdValue, FormIdValue, ItemIdValue, LexemeIdValue, MediaInfoIdValue, PropertyIdValue,
    SenseIdValue,
};
use crate::error::{Error, Result};
use crate::factory::DataObjectFactory;
use crate::sitelink::SiteLink;
use crate::snak::{NoValueSnak, Snak, SnakGroup, SnakVisitor, SomeValueSnak, ValueSnak};
use crate::statement::{Claim, Reference, Statement, StatementGroup};
use crate::value::{
    DatatypeIdValue, GlobeCoordinatesValue, MonolingualTextValue, QuantityValue, StringValue,
    TimeValue, UnsupportedValue, Value, ValueVisitor,
};

/// Copies model instances into the graph of one target factory
pub struct DatamodelConverter<'a, F: DataObjectFactory + ?Sized> {
    factory: &'a F,
}

impl<F: DataObjectFactory + ?Sized> Clone for DatamodelConverter<'_, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: DataObjectFactory + ?Sized> Copy for DatamodelConverter<'_, F> {}

impl<'a, F: DataObjectFactory + ?Sized> DatamodelConverter<'a, F> {
    pub fn new(factory: &'a F) -> Self {
        Self { factory }
    }

    /// The factory new instances are built with
    pub fn factory(&self) -> &'a F {
        self.factory
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Identifiers
    // ─────────────────────────────────────────────────────────────────────────

    pub fn copy_item_id(&self, id: &ItemIdValue) -> Result<ItemIdValue> {
        self.factory.item_id_value(id.id(), id.site_iri())
    }

    pub fn copy_property_id(&self, id: &PropertyIdValue) -> Result<PropertyIdValue> {
        self.factory.property_id_value(id.id(), id.site_iri())
    }

    pub fn copy_lexeme_id(&self, id: &LexemeIdValue) -> Result<LexemeIdValue> {
        self.factory.lexeme_id_value(id.id(), id.site_iri())
    }

    pub fn copy_form_id(&self, id: &FormIdValue) -> Result<FormIdValue> {
        self.factory.form_id_value(id.id(), id.site_iri())
    }

    pub fn copy_sense_id(&self, id: &SenseIdValue) -> Result<SenseIdValue> {
        self.factory.sense_id_value(id.id(), id.site_iri())
    }

    pub fn copy_media_info_id(&self, id: &MediaInfoIdValue) -> Result<MediaInfoIdValue> {
        self.factory.media_info_id_value(id.id(), id.site_iri())
    }

    /// Copy an id of any known kind; ids of unknown kinds are refused
    pub fn copy_entity_id(&self, id: &EntityIdValue) -> Result<EntityIdValue> {
        Ok(match id {
            EntityIdValue::Item(id) => self.copy_item_id(id)?.into(),
            EntityIdValue::Property(id) => self.copy_property_id(id)?.into(),
            EntityIdValue::Lexeme(id) => self.copy_lexeme_id(id)?.into(),
            EntityIdValue::Form(id) => self.copy_form_id(id)?.into(),
            EntityIdValue::Sense(id) => self.copy_sense_id(id)?.into(),
            EntityIdValue::MediaInfo(id) => self.copy_media_info_id(id)?.into(),
            EntityIdValue::Unsupported(id) => {
                warn!(
                    entity_type = id.entity_type(),
                    id = id.id(),
                    "cannot copy entity id of unknown kind"
                );
                return Err(Error::UnsupportedVariant(format!(
                    "entity id of type {}",
                    id.entity_type()
                )));
            }
        })
    }

    pub fn copy_datatype_id(&self, datatype: &DatatypeIdValue) -> Result<DatatypeIdValue> {
        self.factory.datatype_id_value(datatype.iri())
    }

    // Subjects are statically only known as entity ids, so they go through
    // value dispatch and are narrowed back afterwards.
    fn copy_subject(&self, subject: &EntityIdValue) -> Result<EntityIdValue> {
        match self.copy_value(&Value::EntityId(subject.clone()))? {
            Value::EntityId(id) => Ok(id),
            other => Err(Error::UnsupportedVariant(format!(
                "subject of type {}",
                other.type_name()
            ))),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Values
    // ─────────────────────────────────────────────────────────────────────────

    pub fn copy_time_value(&self, value: &TimeValue) -> Result<TimeValue> {
        self.factory.time_value(
            value.year(),
            value.month(),
            value.day(),
            value.hour(),
            value.minute(),
            value.second(),
            value.precision(),
            value.before_tolerance(),
            value.after_tolerance(),
            value.timezone_offset(),
            value.calendar_model(),
        )
    }

    pub fn copy_globe_coordinates_value(
        &self,
        value: &GlobeCoordinatesValue,
    ) -> Result<GlobeCoordinatesValue> {
        self.factory.globe_coordinates_value(
            value.latitude(),
            value.longitude(),
            value.precision(),
            value.globe(),
        )
    }

    pub fn copy_string_value(&self, value: &StringValue) -> Result<StringValue> {
        self.factory.string_value(value.text())
    }

    pub fn copy_monolingual_text_value(
        &self,
        value: &MonolingualTextValue,
    ) -> Result<MonolingualTextValue> {
        self.factory
            .monolingual_text_value(value.text(), value.language_code())
    }

    pub fn copy_quantity_value(&self, value: &QuantityValue) -> Result<QuantityValue> {
        let unit = value.unit().map(|u| self.copy_item_id(u)).transpose()?;
        self.factory.quantity_value(
            value.numeric_value().clone(),
            value.lower_bound().cloned(),
            value.upper_bound().cloned(),
            unit,
        )
    }

    /// Opaque values are never rebuilt; the result shares the input payload
    pub fn copy_unsupported_value(&self, value: &UnsupportedValue) -> UnsupportedValue {
        value.clone()
    }

    pub fn copy_value(&self, value: &Value) -> Result<Value> {
        let mut visitor = *self;
        value.accept(&mut visitor)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Snaks
    // ─────────────────────────────────────────────────────────────────────────

    pub fn copy_value_snak(&self, snak: &ValueSnak) -> Result<ValueSnak> {
        let property = self.copy_property_id(snak.property())?;
        let value = self.copy_value(snak.value())?;
        self.factory.value_snak(property, value)
    }

    pub fn copy_some_value_snak(&self, snak: &SomeValueSnak) -> Result<SomeValueSnak> {
        let property = self.copy_property_id(snak.property())?;
        self.factory.some_value_snak(property)
    }

    pub fn copy_no_value_snak(&self, snak: &NoValueSnak) -> Result<NoValueSnak> {
        let property = self.copy_property_id(snak.property())?;
        self.factory.no_value_snak(property)
    }

    pub fn copy_snak(&self, snak: &Snak) -> Result<Snak> {
        let mut visitor = *self;
        snak.accept(&mut visitor)
    }

    pub fn copy_snak_group(&self, group: &SnakGroup) -> Result<SnakGroup> {
        let snaks = group
            .iter()
            .map(|snak| self.copy_snak(snak))
            .collect::<Result<Vec<_>>>()?;
        self.factory.snak_group(snaks)
    }

    fn copy_snak_groups(&self, groups: &[SnakGroup]) -> Result<Vec<SnakGroup>> {
        groups.iter().map(|g| self.copy_snak_group(g)).collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Claims and statements
    // ─────────────────────────────────────────────────────────────────────────

    pub fn copy_claim(&self, claim: &Claim) -> Result<Claim> {
        let subject = self.copy_subject(claim.subject())?;
        let main_snak = self.copy_snak(claim.main_snak())?;
        let qualifiers = self.copy_snak_groups(claim.qualifiers())?;
        self.factory.claim(subject, main_snak, qualifiers)
    }

    pub fn copy_reference(&self, reference: &Reference) -> Result<Reference> {
        let snak_groups = self.copy_snak_groups(reference.snak_groups())?;
        self.factory.reference(snak_groups)
    }

    pub fn copy_statement(&self, statement: &Statement) -> Result<Statement> {
        let subject = self.copy_subject(statement.subject())?;
        let main_snak = self.copy_snak(statement.main_snak())?;
        let qualifiers = self.copy_snak_groups(statement.qualifiers())?;
        let references = statement
            .references()
            .iter()
            .map(|r| self.copy_reference(r))
            .collect::<Result<Vec<_>>>()?;
        self.factory.statement(
            subject,
            main_snak,
            qualifiers,
            references,
            statement.rank(),
            statement.statement_id(),
        )
    }

    pub fn copy_statement_group(&self, group: &StatementGroup) -> Result<StatementGroup> {
        trace!(
            property = group.property().id(),
            statements = group.len(),
            "copying statement group"
        );
        let statements = group
            .iter()
            .map(|s| self.copy_statement(s))
            .collect::<Result<Vec<_>>>()?;
        self.factory.statement_group(statements)
    }

    pub fn copy_site_link(&self, link: &SiteLink) -> Result<SiteLink> {
        let badges = link
            .badges()
            .iter()
            .map(|badge| self.copy_item_id(badge))
            .collect::<Result<Vec<_>>>()?;
        self.factory
            .site_link(link.page_title(), link.site_key(), badges)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Documents
    // ─────────────────────────────────────────────────────────────────────────

    fn copy_terms(&self, terms: &TermMap) -> Result<Vec<MonolingualTextValue>> {
        terms
            .values()
            .map(|term| self.copy_monolingual_text_value(term))
            .collect()
    }

    fn copy_item_ids(&self, ids: &[ItemIdValue]) -> Result<Vec<ItemIdValue>> {
        ids.iter().map(|id| self.copy_item_id(id)).collect()
    }

    // Labels and descriptions flatten in language order; aliases flatten
    // language by language, keeping the order within each language.
    fn copy_parts<D: Document + ?Sized>(&self, document: &D) -> Result<DocumentParts> {
        let labels = self.copy_terms(document.labels())?;
        let descriptions = self.copy_terms(document.descriptions())?;
        let aliases = document
            .aliases()
            .values()
            .flatten()
            .map(|alias| self.copy_monolingual_text_value(alias))
            .collect::<Result<Vec<_>>>()?;
        let statement_groups = document
            .statement_groups()
            .iter()
            .map(|g| self.copy_statement_group(g))
            .collect::<Result<Vec<_>>>()?;
        Ok(DocumentParts {
            labels,
            descriptions,
            aliases,
            statement_groups,
            revision_id: document.revision_id(),
        })
    }

    pub fn copy_item_document(&self, document: &ItemDocument) -> Result<ItemDocument> {
        debug!(
            id = document.item_id().id(),
            factory = self.factory.name(),
            "copying item document"
        );
        let id = self.copy_item_id(document.item_id())?;
        let parts = self.copy_parts(document)?;
        let site_links = document
            .site_links()
            .values()
            .map(|link| self.copy_site_link(link))
            .collect::<Result<Vec<_>>>()?;
        self.factory.item_document(id, parts, site_links)
    }

    pub fn copy_property_document(&self, document: &PropertyDocument) -> Result<PropertyDocument> {
        debug!(
            id = document.property_id().id(),
            factory = self.factory.name(),
            "copying property document"
        );
        let id = self.copy_property_id(document.property_id())?;
        let parts = self.copy_parts(document)?;
        let datatype = self.copy_datatype_id(document.datatype())?;
        self.factory.property_document(id, parts, datatype)
    }

    pub fn copy_form_document(&self, document: &FormDocument) -> Result<FormDocument> {
        let id = self.copy_form_id(document.form_id())?;
        let parts = self.copy_parts(document)?;
        let representations = self.copy_terms(document.representations())?;
        let features = self.copy_item_ids(document.grammatical_features())?;
        self.factory
            .form_document(id, parts, representations, features)
    }

    pub fn copy_sense_document(&self, document: &SenseDocument) -> Result<SenseDocument> {
        let id = self.copy_sense_id(document.sense_id())?;
        let parts = self.copy_parts(document)?;
        let glosses = self.copy_terms(document.glosses())?;
        self.factory.sense_document(id, parts, glosses)
    }

    pub fn copy_lexeme_document(&self, document: &LexemeDocument) -> Result<LexemeDocument> {
        debug!(
            id = document.lexeme_id().id(),
            forms = document.forms().len(),
            senses = document.senses().len(),
            factory = self.factory.name(),
            "copying lexeme document"
        );
        let id = self.copy_lexeme_id(document.lexeme_id())?;
        let parts = self.copy_parts(document)?;
        let lexeme = LexemeParts {
            lexical_category: self.copy_item_id(document.lexical_category())?,
            language: self.copy_item_id(document.language())?,
            lemmas: self.copy_terms(document.lemmas())?,
            forms: document
                .forms()
                .iter()
                .map(|form| self.copy_form_document(form))
                .collect::<Result<Vec<_>>>()?,
            senses: document
                .senses()
                .iter()
                .map(|sense| self.copy_sense_document(sense))
                .collect::<Result<Vec<_>>>()?,
        };
        self.factory.lexeme_document(id, parts, lexeme)
    }

    pub fn copy_media_info_document(
        &self,
        document: &MediaInfoDocument,
    ) -> Result<MediaInfoDocument> {
        debug!(
            id = document.media_info_id().id(),
            factory = self.factory.name(),
            "copying media info document"
        );
        let id = self.copy_media_info_id(document.media_info_id())?;
        let parts = self.copy_parts(document)?;
        self.factory.media_info_document(id, parts)
    }

    pub fn copy_document(&self, document: &EntityDocument) -> Result<EntityDocument> {
        Ok(match document {
            EntityDocument::Item(d) => self.copy_item_document(d)?.into(),
            EntityDocument::Property(d) => self.copy_property_document(d)?.into(),
            EntityDocument::Lexeme(d) => self.copy_lexeme_document(d)?.into(),
            EntityDocument::Form(d) => self.copy_form_document(d)?.into(),
            EntityDocument::Sense(d) => self.copy_sense_document(d)?.into(),
            EntityDocument::MediaInfo(d) => self.copy_media_info_document(d)?.into(),
        })
    }
}

impl<F: DataObjectFactory + ?Sized> ValueVisitor<Result<Value>> for DatamodelConverter<'_, F> {
    fn visit_entity_id(&mut self, value: &EntityIdValue) -> Result<Value> {
        Ok(Value::EntityId(self.copy_entity_id(value)?))
    }

    fn visit_globe_coordinates(&mut self, value: &GlobeCoordinatesValue) -> Result<Value> {
        Ok(self.copy_globe_coordinates_value(value)?.into())
    }

    fn visit_monolingual_text(&mut self, value: &MonolingualTextValue) -> Result<Value> {
        Ok(self.copy_monolingual_text_value(value)?.into())
    }

    fn visit_quantity(&mut self, value: &QuantityValue) -> Result<Value> {
        Ok(self.copy_quantity_value(value)?.into())
    }

    fn visit_string(&mut self, value: &StringValue) -> Result<Value> {
        Ok(self.copy_string_value(value)?.into())
    }

    fn visit_time(&mut self, value: &TimeValue) -> Result<Value> {
        Ok(self.copy_time_value(value)?.into())
    }

    fn visit_unsupported(&mut self, value: &UnsupportedValue) -> Result<Value> {
        Ok(self.copy_unsupported_value(value).into())
    }
}

impl<F: DataObjectFactory + ?Sized> SnakVisitor<Result<Snak>> for DatamodelConverter<'_, F> {
    fn visit_value_snak(&mut self, snak: &ValueSnak) -> Result<Snak> {
        Ok(self.copy_value_snak(snak)?.into())
    }

    fn visit_some_value_snak(&mut self, snak: &SomeValueSnak) -> Result<Snak> {
        Ok(self.copy_some_value_snak(snak)?.into())
    }

    fn visit_no_value_snak(&mut self, snak: &NoValueSnak) -> Result<Snak> {
        Ok(self.copy_no_value_snak(snak)?.into())
    }
}
