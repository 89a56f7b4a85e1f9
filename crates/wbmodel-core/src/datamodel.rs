//! Convenience constructors bound to one factory
//!
//! [`Datamodel`] owns a factory and offers the common constructions with
//! sensible defaults: ids on the Wikidata site, day-precision dates in the
//! proleptic Gregorian calendar, quantities without bounds, documents
//! without terms.

use crate::converter::DatamodelConverter;
use crate::document::{
    DocumentParts, FormDocument, ItemDocument, LexemeDocument, LexemeParts, MediaInfoDocument,
    PropertyDocument, SenseDocument,
};
use crate::entity_id::{
    EntityIdValue, FormIdValue, ItemIdValue, LexemeIdValue, MediaInfoIdValue, PropertyIdValue,
    SenseIdValue, SITE_WIKIDATA, SITE_WIKIMEDIA_COMMONS,
};
use crate::error::Result;
use crate::factory::{DataObjectFactory, StandardFactory};
use crate::sitelink::SiteLink;
use crate::snak::{NoValueSnak, Snak, SnakGroup, SomeValueSnak, ValueSnak};
use crate::statement::{Claim, Reference, Statement, StatementGroup, StatementRank};
use crate::value::{
    DatatypeIdValue, Decimal, GlobeCoordinatesValue, MonolingualTextValue, QuantityValue,
    StringValue, TimePrecision, TimeValue, Value, CM_GREGORIAN_PRO,
};

/// Convenience layer over a [`DataObjectFactory`]
#[derive(Debug, Clone, Default)]
pub struct Datamodel<F: DataObjectFactory = StandardFactory> {
    factory: F,
}

impl Datamodel<StandardFactory> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<F: DataObjectFactory> Datamodel<F> {
    pub fn with_factory(factory: F) -> Self {
        Self { factory }
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Converter that re-materialises graphs through this model's factory
    pub fn converter(&self) -> DatamodelConverter<'_, F> {
        DatamodelConverter::new(&self.factory)
    }

    // Identifiers

    pub fn make_item_id_value(&self, id: &str, site_iri: &str) -> Result<ItemIdValue> {
        self.factory.item_id_value(id, site_iri)
    }

    pub fn make_property_id_value(&self, id: &str, site_iri: &str) -> Result<PropertyIdValue> {
        self.factory.property_id_value(id, site_iri)
    }

    pub fn make_lexeme_id_value(&self, id: &str, site_iri: &str) -> Result<LexemeIdValue> {
        self.factory.lexeme_id_value(id, site_iri)
    }

    pub fn make_form_id_value(&self, id: &str, site_iri: &str) -> Result<FormIdValue> {
        self.factory.form_id_value(id, site_iri)
    }

    pub fn make_sense_id_value(&self, id: &str, site_iri: &str) -> Result<SenseIdValue> {
        self.factory.sense_id_value(id, site_iri)
    }

    pub fn make_media_info_id_value(&self, id: &str, site_iri: &str) -> Result<MediaInfoIdValue> {
        self.factory.media_info_id_value(id, site_iri)
    }

    pub fn make_wikidata_item_id_value(&self, id: &str) -> Result<ItemIdValue> {
        self.make_item_id_value(id, SITE_WIKIDATA)
    }

    pub fn make_wikidata_property_id_value(&self, id: &str) -> Result<PropertyIdValue> {
        self.make_property_id_value(id, SITE_WIKIDATA)
    }

    pub fn make_wikidata_lexeme_id_value(&self, id: &str) -> Result<LexemeIdValue> {
        self.make_lexeme_id_value(id, SITE_WIKIDATA)
    }

    pub fn make_wikidata_form_id_value(&self, id: &str) -> Result<FormIdValue> {
        self.make_form_id_value(id, SITE_WIKIDATA)
    }

    pub fn make_wikidata_sense_id_value(&self, id: &str) -> Result<SenseIdValue> {
        self.make_sense_id_value(id, SITE_WIKIDATA)
    }

    /// Media info ids live on Wikimedia Commons
    pub fn make_wikimedia_commons_media_info_id_value(&self, id: &str) -> Result<MediaInfoIdValue> {
        self.make_media_info_id_value(id, SITE_WIKIMEDIA_COMMONS)
    }

    pub fn make_datatype_id_value(&self, iri: &str) -> Result<DatatypeIdValue> {
        self.factory.datatype_id_value(iri)
    }

    // Values

    #[allow(clippy::too_many_arguments)]
    pub fn make_time_value(
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
        self.factory.time_value(
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
        )
    }

    /// A date with day precision in the proleptic Gregorian calendar, UTC
    pub fn make_time_value_day(&self, year: i64, month: u8, day: u8) -> Result<TimeValue> {
        self.make_time_value(
            year,
            month,
            day,
            0,
            0,
            0,
            TimePrecision::Day,
            0,
            0,
            0,
            CM_GREGORIAN_PRO,
        )
    }

    /// A point in time with second precision, UTC
    #[allow(clippy::too_many_arguments)]
    pub fn make_time_value_seconds(
        &self,
        year: i64,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        calendar_model: &str,
    ) -> Result<TimeValue> {
        self.make_time_value(
            year,
            month,
            day,
            hour,
            minute,
            second,
            TimePrecision::Second,
            0,
            0,
            0,
            calendar_model,
        )
    }

    pub fn make_globe_coordinates_value(
        &self,
        latitude: f64,
        longitude: f64,
        precision: f64,
        globe: &str,
    ) -> Result<GlobeCoordinatesValue> {
        self.factory
            .globe_coordinates_value(latitude, longitude, precision, globe)
    }

    pub fn make_string_value(&self, text: &str) -> Result<StringValue> {
        self.factory.string_value(text)
    }

    pub fn make_monolingual_text_value(
        &self,
        text: &str,
        language_code: &str,
    ) -> Result<MonolingualTextValue> {
        self.factory.monolingual_text_value(text, language_code)
    }

    /// Quantity without bounds or unit
    pub fn make_quantity_value(&self, numeric_value: Decimal) -> Result<QuantityValue> {
        self.factory.quantity_value(numeric_value, None, None, None)
    }

    pub fn make_quantity_value_with_bounds(
        &self,
        numeric_value: Decimal,
        lower_bound: Decimal,
        upper_bound: Decimal,
    ) -> Result<QuantityValue> {
        self.factory
            .quantity_value(numeric_value, Some(lower_bound), Some(upper_bound), None)
    }

    /// Integer quantity with bounds, no unit
    pub fn make_integer_quantity_value(
        &self,
        numeric_value: i64,
        lower_bound: i64,
        upper_bound: i64,
    ) -> Result<QuantityValue> {
        self.make_quantity_value_with_bounds(
            Decimal::from(numeric_value),
            Decimal::from(lower_bound),
            Decimal::from(upper_bound),
        )
    }

    pub fn make_quantity_value_with_unit(
        &self,
        numeric_value: Decimal,
        unit: ItemIdValue,
    ) -> Result<QuantityValue> {
        self.factory.quantity_value(numeric_value, None, None, Some(unit))
    }

    // Snaks and statements

    pub fn make_value_snak(
        &self,
        property: PropertyIdValue,
        value: impl Into<Value>,
    ) -> Result<ValueSnak> {
        self.factory.value_snak(property, value.into())
    }

    pub fn make_some_value_snak(&self, property: PropertyIdValue) -> Result<SomeValueSnak> {
        self.factory.some_value_snak(property)
    }

    pub fn make_no_value_snak(&self, property: PropertyIdValue) -> Result<NoValueSnak> {
        self.factory.no_value_snak(property)
    }

    pub fn make_snak_group(&self, snaks: Vec<Snak>) -> Result<SnakGroup> {
        self.factory.snak_group(snaks)
    }

    /// Claim without qualifiers
    pub fn make_claim(&self, subject: impl Into<EntityIdValue>, main_snak: Snak) -> Result<Claim> {
        self.factory.claim(subject.into(), main_snak, Vec::new())
    }

    pub fn make_reference(&self, snak_groups: Vec<SnakGroup>) -> Result<Reference> {
        self.factory.reference(snak_groups)
    }

    /// Normal-rank statement without references and without an id
    pub fn make_statement(&self, claim: Claim) -> Result<Statement> {
        self.factory
            .statement_from_claim(claim, Vec::new(), StatementRank::Normal, "")
    }

    pub fn make_statement_with(
        &self,
        claim: Claim,
        references: Vec<Reference>,
        rank: StatementRank,
        statement_id: &str,
    ) -> Result<Statement> {
        self.factory
            .statement_from_claim(claim, references, rank, statement_id)
    }

    pub fn make_statement_group(&self, statements: Vec<Statement>) -> Result<StatementGroup> {
        self.factory.statement_group(statements)
    }

    /// Site link without badges
    pub fn make_site_link(&self, page_title: &str, site_key: &str) -> Result<SiteLink> {
        self.factory.site_link(page_title, site_key, Vec::new())
    }

    // Documents

    /// Item document with no terms, statements or site links
    pub fn make_item_document(&self, id: ItemIdValue) -> Result<ItemDocument> {
        self.factory
            .item_document(id, DocumentParts::default(), Vec::new())
    }

    /// Property document with no terms or statements
    pub fn make_property_document(
        &self,
        id: PropertyIdValue,
        datatype: DatatypeIdValue,
    ) -> Result<PropertyDocument> {
        self.factory
            .property_document(id, DocumentParts::default(), datatype)
    }

    /// Lexeme document with lemmas only
    pub fn make_lexeme_document(
        &self,
        id: LexemeIdValue,
        lexical_category: ItemIdValue,
        language: ItemIdValue,
        lemmas: Vec<MonolingualTextValue>,
    ) -> Result<LexemeDocument> {
        let lexeme = LexemeParts {
            lexical_category,
            language,
            lemmas,
            forms: Vec::new(),
            senses: Vec::new(),
        };
        self.factory
            .lexeme_document(id, DocumentParts::default(), lexeme)
    }

    pub fn make_form_document(
        &self,
        id: FormIdValue,
        representations: Vec<MonolingualTextValue>,
        grammatical_features: Vec<ItemIdValue>,
    ) -> Result<FormDocument> {
        self.factory.form_document(
            id,
            DocumentParts::default(),
            representations,
            grammatical_features,
        )
    }

    pub fn make_sense_document(
        &self,
        id: SenseIdValue,
        glosses: Vec<MonolingualTextValue>,
    ) -> Result<SenseDocument> {
        self.factory
            .sense_document(id, DocumentParts::default(), glosses)
    }

    pub fn make_media_info_document(&self, id: MediaInfoIdValue) -> Result<MediaInfoDocument> {
        self.factory
            .media_info_document(id, DocumentParts::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::error::Error;
    use crate::factory::InterningFactory;
    use crate::validation::ValidationError;

    #[test]
    fn test_wikidata_defaults() {
        let dm = Datamodel::new();
        let q = dm.make_wikidata_item_id_value("Q42").unwrap();
        assert_eq!(q.site_iri(), SITE_WIKIDATA);
        let m = dm.make_wikimedia_commons_media_info_id_value("M9").unwrap();
        assert_eq!(m.site_iri(), SITE_WIKIMEDIA_COMMONS);
    }

    #[test]
    fn test_time_value_day_defaults() {
        let dm = Datamodel::new();
        let t = dm.make_time_value_day(1952, 3, 11).unwrap();
        assert_eq!(t.precision(), TimePrecision::Day);
        assert_eq!(t.calendar_model(), CM_GREGORIAN_PRO);
        assert_eq!((t.hour(), t.minute(), t.second()), (0, 0, 0));
        assert_eq!(t.timezone_offset(), 0);
    }

    #[test]
    fn test_quantity_helpers() {
        let dm = Datamodel::new();
        let q = dm.make_quantity_value("5".parse().unwrap()).unwrap();
        assert!(q.lower_bound().is_none());
        assert!(q.unit().is_none());

        assert!(dm
            .make_quantity_value_with_bounds(
                "5".parse().unwrap(),
                "10".parse().unwrap(),
                "1".parse().unwrap()
            )
            .is_err());

        assert!(matches!(
            dm.make_integer_quantity_value(5, 10, 1),
            Err(Error::Validation(ValidationError::QuantityBoundsOutOfOrder { .. }))
        ));
        let q = dm.make_integer_quantity_value(5, 1, 10).unwrap();
        assert_eq!(q.numeric_value(), &Decimal::from(5));
        assert_eq!(q.lower_bound(), Some(&Decimal::from(1)));
        assert_eq!(q.upper_bound(), Some(&Decimal::from(10)));

        let metre = dm.make_wikidata_item_id_value("Q11573").unwrap();
        let q = dm
            .make_quantity_value_with_unit("1.80".parse().unwrap(), metre.clone())
            .unwrap();
        assert_eq!(q.unit(), Some(&metre));
    }

    #[test]
    fn test_statement_defaults() {
        let dm = Datamodel::new();
        let q42 = dm.make_wikidata_item_id_value("Q42").unwrap();
        let p31 = dm.make_wikidata_property_id_value("P31").unwrap();
        let q5 = dm.make_wikidata_item_id_value("Q5").unwrap();
        let snak = dm.make_value_snak(p31, q5).unwrap();
        let claim = dm.make_claim(q42, snak.into()).unwrap();
        let statement = dm.make_statement(claim).unwrap();
        assert_eq!(statement.rank(), StatementRank::Normal);
        assert!(statement.references().is_empty());
        assert_eq!(statement.statement_id(), "");
    }

    #[test]
    fn test_empty_documents() {
        let dm = Datamodel::with_factory(InterningFactory::new());
        let doc = dm
            .make_item_document(dm.make_wikidata_item_id_value("Q1").unwrap())
            .unwrap();
        assert!(doc.labels().is_empty());
        assert!(doc.site_links().is_empty());
        assert_eq!(doc.revision_id(), 0);

        let link = dm.make_site_link("Universe", "enwiki").unwrap();
        assert!(link.badges().is_empty());
    }
}
