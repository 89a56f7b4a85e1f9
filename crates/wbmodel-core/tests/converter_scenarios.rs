//! End-to-end conversion scenarios
//!
//! Graphs are built with one factory and re-materialised through another.

use serde_json::json;
use wbmodel_core::{
    DataObjectFactory, Datamodel, DatamodelConverter, Decimal, Document, DocumentParts,
    EntityDocument, Error, InterningFactory, ItemDocument, ItemDocumentBuilder, LexemeParts,
    ReferenceBuilder, Snak, StandardFactory, StatementBuilder, StatementRank, ValidationError,
    Value, DT_ITEM, GLOBE_EARTH, SITE_WIKIDATA, SITE_WIKIMEDIA_COMMONS,
};

// =============================================================================
// HELPERS
// =============================================================================

fn douglas_adams(f: &StandardFactory) -> ItemDocument {
    let q42 = f.item_id_value("Q42", SITE_WIKIDATA).expect("Q42");
    let p31 = f.property_id_value("P31", SITE_WIKIDATA).expect("P31");
    let statement = StatementBuilder::new(f, q42.clone(), p31)
        .with_value(f.item_id_value("Q5", SITE_WIKIDATA).expect("Q5"))
        .build()
        .expect("statement");
    ItemDocumentBuilder::for_item_id(f, q42)
        .with_label_text("Douglas Adams", "en")
        .expect("label")
        .with_statement(statement)
        .build()
        .expect("document")
}

// =============================================================================
// SCENARIOS
// =============================================================================

#[test]
fn end_to_end_item_survives_conversion() {
    let source = StandardFactory::new();
    let target = InterningFactory::new();
    let doc = douglas_adams(&source);

    let copy = DatamodelConverter::new(&target)
        .copy_item_document(&doc)
        .expect("copy");

    assert_eq!(copy.item_id().id(), "Q42");
    assert_eq!(copy.find_label("en"), Some("Douglas Adams"));
    assert_eq!(copy.statement_groups().len(), 1);

    let group = &copy.statement_groups()[0];
    assert_eq!(group.len(), 1);
    let statement = &group.statements()[0];
    assert_eq!(statement.main_snak().property().id(), "P31");
    let value = statement.main_snak().value().and_then(Value::as_entity_id);
    assert_eq!(value.map(|id| id.id()), Some("Q5"));
    assert_eq!(statement.rank(), StatementRank::Normal);
    assert!(statement.references().is_empty());
    assert_eq!(statement.statement_id(), "");

    assert_eq!(copy, doc);
}

#[test]
fn aliases_are_flattened_per_language() {
    let f = StandardFactory::new();
    let aliases = vec![
        f.monolingual_text_value("Foo", "en").expect("alias"),
        f.monolingual_text_value("Fuh", "de").expect("alias"),
        f.monolingual_text_value("Foo2", "en").expect("alias"),
    ];
    let id = f.item_id_value("Q1", SITE_WIKIDATA).expect("id");
    let doc = f
        .item_document(id, DocumentParts::new().with_aliases(aliases), Vec::new())
        .expect("document");

    let copy = DatamodelConverter::new(&InterningFactory::new())
        .copy_item_document(&doc)
        .expect("copy");

    let flattened: Vec<(&str, &str)> = copy
        .aliases()
        .values()
        .flatten()
        .map(|a| (a.language_code(), a.text()))
        .collect();
    assert_eq!(flattened.len(), 3);
    let english: Vec<&str> = copy.aliases()["en"].iter().map(|a| a.text()).collect();
    assert_eq!(english, vec!["Foo", "Foo2"]);
    assert_eq!(copy.aliases()["de"].iter().map(|a| a.text()).collect::<Vec<_>>(), vec!["Fuh"]);
    assert!(flattened.contains(&("de", "Fuh")));
}

#[test]
fn statement_order_is_preserved() {
    let f = StandardFactory::new();
    let q1 = f.item_id_value("Q1", SITE_WIKIDATA).expect("id");
    let p = f.property_id_value("P1082", SITE_WIKIDATA).expect("property");
    let statements = ["s1", "s2", "s3"]
        .iter()
        .map(|id| {
            StatementBuilder::new(&f, q1.clone(), p.clone())
                .with_value(f.string_value(id).expect("string"))
                .with_id(*id)
                .build()
                .expect("statement")
        })
        .collect::<Vec<_>>();
    let group = f.statement_group(statements).expect("group");

    let copy = DatamodelConverter::new(&InterningFactory::new())
        .copy_statement_group(&group)
        .expect("copy");
    let ids: Vec<&str> = copy.iter().map(|s| s.statement_id()).collect();
    assert_eq!(ids, vec!["s1", "s2", "s3"]);
}

#[test]
fn unsupported_value_is_passed_through() {
    let f = StandardFactory::new();
    let opaque = f
        .unsupported_value("geo-shape", json!({"type": "FeatureCollection"}))
        .expect("opaque");
    let q1 = f.item_id_value("Q1", SITE_WIKIDATA).expect("id");
    let p = f.property_id_value("P3896", SITE_WIKIDATA).expect("property");
    let statement = StatementBuilder::new(&f, q1, p)
        .with_value(opaque.clone())
        .build()
        .expect("statement");

    let copy = DatamodelConverter::new(&InterningFactory::new())
        .copy_statement(&statement)
        .expect("copy");
    match copy.main_snak().value() {
        Some(Value::Unsupported(value)) => assert!(value.is_same(&opaque)),
        other => panic!("unexpected value {:?}", other),
    }
}

#[test]
fn unsupported_subject_kind_fails_loudly() {
    let f = StandardFactory::new();
    let subject = f
        .unsupported_entity_id_value("entity-schema", "E10", SITE_WIKIDATA)
        .expect("subject");
    let p = f.property_id_value("P1", SITE_WIKIDATA).expect("property");
    let snak: Snak = f.no_value_snak(p).expect("snak").into();
    let claim = f.claim(subject.into(), snak, Vec::new()).expect("claim");

    let err = DatamodelConverter::new(&f).copy_claim(&claim).unwrap_err();
    assert!(matches!(err, Error::UnsupportedVariant(ref name) if name.contains("entity-schema")));
}

#[test]
fn quantity_bounds_are_checked_and_kept_exactly() {
    let dm = Datamodel::new();
    let err = dm
        .make_quantity_value_with_bounds(
            "5".parse().expect("decimal"),
            "10".parse().expect("decimal"),
            "1".parse().expect("decimal"),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::QuantityBoundsOutOfOrder { .. })
    ));

    let q = dm
        .make_quantity_value_with_bounds(
            "5.0".parse().expect("decimal"),
            "1".parse().expect("decimal"),
            "10.00".parse().expect("decimal"),
        )
        .expect("quantity");
    let copy = DatamodelConverter::new(&InterningFactory::new())
        .copy_quantity_value(&q)
        .expect("copy");
    assert_eq!(copy.numeric_value().to_string(), "5.0");
    assert_eq!(copy.upper_bound().map(|d| d.to_string()), Some("10.00".to_string()));
    assert_ne!(copy.numeric_value(), &"5".parse::<Decimal>().expect("decimal"));
}

#[test]
fn snak_groups_reject_empty_and_mixed_input() {
    let f = InterningFactory::new();
    assert!(matches!(
        f.snak_group(Vec::new()),
        Err(Error::Validation(ValidationError::EmptySnakGroup))
    ));

    let snaks: Vec<Snak> = vec![
        f.some_value_snak(f.property_id_value("P1", SITE_WIKIDATA).expect("P1"))
            .expect("snak")
            .into(),
        f.some_value_snak(f.property_id_value("P2", SITE_WIKIDATA).expect("P2"))
            .expect("snak")
            .into(),
    ];
    assert!(matches!(
        f.snak_group(snaks),
        Err(Error::Validation(ValidationError::MixedSnakGroupProperties { .. }))
    ));
}

#[test]
fn lexeme_with_forms_and_senses_round_trips() {
    let f = StandardFactory::new();
    let l7 = f.lexeme_id_value("L7", SITE_WIKIDATA).expect("lexeme");
    let form_id = f.form_id_value("L7-F1", SITE_WIKIDATA).expect("form");
    let sense_id = f.sense_id_value("L7-S1", SITE_WIKIDATA).expect("sense");

    let form = f
        .form_document(
            form_id,
            DocumentParts::new(),
            vec![f.monolingual_text_value("cats", "en").expect("rep")],
            vec![f.item_id_value("Q146786", SITE_WIKIDATA).expect("plural")],
        )
        .expect("form");
    let sense = f
        .sense_document(
            sense_id.clone(),
            DocumentParts::new(),
            vec![f.monolingual_text_value("small feline", "en").expect("gloss")],
        )
        .expect("sense");
    let lexeme = f
        .lexeme_document(
            l7,
            DocumentParts::new().with_revision_id(42),
            LexemeParts {
                lexical_category: f.item_id_value("Q1084", SITE_WIKIDATA).expect("noun"),
                language: f.item_id_value("Q1860", SITE_WIKIDATA).expect("english"),
                lemmas: vec![f.monolingual_text_value("cat", "en").expect("lemma")],
                forms: vec![form],
                senses: vec![sense],
            },
        )
        .expect("lexeme");

    let document = EntityDocument::from(lexeme);
    let copy = DatamodelConverter::new(&InterningFactory::new())
        .copy_document(&document)
        .expect("copy");
    assert_eq!(copy, document);
    assert_eq!(copy.revision_id(), 42);
    match copy {
        EntityDocument::Lexeme(lexeme) => {
            assert_eq!(lexeme.forms().len(), 1);
            assert!(lexeme.find_sense(&sense_id).is_some());
        }
        other => panic!("unexpected document {:?}", other),
    }
}

#[test]
fn interning_target_shares_strings_across_the_graph() {
    let f = StandardFactory::new();
    let doc = douglas_adams(&f);
    let target = InterningFactory::new();
    let copy = DatamodelConverter::new(&target)
        .copy_item_document(&doc)
        .expect("copy");

    let statement = &copy.statement_groups()[0].statements()[0];
    assert_eq!(
        copy.item_id().site_iri().as_ptr(),
        statement.property().site_iri().as_ptr()
    );
    // site IRI and the one language code
    assert_eq!(target.len(), 2);
}

#[test]
fn property_document_keeps_datatype_descriptions_and_references() {
    let f = StandardFactory::new();
    let p625 = f.property_id_value("P625", SITE_WIKIDATA).expect("P625");
    let source_ref = ReferenceBuilder::new(&f)
        .with_property_value(
            f.property_id_value("P854", SITE_WIKIDATA).expect("P854"),
            f.string_value("https://example.org/source").expect("url").into(),
        )
        .expect("snak")
        .build()
        .expect("reference");
    let location = f
        .globe_coordinates_value(51.5, -0.125, 0.001, GLOBE_EARTH)
        .expect("coordinates");
    let opaque = f
        .unsupported_value("geo-shape", json!({"file": "Data:London.map"}))
        .expect("opaque");
    let p1 = f.property_id_value("P1", SITE_WIKIDATA).expect("P1");
    let p2 = f.property_id_value("P2", SITE_WIKIDATA).expect("P2");
    let statement = StatementBuilder::new(&f, p625.clone(), p1)
        .with_value(location)
        .with_qualifier_value(p2, opaque.clone())
        .expect("qualifier")
        .with_reference(source_ref)
        .build()
        .expect("statement");
    let group = f.statement_group(vec![statement]).expect("group");
    let doc = f
        .property_document(
            p625,
            DocumentParts::new()
                .with_labels(vec![f
                    .monolingual_text_value("coordinate location", "en")
                    .expect("label")])
                .with_descriptions(vec![
                    f.monolingual_text_value("geocoordinates of the subject", "en")
                        .expect("description"),
                    f.monolingual_text_value("Koordinaten", "de")
                        .expect("description"),
                ])
                .with_statement_groups(vec![group]),
            f.datatype_id_value(DT_ITEM).expect("datatype"),
        )
        .expect("document");

    let copy = DatamodelConverter::new(&InterningFactory::new())
        .copy_property_document(&doc)
        .expect("copy");

    assert_eq!(copy.datatype().iri(), DT_ITEM);
    assert_eq!(copy.find_description("de"), Some("Koordinaten"));
    let statement = &copy.statement_groups()[0].statements()[0];
    assert_eq!(statement.references().len(), 1);
    assert_eq!(statement.references()[0].all_snaks().count(), 1);
    match statement.qualifiers()[0].snaks()[0].value() {
        Some(Value::Unsupported(value)) => assert!(value.is_same(&opaque)),
        other => panic!("expected opaque qualifier, got {:?}", other),
    }
    assert_eq!(copy, doc);
}

#[test]
fn site_links_keep_their_badges() {
    let f = StandardFactory::new();
    let badge = f.item_id_value("Q17437796", SITE_WIKIDATA).expect("badge");
    let q42 = f.item_id_value("Q42", SITE_WIKIDATA).expect("Q42");
    let link = f
        .site_link("Douglas Adams", "enwiki", vec![badge.clone()])
        .expect("link");
    let doc = ItemDocumentBuilder::for_item_id(&f, q42)
        .with_site_link(link)
        .build()
        .expect("document");

    let copy = DatamodelConverter::new(&InterningFactory::new())
        .copy_item_document(&doc)
        .expect("copy");

    let link = copy.site_links().get("enwiki").expect("enwiki");
    assert_eq!(link.page_title(), "Douglas Adams");
    assert_eq!(link.badges(), &[badge][..]);
    assert_eq!(copy, doc);
}

#[test]
fn media_info_document_survives_conversion() {
    let f = StandardFactory::new();
    let m5 = f.media_info_id_value("M5", SITE_WIKIMEDIA_COMMONS).expect("M5");
    let p180 = f.property_id_value("P180", SITE_WIKIDATA).expect("P180");
    let depicts = StatementBuilder::new(&f, m5.clone(), p180.clone())
        .with_value(f.item_id_value("Q42", SITE_WIKIDATA).expect("Q42"))
        .build()
        .expect("statement");
    let doc = f
        .media_info_document(
            m5,
            DocumentParts::new()
                .with_labels(vec![f.monolingual_text_value("Portrait", "en").expect("label")])
                .with_statement_groups(vec![f.statement_group(vec![depicts]).expect("group")]),
        )
        .expect("document");

    let copy = DatamodelConverter::new(&InterningFactory::new())
        .copy_media_info_document(&doc)
        .expect("copy");

    assert_eq!(copy.media_info_id().site_iri(), SITE_WIKIMEDIA_COMMONS);
    assert!(copy.has_statement(&p180));
    assert_eq!(copy, doc);
}

#[test]
fn claim_with_qualifiers_is_copied() {
    let f = StandardFactory::new();
    let qualifier = f
        .value_snak(
            f.property_id_value("P580", SITE_WIKIDATA).expect("P580"),
            f.string_value("1952").expect("string").into(),
        )
        .expect("snak");
    let claim = f
        .claim(
            f.item_id_value("Q42", SITE_WIKIDATA).expect("Q42").into(),
            f.some_value_snak(f.property_id_value("P26", SITE_WIKIDATA).expect("P26"))
                .expect("snak")
                .into(),
            vec![f.snak_group(vec![qualifier.into()]).expect("group")],
        )
        .expect("claim");

    let copy = DatamodelConverter::new(&InterningFactory::new())
        .copy_claim(&claim)
        .expect("copy");

    assert_eq!(copy.subject().id(), "Q42");
    assert_eq!(copy.all_qualifiers().count(), 1);
    assert_eq!(copy, claim);
}
