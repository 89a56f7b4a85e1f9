//! Property tests for conversion
//!
//! Generated statements are converted between factories and compared
//! structurally.

use proptest::collection::vec;
use proptest::prelude::*;
use wbmodel_core::{
    DataObjectFactory, DatamodelConverter, Document, DocumentParts, InterningFactory,
    ItemDocument, Snak, StandardFactory, Statement, StatementRank, TimePrecision, Value,
    CM_GREGORIAN_PRO, GLOBE_EARTH, SITE_WIKIDATA,
};

// =============================================================================
// GENERATORS
// =============================================================================

#[derive(Debug, Clone)]
enum ValueShape {
    Item(u32),
    Text(String),
    Mono(String, String),
    Time(i64, u8, u8),
    Quantity(i64, u32),
    Globe(f64, f64),
}

fn value_shape() -> impl Strategy<Value = ValueShape> {
    prop_oneof![
        (1u32..100_000).prop_map(ValueShape::Item),
        "[a-zA-Z0-9 ]{0,12}".prop_map(ValueShape::Text),
        ("[a-z ]{1,12}", "[a-z]{2,3}").prop_map(|(t, l)| ValueShape::Mono(t, l)),
        (-10_000i64..3000, 0u8..=12, 0u8..=28).prop_map(|(y, m, d)| ValueShape::Time(y, m, d)),
        (-1_000_000i64..1_000_000, 0u32..4).prop_map(|(n, s)| ValueShape::Quantity(n, s)),
        (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lon)| ValueShape::Globe(lat, lon)),
    ]
}

#[derive(Debug, Clone)]
enum SnakShape {
    Value(u32, ValueShape),
    Some(u32),
    No(u32),
}

fn snak_shape() -> impl Strategy<Value = SnakShape> {
    prop_oneof![
        (1u32..50, value_shape()).prop_map(|(p, v)| SnakShape::Value(p, v)),
        (1u32..50).prop_map(SnakShape::Some),
        (1u32..50).prop_map(SnakShape::No),
    ]
}

fn any_rank() -> impl Strategy<Value = StatementRank> {
    prop_oneof![
        Just(StatementRank::Preferred),
        Just(StatementRank::Normal),
        Just(StatementRank::Deprecated),
    ]
}

fn build_value(f: &StandardFactory, shape: &ValueShape) -> Value {
    match shape {
        ValueShape::Item(n) => f
            .item_id_value(&format!("Q{}", n), SITE_WIKIDATA)
            .expect("item")
            .into(),
        ValueShape::Text(t) => f.string_value(t).expect("string").into(),
        ValueShape::Mono(t, l) => f.monolingual_text_value(t, l).expect("text").into(),
        ValueShape::Time(y, m, d) => f
            .time_value(*y, *m, *d, 0, 0, 0, TimePrecision::Day, 0, 0, 0, CM_GREGORIAN_PRO)
            .expect("time")
            .into(),
        ValueShape::Quantity(n, scale) => {
            let text = if *scale == 0 {
                n.to_string()
            } else {
                format!("{}.{}", n, "0".repeat(*scale as usize))
            };
            f.quantity_value(text.parse().expect("decimal"), None, None, None)
                .expect("quantity")
                .into()
        }
        ValueShape::Globe(lat, lon) => f
            .globe_coordinates_value(*lat, *lon, 0.001, GLOBE_EARTH)
            .expect("coordinates")
            .into(),
    }
}

fn build_snak(f: &StandardFactory, shape: &SnakShape) -> Snak {
    let property = |n: u32| {
        f.property_id_value(&format!("P{}", n), SITE_WIKIDATA)
            .expect("property")
    };
    match shape {
        SnakShape::Value(p, v) => f
            .value_snak(property(*p), build_value(f, v))
            .expect("snak")
            .into(),
        SnakShape::Some(p) => f.some_value_snak(property(*p)).expect("snak").into(),
        SnakShape::No(p) => f.no_value_snak(property(*p)).expect("snak").into(),
    }
}

fn build_statement(
    f: &StandardFactory,
    main: &SnakShape,
    qualifiers: &[SnakShape],
    references: &[SnakShape],
    rank: StatementRank,
    index: usize,
) -> Statement {
    let subject = f.item_id_value("Q42", SITE_WIKIDATA).expect("subject");
    let qualifier_groups = qualifiers
        .iter()
        .map(|q| f.snak_group(vec![build_snak(f, q)]).expect("group"))
        .collect();
    let references = references
        .iter()
        .map(|r| {
            let group = f.snak_group(vec![build_snak(f, r)]).expect("group");
            f.reference(vec![group]).expect("reference")
        })
        .collect();
    f.statement(
        subject.into(),
        build_snak(f, main),
        qualifier_groups,
        references,
        rank,
        &format!("Q42${}", index),
    )
    .expect("statement")
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Converting twice gives the same result as converting once.
    #[test]
    fn conversion_is_idempotent(
        main in snak_shape(),
        qualifiers in vec(snak_shape(), 0..4),
        references in vec(snak_shape(), 0..3),
        rank in any_rank(),
    ) {
        let source = StandardFactory::new();
        let statement = build_statement(&source, &main, &qualifiers, &references, rank, 0);

        let target = InterningFactory::new();
        let converter = DatamodelConverter::new(&target);
        let once = converter.copy_statement(&statement).expect("once");
        let twice = converter.copy_statement(&once).expect("twice");
        prop_assert_eq!(&once, &twice);
    }

    /// A converted document equals its source field for field.
    #[test]
    fn conversion_preserves_structure(
        mains in vec((snak_shape(), any_rank()), 1..6),
        qualifiers in vec(snak_shape(), 0..3),
        references in vec(snak_shape(), 0..3),
        description in "[a-zA-Z ]{1,20}",
        badges in vec(1u32..1000, 0..3),
        revision in any::<u64>(),
    ) {
        let source = StandardFactory::new();
        let statements: Vec<Statement> = mains
            .iter()
            .enumerate()
            .map(|(i, (main, rank))| {
                build_statement(&source, main, &qualifiers, &references, *rank, i)
            })
            .collect();

        // group by main property, first-seen order
        let mut grouped: Vec<Vec<Statement>> = Vec::new();
        for statement in statements {
            match grouped.iter_mut().find(|g| g[0].property() == statement.property()) {
                Some(group) => group.push(statement),
                None => grouped.push(vec![statement]),
            }
        }
        let groups = grouped
            .into_iter()
            .map(|g| source.statement_group(g).expect("group"))
            .collect();

        let badges = badges
            .iter()
            .map(|n| source.item_id_value(&format!("Q{}", n), SITE_WIKIDATA).expect("badge"))
            .collect();
        let site_link = source.site_link("Douglas Adams", "enwiki", badges).expect("link");

        let id = source.item_id_value("Q42", SITE_WIKIDATA).expect("id");
        let doc: ItemDocument = source
            .item_document(
                id,
                DocumentParts::new()
                    .with_descriptions(vec![source
                        .monolingual_text_value(&description, "en")
                        .expect("description")])
                    .with_statement_groups(groups)
                    .with_revision_id(revision),
                vec![site_link],
            )
            .expect("document");

        let copy = DatamodelConverter::new(&InterningFactory::new())
            .copy_item_document(&doc)
            .expect("copy");
        prop_assert_eq!(copy.revision_id(), revision);
        let source_ids: Vec<&str> = doc.all_statements().map(|s| s.statement_id()).collect();
        let copy_ids: Vec<&str> = copy.all_statements().map(|s| s.statement_id()).collect();
        prop_assert_eq!(source_ids, copy_ids);
        prop_assert_eq!(copy, doc);
    }
}
