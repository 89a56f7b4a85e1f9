//! Incremental construction of statements, references and documents
//!
//! Builders collect parts one call at a time and hand them to a factory in
//! one go when [`build`](ItemDocumentBuilder::build) is called, so every
//! invariant is still checked by the factory. Methods taking plain strings
//! build the value through the factory right away and return a `Result`.

use std::collections::BTreeMap;

use crate::document::{Document, DocumentParts, ItemDocument, PropertyDocument, TermMap};
use crate::entity_id::{EntityIdValue, ItemIdValue, PropertyIdValue};
use crate::error::Result;
use crate::factory::DataObjectFactory;
use crate::sitelink::SiteLink;
use crate::snak::{Snak, SnakGroup};
use crate::statement::{Reference, Statement, StatementGroup, StatementRank};
use crate::value::{DatatypeIdValue, MonolingualTextValue, Value};

/// Group snaks by property in first-seen order
fn group_snaks<F: DataObjectFactory + ?Sized>(
    factory: &F,
    snaks: Vec<Snak>,
) -> Result<Vec<SnakGroup>> {
    let mut grouped: Vec<Vec<Snak>> = Vec::new();
    for snak in snaks {
        match grouped
            .iter_mut()
            .find(|group| group[0].property() == snak.property())
        {
            Some(group) => group.push(snak),
            None => grouped.push(vec![snak]),
        }
    }
    grouped.into_iter().map(|g| factory.snak_group(g)).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// References
// ─────────────────────────────────────────────────────────────────────────────

/// Builds a [`Reference`] from individual snaks
pub struct ReferenceBuilder<'f, F: DataObjectFactory + ?Sized> {
    factory: &'f F,
    snaks: Vec<Snak>,
}

impl<'f, F: DataObjectFactory + ?Sized> ReferenceBuilder<'f, F> {
    pub fn new(factory: &'f F) -> Self {
        Self {
            factory,
            snaks: Vec::new(),
        }
    }

    pub fn with_snak(mut self, snak: Snak) -> Self {
        self.snaks.push(snak);
        self
    }

    pub fn with_property_value(mut self, property: PropertyIdValue, value: Value) -> Result<Self> {
        let snak = self.factory.value_snak(property, value)?;
        self.snaks.push(snak.into());
        Ok(self)
    }

    pub fn with_some_value(mut self, property: PropertyIdValue) -> Result<Self> {
        let snak = self.factory.some_value_snak(property)?;
        self.snaks.push(snak.into());
        Ok(self)
    }

    pub fn with_no_value(mut self, property: PropertyIdValue) -> Result<Self> {
        let snak = self.factory.no_value_snak(property)?;
        self.snaks.push(snak.into());
        Ok(self)
    }

    pub fn build(self) -> Result<Reference> {
        let groups = group_snaks(self.factory, self.snaks)?;
        self.factory.reference(groups)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Statements
// ─────────────────────────────────────────────────────────────────────────────

enum MainSnak {
    Value(Value),
    SomeValue,
    NoValue,
}

/// Builds a [`Statement`] for one subject and property
///
/// Without a value the main snak is a some-value snak.
pub struct StatementBuilder<'f, F: DataObjectFactory + ?Sized> {
    factory: &'f F,
    subject: EntityIdValue,
    property: PropertyIdValue,
    main: MainSnak,
    qualifiers: Vec<Snak>,
    references: Vec<Reference>,
    rank: StatementRank,
    statement_id: String,
}

impl<'f, F: DataObjectFactory + ?Sized> StatementBuilder<'f, F> {
    pub fn new(
        factory: &'f F,
        subject: impl Into<EntityIdValue>,
        property: PropertyIdValue,
    ) -> Self {
        Self {
            factory,
            subject: subject.into(),
            property,
            main: MainSnak::SomeValue,
            qualifiers: Vec::new(),
            references: Vec::new(),
            rank: StatementRank::Normal,
            statement_id: String::new(),
        }
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.main = MainSnak::Value(value.into());
        self
    }

    pub fn with_some_value(mut self) -> Self {
        self.main = MainSnak::SomeValue;
        self
    }

    pub fn with_no_value(mut self) -> Self {
        self.main = MainSnak::NoValue;
        self
    }

    pub fn with_qualifier(mut self, snak: Snak) -> Self {
        self.qualifiers.push(snak);
        self
    }

    pub fn with_qualifier_value(
        mut self,
        property: PropertyIdValue,
        value: impl Into<Value>,
    ) -> Result<Self> {
        let snak = self.factory.value_snak(property, value.into())?;
        self.qualifiers.push(snak.into());
        Ok(self)
    }

    pub fn with_reference(mut self, reference: Reference) -> Self {
        self.references.push(reference);
        self
    }

    pub fn with_references(mut self, references: impl IntoIterator<Item = Reference>) -> Self {
        self.references.extend(references);
        self
    }

    pub fn with_rank(mut self, rank: StatementRank) -> Self {
        self.rank = rank;
        self
    }

    pub fn with_id(mut self, statement_id: impl Into<String>) -> Self {
        self.statement_id = statement_id.into();
        self
    }

    pub fn build(self) -> Result<Statement> {
        let main_snak: Snak = match self.main {
            MainSnak::Value(value) => self.factory.value_snak(self.property, value)?.into(),
            MainSnak::SomeValue => self.factory.some_value_snak(self.property)?.into(),
            MainSnak::NoValue => self.factory.no_value_snak(self.property)?.into(),
        };
        let qualifiers = group_snaks(self.factory, self.qualifiers)?;
        self.factory.statement(
            self.subject,
            main_snak,
            qualifiers,
            self.references,
            self.rank,
            &self.statement_id,
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Documents
// ─────────────────────────────────────────────────────────────────────────────

// Terms and statements shared by the document builders.
struct TermsAndStatements {
    labels: TermMap,
    descriptions: TermMap,
    aliases: Vec<MonolingualTextValue>,
    statements: Vec<Statement>,
    revision_id: u64,
}

impl TermsAndStatements {
    fn empty() -> Self {
        Self {
            labels: TermMap::new(),
            descriptions: TermMap::new(),
            aliases: Vec::new(),
            statements: Vec::new(),
            revision_id: 0,
        }
    }

    fn from_document<D: Document + ?Sized>(document: &D) -> Self {
        Self {
            labels: document.labels().clone(),
            descriptions: document.descriptions().clone(),
            aliases: document.aliases().values().flatten().cloned().collect(),
            statements: document.all_statements().cloned().collect(),
            revision_id: document.revision_id(),
        }
    }

    fn set_label(&mut self, label: MonolingualTextValue) {
        self.labels.insert(label.language_code().to_string(), label);
    }

    fn set_description(&mut self, description: MonolingualTextValue) {
        self.descriptions
            .insert(description.language_code().to_string(), description);
    }

    fn into_parts<F: DataObjectFactory + ?Sized>(self, factory: &F) -> Result<DocumentParts> {
        let mut grouped: Vec<Vec<Statement>> = Vec::new();
        for statement in self.statements {
            match grouped
                .iter_mut()
                .find(|group| group[0].property() == statement.property())
            {
                Some(group) => group.push(statement),
                None => grouped.push(vec![statement]),
            }
        }
        let statement_groups = grouped
            .into_iter()
            .map(|g| factory.statement_group(g))
            .collect::<Result<Vec<StatementGroup>>>()?;
        Ok(DocumentParts {
            labels: self.labels.into_values().collect(),
            descriptions: self.descriptions.into_values().collect(),
            aliases: self.aliases,
            statement_groups,
            revision_id: self.revision_id,
        })
    }
}

macro_rules! term_methods {
    () => {
        /// Set the label of its language, replacing an earlier one
        pub fn with_label(mut self, label: MonolingualTextValue) -> Self {
            self.terms.set_label(label);
            self
        }

        pub fn with_label_text(self, text: &str, language_code: &str) -> Result<Self> {
            let label = self.factory.monolingual_text_value(text, language_code)?;
            Ok(self.with_label(label))
        }

        /// Set the description of its language, replacing an earlier one
        pub fn with_description(mut self, description: MonolingualTextValue) -> Self {
            self.terms.set_description(description);
            self
        }

        pub fn with_description_text(self, text: &str, language_code: &str) -> Result<Self> {
            let description = self.factory.monolingual_text_value(text, language_code)?;
            Ok(self.with_description(description))
        }

        /// Append an alias after the existing ones of its language
        pub fn with_alias(mut self, alias: MonolingualTextValue) -> Self {
            self.terms.aliases.push(alias);
            self
        }

        pub fn with_alias_text(self, text: &str, language_code: &str) -> Result<Self> {
            let alias = self.factory.monolingual_text_value(text, language_code)?;
            Ok(self.with_alias(alias))
        }

        /// Add a statement; statements are grouped by property on build
        pub fn with_statement(mut self, statement: Statement) -> Self {
            self.terms.statements.push(statement);
            self
        }

        pub fn with_revision_id(mut self, revision_id: u64) -> Self {
            self.terms.revision_id = revision_id;
            self
        }
    };
}

/// Builds an [`ItemDocument`]
pub struct ItemDocumentBuilder<'f, F: DataObjectFactory + ?Sized> {
    factory: &'f F,
    id: ItemIdValue,
    terms: TermsAndStatements,
    site_links: BTreeMap<String, SiteLink>,
}

impl<'f, F: DataObjectFactory + ?Sized> ItemDocumentBuilder<'f, F> {
    pub fn for_item_id(factory: &'f F, id: ItemIdValue) -> Self {
        Self {
            factory,
            id,
            terms: TermsAndStatements::empty(),
            site_links: BTreeMap::new(),
        }
    }

    /// Start from the contents of an existing document
    pub fn from_document(factory: &'f F, document: &ItemDocument) -> Self {
        Self {
            factory,
            id: document.item_id().clone(),
            terms: TermsAndStatements::from_document(document),
            site_links: document.site_links().clone(),
        }
    }

    term_methods!();

    /// Set the link for its site, replacing an earlier one
    pub fn with_site_link(mut self, link: SiteLink) -> Self {
        self.site_links.insert(link.site_key().to_string(), link);
        self
    }

    pub fn build(self) -> Result<ItemDocument> {
        let parts = self.terms.into_parts(self.factory)?;
        let site_links = self.site_links.into_values().collect();
        self.factory.item_document(self.id, parts, site_links)
    }
}

/// Builds a [`PropertyDocument`]
pub struct PropertyDocumentBuilder<'f, F: DataObjectFactory + ?Sized> {
    factory: &'f F,
    id: PropertyIdValue,
    datatype: DatatypeIdValue,
    terms: TermsAndStatements,
}

impl<'f, F: DataObjectFactory + ?Sized> PropertyDocumentBuilder<'f, F> {
    pub fn for_property_id(factory: &'f F, id: PropertyIdValue, datatype: DatatypeIdValue) -> Self {
        Self {
            factory,
            id,
            datatype,
            terms: TermsAndStatements::empty(),
        }
    }

    /// Start from the contents of an existing document
    pub fn from_document(factory: &'f F, document: &PropertyDocument) -> Self {
        Self {
            factory,
            id: document.property_id().clone(),
            datatype: document.datatype().clone(),
            terms: TermsAndStatements::from_document(document),
        }
    }

    term_methods!();

    pub fn with_datatype(mut self, datatype: DatatypeIdValue) -> Self {
        self.datatype = datatype;
        self
    }

    pub fn build(self) -> Result<PropertyDocument> {
        let parts = self.terms.into_parts(self.factory)?;
        self.factory.property_document(self.id, parts, self.datatype)
    }
}
