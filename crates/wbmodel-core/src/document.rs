//! Entity documents
//!
//! A document is the full record of one entity: its terms (labels,
//! descriptions, aliases), its statements and the fields specific to its
//! kind. Labels and descriptions hold at most one text per language; aliases
//! hold an ordered list per language.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::entity_id::{
    EntityIdValue, FormIdValue, ItemIdValue, LexemeIdValue, MediaInfoIdValue, PropertyIdValue,
    SenseIdValue,
};
use crate::sitelink::SiteLink;
use crate::statement::{Statement, StatementGroup};
use crate::value::{DatatypeIdValue, MonolingualTextValue};

/// Terms keyed by language code
pub type TermMap = BTreeMap<String, MonolingualTextValue>;

/// Alias lists keyed by language code
pub type AliasMap = BTreeMap<String, Vec<MonolingualTextValue>>;

/// Input shared by every document constructor
///
/// Terms are given as flat sequences; labels and descriptions may mention
/// each language once, aliases may repeat languages.
#[derive(Debug, Clone, Default)]
pub struct DocumentParts {
    pub labels: Vec<MonolingualTextValue>,
    pub descriptions: Vec<MonolingualTextValue>,
    pub aliases: Vec<MonolingualTextValue>,
    pub statement_groups: Vec<StatementGroup>,
    pub revision_id: u64,
}

impl DocumentParts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_labels(mut self, labels: Vec<MonolingualTextValue>) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_descriptions(mut self, descriptions: Vec<MonolingualTextValue>) -> Self {
        self.descriptions = descriptions;
        self
    }

    pub fn with_aliases(mut self, aliases: Vec<MonolingualTextValue>) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn with_statement_groups(mut self, statement_groups: Vec<StatementGroup>) -> Self {
        self.statement_groups = statement_groups;
        self
    }

    pub fn with_revision_id(mut self, revision_id: u64) -> Self {
        self.revision_id = revision_id;
        self
    }
}

/// Fields common to all documents
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DocumentCommon {
    labels: TermMap,
    descriptions: TermMap,
    aliases: AliasMap,
    statement_groups: Vec<StatementGroup>,
    revision_id: u64,
}

impl DocumentCommon {
    pub(crate) fn new(
        labels: TermMap,
        descriptions: TermMap,
        aliases: AliasMap,
        statement_groups: Vec<StatementGroup>,
        revision_id: u64,
    ) -> Self {
        Self {
            labels,
            descriptions,
            aliases,
            statement_groups,
            revision_id,
        }
    }
}

/// Read access shared by every document kind
pub trait Document {
    fn common(&self) -> &DocumentCommon;

    fn entity_id(&self) -> EntityIdValue;

    fn labels(&self) -> &TermMap {
        &self.common().labels
    }

    fn descriptions(&self) -> &TermMap {
        &self.common().descriptions
    }

    fn aliases(&self) -> &AliasMap {
        &self.common().aliases
    }

    fn statement_groups(&self) -> &[StatementGroup] {
        &self.common().statement_groups
    }

    /// Revision the document was taken from, 0 if unknown
    fn revision_id(&self) -> u64 {
        self.common().revision_id
    }

    fn find_label(&self, language_code: &str) -> Option<&str> {
        self.labels().get(language_code).map(|label| label.text())
    }

    fn find_description(&self, language_code: &str) -> Option<&str> {
        self.descriptions().get(language_code).map(|d| d.text())
    }

    fn find_statement_group(&self, property: &PropertyIdValue) -> Option<&StatementGroup> {
        self.statement_groups()
            .iter()
            .find(|group| group.property() == property)
    }

    fn has_statement(&self, property: &PropertyIdValue) -> bool {
        self.find_statement_group(property).is_some()
    }

    /// Every statement of the document, group by group
    fn all_statements(&self) -> Box<dyn Iterator<Item = &Statement> + '_> {
        Box::new(self.statement_groups().iter().flat_map(|group| group.iter()))
    }
}

/// Document of an item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemDocument {
    id: ItemIdValue,
    #[serde(flatten)]
    common: DocumentCommon,
    site_links: BTreeMap<String, SiteLink>,
}

impl ItemDocument {
    pub(crate) fn new(
        id: ItemIdValue,
        common: DocumentCommon,
        site_links: BTreeMap<String, SiteLink>,
    ) -> Self {
        Self {
            id,
            common,
            site_links,
        }
    }

    pub fn item_id(&self) -> &ItemIdValue {
        &self.id
    }

    /// Site links keyed by site key
    pub fn site_links(&self) -> &BTreeMap<String, SiteLink> {
        &self.site_links
    }
}

/// Document of a property
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyDocument {
    id: PropertyIdValue,
    #[serde(flatten)]
    common: DocumentCommon,
    datatype: DatatypeIdValue,
}

impl PropertyDocument {
    pub(crate) fn new(
        id: PropertyIdValue,
        common: DocumentCommon,
        datatype: DatatypeIdValue,
    ) -> Self {
        Self {
            id,
            common,
            datatype,
        }
    }

    pub fn property_id(&self) -> &PropertyIdValue {
        &self.id
    }

    /// Datatype of the values the property accepts
    pub fn datatype(&self) -> &DatatypeIdValue {
        &self.datatype
    }
}

/// Document of a lexeme form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormDocument {
    id: FormIdValue,
    #[serde(flatten)]
    common: DocumentCommon,
    representations: TermMap,
    grammatical_features: Vec<ItemIdValue>,
}

impl FormDocument {
    pub(crate) fn new(
        id: FormIdValue,
        common: DocumentCommon,
        representations: TermMap,
        grammatical_features: Vec<ItemIdValue>,
    ) -> Self {
        Self {
            id,
            common,
            representations,
            grammatical_features,
        }
    }

    pub fn form_id(&self) -> &FormIdValue {
        &self.id
    }

    pub fn representations(&self) -> &TermMap {
        &self.representations
    }

    pub fn grammatical_features(&self) -> &[ItemIdValue] {
        &self.grammatical_features
    }
}

/// Document of a lexeme sense
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SenseDocument {
    id: SenseIdValue,
    #[serde(flatten)]
    common: DocumentCommon,
    glosses: TermMap,
}

impl SenseDocument {
    pub(crate) fn new(id: SenseIdValue, common: DocumentCommon, glosses: TermMap) -> Self {
        Self {
            id,
            common,
            glosses,
        }
    }

    pub fn sense_id(&self) -> &SenseIdValue {
        &self.id
    }

    pub fn glosses(&self) -> &TermMap {
        &self.glosses
    }
}

/// Document of a lexeme with its forms and senses
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LexemeDocument {
    id: LexemeIdValue,
    #[serde(flatten)]
    common: DocumentCommon,
    lexical_category: ItemIdValue,
    language: ItemIdValue,
    lemmas: TermMap,
    forms: Vec<FormDocument>,
    senses: Vec<SenseDocument>,
}

/// Lexeme specific input of [`crate::factory::DataObjectFactory::lexeme_document`]
#[derive(Debug, Clone)]
pub struct LexemeParts {
    pub lexical_category: ItemIdValue,
    pub language: ItemIdValue,
    pub lemmas: Vec<MonolingualTextValue>,
    pub forms: Vec<FormDocument>,
    pub senses: Vec<SenseDocument>,
}

impl LexemeDocument {
    pub(crate) fn new(
        id: LexemeIdValue,
        common: DocumentCommon,
        lexical_category: ItemIdValue,
        language: ItemIdValue,
        lemmas: TermMap,
        forms: Vec<FormDocument>,
        senses: Vec<SenseDocument>,
    ) -> Self {
        Self {
            id,
            common,
            lexical_category,
            language,
            lemmas,
            forms,
            senses,
        }
    }

    pub fn lexeme_id(&self) -> &LexemeIdValue {
        &self.id
    }

    /// Item naming the lexical category, e.g. "noun"
    pub fn lexical_category(&self) -> &ItemIdValue {
        &self.lexical_category
    }

    /// Item naming the language of the lexeme
    pub fn language(&self) -> &ItemIdValue {
        &self.language
    }

    pub fn lemmas(&self) -> &TermMap {
        &self.lemmas
    }

    pub fn forms(&self) -> &[FormDocument] {
        &self.forms
    }

    pub fn senses(&self) -> &[SenseDocument] {
        &self.senses
    }

    pub fn find_form(&self, id: &FormIdValue) -> Option<&FormDocument> {
        self.forms.iter().find(|form| form.form_id() == id)
    }

    pub fn find_sense(&self, id: &SenseIdValue) -> Option<&SenseDocument> {
        self.senses.iter().find(|sense| sense.sense_id() == id)
    }
}

/// Document of a media file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaInfoDocument {
    id: MediaInfoIdValue,
    #[serde(flatten)]
    common: DocumentCommon,
}

impl MediaInfoDocument {
    pub(crate) fn new(id: MediaInfoIdValue, common: DocumentCommon) -> Self {
        Self { id, common }
    }

    pub fn media_info_id(&self) -> &MediaInfoIdValue {
        &self.id
    }
}

macro_rules! impl_document {
    ($($doc:ty),* $(,)?) => {
        $(
            impl Document for $doc {
                fn common(&self) -> &DocumentCommon {
                    &self.common
                }

                fn entity_id(&self) -> EntityIdValue {
                    self.id.clone().into()
                }
            }
        )*
    };
}

impl_document!(
    ItemDocument,
    PropertyDocument,
    LexemeDocument,
    FormDocument,
    SenseDocument,
    MediaInfoDocument,
);

/// Any entity document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EntityDocument {
    Item(ItemDocument),
    Property(PropertyDocument),
    Lexeme(LexemeDocument),
    Form(FormDocument),
    Sense(SenseDocument),
    MediaInfo(MediaInfoDocument),
}

impl Document for EntityDocument {
    fn common(&self) -> &DocumentCommon {
        match self {
            Self::Item(d) => d.common(),
            Self::Property(d) => d.common(),
            Self::Lexeme(d) => d.common(),
            Self::Form(d) => d.common(),
            Self::Sense(d) => d.common(),
            Self::MediaInfo(d) => d.common(),
        }
    }

    fn entity_id(&self) -> EntityIdValue {
        match self {
            Self::Item(d) => d.entity_id(),
            Self::Property(d) => d.entity_id(),
            Self::Lexeme(d) => d.entity_id(),
            Self::Form(d) => d.entity_id(),
            Self::Sense(d) => d.entity_id(),
            Self::MediaInfo(d) => d.entity_id(),
        }
    }
}

macro_rules! into_document {
    ($($doc:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$doc> for EntityDocument {
                fn from(document: $doc) -> Self {
                    EntityDocument::$variant(document)
                }
            }
        )*
    };
}

into_document! {
    ItemDocument => Item,
    PropertyDocument => Property,
    LexemeDocument => Lexeme,
    FormDocument => Form,
    SenseDocument => Sense,
    MediaInfoDocument => MediaInfo,
}
