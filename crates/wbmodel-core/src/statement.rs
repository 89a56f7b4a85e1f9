//! Claims, references and statements

use std::fmt;

use serde::Serialize;

use crate::entity_id::{EntityIdValue, PropertyIdValue};
use crate::snak::{Snak, SnakGroup};

/// Precedence of a statement among the statements for one property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementRank {
    Preferred,
    #[default]
    Normal,
    Deprecated,
}

impl fmt::Display for StatementRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preferred => write!(f, "preferred"),
            Self::Normal => write!(f, "normal"),
            Self::Deprecated => write!(f, "deprecated"),
        }
    }
}

/// A subject, a main snak and qualifying snaks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Claim {
    subject: EntityIdValue,
    main_snak: Snak,
    qualifiers: Vec<SnakGroup>,
}

impl Claim {
    pub(crate) fn new(subject: EntityIdValue, main_snak: Snak, qualifiers: Vec<SnakGroup>) -> Self {
        Self {
            subject,
            main_snak,
            qualifiers,
        }
    }

    pub fn subject(&self) -> &EntityIdValue {
        &self.subject
    }

    pub fn main_snak(&self) -> &Snak {
        &self.main_snak
    }

    pub fn qualifiers(&self) -> &[SnakGroup] {
        &self.qualifiers
    }

    pub(crate) fn into_parts(self) -> (EntityIdValue, Snak, Vec<SnakGroup>) {
        (self.subject, self.main_snak, self.qualifiers)
    }

    /// All qualifier snaks, group by group
    pub fn all_qualifiers(&self) -> impl Iterator<Item = &Snak> {
        self.qualifiers.iter().flat_map(|group| group.iter())
    }
}

/// Provenance evidence for a statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reference {
    snak_groups: Vec<SnakGroup>,
}

impl Reference {
    pub(crate) fn new(snak_groups: Vec<SnakGroup>) -> Self {
        Self { snak_groups }
    }

    pub fn snak_groups(&self) -> &[SnakGroup] {
        &self.snak_groups
    }

    /// All snaks of the reference, group by group
    pub fn all_snaks(&self) -> impl Iterator<Item = &Snak> {
        self.snak_groups.iter().flat_map(|group| group.iter())
    }
}

/// A claim together with references, rank and a stable id
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    subject: EntityIdValue,
    main_snak: Snak,
    qualifiers: Vec<SnakGroup>,
    references: Vec<Reference>,
    rank: StatementRank,
    statement_id: String,
}

impl Statement {
    pub(crate) fn new(
        subject: EntityIdValue,
        main_snak: Snak,
        qualifiers: Vec<SnakGroup>,
        references: Vec<Reference>,
        rank: StatementRank,
        statement_id: String,
    ) -> Self {
        Self {
            subject,
            main_snak,
            qualifiers,
            references,
            rank,
            statement_id,
        }
    }

    pub fn subject(&self) -> &EntityIdValue {
        &self.subject
    }

    pub fn main_snak(&self) -> &Snak {
        &self.main_snak
    }

    pub fn qualifiers(&self) -> &[SnakGroup] {
        &self.qualifiers
    }

    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    pub fn rank(&self) -> StatementRank {
        self.rank
    }

    /// Id of the statement, empty if none was assigned yet
    pub fn statement_id(&self) -> &str {
        &self.statement_id
    }

    /// Property of the main snak
    pub fn property(&self) -> &PropertyIdValue {
        self.main_snak.property()
    }

    /// The claim part of this statement
    pub fn claim(&self) -> Claim {
        Claim::new(
            self.subject.clone(),
            self.main_snak.clone(),
            self.qualifiers.clone(),
        )
    }
}

/// Non-empty sequence of statements sharing subject and main-snak property
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementGroup {
    statements: Vec<Statement>,
}

impl StatementGroup {
    // Callers guarantee a non-empty sequence with one subject and property.
    pub(crate) fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn property(&self) -> &PropertyIdValue {
        self.statements[0].property()
    }

    pub fn subject(&self) -> &EntityIdValue {
        self.statements[0].subject()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.statements.iter()
    }

    /// Preferred statements if there are any, otherwise the normal ones
    pub fn best_statements(&self) -> Vec<&Statement> {
        let preferred: Vec<&Statement> = self
            .statements
            .iter()
            .filter(|s| s.rank() == StatementRank::Preferred)
            .collect();
        if !preferred.is_empty() {
            return preferred;
        }
        self.statements
            .iter()
            .filter(|s| s.rank() == StatementRank::Normal)
            .collect()
    }
}

impl<'a> IntoIterator for &'a StatementGroup {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity_id::{ItemIdValue, SITE_WIKIDATA};
    use crate::snak::NoValueSnak;
    use std::sync::Arc;

    fn statement(rank: StatementRank, id: &str) -> Statement {
        let subject = ItemIdValue::new("Q1".into(), Arc::from(SITE_WIKIDATA)).into();
        let property = PropertyIdValue::new("P1".into(), Arc::from(SITE_WIKIDATA));
        Statement::new(
            subject,
            NoValueSnak::new(property).into(),
            Vec::new(),
            Vec::new(),
            rank,
            id.to_string(),
        )
    }

    #[test]
    fn test_best_statements_prefers_preferred() {
        let group = StatementGroup::new(vec![
            statement(StatementRank::Normal, "a"),
            statement(StatementRank::Preferred, "b"),
            statement(StatementRank::Deprecated, "c"),
        ]);
        let best: Vec<&str> = group.best_statements().iter().map(|s| s.statement_id()).collect();
        assert_eq!(best, vec!["b"]);
    }

    #[test]
    fn test_best_statements_falls_back_to_normal() {
        let group = StatementGroup::new(vec![
            statement(StatementRank::Deprecated, "a"),
            statement(StatementRank::Normal, "b"),
            statement(StatementRank::Normal, "c"),
        ]);
        let best: Vec<&str> = group.best_statements().iter().map(|s| s.statement_id()).collect();
        assert_eq!(best, vec!["b", "c"]);
    }

    #[test]
    fn test_claim_view() {
        let s = statement(StatementRank::Normal, "x");
        let claim = s.claim();
        assert_eq!(claim.subject(), s.subject());
        assert_eq!(claim.main_snak(), s.main_snak());
        assert!(claim.qualifiers().is_empty());
    }

    #[test]
    fn test_default_rank_is_normal() {
        assert_eq!(StatementRank::default(), StatementRank::Normal);
        assert_eq!(StatementRank::Deprecated.to_string(), "deprecated");
    }
}
