//! Snaks - the atomic assertions about a property

use serde::Serialize;

use crate::entity_id::PropertyIdValue;
use crate::value::Value;

/// Asserts a concrete value for a property
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueSnak {
    property: PropertyIdValue,
    value: Value,
}

impl ValueSnak {
    pub(crate) fn new(property: PropertyIdValue, value: Value) -> Self {
        Self { property, value }
    }

    pub fn property(&self) -> &PropertyIdValue {
        &self.property
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// Asserts that the property has some value that is not known
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SomeValueSnak {
    property: PropertyIdValue,
}

impl SomeValueSnak {
    pub(crate) fn new(property: PropertyIdValue) -> Self {
        Self { property }
    }

    pub fn property(&self) -> &PropertyIdValue {
        &self.property
    }
}

/// Asserts that the property has no value at all
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NoValueSnak {
    property: PropertyIdValue,
}

impl NoValueSnak {
    pub(crate) fn new(property: PropertyIdValue) -> Self {
        Self { property }
    }

    pub fn property(&self) -> &PropertyIdValue {
        &self.property
    }
}

/// The closed set of snaks
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "snaktype", rename_all = "lowercase")]
pub enum Snak {
    Value(ValueSnak),
    SomeValue(SomeValueSnak),
    NoValue(NoValueSnak),
}

impl Snak {
    /// Property the snak is about
    pub fn property(&self) -> &PropertyIdValue {
        match self {
            Snak::Value(s) => s.property(),
            Snak::SomeValue(s) => s.property(),
            Snak::NoValue(s) => s.property(),
        }
    }

    /// The asserted value, `None` for some-value and no-value snaks
    pub fn value(&self) -> Option<&Value> {
        match self {
            Snak::Value(s) => Some(s.value()),
            _ => None,
        }
    }

    /// Dispatch to the visitor method matching this variant
    pub fn accept<R, V>(&self, visitor: &mut V) -> R
    where
        V: SnakVisitor<R> + ?Sized,
    {
        match self {
            Snak::Value(s) => visitor.visit_value_snak(s),
            Snak::SomeValue(s) => visitor.visit_some_value_snak(s),
            Snak::NoValue(s) => visitor.visit_no_value_snak(s),
        }
    }
}

impl From<ValueSnak> for Snak {
    fn from(snak: ValueSnak) -> Self {
        Snak::Value(snak)
    }
}

impl From<SomeValueSnak> for Snak {
    fn from(snak: SomeValueSnak) -> Self {
        Snak::SomeValue(snak)
    }
}

impl From<NoValueSnak> for Snak {
    fn from(snak: NoValueSnak) -> Self {
        Snak::NoValue(snak)
    }
}

/// Visitor over the closed set of [`Snak`] variants
pub trait SnakVisitor<R> {
    fn visit_value_snak(&mut self, snak: &ValueSnak) -> R;
    fn visit_some_value_snak(&mut self, snak: &SomeValueSnak) -> R;
    fn visit_no_value_snak(&mut self, snak: &NoValueSnak) -> R;
}

/// Non-empty sequence of snaks sharing one property
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnakGroup {
    snaks: Vec<Snak>,
}

impl SnakGroup {
    // Callers guarantee a non-empty, single-property sequence.
    pub(crate) fn new(snaks: Vec<Snak>) -> Self {
        Self { snaks }
    }

    /// The property shared by every snak of the group
    pub fn property(&self) -> &PropertyIdValue {
        self.snaks[0].property()
    }

    pub fn snaks(&self) -> &[Snak] {
        &self.snaks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snak> {
        self.snaks.iter()
    }

    pub fn len(&self) -> usize {
        self.snaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snaks.is_empty()
    }
}

impl<'a> IntoIterator for &'a SnakGroup {
    type Item = &'a Snak;
    type IntoIter = std::slice::Iter<'a, Snak>;

    fn into_iter(self) -> Self::IntoIter {
        self.snaks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity_id::SITE_WIKIDATA;
    use crate::value::StringValue;
    use std::sync::Arc;

    fn property(id: &str) -> PropertyIdValue {
        PropertyIdValue::new(id.to_string(), Arc::from(SITE_WIKIDATA))
    }

    struct Describe;

    impl SnakVisitor<String> for Describe {
        fn visit_value_snak(&mut self, snak: &ValueSnak) -> String {
            format!("{} = {}", snak.property().id(), snak.value().type_name())
        }
        fn visit_some_value_snak(&mut self, snak: &SomeValueSnak) -> String {
            format!("{} = ?", snak.property().id())
        }
        fn visit_no_value_snak(&mut self, snak: &NoValueSnak) -> String {
            format!("{} = none", snak.property().id())
        }
    }

    #[test]
    fn test_snak_property_and_value() {
        let snak: Snak =
            ValueSnak::new(property("P1"), StringValue::new("x".into()).into()).into();
        assert_eq!(snak.property().id(), "P1");
        assert!(snak.value().is_some());

        let snak: Snak = NoValueSnak::new(property("P2")).into();
        assert_eq!(snak.property().id(), "P2");
        assert!(snak.value().is_none());
    }

    #[test]
    fn test_snak_visitor() {
        let value: Snak =
            ValueSnak::new(property("P1"), StringValue::new("x".into()).into()).into();
        let some: Snak = SomeValueSnak::new(property("P2")).into();
        let none: Snak = NoValueSnak::new(property("P3")).into();

        assert_eq!(value.accept(&mut Describe), "P1 = string");
        assert_eq!(some.accept(&mut Describe), "P2 = ?");
        assert_eq!(none.accept(&mut Describe), "P3 = none");
    }

    #[test]
    fn test_some_value_and_no_value_differ() {
        let some: Snak = SomeValueSnak::new(property("P2")).into();
        let none: Snak = NoValueSnak::new(property("P2")).into();
        assert_ne!(some, none);
    }
}
