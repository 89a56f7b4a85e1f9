//! Factory that shares repeated strings

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::trace;

use super::DataObjectFactory;

/// Factory that keeps one allocation per distinct shared string
///
/// Site IRIs, language codes, calendar models, globes and datatype IRIs
/// repeat across nearly every value of a large document. This factory hands
/// out the same `Arc<str>` for equal strings, so converting a graph through
/// it collapses those duplicates.
#[derive(Debug, Default)]
pub struct InterningFactory {
    pool: RwLock<HashSet<Arc<str>>>,
}

impl InterningFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct strings held
    pub fn len(&self) -> usize {
        self.pool
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DataObjectFactory for InterningFactory {
    fn name(&self) -> &'static str {
        "interning"
    }

    fn share_str(&self, value: &str) -> Arc<str> {
        // The pool only grows, so a poisoned lock still holds valid entries.
        if let Some(shared) = self
            .pool
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(value)
        {
            return Arc::clone(shared);
        }

        let mut pool = self.pool.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(shared) = pool.get(value) {
            return Arc::clone(shared);
        }
        let shared: Arc<str> = Arc::from(value);
        pool.insert(Arc::clone(&shared));
        trace!(value, size = pool.len(), "interned string");
        shared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity_id::{SITE_WIKIDATA, SITE_WIKIMEDIA_COMMONS};

    #[test]
    fn test_interning_shares_site_iri() {
        let f = InterningFactory::new();
        let a = f.item_id_value("Q1", SITE_WIKIDATA).unwrap();
        let b = f.property_id_value("P2", SITE_WIKIDATA).unwrap();
        assert_eq!(a.site_iri().as_ptr(), b.site_iri().as_ptr());
        assert_eq!(f.len(), 1);

        f.media_info_id_value("M3", SITE_WIKIMEDIA_COMMONS).unwrap();
        assert_eq!(f.len(), 2);
    }

    #[test]
    fn test_interning_shares_language_codes() {
        let f = InterningFactory::new();
        assert!(f.is_empty());
        let a = f.monolingual_text_value("colour", "en").unwrap();
        let b = f.monolingual_text_value("color", "en").unwrap();
        assert_eq!(a.language_code().as_ptr(), b.language_code().as_ptr());
        assert_ne!(a, b);
    }

    #[test]
    fn test_interning_still_validates() {
        let f = InterningFactory::new();
        assert!(f.item_id_value("Q0", SITE_WIKIDATA).is_err());
        assert!(f.monolingual_text_value("x", "").is_err());
        assert!(f.is_empty());
    }
}
