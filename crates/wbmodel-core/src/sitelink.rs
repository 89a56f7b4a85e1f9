//! Site links - pages about an item on other wiki sites

use serde::Serialize;

use crate::entity_id::ItemIdValue;

/// Association between an item and a page on an external site
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SiteLink {
    page_title: String,
    site_key: String,
    badges: Vec<ItemIdValue>,
}

impl SiteLink {
    pub(crate) fn new(page_title: String, site_key: String, badges: Vec<ItemIdValue>) -> Self {
        Self {
            page_title,
            site_key,
            badges,
        }
    }

    pub fn page_title(&self) -> &str {
        &self.page_title
    }

    /// Key of the site, e.g. `enwiki`
    pub fn site_key(&self) -> &str {
        &self.site_key
    }

    /// Badge items (featured article etc.), in the order given
    pub fn badges(&self) -> &[ItemIdValue] {
        &self.badges
    }
}
