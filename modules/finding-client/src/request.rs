use serde_json::Value;

use crate::types::{Operation, Params, ProductIdType};

/// A fully specified search, ready to hand to [`crate::FindingClient::execute`].
///
/// Base parameters come from the constructor and win over any option with
/// the same key.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    operation: Operation,
    base: Params,
    options: Params,
}

impl SearchRequest {
    fn new(operation: Operation, base: Params) -> Self {
        Self {
            operation,
            base,
            options: Params::new(),
        }
    }

    pub fn by_product(id_type: ProductIdType, id: impl Into<String>) -> Self {
        let mut base = Params::new();
        base.insert("productId.@type".to_string(), id_type.as_str().into());
        base.insert("productId".to_string(), Value::String(id.into()));
        Self::new(Operation::FindItemsByProduct, base)
    }

    pub fn by_keywords(keywords: impl Into<String>) -> Self {
        Self::new(Operation::FindItemsByKeywords, keywords_param(keywords))
    }

    pub fn advanced(keywords: impl Into<String>, description_search: bool) -> Self {
        let mut base = keywords_param(keywords);
        base.insert("descriptionSearch".to_string(), description_search.into());
        Self::new(Operation::FindItemsAdvanced, base)
    }

    pub fn by_category(category_id: impl Into<String>) -> Self {
        let mut base = Params::new();
        base.insert("categoryId".to_string(), Value::String(category_id.into()));
        Self::new(Operation::FindItemsByCategory, base)
    }

    pub fn completed(keywords: impl Into<String>) -> Self {
        Self::new(Operation::FindCompletedItems, keywords_param(keywords))
    }

    pub fn in_ebay_stores(store_name: impl Into<String>) -> Self {
        let mut base = Params::new();
        base.insert("storeName".to_string(), Value::String(store_name.into()));
        Self::new(Operation::FindItemsIneBayStores, base)
    }

    /// Add one extra option, e.g. `paginationInput.entriesPerPage`.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn options(mut self, options: Params) -> Self {
        self.options.extend(options);
        self
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn base_params(&self) -> &Params {
        &self.base
    }

    pub fn extra_options(&self) -> &Params {
        &self.options
    }

    pub(crate) fn into_parts(self) -> (Operation, Params, Params) {
        (self.operation, self.base, self.options)
    }
}

fn keywords_param(keywords: impl Into<String>) -> Params {
    let mut base = Params::new();
    base.insert("keywords".to_string(), Value::String(keywords.into()));
    base
}
