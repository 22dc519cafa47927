use std::sync::OnceLock;

use crate::config::FindingConfig;
use crate::error::{FindingError, Result};
use crate::request::SearchRequest;
use crate::transport::{FindingTransport, HttpTransport};
use crate::types::{Params, SearchResponse, VersionResponse};
use crate::FindingClient;

/// Write-once holder for a [`FindingClient`].
///
/// Can live in a `static`. Every search fails with
/// [`FindingError::NotInitialized`] until `init` has run; after that the
/// client is only read.
pub struct Finding<T = HttpTransport> {
    client: OnceLock<FindingClient<T>>,
}

impl<T> Finding<T> {
    pub const fn new() -> Self {
        Self {
            client: OnceLock::new(),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.client.get().is_some()
    }

    pub fn client(&self) -> Result<&FindingClient<T>> {
        self.client.get().ok_or(FindingError::NotInitialized)
    }

    /// Install an already built client. Fails if one is installed.
    pub fn init_with(&self, client: FindingClient<T>) -> Result<&FindingClient<T>> {
        self.client
            .set(client)
            .map_err(|_| FindingError::Config("Finding client already initialized".to_string()))?;
        self.client()
    }
}

impl<T> Default for Finding<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl Finding<HttpTransport> {
    pub fn init(&self, config: FindingConfig) -> Result<&FindingClient> {
        self.init_with(FindingClient::init(config)?)
    }
}

impl<T: FindingTransport> Finding<T> {
    pub async fn execute(&self, request: SearchRequest) -> Result<SearchResponse> {
        self.client()?.execute(request).await
    }

    pub async fn find_items_by_product(
        &self,
        id_type: &str,
        id: &str,
        options: Params,
    ) -> Result<SearchResponse> {
        self.client()?
            .find_items_by_product(id_type, id, options)
            .await
    }

    pub async fn find_items_by_upc(&self, id: &str, options: Params) -> Result<SearchResponse> {
        self.client()?.find_items_by_upc(id, options).await
    }

    pub async fn find_items_by_reference_id(
        &self,
        id: &str,
        options: Params,
    ) -> Result<SearchResponse> {
        self.client()?.find_items_by_reference_id(id, options).await
    }

    pub async fn find_items_by_isbn(&self, id: &str, options: Params) -> Result<SearchResponse> {
        self.client()?.find_items_by_isbn(id, options).await
    }

    pub async fn find_items_by_ean(&self, id: &str, options: Params) -> Result<SearchResponse> {
        self.client()?.find_items_by_ean(id, options).await
    }

    pub async fn find_items_by_keywords(
        &self,
        keywords: &str,
        options: Params,
    ) -> Result<SearchResponse> {
        self.client()?.find_items_by_keywords(keywords, options).await
    }

    pub async fn find_items_advanced(
        &self,
        keywords: &str,
        description_search: bool,
        options: Params,
    ) -> Result<SearchResponse> {
        self.client()?
            .find_items_advanced(keywords, description_search, options)
            .await
    }

    pub async fn find_items_by_category(
        &self,
        category_id: &str,
        options: Params,
    ) -> Result<SearchResponse> {
        self.client()?
            .find_items_by_category(category_id, options)
            .await
    }

    pub async fn find_completed_items(
        &self,
        keywords: &str,
        options: Params,
    ) -> Result<SearchResponse> {
        self.client()?.find_completed_items(keywords, options).await
    }

    pub async fn find_items_in_ebay_stores(
        &self,
        store_name: &str,
        options: Params,
    ) -> Result<SearchResponse> {
        self.client()?
            .find_items_in_ebay_stores(store_name, options)
            .await
    }

    pub async fn get_version(&self) -> Result<VersionResponse> {
        self.client()?.get_version().await
    }
}
