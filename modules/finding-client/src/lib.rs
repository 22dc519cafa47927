pub mod config;
pub mod error;
pub mod handle;
pub mod normalize;
pub mod parse;
pub mod request;
pub mod transport;
pub mod types;

pub use config::FindingConfig;
pub use error::{FindingError, Result, TransportError};
pub use handle::Finding;
pub use normalize::{normalize, to_array};
pub use parse::{parse_search_result, parse_version};
pub use request::SearchRequest;
pub use transport::{FindingTransport, HttpTransport};
pub use types::{
    Operation, PaginationOutput, Params, ProductIdType, SearchResponse, VersionResponse,
};

use serde_json::Value;

const OPERATION_NAME: &str = "OPERATION-NAME";

/// An initialized Finding API client.
pub struct FindingClient<T = HttpTransport> {
    transport: T,
}

impl FindingClient<HttpTransport> {
    /// Build a client that talks to the real service over HTTP.
    pub fn init(config: FindingConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new(&config)?;
        tracing::info!(
            app_id = %config.redacted_app_id(),
            global_id = %config.global_id,
            endpoint = %config.endpoint,
            "Finding client initialized"
        );
        Ok(Self { transport })
    }
}

impl<T: FindingTransport> FindingClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Issue one call and hand the unwrapped envelope to `parser`.
    ///
    /// Parameters merge in order `additional`, `OPERATION-NAME`, `base`; later
    /// sources win on key collision. The operation name is validated before
    /// anything goes over the wire.
    pub async fn call<R, F>(
        &self,
        operation: &str,
        parser: F,
        base: Params,
        additional: Params,
    ) -> Result<R>
    where
        F: FnOnce(Value) -> Result<R>,
    {
        let operation: Operation = operation.parse()?;

        let mut params = additional;
        params.insert(OPERATION_NAME.to_string(), operation.as_str().into());
        params.extend(base);

        tracing::debug!(%operation, params = params.len(), "Finding API call");
        let raw = self.transport.call(&params).await?;

        let key = operation.response_key();
        let envelope = match normalize(raw) {
            Value::Object(mut body) => body.remove(&key),
            _ => None,
        };

        match envelope {
            Some(body) if !is_empty(&body) => {
                tracing::debug!(%operation, "Unwrapped response envelope");
                parser(body)
            }
            _ => {
                tracing::warn!(%operation, "Finding API returned an empty response");
                Err(FindingError::EmptyResponse {
                    operation: operation.to_string(),
                })
            }
        }
    }

    /// Run a prepared search request.
    pub async fn execute(&self, request: SearchRequest) -> Result<SearchResponse> {
        let (operation, base, options) = request.into_parts();
        let response = self
            .call(operation.as_str(), parse_search_result, base, options)
            .await?;
        tracing::debug!(
            %operation,
            count = response.search_result_count,
            items = response.search_result.len(),
            "Search completed"
        );
        Ok(response)
    }

    /// Look up items by product identifier. `id_type` must be one of
    /// `ReferenceID`, `ISBN`, `UPC` or `EAN`.
    pub async fn find_items_by_product(
        &self,
        id_type: &str,
        id: &str,
        options: Params,
    ) -> Result<SearchResponse> {
        let id_type: ProductIdType = id_type.parse()?;
        self.execute(SearchRequest::by_product(id_type, id).options(options))
            .await
    }

    pub async fn find_items_by_upc(&self, id: &str, options: Params) -> Result<SearchResponse> {
        self.execute(SearchRequest::by_product(ProductIdType::Upc, id).options(options))
            .await
    }

    pub async fn find_items_by_reference_id(
        &self,
        id: &str,
        options: Params,
    ) -> Result<SearchResponse> {
        self.execute(SearchRequest::by_product(ProductIdType::ReferenceId, id).options(options))
            .await
    }

    pub async fn find_items_by_isbn(&self, id: &str, options: Params) -> Result<SearchResponse> {
        self.execute(SearchRequest::by_product(ProductIdType::Isbn, id).options(options))
            .await
    }

    pub async fn find_items_by_ean(&self, id: &str, options: Params) -> Result<SearchResponse> {
        self.execute(SearchRequest::by_product(ProductIdType::Ean, id).options(options))
            .await
    }

    pub async fn find_items_by_keywords(
        &self,
        keywords: &str,
        options: Params,
    ) -> Result<SearchResponse> {
        self.execute(SearchRequest::by_keywords(keywords).options(options))
            .await
    }

    pub async fn find_items_advanced(
        &self,
        keywords: &str,
        description_search: bool,
        options: Params,
    ) -> Result<SearchResponse> {
        self.execute(SearchRequest::advanced(keywords, description_search).options(options))
            .await
    }

    pub async fn find_items_by_category(
        &self,
        category_id: &str,
        options: Params,
    ) -> Result<SearchResponse> {
        self.execute(SearchRequest::by_category(category_id).options(options))
            .await
    }

    pub async fn find_completed_items(
        &self,
        keywords: &str,
        options: Params,
    ) -> Result<SearchResponse> {
        self.execute(SearchRequest::completed(keywords).options(options))
            .await
    }

    pub async fn find_items_in_ebay_stores(
        &self,
        store_name: &str,
        options: Params,
    ) -> Result<SearchResponse> {
        self.execute(SearchRequest::in_ebay_stores(store_name).options(options))
            .await
    }

    /// Current version of the remote service.
    pub async fn get_version(&self) -> Result<VersionResponse> {
        self.call(
            Operation::GetVersion.as_str(),
            parse_version,
            Params::new(),
            Params::new(),
        )
        .await
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
