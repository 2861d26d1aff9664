//! Inventory backend REST client.
//!
//! Wraps the product and stock endpoints:
//!
//! - `POST products/create/` (JSON, or multipart when an image is attached)
//! - `GET products/`
//! - `POST stock/add/` and `POST stock/remove/`
//! - `GET stock/report/`

use std::path::Path;
use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use stockroom_core::api::{
    CreateProductRequest, Page, Product, ProductFilter, StockAdjustmentRequest,
    StockAdjustmentResponse, StockReportFilter, StockTransaction, error_message,
};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Form field carrying the product image in multipart requests.
const IMAGE_FIELD: &str = "ProductImage";

/// An image file to attach to a new product.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// File name sent with the part.
    pub file_name: String,
    /// MIME type of the content.
    pub content_type: String,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Wrap in-memory image content.
    #[must_use]
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Read an image from disk, guessing its MIME type from the extension.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Io` if the file cannot be read.
    pub async fn from_path(path: &Path) -> Result<Self, ClientError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map_or_else(|| "image".to_string(), |name| name.to_string_lossy().into_owned());
        Ok(Self::new(file_name, content_type_for(path), bytes))
    }
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Inventory backend client.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct StockroomClient {
    inner: Arc<StockroomClientInner>,
}

struct StockroomClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl StockroomClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(StockroomClientInner {
                client,
                base_url: config.api_url.clone(),
            }),
        })
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Create a product with its variants and initial SKUs.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with the backend's message if the product is
    /// rejected (duplicate code, malformed variants).
    #[instrument(skip(self, request), fields(code = %request.product_code, skus = request.initial_product_skus.len()))]
    pub async fn create_product(&self, request: &CreateProductRequest) -> Result<Product, ClientError> {
        let product: Product = self.post("products/create/", request).await?;
        info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    /// Create a product and upload its image in one multipart request.
    ///
    /// Variants and initial SKUs travel as JSON-encoded text fields.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Parse` if the payload cannot be encoded, or the
    /// same errors as [`Self::create_product`].
    #[instrument(skip(self, request, image), fields(code = %request.product_code, file = %image.file_name))]
    pub async fn create_product_with_image(
        &self,
        request: &CreateProductRequest,
        image: ImageUpload,
    ) -> Result<Product, ClientError> {
        let fields = request
            .to_multipart_fields()
            .map_err(|e| ClientError::Parse(format!("Failed to encode product: {e}")))?;

        let mut form = fields
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value));

        let part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.content_type)?;
        form = form.part(IMAGE_FIELD, part);

        let url = self.endpoint("products/create/")?;
        let response = self.inner.client.post(url).multipart(form).send().await?;
        let product: Product = self.handle_response(response).await?;
        info!(product_id = %product.id, "Product created with image");
        Ok(product)
    }

    /// List products matching a filter.
    ///
    /// Only the first page is returned when the backend paginates.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response does not parse.
    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, ClientError> {
        let page: Page<Product> = self.get("products/", &filter.query_pairs()).await?;
        Ok(first_page(page, "products"))
    }

    /// Add stock to a SKU.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` for an unknown SKU and
    /// `ClientError::Api` for rejected quantities.
    #[instrument(skip(self, request), fields(sku = %request.product_sku_id, quantity = %request.quantity))]
    pub async fn add_stock(
        &self,
        request: &StockAdjustmentRequest,
    ) -> Result<StockAdjustmentResponse, ClientError> {
        let response: StockAdjustmentResponse = self.post("stock/add/", request).await?;
        info!(current_stock = %response.product_sku_current_stock, "Stock added");
        Ok(response)
    }

    /// Remove stock from a SKU.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with "Not enough stock available." when the
    /// SKU holds less than the requested quantity, and
    /// `ClientError::NotFound` for an unknown SKU.
    #[instrument(skip(self, request), fields(sku = %request.product_sku_id, quantity = %request.quantity))]
    pub async fn remove_stock(
        &self,
        request: &StockAdjustmentRequest,
    ) -> Result<StockAdjustmentResponse, ClientError> {
        let response: StockAdjustmentResponse = self.post("stock/remove/", request).await?;
        info!(current_stock = %response.product_sku_current_stock, "Stock removed");
        Ok(response)
    }

    /// Fetch stock transactions matching a filter.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Filter` for an inverted date range before any
    /// request is made.
    #[instrument(skip(self))]
    pub async fn stock_report(
        &self,
        filter: &StockReportFilter,
    ) -> Result<Vec<StockTransaction>, ClientError> {
        let query = filter.query_pairs()?;
        let page: Page<StockTransaction> = self.get("stock/report/", &query).await?;
        Ok(first_page(page, "stock transactions"))
    }

    /// Resolve a path relative to the base URL.
    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// Execute a GET request with query parameters.
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, ClientError> {
        let mut url = self.endpoint(path)?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        debug!(%url, "GET");
        let response = self.inner.client.get(url).send().await?;
        self.handle_response(response).await
    }

    /// Execute a POST request with a JSON body.
    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let url = self.endpoint(path)?;
        debug!(%url, "POST");
        let response = self.inner.client.post(url).json(body).send().await?;
        self.handle_response(response).await
    }

    /// Handle API response and parse JSON.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            return serde_json::from_str(&body)
                .map_err(|e| ClientError::Parse(format!("Failed to parse response: {e}")));
        }

        Err(self.parse_error(response).await)
    }

    /// Parse error response from the backend.
    async fn parse_error(&self, response: reqwest::Response) -> ClientError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);

        if status == 404 {
            return ClientError::NotFound(message);
        }

        error!(status, %message, "Backend returned an error");
        ClientError::Api { status, message }
    }
}

impl std::fmt::Debug for StockroomClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StockroomClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

fn first_page<T>(page: Page<T>, what: &str) -> Vec<T> {
    if page.has_more() {
        warn!(
            total = ?page.total(),
            "More {what} exist than were returned; narrow the filter to see them"
        );
    }
    page.into_items()
}
