//! Integration tests for Stockroom.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p stockroom-integration-tests
//! ```
//!
//! The tests drive the real [`StockroomClient`] against [`FakeBackend`], an
//! in-process axum server bound to `127.0.0.1:0` that keeps products, SKUs
//! and stock transactions in memory and answers with the same shapes and
//! error bodies as the inventory backend.
//!
//! # Test Categories
//!
//! - `product_flow` - Product creation (JSON and multipart) and listing
//! - `stock_flow` - Stock adjustments and the transaction report

use std::collections::HashMap;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{FromRequest, Multipart, Query, Request, State};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use uuid::Uuid;

use stockroom_client::{ClientConfig, StockroomClient};

/// Products per page on `GET /products/`.
pub const PAGE_SIZE: usize = 10;

type Reply = Result<Response, Response>;

// =============================================================================
// Stored Records
// =============================================================================

/// An image received with a multipart create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedImage {
    pub file_name: String,
    pub content_type: String,
    pub len: usize,
}

#[derive(Debug, Clone)]
struct StoredProduct {
    id: Uuid,
    number: i64,
    name: String,
    code: String,
    hsn_code: Option<String>,
    active: bool,
    image: Option<String>,
    created: DateTime<Utc>,
    variants: Vec<Value>,
}

#[derive(Debug, Clone)]
struct StoredSku {
    id: Uuid,
    product_id: Uuid,
    sku_code: String,
    options: String,
    stock: Decimal,
}

#[derive(Debug, Clone)]
struct StoredTransaction {
    id: Uuid,
    product_id: Uuid,
    sku_id: Uuid,
    kind: &'static str,
    quantity: Decimal,
    date: DateTime<Utc>,
    current_stock: Decimal,
}

#[derive(Debug, Default)]
struct Store {
    products: Vec<StoredProduct>,
    skus: Vec<StoredSku>,
    transactions: Vec<StoredTransaction>,
    images: Vec<ReceivedImage>,
    create_fields: Vec<Vec<String>>,
    queries: Vec<String>,
}

impl Store {
    fn product_json(&self, product: &StoredProduct) -> Value {
        let skus: Vec<&StoredSku> = self
            .skus
            .iter()
            .filter(|sku| sku.product_id == product.id)
            .collect();
        let total: Decimal = skus.iter().map(|sku| sku.stock).sum();

        json!({
            "id": product.id,
            "ProductID": product.number,
            "ProductCode": product.code,
            "ProductName": product.name,
            "ProductImage": product.image,
            "CreatedDate": product.created,
            "UpdatedDate": product.created,
            "IsFavourite": false,
            "Active": product.active,
            "HSNCode": product.hsn_code,
            "TotalStock": money(total),
            "variants": product.variants,
            "product_skus": skus.iter().map(|sku| json!({
                "id": sku.id,
                "sku_code": sku.sku_code,
                "stock": money(sku.stock),
                "product_sku_options": sku.options,
            })).collect::<Vec<_>>(),
        })
    }

    fn transaction_json(&self, tx: &StoredTransaction) -> Value {
        let product_name = self
            .products
            .iter()
            .find(|p| p.id == tx.product_id)
            .map(|p| p.name.clone())
            .unwrap_or_default();
        let (sku_code, options) = self
            .skus
            .iter()
            .find(|s| s.id == tx.sku_id)
            .map(|s| (s.sku_code.clone(), s.options.clone()))
            .unwrap_or_default();

        json!({
            "id": tx.id,
            "product_name": product_name,
            "sku_code": sku_code,
            "product_sku_options": options,
            "transaction_type": tx.kind,
            "quantity": money(tx.quantity),
            "transaction_date": tx.date,
            "current_stock": money(tx.current_stock),
        })
    }
}

/// Decimal rendered with two places, as the backend's DECIMAL(10,2) fields are.
fn money(value: Decimal) -> String {
    let mut value = value.round_dp(2);
    value.rescale(2);
    value.to_string()
}

fn error(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn bad_request(message: &str) -> Response {
    error(StatusCode::BAD_REQUEST, json!({ "error": message }))
}

// =============================================================================
// Fake Backend
// =============================================================================

/// In-memory inventory backend served over HTTP.
pub struct FakeBackend {
    addr: SocketAddr,
    store: Arc<Mutex<Store>>,
    server: JoinHandle<()>,
}

impl FakeBackend {
    /// Bind to an ephemeral port and start serving.
    ///
    /// # Errors
    ///
    /// Returns error if the listener cannot be bound.
    pub async fn start() -> std::io::Result<Self> {
        let store = Arc::new(Mutex::new(Store::default()));

        let api = Router::new()
            .route("/products/", get(list_products))
            .route("/products/create/", post(create_product))
            .route("/stock/add/", post(add_stock))
            .route("/stock/remove/", post(remove_stock))
            .route("/stock/report/", get(stock_report))
            .with_state(Arc::clone(&store));
        let app = Router::new().nest("/api", api);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            addr,
            store,
            server,
        })
    }

    /// Base URL of the fake API.
    #[must_use]
    pub fn api_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// A client pointed at this backend.
    ///
    /// # Errors
    ///
    /// Returns error if the client cannot be configured.
    pub fn client(&self) -> Result<StockroomClient, Box<dyn std::error::Error>> {
        let config = ClientConfig::new(&self.api_url())?;
        Ok(StockroomClient::new(&config)?)
    }

    /// Images received so far.
    pub async fn images(&self) -> Vec<ReceivedImage> {
        self.store.lock().await.images.clone()
    }

    /// Field names of each multipart create request, in arrival order.
    pub async fn multipart_fields(&self) -> Vec<Vec<String>> {
        self.store.lock().await.create_fields.clone()
    }

    /// Raw query strings of the GET requests received.
    pub async fn queries(&self) -> Vec<String> {
        self.store.lock().await.queries.clone()
    }

    /// Move every recorded transaction by `offset`.
    pub async fn shift_transactions(&self, offset: Duration) {
        let mut store = self.store.lock().await;
        for tx in &mut store.transactions {
            tx.date += offset;
        }
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

// =============================================================================
// Products
// =============================================================================

#[derive(Debug, Default)]
struct CreateInput {
    name: String,
    code: String,
    hsn_code: Option<String>,
    active: bool,
    variants: Vec<Value>,
    skus: Vec<(Vec<String>, Decimal)>,
    image: Option<String>,
}

fn text_field(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}

fn decimal_of(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .ok(),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

fn parse_skus(value: &Value) -> Vec<(Vec<String>, Decimal)> {
    value
        .as_array()
        .map(|skus| {
            skus.iter()
                .map(|sku| {
                    let options = sku
                        .get("options")
                        .and_then(Value::as_array)
                        .map(|opts| {
                            opts.iter()
                                .filter_map(Value::as_str)
                                .map(str::to_string)
                                .collect()
                        })
                        .unwrap_or_default();
                    let stock = sku.get("stock").and_then(decimal_of).unwrap_or_default();
                    (options, stock)
                })
                .collect()
        })
        .unwrap_or_default()
}

fn input_from_json(body: &Value) -> CreateInput {
    let hsn = text_field(body.get("HSNCode"));
    CreateInput {
        name: text_field(body.get("ProductName")),
        code: text_field(body.get("ProductCode")),
        hsn_code: (!hsn.is_empty()).then_some(hsn),
        active: body.get("Active").and_then(Value::as_bool).unwrap_or(true),
        variants: body
            .get("variants")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default(),
        skus: body
            .get("initial_product_skus")
            .map(parse_skus)
            .unwrap_or_default(),
        image: None,
    }
}

async fn input_from_multipart(
    mut multipart: Multipart,
    store: &Mutex<Store>,
) -> Result<CreateInput, Response> {
    let mut input = CreateInput {
        active: true,
        ..CreateInput::default()
    };
    let mut names = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(IntoResponse::into_response)?
    {
        let name = field.name().unwrap_or_default().to_string();
        names.push(name.clone());

        if name == "ProductImage" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let bytes = field.bytes().await.map_err(IntoResponse::into_response)?;
            input.image = Some(format!("/media/products/{file_name}"));
            store.lock().await.images.push(ReceivedImage {
                file_name,
                content_type,
                len: bytes.len(),
            });
            continue;
        }

        let text = field.text().await.map_err(IntoResponse::into_response)?;
        match name.as_str() {
            "ProductName" => input.name = text.trim().to_string(),
            "ProductCode" => input.code = text.trim().to_string(),
            "HSNCode" => input.hsn_code = Some(text.trim().to_string()).filter(|h| !h.is_empty()),
            "Active" => input.active = text.trim() != "false",
            "variants_json" => {
                let value: Value = serde_json::from_str(&text)
                    .map_err(|_| bad_request("Invalid JSON format for variants_json."))?;
                input.variants = value.as_array().cloned().unwrap_or_default();
            }
            "initial_product_skus_json" => {
                let value: Value = serde_json::from_str(&text).unwrap_or(Value::Null);
                input.skus = parse_skus(&value);
            }
            _ => {}
        }
    }

    store.lock().await.create_fields.push(names);
    Ok(input)
}

async fn create_product(State(store): State<Arc<Mutex<Store>>>, request: Request) -> Reply {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"));

    let input = if is_multipart {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(IntoResponse::into_response)?;
        input_from_multipart(multipart, &store).await?
    } else {
        let Json(body) = Json::<Value>::from_request(request, &())
            .await
            .map_err(IntoResponse::into_response)?;
        input_from_json(&body)
    };

    let mut missing = serde_json::Map::new();
    if input.name.is_empty() {
        missing.insert("ProductName".into(), json!(["This field is required."]));
    }
    if input.code.is_empty() {
        missing.insert("ProductCode".into(), json!(["This field is required."]));
    }
    if !missing.is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, Value::Object(missing)));
    }

    let mut store = store.lock().await;
    if store.products.iter().any(|p| p.code == input.code) {
        return Err(error(
            StatusCode::BAD_REQUEST,
            json!({ "ProductCode": ["products with this ProductCode already exists."] }),
        ));
    }

    let product = StoredProduct {
        id: Uuid::new_v4(),
        number: i64::try_from(store.products.len()).unwrap_or(i64::MAX) + 1,
        name: input.name,
        code: input.code,
        hsn_code: input.hsn_code,
        active: input.active,
        image: input.image,
        created: Utc::now(),
        variants: input
            .variants
            .into_iter()
            .map(|mut variant| {
                if let Some(obj) = variant.as_object_mut() {
                    obj.insert("id".into(), json!(Uuid::new_v4()));
                    if let Some(Value::Array(subs)) = obj.get_mut("sub_variants") {
                        for sub in subs.iter_mut().filter_map(Value::as_object_mut) {
                            sub.insert("id".into(), json!(Uuid::new_v4()));
                        }
                    }
                }
                variant
            })
            .collect(),
    };

    for (options, stock) in input.skus {
        let slug = options
            .iter()
            .map(|o| o.replace(' ', "").to_uppercase())
            .collect::<Vec<_>>()
            .join("-");
        let base = format!("{}-{slug}", product.code);
        let mut sku_code = base.clone();
        let mut counter = 1;
        while store.skus.iter().any(|s| s.sku_code == sku_code) {
            sku_code = format!("{base}-{counter}");
            counter += 1;
        }

        let sku = StoredSku {
            id: Uuid::new_v4(),
            product_id: product.id,
            sku_code,
            options: options.join(", "),
            stock,
        };
        if stock > Decimal::ZERO {
            store.transactions.push(StoredTransaction {
                id: Uuid::new_v4(),
                product_id: product.id,
                sku_id: sku.id,
                kind: "IN",
                quantity: stock,
                date: product.created,
                current_stock: stock,
            });
        }
        store.skus.push(sku);
    }

    let body = store.product_json(&product);
    store.products.push(product);
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

async fn list_products(
    State(store): State<Arc<Mutex<Store>>>,
    Query(params): Query<HashMap<String, String>>,
) -> Reply {
    let mut store = store.lock().await;
    store.queries.push(query_string(&params));

    let name = params
        .get("ProductName__icontains")
        .map(|n| n.to_lowercase());
    let code = params.get("ProductCode");
    let active = params.get("Active").map(|a| a == "true" || a == "True");
    let page: usize = params
        .get("page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1)
        .max(1);

    let matching: Vec<Value> = store
        .products
        .iter()
        .filter(|p| name.as_ref().is_none_or(|n| p.name.to_lowercase().contains(n)))
        .filter(|p| code.is_none_or(|c| &p.code == c))
        .filter(|p| active.is_none_or(|a| p.active == a))
        .map(|p| store.product_json(p))
        .collect();

    let count = matching.len();
    let start = (page - 1) * PAGE_SIZE;
    let results: Vec<Value> = matching.into_iter().skip(start).take(PAGE_SIZE).collect();
    let next = (start + PAGE_SIZE < count).then(|| format!("/api/products/?page={}", page + 1));

    Ok(Json(json!({
        "count": count,
        "next": next,
        "previous": Value::Null,
        "results": results,
    }))
    .into_response())
}

fn query_string(params: &HashMap<String, String>) -> String {
    let mut pairs: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
    pairs.sort();
    pairs.join("&")
}

// =============================================================================
// Stock
// =============================================================================

async fn add_stock(State(store): State<Arc<Mutex<Store>>>, Json(body): Json<Value>) -> Reply {
    adjust(&store, &body, "IN").await
}

async fn remove_stock(State(store): State<Arc<Mutex<Store>>>, Json(body): Json<Value>) -> Reply {
    adjust(&store, &body, "OUT").await
}

async fn adjust(store: &Mutex<Store>, body: &Value, kind: &'static str) -> Reply {
    let (Some(product_id), Some(sku_id), Some(quantity)) = (
        body.get("product_id").and_then(Value::as_str),
        body.get("product_sku_id").and_then(Value::as_str),
        body.get("quantity").filter(|q| !q.is_null()),
    ) else {
        return Err(bad_request(
            "product_id, product_sku_id, and quantity are required.",
        ));
    };

    let quantity =
        decimal_of(quantity).ok_or_else(|| bad_request("Quantity must be a valid number."))?;
    if quantity <= Decimal::ZERO {
        return Err(bad_request("Quantity must be positive."));
    }

    let not_found = || error(StatusCode::NOT_FOUND, json!({ "error": "Product SKU not found." }));
    let product_id = Uuid::parse_str(product_id).map_err(|_| not_found())?;
    let sku_id = Uuid::parse_str(sku_id).map_err(|_| not_found())?;

    let mut store = store.lock().await;
    let sku = store
        .skus
        .iter_mut()
        .find(|s| s.id == sku_id && s.product_id == product_id)
        .ok_or_else(not_found)?;

    if kind == "OUT" {
        if sku.stock < quantity {
            return Err(bad_request("Not enough stock available."));
        }
        sku.stock -= quantity;
    } else {
        sku.stock += quantity;
    }
    let current_stock = sku.stock;

    store.transactions.push(StoredTransaction {
        id: Uuid::new_v4(),
        product_id,
        sku_id,
        kind,
        quantity,
        date: Utc::now(),
        current_stock,
    });

    let message = if kind == "IN" {
        "Stock added successfully"
    } else {
        "Stock removed successfully"
    };
    Ok(Json(json!({
        "message": message,
        "product_sku_current_stock": money(current_stock),
    }))
    .into_response())
}

fn parse_bound(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

async fn stock_report(
    State(store): State<Arc<Mutex<Store>>>,
    Query(params): Query<HashMap<String, String>>,
) -> Reply {
    let mut store = store.lock().await;
    store.queries.push(query_string(&params));

    let from = params
        .get("transaction_date__gte")
        .map(String::as_str)
        .and_then(parse_bound);
    let to = params
        .get("transaction_date__lte")
        .map(String::as_str)
        .and_then(parse_bound);
    let product_id = params.get("product__id").and_then(|v| Uuid::parse_str(v).ok());
    let sku_id = params.get("product_sku__id").and_then(|v| Uuid::parse_str(v).ok());
    let kind = params.get("transaction_type");

    let mut rows: Vec<&StoredTransaction> = store
        .transactions
        .iter()
        .filter(|tx| from.is_none_or(|f| tx.date.naive_utc() >= f))
        .filter(|tx| to.is_none_or(|t| tx.date.naive_utc() <= t))
        .filter(|tx| product_id.is_none_or(|p| tx.product_id == p))
        .filter(|tx| sku_id.is_none_or(|s| tx.sku_id == s))
        .filter(|tx| kind.is_none_or(|k| tx.kind == k.as_str()))
        .collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date));

    let body: Vec<Value> = rows.into_iter().map(|tx| store.transaction_json(tx)).collect();
    Ok(Json(Value::Array(body)).into_response())
}
