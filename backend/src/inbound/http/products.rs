//! Product detail handler.
//!
//! ```text
//! GET /products/{entityType}/{entityId}
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::Product;
use crate::inbound::http::ApiResult;
use crate::inbound::http::respond::json_response;
use crate::inbound::http::state::HttpState;

/// Path coordinates of a product. Either segment may be empty.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Path, rename_all = "camelCase")]
pub struct ProductPath {
    /// Kind of entity the product is attached to.
    #[param(example = "event")]
    pub entity_type: String,
    /// Identifier of the entity; echoed as the product `id`.
    #[param(example = "42")]
    pub entity_id: String,
}

/// Product detail payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    #[schema(example = "42")]
    pub id: String,
    #[schema(example = "Sample event")]
    pub name: String,
    #[schema(example = "This is a dummy description for a event")]
    pub description: String,
    #[schema(example = 199.99)]
    pub price: f64,
    #[schema(example = "piece")]
    pub unit: String,
    pub image_urls: Vec<String>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id().to_owned(),
            name: product.name().to_owned(),
            description: product.description().to_owned(),
            price: product.price(),
            unit: product.unit().to_owned(),
            image_urls: product.image_urls().to_vec(),
        }
    }
}

/// Return the product detail for an entity.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use storefront::inbound::http::products::product_detail;
///
/// let app = App::new().service(product_detail);
/// ```
#[utoipa::path(
    get,
    path = "/products/{entityType}/{entityId}",
    params(ProductPath),
    responses(
        (status = 200, description = "Product detail", body = ProductResponse)
    ),
    tags = ["products"],
    operation_id = "getProductDetail"
)]
#[get("/products/{entityType:[^/]*}/{entityId:[^/]*}")]
pub async fn product_detail(
    state: web::Data<HttpState>,
    path: web::Path<ProductPath>,
) -> ApiResult<HttpResponse> {
    let ProductPath {
        entity_type,
        entity_id,
    } = path.into_inner();
    let product = state.products.fetch_product(&entity_type, &entity_id).await?;
    Ok(json_response(
        StatusCode::OK,
        &ProductResponse::from(product),
    ))
}
