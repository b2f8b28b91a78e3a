//! Shop service routes

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};
use common::{database::health_check as database_health, response::ApiMessage};
use serde_json::json;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    models::{CartItem, NewCartItem, NewOrder, Order, Product, ProductInput},
    state::AppState,
};

/// Create the router for the shop service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/products", get(get_products).post(create_product))
        .route(
            "/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/cart", get(get_cart).post(add_item_to_cart))
        .route("/cart/:id", delete(remove_item_from_cart))
        .route("/orders", get(get_orders).post(place_order))
        .route("/orders/:id", get(get_order).delete(delete_order))
        .with_state(state)
}

/// Parse a record identifier from a path segment
fn parse_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest("Invalid ID format".to_string()))
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let status = if database_health(&state.database).await? {
        "ok"
    } else {
        "degraded"
    };

    Ok(Json(json!({
        "status": status,
        "service": "shop-service"
    })))
}

/// Get all products
pub async fn get_products(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let products = state.product_repository.get_all().await?;
    Ok(Json(products))
}

/// Get a product by ID
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let product = state
        .product_repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    Ok(Json(product))
}

/// Create a new product
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(input) = payload?;
    let product = Product::new(input);
    state.product_repository.create(&product).await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// Overwrite a product's fields
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let Json(input) = payload?;
    let product = state
        .product_repository
        .update(id, &input)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    Ok(Json(product))
}

/// Delete a product
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    if state.product_repository.delete(id).await? {
        Ok(Json(ApiMessage::message("Product deleted")))
    } else {
        Err(ApiError::NotFound("Product not found".to_string()))
    }
}

/// Get every item in the cart
pub async fn get_cart(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let items = state.cart_repository.get_all().await?;
    Ok(Json(items))
}

/// Add a product to the cart
pub async fn add_item_to_cart(
    State(state): State<AppState>,
    payload: Result<Json<NewCartItem>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(item) = payload?;
    let item = CartItem::new(item);
    state.cart_repository.add(&item).await?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// Remove an item from the cart
pub async fn remove_item_from_cart(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    if state.cart_repository.remove(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Cart item not found".to_string()))
    }
}

/// Get all orders
pub async fn get_orders(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let orders = state.order_repository.get_all().await?;
    Ok(Json(orders))
}

/// Get an order by ID
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let order = state
        .order_repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Order not found".to_string()))?;

    Ok(Json(order))
}

/// Place a new order
pub async fn place_order(
    State(state): State<AppState>,
    payload: Result<Json<NewOrder>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(order) = payload?;
    let order = Order::new(order, chrono::Utc::now().timestamp());
    state.order_repository.place(&order).await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// Delete an order
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    if state.order_repository.delete(id).await? {
        Ok(Json(ApiMessage::message("Order deleted")))
    } else {
        Err(ApiError::NotFound("Order not found".to_string()))
    }
}
