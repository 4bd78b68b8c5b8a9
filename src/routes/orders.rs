//! Product and stream detail pages with the order form, and the user's orders.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use validator::Validate;

use super::{form_errors, parse_whole, trimmed};
use crate::auth::RequireUser;
use crate::db::{CatalogRepository, OrderRepository, SettingsRepository, StreamRepository};
use crate::domain::aggregates::{NewOrder, Order, OrderLine, Product, Stream};
use crate::domain::value_objects::{Money, PhoneNumber};
use crate::error::{AppError, Result};
use crate::state::AppState;

const QUANTITY_ERROR: &str = "Quantity must be between 1 and 1000";
const PHONE_ERROR: &str = "Enter a contact phone number";

fn default_quantity() -> String {
    "1".to_string()
}

#[derive(Debug, Deserialize, Validate)]
pub struct OrderForm {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 255, message = "Enter the recipient name"))]
    pub name: String,
    #[validate(length(min = 1, max = 64, message = "Enter a contact phone number"))]
    pub phone_number: String,
    /// Kept as text so a cleared input re-renders the form instead of failing extraction.
    #[serde(default = "default_quantity")]
    pub quantity: String,
}

impl OrderForm {
    /// Validate and build the insert payload for the signed-in user.
    pub fn into_new_order(self, user_id: i64, product_id: i64, stream_id: Option<i64>) -> std::result::Result<NewOrder, Vec<String>> {
        let mut errors = self.validate().err().map(|e| form_errors(&e)).unwrap_or_default();
        let quantity = parse_whole(&self.quantity, QUANTITY_ERROR).ok().filter(|q| (1..=1000).contains(q));
        if quantity.is_none() {
            errors.push(QUANTITY_ERROR.to_string());
        }
        let phone = PhoneNumber::normalize(&self.phone_number).ok();
        if phone.is_none() && !errors.iter().any(|e| e == PHONE_ERROR) {
            errors.push(PHONE_ERROR.to_string());
        }
        match (phone, quantity) {
            (Some(phone), Some(quantity)) if errors.is_empty() => Ok(NewOrder {
                user_id,
                product_id,
                stream_id,
                name: self.name,
                phone_number: phone.as_str().to_string(),
                quantity,
            }),
            _ => Err(errors),
        }
    }
}

/// Shared by the product page and the stream page.
#[derive(Template, WebTemplate)]
#[template(path = "trade/product_detail.html")]
pub struct ProductDetailTemplate {
    pub product: Product,
    pub price: Money,
    pub deliver_price: Option<Money>,
    pub form_action: String,
    pub errors: Vec<String>,
}

impl ProductDetailTemplate {
    fn for_product(product: Product, errors: Vec<String>) -> Self {
        Self {
            price: product.display_price(),
            form_action: format!("/product/detail/{}", product.slug),
            deliver_price: None,
            product,
            errors,
        }
    }

    fn for_stream(stream: &Stream, product: Product, deliver_price: Money, errors: Vec<String>) -> Self {
        Self {
            price: product.price_with(stream.discount),
            form_action: format!("/oqim/{}", stream.id),
            deliver_price: Some(deliver_price),
            product,
            errors,
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "order/product_order.html")]
pub struct OrderPlacedTemplate {
    pub order: Order,
    pub product_name: String,
    pub unit_price: Money,
    pub total: Money,
    pub deliver_price: Option<Money>,
}

impl OrderPlacedTemplate {
    fn new(order: Order, product: &Product, unit_price: Money, deliver_price: Option<Money>) -> Self {
        let subtotal = unit_price.multiply(order.quantity);
        Self {
            total: deliver_price.map_or(subtotal, |d| subtotal.add(d)),
            product_name: product.name.clone(),
            unit_price,
            deliver_price,
            order,
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "order/order_list.html")]
pub struct OrderListTemplate {
    pub orders: Vec<OrderLine>,
}

async fn product_by_slug(state: &AppState, slug: &str) -> Result<Product> {
    CatalogRepository::new(&state.db)
        .get_product_by_slug(slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {slug}")))
}

async fn stream_with_product(state: &AppState, pk: i64) -> Result<(Stream, Product)> {
    let stream = StreamRepository::new(&state.db)
        .get(pk)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("stream {pk}")))?;
    let product = CatalogRepository::new(&state.db)
        .get_product(stream.product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {}", stream.product_id)))?;
    Ok((stream, product))
}

pub async fn product_detail(State(state): State<AppState>, Path(slug): Path<String>) -> Result<ProductDetailTemplate> {
    let product = product_by_slug(&state, &slug).await?;
    Ok(ProductDetailTemplate::for_product(product, Vec::new()))
}

pub async fn order_product(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(slug): Path<String>,
    Form(form): Form<OrderForm>,
) -> Result<Response> {
    let product = product_by_slug(&state, &slug).await?;
    let new_order = match form.into_new_order(user.id, product.id, None) {
        Ok(o) => o,
        Err(errors) => return Ok(ProductDetailTemplate::for_product(product, errors).into_response()),
    };

    let order = OrderRepository::new(&state.db).create(&new_order).await?;
    tracing::info!(order_id = order.id, user_id = user.id, product_id = product.id, "Order placed");

    let unit_price = product.display_price();
    Ok(OrderPlacedTemplate::new(order, &product, unit_price, None).into_response())
}

/// Stream order page. Every view bumps the stream's counter by one.
pub async fn stream_detail(State(state): State<AppState>, Path(pk): Path<i64>) -> Result<ProductDetailTemplate> {
    let (stream, product) = stream_with_product(&state, pk).await?;
    let deliver_price = SettingsRepository::new(&state.db).deliver_price().await?;
    StreamRepository::new(&state.db).record_view(stream.id).await?;
    Ok(ProductDetailTemplate::for_stream(&stream, product, deliver_price, Vec::new()))
}

pub async fn order_stream(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(pk): Path<i64>,
    Form(form): Form<OrderForm>,
) -> Result<Response> {
    let (stream, product) = stream_with_product(&state, pk).await?;
    let deliver_price = SettingsRepository::new(&state.db).deliver_price().await?;
    let new_order = match form.into_new_order(user.id, product.id, Some(stream.id)) {
        Ok(o) => o,
        Err(errors) => {
            return Ok(ProductDetailTemplate::for_stream(&stream, product, deliver_price, errors).into_response())
        }
    };

    let order = OrderRepository::new(&state.db).create(&new_order).await?;
    tracing::info!(order_id = order.id, user_id = user.id, stream_id = stream.id, "Stream order placed");

    let unit_price = product.price_with(stream.discount);
    Ok(OrderPlacedTemplate::new(order, &product, unit_price, Some(deliver_price)).into_response())
}

pub async fn order_list(State(state): State<AppState>, RequireUser(user): RequireUser) -> Result<OrderListTemplate> {
    let orders = OrderRepository::new(&state.db).list_for_user(user.id).await?;
    Ok(OrderListTemplate { orders })
}
