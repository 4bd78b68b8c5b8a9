//! Reseller streams: creation, listing and statistics.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use validator::Validate;

use super::catalog::market_page;
use super::{form_errors, parse_whole, trimmed};
use crate::auth::RequireUser;
use crate::db::{CatalogRepository, NewStream, StreamRepository};
use crate::domain::aggregates::{Product, StreamListing, StreamStatistics, StreamTotals};
use crate::domain::value_objects::{check_discount, Money};
use crate::error::{AppError, Result};
use crate::state::AppState;

const UNKNOWN_PRODUCT: &str = "Unknown product";
const DISCOUNT_ERROR: &str = "Enter the discount as a whole number";

fn default_discount() -> String {
    "0".to_string()
}

/// Numeric fields stay text until the handler parses them, so cleared inputs
/// come back to the market page as form errors.
#[derive(Debug, Deserialize, Validate)]
pub struct StreamForm {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 255, message = "Give the stream a name"))]
    pub name: String,
    #[serde(default)]
    pub product_id: String,
    #[serde(default = "default_discount")]
    pub discount: String,
}

impl StreamForm {
    /// Product id and discount, or every problem found with the form.
    fn parse(&self) -> std::result::Result<(i64, Money), Vec<String>> {
        let mut errors = self.validate().err().map(|e| form_errors(&e)).unwrap_or_default();
        let product_id = parse_whole(&self.product_id, UNKNOWN_PRODUCT).map_err(|e| errors.push(e)).ok();
        let discount = parse_whole(&self.discount, DISCOUNT_ERROR).map_err(|e| errors.push(e)).ok();
        match (product_id, discount) {
            (Some(product_id), Some(discount)) if errors.is_empty() => Ok((product_id, Money::new(discount))),
            _ => Err(errors),
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "stream/stream_list.html")]
pub struct StreamListTemplate {
    pub streams: Vec<StreamListing>,
}

#[derive(Template, WebTemplate)]
#[template(path = "stream/in_detail.html")]
pub struct InDetailTemplate {
    pub product: Product,
    pub self_stream: Vec<StreamListing>,
}

#[derive(Template, WebTemplate)]
#[template(path = "stream/statistics.html")]
pub struct StatisticsTemplate {
    pub streams: Vec<StreamStatistics>,
    pub totals: StreamTotals,
}

pub async fn create(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Form(form): Form<StreamForm>,
) -> Result<Response> {
    let (product_id, discount) = match form.parse() {
        Ok(parsed) => parsed,
        Err(errors) => return Ok(market_page(&state, None, errors).await?.into_response()),
    };
    let Some(product) = CatalogRepository::new(&state.db).get_product(product_id).await? else {
        return Ok(market_page(&state, None, vec![UNKNOWN_PRODUCT.to_string()]).await?.into_response());
    };
    if let Err(e) = check_discount(product.price, discount) {
        return Ok(market_page(&state, None, vec![e.to_string()]).await?.into_response());
    }

    let stream = StreamRepository::new(&state.db)
        .create(&NewStream {
            owner_id: user.id,
            product_id: product.id,
            name: form.name,
            discount,
        })
        .await?;
    tracing::info!(stream_id = stream.id, owner_id = user.id, product_id = product.id, "Stream created");

    Ok(Redirect::to("/stream/list").into_response())
}

pub async fn list(State(state): State<AppState>, RequireUser(user): RequireUser) -> Result<StreamListTemplate> {
    let streams = StreamRepository::new(&state.db).list_for_owner(user.id).await?;
    Ok(StreamListTemplate { streams })
}

pub async fn in_detail(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(slug): Path<String>,
) -> Result<InDetailTemplate> {
    let product = CatalogRepository::new(&state.db)
        .get_product_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {slug}")))?;
    let self_stream = StreamRepository::new(&state.db)
        .list_for_product_and_owner(product.id, user.id)
        .await?;
    Ok(InDetailTemplate { product, self_stream })
}

pub async fn statistics(State(state): State<AppState>, RequireUser(user): RequireUser) -> Result<StatisticsTemplate> {
    let streams = StreamRepository::new(&state.db).statistics_for_owner(user.id).await?;
    let totals = StreamTotals::from_streams(&streams);
    Ok(StatisticsTemplate { streams, totals })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, product_id: &str, discount: &str) -> StreamForm {
        StreamForm { name: name.to_string(), product_id: product_id.to_string(), discount: discount.to_string() }
    }

    #[test]
    fn test_parse_valid_form() {
        assert_eq!(form("Instagram", "4", "15000").parse(), Ok((4, Money::new(15_000))));
    }

    #[test]
    fn test_parse_collects_every_error() {
        let errors = form("", "", "").parse().unwrap_err();
        assert_eq!(
            errors,
            vec!["Give the stream a name".to_string(), UNKNOWN_PRODUCT.to_string(), DISCOUNT_ERROR.to_string()]
        );
    }
}
