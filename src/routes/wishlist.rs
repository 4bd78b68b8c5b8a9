//! Wishlist page and the like toggle.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::Redirect,
};
use serde::Deserialize;

use super::{PageQuery, PAGE_SIZE};
use crate::auth::RequireUser;
use crate::db::{CatalogRepository, WishListRepository};
use crate::domain::aggregates::{like_redirect_target, WishListItem, WishToggle};
use crate::domain::pagination::{PageWindow, Paginator};
use crate::error::{AppError, Result};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct LikeQuery {
    pub page_url: Option<String>,
}

#[derive(Template, WebTemplate)]
#[template(path = "wishlist.html")]
pub struct WishListTemplate {
    pub wishlists: Vec<WishListItem>,
    pub page: PageWindow,
}

pub async fn index(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Query(query): Query<PageQuery>,
) -> Result<WishListTemplate> {
    let repo = WishListRepository::new(&state.db);
    let page = Paginator::new(repo.count_for_user(user.id).await?, PAGE_SIZE).page(query.page.as_deref())?;
    let wishlists = repo.list_for_user(user.id, page.limit(), page.offset()).await?;
    Ok(WishListTemplate { wishlists, page })
}

pub async fn toggle(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(slug): Path<String>,
    Query(query): Query<LikeQuery>,
) -> Result<Redirect> {
    let product = CatalogRepository::new(&state.db)
        .get_product_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {slug}")))?;

    let outcome = WishListRepository::new(&state.db).toggle(user.id, product.id).await?;
    tracing::info!(
        user_id = user.id,
        product_id = product.id,
        added = outcome == WishToggle::Added,
        "Wishlist toggled"
    );

    Ok(Redirect::to(like_redirect_target(query.page_url.as_deref())))
}
