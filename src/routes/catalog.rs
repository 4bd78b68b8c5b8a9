//! Catalog pages: home, product list, reseller market and payments.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};

use super::{CategoryQuery, PageQuery, PAGE_SIZE};
use crate::auth::OptionalUser;
use crate::db::{CatalogRepository, WishListRepository};
use crate::domain::aggregates::{Category, Product};
use crate::domain::pagination::{PageWindow, Paginator};
use crate::error::Result;
use crate::state::AppState;

/// Product with whether the viewer has it in their wishlist.
#[derive(Clone, Debug)]
pub struct ProductCard {
    pub product: Product,
    pub liked: bool,
}

fn cards(products: Vec<Product>, liked: &[i64]) -> Vec<ProductCard> {
    products
        .into_iter()
        .map(|product| {
            let liked = liked.contains(&product.id);
            ProductCard { product, liked }
        })
        .collect()
}

async fn liked_ids(state: &AppState, user: &OptionalUser) -> Result<Vec<i64>> {
    match &user.0 {
        Some(u) => Ok(WishListRepository::new(&state.db).product_ids(u.id).await?),
        None => Ok(Vec::new()),
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "trade/home.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductCard>,
    pub categories: Vec<Category>,
    pub page: PageWindow,
}

#[derive(Template, WebTemplate)]
#[template(path = "trade/product_list.html")]
pub struct ProductListTemplate {
    pub products: Vec<ProductCard>,
    pub categories: Vec<Category>,
    pub selected: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "stream/market.html")]
pub struct MarketTemplate {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub selected: String,
    pub errors: Vec<String>,
}

#[derive(Template, WebTemplate)]
#[template(path = "pages/payments.html")]
pub struct PaymentsTemplate {
    pub payments: Vec<Product>,
}

pub async fn home(
    State(state): State<AppState>,
    user: OptionalUser,
    Query(query): Query<PageQuery>,
) -> Result<HomeTemplate> {
    let catalog = CatalogRepository::new(&state.db);
    let page = Paginator::new(catalog.count_products().await?, PAGE_SIZE).page(query.page.as_deref())?;
    let products = catalog.list_products_page(page.limit(), page.offset()).await?;
    let liked = liked_ids(&state, &user).await?;

    Ok(HomeTemplate {
        products: cards(products, &liked),
        categories: catalog.list_categories().await?,
        page,
    })
}

pub async fn product_list(
    State(state): State<AppState>,
    user: OptionalUser,
    Query(query): Query<CategoryQuery>,
) -> Result<ProductListTemplate> {
    let catalog = CatalogRepository::new(&state.db);
    let products = catalog.list_products(query.slug()).await?;
    let liked = liked_ids(&state, &user).await?;

    Ok(ProductListTemplate {
        products: cards(products, &liked),
        categories: catalog.list_categories().await?,
        selected: query.slug().unwrap_or_default().to_string(),
    })
}

/// Market page, also re-rendered with errors when the stream form is rejected.
pub async fn market_page(state: &AppState, category: Option<&str>, errors: Vec<String>) -> Result<MarketTemplate> {
    let catalog = CatalogRepository::new(&state.db);
    Ok(MarketTemplate {
        products: catalog.list_products(category).await?,
        categories: catalog.list_categories().await?,
        selected: category.unwrap_or_default().to_string(),
        errors,
    })
}

pub async fn market(State(state): State<AppState>, Query(query): Query<CategoryQuery>) -> Result<MarketTemplate> {
    market_page(&state, query.slug(), Vec::new()).await
}

pub async fn payments(State(state): State<AppState>) -> Result<PaymentsTemplate> {
    let payments = CatalogRepository::new(&state.db).list_products(None).await?;
    Ok(PaymentsTemplate { payments })
}
