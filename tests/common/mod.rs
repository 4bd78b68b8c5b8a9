//! Shared harness: the full router over an in-memory database and an
//! in-memory session store, driven with `oneshot` and a one-cookie jar.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use sqlx::SqlitePool;
use tower::ServiceExt;
use tower_sessions::MemoryStore;

use alijahon::config::Config;
use alijahon::db::{self, CatalogRepository, NewProduct, WishListRepository};
use alijahon::domain::aggregates::{OrderStatus, Product};
use alijahon::domain::value_objects::Money;
use alijahon::state::AppState;

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers.get(header::LOCATION).and_then(|v| v.to_str().ok())
    }
}

pub struct TestClient {
    pub app: Router,
    pub pool: SqlitePool,
    cookie: Option<String>,
}

impl TestClient {
    pub async fn new() -> Self {
        let pool = db::create_pool("sqlite::memory:", 1).await.unwrap();
        db::migrate(&pool).await.unwrap();
        let config = Config::from_lookup(|_| None).unwrap();
        let app = alijahon::app(AppState::new(pool.clone()), MemoryStore::default(), &config);
        Self { app, pool, cookie: None }
    }

    /// Another browser against the same server and database.
    pub fn other_browser(&self) -> Self {
        Self { app: self.app.clone(), pool: self.pool.clone(), cookie: None }
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&mut self, uri: &str, form: &[(&str, &str)]) -> TestResponse {
        let body = form
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    pub async fn login(&mut self, phone: &str, password: &str) -> TestResponse {
        self.post_form("/login/", &[("phone_number", phone), ("password", password)]).await
    }

    async fn send(&mut self, mut request: Request<Body>) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            request.headers_mut().insert(header::COOKIE, cookie.parse().unwrap());
        }
        let response = self.app.clone().oneshot(request).await.unwrap();
        if let Some(set) = response.headers().get(header::SET_COOKIE) {
            let pair = set.to_str().unwrap().split(';').next().unwrap().to_string();
            self.cookie = Some(pair);
        }
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        TestResponse { status, headers, body: String::from_utf8(bytes.to_vec()).unwrap() }
    }
}

pub async fn set_order_status(pool: &SqlitePool, order_id: i64, status: OrderStatus) {
    sqlx::query("UPDATE orders SET status = ? WHERE id = ?")
        .bind(status)
        .bind(order_id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn wishlist_product_ids(pool: &SqlitePool, user_id: i64) -> Vec<i64> {
    WishListRepository::new(pool).product_ids(user_id).await.unwrap()
}

pub async fn seed_product(pool: &SqlitePool, category: &str, slug: &str, price: i64, discount: i64) -> Product {
    let catalog = CatalogRepository::new(pool);
    let category_id = match catalog.list_categories().await.unwrap().into_iter().find(|c| c.slug == category) {
        Some(c) => c.id,
        None => catalog.create_category(&category.to_uppercase(), category).await.unwrap().id,
    };
    catalog
        .create_product(&NewProduct {
            category_id,
            name: format!("Product {slug}"),
            slug: slug.to_string(),
            description: String::new(),
            price: Money::new(price),
            discount: Money::new(discount),
        })
        .await
        .unwrap()
}

pub async fn user_id(pool: &SqlitePool, phone_digits: &str) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE phone_number = ?")
        .bind(phone_digits)
        .fetch_one(pool)
        .await
        .unwrap()
}
