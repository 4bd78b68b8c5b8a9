//! Category and product queries.

use chrono::Utc;
use sqlx::SqlitePool;

use super::{map_unique, RepositoryError};
use crate::domain::aggregates::{Category, Product};
use crate::domain::value_objects::Money;

const PRODUCT_COLUMNS: &str = "p.id, p.category_id, p.name, p.slug, p.description, p.price, p.discount, p.created_at";

#[derive(Clone, Debug)]
pub struct NewProduct {
    pub category_id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: Money,
    pub discount: Money,
}

pub struct CatalogRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CatalogRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let cats = sqlx::query_as::<_, Category>("SELECT id, name, slug FROM categories ORDER BY name")
            .fetch_all(self.pool)
            .await?;
        Ok(cats)
    }

    pub async fn create_category(&self, name: &str, slug: &str) -> Result<Category, RepositoryError> {
        let cat = sqlx::query_as::<_, Category>("INSERT INTO categories (name, slug) VALUES (?, ?) RETURNING id, name, slug")
            .bind(name)
            .bind(slug)
            .fetch_one(self.pool)
            .await
            .map_err(map_unique("category slug"))?;
        Ok(cat)
    }

    /// All products, newest first, optionally restricted to one category slug.
    pub async fn list_products(&self, category_slug: Option<&str>) -> Result<Vec<Product>, RepositoryError> {
        let products = match category_slug {
            Some(slug) => {
                sqlx::query_as::<_, Product>(&format!(
                    "SELECT {PRODUCT_COLUMNS} FROM products p JOIN categories c ON c.id = p.category_id \
                     WHERE c.slug = ? ORDER BY p.created_at DESC, p.id DESC"
                ))
                .bind(slug)
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Product>(&format!(
                    "SELECT {PRODUCT_COLUMNS} FROM products p ORDER BY p.created_at DESC, p.id DESC"
                ))
                .fetch_all(self.pool)
                .await?
            }
        };
        Ok(products)
    }

    pub async fn count_products(&self) -> Result<i64, RepositoryError> {
        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products").fetch_one(self.pool).await?;
        Ok(total.0)
    }

    pub async fn list_products_page(&self, limit: i64, offset: i64) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products p ORDER BY p.created_at DESC, p.id DESC LIMIT ? OFFSET ?"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;
        Ok(products)
    }

    pub async fn get_product(&self, id: i64) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!("SELECT {PRODUCT_COLUMNS} FROM products p WHERE p.id = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(product)
    }

    pub async fn get_product_by_slug(&self, slug: &str) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!("SELECT {PRODUCT_COLUMNS} FROM products p WHERE p.slug = ?"))
            .bind(slug)
            .fetch_optional(self.pool)
            .await?;
        Ok(product)
    }

    pub async fn create_product(&self, new: &NewProduct) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            "INSERT INTO products (category_id, name, slug, description, price, discount, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?) \
             RETURNING id, category_id, name, slug, description, price, discount, created_at",
        )
        .bind(new.category_id)
        .bind(&new.name)
        .bind(&new.slug)
        .bind(&new.description)
        .bind(new.price)
        .bind(new.discount)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await
        .map_err(map_unique("product slug"))?;
        Ok(product)
    }
}

#[cfg(test)]
pub(crate) async fn seed_product(pool: &SqlitePool, slug: &str, price: i64, discount: i64) -> Product {
    let repo = CatalogRepository::new(pool);
    let cat = match sqlx::query_as::<_, Category>("SELECT id, name, slug FROM categories WHERE slug = 'general'")
        .fetch_optional(pool)
        .await
        .unwrap()
    {
        Some(c) => c,
        None => repo.create_category("General", "general").await.unwrap(),
    };
    repo.create_product(&NewProduct {
        category_id: cat.id,
        name: slug.to_uppercase(),
        slug: slug.to_string(),
        description: String::new(),
        price: Money::new(price),
        discount: Money::new(discount),
    })
    .await
    .unwrap()
}
