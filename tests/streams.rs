//! Reseller streams: creation, stream order page, view counter, statistics.

mod common;

use axum::http::StatusCode;

use alijahon::db::{OrderRepository, SettingsRepository, StreamRepository};
use alijahon::domain::aggregates::OrderStatus;
use alijahon::domain::value_objects::Money;
use common::{seed_product, set_order_status, user_id, TestClient};

async fn stream_ids(client: &TestClient, owner: i64) -> Vec<i64> {
    let mut ids: Vec<i64> = StreamRepository::new(&client.pool)
        .list_for_owner(owner)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    ids.sort_unstable();
    ids
}

#[tokio::test]
async fn test_create_stream_and_list() {
    let mut client = TestClient::new().await;
    let product = seed_product(&client.pool, "home", "heater", 400_000, 0).await;
    client.login("998900000001", "pw").await;
    let owner = user_id(&client.pool, "998900000001").await;

    let resp = client
        .post_form("/stream/form", &[("name", "Instagram"), ("product_id", &product.id.to_string()), ("discount", "50000")])
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/stream/list"));

    let list = client.get("/stream/list").await;
    assert!(list.body.contains("Instagram"));
    assert!(list.body.contains("Product heater"));
    assert_eq!(stream_ids(&client, owner).await.len(), 1);

    let detail = client.get("/stream/in_detail/heater").await;
    assert_eq!(detail.status, StatusCode::OK);
    assert!(detail.body.contains("Instagram"));
}

#[tokio::test]
async fn test_stream_discount_above_price_is_rejected() {
    let mut client = TestClient::new().await;
    let product = seed_product(&client.pool, "home", "mug", 20_000, 0).await;
    client.login("998900000002", "pw").await;
    let owner = user_id(&client.pool, "998900000002").await;

    let resp = client
        .post_form("/stream/form", &[("name", "Greedy"), ("product_id", &product.id.to_string()), ("discount", "25000")])
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("exceeds price"));

    let unknown = client.post_form("/stream/form", &[("name", "Ghost"), ("product_id", "9999"), ("discount", "0")]).await;
    assert!(unknown.body.contains("Unknown product"));
    assert!(stream_ids(&client, owner).await.is_empty());
}

#[tokio::test]
async fn test_cleared_or_blank_stream_fields_rerender_market() {
    let mut client = TestClient::new().await;
    let product = seed_product(&client.pool, "home", "mug", 20_000, 0).await;
    client.login("998900000006", "pw").await;
    let owner = user_id(&client.pool, "998900000006").await;
    let product_id = product.id.to_string();

    let cleared = client
        .post_form("/stream/form", &[("name", "Promo"), ("product_id", &product_id), ("discount", "")])
        .await;
    assert_eq!(cleared.status, StatusCode::OK);
    assert!(cleared.body.contains("Enter the discount as a whole number"));

    let blank = client
        .post_form("/stream/form", &[("name", "  "), ("product_id", &product_id), ("discount", "0")])
        .await;
    assert_eq!(blank.status, StatusCode::OK);
    assert!(blank.body.contains("Give the stream a name"));

    assert!(stream_ids(&client, owner).await.is_empty());
}

#[tokio::test]
async fn test_stream_page_price_delivery_and_view_counter() {
    let mut reseller = TestClient::new().await;
    let product = seed_product(&reseller.pool, "home", "vacuum", 1_000_000, 100_000).await;
    SettingsRepository::new(&reseller.pool).insert(Money::new(30_000)).await.unwrap();
    reseller.login("998900000003", "pw").await;
    reseller
        .post_form("/stream/form", &[("name", "Telegram"), ("product_id", &product.id.to_string()), ("discount", "150000")])
        .await;
    let owner = user_id(&reseller.pool, "998900000003").await;
    let stream_id = stream_ids(&reseller, owner).await[0];

    let mut buyer = reseller.other_browser();
    let url = format!("/oqim/{stream_id}");
    for _ in 0..3 {
        let page = buyer.get(&url).await;
        assert_eq!(page.status, StatusCode::OK);
        assert!(page.body.contains(r#"class="price" data-amount="850000""#));
        assert!(page.body.contains(r#"class="deliver" data-amount="30000""#));
    }

    let stream = StreamRepository::new(&buyer.pool).get(stream_id).await.unwrap().unwrap();
    assert_eq!(stream.count, 3);

    assert_eq!(buyer.get("/oqim/4040").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stream_order_is_tied_to_stream_and_user() {
    let mut reseller = TestClient::new().await;
    let product = seed_product(&reseller.pool, "home", "toaster", 200_000, 0).await;
    SettingsRepository::new(&reseller.pool).insert(Money::new(25_000)).await.unwrap();
    reseller.login("998900000004", "pw").await;
    reseller
        .post_form("/stream/form", &[("name", "Ads"), ("product_id", &product.id.to_string()), ("discount", "20000")])
        .await;
    let owner = user_id(&reseller.pool, "998900000004").await;
    let stream_id = stream_ids(&reseller, owner).await[0];

    let mut buyer = reseller.other_browser();
    buyer.login("998911111111", "pw").await;
    let buyer_id = user_id(&buyer.pool, "998911111111").await;
    let resp = buyer
        .post_form(&format!("/oqim/{stream_id}"), &[("name", "Vali"), ("phone_number", "911111111")])
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(r#"class="total" data-amount="205000""#));

    let orders = OrderRepository::new(&buyer.pool).list_for_user(buyer_id).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].stream_id, Some(stream_id));
    assert_eq!(orders[0].status, OrderStatus::New);

    let stream = StreamRepository::new(&buyer.pool).get(stream_id).await.unwrap().unwrap();
    assert_eq!(stream.count, 0);
}

#[tokio::test]
async fn test_statistics_totals_match_per_stream_counts() {
    let mut reseller = TestClient::new().await;
    let product = seed_product(&reseller.pool, "home", "clock", 50_000, 0).await;
    reseller.login("998900000005", "pw").await;
    let owner = user_id(&reseller.pool, "998900000005").await;
    for name in ["one", "two"] {
        reseller
            .post_form("/stream/form", &[("name", name), ("product_id", &product.id.to_string()), ("discount", "0")])
            .await;
    }
    let ids = stream_ids(&reseller, owner).await;

    let mut buyer = reseller.other_browser();
    buyer.login("998922222222", "pw").await;
    let plan = [(ids[0], OrderStatus::New), (ids[0], OrderStatus::New), (ids[0], OrderStatus::Canceled), (ids[1], OrderStatus::New), (ids[1], OrderStatus::Delivered)];
    for (stream_id, status) in plan {
        buyer
            .post_form(&format!("/oqim/{stream_id}"), &[("name", "B"), ("phone_number", "922222222")])
            .await;
        let last: i64 = sqlx::query_scalar("SELECT MAX(id) FROM orders").fetch_one(&buyer.pool).await.unwrap();
        set_order_status(&buyer.pool, last, status).await;
    }
    buyer.get(&format!("/oqim/{}", ids[1])).await;

    let resp = reseller.get("/stream/statistics").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(r#"<td class="all-new">3</td>"#));
    assert!(resp.body.contains(r#"<td class="all-canceled">1</td>"#));
    assert!(resp.body.contains(r#"<td class="all-delivered">1</td>"#));
    assert!(resp.body.contains(r#"<td class="all-archived">0</td>"#));
    assert!(resp.body.contains(r#"<td class="all-count">1</td>"#));

    let empty = buyer.get("/stream/statistics").await;
    assert!(empty.body.contains(r#"<td class="all-new">0</td>"#));
}

#[tokio::test]
async fn test_stream_pages_require_login() {
    let mut client = TestClient::new().await;
    for path in ["/stream/list", "/stream/statistics", "/stream/in_detail/anything"] {
        let resp = client.get(path).await;
        assert_eq!(resp.location(), Some("/login/"), "{path}");
    }
}
