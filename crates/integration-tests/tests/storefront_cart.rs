//! Integration tests for the cart, order summary and checkout.

#![allow(clippy::unwrap_used)]

use lantern_integration_tests::TestContext;
use reqwest::StatusCode;

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new().await;
    let (status, body) = ctx.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_new_visitor_has_empty_cart() {
    let ctx = TestContext::new().await;
    assert_eq!(ctx.cart_count().await, 0);

    let (status, body) = ctx.get("/cart").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Your cart is empty"));
    assert!(body.contains("Free"));
}

#[tokio::test]
async fn test_add_twice_updates_count_and_summary() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx
        .post_form("/cart/add", &[("id", "1"), ("return_to", "/products")])
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Brass Desk Lamp added to cart!"));
    assert!(body.contains("Added!"));

    ctx.post_form("/cart/add", &[("id", "1")]).await;
    assert_eq!(ctx.cart_count().await, 2);

    let (_, cart) = ctx.get("/cart").await;
    assert!(cart.contains("$20.00"));
    assert!(cart.contains("$9.99"));
    assert!(cart.contains("$1.60"));
    assert!(cart.contains("$31.59"));
}

#[tokio::test]
async fn test_toast_is_shown_once() {
    let ctx = TestContext::new().await;
    let (_, first) = ctx.post_form("/cart/add", &[("id", "2")]).await;
    assert!(first.contains("Paper Lantern added to cart!"));

    let (_, second) = ctx.get("/products").await;
    assert!(!second.contains("added to cart!"));
}

#[tokio::test]
async fn test_add_unknown_product_is_not_found() {
    let ctx = TestContext::new().await;
    let (status, _) = ctx.post_form("/cart/add", &[("id", "999")]).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(ctx.cart_count().await, 0);
}

#[tokio::test]
async fn test_decrement_to_zero_removes_line() {
    let ctx = TestContext::new().await;
    ctx.post_form("/cart/add", &[("id", "1")]).await;

    let (_, body) = ctx
        .post_form("/cart/update", &[("id", "1"), ("delta", "-2")])
        .await;
    assert!(body.contains("Item removed from cart"));
    assert!(body.contains("Your cart is empty"));
    assert_eq!(ctx.cart_count().await, 0);
}

#[tokio::test]
async fn test_increment_quantity() {
    let ctx = TestContext::new().await;
    ctx.post_form("/cart/add", &[("id", "5")]).await;
    ctx.post_form("/cart/update", &[("id", "5"), ("delta", "2")])
        .await;

    assert_eq!(ctx.cart_count().await, 3);
    let (_, cart) = ctx.get("/cart").await;
    assert!(cart.contains("$42.00"));
}

#[tokio::test]
async fn test_remove_absent_item_is_silent() {
    let ctx = TestContext::new().await;
    ctx.post_form("/cart/add", &[("id", "1")]).await;
    ctx.get("/cart").await;

    let (status, body) = ctx.post_form("/cart/remove", &[("id", "4")]).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("Item removed from cart"));
    assert_eq!(ctx.cart_count().await, 1);
}

#[tokio::test]
async fn test_remove_item() {
    let ctx = TestContext::new().await;
    ctx.post_form("/cart/add", &[("id", "1")]).await;
    ctx.post_form("/cart/add", &[("id", "3")]).await;

    let (_, body) = ctx.post_form("/cart/remove", &[("id", "1")]).await;
    assert!(body.contains("Item removed from cart"));
    assert!(body.contains("Linen Throw"));
    assert!(!body.contains("Brass Desk Lamp"));
}

#[tokio::test]
async fn test_checkout_empty_cart_is_rejected() {
    let ctx = TestContext::new().await;
    let (status, body) = ctx.get("/checkout").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Your cart is empty!"));
    assert!(body.contains("toast--error"));
}

#[tokio::test]
async fn test_checkout_asks_for_total() {
    let ctx = TestContext::new().await;
    ctx.post_form("/cart/add", &[("id", "1")]).await;

    let (status, body) = ctx.get("/checkout").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Proceed to checkout for $20.79?"));
}

#[tokio::test]
async fn test_checkout_cancel_keeps_cart() {
    let ctx = TestContext::new().await;
    ctx.post_form("/cart/add", &[("id", "1")]).await;

    let (status, body) = ctx
        .post_form("/checkout", &[("decision", "cancel")])
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("Order placed successfully!"));
    assert_eq!(ctx.cart_count().await, 1);
}

#[tokio::test]
async fn test_checkout_accept_clears_cart() {
    let ctx = TestContext::new().await;
    ctx.post_form("/cart/add", &[("id", "1")]).await;
    ctx.post_form("/cart/add", &[("id", "2")]).await;

    let (status, body) = ctx
        .post_form("/checkout", &[("decision", "accept")])
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Order placed successfully! Thank you for your purchase."));
    assert!(body.contains("Your cart is empty"));
    assert_eq!(ctx.cart_count().await, 0);
}

#[tokio::test]
async fn test_visitors_have_separate_carts() {
    let ctx = TestContext::new().await;
    ctx.post_form("/cart/add", &[("id", "1")]).await;

    let other = TestContext::visitor();
    let count = other
        .get(ctx.url("/cart/count"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(count, "0");
    assert_eq!(ctx.cart_count().await, 1);
}

#[tokio::test]
async fn test_offsite_return_to_is_ignored() {
    let ctx = TestContext::new().await;
    let response = ctx
        .client
        .post(ctx.url("/cart/add"))
        .form(&[("id", "1"), ("return_to", "//evil.example/")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.url().path(), "/products");
}
