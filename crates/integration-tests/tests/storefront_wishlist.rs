//! Integration tests for the wishlist.

use lantern_integration_tests::TestContext;
use reqwest::StatusCode;

#[tokio::test]
async fn test_toggle_adds_then_removes() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx
        .post_form("/wishlist/toggle", &[("id", "3"), ("return_to", "/products")])
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Added to wishlist!"));
    assert!(body.contains("wishlist-btn active"));

    let (_, body) = ctx
        .post_form("/wishlist/toggle", &[("id", "3"), ("return_to", "/products")])
        .await;
    assert!(body.contains("Removed from wishlist"));
    assert!(!body.contains("wishlist-btn active"));
}

#[tokio::test]
async fn test_wishlist_only_listing() {
    let ctx = TestContext::new().await;
    ctx.post_form("/wishlist/toggle", &[("id", "3")]).await;

    let (_, body) = ctx.get("/products?wishlist=1").await;
    assert!(body.contains("Linen Throw"));
    assert!(!body.contains("Brass Desk Lamp"));
    assert!(body.contains("Show All Products"));
}

#[tokio::test]
async fn test_empty_wishlist_listing() {
    let ctx = TestContext::new().await;
    let (_, body) = ctx.get("/products?wishlist=1").await;
    assert!(body.contains("Your wishlist is empty."));
}

#[tokio::test]
async fn test_toggle_unknown_product_is_not_found() {
    let ctx = TestContext::new().await;
    let (status, _) = ctx.post_form("/wishlist/toggle", &[("id", "999")]).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_wishlist_does_not_touch_cart() {
    let ctx = TestContext::new().await;
    ctx.post_form("/wishlist/toggle", &[("id", "1")]).await;
    assert_eq!(ctx.cart_count().await, 0);
}
