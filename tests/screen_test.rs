mod common;

use admin_console::model::{Order, Product, User, UserId};
use admin_console::screen::{Mode, Notice, ScreenHandle, ScreenState};
use common::{start_system, FakeBackend};
use resource_framework::{Method, RestEntity};
use serde_json::json;

async fn loaded<T: RestEntity>(screen: &ScreenHandle<T>) -> ScreenState<T> {
    screen.wait_until(|s| !s.loading).await.unwrap()
}

/// Waits for the call started by the last command to settle, reload included.
async fn settled<T: RestEntity>(screen: &ScreenHandle<T>) -> ScreenState<T> {
    screen
        .wait_until(|s| !s.loading && s.notice.is_some())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_list_is_loaded_on_mount() {
    let backend = FakeBackend::new();
    backend.seed("user", &User::new("ada", "ada@example.com", "pw").with_id(1));
    backend.seed("user", &User::new("alan", "alan@example.com", "pw").with_id(2));
    let system = start_system(&backend);

    let users = system.user_screen();
    let state = loaded(&users).await;

    assert_eq!(state.items.len(), 2);
    assert_eq!(state.mode, Mode::Idle);
    assert!(!state.form_visible);
    assert_eq!(state.notice, None);
    assert_eq!(backend.requests_to(Method::Get, "/user/get-all-users").len(), 1);

    users.teardown().await;
}

#[tokio::test]
async fn test_failed_load_reports_backend() {
    let backend = FakeBackend::new();
    backend.fail_next(Method::Get, 503);
    let system = start_system(&backend);

    let orders = system.order_screen();
    let state = loaded(&orders).await;

    assert!(state.items.is_empty());
    assert_eq!(
        state.notice,
        Some(Notice::Error(
            "Failed to load orders. Please check if the backend is running.".into()
        ))
    );

    orders.teardown().await;
}

#[tokio::test]
async fn test_invalid_user_is_never_sent() {
    let backend = FakeBackend::new();
    let system = start_system(&backend);
    let users = system.user_screen();
    loaded(&users).await;

    users.show_add_form().await.unwrap();
    users
        .set_draft(User::new("", "a@b.com", "secret"))
        .await
        .unwrap();
    users.submit().await.unwrap();

    let state = users.wait_until(|s| s.notice.is_some()).await.unwrap();
    assert_eq!(state.notice, Some(Notice::Error("username required".into())));
    assert!(state.form_visible);
    assert_eq!(state.mode, Mode::Adding);
    assert_eq!(backend.count(Method::Post), 0);

    users.teardown().await;
}

#[tokio::test]
async fn test_negative_price_is_rejected() {
    let backend = FakeBackend::new();
    let system = start_system(&backend);
    let products = system.product_screen();
    loaded(&products).await;

    products.show_add_form().await.unwrap();
    products
        .set_draft(Product::new("Widget", -1.0))
        .await
        .unwrap();
    products.submit().await.unwrap();

    let state = products.wait_until(|s| s.notice.is_some()).await.unwrap();
    assert_eq!(
        state.notice.as_ref().map(Notice::message),
        Some("price must be non-negative")
    );
    assert_eq!(backend.count(Method::Post), 0);

    products.teardown().await;
}

#[tokio::test]
async fn test_created_product_appears_after_reload() {
    let backend = FakeBackend::new();
    backend.seed("product", &Product::new("Gadget", 4.5).with_id(4));
    let system = start_system(&backend);
    let products = system.product_screen();
    loaded(&products).await;

    products.show_add_form().await.unwrap();
    products
        .set_draft(Product::new("Widget", 9.99))
        .await
        .unwrap();
    products.submit().await.unwrap();

    let state = settled(&products).await;
    assert_eq!(
        state.notice,
        Some(Notice::Success("Product created successfully!".into()))
    );
    let widgets: Vec<_> = state
        .items
        .iter()
        .filter(|p| p.product_name == "Widget")
        .collect();
    assert_eq!(widgets, vec![&Product::new("Widget", 9.99).with_id(5)]);
    assert!(!state.form_visible);
    assert_eq!(state.mode, Mode::Idle);
    assert_eq!(state.draft, Product::default());
    assert_eq!(
        backend.requests_to(Method::Get, "/product/get-all-products").len(),
        2
    );

    products.teardown().await;
}

#[tokio::test]
async fn test_failed_create_keeps_form_open() {
    let backend = FakeBackend::new();
    let system = start_system(&backend);
    let products = system.product_screen();
    loaded(&products).await;

    backend.fail_next(Method::Post, 500);
    products.show_add_form().await.unwrap();
    products
        .set_draft(Product::new("Widget", 9.99))
        .await
        .unwrap();
    products.submit().await.unwrap();

    let state = settled(&products).await;
    assert_eq!(
        state.notice,
        Some(Notice::Error("Failed to save product. Please try again.".into()))
    );
    assert!(state.form_visible);
    assert_eq!(state.draft, Product::new("Widget", 9.99));
    assert!(state.items.is_empty());

    products.teardown().await;
}

#[tokio::test]
async fn test_edit_sends_partial_update() {
    let backend = FakeBackend::new();
    backend.seed("order", &Order::new("Rush", 10.0).with_id(3));
    let system = start_system(&backend);
    let orders = system.order_screen();
    let state = loaded(&orders).await;

    let original = state.items[0].clone();
    orders.edit(original.clone()).await.unwrap();
    orders
        .set_selected(Order {
            price: Some(12.5),
            ..original
        })
        .await
        .unwrap();
    orders.submit().await.unwrap();

    let state = settled(&orders).await;
    assert_eq!(
        state.notice,
        Some(Notice::Success("Order updated successfully!".into()))
    );
    assert_eq!(state.items, vec![Order::new("Rush", 12.5).with_id(3)]);
    assert_eq!(state.selected, None);

    let patches = backend.requests_to(Method::Patch, "/order/update-order/3");
    assert_eq!(patches.len(), 1);
    assert_eq!(
        patches[0].body,
        Some(json!({ "orderName": "Rush", "price": 12.5 }))
    );

    orders.teardown().await;
}

#[tokio::test]
async fn test_delete_waits_for_confirmation() {
    let backend = FakeBackend::new();
    backend.seed("user", &User::new("ada", "ada@example.com", "pw").with_id(1));
    let system = start_system(&backend);
    let users = system.user_screen();
    loaded(&users).await;

    users.request_delete(UserId(1)).await.unwrap();
    users
        .wait_until(|s| s.pending_delete == Some(UserId(1)))
        .await
        .unwrap();
    users.dismiss_delete().await.unwrap();
    let state = users
        .wait_until(|s| s.pending_delete.is_none())
        .await
        .unwrap();
    assert!(state.contains(&UserId(1)));

    users.confirm_delete().await.unwrap();
    let state = users.wait_until(|s| s.notice.is_some()).await.unwrap();
    assert_eq!(
        state.notice,
        Some(Notice::Error("no delete is awaiting confirmation".into()))
    );

    assert_eq!(backend.count(Method::Delete), 0);
    assert_eq!(backend.ids("user"), vec![1]);

    users.teardown().await;
}

#[tokio::test]
async fn test_confirmed_delete_removes_item() {
    let backend = FakeBackend::new();
    backend.seed("user", &User::new("ada", "ada@example.com", "pw").with_id(1));
    backend.seed("user", &User::new("alan", "alan@example.com", "pw").with_id(2));
    let system = start_system(&backend);
    let users = system.user_screen();
    loaded(&users).await;

    users.request_delete(UserId(2)).await.unwrap();
    users.confirm_delete().await.unwrap();

    let state = settled(&users).await;
    assert_eq!(
        state.notice,
        Some(Notice::Success("User deleted successfully!".into()))
    );
    assert!(!state.contains(&UserId(2)));
    assert!(state.contains(&UserId(1)));
    assert_eq!(state.pending_delete, None);
    assert_eq!(
        backend
            .requests_to(Method::Delete, "/user/delete-user-by-id/2")
            .len(),
        1
    );

    users.teardown().await;
}

#[tokio::test]
async fn test_delete_keeps_open_edit_form() {
    let backend = FakeBackend::new();
    backend.seed("user", &User::new("ada", "ada@example.com", "pw").with_id(1));
    backend.seed("user", &User::new("alan", "alan@example.com", "pw").with_id(2));
    let system = start_system(&backend);
    let users = system.user_screen();
    let state = loaded(&users).await;

    let ada = state.items[0].clone();
    users.edit(ada.clone()).await.unwrap();
    users.request_delete(UserId(2)).await.unwrap();
    users.confirm_delete().await.unwrap();

    let state = settled(&users).await;
    assert_eq!(
        state.notice,
        Some(Notice::Success("User deleted successfully!".into()))
    );
    assert!(!state.contains(&UserId(2)));
    assert_eq!(state.mode, Mode::Editing);
    assert!(state.form_visible);
    assert_eq!(state.active(), Some(&ada));

    users.teardown().await;
}

#[tokio::test]
async fn test_failed_delete_leaves_list() {
    let backend = FakeBackend::new();
    backend.seed("user", &User::new("ada", "ada@example.com", "pw").with_id(1));
    let system = start_system(&backend);
    let users = system.user_screen();
    let before = loaded(&users).await;

    backend.fail_next(Method::Delete, 500);
    users.request_delete(UserId(1)).await.unwrap();
    users.confirm_delete().await.unwrap();

    let state = settled(&users).await;
    assert_eq!(
        state.notice,
        Some(Notice::Error("Failed to delete user. Please try again.".into()))
    );
    assert_eq!(state.items, before.items);
    // Only the mount load; a failed delete does not refetch.
    assert_eq!(backend.count(Method::Get), 1);

    users.teardown().await;
}

#[tokio::test]
async fn test_teardown_stops_screen() {
    let backend = FakeBackend::new();
    let system = start_system(&backend);
    let users = system.user_screen();
    loaded(&users).await;

    let mut changes = users.subscribe();
    users.teardown().await;

    // Drain what was published before the screen stopped; then the channel is closed.
    while changes.changed().await.is_ok() {}
    assert!(changes.has_changed().is_err());

    tokio::time::timeout(std::time::Duration::from_secs(1), system.shutdown())
        .await
        .expect("gateways drain once screens are gone")
        .unwrap();
}
