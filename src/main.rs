use admin_console::config::Settings;
use admin_console::lifecycle::{setup_tracing, AdminSystem};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();

    let settings = Settings::load()?;
    let system = AdminSystem::start(&settings)?;

    let mut shell = system.shell();
    shell.load().await;
    match shell.current_user().await {
        Some(user) => info!(operator = %user.name, "Signed in"),
        None => info!("No operator signed in"),
    }
    info!(
        title = %shell.header().title,
        menu = shell.menu().len(),
        unread = shell.unread_count(),
        "Shell ready"
    );

    let users = system.user_screen();
    let products = system.product_screen();
    let orders = system.order_screen();

    for (name, notice, count) in [
        {
            let s = users.wait_until(|s| !s.loading).await?;
            ("users", s.notice, s.items.len())
        },
        {
            let s = products.wait_until(|s| !s.loading).await?;
            ("products", s.notice, s.items.len())
        },
        {
            let s = orders.wait_until(|s| !s.loading).await?;
            ("orders", s.notice, s.items.len())
        },
    ] {
        match notice {
            Some(notice) if notice.is_error() => warn!(screen = name, "{}", notice.message()),
            _ => info!(screen = name, count, "Loaded"),
        }
    }

    users.teardown().await;
    products.teardown().await;
    orders.teardown().await;
    shell.teardown().await;
    system.shutdown().await?;
    Ok(())
}
