use std::sync::{Arc, LazyLock};

use eventide::*;

#[derive(Debug)]
struct OrderPlaced {
    id: u64,
    total_cents: u64,
}

static ORDER_PLACED: LazyLock<EventKey<OrderPlaced>> =
    LazyLock::new(|| EventKey::named("order.placed"));

fn mailer() -> Listener<OrderPlaced> {
    Listener::new(|order: Arc<OrderPlaced>| async move {
        println!("mailer: confirmation for order {}", order.id);
        Ok(())
    })
}

fn fraud_check() -> Listener<OrderPlaced> {
    Listener::new(|order: Arc<OrderPlaced>| async move {
        if order.total_cents > 100_000 {
            return Err(Error::external(std::io::Error::other(format!(
                "order {} needs manual review",
                order.id
            ))));
        }
        println!("fraud check: order {} looks fine", order.id);
        Ok(())
    })
}

async fn run(emitter: &DefaultEventEmitter) -> Result {
    let mailer = mailer();
    emitter.on(&ORDER_PLACED, mailer.clone());
    emitter.on(&ORDER_PLACED, fraud_check());

    // Only the first order of the session gets the welcome coupon
    emitter.once(
        &ORDER_PLACED,
        Listener::new(|order: Arc<OrderPlaced>| async move {
            println!("coupons: welcome coupon attached to order {}", order.id);
            Ok(())
        }),
    );

    emitter
        .emit(&ORDER_PLACED, OrderPlaced { id: 1, total_cents: 4_200 })
        .await?;
    emitter
        .emit(&ORDER_PLACED, OrderPlaced { id: 2, total_cents: 250_000 })
        .await?;

    emitter.remove(&mailer);
    emitter
        .emit_with(&ORDER_PLACED, || OrderPlaced { id: 3, total_cents: 990 })
        .await
}

#[tokio::main]
async fn main() -> Result {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("-- fail-soft --");
    let lenient = DefaultEventEmitter::default();
    run(&lenient).await?;

    println!("-- fail-fast --");
    let strict = DefaultEventEmitter::new(EmitterConfig::fail_fast());
    if let Err(e) = run(&strict).await {
        println!("emit failed: {e}");
    }
    Ok(())
}
