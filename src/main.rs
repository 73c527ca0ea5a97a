//! Demo binary: walks the engine through a scripted session and prints the
//! book after each step.

use lobcore::types::price::{display_price, to_fixed};
use lobcore::{MatchingEngine, Order, OrderBook, Side, StdoutSink, SystemClock};

fn px(s: &str) -> u64 {
    to_fixed(s).expect("demo price literal")
}

fn separator(title: &str) {
    println!("\n{}", "=".repeat(50));
    println!("{title}");
    println!("{}", "=".repeat(50));
}

fn print_book(book: &OrderBook, depth: usize) {
    let snap = book.snapshot(depth);

    println!("\n========== ORDER BOOK ==========");
    println!("{:>15}", "ASKS (Sell)");
    println!("{:>10} {:>15}", "Price", "Quantity");
    println!("--------------------------------");
    for level in snap.asks.iter().rev() {
        println!(
            "{:>10} {:>15}",
            display_price(level.price),
            level.total_quantity
        );
    }
    println!("================================");
    for level in &snap.bids {
        println!(
            "{:>10} {:>15}",
            display_price(level.price),
            level.total_quantity
        );
    }
    println!("--------------------------------");
    println!("{:>15}", "BIDS (Buy)");
    println!("================================\n");
}

fn main() {
    tracing_subscriber::fmt::init();

    let mut engine: MatchingEngine<SystemClock, StdoutSink> = MatchingEngine::new(10_000);

    separator("Adding buy and sell orders on both sides");
    let seeds = [
        (1, Side::Buy, "100.50", 100),
        (2, Side::Buy, "100.25", 150),
        (3, Side::Buy, "100.50", 50),
        (4, Side::Buy, "99.75", 200),
        (5, Side::Sell, "101.00", 100),
        (6, Side::Sell, "101.25", 150),
        (7, Side::Sell, "101.00", 75),
        (8, Side::Sell, "102.00", 200),
    ];
    for (id, side, price, quantity) in seeds {
        engine
            .add(Order::new(id, side, px(price), quantity, 0))
            .expect("seed order admits cleanly");
    }
    print_book(engine.book(), 5);

    separator("Cancel order #5 (Sell @ 101.00, qty 100)");
    if engine.cancel(5) {
        println!("Order #5 cancelled");
    }
    print_book(engine.book(), 5);

    separator("Amend order #3 in place: quantity 50 -> 200");
    if engine.amend(3, px("100.50"), 200).expect("valid amend") {
        println!("Order #3 amended, queue position kept");
    }
    print_book(engine.book(), 5);

    separator("Amend order #2: re-price 100.25 -> 100.75, qty 100");
    if engine.amend(2, px("100.75"), 100).expect("valid amend") {
        println!("Order #2 re-priced, queues as a fresh arrival");
    }
    print_book(engine.book(), 5);

    separator("Aggressive buy @ 101.50 crosses the spread");
    engine
        .add(Order::new(9, Side::Buy, px("101.50"), 80, 0))
        .expect("aggressor admits cleanly");
    print_book(engine.book(), 5);

    separator("Aggressive sell @ 99.00 sweeps the bids");
    engine
        .add(Order::new(10, Side::Sell, px("99.00"), 500, 0))
        .expect("aggressor admits cleanly");
    print_book(engine.book(), 5);

    separator("Top-3 snapshot");
    let snap = engine.snapshot(3);
    println!("Bids:");
    for level in &snap.bids {
        println!(
            "  {} x {}",
            display_price(level.price),
            level.total_quantity
        );
    }
    println!("Asks:");
    for level in &snap.asks {
        println!(
            "  {} x {}",
            display_price(level.price),
            level.total_quantity
        );
    }

    separator("Final state");
    println!("Resident orders: {}", engine.book().order_count());
    println!("State root: {}", hex::encode(engine.book().state_root()));
}
