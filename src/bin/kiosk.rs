//! Scripted walkthrough of one kiosk order, printed to the terminal.
//!
//! Drives the headless core through the same path a customer would take:
//! welcome, order type, menu, cart, checkout with a loyalty redemption,
//! confirmation, and back to the welcome screen.

#![expect(clippy::print_stdout, reason = "terminal demo output")]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::{Rng, SeedableRng, rngs::StdRng};
use tabled::{Table, Tabled, settings::Style};

use brewhaven::prelude::*;

/// Arguments for the kiosk walkthrough.
#[derive(Debug, Parser)]
struct Args {
    /// Directory holding product imagery; generated placeholders are
    /// written back here
    #[clap(long)]
    assets: Option<PathBuf>,

    /// Menu fixture to load instead of the built-in Brew Haven menu
    #[clap(long)]
    fixture: Option<PathBuf>,

    /// Seed for order numbers and marker placement
    #[clap(long)]
    seed: Option<u64>,
}

#[derive(Tabled)]
struct ReceiptRow {
    #[tabled(rename = "Item")]
    item: String,

    #[tabled(rename = "Qty")]
    qty: u32,

    #[tabled(rename = "Each")]
    each: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let args = Args::parse();
    let mut rng = StdRng::seed_from_u64(args.seed.unwrap_or_else(|| rand::thread_rng().r#gen()));

    let catalog = match &args.fixture {
        Some(path) => MenuFixture::from_path(path)?.into_catalog()?,
        None => brew_haven()?,
    };

    let mut session = OrderSession::new(catalog.currency());
    let mut nav = NavigationController::new();
    let mut markers = FeedbackQueue::new(1920, 1080);

    println!("Brew Haven — {}", WallClock.time_of_day());
    println!("[{}] touch to begin", nav.screen());

    nav.goto(Screen::OrderType);
    settle(&mut nav);
    session.set_order_type(OrderType::TakeOut);
    println!("[{}] order type: {}", nav.screen(), session.order_type());

    nav.goto(Screen::Menu);
    settle(&mut nav);

    let first = catalog.first_category().context("menu fixture is empty")?;
    println!("[{}] browsing {}", nav.screen(), first.name());

    if let Some(dir) = &args.assets {
        let store = DirectoryStore::new(dir);

        for &key in first.products() {
            if let Some(product) = catalog.product(key) {
                let bytes = load_or_placeholder(&store, product, first.name());
                println!("  {} ({} image bytes)", product.name, bytes.len());
            }
        }
    }

    // Two espressos and a pastry, with a marker per tap.
    let mut picks = first.products().iter().copied();
    let espresso = picks.next().context("first category is empty")?;
    let second = picks.next().context("first category has one product")?;

    for key in [espresso, espresso, second] {
        session.add_item(&catalog, key)?;
        markers.spawn(Polarity::Addition, &mut rng);
    }

    for _ in 0..10 {
        markers.tick();
    }

    nav.goto(Screen::Cart);
    settle(&mut nav);
    println!("[{}] {} floating markers live", nav.screen(), markers.len());

    let rows: Vec<ReceiptRow> = session
        .cart()
        .lines()
        .iter()
        .filter_map(|line| {
            let product = catalog.product(line.product())?;

            Some(ReceiptRow {
                item: product.name.clone(),
                qty: line.quantity(),
                each: product.price.to_string(),
            })
        })
        .collect();

    println!("{}", Table::new(rows).with(Style::rounded()));

    session.set_redeem(session.loyalty().can_redeem());
    session.begin_checkout()?;
    nav.goto(Screen::Checkout);
    settle(&mut nav);

    let totals = session.totals()?;
    println!("[{}] subtotal {}", nav.screen(), totals.subtotal);
    println!("            tax      {}", totals.tax);
    println!("            discount {}", totals.discount);
    println!("            total    {}", totals.total);

    let order = session.place_order(&mut rng)?;
    nav.goto(Screen::Confirmation);
    settle(&mut nav);
    println!(
        "[{}] order #{} ({}) — {} points remaining",
        nav.screen(),
        order.order_number,
        order.order_type,
        order.points_balance
    );

    session.reset();
    nav.goto(Screen::Welcome);
    settle(&mut nav);
    println!("[{}] ready for the next customer", nav.screen());

    Ok(())
}

/// Run the fade to completion; the demo has no frame clock.
fn settle(nav: &mut NavigationController) {
    while nav.is_transitioning() {
        nav.tick();
    }
}
