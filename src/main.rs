use chrono::Utc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use seatmap::{
    config::Config,
    models::{TicketType, VenueLayout},
    services::{
        analytics::SeatMapStats,
        scanner::TicketScanner,
        tickets::TicketCart,
        SelectionState,
    },
    EventSeating,
};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting seat map demo ({})", config.app.environment);

    // Схема зала
    let layout = VenueLayout::default();
    layout.validate()?;
    let seating = EventSeating::from_config(layout, &config.allocator);
    info!(
        "Venue {} has {} seats, {} available",
        seating.layout.name,
        seating.seats.len(),
        seating.available_seats().len()
    );

    // Корзина: 2 VIP + 1 general
    let catalog = TicketType::defaults();
    let cart = TicketCart::new()
        .update_quantity(&catalog, "vip", 2)
        .update_quantity(&catalog, "general", 1);
    let needed = cart.total_tickets() as usize;
    info!("Cart has {} tickets, total ${:.2}", needed, cart.total_amount(&catalog));

    // Автоподбор мест
    let selection = SelectionState::auto_select(&seating.seats, needed);
    if !selection.is_complete(needed) {
        warn!("Only {} of {} seats could be selected", selection.len(), needed);
    }
    for seat in selection.seats() {
        info!("Selected {} ({}) ${:.2}", seat.label(), seat.section, seat.price);
    }

    let stats = SeatMapStats::collect(&seating.seats, &selection);
    info!(
        "Occupancy {:.1}%, {} blocked, seat selection total ${:.2}",
        stats.occupancy_rate * 100.0,
        stats.blocked_seats,
        stats.selection_total
    );

    if let Some(summary) = cart.checkout(&catalog, Utc::now()) {
        info!("Booking {} ready: {} tickets", summary.booking_id, summary.total_tickets);
    }

    // Проверка билетов на входе
    let mut scanner = TicketScanner::new(&config.scanner);
    for code in ["VALID-TEST-001", "INVALID-TEST-001", "VALID-TEST-001", "short"] {
        match scanner.manual_scan(code, Utc::now()) {
            Ok(record) => info!("Scan {} -> {:?}", record.ticket_id, record.status),
            Err(e) => warn!("Manual entry {:?} rejected: {}", code, e),
        }
    }
    let scan_stats = scanner.history().stats();
    info!(
        "Scanned {} tickets by {}: {} manual, {} invalid",
        scan_stats.total,
        scanner.staff_id(),
        scan_stats.manual,
        scan_stats.invalid
    );

    Ok(())
}
