//! analytics.rs
//!
//! Статистика по карте мест.
//!
//! Включает в себя:
//! - Подсчет мест по статусам (свободные, зарезервированные, заблокированные, выбранные).
//! - Заполненность зала без учета заблокированных мест.
//! - Разбивку по секциям в порядке их появления в карте.

use serde::Serialize;

use crate::models::{Seat, SeatStatus};
use crate::services::selection::SelectionState;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SectionStats {
    pub section: String,
    pub total_seats: usize,
    pub available_seats: usize,
    pub reserved_seats: usize,
    pub blocked_seats: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeatMapStats {
    pub total_seats: usize,
    pub available_seats: usize,
    pub reserved_seats: usize,
    pub blocked_seats: usize,
    pub selected_seats: usize,
    /// reserved / (total - blocked)
    pub occupancy_rate: f64,
    /// Сколько можно выручить за все еще свободные места.
    pub available_revenue: f64,
    pub selection_total: f64,
    pub sections: Vec<SectionStats>,
}

impl SeatMapStats {
    pub fn collect(seats: &[Seat], selection: &SelectionState) -> Self {
        let mut stats = SeatMapStats {
            selected_seats: selection.len(),
            selection_total: selection.total_price(),
            ..Default::default()
        };

        for seat in seats {
            let pos = match stats.sections.iter().position(|s| s.section == seat.section) {
                Some(pos) => pos,
                None => {
                    stats.sections.push(SectionStats {
                        section: seat.section.clone(),
                        ..Default::default()
                    });
                    stats.sections.len() - 1
                }
            };
            let section = &mut stats.sections[pos];

            stats.total_seats += 1;
            section.total_seats += 1;

            match seat.status {
                SeatStatus::Available => {
                    stats.available_seats += 1;
                    section.available_seats += 1;
                    stats.available_revenue += seat.price;
                }
                SeatStatus::Reserved => {
                    stats.reserved_seats += 1;
                    section.reserved_seats += 1;
                }
                SeatStatus::Blocked => {
                    stats.blocked_seats += 1;
                    section.blocked_seats += 1;
                }
            }
        }

        let sellable = stats.total_seats - stats.blocked_seats;
        if sellable > 0 {
            stats.occupancy_rate = stats.reserved_seats as f64 / sellable as f64;
        }

        stats
    }
}
