//! allocator.rs
//!
//! Генерация карты мест и автоподбор мест.
//!
//! Ключевые компоненты:
//! 1.  **SeatAllocator**: строит полный список мест зала по схеме секций. Статус
//!     каждого места разыгрывается независимо (blocked, затем reserved), источник
//!     случайности передается снаружи, чтобы тесты могли фиксировать seed.
//! 2.  **find_best_seats**: жадный first-fit поиск подряд идущих мест в одном ряду
//!     с откатом на первые N свободных мест, если такого ряда нет.

use rand::Rng;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::config::AllocatorConfig;
use crate::models::{Seat, SeatStatus, VenueSection};

/// Генератор мест зала с настраиваемыми вероятностями статусов.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeatAllocator {
    /// Вероятность, что место заблокировано (обслуживание и т.п.).
    blocked_probability: f64,
    /// Вероятность, что незаблокированное место уже зарезервировано.
    reserved_probability: f64,
}

impl Default for SeatAllocator {
    fn default() -> Self {
        Self::new(0.05, 0.15)
    }
}

impl SeatAllocator {
    /// Создает генератор; вероятности приводятся к диапазону [0, 1].
    pub fn new(blocked_probability: f64, reserved_probability: f64) -> Self {
        Self {
            blocked_probability: clamp_probability(blocked_probability),
            reserved_probability: clamp_probability(reserved_probability),
        }
    }

    pub fn from_config(config: &AllocatorConfig) -> Self {
        Self::new(config.blocked_probability, config.reserved_probability)
    }

    pub fn blocked_probability(&self) -> f64 {
        self.blocked_probability
    }

    pub fn reserved_probability(&self) -> f64 {
        self.reserved_probability
    }

    /// Строит все места зала: секция за секцией, ряд за рядом, место за местом.
    ///
    /// Цена копируется из секции в момент генерации. Секция с нулем рядов
    /// или мест просто ничего не добавляет.
    pub fn generate_seats<R>(&self, sections: &[VenueSection], rng: &mut R) -> Vec<Seat>
    where
        R: Rng + ?Sized,
    {
        let capacity: u64 = sections.iter().map(VenueSection::capacity).sum();
        let mut seats = Vec::with_capacity(capacity as usize);

        for section in sections {
            for row_index in 0..section.rows {
                let Some(row) = section.row_label(row_index) else {
                    warn!(
                        "Section {} row index {} has no valid label, skipping",
                        section.id, row_index
                    );
                    continue;
                };

                for number in 1..=section.seats_per_row {
                    let status = self.draw_status(rng);
                    seats.push(Seat::new(&section.id, row, number, section.price, status));
                }
            }
        }

        debug!("Generated {} seats across {} sections", seats.len(), sections.len());
        seats
    }

    // Сначала проверяем blocked, потом reserved - место не может быть и тем и другим
    fn draw_status<R>(&self, rng: &mut R) -> SeatStatus
    where
        R: Rng + ?Sized,
    {
        if rng.gen::<f64>() < self.blocked_probability {
            SeatStatus::Blocked
        } else if rng.gen::<f64>() < self.reserved_probability {
            SeatStatus::Reserved
        } else {
            SeatStatus::Available
        }
    }
}

fn clamp_probability(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Подбирает `needed` мест из списка свободных.
///
/// Места группируются по (секция, ряд) в порядке первого появления, внутри
/// группы сортируются по номеру. Возвращается начало первой найденной серии
/// подряд идущих номеров длиной не меньше `needed`. Если такой серии нет
/// ни в одном ряду, возвращаются первые `needed` мест исходного списка.
///
/// Длина результата всегда `min(needed, available.len())`.
pub fn find_best_seats(available: &[Seat], needed: usize) -> Vec<Seat> {
    if needed == 0 {
        return Vec::new();
    }

    // Группы в порядке первого появления ключа
    let mut index: HashMap<(&str, char), usize> = HashMap::new();
    let mut rows: Vec<Vec<&Seat>> = Vec::new();
    for seat in available {
        let slot = *index.entry((seat.section.as_str(), seat.row)).or_insert_with(|| {
            rows.push(Vec::new());
            rows.len() - 1
        });
        rows[slot].push(seat);
    }

    for row in rows.iter_mut() {
        row.sort_by_key(|seat| seat.number);

        let mut run_start = 0;
        for i in 0..row.len() {
            if i > run_start && row[i].number != row[i - 1].number + 1 {
                run_start = i;
            }
            if i + 1 - run_start == needed {
                let picked: Vec<Seat> = row[run_start..=i].iter().map(|s| (*s).clone()).collect();
                debug!(
                    "Found {} consecutive seats starting at {}",
                    needed, picked[0].id
                );
                return picked;
            }
        }
    }

    debug!(
        "No {} consecutive seats in any row, falling back to first available",
        needed
    );
    available.iter().take(needed).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn seat(section: &str, row: char, number: u32) -> Seat {
        Seat::new(section, row, number, 10.0, SeatStatus::Available)
    }

    fn numbers(seats: &[Seat]) -> Vec<u32> {
        seats.iter().map(|s| s.number).collect()
    }

    #[test]
    fn generates_every_seat_with_unique_ids() {
        let sections = vec![
            VenueSection::new("vip", "VIP", 5, 10, 'A', 199.99),
            VenueSection::new("general", "General", 15, 20, 'F', 89.99),
        ];
        let mut rng = StdRng::seed_from_u64(7);

        let seats = SeatAllocator::default().generate_seats(&sections, &mut rng);

        assert_eq!(seats.len(), 50 + 300);
        let ids: HashSet<&str> = seats.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), seats.len());
        assert!(seats.iter().filter(|s| s.section == "vip").all(|s| s.price == 199.99));
    }

    #[test]
    fn zero_sized_sections_yield_nothing() {
        let sections = vec![
            VenueSection::new("a", "A", 0, 10, 'A', 1.0),
            VenueSection::new("b", "B", 4, 0, 'A', 1.0),
        ];
        let mut rng = StdRng::seed_from_u64(1);
        assert!(SeatAllocator::default().generate_seats(&sections, &mut rng).is_empty());
    }

    #[test]
    fn same_seed_same_map() {
        let sections = vec![VenueSection::new("general", "General", 6, 12, 'F', 50.0)];
        let allocator = SeatAllocator::default();

        let first = allocator.generate_seats(&sections, &mut StdRng::seed_from_u64(99));
        let second = allocator.generate_seats(&sections, &mut StdRng::seed_from_u64(99));

        assert_eq!(first, second);
    }

    #[test]
    fn extreme_probabilities_are_deterministic() {
        let sections = vec![VenueSection::new("s", "S", 2, 5, 'A', 1.0)];
        let mut rng = StdRng::seed_from_u64(3);

        let all_blocked = SeatAllocator::new(1.0, 0.0).generate_seats(&sections, &mut rng);
        assert!(all_blocked.iter().all(|s| s.status == SeatStatus::Blocked));

        let all_reserved = SeatAllocator::new(0.0, 1.0).generate_seats(&sections, &mut rng);
        assert!(all_reserved.iter().all(|s| s.status == SeatStatus::Reserved));

        let all_free = SeatAllocator::new(-3.0, f64::NAN).generate_seats(&sections, &mut rng);
        assert!(all_free.iter().all(Seat::is_available));
    }

    #[test]
    fn first_fit_in_a_free_row() {
        let row: Vec<Seat> = (1..=10).map(|n| seat("general", 'A', n)).collect();
        assert_eq!(numbers(&find_best_seats(&row, 3)), vec![1, 2, 3]);
    }

    #[test]
    fn sorts_within_row_and_skips_short_runs() {
        // 9, 2, 5, 3, 6, 7 -> отсортировано: 2 3 | 5 6 7 | 9
        let row: Vec<Seat> = [9, 2, 5, 3, 6, 7].iter().map(|&n| seat("general", 'B', n)).collect();
        assert_eq!(numbers(&find_best_seats(&row, 3)), vec![5, 6, 7]);
        assert_eq!(numbers(&find_best_seats(&row, 2)), vec![2, 3]);
    }

    #[test]
    fn rows_are_scanned_in_first_seen_order() {
        let seats = vec![
            seat("general", 'C', 1),
            seat("vip", 'A', 4),
            seat("general", 'C', 3),
            seat("vip", 'A', 5),
            seat("general", 'D', 1),
            seat("general", 'D', 2),
        ];

        let picked = find_best_seats(&seats, 2);
        let ids: Vec<&str> = picked.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["vip-A4", "vip-A5"]);
    }

    #[test]
    fn falls_back_to_input_order() {
        let seats = vec![seat("general", 'A', 5), seat("general", 'B', 1), seat("general", 'B', 2)];

        let picked = find_best_seats(&seats, 3);

        assert_eq!(picked, seats);
    }

    #[test]
    fn partial_result_when_not_enough_seats() {
        let seats = vec![seat("vip", 'A', 1), seat("vip", 'C', 7)];
        assert_eq!(find_best_seats(&seats, 5), seats);
    }

    #[test]
    fn zero_needed_returns_nothing() {
        let seats = vec![seat("vip", 'A', 1)];
        assert!(find_best_seats(&seats, 0).is_empty());
        assert!(find_best_seats(&[], 4).is_empty());
    }

    #[test]
    fn same_row_in_different_sections_is_not_merged() {
        let seats = vec![seat("vip", 'A', 1), seat("general", 'A', 2)];
        // ни в одной группе нет двух мест подряд
        assert_eq!(find_best_seats(&seats, 2), seats);
    }

    #[test]
    fn rows_past_z_take_the_next_character() {
        let sections = vec![VenueSection::new("back", "Back", 3, 2, 'Y', 10.0)];
        let mut rng = StdRng::seed_from_u64(4);

        let seats = SeatAllocator::default().generate_seats(&sections, &mut rng);

        let ids: Vec<&str> = seats.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["back-Y1", "back-Y2", "back-Z1", "back-Z2", "back-[1", "back-[2"]);
    }

    #[test]
    fn rows_without_a_valid_label_are_skipped() {
        // U+D7FF, дальше идут суррогаты - для них char не существует
        let start = char::from_u32(0xD7FF).unwrap();
        let sections = vec![VenueSection::new("edge", "Edge", 3, 1, start, 10.0)];
        let mut rng = StdRng::seed_from_u64(4);

        let seats = SeatAllocator::default().generate_seats(&sections, &mut rng);

        assert_eq!(seats.len(), 1);
        assert!(seats.len() < sections[0].capacity() as usize);
        assert_eq!(seats[0].row, start);
    }
}
