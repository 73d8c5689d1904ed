use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use crate::error::SelectionError;
use crate::models::{Seat, SeatDisplayStatus, SeatStatus};
use crate::services::allocator::find_best_seats;

/// Выбранные пользователем места.
///
/// Значение неизменяемое: каждая операция возвращает новое состояние.
/// Порядок мест - порядок выбора.
///
/// В JSON это просто массив мест. При чтении проверяется то же, что
/// гарантирует `toggle`: только свободные места и без повторов.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Seat>", into = "Vec<Seat>")]
pub struct SelectionState {
    selected_seats: Vec<Seat>,
}

impl TryFrom<Vec<Seat>> for SelectionState {
    type Error = SelectionError;

    fn try_from(selected_seats: Vec<Seat>) -> Result<Self, Self::Error> {
        let mut seen = HashSet::new();
        for seat in &selected_seats {
            if !seat.is_available() {
                return Err(SelectionError::UnavailableSeat(seat.id.clone()));
            }
            if !seen.insert(seat.id.as_str()) {
                return Err(SelectionError::DuplicateSeat(seat.id.clone()));
            }
        }
        Ok(Self { selected_seats })
    }
}

impl From<SelectionState> for Vec<Seat> {
    fn from(state: SelectionState) -> Self {
        state.selected_seats
    }
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seats(&self) -> &[Seat] {
        &self.selected_seats
    }

    pub fn len(&self) -> usize {
        self.selected_seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected_seats.is_empty()
    }

    pub fn contains(&self, seat_id: &str) -> bool {
        self.selected_seats.iter().any(|s| s.id == seat_id)
    }

    /// Клик по месту.
    ///
    /// Недоступное место игнорируется, выбранное - снимается, новое
    /// добавляется только пока есть место до `max_needed`.
    pub fn toggle(&self, seat: &Seat, max_needed: usize) -> Self {
        if seat.status != SeatStatus::Available {
            debug!("Seat {} is {:?}, ignoring toggle", seat.id, seat.status);
            return self.clone();
        }

        if self.contains(&seat.id) {
            let selected_seats = self
                .selected_seats
                .iter()
                .filter(|s| s.id != seat.id)
                .cloned()
                .collect();
            return Self { selected_seats };
        }

        if self.selected_seats.len() < max_needed {
            let mut selected_seats = self.selected_seats.clone();
            selected_seats.push(seat.clone());
            return Self { selected_seats };
        }

        // выбор заполнен - молча игнорируем
        debug!(
            "Selection is full ({} of {}), ignoring seat {}",
            self.len(),
            max_needed,
            seat.id
        );
        self.clone()
    }

    pub fn clear(&self) -> Self {
        Self::new()
    }

    /// Автоподбор: заменяет выбор лучшими свободными местами из `seats`.
    pub fn auto_select(seats: &[Seat], needed: usize) -> Self {
        let available: Vec<Seat> = seats.iter().filter(|s| s.is_available()).cloned().collect();
        let selected_seats = find_best_seats(&available, needed);
        debug!(
            "Auto-selected {} of {} seats from {} available",
            selected_seats.len(),
            needed,
            available.len()
        );
        Self { selected_seats }
    }

    pub fn total_price(&self) -> f64 {
        self.selected_seats.iter().map(|s| s.price).sum()
    }

    pub fn is_complete(&self, target: usize) -> bool {
        self.selected_seats.len() == target
    }

    // Статус для отрисовки сетки
    pub fn display_status(&self, seat: &Seat) -> SeatDisplayStatus {
        if self.contains(&seat.id) {
            return SeatDisplayStatus::Selected;
        }
        match seat.status {
            SeatStatus::Available => SeatDisplayStatus::Available,
            SeatStatus::Reserved => SeatDisplayStatus::Reserved,
            SeatStatus::Blocked => SeatDisplayStatus::Blocked,
        }
    }
}
