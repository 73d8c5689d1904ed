//! tickets.rs
//!
//! Корзина билетов: выбор типа и количества до выбора мест.
//!
//! Сумма количеств в корзине - это число мест, которое потом подбирает
//! `SelectionState::auto_select` или набирает пользователь вручную.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::TicketType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub ticket_id: String,
    pub quantity: u32,
}

/// Строка заказа с ценой, рассчитанной по каталогу.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub ticket_id: String,
    pub name: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub line_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSummary {
    pub booking_id: String,
    pub lines: Vec<LineItem>,
    pub total_tickets: u32,
    pub total_amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketCart {
    lines: Vec<CartLine>,
}

impl TicketCart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn quantity(&self, ticket_id: &str) -> u32 {
        self.lines
            .iter()
            .find(|l| l.ticket_id == ticket_id)
            .map(|l| l.quantity)
            .unwrap_or(0)
    }

    /// Меняет количество билета на `change` (обычно +1 / -1).
    ///
    /// Результат зажимается в [0, min(available, max_per_order)], строка с
    /// нулевым количеством удаляется. Неизвестный билет - корзина не меняется.
    pub fn update_quantity(&self, catalog: &[TicketType], ticket_id: &str, change: i32) -> Self {
        let Some(ticket) = catalog.iter().find(|t| t.id == ticket_id) else {
            debug!("Unknown ticket type {}, cart unchanged", ticket_id);
            return self.clone();
        };

        let current = self.quantity(ticket_id) as i64;
        let limit = ticket.max_selectable() as i64;
        let new_quantity = (current + change as i64).clamp(0, limit) as u32;

        let mut lines = self.lines.clone();
        match lines.iter().position(|l| l.ticket_id == ticket_id) {
            Some(pos) if new_quantity == 0 => {
                lines.remove(pos);
            }
            Some(pos) => lines[pos].quantity = new_quantity,
            None if new_quantity > 0 => lines.push(CartLine {
                ticket_id: ticket_id.to_string(),
                quantity: new_quantity,
            }),
            None => {}
        }

        Self { lines }
    }

    /// Сколько мест нужно выбрать.
    pub fn total_tickets(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn line_items(&self, catalog: &[TicketType]) -> Vec<LineItem> {
        self.lines
            .iter()
            .filter_map(|line| {
                let ticket = catalog.iter().find(|t| t.id == line.ticket_id)?;
                Some(LineItem {
                    ticket_id: ticket.id.clone(),
                    name: ticket.name.clone(),
                    unit_price: ticket.price,
                    quantity: line.quantity,
                    line_total: ticket.price * line.quantity as f64,
                })
            })
            .collect()
    }

    // Билеты, которых нет в каталоге, в сумму не входят
    pub fn total_amount(&self, catalog: &[TicketType]) -> f64 {
        self.line_items(catalog).iter().map(|l| l.line_total).sum()
    }

    /// Итог заказа для страницы подтверждения.
    ///
    /// Пустая корзина (или корзина только из билетов вне каталога) - `None`.
    pub fn checkout(&self, catalog: &[TicketType], now: DateTime<Utc>) -> Option<CheckoutSummary> {
        // строки, пропавшие из каталога, не входят ни в количество, ни в сумму
        let lines = self.line_items(catalog);
        let total_tickets: u32 = lines.iter().map(|l| l.quantity).sum();
        if total_tickets == 0 {
            return None;
        }
        let total_amount: f64 = lines.iter().map(|l| l.line_total).sum();

        Some(CheckoutSummary {
            booking_id: format!("TKT-{}", now.timestamp_millis()),
            lines,
            total_tickets,
            total_amount,
        })
    }
}
