//! scanner.rs
//!
//! Состояние консоли проверки билетов на входе.
//!
//! Декодирование QR здесь не делается - на вход приходит уже готовый
//! `ScanResult` (от камеры) или код, набранный сотрудником вручную.
//! Модуль ведет журнал проверок, ловит повторный проход по одному билету
//! и умеет выгружать журнал в JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::config::ScannerConfig;
use crate::error::ManualEntryError;
use crate::models::{ScanRecord, ScanResult, ScanStatus};

pub const MIN_TICKET_CODE_LEN: u64 = 8;

const MANUAL_EVENT_ID: &str = "EVT-MANUAL-ENTRY";
const ALREADY_SCANNED: &str = "Already scanned";
const NEEDS_VERIFICATION: &str = "Manual entry - verification required";

// Форма ручного ввода
#[derive(Debug, Validate)]
struct ManualEntryForm {
    #[validate(length(min = MIN_TICKET_CODE_LEN))]
    ticket_code: String,
}

/// Проверяет код, введенный вручную, и строит по нему результат сканирования.
///
/// Код приводится к верхнему регистру. Билет считается действительным,
/// если в коде есть `VALID` (но не `INVALID`).
pub fn manual_entry(code: &str, now: DateTime<Utc>) -> Result<ScanResult, ManualEntryError> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        return Err(ManualEntryError::Missing);
    }

    ManualEntryForm { ticket_code: code.to_string() }
        .validate()
        .map_err(|source| ManualEntryError::TooShort {
            min: MIN_TICKET_CODE_LEN,
            source,
        })?;

    let ticket_id = code.to_uppercase();
    let is_valid = has_valid_marker(&ticket_id);

    Ok(ScanResult {
        ticket_id,
        event_id: MANUAL_EVENT_ID.to_string(),
        attendee_name: "Manual Entry User".to_string(),
        seat_number: "MANUAL".to_string(),
        ticket_type: "General".to_string(),
        is_valid,
        error: (!is_valid).then(|| NEEDS_VERIFICATION.to_string()),
        timestamp: now,
        is_manual_entry: true,
    })
}

fn has_valid_marker(code: &str) -> bool {
    code.match_indices("VALID")
        .any(|(idx, _)| !code[..idx].ends_with("IN"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanFilter {
    All,
    Status(ScanStatus),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub manual: usize,
}

/// Журнал сканирования, самые свежие записи впереди.
#[derive(Debug, Clone, Default)]
pub struct ScanHistory {
    records: VecDeque<ScanRecord>,
}

impl ScanHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &ScanRecord> {
        self.records.iter()
    }

    pub fn latest(&self) -> Option<&ScanRecord> {
        self.records.front()
    }

    // Билет уже проходил (успешно или через ручной ввод)
    fn already_admitted(&self, ticket_id: &str) -> bool {
        self.records
            .iter()
            .any(|r| r.ticket_id == ticket_id && r.status != ScanStatus::Invalid)
    }

    /// Добавляет результат в журнал.
    ///
    /// Повторный действительный скан того же билета записывается как
    /// недействительный с ошибкой "Already scanned".
    pub fn record(&mut self, result: ScanResult, scanned_by: &str) -> &ScanRecord {
        let mut is_valid = result.is_valid;
        let mut error = result.error;

        if is_valid && self.already_admitted(&result.ticket_id) {
            warn!("Ticket {} was already scanned", result.ticket_id);
            is_valid = false;
            error = Some(ALREADY_SCANNED.to_string());
        }

        let status = match (is_valid, result.is_manual_entry) {
            (false, _) => ScanStatus::Invalid,
            (true, true) => ScanStatus::Manual,
            (true, false) => ScanStatus::Valid,
        };

        debug!("Recorded scan of {} as {:?}", result.ticket_id, status);

        self.records.push_front(ScanRecord {
            id: Uuid::new_v4(),
            ticket_id: result.ticket_id,
            attendee_name: result.attendee_name,
            timestamp: result.timestamp,
            status,
            seat_number: result.seat_number,
            ticket_type: result.ticket_type,
            scanned_by: scanned_by.to_string(),
            error,
            is_manual_entry: result.is_manual_entry,
        });

        &self.records[0]
    }

    pub fn filter(&self, filter: ScanFilter) -> Vec<&ScanRecord> {
        self.records
            .iter()
            .filter(|r| match filter {
                ScanFilter::All => true,
                ScanFilter::Status(status) => r.status == status,
            })
            .collect()
    }

    pub fn stats(&self) -> ScanStats {
        self.records.iter().fold(ScanStats::default(), |mut stats, r| {
            stats.total += 1;
            match r.status {
                ScanStatus::Valid => stats.valid += 1,
                ScanStatus::Invalid => stats.invalid += 1,
                ScanStatus::Manual => stats.manual += 1,
            }
            stats
        })
    }

    pub fn clear(&mut self) {
        info!("Clearing scan history ({} records)", self.records.len());
        self.records.clear();
    }

    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.records)
    }
}

/// Консоль одного сотрудника: журнал плюс его идентификатор.
#[derive(Debug, Clone)]
pub struct TicketScanner {
    staff_id: String,
    history: ScanHistory,
}

impl TicketScanner {
    pub fn new(config: &ScannerConfig) -> Self {
        Self {
            staff_id: config.staff_id.clone(),
            history: ScanHistory::new(),
        }
    }

    pub fn staff_id(&self) -> &str {
        &self.staff_id
    }

    pub fn history(&self) -> &ScanHistory {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut ScanHistory {
        &mut self.history
    }

    // Результат с камеры
    pub fn scan(&mut self, result: ScanResult) -> &ScanRecord {
        self.history.record(result, &self.staff_id)
    }

    // Ручной ввод: ошибка формы в журнал не попадает
    pub fn manual_scan(
        &mut self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<&ScanRecord, ManualEntryError> {
        let result = manual_entry(code, now)?;
        Ok(self.history.record(result, &self.staff_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_entry_rejects_empty_and_short_codes() {
        let now = Utc::now();
        assert!(matches!(manual_entry("   ", now), Err(ManualEntryError::Missing)));
        assert!(matches!(
            manual_entry("TKT-1", now),
            Err(ManualEntryError::TooShort { min: 8, .. })
        ));
        // ровно MIN_TICKET_CODE_LEN символов уже проходит
        assert!(manual_entry("TKT-0001", now).is_ok());
        assert!(matches!(manual_entry("TKT-001", now), Err(ManualEntryError::TooShort { .. })));
    }

    #[test]
    fn manual_entry_uppercases_and_marks_validity() {
        let now = Utc::now();

        let ok = manual_entry("vip-valid-001", now).unwrap();
        assert_eq!(ok.ticket_id, "VIP-VALID-001");
        assert!(ok.is_valid);
        assert!(ok.error.is_none());
        assert!(ok.is_manual_entry);
        assert_eq!(ok.timestamp, now);

        let bad = manual_entry("INVALID-TEST-001", now).unwrap();
        assert!(!bad.is_valid);
        assert_eq!(bad.error.as_deref(), Some(NEEDS_VERIFICATION));

        let unknown = manual_entry("TKT-2025-001234", now).unwrap();
        assert!(!unknown.is_valid);
    }

    #[test]
    fn valid_marker_detection() {
        assert!(has_valid_marker("VALID-TEST-001"));
        assert!(has_valid_marker("INVALID-VALID"));
        assert!(!has_valid_marker("INVALID-TEST"));
        assert!(!has_valid_marker("TKT-0001"));
    }
}
