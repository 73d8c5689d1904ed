use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Valid,
    Invalid,
    Manual,
}

// Результат одной проверки билета (камерой или вручную)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub ticket_id: String,
    pub event_id: String,
    pub attendee_name: String,
    pub seat_number: String,
    pub ticket_type: String,
    pub is_valid: bool,
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub is_manual_entry: bool,
}

// Запись в журнале сканирования
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRecord {
    pub id: Uuid,
    pub ticket_id: String,
    pub attendee_name: String,
    pub timestamp: DateTime<Utc>,
    pub status: ScanStatus,
    pub seat_number: String,
    pub ticket_type: String,
    pub scanned_by: String,
    pub error: Option<String>,
    pub is_manual_entry: bool,
}
