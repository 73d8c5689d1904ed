use thiserror::Error;

// Ошибки чтения конфигурации из окружения
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a valid number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("{name} must be between 0 and 1, got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },
}

// Ошибки проверки схемы зала
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("section {section_id} is invalid: {source}")]
    InvalidSection {
        section_id: String,
        #[source]
        source: validator::ValidationErrors,
    },

    #[error("duplicate section id {0}")]
    DuplicateSection(String),

    #[error("section {section_id}: row labels run past 'Z' (starts at {start}, {rows} rows)")]
    RowLabelOverflow {
        section_id: String,
        start: char,
        rows: u32,
    },
}

// Выбор мест, восстановленный из JSON, нарушает правила выбора
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("seat {0} is not available")]
    UnavailableSeat(String),

    #[error("seat {0} is selected twice")]
    DuplicateSeat(String),
}

// Ошибки ручного ввода кода билета
#[derive(Debug, Error)]
pub enum ManualEntryError {
    #[error("Ticket code is required")]
    Missing,

    #[error("Ticket code must be at least {min} characters")]
    TooShort {
        min: u64,
        #[source]
        source: validator::ValidationErrors,
    },
}
