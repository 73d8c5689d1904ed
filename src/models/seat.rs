use serde::{Deserialize, Serialize};

// Статус места фиксируется при генерации и дальше не меняется
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Available,
    Reserved,
    Blocked,
}

// Статус для отрисовки: поверх SeatStatus накладывается выбор пользователя
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatDisplayStatus {
    Available,
    Selected,
    Reserved,
    Blocked,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    pub id: String,
    pub section: String,
    pub row: char,
    pub number: u32,
    pub price: f64,
    pub status: SeatStatus,
}

impl Seat {
    pub fn new(section: &str, row: char, number: u32, price: f64, status: SeatStatus) -> Self {
        Self {
            id: Self::make_id(section, row, number),
            section: section.to_string(),
            row,
            number,
            price,
            status,
        }
    }

    // Ключ вида "vip-A7"
    pub fn make_id(section: &str, row: char, number: u32) -> String {
        format!("{}-{}{}", section, row, number)
    }

    pub fn is_available(&self) -> bool {
        self.status == SeatStatus::Available
    }

    // Подпись для билета и подсказки, например "A7"
    pub fn label(&self) -> String {
        format!("{}{}", self.row, self.number)
    }
}
