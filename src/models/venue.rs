use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use validator::Validate;

use crate::error::LayoutError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct VenueSection {
    #[validate(length(min = 1))]
    pub id: String,
    pub name: String,
    pub rows: u32,
    pub seats_per_row: u32,
    pub start_row_label: char,
    #[validate(range(min = 0.0))]
    pub price: f64,
}

impl VenueSection {
    pub fn new(
        id: &str,
        name: &str,
        rows: u32,
        seats_per_row: u32,
        start_row_label: char,
        price: f64,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            rows,
            seats_per_row,
            start_row_label,
            price,
        }
    }

    // Метка ряда по индексу: 0 -> start_row_label, 1 -> следующая буква и т.д.
    // Переход за 'Z' не определен, поэтому просто берем следующий символ
    pub fn row_label(&self, index: u32) -> Option<char> {
        (self.start_row_label as u32)
            .checked_add(index)
            .and_then(char::from_u32)
    }

    pub fn capacity(&self) -> u64 {
        self.rows as u64 * self.seats_per_row as u64
    }

    fn last_row_within_alphabet(&self) -> bool {
        if self.rows == 0 {
            return true;
        }
        match self.row_label(self.rows - 1) {
            Some(last) => last <= 'Z',
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueLayout {
    pub name: String,
    pub sections: Vec<VenueSection>,
}

impl VenueLayout {
    pub fn new(name: &str, sections: Vec<VenueSection>) -> Self {
        Self {
            name: name.to_string(),
            sections,
        }
    }

    pub fn section(&self, id: &str) -> Option<&VenueSection> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn capacity(&self) -> u64 {
        self.sections.iter().map(VenueSection::capacity).sum()
    }

    /// Проверяет схему зала: поля секций, уникальность id и то,
    /// что метки рядов не выходят за 'Z'.
    ///
    /// Генерация мест эту проверку не вызывает - она работает с любой схемой.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let mut seen = HashSet::new();

        for section in &self.sections {
            section.validate().map_err(|source| LayoutError::InvalidSection {
                section_id: section.id.clone(),
                source,
            })?;

            if !seen.insert(section.id.as_str()) {
                return Err(LayoutError::DuplicateSection(section.id.clone()));
            }

            if !section.last_row_within_alphabet() {
                return Err(LayoutError::RowLabelOverflow {
                    section_id: section.id.clone(),
                    start: section.start_row_label,
                    rows: section.rows,
                });
            }
        }

        Ok(())
    }
}

impl Default for VenueLayout {
    // Зал по умолчанию из витрины
    fn default() -> Self {
        Self::new(
            "Grand Convention Center",
            vec![
                VenueSection::new("vip", "VIP Section", 5, 10, 'A', 199.99),
                VenueSection::new("general", "General Admission", 15, 20, 'F', 89.99),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_is_valid() {
        let layout = VenueLayout::default();
        assert!(layout.validate().is_ok());
        assert_eq!(layout.capacity(), 5 * 10 + 15 * 20);
        assert_eq!(layout.section("general").map(|s| s.start_row_label), Some('F'));
    }

    #[test]
    fn row_labels_increment_alphabetically() {
        let section = VenueSection::new("general", "General", 3, 4, 'F', 10.0);
        let labels: Vec<char> = (0..3).filter_map(|r| section.row_label(r)).collect();
        assert_eq!(labels, vec!['F', 'G', 'H']);
    }

    #[test]
    fn rejects_rows_past_z() {
        let layout = VenueLayout::new(
            "tiny",
            vec![VenueSection::new("back", "Back", 3, 5, 'Y', 10.0)],
        );
        assert!(matches!(
            layout.validate(),
            Err(LayoutError::RowLabelOverflow { start: 'Y', rows: 3, .. })
        ));
    }

    #[test]
    fn rejects_duplicate_ids_and_negative_price() {
        let dup = VenueLayout::new(
            "dup",
            vec![
                VenueSection::new("a", "A", 1, 1, 'A', 1.0),
                VenueSection::new("a", "A again", 1, 1, 'B', 1.0),
            ],
        );
        assert!(matches!(dup.validate(), Err(LayoutError::DuplicateSection(id)) if id == "a"));

        let negative = VenueLayout::new("neg", vec![VenueSection::new("a", "A", 1, 1, 'A', -5.0)]);
        assert!(matches!(negative.validate(), Err(LayoutError::InvalidSection { .. })));
    }

    #[test]
    fn empty_section_is_fine() {
        let layout = VenueLayout::new("empty", vec![VenueSection::new("a", "A", 0, 10, 'Z', 1.0)]);
        assert!(layout.validate().is_ok());
        assert_eq!(layout.capacity(), 0);
    }
}
