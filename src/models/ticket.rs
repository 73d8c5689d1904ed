use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityLevel {
    Critical,
    Low,
    Good,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TicketType {
    #[validate(length(min = 1))]
    pub id: String,
    pub name: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(range(min = 0.0))]
    pub original_price: f64,
    pub available: u32,
    pub total: u32,
    #[validate(range(min = 1))]
    pub max_per_order: u32,
    pub category: String,
    pub description: String,
    pub features: Vec<String>,
    #[serde(default)]
    pub popular: bool,
    #[serde(default)]
    pub limited: bool,
}

impl TicketType {
    // Больше этого количества выбрать нельзя
    pub fn max_selectable(&self) -> u32 {
        self.available.min(self.max_per_order)
    }

    pub fn savings(&self) -> Option<f64> {
        (self.original_price > self.price).then(|| self.original_price - self.price)
    }

    // <= 10% остатка - critical, <= 25% - low
    pub fn availability_level(&self) -> AvailabilityLevel {
        if self.total == 0 {
            return AvailabilityLevel::Critical;
        }
        let percentage = self.available as f64 / self.total as f64 * 100.0;
        if percentage <= 10.0 {
            AvailabilityLevel::Critical
        } else if percentage <= 25.0 {
            AvailabilityLevel::Low
        } else {
            AvailabilityLevel::Good
        }
    }

    /// Каталог билетов витрины по умолчанию.
    pub fn defaults() -> Vec<TicketType> {
        vec![
            TicketType {
                id: "general".to_string(),
                name: "General Admission".to_string(),
                price: 89.99,
                original_price: 99.99,
                available: 245,
                total: 500,
                max_per_order: 8,
                category: "standard".to_string(),
                description: "Standard event access with general seating".to_string(),
                features: strings(&[
                    "Event Access",
                    "Welcome Drink",
                    "Networking Session",
                    "Digital Materials",
                ]),
                popular: false,
                limited: false,
            },
            TicketType {
                id: "vip".to_string(),
                name: "VIP Experience".to_string(),
                price: 199.99,
                original_price: 249.99,
                available: 48,
                total: 100,
                max_per_order: 4,
                category: "premium".to_string(),
                description: "Premium experience with exclusive benefits".to_string(),
                features: strings(&[
                    "Priority Seating",
                    "VIP Lounge Access",
                    "Meet & Greet",
                    "Premium Catering",
                    "Exclusive Swag Bag",
                    "Valet Parking",
                ]),
                popular: true,
                limited: false,
            },
            TicketType {
                id: "early-bird".to_string(),
                name: "Early Bird Special".to_string(),
                price: 69.99,
                original_price: 89.99,
                available: 12,
                total: 50,
                max_per_order: 6,
                category: "special".to_string(),
                description: "Limited time early bird pricing".to_string(),
                features: strings(&[
                    "Event Access",
                    "Early Entry",
                    "Welcome Drink",
                    "Reserved Seating",
                ]),
                popular: false,
                limited: true,
            },
        ]
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
