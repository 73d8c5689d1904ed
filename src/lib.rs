pub mod config;
pub mod error;
pub mod models;
pub mod services;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::models::{Seat, VenueLayout};
use crate::services::SeatAllocator;

// Карта мест одного мероприятия: схема зала плюс сгенерированные места.
// Генерируется один раз и дальше не меняется, выбор мест живет отдельно.
#[derive(Debug, Clone)]
pub struct EventSeating {
    pub layout: VenueLayout,
    pub seats: Vec<Seat>,
}

impl EventSeating {
    pub fn generate<R>(layout: VenueLayout, allocator: &SeatAllocator, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let seats = allocator.generate_seats(&layout.sections, rng);
        Self { layout, seats }
    }

    // Seed из конфига дает воспроизводимую карту, без него - случайную
    pub fn from_config(layout: VenueLayout, config: &config::AllocatorConfig) -> Self {
        let allocator = SeatAllocator::from_config(config);
        let mut rng = match config.seed {
            Some(seed) => {
                info!("Generating seat map for {} with seed {}", layout.name, seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };
        Self::generate(layout, &allocator, &mut rng)
    }

    pub fn seat(&self, id: &str) -> Option<&Seat> {
        self.seats.iter().find(|s| s.id == id)
    }

    pub fn section_seats<'a>(&'a self, section_id: &'a str) -> impl Iterator<Item = &'a Seat> + 'a {
        self.seats.iter().filter(move |s| s.section == section_id)
    }

    pub fn available_seats(&self) -> Vec<Seat> {
        self.seats.iter().filter(|s| s.is_available()).cloned().collect()
    }
}
