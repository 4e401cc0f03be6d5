//! Client animals attached to a booking

use serde::{Deserialize, Serialize};

/// Species accepted by a formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimalType {
    Dog,
    Cat,
    Rabbit,
    Bird,
    Rodent,
    Fish,
    Reptile,
    /// "Nouveaux animaux de compagnie"
    Nac,
    Other,
}

/// An animal picked in the booking flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animal {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub species: AnimalType,
}
