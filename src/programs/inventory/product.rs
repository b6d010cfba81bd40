//! Product records.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::collection::Keyed;

/// Either the physical size of a product or a free-text description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Details {
    Dimensions { length: i32, width: i32, height: i32 },
    Description(String),
}

impl Default for Details {
    fn default() -> Self {
        Self::Description(String::new())
    }
}

impl fmt::Display for Details {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dimensions {
                length,
                width,
                height,
            } => write!(f, "{length}x{width}x{height}"),
            Self::Description(text) => f.write_str(text),
        }
    }
}

/// One inventory entry. Also serves as the staging buffer while a product
/// is being entered.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub quantity: i32,
    pub price: f32,
    pub details: Details,
}

impl Keyed for Product {
    fn key(&self) -> &str {
        &self.name
    }
}

impl Product {
    /// One listing row: name, quantity, price, then the details.
    pub fn row(&self) -> String {
        format!(
            "{:<20}{:<12}{:<10.2}{}",
            self.name, self.quantity, self.price, self.details
        )
    }
}
