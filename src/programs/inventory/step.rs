//! Steps of the inventory program.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::State;

/// Which single field an update operation rewrites.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum UpdateField {
    Quantity,
    Price,
}

impl fmt::Display for UpdateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quantity => f.write_str("quantity"),
            Self::Price => f.write_str("price"),
        }
    }
}

/// The multi-step operation a step belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InventoryOp {
    AddProduct,
    UpdateQuantity,
    UpdatePrice,
    DeleteProduct,
}

impl InventoryOp {
    /// Number of step indices the operation spans.
    ///
    /// Adding spans both branches: name, quantity, price, has-dimensions,
    /// length, width, height, description.
    pub fn field_count(self) -> usize {
        match self {
            Self::AddProduct => 8,
            Self::UpdateQuantity | Self::UpdatePrice => 2,
            Self::DeleteProduct => 1,
        }
    }
}

/// Where the inventory session is. Each build step names the field the
/// next line fills.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum InventoryStep {
    AtMenu,
    AddName,
    AddQuantity,
    AddPrice,
    AddHasDimensions,
    AddLength,
    AddWidth,
    AddHeight,
    AddDescription,
    /// Waiting for the name of the product to update.
    UpdateName(UpdateField),
    /// Product `name` exists; waiting for its new value.
    UpdateValue { field: UpdateField, name: String },
    DeleteName,
    Exited,
}

impl InventoryStep {
    /// The operation in progress, or `None` at the menu or after exit.
    pub fn operation(&self) -> Option<InventoryOp> {
        match self {
            Self::AtMenu | Self::Exited => None,
            Self::AddName
            | Self::AddQuantity
            | Self::AddPrice
            | Self::AddHasDimensions
            | Self::AddLength
            | Self::AddWidth
            | Self::AddHeight
            | Self::AddDescription => Some(InventoryOp::AddProduct),
            Self::UpdateName(field) | Self::UpdateValue { field, .. } => Some(match field {
                UpdateField::Quantity => InventoryOp::UpdateQuantity,
                UpdateField::Price => InventoryOp::UpdatePrice,
            }),
            Self::DeleteName => Some(InventoryOp::DeleteProduct),
        }
    }

    /// Index of the expected field within the current operation.
    pub fn cursor(&self) -> Option<usize> {
        match self {
            Self::AtMenu | Self::Exited => None,
            Self::AddName | Self::UpdateName(_) | Self::DeleteName => Some(0),
            Self::AddQuantity | Self::UpdateValue { .. } => Some(1),
            Self::AddPrice => Some(2),
            Self::AddHasDimensions => Some(3),
            Self::AddLength => Some(4),
            Self::AddWidth => Some(5),
            Self::AddHeight => Some(6),
            Self::AddDescription => Some(7),
        }
    }
}

impl State for InventoryStep {
    fn name(&self) -> &str {
        match self {
            Self::AtMenu => "AtMenu",
            Self::AddName => "AddName",
            Self::AddQuantity => "AddQuantity",
            Self::AddPrice => "AddPrice",
            Self::AddHasDimensions => "AddHasDimensions",
            Self::AddLength => "AddLength",
            Self::AddWidth => "AddWidth",
            Self::AddHeight => "AddHeight",
            Self::AddDescription => "AddDescription",
            Self::UpdateName(_) => "UpdateName",
            Self::UpdateValue { .. } => "UpdateValue",
            Self::DeleteName => "DeleteName",
            Self::Exited => "Exited",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Exited)
    }
}
