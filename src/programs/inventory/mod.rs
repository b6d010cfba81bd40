//! Inventory tracker.
//!
//! Menu:
//! 1. add a product (multi-step, branching on whether it has dimensions)
//! 2. display products
//! 3. update a product's quantity
//! 4. update a product's price
//! 5. delete a product
//! 6. exit, releasing every product

mod product;
mod step;

pub use product::{Details, Product};
pub use step::{InventoryOp, InventoryStep, UpdateField};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::coerce::{leading_float, leading_int, truncate_chars};
use crate::collection::Collection;
use crate::config::Config;
use crate::session::{Program, Reply};

const MENU: &str = "\nInventory Management System\n\
1. Add product\n\
2. Display products\n\
3. Update product quantity\n\
4. Update product price\n\
5. Delete product\n\
6. Exit\n\
Enter your choice:\n";

const RULE: &str = "----------------------------------------------------------\n";

/// Inventory program state: the product list and the product being entered.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Inventory {
    products: Collection<Product>,
    staging: Product,
    name_max_len: usize,
    description_max_len: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Inventory {
    pub fn new(config: &Config) -> Self {
        Self {
            products: Collection::new(config.max_records),
            staging: Product::default(),
            name_max_len: config.name_max_len,
            description_max_len: config.description_max_len,
        }
    }

    pub fn products(&self) -> &Collection<Product> {
        &self.products
    }

    /// The partially entered product. Meaningless outside an add.
    pub fn staging(&self) -> &Product {
        &self.staging
    }

    /// Plain-text listing of every product, newest first.
    pub fn listing(&self) -> String {
        if self.products.is_empty() {
            return "Cannot display any products. Inventory is empty.\n".to_string();
        }

        let mut out = String::from("\n--- Current Inventory ---\n");
        out.push_str(&format!(
            "{:<20}{:<12}{:<10}{}\n",
            "Name", "Quantity", "Price", "Details"
        ));
        out.push_str(RULE);
        for product in &self.products {
            out.push_str(&product.row());
            out.push('\n');
        }
        out.push_str(RULE);
        out
    }

    fn menu_choice(&mut self, line: &str) -> Reply<InventoryStep> {
        match leading_int(line) {
            1 => {
                self.staging = Product::default();
                Reply::silent(InventoryStep::AddName)
            }
            2 => Reply::new(InventoryStep::AtMenu, self.listing()),
            3 => Reply::silent(InventoryStep::UpdateName(UpdateField::Quantity)),
            4 => Reply::silent(InventoryStep::UpdateName(UpdateField::Price)),
            5 => Reply::silent(InventoryStep::DeleteName),
            6 => {
                let freed = self.products.len();
                self.products.clear();
                self.staging = Product::default();
                info!(freed, "inventory released");
                Reply::new(
                    InventoryStep::Exited,
                    "Exiting program. Freeing memory...\nAll products freed. Session ended.\n",
                )
            }
            _ => Reply::new(InventoryStep::AtMenu, "Invalid choice. Please try again.\n"),
        }
    }

    fn choose_details(&mut self, line: &str) -> Reply<InventoryStep> {
        match leading_int(line) {
            1 => {
                self.staging.details = Details::Dimensions {
                    length: 0,
                    width: 0,
                    height: 0,
                };
                Reply::silent(InventoryStep::AddLength)
            }
            0 => {
                self.staging.details = Details::Description(String::new());
                Reply::silent(InventoryStep::AddDescription)
            }
            _ => {
                self.staging.details = Details::Description(String::new());
                Reply::new(
                    InventoryStep::AddDescription,
                    "Invalid choice for dimensions. Assuming No (0).\n",
                )
            }
        }
    }

    fn set_dimension(&mut self, step: &InventoryStep, line: &str) -> Reply<InventoryStep> {
        let value = leading_int(line);
        if let Details::Dimensions {
            length,
            width,
            height,
        } = &mut self.staging.details
        {
            match step {
                InventoryStep::AddLength => *length = value,
                InventoryStep::AddWidth => *width = value,
                _ => *height = value,
            }
        }

        match step {
            InventoryStep::AddLength => Reply::silent(InventoryStep::AddWidth),
            InventoryStep::AddWidth => Reply::silent(InventoryStep::AddHeight),
            _ => self.commit(),
        }
    }

    /// Move the staging buffer into the collection and return to the menu.
    fn commit(&mut self) -> Reply<InventoryStep> {
        let product = std::mem::take(&mut self.staging);
        let name = product.name.clone();

        match self.products.insert_front(product) {
            Ok(()) => {
                info!(product = %name, total = self.products.len(), "product added");
                Reply::new(
                    InventoryStep::AtMenu,
                    format!("Product '{name}' added successfully!\n"),
                )
            }
            Err(err) => {
                warn!(product = %name, error = %err, "product abandoned");
                Reply::new(
                    InventoryStep::AtMenu,
                    "Memory allocation failed for new product.\n",
                )
            }
        }
    }

    fn find_for_update(&self, field: UpdateField, line: &str) -> Reply<InventoryStep> {
        let name = truncate_chars(line, self.name_max_len);
        if self.products.find(&name).is_some() {
            Reply::silent(InventoryStep::UpdateValue { field, name })
        } else {
            warn!(product = %name, %field, "update target not found");
            Reply::new(
                InventoryStep::AtMenu,
                format!("Product '{name}' not found.\n"),
            )
        }
    }

    fn apply_update(&mut self, field: UpdateField, name: &str, line: &str) -> Reply<InventoryStep> {
        let Some(product) = self.products.find_mut(name) else {
            warn!(product = %name, %field, "update target disappeared");
            return Reply::new(
                InventoryStep::AtMenu,
                format!("Error: Product '{name}' lost during update.\n"),
            );
        };

        let text = match field {
            UpdateField::Quantity => {
                product.quantity = leading_int(line);
                format!("Quantity for '{name}' updated to {}.\n", product.quantity)
            }
            UpdateField::Price => {
                product.price = leading_float(line);
                format!("Price for '{name}' updated to {:.2}.\n", product.price)
            }
        };

        info!(product = %name, %field, "product updated");
        Reply::new(InventoryStep::AtMenu, text)
    }

    fn delete(&mut self, name: &str) -> Reply<InventoryStep> {
        let text = if self.products.remove(name).is_some() {
            info!(product = %name, remaining = self.products.len(), "product deleted");
            format!("Product '{name}' deleted successfully!\n")
        } else {
            warn!(product = %name, "delete target not found");
            format!("Product '{name}' not found for deletion.\n")
        };
        Reply::new(InventoryStep::AtMenu, text)
    }
}

impl Program for Inventory {
    type Step = InventoryStep;

    fn reset(&mut self) -> InventoryStep {
        self.products.clear();
        self.staging = Product::default();
        InventoryStep::AtMenu
    }

    fn prompt(&self, step: &InventoryStep) -> String {
        let name = &self.staging.name;
        match step {
            InventoryStep::AtMenu => MENU.to_string(),
            InventoryStep::AddName => "Enter product name:\n".to_string(),
            InventoryStep::AddQuantity => format!("Enter quantity for '{name}':\n"),
            InventoryStep::AddPrice => format!("Enter price for '{name}':\n"),
            InventoryStep::AddHasDimensions => {
                format!("Does '{name}' have dimensions (0 - No, 1 - Yes):\n")
            }
            InventoryStep::AddLength => format!("Enter length for '{name}':\n"),
            InventoryStep::AddWidth => format!("Enter width for '{name}':\n"),
            InventoryStep::AddHeight => format!("Enter height for '{name}':\n"),
            InventoryStep::AddDescription => {
                format!("Enter product description for '{name}':\n")
            }
            InventoryStep::UpdateName(field) => {
                format!("Enter product name to update {field}:\n")
            }
            InventoryStep::UpdateValue { field, name } => match self.products.find(name) {
                Some(p) => match field {
                    UpdateField::Quantity => format!(
                        "Enter new quantity for '{name}' (current: {}):\n",
                        p.quantity
                    ),
                    UpdateField::Price => format!(
                        "Enter new price for '{name}' (current: {:.2}):\n",
                        p.price
                    ),
                },
                None => format!("Enter new {field} for '{name}':\n"),
            },
            InventoryStep::DeleteName => "Enter product name to delete:\n".to_string(),
            InventoryStep::Exited => String::new(),
        }
    }

    fn handle(&mut self, step: &InventoryStep, line: &str) -> Reply<InventoryStep> {
        match step {
            InventoryStep::AtMenu => self.menu_choice(line),
            InventoryStep::AddName => {
                self.staging.name = truncate_chars(line, self.name_max_len);
                Reply::silent(InventoryStep::AddQuantity)
            }
            InventoryStep::AddQuantity => {
                self.staging.quantity = leading_int(line);
                Reply::silent(InventoryStep::AddPrice)
            }
            InventoryStep::AddPrice => {
                self.staging.price = leading_float(line);
                Reply::silent(InventoryStep::AddHasDimensions)
            }
            InventoryStep::AddHasDimensions => self.choose_details(line),
            InventoryStep::AddLength | InventoryStep::AddWidth | InventoryStep::AddHeight => {
                self.set_dimension(step, line)
            }
            InventoryStep::AddDescription => {
                self.staging.details =
                    Details::Description(truncate_chars(line, self.description_max_len));
                self.commit()
            }
            InventoryStep::UpdateName(field) => self.find_for_update(*field, line),
            InventoryStep::UpdateValue { field, name } => self.apply_update(*field, name, line),
            InventoryStep::DeleteName => self.delete(line),
            InventoryStep::Exited => Reply::silent(InventoryStep::Exited),
        }
    }
}
