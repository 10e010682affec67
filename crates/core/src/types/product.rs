//! Catalog product types and validation.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// Maximum length of any free-text product field after sanitizing.
pub const MAX_INPUT_LENGTH: usize = 1000;

/// Image file extensions accepted for product pictures.
const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp"];

/// A catalog entry.
///
/// Field names on the wire are the ones the storefront has always persisted
/// (`img`, `nombre`, `dimensiones`, `precio`), so lists saved by earlier
/// releases still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product id.
    pub id: ProductId,
    /// Image file name or absolute URL.
    #[serde(rename = "img")]
    pub image: String,
    /// Display name.
    #[serde(rename = "nombre")]
    pub name: String,
    /// Free-form dimensions, e.g. `220 x 90 x 85 cm`.
    #[serde(rename = "dimensiones")]
    pub dimensions: String,
    /// Unit price.
    #[serde(rename = "precio")]
    pub price: Price,
}

impl Product {
    /// Whether the record is usable as a catalog entry.
    ///
    /// Requires a positive id, a non-blank name and a positive price.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.id.as_i32() > 0 && !self.name.trim().is_empty() && self.price.is_positive()
    }

    /// Check every editable field, as the stock form does before saving.
    ///
    /// # Errors
    ///
    /// Returns all field-level problems found, plus one for a non-positive id.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ProductDraft::from(self.clone()).problems();
        if self.id.as_i32() <= 0 {
            errors.push("id must be a positive number".to_string());
        }
        ValidationErrors::check(errors)
    }
}

/// Product data submitted from the stock form, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    /// Image file name or absolute URL.
    #[serde(rename = "img")]
    pub image: String,
    /// Display name.
    #[serde(rename = "nombre")]
    pub name: String,
    /// Free-form dimensions.
    #[serde(rename = "dimensiones")]
    pub dimensions: String,
    /// Unit price; zero means "not provided".
    #[serde(rename = "precio")]
    pub price: Price,
}

impl ProductDraft {
    /// Build a draft from raw form input, sanitizing every text field.
    #[must_use]
    pub fn new(image: &str, name: &str, dimensions: &str, price: Price) -> Self {
        Self {
            image: sanitize_input(image),
            name: sanitize_input(name),
            dimensions: sanitize_input(dimensions),
            price,
        }
    }

    /// Validate the draft.
    ///
    /// # Errors
    ///
    /// Returns every field-level problem at once so a form can show them
    /// together.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        ValidationErrors::check(self.problems())
    }

    /// Attach an id, producing a catalog product.
    #[must_use]
    pub fn with_id(self, id: ProductId) -> Product {
        Product {
            id,
            image: self.image,
            name: self.name,
            dimensions: self.dimensions,
            price: self.price,
        }
    }

    fn problems(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push("name is required".to_string());
        }
        if !self.price.is_positive() {
            errors.push("price must be greater than 0".to_string());
        }
        if self.dimensions.trim().is_empty() {
            errors.push("dimensions are required".to_string());
        }
        if self.image.trim().is_empty() {
            errors.push("image is required".to_string());
        } else if !is_valid_image_name(&self.image) {
            errors.push("image format is not supported".to_string());
        }

        errors
    }
}

impl From<Product> for ProductDraft {
    fn from(product: Product) -> Self {
        Self {
            image: product.image,
            name: product.name,
            dimensions: product.dimensions,
            price: product.price,
        }
    }
}

/// Field-level validation messages for a rejected product.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", .0.join("; "))]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    fn check(errors: Vec<String>) -> Result<(), Self> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self(errors))
        }
    }

    /// The individual messages, in form-field order.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.0
    }
}

/// Whether `image` ends in a supported picture extension.
fn is_valid_image_name(image: &str) -> bool {
    let lower = image.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Clean free-text input: trim, drop `<` and `>`, cap the length.
#[must_use]
pub fn sanitize_input(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| !matches!(c, '<' | '>'))
        .take(MAX_INPUT_LENGTH)
        .collect()
}
