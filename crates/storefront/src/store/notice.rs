//! User-facing notices for rejected actions.

use core::fmt;

use nordora_core::{ProductId, ValidationErrors};
use thiserror::Error;

/// Why an action left the state unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The action referenced a product the catalog does not have.
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    /// The product already has a cart line.
    #[error("product {0} is already in the cart")]
    AlreadyInCart(ProductId),

    /// The product has no cart line.
    #[error("product {0} is not in the cart")]
    NotInCart(ProductId),

    /// A new product asked for an id that is taken.
    #[error("a product with id {0} already exists")]
    DuplicateProductId(ProductId),

    /// Every id above the largest existing one is used up.
    #[error("no product id left to assign")]
    IdSpaceExhausted,

    /// Product fields failed validation.
    #[error("invalid product: {0}")]
    Invalid(#[from] ValidationErrors),
}

impl Rejection {
    /// How prominently the presentation layer should show this.
    #[must_use]
    pub const fn level(&self) -> NoticeLevel {
        match self {
            Self::AlreadyInCart(_) | Self::NotInCart(_) => NoticeLevel::Info,
            Self::ProductNotFound(_)
            | Self::DuplicateProductId(_)
            | Self::IdSpaceExhausted
            | Self::Invalid(_) => {
                NoticeLevel::Error
            }
        }
    }

    /// The notice to show for this rejection.
    #[must_use]
    pub fn notice(&self) -> Notice {
        let message = match self {
            Self::ProductNotFound(_) => "Product not found".to_string(),
            Self::AlreadyInCart(_) => "This product is already in your cart".to_string(),
            Self::Invalid(errors) => errors.messages().join("\n"),
            _ => self.to_string(),
        };
        Notice {
            level: self.level(),
            message,
        }
    }
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Benign; nothing went wrong.
    Info,
    /// The request could not be carried out.
    Error,
}

/// A message for the shopper or stock manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Text to display.
    pub message: String,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
