//! Terminal renderings of store state.

use std::io::{self, Write};

use nordora_core::{CartLine, Price, Product};
use nordora_storefront::format::image_path;
use nordora_storefront::store::{CartView, ListenerError, Notice, ProductView};

/// Product list as a fixed-width table.
pub struct ProductTable<W> {
    out: W,
}

impl<W: Write> ProductTable<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ProductView for ProductTable<W> {
    fn render(&mut self, products: &[Product]) -> Result<(), ListenerError> {
        if products.is_empty() {
            writeln!(self.out, "No products")?;
            return Ok(());
        }

        writeln!(
            self.out,
            "{:>4}  {:<28} {:<20} {:>10}  IMAGE",
            "ID", "NAME", "DIMENSIONS", "PRICE"
        )?;
        for product in products {
            writeln!(
                self.out,
                "{:>4}  {:<28} {:<20} {:>10}  {}",
                product.id,
                product.name,
                product.dimensions,
                product.price.to_string(),
                image_path(&product.image)
            )?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Cart lines with subtotals and the cart total.
pub struct CartTable<W> {
    out: W,
}

impl<W: Write> CartTable<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> CartView for CartTable<W> {
    fn render(&mut self, lines: &[CartLine], total: Price) -> Result<(), ListenerError> {
        if lines.is_empty() {
            writeln!(self.out, "Your cart is empty")?;
        } else {
            for line in lines {
                writeln!(
                    self.out,
                    "{:>4}  {:<28} {:>4} x {:>10} = {:>10}",
                    line.id(),
                    line.product.name,
                    line.quantity,
                    line.product.price.to_string(),
                    line.subtotal().to_string()
                )?;
            }
        }
        writeln!(self.out, "Total: {total}")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Show a notice to the user.
pub fn notice(notice: &Notice) -> io::Result<()> {
    writeln!(io::stdout(), "{notice}")
}
