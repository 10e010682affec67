//! Products bundled with the storefront.
//!
//! Used to populate the catalog the first time it is read on a device with
//! no stored product list.

use nordora_core::{Price, Product, ProductId};

/// (image, name, dimensions, price in cents)
const SEED: &[(&str, &str, &str, i64)] = &[
    ("sofa-nordico.jpg", "Sofá nórdico", "220 x 90 x 85 cm", 39_999),
    ("mesa-roble.jpg", "Mesa de roble", "180 x 90 x 75 cm", 54_900),
    ("silla-lino.jpg", "Silla de lino", "45 x 52 x 88 cm", 8_950),
    ("estanteria-pino.jpg", "Estantería de pino", "80 x 30 x 180 cm", 12_900),
    ("lampara-arco.jpg", "Lámpara de arco", "40 x 120 x 190 cm", 7_499),
    ("cama-abedul.jpg", "Cama de abedul", "160 x 200 x 40 cm", 46_500),
    ("comoda-blanca.jpg", "Cómoda blanca", "100 x 45 x 80 cm", 18_900),
    ("alfombra-lana.jpg", "Alfombra de lana", "160 x 230 cm", 13_450),
];

/// The bundled product list, with ids `1..=N` in listing order.
#[must_use]
pub fn products() -> Vec<Product> {
    SEED.iter()
        .zip(1..)
        .map(|(&(image, name, dimensions, cents), id)| Product {
            id: ProductId::new(id),
            image: image.to_string(),
            name: name.to_string(),
            dimensions: dimensions.to_string(),
            price: Price::from_cents(cents).unwrap_or(Price::ZERO),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_valid() {
        let products = products();
        assert_eq!(products.len(), SEED.len());
        assert!(products.iter().all(Product::is_valid));
    }

    #[test]
    fn test_seed_ids_are_sequential() {
        let ids: Vec<i32> = products().iter().map(|p| p.id.as_i32()).collect();
        let expected: Vec<i32> = (1..=8).collect();
        assert_eq!(ids, expected);
    }
}
