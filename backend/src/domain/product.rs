//! Product detail records.
//!
//! The product catalogue is not wired to storage yet; [`Product::sample`]
//! builds a placeholder record from the entity coordinates in the request so
//! clients can integrate against a stable shape.

/// Unit price of every sample product.
pub const SAMPLE_PRICE: f64 = 199.99;
/// Sales unit of every sample product.
pub const SAMPLE_UNIT: &str = "piece";
/// Image references attached to every sample product, in display order.
pub const SAMPLE_IMAGE_URLS: [&str; 2] = ["example1.jpg", "example2.jpg"];

/// Product detail as served to clients.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: String,
    name: String,
    description: String,
    price: f64,
    unit: String,
    image_urls: Vec<String>,
}

impl Product {
    /// Placeholder product for the given entity type and identifier.
    ///
    /// Empty inputs are carried through unchanged.
    ///
    /// # Examples
    /// ```
    /// use storefront::domain::Product;
    ///
    /// let product = Product::sample("event", "42");
    /// assert_eq!(product.id(), "42");
    /// assert_eq!(product.name(), "Sample event");
    /// assert_eq!(product.description(), "This is a dummy description for a event");
    /// ```
    #[must_use]
    pub fn sample(entity_type: &str, entity_id: &str) -> Self {
        Self {
            id: entity_id.to_owned(),
            name: format!("Sample {entity_type}"),
            description: format!("This is a dummy description for a {entity_type}"),
            price: SAMPLE_PRICE,
            unit: SAMPLE_UNIT.to_owned(),
            image_urls: SAMPLE_IMAGE_URLS.iter().map(|url| (*url).to_owned()).collect(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn price(&self) -> f64 {
        self.price
    }

    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Image references in display order.
    #[must_use]
    pub fn image_urls(&self) -> &[String] {
        &self.image_urls
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("event", "42")]
    #[case("venue", "abc-123")]
    #[case("", "")]
    #[case("ticket type", "0")]
    fn sample_derives_fields_from_coordinates(#[case] entity_type: &str, #[case] entity_id: &str) {
        let product = Product::sample(entity_type, entity_id);
        assert_eq!(product.id(), entity_id);
        assert_eq!(product.name(), format!("Sample {entity_type}"));
        assert_eq!(
            product.description(),
            format!("This is a dummy description for a {entity_type}")
        );
    }

    #[test]
    fn sample_uses_fixed_commercial_fields() {
        let product = Product::sample("event", "42");
        assert!((product.price() - 199.99).abs() < f64::EPSILON);
        assert_eq!(product.unit(), "piece");
        assert_eq!(product.image_urls(), ["example1.jpg", "example2.jpg"]);
    }
}
