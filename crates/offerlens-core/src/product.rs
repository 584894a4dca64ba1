//! Scraped listing records
//!
//! Produced by an external scraper and treated as read-only input. Any
//! field may be absent; downstream scoring supplies the neutral default.

use serde::{Deserialize, Serialize};

/// Listing price as scraped, including the pre-discount amount when shown
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Price {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    /// ISO currency code when the scraper could identify one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Strike-through price before discount
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_amount: Option<f64>,
}

impl Price {
    /// Whether the listing is visibly discounted
    pub fn discounted(&self) -> bool {
        matches!(
            (self.amount, self.original_amount),
            (Some(now), Some(before)) if now < before
        )
    }
}

/// Explicit stock state scraped from the listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    InStock,
    OutOfStock,
}

/// One scraped product listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrapedProduct {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Price,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<Availability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Variant labels (size, color) as scraped
    #[serde(default)]
    pub variants: Vec<String>,
    /// Badge and label strings ("best seller", "1k+ bought in past month")
    #[serde(default)]
    pub claims: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_name: Option<String>,
    /// Region codes the listing ships to
    #[serde(default)]
    pub region_availability: Vec<String>,
}

impl ScrapedProduct {
    /// All free text the compliance scan looks at
    pub fn marketing_text(&self) -> impl Iterator<Item = &str> {
        self.title
            .as_deref()
            .into_iter()
            .chain(self.description.as_deref())
            .chain(self.claims.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discounted_requires_both_amounts() {
        let mut price = Price::default();
        assert!(!price.discounted());

        price.amount = Some(19.99);
        assert!(!price.discounted());

        price.original_amount = Some(29.99);
        assert!(price.discounted());

        price.original_amount = Some(9.99);
        assert!(!price.discounted());
    }

    #[test]
    fn test_marketing_text_collects_all_fields() {
        let product = ScrapedProduct {
            title: Some("Steel bottle".to_string()),
            description: Some("Keeps drinks cold".to_string()),
            claims: vec!["best seller".to_string()],
            ..Default::default()
        };

        let text: Vec<&str> = product.marketing_text().collect();
        assert_eq!(text, vec!["Steel bottle", "Keeps drinks cold", "best seller"]);
    }

    #[test]
    fn test_null_fields_deserialize() {
        let product: ScrapedProduct = serde_json::from_str("{}").unwrap();
        assert!(product.title.is_none());
        assert!(product.price.amount.is_none());
        assert!(product.variants.is_empty());
    }
}
