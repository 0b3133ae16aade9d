//! Product and view catalog.
//!
//! The set of products and their views is fixed at compile time. Every
//! (product, view) pair owns one backdrop and one layer sequence.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Catalog lookup errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Unknown product: {0}")]
    UnknownProduct(String),
    #[error("Unknown view: {0}")]
    UnknownView(String),
    #[error("View '{view}' is not available for product '{product}'")]
    ViewNotAvailable { product: Product, view: View },
}

/// A customizable product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Product {
    #[default]
    Tshirt,
    Cap,
}

/// A named side of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Front,
    Back,
    Left,
    Right,
}

impl Product {
    /// Get all products in catalog order.
    pub fn all() -> &'static [Product] {
        &[Product::Tshirt, Product::Cap]
    }

    /// Views available for this product, in display order.
    pub fn views(self) -> &'static [View] {
        match self {
            Product::Tshirt => &[View::Front, View::Back],
            Product::Cap => &[View::Front, View::Left, View::Right],
        }
    }

    /// Check whether the product has the given view.
    pub fn has_view(self, view: View) -> bool {
        self.views().contains(&view)
    }

    /// Identifier used in asset keys and export names.
    pub fn name(self) -> &'static str {
        match self {
            Product::Tshirt => "tshirt",
            Product::Cap => "cap",
        }
    }

    /// Human-readable name for summaries.
    pub fn display_name(self) -> &'static str {
        match self {
            Product::Tshirt => "T-Shirt",
            Product::Cap => "Cap",
        }
    }
}

impl View {
    /// Identifier used in asset keys and export names.
    pub fn name(self) -> &'static str {
        match self {
            View::Front => "front",
            View::Back => "back",
            View::Left => "left",
            View::Right => "right",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Product {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tshirt" | "t-shirt" => Ok(Product::Tshirt),
            "cap" => Ok(Product::Cap),
            other => Err(CatalogError::UnknownProduct(other.to_string())),
        }
    }
}

impl FromStr for View {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "front" => Ok(View::Front),
            "back" => Ok(View::Back),
            "left" => Ok(View::Left),
            "right" => Ok(View::Right),
            other => Err(CatalogError::UnknownView(other.to_string())),
        }
    }
}

/// Key of one layer bucket: a product together with one of its views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductView {
    pub product: Product,
    pub view: View,
}

impl ProductView {
    /// Create a key, validating the view against the product.
    pub fn new(product: Product, view: View) -> Result<Self, CatalogError> {
        if product.has_view(view) {
            Ok(Self { product, view })
        } else {
            Err(CatalogError::ViewNotAvailable { product, view })
        }
    }

    /// The first view of a product (always `front`).
    pub fn default_for(product: Product) -> Self {
        Self {
            product,
            view: product.views()[0],
        }
    }

    /// Every valid key in catalog order.
    pub fn all() -> impl Iterator<Item = ProductView> {
        Product::all()
            .iter()
            .flat_map(|&product| product.views().iter().map(move |&view| Self { product, view }))
    }

    /// Deterministic artifact name, `{product}-{view}`.
    pub fn file_stem(&self) -> String {
        format!("{}-{}", self.product, self.view)
    }
}

impl Default for ProductView {
    fn default() -> Self {
        Self::default_for(Product::default())
    }
}

impl fmt::Display for ProductView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.product, self.view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_views_per_product() {
        assert_eq!(Product::Tshirt.views(), &[View::Front, View::Back]);
        assert_eq!(Product::Cap.views(), &[View::Front, View::Left, View::Right]);
    }

    #[test]
    fn test_invalid_pair_rejected() {
        assert!(ProductView::new(Product::Tshirt, View::Left).is_err());
        assert!(ProductView::new(Product::Cap, View::Back).is_err());
        assert!(ProductView::new(Product::Cap, View::Right).is_ok());
    }

    #[test]
    fn test_all_pairs() {
        let all: Vec<_> = ProductView::all().collect();
        assert_eq!(all.len(), 5);
        assert_eq!(all[0], ProductView::default());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("T-Shirt".parse::<Product>(), Ok(Product::Tshirt));
        assert_eq!(" left ".parse::<View>(), Ok(View::Left));
        assert!("mug".parse::<Product>().is_err());
    }

    #[test]
    fn test_file_stem() {
        let key = ProductView::new(Product::Cap, View::Left).unwrap();
        assert_eq!(key.file_stem(), "cap-left");
        assert_eq!(key.to_string(), "cap/left");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Product::Tshirt).unwrap();
        assert_eq!(json, "\"tshirt\"");
    }
}
