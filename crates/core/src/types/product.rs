//! Catalog products as served by the Larek API.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// Product category.
///
/// The API sends categories as Russian display names; each one maps to a
/// CSS modifier used by cards (`card__category_<modifier>`). Names the store
/// does not know fall back to [`Category::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    SoftSkill,
    HardSkill,
    #[default]
    Other,
    Button,
    Additional,
}

impl Category {
    /// All categories, in the order the store lists them.
    pub const ALL: [Self; 5] = [
        Self::SoftSkill,
        Self::HardSkill,
        Self::Other,
        Self::Button,
        Self::Additional,
    ];

    /// Name used on the wire and shown on cards.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SoftSkill => "софт-скил",
            Self::HardSkill => "хард-скил",
            Self::Other => "другое",
            Self::Button => "кнопка",
            Self::Additional => "дополнительное",
        }
    }

    /// BEM modifier for the category badge.
    #[must_use]
    pub const fn modifier(self) -> &'static str {
        match self {
            Self::SoftSkill => "soft",
            Self::HardSkill => "hard",
            Self::Other => "other",
            Self::Button => "button",
            Self::Additional => "additional",
        }
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| c.label() == value)
            .unwrap_or_default()
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.label().to_string()
    }
}

/// A catalog product.
///
/// Products are immutable once loaded. A product without a price is shown in
/// the catalog but cannot be bought. `category` keeps the name exactly as the
/// API sent it; [`Product::category_kind`] maps it onto a known [`Category`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub image: String,
    #[serde(default)]
    pub category: String,
    pub price: Option<Price>,
}

impl Product {
    /// Whether the product can be put in the basket.
    #[must_use]
    pub const fn is_for_sale(&self) -> bool {
        self.price.is_some()
    }

    /// Known category for the wire name, [`Category::Other`] if unrecognised.
    #[must_use]
    pub fn category_kind(&self) -> Category {
        Category::from(self.category.as_str())
    }

    /// Prefix a relative image path with a CDN base URL.
    ///
    /// Absolute URLs are left alone so the call is idempotent.
    #[must_use]
    pub fn with_image_base(mut self, base: &str) -> Self {
        if !self.image.starts_with("http://") && !self.image.starts_with("https://") {
            let base = base.trim_end_matches('/');
            let path = self.image.trim_start_matches('/');
            self.image = format!("{base}/{path}");
        }
        self
    }
}

/// List envelope returned by `GET /product/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductList {
    pub total: u32,
    pub items: Vec<Product>,
}
