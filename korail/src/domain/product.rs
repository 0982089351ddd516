//! Korail product classes (rolling-stock categories).

use std::fmt;

/// Product code Korail uses for "any product".
pub const ALL_PRODUCTS_CODE: &str = "109";

/// Error returned for an unknown product name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid product {name:?}, must be one of {valid:?}")]
pub struct InvalidProduct {
    pub name: String,
    pub valid: Vec<&'static str>,
}

/// A product class that journey searches can be restricted to.
///
/// # Examples
///
/// ```
/// use korail::domain::Product;
///
/// let ktx = Product::parse("KTX").unwrap();
/// assert_eq!(ktx.code(), "100");
///
/// assert!(Product::parse("TGV").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Product {
    Ktx,
    Saemaeul,
    /// Includes Nuriro services.
    Mugunghwa,
    Cheongchun,
}

impl Product {
    /// All product classes, in Korail code order.
    pub const ALL: [Product; 4] = [
        Product::Ktx,
        Product::Saemaeul,
        Product::Mugunghwa,
        Product::Cheongchun,
    ];

    /// Look a product up by its Korail name.
    pub fn parse(name: &str) -> Result<Self, InvalidProduct> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| InvalidProduct {
                name: name.to_string(),
                valid: Self::ALL.iter().map(|p| p.name()).collect(),
            })
    }

    /// Korail's name for the product.
    pub fn name(self) -> &'static str {
        match self {
            Product::Ktx => "KTX",
            Product::Saemaeul => "새마을",
            Product::Mugunghwa => "무궁화",
            Product::Cheongchun => "청춘",
        }
    }

    /// Korail's numeric product code.
    pub fn code(self) -> &'static str {
        match self {
            Product::Ktx => "100",
            Product::Saemaeul => "101",
            Product::Mugunghwa => "102",
            Product::Cheongchun => "104",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
