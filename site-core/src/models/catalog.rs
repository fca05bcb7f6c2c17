use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which of the two reference catalogs is being consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CatalogKind {
    #[default]
    Materials,
    Labor,
}

impl CatalogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Materials => "materials",
            Self::Labor => "labor",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "materials" | "material" => Some(Self::Materials),
            "labor" | "labour" => Some(Self::Labor),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Materials => "Materials",
            Self::Labor => "Labor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub name: String,
    pub unit: String,
    pub rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogCategory {
    pub name: String,
    pub items: Vec<CatalogItem>,
}

impl CatalogCategory {
    /// Exact, case-sensitive item lookup.
    pub fn item(
        &self,
        name: &str,
    ) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.name == name)
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }
}

/// An immutable table of priced items grouped by category.
///
/// Categories and the items inside them keep the order they were loaded in,
/// which is the order menus present them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub kind: CatalogKind,
    pub categories: Vec<CatalogCategory>,
}

impl Catalog {
    pub fn new(
        kind: CatalogKind,
        categories: Vec<CatalogCategory>,
    ) -> Self {
        Self { kind, categories }
    }

    /// Exact, case-sensitive category lookup.
    pub fn category(
        &self,
        name: &str,
    ) -> Option<&CatalogCategory> {
        self.categories.iter().find(|category| category.name == name)
    }

    /// Finds `item_name` inside `category_name`. Both names must match exactly.
    pub fn lookup(
        &self,
        category_name: &str,
        item_name: &str,
    ) -> Option<&CatalogItem> {
        self.category(category_name)?.item(item_name)
    }

    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// The materials and labor catalogs loaded at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalogs {
    pub materials: Catalog,
    pub labor: Catalog,
}

impl Catalogs {
    pub fn get(
        &self,
        kind: CatalogKind,
    ) -> &Catalog {
        match kind {
            CatalogKind::Materials => &self.materials,
            CatalogKind::Labor => &self.labor,
        }
    }
}
