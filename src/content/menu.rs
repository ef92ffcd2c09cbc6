//! Navigation menu: categories, their sub-items, and the current selection.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    NationalAccounts,
    PriceIndex,
    Trade,
    Budget,
    Employment,
    Poverty,
    HumanDevelopment,
}

impl Category {
    /// Menu order.
    pub const ALL: [Category; 7] = [
        Category::NationalAccounts,
        Category::PriceIndex,
        Category::Trade,
        Category::Budget,
        Category::Employment,
        Category::Poverty,
        Category::HumanDevelopment,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::NationalAccounts => "National Accounts",
            Category::PriceIndex => "Price Index",
            Category::Trade => "Trade",
            Category::Budget => "Budget",
            Category::Employment => "Employment",
            Category::Poverty => "Poverty",
            Category::HumanDevelopment => "Human Development",
        }
    }

    pub fn sub_items(self) -> &'static [&'static str] {
        match self {
            Category::NationalAccounts => &[
                "Growth y-o-y",
                "Growth q-to-q",
                "Quarterly heatmap",
                "PDB ADHB vs ADHK",
                "ADHK growth y-o-y",
            ],
            Category::PriceIndex => &["Monthly inflation", "Inflation by group"],
            Category::Trade => &["Exports & imports", "Trade balance", "Trade contribution"],
            Category::Budget => &["Plan vs realization", "Realization rate"],
            Category::Employment => &["Unemployment rate", "Labour force participation"],
            Category::Poverty => &["Poverty rate", "Gini ratio", "Urban vs rural"],
            Category::HumanDevelopment => &["IPM", "IPM by gender", "Gender gap"],
        }
    }
}

/// A (category, sub-item) pair identifying one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Selection {
    pub category: Category,
    pub sub_index: usize,
}

impl Selection {
    pub fn new(category: Category, sub_index: usize) -> Option<Self> {
        (sub_index < category.sub_items().len()).then_some(Self {
            category,
            sub_index,
        })
    }

    pub fn sub_label(&self) -> &'static str {
        self.category
            .sub_items()
            .get(self.sub_index)
            .copied()
            .unwrap_or_default()
    }

    /// Every page in menu order.
    pub fn all() -> Vec<Selection> {
        Category::ALL
            .iter()
            .flat_map(|&category| {
                (0..category.sub_items().len()).map(move |sub_index| Selection {
                    category,
                    sub_index,
                })
            })
            .collect()
    }
}

/// Which menu item is selected. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuState {
    selection: Selection,
}

impl Default for MenuState {
    fn default() -> Self {
        Self {
            selection: Selection {
                category: Category::NationalAccounts,
                sub_index: 0,
            },
        }
    }
}

impl MenuState {
    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn category(&self) -> Category {
        self.selection.category
    }

    pub fn sub_index(&self) -> usize {
        self.selection.sub_index
    }

    /// Switch category; the sub-menu goes back to its first item.
    /// Returns true when the selection changed.
    pub fn select_category(&mut self, category: Category) -> bool {
        if self.selection.category == category {
            return false;
        }
        self.selection = Selection {
            category,
            sub_index: 0,
        };
        true
    }

    /// Select a sub-item of the current category. Out-of-range indices are ignored.
    pub fn select_sub(&mut self, sub_index: usize) -> bool {
        match Selection::new(self.selection.category, sub_index) {
            Some(selection) if selection != self.selection => {
                self.selection = selection;
                true
            }
            _ => false,
        }
    }
}
