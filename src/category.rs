//! Closed recipe category enumeration.
//!
//! Each category carries a canonical name in both languages. The same
//! table backs the submission picklist and the reverse lookup used when an
//! author types a category by hand.

use crate::i18n::Language;
use serde::Serialize;

/// A recipe category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Breakfast,
    Lunch,
    Dinner,
    Dessert,
    Drinks,
    Vegetarian,
    Meat,
    Appetizer,
    Soup,
    Salad,
    Bread,
    Rice,
    Pasta,
    Seafood,
    Vegan,
}

impl Category {
    /// Picklist order.
    pub const ALL: [Category; 15] = [
        Category::Breakfast,
        Category::Lunch,
        Category::Dinner,
        Category::Dessert,
        Category::Drinks,
        Category::Vegetarian,
        Category::Meat,
        Category::Appetizer,
        Category::Soup,
        Category::Salad,
        Category::Bread,
        Category::Rice,
        Category::Pasta,
        Category::Seafood,
        Category::Vegan,
    ];

    /// Canonical English name.
    pub fn en(self) -> &'static str {
        match self {
            Category::Breakfast => "Breakfast",
            Category::Lunch => "Lunch",
            Category::Dinner => "Dinner",
            Category::Dessert => "Dessert",
            Category::Drinks => "Drinks",
            Category::Vegetarian => "Vegetarian",
            Category::Meat => "Meat",
            Category::Appetizer => "Appetizer",
            Category::Soup => "Soup",
            Category::Salad => "Salad",
            Category::Bread => "Bread",
            Category::Rice => "Rice",
            Category::Pasta => "Pasta",
            Category::Seafood => "Seafood",
            Category::Vegan => "Vegan",
        }
    }

    /// Canonical Amharic name.
    pub fn am(self) -> &'static str {
        match self {
            Category::Breakfast => "እራት ጠዋት",
            Category::Lunch => "እራት ቀን",
            Category::Dinner => "እራት ማታ",
            Category::Dessert => "ምርጥ ምግብ",
            Category::Drinks => "መጠጦች",
            Category::Vegetarian => "አትክልት ምግብ",
            Category::Meat => "ስጋ ምግብ",
            Category::Appetizer => "መግቢያ ምግብ",
            Category::Soup => "ሾርባ",
            Category::Salad => "ሰላጣ",
            Category::Bread => "ዳቦ",
            Category::Rice => "ሩዝ",
            Category::Pasta => "ፓስታ",
            Category::Seafood => "የባሕር ምግብ",
            Category::Vegan => "ቬጋን",
        }
    }

    /// Canonical name in `language`.
    pub fn name(self, language: Language) -> &'static str {
        if language == Language::AMHARIC {
            self.am()
        } else {
            self.en()
        }
    }

    /// Find the category whose name in either language matches `text`,
    /// ignoring case and surrounding whitespace.
    pub fn lookup(text: &str) -> Option<Category> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }

        Self::ALL.into_iter().find(|cat| {
            cat.en().to_lowercase() == needle || cat.am().to_lowercase() == needle
        })
    }

    /// Picklist entries as shown to an author typing in `language`.
    pub fn picklist(language: Language) -> Vec<&'static str> {
        Self::ALL.iter().map(|cat| cat.name(language)).collect()
    }
}
