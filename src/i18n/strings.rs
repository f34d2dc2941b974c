/// All localized user-facing strings for a language
///
/// Placeholders are written as `{name}` and substituted by the caller.
#[derive(Debug, Clone)]
pub struct LanguageStrings {
    // ==================== Recipe Sentinels ====================
    /// Shown for a recipe without a title in list views
    pub untitled: &'static str,

    /// Shown for a recipe without a category in list views
    pub unknown_category: &'static str,

    /// Shown for a recipe without a description
    pub no_description: &'static str,

    // ==================== Language Names ====================
    /// Display name of English in this language
    pub english: &'static str,

    /// Display name of Amharic in this language
    pub amharic: &'static str,

    // ==================== Submission Messages ====================
    /// Recipe saved and fully translated
    /// Placeholders: {language}
    pub translation_success: &'static str,

    /// Recipe saved, but some content could not be translated
    /// Placeholders: {language}
    pub translation_partial: &'static str,

    /// Recipe could not be saved at all
    pub upload_failed: &'static str,

    // ==================== Draft Validation ====================
    /// No image was attached
    pub missing_image: &'static str,

    /// Title is blank
    pub missing_title: &'static str,

    /// Category is blank
    pub missing_category: &'static str,

    /// Ingredients are blank
    pub missing_ingredients: &'static str,

    /// Steps are blank
    pub missing_steps: &'static str,
}

impl LanguageStrings {
    /// Resolve a dotted UI key (e.g. `recipe.untitled`) to its string.
    ///
    /// Returns `None` for unknown keys.
    pub fn lookup(&self, key: &str) -> Option<&'static str> {
        let value = match key {
            "recipe.untitled" => self.untitled,
            "recipe.unknownCategory" => self.unknown_category,
            "explore.noDescription" => self.no_description,
            "addRecipe.languageSelector.english" => self.english,
            "addRecipe.languageSelector.amharic" => self.amharic,
            "addRecipe.success.translationSuccess" => self.translation_success,
            "addRecipe.success.translationPartial" => self.translation_partial,
            "addRecipe.errors.uploadMessage" => self.upload_failed,
            "addRecipe.errors.missingImageMessage" => self.missing_image,
            "addRecipe.errors.missingTitleMessage" => self.missing_title,
            "addRecipe.errors.missingCategoryMessage" => self.missing_category,
            "addRecipe.errors.missingIngredientsMessage" => self.missing_ingredients,
            "addRecipe.errors.missingStepsMessage" => self.missing_steps,
            _ => return None,
        };
        Some(value)
    }
}

// ==================== English Strings ====================

/// English language strings (canonical)
pub const ENGLISH_STRINGS: LanguageStrings = LanguageStrings {
    untitled: "Untitled",
    unknown_category: "Unknown",
    no_description: "No description available",

    english: "English",
    amharic: "Amharic",

    translation_success: "Your recipe was submitted for review and automatically translated to {language}.",
    translation_partial: "Your recipe was submitted for review. Some content could not be translated to {language} and is shown in the original language.",
    upload_failed: "Your recipe could not be saved. Please try again.",

    missing_image: "Please add a photo of your dish.",
    missing_title: "Please enter a recipe title.",
    missing_category: "Please choose a category.",
    missing_ingredients: "Please list the ingredients.",
    missing_steps: "Please describe the preparation steps.",
};

// ==================== Amharic Strings ====================

/// Amharic language strings
pub const AMHARIC_STRINGS: LanguageStrings = LanguageStrings {
    untitled: "ርዕስ የሌለው",
    unknown_category: "ያልታወቀ",
    no_description: "መግለጫ የለም",

    english: "እንግሊዝኛ",
    amharic: "አማርኛ",

    translation_success: "የምግብ አዘገጃጀትዎ ለግምገማ ገብቷል፤ በራስ-ሰር ወደ {language} ተተርጉሟል።",
    translation_partial: "የምግብ አዘገጃጀትዎ ለግምገማ ገብቷል። አንዳንድ ይዘቶች ወደ {language} ሊተረጎሙ አልቻሉም፤ በመጀመሪያው ቋንቋ ይታያሉ።",
    upload_failed: "የምግብ አዘገጃጀቱን ማስቀመጥ አልተቻለም። እባክዎ እንደገና ይሞክሩ።",

    missing_image: "እባክዎ የምግቡን ፎቶ ያክሉ።",
    missing_title: "እባክዎ የምግቡን ርዕስ ያስገቡ።",
    missing_category: "እባክዎ ምድብ ይምረጡ።",
    missing_ingredients: "እባክዎ ንጥረ ነገሮቹን ይዘርዝሩ።",
    missing_steps: "እባክዎ የአዘገጃጀት ደረጃዎቹን ይግለጹ።",
};
