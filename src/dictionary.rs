//! Static bidirectional cooking dictionary.
//!
//! The last translation strategy substitutes known cooking words
//! (ingredients, verbs, units, sequencing words) in place. Tables are
//! compiled once into immutable lookup structures; callers receive a
//! shared reference and never mutate them.

use crate::i18n::Language;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::OnceLock;

/// English to Amharic entries.
const EN_AM: &[(&str, &str)] = &[
    // Ingredients
    ("salt", "ጨው"),
    ("sugar", "ስኳር"),
    ("water", "ውሃ"),
    ("oil", "ዘይት"),
    ("butter", "ቅቤ"),
    ("flour", "ዱቄት"),
    ("egg", "እንቁላል"),
    ("eggs", "እንቁላል"),
    ("milk", "ወተት"),
    ("bread", "ዳቦ"),
    ("rice", "ሩዝ"),
    ("meat", "ስጋ"),
    ("chicken", "ዶሮ"),
    ("fish", "ዓሣ"),
    ("vegetable", "አትክልት"),
    ("vegetables", "አትክልቶች"),
    ("fruit", "ፍራፍሬ"),
    ("fruits", "ፍራፍሬዎች"),
    ("spice", "ቅመም"),
    ("spices", "ቅመሞች"),
    ("pepper", "በርበሬ"),
    ("onion", "ሽንኩርት"),
    ("onions", "ሽንኩርት"),
    ("garlic", "ነጭ ሽንኩርት"),
    ("tomato", "ቲማቲም"),
    ("tomatoes", "ቲማቲም"),
    ("potato", "ድንች"),
    ("potatoes", "ድንች"),
    ("carrot", "ካሮት"),
    ("carrots", "ካሮት"),
    // Cooking verbs
    ("mix", "ቀላቀል"),
    ("stir", "ቀላቀል"),
    ("cook", "ማብሰል"),
    ("fry", "ማብሰል"),
    ("boil", "ማፍላት"),
    ("bake", "ማብሰል"),
    ("grill", "ማጠፍ"),
    ("roast", "ማጠፍ"),
    ("serve", "ማቅረብ"),
    ("add", "ጨምር"),
    ("cut", "ቁረጥ"),
    ("chop", "ቁረጥ"),
    ("slice", "ቁረጥ"),
    ("peel", "ለጣጥል"),
    // Measurements
    ("cup", "ጽዋ"),
    ("cups", "ጽዋዎች"),
    ("teaspoon", "ሻይ ማንኪያ"),
    ("tablespoon", "የምግብ ማንኪያ"),
    ("gram", "ግራም"),
    ("kilo", "ኪሎ"),
    ("liter", "ሊትር"),
    ("milliliter", "ሚሊ ሊትር"),
    // Sequencing
    ("first", "መጀመሪያ"),
    ("then", "ከዚያ"),
    ("next", "ቀጥሎ"),
    ("after", "ከዚያ በኋላ"),
    ("finally", "በመጨረሻ"),
    ("now", "አሁን"),
    ("until", "እስከ"),
    ("about", "ወደ"),
    ("minutes", "ደቂቃዎች"),
    ("hour", "ሰዓት"),
    ("hours", "ሰዓቶች"),
];

/// Amharic to English entries.
const AM_EN: &[(&str, &str)] = &[
    // Ingredients
    ("ጨው", "salt"),
    ("ስኳር", "sugar"),
    ("ውሃ", "water"),
    ("ዘይት", "oil"),
    ("ቅቤ", "butter"),
    ("ዱቄት", "flour"),
    ("እንቁላል", "egg"),
    ("ወተት", "milk"),
    ("ዳቦ", "bread"),
    ("ሩዝ", "rice"),
    ("ስጋ", "meat"),
    ("ዶሮ", "chicken"),
    ("ዓሣ", "fish"),
    ("አትክልት", "vegetable"),
    ("አትክልቶች", "vegetables"),
    ("ፍራፍሬ", "fruit"),
    ("ፍራፍሬዎች", "fruits"),
    ("ቅመም", "spice"),
    ("ቅመሞች", "spices"),
    ("በርበሬ", "pepper"),
    ("ሽንኩርት", "onion"),
    ("ነጭ ሽንኩርት", "garlic"),
    ("ቲማቲም", "tomato"),
    ("ድንች", "potato"),
    ("ካሮት", "carrot"),
    // Cooking verbs
    ("ቀላቀል", "mix"),
    ("ማብሰል", "cook"),
    ("ማፍላት", "boil"),
    ("ማጠፍ", "grill"),
    ("ማቅረብ", "serve"),
    ("ጨምር", "add"),
    ("ቁረጥ", "cut"),
    ("ለጣጥል", "peel"),
    // Sequencing
    ("መጀመሪያ", "first"),
    ("ከዚያ", "then"),
    ("ቀጥሎ", "next"),
    ("ከዚያ በኋላ", "after"),
    ("በመጨረሻ", "finally"),
    ("አሁን", "now"),
    ("እስከ", "until"),
    ("ወደ", "about"),
    ("ደቂቃዎች", "minutes"),
    ("ሰዓት", "hour"),
    ("ሰዓቶች", "hours"),
];

/// One direction of the dictionary.
#[derive(Debug)]
pub struct DictionaryTable {
    /// `None` when the table has no entries
    pattern: Option<Regex>,
    /// Lowercased source word to replacement
    entries: HashMap<String, &'static str>,
}

impl DictionaryTable {
    /// Compile a table. Longer phrases win over their prefixes
    /// ("ነጭ ሽንኩርት" before "ሽንኩርት").
    pub fn new(entries: &[(&'static str, &'static str)]) -> Result<Self, regex::Error> {
        let map: HashMap<String, &'static str> = entries
            .iter()
            .map(|(from, to)| (from.to_lowercase(), *to))
            .collect();

        if map.is_empty() {
            return Ok(Self {
                pattern: None,
                entries: map,
            });
        }

        let mut words: Vec<&String> = map.keys().collect();
        words.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));

        let alternation = words
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"(?i)\b(?:{})\b", alternation))?;

        Ok(Self {
            pattern: Some(pattern),
            entries: map,
        })
    }

    /// Number of distinct source words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace every whole-word, case-insensitive match in `text`.
    ///
    /// Returns `None` when nothing was replaced. A match whose first letter
    /// is uppercase gets a replacement with an uppercase first letter.
    pub fn substitute(&self, text: &str) -> Option<String> {
        let pattern = self.pattern.as_ref()?;
        if !pattern.is_match(text) {
            return None;
        }

        let replaced = pattern.replace_all(text, |caps: &Captures| {
            let matched = &caps[0];
            match self.entries.get(&matched.to_lowercase()) {
                Some(replacement) if starts_uppercase(matched) => capitalize(replacement),
                Some(replacement) => (*replacement).to_string(),
                None => matched.to_string(),
            }
        });

        if replaced == text {
            None
        } else {
            Some(replaced.into_owned())
        }
    }
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Both directions of the cooking dictionary.
#[derive(Debug)]
pub struct CookingDictionary {
    en_am: DictionaryTable,
    am_en: DictionaryTable,
}

static BUILTIN: OnceLock<CookingDictionary> = OnceLock::new();

impl CookingDictionary {
    /// The built-in tables, compiled on first use.
    pub fn builtin() -> &'static CookingDictionary {
        BUILTIN.get_or_init(|| {
            CookingDictionary::from_entries(EN_AM, AM_EN)
                .expect("built-in dictionary patterns are valid")
        })
    }

    /// Build a dictionary from explicit entry lists.
    pub fn from_entries(
        en_am: &[(&'static str, &'static str)],
        am_en: &[(&'static str, &'static str)],
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            en_am: DictionaryTable::new(en_am)?,
            am_en: DictionaryTable::new(am_en)?,
        })
    }

    /// Table that translates into `target`.
    pub fn table(&self, target: Language) -> &DictionaryTable {
        if target == Language::AMHARIC {
            &self.en_am
        } else {
            &self.am_en
        }
    }

    /// Substitute known words in `text` for their `target` equivalents.
    pub fn substitute(&self, text: &str, target: Language) -> Option<String> {
        self.table(target).substitute(text)
    }
}
