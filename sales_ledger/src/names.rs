//! Merging of item name variants into canonical names

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Canonical name followed by every spelling that should collapse into it
const BUILTIN_SYNONYMS: &[(&str, &[&str])] = &[
    // Exact duplicates and trailing spaces
    ("Berry Tart", &["Berry Tart", "Berry Tart "]),
    ("Chocolate Tart", &["Chocolate Tart", "Chocolate Tart "]),
    ("Bread Pudding Croissant", &["Bread Pudding Croissant"]),
    (
        "Chocolate Banana Bread (Gluten Free)",
        &["Chocolate Banana Bread (Gluten Free)"],
    ),
    ("Crispy Egg Tart", &["Crispy Egg Tart", "Egg Tart"]),
    // Spelling and accent variations
    (
        "Dubai Chocolate Croissant",
        &[
            "Dubai Chocolate Croissant",
            "Dubaï Chocolate Croissant",
            "Dubai Chocolate Croissant (Fri/Sat/Sun)",
        ],
    ),
    (
        "Mini Black Sesame Croissant",
        &[
            "Mini Black Sesame Croissant",
            "Mini Black SésameCroissant",
            "Mini Black Sesame Croissant (Fri/Sat/Sun)",
        ],
    ),
    ("Croque Monsieur", &["CroqueMonsieur", "Croque Monsieur"]),
    // Weekend-only listings
    (
        "Avocado Egg Croissant Sandwich",
        &[
            "Avocado Egg Croissant Sandwich",
            "Avocado Egg Croissant Sandwich (Fri/Sat/Sun)",
            "Avocado Egg Croissant Sandwich - Weekend Only",
        ],
    ),
    (
        "Black Sesame Croissant",
        &[
            "Black Sesame Croissant",
            "Black Sesame Croissant (Fri/Sat/Sun)",
            "Black Sesame Croissant Toast - Weekend Only",
        ],
    ),
    (
        "Brie Prosciutto Croissant Sandwich",
        &[
            "Brie Prosciutto Croissant Sandwich",
            "Brie Prosciutto Croissant Sandwich (Fri/Sat/Sun)",
            "Brie Prosciutto Croissant Sandwich - Weekend Only",
        ],
    ),
    (
        "Red Bow Tie Croissant",
        &[
            "Red Bow Tie Croissant",
            "Red Bow Tie Croissant (Fri/Sat/Sun)",
            "Red Bow Tie Croissant - Weekend Only",
        ],
    ),
    // Size labels
    ("Lemon Tart (Large)", &["Lemon Tart (L)", "Lemon Tart (Large)"]),
    (
        "Raspberry Tart (Small)",
        &["Raspberry Tart (Small)", "Raspberry Tart(S)"],
    ),
];

static BUILTIN: Lazy<NameNormalizer> = Lazy::new(|| {
    NameNormalizer::from_table(
        BUILTIN_SYNONYMS
            .iter()
            .map(|(canonical, variants)| (*canonical, variants.iter().copied())),
    )
});

/// Exact-match lookup from a variant spelling to its canonical item name
#[derive(Debug, Clone, Default)]
pub struct NameNormalizer {
    reverse: HashMap<String, String>,
}

impl NameNormalizer {
    /// The normalizer for the bakery's known menu variants
    pub fn builtin() -> &'static NameNormalizer {
        &BUILTIN
    }

    /// Build a normalizer from `(canonical, variants)` pairs
    pub fn from_table<'a, I, V>(table: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, V)>,
        V: IntoIterator<Item = &'a str>,
    {
        let mut reverse = HashMap::new();
        for (canonical, variants) in table {
            for variant in variants {
                reverse.insert(variant.to_string(), canonical.to_string());
            }
        }
        Self { reverse }
    }

    /// Canonical name for `raw`; unknown names pass through unchanged
    pub fn canonical<'a>(&'a self, raw: &'a str) -> &'a str {
        self.reverse.get(raw).map(String::as_str).unwrap_or(raw)
    }

    /// Number of known variant spellings
    pub fn len(&self) -> usize {
        self.reverse.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reverse.is_empty()
    }
}
