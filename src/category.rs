/// Topic categories and the keyword classifier
use colored::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ThreadsmithError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Economy,
    Sports,
    Politics,
    Tech,
    Humor,
    Other,
}

impl Category {
    /// Display order, which is also the classifier's priority order
    pub const ALL: [Category; 6] = [
        Category::Economy,
        Category::Sports,
        Category::Politics,
        Category::Tech,
        Category::Humor,
        Category::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Economy => "Economy",
            Category::Sports => "Sports",
            Category::Politics => "Politics",
            Category::Tech => "Tech",
            Category::Humor => "Humor",
            Category::Other => "Other",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Economy => "💰",
            Category::Sports => "⚽",
            Category::Politics => "🏛️",
            Category::Tech => "💻",
            Category::Humor => "😂",
            Category::Other => "📌",
        }
    }

    /// Colored badge for terminal output
    pub fn badge(&self) -> ColoredString {
        let text = format!(" {} {} ", self.icon(), self.label());
        match self {
            Category::Economy => text.on_green().white(),
            Category::Sports => text.on_red().white(),
            Category::Politics => text.on_bright_black().white(),
            Category::Tech => text.on_blue().white(),
            Category::Humor => text.on_yellow().black(),
            Category::Other => text.on_cyan().white(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Economy => "economy",
            Category::Sports => "sports",
            Category::Politics => "politics",
            Category::Tech => "tech",
            Category::Humor => "humor",
            Category::Other => "other",
        };
        f.write_str(s)
    }
}

impl FromStr for Category {
    type Err = ThreadsmithError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "economy" | "ekonomi" => Ok(Category::Economy),
            "sports" | "spor" => Ok(Category::Sports),
            "politics" | "siyaset" => Ok(Category::Politics),
            "tech" | "teknoloji" => Ok(Category::Tech),
            "humor" | "mizah" => Ok(Category::Humor),
            "other" | "diger" | "diğer" => Ok(Category::Other),
            other => Err(ThreadsmithError::validation(
                "category",
                format!("unknown category '{other}'"),
            )),
        }
    }
}

const ECONOMY_KEYWORDS: &[&str] = &[
    "dolar", "euro", "enflasyon", "faiz", "borsa", "ekonomi", "maaş", "zam", "tl", "kur",
    "bitcoin", "kripto", "altın", "bist",
];

const SPORTS_KEYWORDS: &[&str] = &[
    "galatasaray",
    "fenerbahçe",
    "beşiktaş",
    "trabzonspor",
    "maç",
    "gol",
    "futbol",
    "basketbol",
    "şampiyon",
];

const POLITICS_KEYWORDS: &[&str] = &[
    "seçim",
    "tbmm",
    "meclis",
    "parti",
    "cumhurbaşkan",
    "bakan",
    "hükümet",
    "muhalefet",
];

const TECH_KEYWORDS: &[&str] = &[
    "yapay zeka",
    "ai",
    "chatgpt",
    "iphone",
    "android",
    "yazılım",
    "teknoloji",
    "kod",
    "google",
    "apple",
];

const HUMOR_KEYWORDS: &[&str] = &[
    "pazartesi",
    "cuma",
    "işyerinde",
    "aşk",
    "sevgili",
    "evlilik",
    "komik",
    "espri",
];

// Priority order: the first list with a hit wins.
const RULES: [(Category, &[&str]); 5] = [
    (Category::Economy, ECONOMY_KEYWORDS),
    (Category::Sports, SPORTS_KEYWORDS),
    (Category::Politics, POLITICS_KEYWORDS),
    (Category::Tech, TECH_KEYWORDS),
    (Category::Humor, HUMOR_KEYWORDS),
];

/// Map a free-text label to a category by case-insensitive substring match.
pub fn classify(label: &str) -> Category {
    let lowered = label.to_lowercase();
    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lowered.contains(kw)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_examples() {
        assert_eq!(classify("Bitcoin yükseldi"), Category::Economy);
        assert_eq!(classify("Galatasaray kazandı"), Category::Sports);
        assert_eq!(classify("hiçbir kategoriye uymayan metin"), Category::Other);
    }

    #[test]
    fn test_classify_priority_economy_beats_sports() {
        assert_eq!(classify("Dolar rekor, Galatasaray maç kazandı"), Category::Economy);
        assert_eq!(classify("galatasaray maçı dolar ile"), Category::Economy);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(classify("#Seçim"), Category::Politics);
        assert_eq!(classify("FENERBAHÇE"), Category::Sports);
        assert_eq!(classify("#TBMM"), Category::Politics);
        assert_eq!(classify("#ChatGPT"), Category::Tech);
        assert_eq!(classify("#Pazartesi"), Category::Humor);
    }

    #[test]
    fn test_classify_is_total() {
        assert_eq!(classify(""), Category::Other);
        assert_eq!(classify("   "), Category::Other);
        assert_eq!(classify("🐦🐦🐦"), Category::Other);
    }

    #[test]
    fn test_category_round_trips_through_display() {
        for category in Category::ALL {
            assert_eq!(category.to_string().parse::<Category>().unwrap(), category);
        }
        assert_eq!("ekonomi".parse::<Category>().unwrap(), Category::Economy);
        assert!("sanat".parse::<Category>().is_err());
    }
}
