/// Fixed sample of trending topics; the social API's free tier has no trends endpoint
use crate::category::{Category, classify};
use crate::models::TrendTopic;

/// Topics shown per category in the overview
pub const TOPICS_PER_CATEGORY: usize = 5;

const SAMPLE_TRENDS: &[(&str, Category, u64)] = &[
    ("#Dolar", Category::Economy, 125_000),
    ("#Enflasyon", Category::Economy, 89_000),
    ("#Borsa", Category::Economy, 156_000),
    ("#BIST100", Category::Economy, 78_000),
    ("#Faiz", Category::Economy, 67_000),
    ("#AsgariÜcret", Category::Economy, 234_000),
    ("#Altın", Category::Economy, 98_000),
    ("#Euro", Category::Economy, 45_000),
    ("#Kripto", Category::Economy, 112_000),
    ("#Bitcoin", Category::Economy, 189_000),
    ("#Zam", Category::Economy, 267_000),
    ("#Maaş", Category::Economy, 145_000),
    ("#Galatasaray", Category::Sports, 245_000),
    ("#Fenerbahçe", Category::Sports, 198_000),
    ("#Beşiktaş", Category::Sports, 156_000),
    ("#Trabzonspor", Category::Sports, 89_000),
    ("#SüperLig", Category::Sports, 167_000),
    ("#Derbi", Category::Sports, 312_000),
    ("#ŞampiyonlarLigi", Category::Sports, 234_000),
    ("#MilliTakım", Category::Sports, 178_000),
    ("#Transfer", Category::Sports, 145_000),
    ("#Icardi", Category::Sports, 123_000),
    ("#Seçim", Category::Politics, 312_000),
    ("#TBMM", Category::Politics, 78_000),
    ("#AKP", Category::Politics, 156_000),
    ("#CHP", Category::Politics, 134_000),
    ("#Erdoğan", Category::Politics, 289_000),
    ("#Kılıçdaroğlu", Category::Politics, 167_000),
    ("#Muhalefet", Category::Politics, 89_000),
    ("#Anayasa", Category::Politics, 67_000),
    ("#DışPolitika", Category::Politics, 45_000),
    ("#YapayZeka", Category::Tech, 145_000),
    ("#ChatGPT", Category::Tech, 167_000),
    ("#Gemini", Category::Tech, 89_000),
    ("#iPhone", Category::Tech, 134_000),
    ("#Android", Category::Tech, 78_000),
    ("#Yazılım", Category::Tech, 56_000),
    ("#Startup", Category::Tech, 67_000),
    ("#Kodlama", Category::Tech, 45_000),
    ("#Python", Category::Tech, 34_000),
    ("#AI", Category::Tech, 198_000),
    ("#Tesla", Category::Tech, 156_000),
    ("#ElonMusk", Category::Tech, 234_000),
    ("#Pazartesi", Category::Humor, 156_000),
    ("#İşyerinde", Category::Humor, 89_000),
    ("#AşkAcısı", Category::Humor, 67_000),
    ("#Türkiye", Category::Humor, 234_000),
    ("#KahveMolası", Category::Humor, 45_000),
    ("#EvdeKal", Category::Humor, 56_000),
    ("#Kış", Category::Humor, 78_000),
    ("#Şubat", Category::Humor, 89_000),
    ("#SevgililerGünü", Category::Humor, 312_000),
    ("#Yalnızlık", Category::Humor, 134_000),
    ("#Deprem", Category::Other, 423_000),
    ("#Hava", Category::Other, 56_000),
    ("#İstanbul", Category::Other, 345_000),
    ("#Ankara", Category::Other, 189_000),
    ("#Trafik", Category::Other, 123_000),
    ("#Eğitim", Category::Other, 167_000),
    ("#Sağlık", Category::Other, 145_000),
    ("#Konut", Category::Other, 198_000),
    ("#Kira", Category::Other, 234_000),
    ("#Gençlik", Category::Other, 89_000),
];

/// The fixture list, freshly built on every call
pub fn sample_trends() -> Vec<TrendTopic> {
    SAMPLE_TRENDS
        .iter()
        .map(|(name, category, volume)| TrendTopic {
            name: name.to_string(),
            category: *category,
            volume: *volume,
        })
        .collect()
}

impl TrendTopic {
    /// A topic whose category is inferred from its name
    pub fn classified(name: impl Into<String>, volume: u64) -> Self {
        let name = name.into();
        let category = classify(&name);
        Self {
            name,
            category,
            volume,
        }
    }
}

/// Group topics by category in display order, keeping at most `limit` per
/// category and dropping empty categories.
pub fn group_by_category(topics: &[TrendTopic], limit: usize) -> Vec<(Category, Vec<&TrendTopic>)> {
    Category::ALL
        .into_iter()
        .filter_map(|category| {
            let group: Vec<&TrendTopic> = topics
                .iter()
                .filter(|t| t.category == category)
                .take(limit)
                .collect();
            (!group.is_empty()).then_some((category, group))
        })
        .collect()
}

/// "125K" for thousands and up, the plain number below that
pub fn format_volume(volume: u64) -> String {
    if volume >= 1000 {
        format!("{:.0}K", volume as f64 / 1000.0)
    } else {
        volume.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_covers_every_category() {
        let trends = sample_trends();
        assert_eq!(trends.len(), 63);
        for category in Category::ALL {
            assert!(trends.iter().any(|t| t.category == category));
        }
    }

    #[test]
    fn test_group_by_category_limits_and_orders() {
        let trends = sample_trends();
        let groups = group_by_category(&trends, TOPICS_PER_CATEGORY);
        let order: Vec<Category> = groups.iter().map(|(c, _)| *c).collect();
        assert_eq!(order, Category::ALL.to_vec());
        assert!(groups.iter().all(|(_, g)| g.len() <= TOPICS_PER_CATEGORY));
        assert_eq!(groups[0].1[0].name, "#Dolar");
    }

    #[test]
    fn test_group_skips_empty_categories() {
        let topics = vec![
            TrendTopic::classified("#Borsa", 10),
            TrendTopic::classified("#Tatil", 20),
        ];
        let groups = group_by_category(&topics, 5);
        let order: Vec<Category> = groups.iter().map(|(c, _)| *c).collect();
        assert_eq!(order, vec![Category::Economy, Category::Other]);
    }

    #[test]
    fn test_format_volume() {
        assert_eq!(format_volume(125_000), "125K");
        assert_eq!(format_volume(1_000), "1K");
        assert_eq!(format_volume(999), "999");
        assert_eq!(format_volume(0), "0");
    }
}
