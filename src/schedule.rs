use std::ops::Range;

/// A time window and how well posts tend to perform in it (Turkey time)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostingWindow {
    pub label: &'static str,
    pub hours: Range<u32>,
    pub score: u8,
    pub description: &'static str,
}

impl PostingWindow {
    pub fn tier(&self) -> Tier {
        Tier::from_score(self.score)
    }

    /// "08:00 - 10:00"
    pub fn span(&self) -> String {
        format!("{:02}:00 - {:02}:00", self.hours.start, self.hours.end)
    }
}

pub fn posting_windows() -> Vec<PostingWindow> {
    vec![
        PostingWindow {
            label: "Morning",
            hours: 8..10,
            score: 85,
            description: "Commute and breakfast scrolling",
        },
        PostingWindow {
            label: "Noon",
            hours: 12..14,
            score: 70,
            description: "Lunch break",
        },
        PostingWindow {
            label: "Evening",
            hours: 17..19,
            score: 90,
            description: "Leaving work, heavy traffic",
        },
        PostingWindow {
            label: "Night",
            hours: 21..23,
            score: 95,
            description: "Prime time, highest engagement",
        },
        PostingWindow {
            label: "Late night",
            hours: 0..2,
            score: 60,
            description: "Night owls, niche audience",
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Good,
    Medium,
    Poor,
}

impl Tier {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => Tier::Good,
            60..=79 => Tier::Medium,
            _ => Tier::Poor,
        }
    }
}

/// Verdict for posting right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engagement {
    Good,
    Moderate,
    Poor,
}

impl Engagement {
    pub fn message(&self) -> &'static str {
        match self {
            Engagement::Good => "Now is a good time to post!",
            Engagement::Moderate => "Moderate engagement expected.",
            Engagement::Poor => "Low-engagement hour. Consider waiting for prime time.",
        }
    }
}

/// Classify an hour of the day (0-23)
pub fn assess_hour(hour: u32) -> Engagement {
    match hour {
        8..=9 | 17..=18 | 21..=22 => Engagement::Good,
        12..=13 | 0..=1 => Engagement::Moderate,
        _ => Engagement::Poor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assess_hour_boundaries() {
        assert_eq!(assess_hour(8), Engagement::Good);
        assert_eq!(assess_hour(9), Engagement::Good);
        assert_eq!(assess_hour(10), Engagement::Poor);
        assert_eq!(assess_hour(17), Engagement::Good);
        assert_eq!(assess_hour(19), Engagement::Poor);
        assert_eq!(assess_hour(22), Engagement::Good);
        assert_eq!(assess_hour(23), Engagement::Poor);
        assert_eq!(assess_hour(0), Engagement::Moderate);
        assert_eq!(assess_hour(1), Engagement::Moderate);
        assert_eq!(assess_hour(2), Engagement::Poor);
        assert_eq!(assess_hour(13), Engagement::Moderate);
        assert_eq!(assess_hour(14), Engagement::Poor);
    }

    #[test]
    fn test_windows_agree_with_assessment() {
        for window in posting_windows() {
            let verdict = assess_hour(window.hours.start);
            match window.tier() {
                Tier::Good => assert_eq!(verdict, Engagement::Good, "{}", window.label),
                Tier::Medium => assert_eq!(verdict, Engagement::Moderate, "{}", window.label),
                Tier::Poor => assert_eq!(verdict, Engagement::Poor, "{}", window.label),
            }
        }
    }

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(Tier::from_score(95), Tier::Good);
        assert_eq!(Tier::from_score(80), Tier::Good);
        assert_eq!(Tier::from_score(79), Tier::Medium);
        assert_eq!(Tier::from_score(60), Tier::Medium);
        assert_eq!(Tier::from_score(59), Tier::Poor);
    }

    #[test]
    fn test_span_format() {
        assert_eq!(posting_windows()[0].span(), "08:00 - 10:00");
        assert_eq!(posting_windows()[4].span(), "00:00 - 02:00");
    }
}
