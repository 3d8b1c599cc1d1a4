use chrono::Timelike;
use colored::*;

use crate::category::Category;
use crate::models::{MAX_POST_CHARS, ThreadRecord, TrendTopic};
use crate::schedule::{Engagement, PostingWindow, Tier, assess_hour};
use crate::social::{Post, ProfileStats, UserProfile};
use crate::trends::format_volume;

const RULE: &str = "────────────────────────────────────────";
const PROFILE_POST_CHARS: usize = 200;

/// Plain-text form of a thread, ready to paste or save:
/// `🧵 title`, a blank line, then `j/n post` blocks.
pub fn full_thread_text(thread: &ThreadRecord) -> String {
    let total = thread.posts.len();
    let mut text = format!("🧵 {}\n\n", thread.title);
    for (j, post) in thread.posts.iter().enumerate() {
        text.push_str(&format!("{}/{} {}\n\n", j + 1, total, post));
    }
    text
}

/// `(n/280)`, green when within the limit and red when over
pub fn char_count_label(post: &str) -> ColoredString {
    let count = post.chars().count();
    let label = format!("({count}/{MAX_POST_CHARS})");
    if count <= MAX_POST_CHARS {
        label.green()
    } else {
        label.red()
    }
}

/// `12,345`
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .filter_map(|w| w.chars().next())
        .take(2)
        .collect();
    letters.to_uppercase()
}

pub struct ThreadVisual;

impl ThreadVisual {
    /// Numbered posts with per-post character counts
    pub fn render_plain(index: usize, thread: &ThreadRecord) -> String {
        let total = thread.posts.len();
        let mut out = format!(
            "{} {}\n",
            format!("Thread {}:", index + 1).bright_yellow().bold(),
            thread.title.bold()
        );
        if thread.posts.is_empty() {
            out.push_str(&format!("   {}\n", "(no posts)".dimmed()));
        }
        for (j, post) in thread.posts.iter().enumerate() {
            out.push_str(&format!(
                "   {} {} {}\n",
                format!("{}/{}.", j + 1, total).cyan(),
                post,
                char_count_label(post)
            ));
        }
        out
    }

    /// Each post drawn as a timeline card for the given account
    pub fn render_preview(thread: &ThreadRecord, name: &str, username: &str) -> String {
        let total = thread.posts.len();
        let avatar = format!("[{}]", initials(name)).on_blue().white().bold();
        let mut out = format!("{}\n", thread.title.bold());
        for (j, post) in thread.posts.iter().enumerate() {
            out.push_str(&format!("{}\n", RULE.dimmed()));
            out.push_str(&format!(
                "{} {} {}\n",
                avatar,
                name.bold(),
                format!("@{username} · {}/{total}", j + 1).dimmed()
            ));
            out.push_str(&format!("{post}\n"));
            out.push_str(&format!(
                "{}   {}\n",
                "💬 --   🔁 --   ❤️ --   📊 --".dimmed(),
                char_count_label(post)
            ));
        }
        out.push_str(&format!("{}\n", RULE.dimmed()));
        out
    }

    pub fn display_threads(threads: &[ThreadRecord], preview: Option<(&str, &str)>) {
        println!(
            "\n{} {}\n",
            "📝".bright_cyan(),
            format!("Generated threads ({})", threads.len()).bright_cyan().bold()
        );
        for (i, thread) in threads.iter().enumerate() {
            match preview {
                Some((name, username)) => {
                    println!("{}", format!("Thread {}", i + 1).bright_yellow().bold());
                    print!("{}", Self::render_preview(thread, name, username));
                }
                None => print!("{}", Self::render_plain(i, thread)),
            }
            println!();
        }
    }
}

pub struct TrendVisual;

impl TrendVisual {
    pub fn render_overview(groups: &[(Category, Vec<&TrendTopic>)]) -> String {
        let mut out = String::new();
        for (category, topics) in groups {
            out.push_str(&format!("{}\n", category.badge()));
            for topic in topics {
                out.push_str(&format!(
                    "   {:<20} {}\n",
                    topic.name,
                    format!("{} posts", format_volume(topic.volume)).dimmed()
                ));
            }
            out.push('\n');
        }
        out
    }

    pub fn render_windows(windows: &[PostingWindow]) -> String {
        let mut out = String::new();
        for window in windows {
            let score = format!("{:>3}", window.score);
            let score = match window.tier() {
                Tier::Good => score.green().bold(),
                Tier::Medium => score.yellow(),
                Tier::Poor => score.red(),
            };
            out.push_str(&format!(
                "   {} {:<11} {}  {}\n",
                score,
                window.label,
                window.span().cyan(),
                window.description.dimmed()
            ));
        }
        out
    }

    pub fn render_verdict(hour: u32) -> String {
        let verdict = assess_hour(hour);
        let line = format!("{:02}:00 - {}", hour, verdict.message());
        match verdict {
            Engagement::Good => format!("{} {}", "✅".green(), line.green()),
            Engagement::Moderate => format!("{} {}", "⚠️".yellow(), line.yellow()),
            Engagement::Poor => format!("{} {}", "⏳".red(), line.red()),
        }
    }

    pub fn display(groups: &[(Category, Vec<&TrendTopic>)], windows: &[PostingWindow]) {
        println!("{} {}\n", "📈".bright_cyan(), "Sample trends".bright_cyan().bold());
        print!("{}", Self::render_overview(groups));
        println!("{} {}", "⏰".bright_cyan(), "Best posting times".bright_cyan().bold());
        print!("{}", Self::render_windows(windows));
        println!("\n{}", Self::render_verdict(chrono::Local::now().hour()));
    }
}

pub struct ProfileVisual;

impl ProfileVisual {
    pub fn render(profile: &UserProfile, stats: &ProfileStats, recent: &[Post]) -> String {
        let mut out = format!(
            "{} {}\n",
            profile.name.bold(),
            format!("@{}", profile.username).dimmed()
        );
        if !profile.description.is_empty() {
            out.push_str(&format!("{}\n", profile.description.italic()));
        }
        out.push('\n');
        out.push_str(&format!(
            "   👥 Followers {}   ➡️ Following {}   📝 Posts {}   📈 Ratio {}\n",
            format_thousands(stats.followers).bold(),
            format_thousands(stats.following).bold(),
            format_thousands(stats.posts).bold(),
            format!("{:.2}", stats.follow_ratio).bold()
        ));

        if recent.is_empty() {
            out.push_str(&format!("\n{}\n", "No recent posts found.".yellow()));
            return out;
        }

        out.push_str(&format!("\n{}\n", "Recent posts".bright_cyan().bold()));
        for post in recent {
            let m = post.public_metrics;
            let date = post
                .created_at
                .map(|d| d.format("%d/%m/%Y").to_string())
                .unwrap_or_else(|| "N/A".to_string());
            out.push_str(&format!("   {}\n", truncate(&post.text, PROFILE_POST_CHARS)));
            out.push_str(&format!(
                "   {}\n",
                format!(
                    "❤️ {} | 🔄 {} | 💬 {} | 📅 {}",
                    m.like_count, m.retweet_count, m.reply_count, date
                )
                .dimmed()
            ));
        }

        if let Some(e) = stats.engagement {
            out.push_str(&format!("\n{}\n", "Average engagement".bright_cyan().bold()));
            out.push_str(&format!(
                "   ❤️ {:.1}   🔄 {:.1}   💬 {:.1}   ⭐ score {:.1}\n",
                e.avg_likes, e.avg_retweets, e.avg_quotes, e.score
            ));
        }
        out
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::posting_windows;
    use crate::social::{PostMetrics, UserMetrics};
    use crate::trends::{TOPICS_PER_CATEGORY, group_by_category, sample_trends};

    fn thread() -> ThreadRecord {
        ThreadRecord::with_posts(
            "Enflasyon",
            vec!["Cüzdanım isyan etti".to_string(), "Siz ne dersiniz?".to_string()],
        )
    }

    #[test]
    fn test_full_thread_text() {
        assert_eq!(
            full_thread_text(&thread()),
            "🧵 Enflasyon\n\n1/2 Cüzdanım isyan etti\n\n2/2 Siz ne dersiniz?\n\n"
        );
        assert_eq!(full_thread_text(&ThreadRecord::new("Boş")), "🧵 Boş\n\n");
    }

    #[test]
    fn test_char_count_label_counts_chars() {
        assert!(char_count_label("şğü").to_string().contains("(3/280)"));
        let long = "a".repeat(281);
        assert!(char_count_label(&long).to_string().contains("(281/280)"));
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(12345), "12,345");
        assert_eq!(format_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("Bir Adamiste"), "BA");
        assert_eq!(initials("solo"), "S");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_render_plain_and_preview_include_posts() {
        let plain = ThreadVisual::render_plain(0, &thread());
        assert!(plain.contains("Cüzdanım isyan etti"));
        assert!(plain.contains("(19/280)"));

        let preview = ThreadVisual::render_preview(&thread(), "Bir Adamiste", "bir_adamiste");
        assert!(preview.contains("@bir_adamiste · 2/2"));
        assert!(preview.contains("Siz ne dersiniz?"));
    }

    #[test]
    fn test_trend_overview_lists_topics() {
        let trends = sample_trends();
        let groups = group_by_category(&trends, TOPICS_PER_CATEGORY);
        let out = TrendVisual::render_overview(&groups);
        assert!(out.contains("#Dolar"));
        assert!(out.contains("125K posts"));
        let windows = TrendVisual::render_windows(&posting_windows());
        assert!(windows.contains("21:00 - 23:00"));
        assert!(TrendVisual::render_verdict(21).contains("21:00"));
    }

    #[test]
    fn test_profile_render() {
        let profile = UserProfile {
            id: "1".to_string(),
            username: "bir_adamiste".to_string(),
            name: "Bir Adamiste".to_string(),
            description: String::new(),
            created_at: None,
            public_metrics: UserMetrics {
                followers_count: 12345,
                following_count: 100,
                tweet_count: 10,
                listed_count: 0,
            },
        };
        let posts = vec![Post {
            id: "9".to_string(),
            text: "x".repeat(250),
            created_at: None,
            public_metrics: PostMetrics {
                like_count: 7,
                retweet_count: 1,
                reply_count: 2,
                quote_count: 0,
            },
        }];
        let stats = ProfileStats::compute(&profile, &posts);
        let out = ProfileVisual::render(&profile, &stats, &posts);
        assert!(out.contains("12,345"));
        assert!(out.contains("123.45"));
        assert!(out.contains(&format!("{}...", "x".repeat(200))));
        assert!(!out.contains(&"x".repeat(201)));
        assert!(out.contains("📅 N/A"));

        let empty = ProfileVisual::render(&profile, &ProfileStats::compute(&profile, &[]), &[]);
        assert!(empty.contains("No recent posts found."));
    }
}
