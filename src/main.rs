use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use threadsmith::ThreadsmithService;
use threadsmith::category::classify;
use threadsmith::config::Config;
use threadsmith::models::{Creativity, FeedbackKind, Provider, ThreadRecord};
use threadsmith::persona;
use threadsmith::schedule::posting_windows;
use threadsmith::session::Session;
use threadsmith::trends::{TOPICS_PER_CATEGORY, group_by_category, sample_trends};
use threadsmith::visual::{ProfileVisual, ThreadVisual, TrendVisual, full_thread_text};

#[derive(Debug, Parser)]
#[command(name = "threadsmith", version, about = "Draft social-media threads with a language model")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show which generation backends and social credentials are configured
    Providers,
    /// Sample trending topics and the best posting times
    Trends,
    /// Print the category of a topic label
    Classify { label: String },
    /// Generate threads, then review them one by one
    Generate {
        #[arg(long)]
        topic: String,
        /// gemini, openai or anthropic
        #[arg(long)]
        provider: Option<String>,
        /// Number of threads (1-10)
        #[arg(long)]
        count: Option<u8>,
        /// low, medium, high or wild
        #[arg(long)]
        creativity: Option<String>,
        #[arg(long)]
        persona_file: Option<PathBuf>,
        /// Render posts as timeline cards
        #[arg(long)]
        preview: bool,
        /// Also print the unparsed model reply
        #[arg(long)]
        raw: bool,
        /// Write each thread to `thread_N.txt` in this directory
        #[arg(long)]
        export_dir: Option<PathBuf>,
        /// Skip the like/dislike prompt
        #[arg(long)]
        no_review: bool,
    },
    /// Generate standalone posts
    Posts {
        #[arg(long)]
        topic: String,
        #[arg(long, default_value_t = 5)]
        count: u8,
        #[arg(long)]
        provider: Option<String>,
    },
    /// Suggest hashtags for a topic
    Hashtags {
        #[arg(long)]
        topic: String,
        #[arg(long)]
        provider: Option<String>,
    },
    /// Account metrics and recent posts
    Profile {
        #[arg(long)]
        username: Option<String>,
    },
    /// Print the persona in effect
    Persona {
        /// Append the account's recent posts as style samples
        #[arg(long)]
        pull: bool,
        /// Save the result to a file
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Inspect or manage recorded feedback
    Feedback {
        #[command(subcommand)]
        action: FeedbackAction,
    },
}

#[derive(Debug, Subcommand)]
enum FeedbackAction {
    Stats,
    List,
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    Reset {
        /// Do not ask for confirmation
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout is for user-facing output
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load();
    let service = ThreadsmithService::new(&config);

    match cli.command {
        Command::Providers => show_providers(&config, &service),
        Command::Trends => {
            let trends = sample_trends();
            let groups = group_by_category(&trends, TOPICS_PER_CATEGORY);
            TrendVisual::display(&groups, &posting_windows());
        }
        Command::Classify { label } => {
            println!("{}", classify(&label).badge());
        }
        Command::Generate {
            topic,
            provider,
            count,
            creativity,
            persona_file,
            preview,
            raw,
            export_dir,
            no_review,
        } => {
            let mut session = Session::from_config(&config)?;
            apply_provider(&mut session, provider.as_deref())?;
            if let Some(n) = count {
                session.set_thread_count(n)?;
            }
            if let Some(level) = creativity {
                session.creativity = Creativity::from_label(&level);
            }
            if let Some(path) = persona_file {
                session.persona = persona::load(&path)
                    .with_context(|| format!("reading persona from {}", path.display()))?;
            }

            eprintln!(
                "{} {} ({}, creativity {})",
                "⏳".bright_cyan(),
                "Generating threads...".bright_cyan(),
                session.provider.display_name(),
                session.creativity
            );
            let threads = service.generate_threads(&mut session, &topic).await?;

            if raw {
                if let Some(text) = session.last_raw() {
                    println!("{}\n{}\n", "Raw reply:".dimmed(), text);
                }
            }
            if threads.is_empty() {
                println!(
                    "{}",
                    "No threads found in the reply. Try again or use --raw to inspect it.".yellow()
                );
                return Ok(());
            }

            let display_name = display_name(&config.social.username);
            let card = preview.then_some((display_name.as_str(), config.social.username.as_str()));
            ThreadVisual::display_threads(&threads, card);

            if let Some(dir) = export_dir {
                export_threads(&dir, &threads)?;
            }
            if !no_review {
                review(&service, &threads)?;
            }
        }
        Command::Posts {
            topic,
            count,
            provider,
        } => {
            let mut session = Session::from_config(&config)?;
            apply_provider(&mut session, provider.as_deref())?;
            let text = service
                .generate_single_posts(&session, &topic, count)
                .await?;
            println!("{text}");
        }
        Command::Hashtags { topic, provider } => {
            let mut session = Session::from_config(&config)?;
            apply_provider(&mut session, provider.as_deref())?;
            let text = service.suggest_hashtags(&session, &topic).await?;
            println!("{text}");
        }
        Command::Profile { username } => {
            let username = username.unwrap_or_else(|| config.social.username.clone());
            let report = service.profile(&username).await?;
            print!(
                "{}",
                ProfileVisual::render(&report.profile, &report.stats, &report.recent)
            );
        }
        Command::Persona { pull, out } => {
            let mut session = Session::from_config(&config)?;
            if pull {
                let n = service
                    .pull_recent_posts(&mut session, &config.social.username)
                    .await?;
                eprintln!("{} Added {} recent posts", "✅".green(), n);
            }
            match out {
                Some(path) => {
                    fs::write(&path, &session.persona)
                        .with_context(|| format!("writing persona to {}", path.display()))?;
                    println!("Persona saved to {}", path.display());
                }
                None => println!("{}", session.persona),
            }
        }
        Command::Feedback { action } => handle_feedback(&service, action)?,
    }

    Ok(())
}

fn apply_provider(session: &mut Session, provider: Option<&str>) -> Result<()> {
    if let Some(tag) = provider {
        session.provider = tag.parse::<Provider>()?;
    }
    Ok(())
}

/// "bir_adamiste" -> "Bir Adamiste"
fn display_name(username: &str) -> String {
    username
        .split(['_', '.'])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn show_providers(config: &Config, service: &ThreadsmithService) {
    println!("{}", "Generation backends".bright_cyan().bold());
    for provider in Provider::ALL {
        let backend = config.generation.backend(provider);
        let status = if service.dispatcher().is_available(provider) {
            "ready".green()
        } else {
            "no key".red()
        };
        let default = if provider == config.generation.default_provider {
            " (default)".dimmed().to_string()
        } else {
            String::new()
        };
        println!(
            "   {:<10} {:<7} {} [{}]{}",
            provider.to_string(),
            status,
            provider.summary(),
            backend.model,
            default
        );
    }
    if service.dispatcher().providers().is_empty() {
        println!(
            "\n{}",
            "No backend available: set GEMINI_API_KEY, OPENAI_API_KEY or ANTHROPIC_API_KEY".yellow()
        );
    }

    println!("\n{}", "Social API".bright_cyan().bold());
    let social = if service.has_social() {
        "ready".green()
    } else {
        "X_BEARER_TOKEN not set".red()
    };
    println!("   @{:<20} {}", config.social.username, social);
    println!(
        "\n{} {}",
        "Feedback file:".dimmed(),
        service.feedback().path().display()
    );
}

fn export_threads(dir: &Path, threads: &[ThreadRecord]) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    for (i, thread) in threads.iter().enumerate() {
        let path = dir.join(format!("thread_{}.txt", i + 1));
        fs::write(&path, full_thread_text(thread))
            .with_context(|| format!("writing {}", path.display()))?;
    }
    eprintln!(
        "{} Exported {} threads to {}",
        "📋".green(),
        threads.len(),
        dir.display()
    );
    Ok(())
}

/// Ask like/dislike/skip for each thread; `q` stops early
fn review(service: &ThreadsmithService, threads: &[ThreadRecord]) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    for (i, thread) in threads.iter().enumerate() {
        print!(
            "Thread {} '{}' - [l]ike, [d]islike, [s]kip, [q]uit: ",
            i + 1,
            thread.title
        );
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let answer = line?;
        match answer.trim().to_lowercase().as_str() {
            "q" | "quit" => break,
            "s" | "skip" | "" => continue,
            other => match other.parse::<FeedbackKind>() {
                Ok(kind) => {
                    service.record_feedback(kind, thread)?;
                    match kind {
                        FeedbackKind::Liked => println!("{}", "👍 Saved as liked".green()),
                        FeedbackKind::Disliked => println!("{}", "👎 Saved as disliked".yellow()),
                    }
                }
                Err(_) => println!("{}", "Unrecognized answer, skipping".dimmed()),
            },
        }
    }
    Ok(())
}

fn handle_feedback(service: &ThreadsmithService, action: FeedbackAction) -> Result<()> {
    let store = service.feedback();
    match action {
        FeedbackAction::Stats => {
            let stats = store.stats();
            println!(
                "👍 {} liked   👎 {} disliked   ({})",
                stats.liked.to_string().green().bold(),
                stats.disliked.to_string().red().bold(),
                store.path().display()
            );
        }
        FeedbackAction::List => {
            let log = store.load();
            if log.is_empty() {
                println!("{}", "No feedback recorded yet.".dimmed());
            }
            for kind in [FeedbackKind::Liked, FeedbackKind::Disliked] {
                let entries = log.entries(kind);
                if entries.is_empty() {
                    continue;
                }
                println!("{}", format!("{kind} ({})", entries.len()).bright_cyan().bold());
                for (i, entry) in entries.iter().enumerate() {
                    println!(
                        "   {}. {} {}",
                        i + 1,
                        entry.thread.title,
                        entry
                            .recorded_at
                            .format("%Y-%m-%d %H:%M")
                            .to_string()
                            .dimmed()
                    );
                }
            }
        }
        FeedbackAction::Export { out } => {
            let json = store.export_json()?;
            match out {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Feedback exported to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        FeedbackAction::Reset { yes } => {
            if !yes {
                print!("Delete all recorded feedback? [y/N]: ");
                io::stdout().flush()?;
                let mut answer = String::new();
                io::stdin().read_line(&mut answer)?;
                if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
                    println!("Aborted.");
                    return Ok(());
                }
            }
            store.reset()?;
            println!("{}", "Feedback cleared.".green());
        }
    }
    Ok(())
}
