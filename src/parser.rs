/// Lenient scanner that turns a generator's free-text reply into threads
use crate::models::{MAX_POST_CHARS, ThreadRecord};

const THREAD_MARKER: &str = "THREAD";
const ELLIPSIS: &str = "...";

/// Scanner state
#[derive(Debug)]
enum State {
    Idle,
    InThread(ThreadRecord),
}

/// Parse a raw generation reply into threads, in source order.
///
/// Total over all inputs: malformed text yields fewer or emptier threads,
/// never an error.
pub fn parse(raw: &str) -> Vec<ThreadRecord> {
    let mut threads = Vec::new();
    let mut state = State::Idle;

    for line in raw.split('\n') {
        let line = line.trim();

        if line.starts_with(THREAD_MARKER) {
            if let State::InThread(done) = state {
                threads.push(done);
            }
            state = State::InThread(ThreadRecord::new(thread_title(line)));
            continue;
        }

        if line.is_empty() {
            continue;
        }

        if let State::InThread(current) = &mut state {
            match numbered_item(line) {
                Some(item) if !item.is_empty() => current.posts.push(fit_post(item)),
                Some(_) => tracing::debug!("Skipping empty numbered line: {:?}", line),
                None => tracing::debug!("Ignoring non-item line: {:?}", line),
            }
        }
    }

    if let State::InThread(done) = state {
        threads.push(done);
    }

    tracing::debug!("Parsed {} threads", threads.len());
    threads
}

/// Title is whatever follows the first colon; without a colon the whole line
fn thread_title(line: &str) -> String {
    match line.split_once(':') {
        Some((_, title)) => title.trim().to_string(),
        None => line.to_string(),
    }
}

/// Recognise "1. text" / "12. text": a leading digit and a period within the
/// first three characters. Returns the text after the first period.
///
/// Deliberately loose: "100. x" is not recognised at all and "1.5 sürüm"
/// counts as an item.
fn numbered_item(line: &str) -> Option<&str> {
    let first = line.chars().next()?;
    if !first.is_ascii_digit() {
        return None;
    }
    if !line.chars().take(3).any(|c| c == '.') {
        return None;
    }
    line.split_once('.').map(|(_, rest)| rest.trim())
}

/// Enforce the post length limit, marking truncation with an ellipsis
fn fit_post(item: &str) -> String {
    if item.chars().count() <= MAX_POST_CHARS {
        return item.to_string();
    }
    let keep = MAX_POST_CHARS - ELLIPSIS.chars().count();
    let mut post: String = item.chars().take(keep).collect();
    post.push_str(ELLIPSIS);
    post
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_ascii_digits_start_items() {
        let threads = parse("THREAD 1: T\n١. arapça rakam\n². üst simge\n1. normal");
        assert_eq!(threads[0].posts, vec!["normal"]);
    }

    #[test]
    fn test_parse_basic_with_truncation() {
        let raw = format!("THREAD 1: Test\n1. Short tweet\n2. {}", "x".repeat(300));
        let threads = parse(&raw);

        assert_eq!(threads.len(), 1);
        assert_eq!(threads[0].title, "Test");
        assert_eq!(threads[0].posts.len(), 2);
        assert_eq!(threads[0].posts[0], "Short tweet");

        let long = &threads[0].posts[1];
        assert_eq!(long.chars().count(), 280);
        assert!(long.ends_with("..."));
        assert_eq!(&long[..277], "x".repeat(277));
    }

    #[test]
    fn test_parse_without_marker_is_empty() {
        assert!(parse("1. a\n2. b\nsome prose").is_empty());
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_parse_counts_markers_in_order() {
        let raw = "---\nTHREAD 1: Bir\n1. a\n---\nTHREAD 2: İki\n1. b\n2. c\nTHREAD 3: Üç\n";
        let threads = parse(raw);
        let titles: Vec<_> = threads.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Bir", "İki", "Üç"]);
        assert_eq!(threads[1].posts, vec!["b", "c"]);
    }

    #[test]
    fn test_empty_thread_is_kept() {
        let raw = "THREAD 1: Boş\nbazı açıklamalar\nTHREAD 2: Dolu\n1. tek";
        let threads = parse(raw);
        assert_eq!(threads.len(), 2);
        assert!(threads[0].posts.is_empty());
        assert_eq!(threads[1].posts, vec!["tek"]);

        let trailing = parse("THREAD 1: Son");
        assert_eq!(trailing.len(), 1);
        assert!(trailing[0].posts.is_empty());
    }

    #[test]
    fn test_marker_without_colon_uses_raw_line() {
        let threads = parse("  THREAD ONE  \n1. a");
        assert_eq!(threads[0].title, "THREAD ONE");
        assert_eq!(threads[0].posts, vec!["a"]);
    }

    #[test]
    fn test_title_splits_on_first_colon_only() {
        let threads = parse("THREAD 4: Dolar: yine mi?");
        assert_eq!(threads[0].title, "Dolar: yine mi?");
    }

    #[test]
    fn test_non_item_lines_are_ignored() {
        let raw = "THREAD 1: T\nİşte thread:\n1. bir\n\n- madde\n(not) 2. değil\n2) parantez\n3. üç";
        let threads = parse(raw);
        assert_eq!(threads[0].posts, vec!["bir", "üç"]);
    }

    #[test]
    fn test_lines_before_first_marker_are_ignored() {
        let threads = parse("1. kayıp\nTHREAD 1: T\n1. kalan");
        assert_eq!(threads[0].posts, vec!["kalan"]);
    }

    #[test]
    fn test_double_digit_numbering() {
        let threads = parse("THREAD 1: T\n10. on\n11.on bir");
        assert_eq!(threads[0].posts, vec!["on", "on bir"]);
    }

    #[test]
    fn test_loose_numbering_quirks_are_preserved() {
        // "100." has no period in its first three characters and is dropped,
        // while a version number like "1.5" reads as item "5 ...".
        let threads = parse("THREAD 1: T\n100. yüz\n1.5 sürüm çıktı");
        assert_eq!(threads[0].posts, vec!["5 sürüm çıktı"]);
    }

    #[test]
    fn test_empty_numbered_item_is_skipped() {
        let threads = parse("THREAD 1: T\n1.\n2. iki");
        assert_eq!(threads[0].posts, vec!["iki"]);
    }

    #[test]
    fn test_exactly_280_chars_is_verbatim() {
        let body = "ş".repeat(280);
        let threads = parse(&format!("THREAD 1: T\n1. {body}"));
        assert_eq!(threads[0].posts[0], body);
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let body = "ğ".repeat(281);
        let threads = parse(&format!("THREAD 1: T\n1. {body}"));
        let post = &threads[0].posts[0];
        assert_eq!(post.chars().count(), 280);
        assert!(post.starts_with(&"ğ".repeat(277)));
        assert!(post.ends_with("..."));
    }

    #[test]
    fn test_crlf_input() {
        let threads = parse("THREAD 1: T\r\n1. a\r\n2. b\r\n");
        assert_eq!(threads[0].title, "T");
        assert_eq!(threads[0].posts, vec!["a", "b"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let threads = parse("THREAD 1: T\n1. aynı\n2. aynı");
        assert_eq!(threads[0].posts, vec!["aynı", "aynı"]);
    }
}
