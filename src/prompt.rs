/// Pure prompt builders for thread, single-post and hashtag generation
use crate::models::{Creativity, GenerationRequest, ThreadRecord};

/// Posts taken from each liked example
const POSTS_PER_EXAMPLE: usize = 2;

const THREAD_PREAMBLE: &str =
    "Sen viral Twitter içerik üreticisisin. Türkçe tweet thread'leri oluştur.";

const THREAD_RULES: &str = r#"KURALLAR:
1. Her tweet maksimum 280 karakter olmalı
2. Kara mizah ve villain stil kullan ve küfür serbest
3. Provokatif ama akıllıca ol
4. Thread'ler 5-8 tweet uzunluğunda olmalı
5. Emoji kullanabilirsin ama çok gerekliyse kullan
6. Türk kültürüne uygun referanslar yap"#;

const THREAD_FORMAT: &str = r#"Format:
---
THREAD 1: [Başlık]
1. [Tweet 1]
2. [Tweet 2]
...
---
THREAD 2: [Başlık]
...

Yaratıcı, provokatif ve viral potansiyeli yüksek içerikler üret."#;

/// Build the thread-generation prompt.
pub fn compose(request: &GenerationRequest) -> String {
    let examples = render_examples(&request.examples);
    let creativity = request.creativity;

    format!(
        r#"{THREAD_PREAMBLE}

PERSONA:
{persona}
{examples}

YARATICILIK SEVİYESİ: {level}
{instruction}

{THREAD_RULES}

Konu: {topic}

Bu konu hakkında {count} farklı viral thread fikri üret. Her thread için:
1. Thread başlığı/hook (dikkat çekici açılış)
2. 5-8 arası tweet (her biri 280 karakter altında)
3. Bir tweetin konusunu o konuyla sınırlı tut farklı konuları kullanmak yasaktır.
4. Her thread'in sonunda bir soru sorarak etkileşim artır.
5. Örneğin konusu epstein olan bir thread'de rtx4090'dan bahsetmek yasaktır.

{THREAD_FORMAT}"#,
        persona = request.persona,
        level = creativity.prompt_label(),
        instruction = creativity.instruction(),
        topic = request.topic,
        count = request.thread_count,
    )
}

fn render_examples(examples: &[ThreadRecord]) -> String {
    if examples.is_empty() {
        return String::new();
    }

    let mut text = String::from("\n\nÖrnek beğenilen thread'ler (bu stili kullan):\n");
    for (i, thread) in examples.iter().enumerate() {
        text.push_str(&format!("\nÖrnek {}:\n", i + 1));
        if thread.posts.is_empty() {
            text.push_str(&format!("- {}\n", thread.title));
            continue;
        }
        for post in thread.posts.iter().take(POSTS_PER_EXAMPLE) {
            text.push_str(&format!("- {post}\n"));
        }
    }
    text
}

/// Prompt for a batch of standalone posts
pub fn compose_single_posts(
    topic: &str,
    persona: &str,
    creativity: Creativity,
    count: u8,
) -> String {
    format!(
        r#"Sen viral Twitter içerik üreticisisin.

PERSONA: {persona}

Konu: {topic}

Bu konu hakkında {count} adet bağımsız, viral potansiyelli tek tweet üret.
- Her tweet maksimum 280 karakter olmalı
- Yaratıcılık seviyesi: {level}
- Her tweet farklı bir bakış açısı sunmalı
- Emoji'leri az kullan, sadece gerekiyorsa

Format:
1. [Tweet 1]
2. [Tweet 2]
..."#,
        level = creativity.prompt_label(),
    )
}

/// Prompt for hashtag suggestions
pub fn compose_hashtags(topic: &str) -> String {
    format!(
        r#"Sen Türkiye'de X (Twitter) için hashtag uzmanısın.

Konu: {topic}

Bu konu için en viral potansiyelli hashtag'leri öner:

1. **Ana Hashtag'ler (3-5 adet):** Konuyla doğrudan ilgili, popüler
2. **Trend Hashtag'ler (3-5 adet):** Güncel trend olan, ilgili
3. **Niche Hashtag'ler (3-5 adet):** Daha spesifik, hedefli kitle
4. **Mizah Hashtag'leri (3-5 adet):** Eğlenceli, dikkat çekici

Her hashtag için:
- Hashtag adı
- Tahmini erişim potansiyeli (düşük/orta/yüksek)
- Ne zaman kullanılmalı (açıklama)

Türkçe hashtag'lere öncelik ver ama gerekirse İngilizce de kullanabilirsin."#
    )
}
