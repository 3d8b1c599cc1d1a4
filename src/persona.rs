use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::social::Post;

/// Recent posts are cut to this many characters when appended to a persona
pub const POST_EXCERPT_CHARS: usize = 100;

const RECENT_POSTS_HEADER: &str = "\n\nSon tweet örneklerim:\n";

/// Used when no persona file is configured
pub const DEFAULT_PERSONA: &str = r#"Sen @bir_adamiste adlı X hesabının AI klonu'sun. Kişiliğin: Mizah seviyesi yüksek, ironi dolu, güzel ve akıcı gündem yorumları yapan bir tip. TR gündemine (ekonomi, siyaset, futbol) hafif mizahla dokun, borsa/yazılım konularını teknik ama eğlenceli işle (başarı/fail hikayeleriyle), kişisel hayat kesitleri ekle (samimi, relatable). Hafif argo kullan (kanka gibi dostane, küfürsüz – algoritma kara listeye almayacak şekilde), emoji nadir (vurgu için 1-2 tane). İlham: Zaytung/Bobiler gibi mizahlı gündem parodisi, ama @bir_adamiste gibi kişisel/borsa odaklı. Viral için soru sor, okuyanı güldür/ düşündür.

Örnek stil tweet'ler (bunları temel al, benzer üret):
1. "Bugün enflasyon rakamları açıklandı, cüzdanım 'yeter artık' diye isyan etti. Kişisel hayatımdan: Geçen hafta borsada bir hisse aldım, şimdi kahve param yok. Sizce hangi yazılım tool'uyla piyasa tahmin edeyim? 😂 #TRGündem"
2. "Siyasetçiler vaat üstüne vaat, ben de yazılım kodlarımda bug fix'liyorum. Mizahı: Erdoğan'ın konuşmasını dinlerken, kendi hayatıma döndüm – startup'ım battı ama yeniden kodladım. Güzel yorum: Bu ülke dirençli, değil mi? #BorsaHayatı"
3. "Futbol gündemi: Fenerbahçe-Galatasaray derbisi öncesi, borsa gibi iniş çıkışlı. Kişisel: Benim yazılım projem de öyle, bir hata bütün sistemi çökertiyor. Yüksek mizah: Takım tutar gibi hisse tutmayın, yoksa iflas! Kim katılıyor? #YazılımMizahı"
4. "TR'de yeni vergi yasası, cüzdanlar ağlıyor. Benim yorumum: Borsa'da short pozisyon açsam mı? Kişisel kesit: Geçen ay bir app kodladım, ama gündem değişince pivot ettim. Güldüren twist: Hayat da öyle, değil mi kanka? 😏 #EkonomiGündemi"
5. "Yazılım dünyasında AI hype'ı, ama TR gündeminde işsizlik. Mizahlı: Ben kendi botumu yazdım, şimdi işimi elimden alacak mı? Kişisel: Hayatımdan, ilk kodumda infinite loop'a girdim – tıpkı enflasyon gibi. Siz ne düşünüyorsunuz? #AIGündem"

Her üretimde:
- Thread'leri 4-6 tweet'lik tut, numaralandır (1/6 gibi).
- Her tweet 280 karakter aşmasın.
- Viral potansiyel: Soru sor, etkileşim artır.
- Para kazanma için: Dolaylı affiliate (borsa tool önerisi gibi) ekle, ama doğal tut."#;

/// Read a persona from disk. Blank files fall back to the default.
pub fn load(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path)?;
    if text.trim().is_empty() {
        tracing::warn!(
            "Persona file {} is empty, using the default persona",
            path.display()
        );
        return Ok(DEFAULT_PERSONA.to_string());
    }
    tracing::debug!("Loaded persona from {}", path.display());
    Ok(text.trim_end().to_string())
}

/// The persona from `path` if given, else the default
pub fn resolve(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) => load(p),
        None => Ok(DEFAULT_PERSONA.to_string()),
    }
}

/// Append a numbered list of recent posts as extra style samples.
///
/// Returns the persona unchanged when there are no posts.
pub fn with_recent_posts(persona: &str, posts: &[Post]) -> String {
    if posts.is_empty() {
        return persona.to_string();
    }
    let mut out = String::from(persona);
    out.push_str(RECENT_POSTS_HEADER);
    for (i, post) in posts.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, excerpt(&post.text)));
    }
    out
}

fn excerpt(text: &str) -> String {
    if text.chars().count() > POST_EXCERPT_CHARS {
        let cut: String = text.chars().take(POST_EXCERPT_CHARS).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::social::PostMetrics;

    fn post(text: &str) -> Post {
        Post {
            id: "1".to_string(),
            text: text.to_string(),
            created_at: None,
            public_metrics: PostMetrics::default(),
        }
    }

    #[test]
    fn test_with_recent_posts_appends_numbered_list() {
        let out = with_recent_posts("persona", &[post("ilk"), post("ikinci")]);
        assert_eq!(out, "persona\n\nSon tweet örneklerim:\n1. ilk\n2. ikinci\n");
    }

    #[test]
    fn test_long_posts_are_cut_by_chars() {
        let long = "ş".repeat(150);
        let out = with_recent_posts("", &[post(&long)]);
        let line = out.lines().last().unwrap();
        assert_eq!(line, format!("1. {}...", "ş".repeat(100)));

        let exact = "a".repeat(100);
        let out = with_recent_posts("", &[post(&exact)]);
        assert!(out.ends_with(&format!("1. {exact}\n")));
    }

    #[test]
    fn test_no_posts_leaves_persona_alone() {
        assert_eq!(with_recent_posts("p", &[]), "p");
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        assert_eq!(resolve(None).unwrap(), DEFAULT_PERSONA);

        let path = std::env::temp_dir().join(format!("persona-{}.txt", uuid::Uuid::new_v4()));
        fs::write(&path, "  \n").unwrap();
        assert_eq!(resolve(Some(&path)).unwrap(), DEFAULT_PERSONA);

        fs::write(&path, "Kara mizah seven villain karakter\n").unwrap();
        assert_eq!(resolve(Some(&path)).unwrap(), "Kara mizah seven villain karakter");
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_persona_file_is_an_error() {
        assert!(load(Path::new("/nonexistent/persona.txt")).is_err());
    }
}
