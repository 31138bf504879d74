/// Hard ceiling on words per generated bullet.
pub const MAX_BULLET_WORDS: usize = 25;

const ELLIPSIS: &str = "...";

/// Bullets within `limit` words come back unchanged. Longer ones become the
/// first `limit` words joined by single spaces, plus "...".
pub fn truncate_to_word_limit(text: &str, limit: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= limit {
        return text.to_string();
    }
    format!("{}{ELLIPSIS}", words[..limit].join(" "))
}

pub fn truncate_bullets(bullets: Vec<String>) -> Vec<String> {
    bullets
        .into_iter()
        .map(|b| truncate_to_word_limit(&b, MAX_BULLET_WORDS))
        .collect()
}
