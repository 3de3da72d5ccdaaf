/// Masks every character of a secret except the last four.
pub fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    let masked_prefix = "*".repeat(chars.len() - 4);
    format!("{}{}", masked_prefix, visible)
}
