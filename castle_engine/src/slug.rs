/// Turn a player name into a filesystem-safe save slot name.
///
/// Runs of whitespace and punctuation collapse into a single dash; an empty result
/// becomes `"player"` so every session still maps to a file.
pub fn sanitize_slug(raw: &str) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;
    for ch in raw.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(ch.to_ascii_lowercase());
            pending_dash = false;
        } else if ch == '_' && !slug.is_empty() {
            slug.push(ch);
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }

    let trimmed = slug.trim_matches(&['-', '_'][..]);
    if trimmed.is_empty() {
        "player".to_string()
    } else {
        trimmed.to_string()
    }
}
