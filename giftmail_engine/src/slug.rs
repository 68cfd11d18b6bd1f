/// Slot name used when the player gives nothing usable.
pub const DEFAULT_SLOT: &str = "save";

/// Normalize a user-provided save slot name into a filesystem-safe slug.
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
        } else if ch == '-' || ch == '_' {
            if !slug.is_empty() {
                slug.push(ch);
            }
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }

    let trimmed = slug.trim_matches(&['-', '_'][..]);
    if trimmed.is_empty() {
        DEFAULT_SLOT.to_string()
    } else {
        trimmed.to_string()
    }
}
