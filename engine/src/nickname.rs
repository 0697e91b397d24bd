//! Display-name derivation from the roster full name.

/// Platform display-name length cap.
const MAX_NICKNAME_CHARS: usize = 32;

/// Derive the post-verification display name: the roster full name with
/// whitespace collapsed, capped at the platform limit. Returns `None` for
/// blank names (no cosmetic change is attempted).
pub fn nickname_from_full_name(full_name: &str) -> Option<String> {
    let collapsed = full_name.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return None;
    }
    Some(collapsed.chars().take(MAX_NICKNAME_CHARS).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_inner_whitespace() {
        assert_eq!(
            nickname_from_full_name("  Nguyen   Van\tA "),
            Some("Nguyen Van A".to_string())
        );
    }

    #[test]
    fn blank_name_yields_none() {
        assert_eq!(nickname_from_full_name(""), None);
        assert_eq!(nickname_from_full_name("   \t "), None);
    }

    #[test]
    fn caps_at_platform_limit() {
        let long = "a".repeat(100);
        assert_eq!(nickname_from_full_name(&long).unwrap().chars().count(), 32);
    }
}
