//! Content validation rules for comments, attachments, and activity rows.

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Maximum length of comment text in characters.
pub const MAX_COMMENT_LENGTH: usize = 10_000;

/// Maximum length of an attachment display name.
pub const MAX_ATTACHMENT_NAME_LENGTH: usize = 255;

/// Maximum length of a denormalized entity display label.
pub const MAX_ENTITY_NAME_LENGTH: usize = 255;

/// Maximum length of an activity description.
pub const MAX_DESCRIPTION_LENGTH: usize = 2_000;

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Validate comment text: non-empty after trimming, within the limit.
pub fn validate_comment_text(text: &str) -> Result<(), String> {
    if text.trim().is_empty() {
        return Err("Comment text cannot be empty".to_string());
    }
    if text.chars().count() > MAX_COMMENT_LENGTH {
        return Err(format!(
            "Comment text exceeds maximum length of {MAX_COMMENT_LENGTH} characters"
        ));
    }
    Ok(())
}

/// Validate an attachment display name override.
///
/// The override is optional at the call site; when present it must be
/// non-empty and within the limit.
pub fn validate_attachment_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Attachment name cannot be empty".to_string());
    }
    if name.chars().count() > MAX_ATTACHMENT_NAME_LENGTH {
        return Err(format!(
            "Attachment name exceeds maximum length of {MAX_ATTACHMENT_NAME_LENGTH} characters"
        ));
    }
    Ok(())
}

/// Validate a denormalized entity display label.
pub fn validate_entity_name(name: &str) -> Result<(), String> {
    if name.chars().count() > MAX_ENTITY_NAME_LENGTH {
        return Err(format!(
            "Entity name exceeds maximum length of {MAX_ENTITY_NAME_LENGTH} characters"
        ));
    }
    Ok(())
}

/// Validate an activity description.
pub fn validate_description(description: &str) -> Result<(), String> {
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(format!(
            "Description exceeds maximum length of {MAX_DESCRIPTION_LENGTH} characters"
        ));
    }
    Ok(())
}

/// Truncate text to at most `max` characters for denormalized snippets.
pub fn snippet(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_comment_text_rejected() {
        assert!(validate_comment_text("").is_err());
        assert!(validate_comment_text("   \n\t").is_err());
    }

    #[test]
    fn normal_comment_text_accepted() {
        assert!(validate_comment_text("Follow up needed").is_ok());
    }

    #[test]
    fn oversized_comment_text_rejected() {
        let text = "x".repeat(MAX_COMMENT_LENGTH + 1);
        assert!(validate_comment_text(&text).is_err());
    }

    #[test]
    fn comment_at_limit_accepted() {
        let text = "x".repeat(MAX_COMMENT_LENGTH);
        assert!(validate_comment_text(&text).is_ok());
    }

    #[test]
    fn empty_attachment_name_rejected() {
        assert!(validate_attachment_name("  ").is_err());
    }

    #[test]
    fn snippet_truncates_on_char_boundary() {
        assert_eq!(snippet("hello", 10), "hello");
        assert_eq!(snippet("hello", 3), "hel");
        // Multi-byte characters count as one.
        assert_eq!(snippet("héllo", 2), "hé");
    }
}
