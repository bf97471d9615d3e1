//! Prompt construction for AI-generated commit messages.

use std::sync::LazyLock;

use regex_lite::Regex;

/// CSI/OSC style terminal escape sequences.
static ANSI_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b(\[[0-9;?]*[ -/]*[@-~]|\][^\x07]*\x07|[@-_])")
        .expect("ANSI escape pattern is valid")
});

/// Build the instruction sent to the endpoint for a diff.
///
/// Asks for a single lowercase line in the form `type: description`, where
/// type is one of feat, fix or chore.
pub fn build_commit_prompt(diff: &str) -> String {
    let sanitized_diff = sanitize_diff(diff);

    format!(
        r#"You are writing a Git commit message for the changes below.

## Rules
- Reply with exactly ONE line and nothing else: no quotes, no markdown, no explanation.
- Use all lowercase letters.
- Format: `type: description`
- Type: one of feat, fix, chore
  - feat: new behavior or capability
  - fix: a bug fix
  - chore: everything else (refactors, docs, dependencies, tooling)
- Description: imperative mood ("add", "fix", "remove"), no period at the end.

## Diff
```diff
{sanitized_diff}
```"#
    )
}

/// Count whitespace-delimited tokens.
pub fn count_tokens(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Sanitize diff text for inclusion in a prompt.
///
/// Removes control characters (except newlines and tabs) and ANSI escape
/// sequences. Diff content is otherwise passed through unchanged.
pub fn sanitize_diff(text: &str) -> String {
    let without_ansi = ANSI_ESCAPE.replace_all(text, "");
    remove_control_chars(&without_ansi)
}

fn remove_control_chars(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_commit_prompt_includes_literal_diff() {
        let prompt = build_commit_prompt("+line1\n-line2");
        assert!(prompt.contains("+line1\n-line2"));
    }

    #[test]
    fn test_build_commit_prompt_states_format_rules() {
        let prompt = build_commit_prompt("+x");
        assert!(prompt.contains("ONE line"));
        assert!(prompt.contains("lowercase"));
        assert!(prompt.contains("feat, fix, chore"));
    }

    #[test]
    fn test_count_tokens() {
        assert_eq!(count_tokens(""), 0);
        assert_eq!(count_tokens("   \n\t "), 0);
        assert_eq!(count_tokens("+line1\n-line2"), 2);
        assert_eq!(count_tokens("a  b\tc\nd"), 4);
    }

    #[test]
    fn test_sanitize_diff_removes_ansi() {
        let text = "\x1b[31m-old line\x1b[0m\n\x1b[32m+new line\x1b[0m\n";
        let sanitized = sanitize_diff(text);
        assert!(!sanitized.contains('\x1b'));
        assert_eq!(sanitized, "-old line\n+new line\n");
    }

    #[test]
    fn test_sanitize_diff_removes_control_chars() {
        let text = "+a\u{0}b\r\n+\tc\u{7}\n";
        assert_eq!(sanitize_diff(text), "+ab\n+\tc\n");
    }

    #[test]
    fn test_sanitize_diff_preserves_plain_diff() {
        let text = "diff --git a/x b/x\n@@ -1 +1 @@\n-old\n+new\n## heading stays\n";
        assert_eq!(sanitize_diff(text), text);
    }
}
