//! Confirmation Prompts
//!
//! Destructive operations (container and item deletes) ask for confirmation
//! before touching the repository. The global `--yes` flag skips the prompt;
//! the prompt function itself is injectable so tests never block on a
//! terminal.

use dialoguer::Confirm;

/// Ask for confirmation unless `skip` is set
///
/// Returns true when the operation may proceed.
#[must_use]
pub fn require_confirmation(message: &str, skip: bool) -> bool {
    require_confirmation_with(message, skip, interactive_prompt)
}

/// Ask for confirmation through an arbitrary prompt function
#[must_use]
pub fn require_confirmation_with(
    message: &str,
    skip: bool,
    prompt: impl FnOnce(&str) -> bool,
) -> bool {
    if skip {
        return true;
    }
    prompt(message)
}

/// Interactive terminal prompt, defaulting to "no"
///
/// A failed prompt (no TTY, interrupted) counts as a decline.
fn interactive_prompt(message: &str) -> bool {
    Confirm::new().with_prompt(message).default(false).interact().unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_bypasses_the_prompt() {
        let confirmed = require_confirmation_with("Delete?", true, |_| {
            panic!("prompt must not run when skipped")
        });
        assert!(confirmed);
    }

    #[test]
    fn test_prompt_answer_is_respected() {
        assert!(require_confirmation_with("Delete?", false, |_| true));
        assert!(!require_confirmation_with("Delete?", false, |_| false));
    }

    #[test]
    fn test_prompt_receives_the_message() {
        let mut seen = String::new();
        let _ = require_confirmation_with("Delete container 'x'?", false, |message| {
            seen = message.to_string();
            false
        });
        assert_eq!(seen, "Delete container 'x'?");
    }
}
