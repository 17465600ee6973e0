use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

/// Removes every `[<name>说]:` and `[<name>说]` speaker wrapper.
///
/// The generator sometimes prefixes turns with who is speaking. These are
/// decoration, not tags, and are stripped before scanning. Total: never fails.
pub fn strip_speaker_wrappers(text: &str) -> Cow<'_, str> {
    static SPEAKER: OnceLock<Regex> = OnceLock::new();
    let re = SPEAKER.get_or_init(|| {
        Regex::new(r"\[[^\[\]]+?说\](?::\s*)?").expect("Invalid speaker regex")
    });
    re.replace_all(text, "")
}
