use crate::playback::service::PlaybackCommand;

/// Normalize a configured key name to the value keyboard events report.
/// `space` becomes `" "`; single characters are kept as-is.
pub fn normalize_key(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if name == " " || trimmed.eq_ignore_ascii_case("space") {
        return Some(" ".to_string());
    }

    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c.to_string()),
        _ => None,
    }
}

/// Map a key press to a player command.
///
/// `key` is the event's logical key value and `in_editable` tells whether
/// focus is inside an input, select or textarea, where keys belong to the
/// control instead.
pub fn command_for_key(key: &str, toggle_key: &str, in_editable: bool) -> Option<PlaybackCommand> {
    if in_editable {
        return None;
    }

    let matches = key == toggle_key
        || (key.chars().count() == 1 && key.eq_ignore_ascii_case(toggle_key));
    matches.then_some(PlaybackCommand::TogglePlayPause)
}
