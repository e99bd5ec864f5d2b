//! Prefix command parsing

/// A command name and its payload, split out of a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    /// Lowercased name without prefix or `@botname` suffix
    pub name: String,
    pub payload: &'a str,
}

/// Split `content` into a command and payload if it starts with `prefix`
///
/// `/remindme@MyBot in 5m` parses as name `remindme`, payload `in 5m`.
pub fn parse_command<'a>(content: &'a str, prefix: &str) -> Option<ParsedCommand<'a>> {
    let rest = content.trim_start().strip_prefix(prefix)?;

    let (token, payload) = match rest.split_once(char::is_whitespace) {
        Some((token, payload)) => (token, payload.trim()),
        None => (rest.trim_end(), ""),
    };

    let name = token.split('@').next().unwrap_or_default();
    if name.is_empty() {
        return None;
    }

    Some(ParsedCommand {
        name: name.to_lowercase(),
        payload,
    })
}
