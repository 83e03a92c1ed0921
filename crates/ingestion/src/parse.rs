//! Protocol line classification and PRIVMSG parsing

/// Reply sent in response to a server PING
pub const PONG_REPLY: &str = "PONG :tmi.twitch.tv";

/// Classification of one protocol line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    /// Liveness check, answered in-band and never forwarded
    Ping,
    /// A chat message with parsed sender and body
    Privmsg { origin: String, text: String },
    /// Anything else (JOIN acks, notices, malformed lines) - discarded
    Other,
}

/// Classify one trimmed protocol line.
///
/// Only lines carrying the `PRIVMSG` marker are chat messages. The sender
/// is the prefix of the first metadata token up to `!`, with the leading
/// `:` stripped, e.g.
/// `:alice!alice@alice.tmi.twitch.tv PRIVMSG #chan :hello` -> origin `alice`.
pub fn parse_line(line: &str) -> ParsedLine {
    if line.starts_with("PING") {
        return ParsedLine::Ping;
    }
    if !line.contains("PRIVMSG") {
        return ParsedLine::Other;
    }

    // "<meta> :<text>" - lines that do not split are discarded
    let Some((meta, text)) = line.split_once(" :") else {
        return ParsedLine::Other;
    };

    let user_token = meta.split(' ').next().unwrap_or("");
    let origin = user_token
        .split('!')
        .next()
        .unwrap_or("")
        .trim_start_matches(':');

    if origin.is_empty() {
        return ParsedLine::Other;
    }

    ParsedLine::Privmsg {
        origin: origin.to_string(),
        text: text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ping_is_recognized() {
        assert_eq!(parse_line("PING :tmi.twitch.tv"), ParsedLine::Ping);
    }

    #[test]
    fn privmsg_parses_origin_and_text() {
        let line = ":alice!alice@alice.tmi.twitch.tv PRIVMSG #chan :hello world";
        assert_eq!(
            parse_line(line),
            ParsedLine::Privmsg {
                origin: "alice".into(),
                text: "hello world".into(),
            }
        );
    }

    #[test]
    fn privmsg_with_empty_text_keeps_empty_body() {
        let line = ":bob!bob@host PRIVMSG #chan :";
        assert_eq!(
            parse_line(line),
            ParsedLine::Privmsg {
                origin: "bob".into(),
                text: "".into(),
            }
        );
    }

    #[test]
    fn text_containing_colon_separator_is_kept_whole() {
        let line = ":carol!c@host PRIVMSG #chan :note :with colon";
        match parse_line(line) {
            ParsedLine::Privmsg { text, .. } => assert_eq!(text, "note :with colon"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn non_privmsg_lines_are_other() {
        assert_eq!(
            parse_line(":tmi.twitch.tv 001 bot :Welcome"),
            ParsedLine::Other
        );
        assert_eq!(parse_line(""), ParsedLine::Other);
    }

    #[test]
    fn privmsg_without_body_separator_is_discarded() {
        assert_eq!(
            parse_line(":alice!a@host PRIVMSG #chan"),
            ParsedLine::Other
        );
    }
}
