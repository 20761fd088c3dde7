//! Request-line parsing.

/// One parsed control command, borrowing from the request line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// Empty line or literal `help`: print usage.
    Help,
    /// Literal `list`: enumerate channels.
    List,
    /// `subscribe <channel>[:<format>]`.
    Subscribe {
        /// Channel name, colon suffix already stripped.
        channel: &'a str,
        /// Format hint after the first colon, verbatim (may be empty).
        format: Option<&'a str>,
    },
    /// `unsubscribe <channel>[:<format>]` — the format is parsed off and
    /// discarded so the lookup sees a clean channel name.
    Unsubscribe {
        /// Channel name, colon suffix already stripped.
        channel: &'a str,
    },
}

impl<'a> Command<'a> {
    /// Parses one request line. `None` means a malformed request: no space
    /// after the verb, or a verb other than the exact strings `subscribe` /
    /// `unsubscribe`.
    ///
    /// Splits are on the **first** space and the **first** colon, so a
    /// format hint may itself contain colons.
    pub fn parse(line: &'a str) -> Option<Self> {
        if line.is_empty() || line == "help" {
            return Some(Command::Help);
        }
        if line == "list" {
            return Some(Command::List);
        }

        let (verb, rest) = line.split_once(' ')?;
        let (channel, format) = match rest.split_once(':') {
            Some((channel, format)) => (channel, Some(format)),
            None => (rest, None),
        };

        match verb {
            "subscribe" => Some(Command::Subscribe { channel, format }),
            "unsubscribe" => Some(Command::Unsubscribe { channel }),
            _ => None,
        }
    }
}
