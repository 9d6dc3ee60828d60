//! Command parsing for the module's text interface.
//!
//! Users talk to the module in a private query. Command words are matched
//! case-insensitively, as the bouncer does for every module.

/// Command name, argument syntax, description.
const COMMANDS: &[(&str, &str, &str)] = &[
    ("Help", "", "Generate this output"),
    (
        "Send",
        "[details]",
        "Send certificate information to client. Append 'details' to the 'send' command \
         ('send details') to include the entire certificate chain in output.",
    ),
];

/// Parsed command from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Send the certificate chain.
    Send {
        /// `details` argument given
        include_full_chain: bool,
    },

    /// List commands.
    Help,

    /// Unknown or empty command.
    Unknown {
        /// The original input.
        input: String,
    },

    /// Command with invalid arguments.
    InvalidArgs {
        /// Command name.
        command: String,
        /// Error message.
        error: String,
    },
}

/// Parse one line of user input.
pub fn parse(input: &str) -> Command {
    let input = input.trim();
    let parts: Vec<&str> = input.split_whitespace().collect();
    let command = parts.first().copied().unwrap_or("");

    if command.eq_ignore_ascii_case("send") {
        match parts.get(1..) {
            Some([]) | None => Command::Send { include_full_chain: false },
            Some([arg]) if arg.eq_ignore_ascii_case("details") => {
                Command::Send { include_full_chain: true }
            },
            Some(_) => Command::InvalidArgs {
                command: "send".into(),
                error: "Usage: Send [details]".into(),
            },
        }
    } else if command.eq_ignore_ascii_case("help") {
        Command::Help
    } else {
        Command::Unknown { input: input.to_string() }
    }
}

/// Help table, one line per command.
pub fn help_lines() -> Vec<String> {
    COMMANDS
        .iter()
        .map(|(name, args, description)| {
            if args.is_empty() {
                format!("{name} - {description}")
            } else {
                format!("{name} {args} - {description}")
            }
        })
        .collect()
}

/// Reply to an unrecognized command.
pub fn unknown_reply(input: &str) -> String {
    format!("Unknown command [{input}]. Try 'Help'.")
}
