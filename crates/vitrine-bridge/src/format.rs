//! Log message formatting for the two output channels.

const ANSI_ESCAPE: &str = "\x1b";
const PREFIX_STYLE: &str = "color:#ff00ff;font-weight:bold";
const BODY_STYLE: &str = "color:inherit;font-weight:normal";

/// Where a log message is headed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogChannel {
    /// The process console (ANSI styling).
    Cli,
    /// A renderer's DevTools console (`%c` CSS styling).
    DevTools,
}

/// Format a message with the `[Vitrine]` prefix for the given channel.
///
/// The CLI form is a single ANSI-colored string; the DevTools form is the
/// console argument list (format string followed by its style strings),
/// ready to pass through a renderer `log` operation.
#[must_use]
pub fn format_log_message(message: &str, channel: LogChannel) -> Vec<String> {
    match channel {
        LogChannel::Cli => {
            vec![format!("{ANSI_ESCAPE}[95m[Vitrine]{ANSI_ESCAPE}[0m {message}")]
        }
        LogChannel::DevTools => vec![
            format!("%c[Vitrine] %c{message}"),
            PREFIX_STYLE.to_string(),
            BODY_STYLE.to_string(),
        ],
    }
}
