use tracing::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Maps a `-v` count to the most verbose level that is still printed. Without the flag only
/// warnings and errors are shown.
pub(crate) const fn verbosity_level(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Installs the global subscriber. Logs go to stderr so stdout only carries command output.
pub(crate) fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::from_default_env().add_directive(verbosity_level(verbosity).into());
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::default(0, Level::WARN)]
    #[case::info(1, Level::INFO)]
    #[case::debug(2, Level::DEBUG)]
    #[case::trace(3, Level::TRACE)]
    #[case::saturates(9, Level::TRACE)]
    fn test_verbosity_level(#[case] verbosity: u8, #[case] expected: Level) {
        assert_eq!(verbosity_level(verbosity), expected);
    }
}
