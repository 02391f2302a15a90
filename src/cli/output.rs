use clap::ValueEnum;

/// Output format for one-shot commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable messages
    #[default]
    Human,
    /// Machine-readable JSON
    Json,
}
