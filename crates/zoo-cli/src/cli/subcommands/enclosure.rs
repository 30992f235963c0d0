use clap::Subcommand;

/// Enclosure record commands.
#[derive(Clone, Debug, Subcommand)]
pub enum EnclosureCommands {
    /// Register an empty enclosure.
    Register {
        #[arg(long)]
        name: String,
        /// Floor area in square metres.
        #[arg(long)]
        area: f64,
        /// Temperature in degrees Celsius.
        #[arg(long, allow_negative_numbers = true)]
        temperature: f64,
        #[arg(long)]
        location: String,
        #[arg(long)]
        environment: String,
    },
    /// Get an enclosure with its inhabitants and caretakers.
    Get { id: String },
    /// List enclosures.
    List,
    /// Update an enclosure's recorded details.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        area: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        temperature: Option<f64>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        environment: Option<String>,
    },
    /// Delete an enclosure, releasing its animals and caretakers.
    Delete { id: String },
}
