use clap::Subcommand;

/// Animal record commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AnimalCommands {
    /// Register an animal. It starts without an enclosure.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        species: String,
        #[arg(long)]
        age: u8,
        #[arg(long, default_value = "unknown")]
        gender: String,
        #[arg(long, default_value = "healthy")]
        health: String,
    },
    /// Get an animal by ID.
    Get { id: String },
    /// List animals.
    List {
        /// Only animals without an enclosure.
        #[arg(long)]
        available: bool,
        #[arg(long)]
        species: Option<String>,
    },
    /// Update an animal's recorded details.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        age: Option<u8>,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        health: Option<String>,
    },
    /// Delete an animal.
    Delete { id: String },
    /// Take an animal out of its enclosure.
    Release { id: String },
}
