use clap::Subcommand;

/// Zookeeper record commands.
#[derive(Clone, Debug, Subcommand)]
pub enum KeeperCommands {
    /// Register a zookeeper.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        department: String,
        #[arg(long, default_value = "keeper")]
        rank: String,
        #[arg(long, default_value = "active")]
        status: String,
        /// Cleared to handle dangerous animals.
        #[arg(long)]
        danger_handling: bool,
        #[arg(long)]
        license: Vec<String>,
    },
    /// Get a zookeeper by ID.
    Get { id: String },
    /// List zookeepers.
    List {
        /// Only keepers who can take on enclosures.
        #[arg(long)]
        available: bool,
        #[arg(long)]
        department: Option<String>,
    },
    /// Update a zookeeper's recorded details.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        rank: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        danger_handling: Option<bool>,
        /// Replaces the full license list.
        #[arg(long)]
        license: Option<Vec<String>>,
    },
    /// Delete a zookeeper and their caretaker assignments.
    Delete { id: String },
}
