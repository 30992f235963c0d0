use clap::Subcommand;

/// Admission commands. IDs left out are chosen interactively.
#[derive(Clone, Debug, Subcommand)]
pub enum AdmitCommands {
    /// Move an unassigned animal into an enclosure.
    Animal {
        #[arg(long)]
        enclosure: Option<String>,
        #[arg(long)]
        animal: Option<String>,
    },
    /// Make an active keeper a caretaker of an enclosure.
    Keeper {
        #[arg(long)]
        enclosure: Option<String>,
        #[arg(long)]
        keeper: Option<String>,
    },
}
