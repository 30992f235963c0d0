use clap::Subcommand;

use crate::cli::subcommands::{
    AdmitCommands, AnimalCommands, EnclosureCommands, IdentityCommands, KeeperCommands,
    UnassignCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Animals.
    Animal {
        #[command(subcommand)]
        action: AnimalCommands,
    },
    /// Enclosures.
    Enclosure {
        #[command(subcommand)]
        action: EnclosureCommands,
    },
    /// Zookeepers.
    Keeper {
        #[command(subcommand)]
        action: KeeperCommands,
    },
    /// Place an animal or a caretaker in an enclosure.
    Admit {
        #[command(subcommand)]
        action: AdmitCommands,
    },
    /// Undo a caretaker assignment.
    Unassign {
        #[command(subcommand)]
        action: UnassignCommands,
    },
    /// Record number issuance.
    Identity {
        #[command(subcommand)]
        action: IdentityCommands,
    },
}
