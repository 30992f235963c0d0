use clap::Subcommand;

#[derive(Clone, Debug, Subcommand)]
pub enum IdentityCommands {
    /// Issue the next record number for a kind (animal, enclosure, keeper, visitor, finance).
    Issue { kind: String },
}
