use clap::Subcommand;

#[derive(Clone, Debug, Subcommand)]
pub enum UnassignCommands {
    /// Remove a keeper from an enclosure's caretakers.
    Keeper {
        #[arg(long)]
        enclosure: String,
        #[arg(long)]
        keeper: String,
    },
}
