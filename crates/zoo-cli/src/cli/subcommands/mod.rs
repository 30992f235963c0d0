mod admit;
mod animal;
mod enclosure;
mod identity;
mod keeper;
mod unassign;

pub use admit::AdmitCommands;
pub use animal::AnimalCommands;
pub use enclosure::EnclosureCommands;
pub use identity::IdentityCommands;
pub use keeper::KeeperCommands;
pub use unassign::UnassignCommands;
