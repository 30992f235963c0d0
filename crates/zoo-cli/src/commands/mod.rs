pub mod admit;
pub mod animal;
pub mod dispatch;
pub mod enclosure;
pub mod identity;
pub mod keeper;
pub mod shared;
pub mod unassign;
