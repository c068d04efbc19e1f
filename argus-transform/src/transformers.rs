pub mod alias;
pub mod alias_by_tag;
pub mod identity;

pub use alias::Alias;
pub use alias_by_tag::AliasByTag;
pub use identity::Identity;
