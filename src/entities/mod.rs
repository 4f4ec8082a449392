pub mod donation;
pub mod member;

pub use donation::Entity as Donation;
pub use member::Entity as Member;
