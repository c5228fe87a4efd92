pub mod registrant;

pub use registrant::Entity as Registrant;
