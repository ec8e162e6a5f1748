mod user;
pub use user::{AuthorizedUser, CredentialRecord, NewUser, User};

pub trait Identifiable<Id> {
    fn id(&self) -> Id;
}
