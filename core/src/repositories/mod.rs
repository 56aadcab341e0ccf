pub mod blacklist;
pub mod user;

pub use blacklist::TokenBlacklistRepository;
pub use user::UserRepository;

#[cfg(test)]
pub use blacklist::MockTokenBlacklistRepository;
#[cfg(test)]
pub use user::MockUserRepository;
