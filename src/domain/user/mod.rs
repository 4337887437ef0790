//! User domain
//!
//! This module provides domain types and traits for user registration and
//! authentication.

mod entity;
mod repository;

pub use entity::{NewUser, User, UserId};
pub use repository::UserRepository;

#[cfg(test)]
pub use repository::MockUserRepository;
