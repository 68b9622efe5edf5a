//! External authentication collaborator.
//!
//! The storefront owns sign-in/sign-up; the widget only asks "is there an
//! authenticated session right now" once at startup and attaches the bearer
//! token when one exists. Lookup failures are non-fatal: chat proceeds
//! anonymously.

mod stored;

pub use stored::StoredCredentials;
