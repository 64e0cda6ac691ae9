//! HTML views rendered with maud.

pub mod article;
pub mod error;
pub mod home;
pub mod layout;

pub use layout::PageContext;
