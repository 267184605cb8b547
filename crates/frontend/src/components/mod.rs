//! Reusable UI components

pub mod layout;
pub mod spinner;

pub use layout::Layout;
pub use spinner::LoadingSpinner;
