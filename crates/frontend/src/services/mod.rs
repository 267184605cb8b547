//! Backend calls made by pages

pub mod blog;

pub use blog::BlogApiService;
