// Theme catalog: loads, validates and lists named bingo themes.
// The backing store (local directory or S3 bucket) sits behind `ThemeStore`.

pub mod error;
pub mod handlers;
pub mod loader;
pub mod store;
pub mod theme;

pub use error::CatalogError;
pub use loader::ThemeCatalog;
pub use store::{FsThemeStore, S3ThemeStore, ThemeStore};
pub use theme::{Theme, ThemeSummary};
