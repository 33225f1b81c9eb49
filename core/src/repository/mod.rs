pub mod file;
pub mod traits;

pub use file::{FileConfigRepository, FileSessionRepository};
pub use traits::{ConfigRepository, SessionRepository};
