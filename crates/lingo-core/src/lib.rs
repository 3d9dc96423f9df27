pub mod catalog;
pub mod error;
pub mod selection;
pub mod session;

pub use catalog::{LanguageCatalog, LanguageSource};
pub use error::{CatalogError, SessionError, ValidationError};
pub use selection::Selection;
pub use session::{Completion, PendingTranslation, Phase, Session, SessionState};
