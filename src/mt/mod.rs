/// Machine Translation providers
///
/// The translation pipeline only ever talks to the [`MachineTranslator`]
/// trait. Two implementations ship with the crate:
///
/// 1. **GoogleTranslateProvider** - Google Translate API v2 over `reqwest`
/// 2. **MockTranslator** - deterministic, offline, counts calls; used by tests
///    and by the CLI's `--mock` flag
pub mod error;
pub mod google_translate;
pub mod mock;
pub mod translator;

pub use error::{MtError, MtResult};
pub use google_translate::GoogleTranslateProvider;
pub use mock::{MockMode, MockTranslator};
pub use translator::{MachineTranslator, normalize_locale, validate_locale};
