//! Option resolution: merges JSON-declared flags with the command line.

pub mod loader;
pub mod queue;
pub mod resolver;
pub mod scan;
pub mod table;

pub use loader::JsonSource;
pub use queue::{FlagQueue, PendingFlag};
pub use resolver::{Code, OptionResolver, Resolved, ResolvedOption, State};
pub use scan::ArgScanner;
pub use table::{Arity, OptionId, OptionSpec, OptionTable};
