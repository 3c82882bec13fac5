pub mod deriver;
pub mod error;
pub mod filter;
pub mod logging;
pub mod parser;
pub mod registry;
pub mod source;

pub use deriver::{derive, working_string, MasterPassword};
pub use error::{Error, Result};
pub use filter::{apply_chain, Filter};
pub use logging::{init_logging, Verbosity};
pub use parser::{parse_directive, parse_filter, Directive};
pub use registry::{build_registry, Site, SiteRegistry};
pub use source::{load_master_password, load_sites};
