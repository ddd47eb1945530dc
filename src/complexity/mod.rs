//! Text-level complexity estimation.
//!
//! Nothing here parses source. The cyclomatic proxy counts decision tokens,
//! the function extractor finds definition-shaped text, and the time/space
//! classifiers walk ordered rule chains over raw text.

pub mod cyclomatic;
pub mod functions;
pub mod patterns;
pub mod signatures;
pub mod space;
pub mod time;

pub use cyclomatic::complexity_proxy;
pub use functions::{extract_function_spans, is_recursive};
pub use signatures::{find_override, SignatureOverride, SIGNATURE_OVERRIDES};
pub use space::classify_space;
pub use time::classify_time;
