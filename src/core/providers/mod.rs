//! Backend implementations

pub mod hosted;
pub mod lexicon;

pub use hosted::HostedInference;
pub use lexicon::{LexiconClassifier, PassthroughGenerator};
