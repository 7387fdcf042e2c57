//! Chatbot core - knowledge-base intent matching and response selection
//!
//! This crate normalizes user text, builds a queryable index from a
//! declarative knowledge base, and scores intents against an utterance to
//! pick a response, with a total fallback policy. The surrounding shell
//! (transport, history, external lookups) stays outside this crate.

pub mod command;
pub mod index;
pub mod matcher;
pub mod normalize;
pub mod types;

pub use command::*;
pub use index::*;
pub use matcher::*;
pub use normalize::*;
pub use types::*;

// Python bindings
#[cfg(feature = "extension-module")]
pub mod py;

#[cfg(feature = "extension-module")]
use pyo3::prelude::*;

#[cfg(feature = "extension-module")]
#[pymodule]
fn chatbot_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    use py::*;
    m.add_class::<PyKnowledgeIndex>()?;
    m.add_function(wrap_pyfunction!(py_normalize, m)?)?;
    m.add_function(wrap_pyfunction!(py_parse_command, m)?)?;
    Ok(())
}
