//! Python bindings for the chatbot core using PyO3

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::command::{parse_command, Command};
use crate::index::KnowledgeIndex;
use crate::matcher::respond;
use crate::normalize::normalize;

/// Normalize raw text into its canonical comparable form (Python function)
#[pyfunction]
pub fn py_normalize(text: &str) -> String {
    normalize(text)
}

/// Classify a raw input line into a dispatch command (Python function)
#[pyfunction]
pub fn py_parse_command<'py>(py: Python<'py>, input: &str) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    match parse_command(input) {
        Command::BookLookup { title } => {
            dict.set_item("type", "book_lookup")?;
            dict.set_item("title", title)?;
        }
        Command::Exit => {
            dict.set_item("type", "exit")?;
        }
        Command::Utterance(text) => {
            dict.set_item("type", "utterance")?;
            dict.set_item("text", text)?;
        }
    }
    Ok(dict)
}

/// Python wrapper for the immutable knowledge index
#[pyclass]
pub struct PyKnowledgeIndex {
    index: KnowledgeIndex,
}

#[pymethods]
impl PyKnowledgeIndex {
    /// Load and index a JSON knowledge-base file
    #[staticmethod]
    fn load(path: &str) -> PyResult<Self> {
        let index = KnowledgeIndex::from_path(path)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { index })
    }

    /// Build an index from a JSON document string
    #[staticmethod]
    fn from_json(document: &str) -> PyResult<Self> {
        let index = KnowledgeIndex::from_json_str(document)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { index })
    }

    /// Select a response for a user utterance
    fn respond(&self, utterance: &str) -> String {
        respond(utterance, &self.index)
    }

    /// Get number of indexed intents
    fn intent_count(&self) -> usize {
        self.index.len()
    }
}
