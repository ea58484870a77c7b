//! Python bindings for thongna using PyO3
//!
//! This module exposes the segmenter functions and a tokenizer class to Python.

use pyo3::exceptions::{PyKeyError, PyRuntimeError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::dictionary::Dictionary;
use crate::error::Error;
use crate::token::Token as RustToken;
use crate::tokenizer::{Newmm, Segmenter};

impl From<Error> for PyErr {
    fn from(e: Error) -> Self {
        match e {
            Error::DictionaryNotFound(_) => PyErr::new::<PyKeyError, _>(e.to_string()),
            _ => PyErr::new::<PyRuntimeError, _>(e.to_string()),
        }
    }
}

/// A Python-compatible Token class
#[pyclass(name = "Token")]
#[derive(Clone)]
pub struct PyToken {
    #[pyo3(get)]
    pub text: String,
    #[pyo3(get)]
    pub start: usize,
    #[pyo3(get)]
    pub len: usize,
    #[pyo3(get)]
    pub kind: String,
}

impl From<RustToken> for PyToken {
    fn from(t: RustToken) -> Self {
        PyToken {
            text: t.text,
            start: t.start,
            len: t.len,
            kind: t.kind.as_str().to_string(),
        }
    }
}

#[pymethods]
impl PyToken {
    fn __repr__(&self) -> String {
        format!(
            "Token(text={:?}, start={}, len={}, kind={})",
            self.text, self.start, self.len, self.kind
        )
    }

    fn __str__(&self) -> String {
        self.text.clone()
    }

    /// Check if this token came from the dictionary
    fn is_word(&self) -> bool {
        self.kind == "WORD"
    }

    /// Convert to a Python dict
    fn to_dict<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new_bound(py);
        dict.set_item("text", &self.text)?;
        dict.set_item("start", self.start)?;
        dict.set_item("len", self.len)?;
        dict.set_item("kind", &self.kind)?;
        Ok(dict)
    }
}

/// A tokenizer holding its own dictionary
#[pyclass(name = "Newmm")]
pub struct PyNewmm {
    inner: Newmm,
}

#[pymethods]
impl PyNewmm {
    /// Create a tokenizer from a registered dictionary name, or from a word list
    #[new]
    #[pyo3(signature = (dict_name=None, words=None))]
    fn new(dict_name: Option<&str>, words: Option<Vec<String>>) -> PyResult<Self> {
        let inner = match (dict_name, words) {
            (Some(name), _) => Newmm::from_registry(name)?,
            (None, Some(words)) => Newmm::new(Dictionary::from_words(words)),
            (None, None) => Newmm::new(Dictionary::new()),
        };
        Ok(PyNewmm { inner })
    }

    /// Add a word to this tokenizer only
    fn add_word(&mut self, word: &str) -> bool {
        self.inner.add_words([word]) == 1
    }

    /// Remove a word from this tokenizer only
    fn remove_word(&mut self, word: &str) -> bool {
        self.inner.remove_words([word]) == 1
    }

    /// Tokenize text into Token objects
    #[pyo3(signature = (text, safe=false, parallel=false))]
    fn tokenize(&self, py: Python<'_>, text: &str, safe: bool, parallel: bool) -> PyResult<Vec<PyToken>> {
        let tokens = py.allow_threads(|| self.inner.tokenize(text, safe, parallel))?;
        Ok(tokens.into_iter().map(PyToken::from).collect())
    }

    /// Tokenize text into strings
    #[pyo3(signature = (text, safe=false, parallel=false))]
    fn segment(&self, py: Python<'_>, text: &str, safe: bool, parallel: bool) -> PyResult<Vec<String>> {
        Ok(py.allow_threads(|| self.inner.segment(text, safe, parallel))?)
    }

    fn __len__(&self) -> usize {
        self.inner.dictionary().len()
    }

    fn __repr__(&self) -> String {
        format!("Newmm(words={})", self.inner.dictionary().len())
    }
}

/// Load a dictionary file into the registry
///
/// Args:
///     file_path: Path to a UTF-8 file with one word per line
///     dict_name: Name to register the dictionary under
///
/// Returns:
///     (message, success)
#[pyfunction]
fn load_dict(py: Python<'_>, file_path: &str, dict_name: &str) -> (String, bool) {
    py.allow_threads(|| crate::load_dict(file_path, dict_name))
}

/// Segment text with a registered dictionary
///
/// Returns an empty list for None, non-string or empty text.
/// Raises KeyError if the dictionary is not registered.
#[pyfunction]
#[pyo3(signature = (text, dict_name, safe=false, parallel=false))]
fn newmm(
    py: Python<'_>,
    text: Option<&Bound<'_, PyAny>>,
    dict_name: &str,
    safe: bool,
    parallel: bool,
) -> PyResult<Vec<String>> {
    let Some(text) = text.and_then(|t| t.extract::<String>().ok()) else {
        return Ok(Vec::new());
    };
    Ok(py.allow_threads(|| crate::tokenize(&text, dict_name, safe, parallel))?)
}

/// Normalize Thai text
#[pyfunction]
#[pyo3(signature = (text, whitespace_number=true))]
fn normalize(text: &str, whitespace_number: bool) -> String {
    crate::normalize(text, whitespace_number)
}

/// Reverse text by Unicode code points
#[pyfunction]
fn reverse_text(text: &str) -> String {
    crate::reverse_text(text)
}

/// Split text into Thai Character Clusters
#[pyfunction]
fn clusters(text: &str) -> Vec<String> {
    crate::tcc::cluster_strings(text)
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Create the Python module
#[pymodule]
fn thongna(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyToken>()?;
    m.add_class::<PyNewmm>()?;
    m.add_function(wrap_pyfunction!(load_dict, m)?)?;
    m.add_function(wrap_pyfunction!(newmm, m)?)?;
    m.add_function(wrap_pyfunction!(normalize, m)?)?;
    m.add_function(wrap_pyfunction!(reverse_text, m)?)?;
    m.add_function(wrap_pyfunction!(clusters, m)?)?;

    // Add version
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
