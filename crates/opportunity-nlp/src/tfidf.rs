//! TF-IDF (Term Frequency - Inverse Document Frequency) document vectors.
//!
//! Builds one sparse, unit-length vector per document over the corpus
//! vocabulary. The vectors feed clustering, and summed vector weights give
//! the keywords of a group of documents.

use std::collections::{BTreeMap, HashMap};

use crate::text::tokenize;

/// Sparse vector as `(column, weight)` pairs sorted by column.
pub type SparseVector = Vec<(usize, f64)>;

/// TF-IDF model fitted on a document corpus.
pub struct TfIdf {
    /// Column -> term, in lexicographic order
    terms: Vec<String>,
    /// Column -> smoothed inverse document frequency
    idf: Vec<f64>,
    /// Document -> normalized TF-IDF vector
    doc_vectors: Vec<SparseVector>,
}

impl TfIdf {
    /// Fit TF-IDF on a corpus of documents.
    pub fn new(documents: &[&str]) -> Self {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|doc| tokenize(doc)).collect();

        // Document frequency, each term counted once per doc
        let mut doc_frequencies: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &tokenized {
            let mut seen: Vec<&str> = tokens.iter().map(String::as_str).collect();
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *doc_frequencies.entry(term).or_insert(0) += 1;
            }
        }

        let n = documents.len() as f64;
        let mut columns: HashMap<&str, usize> = HashMap::with_capacity(doc_frequencies.len());
        let mut terms = Vec::with_capacity(doc_frequencies.len());
        let mut idf = Vec::with_capacity(doc_frequencies.len());
        for (column, (term, df)) in doc_frequencies.iter().enumerate() {
            columns.insert(*term, column);
            terms.push((*term).to_string());
            idf.push(smoothed_idf(n, *df as f64));
        }

        let doc_vectors = tokenized
            .iter()
            .map(|tokens| document_vector(tokens, &columns, &idf))
            .collect();

        Self {
            terms,
            idf,
            doc_vectors,
        }
    }

    /// Normalized vector of a document; empty when it has no vocabulary terms.
    pub fn vector(&self, doc: usize) -> &[(usize, f64)] {
        self.doc_vectors
            .get(doc)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Top N terms of a group of documents.
    ///
    /// Sums the vector weights of the given documents per term and returns
    /// terms sorted by weight (highest first), ties broken alphabetically.
    pub fn top_terms(&self, docs: &[usize], n: usize) -> Vec<(String, f64)> {
        let mut weights: HashMap<usize, f64> = HashMap::new();
        for &doc in docs {
            for &(column, weight) in self.vector(doc) {
                *weights.entry(column).or_insert(0.0) += weight;
            }
        }

        let mut scores: Vec<(String, f64)> = weights
            .into_iter()
            .filter(|(_, weight)| *weight > 0.0)
            .map(|(column, weight)| (self.terms[column].clone(), weight))
            .collect();

        scores.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });

        scores.truncate(n);
        scores
    }

    /// Vocabulary size.
    pub fn dimension(&self) -> usize {
        self.terms.len()
    }

    /// Get document count.
    pub fn doc_count(&self) -> usize {
        self.doc_vectors.len()
    }
}

/// Smoothed IDF: `ln((N + 1) / (df + 1)) + 1`
fn smoothed_idf(n: f64, df: f64) -> f64 {
    ((n + 1.0) / (df + 1.0)).ln() + 1.0
}

/// Build the unit-length TF-IDF vector of one tokenized document.
fn document_vector(tokens: &[String], columns: &HashMap<&str, usize>, idf: &[f64]) -> SparseVector {
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
    for token in tokens {
        if let Some(&column) = columns.get(token.as_str()) {
            *counts.entry(column).or_insert(0) += 1;
        }
    }

    let total = tokens.len() as f64;
    let mut vector: SparseVector = counts
        .into_iter()
        .map(|(column, count)| (column, (count as f64 / total) * idf[column]))
        .collect();

    let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for (_, weight) in vector.iter_mut() {
            *weight /= norm;
        }
    }
    vector
}
