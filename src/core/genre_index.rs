//! Genre index for listing books by genre
//!
//! The index is a non-owning view over the record store: it holds ISBNs, in
//! insertion order, grouped by the genre each book had when it was added.

use crate::types::Isbn;
use std::collections::HashMap;

/// Map of genre to the ISBNs filed under it
#[derive(Debug, Default)]
pub struct GenreIndex {
    genres: HashMap<String, Vec<Isbn>>,
}

impl GenreIndex {
    /// Create an empty index
    pub fn new() -> Self {
        GenreIndex {
            genres: HashMap::new(),
        }
    }

    /// File an ISBN at the end of a genre
    pub fn insert(&mut self, genre: &str, isbn: &str) {
        self.genres
            .entry(genre.to_string())
            .or_default()
            .push(isbn.to_string());
    }

    /// Remove an ISBN from a genre
    ///
    /// Genres left empty are dropped so they no longer list.
    pub fn remove(&mut self, genre: &str, isbn: &str) {
        if let Some(isbns) = self.genres.get_mut(genre) {
            isbns.retain(|filed| filed != isbn);
            if isbns.is_empty() {
                self.genres.remove(genre);
            }
        }
    }

    /// ISBNs filed under a genre, in insertion order
    pub fn isbns(&self, genre: &str) -> &[Isbn] {
        self.genres.get(genre).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of non-empty genres
    pub fn genre_count(&self) -> usize {
        self.genres.len()
    }
}
