use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::TermId;

/// Interns term strings to dense ids assigned in first-seen order.
///
/// The mapping is bijective and stable: once assigned, an id is never reused
/// or renumbered.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermDictionary {
    terms: Vec<String>,
    ids: HashMap<String, TermId>,
}

impl TermDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `term`, assigning the next dense id on first sight.
    pub fn intern(&mut self, term: &str) -> TermId {
        if let Some(&id) = self.ids.get(term) {
            return id;
        }
        let id = self.terms.len() as TermId;
        self.terms.push(term.to_string());
        self.ids.insert(term.to_string(), id);
        id
    }

    pub fn id(&self, term: &str) -> Option<TermId> {
        self.ids.get(term).copied()
    }

    pub fn term(&self, id: TermId) -> Option<&str> {
        self.terms.get(id as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigns_dense_ids_in_first_seen_order() {
        let mut dict = TermDictionary::new();
        assert_eq!(dict.intern("foo"), 0);
        assert_eq!(dict.intern("bar"), 1);
        assert_eq!(dict.intern("foo"), 0);
        assert_eq!(dict.intern("baz"), 2);
        assert_eq!(dict.len(), 3);
    }

    #[test]
    fn id_and_term_are_bijective() {
        let mut dict = TermDictionary::new();
        for word in ["alpha", "beta", "gamma"] {
            let id = dict.intern(word);
            assert_eq!(dict.id(word), Some(id));
            assert_eq!(dict.term(id), Some(word));
        }
    }

    #[test]
    fn unknown_lookups_return_none() {
        let dict = TermDictionary::new();
        assert_eq!(dict.id("ghost"), None);
        assert_eq!(dict.term(0), None);
    }
}
