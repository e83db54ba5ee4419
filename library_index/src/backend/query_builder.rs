//! Tantivy query construction for search text and facet filters.

use std::collections::BTreeSet;

use tantivy::Term;
use tantivy::query::{AllQuery, BooleanQuery, ConstScoreQuery, FuzzyTermQuery, Occur, Query, TermQuery};
use tantivy::schema::{Facet, Field, IndexRecordOption};
use tantivy::tokenizer::{LowerCaser, RemoveLongFilter, SimpleTokenizer, TextAnalyzer, TokenStream};

/// Edit distance allowed per token when exact search is off.
const FUZZY_DISTANCE: u8 = 1;

/// Tokenizes search text the same way tantivy's `default` tokenizer indexes
/// text fields.
pub(crate) fn analyze(text: &str) -> Vec<String> {
    let mut analyzer = TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(RemoveLongFilter::limit(40))
        .filter(LowerCaser)
        .build();
    let mut tokens: Vec<String> = Vec::new();
    let mut stream = analyzer.token_stream(text);
    while let Some(token) = stream.next() {
        if !tokens.contains(&token.text) {
            tokens.push(token.text.clone());
        }
    }
    tokens
}

/// Every token of `text` must match at least one of `fields`.
///
/// Returns `None` for text without tokens, which means "no text restriction".
pub(crate) fn text_query(fields: &[Field], text: &str, exact: bool) -> Option<Box<dyn Query>> {
    let tokens = analyze(text);
    if tokens.is_empty() {
        return None;
    }

    let token_clauses = tokens
        .iter()
        .map(|token| {
            let field_clauses = fields
                .iter()
                .map(|field| {
                    let term = Term::from_field_text(*field, token);
                    let query: Box<dyn Query> = if exact {
                        Box::new(TermQuery::new(term, IndexRecordOption::WithFreqs))
                    } else {
                        Box::new(FuzzyTermQuery::new_prefix(term, FUZZY_DISTANCE, true))
                    };
                    (Occur::Should, query)
                })
                .collect::<Vec<_>>();
            (Occur::Must, Box::new(BooleanQuery::new(field_clauses)) as Box<dyn Query>)
        })
        .collect::<Vec<_>>();

    Some(Box::new(BooleanQuery::new(token_clauses)))
}

/// Restricts to documents carrying the selected options of one facet.
///
/// Filters never contribute to the relevance score.
pub(crate) fn facet_filter(field: Field, options: &BTreeSet<String>, conjunction: bool) -> Option<Box<dyn Query>> {
    if options.is_empty() {
        return None;
    }
    let occur = if conjunction { Occur::Must } else { Occur::Should };
    let clauses = options
        .iter()
        .map(|option| {
            let term = Term::from_facet(field, &facet_path(option));
            (occur, Box::new(TermQuery::new(term, IndexRecordOption::Basic)) as Box<dyn Query>)
        })
        .collect::<Vec<_>>();
    Some(Box::new(ConstScoreQuery::new(Box::new(BooleanQuery::new(clauses)), 0.0)))
}

/// Facet path of a single option key.
pub(crate) fn facet_path(option: &str) -> Facet {
    Facet::from_path([option])
}

/// Conjunction of the given clauses; no clauses matches everything.
pub(crate) fn all_of(clauses: Vec<Box<dyn Query>>) -> Box<dyn Query> {
    if clauses.is_empty() {
        return Box::new(AllQuery);
    }
    Box::new(BooleanQuery::new(clauses.into_iter().map(|q| (Occur::Must, q)).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_lowercases_and_dedups() {
        assert_eq!(analyze("Coral REEF, coral"), vec!["coral".to_string(), "reef".to_string()]);
    }

    #[test]
    fn punctuation_only_text_has_no_query() {
        assert!(text_query(&[], "  -- ", true).is_none());
    }

    #[test]
    fn empty_selection_has_no_filter() {
        let mut builder = tantivy::schema::Schema::builder();
        let field = builder.add_facet_field("Year", tantivy::schema::FacetOptions::default());
        assert!(facet_filter(field, &BTreeSet::new(), true).is_none());
        assert!(facet_filter(field, &BTreeSet::from(["2020".to_string()]), true).is_some());
    }
}
