use crate::data::{Catalog, ProductRecord};
use crate::types::SelectionSource;

#[derive(Debug, Clone, Copy)]
pub struct Selection<'a> {
    pub record: &'a ProductRecord,
    pub source: SelectionSource,
}

/// First record whose title contains `query` case-insensitively. Blank
/// queries match nothing.
pub fn search<'a>(catalog: &'a Catalog, query: &str) -> Option<&'a ProductRecord> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    catalog
        .records()
        .iter()
        .find(|record| record.title.to_lowercase().contains(&needle))
}

/// Identifier the search box would push into the product selector.
pub fn search_to_selection(catalog: &Catalog, query: Option<&str>) -> Option<String> {
    query
        .and_then(|q| search(catalog, q))
        .map(|record| record.asin.clone())
}

/// Resolves user input to exactly one record: a known explicit id wins,
/// then the first title match, then the first record in the catalog.
pub fn resolve<'a>(catalog: &'a Catalog, asin: Option<&str>, query: Option<&str>) -> Selection<'a> {
    if let Some(record) = asin.and_then(|id| catalog.get(id.trim())) {
        return Selection {
            record,
            source: SelectionSource::Explicit,
        };
    }

    if let Some(record) = query.and_then(|q| search(catalog, q)) {
        return Selection {
            record,
            source: SelectionSource::Search,
        };
    }

    Selection {
        record: catalog.first(),
        source: SelectionSource::Default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog::fixtures::record;

    fn catalog() -> Catalog {
        let mut kettle = record("K1", "Kettle", Some(30.0));
        kettle.title = "Electric Glass KETTLE 1.7L".to_string();
        let mut blender = record("B1", "Blender", Some(50.0));
        blender.title = "Personal Blender".to_string();
        Catalog::new(vec![blender, kettle]).unwrap()
    }

    #[test]
    fn test_explicit_id_wins_over_search() {
        let catalog = catalog();
        let selection = resolve(&catalog, Some("K1"), Some("blender"));
        assert_eq!(selection.record.asin, "K1");
        assert_eq!(selection.source, SelectionSource::Explicit);
    }

    #[test]
    fn test_unknown_id_falls_back_to_search() {
        let catalog = catalog();
        let selection = resolve(&catalog, Some("nope"), Some("  kettle "));
        assert_eq!(selection.record.asin, "K1");
        assert_eq!(selection.source, SelectionSource::Search);
    }

    #[test]
    fn test_no_match_defaults_to_first() {
        let catalog = catalog();
        let selection = resolve(&catalog, None, Some("toaster"));
        assert_eq!(selection.record.asin, "B1");
        assert_eq!(selection.source, SelectionSource::Default);

        let blank = resolve(&catalog, None, Some("   "));
        assert_eq!(blank.source, SelectionSource::Default);
    }

    #[test]
    fn test_search_to_selection() {
        let catalog = catalog();
        assert_eq!(search_to_selection(&catalog, Some("glass")), Some("K1".to_string()));
        assert_eq!(search_to_selection(&catalog, Some("toaster")), None);
        assert_eq!(search_to_selection(&catalog, None), None);
    }
}
