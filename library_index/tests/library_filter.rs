use common::document::Document;
use common::search_const::PAGE_SIZE;
use library_index::{Error, LibraryFilter};
use proptest::prelude::*;

fn study(title: &str, year: i64) -> Document {
    Document::new().with("Title", title).with("Year", year)
}

fn titles(filter: &LibraryFilter) -> Vec<String> {
    filter.results().titles().into_iter().map(str::to_string).collect()
}

#[test]
fn newest_first_then_title() {
    let mut filter = LibraryFilter::new();
    let page = filter
        .load_documents(vec![study("C Study", 2019), study("B Study", 2020), study("A Study", 2020)])
        .unwrap();
    assert_eq!(page.titles(), vec!["A Study", "B Study", "C Study"]);
}

#[test]
fn numeric_titles_order_lexicographically_within_a_year() {
    let mut filter = LibraryFilter::new();
    let page = filter
        .load_documents(vec![
            study("2020 Reef Outlook", 2020),
            study("10 years of seagrass", 2020),
            study("9", 2020),
            study("10", 2020),
            study("Mudflats", 2021),
        ])
        .unwrap();
    assert_eq!(page.titles(), vec!["Mudflats", "10", "10 years of seagrass", "2020 Reef Outlook", "9"]);
}

#[test]
fn undated_documents_come_after_dated_ones() {
    let mut filter = LibraryFilter::new();
    let page = filter
        .load_documents(vec![
            Document::new().with("Title", "Undated").with("Year", "n.d."),
            study("Dated", 2020),
            Document::new().with("Title", "No year"),
        ])
        .unwrap();
    assert_eq!(page.titles(), vec!["Dated", "No year", "Undated"]);
}

#[test]
fn empty_collection_gives_empty_result() {
    let mut filter = LibraryFilter::new();
    let page = filter.load_documents(Vec::new()).unwrap();
    assert!(page.is_empty());
    assert_eq!(page.pagination.total, 0);
    assert!(filter.is_loaded());
}

#[test]
fn loading_twice_gives_the_same_result() {
    let docs = vec![study("Wetland birds", 2011), study("Reef fish", 2014), study("Saltmarsh", 2014)];
    let mut filter = LibraryFilter::new();
    let first = filter.load_documents(docs.clone()).unwrap().clone();
    let second = filter.load_documents(docs).unwrap();
    assert_eq!(&first, second);
}

#[test]
fn new_load_replaces_old_collection() {
    let mut filter = LibraryFilter::new();
    filter.load_documents(vec![study("Old survey", 1999), study("Older survey", 1990)]).unwrap();
    filter.load_documents(vec![study("New survey", 2024)]).unwrap();
    assert_eq!(titles(&filter), vec!["New survey"]);
    assert_eq!(filter.results().pagination.total, 1);
    assert!(filter.search("old").unwrap().is_empty());
}

#[test]
fn first_page_is_capped() {
    let docs = (0..250).map(|i| study(&format!("Report {i:03}"), 2000 + i % 20)).collect::<Vec<_>>();
    let mut filter = LibraryFilter::new();
    let page = filter.load_documents(docs).unwrap();
    assert_eq!(page.items.len(), PAGE_SIZE);
    assert_eq!(page.pagination.total, 250);
    assert_eq!(page.pagination.page_count(), 3);

    let last = filter.go_to_page(3).unwrap();
    assert_eq!(last.items.len(), 50);
}

#[test]
fn clearing_last_option_restores_unfiltered_result() {
    let docs = vec![
        study("Wetland birds", 2011).with("Category", "Report"),
        study("Reef fish", 2014).with("Category", "Thesis"),
    ];
    let mut filter = LibraryFilter::new();
    let unfiltered = filter.load_documents(docs).unwrap().clone();

    filter.select_option("Category", "Thesis").unwrap();
    assert_eq!(titles(&filter), vec!["Reef fish"]);

    let page = filter.clear_filter_option("Category", "Thesis").unwrap();
    assert_eq!(page, &unfiltered);
    assert!(!filter.filters().contains_key("Category"));
}

#[test]
fn operations_before_load_fail() {
    let mut filter = LibraryFilter::new();
    assert!(matches!(filter.reset_filters(), Err(Error::NotLoaded)));
    assert!(matches!(filter.clear_filter_option("Year", "2020"), Err(Error::NotLoaded)));
    assert!(matches!(filter.go_to_page(2), Err(Error::NotLoaded)));
}

fn arb_collection() -> impl Strategy<Value = Vec<(String, i64)>> {
    prop::collection::vec(("[0-9A-Za-z ]{1,12}", 1950i64..2030), 0..160)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn first_page_is_a_sorted_subset(entries in arb_collection()) {
        let docs = entries.iter().map(|(t, y)| study(t, *y)).collect::<Vec<_>>();
        let mut filter = LibraryFilter::new();
        let page = filter.load_documents(docs.clone()).unwrap();

        prop_assert!(page.items.len() <= PAGE_SIZE);
        prop_assert_eq!(page.items.len(), docs.len().min(PAGE_SIZE));
        prop_assert_eq!(page.pagination.total, docs.len());
        for item in &page.items {
            prop_assert!(docs.contains(item));
        }
        for pair in page.items.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.year() > b.year() || (a.year() == b.year() && a.title().unwrap_or("") <= b.title().unwrap_or("")));
        }
    }
}
