//! Field extraction from fetched markup
//!
//! This module applies the job's selector rules to one page's content,
//! producing a [`PageRecord`], and locates the next-page anchor. Parsing is
//! synchronous and works on an already-built [`Html`] document; the walker
//! parses each page once, extracts everything it needs, and drops the
//! document before its next await point (`Html` is not `Send`).

use crate::config::SelectorRules;
use scraper::{Html, Selector};
use std::collections::BTreeMap;
use tracing::trace;

/// One page's extracted data
///
/// Maps each field name to the texts of its matching elements, preserving
/// document order within a field. Every rule's field is present, with an
/// empty list when nothing matched; the exporter relies on this to pair
/// columns by index without a missing-key case.
#[derive(Debug, Clone, Default)]
pub struct PageRecord {
    /// URL the page was fetched from
    pub url: String,

    fields: BTreeMap<String, Vec<String>>,
}

impl PageRecord {
    /// Creates an empty record for a page
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Values extracted for a field
    ///
    /// Returns an empty slice both for a field that matched nothing and for
    /// a name that was never in the rule set.
    pub fn values(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Field names present in this record, in sorted order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Replaces the value list for a field
    pub fn set(&mut self, field: impl Into<String>, values: Vec<String>) {
        self.fields.insert(field.into(), values);
    }

    /// True when no field extracted any value
    pub fn is_empty(&self) -> bool {
        self.fields.values().all(Vec::is_empty)
    }
}

/// Applies every rule to a parsed document, producing one record
///
/// Rules are independent: each appends only to its own field's list, so
/// application order never changes the result. Match text is the
/// concatenation of the element's text nodes, kept verbatim with no
/// whitespace normalization.
///
/// # Arguments
///
/// * `document` - The parsed page
/// * `rules` - The job's field-selector rules
/// * `url` - Source URL recorded on the result
pub fn extract_record(document: &Html, rules: &SelectorRules, url: &str) -> PageRecord {
    let mut record = PageRecord::new(url);

    for rule in rules.iter() {
        let values: Vec<String> = document
            .select(&rule.selector)
            .map(|element| element.text().collect::<String>())
            .collect();

        trace!(
            "Field '{}' ({}) matched {} element(s) on {}",
            rule.name,
            rule.expression,
            values.len(),
            url
        );

        record.set(rule.name.clone(), values);
    }

    record
}

/// Locates the next-page link target on a document
///
/// Reads the `href` of the first element matching the pagination anchor
/// selector. A missing attribute and an empty value both mean there is no
/// next page. The href is returned verbatim; the walker fetches it as-is.
pub fn find_next_href(document: &Html, next_selector: &Selector) -> Option<String> {
    document
        .select(next_selector)
        .next()
        .and_then(|element| element.value().attr("href"))
        .filter(|href| !href.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_selector_rules;

    fn parse(html: &str) -> Html {
        Html::parse_document(html)
    }

    fn selector(expression: &str) -> Selector {
        Selector::parse(expression).unwrap()
    }

    #[test]
    fn test_extract_record_collects_matches_in_document_order() {
        let document = parse(
            r#"<html><body>
                <span class="t">A</span><span class="p">1</span>
                <span class="t">B</span><span class="p">2</span>
            </body></html>"#,
        );
        let rules = parse_selector_rules("title=.t,price=.p").unwrap();

        let record = extract_record(&document, &rules, "http://x/p1");

        assert_eq!(record.url, "http://x/p1");
        assert_eq!(record.values("title"), ["A", "B"]);
        assert_eq!(record.values("price"), ["1", "2"]);
    }

    #[test]
    fn test_extract_record_absent_match_yields_empty_list() {
        let document = parse("<html><body><span class='t'>A</span></body></html>");
        let rules = parse_selector_rules("title=.t,price=.p").unwrap();

        let record = extract_record(&document, &rules, "http://x/p1");

        assert_eq!(record.values("title"), ["A"]);
        assert!(record.values("price").is_empty());
        // The field is present even without matches
        assert!(record.field_names().any(|name| name == "price"));
    }

    #[test]
    fn test_extract_record_concatenates_nested_text() {
        let document =
            parse("<html><body><h3><a>Light <em>in</em> the Attic</a></h3></body></html>");
        let rules = parse_selector_rules("title=h3 a").unwrap();

        let record = extract_record(&document, &rules, "http://x/p1");

        assert_eq!(record.values("title"), ["Light in the Attic"]);
    }

    #[test]
    fn test_extract_record_rule_order_does_not_matter() {
        let html = r#"<html><body>
            <span class="t">A</span><span class="p">1</span>
        </body></html>"#;
        let document = parse(html);

        let forward = extract_record(
            &document,
            &parse_selector_rules("title=.t,price=.p").unwrap(),
            "http://x/p1",
        );
        let reversed = extract_record(
            &document,
            &parse_selector_rules("price=.p,title=.t").unwrap(),
            "http://x/p1",
        );

        assert_eq!(forward.values("title"), reversed.values("title"));
        assert_eq!(forward.values("price"), reversed.values("price"));
    }

    #[test]
    fn test_extract_record_on_malformed_markup_still_extracts() {
        // html5ever error-corrects, so extraction proceeds on broken input
        let document = parse("<div><span class='t'>A<div></span></html >");
        let rules = parse_selector_rules("title=.t").unwrap();

        let record = extract_record(&document, &rules, "http://x/p1");

        assert_eq!(record.values("title").len(), 1);
        assert!(record.values("title")[0].contains('A'));
    }

    #[test]
    fn test_values_for_unknown_field_is_empty_slice() {
        let record = PageRecord::new("http://x/p1");
        assert!(record.values("anything").is_empty());
        assert!(record.is_empty());
    }

    #[test]
    fn test_find_next_href_present() {
        let document = parse(r#"<html><body><a class="next" href="p2">next</a></body></html>"#);
        assert_eq!(
            find_next_href(&document, &selector("a.next")),
            Some("p2".to_string())
        );
    }

    #[test]
    fn test_find_next_href_takes_first_match() {
        let document = parse(
            r#"<html><body>
                <a class="next" href="p2">next</a>
                <a class="next" href="p3">later</a>
            </body></html>"#,
        );
        assert_eq!(
            find_next_href(&document, &selector("a.next")),
            Some("p2".to_string())
        );
    }

    #[test]
    fn test_find_next_href_absent_anchor() {
        let document = parse("<html><body><p>no pagination here</p></body></html>");
        assert_eq!(find_next_href(&document, &selector("a.next")), None);
    }

    #[test]
    fn test_find_next_href_missing_attribute() {
        let document = parse(r#"<html><body><a class="next">next</a></body></html>"#);
        assert_eq!(find_next_href(&document, &selector("a.next")), None);
    }

    #[test]
    fn test_find_next_href_empty_attribute() {
        let document = parse(r#"<html><body><a class="next" href="">next</a></body></html>"#);
        assert_eq!(find_next_href(&document, &selector("a.next")), None);
    }

    #[test]
    fn test_find_next_href_keeps_relative_href_verbatim() {
        let document = parse(
            r#"<html><body><a class="next" href="catalogue/page-2.html">next</a></body></html>"#,
        );
        assert_eq!(
            find_next_href(&document, &selector("a.next")),
            Some("catalogue/page-2.html".to_string())
        );
    }
}
