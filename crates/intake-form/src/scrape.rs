//! Ambient form-state scraping.
//!
//! The portal is an ASP.NET application that threads hidden state
//! (view-state tokens, interface markers) through every page. Each
//! response must be scraped for the current value of every form input so
//! the next POST can echo them back.

use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;

/// Extract a field name -> current value map from an HTML document.
///
/// Covers all `select`, `input`, and `textarea` elements that carry a
/// `name` attribute; nameless elements are skipped. The current value is
/// the selected option for selects (falling back to the first option),
/// the `value` attribute for inputs, and the text content for textareas.
#[must_use]
pub fn extract_fields(html: &str) -> BTreeMap<String, String> {
    let document = Html::parse_document(html);
    let inputs = Selector::parse("select, input, textarea").expect("valid selector");
    let options = Selector::parse("option").expect("valid selector");

    let mut fields = BTreeMap::new();

    for element in document.select(&inputs) {
        let Some(name) = element.value().attr("name") else {
            continue;
        };

        let value = match element.value().name() {
            "select" => select_value(element, &options),
            "textarea" => element.text().collect::<String>().trim().to_string(),
            _ => element.value().attr("value").unwrap_or_default().to_string(),
        };

        fields.insert(name.to_string(), value);
    }

    fields
}

fn select_value(select: ElementRef<'_>, options: &Selector) -> String {
    let mut first = None;

    for option in select.select(options) {
        if option.value().attr("selected").is_some() {
            return option_value(option);
        }
        if first.is_none() {
            first = Some(option);
        }
    }

    first.map(option_value).unwrap_or_default()
}

fn option_value(option: ElementRef<'_>) -> String {
    option.value().attr("value").map_or_else(
        || option.text().collect::<String>().trim().to_string(),
        ToString::to_string,
    )
}
