use super::{static_selector::StaticSelector, Error};
use scraper::ElementRef;

/// Trimmed text of the first element matching `selector` inside `element`.
///
/// Fails only when nothing matches; a present but empty element gives `""`.
pub(super) fn text_from_selection(
    selector: &StaticSelector<'_>,
    element: ElementRef<'_>,
    parent_label: &str,
    child_label: &str,
) -> Result<String, Error> {
    let child = selector.first_in(element).ok_or_else(|| {
        Error::HtmlParse(format!(
            "Every {parent_label} element should have a {child_label} ({}).",
            selector.source()
        ))
    })?;
    Ok(get_inner_text(child))
}

/// Every text node below `element`, joined, with the ends trimmed. Inner spacing is kept.
fn get_inner_text(element: ElementRef<'_>) -> String {
    let joined: String = element.text().collect();
    joined.trim().to_owned()
}
