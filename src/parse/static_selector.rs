use std::sync::OnceLock;

use scraper::{ElementRef, Selector};

/// A css selector for one fixed piece of a listing page, parsed on first use.
#[derive(Debug)]
pub(super) struct StaticSelector<'a> {
    cell: OnceLock<Selector>,
    selector: &'a str,
}

impl<'a> StaticSelector<'a> {
    pub(super) const fn new(selector: &'a str) -> Self {
        Self {
            cell: OnceLock::new(),
            selector,
        }
    }

    /// The css this selector was declared with, for error messages.
    pub(super) const fn source(&self) -> &'a str {
        self.selector
    }

    /// First match below `element` in document order.
    pub(super) fn first_in<'b>(&self, element: ElementRef<'b>) -> Option<ElementRef<'b>> {
        element.select(self).next()
    }
}

impl core::ops::Deref for StaticSelector<'_> {
    type Target = Selector;

    fn deref(&self) -> &Self::Target {
        self.cell.get_or_init(|| match Selector::parse(self.selector) {
            Ok(sel) => sel,
            Err(e) => panic!("css selector `{}` does not parse: {e:?}", self.selector),
        })
    }
}

#[macro_export]
macro_rules! static_selector {
    ($x: ident <- $sel: literal) => {
        static $x: $crate::parse::static_selector::StaticSelector =
            $crate::parse::static_selector::StaticSelector::new($sel);
    };
}
