use crate::parse::text_from_selection::text_from_selection;
use crate::parse::Error;
use crate::static_selector;

/// One restaurant card as it appears on a listing page.
///
/// Every field is kept as displayed; numeric coercion happens later in the table.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Record {
    name: String,
    cuisine: String,
    rating: String,
    delivery_time: String,
}

impl Record {
    #[cfg(test)]
    pub fn new(
        name: impl Into<String>,
        cuisine: impl Into<String>,
        rating: impl Into<String>,
        delivery_time: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            cuisine: cuisine.into(),
            rating: rating.into(),
            delivery_time: delivery_time.into(),
        }
    }

    pub fn from_html_element(element: scraper::ElementRef<'_>) -> Result<Self, Error> {
        // example html div element at ./html_examples/listing_page/restaurant_card.html
        static_selector!(NAME_SELECTOR <- "h3.restaurant-name");
        static_selector!(CUISINE_SELECTOR <- "p.cuisine");
        static_selector!(RATING_SELECTOR <- "span.rating");
        static_selector!(DELIVERY_TIME_SELECTOR <- "span.delivery-time");

        let name = text_from_selection(&NAME_SELECTOR, element, "restaurant", "name")?;
        let cuisine = text_from_selection(&CUISINE_SELECTOR, element, "restaurant", "cuisine")?;
        let rating = text_from_selection(&RATING_SELECTOR, element, "restaurant", "rating")?;
        let delivery_time = text_from_selection(
            &DELIVERY_TIME_SELECTOR,
            element,
            "restaurant",
            "delivery time",
        )?;

        Ok(Self {
            name,
            cuisine,
            rating,
            delivery_time,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cuisine(&self) -> &str {
        &self.cuisine
    }

    pub fn rating(&self) -> &str {
        &self.rating
    }

    pub fn delivery_time(&self) -> &str {
        &self.delivery_time
    }
}
