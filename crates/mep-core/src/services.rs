//! Services data model
//!
//! The site reads one static JSON document with two arrays: `homeServices`
//! feeds the home-page carousel, `servicesPage` feeds the listing page. No
//! schema validation is done: absent or `null` fields degrade to empty text
//! and a fallback icon, numbers and booleans are shown as text, and an entry
//! that is not an object becomes an empty card. Only a broken document or a
//! missing top-level key empties a section.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::Error;
use crate::result::{Result, ResultExt};

/// Icon used when an item does not name one.
pub const FALLBACK_ICON: &str = "fa-solid fa-layer-group";
/// Where every home card's "Read More" link points.
pub const READ_MORE_HREF: &str = "services.html";

/// One entry of either services array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceItem {
    #[serde(deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(deserialize_with = "lenient_text")]
    pub home_page_description: String,
    #[serde(deserialize_with = "lenient_optional_text")]
    pub icon: Option<String>,
    #[serde(deserialize_with = "lenient_optional_text")]
    pub image: Option<String>,
}

/// The whole services document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicesDocument {
    #[serde(default, deserialize_with = "lenient_items")]
    pub home_services: Option<Vec<ServiceItem>>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub services_page: Option<Vec<ServiceItem>>,
}

/// Scalars as the page would print them; `null` and containers have no text.
fn text_of(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<String, D::Error> {
    Ok(text_of(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_optional_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    Ok(text_of(Value::deserialize(deserializer)?))
}

/// One malformed entry degrades to an empty item instead of failing the array.
fn lenient_items<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<Vec<ServiceItem>>, D::Error> {
    let items = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(items.map(|items| {
        items
            .into_iter()
            .map(|item| ServiceItem::deserialize(item).unwrap_or_default())
            .collect()
    }))
}

impl ServicesDocument {
    /// Parses a response body.
    ///
    /// # Errors
    ///
    /// Returns `Error::JsonParseFailed` if the body is not a JSON object of the
    /// expected shape.
    pub fn from_json_str(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// # Errors
    ///
    /// Returns `Error::MissingKey` if the document has no `homeServices` array.
    pub fn home_services(&self) -> Result<&[ServiceItem]> {
        self.home_services
            .as_deref()
            .ok_or_else(|| Error::missing_key("homeServices"))
    }

    /// # Errors
    ///
    /// Returns `Error::MissingKey` if the document has no `servicesPage` array.
    pub fn services_page(&self) -> Result<&[ServiceItem]> {
        self.services_page
            .as_deref()
            .ok_or_else(|| Error::missing_key("servicesPage"))
    }
}

/// A home-page carousel card, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeCard {
    pub title: String,
    pub description: String,
    pub icon: String,
    pub href: &'static str,
}

impl From<&ServiceItem> for HomeCard {
    fn from(item: &ServiceItem) -> Self {
        let icon = item
            .icon
            .as_deref()
            .filter(|icon| !icon.trim().is_empty())
            .unwrap_or(FALLBACK_ICON)
            .to_string();

        Self {
            title: item.title.clone(),
            description: item.home_page_description.clone(),
            icon,
            href: READ_MORE_HREF,
        }
    }
}

/// A pagination dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dot {
    pub index: usize,
    pub active: bool,
}

/// Everything the home services section renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeSection {
    pub cards: Vec<HomeCard>,
    pub dots: Vec<Dot>,
}

impl HomeSection {
    /// Builds cards and dots; dot 0 starts active.
    #[must_use]
    pub fn from_items(items: &[ServiceItem]) -> Self {
        let cards: Vec<HomeCard> = items.iter().map(HomeCard::from).collect();
        let dots = (0..cards.len())
            .map(|index| Dot {
                index,
                active: index == 0,
            })
            .collect();
        Self { cards, dots }
    }

    /// Turns a fetch outcome into the section to render.
    ///
    /// Any failure is logged and yields an empty section, which leaves the
    /// carousel uninitialized.
    #[must_use]
    pub fn from_fetch(outcome: Result<String>) -> Self {
        outcome
            .and_then(|body| ServicesDocument::from_json_str(&body))
            .and_then(|doc| doc.home_services().map(Self::from_items))
            .into_option_logged("Home Services Load Error")
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }
}

/// Background tint of a listing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardTint {
    Pink,
    Purple,
}

impl CardTint {
    /// Every third card is purple.
    #[must_use]
    pub const fn for_index(index: usize) -> Self {
        if index % 3 == 2 { Self::Purple } else { Self::Pink }
    }

    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Pink => "srv-bg-pink",
            Self::Purple => "srv-bg-purple",
        }
    }
}

/// A services listing card, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingCard {
    pub title: String,
    pub description: String,
    pub image: String,
    pub tint: CardTint,
}

impl ListingCard {
    #[must_use]
    pub fn from_item(index: usize, item: &ServiceItem) -> Self {
        Self {
            title: item.title.clone(),
            description: item.description.clone(),
            image: item.image.clone().unwrap_or_default(),
            tint: CardTint::for_index(index),
        }
    }

    /// `srv-card srv-bg-*`
    #[must_use]
    pub fn class(&self) -> String {
        format!("srv-card {}", self.tint.class())
    }
}

/// Cards of the services listing page.
///
/// # Errors
///
/// Returns the fetch error, a parse error, or `Error::MissingKey` for
/// `servicesPage`.
pub fn listing_cards(outcome: Result<String>) -> Result<Vec<ListingCard>> {
    let doc = ServicesDocument::from_json_str(&outcome?)?;
    Ok(doc
        .services_page()?
        .iter()
        .enumerate()
        .map(|(index, item)| ListingCard::from_item(index, item))
        .collect())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    #[test]
    fn test_missing_fields_degrade() {
        let doc = ServicesDocument::from_json_str(r#"{"homeServices":[{}]}"#).unwrap();
        let section = HomeSection::from_items(doc.home_services().unwrap());
        assert_eq!(section.cards[0].icon, FALLBACK_ICON);
        assert_eq!(section.cards[0].title, "");
        assert_eq!(section.cards[0].description, "");
    }

    #[test]
    fn test_null_field_only_degrades_its_own_card() {
        let body = r#"{"homeServices":[
            {"title":"A","homePageDescription":"d1"},
            {"title":"B","homePageDescription":null}
        ]}"#;
        let section = HomeSection::from_fetch(Ok(body.to_string()));
        assert_eq!(section.len(), 2);
        assert_eq!(section.dots.len(), 2);
        assert_eq!(section.cards[0].description, "d1");
        assert_eq!(section.cards[1].title, "B");
        assert_eq!(section.cards[1].description, "");
    }

    #[test]
    fn test_scalar_fields_render_as_text() {
        let body = r#"{"homeServices":[{"title":7,"homePageDescription":true,"icon":null}]}"#;
        let section = HomeSection::from_fetch(Ok(body.to_string()));
        assert_eq!(section.len(), 1);
        assert_eq!(section.cards[0].title, "7");
        assert_eq!(section.cards[0].description, "true");
        assert_eq!(section.cards[0].icon, FALLBACK_ICON);
    }

    #[test]
    fn test_non_object_entry_becomes_empty_card() {
        let body = r#"{"servicesPage":[null,{"title":"Web","image":["x"]}]}"#;
        let cards = listing_cards(Ok(body.to_string())).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].title, "");
        assert_eq!(cards[1].title, "Web");
        assert_eq!(cards[1].image, "");
    }

    #[test]
    fn test_null_array_is_a_missing_key() {
        let doc = ServicesDocument::from_json_str(r#"{"homeServices":null}"#).unwrap();
        assert_eq!(
            doc.home_services().err(),
            Some(Error::missing_key("homeServices"))
        );
    }

    #[test]
    fn test_icon_kept_when_present() {
        let item = ServiceItem {
            icon: Some("fa-solid fa-code".to_string()),
            ..ServiceItem::default()
        };
        assert_eq!(HomeCard::from(&item).icon, "fa-solid fa-code");
    }

    #[test]
    fn test_missing_home_key_reported() {
        let doc = ServicesDocument::from_json_str(r#"{"servicesPage":[]}"#).unwrap();
        assert_eq!(
            doc.home_services().err(),
            Some(Error::missing_key("homeServices"))
        );
    }

    #[test]
    fn test_malformed_json_yields_empty_section() {
        let section = HomeSection::from_fetch(Ok("not json".to_string()));
        assert!(section.is_empty());
        assert!(section.dots.is_empty());
    }

    #[test]
    fn test_tint_every_third_card() {
        let tints: Vec<CardTint> = (0..6).map(CardTint::for_index).collect();
        assert_eq!(
            tints,
            vec![
                CardTint::Pink,
                CardTint::Pink,
                CardTint::Purple,
                CardTint::Pink,
                CardTint::Pink,
                CardTint::Purple,
            ]
        );
    }

    #[test]
    fn test_listing_cards() {
        let body = r#"{"servicesPage":[
            {"title":"Web","description":"Sites","image":"img/web.png"},
            {"title":"Apps","description":"Mobile"}
        ]}"#;
        let cards = listing_cards(Ok(body.to_string())).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].image, "img/web.png");
        assert_eq!(cards[1].image, "");
        assert_eq!(cards[0].class(), "srv-card srv-bg-pink");
    }

    #[test]
    fn test_listing_missing_key() {
        let err = listing_cards(Ok(r#"{"homeServices":[]}"#.to_string())).err();
        assert_eq!(err, Some(Error::missing_key("servicesPage")));
    }
}
