//! Strategies over the reconstructed layout. They only see word tokens, so
//! documents loaded without positions never decide here.

use crate::layout::TitleZone;
use crate::types::FieldValue;

pub fn title_zone(zone: &TitleZone) -> Option<FieldValue> {
    (!zone.title.is_empty()).then(|| FieldValue::Text(zone.title.clone()))
}

pub fn title_zone_price(zone: &TitleZone) -> Option<FieldValue> {
    zone.price.map(FieldValue::Integer)
}

pub fn bounded_description(description: String) -> Option<FieldValue> {
    (!description.is_empty()).then_some(FieldValue::Text(description))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_zone_passes() {
        let zone = TitleZone::default();
        assert_eq!(title_zone(&zone), None);
        assert_eq!(title_zone_price(&zone), None);
    }

    #[test]
    fn zone_price_decides_separately_from_title() {
        let zone = TitleZone {
            title: String::new(),
            price: Some(700),
        };
        assert_eq!(title_zone(&zone), None);
        assert_eq!(title_zone_price(&zone), Some(FieldValue::Integer(700)));
    }
}
