use crate::error::{ListingError, Result};
use crate::types::*;
use quick_xml::events::{BytesDecl, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

/// Output formats understood by [`Extraction::save_with_format`]
pub const OUTPUT_FORMATS: &[&str] = &["xml", "json"];

impl ListingRecord {
    /// `<Listing>` document with one child per field in schema order
    pub fn to_xml_string(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        writer
            .create_element("Listing")
            .write_inner_content(|w| {
                for field in ListingField::ALL {
                    let value = self.display_value(field);
                    w.create_element(field.element_name())
                        .write_text_content(BytesText::new(&value))?;
                }
                Ok::<(), quick_xml::Error>(())
            })?;

        // Every event above was written from &str
        let bytes = writer.into_inner().into_inner();
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl Extraction {
    /// Record plus provenance as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save_with_format(&self, path: &str, format: &str) -> Result<()> {
        match format {
            "json" => {
                std::fs::write(path, self.to_json()?)?;
            }
            "xml" => {
                std::fs::write(path, self.record.to_xml_string()?)?;
            }
            other => {
                return Err(ListingError::UnsupportedFormat(format!(
                    "output format '{other}' (expected one of: {})",
                    OUTPUT_FORMATS.join(", ")
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::Reader;
    use std::collections::BTreeMap;

    /// Element name -> text for every child of the root
    fn read_children(xml: &str) -> (String, Vec<String>, BTreeMap<String, String>) {
        let mut reader = Reader::from_str(xml);
        let mut root = String::new();
        let mut order = Vec::new();
        let mut values = BTreeMap::new();
        let mut current: Option<String> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    let name = String::from_utf8(e.name().as_ref().to_vec()).unwrap();
                    if root.is_empty() {
                        root = name;
                    } else {
                        order.push(name.clone());
                        values.insert(name.clone(), String::new());
                        current = Some(name);
                    }
                }
                Ok(Event::Text(e)) => {
                    if let Some(name) = &current {
                        values.insert(name.clone(), e.unescape().unwrap().into_owned());
                    }
                }
                Ok(Event::End(_)) => current = None,
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => panic!("invalid xml: {e}"),
            }
        }
        (root, order, values)
    }

    fn sample() -> ListingRecord {
        ListingRecord {
            title: "Harbour loft".to_string(),
            amenities: vec!["TV".to_string(), "Iron".to_string()],
            property_type: "Bed & Breakfast".to_string(),
            external_links: vec!["https://a.example".to_string(), "https://b.example".to_string()],
            price_per_night: Some(125),
            ..ListingRecord::default()
        }
    }

    #[test]
    fn xml_has_declaration_and_listing_root() {
        let xml = sample().to_xml_string().unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        let (root, _, _) = read_children(&xml);
        assert_eq!(root, "Listing");
    }

    #[test]
    fn xml_children_follow_schema_order() {
        let xml = sample().to_xml_string().unwrap();
        let (_, order, _) = read_children(&xml);
        let expected: Vec<String> = ListingField::ALL
            .iter()
            .map(|f| f.element_name().to_string())
            .collect();
        assert_eq!(order, expected);
    }

    #[test]
    fn xml_values_are_joined_and_escaped() {
        let xml = sample().to_xml_string().unwrap();
        assert!(xml.contains("Bed &amp; Breakfast"));
        let (_, _, values) = read_children(&xml);
        assert_eq!(values["Amenities"], "TV, Iron");
        assert_eq!(values["PropertyType"], "Bed & Breakfast");
        assert_eq!(values["ExternalLinks"], "https://a.example\nhttps://b.example");
        assert_eq!(values["PricePerNight"], "125");
        assert_eq!(values["MinimumStay"], "");
    }

    #[test]
    fn json_carries_record_and_provenance() {
        let extraction = Extraction {
            record: sample(),
            provenance: vec![FieldProvenance {
                field: ListingField::PricePerNight,
                strategy: Some(crate::strategies::StrategyKind::LabeledInteger),
            }],
        };
        let value: serde_json::Value =
            serde_json::from_str(&extraction.to_json().unwrap()).unwrap();
        assert_eq!(value["record"]["PricePerNight"], 125);
        assert_eq!(value["record"]["Amenities"][1], "Iron");
        assert_eq!(value["provenance"][0]["strategy"], "LabeledInteger");
    }

    #[test]
    fn unknown_output_format_is_rejected() {
        let extraction = Extraction {
            record: ListingRecord::default(),
            provenance: Vec::new(),
        };
        let err = extraction
            .save_with_format("/tmp/never-written.out", "csv")
            .unwrap_err();
        assert!(matches!(err, ListingError::UnsupportedFormat(_)));
    }
}
