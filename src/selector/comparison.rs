use crate::domain::ServiceQuote;
use poem_openapi::Object;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Quotes split into the two tables of the service selector
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Object)]
pub struct ServiceComparison {
    #[serde(default)]
    #[oai(default)]
    pub preferred_services: Vec<ServiceQuote>,
    #[serde(default)]
    #[oai(default)]
    pub other_services: Vec<ServiceQuote>,
}

impl ServiceComparison {
    /// Sort quotes cheapest first and split them on the preferred flag
    pub fn from_quotes(mut quotes: Vec<ServiceQuote>) -> Self {
        quotes.sort_by(|a, b| a.total_price.total_cmp(&b.total_price));
        let (preferred_services, other_services) =
            quotes.into_iter().partition(|quote| quote.is_preferred);
        Self {
            preferred_services,
            other_services,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.preferred_services.is_empty() && self.other_services.is_empty()
    }

    pub fn services(&self, list: ServiceList) -> &[ServiceQuote] {
        match list {
            ServiceList::Preferred => &self.preferred_services,
            ServiceList::Other => &self.other_services,
        }
    }

    /// Resolve a row selection to its quote
    pub fn select(&self, selection: ServiceSelection) -> Option<&ServiceQuote> {
        self.services(selection.list).get(selection.index)
    }
}

/// Which table a row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceList {
    Preferred,
    Other,
}

impl ServiceList {
    /// Value of the button's `data-type` attribute
    pub fn data_type(&self) -> &'static str {
        match self {
            ServiceList::Preferred => "preferred_services",
            ServiceList::Other => "other_services",
        }
    }

    fn id_prefix(&self) -> &'static str {
        match self {
            ServiceList::Preferred => "data-preferred-",
            ServiceList::Other => "data-other-",
        }
    }
}

/// A selected row, identified the way the rendered table tags it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSelection {
    pub list: ServiceList,
    pub index: usize,
}

impl ServiceSelection {
    pub fn new(list: ServiceList, index: usize) -> Self {
        Self { list, index }
    }

    /// Row and button id, e.g. `data-preferred-0`
    pub fn element_id(&self) -> String {
        format!("{}{}", self.list.id_prefix(), self.index)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid service selection id: {0}")]
pub struct SelectionError(pub String);

impl FromStr for ServiceSelection {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        for list in [ServiceList::Preferred, ServiceList::Other] {
            if let Some(index) = id.strip_prefix(list.id_prefix()) {
                // Reject signs and whitespace that usize parsing would otherwise allow
                if index.is_empty() || !index.chars().all(|c| c.is_ascii_digit()) {
                    return Err(SelectionError(s.to_string()));
                }
                let index = index
                    .parse::<usize>()
                    .map_err(|_| SelectionError(s.to_string()))?;
                return Ok(Self { list, index });
            }
        }
        Err(SelectionError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(provider: &str, price: f64, preferred: bool) -> ServiceQuote {
        ServiceQuote {
            service_provider: provider.to_string(),
            carrier: format!("{} Carrier", provider),
            service_name: provider.to_string(),
            total_price: price,
            currency: None,
            is_preferred: preferred,
        }
    }

    #[test]
    fn test_from_quotes_sorts_and_partitions() {
        let comparison = ServiceComparison::from_quotes(vec![
            quote("Shiprocket", 120.0, false),
            quote("Packlink", 15.0, true),
            quote("Dunzo", 80.0, false),
            quote("SendCloud", 9.5, true),
        ]);

        let preferred: Vec<_> = comparison
            .preferred_services
            .iter()
            .map(|q| q.service_provider.as_str())
            .collect();
        let other: Vec<_> = comparison
            .other_services
            .iter()
            .map(|q| q.service_provider.as_str())
            .collect();

        assert_eq!(preferred, vec!["SendCloud", "Packlink"]);
        assert_eq!(other, vec!["Dunzo", "Shiprocket"]);
    }

    #[test]
    fn test_empty_comparison() {
        assert!(ServiceComparison::from_quotes(vec![]).is_empty());
        assert!(!ServiceComparison::from_quotes(vec![quote("Dunzo", 1.0, false)]).is_empty());
    }

    #[test]
    fn test_parse_selection_ids() {
        assert_eq!(
            "data-preferred-3".parse::<ServiceSelection>(),
            Ok(ServiceSelection::new(ServiceList::Preferred, 3))
        );
        assert_eq!(
            "data-other-0".parse::<ServiceSelection>(),
            Ok(ServiceSelection::new(ServiceList::Other, 0))
        );
    }

    #[test]
    fn test_parse_malformed_selection_ids() {
        for id in ["", "data-preferred-", "data-other-x", "data-other-+1", "data-cheap-1", "preferred-1"] {
            assert!(id.parse::<ServiceSelection>().is_err(), "Accepted: {}", id);
        }
    }

    #[test]
    fn test_element_id_matches_parser() {
        let selection = ServiceSelection::new(ServiceList::Other, 12);
        assert_eq!(selection.element_id(), "data-other-12");
        assert_eq!(selection.element_id().parse::<ServiceSelection>(), Ok(selection));
    }

    #[test]
    fn test_select_quote() {
        let comparison = ServiceComparison::from_quotes(vec![
            quote("Packlink", 15.0, true),
            quote("Dunzo", 80.0, false),
        ]);

        let selected = comparison
            .select(ServiceSelection::new(ServiceList::Other, 0))
            .unwrap();
        assert_eq!(selected.service_provider, "Dunzo");
        assert!(comparison
            .select(ServiceSelection::new(ServiceList::Preferred, 1))
            .is_none());
    }
}
