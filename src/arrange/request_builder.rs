use log::{debug, error, info};
use std::collections::BTreeMap;

use crate::context::{ContextKey, ContextValue, SharedContext, UNKNOWN_TEST_DESCRIPTION};
use crate::contract::{CoordinateValue, ExpectedCoordinates, IterationRecord, RequestDescriptor};
use crate::error::ContractError;

/// Arrange phase: turns one dataset record into a request and seeds the
/// expectations the checks will read
pub struct RequestBuilder;

impl RequestBuilder {
    /// Build the request for `record` and overwrite all seven context keys.
    ///
    /// A record without a usable `input` is rejected before the context is
    /// touched, so the iteration can be dropped without leaking state.
    pub fn arrange(
        record: &IterationRecord,
        context: &mut SharedContext,
    ) -> Result<RequestDescriptor, ContractError> {
        let description = Self::description_of(record);

        let input = match record.input.as_deref() {
            Some(input) if !input.trim().is_empty() => input,
            _ => {
                error!("Input URL is required in data file (test: {})", description);
                return Err(ContractError::MissingInput(description));
            }
        };

        let body = serde_json::to_string(&serde_json::json!({ "input": input }))
            .map_err(|e| ContractError::Serialization(e.to_string()))?;

        let mut headers = BTreeMap::new();
        headers.insert(
            "Content-Type".to_string(),
            RequestDescriptor::CONTENT_TYPE.to_string(),
        );

        if !context.is_empty() {
            debug!(
                "Overwriting stale shared context entries: {:?}",
                context.keys()
            );
        }
        Self::seed_context(record, &description, context);

        info!("Running test: {}", description);
        info!("Input URL: {}", input);
        match &record.expected.coordinates {
            Some(ExpectedCoordinates {
                lat: Some(lat),
                lon: Some(lon),
            }) => info!("Expected coordinates: {}, {}", lat, lon),
            _ => debug!("No complete expected coordinates for {}", description),
        }

        Ok(RequestDescriptor {
            method: "POST".to_string(),
            body,
            headers,
        })
    }

    /// Description the record reports under
    pub fn description_of(record: &IterationRecord) -> String {
        record
            .test_config
            .description
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_TEST_DESCRIPTION.to_string())
    }

    /// Numbers are stored as numbers, text as written; the context parses
    /// text lazily when the checks read it.
    fn coordinate_entry(value: Option<&CoordinateValue>) -> ContextValue {
        match value {
            Some(CoordinateValue::Number(number)) => ContextValue::Number(*number),
            Some(CoordinateValue::Text(text)) => ContextValue::Text(text.clone()),
            None => ContextValue::Null,
        }
    }

    fn seed_context(record: &IterationRecord, description: &str, context: &mut SharedContext) {
        let expected = &record.expected;
        let non_blank = |value: &Option<String>| {
            value.clone().filter(|v| !v.trim().is_empty())
        };

        let coords = expected.coordinates.as_ref();
        context.set(
            ContextKey::ExpectedLat,
            Self::coordinate_entry(coords.and_then(|c| c.lat.as_ref())),
        );
        context.set(
            ContextKey::ExpectedLon,
            Self::coordinate_entry(coords.and_then(|c| c.lon.as_ref())),
        );
        context.set(ContextKey::ExpectedAddress, non_blank(&expected.address));
        context.set(ContextKey::ExpectedName, non_blank(&expected.name));
        context.set(ContextKey::TestDescription, Some(description.to_string()));
        context.set(
            ContextKey::SkipAddressValidation,
            record.test_config.skip_address_validation.unwrap_or(false),
        );
        context.set(
            ContextKey::SkipNameValidation,
            record.test_config.skip_name_validation.unwrap_or(false),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_fields_default_to_null_and_false() {
        let mut context = SharedContext::new();
        let record = IterationRecord::new("40.6892,-74.0445");

        RequestBuilder::arrange(&record, &mut context).unwrap();

        assert_eq!(context.len(), 7);
        assert_eq!(context.get(ContextKey::ExpectedLat), Some(&ContextValue::Null));
        assert_eq!(context.get(ContextKey::ExpectedName), Some(&ContextValue::Null));
        assert_eq!(
            context.get(ContextKey::SkipNameValidation),
            Some(&ContextValue::Flag(false))
        );
        assert_eq!(context.test_description(), "Unknown Test");
    }

    #[test]
    fn test_blank_input_is_fatal_and_leaves_context_untouched() {
        let mut context = SharedContext::new();
        let record = IterationRecord::new("   ").with_description("blank");

        let error = RequestBuilder::arrange(&record, &mut context).unwrap_err();

        assert_eq!(error, ContractError::MissingInput("blank".to_string()));
        assert!(context.is_empty());
    }
}
