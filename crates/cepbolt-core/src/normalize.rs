//! Validity rules shared by every address provider.

use crate::data_source::SourceError;
use crate::{Address, ProviderId};

/// Provider payload after field mapping, before validation.
///
/// Adapters copy their provider-specific fields in here; missing fields stay
/// `None` and become empty strings in the canonical record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawAddress {
    pub cep: Option<String>,
    pub street: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

/// Turns a mapped payload into an [`Address`] or a `NotFound` error.
///
/// City and state are mandatory. All other fields are optional.
pub fn normalize_address(raw: RawAddress, source: ProviderId) -> Result<Address, SourceError> {
    let city = clean(raw.city);
    let state = clean(raw.state);

    let missing = match (city.is_empty(), state.is_empty()) {
        (true, true) => Some("city and state"),
        (true, false) => Some("city"),
        (false, true) => Some("state"),
        (false, false) => None,
    };
    if let Some(fields) = missing {
        return Err(SourceError::not_found(format!(
            "{source} returned no {fields} for the requested cep"
        )));
    }

    Ok(Address {
        cep: digits_only(raw.cep),
        street: clean(raw.street),
        neighborhood: clean(raw.neighborhood),
        city,
        state,
        source,
    })
}

fn clean(value: Option<String>) -> String {
    value
        .map(|value| value.trim().to_owned())
        .unwrap_or_default()
}

fn digits_only(value: Option<String>) -> String {
    value
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_digit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_source::SourceErrorKind;

    fn complete() -> RawAddress {
        RawAddress {
            cep: Some(String::from("01001-000")),
            street: Some(String::from("Praça da Sé")),
            neighborhood: Some(String::from("Sé")),
            city: Some(String::from("São Paulo")),
            state: Some(String::from("SP")),
        }
    }

    #[test]
    fn complete_payload_normalizes_and_strips_cep_separator() {
        let address = normalize_address(complete(), ProviderId::ViaCep).expect("valid");

        assert_eq!(address.cep, "01001000");
        assert_eq!(address.city, "São Paulo");
        assert_eq!(address.state, "SP");
        assert_eq!(address.source, ProviderId::ViaCep);
    }

    #[test]
    fn missing_optional_fields_default_to_empty_strings() {
        let raw = RawAddress {
            city: Some(String::from("Brasília")),
            state: Some(String::from("DF")),
            ..RawAddress::default()
        };

        let address = normalize_address(raw, ProviderId::BrasilApi).expect("valid");
        assert_eq!(address.street, "");
        assert_eq!(address.neighborhood, "");
        assert_eq!(address.cep, "");
    }

    #[test]
    fn blank_city_is_not_found() {
        let raw = RawAddress {
            city: Some(String::from("   ")),
            ..complete()
        };

        let error = normalize_address(raw, ProviderId::ViaCep).expect_err("must fail");
        assert_eq!(error.kind(), SourceErrorKind::NotFound);
        assert!(error.message().contains("city"), "{}", error.message());
    }

    #[test]
    fn missing_state_is_not_found() {
        let raw = RawAddress {
            state: None,
            ..complete()
        };

        let error = normalize_address(raw, ProviderId::BrasilApi).expect_err("must fail");
        assert_eq!(error.kind(), SourceErrorKind::NotFound);
    }

    #[test]
    fn empty_payload_is_not_found() {
        let error =
            normalize_address(RawAddress::default(), ProviderId::ViaCep).expect_err("must fail");
        assert!(error.is_not_found());
        assert!(error.message().contains("city and state"));
    }

    #[test]
    fn normalization_is_pure() {
        let first = normalize_address(complete(), ProviderId::ViaCep);
        let second = normalize_address(complete(), ProviderId::ViaCep);
        assert_eq!(first, second);
    }
}
