//! Proptest generators for property-based testing.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use kaspa_auth::fields::to_iso;
use kaspa_auth::{ChainId, SiwkFields};
use kaspa_auth_address::{Address, AddressVersion, NetworkPrefix};

/// Generate a network prefix.
pub fn network_prefix() -> impl Strategy<Value = NetworkPrefix> {
    prop::sample::select(NetworkPrefix::ALL.to_vec())
}

/// Generate an address version.
pub fn address_version() -> impl Strategy<Value = AddressVersion> {
    prop_oneof![Just(AddressVersion::Schnorr), Just(AddressVersion::Ecdsa)]
}

/// Generate a payload of the length `version` implies.
pub fn payload_for(version: AddressVersion) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), version.expected_payload_len())
}

/// Generate an ISO timestamp between 2020 and 2035.
pub fn iso_timestamp() -> impl Strategy<Value = String> {
    (1_577_836_800_000i64..=2_051_222_400_000i64).prop_map(|ms| {
        let at = Utc
            .timestamp_millis_opt(ms)
            .single()
            .unwrap_or_else(Utc::now);
        to_iso(at)
    })
}

/// Generate a chain ID, numeric or textual.
pub fn chain_id() -> impl Strategy<Value = ChainId> {
    prop_oneof![
        any::<u64>().prop_map(ChainId::Number),
        "[a-z][a-z0-9-]{0,15}".prop_map(ChainId::Text),
    ]
}

/// Parameters for generating an address.
#[derive(Debug, Clone)]
pub struct AddressParams {
    pub prefix: NetworkPrefix,
    pub version: AddressVersion,
    pub payload: Vec<u8>,
}

impl Arbitrary for AddressParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (network_prefix(), address_version())
            .prop_flat_map(|(prefix, version)| {
                payload_for(version).prop_map(move |payload| AddressParams {
                    prefix,
                    version,
                    payload,
                })
            })
            .boxed()
    }
}

/// Build an address from parameters.
pub fn address_from_params(params: &AddressParams) -> Address {
    Address::new(params.prefix, params.version, params.payload.clone())
        .expect("version-sized payloads always encode")
}

/// Generate a complete, well-formed set of SIWK fields.
pub fn siwk_fields() -> impl Strategy<Value = SiwkFields> {
    (
        any::<AddressParams>(),
        "[a-z]{1,12}\\.(com|org|io)",
        prop::option::of("[A-Za-z][A-Za-z ,.]{0,40}"),
        "[A-Za-z0-9]{8,16}",
        chain_id(),
        iso_timestamp(),
        prop::option::of(iso_timestamp()),
        prop::option::of(iso_timestamp()),
        prop::option::of("[a-z0-9-]{1,16}"),
        prop::collection::vec("https://[a-z]{1,8}\\.com/[a-z]{0,8}", 0..3),
    )
        .prop_map(
            |(
                params,
                domain,
                statement,
                nonce,
                chain_id,
                issued_at,
                expiration_time,
                not_before,
                request_id,
                resources,
            )| SiwkFields {
                address: address_from_params(&params).to_string(),
                uri: format!("https://{domain}/login"),
                domain,
                statement,
                version: kaspa_auth::SIWK_VERSION.to_string(),
                chain_id,
                nonce,
                issued_at,
                expiration_time,
                not_before,
                request_id,
                resources,
            },
        )
}
