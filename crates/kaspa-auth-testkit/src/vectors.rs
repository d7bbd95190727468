//! Golden test vectors.
//!
//! Fixed inputs with known outputs, shared with other Kaspa wallet and
//! verifier implementations. Any change in encoding, hashing or canonical
//! text shows up here first.

use kaspa_auth::{build_message, SiwkFields};
use kaspa_auth_address::{Address, AddressVersion, NetworkPrefix};
use kaspa_auth_signature::{
    PersonalMessageDigest, SchnorrPublicKey, SchnorrSignature, Secp256k1Verifier,
};
use serde::Serialize;

/// A known address and its decoded parts.
#[derive(Debug, Clone, Serialize)]
pub struct AddressVector {
    pub name: &'static str,
    pub address: &'static str,
    pub prefix: NetworkPrefix,
    pub version: AddressVersion,
    /// Payload bytes (hex).
    pub payload: &'static str,
}

/// A known personal-message signature.
#[derive(Debug, Clone, Serialize)]
pub struct SignatureVector {
    pub name: &'static str,
    pub address: &'static str,
    pub message: &'static str,
    /// Personal-message digest of `message` (hex).
    pub digest: &'static str,
    pub signature: &'static str,
    /// Whether `signature` verifies for `message`.
    pub valid: bool,
}

const MAINNET_PAYLOAD: &str = "25bedbc65b807b4e9e9a24b7a70ea1648bfa63362a0a16d27a148020965a73cc";

const HELLO_ADDRESS: &str = "kaspa:qr0lr4ml9fn3chekrqmjdkergxl93l4wrk3dankcgvjq776s9wn9jkdskewva";
const HELLO_SIGNATURE: &str = "35c5efc9c4a87df63301fa0e51cb29e1417676ed798486e7e5bf7fb413bdbfa3549ecb811636a31363c13fea5393202f657d020f1ee1976bef55f7386f6ace65";

/// Signer address for [`siwk_vector`]; key is 32 bytes of `0x01`.
pub const SIWK_ADDRESS: &str = "kaspa:qqdcf32k0vfxgsyet5ldt246q4jaw8scx3sysx0lnstlt6w4m5rc72kqpk9q3";

/// Get all address vectors.
pub fn address_vectors() -> Vec<AddressVector> {
    vec![
        AddressVector {
            name: "mainnet schnorr",
            address: "kaspa:qqjmak7xtwq8kn57ngjt0fcw59jgh7nrxc4q59kj0g2gqgyktfeucgwqm3fnl",
            prefix: NetworkPrefix::Mainnet,
            version: AddressVersion::Schnorr,
            payload: MAINNET_PAYLOAD,
        },
        AddressVector {
            name: "testnet schnorr",
            address: "kaspatest:qqjmak7xtwq8kn57ngjt0fcw59jgh7nrxc4q59kj0g2gqgyktfeucfgxq7hzm",
            prefix: NetworkPrefix::Testnet,
            version: AddressVersion::Schnorr,
            payload: MAINNET_PAYLOAD,
        },
        AddressVector {
            name: "devnet schnorr",
            address: "kaspadev:qqjmak7xtwq8kn57ngjt0fcw59jgh7nrxc4q59kj0g2gqgyktfeucys9ar5xn",
            prefix: NetworkPrefix::Devnet,
            version: AddressVersion::Schnorr,
            payload: MAINNET_PAYLOAD,
        },
        AddressVector {
            name: "simnet schnorr",
            address: "kaspasim:qqjmak7xtwq8kn57ngjt0fcw59jgh7nrxc4q59kj0g2gqgyktfeuc87a6dhdv",
            prefix: NetworkPrefix::Simnet,
            version: AddressVersion::Schnorr,
            payload: MAINNET_PAYLOAD,
        },
        AddressVector {
            name: "mainnet ecdsa",
            address: "kaspa:qypzt0kmcedcq76wn6dzfda8p6skfzl6vvmz5zsk6fapfqpqjed88nqxwdl9gc4",
            prefix: NetworkPrefix::Mainnet,
            version: AddressVersion::Ecdsa,
            payload: "0225bedbc65b807b4e9e9a24b7a70ea1648bfa63362a0a16d27a148020965a73cc",
        },
        AddressVector {
            name: "hello world signer",
            address: HELLO_ADDRESS,
            prefix: NetworkPrefix::Mainnet,
            version: AddressVersion::Schnorr,
            payload: "dff1d77f2a671c5f36183726db2341be58feae1da2deced843240f7b502ba659",
        },
    ]
}

/// Get all signature vectors.
pub fn signature_vectors() -> Vec<SignatureVector> {
    vec![
        SignatureVector {
            name: "hello world",
            address: HELLO_ADDRESS,
            message: "hello world",
            digest: "46d516c2632fb4f69cbdf3de15f356679c295a8aa342c4485e8e2cff6c0b05b7",
            signature: HELLO_SIGNATURE,
            valid: true,
        },
        SignatureVector {
            name: "hello world signature over other text",
            address: HELLO_ADDRESS,
            message: "hey world",
            digest: "",
            signature: HELLO_SIGNATURE,
            valid: false,
        },
    ]
}

/// A signed SIWK challenge with its expected digest and signature.
pub fn siwk_vector() -> (SiwkFields, &'static str, &'static str) {
    let fields = SiwkFields::builder(
        "example.com",
        SIWK_ADDRESS,
        "https://example.com/login",
        "32891756",
    )
    .statement("Sign in to Example.")
    .issued_at("2024-01-01T00:00:00.000Z")
    .expiration_time("2024-01-01T01:00:00.000Z")
    .add_resource("https://example.com/terms")
    .build();

    (
        fields,
        "92efb23b3096972885fa9ce6cad5c602c179f29d3fbc6f5a84cd51eea05db86c",
        "0b6f7c3392c4a2ce145ef4189c678507bb58cc690ab7298ece06d52259fb33ceacc11ff6116a770ff62469d750d758fab16c66264c4ed88469a87a3ff8c9a739",
    )
}

fn check_address(v: &AddressVector) -> bool {
    let Ok(address) = Address::parse(v.address) else {
        return false;
    };
    address.prefix() == v.prefix
        && address.version() == v.version
        && hex::encode(address.payload()) == v.payload
        && address.as_str() == v.address
}

fn check_signature(verifier: &Secp256k1Verifier, v: &SignatureVector) -> bool {
    let digest = PersonalMessageDigest::from_message(v.message);
    if !v.digest.is_empty() && digest.to_hex() != v.digest {
        return false;
    }
    let (Ok(address), Ok(signature)) = (Address::parse(v.address), SchnorrSignature::from_hex(v.signature)) else {
        return false;
    };
    let Ok(public_key) = SchnorrPublicKey::from_address(&address) else {
        return false;
    };
    verifier.verify_now(&digest, &signature, &public_key) == v.valid
}

fn check_siwk(verifier: &Secp256k1Verifier) -> bool {
    let (fields, digest_hex, signature_hex) = siwk_vector();
    let Ok(built) = build_message(&fields) else {
        return false;
    };
    let (Ok(address), Ok(signature)) = (Address::parse(&fields.address), SchnorrSignature::from_hex(signature_hex)) else {
        return false;
    };
    let Ok(public_key) = SchnorrPublicKey::from_address(&address) else {
        return false;
    };
    built.digest.to_hex() == digest_hex && verifier.verify_now(&built.digest, &signature, &public_key)
}

/// Check every vector, returning `(name, passed)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool)> {
    let verifier = Secp256k1Verifier::new();

    let addresses = address_vectors()
        .into_iter()
        .map(|v| (format!("address: {}", v.name), check_address(&v)));
    let signatures = signature_vectors()
        .into_iter()
        .map(|v| (format!("signature: {}", v.name), check_signature(&verifier, &v)));

    addresses
        .chain(signatures)
        .chain(std::iter::once(("siwk: example.com".to_string(), check_siwk(&verifier))))
        .collect()
}
