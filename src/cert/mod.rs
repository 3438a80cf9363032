// src/cert/mod.rs
mod keygen;
pub mod signer;
mod types;

pub use keygen::{build_csr, generate_rsa_key};
pub use signer::sign_request;
pub use types::{
    CaMaterial, ClientCertificate, Identity, KeyMaterial, SigningRequest,
    CLIENT_CERT_VALIDITY_DAYS, DEFAULT_GROUP, DEFAULT_RSA_BITS,
};
