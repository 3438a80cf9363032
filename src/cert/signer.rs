// src/cert/signer.rs
use openssl::asn1::Asn1Time;
use openssl::bn::{BigNum, MsbOption};
use openssl::hash::MessageDigest;
use openssl::x509::extension::{BasicConstraints, ExtendedKeyUsage, KeyUsage};
use openssl::x509::X509;

use super::types::{CaMaterial, ClientCertificate, SigningRequest};
use crate::types::IssueError;
use crate::utils::logging::Logger;

// X509 version 3 is encoded as 2.
const X509_VERSION_3: i32 = 2;
const SERIAL_BITS: i32 = 128;

/// Signs the request with the CA pair, producing a client certificate valid
/// for `validity_days` from now.
///
/// Each invocation draws a fresh random serial in memory; there is no
/// serial state shared between runs and nothing left on disk.
pub fn sign_request(
    csr: &SigningRequest,
    ca: &CaMaterial,
    validity_days: u32,
    logger: &mut dyn Logger,
) -> Result<ClientCertificate, IssueError> {
    let req_pubkey = csr.req.public_key()?;
    if !csr.req.verify(&req_pubkey)? {
        return Err(IssueError::Crypto(
            "signing request signature does not match its public key".to_string(),
        ));
    }

    logger.debug_log(&format!(
        "Signing request, validity {} days",
        validity_days
    ));

    let mut builder = X509::builder()?;
    builder.set_version(X509_VERSION_3)?;
    let serial = random_serial()?.to_asn1_integer()?;
    builder.set_serial_number(&serial)?;
    builder.set_subject_name(csr.req.subject_name())?;
    builder.set_issuer_name(ca.cert.subject_name())?;
    builder.set_pubkey(&req_pubkey)?;
    let not_before = Asn1Time::days_from_now(0)?;
    builder.set_not_before(&not_before)?;
    let not_after = Asn1Time::days_from_now(validity_days)?;
    builder.set_not_after(&not_after)?;

    let mut basic = BasicConstraints::new();
    basic.critical();
    builder.append_extension(basic.build()?)?;

    let mut key_usage = KeyUsage::new();
    key_usage.critical();
    key_usage.digital_signature();
    key_usage.key_encipherment();
    builder.append_extension(key_usage.build()?)?;

    let mut ext_key_usage = ExtendedKeyUsage::new();
    ext_key_usage.client_auth();
    builder.append_extension(ext_key_usage.build()?)?;

    builder.sign(&ca.key, MessageDigest::sha256())?;
    let cert = builder.build();

    let pem = String::from_utf8(cert.to_pem()?)
        .map_err(|e| IssueError::Crypto(format!("certificate is not valid PEM: {}", e)))?;

    Ok(ClientCertificate { cert, pem })
}

fn random_serial() -> Result<BigNum, IssueError> {
    let mut serial = BigNum::new()?;
    serial.rand(SERIAL_BITS, MsbOption::MAYBE_ZERO, false)?;
    Ok(serial)
}
