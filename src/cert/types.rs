// cert/types.rs
use std::fs;
use std::path::Path;

use openssl::pkey::{PKey, Private};
use openssl::x509::{X509Req, X509};

use crate::types::IssueError;

pub const DEFAULT_RSA_BITS: u32 = 2048;
pub const CLIENT_CERT_VALIDITY_DAYS: u32 = 3650;
pub const DEFAULT_GROUP: &str = "user-group";

// Fixed DN placeholders. Consumers authorize by CN/O; the remaining
// components are constant.
pub const SUBJECT_COUNTRY: &str = "CN";
pub const SUBJECT_STATE: &str = "SD";
pub const SUBJECT_LOCALITY: &str = "JN";
pub const SUBJECT_ORG_UNIT: &str = "system";

/// The user/group pair a certificate is minted for. The subject built from
/// it is the binding between the human identity and the certificate's
/// authorization scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub user_name: String,
    pub group_name: String,
}

impl Identity {
    pub fn new(user_name: String, group_name: Option<String>) -> Self {
        Self {
            user_name,
            group_name: group_name.unwrap_or_else(|| DEFAULT_GROUP.to_string()),
        }
    }
}

/// Freshly generated private key. Held in memory for one run only.
pub struct KeyMaterial {
    pub pkey: PKey<Private>,
    pub pem: String,
}

/// A certificate signing request derived from one `KeyMaterial` and one
/// `Identity`. Consumed exactly once by the signer.
pub struct SigningRequest {
    pub req: X509Req,
    pub pem: String,
}

/// The CA pair supplied by the caller. Read-only, never modified.
pub struct CaMaterial {
    pub cert: X509,
    pub key: PKey<Private>,
}

impl CaMaterial {
    pub fn load(cert_path: &Path, key_path: &Path) -> Result<Self, IssueError> {
        let cert_pem = fs::read(cert_path)?;
        let key_pem = fs::read(key_path)?;
        let cert = X509::from_pem(&cert_pem)?;
        let key = PKey::private_key_from_pem(&key_pem)?;
        Ok(Self { cert, key })
    }
}

/// The issued client certificate.
pub struct ClientCertificate {
    pub cert: X509,
    pub pem: String,
}
