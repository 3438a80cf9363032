// src/app/issuer.rs
use std::env;
use std::fs;
use std::path::PathBuf;

use openssl::hash::MessageDigest;

use crate::cert::{
    build_csr, generate_rsa_key, sign_request, CaMaterial, Identity, CLIENT_CERT_VALIDITY_DAYS,
};
use crate::kubeconfig::{locate_default, KubeConfig, KubeConfigAssembler};
use crate::types::IssueError;
use crate::utils::logging::Logger;
use crate::Args;

/// Where the output document comes from before credentials are embedded.
#[derive(Debug)]
pub enum ConfigSource {
    /// Built from the default template, populated with the cluster endpoint.
    Fresh {
        server_url: String,
        server_ca: PathBuf,
    },
    /// Cloned from an existing kubeconfig.
    Clone(PathBuf),
}

/// Validated inputs for one issuance run.
#[derive(Debug)]
pub struct IssueRequest {
    pub identity: Identity,
    pub client_ca_cert: PathBuf,
    pub client_ca_key: PathBuf,
    pub source: ConfigSource,
    pub output_path: PathBuf,
    pub key_bits: u32,
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).to_string())
}

impl IssueRequest {
    /// The `ValidateInputs` stage. Every check here runs before any key is
    /// generated; messages match the issuing tool this one replaces.
    pub fn from_args(args: &Args) -> Result<Self, IssueError> {
        let client_ca_cert = match args.client_ca.as_deref() {
            Some(path) if !path.is_empty() => expand(path),
            _ => return Err(IssueError::Validation("client ca not found".to_string())),
        };
        let client_ca_key = match args.client_ca_key.as_deref() {
            Some(path) if !path.is_empty() => expand(path),
            _ => {
                return Err(IssueError::Validation(
                    "client ca key not found".to_string(),
                ))
            }
        };
        let user_name = match args.user.as_deref() {
            Some(user) if !user.is_empty() => user.to_string(),
            _ => return Err(IssueError::Validation("user name is empty".to_string())),
        };

        let base_config = match &args.kubeconfig {
            None => None,
            Some(Some(path)) => Some(expand(path)),
            Some(None) => Some(locate_default()?),
        };

        let source = match base_config {
            Some(base) => ConfigSource::Clone(base),
            None => {
                let server_ca = match args.server_ca.as_deref() {
                    Some(path) if !path.is_empty() => expand(path),
                    _ => {
                        return Err(IssueError::Validation(
                            "you need provide server ca or kubeconfig".to_string(),
                        ))
                    }
                };
                let server_url = match args.url.as_deref() {
                    Some(url) if !url.is_empty() => url.to_string(),
                    _ => {
                        return Err(IssueError::Validation(
                            "you need provide server url".to_string(),
                        ))
                    }
                };
                // Well-formedness check only; the literal string is kept so
                // no URL normalization leaks into the document.
                url::Url::parse(&server_url).map_err(|e| {
                    IssueError::Validation(format!("invalid server url {}: {}", server_url, e))
                })?;
                ConfigSource::Fresh {
                    server_url,
                    server_ca,
                }
            }
        };

        Ok(Self {
            identity: Identity::new(user_name, args.group.clone().filter(|g| !g.is_empty())),
            client_ca_cert,
            client_ca_key,
            source,
            output_path: expand(&args.out),
            key_bits: args.key_bits,
        })
    }
}

/// Success summary printed after the pipeline completes.
#[derive(Debug)]
pub struct IssueReport {
    pub user_name: String,
    pub group_name: String,
    pub out_path: PathBuf,
    pub fingerprint: String,
}

impl IssueReport {
    pub fn print(&self) {
        println!("user name: {}", self.user_name);
        println!("group name: {}", self.group_name);
        println!("certificate sha256: {}", self.fingerprint);
        println!("out path: {}", self.out_path.display());
        println!(
            "test: kubectl --kubeconfig={} auth can-i list pods",
            self.out_path.display()
        );
    }
}

/// Runs the issuance pipeline: read CA material, generate key, build CSR,
/// sign, assemble the configuration, embed credentials, report. Linear; any
/// stage failure aborts the run.
pub fn issue(request: &IssueRequest, logger: &mut dyn Logger) -> Result<IssueReport, IssueError> {
    logger.debug_log(&format!(
        "Reading CA material from {} and {}",
        request.client_ca_cert.display(),
        request.client_ca_key.display()
    ));
    let ca = CaMaterial::load(&request.client_ca_cert, &request.client_ca_key)?;

    logger.log("Generating private key");
    let key = generate_rsa_key(request.key_bits, logger)?;

    logger.log("Generating CSR");
    let csr = build_csr(&request.identity, &key, logger)?;

    logger.log("Signing certificate");
    let cert = sign_request(&csr, &ca, CLIENT_CERT_VALIDITY_DAYS, logger)?;

    let assembler = KubeConfigAssembler::new(request.output_path.clone());
    let mut config: KubeConfig = match &request.source {
        ConfigSource::Clone(base) => {
            logger.log(&format!("Cloning configuration from {}", base.display()));
            assembler.assemble_from_existing(base)?
        }
        ConfigSource::Fresh {
            server_url,
            server_ca,
        } => {
            logger.log("Assembling configuration");
            let server_ca_pem = fs::read_to_string(server_ca)?;
            assembler.assemble_fresh(server_url, &server_ca_pem)
        }
    };

    logger.log("Embedding client credentials");
    assembler.finalize(&mut config, &cert, &key)?;

    let out_path = if request.output_path.is_absolute() {
        request.output_path.clone()
    } else {
        env::current_dir()?.join(&request.output_path)
    };

    Ok(IssueReport {
        user_name: request.identity.user_name.clone(),
        group_name: request.identity.group_name.clone(),
        out_path,
        fingerprint: hex::encode(&*cert.cert.digest(MessageDigest::sha256())?),
    })
}
