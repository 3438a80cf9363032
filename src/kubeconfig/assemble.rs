// src/kubeconfig/assemble.rs
use std::fs;
use std::path::{Path, PathBuf};

use super::types::{KubeConfig, DEFAULT_ENTRY};
use crate::cert::{ClientCertificate, KeyMaterial};
use crate::types::IssueError;

/// Builds the output kubeconfig, either from the in-memory template or from
/// an existing document, and writes it exactly once after the issued
/// credentials are embedded. An aborted run never leaves a credential-less
/// document at the output path.
pub struct KubeConfigAssembler {
    output_path: PathBuf,
}

impl KubeConfigAssembler {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    /// Fresh mode: the default single-entry document, populated with the
    /// cluster endpoint and inline CA data.
    pub fn assemble_fresh(&self, server_url: &str, server_ca_pem: &str) -> KubeConfig {
        let mut config = KubeConfig::template();
        config.set_cluster_endpoint(DEFAULT_ENTRY, server_url, server_ca_pem);
        config
    }

    /// Clone mode: an existing document, parsed whole. Cluster, server and
    /// CA fields are assumed correct and left untouched.
    pub fn assemble_from_existing(&self, base_path: &Path) -> Result<KubeConfig, IssueError> {
        let content = fs::read_to_string(base_path)?;
        KubeConfig::from_yaml(&content)
    }

    /// Embeds the issued certificate and key under the `default` user and
    /// writes the document to the output path.
    pub fn finalize(
        &self,
        config: &mut KubeConfig,
        cert: &ClientCertificate,
        key: &KeyMaterial,
    ) -> Result<(), IssueError> {
        config.set_user_credentials(DEFAULT_ENTRY, &cert.pem, &key.pem);
        fs::write(&self.output_path, config.to_yaml()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cert::signer::tests::test_ca;
    use crate::cert::{build_csr, generate_rsa_key, sign_request, Identity};
    use crate::utils::logging::MockLogger;
    use base64::{engine::general_purpose, Engine as _};
    use tempfile::TempDir;

    fn issue_pair() -> (ClientCertificate, KeyMaterial) {
        let mut logger = MockLogger::new();
        let ca = test_ca("assembler-ca");
        let key = generate_rsa_key(2048, &mut logger).unwrap();
        let identity = Identity::new("alice".to_string(), Some("eng".to_string()));
        let csr = build_csr(&identity, &key, &mut logger).unwrap();
        let cert = sign_request(&csr, &ca, 3650, &mut logger).unwrap();
        (cert, key)
    }

    #[test]
    fn fresh_document_gets_endpoint_and_credentials() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("kubeconfig");
        let assembler = KubeConfigAssembler::new(out.clone());
        let (cert, key) = issue_pair();

        let mut config =
            assembler.assemble_fresh("https://10.0.0.1:6443", "server ca pem");
        assembler.finalize(&mut config, &cert, &key).unwrap();

        let written = KubeConfig::from_yaml(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(
            written.clusters[0].cluster.server.as_deref(),
            Some("https://10.0.0.1:6443")
        );
        let embedded_cert = general_purpose::STANDARD
            .decode(
                written.users[0]
                    .user
                    .client_certificate_data
                    .as_deref()
                    .unwrap(),
            )
            .unwrap();
        let embedded_key = general_purpose::STANDARD
            .decode(written.users[0].user.client_key_data.as_deref().unwrap())
            .unwrap();
        assert_eq!(embedded_cert, cert.pem.as_bytes());
        assert_eq!(embedded_key, key.pem.as_bytes());
    }

    #[test]
    fn clone_mode_only_touches_default_user_credentials() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("existing.yaml");
        std::fs::write(
            &base,
            r#"apiVersion: v1
kind: Config
current-context: default
clusters:
- name: default
  cluster:
    server: https://cluster.example:6443
    certificate-authority-data: c2VydmVyLWNh
contexts:
- name: default
  context:
    cluster: default
    user: default
users:
- name: default
  user:
    client-certificate-data: c3RhbGU=
    client-key-data: c3RhbGU=
"#,
        )
        .unwrap();
        let out = dir.path().join("kubeconfig");
        let assembler = KubeConfigAssembler::new(out.clone());
        let (cert, key) = issue_pair();

        let mut config = assembler.assemble_from_existing(&base).unwrap();
        assembler.finalize(&mut config, &cert, &key).unwrap();

        let written = KubeConfig::from_yaml(&std::fs::read_to_string(&out).unwrap()).unwrap();
        // Endpoint untouched, credentials replaced.
        assert_eq!(
            written.clusters[0].cluster.server.as_deref(),
            Some("https://cluster.example:6443")
        );
        assert_eq!(
            written.clusters[0]
                .cluster
                .certificate_authority_data
                .as_deref(),
            Some("c2VydmVyLWNh")
        );
        assert_ne!(
            written.users[0].user.client_certificate_data.as_deref(),
            Some("c3RhbGU=")
        );
        let embedded_key = general_purpose::STANDARD
            .decode(written.users[0].user.client_key_data.as_deref().unwrap())
            .unwrap();
        assert_eq!(embedded_key, key.pem.as_bytes());
    }

    #[test]
    fn malformed_base_document_is_rejected() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("existing.yaml");
        std::fs::write(&base, "clusters: notalist\n").unwrap();
        let assembler = KubeConfigAssembler::new(dir.path().join("kubeconfig"));

        assert!(assembler.assemble_from_existing(&base).is_err());
    }
}
