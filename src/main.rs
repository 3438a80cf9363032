// src/main.rs
mod app;
mod cert;
mod kubeconfig;
mod types;
mod utils;

use app::{issue, IssueRequest};
use clap::Parser;
use types::IssueError;
use utils::logging::{ConsoleLogger, Logger};

/// Issues a CA-signed client certificate for a Kubernetes user and writes a
/// ready-to-use kubeconfig.
#[derive(Parser)]
#[command(name = "kubecred")]
pub struct Args {
    /// User name the credentials are minted for (becomes the subject CN)
    #[arg(short, long)]
    pub user: Option<String>,
    /// Group name (becomes the subject O); defaults to a placeholder group
    #[arg(short, long)]
    pub group: Option<String>,
    /// Output path for the assembled kubeconfig
    #[arg(short, long, default_value = "kubeconfig")]
    pub out: String,
    /// API server URL, required unless --kubeconfig is given
    #[arg(long)]
    pub url: Option<String>,
    /// Server CA certificate path, required unless --kubeconfig is given
    #[arg(long = "server-ca", visible_alias = "serverCA", alias = "sca")]
    pub server_ca: Option<String>,
    /// Client CA certificate path used to sign the issued certificate
    #[arg(long = "client-ca", visible_alias = "clientCA", alias = "ca")]
    pub client_ca: Option<String>,
    /// Client CA private key path
    #[arg(long = "client-ca-key", visible_alias = "clientCAKey", alias = "caKey")]
    pub client_ca_key: Option<String>,
    /// Base kubeconfig to clone; with no value, resolves $KUBECONFIG or
    /// ~/.kube/config
    #[arg(long, num_args = 0..=1)]
    pub kubeconfig: Option<Option<String>>,
    /// RSA modulus size for the generated private key
    #[arg(long, default_value_t = cert::DEFAULT_RSA_BITS)]
    pub key_bits: u32,
    #[arg(short, long)]
    pub debug: bool,
}

fn run(args: Args, logger: &mut dyn Logger) -> Result<(), IssueError> {
    let request = IssueRequest::from_args(&args)?;
    let report = issue(&request, logger)?;
    report.print();
    Ok(())
}

fn main() {
    let args = Args::parse();
    let mut logger = ConsoleLogger::new(args.debug);

    if let Err(err) = run(args, &mut logger) {
        eprintln!("error: {}", err);
        std::process::exit(err.exit_code());
    }
}
