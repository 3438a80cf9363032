// src/kubeconfig/mod.rs
mod assemble;
mod locate;
mod types;

pub use assemble::KubeConfigAssembler;
pub use locate::locate_default;
pub use types::{KubeConfig, DEFAULT_ENTRY};
