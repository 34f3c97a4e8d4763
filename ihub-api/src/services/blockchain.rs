//! Blockchain Record Service (stub)
//!
//! Records campaign agreements on-chain in the production deployment. This
//! implementation is a stub: it validates configuration and returns a
//! deterministic mock transaction hash. The real smart-contract call goes
//! through an external SDK and is out of scope here.

use ihub_common::config::Settings;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Blockchain service errors
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// Provider URL, contract address, or wallet key missing
    #[error("Blockchain misconfigured: {0}")]
    Misconfigured(String),
}

/// Stub client for the campaign-record smart contract
#[derive(Debug, Clone)]
pub struct BlockchainService {
    provider_url: Option<String>,
    contract_address: Option<String>,
    wallet_private_key: Option<String>,
}

impl BlockchainService {
    pub fn new(settings: &Settings) -> Self {
        Self {
            provider_url: settings.web3_provider_url.clone(),
            contract_address: settings.contract_address.clone(),
            wallet_private_key: settings.wallet_private_key.clone(),
        }
    }

    /// True when provider, contract, and wallet are all configured
    pub fn is_configured(&self) -> bool {
        self.provider_url.is_some()
            && self.contract_address.is_some()
            && self.wallet_private_key.is_some()
    }

    /// Connectivity check. The stub reports configuration state; the real
    /// implementation would ping the provider.
    pub fn is_connected(&self) -> bool {
        self.is_configured()
    }

    /// Record a new campaign agreement, returning the transaction hash.
    ///
    /// The stub derives the hash from the inputs and the contract address,
    /// so repeated calls for the same campaign return the same hash.
    pub fn create_record(
        &self,
        campaign_id: &str,
        influencer_address: &str,
        amount_wei: u64,
    ) -> Result<String, BlockchainError> {
        let contract = self
            .contract_address
            .as_deref()
            .ok_or_else(|| BlockchainError::Misconfigured("contract address not set".into()))?;
        if self.provider_url.is_none() || self.wallet_private_key.is_none() {
            return Err(BlockchainError::Misconfigured(
                "provider URL or wallet key not set".into(),
            ));
        }

        let mut hasher = Sha256::new();
        hasher.update(contract.as_bytes());
        hasher.update(campaign_id.as_bytes());
        hasher.update(influencer_address.as_bytes());
        hasher.update(amount_wei.to_be_bytes());
        let digest = hasher.finalize();

        Ok(format!("0x{:x}", digest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured_settings() -> Settings {
        Settings {
            web3_provider_url: Some("http://localhost:8545".to_string()),
            contract_address: Some("0x00000000000000000000000000000000000000aa".to_string()),
            wallet_private_key: Some("deadbeef".to_string()),
            ..Settings::default()
        }
    }

    #[test]
    fn test_unconfigured_service_rejects_record() {
        let service = BlockchainService::new(&Settings::default());
        assert!(!service.is_configured());
        assert!(!service.is_connected());
        let result = service.create_record("campaign-1", "0xabc", 0);
        assert!(matches!(result, Err(BlockchainError::Misconfigured(_))));
    }

    #[test]
    fn test_record_hash_is_deterministic() {
        let service = BlockchainService::new(&configured_settings());
        let first = service
            .create_record("campaign-1", "0xabc", 1000)
            .expect("record");
        let second = service
            .create_record("campaign-1", "0xabc", 1000)
            .expect("record");
        assert_eq!(first, second);
        assert!(first.starts_with("0x"));
        assert_eq!(first.len(), 2 + 64);
    }

    #[test]
    fn test_record_hash_varies_with_inputs() {
        let service = BlockchainService::new(&configured_settings());
        let a = service.create_record("campaign-1", "0xabc", 0).expect("record");
        let b = service.create_record("campaign-2", "0xabc", 0).expect("record");
        assert_ne!(a, b);
    }
}
