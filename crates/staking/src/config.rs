//! Deployment configuration for the gateway and the vault.

use crate::error::{Result, StakingError};
use alloy_primitives::{Address, B256};
use lynx_crypto::{hash_domain, DOMAIN_NAME, DOMAIN_VERSION};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable for the config file path.
///
/// When set, this takes precedence over the path given on the command line.
///
/// ```bash
/// LYNX_CONFIG=/etc/lynx/staking.json lynxctl digest --params params.json
/// ```
pub const LYNX_CONFIG_ENV: &str = "LYNX_CONFIG";

/// Fee share denominator: fee shares are expressed in thousandths.
pub const FEE_SHARE_DENOMINATOR: u64 = 1000;

fn default_domain_name() -> String {
    DOMAIN_NAME.to_string()
}

fn default_domain_version() -> String {
    DOMAIN_VERSION.to_string()
}

/// Addresses, roles and parameters of one deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingConfig {
    /// Chain id bound into the EIP-712 domain.
    pub chain_id: u64,
    /// Gateway address; the EIP-712 verifying contract and the vault controller.
    pub gateway_address: Address,
    /// Vault address.
    pub vault_address: Address,
    /// Oracle that authorizes stake requests.
    pub oracle: Address,
    /// Holder of the admin role on both contracts.
    pub admin: Address,
    /// Holder of the manager role on both contracts.
    pub manager: Address,
    /// Holder of the pauser role on both contracts.
    pub pauser: Address,
    /// EIP-712 domain name.
    #[serde(default = "default_domain_name")]
    pub domain_name: String,
    /// EIP-712 domain version.
    #[serde(default = "default_domain_version")]
    pub domain_version: String,
    /// Manager fee share in thousandths (0..=1000).
    #[serde(default)]
    pub manager_fee_share: u64,
}

impl StakingConfig {
    /// Config with every role held by `admin` and the default domain.
    pub fn new(
        chain_id: u64,
        gateway_address: Address,
        vault_address: Address,
        oracle: Address,
        admin: Address,
    ) -> Self {
        Self {
            chain_id,
            gateway_address,
            vault_address,
            oracle,
            admin,
            manager: admin,
            pauser: admin,
            domain_name: default_domain_name(),
            domain_version: default_domain_version(),
            manager_fee_share: 0,
        }
    }

    /// Check addresses and ranges.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("gateway_address", self.gateway_address),
            ("vault_address", self.vault_address),
            ("admin", self.admin),
            ("manager", self.manager),
            ("pauser", self.pauser),
        ];
        for (name, address) in required {
            if address.is_zero() {
                return Err(StakingError::config(format!("{name} must not be zero")));
            }
        }
        if self.gateway_address == self.vault_address {
            return Err(StakingError::config(
                "gateway_address and vault_address must differ",
            ));
        }
        if self.manager_fee_share > FEE_SHARE_DENOMINATOR {
            return Err(StakingError::config(format!(
                "manager_fee_share {} exceeds {FEE_SHARE_DENOMINATOR}",
                self.manager_fee_share
            )));
        }
        if self.domain_name.is_empty() || self.domain_version.is_empty() {
            return Err(StakingError::config("domain name and version must be set"));
        }
        Ok(())
    }

    /// EIP-712 domain separator of the gateway.
    pub fn domain_separator(&self) -> B256 {
        hash_domain(
            &self.domain_name,
            &self.domain_version,
            self.chain_id,
            self.gateway_address,
        )
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| StakingError::config(e.to_string()))?;
        std::fs::write(path, json)
            .map_err(|e| StakingError::config(format!("{}: {e}", path.display())))?;
        Ok(())
    }

    /// Load and validate config from file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| StakingError::config(format!("{}: {e}", path.display())))?;
        let config: Self = serde_json::from_str(&json)
            .map_err(|e| StakingError::config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }
}
