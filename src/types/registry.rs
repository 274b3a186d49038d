//! Registry record types.

use alloy::primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

use crate::ethereum::contracts::registry::IDeveryRegistry;

/// An application registered in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    /// Account that registered the app.
    pub app_account: Address,
    /// App name.
    pub app_name: String,
    /// Account receiving the app's marking fees.
    pub fee_account: Address,
    /// Fee charged per mark, in token units.
    pub fee: U256,
    /// Whether the app is active.
    pub active: bool,
}

impl AppInfo {
    /// Whether the registry has a record for this account.
    pub fn exists(&self) -> bool {
        self.app_account != Address::ZERO
    }
}

impl From<IDeveryRegistry::getAppReturn> for AppInfo {
    fn from(r: IDeveryRegistry::getAppReturn) -> Self {
        Self {
            app_account: r._appAccount,
            app_name: r.appName,
            fee_account: r._feeAccount,
            fee: r._fee,
            active: r.active,
        }
    }
}

/// A brand owned by an app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandInfo {
    pub brand_account: Address,
    pub app_account: Address,
    pub brand_name: String,
    pub active: bool,
}

impl BrandInfo {
    /// Whether the registry has a record for this account.
    pub fn exists(&self) -> bool {
        self.brand_account != Address::ZERO
    }
}

impl From<IDeveryRegistry::getBrandReturn> for BrandInfo {
    fn from(r: IDeveryRegistry::getBrandReturn) -> Self {
        Self {
            brand_account: r._brandAccount,
            app_account: r.appAccount,
            brand_name: r.brandName,
            active: r.active,
        }
    }
}

/// Fee routing for a brand, as the registry sees it when marking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandData {
    pub app_account: Address,
    pub app_fee_account: Address,
    pub active: bool,
}

impl From<IDeveryRegistry::getBrandDataReturn> for BrandData {
    fn from(r: IDeveryRegistry::getBrandDataReturn) -> Self {
        Self { app_account: r.appAccount, app_fee_account: r.appFeeAccount, active: r.active }
    }
}

/// A product owned by a brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub product_account: Address,
    pub brand_account: Address,
    pub description: String,
    pub details: String,
    pub year: U256,
    pub origin: String,
    pub active: bool,
}

impl ProductInfo {
    /// Whether the registry has a record for this account.
    pub fn exists(&self) -> bool {
        self.product_account != Address::ZERO
    }
}

impl From<IDeveryRegistry::getProductReturn> for ProductInfo {
    fn from(r: IDeveryRegistry::getProductReturn) -> Self {
        Self {
            product_account: r._productAccount,
            brand_account: r.brandAccount,
            description: r.description,
            details: r.details,
            year: r.year,
            origin: r.origin,
            active: r.active,
        }
    }
}

/// Fields of a new or updated product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductParams {
    pub product_account: Address,
    pub description: String,
    pub details: String,
    pub year: u64,
    pub origin: String,
}

/// Result of checking an item against the registry.
///
/// All three accounts are zero when the item was never marked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub product_account: Address,
    pub brand_account: Address,
    pub app_account: Address,
}

impl CheckResult {
    /// Whether the item was marked by a known product.
    pub fn is_marked(&self) -> bool {
        self.product_account != Address::ZERO
    }
}

impl From<IDeveryRegistry::checkReturn> for CheckResult {
    fn from(r: IDeveryRegistry::checkReturn) -> Self {
        Self {
            product_account: r.productAccount,
            brand_account: r.brandAccount,
            app_account: r.appAccount,
        }
    }
}

/// Record counts and fee settings of a registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySummary {
    pub address: Address,
    pub network_id: u64,
    pub apps: U256,
    pub brands: U256,
    pub products: U256,
    pub token: Address,
    pub fee_account: Address,
    pub fee: U256,
}

/// A marked item hash and the product it was marked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkedItem {
    pub product_account: Address,
    pub item_hash: B256,
}
