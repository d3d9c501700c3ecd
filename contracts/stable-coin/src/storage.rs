use soroban_sdk::{contracttype, Address, String};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,            // -> Address
    Metadata,         // -> TokenMetadata
    TotalMinted,      // -> i128, cumulative, never decremented
    Balance(Address), // -> i128
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenMetadata {
    pub decimals: u32,
    pub name: String,
    pub symbol: String,
}
