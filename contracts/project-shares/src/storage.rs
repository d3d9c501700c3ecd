use soroban_sdk::contracttype;
use soroban_sdk::Address;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Treasury,              // -> Address, sole mint/registration authority
    Project(u64),          // project_id -> ProjectSupply
    Balance(u64, Address), // (project_id, holder) -> i128
}

/// Per-project share bookkeeping. `total_minted` is cumulative over the
/// project's lifetime; burning positions does not decrement it.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectSupply {
    pub project_id: u64,
    pub total_minted: i128,
    pub supply_cap: Option<i128>,
}
