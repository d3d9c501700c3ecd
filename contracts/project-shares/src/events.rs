use soroban_sdk::{contractevent, Address};

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectRegisteredEvent {
    #[topic]
    pub project_id: u64,
    pub supply_cap: Option<i128>,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SharesMintedEvent {
    #[topic]
    pub project_id: u64,
    #[topic]
    pub to: Address,
    pub amount: i128,
    pub total_minted: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SharesTransferredEvent {
    #[topic]
    pub project_id: u64,
    #[topic]
    pub from: Address,
    pub to: Address,
    pub amount: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SharesBurnedEvent {
    #[topic]
    pub project_id: u64,
    #[topic]
    pub from: Address,
    pub amount: i128,
}
