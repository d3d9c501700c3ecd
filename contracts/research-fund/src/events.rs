use soroban_sdk::{contractevent, Address, BytesN};

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub stable_coin: Address,
    pub share_token: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalCreatedEvent {
    #[topic]
    pub researcher: Address,
    pub proposal_id: u64,
    pub funding_goal: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoundOpenedEvent {
    #[topic]
    pub proposal_id: u64,
    pub round_id: u64,
    /// Set for milestone rounds, `None` for approval rounds.
    pub milestone_index: Option<u32>,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteCastEvent {
    #[topic]
    pub voter: Address,
    #[topic]
    pub round_id: u64,
    pub approve: bool,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalApprovedEvent {
    #[topic]
    pub proposal_id: u64,
    pub yes_votes: u64,
    pub total_voters: u64,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MilestoneApprovedEvent {
    #[topic]
    pub proposal_id: u64,
    pub milestone_index: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvestmentEvent {
    #[topic]
    pub investor: Address,
    #[topic]
    pub proposal_id: u64,
    pub amount: i128,
    pub percentage_bps: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalFundedEvent {
    #[topic]
    pub proposal_id: u64,
    pub total_raised: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalRevokedEvent {
    #[topic]
    pub proposal_id: u64,
    pub caller: Address,
}

/// Emitted when the contract WASM is upgraded to a new hash.
#[contractevent]
pub struct UpgradedEvent {
    #[topic]
    pub admin: Address,
    pub new_wasm_hash: BytesN<32>,
}

/// Emitted when the admin role is transferred to a new address.
#[contractevent]
pub struct AdminChangedEvent {
    #[topic]
    pub old_admin: Address,
    pub new_admin: Address,
}
