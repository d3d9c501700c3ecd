use soroban_sdk::{contracttype, Address, String, Vec};

/// Platform cut of future revenue, fixed by the protocol.
pub const PLATFORM_PERCENTAGE: u32 = 5;
/// Ceiling for the research team's share; the remainder below it goes to
/// investors, so the three shares always sum to 100.
pub const MAX_RESEARCH_TEAM_PERCENTAGE: u32 = 95;
/// 100% in basis points.
pub const BASIS_POINTS: i128 = 10_000;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,               // -> Address
    StableCoin,          // -> Address, payment token contract
    ShareToken,          // -> Address, project-shares ledger
    NextProposalId,      // -> u64
    NextRoundId,         // -> u64
    Proposal(u64),       // proposal_id -> Proposal
    Investments(u64),    // proposal_id -> Vec<InvestmentRecord>
    VoteRound(u64),      // round_id -> VoteRound
    Voted(u64, Address), // (round_id, voter) -> bool, advisory only
}

/// Lifecycle state of a proposal. `Funded` is one-way: a proposal that
/// reached its goal stays `Funded` even if it is later revoked (the
/// `revoked` flag on [`Proposal`] carries that independently).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProposalStatus {
    Active,
    Funded,
    Revoked,
}

/// A research funding campaign stored on-chain.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Proposal {
    pub id: u64,
    /// Address that created the proposal and receives investments directly.
    pub researcher: Address,
    pub title: String,
    pub abstract_text: String,
    pub category: String,
    /// Target amount in stable-coin units. Always positive.
    pub funding_goal: i128,
    /// Campaign duration in seconds, informational.
    pub campaign_duration: u64,
    pub revenue_models: Vec<String>,
    pub created_at: u64,
    pub status: ProposalStatus,
    /// 0..=95; platform takes a fixed 5, investors the rest.
    pub research_team_percentage: u32,
    pub platform_percentage: u32,
    pub investor_percentage: u32,
    /// Sum of all accepted investments. Monotone non-decreasing.
    pub total_raised: i128,
    /// Index of the next milestone awaiting a vote. Monotone, never exceeds
    /// the milestone count.
    pub current_milestone: u32,
    pub milestones: Vec<String>,
    /// Parallel to `milestones`, all false at creation.
    pub milestone_approvals: Vec<bool>,
    pub revoked: bool,
    /// Flips false -> true exactly once, via an approval round.
    pub dao_approved: bool,
}

/// One record per investment event, returned to the investor. Immutable
/// once created; the per-proposal history keeps a copy for aggregation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvestmentRecord {
    pub proposal_id: u64,
    pub investor: Address,
    pub amount: i128,
    /// Ownership share of this single investment, in basis points of the
    /// funding goal.
    pub percentage_bps: i128,
    pub invested_at: u64,
}

/// Aggregated position of one investor in one proposal, recomputed from the
/// full investment history on every call.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvestorShare {
    pub investor: Address,
    pub total_amount: i128,
    pub percentage_bps: i128,
}

/// What a vote round decides.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RoundKind {
    /// DAO approval of the proposal itself.
    Approval,
    /// Release of the milestone with this index. Bound at opening time;
    /// finalizing a round whose index no longer matches the proposal's
    /// `current_milestone` fails.
    Milestone(u32),
}

/// A single governance round. `total_voters = yes_votes + no_votes` after
/// every call; tallies only accumulate. Finalization closes the round
/// whether or not the majority was reached.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteRound {
    pub id: u64,
    pub proposal_id: u64,
    pub kind: RoundKind,
    pub yes_votes: u64,
    pub no_votes: u64,
    pub total_voters: u64,
    pub closed: bool,
    pub created_at: u64,
}
