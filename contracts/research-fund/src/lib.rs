#![no_std]

pub mod errors;
mod events;
pub mod storage;
mod token;

use errors::FundError;
use events::{
    AdminChangedEvent, InitializedEvent, InvestmentEvent, MilestoneApprovedEvent,
    ProposalApprovedEvent, ProposalCreatedEvent, ProposalFundedEvent, ProposalRevokedEvent,
    RoundOpenedEvent, UpgradedEvent, VoteCastEvent,
};
use soroban_sdk::{contract, contractimpl, Address, BytesN, Env, String, Vec};
use storage::{
    DataKey, InvestmentRecord, InvestorShare, Proposal, ProposalStatus, RoundKind, VoteRound,
    BASIS_POINTS, MAX_RESEARCH_TEAM_PERCENTAGE, PLATFORM_PERCENTAGE,
};

#[contract]
pub struct ResearchFundContract;

#[contractimpl]
impl ResearchFundContract {
    fn read_proposal(env: &Env, proposal_id: u64) -> Result<Proposal, FundError> {
        env.storage()
            .persistent()
            .get(&DataKey::Proposal(proposal_id))
            .ok_or(FundError::ProposalNotFound)
    }

    fn write_proposal(env: &Env, proposal: &Proposal) {
        env.storage()
            .persistent()
            .set(&DataKey::Proposal(proposal.id), proposal);
    }

    fn read_round(env: &Env, round_id: u64) -> Result<VoteRound, FundError> {
        env.storage()
            .persistent()
            .get(&DataKey::VoteRound(round_id))
            .ok_or(FundError::RoundNotFound)
    }

    fn write_round(env: &Env, round: &VoteRound) {
        env.storage()
            .persistent()
            .set(&DataKey::VoteRound(round.id), round);
    }

    fn read_investments(env: &Env, proposal_id: u64) -> Vec<InvestmentRecord> {
        env.storage()
            .persistent()
            .get(&DataKey::Investments(proposal_id))
            .unwrap_or_else(|| Vec::new(env))
    }

    fn next_id(env: &Env, key: DataKey) -> u64 {
        let id: u64 = env.storage().instance().get(&key).unwrap_or(0);
        env.storage().instance().set(&key, &(id + 1));
        id
    }

    /// Strict majority of votes cast: integer division, so a 50/50 tie
    /// does not pass.
    fn has_majority(round: &VoteRound) -> bool {
        round.yes_votes > round.total_voters / 2
    }

    /// Ownership share of `amount` against `funding_goal`, in basis points.
    /// A zero goal yields zero rather than dividing by it.
    fn percentage_of_goal(amount: i128, funding_goal: i128) -> Result<i128, FundError> {
        if funding_goal <= 0 {
            return Ok(0);
        }
        let scaled = amount
            .checked_mul(BASIS_POINTS)
            .ok_or(FundError::Overflow)?;
        Ok(scaled / funding_goal)
    }

    fn share_token(env: &Env) -> Result<Address, FundError> {
        env.storage()
            .instance()
            .get(&DataKey::ShareToken)
            .ok_or(FundError::NotInitialized)
    }

    /// Initialize the contract with the governance admin and the two ledger
    /// addresses.
    pub fn initialize(
        env: Env,
        admin: Address,
        stable_coin: Address,
        share_token: Address,
    ) -> Result<(), FundError> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(FundError::AlreadyInitialized);
        }
        admin.require_auth();

        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage()
            .instance()
            .set(&DataKey::StableCoin, &stable_coin);
        env.storage()
            .instance()
            .set(&DataKey::ShareToken, &share_token);
        env.storage().instance().set(&DataKey::NextProposalId, &0u64);
        env.storage().instance().set(&DataKey::NextRoundId, &0u64);

        InitializedEvent {
            admin,
            stable_coin,
            share_token,
        }
        .publish(&env);

        Ok(())
    }

    /// Create a research proposal.
    ///
    /// The platform keeps a fixed 5% revenue share; the research team takes
    /// `research_team_percentage` (at most 95) and investors the remainder,
    /// so the three always sum to 100. Milestone approvals start all-false
    /// and the proposal awaits a DAO approval round before it can accept
    /// investments.
    pub fn create_proposal(
        env: Env,
        researcher: Address,
        title: String,
        abstract_text: String,
        category: String,
        funding_goal: i128,
        campaign_duration: u64,
        revenue_models: Vec<String>,
        research_team_percentage: u32,
        milestones: Vec<String>,
    ) -> Result<u64, FundError> {
        if !env.storage().instance().has(&DataKey::Admin) {
            return Err(FundError::NotInitialized);
        }
        researcher.require_auth();

        if research_team_percentage > MAX_RESEARCH_TEAM_PERCENTAGE {
            return Err(FundError::InvalidPercentage);
        }
        if funding_goal <= 0 {
            return Err(FundError::InvalidAmount);
        }

        let proposal_id = Self::next_id(&env, DataKey::NextProposalId);

        let mut milestone_approvals = Vec::new(&env);
        for _ in 0..milestones.len() {
            milestone_approvals.push_back(false);
        }

        let proposal = Proposal {
            id: proposal_id,
            researcher: researcher.clone(),
            title,
            abstract_text,
            category,
            funding_goal,
            campaign_duration,
            revenue_models,
            created_at: env.ledger().timestamp(),
            status: ProposalStatus::Active,
            research_team_percentage,
            platform_percentage: PLATFORM_PERCENTAGE,
            investor_percentage: MAX_RESEARCH_TEAM_PERCENTAGE - research_team_percentage,
            total_raised: 0,
            current_milestone: 0,
            milestones,
            milestone_approvals,
            revoked: false,
            dao_approved: false,
        };
        Self::write_proposal(&env, &proposal);
        env.storage()
            .persistent()
            .set(&DataKey::Investments(proposal_id), &Vec::<InvestmentRecord>::new(&env));

        // Open the share balance space for this proposal. No supply cap:
        // shares are minted on demand per investment and overfunding past
        // the goal is allowed.
        let shares =
            project_shares::ProjectSharesContractClient::new(&env, &Self::share_token(&env)?);
        shares.register_project(&proposal_id, &None);

        ProposalCreatedEvent {
            researcher,
            proposal_id,
            funding_goal,
        }
        .publish(&env);

        Ok(proposal_id)
    }

    /// Invest stable coins into an approved proposal.
    ///
    /// The payment goes directly to the researcher (no escrow) and the
    /// investor receives ownership shares equal to the amount. Returns the
    /// investment record the history keeps a copy of.
    pub fn invest(
        env: Env,
        investor: Address,
        proposal_id: u64,
        amount: i128,
    ) -> Result<InvestmentRecord, FundError> {
        investor.require_auth();

        let mut proposal = Self::read_proposal(&env, proposal_id)?;
        if !proposal.dao_approved {
            return Err(FundError::NotApproved);
        }
        if proposal.revoked {
            return Err(FundError::Revoked);
        }
        if amount <= 0 {
            return Err(FundError::InvalidAmount);
        }

        // Direct transfer investor -> researcher, then share issuance.
        let stable_coin: Address = env
            .storage()
            .instance()
            .get(&DataKey::StableCoin)
            .ok_or(FundError::NotInitialized)?;
        token::transfer(&env, &stable_coin, &investor, &proposal.researcher, &amount);

        let shares =
            project_shares::ProjectSharesContractClient::new(&env, &Self::share_token(&env)?);
        shares.mint(&proposal_id, &investor, &amount);

        proposal.total_raised = proposal
            .total_raised
            .checked_add(amount)
            .ok_or(FundError::Overflow)?;

        let percentage_bps = Self::percentage_of_goal(amount, proposal.funding_goal)?;
        let record = InvestmentRecord {
            proposal_id,
            investor: investor.clone(),
            amount,
            percentage_bps,
            invested_at: env.ledger().timestamp(),
        };
        let mut investments = Self::read_investments(&env, proposal_id);
        investments.push_back(record.clone());
        env.storage()
            .persistent()
            .set(&DataKey::Investments(proposal_id), &investments);

        // One-way transition at the first call where the goal is reached.
        if proposal.status == ProposalStatus::Active
            && proposal.total_raised >= proposal.funding_goal
        {
            proposal.status = ProposalStatus::Funded;
            ProposalFundedEvent {
                proposal_id,
                total_raised: proposal.total_raised,
            }
            .publish(&env);
        }
        Self::write_proposal(&env, &proposal);

        InvestmentEvent {
            investor,
            proposal_id,
            amount,
            percentage_bps,
        }
        .publish(&env);

        Ok(record)
    }

    /// Aggregate an investor's position by scanning the full investment
    /// history. The percentage is recomputed from the summed amount, not
    /// read from a stored running total.
    pub fn get_investor_share(
        env: Env,
        proposal_id: u64,
        investor: Address,
    ) -> Result<InvestorShare, FundError> {
        let proposal = Self::read_proposal(&env, proposal_id)?;

        let mut total_amount: i128 = 0;
        for record in Self::read_investments(&env, proposal_id).iter() {
            if record.investor == investor {
                total_amount = total_amount
                    .checked_add(record.amount)
                    .ok_or(FundError::Overflow)?;
            }
        }

        let percentage_bps = Self::percentage_of_goal(total_amount, proposal.funding_goal)?;
        Ok(InvestorShare {
            investor,
            total_amount,
            percentage_bps,
        })
    }

    /// Open a voting round for DAO approval of a proposal.
    pub fn open_approval_round(env: Env, proposal_id: u64) -> Result<u64, FundError> {
        let proposal = Self::read_proposal(&env, proposal_id)?;
        if proposal.revoked {
            return Err(FundError::Revoked);
        }
        if proposal.dao_approved {
            return Err(FundError::AlreadyApproved);
        }
        Self::open_round(&env, proposal_id, RoundKind::Approval, None)
    }

    /// Open a voting round for the proposal's next milestone.
    ///
    /// The round binds to `current_milestone` at opening time; fails with
    /// `IndexOutOfBounds` when every milestone is already approved.
    pub fn open_milestone_round(env: Env, proposal_id: u64) -> Result<u64, FundError> {
        let proposal = Self::read_proposal(&env, proposal_id)?;
        if proposal.revoked {
            return Err(FundError::Revoked);
        }
        if proposal.current_milestone >= proposal.milestones.len() {
            return Err(FundError::IndexOutOfBounds);
        }
        let index = proposal.current_milestone;
        Self::open_round(&env, proposal_id, RoundKind::Milestone(index), Some(index))
    }

    fn open_round(
        env: &Env,
        proposal_id: u64,
        kind: RoundKind,
        milestone_index: Option<u32>,
    ) -> Result<u64, FundError> {
        let round_id = Self::next_id(env, DataKey::NextRoundId);
        let round = VoteRound {
            id: round_id,
            proposal_id,
            kind,
            yes_votes: 0,
            no_votes: 0,
            total_voters: 0,
            closed: false,
            created_at: env.ledger().timestamp(),
        };
        Self::write_round(env, &round);

        RoundOpenedEvent {
            proposal_id,
            round_id,
            milestone_index,
        }
        .publish(env);

        Ok(round_id)
    }

    /// Cast a vote on an open round.
    ///
    /// One vote per call; there is no duplicate-voter rejection. The voter
    /// set recorded here is advisory — enforcement is delegated to the
    /// authorization layer, which can consult `has_voted`.
    pub fn vote(env: Env, voter: Address, round_id: u64, approve: bool) -> Result<(), FundError> {
        voter.require_auth();

        let mut round = Self::read_round(&env, round_id)?;
        if round.closed {
            return Err(FundError::RoundClosed);
        }

        round.total_voters = round
            .total_voters
            .checked_add(1)
            .ok_or(FundError::Overflow)?;
        if approve {
            round.yes_votes = round.yes_votes.checked_add(1).ok_or(FundError::Overflow)?;
        } else {
            round.no_votes = round.no_votes.checked_add(1).ok_or(FundError::Overflow)?;
        }
        Self::write_round(&env, &round);

        env.storage()
            .persistent()
            .set(&DataKey::Voted(round_id, voter.clone()), &true);

        VoteCastEvent {
            voter,
            round_id,
            approve,
        }
        .publish(&env);

        Ok(())
    }

    /// Apply an approval round's outcome to the proposal.
    ///
    /// Closes the round either way. With a strict majority of votes cast the
    /// proposal becomes DAO-approved; without one this is a no-op on the
    /// proposal and the caller must open a fresh round to retry.
    pub fn finalize_proposal_approval(
        env: Env,
        proposal_id: u64,
        round_id: u64,
    ) -> Result<(), FundError> {
        let mut proposal = Self::read_proposal(&env, proposal_id)?;
        let mut round = Self::read_round(&env, round_id)?;

        if round.proposal_id != proposal_id || round.kind != RoundKind::Approval {
            return Err(FundError::RoundMismatch);
        }
        if round.closed {
            return Err(FundError::RoundClosed);
        }
        if proposal.revoked {
            return Err(FundError::Revoked);
        }
        if proposal.dao_approved {
            return Err(FundError::AlreadyApproved);
        }

        round.closed = true;
        Self::write_round(&env, &round);

        if Self::has_majority(&round) {
            proposal.dao_approved = true;
            Self::write_proposal(&env, &proposal);

            ProposalApprovedEvent {
                proposal_id,
                yes_votes: round.yes_votes,
                total_voters: round.total_voters,
            }
            .publish(&env);
        }

        Ok(())
    }

    /// Apply a milestone round's outcome to the proposal.
    ///
    /// With a strict majority the bound milestone is marked approved and
    /// `current_milestone` advances; without one the round just closes. A
    /// round opened for an index the proposal has already moved past fails
    /// with `RoundMismatch`.
    pub fn finalize_milestone(env: Env, proposal_id: u64, round_id: u64) -> Result<(), FundError> {
        let mut proposal = Self::read_proposal(&env, proposal_id)?;
        if proposal.revoked {
            return Err(FundError::Revoked);
        }
        // Guard against over-advancing before any tally is considered.
        if proposal.current_milestone >= proposal.milestones.len() {
            return Err(FundError::IndexOutOfBounds);
        }

        let mut round = Self::read_round(&env, round_id)?;
        if round.proposal_id != proposal_id
            || round.kind != RoundKind::Milestone(proposal.current_milestone)
        {
            return Err(FundError::RoundMismatch);
        }
        if round.closed {
            return Err(FundError::RoundClosed);
        }

        round.closed = true;
        Self::write_round(&env, &round);

        if Self::has_majority(&round) {
            let index = proposal.current_milestone;
            proposal.milestone_approvals.set(index, true);
            proposal.current_milestone = index + 1;
            Self::write_proposal(&env, &proposal);

            MilestoneApprovedEvent {
                proposal_id,
                milestone_index: index,
            }
            .publish(&env);
        }

        Ok(())
    }

    /// Revoke a proposal (admin only).
    ///
    /// Blocks all further investment, milestone funding, and approval. A
    /// proposal that already reached its goal keeps the `Funded` status for
    /// accounting; only `Active` proposals are demoted to `Revoked`.
    pub fn revoke(env: Env, caller: Address, proposal_id: u64) -> Result<(), FundError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(FundError::NotInitialized)?;
        if caller != admin {
            return Err(FundError::Unauthorized);
        }
        caller.require_auth();

        let mut proposal = Self::read_proposal(&env, proposal_id)?;
        if proposal.revoked {
            return Err(FundError::Revoked);
        }
        proposal.revoked = true;
        if proposal.status == ProposalStatus::Active {
            proposal.status = ProposalStatus::Revoked;
        }
        Self::write_proposal(&env, &proposal);

        ProposalRevokedEvent {
            proposal_id,
            caller,
        }
        .publish(&env);

        Ok(())
    }

    /// Get a proposal by id.
    pub fn get_proposal(env: Env, proposal_id: u64) -> Result<Proposal, FundError> {
        Self::read_proposal(&env, proposal_id)
    }

    pub fn get_funding_goal(env: Env, proposal_id: u64) -> Result<i128, FundError> {
        Ok(Self::read_proposal(&env, proposal_id)?.funding_goal)
    }

    pub fn get_total_raised(env: Env, proposal_id: u64) -> Result<i128, FundError> {
        Ok(Self::read_proposal(&env, proposal_id)?.total_raised)
    }

    /// Approval flag of one milestone; `IndexOutOfBounds` past the list.
    pub fn get_milestone_status(
        env: Env,
        proposal_id: u64,
        index: u32,
    ) -> Result<bool, FundError> {
        Self::read_proposal(&env, proposal_id)?
            .milestone_approvals
            .get(index)
            .ok_or(FundError::IndexOutOfBounds)
    }

    /// Full investment history of a proposal, in transaction order.
    pub fn get_investments(
        env: Env,
        proposal_id: u64,
    ) -> Result<Vec<InvestmentRecord>, FundError> {
        Self::read_proposal(&env, proposal_id)?;
        Ok(Self::read_investments(&env, proposal_id))
    }

    pub fn get_investment_count(env: Env, proposal_id: u64) -> Result<u32, FundError> {
        Self::read_proposal(&env, proposal_id)?;
        Ok(Self::read_investments(&env, proposal_id).len())
    }

    /// Get a vote round by id.
    pub fn get_vote_round(env: Env, round_id: u64) -> Result<VoteRound, FundError> {
        Self::read_round(&env, round_id)
    }

    /// Whether an address has voted on a round. Advisory; duplicate votes
    /// are still counted.
    pub fn has_voted(env: Env, round_id: u64, voter: Address) -> bool {
        env.storage()
            .persistent()
            .get(&DataKey::Voted(round_id, voter))
            .unwrap_or(false)
    }

    /// Get admin address
    pub fn get_admin(env: Env) -> Result<Address, FundError> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(FundError::NotInitialized)
    }

    /// Transfer the admin role to `new_admin`.
    ///
    /// Requires authorization from the current admin. Emits [`AdminChangedEvent`].
    pub fn set_admin(
        env: Env,
        current_admin: Address,
        new_admin: Address,
    ) -> Result<(), FundError> {
        let stored_admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(FundError::NotInitialized)?;
        if current_admin != stored_admin {
            return Err(FundError::Unauthorized);
        }
        current_admin.require_auth();
        env.storage().instance().set(&DataKey::Admin, &new_admin);
        AdminChangedEvent {
            old_admin: current_admin,
            new_admin,
        }
        .publish(&env);
        Ok(())
    }

    /// Upgrade the contract WASM to a new hash.
    ///
    /// Only the stored admin may call this. Emits [`UpgradedEvent`] on success.
    pub fn upgrade(env: Env, caller: Address, new_wasm_hash: BytesN<32>) -> Result<(), FundError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(FundError::NotInitialized)?;
        if caller != admin {
            return Err(FundError::Unauthorized);
        }
        caller.require_auth();
        env.deployer()
            .update_current_contract_wasm(new_wasm_hash.clone());
        UpgradedEvent {
            admin: caller,
            new_wasm_hash,
        }
        .publish(&env);
        Ok(())
    }
}
