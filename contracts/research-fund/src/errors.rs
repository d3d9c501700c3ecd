use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum FundError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    ProposalNotFound = 4,
    RoundNotFound = 5,
    /// Research-team share above the 95% ceiling.
    InvalidPercentage = 6,
    /// Non-positive amount or funding goal.
    InvalidAmount = 7,
    /// Investment attempted before DAO approval.
    NotApproved = 8,
    /// Mutating operation attempted after revocation.
    Revoked = 9,
    /// Duplicate approval finalization.
    AlreadyApproved = 10,
    /// Milestone index access or advance beyond the list length.
    IndexOutOfBounds = 11,
    /// Vote or finalization against an already finalized round.
    RoundClosed = 12,
    /// Round bound to a different proposal, kind, or milestone index.
    RoundMismatch = 13,
    Overflow = 14,
}
