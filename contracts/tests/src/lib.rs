#![cfg(test)]
extern crate std;

use soroban_sdk::{testutils::Address as _, Address, Env, String, Vec};

use project_shares::{ProjectSharesContract, ProjectSharesContractClient as SharesClient};
use research_fund::errors::FundError;
use research_fund::storage::ProposalStatus;
use research_fund::{ResearchFundContract, ResearchFundContractClient as FundClient};
use stable_coin::{StableCoinContract, StableCoinContractClient as CoinClient};

#[test]
fn test_research_funding_protocol_e2e() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let researcher = Address::generate(&env);
    let alice = Address::generate(&env);
    let bob = Address::generate(&env);

    // Deploy the three contracts from source.
    let coin_id = env.register(StableCoinContract, ());
    let shares_id = env.register(ProjectSharesContract, ());
    let fund_id = env.register(ResearchFundContract, ());

    let coin = CoinClient::new(&env, &coin_id);
    let shares = SharesClient::new(&env, &shares_id);
    let fund = FundClient::new(&env, &fund_id);

    // Wire the protocol: the fund contract is the share ledger's treasury
    // and pays through the stable coin.
    coin.initialize(
        &admin,
        &7u32,
        &String::from_str(&env, "Research Dollar"),
        &String::from_str(&env, "RUSD"),
    );
    shares.initialize(&fund_id);
    fund.initialize(&admin, &coin_id, &shares_id);

    coin.mint(&alice, &10_000);
    coin.mint(&bob, &10_000);
    assert_eq!(coin.total_minted(), 20_000);

    // Researcher opens a campaign with two milestones.
    let mut revenue_models = Vec::new(&env);
    revenue_models.push_back(String::from_str(&env, "licensing"));
    revenue_models.push_back(String::from_str(&env, "royalties"));
    let mut milestones = Vec::new(&env);
    milestones.push_back(String::from_str(&env, "prototype cell"));
    milestones.push_back(String::from_str(&env, "100-cycle validation"));
    let proposal_id = fund.create_proposal(
        &researcher,
        &String::from_str(&env, "Open battery chemistry"),
        &String::from_str(&env, "Sodium-ion cells from abundant materials"),
        &String::from_str(&env, "energy"),
        &5_000i128,
        &(60 * 24 * 3600u64),
        &revenue_models,
        &70u32,
        &milestones,
    );

    // Investing before DAO approval is rejected.
    assert_eq!(
        fund.try_invest(&alice, &proposal_id, &1_000),
        Err(Ok(FundError::NotApproved))
    );

    // Approval round: 3 of 4 votes in favor.
    let approval = fund.open_approval_round(&proposal_id);
    fund.vote(&alice, &approval, &true);
    fund.vote(&bob, &approval, &true);
    fund.vote(&Address::generate(&env), &approval, &true);
    fund.vote(&Address::generate(&env), &approval, &false);
    fund.finalize_proposal_approval(&proposal_id, &approval);

    // Investments flow straight to the researcher and mint shares 1:1.
    fund.invest(&alice, &proposal_id, &2_000);
    fund.invest(&bob, &proposal_id, &3_500);

    assert_eq!(coin.balance(&alice), 8_000);
    assert_eq!(coin.balance(&bob), 6_500);
    assert_eq!(coin.balance(&researcher), 5_500);
    assert_eq!(shares.balance(&proposal_id, &alice), 2_000);
    assert_eq!(shares.balance(&proposal_id, &bob), 3_500);
    assert_eq!(shares.total_minted(&proposal_id), 5_500);

    // Goal crossed on the second investment.
    let proposal = fund.get_proposal(&proposal_id);
    assert_eq!(proposal.status, ProposalStatus::Funded);
    assert_eq!(proposal.total_raised, 5_500);

    let share = fund.get_investor_share(&proposal_id, &alice);
    assert_eq!(share.total_amount, 2_000);
    assert_eq!(share.percentage_bps, 4_000); // 2000 / 5000 of the goal

    // First milestone passes.
    let first = fund.open_milestone_round(&proposal_id);
    fund.vote(&alice, &first, &true);
    fund.vote(&bob, &first, &true);
    fund.finalize_milestone(&proposal_id, &first);
    assert_eq!(fund.get_milestone_status(&proposal_id, &0), true);

    // Second milestone ties, so it stays pending and needs a fresh round.
    let second = fund.open_milestone_round(&proposal_id);
    fund.vote(&alice, &second, &true);
    fund.vote(&bob, &second, &false);
    fund.finalize_milestone(&proposal_id, &second);
    assert_eq!(fund.get_milestone_status(&proposal_id, &1), false);
    assert_eq!(fund.get_proposal(&proposal_id).current_milestone, 1);

    let retry = fund.open_milestone_round(&proposal_id);
    fund.vote(&alice, &retry, &true);
    fund.vote(&bob, &retry, &true);
    fund.vote(&Address::generate(&env), &retry, &true);
    fund.finalize_milestone(&proposal_id, &retry);
    assert_eq!(fund.get_milestone_status(&proposal_id, &1), true);
    assert_eq!(fund.get_proposal(&proposal_id).current_milestone, 2);

    // Revocation after full funding: the flag blocks new investments but
    // the accounting status stays Funded.
    fund.revoke(&admin, &proposal_id);
    let proposal = fund.get_proposal(&proposal_id);
    assert!(proposal.revoked);
    assert_eq!(proposal.status, ProposalStatus::Funded);
    assert_eq!(
        fund.try_invest(&alice, &proposal_id, &100),
        Err(Ok(FundError::Revoked))
    );

    // Secondary movement of the ownership position stays possible on the
    // share ledger itself.
    shares.transfer(&proposal_id, &alice, &bob, &500);
    assert_eq!(shares.balance(&proposal_id, &alice), 1_500);
    assert_eq!(shares.balance(&proposal_id, &bob), 4_000);

    std::println!("research funding protocol e2e passed");
}
