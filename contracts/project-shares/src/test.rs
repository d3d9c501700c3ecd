#![cfg(test)]

use crate::errors::ShareError;
use crate::{ProjectSharesContract, ProjectSharesContractClient};
use soroban_sdk::{testutils::Address as _, Address, Env};

fn setup_test<'a>(env: &Env) -> (ProjectSharesContractClient<'a>, Address) {
    let treasury = Address::generate(env);

    let contract_id = env.register(ProjectSharesContract, ());
    let client = ProjectSharesContractClient::new(env, &contract_id);
    client.initialize(&treasury);

    (client, treasury)
}

#[test]
fn test_initialize_once() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, treasury) = setup_test(&env);
    assert_eq!(client.get_treasury(), treasury);

    let result = client.try_initialize(&treasury);
    assert_eq!(result, Err(Ok(ShareError::AlreadyInitialized)));
}

#[test]
fn test_register_and_mint() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _) = setup_test(&env);
    let investor = Address::generate(&env);

    client.register_project(&1, &None);
    client.mint(&1, &investor, &500);
    client.mint(&1, &investor, &250);

    assert_eq!(client.balance(&1, &investor), 750);
    assert_eq!(client.total_minted(&1), 750);
    assert_eq!(client.supply_cap(&1), None);
}

#[test]
fn test_register_duplicate_fails() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _) = setup_test(&env);
    client.register_project(&1, &None);

    let result = client.try_register_project(&1, &None);
    assert_eq!(result, Err(Ok(ShareError::ProjectAlreadyExists)));
}

#[test]
fn test_mint_unknown_project_fails() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _) = setup_test(&env);
    let investor = Address::generate(&env);

    let result = client.try_mint(&42, &investor, &100);
    assert_eq!(result, Err(Ok(ShareError::ProjectNotFound)));
}

#[test]
fn test_supply_cap_enforced() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _) = setup_test(&env);
    let investor = Address::generate(&env);

    client.register_project(&1, &Some(1_000));
    client.mint(&1, &investor, &900);

    // 900 + 200 would cross the cap.
    let result = client.try_mint(&1, &investor, &200);
    assert_eq!(result, Err(Ok(ShareError::SupplyCapExceeded)));

    // Exactly reaching the cap is allowed.
    client.mint(&1, &investor, &100);
    assert_eq!(client.total_minted(&1), 1_000);
}

#[test]
fn test_invalid_cap_rejected() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _) = setup_test(&env);
    let result = client.try_register_project(&1, &Some(0));
    assert_eq!(result, Err(Ok(ShareError::InvalidAmount)));
}

#[test]
fn test_transfer_splits_position() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _) = setup_test(&env);
    let alice = Address::generate(&env);
    let bob = Address::generate(&env);

    client.register_project(&1, &None);
    client.mint(&1, &alice, &1_000);
    client.transfer(&1, &alice, &bob, &300);

    assert_eq!(client.balance(&1, &alice), 700);
    assert_eq!(client.balance(&1, &bob), 300);
    assert_eq!(client.total_minted(&1), 1_000);
}

#[test]
fn test_transfer_insufficient_balance() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _) = setup_test(&env);
    let alice = Address::generate(&env);
    let bob = Address::generate(&env);

    client.register_project(&1, &None);
    client.mint(&1, &alice, &100);

    let result = client.try_transfer(&1, &alice, &bob, &200);
    assert_eq!(result, Err(Ok(ShareError::InsufficientBalance)));
}

#[test]
fn test_balances_scoped_per_project() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _) = setup_test(&env);
    let investor = Address::generate(&env);

    client.register_project(&1, &None);
    client.register_project(&2, &None);
    client.mint(&1, &investor, &400);

    assert_eq!(client.balance(&1, &investor), 400);
    assert_eq!(client.balance(&2, &investor), 0);
}

#[test]
fn test_burn_keeps_cumulative_minted() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _) = setup_test(&env);
    let investor = Address::generate(&env);

    client.register_project(&1, &None);
    client.mint(&1, &investor, &500);
    client.burn(&1, &investor, &200);

    assert_eq!(client.balance(&1, &investor), 300);
    assert_eq!(client.total_minted(&1), 500);
}
