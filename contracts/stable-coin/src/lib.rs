#![no_std]

pub mod errors;
mod events;
pub mod storage;

use errors::StableCoinError;
use events::{AdminChangedEvent, BurnEvent, MintEvent, TransferEvent};
use soroban_sdk::{contract, contractimpl, Address, Env, String};
use storage::{DataKey, TokenMetadata};

#[contract]
pub struct StableCoinContract;

#[contractimpl]
impl StableCoinContract {
    fn read_balance(env: &Env, addr: &Address) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Balance(addr.clone()))
            .unwrap_or(0)
    }

    fn write_balance(env: &Env, addr: &Address, amount: i128) {
        env.storage()
            .persistent()
            .set(&DataKey::Balance(addr.clone()), &amount);
    }

    /// Deduct `amount` from `from`, failing on insufficient funds.
    fn spend_balance(env: &Env, from: &Address, amount: i128) -> Result<(), StableCoinError> {
        let balance = Self::read_balance(env, from);
        if balance < amount {
            return Err(StableCoinError::InsufficientBalance);
        }
        Self::write_balance(env, from, balance - amount);
        Ok(())
    }

    /// Credit `amount` to `to` with an overflow guard.
    fn receive_balance(env: &Env, to: &Address, amount: i128) -> Result<(), StableCoinError> {
        let balance = Self::read_balance(env, to);
        let new_balance = balance
            .checked_add(amount)
            .ok_or(StableCoinError::Overflow)?;
        Self::write_balance(env, to, new_balance);
        Ok(())
    }

    /// Initialize the currency with an admin and its metadata.
    ///
    /// One-time setup: re-running fails with `AlreadyInitialized`.
    pub fn initialize(
        env: Env,
        admin: Address,
        decimals: u32,
        name: String,
        symbol: String,
    ) -> Result<(), StableCoinError> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(StableCoinError::AlreadyInitialized);
        }
        admin.require_auth();

        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(
            &DataKey::Metadata,
            &TokenMetadata {
                decimals,
                name,
                symbol,
            },
        );
        env.storage().instance().set(&DataKey::TotalMinted, &0i128);

        Ok(())
    }

    /// Mint new coins to `to` (admin only).
    pub fn mint(env: Env, to: Address, amount: i128) -> Result<(), StableCoinError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(StableCoinError::NotInitialized)?;
        admin.require_auth();

        if amount <= 0 {
            return Err(StableCoinError::InvalidAmount);
        }

        Self::receive_balance(&env, &to, amount)?;

        // Cumulative supply counter: grows on every mint, never shrinks.
        let total: i128 = env
            .storage()
            .instance()
            .get(&DataKey::TotalMinted)
            .unwrap_or(0);
        let total_minted = total.checked_add(amount).ok_or(StableCoinError::Overflow)?;
        env.storage()
            .instance()
            .set(&DataKey::TotalMinted, &total_minted);

        MintEvent {
            to,
            amount,
            total_minted,
        }
        .publish(&env);

        Ok(())
    }

    /// Transfer coins between holders.
    pub fn transfer(
        env: Env,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), StableCoinError> {
        if !env.storage().instance().has(&DataKey::Admin) {
            return Err(StableCoinError::NotInitialized);
        }
        from.require_auth();

        if amount <= 0 {
            return Err(StableCoinError::InvalidAmount);
        }

        Self::spend_balance(&env, &from, amount)?;
        Self::receive_balance(&env, &to, amount)?;

        TransferEvent { from, to, amount }.publish(&env);

        Ok(())
    }

    /// Burn coins held by `from`. Does not reduce the cumulative minted total.
    pub fn burn(env: Env, from: Address, amount: i128) -> Result<(), StableCoinError> {
        if !env.storage().instance().has(&DataKey::Admin) {
            return Err(StableCoinError::NotInitialized);
        }
        from.require_auth();

        if amount <= 0 {
            return Err(StableCoinError::InvalidAmount);
        }

        Self::spend_balance(&env, &from, amount)?;

        BurnEvent { from, amount }.publish(&env);

        Ok(())
    }

    /// Get the balance of an address.
    pub fn balance(env: Env, addr: Address) -> i128 {
        Self::read_balance(&env, &addr)
    }

    /// Get the cumulative amount ever minted.
    pub fn total_minted(env: Env) -> Result<i128, StableCoinError> {
        env.storage()
            .instance()
            .get(&DataKey::TotalMinted)
            .ok_or(StableCoinError::NotInitialized)
    }

    pub fn decimals(env: Env) -> Result<u32, StableCoinError> {
        Ok(Self::metadata(&env)?.decimals)
    }

    pub fn name(env: Env) -> Result<String, StableCoinError> {
        Ok(Self::metadata(&env)?.name)
    }

    pub fn symbol(env: Env) -> Result<String, StableCoinError> {
        Ok(Self::metadata(&env)?.symbol)
    }

    fn metadata(env: &Env) -> Result<TokenMetadata, StableCoinError> {
        env.storage()
            .instance()
            .get(&DataKey::Metadata)
            .ok_or(StableCoinError::NotInitialized)
    }

    /// Get admin address
    pub fn get_admin(env: Env) -> Result<Address, StableCoinError> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(StableCoinError::NotInitialized)
    }

    /// Transfer the admin role to `new_admin`.
    ///
    /// Requires authorization from the current admin. Emits [`AdminChangedEvent`].
    pub fn set_admin(
        env: Env,
        current_admin: Address,
        new_admin: Address,
    ) -> Result<(), StableCoinError> {
        let stored_admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(StableCoinError::NotInitialized)?;
        if current_admin != stored_admin {
            return Err(StableCoinError::Unauthorized);
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
}
