#![no_std]

pub mod errors;
mod events;
pub mod storage;

use errors::ShareError;
use events::{ProjectRegisteredEvent, SharesBurnedEvent, SharesMintedEvent, SharesTransferredEvent};
use soroban_sdk::{contract, contractimpl, Address, Env};
use storage::{DataKey, ProjectSupply};

#[contract]
pub struct ProjectSharesContract;

#[contractimpl]
impl ProjectSharesContract {
    fn read_balance(env: &Env, project_id: u64, addr: &Address) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Balance(project_id, addr.clone()))
            .unwrap_or(0)
    }

    fn write_balance(env: &Env, project_id: u64, addr: &Address, amount: i128) {
        env.storage()
            .persistent()
            .set(&DataKey::Balance(project_id, addr.clone()), &amount);
    }

    fn read_project(env: &Env, project_id: u64) -> Result<ProjectSupply, ShareError> {
        env.storage()
            .persistent()
            .get(&DataKey::Project(project_id))
            .ok_or(ShareError::ProjectNotFound)
    }

    fn require_treasury(env: &Env) -> Result<Address, ShareError> {
        let treasury: Address = env
            .storage()
            .instance()
            .get(&DataKey::Treasury)
            .ok_or(ShareError::NotInitialized)?;
        treasury.require_auth();
        Ok(treasury)
    }

    /// Initialize the ledger with the treasury address.
    ///
    /// The treasury holds the exclusive right to register projects and mint
    /// shares against them.
    pub fn initialize(env: Env, treasury: Address) -> Result<(), ShareError> {
        if env.storage().instance().has(&DataKey::Treasury) {
            return Err(ShareError::AlreadyInitialized);
        }
        treasury.require_auth();
        env.storage().instance().set(&DataKey::Treasury, &treasury);
        Ok(())
    }

    /// Open a share balance space for a project (treasury only).
    ///
    /// `supply_cap` is an optional hard bound on cumulative minting. With no
    /// cap, bounding the supply is the treasury's responsibility.
    pub fn register_project(
        env: Env,
        project_id: u64,
        supply_cap: Option<i128>,
    ) -> Result<(), ShareError> {
        Self::require_treasury(&env)?;

        if env
            .storage()
            .persistent()
            .has(&DataKey::Project(project_id))
        {
            return Err(ShareError::ProjectAlreadyExists);
        }
        if let Some(cap) = supply_cap {
            if cap <= 0 {
                return Err(ShareError::InvalidAmount);
            }
        }

        let project = ProjectSupply {
            project_id,
            total_minted: 0,
            supply_cap,
        };
        env.storage()
            .persistent()
            .set(&DataKey::Project(project_id), &project);

        ProjectRegisteredEvent {
            project_id,
            supply_cap,
        }
        .publish(&env);

        Ok(())
    }

    /// Mint shares of a project to `to` (treasury only).
    pub fn mint(env: Env, project_id: u64, to: Address, amount: i128) -> Result<(), ShareError> {
        Self::require_treasury(&env)?;

        if amount <= 0 {
            return Err(ShareError::InvalidAmount);
        }

        let mut project = Self::read_project(&env, project_id)?;
        let total_minted = project
            .total_minted
            .checked_add(amount)
            .ok_or(ShareError::Overflow)?;
        if let Some(cap) = project.supply_cap {
            if total_minted > cap {
                return Err(ShareError::SupplyCapExceeded);
            }
        }

        let balance = Self::read_balance(&env, project_id, &to);
        let new_balance = balance.checked_add(amount).ok_or(ShareError::Overflow)?;
        Self::write_balance(&env, project_id, &to, new_balance);

        project.total_minted = total_minted;
        env.storage()
            .persistent()
            .set(&DataKey::Project(project_id), &project);

        SharesMintedEvent {
            project_id,
            to,
            amount,
            total_minted,
        }
        .publish(&env);

        Ok(())
    }

    /// Move shares of a project between holders.
    pub fn transfer(
        env: Env,
        project_id: u64,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), ShareError> {
        from.require_auth();

        if amount <= 0 {
            return Err(ShareError::InvalidAmount);
        }
        // Existence check so transfers against unknown ids fail loudly.
        Self::read_project(&env, project_id)?;

        let from_balance = Self::read_balance(&env, project_id, &from);
        if from_balance < amount {
            return Err(ShareError::InsufficientBalance);
        }
        let to_balance = Self::read_balance(&env, project_id, &to);
        let new_to_balance = to_balance.checked_add(amount).ok_or(ShareError::Overflow)?;

        Self::write_balance(&env, project_id, &from, from_balance - amount);
        Self::write_balance(&env, project_id, &to, new_to_balance);

        SharesTransferredEvent {
            project_id,
            from,
            to,
            amount,
        }
        .publish(&env);

        Ok(())
    }

    /// Burn shares held by `from`. The cumulative minted counter is untouched.
    pub fn burn(env: Env, project_id: u64, from: Address, amount: i128) -> Result<(), ShareError> {
        from.require_auth();

        if amount <= 0 {
            return Err(ShareError::InvalidAmount);
        }
        Self::read_project(&env, project_id)?;

        let balance = Self::read_balance(&env, project_id, &from);
        if balance < amount {
            return Err(ShareError::InsufficientBalance);
        }
        Self::write_balance(&env, project_id, &from, balance - amount);

        SharesBurnedEvent {
            project_id,
            from,
            amount,
        }
        .publish(&env);

        Ok(())
    }

    /// Get a holder's share balance for a project.
    pub fn balance(env: Env, project_id: u64, addr: Address) -> i128 {
        Self::read_balance(&env, project_id, &addr)
    }

    /// Get the cumulative amount of shares ever minted for a project.
    pub fn total_minted(env: Env, project_id: u64) -> Result<i128, ShareError> {
        Ok(Self::read_project(&env, project_id)?.total_minted)
    }

    /// Get the supply cap of a project, if one was set at registration.
    pub fn supply_cap(env: Env, project_id: u64) -> Result<Option<i128>, ShareError> {
        Ok(Self::read_project(&env, project_id)?.supply_cap)
    }

    /// Get treasury address
    pub fn get_treasury(env: Env) -> Result<Address, ShareError> {
        env.storage()
            .instance()
            .get(&DataKey::Treasury)
            .ok_or(ShareError::NotInitialized)
    }
}

#[cfg(test)]
mod test;
