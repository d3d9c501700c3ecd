use soroban_sdk::{token, Address, Env};

/// Move stable-coin units between addresses through the standard token
/// client. Any token-side failure traps and rolls back the whole invocation.
pub fn transfer(env: &Env, token_address: &Address, from: &Address, to: &Address, amount: &i128) {
    let client = token::Client::new(env, token_address);
    client.transfer(from, to, amount);
}
