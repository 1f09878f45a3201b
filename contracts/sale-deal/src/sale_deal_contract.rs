use crate::entities::*;
use crate::errors::*;
use soroban_sdk::{
    contract, contractimpl, log, panic_with_error, symbol_short, token, Address, Env,
};

#[contract]
pub struct SaleDealContract;

#[contractimpl]
impl SaleDealContract {
    /// Creates the deal in `NotListed` for `seller`, settling in `token`.
    pub fn __constructor(env: Env, seller: Address, token: Address) {
        if seller == token {
            panic_with_error!(&env, Error::InvalidArgument);
        }

        let deal = Deal {
            seller: seller.clone(),
            buyer: None,
            price: 0,
            state: DealState::NotListed,
        };
        env.storage().instance().set(&DataKey::Deal, &deal);
        env.storage().instance().set(&DataKey::Token, &token);

        log!(&env, "Deal opened for seller", seller);
    }

    pub fn list_for_sale(env: Env, caller: Address, price: i128) -> Result<(), Error> {
        caller.require_auth();
        let mut deal = read_deal(&env)?;
        if caller != deal.seller {
            return Err(Error::Unauthorized);
        }
        if deal.state != DealState::NotListed {
            return Err(Error::InvalidState);
        }
        if price <= 0 {
            return Err(Error::InvalidArgument);
        }

        deal.price = price;
        deal.state = DealState::Listed;
        env.storage().instance().set(&DataKey::Deal, &deal);

        env.events().publish((symbol_short!("listed"),), price);
        log!(&env, "Deal listed at price", price);
        Ok(())
    }

    /// Escrows exactly `payment` from `caller`. The payment must equal the
    /// listed price; nothing is pulled on any rejection.
    pub fn buy(env: Env, caller: Address, payment: i128) -> Result<(), Error> {
        caller.require_auth();
        let listed = read_deal(&env)?;
        if caller == listed.seller {
            return Err(Error::Unauthorized);
        }
        if listed.state != DealState::Listed {
            return Err(Error::InvalidState);
        }
        if payment != listed.price {
            return Err(Error::InvalidArgument);
        }

        let mut sold = listed.clone();
        sold.buyer = Some(caller.clone());
        sold.state = DealState::Sold;
        env.storage().instance().set(&DataKey::Deal, &sold);

        if let Err(err) = Self::move_funds(&env, &caller, &env.current_contract_address(), payment)
        {
            env.storage().instance().set(&DataKey::Deal, &listed);
            log!(&env, "Payment pull failed, deal stays listed", caller);
            return Err(err);
        }

        env.events()
            .publish((symbol_short!("bought"),), (caller.clone(), payment));
        log!(&env, "Deal bought", caller, payment);
        Ok(())
    }

    /// Settles the escrow: the deal completes and the price becomes the
    /// seller's withdrawable credit. No value leaves the contract here.
    pub fn confirm_sale(env: Env, caller: Address) -> Result<(), Error> {
        caller.require_auth();
        let mut deal = read_deal(&env)?;
        if caller != deal.seller {
            return Err(Error::Unauthorized);
        }
        if deal.state != DealState::Sold {
            return Err(Error::InvalidState);
        }

        let credit = pending_of(&env, &deal.seller)
            .checked_add(deal.price)
            .ok_or(Error::InvalidArgument)?;

        deal.state = DealState::Completed;
        env.storage().instance().set(&DataKey::Deal, &deal);
        env.storage()
            .persistent()
            .set(&DataKey::Pending(deal.seller.clone()), &credit);

        env.events()
            .publish((symbol_short!("confirmed"),), (deal.seller, deal.price));
        log!(&env, "Sale confirmed, seller credited", deal.price);
        Ok(())
    }

    /// Pays out the caller's whole credit and returns the amount sent.
    ///
    /// The ledger entry is cleared before the token call, so anything the
    /// transfer triggers sees a zero balance. A failed transfer puts the
    /// entry back and reports `TransferFailed`.
    pub fn withdraw_payments(env: Env, caller: Address) -> Result<i128, Error> {
        caller.require_auth();
        let key = DataKey::Pending(caller.clone());
        let owed = pending_of(&env, &caller);
        if owed <= 0 {
            return Err(Error::NothingToWithdraw);
        }

        env.storage().persistent().remove(&key);

        if let Err(err) = Self::move_funds(&env, &env.current_contract_address(), &caller, owed) {
            env.storage().persistent().set(&key, &owed);
            log!(&env, "Withdrawal failed, credit restored", caller, owed);
            return Err(err);
        }

        env.events()
            .publish((symbol_short!("withdrawn"),), (caller.clone(), owed));
        log!(&env, "Payments withdrawn", caller, owed);
        Ok(owed)
    }

    pub fn get_deal(env: Env) -> Result<Deal, Error> {
        read_deal(&env)
    }

    pub fn state(env: Env) -> Result<DealState, Error> {
        Ok(read_deal(&env)?.state)
    }

    pub fn pending_withdrawal(env: Env, id: Address) -> i128 {
        pending_of(&env, &id)
    }

    /// Value held in custody that nobody can withdraw yet.
    pub fn escrowed(env: Env) -> Result<i128, Error> {
        let deal = read_deal(&env)?;
        Ok(match deal.state {
            DealState::Sold => deal.price,
            _ => 0,
        })
    }

    pub fn get_token(env: Env) -> Result<Address, Error> {
        read_token(&env)
    }

    fn move_funds(env: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), Error> {
        let token_client = token::Client::new(env, &read_token(env)?);
        match token_client.try_transfer(from, to, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => Err(Error::TransferFailed),
        }
    }
}

// The constructor always writes both keys, so a miss means the instance is
// not a deal at all.
fn read_deal(env: &Env) -> Result<Deal, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Deal)
        .ok_or(Error::InvalidState)
}

fn read_token(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(Error::InvalidState)
}

fn pending_of(env: &Env, id: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Pending(id.clone()))
        .unwrap_or(0)
}
