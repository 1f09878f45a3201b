use soroban_sdk::{contracttype, Address};

/// Lifecycle of the single deal. Only ever moves forward.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DealState {
    NotListed = 0,
    Listed = 1,
    Sold = 2,
    Completed = 3,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deal {
    pub seller: Address,
    /// Set exactly when `state` is `Sold` or `Completed`.
    pub buyer: Option<Address>,
    /// Zero until listed.
    pub price: i128,
    pub state: DealState,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Deal,
    Token,
    Pending(Address),
}
