#![no_std]

mod entities;
mod errors;
mod sale_deal_contract;

pub use crate::entities::{DataKey, Deal, DealState};
pub use crate::errors::Error;
pub use crate::sale_deal_contract::{SaleDealContract, SaleDealContractClient};
