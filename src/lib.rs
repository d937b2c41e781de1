//! An append-mostly ledger of non-fungible tokens grouped into named classes.
//!
//! # Description
//! Every token belongs to exactly one class and is globally identified by the
//! `(class id, token id)` pair. The ledger keeps three indexes over a single
//! key-value store: class records by id (with a name uniqueness index), token
//! records partitioned by class, and an ownership index from account address
//! to owned tokens. All mutating entry points update the affected indexes
//! together, so a reader can never observe a token record without its
//! ownership entry or the other way around.
//!
//! The store handle is passed explicitly into every operation and doubles as
//! the transaction scope: a caller that receives an error must discard the
//! enclosing transaction, which the host does by rolling back a rejected
//! update. No operation retries internally.
//!
//! The `migration` module rewrites a store from the legacy flat layout into
//! the class partitioned layout in a single pass, deleting every legacy key.

#![cfg_attr(not(feature = "std"), no_std)]
pub use crate::{
    constants::*, errors::*, keys::*, ledger::*, migration::*, structs::*, types::*,
};
use crate::{class::*, helper::*, owner::*, token::*};
use concordium_std::*;

mod class;
mod constants;
mod errors;
mod helper;
mod keys;
mod ledger;
mod migration;
mod owner;
mod structs;
mod token;
mod types;
