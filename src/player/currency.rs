//! Currency ledgers

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Currency {
    /// Soft currency, spent on candies
    Cash,
    /// Secondary currency, earned with animals and spent on wheels
    Treats,
    /// Premium currency
    Gems,
}

/// Running balance of one currency.
///
/// `balance == start + earned - spent` always holds and the balance never
/// goes negative: a spend larger than the balance fails without effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ledger {
    pub balance: u64,
    pub earned: u64,
    pub spent: u64,
    /// Highest balance ever held
    pub max: u64,
}

impl Ledger {
    pub fn new(start: u64) -> Self {
        Self {
            balance: start,
            earned: 0,
            spent: 0,
            max: start,
        }
    }

    pub fn earn(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
        self.earned = self.earned.saturating_add(amount);
        self.max = self.max.max(self.balance);
    }

    /// Returns false (and changes nothing) when the balance is short
    pub fn spend(&mut self, amount: u64) -> bool {
        if amount > self.balance {
            return false;
        }
        self.balance -= amount;
        self.spent += amount;
        true
    }

    pub fn can_afford(&self, amount: u64) -> bool {
        self.balance >= amount
    }
}

/// The three ledgers a player holds
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Wallet {
    pub cash: Ledger,
    pub treats: Ledger,
    pub gems: Ledger,
}

impl Wallet {
    pub fn new(cash: u64, treats: u64, gems: u64) -> Self {
        Self {
            cash: Ledger::new(cash),
            treats: Ledger::new(treats),
            gems: Ledger::new(gems),
        }
    }

    pub fn ledger(&self, currency: Currency) -> &Ledger {
        match currency {
            Currency::Cash => &self.cash,
            Currency::Treats => &self.treats,
            Currency::Gems => &self.gems,
        }
    }

    pub fn ledger_mut(&mut self, currency: Currency) -> &mut Ledger {
        match currency {
            Currency::Cash => &mut self.cash,
            Currency::Treats => &mut self.treats,
            Currency::Gems => &mut self.gems,
        }
    }
}
