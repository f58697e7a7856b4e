//! Owned animals and the player's inventory

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::core::types::{AnimalTypeId, AnimalUid};
use crate::economy::tables::AnimalRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimalStatus {
    /// In a habitat socket, earning revenue
    Active,
    /// Owned but benched
    Inventoried,
    /// Given away; kept for history only
    Donated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animal {
    pub uid: AnimalUid,
    pub type_id: AnimalTypeId,
    pub set_id: u32,
    pub rarity: u8,
    pub revenue: u64,
    pub level: u32,
    pub status: AnimalStatus,
}

impl Animal {
    pub fn is_owned(&self) -> bool {
        self.status != AnimalStatus::Donated
    }
}

/// Every animal a player has ever earned, keyed by uid
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    animals: BTreeMap<AnimalUid, Animal>,
    last_uid: u32,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a freshly earned animal: level 1, benched, next uid
    pub fn add(&mut self, row: &AnimalRow) -> AnimalUid {
        self.last_uid += 1;
        let uid = AnimalUid(self.last_uid);
        self.animals.insert(
            uid,
            Animal {
                uid,
                type_id: row.animal_id,
                set_id: row.set_id,
                rarity: row.rarity,
                revenue: row.revenue,
                level: 1,
                status: AnimalStatus::Inventoried,
            },
        );
        uid
    }

    pub fn get(&self, uid: AnimalUid) -> Option<&Animal> {
        self.animals.get(&uid)
    }

    pub fn get_mut(&mut self, uid: AnimalUid) -> Option<&mut Animal> {
        self.animals.get_mut(&uid)
    }

    /// All animals including donated ones, in uid order
    pub fn iter(&self) -> impl Iterator<Item = &Animal> {
        self.animals.values()
    }

    pub fn with_status(&self, status: AnimalStatus) -> impl Iterator<Item = &Animal> {
        self.animals.values().filter(move |a| a.status == status)
    }

    pub fn len(&self) -> usize {
        self.animals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animals.is_empty()
    }

    /// Animals not yet donated
    pub fn owned_count(&self) -> usize {
        self.animals.values().filter(|a| a.is_owned()).count()
    }

    pub fn is_benched(&self, uid: AnimalUid) -> bool {
        self.get(uid)
            .is_some_and(|a| a.status == AnimalStatus::Inventoried)
    }

    /// Cash per second from socketed animals
    pub fn income_per_sec(&self) -> u64 {
        self.with_status(AnimalStatus::Active).map(|a| a.revenue).sum()
    }

    /// Distinct types ever earned (donated types included)
    pub fn acquired_types(&self) -> BTreeSet<AnimalTypeId> {
        self.animals.values().map(|a| a.type_id).collect()
    }

    /// Distinct sets ever started
    pub fn acquired_sets(&self) -> BTreeSet<u32> {
        self.animals.values().map(|a| a.set_id).collect()
    }

    /// Distinct types collected per set
    pub fn set_counts(&self) -> BTreeMap<u32, usize> {
        let mut seen = BTreeSet::new();
        let mut counts = BTreeMap::new();
        for animal in self.animals.values() {
            if seen.insert(animal.type_id) {
                *counts.entry(animal.set_id).or_insert(0) += 1;
            }
        }
        counts
    }

    // === SELECTION ORDERINGS ===

    /// Feed target: lowest level, then highest rarity, then lowest uid
    pub fn feed_target(&self) -> Option<&Animal> {
        self.with_status(AnimalStatus::Active)
            .min_by_key(|a| (a.level, Reverse(a.rarity), a.uid))
    }

    /// Weakest socketed animal: lowest level, then rarity, then uid
    pub fn weakest_active(&self) -> Option<&Animal> {
        self.with_status(AnimalStatus::Active)
            .min_by_key(|a| (a.level, a.rarity, a.uid))
    }

    /// Strongest benched animal: highest level, then rarity, lowest uid
    pub fn strongest_benched(&self) -> Option<&Animal> {
        self.with_status(AnimalStatus::Inventoried)
            .min_by_key(|a| (Reverse(a.level), Reverse(a.rarity), a.uid))
    }

    /// Benched animal to give away: highest level, then the commoner
    /// rarity, then the lowest uid
    pub fn donation_candidate(&self) -> Option<&Animal> {
        self.with_status(AnimalStatus::Inventoried)
            .min_by_key(|a| (Reverse(a.level), a.rarity, a.uid))
    }

    /// Historical swap pair: the highest-level socketed animal and the
    /// lowest-level benched one
    pub fn legacy_swap_pair(&self) -> Option<(&Animal, &Animal)> {
        let out = self
            .with_status(AnimalStatus::Active)
            .min_by_key(|a| (Reverse(a.level), a.rarity, a.uid))?;
        let into = self
            .with_status(AnimalStatus::Inventoried)
            .min_by_key(|a| (a.level, Reverse(a.rarity), a.uid))?;
        Some((out, into))
    }
}
