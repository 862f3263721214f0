// Screens, host phases and the inventory the quiz fills in.

use bevy::prelude::*;
use strum::EnumIter;

/// Host-level phase. Nothing in the game reacts to input until the preloader is done.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppPhase {
    #[default]
    Loading,
    Ready,
}

/// The mutually exclusive top-level screens, in play order. Only exists once loading is done.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, SubStates, EnumIter)]
#[source(AppPhase = AppPhase::Ready)]
pub enum Screen {
    #[default]
    Start,
    Intro,
    Level1,
    Level2,
    Level3,
    Level4,
    InterLevel,
    Summary,
    Ending,
    Victory,
}

impl Screen {
    /// Zero-based index into the level table, for the four quiz screens only.
    pub fn level_index(self) -> Option<usize> {
        match self {
            Screen::Level1 => Some(0),
            Screen::Level2 => Some(1),
            Screen::Level3 => Some(2),
            Screen::Level4 => Some(3),
            Screen::Start
            | Screen::Intro
            | Screen::InterLevel
            | Screen::Summary
            | Screen::Ending
            | Screen::Victory => None,
        }
    }

    pub fn is_level(self) -> bool {
        self.level_index().is_some()
    }
}

/// The four inventory slots, one per level.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, EnumIter)]
pub enum ItemKey {
    BlueCrystal,
    GoldenRope,
    ShinyShield,
    Certificate,
}

/// Collected rewards. Set once per level, only cleared by a full reset.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Inventory {
    pub blue_crystal: bool,
    pub golden_rope: bool,
    pub shiny_shield: bool,
    pub certificate: bool,
}

impl Inventory {
    pub fn has(&self, key: ItemKey) -> bool {
        match key {
            ItemKey::BlueCrystal => self.blue_crystal,
            ItemKey::GoldenRope => self.golden_rope,
            ItemKey::ShinyShield => self.shiny_shield,
            ItemKey::Certificate => self.certificate,
        }
    }

    pub fn grant(&mut self, key: ItemKey) {
        let slot = match key {
            ItemKey::BlueCrystal => &mut self.blue_crystal,
            ItemKey::GoldenRope => &mut self.golden_rope,
            ItemKey::ShinyShield => &mut self.shiny_shield,
            ItemKey::Certificate => &mut self.certificate,
        };
        *slot = true;
    }

    pub fn collected(&self) -> usize {
        [
            self.blue_crystal,
            self.golden_rope,
            self.shiny_shield,
            self.certificate,
        ]
        .into_iter()
        .filter(|&held| held)
        .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_only_quiz_screens_have_level_index() {
        let levels: Vec<_> = Screen::iter().filter(|s| s.is_level()).collect();
        assert_eq!(
            levels,
            vec![Screen::Level1, Screen::Level2, Screen::Level3, Screen::Level4]
        );
        for (i, screen) in levels.into_iter().enumerate() {
            assert_eq!(screen.level_index(), Some(i));
        }
    }

    #[test]
    fn test_inventory_grant_sets_only_its_slot() {
        for key in ItemKey::iter() {
            let mut inventory = Inventory::default();
            inventory.grant(key);
            assert!(inventory.has(key));
            assert_eq!(inventory.collected(), 1);
        }
    }
}
