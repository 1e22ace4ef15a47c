/// Paper Forker progress state definitions.

/// The three purchasable progression levers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UpgradeKind {
    SkillLevel,
    Friend,
    FriendUpgrade,
}

impl UpgradeKind {
    /// All upgrade kinds in display order.
    pub fn all() -> &'static [UpgradeKind] {
        &[
            UpgradeKind::SkillLevel,
            UpgradeKind::Friend,
            UpgradeKind::FriendUpgrade,
        ]
    }

    /// Display name.
    pub fn name(&self) -> &str {
        match self {
            UpgradeKind::SkillLevel => "Upgrade Developer Skill Level",
            UpgradeKind::Friend => "Get Developer Friend",
            UpgradeKind::FriendUpgrade => "Upgrade Friends",
        }
    }

    /// Key to buy (1-3 mapped to kind index).
    pub fn key(&self) -> char {
        match self {
            UpgradeKind::SkillLevel => '1',
            UpgradeKind::Friend => '2',
            UpgradeKind::FriendUpgrade => '3',
        }
    }

    pub fn from_key(key: char) -> Option<UpgradeKind> {
        UpgradeKind::all().iter().copied().find(|k| k.key() == key)
    }

    pub fn index(&self) -> usize {
        match self {
            UpgradeKind::SkillLevel => 0,
            UpgradeKind::Friend => 1,
            UpgradeKind::FriendUpgrade => 2,
        }
    }

    /// Current level of the field this kind raises.
    pub fn level(&self, state: &ProgressState) -> u64 {
        match self {
            UpgradeKind::SkillLevel => state.developer_skill_level,
            UpgradeKind::Friend => state.developer_friends,
            UpgradeKind::FriendUpgrade => state.friend_upgrades,
        }
    }

    pub fn level_mut<'a>(&self, state: &'a mut ProgressState) -> &'a mut u64 {
        match self {
            UpgradeKind::SkillLevel => &mut state.developer_skill_level,
            UpgradeKind::Friend => &mut state.developer_friends,
            UpgradeKind::FriendUpgrade => &mut state.friend_upgrades,
        }
    }
}

/// Full progress of a Paper Forker game.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgressState {
    /// Spendable resource.
    pub lines_of_code: u64,
    /// Completed forks. The first one only unlocks the game.
    pub forks: u64,
    /// Manual-write multiplier.
    pub developer_skill_level: u64,
    /// Passive producers.
    pub developer_friends: u64,
    /// Producer multiplier level.
    pub friend_upgrades: u64,
}

impl ProgressState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the first fork has happened and the full game is visible.
    pub fn is_unlocked(&self) -> bool {
        self.forks >= 1
    }
}
