//! BMC Clicker game state definitions.

/// Price growth factor applied per owned unit.
pub const PRICE_GROWTH: f64 = 1.15;

/// How an upgrade's `effect` modifies the game state when purchased.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpgradeKind {
    /// Adds `effect` to click power.
    ClickBonus,
    /// Adds `effect` to points per second.
    PassiveBonus,
    /// Multiplies click power by `effect`.
    ClickMultiplier,
}

impl UpgradeKind {
    /// Tag used in the save format.
    pub fn tag(&self) -> &'static str {
        match self {
            UpgradeKind::ClickBonus => "click",
            UpgradeKind::PassiveBonus => "passive",
            UpgradeKind::ClickMultiplier => "multiplier",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "click" => Some(UpgradeKind::ClickBonus),
            "passive" => Some(UpgradeKind::PassiveBonus),
            "multiplier" => Some(UpgradeKind::ClickMultiplier),
            _ => None,
        }
    }
}

/// Static definition of an upgrade in the default table.
pub struct UpgradeDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub base_price: f64,
    pub effect: f64,
    pub kind: UpgradeKind,
}

/// The default upgrade table, in display order. Key `1` buys the first entry.
pub const DEFAULT_UPGRADES: &[UpgradeDef] = &[
    UpgradeDef {
        id: "pauls",
        name: "Pauls",
        description: "+1 click power",
        base_price: 10.0,
        effect: 1.0,
        kind: UpgradeKind::ClickBonus,
    },
    UpgradeDef {
        id: "biggs",
        name: "Biggs",
        description: "+2 points/sec",
        base_price: 100.0,
        effect: 2.0,
        kind: UpgradeKind::PassiveBonus,
    },
    UpgradeDef {
        id: "mega",
        name: "Mega",
        description: "x2 click power",
        base_price: 1_000.0,
        effect: 2.0,
        kind: UpgradeKind::ClickMultiplier,
    },
];

/// Price of the next unit given the base price and units already owned.
pub fn price_for(base_price: f64, owned: u32) -> f64 {
    (base_price * PRICE_GROWTH.powi(owned as i32)).floor()
}

/// A purchasable upgrade.
#[derive(Clone, Debug, PartialEq)]
pub struct Upgrade {
    pub id: String,
    /// Display name (not persisted).
    pub name: String,
    /// Display description (not persisted).
    pub description: String,
    pub owned: u32,
    pub base_price: f64,
    /// Price of the next purchase.
    pub current_price: f64,
    pub effect: f64,
    pub kind: UpgradeKind,
}

impl Upgrade {
    pub fn from_def(def: &UpgradeDef) -> Self {
        Self {
            id: def.id.to_string(),
            name: def.name.to_string(),
            description: def.description.to_string(),
            owned: 0,
            base_price: def.base_price,
            current_price: def.base_price,
            effect: def.effect,
            kind: def.kind,
        }
    }

    /// Recompute `current_price` from `base_price` and `owned`.
    pub fn reprice(&mut self) {
        self.current_price = price_for(self.base_price, self.owned);
    }

    pub fn affordable(&self, score: f64) -> bool {
        score >= self.current_price
    }
}

/// Full economy state of a BMC Clicker session.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub score: f64,
    /// Points per click (base 1.0).
    pub click_power: f64,
    pub total_clicks: u64,
    /// Passive income rate.
    pub points_per_second: f64,
    /// Upgrades in display order.
    pub upgrades: Vec<Upgrade>,
}

impl GameState {
    pub fn new() -> Self {
        Self::with_upgrades(DEFAULT_UPGRADES)
    }

    /// Fresh state over an arbitrary upgrade table.
    pub fn with_upgrades(defs: &[UpgradeDef]) -> Self {
        Self {
            score: 0.0,
            click_power: 1.0,
            total_clicks: 0,
            points_per_second: 0.0,
            upgrades: defs.iter().map(Upgrade::from_def).collect(),
        }
    }

    pub fn upgrade(&self, id: &str) -> Option<&Upgrade> {
        self.upgrades.iter().find(|u| u.id == id)
    }

    pub fn upgrade_mut(&mut self, id: &str) -> Option<&mut Upgrade> {
        self.upgrades.iter_mut().find(|u| u.id == id)
    }

    /// Whether the next unit of `id` can be bought right now.
    /// Unknown ids are never affordable.
    pub fn can_afford(&self, id: &str) -> bool {
        self.upgrade(id).map_or(false, |u| u.affordable(self.score))
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

// ── Transient UI state (never persisted) ────────────────────────

pub const MAX_LOG: usize = 50;
pub const MAX_PARTICLES: usize = 20;

/// A floating "+N" rising from the click image.
#[derive(Clone, Debug)]
pub struct Particle {
    pub text: String,
    /// Column offset from the center of the image.
    pub col_offset: i16,
    /// Remaining lifetime in ticks.
    pub life: u32,
    pub max_life: u32,
}

#[derive(Clone, Debug)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

/// Feedback and dialog state owned by the UI, alongside `GameState`.
pub struct UiState {
    pub log: Vec<LogEntry>,
    pub particles: Vec<Particle>,
    /// Ticks left on the "bounce" after a click.
    pub click_flash: u32,
    /// `(upgrade index, ticks left)` highlight after a purchase.
    pub purchase_flash: Option<(usize, u32)>,
    /// Whether the reset confirmation is showing.
    pub confirm_reset: bool,
    pub anim_frame: u32,
    rng_state: u32,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            log: Vec::new(),
            particles: Vec::new(),
            click_flash: 0,
            purchase_flash: None,
            confirm_reset: false,
            anim_frame: 0,
            rng_state: 42,
        }
    }

    pub fn add_log(&mut self, text: &str, is_important: bool) {
        self.log.push(LogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.log.len() > MAX_LOG {
            self.log.remove(0);
        }
    }

    pub fn add_particle(&mut self, particle: Particle) {
        self.particles.push(particle);
        if self.particles.len() > MAX_PARTICLES {
            self.particles.remove(0);
        }
    }

    /// xorshift32; only used for particle spread.
    pub fn next_random(&mut self) -> u32 {
        let mut x = self.rng_state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.rng_state = x;
        x
    }

    /// Age timed effects by `delta_ticks`.
    pub fn age(&mut self, delta_ticks: u32) {
        self.anim_frame = self.anim_frame.wrapping_add(delta_ticks);
        self.click_flash = self.click_flash.saturating_sub(delta_ticks);
        self.purchase_flash = match self.purchase_flash {
            Some((idx, left)) if left > delta_ticks => Some((idx, left - delta_ticks)),
            _ => None,
        };
        for p in &mut self.particles {
            p.life = p.life.saturating_sub(delta_ticks);
        }
        self.particles.retain(|p| p.life > 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_values() {
        let state = GameState::new();
        assert!((state.score - 0.0).abs() < f64::EPSILON);
        assert!((state.click_power - 1.0).abs() < f64::EPSILON);
        assert_eq!(state.total_clicks, 0);
        assert!((state.points_per_second - 0.0).abs() < f64::EPSILON);
        assert_eq!(state.upgrades.len(), 3);
    }

    #[test]
    fn default_upgrades_start_at_base_price() {
        let state = GameState::new();
        for u in &state.upgrades {
            assert_eq!(u.owned, 0);
            assert!((u.current_price - u.base_price).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn default_upgrade_order_matches_keys() {
        let state = GameState::new();
        let ids: Vec<&str> = state.upgrades.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["pauls", "biggs", "mega"]);
    }

    #[test]
    fn price_for_floors() {
        assert!((price_for(10.0, 0) - 10.0).abs() < f64::EPSILON);
        assert!((price_for(10.0, 1) - 11.0).abs() < f64::EPSILON); // 11.5
        assert!((price_for(10.0, 2) - 13.0).abs() < f64::EPSILON); // 13.225
        assert!((price_for(100.0, 1) - 114.0).abs() < f64::EPSILON); // 114.99..
        assert!((price_for(1000.0, 3) - 1520.0).abs() < f64::EPSILON); // 1520.875
    }

    #[test]
    fn reprice_uses_owned() {
        let mut u = Upgrade::from_def(&DEFAULT_UPGRADES[0]);
        u.owned = 2;
        u.reprice();
        assert!((u.current_price - 13.0).abs() < f64::EPSILON);
    }

    #[test]
    fn upgrade_lookup_by_id() {
        let state = GameState::new();
        assert_eq!(state.upgrade("biggs").map(|u| u.kind), Some(UpgradeKind::PassiveBonus));
        assert!(state.upgrade("nope").is_none());
    }

    #[test]
    fn can_afford_boundary() {
        let mut state = GameState::new();
        state.score = 9.99;
        assert!(!state.can_afford("pauls"));
        state.score = 10.0;
        assert!(state.can_afford("pauls"));
        assert!(!state.can_afford("unknown"));
    }

    #[test]
    fn kind_tags_roundtrip() {
        for kind in [
            UpgradeKind::ClickBonus,
            UpgradeKind::PassiveBonus,
            UpgradeKind::ClickMultiplier,
        ] {
            assert_eq!(UpgradeKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(UpgradeKind::from_tag("bogus"), None);
    }

    #[test]
    fn custom_upgrade_table() {
        const DEFS: &[UpgradeDef] = &[UpgradeDef {
            id: "solo",
            name: "Solo",
            description: "+5 points/sec",
            base_price: 50.0,
            effect: 5.0,
            kind: UpgradeKind::PassiveBonus,
        }];
        let state = GameState::with_upgrades(DEFS);
        assert_eq!(state.upgrades.len(), 1);
        assert_eq!(state.upgrades[0].id, "solo");
    }

    #[test]
    fn log_truncation() {
        let mut ui = UiState::new();
        for i in 0..60 {
            ui.add_log(&format!("msg {}", i), false);
        }
        assert_eq!(ui.log.len(), MAX_LOG);
        assert_eq!(ui.log[0].text, "msg 10");
    }

    #[test]
    fn particle_cap() {
        let mut ui = UiState::new();
        for _ in 0..30 {
            ui.add_particle(Particle {
                text: "+1".into(),
                col_offset: 0,
                life: 10,
                max_life: 10,
            });
        }
        assert_eq!(ui.particles.len(), MAX_PARTICLES);
    }

    #[test]
    fn age_expires_effects() {
        let mut ui = UiState::new();
        ui.click_flash = 3;
        ui.purchase_flash = Some((1, 5));
        ui.add_particle(Particle {
            text: "+1".into(),
            col_offset: 0,
            life: 4,
            max_life: 4,
        });
        ui.age(3);
        assert_eq!(ui.click_flash, 0);
        assert_eq!(ui.purchase_flash, Some((1, 2)));
        assert_eq!(ui.particles.len(), 1);
        ui.age(2);
        assert_eq!(ui.purchase_flash, None);
        assert!(ui.particles.is_empty());
    }

    #[test]
    fn next_random_varies() {
        let mut ui = UiState::new();
        let a = ui.next_random();
        let b = ui.next_random();
        assert_ne!(a, b);
        assert_ne!(a, 0);
    }
}
