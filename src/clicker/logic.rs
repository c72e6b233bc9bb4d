//! BMC Clicker economy logic. Pure functions over `GameState`.

use std::fmt;

use super::state::{GameState, UpgradeKind};

/// Why a purchase was refused. The state is untouched in both cases.
#[derive(Clone, Debug, PartialEq)]
pub enum PurchaseError {
    /// No upgrade with this id exists in the table.
    UnknownUpgrade(String),
    /// The score does not cover the current price.
    InsufficientFunds { price: f64, score: f64 },
}

impl fmt::Display for PurchaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PurchaseError::UnknownUpgrade(id) => write!(f, "unknown upgrade: {id}"),
            PurchaseError::InsufficientFunds { price, score } => write!(
                f,
                "insufficient funds: need {}, have {}",
                format_display(*price),
                format_display(*score)
            ),
        }
    }
}

impl std::error::Error for PurchaseError {}

/// Apply one click. Returns the amount added to the score.
pub fn click(state: &mut GameState) -> f64 {
    let power = state.click_power;
    state.score += power;
    state.total_clicks += 1;
    power
}

/// Buy one unit of the upgrade `id`.
///
/// Effects are applied in the order purchases happen, so a multiplier
/// bought before a flat bonus does not scale that bonus.
pub fn purchase(state: &mut GameState, id: &str) -> Result<(), PurchaseError> {
    let score = state.score;
    let upgrade = state
        .upgrade_mut(id)
        .ok_or_else(|| PurchaseError::UnknownUpgrade(id.to_string()))?;

    let price = upgrade.current_price;
    if score < price {
        return Err(PurchaseError::InsufficientFunds { price, score });
    }

    upgrade.owned += 1;
    upgrade.reprice();
    let (kind, effect) = (upgrade.kind, upgrade.effect);

    state.score -= price;
    match kind {
        UpgradeKind::ClickBonus => state.click_power += effect,
        UpgradeKind::PassiveBonus => state.points_per_second += effect,
        UpgradeKind::ClickMultiplier => state.click_power *= effect,
    }
    Ok(())
}

/// Credit passive income for `delta_seconds` of elapsed time.
pub fn tick(state: &mut GameState, delta_seconds: f64) {
    if state.points_per_second <= 0.0 || !(delta_seconds > 0.0) || !delta_seconds.is_finite() {
        return;
    }
    state.score += state.points_per_second * delta_seconds;
}

/// Format a value for display: integers below 1000, then K/M/B/T with one
/// fractional digit. Ties round up (`1250` is `1.3K`).
pub fn format_display(value: f64) -> String {
    if value < 1_000.0 {
        format!("{}", value.floor() as i64)
    } else if value < 1e6 {
        format!("{:.1}K", round_tenths(value / 1e3))
    } else if value < 1e9 {
        format!("{:.1}M", round_tenths(value / 1e6))
    } else if value < 1e12 {
        format!("{:.1}B", round_tenths(value / 1e9))
    } else {
        format!("{:.1}T", round_tenths(value / 1e12))
    }
}

/// Round to one decimal, half away from zero. `{:.1}` alone rounds ties to even.
fn round_tenths(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
