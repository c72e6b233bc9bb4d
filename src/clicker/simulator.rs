//! Balance simulator for BMC Clicker.
//! Run with: cargo test simulate_greedy -- --nocapture

#[cfg(test)]
mod tests {
    use crate::clicker::logic;
    use crate::clicker::state::*;
    use crate::time::{SECONDS_PER_TICK, TICKS_PER_SECOND};

    /// Index of the cheapest upgrade the player can buy right now.
    fn cheapest_affordable(state: &GameState) -> Option<usize> {
        state
            .upgrades
            .iter()
            .enumerate()
            .filter(|(_, u)| u.affordable(state.score))
            .min_by(|(_, a), (_, b)| a.current_price.total_cmp(&b.current_price))
            .map(|(i, _)| i)
    }

    fn report_stats(state: &GameState, seconds: u32, purchases_made: u32) {
        eprintln!("┌─── {}m{}s ─────────────────────────", seconds / 60, seconds % 60);
        eprintln!(
            "│ Score: {}  Click: {}  PPS: {}  Clicks: {}",
            logic::format_display(state.score),
            logic::format_display(state.click_power),
            logic::format_display(state.points_per_second),
            state.total_clicks
        );
        let owned: Vec<String> = state
            .upgrades
            .iter()
            .map(|u| format!("{}:{}@{}", u.name, u.owned, logic::format_display(u.current_price)))
            .collect();
        eprintln!("│ Upgrades: {}  Purchases: {}", owned.join("  "), purchases_made);
        eprintln!("└────────────────────────────────────");
    }

    /// Play greedily for `total_seconds`: 5 clicks/sec, buy the cheapest
    /// affordable upgrade until nothing is affordable. Checks the economy
    /// invariants after every step.
    fn simulate(total_seconds: u32) -> GameState {
        let mut state = GameState::new();
        let clicks_per_second: u32 = 5;
        let mut total_purchases: u32 = 0;
        let mut prev_owned: Vec<u32> = state.upgrades.iter().map(|u| u.owned).collect();

        let report_times = [30, 60, 300, 600, 1800, 3600];

        for second in 1..=total_seconds {
            for _ in 0..clicks_per_second {
                logic::click(&mut state);
            }
            for _ in 0..TICKS_PER_SECOND {
                logic::tick(&mut state, SECONDS_PER_TICK);
            }

            for _ in 0..50 {
                // Safety limit
                let Some(idx) = cheapest_affordable(&state) else {
                    break;
                };
                let id = state.upgrades[idx].id.clone();
                if logic::purchase(&mut state, &id).is_err() {
                    break;
                }
                total_purchases += 1;
            }

            assert!(state.score >= 0.0, "score went negative at {}s", second);
            for (u, prev) in state.upgrades.iter().zip(prev_owned.iter_mut()) {
                assert!(u.owned >= *prev, "{} owned count decreased", u.id);
                *prev = u.owned;
                let expected = price_for(u.base_price, u.owned);
                assert!(
                    (u.current_price - expected).abs() < f64::EPSILON,
                    "{} price {} != {}",
                    u.id,
                    u.current_price,
                    expected
                );
            }

            if report_times.contains(&second) {
                report_stats(&state, second, total_purchases);
            }
        }

        assert_eq!(state.total_clicks, (total_seconds * clicks_per_second) as u64);
        state
    }

    #[test]
    fn simulate_greedy_10min() {
        let state = simulate(600);
        // Every upgrade has been bought at least once by then.
        for u in &state.upgrades {
            assert!(u.owned > 0, "{} never bought", u.id);
        }
        assert!(state.points_per_second > 0.0);
    }

    #[test]
    fn simulate_greedy_1hour() {
        simulate(3600);
    }
}
