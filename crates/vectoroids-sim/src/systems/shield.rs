//! Shield timer and terminal flash cue.

use hecs::World;

use vectoroids_core::components::Shield;
use vectoroids_core::constants::*;
use vectoroids_core::events::TelemetryEvent;

pub fn run(world: &mut World, telemetry: &mut Vec<TelemetryEvent>) {
    for (_entity, shield) in world.query_mut::<&mut Shield>() {
        if shield.timer_ticks == 0 {
            continue;
        }
        shield.timer_ticks -= 1;
        if shield.timer_ticks == 0 {
            shield.visible = false;
            telemetry.push(TelemetryEvent::ShieldExpired);
        } else {
            shield.visible = flash_visible(shield.timer_ticks);
        }
    }
}

/// Flash duty cycle over the terminal window: fully visible outside it,
/// then an on-fraction shrinking linearly from 100% down to 10% as the
/// timer approaches zero, over fixed-length cycles.
fn flash_visible(remaining_ticks: u32) -> bool {
    if remaining_ticks >= SHIELD_FLASH_WINDOW_TICKS {
        return true;
    }
    let duty = SHIELD_FLASH_MIN_DUTY
        + (1.0 - SHIELD_FLASH_MIN_DUTY)
            * (remaining_ticks as f64 / SHIELD_FLASH_WINDOW_TICKS as f64);
    let phase = remaining_ticks % SHIELD_FLASH_CYCLE_TICKS;
    (phase as f64) < duty * SHIELD_FLASH_CYCLE_TICKS as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steady_outside_flash_window() {
        for remaining in SHIELD_FLASH_WINDOW_TICKS..SHIELD_DURATION_TICKS {
            assert!(flash_visible(remaining));
        }
    }

    #[test]
    fn test_duty_shrinks_toward_expiry() {
        let visible_in_window = |window_start: u32| {
            (window_start..window_start + SHIELD_FLASH_CYCLE_TICKS)
                .filter(|&t| flash_visible(t))
                .count()
        };
        let early = visible_in_window(SHIELD_FLASH_WINDOW_TICKS - SHIELD_FLASH_CYCLE_TICKS);
        let late = visible_in_window(0);
        assert!(early > late, "duty cycle should shrink: {early} vs {late}");
        // Near expiry the shield is mostly hidden.
        assert!(late <= (SHIELD_FLASH_CYCLE_TICKS as usize) / 2);
    }
}
