//! Merging multiple batteries into one virtual device and ranking the device
//! set to pick the single primary device worth reporting.

use std::cmp::Ordering;

use crate::device::{Device, DeviceKind, DeviceState};

/// Batteries at or below this charge are treated as not really present;
/// phantom zero-charge slots would otherwise drag the average down.
const NEGLIGIBLE_CHARGE: f64 = 0.01;

// ── Aggregation ───────────────────────────────────────────────────────────────

/// Merge all battery devices into one synthetic aggregate.
///
/// With fewer than two batteries carrying a non-negligible charge this is an
/// order-preserving copy. Otherwise the output holds the aggregate first,
/// followed by every non-battery device in input order.
///
/// The aggregate's percentage is the mean over the qualifying batteries; its
/// state and time are picked by priority:
///
/// 1. any discharging → discharging; the system runs on the longest-lasting
///    discharging battery while fully-charged spares are reserve capacity
///    added serially once the active one depletes;
/// 2. else any charging → charging; time until the slowest one is full;
/// 3. else any fully charged → fully charged, no estimate;
/// 4. else → unknown.
pub fn merge_batteries(devices: &[Device]) -> Vec<Device> {
    let mut n_qualifying = 0u32;
    let mut sum_percent = 0.0;
    let mut n_charging = 0u32;
    let mut n_discharging = 0u32;
    let mut n_charged = 0u32;
    let mut max_charge_time = 0u64;
    let mut max_discharge_time = 0u64;
    let mut sum_charged_time = 0u64;

    for device in devices.iter().filter(|d| d.is_battery()) {
        if device.percentage > NEGLIGIBLE_CHARGE {
            sum_percent += device.percentage;
            n_qualifying += 1;
        }

        match device.state {
            DeviceState::Charging => {
                n_charging += 1;
                max_charge_time = max_charge_time.max(device.time_remaining);
            }
            DeviceState::Discharging => {
                n_discharging += 1;
                max_discharge_time = max_discharge_time.max(device.time_remaining);
            }
            DeviceState::FullyCharged => {
                n_charged += 1;
                sum_charged_time += device.time_remaining;
            }
            _ => {}
        }
    }

    if n_qualifying < 2 {
        return devices.to_vec();
    }

    let (state, time_remaining) = if n_discharging > 0 {
        (DeviceState::Discharging, max_discharge_time + sum_charged_time)
    } else if n_charging > 0 {
        (DeviceState::Charging, max_charge_time)
    } else if n_charged > 0 {
        (DeviceState::FullyCharged, 0)
    } else {
        (DeviceState::Unknown, 0)
    };

    let aggregate = Device {
        path: None,
        kind: DeviceKind::Battery,
        power_supply: true,
        state,
        percentage: sum_percent / f64::from(n_qualifying),
        time_remaining,
    };

    let mut merged = Vec::with_capacity(devices.len());
    merged.push(aggregate);
    merged.extend(devices.iter().filter(|d| !d.is_battery()).cloned());
    merged
}

/// Pick the single device that best represents overall power status.
///
/// Batteries are merged first, then the candidates are ranked with
/// [`compare_devices`]; the stable sort plus the ordinal tie-break makes the
/// winner deterministic for any well-formed input.
pub fn choose_primary(devices: &[Device]) -> Option<Device> {
    if devices.is_empty() {
        return None;
    }

    let mut candidates = merge_batteries(devices);
    candidates.sort_by(compare_devices);
    candidates.into_iter().next()
}

// ── Primary-device ordering ───────────────────────────────────────────────────
//
// Most interesting first. Each rule only applies when every rule above it
// ties:
//   1. the device that supplies power to the system
//   2. discharging items, least time remaining first (known time beats unknown)
//   3. charging items, most time to full first (known time beats unknown)
//   4. discharging items with no usable estimate
//   5. anything over a device in an unknown state
//   6. kind weight: batteries and UPSes, then generic kinds, then line power
//   7. state ordinal, a stable final tie-break

pub fn compare_devices(a: &Device, b: &Device) -> Ordering {
    by_power_supply(a, b)
        .then_with(|| by_discharging_with_estimate(a, b))
        .then_with(|| by_charging(a, b))
        .then_with(|| by_discharging(a, b))
        .then_with(|| by_known_state(a, b))
        .then_with(|| by_kind_weight(a, b))
        .then_with(|| a.state.cmp(&b.state))
}

fn by_power_supply(a: &Device, b: &Device) -> Ordering {
    // true sorts first
    b.power_supply.cmp(&a.power_supply)
}

fn by_discharging_with_estimate(a: &Device, b: &Device) -> Ordering {
    let a_qualifies = a.state == DeviceState::Discharging && a.time_remaining != 0;
    let b_qualifies = b.state == DeviceState::Discharging && b.time_remaining != 0;
    if !a_qualifies && !b_qualifies {
        return Ordering::Equal;
    }

    if a.state != DeviceState::Discharging {
        return Ordering::Greater;
    }
    if b.state != DeviceState::Discharging {
        return Ordering::Less;
    }

    // both discharging: a known estimate always beats an unknown one
    match (a.time_remaining, b.time_remaining) {
        (0, _) => Ordering::Greater,
        (_, 0) => Ordering::Less,
        (ta, tb) if ta != tb => ta.cmp(&tb), // least time left is most urgent
        _ => lower_percentage_first(a, b),
    }
}

fn by_charging(a: &Device, b: &Device) -> Ordering {
    let a_charging = a.state == DeviceState::Charging;
    let b_charging = b.state == DeviceState::Charging;
    match (a_charging, b_charging) {
        (false, false) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (true, true) => match (a.time_remaining, b.time_remaining) {
            (0, 0) => lower_percentage_first(a, b),
            (0, _) => Ordering::Greater,
            (_, 0) => Ordering::Less,
            (ta, tb) if ta != tb => tb.cmp(&ta), // most time to full is most interesting
            _ => lower_percentage_first(a, b),
        },
    }
}

fn by_discharging(a: &Device, b: &Device) -> Ordering {
    let a_discharging = a.state == DeviceState::Discharging;
    let b_discharging = b.state == DeviceState::Discharging;
    match (a_discharging, b_discharging) {
        (false, false) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (true, true) => lower_percentage_first(a, b),
    }
}

fn by_known_state(a: &Device, b: &Device) -> Ordering {
    // don't surface an unknown-state device unless it's the only option
    let a_unknown = a.state == DeviceState::Unknown;
    let b_unknown = b.state == DeviceState::Unknown;
    a_unknown.cmp(&b_unknown)
}

fn by_kind_weight(a: &Device, b: &Device) -> Ordering {
    b.kind.weight().cmp(&a.kind.weight())
}

fn lower_percentage_first(a: &Device, b: &Device) -> Ordering {
    a.percentage
        .partial_cmp(&b.percentage)
        .unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn battery(state: DeviceState, percentage: f64, time_remaining: u64) -> Device {
        Device {
            path: Some(format!("/devices/battery_{percentage}")),
            kind: DeviceKind::Battery,
            power_supply: true,
            state,
            percentage,
            time_remaining,
        }
    }

    fn device(kind: DeviceKind, state: DeviceState, percentage: f64, power_supply: bool) -> Device {
        Device {
            path: Some(format!("/devices/{kind:?}")),
            kind,
            power_supply,
            state,
            percentage,
            time_remaining: 0,
        }
    }

    // ── merge_batteries ───────────────────────────────────────────────────────

    #[test]
    fn merge_without_batteries_is_identity() {
        let devices = vec![
            device(DeviceKind::LinePower, DeviceState::Unknown, 0.0, true),
            device(DeviceKind::Mouse, DeviceState::Discharging, 55.0, false),
        ];
        assert_eq!(merge_batteries(&devices), devices);
    }

    #[test]
    fn merge_with_single_battery_is_identity() {
        let devices = vec![
            battery(DeviceState::Discharging, 80.0, 600),
            device(DeviceKind::LinePower, DeviceState::Unknown, 0.0, true),
        ];
        assert_eq!(merge_batteries(&devices), devices);
    }

    #[test]
    fn merge_skips_when_only_one_battery_qualifies() {
        // the second slot reports a phantom 0% charge
        let devices = vec![
            battery(DeviceState::Discharging, 80.0, 600),
            battery(DeviceState::Unknown, 0.0, 0),
        ];
        assert_eq!(merge_batteries(&devices), devices);
    }

    #[test]
    fn merge_averages_percentages_and_takes_max_discharge_time() {
        let devices = vec![
            battery(DeviceState::Discharging, 40.0, 100),
            battery(DeviceState::Discharging, 60.0, 200),
        ];

        let merged = merge_batteries(&devices);
        assert_eq!(merged.len(), 1);
        let agg = &merged[0];
        assert_eq!(agg.path, None);
        assert_eq!(agg.kind, DeviceKind::Battery);
        assert_eq!(agg.percentage, 50.0);
        assert_eq!(agg.state, DeviceState::Discharging);
        assert_eq!(agg.time_remaining, 200);
    }

    #[test]
    fn merge_adds_fully_charged_reserve_to_discharge_time() {
        let devices = vec![
            battery(DeviceState::Discharging, 50.0, 100),
            battery(DeviceState::FullyCharged, 100.0, 50),
        ];

        let merged = merge_batteries(&devices);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].state, DeviceState::Discharging);
        assert_eq!(merged[0].time_remaining, 150);
    }

    #[test]
    fn merge_excludes_negligible_batteries_from_average() {
        let devices = vec![
            battery(DeviceState::Discharging, 40.0, 100),
            battery(DeviceState::Discharging, 60.0, 200),
            battery(DeviceState::Unknown, 0.0, 0),
        ];

        let merged = merge_batteries(&devices);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].percentage, 50.0);
    }

    #[test]
    fn merge_charging_takes_max_charge_time() {
        let devices = vec![
            battery(DeviceState::Charging, 20.0, 3000),
            battery(DeviceState::Charging, 70.0, 900),
        ];

        let merged = merge_batteries(&devices);
        assert_eq!(merged[0].state, DeviceState::Charging);
        assert_eq!(merged[0].time_remaining, 3000);
    }

    #[test]
    fn merge_all_fully_charged() {
        let devices = vec![
            battery(DeviceState::FullyCharged, 100.0, 0),
            battery(DeviceState::FullyCharged, 100.0, 0),
        ];

        let merged = merge_batteries(&devices);
        assert_eq!(merged[0].state, DeviceState::FullyCharged);
        assert_eq!(merged[0].time_remaining, 0);
        assert_eq!(merged[0].percentage, 100.0);
    }

    #[test]
    fn merge_idle_batteries_become_unknown_aggregate() {
        let devices = vec![
            battery(DeviceState::PendingCharge, 90.0, 0),
            battery(DeviceState::PendingCharge, 70.0, 0),
        ];

        let merged = merge_batteries(&devices);
        assert_eq!(merged[0].state, DeviceState::Unknown);
        assert_eq!(merged[0].percentage, 80.0);
    }

    #[test]
    fn merge_preserves_non_battery_order() {
        let line = device(DeviceKind::LinePower, DeviceState::Unknown, 0.0, true);
        let mouse = device(DeviceKind::Mouse, DeviceState::Discharging, 55.0, false);
        let devices = vec![
            line.clone(),
            battery(DeviceState::Discharging, 40.0, 100),
            mouse.clone(),
            battery(DeviceState::Discharging, 60.0, 200),
        ];

        let merged = merge_batteries(&devices);
        assert_eq!(merged.len(), 3);
        assert!(merged[0].is_battery());
        assert_eq!(merged[1], line);
        assert_eq!(merged[2], mouse);
    }

    // ── choose_primary ────────────────────────────────────────────────────────

    #[test]
    fn primary_of_empty_set_is_none() {
        assert_eq!(choose_primary(&[]), None);
    }

    #[test]
    fn primary_prefers_the_power_supply() {
        let line = device(DeviceKind::LinePower, DeviceState::Unknown, 0.0, true);
        let mut bat = battery(DeviceState::Discharging, 20.0, 500);
        bat.power_supply = false;

        let devices = vec![bat, line.clone()];
        assert_eq!(choose_primary(&devices), Some(line));
    }

    #[test]
    fn primary_discharging_least_time_first() {
        let urgent = battery(DeviceState::Discharging, 80.0, 300);
        let relaxed = battery(DeviceState::Discharging, 20.0, 9000);

        // only one battery qualifies for the average, so no merge happens
        let mut devices = vec![relaxed, urgent.clone()];
        devices[0].percentage = 0.0;
        assert_eq!(choose_primary(&devices), Some(urgent));
    }

    #[test]
    fn discharging_equal_time_lower_percentage_first() {
        let a = battery(DeviceState::Discharging, 30.0, 600);
        let b = battery(DeviceState::Discharging, 70.0, 600);
        assert_eq!(compare_devices(&a, &b), Ordering::Less);
        assert_eq!(compare_devices(&b, &a), Ordering::Greater);
    }

    #[test]
    fn discharging_known_time_beats_unknown() {
        let known = battery(DeviceState::Discharging, 10.0, 60);
        let unknown = battery(DeviceState::Discharging, 90.0, 0);
        assert_eq!(compare_devices(&known, &unknown), Ordering::Less);
        assert_eq!(compare_devices(&unknown, &known), Ordering::Greater);
    }

    #[test]
    fn charging_most_time_to_full_first() {
        let slow = battery(DeviceState::Charging, 10.0, 7200);
        let fast = battery(DeviceState::Charging, 90.0, 300);
        assert_eq!(compare_devices(&slow, &fast), Ordering::Less);
    }

    #[test]
    fn charging_beats_discharging_without_estimate() {
        let charging = battery(DeviceState::Charging, 50.0, 600);
        let timeless = battery(DeviceState::Discharging, 50.0, 0);
        assert_eq!(compare_devices(&charging, &timeless), Ordering::Less);
    }

    #[test]
    fn discharging_without_estimate_beats_idle() {
        let timeless = battery(DeviceState::Discharging, 50.0, 0);
        let idle = battery(DeviceState::PendingCharge, 50.0, 0);
        assert_eq!(compare_devices(&timeless, &idle), Ordering::Less);
    }

    #[test]
    fn unknown_state_sorts_last() {
        let mystery = battery(DeviceState::Unknown, 90.0, 0);
        let idle = battery(DeviceState::PendingCharge, 10.0, 0);
        assert_eq!(compare_devices(&idle, &mystery), Ordering::Less);
        assert_eq!(compare_devices(&mystery, &idle), Ordering::Greater);
    }

    #[test]
    fn kind_weight_ranks_battery_over_peripheral_over_line_power() {
        let bat = battery(DeviceState::FullyCharged, 100.0, 0);
        let mouse = device(DeviceKind::Mouse, DeviceState::FullyCharged, 100.0, true);
        let line = device(DeviceKind::LinePower, DeviceState::FullyCharged, 100.0, true);

        assert_eq!(compare_devices(&bat, &mouse), Ordering::Less);
        assert_eq!(compare_devices(&mouse, &line), Ordering::Less);
    }

    #[test]
    fn state_ordinal_breaks_remaining_ties() {
        let empty = battery(DeviceState::Empty, 50.0, 0);
        let full = battery(DeviceState::FullyCharged, 50.0, 0);
        assert_eq!(compare_devices(&empty, &full), Ordering::Less);
    }

    #[test]
    fn identical_devices_compare_equal() {
        let a = battery(DeviceState::Discharging, 42.0, 120);
        assert_eq!(compare_devices(&a, &a.clone()), Ordering::Equal);
    }

    #[test]
    fn primary_is_deterministic_across_input_order() {
        let a = battery(DeviceState::Discharging, 30.0, 600);
        let b = battery(DeviceState::Charging, 70.0, 1200);
        let line = device(DeviceKind::LinePower, DeviceState::Unknown, 0.0, false);

        let forward = choose_primary(&[a.clone(), b.clone(), line.clone()]);
        let backward = choose_primary(&[line, b, a]);
        assert_eq!(forward, backward);
    }
}
