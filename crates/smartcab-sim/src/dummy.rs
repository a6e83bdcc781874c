//! Scripted background traffic

use smartcab_core::{Channel, Percept, Reading, Waypoint};

/// Whether a scripted cab may make `waypoint` given what it senses.
///
/// Dummies are cautious: they wait rather than risk a move the learner would
/// be penalised for.
pub fn may_proceed(waypoint: Waypoint, percept: &Percept) -> bool {
    let red = percept.get(Channel::Light) != Some(Reading::Green);
    let oncoming = percept.get(Channel::Oncoming).unwrap_or(Reading::None);
    let left = percept.get(Channel::Left).unwrap_or(Reading::None);

    match waypoint {
        Waypoint::Right => !(red && left == Reading::Forward),
        Waypoint::Forward => !red,
        Waypoint::Left => !(red || matches!(oncoming, Reading::Forward | Reading::Right)),
    }
}
