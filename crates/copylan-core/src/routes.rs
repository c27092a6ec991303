// ── Static route planning ──
//
// Routes are matched by destination prefix. Next hops that name an egress
// interface carry a source-element interface id, which is translated to
// the destination interface with the same name.

use std::collections::HashMap;

use copylan_api::{Interface, StaticRoute};
use serde_json::Value;
use tracing::warn;

use crate::payload::Payload;
use crate::reconcile::{Action, index_by_key, reconcile};

/// Map source interface ids to destination interface ids by name.
pub fn interface_id_map(source: &[Interface], destination: &[Interface]) -> HashMap<String, String> {
    let by_name: HashMap<&str, &str> = destination
        .iter()
        .filter(|i| !i.name().is_empty())
        .map(|i| (i.name(), i.id()))
        .collect();

    source
        .iter()
        .filter(|i| !i.name().is_empty())
        .filter_map(|i| {
            by_name
                .get(i.name())
                .map(|dst| (i.id().to_owned(), (*dst).to_owned()))
        })
        .collect()
}

/// Rewrite `nexthops[].nexthop_interface_id` in place.
///
/// Ids without a destination counterpart are left as they are.
pub fn remap_nexthops(payload: &mut Payload, id_map: &HashMap<String, String>) {
    let prefix = payload
        .get("destination_prefix")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned();

    let Some(Value::Array(nexthops)) = payload.get_mut("nexthops") else {
        return;
    };

    for hop in nexthops.iter_mut() {
        let Some(slot) = hop.get_mut("nexthop_interface_id") else {
            continue;
        };
        let Some(source_id) = slot.as_str().map(str::to_owned) else {
            continue;
        };
        match id_map.get(&source_id) {
            Some(dest_id) => *slot = Value::String(dest_id.clone()),
            None => warn!(
                route = %prefix,
                interface_id = %source_id,
                "next-hop interface has no counterpart on destination; leaving unchanged"
            ),
        }
    }
}

/// Plan the route creates and updates for the destination.
pub fn plan_routes(
    source: &[StaticRoute],
    destination: &[StaticRoute],
    id_map: &HashMap<String, String>,
) -> Vec<Action> {
    let index = index_by_key(destination);
    reconcile(
        source,
        &index,
        |_| true,
        |route| {
            let mut payload = Payload::from_record(route);
            remap_nexthops(&mut payload, id_map);
            payload
        },
    )
}
