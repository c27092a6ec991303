// ── LAN VLAN interface planning ──

use copylan_api::Interface;
use serde_json::Value;

use crate::classify::InterfaceTaxonomy;
use crate::payload::Payload;
use crate::reconcile::{Action, index_by_key, reconcile};

const LAN: &str = "lan";

/// Whether an interface is a LAN VLAN under the given taxonomy.
pub fn is_lan_vlan(taxonomy: InterfaceTaxonomy, interface: &Interface) -> bool {
    interface.interface_type() == Some(taxonomy.vlan_interface_type())
        && interface.used_for() == Some(LAN)
}

pub fn find_by_name<'a>(interfaces: &'a [Interface], name: &str) -> Option<&'a Interface> {
    interfaces.iter().find(|i| i.name() == name)
}

/// Plan the VLAN creates and updates for the destination.
///
/// For sub-interfaces, `destination_parent_id` replaces the source parent
/// reference in every payload: the source parent id does not exist on the
/// destination element.
pub fn plan_vlans(
    taxonomy: InterfaceTaxonomy,
    source: &[Interface],
    destination: &[Interface],
    destination_parent_id: Option<&str>,
) -> Vec<Action> {
    let index = index_by_key(destination);
    let mut actions = reconcile(
        source,
        &index,
        |i| is_lan_vlan(taxonomy, i),
        Payload::from_record,
    );

    if taxonomy == InterfaceTaxonomy::SubInterface {
        if let Some(parent) = destination_parent_id {
            for action in &mut actions {
                action
                    .payload_mut()
                    .set("parent", Value::String(parent.to_owned()));
            }
        }
    }
    actions
}

/// Plan the trunk-membership update on the SVI parent port.
///
/// Errors name the element side where the parent is missing.
pub fn plan_parent_trunk(
    source: &[Interface],
    destination: &[Interface],
    parent_name: &str,
) -> Result<Action, String> {
    let src = find_by_name(source, parent_name)
        .ok_or_else(|| format!("parent interface '{parent_name}' not found on source element"))?;
    let dst = find_by_name(destination, parent_name).ok_or_else(|| {
        format!("parent interface '{parent_name}' not found on destination element")
    })?;

    Ok(Action::Update {
        key: parent_name.to_owned(),
        id: dst.id().to_owned(),
        payload: Payload::from_record(dst).overlay(Payload::from_record(src)),
    })
}
