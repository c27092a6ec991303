// ── Copy run orchestration ──
//
// One run: resolve both elements, copy LAN VLANs, copy the SVI parent
// trunk, then copy static routes. Listing failures end the run; a failed
// create/update is recorded and the run moves on to the next item.

use tracing::{debug, info, warn};

use crate::api::ElementApi;
use crate::classify::InterfaceTaxonomy;
use crate::directory::{Directory, ElementRef};
use crate::error::CoreError;
use crate::interfaces::{find_by_name, plan_parent_trunk, plan_vlans};
use crate::reconcile::Action;
use crate::routes::{interface_id_map, plan_routes};
use crate::summary::{Operation, Resource, RunSummary, Status};

/// What to copy, from where, to where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRequest {
    /// Source element display name.
    pub source: String,
    /// Destination element display name.
    pub destination: String,
    /// Parent port carrying the VLANs.
    pub parent_interface: String,
    pub include_routes: bool,
    /// Plan every action without writing.
    pub dry_run: bool,
}

impl SyncRequest {
    pub fn new(
        source: impl Into<String>,
        destination: impl Into<String>,
        parent_interface: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            parent_interface: parent_interface.into(),
            include_routes: true,
            dry_run: false,
        }
    }
}

/// Copy LAN interfaces (and optionally static routes) between two elements.
pub async fn run<A: ElementApi>(
    api: &A,
    directory: &Directory,
    request: &SyncRequest,
) -> Result<RunSummary, CoreError> {
    let source = directory.resolve(&request.source)?;
    let destination = directory.resolve(&request.destination)?;

    let taxonomy = source.taxonomy();
    let dest_taxonomy = destination.taxonomy();
    if dest_taxonomy != taxonomy {
        return Err(CoreError::TaxonomyMismatch {
            source_element: source.name,
            source_taxonomy: taxonomy.to_string(),
            destination_element: destination.name,
            destination_taxonomy: dest_taxonomy.to_string(),
        });
    }
    info!(
        source = %source.name,
        destination = %destination.name,
        %taxonomy,
        dry_run = request.dry_run,
        "starting copy"
    );

    let mut summary = RunSummary::new(&source.name, &destination.name, request.dry_run);

    // ── Interfaces ──
    let source_ifaces = api
        .list_interfaces(&source.site_id, &source.id)
        .await
        .map_err(|e| CoreError::list_failed("interfaces", &source.name, &e))?;
    let dest_ifaces = api
        .list_interfaces(&destination.site_id, &destination.id)
        .await
        .map_err(|e| CoreError::list_failed("interfaces", &destination.name, &e))?;
    debug!(
        source = source_ifaces.len(),
        destination = dest_ifaces.len(),
        "listed interfaces"
    );

    let parent_id = match taxonomy {
        InterfaceTaxonomy::SubInterface => {
            let parent = find_by_name(&dest_ifaces, &request.parent_interface).ok_or_else(|| {
                CoreError::ParentInterfaceNotFound {
                    interface: request.parent_interface.clone(),
                    element: destination.name.clone(),
                }
            })?;
            Some(parent.id().to_owned())
        }
        InterfaceTaxonomy::Svi => None,
    };

    for action in plan_vlans(taxonomy, &source_ifaces, &dest_ifaces, parent_id.as_deref()) {
        let status = execute(api, &destination, Resource::Interface, &action, request.dry_run).await;
        summary.record(Resource::Interface, action.operation(), action.key(), status);
    }

    if taxonomy.has_parent_trunk() {
        match plan_parent_trunk(&source_ifaces, &dest_ifaces, &request.parent_interface) {
            Ok(action) => {
                let status =
                    execute(api, &destination, Resource::ParentTrunk, &action, request.dry_run).await;
                summary.record(Resource::ParentTrunk, action.operation(), action.key(), status);
            }
            Err(message) => {
                warn!(parent = %request.parent_interface, "{message}");
                summary.record(
                    Resource::ParentTrunk,
                    Operation::Update,
                    &request.parent_interface,
                    Status::Failed { message },
                );
            }
        }
    }

    // ── Static routes ──
    if request.include_routes {
        let source_routes = api
            .list_static_routes(&source.site_id, &source.id)
            .await
            .map_err(|e| CoreError::list_failed("static routes", &source.name, &e))?;
        let dest_routes = api
            .list_static_routes(&destination.site_id, &destination.id)
            .await
            .map_err(|e| CoreError::list_failed("static routes", &destination.name, &e))?;
        // Re-list so VLANs created above resolve as next-hop interfaces.
        let fresh_ifaces = api
            .list_interfaces(&destination.site_id, &destination.id)
            .await
            .map_err(|e| CoreError::list_failed("interfaces", &destination.name, &e))?;

        let id_map = interface_id_map(&source_ifaces, &fresh_ifaces);
        for action in plan_routes(&source_routes, &dest_routes, &id_map) {
            let status =
                execute(api, &destination, Resource::StaticRoute, &action, request.dry_run).await;
            summary.record(Resource::StaticRoute, action.operation(), action.key(), status);
        }
    } else {
        debug!("skipping static routes");
    }

    info!(
        created = summary.created(),
        updated = summary.updated(),
        failed = summary.failed(),
        "copy finished"
    );
    Ok(summary)
}

/// Send one action to the destination element.
async fn execute<A: ElementApi>(
    api: &A,
    target: &ElementRef,
    resource: Resource,
    action: &Action,
    dry_run: bool,
) -> Status {
    let (site, element) = (target.site_id.as_str(), target.id.as_str());

    if dry_run {
        info!(%resource, operation = %action.operation(), key = action.key(), "planned");
        return Status::Planned;
    }

    let result = match (resource, action) {
        (Resource::StaticRoute, Action::Create { payload, .. }) => {
            api.create_static_route(site, element, payload).await
        }
        (Resource::StaticRoute, Action::Update { id, payload, .. }) => {
            api.update_static_route(site, element, id, payload).await
        }
        (_, Action::Create { payload, .. }) => api.create_interface(site, element, payload).await,
        (_, Action::Update { id, payload, .. }) => {
            api.update_interface(site, element, id, payload).await
        }
    };

    match result {
        Ok(()) => {
            info!(%resource, operation = %action.operation(), key = action.key(), "applied");
            Status::Applied
        }
        Err(e) => {
            warn!(
                %resource,
                operation = %action.operation(),
                key = action.key(),
                error = %e,
                "write failed"
            );
            Status::Failed {
                message: e.to_string(),
            }
        }
    }
}
