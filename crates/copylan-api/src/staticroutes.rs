// Static route endpoints
//
// `/sdwan/{v}/api/sites/{site}/elements/{element}/staticroutes[/{id}]`

use serde::Serialize;
use tracing::debug;

use crate::client::SdwanClient;
use crate::error::Error;
use crate::models::{ItemList, StaticRoute};

impl SdwanClient {
    pub async fn list_static_routes(
        &self,
        site_id: &str,
        element_id: &str,
    ) -> Result<Vec<StaticRoute>, Error> {
        let url = self.element_url(
            &self.versions().static_routes,
            site_id,
            element_id,
            "staticroutes",
        )?;
        debug!(site_id, element_id, "listing static routes");
        let list: ItemList<StaticRoute> = self.get(url).await?;
        Ok(list.items)
    }

    pub async fn create_static_route(
        &self,
        site_id: &str,
        element_id: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<(), Error> {
        let url = self.element_url(
            &self.versions().static_routes,
            site_id,
            element_id,
            "staticroutes",
        )?;
        debug!(site_id, element_id, "creating static route");
        self.post(url, body).await
    }

    pub async fn update_static_route(
        &self,
        site_id: &str,
        element_id: &str,
        route_id: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<(), Error> {
        let url = self.element_url(
            &self.versions().static_routes,
            site_id,
            element_id,
            &format!("staticroutes/{route_id}"),
        )?;
        debug!(site_id, element_id, route_id, "updating static route");
        self.put(url, body).await
    }
}
