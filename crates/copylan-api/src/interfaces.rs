// Interface endpoints
//
// All interface calls are element-scoped:
// `/sdwan/{v}/api/sites/{site}/elements/{element}/interfaces[/{id}]`.

use serde::Serialize;
use tracing::debug;

use crate::client::SdwanClient;
use crate::error::Error;
use crate::models::{Interface, ItemList};

impl SdwanClient {
    /// List all interfaces on an element.
    pub async fn list_interfaces(
        &self,
        site_id: &str,
        element_id: &str,
    ) -> Result<Vec<Interface>, Error> {
        let url = self.element_url(&self.versions().interfaces, site_id, element_id, "interfaces")?;
        debug!(site_id, element_id, "listing interfaces");
        let list: ItemList<Interface> = self.get(url).await?;
        Ok(list.items)
    }

    /// Create an interface.
    ///
    /// `POST .../interfaces`
    pub async fn create_interface(
        &self,
        site_id: &str,
        element_id: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<(), Error> {
        let url = self.element_url(&self.versions().interfaces, site_id, element_id, "interfaces")?;
        debug!(site_id, element_id, "creating interface");
        self.post(url, body).await
    }

    /// Replace an interface's configuration.
    ///
    /// `PUT .../interfaces/{interface_id}`
    pub async fn update_interface(
        &self,
        site_id: &str,
        element_id: &str,
        interface_id: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<(), Error> {
        let url = self.element_url(
            &self.versions().interfaces,
            site_id,
            element_id,
            &format!("interfaces/{interface_id}"),
        )?;
        debug!(site_id, element_id, interface_id, "updating interface");
        self.put(url, body).await
    }
}
