// Element endpoints
//
// Element listing is tenant-scoped (not site-scoped), using
// `/sdwan/{v}/api/elements` rather than the `/sites/{site}/elements/...` pattern.

use tracing::debug;

use crate::client::SdwanClient;
use crate::error::Error;
use crate::models::{Element, ItemList};

impl SdwanClient {
    /// List every element visible to the tenant.
    ///
    /// `GET /sdwan/{v}/api/elements`
    pub async fn list_elements(&self) -> Result<Vec<Element>, Error> {
        let url = self.api_url(&self.versions().elements, "elements")?;
        debug!("listing elements");
        let list: ItemList<Element> = self.get(url).await?;
        Ok(list.items)
    }
}
