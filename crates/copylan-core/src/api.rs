// ── Controller seam ──
//
// The reconciliation engine talks to the controller only through this
// trait, so tests can drive a full run against an in-memory fake.

use std::future::Future;

use copylan_api::{Element, Error, Interface, SdwanClient, StaticRoute};

use crate::payload::Payload;

/// The controller operations a copy run needs.
///
/// Writes report only success or failure; the engine never inspects the
/// created or updated record.
pub trait ElementApi: Sync {
    fn list_elements(&self) -> impl Future<Output = Result<Vec<Element>, Error>> + Send;

    fn list_interfaces(
        &self,
        site_id: &str,
        element_id: &str,
    ) -> impl Future<Output = Result<Vec<Interface>, Error>> + Send;

    fn create_interface(
        &self,
        site_id: &str,
        element_id: &str,
        payload: &Payload,
    ) -> impl Future<Output = Result<(), Error>> + Send;

    fn update_interface(
        &self,
        site_id: &str,
        element_id: &str,
        interface_id: &str,
        payload: &Payload,
    ) -> impl Future<Output = Result<(), Error>> + Send;

    fn list_static_routes(
        &self,
        site_id: &str,
        element_id: &str,
    ) -> impl Future<Output = Result<Vec<StaticRoute>, Error>> + Send;

    fn create_static_route(
        &self,
        site_id: &str,
        element_id: &str,
        payload: &Payload,
    ) -> impl Future<Output = Result<(), Error>> + Send;

    fn update_static_route(
        &self,
        site_id: &str,
        element_id: &str,
        route_id: &str,
        payload: &Payload,
    ) -> impl Future<Output = Result<(), Error>> + Send;
}

impl ElementApi for SdwanClient {
    async fn list_elements(&self) -> Result<Vec<Element>, Error> {
        SdwanClient::list_elements(self).await
    }

    async fn list_interfaces(
        &self,
        site_id: &str,
        element_id: &str,
    ) -> Result<Vec<Interface>, Error> {
        SdwanClient::list_interfaces(self, site_id, element_id).await
    }

    async fn create_interface(
        &self,
        site_id: &str,
        element_id: &str,
        payload: &Payload,
    ) -> Result<(), Error> {
        SdwanClient::create_interface(self, site_id, element_id, payload).await
    }

    async fn update_interface(
        &self,
        site_id: &str,
        element_id: &str,
        interface_id: &str,
        payload: &Payload,
    ) -> Result<(), Error> {
        SdwanClient::update_interface(self, site_id, element_id, interface_id, payload).await
    }

    async fn list_static_routes(
        &self,
        site_id: &str,
        element_id: &str,
    ) -> Result<Vec<StaticRoute>, Error> {
        SdwanClient::list_static_routes(self, site_id, element_id).await
    }

    async fn create_static_route(
        &self,
        site_id: &str,
        element_id: &str,
        payload: &Payload,
    ) -> Result<(), Error> {
        SdwanClient::create_static_route(self, site_id, element_id, payload).await
    }

    async fn update_static_route(
        &self,
        site_id: &str,
        element_id: &str,
        route_id: &str,
        payload: &Payload,
    ) -> Result<(), Error> {
        SdwanClient::update_static_route(self, site_id, element_id, route_id, payload).await
    }
}
