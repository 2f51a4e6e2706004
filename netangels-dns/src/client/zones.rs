//! Zone listing and name → ID resolution

use reqwest::Method;

use crate::error::{ClientError, Operation, Result};
use crate::session::Session;
use crate::transport::Transport;
use crate::types::{Zone, ZoneId, ZoneList};
use crate::utils::domain::trim_trailing_dot;

use super::NetangelsClient;
use super::http::{log_failure, parse_json, unexpected_status};

impl<T: Transport> NetangelsClient<T> {
    /// `GET /dns/zones/`. The whole list is expected in one response.
    pub async fn list_zones(&self, session: &Session) -> Result<ZoneList> {
        let request = self.api_request(session, Operation::ListZones, Method::GET, "/dns/zones/");
        let response = self.send(request).await?;
        if response.status != 200 {
            return Err(unexpected_status(Operation::ListZones, response));
        }
        let zones: ZoneList = parse_json(Operation::ListZones, &response.body)?;
        log::debug!("Fetched {} zones", zones.entities.len());
        Ok(zones)
    }

    /// ID of the zone named exactly `zone_name` (one trailing dot ignored).
    ///
    /// Comparison is case-sensitive and the first match in server order wins.
    pub async fn resolve_zone_id(&self, session: &Session, zone_name: &str) -> Result<ZoneId> {
        let zone_name = trim_trailing_dot(zone_name);
        let zones = self.list_zones(session).await?;
        zones
            .find_by_name(zone_name)
            .map(|zone| zone.id)
            .ok_or_else(|| zone_not_found(zone_name))
    }

    /// The zone that owns `fqdn`: the zone named exactly `fqdn`, otherwise
    /// the most specific zone `fqdn` falls under.
    pub async fn find_zone_for_name(&self, session: &Session, fqdn: &str) -> Result<Zone> {
        let fqdn = trim_trailing_dot(fqdn);
        let zones = self.list_zones(session).await?;
        zones
            .find_owner_of(fqdn)
            .cloned()
            .ok_or_else(|| zone_not_found(fqdn))
    }
}

fn zone_not_found(name: &str) -> ClientError {
    let err = ClientError::ZoneNotFound {
        zone: name.to_string(),
    };
    log_failure(&err);
    err
}
