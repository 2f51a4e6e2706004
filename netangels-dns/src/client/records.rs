//! DNS record operations

use reqwest::Method;

use crate::error::{ClientError, Operation, Result};
use crate::session::Session;
use crate::transport::Transport;
use crate::types::{Record, RecordId, RecordType, ZoneId};
use crate::utils::domain::{normalize_ttl, trim_trailing_dot};

use super::NetangelsClient;
use super::http::{json_body, log_failure, parse_json, unexpected_status};
use super::wire::{RecordBody, RecordListResponse, SavedRecordResponse, WireRecord};

impl<T: Transport> NetangelsClient<T> {
    /// Create a record and return the ID the API assigned to it.
    ///
    /// `record_type` may be a [`RecordType`] or a string such as `"TXT"`; an
    /// unknown type fails with [`ClientError::InvalidRecordType`] before any
    /// request is made. A `ttl` of zero or less is replaced by the configured
    /// default (300 s unless changed), and one trailing dot is stripped from
    /// `fqdn`.
    ///
    /// HTTP 201 is success, 400 maps to [`ClientError::InvalidParameter`] and
    /// any other status to [`ClientError::UnexpectedStatus`].
    pub async fn add_record<R>(
        &self,
        session: &Session,
        fqdn: &str,
        value: &str,
        record_type: R,
        ttl: i64,
    ) -> Result<RecordId>
    where
        R: TryInto<RecordType>,
        ClientError: From<R::Error>,
    {
        let op = Operation::CreateRecord;
        let body = RecordBody {
            name: trim_trailing_dot(fqdn),
            record_type: record_type.try_into()?,
            value,
            ttl: normalize_ttl(ttl, self.config.default_ttl),
        };
        let request = self
            .api_request(session, op, Method::POST, "/dns/records/")
            .body(json_body(op, &body)?);

        let response = self.send(request).await?;
        match response.status {
            201 => {
                let saved: SavedRecordResponse = parse_json(op, &response.body)?;
                let id = saved.id().ok_or_else(|| ClientError::ParseError {
                    operation: op,
                    detail: "响应中缺少 id 字段".to_string(),
                })?;
                log::info!("Created {} record '{}' (id {id})", body.record_type, body.name);
                Ok(id)
            }
            400 => Err(invalid_parameter(op, response.body)),
            _ => Err(unexpected_status(op, response)),
        }
    }

    /// Replace the name, type, value and TTL of an existing record.
    ///
    /// Validation and normalization follow [`add_record`](Self::add_record).
    /// HTTP 200 is success, 400 maps to [`ClientError::InvalidParameter`] and
    /// 404 to [`ClientError::RecordNotFound`].
    pub async fn update_record<R>(
        &self,
        session: &Session,
        record_id: RecordId,
        fqdn: &str,
        value: &str,
        record_type: R,
        ttl: i64,
    ) -> Result<RecordId>
    where
        R: TryInto<RecordType>,
        ClientError: From<R::Error>,
    {
        let op = Operation::UpdateRecord;
        let body = RecordBody {
            name: trim_trailing_dot(fqdn),
            record_type: record_type.try_into()?,
            value,
            ttl: normalize_ttl(ttl, self.config.default_ttl),
        };
        let request = self
            .api_request(session, op, Method::PUT, &format!("/dns/records/{record_id}/"))
            .body(json_body(op, &body)?);

        let response = self.send(request).await?;
        match response.status {
            200 => {
                if response.body.trim().is_empty() {
                    return Ok(record_id);
                }
                let saved: SavedRecordResponse = parse_json(op, &response.body)?;
                log::info!("Updated {} record '{}' (id {record_id})", body.record_type, body.name);
                Ok(saved.id().unwrap_or(record_id))
            }
            400 => Err(invalid_parameter(op, response.body)),
            404 => Err(record_not_found(record_id, response.body)),
            _ => Err(unexpected_status(op, response)),
        }
    }

    /// Delete a record by ID.
    ///
    /// HTTP 200 (or 204) is success; 404 maps to [`ClientError::RecordNotFound`].
    pub async fn remove_record(&self, session: &Session, record_id: RecordId) -> Result<()> {
        let op = Operation::DeleteRecord;
        let request =
            self.api_request(session, op, Method::DELETE, &format!("/dns/records/{record_id}/"));

        let response = self.send(request).await?;
        match response.status {
            200 | 204 => {
                log::info!("Deleted record {record_id}");
                Ok(())
            }
            404 => Err(record_not_found(record_id, response.body)),
            _ => Err(unexpected_status(op, response)),
        }
    }

    /// All records of a zone, in the order the API returns them.
    ///
    /// Records of types this client does not manage (SOA, ...) are left out.
    pub async fn list_records(&self, session: &Session, zone_id: ZoneId) -> Result<Vec<Record>> {
        let op = Operation::ListRecords;
        let request = self.api_request(
            session,
            op,
            Method::GET,
            &format!("/dns/zones/{zone_id}/records/"),
        );

        let response = self.send(request).await?;
        if response.status != 200 {
            return Err(unexpected_status(op, response));
        }
        let list: RecordListResponse = parse_json(op, &response.body)?;
        Ok(list
            .entities
            .into_iter()
            .filter_map(WireRecord::into_record)
            .collect())
    }

    /// First record in the zone owning `fqdn` whose type is `record_type`
    /// and whose name equals `name` exactly.
    ///
    /// Makes two requests: the zone list, then that zone's records. `Ok(None)`
    /// means the zone exists but holds no such record; a missing zone is
    /// [`ClientError::ZoneNotFound`].
    pub async fn find_record<R>(
        &self,
        session: &Session,
        fqdn: &str,
        name: &str,
        record_type: R,
    ) -> Result<Option<Record>>
    where
        R: TryInto<RecordType>,
        ClientError: From<R::Error>,
    {
        let record_type = record_type.try_into()?;
        let zone = self.find_zone_for_name(session, fqdn).await?;
        let records = self.list_records(session, zone.id).await?;
        let found = first_match(records, name, record_type);
        if found.is_none() {
            log::debug!(
                "No {record_type} record named '{name}' in zone '{}' ({})",
                zone.name,
                zone.id
            );
        }
        Ok(found)
    }

    /// ID of the record [`find_record`](Self::find_record) would return.
    pub async fn resolve_record_id<R>(
        &self,
        session: &Session,
        fqdn: &str,
        name: &str,
        record_type: R,
    ) -> Result<Option<RecordId>>
    where
        R: TryInto<RecordType>,
        ClientError: From<R::Error>,
    {
        Ok(self
            .find_record(session, fqdn, name, record_type)
            .await?
            .map(|record| record.id))
    }
}

/// Linear scan; the first record in server order wins.
fn first_match(records: Vec<Record>, name: &str, record_type: RecordType) -> Option<Record> {
    records
        .into_iter()
        .find(|record| record.matches(name, record_type))
}

fn invalid_parameter(operation: Operation, body: String) -> ClientError {
    let err = ClientError::InvalidParameter {
        operation,
        raw_message: body,
    };
    log_failure(&err);
    err
}

fn record_not_found(record_id: RecordId, body: String) -> ClientError {
    let err = ClientError::RecordNotFound {
        record_id,
        raw_message: (!body.is_empty()).then_some(body),
    };
    log_failure(&err);
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordDetails;

    fn txt(id: RecordId, name: &str) -> Record {
        Record {
            id,
            zone_id: Some(42),
            record_type: RecordType::Txt,
            name: name.to_string(),
            value: String::new(),
            ttl: Some(300),
            priority: None,
            created_at: None,
            updated_at: None,
            details: RecordDetails::TXT { value: None },
        }
    }

    #[test]
    fn first_match_in_server_order() {
        let mut a = txt(3, "test");
        a.record_type = RecordType::A;
        a.details = RecordDetails::A { ip: None };
        let records = vec![a, txt(9, "other"), txt(5, "test"), txt(7, "test")];
        assert_eq!(first_match(records, "test", RecordType::Txt).map(|r| r.id), Some(5));
    }

    #[test]
    fn no_match_is_none() {
        assert!(first_match(vec![txt(1, "a")], "b", RecordType::Txt).is_none());
        assert!(first_match(Vec::new(), "a", RecordType::Txt).is_none());
    }

    #[test]
    fn not_found_drops_empty_body() {
        let err = record_not_found(12, String::new());
        assert!(matches!(
            err,
            ClientError::RecordNotFound {
                record_id: 12,
                raw_message: None
            }
        ));
    }
}
