// Copyright (c) 2025 - Cowboy AI, Inc.
//! DNS zone data
//!
//! A zone is one `realm.site_id` under the managed domain. Its records are the
//! address records derived from interfaces that carry an IP, plus whatever is
//! stored explicitly for that realm/site.

use std::net::{IpAddr, Ipv4Addr};
use tracing::{debug, warn};

use crate::config::InventoryConfig;
use crate::domain::validation::{is_valid_realm, is_valid_site_id};
use crate::domain::{DnsRecord, NetworkInterface, RecordType};
use crate::errors::{InventoryError, InventoryResult};
use crate::query::{Field, Predicate};
use crate::store::Store;

/// Interface whose address record is named after the bare hostname
pub const PRIMARY_INTERFACE: &str = "eth0";

impl DnsRecord {
    /// Structural check of the target against the record type
    pub fn validate(&self) -> InventoryResult<()> {
        let invalid = |reason: &str| {
            Err(InventoryError::InvalidRecord(format!(
                "{} {} '{}': {}",
                self.record_type, self.name, self.target, reason
            )))
        };
        if self.name.trim().is_empty() {
            return invalid("empty owner name");
        }
        match self.record_type {
            RecordType::A if self.target.parse::<Ipv4Addr>().is_err() => {
                invalid("target is not an IPv4 address")
            }
            t if t.requires_hostname_target() && self.target.trim().is_empty() => {
                invalid("target hostname is empty")
            }
            t if t.requires_hostname_target() && self.target.parse::<IpAddr>().is_ok() => {
                invalid("target must be a hostname, not an address")
            }
            _ => Ok(()),
        }
    }

    /// One line of zone-file text
    pub fn to_zone_line(&self) -> String {
        let ttl = self.ttl.map(|t| format!("{} ", t)).unwrap_or_default();
        let target = match self.record_type {
            RecordType::Txt => format!("\"{}\"", self.target),
            _ => self.target.clone(),
        };
        format!("{}\t{}IN\t{}\t{}", self.name, ttl, self.record_type, target)
    }
}

/// Address record for an interface, if it has an IP
fn address_record(interface: &NetworkInterface) -> Option<DnsRecord> {
    let ip = interface.ip.as_ref()?;
    let name = if interface.interface == PRIMARY_INTERFACE {
        interface.hostname.clone()
    } else {
        format!("{}-{}", interface.hostname, interface.interface)
    };
    Some(DnsRecord::new(
        RecordType::A,
        name,
        ip.clone(),
        interface.realm.clone(),
        interface.site_id.clone(),
    ))
}

/// Every record of one realm/site zone, validated and sorted by name
pub fn zone_records<S>(
    store: &S,
    config: &InventoryConfig,
    realm: &str,
    site_id: &str,
) -> InventoryResult<Vec<DnsRecord>>
where
    S: Store<NetworkInterface> + Store<DnsRecord> + ?Sized,
{
    if !is_valid_realm(config, realm) || !is_valid_site_id(config, site_id) {
        return Err(InventoryError::malformed(
            &format!("{}.{}", realm, site_id),
            "not a configured realm.site_id",
        ));
    }
    let location = [
        Predicate::text(Field::Realm, realm),
        Predicate::text(Field::SiteId, site_id),
    ];

    let interfaces = Store::<NetworkInterface>::find(store, &location)?;
    let mut records: Vec<DnsRecord> = interfaces.iter().filter_map(address_record).collect();
    debug!(realm, site_id, derived = records.len(), "Derived address records");
    records.extend(Store::<DnsRecord>::find(store, &location)?);

    for record in &records {
        if let Err(e) = record.validate() {
            warn!(realm, site_id, "Zone contains an invalid record: {}", e);
            return Err(e);
        }
    }

    records.sort_by(|a, b| {
        (&a.name, a.record_type.as_str(), &a.target).cmp(&(&b.name, b.record_type.as_str(), &b.target))
    });
    Ok(records)
}
