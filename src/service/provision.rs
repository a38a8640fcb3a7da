// Copyright (c) 2025 - Cowboy AI, Inc.
//! User and group provisioning
//!
//! Builds new account records from a qualified name plus request data:
//!
//! 1. Parse `name.realm.site_id` (menus only if the location is partial)
//! 2. Reject a name already present at that location
//! 3. Allocate or validate the numeric id against the configured range
//! 4. Fill the configured defaults
//!
//! Records are returned to the caller; persisting them is the caller's
//! transaction.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{IdRange, InventoryConfig};
use crate::domain::validation::{is_valid_gid, is_valid_ssh_pubkey, is_valid_uid};
use crate::domain::{Group, IdentifierParser, Named, ResolvedName, User};
use crate::errors::{InventoryError, InventoryResult};
use crate::query::{Field, Predicate, Value};
use crate::resolve::{Chooser, Criteria};
use crate::store::Store;

/// Optional attributes for a new user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserRequest {
    pub uid: Option<u32>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub shell: Option<String>,
    pub home_dir: Option<String>,
    pub ssh_public_key: Option<String>,
}

/// Optional attributes for a new group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupRequest {
    pub gid: Option<u32>,
    pub description: Option<String>,
}

fn location(realm: &str, site_id: &str) -> [Predicate; 2] {
    [
        Predicate::text(Field::Realm, realm),
        Predicate::text(Field::SiteId, site_id),
    ]
}

/// Highest allocated id in `range` plus one, or the range start
fn next_in_range(
    what: &'static str,
    range: IdRange,
    allocated: impl Iterator<Item = u32>,
) -> InventoryResult<u32> {
    let next = allocated
        .filter(|id| range.contains(*id))
        .max()
        .map_or(Some(range.start), |highest| highest.checked_add(1));
    match next {
        Some(id) if range.contains(id) => Ok(id),
        _ => Err(InventoryError::RangeExhausted {
            what,
            start: range.start,
            end: range.end,
        }),
    }
}

/// Next free uid at a realm/site
pub fn next_free_uid<S: Store<User> + ?Sized>(
    config: &InventoryConfig,
    store: &S,
    realm: &str,
    site_id: &str,
) -> InventoryResult<u32> {
    let users = store.find(&location(realm, site_id))?;
    next_in_range("uid", config.uid_range, users.iter().map(|u| u.uid))
}

/// Next free gid at a realm/site
pub fn next_free_gid<S: Store<Group> + ?Sized>(
    config: &InventoryConfig,
    store: &S,
    realm: &str,
    site_id: &str,
) -> InventoryResult<u32> {
    let groups = store.find(&location(realm, site_id))?;
    next_in_range("gid", config.gid_range, groups.iter().map(|g| g.gid))
}

/// Parse a qualified name and fail if a record of kind `R` already has it
fn claim_name<R, S>(
    config: &InventoryConfig,
    store: &S,
    chooser: &dyn Chooser,
    raw: &str,
) -> InventoryResult<(String, ResolvedName)>
where
    R: Named,
    S: Store<R> + ?Sized,
{
    let resolved = IdentifierParser::new(config, chooser).parse(raw, true)?;
    let name = resolved
        .name
        .clone()
        .ok_or_else(|| InventoryError::malformed(raw, "a name is required"))?;

    let criteria = Criteria::from(resolved.clone());
    if !store.find(&criteria.predicates(R::NAME_FIELD))?.is_empty() {
        warn!(kind = %R::KIND, identifier = %criteria, "Name already taken");
        return Err(InventoryError::AlreadyExists {
            kind: R::KIND,
            identifier: criteria.to_string(),
        });
    }
    Ok((name, resolved))
}

/// Build a new user at a qualified name
pub fn new_user<S: Store<User> + ?Sized>(
    config: &InventoryConfig,
    store: &S,
    chooser: &dyn Chooser,
    raw: &str,
    request: UserRequest,
) -> InventoryResult<User> {
    let (username, at) = claim_name::<User, S>(config, store, chooser, raw)?;
    let identifier = at.unqualified();

    let uid = match request.uid {
        Some(uid) => {
            if !is_valid_uid(config, uid) {
                return Err(InventoryError::InvalidRecord(format!(
                    "uid {} outside {}-{}",
                    uid, config.uid_range.start, config.uid_range.end
                )));
            }
            let taken = store.find(&[
                Predicate::eq(Field::Uid, Value::Int(i64::from(uid))),
                Predicate::text(Field::Realm, &at.realm),
                Predicate::text(Field::SiteId, &at.site_id),
            ])?;
            if let Some(owner) = taken.first() {
                return Err(InventoryError::InvalidRecord(format!(
                    "uid {} already belongs to {}",
                    uid,
                    owner.qualified_name()
                )));
            }
            uid
        }
        None => next_free_uid(config, store, &at.realm, &at.site_id)?,
    };

    if let Some(key) = &request.ssh_public_key {
        if !is_valid_ssh_pubkey(config, key) {
            return Err(InventoryError::InvalidSshKey(identifier));
        }
    }

    let defaults = &config.defaults;
    let mut user = User::new(&username, &at.realm, &at.site_id, uid);
    user.first_name = request.first_name;
    user.last_name = request.last_name;
    user.email = Some(request.email.unwrap_or_else(|| defaults.email_for(&username)));
    user.shell = Some(request.shell.unwrap_or_else(|| defaults.shell.clone()));
    user.home_dir = Some(request.home_dir.unwrap_or_else(|| defaults.home_dir_for(&username)));
    user.ssh_public_key = request.ssh_public_key;

    info!(user = %identifier, uid, "Provisioned user");
    Ok(user)
}

/// Build a new group at a qualified name
pub fn new_group<S: Store<Group> + ?Sized>(
    config: &InventoryConfig,
    store: &S,
    chooser: &dyn Chooser,
    raw: &str,
    request: GroupRequest,
) -> InventoryResult<Group> {
    let (groupname, at) = claim_name::<Group, S>(config, store, chooser, raw)?;

    let gid = match request.gid {
        Some(gid) if !is_valid_gid(config, gid) => {
            return Err(InventoryError::InvalidRecord(format!(
                "gid {} outside {}-{}",
                gid, config.gid_range.start, config.gid_range.end
            )));
        }
        Some(gid) => {
            let groups = store.find(&location(&at.realm, &at.site_id))?;
            if let Some(owner) = groups.iter().find(|g| g.gid == gid) {
                return Err(InventoryError::InvalidRecord(format!(
                    "gid {} already belongs to {}",
                    gid,
                    owner.qualified_name()
                )));
            }
            gid
        }
        None => next_free_gid(config, store, &at.realm, &at.site_id)?,
    };

    let mut group = Group::new(&groupname, &at.realm, &at.site_id, gid);
    group.description = request.description;

    info!(group = %at.unqualified(), gid, "Provisioned group");
    Ok(group)
}
