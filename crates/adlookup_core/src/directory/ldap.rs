//! LDAP-backed directory client.
//!
//! # Responsibility
//! - Translate `DirectoryClient` calls into Active Directory searches.
//! - Keep connection, bind and filter details inside the directory boundary.
//!
//! # Invariants
//! - Every operation opens its own connection and unbinds before returning.
//! - Filter values are escaped before interpolation.
//! - A size-limited result set is returned as-is, not treated as a failure.

use super::{AttributeSet, DirectoryClient, DirectoryError, DirectoryResult};
use crate::config::DirectoryConfig;
use crate::logging::sanitize_message;
use crate::model::employee::SearchAttribute;
use ldap3::{
    ldap_escape, LdapConn, LdapConnSettings, LdapResult, Scope, SearchEntry, SearchOptions,
};
use log::{error, info, warn};
use std::time::Instant;

const PERSON_FILTER: &str = "(objectClass=user)(objectCategory=person)";
/// `LDAP_MATCHING_RULE_IN_CHAIN`: walks nested group membership server-side.
const IN_CHAIN_RULE: &str = "1.2.840.113556.1.4.1941";
const RC_SUCCESS: u32 = 0;
const RC_SIZE_LIMIT_EXCEEDED: u32 = 4;
const MAX_LOGGED_VALUE_CHARS: usize = 64;
const OBJECT_SID: &str = "objectSid";
const PRIMARY_GROUP_ID: &str = "primaryGroupID";
/// Revision, sub-authority count and the 48-bit identifier authority.
const SID_HEADER_LEN: usize = 8;

/// Active Directory client speaking LDAP through `ldap3`.
pub struct LdapDirectory {
    config: DirectoryConfig,
}

impl LdapDirectory {
    pub fn new(config: DirectoryConfig) -> Self {
        Self { config }
    }

    fn connect(&self) -> DirectoryResult<LdapConn> {
        let settings = LdapConnSettings::new().set_conn_timeout(self.config.timeout);
        let mut conn = LdapConn::with_settings(settings, self.config.url.as_str())?;
        let bind = conn
            .with_timeout(self.config.timeout)
            .simple_bind(&self.config.bind_user, &self.config.bind_password)?;
        check_result("bind", bind, false)?;
        Ok(conn)
    }

    /// Runs one subtree search on a fresh connection.
    fn search(
        &self,
        operation: &'static str,
        filter: &str,
        attributes: &[&str],
    ) -> DirectoryResult<Vec<SearchEntry>> {
        let started_at = Instant::now();
        let outcome = self.search_inner(filter, attributes);
        match &outcome {
            Ok(entries) => info!(
                "event=directory_search module=directory status=ok operation={} entries={} duration_ms={}",
                operation,
                entries.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=directory_search module=directory status=error operation={} duration_ms={} error={}",
                operation,
                started_at.elapsed().as_millis(),
                err
            ),
        }
        outcome
    }

    fn search_inner(
        &self,
        filter: &str,
        attributes: &[&str],
    ) -> DirectoryResult<Vec<SearchEntry>> {
        let mut conn = self.connect()?;
        let result = conn
            .with_timeout(self.config.timeout)
            .with_search_options(SearchOptions::new().sizelimit(self.config.size_limit))
            .search(
                self.config.base_dn.as_str(),
                Scope::Subtree,
                filter,
                attributes.to_vec(),
            );
        let unbind = conn.unbind();

        let ldap3::SearchResult(entries, status) = result?;
        if status.rc == RC_SIZE_LIMIT_EXCEEDED {
            warn!(
                "event=directory_search module=directory status=truncated size_limit={}",
                self.config.size_limit
            );
        }
        check_result("search", status, true)?;
        if let Err(err) = unbind {
            warn!("event=directory_unbind module=directory status=error error={err}");
        }

        Ok(entries.into_iter().map(SearchEntry::construct).collect())
    }

    /// Resolves the distinguished name of the first entry matching `filter`.
    fn find_dn(&self, operation: &'static str, filter: &str) -> DirectoryResult<Option<String>> {
        let entries = self.search(operation, filter, &["distinguishedName"])?;
        Ok(entries.into_iter().next().map(|entry| entry.dn))
    }
}

impl DirectoryClient for LdapDirectory {
    fn search_by_attribute(
        &self,
        attribute: SearchAttribute,
        value: &str,
    ) -> DirectoryResult<Vec<AttributeSet>> {
        info!(
            "event=employee_search module=directory status=start attribute={} value={}",
            attribute,
            sanitize_message(value, MAX_LOGGED_VALUE_CHARS)
        );
        let filter = person_filter(attribute, value);
        let requested = SearchAttribute::ALL
            .iter()
            .map(|attribute| attribute.ldap_name())
            .collect::<Vec<_>>();
        let entries = self.search("search_by_attribute", &filter, &requested)?;
        Ok(employee_attribute_sets(entries))
    }

    fn list_group_members(&self, group: &str) -> DirectoryResult<Vec<String>> {
        let Some(group_dn) = self.find_dn("find_group", &group_filter(group))? else {
            return Ok(Vec::new());
        };
        let filter = format!(
            "(&{PERSON_FILTER}(memberOf:{IN_CHAIN_RULE}:={}))",
            ldap_escape(group_dn.as_str())
        );
        let short_name = SearchAttribute::ShortName.ldap_name();
        let entries = self.search("list_group_members", &filter, &[short_name])?;
        Ok(first_values(entries, short_name))
    }

    fn list_groups_for_member(&self, short_name: &str) -> DirectoryResult<Vec<String>> {
        let account_filter = format!(
            "(&{PERSON_FILTER}({}={}))",
            SearchAttribute::ShortName.ldap_name(),
            ldap_escape(short_name)
        );
        let accounts =
            self.search("find_member", &account_filter, &[OBJECT_SID, PRIMARY_GROUP_ID])?;
        let Some(account) = accounts.into_iter().next() else {
            return Ok(Vec::new());
        };
        let filter = format!(
            "(&(objectClass=group)(member={}))",
            ldap_escape(account.dn.as_str())
        );
        let entries = self.search("list_groups_for_member", &filter, &["cn"])?;
        let mut groups = first_values(entries, "cn");

        // The primary group never lists the account in `member`.
        if let Some(filter) = primary_group_filter(&account) {
            let entries = self.search("find_primary_group", &filter, &["cn"])?;
            for group in first_values(entries, "cn") {
                if !groups.contains(&group) {
                    groups.push(group);
                }
            }
        }
        Ok(groups)
    }
}

/// Keeps the entries that carry an employee number.
///
/// Accounts without one are service or test accounts.
pub(crate) fn employee_attribute_sets(entries: Vec<SearchEntry>) -> Vec<AttributeSet> {
    let employee_id = SearchAttribute::EmployeeId.ldap_name();
    entries
        .into_iter()
        .map(|entry| entry.attrs.into_iter().collect::<AttributeSet>())
        .filter(|attributes| attributes.first(employee_id).is_some())
        .collect()
}

/// Projects each entry to the first value of `attribute`, skipping entries
/// that lack it.
pub(crate) fn first_values(entries: Vec<SearchEntry>, attribute: &str) -> Vec<String> {
    entries
        .into_iter()
        .filter_map(|entry| {
            entry
                .attrs
                .into_iter()
                .collect::<AttributeSet>()
                .first(attribute)
                .map(str::to_string)
        })
        .collect()
}

/// Builds the filter matching an account's primary group.
///
/// The group SID is the account SID with its last sub-authority (the RID)
/// replaced by `primaryGroupID`. Returns `None` when either attribute is
/// missing or the SID is malformed.
pub(crate) fn primary_group_filter(account: &SearchEntry) -> Option<String> {
    let sid = object_sid(account)?;
    let sub_authorities = usize::from(*sid.get(1)?);
    if sub_authorities == 0 || sid.len() != SID_HEADER_LEN + 4 * sub_authorities {
        return None;
    }
    let rid = account
        .attrs
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(PRIMARY_GROUP_ID))
        .and_then(|(_, values)| values.first())
        .and_then(|value| value.parse::<u32>().ok())?;

    let mut group_sid = sid[..sid.len() - 4].to_vec();
    group_sid.extend_from_slice(&rid.to_le_bytes());
    let escaped = group_sid
        .iter()
        .map(|byte| format!("\\{byte:02x}"))
        .collect::<String>();
    Some(format!("(&(objectClass=group)({OBJECT_SID}={escaped}))"))
}

/// Raw `objectSid` bytes; `ldap3` keeps values that happen to be UTF-8 in
/// `attrs`.
fn object_sid(account: &SearchEntry) -> Option<Vec<u8>> {
    let binary = account
        .bin_attrs
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(OBJECT_SID))
        .and_then(|(_, values)| values.first().cloned());
    binary.or_else(|| {
        account
            .attrs
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(OBJECT_SID))
            .and_then(|(_, values)| values.first())
            .map(|value| value.as_bytes().to_vec())
    })
}

/// Builds the person search filter for one attribute/value pair.
pub(crate) fn person_filter(attribute: SearchAttribute, value: &str) -> String {
    format!(
        "(&{PERSON_FILTER}({}={}))",
        attribute.ldap_name(),
        ldap_escape(value)
    )
}

/// Matches a group by login name or common name.
pub(crate) fn group_filter(group: &str) -> String {
    let escaped = ldap_escape(group);
    format!("(&(objectClass=group)(|(sAMAccountName={escaped})(cn={escaped})))")
}

fn check_result(
    operation: &'static str,
    result: LdapResult,
    allow_truncation: bool,
) -> DirectoryResult<()> {
    match result.rc {
        RC_SUCCESS => Ok(()),
        RC_SIZE_LIMIT_EXCEEDED if allow_truncation => Ok(()),
        rc => Err(DirectoryError::Rejected {
            operation,
            rc,
            message: result.text,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        check_result, employee_attribute_sets, first_values, group_filter, person_filter,
        primary_group_filter,
    };
    use crate::directory::DirectoryError;
    use crate::model::employee::SearchAttribute;
    use ldap3::{LdapResult, SearchEntry};
    use std::collections::HashMap;

    fn entry(dn: &str, attrs: &[(&str, &[&str])]) -> SearchEntry {
        SearchEntry {
            dn: dn.to_string(),
            attrs: attrs
                .iter()
                .map(|(name, values)| {
                    (
                        name.to_string(),
                        values.iter().map(|value| value.to_string()).collect(),
                    )
                })
                .collect::<HashMap<_, _>>(),
            bin_attrs: HashMap::new(),
        }
    }

    fn ldap_result(rc: u32, text: &str) -> LdapResult {
        LdapResult {
            rc,
            matched: String::new(),
            text: text.to_string(),
            refs: Vec::new(),
            ctrls: Vec::new(),
        }
    }

    #[test]
    fn person_filter_targets_user_people() {
        assert_eq!(
            person_filter(SearchAttribute::ShortName, "jdoe"),
            "(&(objectClass=user)(objectCategory=person)(sAMAccountName=jdoe))"
        );
    }

    #[test]
    fn person_filter_escapes_special_characters() {
        let filter = person_filter(SearchAttribute::DisplayName, "Doe*)(cn=*");
        assert!(filter.contains(r"Doe\2a\29\28cn=\2a"));
        assert!(!filter.contains("Doe*"));
    }

    #[test]
    fn group_filter_matches_login_or_common_name() {
        assert_eq!(
            group_filter("Finance"),
            "(&(objectClass=group)(|(sAMAccountName=Finance)(cn=Finance)))"
        );
    }

    #[test]
    fn size_limit_is_tolerated_only_for_searches() {
        assert!(check_result("search", ldap_result(4, ""), true).is_ok());
        let err = check_result("bind", ldap_result(4, ""), false).unwrap_err();
        assert!(matches!(err, DirectoryError::Rejected { rc: 4, .. }));
    }

    #[test]
    fn rejection_carries_server_text() {
        let err = check_result("bind", ldap_result(49, "invalid credentials"), false).unwrap_err();
        assert_eq!(
            err.to_string(),
            "directory rejected bind (rc=49): invalid credentials"
        );
    }

    #[test]
    fn entries_without_employee_id_are_dropped() {
        let entries = vec![
            entry(
                "CN=John Doe,OU=Staff,DC=corp,DC=example,DC=com",
                &[("employeeID", &["4711"]), ("sAMAccountName", &["jdoe"])],
            ),
            entry(
                "CN=Backup Service,OU=Service,DC=corp,DC=example,DC=com",
                &[("sAMAccountName", &["svc-backup"])],
            ),
            entry(
                "CN=Empty Id,OU=Staff,DC=corp,DC=example,DC=com",
                &[("employeeID", &[]), ("sAMAccountName", &["empty"])],
            ),
        ];

        let kept = employee_attribute_sets(entries);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].first("sAMAccountName"), Some("jdoe"));
    }

    #[test]
    fn employee_id_attribute_name_is_case_insensitive() {
        let entries = vec![entry(
            "CN=Anna Smith,OU=Staff,DC=corp,DC=example,DC=com",
            &[("EMPLOYEEID", &["4712"])],
        )];

        assert_eq!(employee_attribute_sets(entries).len(), 1);
    }

    #[test]
    fn first_values_skips_entries_missing_the_attribute() {
        let entries = vec![
            entry("CN=Finance,DC=corp", &[("cn", &["Finance"])]),
            entry("CN=Nameless,DC=corp", &[]),
            entry("CN=VPN Users,DC=corp", &[("cn", &["VPN Users", "VPN"])]),
        ];

        assert_eq!(first_values(entries, "cn"), ["Finance", "VPN Users"]);
    }

    /// S-1-5-21-1-2-3-1104
    const ACCOUNT_SID: [u8; 28] = [
        0x01, 0x05, 0x00, 0x00, 0x00, 0x00, 0x00, 0x05, 0x15, 0x00, 0x00, 0x00, 0x01, 0x00,
        0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x03, 0x00, 0x00, 0x00, 0x50, 0x04, 0x00, 0x00,
    ];

    fn account(sid: &[u8], primary_group: Option<&str>) -> SearchEntry {
        let mut account = match primary_group {
            Some(rid) => entry("CN=John Doe,DC=corp", &[("primaryGroupID", &[rid])]),
            None => entry("CN=John Doe,DC=corp", &[]),
        };
        account
            .bin_attrs
            .insert("objectSid".to_string(), vec![sid.to_vec()]);
        account
    }

    #[test]
    fn primary_group_sid_swaps_the_rid() {
        let filter = primary_group_filter(&account(&ACCOUNT_SID, Some("513"))).unwrap();

        assert_eq!(
            filter,
            r"(&(objectClass=group)(objectSid=\01\05\00\00\00\00\00\05\15\00\00\00\01\00\00\00\02\00\00\00\03\00\00\00\01\02\00\00))"
        );
    }

    #[test]
    fn primary_group_sid_may_arrive_as_text() {
        let text = String::from_utf8(ACCOUNT_SID.to_vec()).unwrap();
        let text_account = entry(
            "CN=John Doe,DC=corp",
            &[("primaryGroupID", &["513"]), ("objectSid", &[text.as_str()])],
        );

        assert_eq!(
            primary_group_filter(&text_account),
            primary_group_filter(&account(&ACCOUNT_SID, Some("513")))
        );
    }

    #[test]
    fn primary_group_needs_both_attributes_and_a_valid_sid() {
        assert!(primary_group_filter(&account(&ACCOUNT_SID, None)).is_none());
        assert!(primary_group_filter(&account(&ACCOUNT_SID[..26], Some("513"))).is_none());
        assert!(primary_group_filter(&account(&ACCOUNT_SID, Some("users"))).is_none());
        assert!(primary_group_filter(&entry("CN=John Doe,DC=corp", &[])).is_none());
    }
}
