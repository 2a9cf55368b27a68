#![allow(dead_code)]

use adlookup_core::{
    AttributeSet, DirectoryClient, DirectoryError, DirectoryResult, SearchAttribute,
};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};

/// In-memory directory with a fixed set of people and groups.
#[derive(Default)]
pub struct FakeDirectory {
    people: Vec<AttributeSet>,
    groups: BTreeMap<String, Vec<String>>,
    failing_values: HashSet<String>,
    searches: RefCell<Vec<(SearchAttribute, String)>>,
}

impl FakeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Two employees, one group with both of them, one group with an orphan.
    pub fn seeded() -> Self {
        Self::new()
            .with_person(person("4711", "jdoe", "John", "Doe"))
            .with_person(person("4712", "asmith", "Anna", "Smith"))
            .with_group("Finance", &["jdoe", "asmith"])
            .with_group("VPN Users", &["jdoe"])
            .with_group("Orphans", &["gone"])
    }

    pub fn with_person(mut self, attributes: AttributeSet) -> Self {
        self.people.push(attributes);
        self
    }

    pub fn with_group(mut self, name: &str, members: &[&str]) -> Self {
        self.groups.insert(
            name.to_string(),
            members.iter().map(|member| member.to_string()).collect(),
        );
        self
    }

    /// Makes every search for `value` fail.
    pub fn failing_on(mut self, value: &str) -> Self {
        self.failing_values.insert(value.to_string());
        self
    }

    pub fn searches(&self) -> Vec<(SearchAttribute, String)> {
        self.searches.borrow().clone()
    }
}

impl DirectoryClient for FakeDirectory {
    fn search_by_attribute(
        &self,
        attribute: SearchAttribute,
        value: &str,
    ) -> DirectoryResult<Vec<AttributeSet>> {
        self.searches
            .borrow_mut()
            .push((attribute, value.to_string()));
        if self.failing_values.contains(value) {
            return Err(DirectoryError::Other(format!("server unavailable for {value}")));
        }
        Ok(self
            .people
            .iter()
            .filter(|person| {
                person
                    .first(attribute.ldap_name())
                    .is_some_and(|candidate| candidate.eq_ignore_ascii_case(value))
            })
            .cloned()
            .collect())
    }

    fn list_group_members(&self, group: &str) -> DirectoryResult<Vec<String>> {
        if self.failing_values.contains(group) {
            return Err(DirectoryError::Other(format!("server unavailable for {group}")));
        }
        Ok(self.groups.get(group).cloned().unwrap_or_default())
    }

    fn list_groups_for_member(&self, short_name: &str) -> DirectoryResult<Vec<String>> {
        if self.failing_values.contains(short_name) {
            return Err(DirectoryError::Other(format!(
                "server unavailable for {short_name}"
            )));
        }
        Ok(self
            .groups
            .iter()
            .rev()
            .filter(|(_, members)| members.iter().any(|member| member == short_name))
            .map(|(name, _)| name.clone())
            .collect())
    }
}

pub fn person(employee_id: &str, short_name: &str, first: &str, last: &str) -> AttributeSet {
    AttributeSet::new()
        .with("employeeID", employee_id)
        .with("sAMAccountName", short_name)
        .with("givenName", first)
        .with("sn", last)
        .with("displayName", format!("{first} {last}"))
        .with("userPrincipalName", format!("{short_name}@corp.example.com"))
        .with("department", "Finance")
}
