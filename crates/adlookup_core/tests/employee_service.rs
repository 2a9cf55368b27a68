mod common;

use adlookup_core::{EmployeeService, LookupError, LookupField, SearchAttribute};
use common::FakeDirectory;

#[test]
fn short_name_lookup_returns_single_record() {
    let service = EmployeeService::new(FakeDirectory::seeded());

    let employees = service.by_short_name("jdoe").unwrap();

    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].employee_id, "4711");
    assert_eq!(employees[0].display_name, "John Doe");
    assert_eq!(employees[0].email, "jdoe@corp.example.com");
    assert_eq!(employees[0].mobile, "");
}

#[test]
fn unknown_employee_number_returns_empty_list() {
    let service = EmployeeService::new(FakeDirectory::seeded());
    assert!(service.by_employee_number(999_999).unwrap().is_empty());
}

#[test]
fn find_employee_falls_through_to_later_fields() {
    let directory = FakeDirectory::seeded();
    let service = EmployeeService::new(&directory);

    let employees = service.find_employee("asmith@corp.example.com").unwrap();

    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].short_name, "asmith");
    let attributes = directory
        .searches()
        .into_iter()
        .map(|(attribute, _)| attribute)
        .collect::<Vec<_>>();
    assert_eq!(
        attributes,
        [
            SearchAttribute::ShortName,
            SearchAttribute::DisplayName,
            SearchAttribute::Email
        ]
    );
}

#[test]
fn find_employee_stops_at_first_hit() {
    let directory = FakeDirectory::seeded();
    let service = EmployeeService::new(&directory);

    service.find_employee("jdoe").unwrap();

    assert_eq!(directory.searches().len(), 1);
}

#[test]
fn find_employee_tries_employee_number_for_numeric_input() {
    let directory = FakeDirectory::seeded();
    let service = EmployeeService::new(&directory);

    let employees = service.find_employee("4712").unwrap();

    assert_eq!(employees[0].short_name, "asmith");
    assert_eq!(
        directory.searches().last().unwrap(),
        &(SearchAttribute::EmployeeId, "4712".to_string())
    );
}

#[test]
fn find_employee_skips_number_search_for_text() {
    let directory = FakeDirectory::seeded();
    let service = EmployeeService::new(&directory);

    assert!(service.find_employee("nobody").unwrap().is_empty());
    assert_eq!(directory.searches().len(), 3);
}

#[test]
fn group_members_are_expanded_in_membership_order() {
    let service = EmployeeService::new(FakeDirectory::seeded());

    let members = service.members_in_group("Finance").unwrap();

    let short_names = members
        .iter()
        .map(|employee| employee.short_name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(short_names, ["jdoe", "asmith"]);
}

#[test]
fn unknown_group_has_no_members() {
    let service = EmployeeService::new(FakeDirectory::seeded());
    assert!(service.members_in_group("Nope").unwrap().is_empty());
    assert!(service.members_in_group("Orphans").unwrap().is_empty());
}

#[test]
fn groups_for_member_are_sorted() {
    let service = EmployeeService::new(FakeDirectory::seeded());
    assert_eq!(
        service.groups_for_member("jdoe").unwrap(),
        ["Finance", "VPN Users"]
    );
}

#[test]
fn employee_id_field_rejects_non_numeric_input() {
    let service = EmployeeService::new(FakeDirectory::seeded());

    let err = LookupField::EmployeeId.search(&service, "jdoe").unwrap_err();

    assert!(matches!(err, LookupError::InvalidEmployeeNumber(_)));
}

#[test]
fn directory_failures_surface_as_lookup_errors() {
    let service = EmployeeService::new(FakeDirectory::seeded().failing_on("jdoe"));

    let err = service.by_short_name("jdoe").unwrap_err();

    assert!(matches!(err, LookupError::Directory(_)));
    assert_eq!(err.to_string(), "server unavailable for jdoe");
}
