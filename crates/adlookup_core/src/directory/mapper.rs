use super::AttributeSet;
use crate::model::employee::{Employee, SearchAttribute};

/// Projects a raw attribute set onto the flat employee record.
///
/// Missing attributes become `""`; multi-valued attributes keep their first
/// value only.
pub fn map_employee(attributes: &AttributeSet) -> Employee {
    let mut employee = Employee::new();
    for attribute in SearchAttribute::ALL {
        if let Some(value) = attributes.first(attribute.ldap_name()) {
            *attribute.field_of_mut(&mut employee) = value.to_string();
        }
    }
    employee
}

#[cfg(test)]
mod tests {
    use super::map_employee;
    use crate::directory::AttributeSet;
    use crate::model::employee::SearchAttribute;

    #[test]
    fn missing_attributes_map_to_empty_strings() {
        let employee = map_employee(&AttributeSet::new().with("sAMAccountName", "jdoe"));
        assert_eq!(employee.short_name, "jdoe");
        for attribute in SearchAttribute::ALL {
            if attribute != SearchAttribute::ShortName {
                assert_eq!(attribute.field_of(&employee), "", "{attribute}");
            }
        }
    }

    #[test]
    fn multi_valued_attribute_keeps_first_value() {
        let mut attributes = AttributeSet::new();
        attributes.insert(
            "otherTelephone",
            vec!["+1 555 0100".to_string(), "+1 555 0199".to_string()],
        );
        let employee = map_employee(&attributes);
        assert_eq!(employee.other_phone, "+1 555 0100");
    }

    #[test]
    fn empty_value_list_maps_to_empty_string() {
        let mut attributes = AttributeSet::new();
        attributes.insert("title", Vec::new());
        assert_eq!(map_employee(&attributes).title, "");
    }

    #[test]
    fn server_casing_of_attribute_names_is_accepted() {
        let attributes = AttributeSet::new()
            .with("samaccountname", "jdoe")
            .with("DisplayName", "John Doe")
            .with("facsimiletelephonenumber", "+1 555 0142")
            .with("physicaldeliveryofficename", "Oslo");
        let employee = map_employee(&attributes);
        assert_eq!(employee.short_name, "jdoe");
        assert_eq!(employee.display_name, "John Doe");
        assert_eq!(employee.fax, "+1 555 0142");
        assert_eq!(employee.location, "Oslo");
    }
}
