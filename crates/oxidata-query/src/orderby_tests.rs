use crate::orderby::{SortOrder, parse_orderby};

#[test]
fn a_bare_field_sorts_ascending() {
    let orderby = parse_orderby("Name").unwrap();
    assert_eq!(orderby.items.len(), 1);
    assert_eq!(orderby.items[0].field.value, "Name");
    assert_eq!(orderby.items[0].order, SortOrder::Asc);
    assert_eq!(orderby.raw_value, "Name");
}

#[test]
fn directions_are_case_insensitive() {
    let orderby = parse_orderby("Name desc, Age ASC, Created DESC").unwrap();
    let got: Vec<_> = orderby
        .items
        .iter()
        .map(|item| (item.field.value.as_str(), item.order))
        .collect();
    assert_eq!(
        got,
        vec![
            ("Name", SortOrder::Desc),
            ("Age", SortOrder::Asc),
            ("Created", SortOrder::Desc),
        ]
    );
}

#[test]
fn unknown_directions_are_rejected() {
    let err = parse_orderby("Name sideways").unwrap_err();
    assert_eq!(err.to_string(), "could not parse $orderby query");
}

#[test]
fn empty_items_are_rejected() {
    assert!(parse_orderby("").is_err());
    assert!(parse_orderby("Name,,Age").is_err());
}

#[test]
fn sort_order_displays_as_odata_keywords() {
    assert_eq!(SortOrder::Asc.to_string(), "asc");
    assert_eq!(SortOrder::Desc.to_string(), "desc");
}
