use crate::expand::parse_expand;

#[test]
fn splits_path_segments() {
    let expand = parse_expand("Products/Categories").unwrap();
    assert_eq!(expand.items.len(), 1);
    let path: Vec<_> = expand.items[0].path.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(path, ["Products", "Categories"]);
}

#[test]
fn splits_items_on_top_level_commas() {
    let expand = parse_expand("Orders,Customers").unwrap();
    assert_eq!(expand.items.len(), 2);
    assert_eq!(expand.items[0].path[0].value, "Orders");
    assert_eq!(expand.items[1].path[0].value, "Customers");
}

#[test]
fn parses_a_nested_filter() {
    let expand = parse_expand("Products($filter=DiscontinuedDate eq null)").unwrap();
    let item = &expand.items[0];
    assert_eq!(item.path[0].value, "Products");
    let filter = item.filter.as_ref().expect("filter parsed");
    assert_eq!(filter.tree.token.value, "eq");
    assert_eq!(filter.raw_value, "DiscontinuedDate eq null");
}

#[test]
fn nested_commas_stay_inside_one_item() {
    let expand = parse_expand("DirectReports($select=FirstName,LastName;$levels=4)").unwrap();
    assert_eq!(expand.items.len(), 1);
    let item = &expand.items[0];
    assert_eq!(item.path[0].value, "DirectReports");
    let select = item.select.as_ref().expect("select parsed");
    assert_eq!(select.items[0].segments[0].value, "FirstName");
    assert_eq!(select.items[1].segments[0].value, "LastName");
    assert_eq!(item.levels, Some(4));
}

#[test]
fn nested_parentheses_stay_inside_the_option_value() {
    let expand = parse_expand("Products($filter=not (DiscontinuedDate eq null))").unwrap();
    let filter = expand.items[0].filter.as_ref().expect("filter parsed");
    assert_eq!(filter.tree.token.value, "not");
}

#[test]
fn expand_options_nest_recursively() {
    let expand = parse_expand("Products($expand=Categories($top=2);$top=5)").unwrap();
    let item = &expand.items[0];
    assert_eq!(item.top.map(|t| t.0), Some(5));
    let nested = item.expand.as_ref().expect("nested expand parsed");
    assert_eq!(nested.items[0].path[0].value, "Categories");
    assert_eq!(nested.items[0].top.map(|t| t.0), Some(2));
}

#[test]
fn mismatched_parentheses_are_rejected() {
    for input in ["Products(", "Products)", "Products($filter=A eq B"] {
        let err = parse_expand(input).unwrap_err();
        assert_eq!(
            err.to_string(),
            "mismatched parentheses in expand clause",
            "input: {input}"
        );
    }
}

#[test]
fn an_option_without_a_value_is_invalid() {
    let err = parse_expand("Products($filter)").unwrap_err();
    assert_eq!(err.to_string(), "invalid expand clause");
}
