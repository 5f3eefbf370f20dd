#![cfg(feature = "serde")]

use scrimp_syntax::parse;

#[test]
fn test_serialized_field_names() {
    let doc = parse("/** docs */ namespace * x\nstruct S { 1: required i32 a = 3 }").unwrap();
    let value = serde_json::to_value(&doc).unwrap();

    assert_eq!(value["docText"], "docs");
    assert_eq!(value["namespaces"]["*"], "x");

    let field = &value["structs"][0]["fields"][0];
    assert_eq!(field["index"], 1);
    assert_eq!(field["fieldType"], "i32");
    assert_eq!(field["defaultValue"], "3");
    assert_eq!(field["required"], true);
}
