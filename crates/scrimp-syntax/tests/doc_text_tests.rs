use scrimp_syntax::parse;

#[test]
fn test_doc_attaches_to_struct() {
    let doc = parse("/** A user. */\nstruct User { string name }\nstruct Group { string name }").unwrap();

    assert_eq!(doc.structs[0].doc_text, "A user.");
    assert_eq!(doc.structs[1].doc_text, "");
}

#[test]
fn test_document_doc_from_first_header() {
    let source = "/** file docs */\nnamespace * a\n/** later */\ninclude 'b'\nstruct S {}";
    let doc = parse(source).unwrap();

    assert_eq!(doc.doc_text, "file docs");
    assert_eq!(doc.structs[0].doc_text, "");
}

#[test]
fn test_document_doc_from_later_header() {
    let doc = parse("namespace * a\n/** from include */\ninclude 'b'").unwrap();
    assert_eq!(doc.doc_text, "from include");
}

#[test]
fn test_doc_without_header_goes_to_first_declaration() {
    let doc = parse("/** only the typedef */ typedef i32 Id").unwrap();

    assert_eq!(doc.doc_text, "");
    assert_eq!(doc.typedefs[0].doc_text, "only the typedef");
}

#[test]
fn test_consecutive_doc_comments_concatenate() {
    let doc = parse("/** first */\n/**second*/\nconst i32 X = 1").unwrap();
    assert_eq!(doc.consts[0].doc_text, "firstsecond");
}

#[test]
fn test_field_docs() {
    let source = r#"
        /** outer */
        struct S {
            /** the id */
            1: i64 id,
            2: string name
            /** the tags */
            3: list<string> tags
        }
    "#;
    let doc = parse(source).unwrap();
    let s = &doc.structs[0];

    assert_eq!(s.doc_text, "outer");
    assert_eq!(s.fields[0].doc_text, "the id");
    assert_eq!(s.fields[1].doc_text, "");
    assert_eq!(s.fields[2].doc_text, "the tags");
}

#[test]
fn test_function_and_argument_docs() {
    let source = r#"
        /** The service. */
        service Svc {
            /** Says hello. */
            string hello(/** who */ 1: string name)
            void quiet()
        }
    "#;
    let doc = parse(source).unwrap();
    let svc = &doc.services[0];

    assert_eq!(svc.doc_text, "The service.");
    assert_eq!(svc.functions[0].doc_text, "Says hello.");
    assert_eq!(svc.functions[0].fields[0].doc_text, "who");
    assert_eq!(svc.functions[1].doc_text, "");
}

#[test]
fn test_trailing_comment_in_body_does_not_leak() {
    let source = "enum E { A /** dangling */ }\nstruct Next {}";
    let doc = parse(source).unwrap();

    assert_eq!(doc.enums[0].doc_text, "");
    assert_eq!(doc.structs[0].doc_text, "");
}

#[test]
fn test_comment_inside_signature_does_not_leak() {
    let source = "service S { void a() throws (/** orphan */) void b() }";
    let doc = parse(source).unwrap();

    assert_eq!(doc.services[0].functions[1].doc_text, "");
}

#[test]
fn test_plain_comments_are_not_docs() {
    let doc = parse("/* plain */\n// line\n# hash\n/**/\nstruct S {}").unwrap();
    assert_eq!(doc.structs[0].doc_text, "");
}

#[test]
fn test_doc_text_is_trimmed() {
    let doc = parse("/**\n\t  padded  \r\n*/ typedef string Name").unwrap();
    assert_eq!(doc.typedefs[0].doc_text, "padded");
}
