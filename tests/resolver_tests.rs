// tests/resolver_tests.rs
//! Integration tests for namespace and class resolution
//!
//! Each test resolves a fixture from `test_scripts/` and checks the
//! namespace and imports attributed to every discovered class.


use nsresolve::*;
use test_harness::{TestHarness, pairs};

#[test]
fn test_no_namespace() {
    let harness = TestHarness::new();
    let result = harness.load_and_resolve("no_namespace.php");

    assert_eq!(
        result.class_namespaces(),
        pairs(&[("Greeter", ""), ("ConsoleGreeter", "")])
    );
    assert_eq!(
        result.aliases_of("ConsoleGreeter"),
        pairs(&[("Helper", "Vendor\\Package\\Helper")])
    );
    assert_eq!(result.class("Greeter").kind, ClassKind::Interface);
}

#[test]
fn test_unbraced_namespace() {
    let harness = TestHarness::new();
    let result = harness.load_and_resolve("unbraced_namespace.php");

    assert_eq!(
        result.class_namespaces(),
        pairs(&[
            ("Controller", "App\\Http\\Controllers"),
            ("UserController", "App\\Http\\Controllers"),
            ("Status", "App\\Http\\Controllers"),
        ])
    );

    let expected = pairs(&[
        ("HttpRequest", "Illuminate\\Http\\Request"),
        ("Str", "Illuminate\\Support\\Str"),
        ("User", "App\\Models\\User"),
    ]);
    assert_eq!(result.aliases_of("Controller"), expected);
    // Trait composition inside the class body is not an import
    assert_eq!(result.aliases_of("UserController"), expected);

    let status = result.class("Status");
    assert_eq!(status.kind, ClassKind::Enum);
    assert_eq!(status.line, 26);
    assert_eq!(status.imports.function("helper"), Some("App\\Support\\helper"));
    assert_eq!(status.imports.constant("VERSION"), Some("App\\Support\\VERSION"));

    let namespaces = &result.assert_success().namespaces;
    assert_eq!(namespaces.len(), 2);
    assert_eq!(namespaces[1].style, NamespaceStyle::Unbraced);
    assert_eq!(namespaces[1].start_line, 5);
}

#[test]
fn test_multiple_braced_namespaces() {
    let harness = TestHarness::new();
    let result = harness.load_and_resolve("multiple_braced_namespaces.php");

    assert_eq!(
        result.class_namespaces(),
        pairs(&[
            ("Product", "Shop\\Catalog"),
            ("Searchable", "Shop\\Catalog"),
            ("Cart", "Shop\\Checkout"),
            ("GlobalHelper", ""),
        ])
    );

    assert_eq!(
        result.aliases_of("Product"),
        pairs(&[("Price", "Shop\\Money\\Price")])
    );
    assert_eq!(
        result.aliases_of("Cart"),
        pairs(&[
            ("Cur", "Shop\\Money\\Currency"),
            ("Price", "Shop\\Money\\Price"),
            ("Product", "Shop\\Catalog\\Product"),
        ])
    );
    assert!(result.class("GlobalHelper").imports.is_empty());

    let blocks = &result.assert_success().namespaces;
    let styles: Vec<_> = blocks.iter().map(|b| b.style).collect();
    assert_eq!(
        styles,
        vec![
            NamespaceStyle::Global,
            NamespaceStyle::Braced,
            NamespaceStyle::Braced,
            NamespaceStyle::Braced,
        ]
    );
    assert_eq!((blocks[1].start_line, blocks[1].end_line), (3, 12));
}

#[test]
fn test_commented_namespace() {
    let harness = TestHarness::new();
    let result = harness.load_and_resolve("commented_namespace.php");

    assert_eq!(result.class_namespaces(), pairs(&[("Actual", "Current")]));
    assert_eq!(
        result.aliases_of("Actual"),
        pairs(&[("Dependency", "Real\\Dependency")])
    );
}

#[test]
fn test_closure_in_namespace() {
    let harness = TestHarness::new();
    let result = harness.load_and_resolve("closure_in_namespace.php");

    assert_eq!(
        result.class_namespaces(),
        pairs(&[("EventServiceProvider", "App\\Events")])
    );
    assert_eq!(
        result.aliases_of("EventServiceProvider"),
        pairs(&[
            ("Dispatcher", "App\\Contracts\\Dispatcher"),
            ("ListenerContract", "App\\Contracts\\Listener"),
        ])
    );
}

#[test]
fn test_use_after_class() {
    let harness = TestHarness::new();
    let result = harness.load_and_resolve("trailing_use.php");

    assert_eq!(
        result.aliases_of("Order"),
        pairs(&[("Money", "Domain\\Values\\Money")])
    );
}

#[test]
fn test_last_class_in_block() {
    let harness = TestHarness::new();
    let result = harness.load_and_resolve("last_class_in_block.php");

    assert_eq!(
        result.class_namespaces(),
        pairs(&[("One", "First"), ("Two", "First"), ("Three", "Second")])
    );
    assert_eq!(result.aliases_of("Two"), pairs(&[("Alpha", "A\\Alpha")]));
    assert_eq!(result.aliases_of("Three"), pairs(&[("Beta", "B\\Beta")]));
}

#[test]
fn test_inline_html() {
    let harness = TestHarness::new();
    let result = harness.load_and_resolve("inline_html.php");

    assert_eq!(result.class_namespaces(), pairs(&[("Page", "Views")]));
    assert_eq!(
        result.aliases_of("Page"),
        pairs(&[("Renderer", "App\\View\\Renderer")])
    );
}

#[test]
fn test_nested_namespace_error() {
    let harness = TestHarness::new();
    let result = harness.load_and_resolve("nested_namespace.php");

    let err = result.assert_error(ResolveErrorKind::NestedNamespace, 6);
    assert!(err.message.contains("`Outer`"));
    assert!(
        err.label
            .as_deref()
            .is_some_and(|l| l.ends_with("nested_namespace.php"))
    );
}

#[test]
fn test_unbalanced_braces_error() {
    let harness = TestHarness::new();
    let result = harness.load_and_resolve("unbalanced_braces.php");

    let err = result.assert_error(ResolveErrorKind::UnbalancedBrace, 14);
    let rendered = err.display_with_source(result.unit.text());
    assert!(rendered.contains(" 14 | }"));
}

#[test]
fn test_kind_filter() {
    let harness = TestHarness::new()
        .with_options(ResolverOptions::new().with_kinds(DeclKinds::CLASS));
    let result = harness.load_and_resolve("unbraced_namespace.php");

    let names: Vec<_> = result
        .class_namespaces()
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(names, vec!["Controller", "UserController"]);
}

#[test]
fn test_size_limit() {
    let harness = TestHarness::new()
        .with_options(ResolverOptions::new().with_max_source_len(16));
    let result = harness.load_and_resolve("no_namespace.php");

    result.assert_error(ResolveErrorKind::SourceTooLarge, 1);
}

#[test]
fn test_batch_resolution() {
    let harness = TestHarness::new();
    let units: Vec<SourceUnit> = [
        "last_class_in_block.php",
        "nested_namespace.php",
        "trailing_use.php",
    ]
    .iter()
    .map(|name| load(harness.path(name)).unwrap())
    .collect();

    let results = resolve_all(&units, &ResolverOptions::default());
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().classes.len(), 3);
    assert_eq!(results[1].as_ref().unwrap_err().line(), Some(6));
    assert_eq!(results[2].as_ref().unwrap().classes[0].name, "Order");
}

#[test]
fn test_resolve_file() {
    let harness = TestHarness::new();
    let result = resolve_file(harness.path("trailing_use.php")).unwrap();

    assert!(result.label.as_deref().is_some_and(|l| l.ends_with("trailing_use.php")));
    assert_eq!(
        result.classes[0].fully_qualified_name().to_string(),
        "Domain\\Order"
    );
}

#[test]
fn test_stripping_blanks_only_comments_and_literals() {
    let harness = TestHarness::new();
    let unit = load(harness.path("commented_namespace.php")).unwrap();
    let stripped = strip::strip(unit.text());

    assert_eq!(stripped.text().len(), unit.text().len());
    assert_eq!(stripped.text().lines().count(), unit.text().lines().count());

    // Outside the reported regions nothing changed.
    for (offset, (a, b)) in unit.text().bytes().zip(stripped.text().bytes()).enumerate() {
        if !stripped.is_blanked(offset) {
            assert_eq!(a, b, "byte {offset} changed outside a blanked region");
        } else if a != b'\n' && a != b'\r' {
            assert_eq!(b, b' ');
        }
    }
    assert!(!stripped.text().contains("Legacy"));
    assert!(!stripped.text().contains("Nope"));
}

#[test]
fn test_token_codes() {
    let tokens = Lexer::tokenize("namespace A;");
    let codes: Vec<u16> = tokens.iter().map(|t| t.code()).collect();
    assert_eq!(codes[0], u16::from(TokenKind::Namespace));
    assert_eq!(codes.last().copied(), Some(u16::from(TokenKind::Eof)));
}

#[test]
fn test_hash_service() {
    assert!(HashAlgorithm::is_supported("sha256"));
    assert!(!HashAlgorithm::is_supported("md5"));

    let harness = TestHarness::new();
    let unit = load(harness.path("trailing_use.php")).unwrap();

    let mut whole = Hasher::new("xxh3").unwrap();
    whole.set(unit.text());

    let (head, tail) = unit.text().split_at(10);
    let mut pieces = Hasher::new("xxh3").unwrap();
    pieces.set(head).append(tail);

    assert_eq!(whole.digest(), pieces.digest());
    assert_eq!(whole.digest().len(), 16);

    let err: Error = Hasher::new("crc32").unwrap_err().into();
    assert!(err.to_string().contains("crc32"));
}
