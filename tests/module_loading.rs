//! Loading and export resolution of script modules.

use scriptmod::{Error, testutils::loader};

const MAIN: &str = include_str!("../scripts/main.rhai");
const LOGGER: &str = include_str!("../scripts/logger.rhai");
const GUARDED: &str = include_str!("../scripts/guarded.rhai");

#[test]
fn resolves_export_name_and_callables() {
    let (_host, loader) = loader();
    let module = loader.load(MAIN).unwrap();
    assert_eq!(module.name(), "Main");
    let names: Vec<&str> = module.callables().collect();
    assert_eq!(names, ["First", "Second", "Third"]);
}

#[test]
fn every_shipped_module_resolves() {
    let (_host, loader) = loader();
    for source in [MAIN, LOGGER, GUARDED] {
        let module = loader.load(source).unwrap();
        assert!(module.callables().count() > 0);
    }
}

#[test]
fn load_runs_top_level_side_effects() {
    let (host, loader) = loader();
    let module = loader.load(LOGGER).unwrap();
    assert_eq!(module.name(), "Logger");
    // The load-time log line arrives before any invocation.
    assert_eq!(host.clogs(), ["Logger module loaded."]);
}

#[test]
fn missing_export_variable_is_a_resolution_error() {
    let (_host, loader) = loader();
    let err = loader.load("let Main = #{};\n\"Other\"").unwrap_err();
    assert!(matches!(err, Error::ExportNotFound { name } if name == "Other"));
}

#[test]
fn non_string_export_is_rejected() {
    let (_host, loader) = loader();
    let err = loader.load("let Main = #{};\n42").unwrap_err();
    assert!(matches!(err, Error::ExportName(_)));
}

#[test]
fn export_must_be_an_object() {
    let (_host, loader) = loader();
    let err = loader.load("let Main = 7;\n\"Main\"").unwrap_err();
    assert!(matches!(err, Error::NotCallable { name } if name == "Main"));
}

#[test]
fn data_properties_are_skipped_during_resolution() {
    // A mixed export still resolves; only the callable properties form the
    // module surface.
    let source = r#"
let Main = #{
    Count: 3,
    First: || ExposedObject.stdClog("x"),
};

"Main"
"#;
    let (host, loader) = loader();
    let mut module = loader.load(source).unwrap();
    let names: Vec<&str> = module.callables().collect();
    assert_eq!(names, ["First"]);
    module.invoke("First").unwrap();
    assert_eq!(host.clogs(), ["x"]);
}

#[test]
fn syntax_errors_surface_as_parse() {
    let (_host, loader) = loader();
    let err = loader.load("let = ;").unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}

#[test]
fn parse_reports_carry_the_failing_line() {
    let (_host, loader) = loader();
    let err = loader.load("let Main = #{};\nlet = ;").unwrap_err();
    let info = err.info();
    assert_eq!(info.error_type, "parse");
    assert_eq!(info.location.as_deref(), Some("line 2"));
}

#[test]
fn unknown_names_are_rejected_at_compile_time() {
    // Strict variables: referencing anything not in scope fails before the
    // module body runs, even inside a callable.
    let (host, loader) = loader();
    let err = loader
        .load("let Main = #{ First: || Missing.stdClog(\"x\") };\n\"Main\"")
        .unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
    assert!(host.calls().is_empty());
}

#[test]
fn loads_are_isolated() {
    // A variable declared by one load is not visible to the next.
    let (_host, loader) = loader();
    loader.load(MAIN).unwrap();
    let err = loader.load("\"Main\"").unwrap_err();
    assert!(matches!(err, Error::ExportNotFound { .. }));
}
