use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;

use lsrs::dispatch::resolve_args;
use lsrs::error::ErrorKind;
use lsrs::options::{
    loader, ArgScanner, Code, FlagQueue, JsonSource, OptionId, OptionResolver, OptionTable, Resolved,
};

fn write_json(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path.display().to_string()
}

/// Runs the resolver the way dispatch does, recording what came out in order.
fn trace(args: &[String]) -> Vec<String> {
    let mut resolver = OptionResolver::new(OptionTable::builtin(), ArgScanner::new(args.iter().cloned()));
    let mut seen = Vec::new();
    while let Some(item) = resolver.next_step().unwrap() {
        match item {
            Resolved::Operand(path) => seen.push(format!("operand {path}")),
            Resolved::Option(option) => {
                match (&option.code, option.argument) {
                    (Code::Known(id @ (OptionId::JsonOptions | OptionId::Json)), Some(source)) => {
                        let source = JsonSource::new(source, *id == OptionId::Json);
                        loader::load(&source, resolver.queue_mut()).unwrap();
                    }
                    _ => {}
                }
                seen.push(format!("{:?}", option.code));
            }
        }
    }
    seen
}

#[test]
fn nested_file_is_expanded_before_scanning_resumes() {
    let dir = tempfile::tempdir().unwrap();
    let extra = write_json(dir.path(), "extra.json", r#"{"r": true}"#);
    let top = write_json(dir.path(), "top.json", &format!(r#"{{"l": true, "j": {extra:?}}}"#));

    let args = vec!["-j".to_owned(), top, "-a".to_owned()];
    assert_eq!(
        trace(&args),
        vec![
            "Known(JsonOptions)",
            "Known(Long)",
            "Known(JsonOptions)",
            "Known(Recursive)",
            "Known(All)",
        ]
    );
}

#[test]
fn loads_append_behind_already_queued_flags() {
    let dir = tempfile::tempdir().unwrap();
    let inner = write_json(dir.path(), "inner.json", r#"{"S": null, "t": true}"#);
    let outer = write_json(
        dir.path(),
        "outer.json",
        &format!(r#"{{"j": {inner:?}, "long": true, "m": true}}"#),
    );

    let args = vec!["--json-options".to_owned(), outer, "src".to_owned()];
    assert_eq!(
        trace(&args),
        vec![
            "Known(JsonOptions)",
            "Known(JsonOptions)",
            "Known(Long)",
            "Known(Stream)",
            "Known(SortSize)",
            "Known(SortMtime)",
            "operand src",
        ]
    );
}

#[test]
fn unknown_options_are_reported_in_resolution_order() {
    let dir = tempfile::tempdir().unwrap();
    let inner = write_json(dir.path(), "inner.json", r#"{"b1": true, "r": true}"#);
    let outer = write_json(dir.path(), "outer.json", &format!(r#"{{"a1": true, "j": {inner:?}, "c1": null}}"#));

    let mut diag = Vec::<u8>::new();
    let resolution = resolve_args("lsrs", ["-j".to_owned(), outer, "--bogus".to_owned()], &mut diag).unwrap();
    assert_eq!(resolution.unknown, vec!["a1", "c1", "b1", "--bogus"]);
    assert!(resolution.flags.recursive);
    assert_eq!(
        String::from_utf8(diag).unwrap(),
        "lsrs: a1: No such option\nlsrs: c1: No such option\nlsrs: b1: No such option\nlsrs: --bogus: No such option\n"
    );
}

#[test]
fn file_source_produces_flags_in_key_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_json(dir.path(), "opts.json", r#"{"all": true, "sizes": null, "width": 120, "x": "y"}"#);

    let mut queue = FlagQueue::new();
    loader::load(&JsonSource::new(path, false), &mut queue).unwrap();
    let flags: Vec<_> = queue
        .iter()
        .map(|flag| (flag.name.as_str(), flag.argument.as_deref()))
        .collect();
    assert_eq!(
        flags,
        vec![("all", None), ("sizes", None), ("width", Some("120")), ("x", Some("y"))]
    );
}

#[test]
fn non_object_file_is_fatal_and_nothing_is_applied() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_json(dir.path(), "list.json", "[1,2,3]");

    let mut diag = Vec::<u8>::new();
    let error = resolve_args("lsrs", ["-l".to_owned(), "-j".to_owned(), path.clone()], &mut diag).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Schema);
    assert_eq!(error.to_string(), format!("{path}: contents are not a JSON object"));
    assert!(diag.is_empty());
}

#[test]
fn malformed_file_is_a_parse_error_naming_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_json(dir.path(), "broken.json", "{\"l\": true,");

    let error = resolve_args("lsrs", ["-j".to_owned(), path.clone()], &mut std::io::sink()).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Parse);
    assert!(error.to_string().starts_with(&format!("{path}: ")));
}

#[test]
fn nested_arity_error_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let inner = write_json(dir.path(), "inner.json", r#"{"recursive": "yes"}"#);
    let outer = write_json(dir.path(), "outer.json", &format!(r#"{{"json-options": {inner:?}}}"#));

    let error = resolve_args("lsrs", ["-j".to_owned(), outer], &mut std::io::sink()).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Arity);
    assert_eq!(
        error.to_string(),
        "recursive does not require an argument but one was specified"
    );
}

#[test]
fn numeric_argument_reaches_dispatch_as_text() {
    // a number is a valid argument; "json" then fails to parse "5" as an object
    let error = resolve_args("lsrs", ["-J".to_owned(), r#"{"J": 5}"#.to_owned()], &mut std::io::sink()).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Schema);
    assert_eq!(error.to_string(), "5: contents are not a JSON object");
}

#[test]
fn unknown_json_option_is_reported_once() {
    let mut diag = Vec::<u8>::new();
    let resolution = resolve_args(
        "lsrs",
        ["-J".to_owned(), r#"{"x": true, "all": true}"#.to_owned()],
        &mut diag,
    )
    .unwrap();
    assert_eq!(resolution.unknown, vec!["x".to_owned()]);
    assert!(resolution.flags.show_hidden);
    assert_eq!(String::from_utf8(diag).unwrap(), "lsrs: x: No such option\n");
}
