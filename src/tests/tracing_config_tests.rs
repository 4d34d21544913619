use crate::tracing_config::{LogFormat, LogSettings};

#[test]
fn test_log_format_names() {
    assert_eq!(LogFormat::parse("tree"), LogFormat::Tree);
    assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
    assert_eq!(LogFormat::parse("text"), LogFormat::Text);
    assert_eq!(LogFormat::parse(""), LogFormat::Text);
    assert_eq!(LogFormat::parse("yaml"), LogFormat::Text);
}

fn vars<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
    move |name: &str| {
        pairs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.to_string())
    }
}

#[test]
fn test_logging_off_without_directives() {
    assert_eq!(LogSettings::from_vars(vars(&[("ENUMGEN_LOG_FORMAT", "tree")])), None);
}

#[test]
fn test_enumgen_log_wins_over_rust_log() {
    let settings = LogSettings::from_vars(vars(&[
        ("RUST_LOG", "warn"),
        ("ENUMGEN_LOG", "enumgen_binder=trace"),
        ("ENUMGEN_LOG_FORMAT", "json"),
    ]))
    .unwrap();
    assert_eq!(settings.directives, "enumgen_binder=trace");
    assert_eq!(settings.format, LogFormat::Json);

    let fallback = LogSettings::from_vars(vars(&[("RUST_LOG", "debug")])).unwrap();
    assert_eq!(fallback.directives, "debug");
    assert_eq!(fallback.format, LogFormat::Text);
}
