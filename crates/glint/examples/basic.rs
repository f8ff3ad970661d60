#![forbid(unsafe_code)]

use glint::{Attr, HandlerOptions, Level, PrettyHandler, Record};

fn main() -> Result<(), glint::Error> {
    let log = PrettyHandler::stdout(HandlerOptions {
        level: Level::Debug,
        ..HandlerOptions::default()
    });

    log.handle(&Record::now(Level::Info, "server listening"))?;

    if log.enabled(Level::Debug) {
        let mut loaded = Record::now(Level::Debug, "config loaded");
        loaded.add_attrs([Attr::string("path", "/etc/app.toml"), Attr::int("keys", 12)]);
        log.handle(&loaded)?;
    }

    let request_log = log
        .with_group("request")
        .with_attrs(vec![Attr::string("id", "9f2c")]);

    let mut handled = Record::now(Level::Info, "request handled");
    handled.add_attrs([Attr::int("status", 200), Attr::float("elapsed_ms", 3.7)]);
    request_log.handle(&handled)?;

    let mut refused = Record::now(Level::Error, "upstream refused connection");
    refused.add_attrs([Attr::group(
        "peer",
        vec![Attr::string("host", "10.0.0.7"), Attr::uint("port", 8443)],
    )]);
    request_log.handle(&refused)?;

    Ok(())
}
