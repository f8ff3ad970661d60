#![forbid(unsafe_code)]

use glint::{Attr, HandlerOptions, Level, PrettyHandler, Record, keys};
use std::sync::Arc;

fn main() -> Result<(), glint::Error> {
    let options = HandlerOptions {
        replace_attr: Some(Arc::new(|groups: &[String], attr: Attr| {
            // Drop the clock column so output is stable across runs.
            if groups.is_empty() && attr.key == keys::TIMESTAMP {
                return None;
            }
            // Mask card numbers wherever they appear.
            if attr.key == "card" {
                return Some(Attr::string(attr.key, "****"));
            }
            Some(attr)
        })),
        ..HandlerOptions::default()
    };

    let log = PrettyHandler::new(options, std::io::stdout());

    let mut paid = Record::now(Level::Info, "payment accepted");
    paid.add_attrs([
        Attr::string("card", "4111111111111111"),
        Attr::float("amount", 12.50),
        Attr::group("customer", vec![Attr::string("card", "5500005555555559")]),
    ]);
    log.handle(&paid)?;

    Ok(())
}
