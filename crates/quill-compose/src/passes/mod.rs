//! Structural transform passes.
//!
//! Each pass is a pure function from text to text. [`apply`] runs them in
//! their fixed order; the order matters and is the only place it lives.

mod block;
mod callout;
mod disclosure;
mod heading;
mod inline;
mod inline_code;
pub(crate) mod paragraph;
mod table;

use crate::Locale;
use crate::placeholder::Placeholders;

/// Run the structural passes over `text`.
pub(crate) fn apply(text: &str, locale: Locale, regions: &mut Placeholders) -> String {
    let text = inline_code::apply(text, regions);
    let text = disclosure::apply(&text, locale);
    let text = heading::apply(&text, locale);
    let text = table::apply(&text);
    let text = block::apply(&text);
    let text = inline::apply(&text);
    callout::apply(&text)
}
